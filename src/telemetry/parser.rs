use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, error};

use super::types::{Dataset, Reading};

/// Parses `label,voltage,current,power` rows. The first non-blank line is
/// always treated as a header and dropped without inspection.
///
/// Parsing never fails: a missing or malformed numeric cell becomes `NaN`
/// and is left to poison whatever aggregate it reaches. Quotes carry no
/// meaning, every comma separates two fields.
pub fn parse_csv(text: &str) -> Dataset {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let dataset = reader
        .records()
        .enumerate()
        .filter_map(|(index, record)| match record {
            Ok(record) => Some(record),
            Err(err) => {
                error!(row = index + 1, "csv row error: {err}");
                None
            }
        })
        .filter(|record| !record.iter().all(str::is_empty))
        .map(|record| parse_record(&record))
        .collect::<Dataset>();

    debug!(rows = dataset.len(), "csv parsed");

    dataset
}

fn parse_record(record: &StringRecord) -> Reading {
    Reading {
        label: record.get(0).unwrap_or_default().to_string(),
        voltage: parse_number(record.get(1)),
        current: parse_number(record.get(2)),
        power: parse_number(record.get(3)),
    }
}

fn parse_number(field: Option<&str>) -> f64 {
    field
        .and_then(|field| field.parse().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_dropped_unconditionally() {
        let dataset = parse_csv("t0,3.9,7.0,27.3\nt1,3.8,7.1,27.0\n");

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.time(), ["t1"]);
    }

    #[test]
    fn rows_keep_file_order() {
        let mut text = String::from("time,voltage,current,power\n");
        let rows = (0..50)
            .map(|index| {
                let index = f64::from(index);
                (3.5 + index / 100.0, 6.0 + index / 10.0, 20.0 + index)
            })
            .collect::<Vec<_>>();
        for (index, (voltage, current, power)) in rows.iter().enumerate() {
            text.push_str(&format!("t{index},{voltage},{current},{power}\n"));
        }

        let dataset = parse_csv(&text);

        assert_eq!(dataset.len(), rows.len());
        for (index, (voltage, current, power)) in rows.iter().enumerate() {
            let reading = dataset.get(index).unwrap();
            assert_eq!(reading.label, format!("t{index}"));
            assert!((reading.voltage - voltage).abs() < 1e-9);
            assert!((reading.current - current).abs() < 1e-9);
            assert!((reading.power - power).abs() < 1e-9);
        }
    }

    #[test]
    fn malformed_cells_become_nan() {
        let dataset = parse_csv("time,voltage,current,power\nt0,abc,7.0,\n");

        let reading = dataset.latest().unwrap();
        assert!(reading.voltage.is_nan());
        assert!((reading.current - 7.0).abs() < f64::EPSILON);
        assert!(reading.power.is_nan());
    }

    #[test]
    fn short_rows_are_kept() {
        let dataset = parse_csv("time,voltage,current,power\nt0,3.9\n");

        assert_eq!(dataset.len(), 1);
        let reading = dataset.latest().unwrap();
        assert!((reading.voltage - 3.9).abs() < f64::EPSILON);
        assert!(reading.current.is_nan());
        assert!(reading.power.is_nan());
    }

    #[test]
    fn crlf_and_blank_lines() {
        let dataset = parse_csv("time,voltage,current,power\r\nt0,3.9,7.0,27.3\r\n\r\nt1,3.8,7.2,27.4\r\n\n");

        assert_eq!(dataset.time(), ["t0", "t1"]);
        assert!((dataset.power()[0] - 27.3).abs() < f64::EPSILON);
        assert!((dataset.power()[1] - 27.4).abs() < f64::EPSILON);
    }

    #[test]
    fn leading_blank_lines_before_header() {
        let dataset = parse_csv("\n\ntime,voltage,current,power\nt0,3.9,7.0,27.3\n");

        assert_eq!(dataset.time(), ["t0"]);
        assert!((dataset.voltage()[0] - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn whitespace_only_rows_are_skipped() {
        let dataset = parse_csv("time,voltage,current,power\n  \nt0, 3.9 ,7.0,27.3\n");

        assert_eq!(dataset.len(), 1);
        assert!((dataset.voltage()[0] - 3.9).abs() < f64::EPSILON);
    }

    #[test]
    fn quotes_are_plain_characters() {
        let dataset = parse_csv("time,voltage,current,power\n\"t0,3.9,7.0,27.3\n");

        let reading = dataset.latest().unwrap();
        assert_eq!(reading.label, "\"t0");
        assert!((reading.power - 27.3).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_inputs() {
        assert!(parse_csv("").is_empty());
        assert!(parse_csv("time,voltage,current,power").is_empty());
    }
}
