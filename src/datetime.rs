use chrono::{DateTime, Utc};

pub fn display_loaded_at(datetime: DateTime<Utc>) -> String {
    datetime
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_precision() {
        let display = display_loaded_at(DateTime::UNIX_EPOCH);

        assert_eq!(display.len(), "1970-01-01 00:00:00".len());
        assert!(display.starts_with("19"));
    }
}
