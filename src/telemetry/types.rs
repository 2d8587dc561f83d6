#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub label: String,
    pub voltage: f64,
    pub current: f64,
    pub power: f64,
}

/// Four aligned sequences, one entry per row of the source file, in file order.
///
/// Only built through [`FromIterator`], so the sequences always grow together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    time: Vec<String>,
    voltage: Vec<f64>,
    current: Vec<f64>,
    power: Vec<f64>,
}

impl Dataset {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            voltage: Vec::with_capacity(capacity),
            current: Vec::with_capacity(capacity),
            power: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, reading: Reading) {
        self.time.push(reading.label);
        self.voltage.push(reading.voltage);
        self.current.push(reading.current);
        self.power.push(reading.power);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[String] {
        &self.time
    }

    pub fn voltage(&self) -> &[f64] {
        &self.voltage
    }

    pub fn current(&self) -> &[f64] {
        &self.current
    }

    pub fn power(&self) -> &[f64] {
        &self.power
    }

    pub fn get(&self, index: usize) -> Option<Reading> {
        Some(Reading {
            label: self.time.get(index)?.clone(),
            voltage: *self.voltage.get(index)?,
            current: *self.current.get(index)?,
            power: *self.power.get(index)?,
        })
    }

    pub fn latest(&self) -> Option<Reading> {
        self.get(self.len().checked_sub(1)?)
    }
}

impl FromIterator<Reading> for Dataset {
    fn from_iter<I: IntoIterator<Item = Reading>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut dataset = Self::with_capacity(iter.size_hint().0);
        for reading in iter {
            dataset.push(reading);
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(label: &str, voltage: f64) -> Reading {
        Reading {
            label: label.to_string(),
            voltage,
            current: 7.0,
            power: voltage * 7.0,
        }
    }

    #[test]
    fn sequences_stay_aligned() {
        let dataset: Dataset = [reading("t0", 3.9), reading("t1", 3.8)]
            .into_iter()
            .collect();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.time().len(), dataset.voltage().len());
        assert_eq!(dataset.current().len(), dataset.power().len());
        assert_eq!(dataset.get(1), Some(reading("t1", 3.8)));
    }

    #[test]
    fn latest_is_last_pushed() {
        let mut dataset = Dataset::default();
        assert_eq!(dataset.latest(), None);

        dataset.push(reading("t0", 3.9));
        dataset.push(reading("t1", 3.6));
        assert_eq!(dataset.latest().map(|reading| reading.label), Some("t1".into()));
    }
}
