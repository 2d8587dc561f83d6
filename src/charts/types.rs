use std::{fmt, str::FromStr};

use thiserror::Error;

/// Overlay levels drawn on a chart. Purely visual, the status classifier has
/// its own limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSet {
    pub safe: f64,
    pub warning: f64,
    pub critical: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Voltage,
    Current,
    Power,
}

impl Quantity {
    pub const ALL: [Self; 3] = [Self::Voltage, Self::Current, Self::Power];

    pub fn thresholds(self) -> ThresholdSet {
        match self {
            Self::Voltage => ThresholdSet {
                safe: 4.2,
                warning: 3.7,
                critical: 3.5,
            },
            Self::Current => ThresholdSet {
                safe: 8.0,
                warning: 9.5,
                critical: 11.0,
            },
            Self::Power => ThresholdSet {
                safe: 40.0,
                warning: 50.0,
                critical: 60.0,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Voltage => "Voltage",
            Self::Current => "Current",
            Self::Power => "Power",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Voltage => "V",
            Self::Current => "A",
            Self::Power => "W",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Current => "current",
            Self::Power => "power",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Voltage => "#00f2fe",
            Self::Current => "#1d8cf8",
            Self::Power => "#ff9f43",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.unit())
    }
}

#[derive(Debug, Error)]
#[error("unknown quantity: {0}")]
pub struct ParseQuantityError(String);

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|quantity| quantity.slug() == value)
            .ok_or_else(|| ParseQuantityError(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Safe,
    Warning,
    Critical,
}

impl Level {
    pub const ALL: [Self; 3] = [Self::Safe, Self::Warning, Self::Critical];

    pub fn name(self) -> &'static str {
        match self {
            Self::Safe => "Safe",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Safe => "#2ecc71",
            Self::Warning => "#f1c40f",
            Self::Critical => "#e74c3c",
        }
    }

    pub fn dash(self) -> [f64; 2] {
        match self {
            Self::Safe => [6.0, 4.0],
            Self::Warning => [4.0, 4.0],
            Self::Critical => [2.0, 4.0],
        }
    }

    pub fn value(self, thresholds: ThresholdSet) -> f64 {
        match self {
            Self::Safe => thresholds.safe,
            Self::Warning => thresholds.warning,
            Self::Critical => thresholds.critical,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub values: Vec<f64>,
    pub color: &'static str,
    /// `None` for the live series, which is drawn solid with point markers.
    pub dash: Option<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPayload {
    pub quantity: Quantity,
    pub labels: Vec<String>,
    pub live: ChartSeries,
    pub thresholds: Vec<ChartSeries>,
}

impl ChartPayload {
    pub fn series(&self) -> impl Iterator<Item = &ChartSeries> {
        std::iter::once(&self.live).chain(&self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_from_slug() {
        assert_eq!("voltage".parse::<Quantity>().ok(), Some(Quantity::Voltage));
        assert_eq!("power".parse::<Quantity>().ok(), Some(Quantity::Power));
        assert!("temperature".parse::<Quantity>().is_err());
    }

    #[test]
    fn overlay_levels_differ_from_status_limits() {
        let voltage = Quantity::Voltage.thresholds();

        assert!((voltage.safe - 4.2).abs() < f64::EPSILON);
        assert!((Level::Warning.value(Quantity::Current.thresholds()) - 9.5).abs() < f64::EPSILON);
        assert!((Level::Critical.value(Quantity::Power.thresholds()) - 60.0).abs() < f64::EPSILON);
    }
}
