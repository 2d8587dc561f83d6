use std::fmt;

/// Limits used to classify the latest reading. These are not the chart
/// overlay levels, see [`crate::charts::types::ThresholdSet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusThresholds {
    pub nominal_voltage: f64,
    pub min_safe_voltage: f64,
    pub critical_voltage: f64,
    pub high_current: f64,
}

impl StatusThresholds {
    pub const DEFAULT: Self = Self {
        nominal_voltage: 3.9,
        min_safe_voltage: 3.7,
        critical_voltage: 3.5,
        high_current: 9.5,
    };

    const CRITICAL_CURRENT_FACTOR: f64 = 1.5;
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLabel {
    Normal,
    Warning,
    Critical,
}

impl StatusLabel {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Normal => "status-normal",
            Self::Warning => "status-warning",
            Self::Critical => "status-critical",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Normal => "Battery operating within nominal voltage and current limits.",
            Self::Warning => "Voltage dropping or current high. Monitor operating conditions.",
            Self::Critical => "Voltage or current in unsafe region. Reduce load / disconnect pack.",
        }
    }
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "Normal",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusAssessment {
    pub label: StatusLabel,
    pub voltage: f64,
    pub current: f64,
}

impl StatusAssessment {
    pub fn css_class(&self) -> &'static str {
        self.label.css_class()
    }

    pub fn description(&self) -> &'static str {
        self.label.description()
    }
}

/// Classifies the last element of each sequence. Returns `None` when either
/// sequence is empty.
pub fn classify(voltage: &[f64], current: &[f64]) -> Option<StatusAssessment> {
    classify_with(voltage, current, StatusThresholds::DEFAULT)
}

pub fn classify_with(
    voltage: &[f64],
    current: &[f64],
    thresholds: StatusThresholds,
) -> Option<StatusAssessment> {
    let latest_voltage = *voltage.last()?;
    let latest_current = *current.last()?;

    Some(StatusAssessment {
        label: classify_reading(latest_voltage, latest_current, thresholds),
        voltage: latest_voltage,
        current: latest_current,
    })
}

// First match wins: critical is checked before warning.
fn classify_reading(voltage: f64, current: f64, thresholds: StatusThresholds) -> StatusLabel {
    let current = current.abs();

    if voltage <= thresholds.critical_voltage
        || current >= thresholds.high_current * StatusThresholds::CRITICAL_CURRENT_FACTOR
    {
        StatusLabel::Critical
    } else if voltage < thresholds.min_safe_voltage || current >= thresholds.high_current {
        StatusLabel::Warning
    } else {
        StatusLabel::Normal
    }
}
