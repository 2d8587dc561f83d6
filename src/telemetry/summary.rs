use super::{
    stats::{average, max, min},
    types::Dataset,
};

pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsSummary {
    pub min_voltage: Option<f64>,
    pub max_voltage: Option<f64>,
    pub avg_voltage: f64,
    pub avg_current: f64,
    pub peak_power: Option<f64>,
}

impl AnalyticsSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            min_voltage: min(dataset.voltage()),
            max_voltage: max(dataset.voltage()),
            avg_voltage: average(dataset.voltage()),
            avg_current: average(dataset.current()),
            peak_power: max(dataset.power()),
        }
    }
}

/// Latest value of each quantity, as shown on the dashboard cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatestValues {
    pub voltage: Option<f64>,
    pub current: Option<f64>,
    pub power: Option<f64>,
}

impl LatestValues {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let latest = dataset.latest();

        Self {
            voltage: latest.as_ref().map(|reading| reading.voltage),
            current: latest.as_ref().map(|reading| reading.current),
            power: latest.as_ref().map(|reading| reading.power),
        }
    }
}

/// Fixed-point formatting where an exact tie rounds away from zero, unlike
/// `{:.N}` which rounds ties to even.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    // Every finite f64 has at most 1074 fractional digits, so this expansion
    // is exact and the first dropped digit decides the rounding.
    let exact = format!("{:.1074}", value.abs());
    let (integer, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut kept = integer.bytes().chain(fraction.bytes().take(digits)).collect::<Vec<_>>();
    if fraction.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        increment(&mut kept);
    }

    let split = kept.len() - digits;
    let mut fixed = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        fixed.push('-');
    }
    fixed.extend(kept[..split].iter().map(|digit| char::from(*digit)));
    if digits > 0 {
        fixed.push('.');
        fixed.extend(kept[split..].iter().map(|digit| char::from(*digit)));
    }
    fixed
}

fn increment(digits: &mut Vec<u8>) {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}

/// Two decimals, or the placeholder when there is no value.
pub fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |value| to_fixed(value, 2))
}

pub fn format_with_unit(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(
        || PLACEHOLDER.to_string(),
        |value| format!("{} {unit}", to_fixed(value, 2)),
    )
}
