use crate::telemetry::types::Dataset;

use super::types::{ChartPayload, ChartSeries, Level, Quantity};

/// Live series of `quantity` plus one constant series per overlay level,
/// every series as long as the time labels.
pub fn build_chart(quantity: Quantity, dataset: &Dataset) -> ChartPayload {
    let values = match quantity {
        Quantity::Voltage => dataset.voltage(),
        Quantity::Current => dataset.current(),
        Quantity::Power => dataset.power(),
    };
    let len = dataset.len();
    let thresholds = quantity.thresholds();

    ChartPayload {
        quantity,
        labels: dataset.time().to_vec(),
        live: ChartSeries {
            label: quantity.to_string(),
            values: values.to_vec(),
            color: quantity.color(),
            dash: None,
        },
        thresholds: Level::ALL
            .into_iter()
            .map(|level| ChartSeries {
                label: format!("{} {} Limit", level.name(), quantity.name()),
                values: vec![level.value(thresholds); len],
                color: level.color(),
                dash: Some(level.dash()),
            })
            .collect(),
    }
}
