use std::{cell::Cell, rc::Rc};

use anyhow::Result;
use chrono::{DateTime, Utc};

use crate::charts::{build_chart, types::ChartPayload, types::Quantity};

use super::{
    health::{score_health, HealthAssessment},
    parser::parse_csv,
    status::{classify, StatusAssessment},
    summary::{AnalyticsSummary, LatestValues},
    types::Dataset,
};

/// Everything derived from one load of the CSV file. Never mutated, a reload
/// builds a new one and swaps it in.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
    pub dataset: Dataset,
    pub latest: LatestValues,
    health: HealthAssessment,
    pub status: Option<StatusAssessment>,
    pub summary: AnalyticsSummary,
    pub charts: [ChartPayload; 3],
}

impl Snapshot {
    pub fn from_csv(source: &str, text: &str, loaded_at: DateTime<Utc>) -> Self {
        Self::from_dataset(source, parse_csv(text), loaded_at)
    }

    pub fn from_dataset(source: &str, dataset: Dataset, loaded_at: DateTime<Utc>) -> Self {
        Self {
            source: source.to_string(),
            loaded_at,
            latest: LatestValues::from_dataset(&dataset),
            health: score_health(dataset.voltage(), dataset.current()),
            status: classify(dataset.voltage(), dataset.current()),
            summary: AnalyticsSummary::from_dataset(&dataset),
            charts: Quantity::ALL.map(|quantity| build_chart(quantity, &dataset)),
            dataset,
        }
    }

    pub fn chart(&self, quantity: Quantity) -> &ChartPayload {
        match quantity {
            Quantity::Voltage => &self.charts[0],
            Quantity::Current => &self.charts[1],
            Quantity::Power => &self.charts[2],
        }
    }

    /// Health is only meaningful when there is at least one reading.
    pub fn health(&self) -> Option<HealthAssessment> {
        (!self.dataset.is_empty()).then_some(self.health)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn number(self) -> u64 {
        self.0
    }
}

/// Hands out increasing tickets so that a load finishing after a newer one
/// was started can be recognised and dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadSequencer {
    latest: Rc<Cell<u64>>,
}

impl LoadSequencer {
    pub fn issue(&self) -> LoadTicket {
        let ticket = self.latest.get() + 1;
        self.latest.set(ticket);
        LoadTicket(ticket)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.latest.get() == ticket.0
    }

    pub fn resolve(&self, ticket: LoadTicket, result: Result<Snapshot>) -> LoadOutcome {
        if !self.is_current(ticket) {
            return LoadOutcome::Superseded;
        }

        match result {
            Ok(snapshot) => LoadOutcome::Applied(Rc::new(snapshot)),
            Err(err) => LoadOutcome::Failed(err),
        }
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Applied(Rc<Snapshot>),
    Failed(anyhow::Error),
    Superseded,
}
