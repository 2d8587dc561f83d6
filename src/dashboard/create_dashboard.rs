use std::rc::Rc;

use chrono::Utc;
use leptos::{
    create_rw_signal, spawn_local, store_value, RwSignal, SignalGetUntracked, SignalSet,
    StoredValue,
};
use tracing::{debug, error, info};

use crate::{
    request::{fetch_csv, CSV_PATH},
    telemetry::snapshot::{LoadOutcome, LoadSequencer, Snapshot},
};

pub const LOAD_FAILED_MESSAGE: &str =
    "Could not load battery data. Please ensure the CSV is available.";

/// The latest snapshot, shared by every page. Only [`DashboardState::reload`]
/// writes to it, always by replacing the whole snapshot.
#[derive(Clone, Copy)]
pub struct DashboardState {
    pub snapshot: RwSignal<Option<Rc<Snapshot>>>,
    pub is_loading: RwSignal<bool>,
    sequencer: StoredValue<LoadSequencer>,
}

pub fn create_dashboard() -> DashboardState {
    let state = DashboardState {
        snapshot: create_rw_signal(None),
        is_loading: create_rw_signal(false),
        sequencer: store_value(LoadSequencer::default()),
    };

    state.reload();

    state
}

impl DashboardState {
    /// Starts a new load. A load still in flight is not cancelled, but its
    /// result is dropped once it completes.
    pub fn reload(self) {
        let ticket = self.sequencer.with_value(LoadSequencer::issue);
        self.is_loading.set(true);

        info!(ticket = ticket.number(), "loading battery data");

        spawn_local(async move {
            let result = fetch_csv(CSV_PATH)
                .await
                .map(|text| Snapshot::from_csv(CSV_PATH, &text, Utc::now()));

            match self
                .sequencer
                .with_value(|sequencer| sequencer.resolve(ticket, result))
            {
                LoadOutcome::Applied(snapshot) => {
                    info!(
                        ticket = ticket.number(),
                        rows = snapshot.dataset.len(),
                        "battery data loaded"
                    );
                    self.snapshot.set(Some(snapshot));
                    self.is_loading.set(false);
                }
                LoadOutcome::Failed(err) => {
                    error!(ticket = ticket.number(), "error loading csv: {err}");
                    self.is_loading.set(false);
                    if let Err(err) = leptos::window().alert_with_message(LOAD_FAILED_MESSAGE) {
                        error!("alert error: {err:?}");
                    }
                    // The previous snapshot, if any, stays on screen
                    debug!(
                        has_snapshot = self.snapshot.get_untracked().is_some(),
                        "keeping last snapshot"
                    );
                }
                LoadOutcome::Superseded => {
                    debug!(ticket = ticket.number(), "stale load dropped");
                }
            }
        });
    }
}
