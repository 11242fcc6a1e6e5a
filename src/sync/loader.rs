use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, error, info, instrument};

use crate::api::RemoteStore;
use crate::error::SyncError;
use crate::model::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// this load's result is now the committed snapshot
    Committed { epoch: u64 },
    /// a newer load was issued while this one was in flight; result dropped
    Superseded { epoch: u64, latest: u64 },
}

#[derive(Debug, Default)]
struct LoaderState {
    snapshot: Arc<Snapshot>,
    committed_epoch: Option<u64>,
    last_error: Option<SyncError>,
    in_flight: usize,
}

/// Sole writer of the committed snapshot.
///
/// Every `load()` takes the next refresh epoch. A finished load is applied
/// only if its epoch is still the highest one issued, so overlapping loads
/// resolve to the most recently *issued* request regardless of which
/// response arrives last.
pub struct SnapshotLoader {
    store: Arc<dyn RemoteStore>,
    issued: AtomicU64,
    state: Mutex<LoaderState>,
}

/// Counts a load as in flight until dropped, including on cancellation.
struct InFlight<'a>(&'a Mutex<LoaderState>);

impl<'a> InFlight<'a> {
    fn enter(state: &'a Mutex<LoaderState>) -> Self {
        state.lock().in_flight += 1;
        Self(state)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.lock().in_flight -= 1;
    }
}

impl SnapshotLoader {
    pub fn new(store: Arc<dyn RemoteStore>) -> Self {
        Self {
            store,
            issued: AtomicU64::new(0),
            state: Mutex::new(LoaderState::default()),
        }
    }

    /// Fetch both collections concurrently and replace the committed
    /// snapshot wholesale. On failure the previous snapshot is untouched.
    #[instrument(name = "snapshot_load", skip(self))]
    pub async fn load(&self) -> Result<LoadOutcome, SyncError> {
        let epoch = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = InFlight::enter(&self.state);

        debug!(epoch, "Fetching employees and leaves");
        let fetched = futures::try_join!(self.store.list_employees(), self.store.list_leaves());

        let mut state = self.state.lock();
        let latest = self.issued.load(Ordering::SeqCst);
        if epoch != latest {
            info!(epoch, latest, ok = fetched.is_ok(), "Discarding superseded load");
            return Ok(LoadOutcome::Superseded { epoch, latest });
        }

        match fetched {
            Ok((employees, leaves)) => {
                let snapshot = Snapshot::new(employees, leaves);
                info!(
                    epoch,
                    employees = snapshot.employees().len(),
                    leaves = snapshot.leaves().len(),
                    "Snapshot committed"
                );
                state.snapshot = Arc::new(snapshot);
                state.committed_epoch = Some(epoch);
                state.last_error = None;
                Ok(LoadOutcome::Committed { epoch })
            }
            Err(e) => {
                let err = match state.committed_epoch {
                    Some(_) => SyncError::refresh(),
                    None => SyncError::connectivity(),
                };
                error!(epoch, error = %e, kind = ?err.kind, "Snapshot load failed");
                state.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Last committed snapshot (empty before the first successful load).
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.state.lock().snapshot.clone()
    }

    pub fn has_committed(&self) -> bool {
        self.state.lock().committed_epoch.is_some()
    }

    pub fn committed_epoch(&self) -> Option<u64> {
        self.state.lock().committed_epoch
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().in_flight > 0
    }

    pub fn last_error(&self) -> Option<SyncError> {
        self.state.lock().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.state.lock().last_error = None;
    }
}
