//! In-memory record store shared between the loader task and the API.

use std::sync::{Arc, RwLock};

use crate::record::SurveyRecord;

/// Where the one-shot load currently stands.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// Handle to the record store. Cheap to clone; the records are written once
/// by the loader and read-only for the rest of the session.
#[derive(Clone)]
pub(crate) struct Database {
    inner: Arc<RwLock<Inner>>,
}

struct Inner {
    records: Arc<Vec<SurveyRecord>>,
    state: LoadState,
}

impl Database {
    pub(crate) fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Arc::new(Vec::new()),
                state: LoadState::Pending,
            })),
        }
    }

    /// Publishes the loaded rows. A resolver running concurrently sees
    /// either the previous snapshot or the full new one, never a partial
    /// write.
    pub(crate) fn set_records(&self, records: Vec<SurveyRecord>) {
        let mut inner = self.inner.write().expect("poisoned lock");
        inner.records = Arc::new(records);
        inner.state = LoadState::Loaded;
    }

    pub(crate) fn set_load_failed(&self) {
        self.inner.write().expect("poisoned lock").state = LoadState::Failed;
    }

    /// The current record snapshot; empty until the load completes.
    pub(crate) fn records(&self) -> Arc<Vec<SurveyRecord>> {
        Arc::clone(&self.inner.read().expect("poisoned lock").records)
    }

    pub(crate) fn load_state(&self) -> LoadState {
        self.inner.read().expect("poisoned lock").state
    }
}
