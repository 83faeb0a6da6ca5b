use std::time::Duration;

use thiserror::Error;

/// Adapter failures the orchestrator recovers from locally. There is no
/// fatal variant: every cycle must reach the sleep step regardless.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AdapterError {
    #[error("wifi did not associate within {0:?}")]
    ConnectivityTimeout(Duration),
    #[error("time sync did not complete within {0:?}")]
    TimeSyncTimeout(Duration),
}
