use std::time::Duration;

use crate::SimulatorId;

/// Side effects requested by [`crate::update`]; executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fire-and-forget write to the system clipboard.
    WriteClipboard { text: String },
    /// Deliver `Msg::CopyDwellElapsed` for this key and generation after `after`.
    ScheduleDwellExpiry {
        key: String,
        generation: u64,
        after: Duration,
    },
    /// Drop any pending dwell expiry.
    CancelDwellExpiry,
    /// Start (or replace) the repeating ticker of one simulator.
    StartTicker {
        id: SimulatorId,
        generation: u64,
        interval: Duration,
    },
    /// Stop the ticker of one simulator, if any.
    StopTicker { id: SimulatorId },
}
