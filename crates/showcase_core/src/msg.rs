use crate::{SimulationConfig, SimulatorId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User clicked the copy button of a code block.
    CopyClicked { key: String, text: String },
    /// Dwell timer for a copy indicator fired.
    CopyDwellElapsed { key: String, generation: u64 },
    /// A demo widget with a simulator appeared on the page.
    SimulatorMounted {
        id: SimulatorId,
        config: SimulationConfig,
    },
    /// User started a simulated operation (upload, download, install...).
    StartClicked {
        id: SimulatorId,
        config: SimulationConfig,
    },
    /// User reset a simulated operation.
    ResetClicked { id: SimulatorId },
    /// Ticker of a simulator fired. `roll` is in `(0, 1]`.
    SimulatorTicked {
        id: SimulatorId,
        generation: u64,
        roll: f64,
    },
    /// A demo widget left the page.
    SimulatorUnmounted { id: SimulatorId },
    /// The whole page is going away.
    PageUnmounted,
}
