//! Showcase core: pure state machines behind the interactive example pages.
mod copy_indicator;
mod effect;
mod msg;
mod simulator;
mod state;
mod update;
mod view_model;

pub use copy_indicator::{ActiveCopy, CopyIndicator, DWELL_TIME};
pub use effect::Effect;
pub use msg::Msg;
pub use simulator::{ConfigError, IncrementMode, SimulationConfig, Simulator, SimulatorId};
pub use state::PageState;
pub use update::update;
pub use view_model::{PageViewModel, SimulatorRowView};
