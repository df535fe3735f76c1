use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Effect;

pub type SimulatorId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncrementMode {
    /// Every tick adds exactly `magnitude`.
    Fixed,
    /// Every tick adds a random amount in `(0, magnitude]`.
    Randomized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub ceiling: f64,
    pub floor: f64,
    pub increment: IncrementMode,
    pub magnitude: f64,
    pub tick_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            ceiling: 100.0,
            floor: 0.0,
            increment: IncrementMode::Fixed,
            magnitude: 10.0,
            tick_interval_ms: 500,
        }
    }
}

impl SimulationConfig {
    /// File upload demo: uneven jumps every 200 ms.
    pub fn upload() -> Self {
        Self {
            increment: IncrementMode::Randomized,
            magnitude: 15.0,
            tick_interval_ms: 200,
            ..Self::default()
        }
    }

    /// Download demo: steady 5% steps.
    pub fn download() -> Self {
        Self {
            increment: IncrementMode::Fixed,
            magnitude: 5.0,
            tick_interval_ms: 100,
            ..Self::default()
        }
    }

    /// Package install demo: slow randomized steps.
    pub fn install() -> Self {
        Self {
            increment: IncrementMode::Randomized,
            magnitude: 8.0,
            tick_interval_ms: 300,
            ..Self::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.ceiling.is_finite() || !self.floor.is_finite() || !self.magnitude.is_finite() {
            return Err(ConfigError::NotFinite);
        }
        if self.ceiling < self.floor {
            return Err(ConfigError::CeilingBelowFloor {
                ceiling: self.ceiling,
                floor: self.floor,
            });
        }
        if self.magnitude <= 0.0 {
            return Err(ConfigError::NonPositiveMagnitude(self.magnitude));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    fn step(&self, roll: f64) -> f64 {
        match self.increment {
            IncrementMode::Fixed => self.magnitude,
            IncrementMode::Randomized => {
                // Rolls outside (0, 1] would stall or overshoot the distribution.
                let roll = if roll > 0.0 && roll <= 1.0 { roll } else { 1.0 };
                roll * self.magnitude
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("ceiling, floor and magnitude must be finite")]
    NotFinite,
    #[error("ceiling {ceiling} is below floor {floor}")]
    CeilingBelowFloor { ceiling: f64, floor: f64 },
    #[error("magnitude {0} must be positive")]
    NonPositiveMagnitude(f64),
    #[error("tick interval must be non-zero")]
    ZeroInterval,
}

/// Timer-driven progress value for a demo widget.
///
/// `running` is true iff a ticker is scheduled for this simulator. Every start
/// and reset bumps `generation`; ticks carrying an older generation are ignored,
/// so a tick that was already in flight when `reset` ran cannot move the value.
#[derive(Debug, Clone, PartialEq)]
pub struct Simulator {
    config: SimulationConfig,
    value: f64,
    running: bool,
    generation: u64,
}

impl Simulator {
    /// A stopped simulator at `config.floor`. Invalid configs are rejected.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let value = config.floor;
        Ok(Self {
            config,
            value,
            running: false,
            generation: 0,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Starts a run. A no-op while already running or when `config` is invalid.
    pub fn start(&mut self, id: SimulatorId, config: SimulationConfig) -> Vec<Effect> {
        if self.running || config.validate().is_err() {
            return Vec::new();
        }
        self.value = self.value.clamp(config.floor, config.ceiling);
        self.config = config;
        self.running = true;
        self.generation += 1;
        vec![Effect::StartTicker {
            id,
            generation: self.generation,
            interval: self.config.tick_interval(),
        }]
    }

    /// Applies one tick. Returns the effects and whether the value changed.
    pub fn tick(&mut self, id: SimulatorId, generation: u64, roll: f64) -> (Vec<Effect>, bool) {
        if !self.running || generation != self.generation {
            return (Vec::new(), false);
        }
        let next = (self.value + self.config.step(roll)).min(self.config.ceiling);
        let changed = next != self.value;
        self.value = next;
        if self.value >= self.config.ceiling {
            self.running = false;
            return (vec![Effect::StopTicker { id }], true);
        }
        (Vec::new(), changed)
    }

    /// Back to the floor, cancelling any run. Safe to call at any time.
    pub fn reset(&mut self, id: SimulatorId) -> Vec<Effect> {
        let was_running = self.running;
        self.generation += 1;
        self.running = false;
        self.value = self.config.floor;
        if was_running {
            vec![Effect::StopTicker { id }]
        } else {
            Vec::new()
        }
    }

    /// Stops the ticker without touching the value; used on unmount.
    pub(crate) fn halt(&mut self, id: SimulatorId) -> Vec<Effect> {
        self.generation += 1;
        if std::mem::replace(&mut self.running, false) {
            vec![Effect::StopTicker { id }]
        } else {
            Vec::new()
        }
    }
}
