use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::view_model::{PageViewModel, SimulatorRowView};
use crate::{CopyIndicator, SimulationConfig, Simulator, SimulatorId};

/// Ephemeral state of one documentation page: its copy indicator and demo simulators.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageState {
    pub(crate) copy: CopyIndicator,
    pub(crate) simulators: BTreeMap<SimulatorId, Simulator>,
    dirty: bool,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PageViewModel {
        PageViewModel {
            copied_key: self.copy.active().map(|active| active.key.clone()),
            simulators: self
                .simulators
                .iter()
                .map(|(id, sim)| SimulatorRowView {
                    id: *id,
                    value: sim.value(),
                    ceiling: sim.config().ceiling,
                    running: sim.is_running(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn is_copy_active(&self, key: &str) -> bool {
        self.copy.is_active(key)
    }

    pub fn simulator(&self, id: SimulatorId) -> Option<&Simulator> {
        self.simulators.get(&id)
    }

    pub fn simulator_value(&self, id: SimulatorId) -> Option<f64> {
        self.simulators.get(&id).map(Simulator::value)
    }

    pub fn is_running(&self, id: SimulatorId) -> bool {
        self.simulators.get(&id).is_some_and(Simulator::is_running)
    }

    /// Returns whether anything visible changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// The simulator for `id`, mounting it from `config` when absent.
    ///
    /// Returns `None` when the simulator is absent and `config` is invalid.
    pub(crate) fn simulator_entry(
        &mut self,
        id: SimulatorId,
        config: &SimulationConfig,
    ) -> Option<&mut Simulator> {
        match self.simulators.entry(id) {
            Entry::Occupied(entry) => Some(entry.into_mut()),
            Entry::Vacant(entry) => {
                let sim = Simulator::new(config.clone()).ok()?;
                Some(entry.insert(sim))
            }
        }
    }
}
