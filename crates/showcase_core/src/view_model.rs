use crate::SimulatorId;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageViewModel {
    pub copied_key: Option<String>,
    pub simulators: Vec<SimulatorRowView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorRowView {
    pub id: SimulatorId,
    pub value: f64,
    pub ceiling: f64,
    pub running: bool,
}

impl SimulatorRowView {
    /// Value as a whole percentage of the ceiling, for progress labels.
    pub fn percent(&self) -> u8 {
        if self.ceiling <= 0.0 {
            return 100;
        }
        ((self.value / self.ceiling) * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
