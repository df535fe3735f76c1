use std::time::Duration;

use crate::Effect;

/// How long the "copied" feedback stays visible.
pub const DWELL_TIME: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveCopy {
    pub key: String,
    pub generation: u64,
}

/// "Copied to clipboard" feedback shared by every code block of a page.
///
/// At most one key is active at a time. Each copy gets a fresh generation, and
/// a dwell expiry only clears the indicator when both its key and generation
/// still match, so an expiry scheduled for an older copy never clears a newer one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CopyIndicator {
    active: Option<ActiveCopy>,
    generation: u64,
}

impl CopyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, key: &str) -> bool {
        self.active.as_ref().is_some_and(|active| active.key == key)
    }

    pub fn active(&self) -> Option<&ActiveCopy> {
        self.active.as_ref()
    }

    /// Marks `key` as copied and returns the effects to write `text` and arm the dwell timer.
    ///
    /// The indicator activates optimistically; the clipboard write outcome is never consulted.
    pub fn copy(&mut self, text: String, key: String) -> Vec<Effect> {
        self.generation += 1;
        let generation = self.generation;
        self.active = Some(ActiveCopy {
            key: key.clone(),
            generation,
        });
        vec![
            Effect::WriteClipboard { text },
            Effect::ScheduleDwellExpiry {
                key,
                generation,
                after: DWELL_TIME,
            },
        ]
    }

    /// Applies a dwell expiry. Returns `true` when the indicator was cleared.
    pub fn expire(&mut self, key: &str, generation: u64) -> bool {
        match &self.active {
            Some(active) if active.key == key && active.generation == generation => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    /// Clears the indicator; used when the page goes away.
    pub fn clear(&mut self) -> Vec<Effect> {
        if self.active.take().is_some() {
            vec![Effect::CancelDwellExpiry]
        } else {
            Vec::new()
        }
    }
}
