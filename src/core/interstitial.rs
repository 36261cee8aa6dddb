//! Session-scoped interaction counter for the advertisement panel.

pub const DEFAULT_THRESHOLD: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InteractionCounter {
    count: u32,
    threshold: u32,
}

impl InteractionCounter {
    pub fn new(threshold: u32) -> Self {
        Self {
            count: 0,
            threshold,
        }
    }

    /// Records one interaction. Returns `true` when the panel should be shown,
    /// in which case the counter starts over.
    pub fn record(&mut self) -> bool {
        let next = self.count + 1;
        if next > self.threshold {
            self.count = 0;
            true
        } else {
            self.count = next;
            false
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Default for InteractionCounter {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}
