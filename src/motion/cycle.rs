use std::collections::BTreeSet;

/// Which of `total` stacked panels is on stage.
///
/// Owned by the component hosting the panels; each trigger zone registers its
/// index when it mounts and deregisters when it unmounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollCycle {
    total: usize,
    registered: BTreeSet<usize>,
    current: usize,
}

impl ScrollCycle {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            registered: BTreeSet::new(),
            current: 0,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn current(&self) -> usize {
        self.current
    }

    /// Returns `false` for an index outside the cycle.
    pub fn register(&mut self, index: usize) -> bool {
        if index >= self.total {
            log::warn!("scroll cycle: trigger {index} out of range (total {})", self.total);
            return false;
        }
        self.registered.insert(index);
        true
    }

    pub fn deregister(&mut self, index: usize) {
        self.registered.remove(&index);
    }

    pub fn is_ready(&self) -> bool {
        self.total > 0 && self.registered.len() == self.total
    }

    /// Brings panel `index` on stage once every trigger is in place. Returns
    /// `true` when the current panel changed.
    pub fn activate(&mut self, index: usize) -> bool {
        if !self.is_ready() || !self.registered.contains(&index) || self.current == index {
            return false;
        }
        self.current = index;
        true
    }
}
