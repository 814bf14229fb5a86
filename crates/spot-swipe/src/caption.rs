use spot_core::collections::{map::HashSet, new_set};

pub const DEFAULT_SKIP_CAPTIONS: &[&str] = &[
    "Not for me",
    "Next!",
    "Maybe another day",
    "Pass",
    "Keep looking",
];

pub const DEFAULT_SELECT_CAPTIONS: &[&str] = &[
    "Saved!",
    "Let's go",
    "Added to your spots",
    "Great pick",
    "On the list",
];

/// Picks overlay captions from a pool without repeating one until the pool
/// runs out.
///
/// Used indices are tracked in a set; once every caption has been shown the
/// set is cleared and the pool recycles. The caption shown last is held back
/// from the first pick of a new cycle, so the same caption never appears
/// twice in a row unless the pool has only one entry.
///
/// Each screen owns its own picker.
#[derive(Debug, Clone)]
pub struct CaptionPicker {
    pool: Vec<String>,
    used: HashSet<usize>,
    last: Option<usize>,
    rng: u64,
}

impl CaptionPicker {
    pub fn new<I, S>(pool: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pool: pool.into_iter().map(Into::into).collect(),
            used: new_set(),
            last: None,
            rng: seed | 1,
        }
    }

    pub fn skip_captions(seed: u64) -> Self {
        Self::new(DEFAULT_SKIP_CAPTIONS.iter().copied(), seed)
    }

    pub fn select_captions(seed: u64) -> Self {
        Self::new(DEFAULT_SELECT_CAPTIONS.iter().copied(), seed)
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Captions left before the pool recycles.
    pub fn remaining(&self) -> usize {
        self.pool.len() - self.used.len()
    }

    pub fn reset(&mut self) {
        self.used.clear();
        self.last = None;
    }

    pub fn next_caption(&mut self) -> Option<&str> {
        if self.pool.is_empty() {
            return None;
        }
        if self.used.len() >= self.pool.len() {
            log::debug!("caption pool of {} exhausted; recycling", self.pool.len());
            self.used.clear();
        }

        let hold_back = if self.pool.len() > 1 { self.last } else { None };
        let candidates: Vec<usize> = (0..self.pool.len())
            .filter(|index| !self.used.contains(index) && Some(*index) != hold_back)
            .collect();
        let pick = candidates[(self.next_random() % candidates.len() as u64) as usize];

        self.used.insert(pick);
        self.last = Some(pick);
        Some(&self.pool[pick])
    }

    fn next_random(&mut self) -> u64 {
        self.rng ^= self.rng << 7;
        self.rng ^= self.rng >> 9;
        self.rng ^= self.rng << 8;
        self.rng
    }
}
