use serde::{Deserialize, Serialize};

/// Hit points with an upper bound.
///
/// `current` is always within `0..=max`; damage and healing return a new
/// value instead of mutating in place. A `current` of zero means the owner
/// has been defeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "HealthRecord", into = "HealthRecord")]
pub struct Health {
    current: u32,
    max: u32,
}

/// Wire form; clamped on the way in so a hand-edited save cannot break the bound.
#[derive(Serialize, Deserialize)]
struct HealthRecord {
    current: u32,
    max: u32,
}

impl From<HealthRecord> for Health {
    fn from(r: HealthRecord) -> Self {
        Health::with_current(r.current, r.max)
    }
}

impl From<Health> for HealthRecord {
    fn from(h: Health) -> Self {
        HealthRecord {
            current: h.current,
            max: h.max,
        }
    }
}

impl Health {
    /// Full health.
    pub fn new(max: u32) -> Self {
        Health { current: max, max }
    }

    /// Partial health; `current` is clamped to `max`.
    pub fn with_current(current: u32, max: u32) -> Self {
        Health {
            current: current.min(max),
            max,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.max
    }

    /// Floors at zero.
    pub fn damaged(self, amount: u32) -> Self {
        Health {
            current: self.current.saturating_sub(amount),
            max: self.max,
        }
    }

    /// Caps at `max`.
    pub fn healed(self, amount: u32) -> Self {
        Health {
            current: self.current.saturating_add(amount).min(self.max),
            max: self.max,
        }
    }

    /// Raise the ceiling by `amount` and refill.
    pub fn raised(self, amount: u32) -> Self {
        Health::new(self.max.saturating_add(amount))
    }
}

impl std::fmt::Display for Health {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}
