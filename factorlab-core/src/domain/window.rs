//! Factor window set: the closed list of lookback lengths shared by every
//! factor family.
//!
//! The window set is a closed enum and per-window values live in a
//! fixed-size array, so a missing window is a compile error rather than a
//! lookup failure at runtime.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// A factor lookback window, in trading rows (not calendar days).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Window {
    W5,
    W10,
    W20,
    W60,
    W120,
    W250,
}

impl Window {
    /// All windows, shortest first.
    pub const ALL: [Window; 6] = [
        Window::W5,
        Window::W10,
        Window::W20,
        Window::W60,
        Window::W120,
        Window::W250,
    ];

    /// Window length in trading rows.
    pub fn periods(self) -> usize {
        match self {
            Window::W5 => 5,
            Window::W10 => 10,
            Window::W20 => 20,
            Window::W60 => 60,
            Window::W120 => 120,
            Window::W250 => 250,
        }
    }

    /// Position of this window in `Window::ALL` (and in `WindowValues`).
    pub fn index(self) -> usize {
        match self {
            Window::W5 => 0,
            Window::W10 => 1,
            Window::W20 => 2,
            Window::W60 => 3,
            Window::W120 => 4,
            Window::W250 => 5,
        }
    }

    /// Look up a window by its length in rows.
    pub fn from_periods(periods: usize) -> Option<Window> {
        Window::ALL.iter().copied().find(|w| w.periods() == periods)
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.periods())
    }
}

// Serialized as the plain period count so configs and run summaries read
// `20` rather than `"W20"`.
impl Serialize for Window {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.periods() as u64)
    }
}

impl<'de> Deserialize<'de> for Window {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let periods = u64::deserialize(deserializer)? as usize;
        Window::from_periods(periods)
            .ok_or_else(|| de::Error::custom(format!("unknown factor window: {periods}")))
    }
}

/// One f64 per window, indexed by `Window`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowValues([f64; 6]);

impl WindowValues {
    /// All windows set to NaN (the "not yet computed" state).
    pub fn nan() -> Self {
        Self([f64::NAN; 6])
    }

    pub fn get(&self, window: Window) -> f64 {
        self.0[window.index()]
    }

    pub fn set(&mut self, window: Window, value: f64) {
        self.0[window.index()] = value;
    }
}

impl Default for WindowValues {
    fn default() -> Self {
        Self::nan()
    }
}
