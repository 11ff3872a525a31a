use serde::{Deserialize, Serialize};

use crate::state::{SavedState, StateError};

use super::time::TimeSample;

/// Tag under which clocks file their [`SavedState`].
pub const CLOCK_STATE_TAG: &str = "clock";

/// The last time a clock displayed, as kept across suspend/resume.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl From<TimeSample> for ClockSnapshot {
    fn from(t: TimeSample) -> Self {
        Self { hour: t.hour(), minute: t.minute(), second: t.second() }
    }
}

impl ClockSnapshot {
    /// `None` when a field is out of range.
    pub fn sample(self) -> Option<TimeSample> {
        TimeSample::new(self.hour, self.minute, self.second)
    }

    pub fn save(self) -> Result<SavedState, StateError> {
        SavedState::from_record(CLOCK_STATE_TAG, &self)
    }

    pub fn restore(state: &SavedState) -> Result<Self, StateError> {
        state.to_record(CLOCK_STATE_TAG)
    }
}
