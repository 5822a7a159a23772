//! Tap and long-press detection over a pressed flag sampled once per frame.
//!
//! Detectors only compute; callers decide whether to log `HoldStatus`.
//! Both assume a regular polling cadence: skipping frames shifts the result.

use crate::models::settings::DEFAULT_HOLD_THRESHOLD;
use std::fmt;

/// Rising-edge detector: fires on the first pressed poll of every press.
#[derive(Debug, Clone, Default)]
pub struct TapDetector {
    touched: bool,
}

impl TapDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn poll(&mut self, touched: bool) -> bool {
        if touched && self.touched {
            return false;
        }
        self.touched = touched;
        touched
    }
}

/// Phase of a long press, as of the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldStatus {
    #[default]
    NotHeld,
    Preparing,
    Held,
}

impl fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldStatus::NotHeld => write!(f, "Not held"),
            HoldStatus::Preparing => write!(f, "Preparing to hold"),
            HoldStatus::Held => write!(f, "Held"),
        }
    }
}

/// Long-press detector.
///
/// Time accumulates only across consecutive pressed polls: the first pressed
/// poll of a run arms the detector, every following one adds its delta. A
/// poll that is not pressed clears the accumulator.
#[derive(Debug, Clone)]
pub struct HoldDetector {
    holding: bool,
    time_held: f32,
    threshold: f32,
    status: HoldStatus,
}

impl Default for HoldDetector {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD)
    }
}

impl HoldDetector {
    pub fn new(threshold: f32) -> Self {
        Self {
            holding: false,
            time_held: 0.0,
            threshold,
            status: HoldStatus::NotHeld,
        }
    }

    pub fn poll(&mut self, touched: bool, delta_time: f32) -> HoldStatus {
        let was_holding = self.holding;
        self.holding = touched;

        self.status = if touched && was_holding {
            self.time_held += delta_time;
            if self.time_held >= self.threshold {
                HoldStatus::Held
            } else {
                HoldStatus::Preparing
            }
        } else {
            self.time_held = 0.0;
            HoldStatus::NotHeld
        };
        self.status
    }

    pub fn status(&self) -> HoldStatus {
        self.status
    }

    pub fn time_held(&self) -> f32 {
        self.time_held
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}
