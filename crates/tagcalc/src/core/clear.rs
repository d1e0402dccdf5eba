//! Double-clear detection
//!
//! Two clear presses closer together than the window collapse into a full
//! reset; anything else is a single backspace-style clear. Time comes from
//! the caller, so the machine itself is pure.

/// Kind of clear a press resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearPress {
    /// Trim one character/token
    Single,
    /// Reset the whole entry state
    Double,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DetectorState {
    Idle,
    Armed { at_ms: u64 },
}

/// Two-state debounce machine for the clear button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearDetector {
    state: DetectorState,
    window_ms: u64,
}

impl ClearDetector {
    /// Creates an idle detector with the given window
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            state: DetectorState::Idle,
            window_ms,
        }
    }

    /// Window length in milliseconds
    #[must_use]
    pub const fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Timestamp of the last press, if armed
    #[must_use]
    pub const fn last_press_ms(&self) -> Option<u64> {
        match self.state {
            DetectorState::Idle => None,
            DetectorState::Armed { at_ms } => Some(at_ms),
        }
    }

    /// Registers a press at `now_ms` and classifies it
    ///
    /// Every press re-arms the detector with its own timestamp, so a third
    /// quick press is a double-clear again. A reading earlier than the armed
    /// timestamp counts as inside the window.
    pub fn press(&mut self, now_ms: u64) -> ClearPress {
        let kind = match self.state {
            DetectorState::Armed { at_ms } if now_ms.saturating_sub(at_ms) < self.window_ms => {
                ClearPress::Double
            }
            _ => ClearPress::Single,
        };
        self.state = DetectorState::Armed { at_ms: now_ms };
        kind
    }
}
