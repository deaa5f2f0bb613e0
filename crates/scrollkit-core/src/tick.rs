//! Frame clock primitives.
//!
//! Components in scrollkit never own a timer. The host drives them once per
//! frame; these types name the frame and the part of the frame being driven.

use std::fmt;

/// A monotonically increasing frame number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameId(u64);

impl FrameId {
    /// Get the raw u64 value of this frame number.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Counts frame boundaries reported by the host.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    current: FrameId,
}

impl FrameClock {
    /// Create a clock positioned at frame zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The frame currently being processed.
    pub fn now(&self) -> FrameId {
        self.current
    }

    /// Mark a frame boundary and return the new frame.
    pub fn advance(&mut self) -> FrameId {
        self.current = FrameId(self.current.0 + 1);
        self.current
    }
}

/// The part of a host frame a tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickPhase {
    /// The regular per-frame update.
    Update,
    /// The update that runs after every regular update of the frame.
    LateUpdate,
    /// The fixed-timestep update.
    FixedUpdate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_advances() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.now().as_u64(), 0);
        assert_eq!(clock.advance().as_u64(), 1);
        assert_eq!(clock.advance(), clock.now());
        assert_eq!(clock.now().to_string(), "#2");
    }
}
