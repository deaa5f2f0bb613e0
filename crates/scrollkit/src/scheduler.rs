//! The population scheduler state machine.
//!
//! One generation moves through `Idle -> Clearing -> Growing | Shrinking |
//! Settled -> Idle`. Growing and Shrinking suspend for a number of frame
//! boundaries so the host can lay out structural changes before slots are
//! classified. The scheduler only tracks state; the view performs the work
//! each transition asks for.

use std::fmt;

use scrollkit_core::logging::targets;

use crate::slot_pool::ReconcileStep;

/// Where the current generation is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    /// No generation in flight.
    #[default]
    Idle,
    /// Bound items are being torn down and the data source replaced.
    Clearing,
    /// A growth batch was created; waiting for layout to settle.
    Growing { frames_left: u32 },
    /// Excess slots were removed; waiting for layout to settle.
    Shrinking { frames_left: u32 },
    /// The slot pool matches the data; the final visibility pass is running.
    Settled,
}

impl GenerationPhase {
    pub fn name(&self) -> &'static str {
        match self {
            GenerationPhase::Idle => "idle",
            GenerationPhase::Clearing => "clearing",
            GenerationPhase::Growing { .. } => "growing",
            GenerationPhase::Shrinking { .. } => "shrinking",
            GenerationPhase::Settled => "settled",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, GenerationPhase::Idle)
    }
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationPhase::Growing { frames_left } | GenerationPhase::Shrinking { frames_left } => {
                write!(f, "{} ({frames_left} frames left)", self.name())
            }
            _ => f.write_str(self.name()),
        }
    }
}

/// What the view should do after a frame boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing is in flight.
    Idle,
    /// Still waiting for layout to settle.
    Waiting { frames_left: u32 },
    /// Layout settled after a growth batch: classify, then grow again or
    /// finish.
    ResumeGrowth,
    /// Layout settled after a shrink: classify, then finish.
    ResumeShrink,
}

/// Tracks the phase of the in-flight generation, if any.
#[derive(Debug, Clone)]
pub struct PopulationScheduler {
    phase: GenerationPhase,
    grow_settle_frames: u32,
    shrink_settle_frames: u32,
}

impl PopulationScheduler {
    pub fn new(grow_settle_frames: u32, shrink_settle_frames: u32) -> Self {
        Self {
            phase: GenerationPhase::Idle,
            grow_settle_frames,
            shrink_settle_frames,
        }
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Whether a generation is in flight.
    pub fn is_in_flight(&self) -> bool {
        !self.phase.is_idle()
    }

    /// Start a generation. Returns `false` if one is already in flight.
    pub fn begin(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        self.transition(GenerationPhase::Clearing);
        true
    }

    /// Record the outcome of a reconcile step.
    ///
    /// Returns `true` when the view should classify and
    /// [`finish`](Self::finish) right away instead of waiting for frames.
    pub fn suspend(&mut self, step: ReconcileStep) -> bool {
        match step {
            ReconcileStep::Grew { .. } => {
                self.transition(GenerationPhase::Growing {
                    frames_left: self.grow_settle_frames.max(1),
                });
                false
            }
            ReconcileStep::Shrank { .. } if self.shrink_settle_frames > 0 => {
                self.transition(GenerationPhase::Shrinking {
                    frames_left: self.shrink_settle_frames,
                });
                false
            }
            ReconcileStep::Shrank { .. } | ReconcileStep::Settled => {
                self.transition(GenerationPhase::Settled);
                true
            }
        }
    }

    /// Account for one frame boundary.
    pub fn on_frame(&mut self) -> FrameOutcome {
        match self.phase {
            GenerationPhase::Growing { frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                self.phase = GenerationPhase::Growing { frames_left };
                if frames_left == 0 {
                    FrameOutcome::ResumeGrowth
                } else {
                    FrameOutcome::Waiting { frames_left }
                }
            }
            GenerationPhase::Shrinking { frames_left } => {
                let frames_left = frames_left.saturating_sub(1);
                if frames_left == 0 {
                    self.transition(GenerationPhase::Settled);
                    FrameOutcome::ResumeShrink
                } else {
                    self.phase = GenerationPhase::Shrinking { frames_left };
                    FrameOutcome::Waiting { frames_left }
                }
            }
            GenerationPhase::Idle => FrameOutcome::Idle,
            GenerationPhase::Clearing | GenerationPhase::Settled => {
                FrameOutcome::Waiting { frames_left: 0 }
            }
        }
    }

    /// Mark the generation complete.
    pub fn finish(&mut self) {
        self.transition(GenerationPhase::Idle);
    }

    /// Abandon the in-flight generation. Returns whether one was running.
    pub fn cancel(&mut self) -> bool {
        let was_running = self.is_in_flight();
        if was_running {
            tracing::debug!(target: targets::SCHEDULER, phase = %self.phase, "generation cancelled");
            self.phase = GenerationPhase::Idle;
        }
        was_running
    }

    fn transition(&mut self, next: GenerationPhase) {
        tracing::debug!(
            target: targets::SCHEDULER,
            from = self.phase.name(),
            to = %next,
            "phase transition"
        );
        self.phase = next;
    }
}

static_assertions::assert_impl_all!(PopulationScheduler: Send, Sync);
