//! Bookkeeping for fail-soft loading and frame generation.

use crate::error::ChronoError;
use crate::scene::frame::Frame;

/// An input record that was skipped.
#[derive(Debug)]
pub struct Rejected {
    /// Position of the record in its source.
    pub index: usize,
    pub id: Option<String>,
    pub error: ChronoError,
}

/// Accepted records plus the ones rejected on the way.
#[derive(Debug)]
pub struct LoadReport<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> LoadReport<T> {
    pub fn new() -> Self {
        Self {
            accepted: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl<T> Default for LoadReport<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals over a run, for logging at the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: usize,
    /// Frames with at least one failed entity.
    pub frames_with_failures: usize,
    pub entity_failures: usize,
    /// Entities rejected before the first frame.
    pub rejected_inputs: usize,
}

impl RunSummary {
    pub fn from_frames(frames: &[Frame], rejected_inputs: usize) -> Self {
        let mut summary = Self {
            frames: frames.len(),
            rejected_inputs,
            ..Self::default()
        };
        for frame in frames {
            let failures = frame.geometry.failures.len();
            if failures > 0 {
                summary.frames_with_failures += 1;
                summary.entity_failures += failures;
            }
        }
        summary
    }

    /// True when every entity was drawn in every frame.
    pub fn is_complete(&self) -> bool {
        self.entity_failures == 0 && self.rejected_inputs == 0
    }
}
