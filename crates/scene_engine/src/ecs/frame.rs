//! Frame phase state machine
//!
//! A frame runs `Idle -> TransformsComputed -> CameraResolved ->
//! CameraApplied -> Idle`. The camera pass reads `l2world` and the view
//! matrix resolved by the pre-camera pass, so running a stage early would
//! produce stale matrices. The tracker rejects such calls (strict policy)
//! or logs and lets them through (relaxed policy).

use std::fmt;

use super::system::{SystemRole, TraversalPhase};
use crate::config::OrderingPolicy;
use crate::error::{SceneError, SceneResult};

/// Stage of the current frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameStage {
    /// No frame in progress
    #[default]
    Idle,
    /// Transform pass completed
    TransformsComputed,
    /// Pre-camera pass completed
    CameraResolved,
    /// Camera pass completed
    CameraApplied,
}

impl fmt::Display for FrameStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "Idle",
            Self::TransformsComputed => "TransformsComputed",
            Self::CameraResolved => "CameraResolved",
            Self::CameraApplied => "CameraApplied",
        };
        f.write_str(name)
    }
}

/// Tracks and validates frame stage transitions
#[derive(Debug, Clone, Default)]
pub struct FrameTracker {
    stage: FrameStage,
    policy: OrderingPolicy,
    frames_completed: u64,
}

impl FrameTracker {
    /// Create an idle tracker
    pub fn new(policy: OrderingPolicy) -> Self {
        Self {
            stage: FrameStage::Idle,
            policy,
            frames_completed: 0,
        }
    }

    /// Current stage
    pub fn stage(&self) -> FrameStage {
        self.stage
    }

    /// Number of frames closed with [`FrameTracker::end_frame`]
    pub fn frames_completed(&self) -> u64 {
        self.frames_completed
    }

    /// Check that a traversal by a system with `role` may start now.
    ///
    /// Returns the stage to move to once the traversal succeeds, or `None`
    /// when the traversal does not take part in frame ordering.
    pub fn check(&self, role: SystemRole, phase: TraversalPhase) -> SceneResult<Option<FrameStage>> {
        let (allowed, next, operation, expected) = match (role, phase) {
            (SystemRole::Free, _) => return Ok(None),
            (SystemRole::TransformPass, TraversalPhase::Main) => (
                &[FrameStage::Idle, FrameStage::CameraApplied][..],
                FrameStage::TransformsComputed,
                "transform pass",
                "Idle or CameraApplied",
            ),
            (SystemRole::TransformPass, TraversalPhase::PreCamera) => return Ok(None),
            (SystemRole::CameraPass, TraversalPhase::PreCamera) => (
                &[FrameStage::TransformsComputed][..],
                FrameStage::CameraResolved,
                "pre-camera pass",
                "TransformsComputed",
            ),
            (SystemRole::CameraPass, TraversalPhase::Main) => (
                &[FrameStage::CameraResolved][..],
                FrameStage::CameraApplied,
                "camera pass",
                "CameraResolved",
            ),
        };

        if allowed.contains(&self.stage) {
            return Ok(Some(next));
        }

        match self.policy {
            OrderingPolicy::Strict => Err(SceneError::OrderingViolation {
                operation,
                expected,
                found: self.stage,
            }),
            OrderingPolicy::Relaxed => {
                log::warn!(
                    "{} started in stage {} (expected {}); derived matrices may be stale",
                    operation,
                    self.stage,
                    expected
                );
                Ok(Some(next))
            }
        }
    }

    /// Record a completed traversal
    pub fn advance(&mut self, next: FrameStage) {
        log::trace!("Frame stage {} -> {}", self.stage, next);
        self.stage = next;
    }

    /// Close the current frame and return to `Idle`
    pub fn end_frame(&mut self) -> SceneResult<()> {
        match self.stage {
            FrameStage::Idle => return Ok(()),
            FrameStage::TransformsComputed | FrameStage::CameraApplied => {}
            FrameStage::CameraResolved => match self.policy {
                OrderingPolicy::Strict => {
                    return Err(SceneError::OrderingViolation {
                        operation: "end of frame",
                        expected: "TransformsComputed or CameraApplied",
                        found: self.stage,
                    })
                }
                OrderingPolicy::Relaxed => {
                    log::warn!("Frame ended after the pre-camera pass without a camera pass");
                }
            },
        }

        self.stage = FrameStage::Idle;
        self.frames_completed += 1;
        Ok(())
    }

    /// Abandon the current frame without counting it
    pub fn reset(&mut self) {
        self.stage = FrameStage::Idle;
    }
}
