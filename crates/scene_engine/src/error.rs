//! Scene runtime errors

use thiserror::Error;

use crate::ecs::frame::FrameStage;
use crate::ecs::{ComponentId, EntityId};

/// Result alias used across the scene runtime
pub type SceneResult<T> = Result<T, SceneError>;

/// Coarse classification of [`SceneError`] values.
///
/// Structural errors are programmer errors in scene construction and are
/// always surfaced. Lookup misses on queries are reported as `Option`, so
/// `LookupMiss` only appears when an id handed to an operation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Tree or registry invariant violated
    Structural,
    /// An id did not resolve to a live entity or component
    LookupMiss,
    /// A frame phase ran out of order
    OrderingViolation,
    /// A system has no handler for a component kind
    UnsupportedDispatch,
    /// Matrix could not be inverted
    Numeric,
    /// Event table misuse
    Event,
}

/// Errors raised by the scene runtime
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// Entity or component already registered in a world
    #[error("{kind} '{name}' is already registered")]
    DuplicateRegistration {
        /// "entity" or "component"
        kind: &'static str,
        /// Name of the offending object
        name: String,
    },

    /// Entity id is not registered in this world
    #[error("entity {0:?} not found")]
    EntityNotFound(EntityId),

    /// Component id is not registered in this world
    #[error("component {0:?} not found")]
    ComponentNotFound(ComponentId),

    /// Attaching `child` under `parent` would create a cycle
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    CycleDetected {
        /// Requested parent
        parent: EntityId,
        /// Requested child (an ancestor of, or equal to, `parent`)
        child: EntityId,
    },

    /// Component is bound to an entity and must be detached first
    #[error("component {component:?} is already bound to entity {owner:?}")]
    ComponentAlreadyBound {
        /// Component being rebound
        component: ComponentId,
        /// Its current owner
        owner: EntityId,
    },

    /// Component is not bound to any entity
    #[error("component {0:?} is not bound to an entity")]
    ComponentNotBound(ComponentId),

    /// The root entity cannot be detached or destroyed
    #[error("the root entity cannot be removed")]
    RootRemoval,

    /// No camera component in the subtree given to the pre-camera pass
    #[error("no camera found under entity {0:?}")]
    CameraNotFound(EntityId),

    /// Camera-space matrices requested before the pre-camera pass
    #[error("camera not initialized: run the pre-camera pass first")]
    CameraNotInitialized,

    /// A matrix that must be inverted is singular
    #[error("singular matrix: {0}")]
    SingularMatrix(String),

    /// Frame phase executed out of order
    #[error("ordering violation in {operation}: expected {expected}, found {found:?}")]
    OrderingViolation {
        /// Operation that was attempted
        operation: &'static str,
        /// Human-readable list of acceptable stages
        expected: &'static str,
        /// Stage the frame was in
        found: FrameStage,
    },

    /// System has no handler for a component kind
    #[error("system '{system}' does not handle component type '{component}'")]
    UnsupportedDispatch {
        /// System name
        system: String,
        /// Component type name
        component: &'static str,
    },

    /// Uniform value does not match its declared kind flags
    #[error("uniform '{key}': {reason}")]
    UniformKindMismatch {
        /// Uniform name
        key: String,
        /// What was wrong with the kind flags
        reason: String,
    },

    /// Shader sources cannot be used
    #[error("shader '{name}': {reason}")]
    InvalidShader {
        /// Shader component name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    /// Event name is not in the event table
    #[error("event '{0}' is not registered")]
    EventNotRegistered(String),

    /// Event name registered twice
    #[error("event '{0}' is already registered")]
    DuplicateEvent(String),

    /// Subscriber or actuator is already mutably borrowed
    #[error("dispatch of event '{0}' re-entered a busy subscriber or actuator")]
    DispatchBusy(String),
}

impl SceneError {
    /// Classify this error
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::DuplicateRegistration { .. }
            | Self::CycleDetected { .. }
            | Self::ComponentAlreadyBound { .. }
            | Self::ComponentNotBound(_)
            | Self::RootRemoval
            | Self::UniformKindMismatch { .. }
            | Self::InvalidShader { .. } => ErrorKind::Structural,
            Self::EntityNotFound(_) | Self::ComponentNotFound(_) | Self::CameraNotFound(_) => {
                ErrorKind::LookupMiss
            }
            Self::CameraNotInitialized | Self::OrderingViolation { .. } => {
                ErrorKind::OrderingViolation
            }
            Self::UnsupportedDispatch { .. } => ErrorKind::UnsupportedDispatch,
            Self::SingularMatrix(_) => ErrorKind::Numeric,
            Self::EventNotRegistered(_) | Self::DuplicateEvent(_) | Self::DispatchBusy(_) => {
                ErrorKind::Event
            }
        }
    }

    /// Shorthand for an unsupported dispatch error
    pub fn unsupported(system: &str, component: &'static str) -> Self {
        Self::UnsupportedDispatch {
            system: system.to_string(),
            component,
        }
    }
}
