//! Viewport state driven by GUI events
//!
//! [`ViewportState`] is the subscriber side of the event wiring: it holds
//! the window-facing state a renderer reads (wireframe toggle, camera
//! override, clear color). [`ViewportStateSystem`] is the actuator that
//! mutates it when a matching event is delivered.

use crate::ecs::system::System;
use crate::error::SceneResult;
use crate::events::{Event, EventValue, Subscriber};
use crate::foundation::math::{Mat4, Vec4};

/// Renderer-facing viewport settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    name: String,
    /// Draw polygons as lines
    pub wireframe: bool,
    /// View matrix pushed from the GUI, overriding the scene camera
    pub view_override: Option<Mat4>,
    /// Framebuffer clear color (RGBA)
    pub clear_color: Vec4,
}

impl ViewportState {
    /// Type name used in dispatch errors
    pub const TYPE_NAME: &'static str = "ViewportState";

    /// Default viewport state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            wireframe: false,
            view_override: None,
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

impl Subscriber for ViewportState {
    fn name(&self) -> &str {
        &self.name
    }

    fn accept(&mut self, actuator: &mut dyn System, event: &Event) -> SceneResult<()> {
        actuator.apply2_viewport_state(self, event)
    }
}

/// Actuator applying viewport events
#[derive(Debug, Default)]
pub struct ViewportStateSystem {
    applied: usize,
}

impl ViewportStateSystem {
    /// Toggles wireframe rendering, carries a `Bool`
    pub const ON_UPDATE_WIREFRAME: &'static str = "OnUpdateWireframe";
    /// Replaces the view matrix, carries a `Matrix`
    pub const ON_UPDATE_CAMERA: &'static str = "OnUpdateCamera";
    /// Changes the clear color, carries a `Vec4`
    pub const ON_UPDATE_CLEAR_COLOR: &'static str = "OnUpdateClearColor";

    /// Create the actuator
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events that changed state
    pub fn applied(&self) -> usize {
        self.applied
    }
}

impl System for ViewportStateSystem {
    fn name(&self) -> &str {
        "ViewportStateSystem"
    }

    fn apply2_viewport_state(&mut self, state: &mut ViewportState, event: &Event) -> SceneResult<()> {
        match (event.name.as_str(), &event.value) {
            (Self::ON_UPDATE_WIREFRAME, EventValue::Bool(enabled)) => state.wireframe = *enabled,
            (Self::ON_UPDATE_CAMERA, EventValue::Matrix(view)) => state.view_override = Some(*view),
            (Self::ON_UPDATE_CLEAR_COLOR, EventValue::Vec4(color)) => state.clear_color = *color,
            (name, value) => {
                log::debug!("ViewportStateSystem ignoring event '{}' with {:?}", name, value);
                return Ok(());
            }
        }
        self.applied += 1;
        Ok(())
    }
}
