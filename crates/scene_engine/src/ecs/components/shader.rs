//! Shader component
//!
//! Stores shader sources only. Compilation and uniform upload belong to
//! the render backend; `init` merely validates the sources and marks the
//! shader ready for it.

use std::any::Any;

use crate::ecs::component::{Component, ComponentMeta};
use crate::ecs::system::{System, VisitContext};
use crate::error::{SceneError, SceneResult};

/// Vertex and fragment shader sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shader {
    meta: ComponentMeta,
    /// Vertex stage source
    pub vertex_source: String,
    /// Fragment stage source
    pub fragment_source: String,
    initialized: bool,
}

impl Shader {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "Shader";

    /// Shader from stage sources
    pub fn new(
        name: impl Into<String>,
        vertex_source: impl Into<String>,
        fragment_source: impl Into<String>,
    ) -> Self {
        Self {
            meta: ComponentMeta::new(name),
            vertex_source: vertex_source.into(),
            fragment_source: fragment_source.into(),
            initialized: false,
        }
    }

    /// Whether `init` has run successfully
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl Component for Shader {
    fn meta(&self) -> &ComponentMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut ComponentMeta {
        &mut self.meta
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept(&mut self, system: &mut dyn System, ctx: &VisitContext) -> SceneResult<()> {
        system.apply2_shader(self, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn init(&mut self) -> SceneResult<()> {
        if self.vertex_source.trim().is_empty() || self.fragment_source.trim().is_empty() {
            return Err(SceneError::InvalidShader {
                name: self.meta.name.clone(),
                reason: "shader stage source is empty".to_string(),
            });
        }
        self.initialized = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_requires_both_stages() {
        let mut empty = Shader::new("broken", "void main() {}", "  ");
        assert!(matches!(empty.init(), Err(SceneError::InvalidShader { .. })));
        assert!(!empty.is_initialized());

        let mut shader = Shader::new("flat", "void main() {}", "void main() {}");
        shader.init().unwrap();
        assert!(shader.is_initialized());
    }
}
