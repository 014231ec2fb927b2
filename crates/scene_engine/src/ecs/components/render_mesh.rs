//! Mesh geometry component
//!
//! Holds CPU-side vertex attributes and indices. Uploading them to a GPU
//! is the renderer's job; it finds meshes through the world registry.

use std::any::Any;

use crate::ecs::component::{Component, ComponentMeta};
use crate::ecs::system::{System, VisitContext};
use crate::error::SceneResult;

/// A named, flat vertex attribute stream
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    /// Attribute name as seen by shaders (e.g. `"position"`)
    pub name: String,
    /// Floats per vertex (1 to 4)
    pub components: usize,
    /// Interleaving-free data, `components` floats per vertex
    pub data: Vec<f32>,
}

impl VertexAttribute {
    /// Number of vertices in this stream
    pub fn vertex_count(&self) -> usize {
        if self.components == 0 {
            0
        } else {
            self.data.len() / self.components
        }
    }
}

/// Vertex attribute streams and an optional index list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderMesh {
    meta: ComponentMeta,
    attributes: Vec<VertexAttribute>,
    indices: Vec<u32>,
}

impl RenderMesh {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "RenderMesh";

    /// Empty mesh
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: ComponentMeta::new(name),
            attributes: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Builder pattern: add an attribute stream
    pub fn with_attribute(mut self, name: impl Into<String>, components: usize, data: Vec<f32>) -> Self {
        self.set_attribute(name, components, data);
        self
    }

    /// Builder pattern: set the index list
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = indices;
        self
    }

    /// Add or replace an attribute stream
    pub fn set_attribute(&mut self, name: impl Into<String>, components: usize, data: Vec<f32>) {
        let name = name.into();
        let attribute = VertexAttribute { name, components, data };
        match self.attributes.iter_mut().find(|a| a.name == attribute.name) {
            Some(existing) => *existing = attribute,
            None => self.attributes.push(attribute),
        }
    }

    /// Attribute stream by name
    pub fn attribute(&self, name: &str) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// All attribute streams in insertion order
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Index list (empty for non-indexed meshes)
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Vertex count of the first attribute stream
    pub fn vertex_count(&self) -> usize {
        self.attributes.first().map_or(0, VertexAttribute::vertex_count)
    }
}

impl Component for RenderMesh {
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
        system.apply2_render_mesh(self, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributes_replace_by_name() {
        let mut mesh = RenderMesh::new("triangle")
            .with_attribute("position", 4, vec![0.0; 12])
            .with_attribute("color", 4, vec![1.0; 12])
            .with_indices(vec![0, 1, 2]);

        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);

        mesh.set_attribute("color", 3, vec![0.5; 9]);
        assert_eq!(mesh.attributes().len(), 2);
        assert_eq!(mesh.attribute("color").map(|a| a.components), Some(3));
        assert!(mesh.attribute("normal").is_none());
    }
}
