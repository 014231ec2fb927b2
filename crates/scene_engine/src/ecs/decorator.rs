//! Component decorators
//!
//! A decorator owns exactly one component and forwards `init`, `update`
//! and `accept` to it, so systems see the wrapped component's kind. It
//! adds behavior on top without subclassing the wrapped type.

use std::any::Any;
use std::collections::HashMap;

use bitflags::bitflags;

use super::component::{Component, ComponentMeta};
use super::components::Shader;
use super::system::{System, VisitContext};
use super::EntityId;
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::{Mat3, Mat4, Vec3, Vec4};

/// Transparent wrapper around a single component
pub struct ComponentDecorator {
    meta: ComponentMeta,
    component: Box<dyn Component>,
}

impl ComponentDecorator {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "ComponentDecorator";

    /// Wrap `component`
    pub fn new(name: impl Into<String>, component: Box<dyn Component>) -> Self {
        let mut meta = ComponentMeta::new(name);
        meta.owner = component.owner();
        Self { meta, component }
    }

    /// The wrapped component
    pub fn wrapped(&self) -> &dyn Component {
        self.component.as_ref()
    }

    /// The wrapped component, mutably
    pub fn wrapped_mut(&mut self) -> &mut dyn Component {
        self.component.as_mut()
    }

    /// The wrapped component downcast to its concrete type
    pub fn wrapped_as<T: Component>(&self) -> Option<&T> {
        self.component.downcast_ref::<T>()
    }

    /// The wrapped component downcast to its concrete type, mutably
    pub fn wrapped_as_mut<T: Component>(&mut self) -> Option<&mut T> {
        self.component.downcast_mut::<T>()
    }

    /// Unwrap, returning the wrapped component
    pub fn into_inner(self) -> Box<dyn Component> {
        self.component
    }
}

impl std::fmt::Debug for ComponentDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDecorator")
            .field("meta", &self.meta)
            .field("wrapped", &self.component.type_name())
            .finish()
    }
}

impl Component for ComponentDecorator {
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
        self.component.accept(system, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_owner(&mut self, owner: Option<EntityId>) {
        self.meta.owner = owner;
        self.component.set_owner(owner);
    }

    fn init(&mut self) -> SceneResult<()> {
        self.component.init()
    }

    fn update(&mut self) -> SceneResult<()> {
        self.component.update()
    }

    fn wrapped_component(&self) -> Option<&(dyn Component + 'static)> {
        Some(self.component.as_ref())
    }

    fn wrapped_component_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        Some(self.component.as_mut())
    }
}

bitflags! {
    /// Storage class of a shader uniform
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct UniformKind: u8 {
        /// 4x4 float matrix
        const MAT4 = 1 << 0;
        /// 3x3 float matrix
        const MAT3 = 1 << 1;
        /// Single float
        const FLOAT1 = 1 << 2;
        /// 3-component float vector
        const FLOAT3 = 1 << 3;
        /// 4-component float vector
        const FLOAT4 = 1 << 4;
        /// Texture bound by file path
        const TEXTURE = 1 << 5;
    }
}

/// Value of a shader uniform
#[derive(Debug, Clone, PartialEq)]
pub enum UniformValue {
    /// 4x4 matrix
    Mat4(Mat4),
    /// 3x3 matrix
    Mat3(Mat3),
    /// Scalar
    Float1(f32),
    /// 3-vector
    Float3(Vec3),
    /// 4-vector
    Float4(Vec4),
    /// Texture file path
    Texture(String),
}

impl UniformValue {
    /// Kind flag matching this value
    pub const fn kind(&self) -> UniformKind {
        match self {
            Self::Mat4(_) => UniformKind::MAT4,
            Self::Mat3(_) => UniformKind::MAT3,
            Self::Float1(_) => UniformKind::FLOAT1,
            Self::Float3(_) => UniformKind::FLOAT3,
            Self::Float4(_) => UniformKind::FLOAT4,
            Self::Texture(_) => UniformKind::TEXTURE,
        }
    }
}

/// Shader decorator adding per-kind uniform tables.
///
/// Systems visiting it reach the wrapped [`Shader`]; the uniform tables are
/// read by the render backend after traversal.
#[derive(Debug)]
pub struct ShaderDecorator {
    base: ComponentDecorator,
    uniforms: HashMap<UniformKind, HashMap<String, UniformValue>>,
}

impl ShaderDecorator {
    /// Type name used for lookups
    pub const TYPE_NAME: &'static str = "ShaderDecorator";

    /// Wrap a shader
    pub fn new(name: impl Into<String>, shader: Shader) -> Self {
        Self {
            base: ComponentDecorator::new(name, Box::new(shader)),
            uniforms: HashMap::new(),
        }
    }

    /// The wrapped shader
    pub fn shader(&self) -> Option<&Shader> {
        self.base.wrapped_as::<Shader>()
    }

    /// The wrapped shader, mutably
    pub fn shader_mut(&mut self) -> Option<&mut Shader> {
        self.base.wrapped_as_mut::<Shader>()
    }

    /// Store a uniform under `key`.
    ///
    /// `kind` must name exactly one storage class and agree with `value`.
    /// Setting an existing key in the same class overwrites it.
    pub fn set_uniform_variable(
        &mut self,
        key: impl Into<String>,
        value: UniformValue,
        kind: UniformKind,
    ) -> SceneResult<()> {
        let key = key.into();
        if kind.bits().count_ones() != 1 {
            return Err(SceneError::UniformKindMismatch {
                key,
                reason: format!("exactly one kind flag required, got {kind:?}"),
            });
        }
        if value.kind() != kind {
            return Err(SceneError::UniformKindMismatch {
                key,
                reason: format!("value is {:?} but flag is {kind:?}", value.kind()),
            });
        }

        log::trace!("Uniform '{}' set on '{}' as {:?}", key, self.base.name(), kind);
        self.uniforms.entry(kind).or_default().insert(key, value);
        Ok(())
    }

    /// Look a uniform up by key across all kinds
    pub fn uniform(&self, key: &str) -> Option<&UniformValue> {
        self.uniforms.values().find_map(|table| table.get(key))
    }

    /// All uniforms of one kind
    pub fn uniforms_of(&self, kind: UniformKind) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.uniforms
            .get(&kind)
            .into_iter()
            .flat_map(|table| table.iter().map(|(key, value)| (key.as_str(), value)))
    }

    /// Number of stored uniforms
    pub fn uniform_count(&self) -> usize {
        self.uniforms.values().map(HashMap::len).sum()
    }

    /// Drop every stored uniform
    pub fn clear_uniforms(&mut self) {
        self.uniforms.clear();
    }
}

impl Component for ShaderDecorator {
    fn meta(&self) -> &ComponentMeta {
        self.base.meta()
    }

    fn meta_mut(&mut self) -> &mut ComponentMeta {
        self.base.meta_mut()
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn accept(&mut self, system: &mut dyn System, ctx: &VisitContext) -> SceneResult<()> {
        self.base.accept(system, ctx)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn set_owner(&mut self, owner: Option<EntityId>) {
        self.base.set_owner(owner);
    }

    fn init(&mut self) -> SceneResult<()> {
        self.base.init()
    }

    fn update(&mut self) -> SceneResult<()> {
        self.base.update()
    }

    fn wrapped_component(&self) -> Option<&(dyn Component + 'static)> {
        self.base.wrapped_component()
    }

    fn wrapped_component_mut(&mut self) -> Option<&mut (dyn Component + 'static)> {
        self.base.wrapped_component_mut()
    }
}
