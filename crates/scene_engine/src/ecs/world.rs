//! ECS World implementation
//!
//! The world owns every registered entity and component in two slot maps
//! and keeps the scenegraph rooted at a root entity created with it.
//! Entities refer to each other and to their components by id only, so
//! structural edits never fight the borrow checker and stale ids are
//! detected rather than dangling.

use std::collections::HashSet;
use std::fmt;

use slotmap::SlotMap;

use super::component::Component;
use super::components::{BasicTransform, Camera};
use super::entity::{ComponentSlot, Entity};
use super::frame::{FrameStage, FrameTracker};
use super::system::{System, TraversalPhase, VisitContext};
use super::{ComponentId, EntityId};
use crate::config::{DispatchPolicy, SceneConfig};
use crate::error::{SceneError, SceneResult};
use crate::foundation::math::Mat4;

/// Type tag of the root entity
pub const ROOT_TYPE: &str = "Root";

/// Snapshot of a subtree, for logging and inspection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Entity id
    pub id: EntityId,
    /// Entity name
    pub name: String,
    /// Entity type tag
    pub type_tag: String,
    /// `name: TypeName` of each attached component
    pub components: Vec<String>,
    /// Child subtrees in order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        writeln!(f, "{:indent$}{} [{}]", "", self.name, self.type_tag, indent = depth * 2)?;
        for component in &self.components {
            writeln!(f, "{:indent$}- {}", "", component, indent = depth * 2 + 2)?;
        }
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }

    /// Number of entities in this subtree
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(TreeNode::len).sum::<usize>()
    }

    /// Always false: a subtree contains at least its own root
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

/// Scenegraph container: entity tree, component registry and frame state
pub struct World {
    entities: SlotMap<EntityId, Entity>,
    components: SlotMap<ComponentId, Box<dyn Component>>,
    root: EntityId,
    frame: FrameTracker,
    dispatch_policy: DispatchPolicy,
}

impl World {
    /// Create a world with default configuration
    pub fn new() -> Self {
        Self::with_config(&SceneConfig::default())
    }

    /// Create a world using the given configuration
    pub fn with_config(config: &SceneConfig) -> Self {
        let mut entities = SlotMap::with_key();
        let root = entities.insert_with_key(|id| {
            let mut entity = Entity::with_type(config.root_name.clone(), ROOT_TYPE);
            entity.id = Some(id);
            entity
        });
        log::debug!("World created with root '{}'", config.root_name);

        Self {
            entities,
            components: SlotMap::with_key(),
            root,
            frame: FrameTracker::new(config.frame_ordering),
            dispatch_policy: config.unsupported_dispatch,
        }
    }

    /// Root entity of the scenegraph
    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Handling of components a system has no handler for
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        self.dispatch_policy
    }

    /// Change the unsupported dispatch policy
    pub fn set_dispatch_policy(&mut self, policy: DispatchPolicy) {
        self.dispatch_policy = policy;
    }

    /// Register an entity without attaching it to the tree
    pub fn create_entity(&mut self, mut entity: Entity) -> SceneResult<EntityId> {
        if entity.id.is_some() {
            return Err(SceneError::DuplicateRegistration {
                kind: "entity",
                name: entity.name().to_string(),
            });
        }

        entity.parent = None;
        entity.children.clear();
        entity.components.clear();
        let id = self.entities.insert_with_key(|id| {
            entity.id = Some(id);
            entity
        });
        log::debug!("Created entity {:?}", id);
        Ok(id)
    }

    /// Register a component without binding it to an entity
    pub fn register_component(&mut self, mut component: Box<dyn Component>) -> SceneResult<ComponentId> {
        if component.id().is_some() {
            return Err(SceneError::DuplicateRegistration {
                kind: "component",
                name: component.name().to_string(),
            });
        }

        component.set_owner(None);
        let id = self.components.insert_with_key(|id| {
            component.meta_mut().id = Some(id);
            component
        });
        log::debug!("Registered component {:?}", id);
        Ok(id)
    }

    /// Register `component` and bind it to `entity`
    pub fn add_component<C: Component>(&mut self, entity: EntityId, component: C) -> SceneResult<ComponentId> {
        self.add_boxed_component(entity, Box::new(component))
    }

    /// Register a boxed component and bind it to `entity`
    pub fn add_boxed_component(
        &mut self,
        entity: EntityId,
        component: Box<dyn Component>,
    ) -> SceneResult<ComponentId> {
        if !self.entities.contains_key(entity) {
            return Err(SceneError::EntityNotFound(entity));
        }
        let id = self.register_component(component)?;
        self.attach_component(entity, id)?;
        Ok(id)
    }

    /// Bind a registered component to `entity`
    pub fn attach_component(&mut self, entity: EntityId, component: ComponentId) -> SceneResult<()> {
        let target = self
            .components
            .get_mut(component)
            .ok_or(SceneError::ComponentNotFound(component))?;
        if let Some(owner) = target.owner() {
            return Err(SceneError::ComponentAlreadyBound { component, owner });
        }
        let node = self
            .entities
            .get_mut(entity)
            .ok_or(SceneError::EntityNotFound(entity))?;

        node.components.push(ComponentSlot {
            type_name: target.type_name(),
            kind: target.kind(),
            id: component,
        });
        target.set_owner(Some(entity));
        Ok(())
    }

    /// Unbind a component from its entity, keeping it registered
    pub fn detach_component(&mut self, component: ComponentId) -> SceneResult<()> {
        let target = self
            .components
            .get_mut(component)
            .ok_or(SceneError::ComponentNotFound(component))?;
        let owner = target.owner().ok_or(SceneError::ComponentNotBound(component))?;

        target.set_owner(None);
        if let Some(entity) = self.entities.get_mut(owner) {
            entity.remove_component(component);
        }
        Ok(())
    }

    /// Unbind and unregister a component, handing it back
    pub fn remove_component(&mut self, component: ComponentId) -> SceneResult<Box<dyn Component>> {
        let mut removed = self
            .components
            .remove(component)
            .ok_or(SceneError::ComponentNotFound(component))?;

        if let Some(owner) = removed.owner() {
            if let Some(entity) = self.entities.get_mut(owner) {
                entity.remove_component(component);
            }
        }
        removed.set_owner(None);
        removed.meta_mut().id = None;
        log::debug!("Removed component {:?} ({})", component, removed.type_name());
        Ok(removed)
    }

    /// Append `child` to `parent`'s children.
    ///
    /// A child that already has a parent is moved. Fails with
    /// `CycleDetected` when `child` is `parent` or one of its ancestors.
    pub fn add_entity_child(&mut self, parent: EntityId, child: EntityId) -> SceneResult<()> {
        if !self.entities.contains_key(parent) {
            return Err(SceneError::EntityNotFound(parent));
        }
        let old_parent = self
            .entities
            .get(child)
            .ok_or(SceneError::EntityNotFound(child))?
            .parent;

        if child == parent || self.is_ancestor(child, parent) {
            return Err(SceneError::CycleDetected { parent, child });
        }

        if let Some(old_parent) = old_parent {
            log::debug!("Moving entity {:?} from {:?} to {:?}", child, old_parent, parent);
            if let Some(old) = self.entities.get_mut(old_parent) {
                old.remove_child(child);
            }
        }
        if let Some(node) = self.entities.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.entities.get_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Detach `child` from `parent`.
    ///
    /// Shallow: the child and its subtree stay registered and keep their
    /// components; use [`World::destroy_entity`] for a full teardown.
    /// Returns `false` when `child` was not a child of `parent`.
    pub fn remove_entity_child(&mut self, parent: EntityId, child: EntityId) -> SceneResult<bool> {
        if child == self.root {
            return Err(SceneError::RootRemoval);
        }
        if !self.entities.contains_key(child) {
            return Err(SceneError::EntityNotFound(child));
        }
        let node = self
            .entities
            .get_mut(parent)
            .ok_or(SceneError::EntityNotFound(parent))?;

        if !node.remove_child(child) {
            return Ok(false);
        }
        if let Some(node) = self.entities.get_mut(child) {
            node.parent = None;
        }
        Ok(true)
    }

    /// Detach `entity` and unregister it, its descendants and all of
    /// their components. Returns the destroyed entity ids in pre-order.
    pub fn destroy_entity(&mut self, entity: EntityId) -> SceneResult<Vec<EntityId>> {
        if entity == self.root {
            return Err(SceneError::RootRemoval);
        }
        let parent = self
            .entities
            .get(entity)
            .ok_or(SceneError::EntityNotFound(entity))?
            .parent;
        if let Some(parent) = parent.and_then(|p| self.entities.get_mut(p)) {
            parent.remove_child(entity);
        }

        let doomed: Vec<EntityId> = self.preorder(entity).into_iter().map(|(id, _)| id).collect();
        for id in &doomed {
            if let Some(node) = self.entities.remove(*id) {
                for slot in node.components {
                    self.components.remove(slot.id);
                }
            }
        }
        log::debug!("Destroyed {} entities under {:?}", doomed.len(), entity);
        Ok(doomed)
    }

    /// Whether `ancestor` is a proper ancestor of `node`
    pub fn is_ancestor(&self, ancestor: EntityId, node: EntityId) -> bool {
        let mut current = self.entities.get(node).and_then(Entity::parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.entities.get(id).and_then(Entity::parent);
        }
        false
    }

    /// Child of `entity` at position `index`
    pub fn get_child(&self, entity: EntityId, index: usize) -> Option<EntityId> {
        self.entities.get(entity)?.child(index)
    }

    /// First child entity of `entity` with the given type tag.
    ///
    /// Grandchildren are not searched.
    pub fn child_by_type(&self, entity: EntityId, type_tag: &str) -> Option<EntityId> {
        self.entities
            .get(entity)?
            .children()
            .iter()
            .copied()
            .find(|child| self.entities.get(*child).is_some_and(|c| c.type_tag() == type_tag))
    }

    /// First component of `entity` with the given type name.
    ///
    /// Decorators match both their own type name and the kind they wrap.
    pub fn component_by_type(&self, entity: EntityId, type_name: &str) -> Option<ComponentId> {
        self.entities.get(entity)?.component_by_type(type_name)
    }

    /// Entity by id
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Component by id
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.components.get(id).map(|c| c.as_ref())
    }

    /// Component by id, mutably
    pub fn component_mut(&mut self, id: ComponentId) -> Option<&mut dyn Component> {
        match self.components.get_mut(id) {
            Some(component) => Some(component.as_mut()),
            None => None,
        }
    }

    /// Component by id, downcast to `T` through any decorators
    pub fn component_as<T: Component>(&self, id: ComponentId) -> Option<&T> {
        self.components.get(id)?.resolve_ref::<T>()
    }

    /// Component by id, downcast to `T` through any decorators, mutably
    pub fn component_as_mut<T: Component>(&mut self, id: ComponentId) -> Option<&mut T> {
        self.components.get_mut(id)?.resolve_mut::<T>()
    }

    /// First `BasicTransform` of `entity`
    pub fn transform_of(&self, entity: EntityId) -> Option<&BasicTransform> {
        let id = self.component_by_type(entity, BasicTransform::TYPE_NAME)?;
        self.component_as::<BasicTransform>(id)
    }

    /// First `BasicTransform` of `entity`, mutably
    pub fn transform_of_mut(&mut self, entity: EntityId) -> Option<&mut BasicTransform> {
        let id = self.component_by_type(entity, BasicTransform::TYPE_NAME)?;
        self.component_as_mut::<BasicTransform>(id)
    }

    /// First entity named `name`, searching the tree in pre-order
    pub fn find_entity(&self, name: &str) -> Option<EntityId> {
        self.preorder(self.root)
            .into_iter()
            .map(|(id, _)| id)
            .find(|id| self.entities.get(*id).is_some_and(|e| e.name() == name))
    }

    /// Registered components with the given type name or wrapped kind
    pub fn components_of_type<'a>(&'a self, type_name: &'a str) -> impl Iterator<Item = ComponentId> + 'a {
        self.components
            .iter()
            .filter(move |(_, component)| component.type_name() == type_name || component.kind() == type_name)
            .map(|(id, _)| id)
    }

    /// All registered entities
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter()
    }

    /// All registered components
    pub fn components(&self) -> impl Iterator<Item = (ComponentId, &dyn Component)> {
        self.components.iter().map(|(id, c)| (id, c.as_ref()))
    }

    /// Number of registered entities, root included
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of registered components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// World matrix of `entity` composed from `trs` up its ancestry.
    ///
    /// Composition stops at the first entity without a transform, which
    /// is treated as the world origin. Independent of `l2world`, so it is
    /// valid at any point in a frame.
    pub fn resolve_world_matrix(&self, entity: EntityId) -> SceneResult<Mat4> {
        let mut current = self
            .entities
            .get(entity)
            .ok_or(SceneError::EntityNotFound(entity))?;
        let mut world = Mat4::identity();

        while let Some(transform) = current.id.and_then(|id| self.transform_of(id)) {
            world = transform.trs * world;
            match current.parent.and_then(|p| self.entities.get(p)) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        Ok(world)
    }

    /// Snapshot of the subtree under `entity`
    pub fn describe_tree(&self, entity: EntityId) -> Option<TreeNode> {
        let node = self.entities.get(entity)?;
        let components = node
            .components()
            .iter()
            .map(|slot| {
                let name = self.components.get(slot.id).map_or("?", |c| c.name());
                if slot.kind == slot.type_name {
                    format!("{}: {}", name, slot.type_name)
                } else {
                    format!("{}: {}({})", name, slot.type_name, slot.kind)
                }
            })
            .collect();
        let children = node
            .children()
            .iter()
            .filter_map(|child| self.describe_tree(*child))
            .collect();

        Some(TreeNode {
            id: entity,
            name: node.name().to_string(),
            type_tag: node.type_tag().to_string(),
            components,
            children,
        })
    }

    /// Call `init` on every component in the tree, in pre-order
    pub fn init_components(&mut self) -> SceneResult<()> {
        for id in self.tree_component_ids() {
            if let Some(component) = self.components.get_mut(id) {
                component.init()?;
            }
        }
        Ok(())
    }

    /// Call `update` on every component in the tree, in pre-order
    pub fn update_components(&mut self) -> SceneResult<()> {
        for id in self.tree_component_ids() {
            if let Some(component) = self.components.get_mut(id) {
                component.update()?;
            }
        }
        Ok(())
    }

    /// Visit the subtree under `node` in pre-order.
    ///
    /// For each entity the system sees `apply2_entity` and then every
    /// attached component in attachment order. A parent's components are
    /// always visited before its children's.
    pub fn traverse_visit(&mut self, system: &mut dyn System, node: EntityId) -> SceneResult<()> {
        if !self.entities.contains_key(node) {
            return Err(SceneError::EntityNotFound(node));
        }
        let next = self.frame.check(system.role(), TraversalPhase::Main)?;
        if node != self.root {
            log::debug!("{} traversal starts below the root at {:?}", system.name(), node);
        }

        let order = self.preorder(node);
        log::trace!("{} visiting {} entities from {:?}", system.name(), order.len(), node);

        let mut warned = HashSet::new();
        for (entity, depth) in order {
            let Some(current) = self.entities.get(entity) else {
                continue;
            };
            let parent = current.parent;
            let ctx = VisitContext {
                entity,
                parent,
                depth,
                phase: TraversalPhase::Main,
                parent_world: parent.and_then(|p| self.transform_of(p)).map(|t| t.l2world),
                entity_world: None,
            };
            system.apply2_entity(current, &ctx)?;

            let slots: Vec<ComponentId> = current.component_ids().collect();
            for id in slots {
                let component = self
                    .components
                    .get_mut(id)
                    .ok_or(SceneError::ComponentNotFound(id))?;
                dispatch(self.dispatch_policy, &mut warned, system, component.as_mut(), &ctx)?;
            }
        }

        if let Some(next) = next {
            self.frame.advance(next);
        }
        Ok(())
    }

    /// Resolve the active camera below `camera_node`.
    ///
    /// Only the first `Camera` found in pre-order under `camera_node` is
    /// visited, with its world matrix in [`VisitContext::entity_world`].
    pub fn traverse_visit_pre_camera(&mut self, system: &mut dyn System, camera_node: EntityId) -> SceneResult<()> {
        if !self.entities.contains_key(camera_node) {
            return Err(SceneError::EntityNotFound(camera_node));
        }
        let next = self.frame.check(system.role(), TraversalPhase::PreCamera)?;

        let (entity, depth, camera) = self
            .preorder(camera_node)
            .into_iter()
            .find_map(|(id, depth)| {
                self.component_by_type(id, Camera::TYPE_NAME)
                    .map(|camera| (id, depth, camera))
            })
            .ok_or(SceneError::CameraNotFound(camera_node))?;

        let parent = self.entities.get(entity).and_then(Entity::parent);
        let ctx = VisitContext {
            entity,
            parent,
            depth,
            phase: TraversalPhase::PreCamera,
            parent_world: parent.and_then(|p| self.transform_of(p)).map(|t| t.l2world),
            entity_world: Some(self.resolve_world_matrix(entity)?),
        };

        let component = self
            .components
            .get_mut(camera)
            .ok_or(SceneError::ComponentNotFound(camera))?;
        dispatch(self.dispatch_policy, &mut HashSet::new(), system, component.as_mut(), &ctx)?;

        if let Some(next) = next {
            self.frame.advance(next);
        }
        Ok(())
    }

    /// Close the current frame
    pub fn end_frame(&mut self) -> SceneResult<()> {
        self.frame.end_frame()
    }

    /// Abandon the current frame, e.g. after a failed traversal
    pub fn reset_frame(&mut self) {
        self.frame.reset();
    }

    /// Stage of the current frame
    pub fn frame_stage(&self) -> FrameStage {
        self.frame.stage()
    }

    /// Number of completed frames
    pub fn frames_completed(&self) -> u64 {
        self.frame.frames_completed()
    }

    fn preorder(&self, start: EntityId) -> Vec<(EntityId, usize)> {
        let mut order = Vec::new();
        let mut stack = vec![(start, 0)];
        while let Some((id, depth)) = stack.pop() {
            let Some(entity) = self.entities.get(id) else {
                continue;
            };
            order.push((id, depth));
            stack.extend(entity.children().iter().rev().map(|child| (*child, depth + 1)));
        }
        order
    }

    fn tree_component_ids(&self) -> Vec<ComponentId> {
        self.preorder(self.root)
            .into_iter()
            .filter_map(|(id, _)| self.entities.get(id))
            .flat_map(|entity| entity.component_ids())
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Visit one component and apply the unsupported dispatch policy
fn dispatch(
    policy: DispatchPolicy,
    warned: &mut HashSet<&'static str>,
    system: &mut dyn System,
    component: &mut dyn Component,
    ctx: &VisitContext,
) -> SceneResult<()> {
    let result = component.accept(system, ctx);
    policy.apply(system.name(), result, warned).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::Shader;
    use crate::foundation::math::Mat4Ext;

    #[test]
    fn test_root_exists_at_construction() {
        let world = World::new();
        let root = world.entity(world.root()).unwrap();

        assert_eq!(root.name(), "root");
        assert_eq!(root.type_tag(), ROOT_TYPE);
        assert!(root.is_root());
        assert_eq!(world.entity_count(), 1);
    }

    #[test]
    fn test_create_entity_twice_fails() {
        let mut world = World::new();
        let id = world.create_entity(Entity::new("node")).unwrap();

        let copy = world.entity(id).unwrap().clone();
        let err = world.create_entity(copy).unwrap_err();

        assert!(matches!(err, SceneError::DuplicateRegistration { kind: "entity", .. }));
    }

    #[test]
    fn test_component_binding_lifecycle() {
        let mut world = World::new();
        let a = world.create_entity(Entity::new("a")).unwrap();
        let b = world.create_entity(Entity::new("b")).unwrap();

        let trs = world.add_component(a, BasicTransform::new("trs")).unwrap();
        assert_eq!(world.component(trs).unwrap().owner(), Some(a));

        let err = world.attach_component(b, trs).unwrap_err();
        assert_eq!(err, SceneError::ComponentAlreadyBound { component: trs, owner: a });

        world.detach_component(trs).unwrap();
        assert_eq!(world.entity(a).unwrap().component_count(), 0);
        assert_eq!(world.detach_component(trs), Err(SceneError::ComponentNotBound(trs)));

        world.attach_component(b, trs).unwrap();
        assert_eq!(world.component_by_type(b, BasicTransform::TYPE_NAME), Some(trs));

        let removed = world.remove_component(trs).unwrap();
        assert!(removed.id().is_none());
        assert!(removed.owner().is_none());
        assert_eq!(world.entity(b).unwrap().component_count(), 0);
        assert!(world.component(trs).is_none());
    }

    #[test]
    fn test_reparenting_moves_child() {
        let mut world = World::new();
        let root = world.root();
        let a = world.create_entity(Entity::new("a")).unwrap();
        let b = world.create_entity(Entity::new("b")).unwrap();
        world.add_entity_child(root, a).unwrap();
        world.add_entity_child(root, b).unwrap();

        world.add_entity_child(a, b).unwrap();

        assert_eq!(world.entity(root).unwrap().children(), &[a]);
        assert_eq!(world.entity(a).unwrap().children(), &[b]);
        assert_eq!(world.entity(b).unwrap().parent(), Some(a));
    }

    #[test]
    fn test_resolve_world_matrix_stops_at_missing_transform() {
        let mut world = World::new();
        let root = world.root();
        let group = world.create_entity(Entity::new("group")).unwrap();
        let leaf = world.create_entity(Entity::new("leaf")).unwrap();
        world.add_entity_child(root, group).unwrap();
        world.add_entity_child(group, leaf).unwrap();
        world
            .add_component(root, BasicTransform::from_trs("root_trs", Mat4::translate(5.0, 0.0, 0.0)))
            .unwrap();
        world
            .add_component(leaf, BasicTransform::from_trs("leaf_trs", Mat4::translate(0.0, 2.0, 0.0)))
            .unwrap();

        assert_eq!(world.resolve_world_matrix(leaf).unwrap(), Mat4::translate(0.0, 2.0, 0.0));
        assert_eq!(world.resolve_world_matrix(group).unwrap(), Mat4::identity());
    }

    #[test]
    fn test_lifecycle_hooks_visit_tree_components() {
        let mut world = World::new();
        let root = world.root();
        let node = world.create_entity(Entity::new("node")).unwrap();
        world.add_entity_child(root, node).unwrap();
        let shader = world.add_component(node, Shader::new("flat", "v", "f")).unwrap();
        let detached = world.create_entity(Entity::new("detached")).unwrap();
        world.add_component(detached, Shader::new("broken", "", "")).unwrap();

        world.init_components().unwrap();
        world.update_components().unwrap();
        assert!(world.component_as::<Shader>(shader).unwrap().is_initialized());

        world.add_entity_child(root, detached).unwrap();
        assert!(matches!(world.init_components(), Err(SceneError::InvalidShader { .. })));
    }

    #[test]
    fn test_component_mut_and_policy_switch() {
        let mut world = World::new();
        let root = world.root();
        let id = world.add_component(root, BasicTransform::new("trs")).unwrap();

        world.component_mut(id).unwrap().meta_mut().name = "renamed".to_string();
        assert_eq!(world.component(id).unwrap().name(), "renamed");
        assert_eq!(world.components().count(), 1);

        world.set_dispatch_policy(DispatchPolicy::Error);
        assert_eq!(world.dispatch_policy(), DispatchPolicy::Error);
    }

    #[test]
    fn test_describe_tree() {
        let mut world = World::new();
        let root = world.root();
        let node = world.create_entity(Entity::with_type("node", "Group")).unwrap();
        world.add_entity_child(root, node).unwrap();
        world.add_component(node, BasicTransform::new("trs")).unwrap();

        let tree = world.describe_tree(root).unwrap();

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.children[0].components, vec!["trs: BasicTransform".to_string()]);
        assert_eq!(tree.to_string(), "root [Root]\n  node [Group]\n    - trs: BasicTransform\n");
    }
}
