//! Scenegraph integration tests

mod scenegraph_integration;

use crate::ecs::{BasicTransform, Entity, EntityId, World};
use crate::foundation::math::Mat4;

/// Create `name` under `parent` with a single transform
fn add_node(world: &mut World, parent: EntityId, name: &str, trs: Mat4) -> EntityId {
    let id = world.create_entity(Entity::new(name)).unwrap();
    world.add_entity_child(parent, id).unwrap();
    world
        .add_component(id, BasicTransform::from_trs(format!("{name}_trs"), trs))
        .unwrap();
    id
}
