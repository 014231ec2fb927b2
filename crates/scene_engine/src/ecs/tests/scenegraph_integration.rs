//! Tree structure and transform propagation

use super::add_node;
use crate::ecs::{BasicTransform, ComponentDecorator, Entity, TransformSystem, World};
use crate::error::SceneError;
use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use approx::assert_relative_eq;

#[test]
fn test_three_level_chain() {
    let mut world = World::new();
    let root = world.root();
    world
        .add_component(root, BasicTransform::from_trs("root_trs", Mat4::translate(0.0, 0.0, 0.0)))
        .unwrap();
    let a = add_node(&mut world, root, "A", Mat4::translate(1.0, 0.0, 0.0));
    let b = add_node(&mut world, a, "B", Mat4::translate(0.0, 1.0, 0.0));

    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();

    assert_relative_eq!(
        world.transform_of(b).unwrap().l2world,
        Mat4::translate(1.0, 1.0, 0.0),
        epsilon = 1e-6
    );
}

#[test]
fn test_l2world_is_product_of_ancestor_trs() {
    let mut world = World::new();
    let root = world.root();
    let root_trs = Mat4::rotation_z(0.4);
    let a_trs = Mat4::translate(2.0, 0.0, -1.0) * Mat4::scaling(1.0, 2.0, 1.0);
    let b_trs = Mat4::rotation_x(1.1) * Mat4::translate(0.0, 3.0, 0.0);
    let c_trs = Mat4::rotation_y(-0.7);
    world.add_component(root, BasicTransform::from_trs("root_trs", root_trs)).unwrap();
    let a = add_node(&mut world, root, "A", a_trs);
    let b = add_node(&mut world, a, "B", b_trs);
    let c = add_node(&mut world, b, "C", c_trs);
    let sibling = add_node(&mut world, a, "D", Mat4::translate(9.0, 9.0, 9.0));

    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();

    assert_relative_eq!(world.transform_of(root).unwrap().l2world, root_trs, epsilon = 1e-6);
    assert_relative_eq!(
        world.transform_of(c).unwrap().l2world,
        root_trs * a_trs * b_trs * c_trs,
        epsilon = 1e-5
    );
    assert_relative_eq!(
        world.transform_of(sibling).unwrap().l2world,
        root_trs * a_trs * Mat4::translate(9.0, 9.0, 9.0),
        epsilon = 1e-5
    );
}

#[test]
fn test_edits_propagate_on_next_pass() {
    let mut world = World::new();
    let root = world.root();
    let a = add_node(&mut world, root, "A", Mat4::translate(1.0, 0.0, 0.0));
    let b = add_node(&mut world, a, "B", Mat4::identity());
    let mut system = TransformSystem::new();

    world.traverse_visit(&mut system, root).unwrap();
    world.end_frame().unwrap();
    world.transform_of_mut(a).unwrap().set_trs(Mat4::translate(0.0, 0.0, 7.0));
    world.traverse_visit(&mut system, root).unwrap();

    assert_relative_eq!(
        world.transform_of(b).unwrap().l2world,
        Mat4::translate(0.0, 0.0, 7.0),
        epsilon = 1e-6
    );
}

#[test]
fn test_node_under_transformless_parent_is_a_root() {
    let mut world = World::new();
    let root = world.root();
    world
        .add_component(root, BasicTransform::from_trs("root_trs", Mat4::translate(5.0, 0.0, 0.0)))
        .unwrap();
    let group = world.create_entity(Entity::with_type("group", "Group")).unwrap();
    world.add_entity_child(root, group).unwrap();
    let leaf = add_node(&mut world, group, "leaf", Mat4::translate(0.0, 2.0, 0.0));

    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();

    assert_eq!(world.transform_of(leaf).unwrap().l2world, Mat4::translate(0.0, 2.0, 0.0));
}

#[test]
fn test_cycles_are_rejected() {
    let mut world = World::new();
    let root = world.root();
    let a = add_node(&mut world, root, "A", Mat4::identity());
    let b = add_node(&mut world, a, "B", Mat4::identity());
    let c = add_node(&mut world, b, "C", Mat4::identity());

    assert_eq!(
        world.add_entity_child(c, a),
        Err(SceneError::CycleDetected { parent: c, child: a })
    );
    assert_eq!(
        world.add_entity_child(b, b),
        Err(SceneError::CycleDetected { parent: b, child: b })
    );
    assert!(world.add_entity_child(a, root).is_err());

    assert_eq!(world.entity(a).unwrap().parent(), Some(root));
    assert_eq!(world.entity(c).unwrap().child_count(), 0);
    assert!(world.is_ancestor(a, c));
    assert!(!world.is_ancestor(c, a));
}

#[test]
fn test_child_lookups_do_not_search_grandchildren() {
    let mut world = World::new();
    let root = world.root();
    let group = world.create_entity(Entity::with_type("group", "Group")).unwrap();
    let nested = world.create_entity(Entity::with_type("nested", "Light")).unwrap();
    world.add_entity_child(root, group).unwrap();
    world.add_entity_child(group, nested).unwrap();

    assert_eq!(world.get_child(root, 0), Some(group));
    assert_eq!(world.get_child(root, 1), None);
    assert_eq!(world.child_by_type(root, "Group"), Some(group));
    assert_eq!(world.child_by_type(root, "Light"), None);
    assert_eq!(world.child_by_type(group, "Light"), Some(nested));
    assert_eq!(world.component_by_type(root, BasicTransform::TYPE_NAME), None);
}

#[test]
fn test_remove_entity_child_is_shallow() {
    let mut world = World::new();
    let root = world.root();
    let a = add_node(&mut world, root, "A", Mat4::identity());
    let b = add_node(&mut world, a, "B", Mat4::identity());

    assert!(world.remove_entity_child(root, a).unwrap());
    assert!(!world.remove_entity_child(root, a).unwrap());

    assert!(world.entity(a).unwrap().is_root());
    assert_eq!(world.entity(b).unwrap().parent(), Some(a));
    assert!(world.transform_of(b).is_some());
    assert_eq!(world.find_entity("A"), None);
    assert_eq!(world.entity_count(), 3);
}

#[test]
fn test_destroy_entity_tears_down_subtree() {
    let mut world = World::new();
    let root = world.root();
    let a = add_node(&mut world, root, "A", Mat4::identity());
    let b = add_node(&mut world, a, "B", Mat4::identity());
    let c = add_node(&mut world, b, "C", Mat4::identity());
    let keep = add_node(&mut world, root, "keep", Mat4::identity());

    let destroyed = world.destroy_entity(a).unwrap();

    assert_eq!(destroyed, vec![a, b, c]);
    assert_eq!(world.entity_count(), 2);
    assert_eq!(world.component_count(), 1);
    assert_eq!(world.entity(root).unwrap().children(), &[keep]);
    assert_eq!(world.find_entity("keep"), Some(keep));
    assert!(world.entity(b).is_none());
    assert_eq!(world.destroy_entity(root), Err(SceneError::RootRemoval));
    assert_eq!(world.remove_entity_child(root, root), Err(SceneError::RootRemoval));
}

#[test]
fn test_components_of_type_queries_registry() {
    let mut world = World::new();
    let root = world.root();
    add_node(&mut world, root, "A", Mat4::identity());
    add_node(&mut world, root, "B", Mat4::identity());
    world
        .register_component(Box::new(BasicTransform::new("floating")))
        .unwrap();

    assert_eq!(world.components_of_type(BasicTransform::TYPE_NAME).count(), 3);
    assert_eq!(world.components_of_type("Camera").count(), 0);
    assert_eq!(world.entities().count(), 3);
}

#[test]
fn test_decorated_parent_transform_propagates() {
    let mut world = World::new();
    let root = world.root();
    let a = world.create_entity(Entity::new("A")).unwrap();
    world.add_entity_child(root, a).unwrap();
    let decorated = ComponentDecorator::new(
        "A_decorated",
        Box::new(BasicTransform::from_trs("A_trs", Mat4::translate(1.0, 0.0, 0.0))),
    );
    let a_trs = world.add_component(a, decorated).unwrap();
    let b = add_node(&mut world, a, "B", Mat4::translate(0.0, 1.0, 0.0));

    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();

    assert_eq!(world.component_by_type(a, BasicTransform::TYPE_NAME), Some(a_trs));
    assert_eq!(world.component_by_type(a, ComponentDecorator::TYPE_NAME), Some(a_trs));
    assert_eq!(world.components_of_type(BasicTransform::TYPE_NAME).count(), 2);
    assert_relative_eq!(
        world.transform_of(a).unwrap().l2world,
        Mat4::translate(1.0, 0.0, 0.0),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        world.transform_of(b).unwrap().l2world,
        Mat4::translate(1.0, 1.0, 0.0),
        epsilon = 1e-6
    );
    assert_relative_eq!(
        world.resolve_world_matrix(b).unwrap(),
        Mat4::translate(1.0, 1.0, 0.0),
        epsilon = 1e-6
    );

    world.transform_of_mut(a).unwrap().set_translation(Vec3::new(3.0, 0.0, 0.0));
    world.traverse_visit(&mut TransformSystem::new(), root).unwrap();
    assert_relative_eq!(
        world.transform_of(b).unwrap().l2world,
        Mat4::translate(3.0, 1.0, 0.0),
        epsilon = 1e-6
    );

    let tree = world.describe_tree(a).unwrap();
    assert_eq!(tree.components, vec!["A_decorated: ComponentDecorator(BasicTransform)".to_string()]);
}
