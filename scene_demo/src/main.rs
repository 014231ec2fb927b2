//! Scene engine demo
//!
//! Builds a small scene (a spinning object under a group, a camera on a
//! boom), wires a viewport event route and runs a few frames, logging the
//! resulting matrices. Pass a `.toml` or `.ron` scene config as the first
//! argument to override the defaults.

use std::cell::RefCell;
use std::rc::Rc;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;

const FRAMES: usize = 3;

fn translation_of(matrix: &Mat4) -> Vec3 {
    Vec3::new(matrix.m14, matrix.m24, matrix.m34)
}

fn load_config() -> Result<SceneConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene config from {}", path);
            Ok(SceneConfig::load_from_file(path)?)
        }
        None => Ok(SceneConfig {
            log_tree_on_init: true,
            ..SceneConfig::default()
        }),
    }
}

fn build_scene(scene: &mut Scene) -> SceneResult<(EntityId, EntityId)> {
    let world = scene.world_mut();
    let root = world.root();
    world.add_component(root, BasicTransform::new("root_trs"))?;

    let group = world.create_entity(Entity::with_type("group", "Group"))?;
    world.add_entity_child(root, group)?;
    world.add_component(group, BasicTransform::from_trs("group_trs", Mat4::translate(0.0, 1.0, 0.0)))?;

    let object = world.create_entity(Entity::new("object"))?;
    world.add_entity_child(group, object)?;
    world.add_component(object, BasicTransform::new("object_trs"))?;
    world.add_component(
        object,
        RenderMesh::new("triangle")
            .with_attribute("position", 4, vec![
                -0.5, -0.5, 0.0, 1.0, //
                0.5, -0.5, 0.0, 1.0, //
                0.0, 0.5, 0.0, 1.0,
            ])
            .with_indices(vec![0, 1, 2]),
    )?;

    let mut shader = ShaderDecorator::new(
        "flat_shader",
        Shader::new("flat", include_str!("shaders/flat.vert"), include_str!("shaders/flat.frag")),
    );
    shader.set_uniform_variable("color", UniformValue::Float4(Vec4::new(1.0, 0.5, 0.0, 1.0)), UniformKind::FLOAT4)?;
    world.add_component(object, shader)?;

    let boom = world.create_entity(Entity::new("camera_boom"))?;
    world.add_entity_child(root, boom)?;
    world.add_component(boom, BasicTransform::from_trs("boom_trs", Mat4::rotation_y(0.3)))?;

    let camera = world.create_entity(Entity::with_type("camera", "Camera"))?;
    world.add_entity_child(boom, camera)?;
    world.add_component(camera, BasicTransform::from_trs("camera_trs", Mat4::translate(0.0, 1.0, 6.0)))?;
    world.add_component(camera, Camera::perspective("main_camera", 50.0, 16.0 / 9.0, 0.01, 100.0))?;

    scene.set_camera(camera)?;
    Ok((object, camera))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_level(logging::LevelFilter::Info);
    log::info!("Starting scene engine demo");

    let viewport = Rc::new(RefCell::new(ViewportState::new("viewport")));
    let events = EventManager::builder()
        .event(Event::new(ViewportStateSystem::ON_UPDATE_WIREFRAME, 0).with_value(EventValue::Bool(false)))
        .event(Event::new(ViewportStateSystem::ON_UPDATE_CLEAR_COLOR, 1))
        .route(
            ViewportStateSystem::ON_UPDATE_WIREFRAME,
            viewport.clone(),
            Rc::new(RefCell::new(ViewportStateSystem::new())),
        )
        .route(
            ViewportStateSystem::ON_UPDATE_CLEAR_COLOR,
            viewport.clone(),
            Rc::new(RefCell::new(ViewportStateSystem::new())),
        )
        .publisher(ViewportStateSystem::ON_UPDATE_WIREFRAME, "gui")
        .build()?;

    let mut scene = Scene::new(load_config()?).with_events(events);
    let (object, camera) = build_scene(&mut scene)?;
    scene.init()?;

    for frame in 0..FRAMES {
        if let Some(transform) = scene.world_mut().transform_of_mut(object) {
            transform.set_rotation_euler_angles(Vec3::new(0.0, 30.0 * frame as f32, 0.0));
        }

        let report = scene.run_frame()?;
        log::info!("Frame {} stages: {:?}", report.frame, report.stage_trace);

        if let Some(transform) = scene.world().transform_of(object) {
            log::info!("object l2world translation: {:?}", translation_of(&transform.l2world));
            log::info!("object l2cam translation: {:?}", translation_of(&transform.l2cam));
        }
    }

    let wireframe = Event::new(ViewportStateSystem::ON_UPDATE_WIREFRAME, 0).with_value(EventValue::Bool(true));
    scene.notify("gui", &wireframe)?;
    let clear = Event::new(ViewportStateSystem::ON_UPDATE_CLEAR_COLOR, 1)
        .with_value(EventValue::Vec4(Vec4::new(0.1, 0.1, 0.15, 1.0)));
    scene.notify("gui", &clear)?;
    if !scene.notify("gui", &Event::new("OnUnrouted", 99))? {
        log::info!("Event 'OnUnrouted' has no route, dropped");
    }

    let state = viewport.borrow();
    log::info!(
        "Viewport: wireframe={} clear_color={:?}",
        state.wireframe,
        state.clear_color
    );

    if let Some(camera_id) = scene.world().component_by_type(camera, Camera::TYPE_NAME) {
        if let Some(camera) = scene.world().component_as::<Camera>(camera_id) {
            log::info!("View-projection: {:?}", camera.view_projection());
        }
    }

    log::info!("Demo finished after {} frames", scene.world().frames_completed());
    Ok(())
}
