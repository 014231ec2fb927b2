//! Scene: world plus the per-frame pass orchestration
//!
//! A frame runs the transform pass from the root, resolves the active
//! camera, runs the camera pass from the root and closes the frame. A
//! scene without a camera only runs the transform pass.

use crate::config::SceneConfig;
use crate::ecs::{CameraSystem, EntityId, FrameStage, TransformSystem, World};
use crate::error::{SceneError, SceneResult};
use crate::events::{Event, EventManager};

/// Outcome of one [`Scene::run_frame`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    /// Number of frames completed including this one
    pub frame: u64,
    /// Stage reached after each pass, ending with `Idle`
    pub stage_trace: Vec<FrameStage>,
}

/// Root aggregator owning the world, the event table and the built-in systems
pub struct Scene {
    config: SceneConfig,
    world: World,
    events: EventManager,
    transform_system: TransformSystem,
    camera_system: CameraSystem,
    camera: Option<EntityId>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(config: SceneConfig) -> Self {
        Self {
            world: World::with_config(&config),
            events: EventManager::with_dispatch_policy(config.unsupported_dispatch),
            transform_system: TransformSystem::new(),
            camera_system: CameraSystem::new(),
            camera: None,
            config,
        }
    }

    /// Replace the event table; it adopts the scene's dispatch policy
    pub fn with_events(mut self, mut events: EventManager) -> Self {
        events.set_dispatch_policy(self.config.unsupported_dispatch);
        self.events = events;
        self
    }

    /// Replace the camera system, e.g. one folding the projection
    pub fn with_camera_system(mut self, camera_system: CameraSystem) -> Self {
        self.camera_system = camera_system;
        self
    }

    /// Scene configuration
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The entity world
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The entity world, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// The event table
    pub fn events(&self) -> &EventManager {
        &self.events
    }

    /// The event table, mutably
    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Built-in transform system
    pub fn transform_system(&self) -> &TransformSystem {
        &self.transform_system
    }

    /// Built-in camera system
    pub fn camera_system(&self) -> &CameraSystem {
        &self.camera_system
    }

    /// Entity whose subtree holds the active camera
    pub fn camera(&self) -> Option<EntityId> {
        self.camera
    }

    /// Designate the entity whose subtree holds the active camera
    pub fn set_camera(&mut self, entity: EntityId) -> SceneResult<()> {
        if self.world.entity(entity).is_none() {
            return Err(SceneError::EntityNotFound(entity));
        }
        self.camera = Some(entity);
        Ok(())
    }

    /// Initialize every component in the tree
    pub fn init(&mut self) -> SceneResult<()> {
        self.world.init_components()?;
        log::info!(
            "Scene initialized: {} entities, {} components",
            self.world.entity_count(),
            self.world.component_count()
        );
        if self.config.log_tree_on_init {
            if let Some(tree) = self.world.describe_tree(self.world.root()) {
                log::debug!("Scene tree:\n{}", tree);
            }
        }
        Ok(())
    }

    /// Run one frame of transform and camera passes.
    ///
    /// A failed pass abandons the frame so the next call starts clean.
    pub fn run_frame(&mut self) -> SceneResult<FrameReport> {
        match self.run_passes() {
            Ok(stage_trace) => Ok(FrameReport {
                frame: self.world.frames_completed(),
                stage_trace,
            }),
            Err(err) => {
                log::error!("Frame aborted: {}", err);
                self.world.reset_frame();
                self.camera_system.reset();
                Err(err)
            }
        }
    }

    fn run_passes(&mut self) -> SceneResult<Vec<FrameStage>> {
        let root = self.world.root();
        let mut trace = Vec::with_capacity(4);

        self.transform_system.reset_visited();
        self.world.traverse_visit(&mut self.transform_system, root)?;
        trace.push(self.world.frame_stage());

        if let Some(camera) = self.camera {
            self.world
                .traverse_visit_pre_camera(&mut self.camera_system, camera)?;
            trace.push(self.world.frame_stage());
            self.world.traverse_visit(&mut self.camera_system, root)?;
            trace.push(self.world.frame_stage());
        }

        self.world.end_frame()?;
        trace.push(self.world.frame_stage());
        log::trace!(
            "Frame {} done, {} transforms updated",
            self.world.frames_completed(),
            self.transform_system.visited()
        );
        Ok(trace)
    }

    /// Forward an event to the event table
    pub fn notify(&mut self, sender: &str, event: &Event) -> SceneResult<bool> {
        self.events.notify(sender, event)
    }
}
