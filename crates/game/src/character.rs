//! A playable character: locomotion core, input, look and camera wired
//! together.

use strider_physics::{
    ConfigError, ConfigResult, InputSource, LocomotionConfig, LocomotionCore, TickReport, WorldMover,
};

use crate::camera::CameraRig;
use crate::look::{LookConfig, LookController};

/// Collects a character's collaborators. Every one is required.
#[derive(Debug)]
pub struct CharacterBuilder<W, I, C> {
    config: Option<LocomotionConfig>,
    look: LookConfig,
    body: Option<W>,
    input: Option<I>,
    camera: Option<C>,
    facing: f32,
}

impl<W, I, C> Default for CharacterBuilder<W, I, C> {
    fn default() -> Self {
        Self {
            config: None,
            look: LookConfig::default(),
            body: None,
            input: None,
            camera: None,
            facing: 0.0,
        }
    }
}

impl<W, I, C> CharacterBuilder<W, I, C>
where
    W: WorldMover,
    I: InputSource,
    C: CameraRig,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: LocomotionConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn look(mut self, look: LookConfig) -> Self {
        self.look = look;
        self
    }

    pub fn body(mut self, body: W) -> Self {
        self.body = Some(body);
        self
    }

    pub fn input(mut self, input: I) -> Self {
        self.input = Some(input);
        self
    }

    pub fn camera(mut self, camera: C) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Initial yaw in radians.
    pub fn facing(mut self, yaw: f32) -> Self {
        self.facing = yaw;
        self
    }

    /// Validate and assemble the character.
    pub fn build(self) -> ConfigResult<Character<W, I, C>> {
        let config = self.config.ok_or(ConfigError::MissingCollaborator("locomotion config"))?;
        let body = self.body.ok_or(ConfigError::MissingCollaborator("world body"))?;
        let input = self.input.ok_or(ConfigError::MissingCollaborator("input source"))?;
        let mut camera = self.camera.ok_or(ConfigError::MissingCollaborator("camera rig"))?;

        let mut look = LookController::new(self.look)?;
        let mut core = LocomotionCore::new(config, body)?;

        core.set_heading(self.facing);
        look.reset(core.heading());
        camera.set_anchor(core.position());
        camera.set_local_height(core.camera_height());
        camera.set_rotation(core.heading(), look.pitch());

        Ok(Character {
            core,
            input,
            look,
            camera,
        })
    }
}

/// A character driven by its own input source.
#[derive(Debug)]
pub struct Character<W: WorldMover, I, C> {
    core: LocomotionCore<W>,
    input: I,
    look: LookController,
    camera: C,
}

impl<W, I, C> Character<W, I, C>
where
    W: WorldMover,
    I: InputSource,
    C: CameraRig,
{
    /// Run one frame: look, locomotion, then camera output.
    pub fn update(&mut self, dt: f32) -> TickReport {
        let look_axis = self.input.snapshot().look_axis;
        let (yaw, pitch) = self.look.update(look_axis, dt);
        self.core.set_heading(yaw);

        let report = self.core.tick(&mut self.input, dt);

        self.camera.set_anchor(self.core.position());
        self.camera.set_local_height(self.core.camera_height());
        self.camera.set_rotation(self.core.heading(), pitch);
        report
    }

    pub fn core(&self) -> &LocomotionCore<W> {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut LocomotionCore<W> {
        &mut self.core
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn look(&self) -> &LookController {
        &self.look
    }
}
