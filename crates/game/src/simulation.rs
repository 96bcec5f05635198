//! Fixed-timestep simulation.
//!
//! Frame time is accumulated and consumed in whole ticks, so every
//! character advances by the same `dt` regardless of render rate.

use serde::{Deserialize, Serialize};
use strider_physics::{
    error::positive, Capsule, ConfigError, ConfigResult, KinematicBody, LocomotionConfig, TickReport,
};

use crate::camera::FirstPersonCamera;
use crate::character::{Character, CharacterBuilder};
use crate::input::{InputHandler, RawInput};
use crate::level::Level;
use crate::look::LookConfig;

/// Unique identifier for characters.
pub type CharacterId = u32;

/// The character type a [`Simulation`] drives.
pub type PlayerCharacter = Character<KinematicBody, InputHandler, FirstPersonCamera>;

/// Game simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Most ticks run for one frame; older time is dropped.
    pub max_catch_up_ticks: u32,

    /// Locomotion tuning for every character.
    pub locomotion: LocomotionConfig,

    /// Mouse look tuning.
    pub look: LookConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_catch_up_ticks: 5,
            locomotion: LocomotionConfig::default(),
            look: LookConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    pub fn validate(&self) -> ConfigResult {
        positive("tick_rate", self.tick_rate as f32)?;
        positive("max_catch_up_ticks", self.max_catch_up_ticks as f32)?;
        self.locomotion.validate()?;
        self.look.validate()
    }
}

/// Runs characters through a level at a fixed tick rate.
#[derive(Debug)]
pub struct Simulation {
    /// Ticks run so far.
    pub frame: u64,

    config: SimulationConfig,
    level: Level,
    characters: Vec<(CharacterId, PlayerCharacter)>,
    accumulator: f32,
    next_id: CharacterId,
}

impl Simulation {
    pub fn new(config: SimulationConfig, level: Level) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            frame: 0,
            config,
            level,
            characters: Vec::new(),
            accumulator: 0.0,
            next_id: 1,
        })
    }

    /// Create a simulation with default configuration and the test course.
    pub fn test() -> ConfigResult<Self> {
        Self::new(SimulationConfig::default(), Level::test_course())
    }

    /// Spawn a character at the next spawn point.
    pub fn add_character(&mut self) -> ConfigResult<CharacterId> {
        let spawn = self
            .level
            .spawn_point(self.characters.len())
            .copied()
            .ok_or(ConfigError::MissingCollaborator("spawn point"))?;

        let locomotion = &self.config.locomotion;
        let capsule = Capsule::new(locomotion.standing_height, locomotion.radius);
        let mut body = KinematicBody::new(self.level.collision.clone(), spawn.position);
        body.spawn_at(spawn.position, &capsule);

        let character = CharacterBuilder::new()
            .config(locomotion.clone())
            .look(self.config.look)
            .body(body)
            .input(InputHandler::new())
            .camera(FirstPersonCamera::default())
            .facing(spawn.facing)
            .build()?;

        let id = self.next_id;
        self.next_id += 1;
        self.characters.push((id, character));
        log::debug!("Character {} spawned at {:?}", id, spawn.position);
        Ok(id)
    }

    pub fn remove_character(&mut self, id: CharacterId) {
        self.characters.retain(|(cid, _)| *cid != id);
    }

    pub fn character(&self, id: CharacterId) -> Option<&PlayerCharacter> {
        self.characters.iter().find(|(cid, _)| *cid == id).map(|(_, c)| c)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut PlayerCharacter> {
        self.characters.iter_mut().find(|(cid, _)| *cid == id).map(|(_, c)| c)
    }

    /// Feed device state to a character. Returns false for unknown ids.
    pub fn set_input(&mut self, id: CharacterId, raw: RawInput) -> bool {
        match self.character_mut(id) {
            Some(character) => {
                character.input_mut().update(raw);
                true
            }
            None => false,
        }
    }

    /// Advance the simulation by one tick.
    pub fn tick(&mut self) -> Vec<(CharacterId, TickReport)> {
        let delta_time = self.config.delta_time();
        let reports = self
            .characters
            .iter_mut()
            .map(|(id, character)| (*id, character.update(delta_time)))
            .collect();
        self.frame += 1;
        reports
    }

    /// Account for `frame_time` seconds of wall time and run the ticks it
    /// covers. Returns the reports of every tick run, in order.
    pub fn advance(&mut self, frame_time: f32) -> Vec<(CharacterId, TickReport)> {
        let mut reports = Vec::new();
        if !frame_time.is_finite() || frame_time <= 0.0 {
            return reports;
        }

        let delta_time = self.config.delta_time();
        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= delta_time && ticks < self.config.max_catch_up_ticks {
            reports.extend(self.tick());
            self.accumulator -= delta_time;
            ticks += 1;
        }

        if self.accumulator >= delta_time {
            log::warn!("Simulation fell behind, dropping {:.3}s", self.accumulator);
            self.accumulator %= delta_time;
        }
        reports
    }

    /// Fraction of a tick left in the accumulator, for render interpolation.
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.config.delta_time()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn character_count(&self) -> usize {
        self.characters.len()
    }
}

// ============================================================================
// Tests
// ============================================================================
