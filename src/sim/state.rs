//! Simulation state and core entity types
//!
//! Everything that persists between frames lives in `SimState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::history::HistoryBuffer;
use crate::settings::SimConfig;
use crate::to_meters_v;

/// A body moved by the kinematics step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// World position (m)
    pub position: Vec2,
    /// Velocity (m/s)
    pub velocity: Vec2,
    /// Mass (kg), always > 0
    pub mass: f32,
    /// Forces pushed this frame; drained by every kinematics step
    #[serde(skip)]
    pub active_forces: Vec<Vec2>,
    /// Per-axis speed limit (m/s)
    pub velocity_cap: Vec2,
}

impl Entity {
    pub fn new(position: Vec2, mass: f32, velocity_cap: Vec2) -> Self {
        assert!(mass > 0.0, "entity mass must be positive, got {mass}");
        Self {
            position,
            velocity: Vec2::ZERO,
            mass,
            active_forces: Vec::new(),
            velocity_cap,
        }
    }

    pub fn push_force(&mut self, force: Vec2) {
        self.active_forces.push(force);
    }

    /// Sum of all forces pushed since the last step
    pub fn total_force(&self) -> Vec2 {
        self.active_forces.iter().copied().sum()
    }
}

/// The worm head
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub rotation: f32,
    /// Hit the cave wall; set once by the collision probe
    pub dying: bool,
    pub dead: bool,
}

impl Player {
    pub fn new(body: Entity) -> Self {
        Self {
            body,
            rotation: 0.0,
            dying: false,
            dead: false,
        }
    }
}

/// Inputs the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputKey {
    Up,
    Down,
    Left,
    Right,
    Space,
}

impl InputKey {
    pub const ALL: [InputKey; 5] = [
        InputKey::Up,
        InputKey::Down,
        InputKey::Left,
        InputKey::Right,
        InputKey::Space,
    ];

    /// Map a DOM `KeyboardEvent.key` name; unknown keys are ignored
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "ArrowUp" | "w" | "W" => Some(InputKey::Up),
            "ArrowDown" | "s" | "S" => Some(InputKey::Down),
            "ArrowLeft" | "a" | "A" => Some(InputKey::Left),
            "ArrowRight" | "d" | "D" => Some(InputKey::Right),
            " " | "Spacebar" => Some(InputKey::Space),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Held state per input; anything never pressed reads as released
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyStates {
    held: [bool; InputKey::ALL.len()],
}

impl KeyStates {
    pub fn set(&mut self, key: InputKey, held: bool) {
        self.held[key.index()] = held;
    }

    pub fn is_held(&self, key: InputKey) -> bool {
        self.held[key.index()]
    }
}

/// Events raised by the simulation for the host to consume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player entered cave rock at this world position
    PlayerCrashed { position: Vec2 },
}

/// Complete per-run simulation state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Simulated seconds, monotonic
    pub time: f32,
    /// Frames only advance while focused
    pub focused: bool,
    pub player: Player,
    pub camera: Entity,
    pub keys: KeyStates,
    /// Player Y (pixels) keyed by player X (pixels) mod length
    pub history: HistoryBuffer,
    /// Player start position (m); its Y backs unwritten history slots
    pub initial_player_position: Vec2,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl SimState {
    pub fn new(config: &SimConfig) -> Self {
        let initial_player_position = initial_player_position(config);
        let camera_start =
            to_meters_v(Vec2::new(config.canvas_width / 2.0, config.canvas_height / 2.0));

        let player = Player::new(Entity::new(
            initial_player_position,
            config.player_mass,
            Vec2::from(config.player_velocity_cap),
        ));
        let camera = Entity::new(
            camera_start,
            config.camera_mass,
            Vec2::from(config.camera_velocity_cap),
        );

        Self {
            time: 0.0,
            focused: true,
            player,
            camera,
            keys: KeyStates::default(),
            history: HistoryBuffer::new(config.history_length),
            initial_player_position,
            events: Vec::new(),
        }
    }

    /// Fallback Y (pixels) for history slots the player has not crossed yet
    pub fn initial_player_y_px(&self) -> f32 {
        crate::to_pixels(self.initial_player_position.y)
    }
}

/// Player spawns a tenth of the way across, a quarter of the way up
pub fn initial_player_position(config: &SimConfig) -> Vec2 {
    to_meters_v(Vec2::new(
        config.canvas_width * 0.1,
        config.canvas_height / 4.0,
    ))
}
