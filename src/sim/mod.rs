//! Frame simulation module
//!
//! All gameplay logic lives here:
//! - Forces and kinematics in world meters
//! - Player Y history and worm segments in pixels
//! - Cave sampling relative to the camera
//! - No rendering or platform dependencies beyond the uniform sink trait

pub mod cave;
pub mod forces;
pub mod history;
pub mod kinematics;
pub mod state;
pub mod tick;
pub mod worm;

pub use cave::{CaveProfile, CaveSampler, LayeredCave};
pub use forces::{assign_forces, gravity_magnitude, intro_ramp};
pub use history::HistoryBuffer;
pub use kinematics::{cap_component, update_kinematics};
pub use state::{Entity, GameEvent, InputKey, KeyStates, Player, SimState};
pub use tick::{Game, InputEvent, player_pixel_position, probe_collision};
pub use worm::{TrailSegment, compute_segments, pack_worm_blocks};
