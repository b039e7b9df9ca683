//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (level instantiation, never inside a tick)
//! - Stable iteration order (entity vectors, never reordered)
//! - No rendering or platform dependencies

pub mod combat;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;
pub mod world;

pub use level::{LevelDataError, build_level, level_count, level_name, validate};
pub use rect::Rect;
pub use state::{GameState, Mode, Player, camera_x};
pub use tick::{TickInput, tick};
pub use world::{
    AutoZone, Axis, Boss, Breakable, Bullet, Collectible, CollectibleKind, ControlScheme, Enemy,
    EnemyKind, Flag, Fragility, Hazard, HazardKind, MovingPlatform, Platform, World,
};
