//! Buddy's Quest - a side-scrolling platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `snapshot`: Read-only JSON dump of the live state for tooling/tests
//!
//! Rendering, input capture and audio live outside this crate: hosts write
//! the shared input vector and read snapshots, the sim owns everything else.

pub mod sim;
pub mod snapshot;

/// Game tuning constants
///
/// Coordinate system is top-left origin, +x right, +y down. Units are pixels
/// and seconds unless noted; timers named `*_TICKS` count fixed steps.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions
    pub const VIEW_W: f32 = 960.0;
    pub const VIEW_H: f32 = 640.0;
    /// Camera lead fraction: the player sits this far into the viewport
    pub const CAMERA_LEAD: f32 = 0.33;

    /// Player collision box
    pub const PLAYER_W: f32 = 34.0;
    pub const PLAYER_H: f32 = 35.0;
    pub const START_LIVES: u8 = 3;

    /// Gravity and fall clamp
    pub const GRAVITY: f32 = 2200.0;
    pub const MAX_FALL_SPEED: f32 = 1300.0;
    /// Falling past this y is fatal (or a treat-powered relaunch)
    pub const FALL_LIMIT: f32 = 640.0;
    pub const TREAT_RELAUNCH_Y: f32 = 630.0;

    /// Horizontal movement
    pub const WALK_SPEED: f32 = 300.0;
    pub const GROUND_FRICTION: f32 = 0.78;
    pub const ICE_FRICTION: f32 = 0.96;
    /// |vx| below this snaps to 0 when coasting
    pub const STOP_EPSILON: f32 = 4.0;
    /// On ice, vx ramps at ICE_ACCEL * move_speed per second instead of snapping
    pub const ICE_ACCEL: f32 = 8.0;

    /// Auto-run zones (final level): forced forward speed, input adds +-steer
    pub const AUTO_RUN_SPEED: f32 = 360.0;
    pub const AUTO_RUN_STEER: f32 = 40.0;

    /// Jumping
    pub const JUMP_SPEED: f32 = 620.0;

    /// Treat buff: faster, jumps higher, double jump, hazard/fall immunity
    pub const TREAT_WALK_SPEED: f32 = 400.0;
    pub const TREAT_JUMP_SPEED: f32 = 740.0;
    pub const TREAT_TICKS: u32 = 420;

    /// Sit command duration
    pub const SIT_TICKS: u32 = 36;

    /// Hazards
    pub const MUD_DAMPING: f32 = 0.5;
    pub const HYDRANT_KNOCKBACK: f32 = 80.0;

    /// Fragile platforms: ticks standing until collapse, ticks until respawn
    pub const CRUMBLE_DELAY_TICKS: u32 = 30;
    pub const CRUMBLE_RESPAWN_TICKS: u32 = 180;
    pub const DISSOLVE_DELAY_TICKS: u32 = 45;
    pub const DISSOLVE_RESPAWN_TICKS: u32 = 240;

    /// Stomp: must be falling faster than this, with the previous-frame
    /// bottom edge within STOMP_TOLERANCE of the enemy's top
    pub const STOMP_MIN_FALL_SPEED: f32 = 150.0;
    pub const STOMP_TOLERANCE: f32 = 8.0;
    pub const STOMP_BOUNCE: f32 = 365.0;

    /// Taking a hit
    pub const HURT_INVULN: f32 = 1.2;
    pub const HURT_KNOCKBACK_X: f32 = 260.0;
    pub const HURT_KNOCKBACK_Y: f32 = 360.0;
    pub const ENEMY_CONTACT_DAMAGE: u8 = 1;

    /// Headbutt attack
    pub const HEADBUTT_COOLDOWN: f32 = 0.45;
    pub const HEADBUTT_RANGE: f32 = 34.0;
    pub const HEADBUTT_IMPULSE: f32 = 150.0;
    pub const HEADBUTT_DAMAGE: i32 = 2;

    /// Boss
    pub const BOSS_MAX_HP: i32 = 8;
    pub const BOSS_ATTACK_INTERVAL: f32 = 1.05;
    pub const BOSS_CONTACT_DAMAGE: u8 = 1;
    pub const BOSS_HEADBUTT_INVULN: f32 = 0.55;
    /// Boss stomps use a looser fall threshold and a taller tolerance band
    pub const BOSS_STOMP_MIN_FALL_SPEED: f32 = 120.0;
    pub const BOSS_STOMP_TOLERANCE: f32 = 16.0;
    pub const BOSS_BULLET_SPEED: f32 = 320.0;
    pub const BOSS_BULLET_LIFT: f32 = 35.0;
    pub const BOSS_BULLET_GRAVITY: f32 = 240.0;
    pub const BOSS_BULLET_TTL: f32 = 5.0;
    pub const BOSS_BULLET_DAMAGE: u8 = 1;

    /// Scoring
    pub const BONE_SCORE: u32 = 1;
    pub const STOMP_SCORE: u32 = 65;
    pub const HEADBUTT_SCORE: u32 = 90;
    pub const BREAKABLE_SCORE: u32 = 30;
    pub const BOSS_HIT_SCORE: u32 = 120;
    pub const RESCUE_SCORE: u32 = 500;

    /// Level geometry defaults
    pub const GROUND_Y: f32 = 520.0;
    pub const TILE: f32 = 24.0;
    /// Goal flag collision box
    pub const FLAG_W: f32 = 20.0;
    pub const FLAG_H: f32 = 96.0;
}
