//! Game state and the player
//!
//! One `GameState` per session; all of it serializable so runs can be
//! snapshotted and replayed in tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level;
use super::world::World;
use crate::consts::*;

/// Session mode
///
/// The sim only transitions Playing -> GameOver/Won; menus, retries and level
/// select are driven by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Menu,
    Playing,
    GameOver,
    Won,
}

/// Buddy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    pub on_ground: bool,
    pub facing_right: bool,
    /// Jumps remaining; refilled to the buff-appropriate max while grounded
    pub jumps_left: u8,
    /// Edge-detection latch: set when a jump fires, cleared on release
    pub jump_held: bool,
    pub sitting: bool,
    /// Ticks remaining in the sit
    pub sit_timer: u32,
    /// Edge-detection latch for the sit command
    pub sit_held: bool,
    /// Ticks of treat buff remaining; 0 = inactive
    pub treat_timer: u32,
    /// Seconds of post-hit invulnerability remaining
    pub invuln: f32,
    /// Seconds until the headbutt is available again
    pub headbutt_cd: f32,
    /// Edge-detection latch for the attack command
    pub attack_held: bool,
    pub anim_frame: u8,
    pub anim_timer: f32,
}

impl Player {
    pub fn new(spawn: Vec2) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            w: PLAYER_W,
            h: PLAYER_H,
            on_ground: false,
            facing_right: true,
            jumps_left: 1,
            jump_held: false,
            sitting: false,
            sit_timer: 0,
            sit_held: false,
            treat_timer: 0,
            invuln: 0.0,
            headbutt_cd: 0.0,
            attack_held: false,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn rect(&self) -> super::Rect {
        super::Rect::new(self.pos.x, self.pos.y, self.w, self.h)
    }

    #[inline]
    pub fn has_treat(&self) -> bool {
        self.treat_timer > 0
    }

    /// Current max jump count (double jump while the treat buff is active)
    pub fn max_jumps(&self) -> u8 {
        if self.has_treat() { 2 } else { 1 }
    }

    pub fn move_speed(&self) -> f32 {
        if self.has_treat() { TREAT_WALK_SPEED } else { WALK_SPEED }
    }

    pub fn jump_speed(&self) -> f32 {
        if self.has_treat() { TREAT_JUMP_SPEED } else { JUMP_SPEED }
    }

    /// Reposition at a spawn point with cleared kinematics; buffs and latches
    /// are kept (level transitions do not strip an active treat)
    pub fn respawn_at(&mut self, spawn: Vec2) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.facing_right = true;
        self.sitting = false;
        self.sit_timer = 0;
        self.invuln = 0.0;
        self.headbutt_cd = 0.0;
        self.anim_frame = 0;
        self.anim_timer = 0.0;
    }
}

/// Camera follow rule: a hard clamp, recomputed every tick. No smoothing.
pub fn camera_x(player_x: f32, level_width: f32) -> f32 {
    let target = player_x - VIEW_W * CAMERA_LEAD;
    target.clamp(0.0, (level_width - VIEW_W).max(0.0))
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed: level layout variety only
    pub seed: u64,
    pub mode: Mode,
    /// Simulation tick counter
    pub tick: u64,
    pub level_index: usize,
    pub score: u32,
    pub lives: u8,
    pub player: Player,
    pub world: World,
    pub camera_x: f32,
    /// Flag reached this level (distinguishes a win from a death)
    pub level_won: bool,
}

impl GameState {
    /// Create a session at the menu, with level 0 instantiated
    pub fn new(seed: u64) -> Self {
        let world = level::build_level(0, seed);
        let player = Player::new(world.spawn);
        Self {
            seed,
            mode: Mode::Menu,
            tick: 0,
            level_index: 0,
            score: 0,
            lives: START_LIVES,
            player,
            world,
            camera_x: 0.0,
            level_won: false,
        }
    }

    /// Begin (or restart) a run from level 0
    pub fn start_run(&mut self) {
        log::info!("run start, seed {}", self.seed);
        self.world = level::build_level(0, self.seed);
        self.player = Player::new(self.world.spawn);
        self.mode = Mode::Playing;
        self.tick = 0;
        self.level_index = 0;
        self.score = 0;
        self.lives = START_LIVES;
        self.camera_x = 0.0;
        self.level_won = false;
    }

    /// Advance to the next level, or win the session after the last one.
    /// Score, lives and an active treat buff carry across.
    pub fn advance_level(&mut self) {
        let next = self.level_index + 1;
        if next >= level::level_count() {
            log::info!("final level cleared");
            self.mode = Mode::Won;
            return;
        }
        log::info!("advancing to level {}", next);
        self.level_index = next;
        self.world = level::build_level(next, self.seed);
        let spawn = self.world.spawn;
        self.player.respawn_at(spawn);
        self.camera_x = 0.0;
        self.level_won = false;
    }
}
