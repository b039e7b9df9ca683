//! Live world entities
//!
//! Instantiated from static level definitions before the first tick, then
//! mutated in place by the simulation. Iteration order is definition order
//! and never changes mid-run, so runs are reproducible.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;

/// How a platform reacts to being stood on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Fragility {
    /// Never collapses
    #[default]
    Solid,
    /// Collapses shortly after first contact, respawns later
    Crumble,
    /// Like Crumble with a longer fuse and a longer respawn
    Dissolve,
}

impl Fragility {
    /// Ticks from first contact until collapse (None for solid platforms)
    pub fn collapse_delay(&self) -> Option<u32> {
        match self {
            Fragility::Solid => None,
            Fragility::Crumble => Some(CRUMBLE_DELAY_TICKS),
            Fragility::Dissolve => Some(DISSOLVE_DELAY_TICKS),
        }
    }

    /// Ticks spent collapsed before respawning
    pub fn respawn_delay(&self) -> u32 {
        match self {
            Fragility::Solid => 0,
            Fragility::Crumble => CRUMBLE_RESPAWN_TICKS,
            Fragility::Dissolve => DISSOLVE_RESPAWN_TICKS,
        }
    }
}

/// A static platform (including the ground strips)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    /// Level floor segment (always Solid, drawn differently by hosts)
    pub is_ground: bool,
    pub fragility: Fragility,
    /// Countdown from first contact to collapse; 0 = not started
    pub break_timer: u32,
    /// Countdown while collapsed; platform respawns when it reaches 0
    pub respawn_timer: u32,
    pub collapsed: bool,
}

impl Platform {
    pub fn solid(rect: Rect, is_ground: bool) -> Self {
        Self {
            rect,
            is_ground,
            fragility: Fragility::Solid,
            break_timer: 0,
            respawn_timer: 0,
            collapsed: false,
        }
    }

    pub fn fragile(rect: Rect, fragility: Fragility) -> Self {
        Self {
            rect,
            is_ground: false,
            fragility,
            break_timer: 0,
            respawn_timer: 0,
            collapsed: false,
        }
    }

    /// Collapsed platforms are excluded from collision queries
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.collapsed
    }

    /// Start the collapse countdown on landing contact (no-op if solid,
    /// already counting, or already collapsed)
    pub fn touch(&mut self) {
        if let Some(delay) = self.fragility.collapse_delay()
            && !self.collapsed
            && self.break_timer == 0
        {
            self.break_timer = delay;
        }
    }
}

/// Oscillation axis for moving platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// A platform that oscillates between two bounds, reflecting at each
///
/// Always a first-class solid; riders are carried only through ordinary
/// collision resolution each frame, there is no parenting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub rect: Rect,
    pub axis: Axis,
    pub min: f32,
    pub max: f32,
    pub speed: f32,
    /// +1 or -1
    pub dir: f32,
}

impl MovingPlatform {
    /// Advance one tick along the configured axis, reflecting at the bounds
    pub fn advance(&mut self, dt: f32) {
        match self.axis {
            Axis::X => {
                self.rect.x += self.speed * self.dir * dt;
                if self.rect.x <= self.min {
                    self.rect.x = self.min;
                    self.dir = 1.0;
                }
                if self.rect.x >= self.max {
                    self.rect.x = self.max;
                    self.dir = -1.0;
                }
            }
            Axis::Y => {
                self.rect.y += self.speed * self.dir * dt;
                if self.rect.y <= self.min {
                    self.rect.y = self.min;
                    self.dir = 1.0;
                }
                if self.rect.y >= self.max {
                    self.rect.y = self.max;
                    self.dir = -1.0;
                }
            }
        }
    }
}

/// Hazard zone behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Speed dampener: halves vx every tick while overlapping
    Mud,
    /// Instant death without the treat buff; a bounce with it
    Lava,
    /// Rigid obstacle that injects a fixed knockback velocity
    Hydrant,
    /// Continuous horizontal force field
    Wind { dir: f32, strength: f32 },
}

/// A static hazard zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    pub kind: HazardKind,
}

/// Enemy species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Airborne patroller that bobs vertically
    Bat,
    /// Rolls along the ground
    Snowball,
    /// Ground patroller
    Hound,
    /// Slow floating patroller
    Ghost,
    /// Fast ground patroller
    Sawblade,
    /// Stationary column on a fixed on/off duty cycle
    FireGeyser,
}

/// A live enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub kind: EnemyKind,
    pub hp: i32,
    pub speed: f32,
    /// +1 or -1 patrol facing
    pub dir: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Duty cycle length in ticks (geysers only)
    pub period: u32,
    /// Duty cycle offset in ticks (geysers only)
    pub phase: u32,
    /// Geysers toggle this; patrol enemies are always active
    pub active: bool,
}

impl Enemy {
    pub fn patrol(kind: EnemyKind, rect: Rect, speed: f32, dir: f32, min_x: f32, max_x: f32) -> Self {
        Self {
            rect,
            kind,
            hp: 1,
            speed,
            dir,
            min_x,
            max_x,
            period: 0,
            phase: 0,
            active: true,
        }
    }

    pub fn geyser(rect: Rect, period: u32, phase: u32) -> Self {
        Self {
            rect,
            kind: EnemyKind::FireGeyser,
            hp: 1,
            speed: 0.0,
            dir: 1.0,
            min_x: rect.x,
            max_x: rect.x,
            period,
            phase,
            active: false,
        }
    }

    pub fn with_hp(mut self, hp: i32) -> Self {
        self.hp = hp;
        self
    }
}

/// What a collectible does on pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollectibleKind {
    /// Score pickup
    Bone,
    /// Starts the treat buff and grants the extra jump immediately
    Treat,
    /// Rescue target: big score bonus, unlocks the goal gate
    Rescue,
}

/// A collectible; `collected` flips true exactly once per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub rect: Rect,
    pub kind: CollectibleKind,
    pub collected: bool,
}

impl Collectible {
    pub fn new(kind: CollectibleKind, rect: Rect) -> Self {
        Self {
            rect,
            kind,
            collected: false,
        }
    }
}

/// A multi-hit solid wall, damaged only by the headbutt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Breakable {
    pub rect: Rect,
    pub hp: i32,
}

/// The level's goal flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub x: f32,
    pub y: f32,
    pub collected: bool,
}

impl Flag {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            collected: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, FLAG_W, FLAG_H)
    }
}

/// The final-level boss: patrols, tracks the player's height, shoots
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub rect: Rect,
    pub hp: i32,
    pub max_hp: i32,
    pub speed: f32,
    pub dir: f32,
    pub min_x: f32,
    pub max_x: f32,
    /// Seconds of hit immunity remaining
    pub invuln: f32,
    /// Seconds until the next projectile
    pub shoot_timer: f32,
}

/// A boss projectile; arcs under its own gravity
///
/// Not substepped: at high speed a bullet can tunnel through thin geometry
/// in a single tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub w: f32,
    pub h: f32,
    /// Seconds to live
    pub ttl: f32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.w, self.h)
    }
}

/// An x-range that forces a minimum forward velocity
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AutoZone {
    pub start: f32,
    pub end: f32,
}

impl AutoZone {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.start && x <= self.end
    }
}

/// Movement rules for a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Gravity, jumping, stomps: the canonical engine
    #[default]
    SideScroll,
    /// 4-directional movement, no gravity or jumping; everything else applies
    TopDown,
}

/// The live per-run world for one level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub level_index: usize,
    pub width: f32,
    pub icy: bool,
    pub control: ControlScheme,
    pub spawn: Vec2,
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub hazards: Vec<Hazard>,
    pub enemies: Vec<Enemy>,
    pub breakables: Vec<Breakable>,
    pub collectibles: Vec<Collectible>,
    pub flag: Flag,
    pub boss: Option<Boss>,
    pub bullets: Vec<Bullet>,
    pub auto_zones: Vec<AutoZone>,
}

impl World {
    /// An empty side-scrolling world with spawn and flag at the conventional
    /// positions. Level builders and tests start from this.
    pub fn empty(width: f32) -> Self {
        Self {
            level_index: 0,
            width,
            icy: false,
            control: ControlScheme::SideScroll,
            spawn: Vec2::new(80.0, GROUND_Y - PLAYER_H - 2.0),
            platforms: Vec::new(),
            moving_platforms: Vec::new(),
            hazards: Vec::new(),
            enemies: Vec::new(),
            breakables: Vec::new(),
            collectibles: Vec::new(),
            flag: Flag::new(width - 150.0, GROUND_Y - FLAG_H),
            boss: None,
            bullets: Vec::new(),
            auto_zones: Vec::new(),
        }
    }

    /// Whether the rescue target (if this level has one) is still out there
    pub fn rescue_pending(&self) -> bool {
        self.collectibles
            .iter()
            .any(|c| c.kind == CollectibleKind::Rescue && !c.collected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moving_platform_reflects_at_bounds() {
        let mut mp = MovingPlatform {
            rect: Rect::new(100.0, 400.0, 96.0, 24.0),
            axis: Axis::X,
            min: 80.0,
            max: 200.0,
            speed: 600.0,
            dir: 1.0,
        };

        // Run long enough to hit both bounds several times
        for _ in 0..600 {
            mp.advance(1.0 / 60.0);
            assert!(mp.rect.x >= mp.min && mp.rect.x <= mp.max);
        }
    }

    #[test]
    fn test_moving_platform_vertical() {
        let mut mp = MovingPlatform {
            rect: Rect::new(100.0, 430.0, 96.0, 24.0),
            axis: Axis::Y,
            min: 300.0,
            max: 440.0,
            speed: 1000.0,
            dir: -1.0,
        };
        for _ in 0..600 {
            mp.advance(1.0 / 60.0);
            assert!(mp.rect.y >= mp.min && mp.rect.y <= mp.max);
        }
    }

    #[test]
    fn test_platform_touch_starts_countdown_once() {
        let mut p = Platform::fragile(Rect::new(0.0, 0.0, 96.0, 24.0), Fragility::Crumble);
        p.touch();
        assert_eq!(p.break_timer, crate::consts::CRUMBLE_DELAY_TICKS);
        p.break_timer = 7;
        p.touch();
        // Re-touch must not restart the countdown
        assert_eq!(p.break_timer, 7);
    }

    #[test]
    fn test_solid_platform_ignores_touch() {
        let mut p = Platform::solid(Rect::new(0.0, 0.0, 96.0, 24.0), true);
        p.touch();
        assert_eq!(p.break_timer, 0);
    }
}
