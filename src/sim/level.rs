//! Level definitions and world instantiation
//!
//! Eight hand-crafted levels, each exercising a different mechanic. A level
//! builds into a live `World` before the first tick; the session seed (mixed
//! with the level index) drives collectible scatter so layouts vary per run
//! but are reproducible for a given seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::rect::Rect;
use super::world::*;
use crate::consts::*;

/// Number of shipped levels
pub fn level_count() -> usize {
    8
}

/// Display name for a level index
pub fn level_name(index: usize) -> &'static str {
    match index {
        0 => "PUPPY PARK",
        1 => "BACKYARD BASH",
        2 => "DOWNTOWN DASH",
        3 => "HOLLOW FOREST",
        4 => "SNOWY PEAKS",
        5 => "VOLCANO RIDGE",
        6 => "SKY PALACE",
        _ => "CATHEDRAL OF THE POTION",
    }
}

/// Problems a level definition can have. The physics core assumes
/// invariant-respecting input; this is the load-time gate in front of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDataError {
    NonPositiveExtent(&'static str),
    InvalidPatrolRange(&'static str),
    ZeroGeyserPeriod,
    FlagOutOfBounds,
    LevelTooNarrow,
}

impl std::fmt::Display for LevelDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelDataError::NonPositiveExtent(what) => {
                write!(f, "{what} has a non-positive width or height")
            }
            LevelDataError::InvalidPatrolRange(what) => {
                write!(f, "{what} has min > max patrol bounds")
            }
            LevelDataError::ZeroGeyserPeriod => write!(f, "fire geyser with period 0"),
            LevelDataError::FlagOutOfBounds => write!(f, "goal flag outside the level"),
            LevelDataError::LevelTooNarrow => write!(f, "level narrower than the viewport"),
        }
    }
}

impl std::error::Error for LevelDataError {}

/// Validate a built world against the invariants the core assumes
pub fn validate(world: &World) -> Result<(), LevelDataError> {
    if world.width < VIEW_W {
        return Err(LevelDataError::LevelTooNarrow);
    }
    for p in &world.platforms {
        if p.rect.w <= 0.0 || p.rect.h <= 0.0 {
            return Err(LevelDataError::NonPositiveExtent("platform"));
        }
    }
    for mp in &world.moving_platforms {
        if mp.rect.w <= 0.0 || mp.rect.h <= 0.0 {
            return Err(LevelDataError::NonPositiveExtent("moving platform"));
        }
        if mp.min > mp.max {
            return Err(LevelDataError::InvalidPatrolRange("moving platform"));
        }
    }
    for h in &world.hazards {
        if h.rect.w <= 0.0 || h.rect.h <= 0.0 {
            return Err(LevelDataError::NonPositiveExtent("hazard"));
        }
    }
    for e in &world.enemies {
        if e.rect.w <= 0.0 || e.rect.h <= 0.0 {
            return Err(LevelDataError::NonPositiveExtent("enemy"));
        }
        if e.min_x > e.max_x {
            return Err(LevelDataError::InvalidPatrolRange("enemy"));
        }
        if e.kind == EnemyKind::FireGeyser && e.period == 0 {
            return Err(LevelDataError::ZeroGeyserPeriod);
        }
    }
    for b in &world.breakables {
        if b.rect.w <= 0.0 || b.rect.h <= 0.0 {
            return Err(LevelDataError::NonPositiveExtent("breakable"));
        }
    }
    if let Some(boss) = &world.boss {
        if boss.min_x > boss.max_x {
            return Err(LevelDataError::InvalidPatrolRange("boss"));
        }
    }
    if world.flag.x < 0.0 || world.flag.x + FLAG_W > world.width {
        return Err(LevelDataError::FlagOutOfBounds);
    }
    Ok(())
}

/// Instantiate a level into a live world. Deterministic for a given
/// (index, seed) pair; the per-level seed mix keeps layouts distinct.
pub fn build_level(index: usize, seed: u64) -> World {
    let index = index.min(level_count() - 1);
    let mut world = match index {
        0 => puppy_park(),
        1 => backyard_bash(),
        2 => downtown_dash(),
        3 => hollow_forest(),
        4 => snowy_peaks(),
        5 => volcano_ridge(),
        6 => sky_palace(),
        _ => cathedral(),
    };
    world.level_index = index;

    let mut rng = Pcg32::seed_from_u64(seed ^ ((index as u64 + 1) * 7919));
    scatter_bones(&mut world, &mut rng);

    log::info!(
        "level {} '{}': {} platforms, {} enemies, {} hazards, {} collectibles",
        index,
        level_name(index),
        world.platforms.len(),
        world.enemies.len(),
        world.hazards.len(),
        world.collectibles.len(),
    );
    world
}

/// Drop a bone above most floating platforms, plus a few along the ground
fn scatter_bones(world: &mut World, rng: &mut Pcg32) {
    let perches: Vec<Rect> = world
        .platforms
        .iter()
        .filter(|p| !p.is_ground)
        .map(|p| p.rect)
        .collect();

    for rect in perches {
        if rect.w > 48.0 && rng.random_bool(0.7) {
            let bx = rect.x + rng.random_range(8.0..rect.w - 24.0);
            world.collectibles.push(Collectible::new(
                CollectibleKind::Bone,
                Rect::new(bx, rect.y - 26.0, 16.0, 16.0),
            ));
        }
    }

    // A handful of ground-level bones between the start and the flag
    let count = rng.random_range(4..8);
    for _ in 0..count {
        let bx = rng.random_range(200.0..world.flag.x.max(400.0));
        world.collectibles.push(Collectible::new(
            CollectibleKind::Bone,
            Rect::new(bx, GROUND_Y - 26.0, 16.0, 16.0),
        ));
    }
}

// Construction helpers. All levels share the same spawn and flag placement
// conventions; only layouts differ.

fn base_world(width: f32) -> World {
    World::empty(width)
}

fn ground(x: f32, w: f32) -> Platform {
    Platform::solid(Rect::new(x, GROUND_Y, w, 60.0), true)
}

fn plat(x: f32, y: f32, w: f32) -> Platform {
    Platform::solid(Rect::new(x, y, w, TILE), false)
}

fn fragile(x: f32, y: f32, w: f32, fragility: Fragility) -> Platform {
    Platform::fragile(Rect::new(x, y, w, TILE), fragility)
}

fn treat(x: f32, y: f32) -> Collectible {
    Collectible::new(CollectibleKind::Treat, Rect::new(x, y, 18.0, 18.0))
}

fn bat(x: f32, y: f32, min_x: f32, max_x: f32, speed: f32, dir: f32) -> Enemy {
    Enemy::patrol(EnemyKind::Bat, Rect::new(x, y, 24.0, 16.0), speed, dir, min_x, max_x)
}

fn hydrant(x: f32) -> Hazard {
    Hazard {
        rect: Rect::new(x, GROUND_Y - 28.0, 20.0, 28.0),
        kind: HazardKind::Hydrant,
    }
}

// Level 1: tutorial. Gentle, well-spaced platforms, no hazards.
fn puppy_park() -> World {
    let mut w = base_world(4000.0);
    w.platforms.push(ground(-200.0, 4400.0));
    for (x, y, pw) in [
        (300.0, 400.0, 160.0),
        (520.0, 370.0, 128.0),
        (740.0, 340.0, 192.0),
        (1000.0, 380.0, 128.0),
        (1250.0, 350.0, 160.0),
        (1500.0, 320.0, 192.0),
        (1780.0, 360.0, 128.0),
        (2050.0, 390.0, 160.0),
        (2350.0, 340.0, 192.0),
        (2650.0, 370.0, 128.0),
        (2950.0, 400.0, 160.0),
        (3250.0, 350.0, 192.0),
        (3550.0, 380.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    w.collectibles.push(treat(1510.0, 290.0));
    w
}

// Level 2: mud puddles sap speed on the ground.
fn backyard_bash() -> World {
    let mut w = base_world(5000.0);
    w.platforms.push(ground(-200.0, 5400.0));
    for (x, y, pw) in [
        (350.0, 390.0, 128.0),
        (560.0, 350.0, 160.0),
        (820.0, 310.0, 128.0),
        (1050.0, 370.0, 192.0),
        (1350.0, 330.0, 128.0),
        (1650.0, 290.0, 160.0),
        (1950.0, 350.0, 192.0),
        (2250.0, 310.0, 128.0),
        (2550.0, 370.0, 160.0),
        (2850.0, 280.0, 192.0),
        (3150.0, 340.0, 128.0),
        (3450.0, 300.0, 160.0),
        (3750.0, 360.0, 192.0),
        (4100.0, 320.0, 128.0),
        (4400.0, 350.0, 160.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    for (x, mw) in [(700.0, 120.0), (1500.0, 150.0), (2300.0, 100.0), (3100.0, 130.0), (4000.0, 140.0)] {
        w.hazards.push(Hazard {
            rect: Rect::new(x, GROUND_Y - 4.0, mw, 8.0),
            kind: HazardKind::Mud,
        });
    }
    w.collectibles.push(treat(2860.0, 250.0));
    w
}

// Level 3: gaps in the ground bridged by moving platforms, hydrants on the
// sidewalks.
fn downtown_dash() -> World {
    let mut w = base_world(5500.0);
    w.platforms.push(ground(-200.0, 1200.0));
    w.platforms.push(ground(1160.0, 900.0));
    w.platforms.push(ground(2240.0, 1100.0));
    w.platforms.push(ground(3480.0, 800.0));
    w.platforms.push(ground(4440.0, 1260.0));
    for (x, y, pw) in [
        (400.0, 380.0, 128.0),
        (700.0, 340.0, 160.0),
        (1300.0, 320.0, 160.0),
        (1600.0, 280.0, 128.0),
        (1900.0, 340.0, 160.0),
        (2500.0, 310.0, 192.0),
        (2800.0, 350.0, 128.0),
        (3100.0, 290.0, 160.0),
        (3700.0, 310.0, 160.0),
        (4000.0, 270.0, 128.0),
        (4600.0, 320.0, 160.0),
        (4900.0, 350.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    for (x, min, max, speed) in [
        (1040.0, 1000.0, 1140.0, 40.0),
        (2100.0, 2060.0, 2200.0, 50.0),
        (3380.0, 3340.0, 3460.0, 35.0),
        (4320.0, 4280.0, 4420.0, 45.0),
    ] {
        w.moving_platforms.push(MovingPlatform {
            rect: Rect::new(x, 420.0, 96.0, TILE),
            axis: Axis::X,
            min,
            max,
            speed,
            dir: 1.0,
        });
    }
    for x in [500.0, 1400.0, 2600.0, 3600.0, 4700.0] {
        w.hazards.push(hydrant(x));
    }
    w.collectibles.push(treat(3110.0, 260.0));
    w
}

// Level 4: crumbling platforms over pits, bats overhead.
fn hollow_forest() -> World {
    let mut w = base_world(5500.0);
    w.platforms.push(ground(-200.0, 1400.0));
    w.platforms.push(ground(1600.0, 800.0));
    w.platforms.push(ground(2700.0, 600.0));
    w.platforms.push(ground(3500.0, 900.0));
    w.platforms.push(ground(4600.0, 1100.0));
    for (x, y, pw) in [
        (300.0, 380.0, 128.0),
        (550.0, 320.0, 96.0),
        (800.0, 280.0, 128.0),
        (1050.0, 350.0, 96.0),
        (1300.0, 300.0, 128.0),
        (1480.0, 400.0, 96.0),
        (1700.0, 340.0, 128.0),
        (1950.0, 280.0, 96.0),
        (2800.0, 360.0, 128.0),
        (3250.0, 380.0, 96.0),
        (3600.0, 330.0, 128.0),
        (3900.0, 270.0, 96.0),
        (4400.0, 390.0, 128.0),
        (4700.0, 320.0, 160.0),
        (5000.0, 360.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    for (x, y) in [(2200.0, 350.0), (2450.0, 310.0), (3050.0, 300.0), (4150.0, 340.0)] {
        w.platforms.push(fragile(x, y, 96.0, Fragility::Crumble));
    }
    for (x, y, min, max, speed, dir) in [
        (600.0, 240.0, 500.0, 800.0, 80.0, 1.0),
        (1200.0, 220.0, 1100.0, 1400.0, 90.0, -1.0),
        (2000.0, 200.0, 1850.0, 2200.0, 70.0, 1.0),
        (2900.0, 230.0, 2750.0, 3100.0, 85.0, -1.0),
        (3800.0, 210.0, 3650.0, 4000.0, 75.0, 1.0),
        (4500.0, 250.0, 4350.0, 4700.0, 95.0, -1.0),
    ] {
        w.enemies.push(bat(x, y, min, max, speed, dir));
    }
    w.collectibles.push(treat(3910.0, 240.0));
    w
}

// Level 5: ice physics, snowballs rolling along the ground.
fn snowy_peaks() -> World {
    let mut w = base_world(5500.0);
    w.icy = true;
    w.platforms.push(ground(-200.0, 1300.0));
    w.platforms.push(ground(1500.0, 700.0));
    w.platforms.push(ground(2400.0, 800.0));
    w.platforms.push(ground(3400.0, 1000.0));
    w.platforms.push(ground(4600.0, 1100.0));
    for (x, y, pw) in [
        (300.0, 400.0, 160.0),
        (560.0, 350.0, 128.0),
        (820.0, 290.0, 160.0),
        (1100.0, 350.0, 128.0),
        (1350.0, 410.0, 96.0),
        (1600.0, 340.0, 160.0),
        (1880.0, 280.0, 128.0),
        (2150.0, 360.0, 96.0),
        (2500.0, 310.0, 160.0),
        (2800.0, 260.0, 128.0),
        (3250.0, 400.0, 96.0),
        (3550.0, 330.0, 160.0),
        (3850.0, 270.0, 128.0),
        (4350.0, 410.0, 96.0),
        (4700.0, 320.0, 160.0),
        (5000.0, 370.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    for (x, min, max, speed, dir) in [
        (400.0, 200.0, 1050.0, 100.0, 1.0),
        (1700.0, 1500.0, 2150.0, 120.0, -1.0),
        (2600.0, 2400.0, 3150.0, 90.0, 1.0),
        (3600.0, 3400.0, 4350.0, 110.0, -1.0),
        (4800.0, 4600.0, 5400.0, 130.0, 1.0),
    ] {
        w.enemies.push(Enemy::patrol(
            EnemyKind::Snowball,
            Rect::new(x, GROUND_Y - 20.0, 20.0, 20.0),
            speed,
            dir,
            min,
            max,
        ));
    }
    w.collectibles.push(treat(2810.0, 230.0));
    w
}

// Level 6: lava pits between ground segments, fire geysers on a duty cycle.
fn volcano_ridge() -> World {
    let mut w = base_world(6000.0);
    w.platforms.push(ground(-200.0, 900.0));
    w.platforms.push(ground(900.0, 600.0));
    w.platforms.push(ground(1700.0, 700.0));
    w.platforms.push(ground(2600.0, 500.0));
    w.platforms.push(ground(3300.0, 800.0));
    w.platforms.push(ground(4300.0, 600.0));
    w.platforms.push(ground(5100.0, 1100.0));
    for (x, y, pw) in [
        (300.0, 380.0, 128.0),
        (550.0, 310.0, 96.0),
        (780.0, 260.0, 128.0),
        (1000.0, 340.0, 128.0),
        (1250.0, 280.0, 96.0),
        (1500.0, 360.0, 128.0),
        (1800.0, 310.0, 128.0),
        (2100.0, 250.0, 96.0),
        (2350.0, 340.0, 96.0),
        (2650.0, 290.0, 128.0),
        (2900.0, 360.0, 96.0),
        (3400.0, 340.0, 128.0),
        (3700.0, 270.0, 96.0),
        (4150.0, 400.0, 96.0),
        (4400.0, 320.0, 128.0),
        (4950.0, 350.0, 96.0),
        (5200.0, 300.0, 160.0),
        (5500.0, 350.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    // Lava fills the pits, just below floor level
    for x in [700.0, 1500.0, 2400.0, 3100.0, 4100.0, 4900.0] {
        w.hazards.push(Hazard {
            rect: Rect::new(x, GROUND_Y + 10.0, 200.0, 50.0),
            kind: HazardKind::Lava,
        });
    }
    for (x, period, phase) in [
        (800.0, 180, 0),
        (1600.0, 150, 60),
        (2500.0, 200, 30),
        (3200.0, 160, 90),
        (4200.0, 170, 45),
        (5000.0, 140, 75),
    ] {
        w.enemies
            .push(Enemy::geyser(Rect::new(x, GROUND_Y - 60.0, 16.0, 60.0), period, phase));
    }
    w.collectibles.push(treat(2110.0, 220.0));
    w.collectibles.push(treat(4410.0, 290.0));
    w
}

// Level 7: dissolving cloud platforms, wind gusts, vertical movers. Almost
// no ground.
fn sky_palace() -> World {
    let mut w = base_world(6000.0);
    w.platforms.push(ground(-200.0, 500.0));
    w.platforms.push(ground(5600.0, 600.0));
    for (x, y, pw) in [
        (250.0, 400.0, 128.0),
        (650.0, 380.0, 128.0),
        (1100.0, 360.0, 128.0),
        (1300.0, 290.0, 96.0),
        (1750.0, 280.0, 96.0),
        (1950.0, 340.0, 128.0),
        (2380.0, 320.0, 128.0),
        (2600.0, 380.0, 96.0),
        (3050.0, 250.0, 96.0),
        (3280.0, 330.0, 128.0),
        (3720.0, 350.0, 128.0),
        (3950.0, 280.0, 96.0),
        (4380.0, 260.0, 96.0),
        (4600.0, 320.0, 128.0),
        (5050.0, 300.0, 96.0),
        (5280.0, 360.0, 128.0),
        (5480.0, 420.0, 128.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    for (x, y) in [
        (450.0, 340.0),
        (880.0, 310.0),
        (1520.0, 350.0),
        (2150.0, 260.0),
        (2800.0, 300.0),
        (3500.0, 270.0),
        (4150.0, 340.0),
        (4830.0, 370.0),
    ] {
        w.platforms.push(fragile(x, y, 96.0, Fragility::Dissolve));
    }
    for (x, y, zw, zh, dir, strength) in [
        (600.0, 200.0, 200.0, 300.0, 1.0, 120.0),
        (1400.0, 150.0, 200.0, 350.0, -1.0, 100.0),
        (2300.0, 180.0, 250.0, 300.0, 1.0, 140.0),
        (3400.0, 200.0, 200.0, 300.0, -1.0, 110.0),
        (4500.0, 150.0, 250.0, 350.0, 1.0, 130.0),
    ] {
        w.hazards.push(Hazard {
            rect: Rect::new(x, y, zw, zh),
            kind: HazardKind::Wind { dir, strength },
        });
    }
    for (x, min, max, speed) in [
        (1800.0, 300.0, 440.0, 30.0),
        (3100.0, 280.0, 420.0, 35.0),
        (4400.0, 310.0, 430.0, 25.0),
    ] {
        w.moving_platforms.push(MovingPlatform {
            rect: Rect::new(x, 400.0, 96.0, TILE),
            axis: Axis::Y,
            min,
            max,
            speed,
            dir: 1.0,
        });
    }
    for (x, y, min, max, speed, dir) in [
        (800.0, 280.0, 700.0, 1000.0, 90.0, 1.0),
        (1600.0, 240.0, 1450.0, 1750.0, 80.0, -1.0),
        (2500.0, 260.0, 2350.0, 2650.0, 100.0, 1.0),
        (3300.0, 220.0, 3150.0, 3500.0, 85.0, -1.0),
        (4200.0, 250.0, 4050.0, 4400.0, 95.0, 1.0),
        (5100.0, 270.0, 4950.0, 5300.0, 90.0, -1.0),
    ] {
        w.enemies.push(bat(x, y, min, max, speed, dir));
    }
    w.collectibles.push(treat(3060.0, 220.0));
    w
}

// Level 8: the finale. Auto-run pipe section, breakable walls, tougher
// patrols, a rescue-gated goal and the boss.
fn cathedral() -> World {
    let mut w = base_world(2400.0);
    w.platforms.push(ground(-200.0, 2800.0));
    for (x, y, pw) in [
        (220.0, 385.0, 200.0),
        (520.0, 338.0, 200.0),
        (830.0, 292.0, 180.0),
        (1120.0, 242.0, 220.0),
        (1420.0, 300.0, 210.0),
        (1700.0, 248.0, 160.0),
        (1940.0, 205.0, 160.0),
    ] {
        w.platforms.push(plat(x, y, pw));
    }
    w.breakables.push(Breakable {
        rect: Rect::new(1080.0, 380.0, 42.0, 140.0),
        hp: 4,
    });
    w.breakables.push(Breakable {
        rect: Rect::new(1460.0, 360.0, 42.0, 160.0),
        hp: 5,
    });
    w.enemies.push(
        Enemy::patrol(
            EnemyKind::Hound,
            Rect::new(430.0, GROUND_Y - 26.0, 28.0, 26.0),
            95.0,
            1.0,
            430.0,
            560.0,
        )
        .with_hp(2),
    );
    w.enemies.push(Enemy::patrol(
        EnemyKind::Sawblade,
        Rect::new(700.0, GROUND_Y - 24.0, 24.0, 24.0),
        155.0,
        1.0,
        640.0,
        900.0,
    ));
    w.enemies.push(Enemy::patrol(
        EnemyKind::Ghost,
        Rect::new(940.0, 210.0, 26.0, 26.0),
        70.0,
        -1.0,
        880.0,
        1130.0,
    ));
    w.enemies.push(
        Enemy::patrol(
            EnemyKind::Hound,
            Rect::new(1690.0, GROUND_Y - 26.0, 28.0, 26.0),
            125.0,
            -1.0,
            1620.0,
            1910.0,
        )
        .with_hp(2),
    );
    w.auto_zones.push(AutoZone {
        start: 600.0,
        end: 1000.0,
    });
    w.collectibles.push(Collectible::new(
        CollectibleKind::Rescue,
        Rect::new(2060.0, GROUND_Y - 30.0, 30.0, 30.0),
    ));
    w.collectibles.push(treat(1130.0, 212.0));
    w.boss = Some(Boss {
        rect: Rect::new(1800.0, 170.0, 88.0, 84.0),
        hp: BOSS_MAX_HP,
        max_hp: BOSS_MAX_HP,
        speed: 90.0,
        dir: -1.0,
        min_x: 1700.0,
        max_x: 2000.0,
        invuln: 0.0,
        shoot_timer: 1.0,
    });
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_levels_validate() {
        for i in 0..level_count() {
            let world = build_level(i, 42);
            assert!(
                validate(&world).is_ok(),
                "level {} failed validation: {:?}",
                i,
                validate(&world)
            );
        }
    }

    #[test]
    fn test_build_is_deterministic_per_seed() {
        let a = build_level(3, 1234);
        let b = build_level(3, 1234);
        assert_eq!(a.collectibles.len(), b.collectibles.len());
        for (ca, cb) in a.collectibles.iter().zip(&b.collectibles) {
            assert_eq!(ca.rect, cb.rect);
            assert_eq!(ca.kind, cb.kind);
        }
    }

    #[test]
    fn test_seeds_vary_layout() {
        let a = build_level(0, 1);
        let b = build_level(0, 2);
        let xa: Vec<f32> = a.collectibles.iter().map(|c| c.rect.x).collect();
        let xb: Vec<f32> = b.collectibles.iter().map(|c| c.rect.x).collect();
        assert_ne!(xa, xb);
    }

    #[test]
    fn test_every_level_has_a_treat() {
        for i in 0..level_count() {
            let world = build_level(i, 9);
            assert!(
                world
                    .collectibles
                    .iter()
                    .any(|c| c.kind == CollectibleKind::Treat),
                "level {i} has no treat"
            );
        }
    }

    #[test]
    fn test_finale_contents() {
        let world = build_level(7, 0);
        assert!(world.boss.is_some());
        assert!(world.rescue_pending());
        assert!(!world.breakables.is_empty());
        assert!(!world.auto_zones.is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_patrol() {
        let mut world = build_level(0, 0);
        world.enemies.push(Enemy::patrol(
            EnemyKind::Hound,
            Rect::new(100.0, 100.0, 20.0, 20.0),
            50.0,
            1.0,
            500.0,
            100.0,
        ));
        assert_eq!(
            validate(&world),
            Err(LevelDataError::InvalidPatrolRange("enemy"))
        );
    }

    #[test]
    fn test_validate_rejects_negative_extent() {
        let mut world = build_level(0, 0);
        world.platforms.push(Platform::solid(Rect::new(0.0, 0.0, -5.0, 10.0), false));
        assert_eq!(
            validate(&world),
            Err(LevelDataError::NonPositiveExtent("platform"))
        );
    }

    #[test]
    fn test_out_of_range_index_clamps() {
        let world = build_level(99, 0);
        assert_eq!(world.level_index, level_count() - 1);
    }
}
