//! Read-only JSON dump of the live state
//!
//! The scriptable oracle: hosts and tests call `render_game_to_text` after
//! any number of ticks and get a stable JSON description of the session,
//! the player's kinematics and every entity inside the camera view.

use serde::Serialize;

use crate::consts::*;
use crate::sim::{CollectibleKind, EnemyKind, GameState, HazardKind, Mode, Rect};

#[derive(Serialize)]
struct PlayerView {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    on_ground: bool,
    facing: i8,
    jumps_left: u8,
    sitting: bool,
    treat_ticks: u32,
    invuln: f32,
}

#[derive(Serialize)]
struct BossView {
    x: f32,
    y: f32,
    hp: i32,
    max_hp: i32,
    alive: bool,
}

#[derive(Serialize)]
struct EntityView {
    kind: &'static str,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    hp: Option<i32>,
}

#[derive(Serialize)]
struct Snapshot {
    origin: &'static str,
    mode: &'static str,
    level: usize,
    level_name: &'static str,
    tick: u64,
    score: u32,
    lives: u8,
    rescued: bool,
    player: PlayerView,
    #[serde(skip_serializing_if = "Option::is_none")]
    boss: Option<BossView>,
    camera_x: f32,
    entities: Vec<EntityView>,
}

fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

fn mode_str(mode: Mode) -> &'static str {
    match mode {
        Mode::Menu => "menu",
        Mode::Playing => "play",
        Mode::GameOver => "over",
        Mode::Won => "won",
    }
}

fn hazard_str(kind: HazardKind) -> &'static str {
    match kind {
        HazardKind::Mud => "mud",
        HazardKind::Lava => "lava",
        HazardKind::Hydrant => "hydrant",
        HazardKind::Wind { .. } => "wind",
    }
}

fn enemy_str(kind: EnemyKind) -> &'static str {
    match kind {
        EnemyKind::Bat => "bat",
        EnemyKind::Snowball => "snowball",
        EnemyKind::Hound => "hound",
        EnemyKind::Ghost => "ghost",
        EnemyKind::Sawblade => "sawblade",
        EnemyKind::FireGeyser => "fire_geyser",
    }
}

fn collectible_str(kind: CollectibleKind) -> &'static str {
    match kind {
        CollectibleKind::Bone => "bone",
        CollectibleKind::Treat => "treat",
        CollectibleKind::Rescue => "rescue",
    }
}

fn entity(kind: &'static str, rect: Rect, hp: Option<i32>) -> EntityView {
    EntityView {
        kind,
        x: round1(rect.x),
        y: round1(rect.y),
        w: rect.w,
        h: rect.h,
        hp,
    }
}

/// Serialize the session to a single JSON line
pub fn render_game_to_text(state: &GameState) -> String {
    // Platforms get a little extra margin so spawning geometry is visible
    let in_view = |r: &Rect, margin: f32| {
        r.right() > state.camera_x && r.x < state.camera_x + VIEW_W + margin
    };

    let mut entities = Vec::new();
    for p in &state.world.platforms {
        if p.is_active() && in_view(&p.rect, 80.0) {
            let kind = if p.is_ground { "ground" } else { "platform" };
            entities.push(entity(kind, p.rect, None));
        }
    }
    for mp in &state.world.moving_platforms {
        if in_view(&mp.rect, 80.0) {
            entities.push(entity("moving_platform", mp.rect, None));
        }
    }
    for h in &state.world.hazards {
        if in_view(&h.rect, 0.0) {
            entities.push(entity(hazard_str(h.kind), h.rect, None));
        }
    }
    for e in &state.world.enemies {
        if in_view(&e.rect, 0.0) {
            entities.push(entity(enemy_str(e.kind), e.rect, Some(e.hp)));
        }
    }
    for b in &state.world.breakables {
        if in_view(&b.rect, 0.0) {
            entities.push(entity("breakable", b.rect, Some(b.hp)));
        }
    }
    for c in &state.world.collectibles {
        if !c.collected && in_view(&c.rect, 0.0) {
            entities.push(entity(collectible_str(c.kind), c.rect, None));
        }
    }
    for b in &state.world.bullets {
        if in_view(&b.rect(), 0.0) {
            entities.push(entity("bullet", b.rect(), None));
        }
    }
    if !state.world.flag.collected && in_view(&state.world.flag.rect(), 0.0) {
        entities.push(entity("flag", state.world.flag.rect(), None));
    }

    let rescued = state
        .world
        .collectibles
        .iter()
        .any(|c| c.kind == CollectibleKind::Rescue && c.collected);

    let snapshot = Snapshot {
        origin: "top-left, +x right, +y down",
        mode: mode_str(state.mode),
        level: state.level_index + 1,
        level_name: crate::sim::level_name(state.level_index),
        tick: state.tick,
        score: state.score,
        lives: state.lives,
        rescued,
        player: PlayerView {
            x: round1(state.player.pos.x),
            y: round1(state.player.pos.y),
            vx: round1(state.player.vel.x),
            vy: round1(state.player.vel.y),
            on_ground: state.player.on_ground,
            facing: if state.player.facing_right { 1 } else { -1 },
            jumps_left: state.player.jumps_left,
            sitting: state.player.sitting,
            treat_ticks: state.player.treat_timer,
            invuln: round1(state.player.invuln),
        },
        boss: state.world.boss.as_ref().map(|b| BossView {
            x: round1(b.rect.x),
            y: round1(b.rect.y),
            hp: b.hp,
            max_hp: b.max_hp,
            alive: b.hp > 0,
        }),
        camera_x: round1(state.camera_x),
        entities,
    };

    serde_json::to_string(&snapshot).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_snapshot_is_valid_json_with_core_fields() {
        let mut state = GameState::new(3);
        state.start_run();
        tick(&mut state, &TickInput::default(), SIM_DT);

        let text = render_game_to_text(&state);
        let v: serde_json::Value = serde_json::from_str(&text).expect("snapshot must parse");
        assert_eq!(v["mode"], "play");
        assert_eq!(v["level"], 1);
        assert_eq!(v["lives"], 3);
        assert!(v["player"]["x"].is_number());
        assert!(v["entities"].as_array().is_some_and(|e| !e.is_empty()));
    }

    #[test]
    fn test_entities_outside_view_are_filtered() {
        let mut state = GameState::new(3);
        state.start_run();
        // Camera at 0: nothing past VIEW_W + margin should appear
        let text = render_game_to_text(&state);
        let v: serde_json::Value = serde_json::from_str(&text).expect("parse");
        for e in v["entities"].as_array().expect("entities") {
            let x = e["x"].as_f64().expect("x");
            assert!(x < (crate::consts::VIEW_W + 80.0) as f64);
        }
    }

    #[test]
    fn test_boss_absent_outside_finale() {
        let mut state = GameState::new(3);
        state.start_run();
        let text = render_game_to_text(&state);
        let v: serde_json::Value = serde_json::from_str(&text).expect("parse");
        assert!(v.get("boss").is_none());
    }

    #[test]
    fn test_positions_rounded_to_tenths() {
        let mut state = GameState::new(3);
        state.start_run();
        state.player.pos.x = 123.456;
        let text = render_game_to_text(&state);
        let v: serde_json::Value = serde_json::from_str(&text).expect("parse");
        assert_eq!(v["player"]["x"].as_f64(), Some(123.5));
    }
}
