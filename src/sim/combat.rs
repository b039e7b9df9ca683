//! Combat resolution
//!
//! Stomps, contact damage, the headbutt attack and the boss state machine.
//! All of it runs after collision resolution within the same tick, reading
//! settled positions.

use glam::Vec2;

use super::level;
use super::rect::Rect;
use super::state::{GameState, Mode};
use super::world::{Bullet, EnemyKind};
use crate::consts::*;

/// Player vs enemy contact: stomp from above, knock away under the treat
/// buff, take damage otherwise. Dead enemies are removed in place.
pub(crate) fn resolve_enemy_contact(state: &mut GameState, dt: f32) {
    if state.mode != Mode::Playing {
        return;
    }

    let mut i = 0;
    while i < state.world.enemies.len() {
        let erect = state.world.enemies[i].rect;
        if !state.world.enemies[i].active || !state.player.rect().overlaps(&erect) {
            i += 1;
            continue;
        }

        if state.player.has_treat() {
            // Invincible: the enemy gets knocked away instead
            state.world.enemies[i].dir = -state.world.enemies[i].dir;
            i += 1;
            continue;
        }

        // Stomp requires downward motion and an approach from above
        let p = &state.player;
        let prev_bottom = p.pos.y + p.h - p.vel.y * dt;
        let stompable = state.world.enemies[i].kind != EnemyKind::FireGeyser;
        if stompable
            && p.vel.y > STOMP_MIN_FALL_SPEED
            && prev_bottom <= erect.y + STOMP_TOLERANCE
        {
            state.player.vel.y = -STOMP_BOUNCE;
            state.score += STOMP_SCORE;
            let e = &mut state.world.enemies[i];
            e.hp -= 1;
            if e.hp <= 0 {
                log::debug!("stomped a {:?}", e.kind);
                state.world.enemies.remove(i);
                continue;
            }
            i += 1;
            continue;
        }

        damage_player(state, ENEMY_CONTACT_DAMAGE, Some(erect.center().x));
        i += 1;
    }
}

/// Take a hit: lose lives, start the invulnerability window, knock back away
/// from the source. No-op while invulnerable or outside Playing.
pub(crate) fn damage_player(state: &mut GameState, amount: u8, source_x: Option<f32>) {
    if state.player.invuln > 0.0 || state.mode != Mode::Playing {
        return;
    }
    state.lives = state.lives.saturating_sub(amount);
    state.player.invuln = HURT_INVULN;

    let hit_from_right = match source_x {
        Some(sx) => state.player.pos.x + state.player.w / 2.0 < sx,
        None => state.player.facing_right,
    };
    state.player.vel.x = if hit_from_right {
        -HURT_KNOCKBACK_X
    } else {
        HURT_KNOCKBACK_X
    };
    state.player.vel.y = -HURT_KNOCKBACK_Y;
    state.player.on_ground = false;

    log::debug!("hit, {} lives left", state.lives);
    if state.lives == 0 {
        log::info!("out of lives");
        state.mode = Mode::GameOver;
    }
}

/// Directional headbutt: a thin rectangle extended in the facing direction,
/// tested against breakables, then enemies, then the boss, stopping at the
/// first category that registers. A scratched (not destroyed) breakable
/// still lets an enemy hit land, but blocks the boss.
pub(crate) fn headbutt(state: &mut GameState) {
    let p = &state.player;
    let dir = if p.facing_right { 1.0 } else { -1.0 };
    let hit = Rect::new(
        if p.facing_right {
            p.pos.x + p.w
        } else {
            p.pos.x - HEADBUTT_RANGE
        },
        p.pos.y + 4.0,
        HEADBUTT_RANGE,
        p.h - 10.0,
    );

    let mut scratched = false;
    let mut i = 0;
    while i < state.world.breakables.len() {
        if !hit.overlaps(&state.world.breakables[i].rect) {
            i += 1;
            continue;
        }
        state.world.breakables[i].hp -= HEADBUTT_DAMAGE;
        if state.world.breakables[i].hp <= 0 {
            state.world.breakables.remove(i);
            state.score += BREAKABLE_SCORE;
            state.player.vel.x += dir * 45.0;
            log::debug!("wall down");
            return;
        }
        scratched = true;
        i += 1;
    }

    let mut j = 0;
    while j < state.world.enemies.len() {
        if !hit.overlaps(&state.world.enemies[j].rect) {
            j += 1;
            continue;
        }
        let e = &mut state.world.enemies[j];
        e.hp -= HEADBUTT_DAMAGE;
        state.score += HEADBUTT_SCORE / 2;
        if e.hp <= 0 {
            log::debug!("headbutted a {:?}", e.kind);
            state.world.enemies.remove(j);
            state.score += HEADBUTT_SCORE;
        }
        state.player.vel.x += dir * 35.0;
        return;
    }

    if scratched {
        return;
    }
    if let Some(boss) = &mut state.world.boss
        && boss.hp > 0
        && hit.overlaps(&boss.rect)
    {
        boss.hp = (boss.hp - HEADBUTT_DAMAGE).max(0);
        boss.invuln = BOSS_HEADBUTT_INVULN;
        state.score += HEADBUTT_SCORE;
        log::debug!("headbutt on the boss, hp {}", boss.hp);
    }
}

/// Boss state machine: patrol, drift toward the player's height, contact
/// resolution (stomp or damage), periodic arced projectiles. Defeating the
/// boss on the final level wins the session.
pub(crate) fn update_boss(state: &mut GameState, dt: f32) {
    if state.mode != Mode::Playing {
        return;
    }

    if let Some(mut boss) = state.world.boss.take() {
        if boss.hp > 0 {
            boss.rect.x += boss.speed * boss.dir * dt;
            if boss.rect.x <= boss.min_x || boss.rect.x >= boss.max_x {
                boss.dir = -boss.dir;
            }

            // Drift toward the player's side of the arena, gently
            let pull = (state.player.pos.x - boss.rect.x) * 0.03;
            boss.rect.y += pull.clamp(-15.0, 15.0) * dt * 5.0;
            boss.rect.y = boss.rect.y.clamp(150.0, 260.0);

            if boss.invuln > 0.0 {
                boss.invuln -= dt;
            }

            let prect = state.player.rect();
            if prect.overlaps(&boss.rect) && boss.invuln <= 0.0 {
                if state.player.vel.y > BOSS_STOMP_MIN_FALL_SPEED
                    && state.player.pos.y + state.player.h < boss.rect.y + BOSS_STOMP_TOLERANCE
                {
                    state.player.vel.y = -STOMP_BOUNCE;
                    state.score += BOSS_HIT_SCORE;
                    boss.hp = (boss.hp - HEADBUTT_DAMAGE).max(0);
                    boss.invuln = BOSS_HEADBUTT_INVULN;
                    log::debug!("boss stomped, hp {}", boss.hp);
                } else {
                    damage_player(state, BOSS_CONTACT_DAMAGE, Some(boss.rect.center().x));
                }
            }

            boss.shoot_timer -= dt;
            if boss.shoot_timer <= 0.0 && boss.hp > 0 {
                boss.shoot_timer = BOSS_ATTACK_INTERVAL;
                let dir = if state.player.pos.x >= boss.rect.x {
                    1.0
                } else {
                    -1.0
                };
                state.world.bullets.push(Bullet {
                    pos: Vec2::new(
                        boss.rect.x + boss.rect.w / 2.0,
                        boss.rect.y + boss.rect.h * 0.52,
                    ),
                    vel: Vec2::new(dir * BOSS_BULLET_SPEED, -BOSS_BULLET_LIFT),
                    w: 12.0,
                    h: 12.0,
                    ttl: BOSS_BULLET_TTL,
                });
            }
        }

        let defeated = boss.hp <= 0;
        state.world.boss = Some(boss);
        if defeated && state.level_index == level::level_count() - 1 {
            log::info!("boss defeated, score {}", state.score);
            state.mode = Mode::Won;
        }
    }

    update_bullets(state, dt);
}

/// Bullets arc under their own gravity and despawn on hit, timeout or
/// leaving the level. One integration step per tick, no substepping.
fn update_bullets(state: &mut GameState, dt: f32) {
    let mut i = 0;
    while i < state.world.bullets.len() {
        {
            let b = &mut state.world.bullets[i];
            b.pos += b.vel * dt;
            b.vel.y += BOSS_BULLET_GRAVITY * dt;
            b.ttl -= dt;
        }

        let b = state.world.bullets[i].clone();
        if state.mode == Mode::Playing && b.rect().overlaps(&state.player.rect()) {
            let source_x = if b.vel.x > 0.0 { b.pos.x } else { b.pos.x + b.w };
            damage_player(state, BOSS_BULLET_DAMAGE, Some(source_x));
            state.world.bullets.remove(i);
            continue;
        }
        if b.ttl <= 0.0 || b.pos.x < 0.0 || b.pos.x > state.world.width || b.pos.y > GROUND_Y + 60.0
        {
            state.world.bullets.remove(i);
            continue;
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Player;
    use crate::sim::tick::{TickInput, tick};
    use crate::sim::world::{Boss, Breakable, Enemy, Platform, World};
    use glam::Vec2;

    fn sandbox() -> GameState {
        let mut world = World::empty(2400.0);
        world
            .platforms
            .push(Platform::solid(Rect::new(-200.0, GROUND_Y, 2800.0, 60.0), true));
        let mut player = Player::new(Vec2::new(100.0, GROUND_Y - PLAYER_H));
        player.on_ground = true;
        GameState {
            seed: 1,
            mode: Mode::Playing,
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

    fn hound_at(x: f32) -> Enemy {
        Enemy::patrol(
            EnemyKind::Hound,
            Rect::new(x, GROUND_Y - 26.0, 28.0, 26.0),
            0.0,
            1.0,
            x,
            x,
        )
    }

    #[test]
    fn test_stomp_bounces_and_kills() {
        let mut state = sandbox();
        state.world.enemies.push(hound_at(100.0));
        // Falling onto the enemy from above
        state.player.pos = Vec2::new(100.0, GROUND_Y - 26.0 - PLAYER_H + 2.0);
        state.player.vel.y = 400.0;
        state.player.on_ground = false;

        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.player.vel.y, -STOMP_BOUNCE);
        assert_eq!(state.score, STOMP_SCORE);
        assert!(state.world.enemies.is_empty());
        assert_eq!(state.lives, START_LIVES);
    }

    #[test]
    fn test_side_contact_damages_and_knocks_back() {
        let mut state = sandbox();
        state.world.enemies.push(hound_at(120.0));

        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
        assert_eq!(state.player.invuln, HURT_INVULN);
        // Enemy is to the right, so the knockback points left and up
        assert_eq!(state.player.vel.x, -HURT_KNOCKBACK_X);
        assert_eq!(state.player.vel.y, -HURT_KNOCKBACK_Y);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn test_invuln_window_blocks_second_hit() {
        let mut state = sandbox();
        state.world.enemies.push(hound_at(120.0));
        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
    }

    #[test]
    fn test_treat_contact_knocks_enemy_away() {
        let mut state = sandbox();
        state.world.enemies.push(hound_at(120.0));
        state.player.treat_timer = TREAT_TICKS;

        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.world.enemies[0].dir, -1.0);
    }

    #[test]
    fn test_out_of_lives_ends_run() {
        let mut state = sandbox();
        state.lives = 1;
        state.world.enemies.push(hound_at(120.0));
        resolve_enemy_contact(&mut state, SIM_DT);
        assert_eq!(state.lives, 0);
        assert_eq!(state.mode, Mode::GameOver);
    }

    #[test]
    fn test_headbutt_scratches_then_breaks_wall() {
        let mut state = sandbox();
        state.player.facing_right = true;
        let wall = Rect::new(state.player.pos.x + PLAYER_W + 4.0, GROUND_Y - 140.0, 42.0, 140.0);
        state.world.breakables.push(Breakable { rect: wall, hp: 4 });

        headbutt(&mut state);
        assert_eq!(state.world.breakables[0].hp, 2);
        assert_eq!(state.score, 0);

        headbutt(&mut state);
        assert!(state.world.breakables.is_empty());
        assert_eq!(state.score, BREAKABLE_SCORE);
    }

    #[test]
    fn test_headbutt_kills_enemy_and_scores() {
        let mut state = sandbox();
        state.player.facing_right = true;
        state.world.enemies.push(hound_at(state.player.pos.x + PLAYER_W + 6.0));

        headbutt(&mut state);
        assert!(state.world.enemies.is_empty());
        assert_eq!(state.score, HEADBUTT_SCORE / 2 + HEADBUTT_SCORE);
    }

    #[test]
    fn test_headbutt_faces_away_misses() {
        let mut state = sandbox();
        state.player.facing_right = false;
        state.world.enemies.push(hound_at(state.player.pos.x + PLAYER_W + 6.0));

        headbutt(&mut state);
        assert_eq!(state.world.enemies.len(), 1);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_scratched_wall_blocks_boss_not_enemy() {
        let mut state = sandbox();
        state.player.facing_right = true;
        let ahead = state.player.pos.x + PLAYER_W + 4.0;
        state.world.breakables.push(Breakable {
            rect: Rect::new(ahead, GROUND_Y - 140.0, 10.0, 140.0),
            hp: 10,
        });
        state.world.enemies.push(hound_at(ahead + 12.0));
        state.world.boss = Some(Boss {
            rect: Rect::new(ahead, state.player.pos.y, 88.0, 84.0),
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
            speed: 0.0,
            dir: 1.0,
            min_x: ahead,
            max_x: ahead,
            invuln: 0.0,
            shoot_timer: 99.0,
        });

        headbutt(&mut state);
        // Wall scratched, enemy still hit, boss untouched
        assert_eq!(state.world.breakables[0].hp, 10 - HEADBUTT_DAMAGE);
        assert!(state.world.enemies.is_empty());
        assert_eq!(state.world.boss.as_ref().map(|b| b.hp), Some(BOSS_MAX_HP));
    }

    fn boss_rig() -> GameState {
        let mut state = sandbox();
        state.level_index = level::level_count() - 1;
        state.world.boss = Some(Boss {
            rect: Rect::new(600.0, 170.0, 88.0, 84.0),
            hp: BOSS_MAX_HP,
            max_hp: BOSS_MAX_HP,
            speed: 90.0,
            dir: -1.0,
            min_x: 500.0,
            max_x: 800.0,
            invuln: 0.0,
            shoot_timer: 0.2,
        });
        state
    }

    #[test]
    fn test_boss_shoots_on_interval() {
        let mut state = boss_rig();
        for _ in 0..30 {
            update_boss(&mut state, SIM_DT);
        }
        assert!(!state.world.bullets.is_empty());
        let timer = state.world.boss.as_ref().map(|b| b.shoot_timer);
        assert!(timer.is_some_and(|t| t > 0.0 && t <= BOSS_ATTACK_INTERVAL));
    }

    #[test]
    fn test_bullet_arcs_and_hits_player() {
        let mut state = boss_rig();
        state.world.bullets.push(Bullet {
            pos: Vec2::new(state.player.pos.x, state.player.pos.y - 200.0),
            vel: Vec2::new(0.0, 0.0),
            w: 12.0,
            h: 12.0,
            ttl: BOSS_BULLET_TTL,
        });
        let mut hit = false;
        for _ in 0..120 {
            update_boss(&mut state, SIM_DT);
            if state.lives < START_LIVES {
                hit = true;
                break;
            }
        }
        // Bullet gravity carried it down onto Buddy and despawned it
        assert!(hit);
        assert!(state.world.bullets.iter().all(|b| {
            !b.rect().overlaps(&state.player.rect())
        }));
    }

    #[test]
    fn test_bullet_despawns_on_ttl() {
        let mut state = boss_rig();
        state.world.boss = None;
        state.world.bullets.push(Bullet {
            pos: Vec2::new(2000.0, 100.0),
            vel: Vec2::new(0.0, -BOSS_BULLET_GRAVITY),
            w: 12.0,
            h: 12.0,
            ttl: 0.05,
        });
        for _ in 0..10 {
            update_boss(&mut state, SIM_DT);
        }
        assert!(state.world.bullets.is_empty());
    }

    #[test]
    fn test_boss_stomp_and_defeat_wins_final_level() {
        let mut state = boss_rig();
        if let Some(boss) = &mut state.world.boss {
            boss.hp = HEADBUTT_DAMAGE;
            boss.speed = 0.0;
            boss.shoot_timer = 99.0;
            // Buddy falling onto the boss's crown
            state.player.pos = Vec2::new(boss.rect.x + 10.0, boss.rect.y - PLAYER_H + 4.0);
        }
        state.player.vel.y = 300.0;
        state.player.on_ground = false;

        update_boss(&mut state, SIM_DT);
        assert_eq!(state.player.vel.y, -STOMP_BOUNCE);
        assert_eq!(state.world.boss.as_ref().map(|b| b.hp), Some(0));
        assert_eq!(state.mode, Mode::Won);
    }

    #[test]
    fn test_boss_contact_damages() {
        let mut state = boss_rig();
        if let Some(boss) = &mut state.world.boss {
            boss.speed = 0.0;
            boss.shoot_timer = 99.0;
            boss.rect.y = 200.0;
            state.player.pos = Vec2::new(boss.rect.x + 10.0, 220.0);
        }
        state.player.vel.y = 0.0;
        state.player.on_ground = false;

        update_boss(&mut state, SIM_DT);
        assert_eq!(state.lives, START_LIVES - 1);
    }

    #[test]
    fn test_full_tick_stomp_via_engine() {
        // End to end through tick(): drop Buddy onto a hound and make sure
        // the stomp lands before contact damage is considered
        let mut state = sandbox();
        state.world.enemies.push(hound_at(100.0));
        state.player.pos = Vec2::new(100.0, GROUND_Y - 26.0 - PLAYER_H - 40.0);
        state.player.vel.y = 0.0;
        state.player.on_ground = false;

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
            if state.world.enemies.is_empty() {
                break;
            }
        }
        assert!(state.world.enemies.is_empty());
        assert_eq!(state.lives, START_LIVES);
        assert_eq!(state.score, STOMP_SCORE);
    }
}
