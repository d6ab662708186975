//! Fixed-step simulation tick
//!
//! One tick advances the whole world: input intent, integration, collision
//! resolution, enemy patrol, coin collection, particle decay, camera follow
//! and the level-completion / death checks. The step only runs in the
//! `Playing` phase; the scheduler never calls it while paused.

use glam::Vec2;

use super::collision::{Resolution, resolve_moving};
use super::state::{GamePhase, World};
use crate::consts::*;

/// Input intent for a single tick, read from the live held-key set.
///
/// Directions are independent flags, not a mutually exclusive lock; when both
/// are held, right wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fast_fall: bool,
}

impl TickInput {
    /// Build intent from membership in a held-key set (the input collaborator
    /// owns key-event dispatch; the simulation only reads membership).
    pub fn from_held_keys(keys: &std::collections::HashSet<String>) -> Self {
        let held = |k: &str| keys.contains(k);
        Self {
            left: held("ArrowLeft") || held("a"),
            right: held("ArrowRight") || held("d"),
            jump: held("ArrowUp") || held("w") || held(" "),
            fast_fall: held("ArrowDown") || held("s"),
        }
    }

    /// Any movement intent at all (used to defer the play timer until the
    /// first input of a run)
    pub fn any(&self) -> bool {
        self.left || self.right || self.jump || self.fast_fall
    }
}

/// How a run ended this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// Lives exhausted
    GameOver,
    /// Completed the last level
    Win,
}

/// What happened during one tick, for the UI/session collaborators
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepEvents {
    pub coins_collected: u32,
    pub stomps: u32,
    pub died: bool,
    pub level_advanced: bool,
    pub outcome: Option<RunOutcome>,
}

/// Advance the world by one tick
pub fn tick(world: &mut World, input: &TickInput) -> StepEvents {
    let mut events = StepEvents::default();

    // Only Playing ticks; Menu/Paused/GameOver/Win are never stepped.
    if world.phase != GamePhase::Playing {
        return events;
    }

    world.time_ticks += 1;

    apply_input(world, input);
    integrate_player(world);
    resolve_player_platforms(world);

    // Fell out of the world
    if world.player.pos.y > world.viewport.y + FALL_MARGIN {
        handle_death(world, &mut events);
        return events;
    }

    if update_enemies(world, &mut events) {
        // Contact death ends the tick; the respawned player is not re-checked
        // against the remaining entities this frame.
        return events;
    }

    update_coins(world, &mut events);
    update_particles(world);
    update_camera(world);
    check_level_complete(world, &mut events);

    events
}

fn apply_input(world: &mut World, input: &TickInput) {
    let player = &mut world.player;

    player.vel.x = 0.0;
    if input.left {
        player.vel.x = -PLAYER_SPEED;
    }
    if input.right {
        player.vel.x = PLAYER_SPEED;
    }

    if input.jump && player.on_ground {
        player.vel.y = -JUMP_POWER;
        player.on_ground = false;
    }

    // Fast-fall only bites while airborne and already falling
    if input.fast_fall && !player.on_ground && player.vel.y > 0.0 {
        player.vel.y += FAST_FALL_ACCEL;
    }
}

fn integrate_player(world: &mut World) {
    let player = &mut world.player;
    // Gravity every tick, even when grounded; the collision pass corrects it
    player.vel.y += GRAVITY;
    player.pos += player.vel;
}

fn resolve_player_platforms(world: &mut World) {
    let mut rect = world.player.rect();
    let mut vel = world.player.vel;
    let mut grounded = false;

    // Platforms resolve independently in iteration order; any landing
    // grounds the player for this tick.
    for platform in &world.platforms {
        if rect.overlaps(&platform.rect)
            && resolve_moving(&mut rect, &mut vel, &platform.rect) == Resolution::Landed
        {
            grounded = true;
        }
    }

    world.player.pos = rect.pos;
    world.player.vel = vel;
    world.player.on_ground = grounded;
}

/// Patrol movement, ledge reversal and player contact. Returns true if the
/// player died this tick.
fn update_enemies(world: &mut World, events: &mut StepEvents) -> bool {
    for i in 0..world.enemies.len() {
        if !world.enemies[i].alive {
            continue;
        }

        {
            let enemy = &mut world.enemies[i];
            enemy.pos.x += enemy.speed * enemy.direction;
        }

        // Ground-probe for the platform the enemy stands on; reverse and
        // clamp at its edges so patrols never walk off ledges.
        let probe = world.enemies[i].ground_probe();
        let footing = world
            .platforms
            .iter()
            .map(|p| p.rect)
            .find(|r| probe.overlaps(r));
        if let Some(plat) = footing {
            let enemy = &mut world.enemies[i];
            if enemy.pos.x <= plat.left() || enemy.pos.x + enemy.size.x >= plat.right() {
                enemy.direction = -enemy.direction;
                enemy.pos.x = enemy
                    .pos
                    .x
                    .min(plat.right() - enemy.size.x)
                    .max(plat.left());
            }
        }

        if world.player.rect().overlaps(&world.enemies[i].rect()) {
            let enemy_top = world.enemies[i].pos.y;
            let falling = world.player.vel.y > 0.0;
            let midpoint = world.player.pos.y + world.player.size.y / 2.0;

            if falling && midpoint < enemy_top + CONTACT_TOLERANCE {
                // Stomp: enemy dies, player bounces
                let center = world.enemies[i].rect().center();
                let color = world.enemies[i].color;
                world.enemies[i].alive = false;
                world.player.vel.y = -STOMP_BOUNCE;
                world.score += STOMP_SCORE;
                world.spawn_burst(center, color, STOMP_BURST);
                events.stomps += 1;
            } else {
                handle_death(world, events);
                return true;
            }
        }
    }
    false
}

fn update_coins(world: &mut World, events: &mut StepEvents) {
    let player_rect = world.player.rect();
    for i in 0..world.coins.len() {
        if world.coins[i].collected {
            continue;
        }
        world.coins[i].rotation += COIN_SPIN_RATE;
        world.coins[i].pulse += COIN_PULSE_RATE;

        if player_rect.overlaps(&world.coins[i].rect()) {
            world.coins[i].collected = true;
            world.coins_collected += 1;
            world.score += COIN_SCORE;
            let center = world.coins[i].rect().center();
            world.spawn_burst(center, COIN_COLOR, COIN_BURST);
            events.coins_collected += 1;
        }
    }
}

fn update_particles(world: &mut World) {
    for particle in &mut world.particles {
        let vel = particle.vel;
        particle.pos += vel;
        particle.vel.y += PARTICLE_GRAVITY;
        particle.life = particle.life.saturating_sub(1);
    }
    world.particles.retain(|p| p.life > 0);
}

fn update_camera(world: &mut World) {
    let target = world.player.pos.x - world.viewport.x / 2.0 + world.player.size.x / 2.0;
    world.camera_x = target.min(world.max_camera_x()).max(0.0);
}

fn check_level_complete(world: &mut World, events: &mut StepEvents) {
    if world.player.pos.x <= world.level_width() - LEVEL_END_MARGIN {
        return;
    }

    if world.is_last_level() {
        log::info!(
            "run won at level {} with score {}",
            world.level_index + 1,
            world.score
        );
        world.enter_phase(GamePhase::Win);
        events.outcome = Some(RunOutcome::Win);
    } else {
        let next = world.level_index + 1;
        world.score += LEVEL_BONUS;
        world.reset_player();
        world.generate_level(next);
        log::info!("advanced to level {} ({})", next + 1, world.current_level().name);
        events.level_advanced = true;
    }
}

fn handle_death(world: &mut World, events: &mut StepEvents) {
    world.lives = world.lives.saturating_sub(1);
    let center = world.player.rect().center();
    world.spawn_burst(center, DEATH_COLOR, DEATH_BURST);
    events.died = true;

    if world.lives == 0 {
        log::info!("game over with score {}", world.score);
        world.enter_phase(GamePhase::GameOver);
        events.outcome = Some(RunOutcome::GameOver);
    } else {
        log::debug!("player died, {} lives left", world.lives);
        world.reset_player();
        world.respawn_enemies();
    }
}
