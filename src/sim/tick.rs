//! Fixed timestep simulation tick
//!
//! Stage order is fixed: grid scroll, row lifecycle, shots, falling
//! bubbles, match/erase, detachment. Later stages read the grid as the
//! earlier ones left it.

use glam::Vec2;

use super::body::{BodyFate, FallingBody};
use super::collision::avatar_grid_collision;
use super::grid::Color;
use super::matcher::find_and_erase;
use super::spawner::RowSpawner;
use super::state::{GameEvent, SimState};
use super::support::detach_unsupported;
use super::{faller, projectile};
use crate::consts::ARENA_HEIGHT;
use crate::{aim_angle, arena_extent};

/// A shot requested this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Screen point the avatar aims at
    pub target: Vec2,
    pub color: Color,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire a shot from the avatar
    pub fire: Option<Shot>,
    /// Speed out one more row
    pub speed_row: bool,
}

/// Advance the simulation by one timestep and report what happened
pub fn tick<S: RowSpawner + ?Sized>(
    state: &mut SimState,
    spawner: &mut S,
    input: &TickInput,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.time_ticks += 1;

    apply_input(state, input);
    update_grid(state, spawner, dt, &mut events);
    update_bullets(state, dt, &mut events);
    update_droppers(state, dt, &mut events);
    delete_matches(state, &mut events);

    let loose = detach_unsupported(&mut state.grid);
    state.droppers.extend(loose);

    if state.score >= state.next_level_points {
        state.advance_level();
        spawner.on_level(state.level);
        events.push(GameEvent::LevelUp {
            level: state.level,
            next_level_points: state.next_level_points,
        });
    }

    events
}

fn apply_input(state: &mut SimState, input: &TickInput) {
    if let Some(shot) = input.fire {
        let origin = state.avatar.pos;
        let angle = aim_angle(origin, shot.target);
        state.bullets.push(FallingBody::shot(
            origin,
            angle,
            state.tuning.bullet_speed,
            shot.color,
            state.grid.width(),
        ));
    }
    if input.speed_row {
        state.speed_rows += 1;
    }
}

/// Scroll, test the avatar against the grid, then retire/spawn rows
fn update_grid<S: RowSpawner + ?Sized>(
    state: &mut SimState,
    spawner: &mut S,
    dt: f32,
    events: &mut Vec<GameEvent>,
) {
    let mut distance = state.grid.velocity * dt;
    if state.speed_rows > 0 {
        distance *= state.tuning.fast_row_multiplier;
    }
    state.grid.scroll(distance);

    if avatar_grid_collision(&state.grid, state.avatar.pos, state.avatar.radius) {
        events.push(GameEvent::AvatarHit);
    }

    if state.grid.retire_bottom_row_if_offscreen(ARENA_HEIGHT) {
        log::debug!("Bottom row retired, {} rows left", state.grid.len());
    }

    if let Some(row) = state.grid.spawn_top_row_if_needed() {
        spawner.fill_row(&mut row.cells);
        state.speed_rows = state.speed_rows.saturating_sub(1);
        log::debug!("Row spawned, {} fast rows pending", state.speed_rows);
    }
}

/// Move shots; lost shots cost points, touching shots join the grid
fn update_bullets(state: &mut SimState, dt: f32, events: &mut Vec<GameEvent>) {
    let extent = arena_extent();
    let mut lost = Vec::new();

    state.bullets.retain_mut(|bullet| {
        match projectile::resolve(bullet, &mut state.grid, extent, dt) {
            BodyFate::Active => true,
            BodyFate::Offscreen => {
                lost.push(bullet.pos);
                false
            }
            _ => false,
        }
    });

    for pos in lost {
        let value = state.penalize(state.tuning.lost_bullet_penalty);
        events.push(GameEvent::ShotLost { pos });
        events.push(GameEvent::ScoreAlert { pos, value });
    }
}

/// Move falling bubbles; they leave for points, strike the avatar, or land
fn update_droppers(state: &mut SimState, dt: f32, events: &mut Vec<GameEvent>) {
    let extent = arena_extent();
    let gravity = state.tuning.gravity;
    let (avatar_pos, avatar_radius) = (state.avatar.pos, state.avatar.radius);
    let mut outcomes = Vec::new();

    state.droppers.retain_mut(|dropper| {
        let fate = faller::resolve(
            dropper,
            &mut state.grid,
            avatar_pos,
            avatar_radius,
            extent,
            dt,
            gravity,
        );
        if fate.is_active() {
            return true;
        }
        outcomes.push((fate, dropper.pos));
        false
    });

    for (fate, pos) in outcomes {
        match fate {
            BodyFate::Offscreen => {
                let value = state.award(state.tuning.faller_reward);
                events.push(GameEvent::ScoreAlert { pos, value });
            }
            BodyFate::AvatarHit => {
                state.avatar.grow(state.tuning.hit_grow);
                events.push(GameEvent::BubbleHit { pos });
            }
            BodyFate::Landed { row, col } => {
                events.push(GameEvent::BubbleLanded { row, col });
            }
            BodyFate::Active => {}
        }
    }
}

/// Erase matched blobs and score the mixed ones
fn delete_matches(state: &mut SimState, events: &mut Vec<GameEvent>) {
    for combo in find_and_erase(&mut state.grid) {
        let bonus = combo.bonus(state.score, state.next_level_points);
        if combo.scores() {
            let value = state.award(bonus);
            events.push(GameEvent::ScoreAlert {
                pos: combo.anchor,
                value,
            });
        }
        log::debug!(
            "Combo: {} cells ({} shot, {} grid) for {} points",
            combo.cell_count,
            combo.bullet_cell_count,
            combo.bubble_cell_count,
            bonus
        );
        events.push(GameEvent::Combo {
            pos: combo.anchor,
            cells: combo.cell_count,
            bullet_cells: combo.bullet_cell_count,
            bubble_cells: combo.bubble_cell_count,
            bonus,
        });
    }
}
