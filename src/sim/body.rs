//! Free-moving bubbles: player shots and detached droppers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::Color;
use crate::{angle_to_direction, column_at};

/// Kinematics of a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// Player shot: straight line at constant speed
    Shot,
    /// Detached bubble: falls straight down, accelerating
    Dropper,
}

/// Where a body ended up after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyFate {
    Active,
    Offscreen,
    AvatarHit,
    /// Re-occupied the grid cell at (row, col)
    Landed { row: usize, col: usize },
}

impl BodyFate {
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, BodyFate::Active)
    }
}

/// A bubble moving independently of the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Color,
    /// Grid column the body is tested against when landing
    pub column: usize,
    pub kind: BodyKind,
}

impl FallingBody {
    /// A shot fired from `origin` at `angle` (radians, y up)
    pub fn shot(origin: Vec2, angle: f32, speed: f32, color: Color, width: usize) -> Self {
        Self {
            pos: origin,
            vel: angle_to_direction(angle) * speed,
            color,
            column: column_at(origin.x, width).unwrap_or(0),
            kind: BodyKind::Shot,
        }
    }

    /// A detached bubble at rest at `pos`
    pub fn dropper(pos: Vec2, color: Color, column: usize) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            color,
            column,
            kind: BodyKind::Dropper,
        }
    }

    /// Integrate one step. Droppers pick up gravity before moving.
    pub fn advance(&mut self, dt: f32, gravity: f32) {
        if self.kind == BodyKind::Dropper {
            self.vel.y += gravity * dt;
        }
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_shot_moves_at_constant_speed() {
        let mut shot = FallingBody::shot(Vec2::new(100.0, 500.0), FRAC_PI_2, 600.0, Color(0), 20);
        for _ in 0..10 {
            shot.advance(0.01, 1000.0);
        }
        assert!((shot.vel.length() - 600.0).abs() < 0.01);
        assert!((shot.pos.y - 440.0).abs() < 0.01);
        assert!((shot.pos.x - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_dropper_accelerates() {
        let mut body = FallingBody::dropper(Vec2::new(50.0, 50.0), Color(1), 1);
        body.advance(0.5, 100.0);
        assert!((body.vel.y - 50.0).abs() < 0.001);
        assert!((body.pos.y - 75.0).abs() < 0.001);
        body.advance(0.5, 100.0);
        assert!((body.vel.y - 100.0).abs() < 0.001);
        assert!((body.pos.y - 125.0).abs() < 0.001);
        assert_eq!(body.pos.x, 50.0);
    }
}
