//! Headless play field
//!
//! Stands in for the physics world when there is no engine: two side walls, a
//! ceiling, a hazard floor and the paddle as a box. Contacts are only reported
//! while the ball is moving into the surface, so a ball that is still touching
//! after a bounce is not hit twice.

use glam::Vec2;

use super::state::{Ball, ColliderRole, CollisionEvent, Paddle};
use crate::settings::{ArenaTuning, BallTuning};

/// Source of collision events for a tick
pub trait PhysicsWorld {
    /// Contacts for the ball's current position
    fn detect_hits(&mut self, ball: &Ball, paddle: &Paddle) -> Vec<CollisionEvent>;
}

/// A world with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollisions;

impl PhysicsWorld for NoCollisions {
    fn detect_hits(&mut self, _ball: &Ball, _paddle: &Paddle) -> Vec<CollisionEvent> {
        Vec::new()
    }
}

/// Rectangular arena centered on the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub half_width: f32,
    pub top: f32,
    pub hazard_y: f32,
    pub ball_base_radius: f32,
}

impl Arena {
    pub fn new(arena: &ArenaTuning, ball: &BallTuning) -> Self {
        Self {
            half_width: arena.ortho_width / 2.0,
            top: arena.top,
            hazard_y: arena.hazard_y,
            ball_base_radius: ball.base_radius,
        }
    }

    fn wall(normal: Vec2) -> CollisionEvent {
        CollisionEvent {
            normal,
            role: ColliderRole::Wall,
            other_velocity: 0.0,
        }
    }
}

impl PhysicsWorld for Arena {
    fn detect_hits(&mut self, ball: &Ball, paddle: &Paddle) -> Vec<CollisionEvent> {
        let mut hits = Vec::new();
        if ball.velocity <= 0.0 {
            return hits;
        }

        let r = self.ball_base_radius * ball.scale;
        let p = ball.position;
        let d = ball.direction;

        // Hazard wins over everything else
        if p.y - r <= self.hazard_y {
            hits.push(CollisionEvent {
                normal: Vec2::Y,
                role: ColliderRole::Hazard,
                other_velocity: 0.0,
            });
            return hits;
        }

        if p.x - r <= -self.half_width && d.x < 0.0 {
            hits.push(Self::wall(Vec2::X));
        } else if p.x + r >= self.half_width && d.x > 0.0 {
            hits.push(Self::wall(Vec2::NEG_X));
        }

        if p.y + r >= self.top && d.y > 0.0 {
            hits.push(Self::wall(Vec2::NEG_Y));
        }

        let offset = p - paddle.position;
        let over_paddle = offset.x.abs() <= paddle.half_width + r;
        let touching = offset.y.abs() <= paddle.half_height + r;
        if over_paddle && touching && offset.y > 0.0 && d.y < 0.0 {
            hits.push(CollisionEvent {
                normal: Vec2::Y,
                role: ColliderRole::Paddle,
                other_velocity: paddle.velocity,
            });
        }

        hits
    }
}
