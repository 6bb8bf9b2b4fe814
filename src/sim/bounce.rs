//! Bounce model: collision response for the ball
//!
//! Pure functions. The physics world reports a hit (normal + what was hit),
//! these compute the ball's new direction and velocity.

use glam::Vec2;
use rand::Rng;

use super::state::{ColliderRole, CollisionEvent};
use crate::error::DomainError;
use crate::settings::BallTuning;

/// Mirror a direction about a surface normal and renormalize.
///
/// Standard reflection: d' = d - 2(d·n)n. A result too short to normalize
/// (zero direction, zero normal) comes back as `Vec2::ZERO`, meaning
/// "no direction".
#[inline]
pub fn reflect_direction(direction: Vec2, normal: Vec2) -> Vec2 {
    let n = normal.normalize_or_zero();
    (direction - 2.0 * direction.dot(n) * n).normalize_or_zero()
}

/// Skew a direction horizontally by how fast the paddle was moving.
///
/// influence = clamp(paddle_velocity / ball_velocity, -limit, limit) is added
/// to `direction.x` before renormalizing.
pub fn apply_paddle_influence(
    direction: Vec2,
    paddle_velocity: f32,
    ball_velocity: f32,
    limit: f32,
) -> Result<Vec2, DomainError> {
    if ball_velocity.abs() <= f32::EPSILON || !ball_velocity.is_finite() {
        return Err(DomainError::ZeroBallVelocity(ball_velocity));
    }
    let influence = paddle_influence(paddle_velocity, ball_velocity, limit);
    Ok(Vec2::new(direction.x + influence, direction.y).normalize_or_zero())
}

/// The clamped horizontal term added by [`apply_paddle_influence`]
#[inline]
pub fn paddle_influence(paddle_velocity: f32, ball_velocity: f32, limit: f32) -> f32 {
    (paddle_velocity / ball_velocity).clamp(-limit, limit)
}

/// Launch direction and speed.
///
/// Straight down with a uniform horizontal component in [-1, 1]. The direction
/// is deliberately left un-normalized, so diagonal launches travel faster than
/// vertical ones.
pub fn start_moving<R: Rng + ?Sized>(rng: &mut R, launch_speed: f32) -> (Vec2, f32) {
    let x = rng.random_range(-1.0..=1.0_f32);
    (Vec2::new(x, -1.0), launch_speed)
}

/// State of a ball sitting at the spawn point, waiting for launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallReset {
    pub position: Vec2,
    pub scale: f32,
    pub direction: Vec2,
    pub velocity: f32,
}

/// Spawn position, reduced scale, no motion
pub fn reset_state(tuning: &BallTuning) -> BallReset {
    BallReset {
        position: tuning.spawn_position,
        scale: tuning.spawn_scale,
        direction: Vec2::ZERO,
        velocity: 0.0,
    }
}

/// What a hit does to the ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitResponse {
    /// Ordinary surface: new direction
    Bounce(Vec2),
    /// Paddle: new direction, and whether the paddle's motion was applied
    PaddleBounce { direction: Vec2, influenced: bool },
    /// Hazard: the ball goes back to the spawn point
    Lost,
}

/// Compute the response to a single hit
pub fn respond_to_hit(
    direction: Vec2,
    velocity: f32,
    hit: &CollisionEvent,
    influence_limit: f32,
) -> HitResponse {
    let mirrored = reflect_direction(direction, hit.normal);

    match hit.role {
        ColliderRole::Hazard => HitResponse::Lost,
        ColliderRole::Wall | ColliderRole::Brick => HitResponse::Bounce(mirrored),
        ColliderRole::Paddle => {
            match apply_paddle_influence(mirrored, hit.other_velocity, velocity, influence_limit) {
                Ok(direction) => HitResponse::PaddleBounce {
                    direction,
                    influenced: true,
                },
                Err(e) => {
                    log::warn!("Skipping paddle influence: {}", e);
                    HitResponse::PaddleBounce {
                        direction: mirrored,
                        influenced: false,
                    }
                }
            }
        }
    }
}
