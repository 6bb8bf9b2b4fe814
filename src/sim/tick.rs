//! Per-frame simulation tick
//!
//! Order within a frame: input (paddle, launch), ball integration, then the
//! world's collision reports.

use super::arena::PhysicsWorld;
use super::state::{BallPhase, GameSession};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Horizontal axis from the input device, if it changed this frame
    pub move_axis: Option<f32>,
    /// Launch trigger (release of the launch key)
    pub launch: bool,
    /// Idle/demo mode - the paddle follows the ball and serves by itself
    pub idle_mode: bool,
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, input: &TickInput, dt: f32, world: &mut dyn PhysicsWorld) {
    let mut input = input.clone();
    if input.idle_mode {
        if session.ball.phase() == BallPhase::Idle {
            input.launch = true;
        }
        // Steer toward the ball, full speed once it is a paddle-width away
        let offset = session.ball.position.x - session.paddle.position.x;
        let reach = session.paddle.half_width.max(1.0);
        input.move_axis = Some((offset / reach).clamp(-1.0, 1.0));
    }

    session.frame += 1;

    if let Some(axis) = input.move_axis {
        session.paddle.move_axis(axis, dt);
    }

    if input.launch {
        session.launch();
    }

    session.ball.integrate(dt);

    for hit in world.detect_hits(&session.ball, &session.paddle) {
        session.notify_hit(hit);
    }
}
