//! Ball and paddle simulation
//!
//! Gameplay logic only: no rendering, no input devices, no engine physics.
//! - Launch randomness comes from the session's seeded RNG
//! - Collisions arrive as typed [`CollisionEvent`]s from a [`PhysicsWorld`]

pub mod arena;
pub mod bounce;
pub mod state;
pub mod tick;

pub use arena::{Arena, NoCollisions, PhysicsWorld};
pub use bounce::{
    BallReset, HitResponse, apply_paddle_influence, paddle_influence, reflect_direction,
    reset_state, respond_to_hit, start_moving,
};
pub use state::{
    Ball, BallPhase, Camera, ColliderRole, CollisionEvent, GameEvent, GameSession,
    GameSessionBuilder, Paddle,
};
pub use tick::{TickInput, tick};
