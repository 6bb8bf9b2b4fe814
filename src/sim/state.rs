//! Session state and core simulation types
//!
//! A round is a [`GameSession`] built once from explicit parts (camera,
//! paddle, ball). Nothing is looked up at runtime.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::bounce::{self, HitResponse};
use crate::error::ConfigurationError;
use crate::interp_to;
use crate::settings::{BallTuning, PaddleTuning, Settings};

/// Where the ball is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallPhase {
    /// At the spawn point, waiting for launch
    Idle,
    /// Launched and moving
    InMotion,
}

/// What the ball collided with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderRole {
    Paddle,
    /// Out-of-bounds surface; touching it loses the ball
    Hazard,
    Wall,
    Brick,
}

/// A hit reported by the physics world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    /// Surface normal at the contact
    pub normal: Vec2,
    pub role: ColliderRole,
    /// Signed horizontal velocity of the other body (paddle velocity for paddle hits)
    pub other_velocity: f32,
}

/// Things that happened during a tick, drained by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Launched { direction: Vec2, velocity: f32 },
    Bounced { role: ColliderRole },
    PaddleHit { influenced: bool },
    BallLost,
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub position: Vec2,
    pub scale: f32,
    /// Travel direction; unit or zero after any bounce
    pub direction: Vec2,
    /// Speed, never negative
    pub velocity: f32,
}

impl Ball {
    /// A ball waiting at the spawn point
    pub fn new(tuning: &BallTuning) -> Self {
        let mut ball = Self {
            position: Vec2::ZERO,
            scale: 1.0,
            direction: Vec2::ZERO,
            velocity: 0.0,
        };
        ball.reset(tuning);
        ball
    }

    pub fn phase(&self) -> BallPhase {
        if self.velocity > 0.0 {
            BallPhase::InMotion
        } else {
            BallPhase::Idle
        }
    }

    /// Collision radius at the current scale
    pub fn radius(&self, tuning: &BallTuning) -> f32 {
        tuning.base_radius * self.scale
    }

    /// Return to the spawn point with no motion
    pub fn reset(&mut self, tuning: &BallTuning) {
        let r = bounce::reset_state(tuning);
        self.position = r.position;
        self.scale = r.scale;
        self.direction = r.direction;
        self.velocity = r.velocity;
    }

    /// Launch from wherever the ball is, with a fresh random direction
    pub fn start_moving(&mut self, rng: &mut Pcg32, tuning: &BallTuning) {
        let (direction, velocity) = bounce::start_moving(rng, tuning.launch_speed);
        self.direction = direction;
        self.velocity = velocity;
    }

    /// Advance position by one frame
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.direction * self.velocity * dt;
    }

    /// Apply a hit. Returns the response that was applied.
    pub fn on_hit(&mut self, hit: &CollisionEvent, tuning: &BallTuning) -> HitResponse {
        let response =
            bounce::respond_to_hit(self.direction, self.velocity, hit, tuning.influence_limit);
        match response {
            HitResponse::Bounce(direction) | HitResponse::PaddleBounce { direction, .. } => {
                self.direction = direction;
            }
            HitResponse::Lost => self.reset(tuning),
        }
        response
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub position: Vec2,
    /// Unit axis the paddle slides along
    pub forward: Vec2,
    /// Last input axis times movement speed (signed)
    pub velocity: f32,
    /// Max absolute horizontal offset from the origin
    pub boundary_limit: f32,
    pub movement_speed: f32,
    pub interp_rate: f32,
    pub half_width: f32,
    pub half_height: f32,
}

impl Paddle {
    pub fn new(tuning: &PaddleTuning) -> Self {
        Self {
            position: Vec2::new(0.0, tuning.start_y),
            forward: Vec2::X,
            velocity: 0.0,
            boundary_limit: f32::INFINITY,
            movement_speed: tuning.movement_speed,
            interp_rate: tuning.interp_rate,
            half_width: tuning.half_width,
            half_height: tuning.half_height,
        }
    }

    pub fn set_boundary_limit(&mut self, limit: f32) {
        self.boundary_limit = limit.max(0.0);
        self.position.x = self.position.x.clamp(-self.boundary_limit, self.boundary_limit);
    }

    /// Move from an input axis value. Returns the new position.
    pub fn move_axis(&mut self, axis: f32, dt: f32) -> Vec2 {
        let axis = if axis.is_finite() { axis.clamp(-1.0, 1.0) } else { 0.0 };
        self.velocity = axis * self.movement_speed;

        let target = self.position + self.forward * self.velocity * dt;
        let mut next = interp_to(self.position, target, dt, self.interp_rate);
        next.x = next.x.clamp(-self.boundary_limit, self.boundary_limit);

        self.position = next;
        next
    }
}

/// Orthographic top-down camera; only its width matters to gameplay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub ortho_width: f32,
}

/// Everything a running round needs
#[derive(Debug, Clone)]
pub struct GameSession {
    pub camera: Camera,
    pub paddle: Paddle,
    pub ball: Ball,
    pub ball_tuning: BallTuning,
    /// Launch RNG
    pub rng: Pcg32,
    /// Frames ticked so far
    pub frame: u64,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Start assembling a session with the given tuning
    pub fn builder(settings: &Settings) -> GameSessionBuilder {
        GameSessionBuilder {
            seed: settings.seed,
            ball_tuning: settings.ball,
            boundary_margin: settings.paddle.boundary_margin,
            camera: None,
            paddle: None,
            ball: None,
        }
    }

    /// Build a session with default parts from settings
    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigurationError> {
        Self::builder(settings)
            .camera(Camera {
                ortho_width: settings.arena.ortho_width,
            })
            .paddle(Paddle::new(&settings.paddle))
            .ball(Ball::new(&settings.ball))
            .build()
    }

    /// Launch trigger
    pub fn launch(&mut self) {
        self.ball.start_moving(&mut self.rng, &self.ball_tuning);
        log::info!(
            "Ball launched: direction ({:.3}, {:.3}) speed {}",
            self.ball.direction.x,
            self.ball.direction.y,
            self.ball.velocity
        );
        self.events.push(GameEvent::Launched {
            direction: self.ball.direction,
            velocity: self.ball.velocity,
        });
    }

    /// Physics notified the ball of a hit
    pub fn notify_hit(&mut self, hit: CollisionEvent) {
        log::debug!("Ball hit {:?} with normal {:?}", hit.role, hit.normal);
        match self.ball.on_hit(&hit, &self.ball_tuning) {
            HitResponse::Bounce(_) => self.events.push(GameEvent::Bounced { role: hit.role }),
            HitResponse::PaddleBounce { influenced, .. } => {
                self.events.push(GameEvent::PaddleHit { influenced })
            }
            HitResponse::Lost => {
                log::info!("Ball lost, back to spawn");
                self.events.push(GameEvent::BallLost);
            }
        }
    }

    /// Collision event for a paddle contact with the paddle's current velocity
    pub fn paddle_hit(&self, normal: Vec2) -> CollisionEvent {
        CollisionEvent {
            normal,
            role: ColliderRole::Paddle,
            other_velocity: self.paddle.velocity,
        }
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Collects the parts of a round; fails if any is missing
#[derive(Debug, Clone)]
pub struct GameSessionBuilder {
    seed: u64,
    ball_tuning: BallTuning,
    boundary_margin: f32,
    camera: Option<Camera>,
    paddle: Option<Paddle>,
    ball: Option<Ball>,
}

impl GameSessionBuilder {
    pub fn camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn paddle(mut self, paddle: Paddle) -> Self {
        self.paddle = Some(paddle);
        self
    }

    pub fn ball(mut self, ball: Ball) -> Self {
        self.ball = Some(ball);
        self
    }

    /// Wire the parts together and give the paddle its travel limit
    pub fn build(self) -> Result<GameSession, ConfigurationError> {
        let result = self.try_build();
        if let Err(e) = &result {
            log::error!("Failed to start round: {}", e);
        }
        result
    }

    fn try_build(self) -> Result<GameSession, ConfigurationError> {
        let camera = self.camera.ok_or(ConfigurationError::MissingCamera)?;
        let mut paddle = self.paddle.ok_or(ConfigurationError::MissingPaddle)?;
        let ball = self.ball.ok_or(ConfigurationError::MissingBall)?;

        let limit = camera.ortho_width / 2.0 - self.boundary_margin;
        if !(limit > 0.0) {
            return Err(ConfigurationError::NoPaddleTravel(camera.ortho_width));
        }
        paddle.set_boundary_limit(limit);

        Ok(GameSession {
            camera,
            paddle,
            ball,
            ball_tuning: self.ball_tuning,
            rng: Pcg32::seed_from_u64(self.seed),
            frame: 0,
            events: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn session() -> GameSession {
        GameSession::from_settings(&Settings::default()).unwrap()
    }

    #[test]
    fn test_new_ball_is_idle_at_spawn() {
        let ball = Ball::new(&BallTuning::default());
        assert_eq!(ball.phase(), BallPhase::Idle);
        assert_eq!(ball.position, Vec2::new(0.0, 370.0));
        assert_eq!(ball.scale, 0.3);
    }

    #[test]
    fn test_builder_sets_boundary_from_camera() {
        let s = session();
        assert_eq!(s.paddle.boundary_limit, 1536.0 / 2.0 - 48.0);
    }

    #[test]
    fn test_builder_requires_every_part() {
        let settings = Settings::default();
        let err = GameSession::builder(&settings)
            .paddle(Paddle::new(&settings.paddle))
            .ball(Ball::new(&settings.ball))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingCamera);

        let err = GameSession::builder(&settings)
            .camera(Camera { ortho_width: 1000.0 })
            .ball(Ball::new(&settings.ball))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingPaddle);

        let err = GameSession::builder(&settings)
            .camera(Camera { ortho_width: 1000.0 })
            .paddle(Paddle::new(&settings.paddle))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::MissingBall);
    }

    #[test]
    fn test_builder_rejects_narrow_camera() {
        let settings = Settings::default();
        let err = GameSession::builder(&settings)
            .camera(Camera { ortho_width: 90.0 })
            .paddle(Paddle::new(&settings.paddle))
            .ball(Ball::new(&settings.ball))
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigurationError::NoPaddleTravel(90.0));
    }

    #[test]
    fn test_launch_twice_redraws_direction() {
        let mut s = session();
        s.launch();
        let first = s.ball.direction;
        assert_eq!(s.ball.phase(), BallPhase::InMotion);
        assert_eq!(s.ball.velocity, 300.0);

        // Mid-flight relaunch is allowed
        s.ball.direction = Vec2::new(0.6, 0.8);
        s.ball.velocity = 123.0;
        s.launch();
        assert_eq!(s.ball.velocity, 300.0);
        assert_eq!(s.ball.direction.y, -1.0);
        assert!((-1.0..=1.0).contains(&s.ball.direction.x));
        assert_ne!(s.ball.direction.x, first.x);
        assert_eq!(s.drain_events().len(), 2);
    }

    #[test]
    fn test_hazard_hit_returns_to_idle() {
        let mut s = session();
        s.launch();
        s.ball.integrate(1.0);
        s.notify_hit(CollisionEvent {
            normal: Vec2::Y,
            role: ColliderRole::Hazard,
            other_velocity: 0.0,
        });
        assert_eq!(s.ball.phase(), BallPhase::Idle);
        assert_eq!(s.ball.direction, Vec2::ZERO);
        assert_eq!(s.ball.position, Vec2::new(0.0, 370.0));
        assert!(s.drain_events().contains(&GameEvent::BallLost));
    }

    #[test]
    fn test_wall_hit_stays_in_motion() {
        let mut s = session();
        s.launch();
        s.notify_hit(CollisionEvent {
            normal: Vec2::Y,
            role: ColliderRole::Wall,
            other_velocity: 0.0,
        });
        assert_eq!(s.ball.phase(), BallPhase::InMotion);
        assert!(s.ball.direction.y > 0.0);
        assert!((s.ball.direction.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_paddle_hit_uses_paddle_velocity() {
        let mut s = session();
        s.launch();
        s.ball.direction = Vec2::new(0.0, -1.0);
        s.paddle.move_axis(1.0, SIM_DT);
        let hit = s.paddle_hit(Vec2::Y);
        assert_eq!(hit.other_velocity, 600.0);

        s.notify_hit(hit);
        // 600 / 300 clamps to 0.75
        assert!((s.ball.direction - Vec2::new(0.75, 1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_move_axis_clamps_input_and_updates_velocity() {
        let mut paddle = Paddle::new(&PaddleTuning::default());
        paddle.move_axis(5.0, SIM_DT);
        assert_eq!(paddle.velocity, 600.0);
        paddle.move_axis(-0.5, SIM_DT);
        assert_eq!(paddle.velocity, -300.0);
        paddle.move_axis(f32::NAN, SIM_DT);
        assert_eq!(paddle.velocity, 0.0);
    }

    #[test]
    fn test_move_axis_interpolates_toward_target() {
        let mut paddle = Paddle::new(&PaddleTuning::default());
        let dt = 0.05;
        let pos = paddle.move_axis(1.0, dt);
        // Target is 600 * 0.05 = 30 ahead; rate 10 * dt 0.05 covers half of it
        assert!((pos.x - 15.0).abs() < 1e-4);
        assert_eq!(pos.y, PaddleTuning::default().start_y);
    }

    #[test]
    fn test_move_axis_respects_boundary() {
        let mut paddle = Paddle::new(&PaddleTuning::default());
        paddle.set_boundary_limit(100.0);
        for _ in 0..1000 {
            paddle.move_axis(1.0, SIM_DT);
        }
        assert_eq!(paddle.position.x, 100.0);
        for _ in 0..2000 {
            paddle.move_axis(-1.0, SIM_DT);
        }
        assert_eq!(paddle.position.x, -100.0);
    }
}
