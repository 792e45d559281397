//! Native classic-control dynamics served through the `Session` contract.
//!
//! Neither session truncates episodes itself; the registered step cap is
//! reported through `max_episode_steps` and enforced by the base `GymEnv`.

use rand::distributions::{Distribution, Uniform};

use super::{RawAction, Session, StepOutcome};
use crate::core::{GymError, Result};
use crate::spaces::{RawDomain, Value};
use crate::utils::rng::{RngStream, rng_from_entropy, rng_from_seed};

/// MountainCarContinuous-v0.
/// Observation: [position, velocity]
/// Action: Box([-1.0], [1.0]), a throttle clipped to [-1, 1]
/// Reward: -0.1 * action^2 each step; +100 and terminate at the goal.
pub struct MountainCarContinuous {
    position: f64,
    velocity: f64,
    max_episode_steps: Option<u32>,
    rng: RngStream,
    action_domain: RawDomain,
    observation_domain: RawDomain,
}

impl MountainCarContinuous {
    const MIN_POSITION: f64 = -1.2;
    const MAX_POSITION: f64 = 0.6;
    const MAX_SPEED: f64 = 0.07;
    const GOAL_POSITION: f64 = 0.45;
    const POWER: f64 = 0.0015;
    const GRAVITY: f64 = 0.0025;

    pub fn new(max_episode_steps: Option<u32>) -> Self {
        Self {
            position: -0.5,
            velocity: 0.0,
            max_episode_steps,
            rng: rng_from_entropy(),
            action_domain: RawDomain::boxed(vec![-1.0], vec![1.0]),
            observation_domain: RawDomain::boxed(
                vec![Self::MIN_POSITION, -Self::MAX_SPEED],
                vec![Self::MAX_POSITION, Self::MAX_SPEED],
            ),
        }
    }

    fn obs(&self) -> Value { Value::from(vec![self.position, self.velocity]) }
}

impl Session for MountainCarContinuous {
    fn action_domain(&self) -> &RawDomain { &self.action_domain }

    fn observation_domain(&self) -> &RawDomain { &self.observation_domain }

    fn max_episode_steps(&self) -> Option<u32> { self.max_episode_steps }

    fn reset(&mut self) -> Result<Value> {
        self.position = Uniform::new_inclusive(-0.6, -0.4).sample(&mut self.rng);
        self.velocity = 0.0;
        Ok(self.obs())
    }

    fn step(&mut self, action: RawAction) -> Result<StepOutcome> {
        let a = match action {
            RawAction::Continuous(v) if v.len() == 1 => v[0].clamp(-1.0, 1.0),
            other => return Err(GymError::Backend(format!("MountainCarContinuous expects one throttle value, got {other:?}"))),
        };
        self.velocity += a * Self::POWER - Self::GRAVITY * (3.0 * self.position).cos();
        self.velocity = self.velocity.clamp(-Self::MAX_SPEED, Self::MAX_SPEED);
        self.position = (self.position + self.velocity).clamp(Self::MIN_POSITION, Self::MAX_POSITION);
        if self.position <= Self::MIN_POSITION && self.velocity < 0.0 { self.velocity = 0.0; }

        let done = self.position >= Self::GOAL_POSITION;
        let mut reward = -0.1 * a * a;
        if done { reward += 100.0; }
        Ok(StepOutcome { observation: self.obs(), reward, done })
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> {
        self.rng = rng_from_seed(seed);
        Ok(vec![seed])
    }

    fn close(&mut self) {}
}

/// CartPole-v1.
/// Observation: [x, x_dot, theta, theta_dot]
/// Action: Discrete(2) {0: push left, 1: push right}
/// Reward: 1.0 per step until the pole falls or the cart leaves the track.
pub struct CartPole {
    state: [f64; 4],
    max_episode_steps: Option<u32>,
    rng: RngStream,
    action_domain: RawDomain,
    observation_domain: RawDomain,
}

impl CartPole {
    const GRAVITY: f64 = 9.8;
    const MASS_POLE: f64 = 0.1;
    const TOTAL_MASS: f64 = 1.1;
    // Half the pole's length.
    const LENGTH: f64 = 0.5;
    const POLEMASS_LENGTH: f64 = Self::MASS_POLE * Self::LENGTH;
    const FORCE_MAG: f64 = 10.0;
    const TAU: f64 = 0.02;
    const X_THRESHOLD: f64 = 2.4;

    pub fn new(max_episode_steps: Option<u32>) -> Self {
        let theta_threshold = Self::theta_threshold();
        let high = vec![Self::X_THRESHOLD * 2.0, f64::INFINITY, theta_threshold * 2.0, f64::INFINITY];
        let low = high.iter().map(|h| -h).collect();
        Self {
            state: [0.0; 4],
            max_episode_steps,
            rng: rng_from_entropy(),
            action_domain: RawDomain::discrete(2),
            observation_domain: RawDomain::boxed(low, high),
        }
    }

    fn theta_threshold() -> f64 { 12.0_f64.to_radians() }

    fn obs(&self) -> Value { Value::from(self.state.to_vec()) }

    fn fallen(&self) -> bool {
        let [x, _, theta, _] = self.state;
        x.abs() > Self::X_THRESHOLD || theta.abs() > Self::theta_threshold()
    }
}

impl Session for CartPole {
    fn action_domain(&self) -> &RawDomain { &self.action_domain }

    fn observation_domain(&self) -> &RawDomain { &self.observation_domain }

    fn max_episode_steps(&self) -> Option<u32> { self.max_episode_steps }

    fn reset(&mut self) -> Result<Value> {
        // small uniform noise in [-0.05, 0.05]
        let uni = Uniform::new_inclusive(-0.05, 0.05);
        for s in &mut self.state {
            *s = uni.sample(&mut self.rng);
        }
        Ok(self.obs())
    }

    fn step(&mut self, action: RawAction) -> Result<StepOutcome> {
        let force = match action {
            RawAction::Discrete(1) => Self::FORCE_MAG,
            RawAction::Discrete(0) => -Self::FORCE_MAG,
            other => return Err(GymError::Backend(format!("CartPole expects action 0 or 1, got {other:?}"))),
        };
        let [x, x_dot, theta, theta_dot] = self.state;
        let (sin_theta, cos_theta) = theta.sin_cos();

        // same equations as Gymnasium
        let temp = (force + Self::POLEMASS_LENGTH * theta_dot.powi(2) * sin_theta) / Self::TOTAL_MASS;
        let theta_acc = (Self::GRAVITY * sin_theta - cos_theta * temp)
            / (Self::LENGTH * (4.0 / 3.0 - Self::MASS_POLE * cos_theta.powi(2) / Self::TOTAL_MASS));
        let x_acc = temp - Self::POLEMASS_LENGTH * theta_acc * cos_theta / Self::TOTAL_MASS;

        // Euler integration
        self.state = [
            x + Self::TAU * x_dot,
            x_dot + Self::TAU * x_acc,
            theta + Self::TAU * theta_dot,
            theta_dot + Self::TAU * theta_acc,
        ];

        Ok(StepOutcome { observation: self.obs(), reward: 1.0, done: self.fallen() })
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> {
        self.rng = rng_from_seed(seed);
        Ok(vec![seed])
    }

    fn close(&mut self) {}
}
