// Roll out random actions through a wrapped classic-control environment.
//
//   RUST_LOG=gym_bridge=debug cargo run --example random_rollout

use gym_bridge::{ClipAction, Env, FlattenObservation, Gym, NativeBackend, RescaleAction, TimeLimit};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let mut gym = Gym::init(NativeBackend::with_classic_control());
    let env = gym.make("MountainCarContinuous-v0")?;
    let env = TimeLimit::alter_default(env, 200)?;
    let env = RescaleAction::new(env, 0.0, 1.0)?;
    let env = ClipAction::new(env)?;
    let mut env = FlattenObservation::new(env)?;
    info!(env = env.name(), max_steps = ?env.max_episode_steps(), "created");

    let mut actions = env.action_space().clone();
    actions.seed(42);
    env.seed(42)?;

    for episode in 0..3 {
        env.reset()?;
        let mut ret = 0.0;
        let mut len = 0u32;
        loop {
            let action = actions.sample().concat();
            let step = env.step(&action)?;
            ret += step.reward;
            len += 1;
            if step.done() {
                info!(episode, ret, len, truncated = step.truncated, final_obs = ?step.observation, "episode finished");
                break;
            }
        }
    }

    env.close();
    gym.shutdown();
    Ok(())
}
