use crate::core::{GymError, InfoValue, Result, Step};

/// Info key set on the step that hits a step cap.
pub const TRUNCATED_KEY: &str = "TimeLimit.truncated";

/// Whether an episode may still take steps under its cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Exhausted,
}

/// Step counter enforcing a per-episode cap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EpisodeClock {
    max_steps: u32,
    elapsed: u32,
}

impl EpisodeClock {
    pub fn new(max_steps: u32) -> Result<Self> {
        if max_steps == 0 {
            return Err(GymError::InvalidConfiguration("max_episode_steps must be positive".into()));
        }
        Ok(Self { max_steps, elapsed: 0 })
    }

    pub fn max_steps(&self) -> u32 { self.max_steps }

    pub fn elapsed(&self) -> u32 { self.elapsed }

    pub fn state(&self) -> ClockState {
        if self.elapsed >= self.max_steps { ClockState::Exhausted } else { ClockState::Running }
    }

    pub fn reset(&mut self) { self.elapsed = 0; }

    /// Count `step` against the cap and mark it truncated once the cap is
    /// reached. The counter stops at the cap.
    pub fn record(&mut self, step: &mut Step) {
        if self.state() == ClockState::Running {
            self.elapsed += 1;
        }
        if self.state() == ClockState::Exhausted {
            step.info.insert(TRUNCATED_KEY, InfoValue::from(!step.terminated));
            if !step.terminated {
                step.truncated = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Info;
    use crate::spaces::Value;

    fn step(terminated: bool) -> Step {
        Step::new(Value::from(vec![0.0]), 0.0, terminated, false, Info::new())
    }

    #[test]
    fn runs_until_cap_then_stays_exhausted() {
        let mut clock = EpisodeClock::new(3).unwrap();
        for _ in 0..2 {
            let mut s = step(false);
            clock.record(&mut s);
            assert!(!s.done());
            assert_eq!(clock.state(), ClockState::Running);
        }
        let mut s = step(false);
        clock.record(&mut s);
        assert!(s.truncated);
        assert_eq!(s.info.get(TRUNCATED_KEY), Some(&InfoValue::Bool(true)));
        assert_eq!(clock.state(), ClockState::Exhausted);

        let mut again = step(false);
        clock.record(&mut again);
        assert!(again.done());
        assert_eq!(clock.elapsed(), 3);

        clock.reset();
        assert_eq!(clock.state(), ClockState::Running);
        assert_eq!(clock.elapsed(), 0);
    }

    #[test]
    fn natural_termination_on_the_cap_is_not_reported_as_truncation() {
        let mut clock = EpisodeClock::new(1).unwrap();
        let mut s = step(true);
        clock.record(&mut s);
        assert_eq!(s.info.get(TRUNCATED_KEY), Some(&InfoValue::Bool(false)));
        assert!(!s.truncated);
        assert!(s.done());
    }

    #[test]
    fn zero_cap_is_invalid() {
        assert!(matches!(EpisodeClock::new(0), Err(GymError::InvalidConfiguration(_))));
    }
}
