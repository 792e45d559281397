// Scriptable session for unit tests: never terminates on its own, echoes a
// fixed observation and records what it was asked to do.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::{RawAction, Session, StepOutcome};
use crate::core::Result;
use crate::spaces::{RawDomain, Value};

pub(crate) struct StubSession {
    action: RawDomain,
    observation: RawDomain,
    observation_value: Value,
    cap: Option<u32>,
    pub closes: Rc<Cell<usize>>,
    pub actions: Rc<RefCell<Vec<RawAction>>>,
}

impl StubSession {
    pub fn continuous(cap: Option<u32>) -> Self {
        Self {
            action: RawDomain::boxed(vec![-1.0], vec![1.0]),
            observation: RawDomain::boxed(vec![-10.0, -10.0], vec![10.0, 10.0]),
            observation_value: Value::from(vec![0.5, -0.5]),
            cap,
            closes: Rc::new(Cell::new(0)),
            actions: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn discrete(cap: Option<u32>) -> Self {
        Self { action: RawDomain::discrete(3), ..Self::continuous(cap) }
    }

    pub fn with_action(mut self, action: RawDomain) -> Self {
        self.action = action;
        self
    }

    pub fn with_observation(mut self, observation: RawDomain, value: Value) -> Self {
        self.observation = observation;
        self.observation_value = value;
        self
    }
}

impl Session for StubSession {
    fn action_domain(&self) -> &RawDomain { &self.action }

    fn observation_domain(&self) -> &RawDomain { &self.observation }

    fn max_episode_steps(&self) -> Option<u32> { self.cap }

    fn reset(&mut self) -> Result<Value> { Ok(self.observation_value.clone()) }

    fn step(&mut self, action: RawAction) -> Result<StepOutcome> {
        self.actions.borrow_mut().push(action);
        Ok(StepOutcome { observation: self.observation_value.clone(), reward: 1.0, done: false })
    }

    fn seed(&mut self, seed: u64) -> Result<Vec<u64>> { Ok(vec![seed]) }

    fn close(&mut self) { self.closes.set(self.closes.get() + 1); }
}
