pub mod core;
pub mod spaces;
pub mod utils;
pub mod env;
pub mod backend;
pub mod wrappers;

pub use crate::core::{Env, GymError, Info, InfoValue, Result, Step};
pub use crate::spaces::{BoxSpace, Dict, Discrete, Interval, RawAttr, RawDomain, Space, Tuple, Value, Vector, flatten, unflatten};
pub use crate::env::{ClockState, EpisodeClock, GymEnv, TRUNCATED_KEY};
pub use crate::backend::{Backend, EnvSpec, Gym, NativeBackend, RawAction, Session, StepOutcome};
pub use crate::wrappers::{ClipAction, FilterObservation, FlattenObservation, RescaleAction, TimeLimit, WrapError, WrapResult};
