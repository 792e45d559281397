// Wrappers: decorators composed over an Env, each altering one capability.
//
// Provided wrappers:
// - ClipAction
// - RescaleAction
// - FilterObservation
// - FlattenObservation
// - TimeLimit

mod clip_action;
mod filter_observation;
mod flatten_observation;
mod rescale_action;
mod time_limit;

pub use clip_action::ClipAction;
pub use filter_observation::FilterObservation;
pub use flatten_observation::FlattenObservation;
pub use rescale_action::RescaleAction;
pub use time_limit::TimeLimit;

use std::fmt;

use crate::core::GymError;

/// A failed wrap: the reason plus the untouched inner environment.
///
/// Ownership of the inner environment goes back to the caller, who stays
/// responsible for closing it. Converting into `GymError` drops it, which
/// releases the underlying session.
pub struct WrapError<E> {
    error: GymError,
    inner: E,
}

impl<E> WrapError<E> {
    pub fn new(error: GymError, inner: E) -> Self { Self { error, inner } }

    pub fn error(&self) -> &GymError { &self.error }

    pub fn into_inner(self) -> E { self.inner }

    pub fn into_parts(self) -> (GymError, E) { (self.error, self.inner) }
}

impl<E> fmt::Debug for WrapError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrapError").field("error", &self.error).finish_non_exhaustive()
    }
}

impl<E> fmt::Display for WrapError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.error.fmt(f) }
}

impl<E> std::error::Error for WrapError<E> {}

impl<E> From<WrapError<E>> for GymError {
    fn from(e: WrapError<E>) -> Self { e.error }
}

/// Result of constructing wrapper `W` over inner environment `E`.
pub type WrapResult<W, E> = std::result::Result<W, WrapError<E>>;

/// Run a borrow-only check against `inner`, handing `inner` back on failure.
pub(crate) fn checked<E, T>(inner: E, check: impl FnOnce(&E) -> crate::core::Result<T>) -> WrapResult<(E, T), E> {
    match check(&inner) {
        Ok(t) => Ok((inner, t)),
        Err(e) => Err(WrapError::new(e, inner)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::stub::StubSession;
    use crate::core::Env;
    use crate::env::GymEnv;

    #[test]
    fn wrap_error_returns_the_inner_env() {
        let stub = StubSession::continuous(None);
        let closes = stub.closes.clone();
        let env = GymEnv::new(Box::new(stub), "Stub").unwrap();
        let err = FilterObservation::new(env, ["a"]).err().unwrap();
        assert!(matches!(err.error(), GymError::WrapperPrecondition(_)));
        assert!(err.to_string().starts_with("Wrapper precondition failed"));

        let (_, mut env) = err.into_parts();
        assert_eq!(closes.get(), 0);
        assert!(env.reset().is_ok());
        env.close();
        assert_eq!(closes.get(), 1);
    }

    #[test]
    fn converting_to_gym_error_releases_the_env() {
        let stub = StubSession::discrete(None);
        let closes = stub.closes.clone();
        let env = GymEnv::new(Box::new(stub), "Stub").unwrap();
        let err: GymError = ClipAction::new(env).err().unwrap().into();
        assert!(matches!(err, GymError::WrapperPrecondition(_)));
        assert_eq!(closes.get(), 1);
    }
}
