//! The unit of simulated work and what it produces.

use async_trait::async_trait;
use rand::rngs::StdRng;

/// A single simulated operation against a shared resource `R`.
///
/// Actions are stateless. Any randomness (ids, departments, search terms) is
/// drawn from the worker's own `rng`, so actions never share a generator.
/// `execute` performs exactly one round-trip; the engine maps `Ok` to
/// [`Outcome::Success`] carrying [`Action::label`] and any error to
/// [`Outcome::Failure`].
#[async_trait]
pub trait Action<R: ?Sized>: Send + Sync {
    /// Error returned when the round-trip fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Static, human-readable label reported on success.
    fn label(&self) -> &'static str;

    /// Run the action once against `resource`.
    async fn execute(&self, resource: &R, rng: &mut StdRng) -> Result<(), Self::Error>;
}

/// Result of one consumed job token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The action completed; carries its label.
    Success(&'static str),
    /// The action failed (error or timeout). Error kinds are not distinguished.
    Failure,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn label(&self) -> Option<&'static str> {
        match self {
            Outcome::Success(label) => Some(label),
            Outcome::Failure => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let ok = Outcome::Success("[Sys] Heartbeat");
        assert!(ok.is_success());
        assert_eq!(ok.label(), Some("[Sys] Heartbeat"));

        assert!(!Outcome::Failure.is_success());
        assert_eq!(Outcome::Failure.label(), None);
    }
}
