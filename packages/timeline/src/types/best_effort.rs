//! Best-effort results for non-fatal collaborators.
//!
//! Generation and image fetches never abort a request. Rather than
//! collapsing a failed call into an empty collection at the adapter
//! boundary, adapters return [`BestEffort`] so callers can tell
//! "found nothing" apart from "the call failed".

/// Outcome of a best-effort call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BestEffort<T> {
    /// The call succeeded (the value may still be empty).
    Ok(T),

    /// The call failed or returned unusable output.
    Degraded { reason: String },
}

impl<T> BestEffort<T> {
    pub fn degraded(reason: impl std::fmt::Display) -> Self {
        Self::Degraded {
            reason: reason.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The degradation reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::Degraded { reason } => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> BestEffort<U> {
        match self {
            Self::Ok(value) => BestEffort::Ok(f(value)),
            Self::Degraded { reason } => BestEffort::Degraded { reason },
        }
    }
}

impl<T: Default> BestEffort<T> {
    /// The value, or `T::default()` when degraded.
    pub fn into_value(self) -> T {
        match self {
            Self::Ok(value) => value,
            Self::Degraded { .. } => T::default(),
        }
    }
}

impl<T, E: std::fmt::Display> From<std::result::Result<T, E>> for BestEffort<T> {
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ok(value),
            Err(e) => Self::degraded(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_collapses_to_default() {
        let outcome: BestEffort<Vec<u8>> = BestEffort::degraded("timeout");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.reason(), Some("timeout"));
        assert!(outcome.into_value().is_empty());
    }

    #[test]
    fn test_ok_empty_is_not_degraded() {
        let outcome: BestEffort<Vec<u8>> = BestEffort::Ok(vec![]);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.reason(), None);
    }

    #[test]
    fn test_from_result() {
        let failed: BestEffort<u32> = Err::<u32, _>("boom").into();
        assert_eq!(failed.reason(), Some("boom"));

        let ok: BestEffort<u32> = Ok::<_, String>(3).into();
        assert_eq!(ok.map(|n| n * 2), BestEffort::Ok(6));
    }
}
