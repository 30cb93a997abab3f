//! Success/error continuations over gateway results.
//!
//! UI callers that want to react to both branches use [`OutcomeExt::deliver`];
//! callers that only need an audit trail use [`OutcomeExt::log_outcome`].

use std::fmt::Display;

use crate::error::DevicePolicyError;

/// Continuation helpers for `Result<T, DevicePolicyError>`.
pub trait OutcomeExt<T> {
    /// Invokes exactly one of `on_success` or `on_error`.
    fn deliver<S, E>(self, on_success: S, on_error: E)
    where
        S: FnOnce(T),
        E: FnOnce(DevicePolicyError);

    /// Logs the outcome and keeps the success value.
    ///
    /// Success is logged at debug as `<description> succeeded`, failure at
    /// warn as `<description> failed` with the error attached.
    fn log_outcome(self, description: impl Display) -> Option<T>;
}

impl<T> OutcomeExt<T> for Result<T, DevicePolicyError> {
    fn deliver<S, E>(self, on_success: S, on_error: E)
    where
        S: FnOnce(T),
        E: FnOnce(DevicePolicyError),
    {
        match self {
            Ok(value) => on_success(value),
            Err(e) => on_error(e),
        }
    }

    fn log_outcome(self, description: impl Display) -> Option<T> {
        let mut kept = None;
        self.deliver(
            |value| {
                tracing::debug!("{description} succeeded");
                kept = Some(value);
            },
            |e| tracing::warn!(error = %e, "{description} failed"),
        );
        kept
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::error::CallSignature;

    fn rejected() -> Result<(), DevicePolicyError> {
        Err(DevicePolicyError::FailedOperation {
            call: CallSignature::no_args("request_bugreport"),
        })
    }

    #[test]
    fn deliver_invokes_only_success_branch() {
        let mut seen = Vec::new();
        Ok::<_, DevicePolicyError>(7).deliver(|v| seen.push(v), |_| panic!("error branch"));

        assert_eq!(seen, vec![7]);
    }

    #[test]
    fn deliver_invokes_only_error_branch() {
        let mut errors = Vec::new();
        rejected().deliver(|()| panic!("success branch"), |e| errors.push(e.to_string()));

        assert_eq!(errors, vec!["failed operation: request_bugreport()".to_owned()]);
    }

    #[test]
    #[traced_test]
    fn log_outcome_reports_success() {
        let kept = Ok::<_, DevicePolicyError>("x").log_outcome("set_network_logging(true)");

        assert_eq!(kept, Some("x"));
        assert!(logs_contain("set_network_logging(true) succeeded"));
    }

    #[test]
    #[traced_test]
    fn log_outcome_reports_failure() {
        let kept = rejected().log_outcome("request_bugreport()");

        assert_eq!(kept, None);
        assert!(logs_contain("request_bugreport() failed"));
        assert!(logs_contain("failed operation: request_bugreport()"));
    }
}
