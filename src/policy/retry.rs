use std::thread::sleep;
use std::time::Duration;

use log::warn;

use crate::raw::RequestError;

/// Linear-backoff retry for transient failures: attempt `n` sleeps
/// `base_delay * n` before the next try. Anything non-transient propagates
/// immediately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RetryPolicy {
    pub count: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn run<T>(
        &self,
        mut call: impl FnMut() -> Result<T, RequestError>,
    ) -> Result<T, RequestError> {
        let attempts = self.count.max(1);
        for attempt in 1..=attempts {
            match call() {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && attempt < attempts => {
                    let delay = self.base_delay * attempt;
                    warn!(
                        "transient failure ({error}), retrying in {delay:?} \
                         (attempt {attempt} of {attempts})"
                    );
                    sleep(delay);
                }
                Err(error) => return Err(error),
            }
        }
        unreachable!("loop returns on the final attempt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn policy(count: u32) -> RetryPolicy {
        RetryPolicy {
            count,
            base_delay: Duration::ZERO,
        }
    }

    #[test]
    fn transient_failures_are_retried_until_success() {
        let calls = Cell::new(0);
        let result = policy(5).run(|| {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(RequestError::BadGateway)
            } else {
                Ok(42)
            }
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn exhausted_retries_surface_the_last_error() {
        let calls = Cell::new(0);
        let result: Result<(), _> = policy(3).run(|| {
            calls.set(calls.get() + 1);
            Err(RequestError::GatewayTimeout)
        });
        assert!(matches!(result, Err(RequestError::GatewayTimeout)));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn fatal_errors_are_not_retried() {
        let calls = Cell::new(0);
        let result: Result<(), _> = policy(5).run(|| {
            calls.set(calls.get() + 1);
            Err(RequestError::Unauthorized)
        });
        assert!(matches!(result, Err(RequestError::Unauthorized)));
        assert_eq!(calls.get(), 1);
    }
}
