//! Bounded background polling and stale-response guards.
//!
//! Two dashboard flows wait on remote state that only a provider webhook
//! advances: boost checkout activation and KYC verification. Both are
//! fixed-interval, bounded-attempt polls that race user navigation - a
//! poll must stop cleanly when its hosting view is torn down, and must
//! never retry forever. Exhaustion is reported as a timeout-flavored
//! outcome and the view keeps its last known-good state.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use myswipe_core::KycStatus;

use crate::api::ApiClient;

/// Checkout activation: payment confirmation can lag the redirect by up
/// to ~2 minutes.
pub const CHECKOUT_ACTIVATION_ATTEMPTS: u32 = 24;
pub const CHECKOUT_ACTIVATION_INTERVAL: Duration = Duration::from_secs(5);

/// KYC status light-poll after the seller returns from the provider.
pub const KYC_POLL_ATTEMPTS: u32 = 6;
pub const KYC_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Terminal state of a bounded poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The polled operation reached its goal.
    Completed(T),
    /// Every attempt ran without reaching the goal.
    Exhausted,
    /// The hosting view was torn down mid-poll.
    Cancelled,
}

/// Run `op` every `interval` until it yields a value, the attempt budget
/// runs out, or the token is cancelled.
///
/// `op` receives the 1-based attempt number. Cancellation is honored
/// both while an attempt is in flight and while sleeping between
/// attempts.
pub async fn poll_until<T, F, Fut>(
    interval: Duration,
    max_attempts: u32,
    token: &CancellationToken,
    mut op: F,
) -> PollOutcome<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Option<T>>,
{
    for attempt in 1..=max_attempts {
        if token.is_cancelled() {
            return PollOutcome::Cancelled;
        }

        tokio::select! {
            () = token.cancelled() => return PollOutcome::Cancelled,
            result = op(attempt) => {
                if let Some(value) = result {
                    return PollOutcome::Completed(value);
                }
            }
        }

        if attempt < max_attempts {
            tokio::select! {
                () = token.cancelled() => return PollOutcome::Cancelled,
                () = tokio::time::sleep(interval) => {}
            }
        }
    }
    PollOutcome::Exhausted
}

/// Retry boost activation after a checkout redirect until the payment
/// confirms.
///
/// Any successful response is terminal, even with zero newly activated
/// boosts (the webhook may have activated them first); only errors
/// retry. Completes with the number of boosts activated by this call.
pub async fn wait_for_boost_activation(
    api: &ApiClient,
    session_id: &str,
    token: &CancellationToken,
) -> PollOutcome<usize> {
    poll_until(
        CHECKOUT_ACTIVATION_INTERVAL,
        CHECKOUT_ACTIVATION_ATTEMPTS,
        token,
        |attempt| {
            let api = api.clone();
            let session_id = session_id.to_string();
            async move {
                match api.activate_boosts(&session_id).await {
                    Ok(activation) => Some(activation.active_count()),
                    Err(err) => {
                        tracing::debug!(attempt, "boost activation not ready: {err}");
                        None
                    }
                }
            }
        },
    )
    .await
}

/// Light-poll the KYC status until the provider reports a terminal
/// state.
pub async fn wait_for_kyc_decision(
    api: &ApiClient,
    token: &CancellationToken,
) -> PollOutcome<KycStatus> {
    poll_until(KYC_POLL_INTERVAL, KYC_POLL_ATTEMPTS, token, |attempt| {
        let api = api.clone();
        async move {
            match api.kyc_status().await {
                Ok(status) if status.is_terminal() => Some(status),
                Ok(_) => None,
                Err(err) => {
                    tracing::debug!(attempt, "kyc status fetch failed: {err}");
                    None
                }
            }
        }
    })
    .await
}

/// Mount guard against stale responses.
///
/// A view creates a [`MountGuard`] and hands [`MountHandle`]s to its
/// in-flight fetches; once the guard is unmounted (or dropped), a
/// resolved response must not be applied - [`MountHandle::apply`]
/// becomes a no-op.
#[derive(Debug)]
pub struct MountGuard {
    mounted: Arc<AtomicBool>,
}

impl MountGuard {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mounted: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Handle for one in-flight task.
    #[must_use]
    pub fn handle(&self) -> MountHandle {
        MountHandle {
            mounted: Arc::clone(&self.mounted),
        }
    }

    /// Mark the view as torn down.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for MountGuard {
    fn drop(&mut self) {
        self.mounted.store(false, Ordering::SeqCst);
    }
}

/// Cloneable handle checked at response-application time.
#[derive(Debug, Clone)]
pub struct MountHandle {
    mounted: Arc<AtomicBool>,
}

impl MountHandle {
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Apply a resolved value only while the view is mounted. Returns
    /// whether the value was applied; a stale value is dropped.
    pub fn apply<T>(&self, value: T, apply: impl FnOnce(T)) -> bool {
        if self.is_mounted() {
            apply(value);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[tokio::test(start_paused = true)]
    async fn completes_when_op_yields() {
        let token = CancellationToken::new();
        let outcome = poll_until(Duration::from_secs(5), 10, &token, |attempt| async move {
            (attempt == 3).then_some(attempt)
        })
        .await;
        assert_eq!(outcome, PollOutcome::Completed(3));
    }

    #[tokio::test(start_paused = true)]
    async fn exhausts_after_max_attempts() {
        let attempts = Arc::new(Mutex::new(0_u32));
        let token = CancellationToken::new();
        let seen = Arc::clone(&attempts);
        let outcome = poll_until(Duration::from_secs(5), 6, &token, move |attempt| {
            let seen = Arc::clone(&seen);
            async move {
                *seen.lock().expect("lock") = attempt;
                None::<u32>
            }
        })
        .await;
        assert_eq!(outcome, PollOutcome::Exhausted);
        assert_eq!(*attempts.lock().expect("lock"), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_stops_between_attempts() {
        let token = CancellationToken::new();
        let poller = {
            let token = token.clone();
            tokio::spawn(async move {
                poll_until(Duration::from_secs(60), 24, &token, |_| async { None::<u32> }).await
            })
        };

        // Let the first attempt run, then tear the view down mid-sleep.
        tokio::time::sleep(Duration::from_secs(1)).await;
        token.cancel();
        let outcome = poller.await.expect("join");
        assert_eq!(outcome, PollOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn already_cancelled_never_runs_op() {
        let token = CancellationToken::new();
        token.cancel();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let outcome = poll_until(Duration::from_secs(1), 3, &token, move |_| {
            let flag = Arc::clone(&flag);
            async move {
                flag.store(true, Ordering::SeqCst);
                None::<u32>
            }
        })
        .await;
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert!(!ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn stale_response_is_not_applied_after_unmount() {
        let guard = MountGuard::new();
        let handle = guard.handle();

        let fetch = tokio::spawn(async move {
            // Simulated list fetch resolving after teardown.
            "rows"
        });

        guard.unmount();
        let rows = fetch.await.expect("join");

        let applied = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&applied);
        let was_applied = handle.apply(rows, move |_| flag.store(true, Ordering::SeqCst));
        assert!(!was_applied);
        assert!(!applied.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn mounted_response_is_applied() {
        let guard = MountGuard::new();
        let handle = guard.handle();
        let applied = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&applied);
        assert!(handle.apply(7, move |v| {
            assert_eq!(v, 7);
            flag.store(true, Ordering::SeqCst);
        }));
        assert!(applied.load(Ordering::SeqCst));
    }

    #[test]
    fn dropping_the_guard_unmounts() {
        let guard = MountGuard::new();
        let handle = guard.handle();
        assert!(handle.is_mounted());
        drop(guard);
        assert!(!handle.is_mounted());
    }
}
