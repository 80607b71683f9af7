//! Countdown toward a pickup deadline or claim-code expiry.
//!
//! [`Countdown`] is pure time math and is what the tests exercise;
//! [`CountdownTicker`] drives it once per second on a tokio task and
//! publishes snapshots over a watch channel. The ticker stops after
//! publishing the expired state, so the display freezes on the expired
//! label. Not available in WASM environments; web hosts should drive
//! [`Countdown`] from a JavaScript timer instead.

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use savedfeast_lib::orders::{ClaimCode, Order, OrderStatus};

/// Remaining time below which the display switches to the warning color.
pub const WARNING_THRESHOLD_SECS: i64 = 300;

/// Display severity of a running countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownSeverity {
    Normal,
    /// Under five minutes remain.
    Warning,
    Expired,
}

/// A target timestamp to count down to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    target: DateTime<Utc>,
}

impl Countdown {
    /// Count down to an explicit timestamp.
    pub fn new(target: DateTime<Utc>) -> Self {
        Self { target }
    }

    /// Pick the relevant target for an order, by status: an active order
    /// counts down to the end of its pickup window. Terminal orders have
    /// nothing left to count.
    pub fn for_order(order: &Order) -> Option<Self> {
        if order.status.is_terminal() {
            return None;
        }
        let target = match order.status {
            OrderStatus::ReadyForPickup => order.pickup_window_end?,
            _ => order.pickup_window_end.or(order.pickup_time)?,
        };
        Some(Self::new(target))
    }

    /// Count down to a claim code's expiry.
    pub fn for_claim(claim: &ClaimCode) -> Self {
        Self::new(claim.expires_at)
    }

    /// The target timestamp.
    pub fn target(&self) -> DateTime<Utc> {
        self.target
    }

    /// Whole seconds until the target; negative once past it.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> i64 {
        (self.target - now).num_seconds()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) <= 0
    }

    /// Severity for the given instant.
    pub fn severity(&self, now: DateTime<Utc>) -> CountdownSeverity {
        let remaining = self.remaining_secs(now);
        if remaining <= 0 {
            CountdownSeverity::Expired
        } else if remaining < WARNING_THRESHOLD_SECS {
            CountdownSeverity::Warning
        } else {
            CountdownSeverity::Normal
        }
    }

    /// Display label: `2h 5m 9s`, `5m 9s`, or `9s`, with leading zero
    /// units dropped. At or past the target the label is fixed to
    /// `Expired`.
    pub fn label(&self, now: DateTime<Utc>) -> String {
        let remaining = self.remaining_secs(now);
        if remaining <= 0 {
            return "Expired".to_string();
        }
        let hours = remaining / 3600;
        let minutes = (remaining % 3600) / 60;
        let seconds = remaining % 60;
        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}

/// A published countdown snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct CountdownState {
    pub remaining_secs: i64,
    pub label: String,
    pub severity: CountdownSeverity,
}

impl CountdownState {
    fn snapshot(countdown: &Countdown, now: DateTime<Utc>) -> Self {
        Self {
            remaining_secs: countdown.remaining_secs(now),
            label: countdown.label(now),
            severity: countdown.severity(now),
        }
    }
}

/// Once-per-second driver for a [`Countdown`].
///
/// The spawned task is the one resource in this crate that needs explicit
/// teardown; dropping the ticker aborts it.
pub struct CountdownTicker {
    state_rx: watch::Receiver<CountdownState>,
    handle: tokio::task::JoinHandle<()>,
}

impl CountdownTicker {
    /// Start ticking toward the countdown's target.
    pub fn start(countdown: Countdown) -> Self {
        let (tx, rx) = watch::channel(CountdownState::snapshot(&countdown, Utc::now()));
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                let state = CountdownState::snapshot(&countdown, Utc::now());
                let expired = state.severity == CountdownSeverity::Expired;
                if tx.send(state).is_err() {
                    // Every subscriber is gone.
                    break;
                }
                if expired {
                    break;
                }
            }
        });
        Self {
            state_rx: rx,
            handle,
        }
    }

    /// Subscribe to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state_rx.clone()
    }

    /// The most recent snapshot.
    pub fn state(&self) -> CountdownState {
        self.state_rx.borrow().clone()
    }

    /// Restart against a new target (e.g., navigating to another order).
    pub fn retarget(&mut self, countdown: Countdown) {
        *self = Self::start(countdown);
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
