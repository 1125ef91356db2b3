//! Inter-step pacing policies for the analysis pipeline.
//!
//! The upstream model API is rate limited, so consecutive analysis calls are
//! spaced out. The policy is swappable: production uses a fixed gap, tests
//! use none, and deployments that prefer sustained-rate control can use a
//! token bucket.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use debrief_core::defaults;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use tracing::warn;

/// Pause between consecutive analysis steps.
///
/// Called after each step except the last; never before the first.
#[async_trait]
pub trait PacingPolicy: Send + Sync {
    /// Wait until the next step may start.
    async fn pause(&self);

    /// Short policy name for startup logs.
    fn name(&self) -> &'static str;
}

/// Fixed sleep between steps. The production default.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::from_millis(defaults::ANALYSIS_STEP_DELAY_MS)
    }
}

#[async_trait]
impl PacingPolicy for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// No pause at all. For tests and development against a mock gateway.
pub struct NoDelay;

#[async_trait]
impl PacingPolicy for NoDelay {
    async fn pause(&self) {}

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Token-bucket pacing on a direct governor limiter.
///
/// Smooths the step rate instead of inserting a fixed gap: the first step
/// after an idle stretch proceeds immediately, later steps queue on the
/// refill period.
pub struct TokenBucket {
    limiter: DefaultDirectRateLimiter,
}

impl TokenBucket {
    /// One step allowed per `period`. Returns None for a zero period.
    pub fn with_period(period: Duration) -> Option<Self> {
        let quota = Quota::with_period(period)?;
        Some(Self {
            limiter: RateLimiter::direct(quota),
        })
    }
}

#[async_trait]
impl PacingPolicy for TokenBucket {
    async fn pause(&self) {
        self.limiter.until_ready().await;
    }

    fn name(&self) -> &'static str {
        "bucket"
    }
}

/// Select the pacing policy from environment variables.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `PACING_POLICY` | `fixed` | `fixed`, `none`, or `bucket` |
/// | `ANALYSIS_STEP_DELAY_MS` | `1000` | Step gap (fixed) or refill period (bucket) |
pub fn from_env() -> Arc<dyn PacingPolicy> {
    let delay_ms = std::env::var(defaults::ENV_ANALYSIS_STEP_DELAY_MS)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(defaults::ANALYSIS_STEP_DELAY_MS);

    let policy = std::env::var(defaults::ENV_PACING_POLICY).unwrap_or_else(|_| "fixed".to_string());
    match policy.as_str() {
        "none" => Arc::new(NoDelay),
        "bucket" => match TokenBucket::with_period(Duration::from_millis(delay_ms)) {
            Some(bucket) => Arc::new(bucket),
            None => {
                warn!(delay_ms, "Zero-period token bucket requested, pacing disabled");
                Arc::new(NoDelay)
            }
        },
        "fixed" => Arc::new(FixedDelay::from_millis(delay_ms)),
        other => {
            warn!(policy = %other, "Unknown pacing policy, using fixed delay");
            Arc::new(FixedDelay::from_millis(delay_ms))
        }
    }
}
