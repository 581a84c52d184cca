// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Retry assertions on eventually consistent results.
//!
//! Queries may not observe recent writes immediately. Tests wrap such
//! queries and their assertions in [eventually()], which calls the block
//! again, with an exponential backoff, until it succeeds or the time budget is
//! exhausted.

use anyhow::Result;
use google_cloud_gax::backoff_policy::BackoffPolicy;
use google_cloud_gax::exponential_backoff::ExponentialBackoffBuilder;
use google_cloud_gax::retry_state::RetryState;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_BUDGET: Duration = Duration::from_secs(240);

/// Calls `f` until it succeeds, using the default configuration.
///
/// # Example
/// ```
/// # use google_cloud_test_utils::eventually::eventually;
/// # tokio_test::block_on(async {
/// let mut count = 0;
/// let value = eventually(async || {
///     count += 1;
///     anyhow::ensure!(count >= 2, "not yet");
///     Ok(count)
/// })
/// .await?;
/// assert_eq!(value, 2);
/// # anyhow::Ok(()) });
/// ```
pub async fn eventually<F, T>(f: F) -> Result<T>
where
    F: AsyncFnMut() -> Result<T>,
{
    Eventually::new().run(f).await
}

/// Configures how [eventually()] retries.
#[derive(Clone, Debug)]
pub struct Eventually {
    budget: Duration,
    backoff: Arc<dyn BackoffPolicy>,
}

impl Default for Eventually {
    fn default() -> Self {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_secs(1))
            .with_maximum_delay(Duration::from_secs(30))
            .clamp();
        Self {
            budget: DEFAULT_BUDGET,
            backoff: Arc::new(backoff),
        }
    }
}

impl Eventually {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops retrying once `v` has elapsed since the first attempt.
    pub fn with_budget(mut self, v: Duration) -> Self {
        self.budget = v;
        self
    }

    /// Sets the policy that computes the delay between attempts.
    pub fn with_backoff_policy<V: BackoffPolicy + 'static>(mut self, v: V) -> Self {
        self.backoff = Arc::new(v);
        self
    }

    /// Calls `f` until it returns `Ok` or the budget is exhausted.
    ///
    /// Returns the last error if the budget is exhausted.
    pub async fn run<F, T>(&self, mut f: F) -> Result<T>
    where
        F: AsyncFnMut() -> Result<T>,
    {
        let start = tokio::time::Instant::now();
        let mut attempt_count: u32 = 0;
        loop {
            attempt_count += 1;
            let err = match f().await {
                Ok(v) => return Ok(v),
                Err(e) => e,
            };
            let remaining = self.budget.saturating_sub(start.elapsed());
            if remaining.is_zero() {
                return Err(err);
            }
            let state = RetryState::new(true)
                .set_start(start.into_std())
                .set_attempt_count(attempt_count);
            let delay = self.backoff.on_failure(&state).min(remaining);
            tracing::info!("attempt {attempt_count} failed, retrying in {delay:?}: {err:?}");
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn success_after_failures() -> Result<()> {
        let mut count = 0;
        let got = eventually(async || {
            count += 1;
            anyhow::ensure!(count >= 3, "attempt {count}");
            Ok(count)
        })
        .await?;
        assert_eq!(got, 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn budget_exhausted() {
        let start = tokio::time::Instant::now();
        let mut count = 0;
        let got = Eventually::new()
            .with_budget(Duration::from_secs(10))
            .run(async || -> Result<()> {
                count += 1;
                anyhow::bail!("attempt {count}")
            })
            .await;
        let err = got.unwrap_err();
        assert_eq!(err.to_string(), format!("attempt {count}"));
        assert!(count > 1, "{count}");
        assert!(start.elapsed() >= Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn default_budget() {
        let start = tokio::time::Instant::now();
        let mut count = 0;
        let got = eventually(async || -> Result<()> {
            count += 1;
            anyhow::bail!("attempt {count}")
        })
        .await;
        let err = got.unwrap_err();
        assert_eq!(err.to_string(), format!("attempt {count}"));
        let elapsed = start.elapsed();
        assert!(elapsed >= DEFAULT_BUDGET, "{elapsed:?}");
        assert!(
            elapsed <= DEFAULT_BUDGET + Duration::from_secs(30),
            "{elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn custom_backoff() -> Result<()> {
        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_delay(Duration::from_millis(10))
            .with_maximum_delay(Duration::from_millis(20))
            .clamp();
        let start = tokio::time::Instant::now();
        let mut count = 0;
        Eventually::new()
            .with_backoff_policy(backoff)
            .run(async || {
                count += 1;
                anyhow::ensure!(count >= 4, "attempt {count}");
                Ok(())
            })
            .await?;
        assert_eq!(count, 4);
        assert!(start.elapsed() <= Duration::from_millis(60), "{:?}", start.elapsed());
        Ok(())
    }
}
