//! @ai:module:intent Token bucket limiting outgoing chat-completion requests
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter, RateLimiterTrait
//! @ai:module:stateless false

use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Trait for rate limiting functionality
pub trait RateLimiterTrait: Send + Sync {
    /// @ai:intent Wait until a request is allowed
    fn wait(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// @ai:intent Token bucket shared by every agent of a live framework
/// @ai:invariant requests_per_minute == 0 disables limiting
pub struct RateLimiter {
    state: Arc<Mutex<Bucket>>,
    requests_per_minute: u32,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    /// @ai:intent Add tokens for the time elapsed since the last refill
    /// @ai:effects state:write, time
    fn refill(&mut self, capacity: f64) {
        let now = Instant::now();
        let per_second = capacity / 60.0;
        self.tokens =
            (self.tokens + now.duration_since(self.last_refill).as_secs_f64() * per_second).min(capacity);
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// @ai:intent Create a limiter with a full bucket
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            state: Arc::new(Mutex::new(Bucket {
                tokens: requests_per_minute as f64,
                last_refill: Instant::now(),
            })),
            requests_per_minute,
        }
    }

    /// @ai:intent Take a token if one is available, otherwise report the wait
    /// @ai:post Ok(()) consumes a token; Err carries the time until the next token
    /// @ai:effects state:write, time
    pub async fn try_acquire(&self) -> Result<(), Duration> {
        if self.requests_per_minute == 0 {
            return Ok(());
        }

        let capacity = self.requests_per_minute as f64;
        let mut bucket = self.state.lock().await;
        bucket.refill(capacity);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            Err(Duration::from_secs_f64((1.0 - bucket.tokens) * 60.0 / capacity))
        }
    }
}

impl RateLimiterTrait for RateLimiter {
    /// @ai:intent Wait until a request is allowed
    /// @ai:effects state:write, time
    async fn wait(&self) {
        while let Err(delay) = self.try_acquire().await {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initial_burst_is_immediate() {
        let limiter = RateLimiter::new(60);

        let start = Instant::now();
        for _ in 0..5 {
            limiter.wait().await;
        }

        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn test_empty_bucket_reports_delay() {
        let limiter = RateLimiter::new(2);
        assert!(limiter.try_acquire().await.is_ok());
        assert!(limiter.try_acquire().await.is_ok());

        let delay = limiter.try_acquire().await.unwrap_err();
        assert!(delay > Duration::from_secs(25));
        assert!(delay <= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_zero_rate_is_unlimited() {
        let limiter = RateLimiter::new(0);
        for _ in 0..1000 {
            assert!(limiter.try_acquire().await.is_ok());
        }
    }
}
