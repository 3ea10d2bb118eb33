use std::{future::Future, pin::Pin, time::Duration};

use tokio::time::{Instant, sleep};

pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Pacing policy, awaited by the runner between two consecutive requests
pub trait Throttle {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

pub struct NoDelay;

impl Throttle for NoDelay {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async {})
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Default for FixedDelay {
    fn default() -> Self {
        Self(DEFAULT_DELAY)
    }
}

impl Throttle for FixedDelay {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        let delay = self.0;
        Box::pin(sleep(delay))
    }
}

/// Allows bursts of up to `capacity` requests, then one per `refill`.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: u32,
    refill: Duration,
    tokens: u32,
    last_refill: Instant,
}

impl TokenBucket {
    pub fn new(capacity: u32, refill: Duration) -> Self {
        Self {
            capacity,
            refill,
            tokens: capacity,
            last_refill: Instant::now(),
        }
    }

    fn top_up(&mut self, now: Instant) {
        let earned = (now.duration_since(self.last_refill).as_nanos() / self.refill.as_nanos())
            .min(u32::MAX as u128) as u32;
        if earned == 0 {
            return;
        }
        self.tokens = self.tokens.saturating_add(earned).min(self.capacity);
        if self.tokens == self.capacity {
            self.last_refill = now;
        } else {
            self.last_refill += self.refill * earned;
        }
    }
}

impl Throttle for TokenBucket {
    fn pause(&mut self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            if self.refill.is_zero() {
                return;
            }
            self.top_up(Instant::now());
            if self.tokens > 0 {
                self.tokens -= 1;
                return;
            }
            // empty: wait for the next token and spend it right away
            let next = self.last_refill + self.refill;
            tokio::time::sleep_until(next).await;
            self.last_refill = next;
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn fixed_delay_sleeps_the_full_duration() {
        let start = Instant::now();
        FixedDelay::default().pause().await;
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn no_delay_returns_immediately() {
        let start = Instant::now();
        NoDelay.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn token_bucket_bursts_then_paces() {
        let mut bucket = TokenBucket::new(2, Duration::from_secs(1));
        let start = Instant::now();
        bucket.pause().await;
        bucket.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        bucket.pause().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
        bucket.pause().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn token_bucket_refills_while_idle() {
        let mut bucket = TokenBucket::new(1, Duration::from_secs(1));
        bucket.pause().await;
        sleep(Duration::from_secs(5)).await;

        let start = Instant::now();
        bucket.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
        bucket.pause().await;
        assert_eq!(start.elapsed(), Duration::from_secs(1));
    }
}
