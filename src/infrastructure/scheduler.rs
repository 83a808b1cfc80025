use crate::domain::ports::SettlementScheduler;
use async_trait::async_trait;
use std::time::Duration;

/// Production scheduler: sleeps on the tokio clock.
///
/// Under `tokio::time::pause` the same implementation becomes deterministic,
/// which is how the engine tests drive settlement timing.
pub struct TokioScheduler;

#[async_trait]
impl SettlementScheduler for TokioScheduler {
    async fn delay(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delay_waits_the_full_duration() {
        let scheduler = TokioScheduler;
        let start = Instant::now();
        scheduler.delay(Duration::from_millis(5000)).await;
        assert_eq!(start.elapsed(), Duration::from_millis(5000));
    }
}
