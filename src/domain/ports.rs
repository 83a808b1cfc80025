use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Delay primitive backing settlement timers.
///
/// Injected so tests control time deterministically instead of waiting real
/// delays. The production implementation sleeps on the tokio clock.
#[async_trait]
pub trait SettlementScheduler: Send + Sync {
    async fn delay(&self, duration: Duration);
}

/// Secure local key-value store for session flags (e.g. the active display
/// tab). Read once at startup, written on toggle.
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub type SchedulerHandle = Arc<dyn SettlementScheduler>;
pub type FlagStoreBox = Box<dyn FlagStore>;
