use crate::domain::catalog::RewardCatalog;
use crate::domain::events::{RewardTab, SettledEvent, SettledKind};
use crate::domain::ledger::{Balance, CashbackLedger};
use crate::domain::ports::SchedulerHandle;
use crate::domain::reward::{Coupon, EarnedCashback, Reward, RewardKind, RewardState};
use crate::error::{Result, RewardError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{RwLock, mpsc};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Settlement delay of the reference scratch-card flow.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(5000);

/// Default size for each subscriber's event buffer.
const DEFAULT_BUFFER_SIZE: usize = 16;

/// An in-flight reveal, handed back by [`RewardEngine::scratch`].
///
/// Exists only between the scratch and its settlement. The caller keeps it to
/// cancel the settlement on view teardown.
#[derive(Debug)]
pub struct ScratchSession {
    pub reward_id: String,
    pub started_at: Instant,
}

struct EngineState {
    catalog: RewardCatalog,
    ledger: CashbackLedger,
}

/// The main entry point for the scratch-card rewards flow.
///
/// `RewardEngine` drives each reward through `Pending → Revealing → settled`.
/// A scratch validates the target, schedules one settlement task after the
/// configured delay, and returns immediately; the settlement then either
/// credits the cashback ledger or unlocks the coupon matching the reward's
/// code, and publishes a [`SettledEvent`] to subscribers.
///
/// The catalog and ledger are mutated exclusively by the settlement path and
/// the cancel bookkeeping; read models return snapshots.
#[derive(Clone)]
pub struct RewardEngine {
    state: Arc<RwLock<EngineState>>,
    /// Arena of in-flight settlements, keyed by reward id. An entry doubles
    /// as the settlement token: whoever removes it first decides whether the
    /// settlement runs.
    sessions: Arc<Mutex<HashMap<String, AbortHandle>>>,
    subscribers: Arc<Mutex<Vec<mpsc::Sender<SettledEvent>>>>,
    scheduler: SchedulerHandle,
    settle_delay: Duration,
}

impl RewardEngine {
    /// Creates a new `RewardEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `catalog` - Seeded reward and coupon collections.
    /// * `ledger` - The cashback ledger, possibly carrying an opening balance.
    /// * `scheduler` - Delay primitive used by settlement timers.
    /// * `settle_delay` - How long a reveal runs before it settles.
    pub fn new(
        catalog: RewardCatalog,
        ledger: CashbackLedger,
        scheduler: SchedulerHandle,
        settle_delay: Duration,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(EngineState { catalog, ledger })),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            subscribers: Arc::new(Mutex::new(Vec::new())),
            scheduler,
            settle_delay,
        }
    }

    /// Starts a reveal for a pending reward.
    ///
    /// Fails with [`RewardError::NotFound`] when the id is unknown, already
    /// settled, or mid-reveal; nothing is mutated on failure. On success the
    /// reward flips to `Revealing` and exactly one settlement is scheduled,
    /// which fires after the configured delay unless cancelled first.
    pub async fn scratch(&self, reward_id: &str) -> Result<ScratchSession> {
        {
            let mut state = self.state.write().await;
            let reward = state
                .catalog
                .pending_mut(reward_id)
                .filter(|r| r.state == RewardState::Pending)
                .ok_or_else(|| RewardError::NotFound {
                    id: reward_id.to_string(),
                })?;
            reward.state = RewardState::Revealing;
        }

        let task_engine = self.clone();
        let task_id = reward_id.to_string();
        // Holding the arena lock across spawn+insert means the task's own
        // lookup cannot run before its entry exists.
        {
            let mut sessions = self.sessions.lock().expect("sessions lock poisoned");
            let handle = tokio::spawn(async move {
                task_engine.scheduler.delay(task_engine.settle_delay).await;
                task_engine.settle(&task_id).await;
            });
            sessions.insert(reward_id.to_string(), handle.abort_handle());
        }

        debug!(id = %reward_id, "reveal started");
        Ok(ScratchSession {
            reward_id: reward_id.to_string(),
            started_at: Instant::now(),
        })
    }

    /// Cancels an in-flight reveal before its settlement fires.
    ///
    /// The reward becomes scratchable again and neither the ledger nor any
    /// coupon changes. Returns `false` when the settlement already fired (or
    /// was cancelled earlier); cancellation is only guaranteed while the
    /// delay is still running.
    pub async fn cancel(&self, session: &ScratchSession) -> bool {
        let abort = {
            let mut sessions = self.sessions.lock().expect("sessions lock poisoned");
            sessions.remove(&session.reward_id)
        };
        let Some(abort) = abort else {
            return false;
        };
        abort.abort();

        let mut state = self.state.write().await;
        if let Some(reward) = state.catalog.pending_mut(&session.reward_id) {
            reward.state = RewardState::Pending;
        }
        debug!(id = %session.reward_id, "reveal cancelled before settlement");
        true
    }

    /// Cancels every in-flight reveal. Called when the hosting view is torn
    /// down, so no settlement mutates state for a destroyed view.
    pub async fn teardown(&self) {
        let drained: Vec<(String, AbortHandle)> = {
            let mut sessions = self.sessions.lock().expect("sessions lock poisoned");
            sessions.drain().collect()
        };
        if drained.is_empty() {
            return;
        }

        let mut state = self.state.write().await;
        for (id, abort) in drained {
            abort.abort();
            if let Some(reward) = state.catalog.pending_mut(&id) {
                reward.state = RewardState::Pending;
            }
        }
        debug!("all in-flight reveals cancelled");
    }

    async fn settle(&self, reward_id: &str) {
        // The arena entry is the settlement token; if a cancel or teardown
        // already claimed it, this settlement must not run.
        {
            let mut sessions = self.sessions.lock().expect("sessions lock poisoned");
            if sessions.remove(reward_id).is_none() {
                return;
            }
        }

        let event = {
            let mut state = self.state.write().await;
            let Some(reward) = state.catalog.take_pending(reward_id) else {
                return;
            };
            match reward.kind {
                RewardKind::Cash { amount } => {
                    state.catalog.add_earned(EarnedCashback {
                        id: reward.id.clone(),
                        amount,
                    });
                    state.ledger.credit(amount);
                    info!(id = %reward.id, amount = %amount.value(), "cash reward settled");
                    SettledEvent {
                        reward_id: reward.id,
                        kind: SettledKind::Cash { amount },
                        tab: RewardTab::Money,
                    }
                }
                RewardKind::Coupon { code } => {
                    let matched = state.catalog.unlock_coupon(&code);
                    if matched {
                        info!(id = %reward.id, code = %code, "coupon unlocked");
                    } else {
                        warn!(id = %reward.id, code = %code, "no coupon matches settled reward code");
                    }
                    SettledEvent {
                        reward_id: reward.id,
                        kind: SettledKind::Coupon { code, matched },
                        tab: RewardTab::Coupons,
                    }
                }
            }
        };

        self.publish(event).await;
    }

    /// Creates a new subscriber with a bounded buffer size (or the default).
    /// Returns a receiver the presentation layer can poll for settlements.
    pub fn subscribe(&self, buffer_size: Option<usize>) -> mpsc::Receiver<SettledEvent> {
        let size = buffer_size.unwrap_or(DEFAULT_BUFFER_SIZE);
        let (tx, rx) = mpsc::channel(size);

        let mut subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
        subscribers.push(tx);
        rx
    }

    async fn publish(&self, event: SettledEvent) {
        // Clone the senders outside the lock.
        let senders = {
            let subscribers = self.subscribers.lock().expect("subscribers lock poisoned");
            subscribers.clone()
        };
        for sender in senders {
            let _ = sender.send(event.clone()).await;
        }
    }

    /// Number of reveals whose settlement has not fired yet.
    pub fn in_flight(&self) -> usize {
        self.sessions.lock().expect("sessions lock poisoned").len()
    }

    pub async fn pending(&self) -> Vec<Reward> {
        self.state.read().await.catalog.pending().to_vec()
    }

    pub async fn earned(&self) -> Vec<EarnedCashback> {
        self.state.read().await.catalog.earned().to_vec()
    }

    pub async fn coupons(&self) -> Vec<Coupon> {
        self.state.read().await.catalog.coupons().to_vec()
    }

    pub async fn cashback_total(&self) -> Balance {
        self.state.read().await.ledger.total()
    }
}
