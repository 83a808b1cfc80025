use cashback_engine::application::engine::RewardEngine;
use cashback_engine::domain::ledger::{Balance, CashbackLedger};
use cashback_engine::domain::ports::FlagStoreBox;
use cashback_engine::infrastructure::in_memory::InMemoryFlagStore;
use cashback_engine::infrastructure::scheduler::TokioScheduler;
use cashback_engine::interfaces::csv::catalog_reader::CatalogReader;
use cashback_engine::interfaces::csv::state_writer::StateWriter;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::FmtSubscriber;

/// Session flag recording the tab the UI should land on.
const ACTIVE_TAB_FLAG: &str = "active_tab";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed catalog CSV file (reward and coupon rows)
    catalog: PathBuf,

    /// Reward ids to scratch, in order (repeatable)
    #[arg(long = "scratch", value_name = "ID")]
    scratch: Vec<String>,

    /// Scratch every pending reward in seed order
    #[arg(long, conflicts_with = "scratch")]
    scratch_all: bool,

    /// Reward ids whose reveal is cancelled before it settles (repeatable)
    #[arg(long = "cancel", value_name = "ID")]
    cancel: Vec<String>,

    /// Settlement delay in milliseconds
    #[arg(long, default_value_t = 5000)]
    delay_ms: u64,

    /// Cashback already earned before this session
    #[arg(long, default_value = "542.75")]
    opening_balance: Decimal,
}

fn init_tracing() {
    // Logs go to stderr; stdout carries the state CSV.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default subscriber");
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let file = File::open(&cli.catalog).into_diagnostic()?;
    let catalog = CatalogReader::new(file).load().into_diagnostic()?;

    let ledger = CashbackLedger::with_opening(Balance::new(cli.opening_balance));
    let engine = RewardEngine::new(
        catalog,
        ledger,
        Arc::new(TokioScheduler),
        Duration::from_millis(cli.delay_ms),
    );
    let mut events = engine.subscribe(None);
    let flags: FlagStoreBox = Box::new(InMemoryFlagStore::new());

    let ids: Vec<String> = if cli.scratch_all {
        engine
            .pending()
            .await
            .into_iter()
            .map(|reward| reward.id)
            .collect()
    } else {
        cli.scratch.clone()
    };

    let mut sessions = Vec::new();
    for id in &ids {
        match engine.scratch(id).await {
            Ok(session) => sessions.push(session),
            Err(e) => warn!(id = %id, error = %e, "scratch rejected"),
        }
    }

    // Cancellations happen while the settlement delays are still running.
    let mut expected = 0usize;
    for session in &sessions {
        if cli.cancel.contains(&session.reward_id) {
            engine.cancel(session).await;
        } else {
            expected += 1;
        }
    }

    for _ in 0..expected {
        let Some(event) = events.recv().await else {
            break;
        };
        flags
            .set(ACTIVE_TAB_FLAG, event.tab.as_str())
            .await
            .into_diagnostic()?;
    }

    if let Some(tab) = flags.get(ACTIVE_TAB_FLAG).await.into_diagnostic()? {
        info!(tab = %tab, "active tab after settlements");
    }

    // View teardown: release any timer handles still alive.
    engine.teardown().await;

    let stdout = io::stdout();
    let mut writer = StateWriter::new(stdout.lock());
    writer
        .write_state(
            engine.cashback_total().await,
            &engine.earned().await,
            &engine.coupons().await,
            &engine.pending().await,
        )
        .into_diagnostic()?;

    Ok(())
}
