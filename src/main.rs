//! Lonewatch replay runner.
//!
//! Drives the full monitoring pipeline from a recording of device status
//! documents, one poll cycle per entry:
//!
//! ```text
//! ┌──────────────┐   ┌─────────────┐   ┌───────────────────┐   ┌──────────────┐
//! │ ReplaySource │──▶│ poll_once   │──▶│ MemorySensorStore │──▶│ risk::assess │
//! └──────────────┘   └─────────────┘   └───────────────────┘   └──────┬───────┘
//!                                                                      ▼
//!                                      LogEventSink ◀── Responder ──▶ StorageRiskLog
//! ```
//!
//! Usage: `lonewatch <recording.json> [config.json]`

#![deny(unused_must_use)]

use std::fs;

use anyhow::{Context, Result, bail};
use log::{error, info};

use lonewatch::adapters::config_file::JsonFileConfig;
use lonewatch::adapters::log_sink::LogEventSink;
use lonewatch::adapters::memory_storage::MemoryStorage;
use lonewatch::adapters::memory_store::MemorySensorStore;
use lonewatch::adapters::replay::ReplaySource;
use lonewatch::adapters::risk_log::StorageRiskLog;
use lonewatch::adapters::time::SystemClock;
use lonewatch::app::ports::{Clock, ConfigPort};
use lonewatch::app::service::MonitorService;

fn main() -> Result<()> {
    // ── 1. Logging ────────────────────────────────────────────
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Lonewatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Arguments ──────────────────────────────────────────
    let mut args = std::env::args().skip(1);
    let Some(recording_path) = args.next() else {
        bail!("usage: lonewatch <recording.json> [config.json]");
    };
    let config_path = args.next().unwrap_or_else(|| "lonewatch.json".to_string());

    // ── 3. Configuration ──────────────────────────────────────
    let config = JsonFileConfig::new(&config_path)
        .load()
        .with_context(|| format!("loading config from {config_path}"))?;

    // ── 4. Adapters ───────────────────────────────────────────
    let recording = fs::read_to_string(&recording_path)
        .with_context(|| format!("reading {recording_path}"))?;
    let mut source = ReplaySource::from_json(&recording)
        .with_context(|| format!("parsing {recording_path}"))?;
    let store = MemorySensorStore::new();
    let mut risk_log = StorageRiskLog::open(MemoryStorage::new()).context("opening risk log")?;
    let mut sink = LogEventSink::new();
    let clock = SystemClock;

    // ── 5. Replay loop ────────────────────────────────────────
    let mut service = MonitorService::new(config);
    service.start(&mut sink);
    let started = clock.now();

    let mut failures = 0usize;
    while let Some(now) = source.advance() {
        service.poll_now(&mut source, &store, &mut sink);
        if let Err(e) = service.evaluate_situation(&store, &mut risk_log, &mut sink, now) {
            error!("Cycle at {} failed: {}", now.to_rfc3339(), e);
            failures += 1;
        }
    }

    // ── 6. Summary ────────────────────────────────────────────
    info!(
        "Replay finished in {} ms: {} cycles, {} risk events recorded, {} persistence failures",
        (clock.now() - started).num_milliseconds(),
        service.cycle_count(),
        risk_log.len(),
        failures
    );
    for event in risk_log.read_all() {
        info!("  risk {} at {}", event.level, event.recorded_at.to_rfc3339());
    }

    Ok(())
}
