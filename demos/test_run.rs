//! # Demo: test_run
//!
//! Wires mission control, a fixed discovery, a logger and a tokio scheduler.
//!
//! Demonstrates how to:
//! - Build [`MissionControl`] with `Scheduling::Tokio`.
//! - Attach [`LogWriter`] and a relay at the root mail room.
//! - Discover missions on a [`TestRun`](missionroom::TestRun) satellite and schedule them.
//!
//! ## Flow
//! ```text
//! FixedTestDiscovery ──► TestRun room ── TestFound ──► root room ──► LogWriter, relay
//! TestRun::schedule_missions()
//!     └─► OldFool ──► TokioScheduler::defer ──► spawn_blocking(operation)
//! MissionControl::drain()
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=debug cargo run --example test_run --features logging
//! ```

use std::time::Duration;

use missionroom::subscribers::LogWriter;
use missionroom::{
    Config, FixedTestDiscovery, MissionControl, MissionSpecification, Scheduling, TestFound,
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Logging (RUST_LOG, default info)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(true))
        .init();

    // 2. Mission control on the current runtime
    let control = MissionControl::new(Config {
        scheduling: Scheduling::Tokio,
        ..Config::default()
    })?;
    LogWriter::new().attach(control.mail_room());
    let mut found = control.relay::<TestFound>();

    // 3. Missions
    let missions = vec![
        MissionSpecification::single("arithmetic", || assert_eq!(2 + 2, 4)),
        MissionSpecification::single("slow", || std::thread::sleep(Duration::from_millis(200))),
        MissionSpecification::sequential(Some(MissionSpecification::single("chained", || {
            println!("[chained] ran at the end of a sequence");
        }))),
    ];

    // 4. Discover and schedule
    let run = control.create_test_run();
    run.discover(&FixedTestDiscovery::new(missions))?;
    while let Ok(message) = found.try_recv() {
        println!("[relay] found {:?}", message.mission.name());
    }

    let dispatched = run.schedule_missions();
    let finished = control.drain().await?;
    println!("[done] dispatched={dispatched} finished={finished} complete={}", run.is_complete());
    Ok(())
}
