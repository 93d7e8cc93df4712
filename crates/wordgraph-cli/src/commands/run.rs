//! Long-running scheduled synchronization.

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::{info, warn};

use wordgraph_core::{Scheduler, SyncConfig};
use wordgraph_graph::schema;

use crate::connections::Connections;
use crate::shutdown;

pub async fn execute(config: SyncConfig) -> Result<()> {
    let shutdown = shutdown::listen();
    let mut connections = Connections::open(&config, &shutdown)
        .await
        .context("Startup failed")?;

    println!(
        "{} syncing every {}s ({} workers, weight policy {}). Ctrl+C to stop.",
        "wordgraph".cyan().bold(),
        config.schedule.interval_secs,
        config.schedule.concurrency,
        config.schedule.weight_policy
    );

    let scheduler = Scheduler::new(config.schedule.interval());
    let outcome = loop {
        if let Err(e) = schema::initialize_schema(connections.graph()?).await {
            break Err(e);
        }
        let engine = connections.engine()?;

        match scheduler.run(&engine, &shutdown).await {
            Ok(passes) => {
                info!(passes, "Scheduler finished");
                break Ok(());
            }
            Err(err) if err.is_connection_loss() => {
                warn!(error = %err, "Lost a connection mid-run");
                drop(engine);
                connections
                    .reconnect(&shutdown)
                    .await
                    .context("Reconnection failed")?;
            }
            Err(err) => break Err(err.into()),
        }
    };

    connections.close();
    outcome
}
