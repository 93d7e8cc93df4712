//! One-shot synchronization pass.

use anyhow::{Context, Result, bail};
use colored::Colorize;

use wordgraph_core::SyncConfig;
use wordgraph_graph::schema;

use crate::connections::Connections;
use crate::output;
use crate::shutdown;

pub async fn execute(config: SyncConfig) -> Result<()> {
    let shutdown = shutdown::listen();
    let mut connections = Connections::open(&config, &shutdown)
        .await
        .context("Startup failed")?;

    println!("{}", "Syncing word graph...".bold());

    schema::initialize_schema(connections.graph()?).await?;
    let engine = connections.engine()?;
    let result = engine.process_all().await;
    drop(engine);
    connections.close();

    let summary = result?;
    output::print_summary(&summary);

    if !summary.is_clean() {
        bail!("{} key(s) failed to sync", summary.failed);
    }
    Ok(())
}
