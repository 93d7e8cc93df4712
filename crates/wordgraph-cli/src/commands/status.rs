//! Graph store status.

use anyhow::{Context, Result};

use wordgraph_core::SyncConfig;

use crate::connections::Connections;
use crate::output;
use crate::shutdown;

pub async fn execute(config: SyncConfig) -> Result<()> {
    let shutdown = shutdown::listen();
    let mut graph = Connections::open_graph(&config, &shutdown)
        .await
        .context("Could not reach the graph store")?;

    let counts = graph.handle()?.get_counts().await;
    graph.close();

    output::print_counts(&config, &counts?);
    Ok(())
}
