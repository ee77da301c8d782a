//! CLI entry point for insight-lookup.
//!
//! Runs one node lookup against the configured Gremlin Server and writes the
//! result as JSON to stdout. Logs go to stderr.

use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use insight_core::config::{InsightConfig, DEFAULT_CONFIG_PREFIX};
use insight_core::NodeRecord;
use insight_graph::{mock, GraphConfig, GraphNodeLookup, GremlinClient};

#[derive(Parser)]
#[command(name = "insight-lookup")]
#[command(about = "Node and neighbor lookups against the Insight knowledge graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: insight).
    #[arg(short, long, default_value = DEFAULT_CONFIG_PREFIX, global = true)]
    config: String,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a single node (prints `null` when nothing matches).
    Node(NodeKey),
    /// Fetch the nameable targets of a node's outgoing edges.
    Neighbors(NodeKey),
    /// Print the fixed offline neighbor set (no server needed).
    Mock {
        /// Node ID (ignored by the mock).
        #[arg(long, default_value = "")]
        id: String,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("key").required(true).args(["graph_id", "external_id"])))]
struct NodeKey {
    /// Graph-native vertex ID.
    #[arg(long)]
    graph_id: Option<String>,
    /// External correlation ID (`idMongo` property).
    #[arg(long)]
    external_id: Option<String>,
}

/// The node a keyed command starts from.
#[derive(Debug, PartialEq, Eq)]
enum NodeRef<'a> {
    Graph(&'a str),
    External(&'a str),
}

impl NodeKey {
    fn node_ref(&self) -> NodeRef<'_> {
        // The required `key` group guarantees exactly one of the two is set.
        match (&self.graph_id, &self.external_id) {
            (Some(id), _) => NodeRef::Graph(id),
            (None, xid) => NodeRef::External(xid.as_deref().unwrap_or_default()),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.json_logs {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    }

    match cli.command {
        Command::Mock { ref id } => {
            println!("{}", serde_json::to_string(&mock::neighbors_mock(id))?);
        }
        Command::Node(ref key) => {
            let lookup = connect(&cli.config).await?;
            let node = match key.node_ref() {
                NodeRef::Graph(id) => lookup.get_by_graph_id(id).await?,
                NodeRef::External(xid) => lookup.get_by_external_id(xid).await?,
            };
            println!("{}", serde_json::to_string(&node)?);
        }
        Command::Neighbors(ref key) => {
            let lookup = connect(&cli.config).await?;
            let start = match key.node_ref() {
                NodeRef::Graph(id) => NodeRecord::with_graph_id(id),
                NodeRef::External(xid) => lookup
                    .get_by_external_id(xid)
                    .await?
                    .ok_or_else(|| anyhow::anyhow!("No node with external id {xid}"))?,
            };
            let neighbors = lookup.get_neighbors(&start).await?;
            println!("{}", serde_json::to_string(&neighbors)?);
        }
    }

    Ok(())
}

async fn connect(config_prefix: &str) -> anyhow::Result<GraphNodeLookup> {
    let settings = InsightConfig::load(config_prefix)?;
    let graph_config = GraphConfig::from(settings.gremlin);
    let client = GremlinClient::connect(&graph_config).await?;
    Ok(GraphNodeLookup::new(client))
}
