use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "alliance-monitor")]
#[command(about = "Tracks inactive alliances across runs", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(short, long)]
    config: Option<String>,

    /// Snapshot file holding the monitored alliances
    #[arg(short, long)]
    snapshot: Option<String>,

    /// Number of alliances to keep monitoring
    #[arg(short, long)]
    target: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(config) = args.config {
        std::env::set_var("ALLIANCE_MONITOR_CONFIG", config);
    }
    if let Some(snapshot) = args.snapshot {
        std::env::set_var("ALLIANCE_MONITOR_SNAPSHOT_PATH", snapshot);
    }
    if let Some(target) = args.target {
        std::env::set_var("ALLIANCE_MONITOR_TARGET_SIZE", target.to_string());
    }

    monitor_bootstrap::run().await
}
