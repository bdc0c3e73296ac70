//! dnsweeper - audit DNS zone exports for stale and risky records.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    dnsweeper_cli::run().await
}
