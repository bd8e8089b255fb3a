//! Tracklog CLI entry point.

use tracklog::cli::{self, Cli};
use tracklog::core::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Run the service
    cli::execute(cli).await
}
