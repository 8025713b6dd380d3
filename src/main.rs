use clap::Parser;
use oco2_peak::cli::{run, Cli};
use oco2_peak::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
