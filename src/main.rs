use clap::Parser;
use industry_rank_lib::cli::{Cli, run};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    std::process::exit(run(cli).await);
}
