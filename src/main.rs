use clap::Parser;
use method_interceptor::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::LoadTest(args) => cli::load_test::run(args).await,
    }
}
