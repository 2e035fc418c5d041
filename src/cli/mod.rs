//! CLI module
//!
//! - `serve`: run the HTTP server exposing every number service variant
//! - `load-test`: time repeated requests against a running server

pub mod load_test;
pub mod serve;

use clap::{Parser, Subcommand};

/// Timing and caching decorators over container-registered services
#[derive(Parser)]
#[command(name = "method-interceptor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Send timed requests to every number endpoint and write JSON reports
    LoadTest(load_test::LoadTestArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["method-interceptor", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));

        let cli = Cli::try_parse_from([
            "method-interceptor",
            "load-test",
            "--requests",
            "5",
            "--base-url",
            "http://127.0.0.1:9000",
        ])
        .unwrap();
        match cli.command {
            Command::LoadTest(args) => {
                assert_eq!(args.requests, Some(5));
                assert_eq!(args.base_url.as_deref(), Some("http://127.0.0.1:9000"));
                assert!(args.output_dir.is_none());
            }
            Command::Serve => panic!("expected load-test"),
        }
    }
}
