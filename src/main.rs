mod cli;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let resolver = cli.resolver();

    match cli.command {
        Command::Kv(command) => cli::kv_handler::run(&resolver, command),
        Command::Where => cli::setup_handler::show(&resolver),
        Command::Init { force } => cli::setup_handler::init(&resolver, force),
        Command::Repoint { file } => cli::setup_handler::repoint(&resolver, &file),
    }
}
