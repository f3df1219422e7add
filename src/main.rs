use anyhow::Result;
use clap::Parser;
use invite_accept::cli::{self, output::print_error, Cli, Commands};
use invite_accept::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "invite_accept=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?.with_overrides(cli.api_url, cli.state_dir);

    match cli.command {
        None => cli::accept::execute(cli.accept, &config).await,
        Some(Commands::Accept(args)) => cli::accept::execute(args, &config).await,
        Some(Commands::List(cmd)) => cli::list::execute(cmd, &config, cli.format).await,
        Some(Commands::Completions(cmd)) => cli::completions::execute(cmd),
    }
}
