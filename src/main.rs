use anyhow::Result;
use tracing::level_filters::LevelFilter;
use yday::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logs go to stderr so stdout stays clean markdown or JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(cli.common.log_level()).into())
                .from_env_lossy(),
        )
        .init();

    cli.execute()
}
