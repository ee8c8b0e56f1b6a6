use anyhow::Result;
use partmap::cli::{self, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = cli::parse_args();

    match cli.command {
        Commands::Partition(args) => {
            init_tracing(args.verbosity);
            partmap::commands::handle_partition(args)
        }
        Commands::Init { force } => {
            init_tracing(0);
            partmap::commands::init_config(force)
        }
    }
}

/// RUST_LOG wins when set; otherwise each -v raises the default level.
fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "partmap=warn",
        1 => "partmap=info",
        2 => "partmap=debug",
        _ => "partmap=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
