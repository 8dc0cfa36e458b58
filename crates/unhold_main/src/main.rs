use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unhold_app::{ForceDelete, ForceMove};
use unhold_infra::UnholdInfra;

mod cli;

use cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let infra = Arc::new(UnholdInfra::new());

    let outcome = match &cli.move_to {
        Some(destination) => {
            ForceMove::new(infra)
                .force_move(&cli.path, destination, cli.schedule_on_reboot)
                .await
        }
        None => {
            ForceDelete::new(infra)
                .force_delete(&cli.path, cli.schedule_on_reboot)
                .await
        }
    };

    println!("{outcome}");
    ExitCode::from(outcome.exit_code())
}
