use std::{cell::RefCell, process::ExitCode};

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use profile_card::{
    cli::{Cli, Commands},
    error::AppError,
    menu::run_menu,
    notify::ConsoleNotifier,
    picture::DataUriEncoder,
    render::render_profile,
    session::ProfileEditSession,
    storage::load_seed,
    validation::check_value,
};

// Main
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_string().red());
            ExitCode::FAILURE
        }
    }
}

/// Sets up `tracing` output on stderr, level taken from `LOG_LEVEL`
fn init_logging() {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "warn".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set up logging: {e}");
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Some(Commands::Show) => {
            let profile = load_seed(cli.seed.as_deref())?;
            println!("{}", render_profile(&profile));
        }
        Some(Commands::Validate { field, value }) => show_validation(&field, &value)?,
        None => {
            let profile = load_seed(cli.seed.as_deref())?;
            let session = RefCell::new(ProfileEditSession::new(profile, ConsoleNotifier));
            run_menu(&session, &DataUriEncoder).await?;
        }
    }
    Ok(())
}

/// Prints the validator verdict for one field value, failing when invalid
fn show_validation(field: &str, value: &str) -> Result<(), AppError> {
    let field = check_value(field, value)?;
    println!("{}", format!("{} is valid", field.label()).green());
    Ok(())
}
