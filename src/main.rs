//! edl CLI - Drive vehicle handover inspections from the shell

use clap::Parser;
use edl::cli::{Cli, Commands};
use edl::errors::to_exit_code;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error [{}]: {}", e.code(), e);
            std::process::exit(to_exit_code(&e));
        }
    }
}

fn run(cli: Cli) -> edl::Result<()> {
    let cwd = cli.cwd.as_deref();
    match cli.command {
        Some(Commands::Init { force }) => edl::cli::commands::init::run(cwd, force),
        Some(Commands::Create {
            from,
            brand,
            model,
            plate,
            client,
            provider,
            urgency,
            json,
        }) => {
            let args = edl::cli::commands::create::CreateArgs {
                from,
                brand,
                model,
                plate,
                client,
                provider,
                urgency,
            };
            edl::cli::commands::create::run(cwd, args, json).map(|_| ())
        }
        Some(Commands::Stats { json }) => edl::cli::commands::stats::run(cwd, json).map(|_| ()),
        Some(Commands::Show { code, json }) => edl::cli::commands::show::run(cwd, &code, json),
        Some(Commands::Track { code, json }) => edl::cli::commands::track::run(cwd, &code, json).map(|_| ()),
        Some(Commands::Replay { code, events, json }) => {
            edl::cli::commands::replay::run(cwd, &code, &events, json)
        }
        None => {
            // Default to showing help - clap handles this
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
