mod cli;
mod commands;
mod installers;
mod libs;
mod logger;
mod schemas;

use clap::Parser;
use cli::cmd_enums::{Cli, Commands};
use colored::Colorize;
use commands::{clean, init, install, version};
use libs::utilities::platform::detect_platform;

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    // The platform is resolved exactly once; everything downstream dispatches on it.
    let platform = cli.platform.unwrap_or_else(detect_platform);
    log_debug!("Resolved platform: {}", platform.to_string().cyan());

    let outcome = match cli.command {
        Commands::Version => {
            version::run();
            Ok(())
        }
        Commands::Init {
            python,
            upgrade,
            dir,
            activepython,
            config,
        } => init::run(
            platform,
            init::InitArgs {
                python,
                upgrade,
                dir,
                activepython,
                config,
            },
        ),
        Commands::Install { package, dir, upgrade } => install::run(platform, &package, &dir, upgrade),
        Commands::Clean { dir } => clean::run(&dir),
    };

    if let Err(e) = outcome {
        log_error!("{:#}", e);
        std::process::exit(1);
    }
}
