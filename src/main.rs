use anyhow::Result;
use clap::Parser;

use shortlife::cli::{Cli, Commands, ConfigCommands};
use shortlife::config::{get_config, init_config, init_config_from};
use shortlife::runtime::modes;
use shortlife::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Config generation needs neither config nor logging
    if let Some(Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    }) = &cli.command
    {
        return match modes::generate_config(output_path.as_deref(), *force) {
            Ok(path) => {
                println!("Sample configuration written to {}", path);
                Ok(())
            }
            Err(e) => {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        };
    }

    match cli.config.as_deref() {
        Some(path) => {
            if let Err(e) = init_config_from(path) {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
        }
        None => init_config(),
    }

    let config = get_config();
    let _guard = init_logging(&config.logging)?;

    match cli.command {
        None | Some(Commands::Serve) => modes::run_server().await,
        #[cfg(feature = "cli")]
        Some(Commands::Repl) => modes::run_repl().await,
        #[cfg(not(feature = "cli"))]
        Some(Commands::Repl) => anyhow::bail!("REPL mode requires the `cli` feature"),
        Some(Commands::Config { .. }) => Ok(()),
    }
}
