// src/main.rs

use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use oscgen::config::{Cli, GeneratorConfig, ListenConfig};
use oscgen::pacing::effective_rate;
use oscgen::progress::Progress;
use oscgen::{Receiver, Shutdown, create_emitter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    let shutdown = Shutdown::install().context("failed to install Ctrl-C handler")?;

    match &cli.command {
        None => {
            let config = GeneratorConfig::from_cli(&cli).context("invalid configuration")?;
            stream(&config, &shutdown)
        }
        Some(command) => listen(&command.listen_config(), &shutdown),
    }
}

//
// ===============================
// MARK: Generator
// ===============================
//

fn stream(config: &GeneratorConfig, shutdown: &Shutdown) -> Result<()> {
    let mut emitter = create_emitter(config)
        .with_context(|| format!("unable to open UDP sender for port {}", config.port))?;

    println!(
        "Generating output stream at {} Hz to port {}:",
        config.frequency, config.port
    );

    match effective_rate(config.interval) {
        Some(rate) => log::info!(
            "Pacing {:?}: {:?} between packets (~{:.1} packets/s)",
            config.pacing,
            config.interval,
            rate
        ),
        None => log::warn!(
            "Pacing {:?} yields no sleep at {} Hz; sending as fast as possible",
            config.pacing,
            config.frequency
        ),
    }

    let stdout = io::stdout().lock();
    let mut progress = if config.progress {
        Progress::new(stdout)
    } else {
        Progress::disabled(stdout)
    };

    emitter.run(shutdown, config.limit, &mut progress);
    Ok(())
}

//
// ===============================
// MARK: Receiver
// ===============================
//

fn listen(config: &ListenConfig, shutdown: &Shutdown) -> Result<()> {
    let mut receiver = Receiver::bind(config.port)
        .with_context(|| format!("unable to bind 127.0.0.1:{}", config.port))?;

    let mut stdout = io::stdout().lock();
    receiver
        .run(shutdown, config.limit, &mut stdout)
        .context("receiver failed")?;
    Ok(())
}
