use crate::config::{time_seed, WaveConfig};
use crate::driver::Driver;
use crate::terminal::{install_exit_watcher, SttySize};
use anyhow::Context;
use clap::Parser;
use fastrand::Rng;
use std::io;

mod config;
mod driver;
mod logging;
mod terminal;
mod wave;

/// Draw a scrolling Braille wave on the current terminal line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    /// Make the wave rise and fall at random.
    #[arg(short, long)]
    pub(crate) turbulence: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    logging::init()?;
    install_exit_watcher().context("installing signal handlers")?;

    let mut rng = Rng::with_seed(time_seed());
    let config = WaveConfig::from_cli(&cli, &mut rng)?;
    let sizes = SttySize::probe(config.default_size);
    tracing::debug!("starting animation, size query usable: {}", sizes.is_usable());

    let mut driver = Driver::new(config, sizes, io::stdout(), rng);
    driver.run().context("drawing wave")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("\nerror: {e:#}");
        std::process::exit(1);
    }
}
