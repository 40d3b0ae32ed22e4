use crate::terminal::TerminalSize;
use crate::wave::{ShakeCode, WaveError, WavePattern};
use crate::Cli;
use fastrand::Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Time between two frames.
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(16);

/// Number of beats in a turbulent shake code.
pub(crate) const TURBULENCE_INTENSITY: usize = 99;

/// Size reported when the terminal can't be queried.
pub(crate) const DEFAULT_SIZE: TerminalSize = TerminalSize::new(1, 32);

/// Everything the animation needs before it starts.
#[derive(Clone, Debug)]
pub(crate) struct WaveConfig {
    pub(crate) pattern: WavePattern,
    pub(crate) period: Duration,
    /// Randomizes each sleep by up to `±50% / jitter`; 0 keeps the period fixed.
    pub(crate) jitter: u32,
    pub(crate) default_size: TerminalSize,
}

impl WaveConfig {
    pub(crate) fn from_cli(cli: &Cli, rng: &mut Rng) -> Result<Self, WaveError> {
        let mut config = Self::default();
        if cli.turbulence {
            config.pattern.shake = ShakeCode::turbulent(TURBULENCE_INTENSITY, rng)?;
            tracing::debug!("turbulent shake code: {}", config.pattern.shake);
        }
        Ok(config)
    }
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self { pattern: WavePattern::default(), period: TICK_PERIOD, jitter: 0, default_size: DEFAULT_SIZE }
    }
}

/// A seed derived from the current time.
pub(crate) fn time_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|elapsed| elapsed.as_nanos() as u64).unwrap_or_default()
}
