use crate::config::WaveConfig;
use crate::terminal::SizeSource;
use crate::wave::{WaveBuffer, WavePattern};
use crossterm::{
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use fastrand::Rng;
use std::io::{self, Write};
use std::time::Duration;

/// Terminals at least this wide get the full-length wave.
const WIDE_TERMINAL_COLUMNS: u16 = 64;

/// Length of the wave on wide terminals.
const MAX_WAVE_LENGTH: usize = 58;

/// Columns kept free on narrow terminals.
const NARROW_MARGIN: u16 = 6;

/// Number of glyphs to draw on a terminal with the given number of columns.
pub(crate) fn visible_width(columns: u16) -> usize {
    if columns >= WIDE_TERMINAL_COLUMNS {
        MAX_WAVE_LENGTH
    } else {
        columns.saturating_sub(NARROW_MARGIN) as usize
    }
}

/// Sleeps between frames.
#[derive(Debug)]
pub(crate) struct TickTimer {
    period: Duration,
    jitter: u32,
    rng: Rng,
}

impl TickTimer {
    pub(crate) fn new(period: Duration, jitter: u32, rng: Rng) -> Self {
        Self { period, jitter, rng }
    }

    /// The next delay: the period itself, or with jitter `n` a random `[50%, 50% + 100%/n)` of it.
    pub(crate) fn next_delay(&mut self) -> Duration {
        if self.jitter == 0 {
            return self.period;
        }
        let scale = self.rng.f64() / self.jitter as f64 + 0.5;
        self.period.mul_f64(scale)
    }

    fn wait(&mut self) {
        std::thread::sleep(self.next_delay());
    }
}

/// Mutable animation state, carried from one tick to the next.
#[derive(Debug, Default)]
pub(crate) struct WaveState {
    pub(crate) frame: u64,
    pub(crate) buffer: WaveBuffer,
}

/// Redraws the wave on a single line, forever.
pub(crate) struct Driver<S, W> {
    pattern: WavePattern,
    sizes: S,
    output: W,
    timer: TickTimer,
    state: WaveState,
}

impl<S: SizeSource, W: Write> Driver<S, W> {
    pub(crate) fn new(config: WaveConfig, sizes: S, output: W, rng: Rng) -> Self {
        Self {
            pattern: config.pattern,
            sizes,
            output,
            timer: TickTimer::new(config.period, config.jitter, rng),
            state: WaveState::default(),
        }
    }

    /// Run the animation. This only returns if writing to the output fails.
    pub(crate) fn run(&mut self) -> io::Result<()> {
        loop {
            self.tick()?;
            self.timer.wait();
        }
    }

    /// Draw one frame and move on to the next one. Returns the glyphs that were drawn.
    pub(crate) fn tick(&mut self) -> io::Result<String> {
        let size = self.sizes.size();
        let width = visible_width(size.columns);
        tracing::trace!(lines = size.lines, columns = size.columns, width, frame = self.state.frame, "tick");

        self.state.buffer.advance(self.state.frame, &self.pattern, width);
        let frame = self.state.buffer.render();
        queue!(self.output, Print('\r'), Clear(ClearType::UntilNewLine), Print(&frame))?;
        self.output.flush()?;

        self.state.frame = self.state.frame.wrapping_add(1);
        Ok(frame)
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}
