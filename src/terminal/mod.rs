mod signals;
mod size;

pub(crate) use signals::install_exit_watcher;
pub(crate) use size::{SizeSource, SttySize, TerminalSize};

#[cfg(test)]
pub(crate) use size::FixedSize;
