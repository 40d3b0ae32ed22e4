mod buffer;
mod pattern;

pub(crate) use buffer::WaveBuffer;
pub(crate) use pattern::{ShakeCode, SymbolTable, WaveError, WavePattern};
