use super::pattern::WavePattern;
use std::collections::VecDeque;

/// The glyphs currently on screen, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct WaveBuffer {
    glyphs: VecDeque<char>,
}

impl WaveBuffer {
    /// Prepend the glyph for `frame` and clip the buffer to `visible_width` glyphs.
    ///
    /// The oldest glyphs fall off the tail, so after this call the buffer holds
    /// `min(previous_len + 1, visible_width)` glyphs. A width of zero leaves it empty.
    pub(crate) fn advance(&mut self, frame: u64, pattern: &WavePattern, visible_width: usize) -> char {
        let glyph = pattern.glyph_at(frame);
        self.glyphs.push_front(glyph);
        self.glyphs.truncate(visible_width);
        glyph
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub(crate) fn render(&self) -> String {
        self.glyphs.iter().collect()
    }
}
