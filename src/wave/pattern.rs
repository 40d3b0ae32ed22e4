use fastrand::Rng;
use std::fmt;

/// The default shake code: which beats of the wave carry a bump.
pub(crate) const DEFAULT_SHAKE_CODE: &str = "010110111011";

/// One oscillation of the wave drawn with Braille dots.
pub(crate) const DEFAULT_SYMBOLS: &str = "⠤⣄⣀⣠⠤⠖⠒⠋⠉⠙⠒⠲";

/// Errors that can occur when building a wave pattern
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum WaveError {
    #[error("shake code must contain at least one bit")]
    EmptyShakeCode,

    #[error("invalid shake code bit '{0}', expected '0' or '1'")]
    InvalidBit(char),

    #[error("symbol table must contain at least one glyph")]
    EmptySymbolTable,
}

/// Cyclic sequence of beats, each either flat (`false`) or active (`true`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ShakeCode(Vec<bool>);

impl ShakeCode {
    pub(crate) fn new(bits: Vec<bool>) -> Result<Self, WaveError> {
        if bits.is_empty() {
            return Err(WaveError::EmptyShakeCode);
        }
        Ok(Self(bits))
    }

    /// Parse a shake code written as a string of `0` and `1` characters.
    pub(crate) fn from_bits(bits: &str) -> Result<Self, WaveError> {
        let bits = bits
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(WaveError::InvalidBit(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(bits)
    }

    /// Build a random shake code of `length` uniformly distributed bits.
    ///
    /// This is what turbulence mode uses: every beat is still one full oscillation, but which
    /// beats are active is no longer a regular pattern.
    pub(crate) fn turbulent(length: usize, rng: &mut Rng) -> Result<Self, WaveError> {
        let bits = (0..length).map(|_| rng.bool()).collect();
        Self::new(bits)
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the beat at `index` is active, wrapping around the end of the code.
    pub(crate) fn is_active(&self, index: usize) -> bool {
        self.0[index % self.0.len()]
    }
}

impl Default for ShakeCode {
    fn default() -> Self {
        Self::from_bits(DEFAULT_SHAKE_CODE).expect("default shake code is valid")
    }
}

impl fmt::Display for ShakeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.0 {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// The glyphs making up one oscillation. The first glyph doubles as the flat line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SymbolTable(Vec<char>);

impl SymbolTable {
    pub(crate) fn new(glyphs: &str) -> Result<Self, WaveError> {
        let glyphs: Vec<char> = glyphs.chars().collect();
        if glyphs.is_empty() {
            return Err(WaveError::EmptySymbolTable);
        }
        Ok(Self(glyphs))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn flat(&self) -> char {
        self.0[0]
    }

    pub(crate) fn get(&self, index: usize) -> char {
        self.0[index]
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new(DEFAULT_SYMBOLS).expect("default symbols are valid")
    }
}

/// A shake code paired with the symbols it animates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct WavePattern {
    pub(crate) shake: ShakeCode,
    pub(crate) symbols: SymbolTable,
}

impl Default for WavePattern {
    fn default() -> Self {
        Self::new(ShakeCode::default(), SymbolTable::default())
    }
}

impl WavePattern {
    pub(crate) fn new(shake: ShakeCode, symbols: SymbolTable) -> Self {
        Self { shake, symbols }
    }

    /// The glyph emitted on the given frame.
    ///
    /// Each shake code bit holds for a full pass over the symbol table. While a bit is active the
    /// phase walks the table backwards, which makes the wave appear to travel right as new glyphs
    /// get prepended to the line.
    pub(crate) fn glyph_at(&self, frame: u64) -> char {
        let symbols = self.symbols.len() as u64;
        let beat = ((frame / symbols) % self.shake.len() as u64) as usize;
        if !self.shake.is_active(beat) {
            return self.symbols.flat();
        }
        let phase = symbols - 1 - (frame % symbols);
        self.symbols.get(phase as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_pattern() {
        let pattern = WavePattern::default();
        assert_eq!(pattern.shake.len(), 12);
        assert_eq!(pattern.shake.to_string(), DEFAULT_SHAKE_CODE);
        assert_eq!(pattern.symbols.len(), 12);
        assert_eq!(pattern.symbols.flat(), '⠤');
    }

    #[rstest]
    #[case::empty("", WaveError::EmptyShakeCode)]
    #[case::letter("01a1", WaveError::InvalidBit('a'))]
    #[case::space("0 1", WaveError::InvalidBit(' '))]
    fn invalid_shake_code(#[case] input: &str, #[case] expected: WaveError) {
        assert_eq!(ShakeCode::from_bits(input), Err(expected));
    }

    #[test]
    fn empty_symbol_table() {
        assert_eq!(SymbolTable::new(""), Err(WaveError::EmptySymbolTable));
    }

    #[test]
    fn shake_code_wraps() {
        let code = ShakeCode::from_bits("01").expect("invalid code");
        assert!(!code.is_active(0));
        assert!(code.is_active(1));
        assert!(!code.is_active(2));
        assert!(code.is_active(7));
    }

    #[test]
    fn first_beat_holds_for_a_full_oscillation() {
        // The default code starts with a flat beat, so the whole first pass is flat.
        let pattern = WavePattern::default();
        for frame in 0..12 {
            assert_eq!(pattern.glyph_at(frame), '⠤', "frame {frame}");
        }
        // Second beat is active: the phase runs backwards through the table.
        assert_eq!(pattern.glyph_at(12), '⠲');
        assert_eq!(pattern.glyph_at(13), '⠒');
        assert_eq!(pattern.glyph_at(23), '⠤');
    }

    #[test]
    fn active_beat_walks_table_in_reverse() {
        let symbols = SymbolTable::new("FAB").expect("invalid symbols");
        let shake = ShakeCode::from_bits("1").expect("invalid code");
        let pattern = WavePattern::new(shake, symbols);
        let glyphs: String = (0..6).map(|frame| pattern.glyph_at(frame)).collect();
        assert_eq!(glyphs, "BAFBAF");
    }

    #[test]
    fn pattern_wraps_after_all_beats() {
        let pattern = WavePattern::default();
        let cycle = 12 * 12;
        for frame in 0..cycle {
            assert_eq!(pattern.glyph_at(frame), pattern.glyph_at(frame + cycle));
        }
    }

    #[test]
    fn turbulent_length() {
        let mut rng = Rng::with_seed(42);
        let code = ShakeCode::turbulent(99, &mut rng).expect("invalid code");
        assert_eq!(code.len(), 99);
        assert!(code.to_string().chars().all(|c| c == '0' || c == '1'));
    }

    #[test]
    fn turbulent_seeds_differ() {
        let first = ShakeCode::turbulent(99, &mut Rng::with_seed(1)).expect("invalid code");
        let second = ShakeCode::turbulent(99, &mut Rng::with_seed(2)).expect("invalid code");
        assert_ne!(first, second);
    }

    #[test]
    fn turbulent_requires_length() {
        let mut rng = Rng::with_seed(7);
        assert_eq!(ShakeCode::turbulent(0, &mut rng), Err(WaveError::EmptyShakeCode));
    }
}
