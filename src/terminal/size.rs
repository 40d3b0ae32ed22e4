use std::process::{Command, Stdio};

/// Dimensions of the terminal, in character cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TerminalSize {
    pub(crate) lines: u16,
    pub(crate) columns: u16,
}

impl TerminalSize {
    pub(crate) const fn new(lines: u16, columns: u16) -> Self {
        Self { lines, columns }
    }
}

/// Errors that can occur when querying the terminal size
#[derive(thiserror::Error, Debug)]
pub enum SizeError {
    #[error("failed to run '{0}': {1}")]
    Spawn(String, std::io::Error),

    #[error("'{0}' exited with {1}")]
    Failed(String, std::process::ExitStatus),

    #[error("unexpected size output: {0:?}")]
    Malformed(String),
}

/// A source of terminal dimensions, queried once per frame.
pub(crate) trait SizeSource {
    fn size(&mut self) -> TerminalSize;
}

/// Parse the `"<lines> <columns>"` output of `stty size`.
pub(crate) fn parse_size(output: &str) -> Result<TerminalSize, SizeError> {
    let trimmed = output.trim_matches(|c| c == ' ' || c == '\n');
    let malformed = || SizeError::Malformed(output.to_string());
    let (lines, columns) = trimmed.split_once(' ').ok_or_else(malformed)?;
    let is_number = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_number(lines) || !is_number(columns) {
        return Err(malformed());
    }
    let lines = lines.parse().map_err(|_| malformed())?;
    let columns = columns.parse().map_err(|_| malformed())?;
    Ok(TerminalSize::new(lines, columns))
}

/// Terminal size obtained by running `stty size` against our stdin.
///
/// Whether the tool is usable is decided once, in [SttySize::probe]. When it isn't, the default
/// size is reported forever without spawning anything. When it is, a failed query later on
/// falls back to the last size we managed to read.
#[derive(Debug)]
pub(crate) struct SttySize {
    program: String,
    args: Vec<String>,
    usable: bool,
    default: TerminalSize,
    last_known: TerminalSize,
}

impl SttySize {
    pub(crate) fn probe(default: TerminalSize) -> Self {
        Self::probe_command("stty", &["size"], default)
    }

    pub(crate) fn probe_command(program: &str, args: &[&str], default: TerminalSize) -> Self {
        let mut this = Self {
            program: program.to_string(),
            args: args.iter().map(|arg| arg.to_string()).collect(),
            usable: false,
            default,
            last_known: default,
        };
        match this.query() {
            Ok(size) => {
                tracing::debug!("terminal size query is usable, got {size:?}");
                this.usable = true;
                this.last_known = size;
            }
            Err(e) => {
                tracing::debug!("terminal size query unusable, defaulting to {default:?}: {e}");
            }
        }
        this
    }

    pub(crate) fn is_usable(&self) -> bool {
        self.usable
    }

    fn query(&self) -> Result<TerminalSize, SizeError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| SizeError::Spawn(self.program.clone(), e))?;
        if !output.status.success() {
            return Err(SizeError::Failed(self.program.clone(), output.status));
        }
        parse_size(&String::from_utf8_lossy(&output.stdout))
    }
}

impl SizeSource for SttySize {
    fn size(&mut self) -> TerminalSize {
        if !self.usable {
            return self.default;
        }
        match self.query() {
            Ok(size) => {
                self.last_known = size;
                size
            }
            Err(e) => {
                // Usually the terminal going away while we're being interrupted.
                tracing::warn!("terminal size query failed, reusing {:?}: {e}", self.last_known);
                self.last_known
            }
        }
    }
}

/// A size that never changes.
#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub(crate) struct FixedSize(pub(crate) TerminalSize);

#[cfg(test)]
impl SizeSource for FixedSize {
    fn size(&mut self) -> TerminalSize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const DEFAULT: TerminalSize = TerminalSize::new(1, 32);

    #[rstest]
    #[case::plain("24 80", 24, 80)]
    #[case::newline("24 80\n", 24, 80)]
    #[case::padded(" 50 132 \n", 50, 132)]
    fn parse_valid(#[case] input: &str, #[case] lines: u16, #[case] columns: u16) {
        let size = parse_size(input).expect("parse failed");
        assert_eq!(size, TerminalSize::new(lines, columns));
    }

    #[rstest]
    #[case::empty("")]
    #[case::single("24")]
    #[case::separator("24x80")]
    #[case::double_space("24  80")]
    #[case::negative("-24 80")]
    #[case::extra("24 80 1")]
    #[case::overflow("24 99999999")]
    fn parse_invalid(#[case] input: &str) {
        assert!(matches!(parse_size(input), Err(SizeError::Malformed(_))));
    }

    #[test]
    fn missing_tool_uses_default() {
        let mut source = SttySize::probe_command("bwave-no-such-tool", &[], DEFAULT);
        assert!(!source.is_usable());
        assert_eq!(source.size(), DEFAULT);
        assert_eq!(source.size(), DEFAULT);
    }

    #[test]
    fn unexpected_output_uses_default() {
        let mut source = SttySize::probe_command("echo", &["not a size"], DEFAULT);
        assert!(!source.is_usable());
        assert_eq!(source.size(), DEFAULT);
    }

    #[test]
    fn usable_tool_is_queried() {
        let mut source = SttySize::probe_command("echo", &["40", "100"], DEFAULT);
        assert!(source.is_usable());
        assert_eq!(source.size(), TerminalSize::new(40, 100));
    }

    #[test]
    fn failure_after_probe_reuses_last_known() {
        let mut source = SttySize::probe_command("echo", &["40", "100"], DEFAULT);
        assert!(source.is_usable());
        source.program = "bwave-no-such-tool".to_string();
        assert_eq!(source.size(), TerminalSize::new(40, 100));
    }

    #[test]
    fn fixed_size() {
        let mut source = FixedSize(TerminalSize::new(10, 20));
        assert_eq!(source.size(), TerminalSize::new(10, 20));
    }
}
