use std::io::{self, Write};

/// Spawn a background thread that ends the process on SIGINT or SIGTERM.
///
/// The line the wave is drawn on is left as is and a newline is printed after it so the shell
/// prompt starts on a fresh line. The animation loop is not told about it: the process just exits
/// with status 0.
#[cfg(unix)]
pub(crate) fn install_exit_watcher() -> io::Result<()> {
    use signal_hook::consts::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    std::thread::Builder::new().name("bwave-signals".into()).spawn(move || {
        if let Some(signal) = signals.forever().next() {
            tracing::debug!("received signal {signal}, exiting");
            finish_line(&mut io::stdout());
            std::process::exit(0);
        }
    })?;
    Ok(())
}

#[cfg(not(unix))]
pub(crate) fn install_exit_watcher() -> io::Result<()> {
    Ok(())
}

#[cfg_attr(not(unix), allow(dead_code))]
fn finish_line<W: Write>(out: &mut W) {
    // Nothing sensible to do if the terminal is already gone.
    let _ = writeln!(out);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_line_writes_newline() {
        let mut out = Vec::new();
        finish_line(&mut out);
        assert_eq!(out, b"\n");
    }
}
