use std::io::{self, Write};

use tracing::{debug, warn};

use crate::error::IntroResult;

/// Sound cues played by the intro.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// The logo is punched into its spin
    Bump,
    /// The logo locks into place
    Click,
}

/// Plays samples on behalf of the animation.
pub trait SoundSink {
    fn play(&mut self, sample: Sample);
}

/// Rings the terminal bell for every cue.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, sample: Sample) {
        debug!(?sample, "bell");
        if let Err(e) = ring(&mut io::stdout()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

fn ring(out: &mut impl Write) -> IntroResult<()> {
    out.write_all(b"\x07")?;
    out.flush()?;
    Ok(())
}

/// Drops every cue; used when sound is muted.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, sample: Sample) {
        debug!(?sample, "muted");
    }
}

/// Pick the sink for the configured sound setting.
pub fn sink(enabled: bool) -> Box<dyn SoundSink> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    }
}

/// Records every cue; lets tests observe what the animation played.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct Recorder {
    pub played: Vec<Sample>,
}

#[cfg(test)]
impl SoundSink for Recorder {
    fn play(&mut self, sample: Sample) {
        self.played.push(sample);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IntroError;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bell_writes_bel() {
        let mut out = Vec::new();
        ring(&mut out).unwrap();
        assert_eq!(out, b"\x07");
    }

    #[test]
    fn bell_write_failure_is_io_error() {
        let err = ring(&mut Closed).unwrap_err();
        assert!(matches!(err, IntroError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn muted_sink_is_silent() {
        let mut sink = sink(false);
        sink.play(Sample::Bump);
        sink.play(Sample::Click);
    }
}
