//! Verbosity-gated diagnostics
//!
//! The subscriber is installed as a scoped default for the lifetime of the
//! returned guard. In quiet mode nothing is recorded, so standard output only
//! ever carries the status line.

use tracing::level_filters::LevelFilter;
use tracing::subscriber::{self, DefaultGuard, NoSubscriber};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;

pub fn init(verbose: bool) -> DefaultGuard {
    if !verbose {
        return subscriber::set_default(NoSubscriber::default());
    }
    subscriber::set_default(diagnostics(std::io::stdout))
}

/// Plain text, no colour codes: the monitoring system may capture it
fn diagnostics<W>(writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(LevelFilter::DEBUG)
        .with_target(false)
        .without_time()
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_quiet_mode_disables_debug() {
        let _guard = init(false);
        assert!(!tracing::enabled!(tracing::Level::ERROR));
    }

    #[test]
    fn test_verbose_mode_enables_debug() {
        let _guard = init(true);
        assert!(tracing::enabled!(tracing::Level::DEBUG));
        assert!(!tracing::enabled!(tracing::Level::TRACE));
    }

    #[test]
    fn test_diagnostics_are_plain_text() {
        let captured = Captured::default();
        let sink = captured.clone();
        subscriber::with_default(diagnostics(move || sink.clone()), || {
            tracing::warn!("fan 3 speed = 95");
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("fan 3 speed = 95"));
        assert!(!output.contains('\x1b'));
    }
}
