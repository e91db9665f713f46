use biometrics::{Collector, Counter, Moments};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

pub(crate) static EXCHANGES: Counter = Counter::new("propchat.chat.exchanges");
pub(crate) static EXCHANGE_FAILURES: Counter = Counter::new("propchat.chat.exchange_failures");
pub(crate) static EXCHANGES_IGNORED: Counter = Counter::new("propchat.chat.exchanges_ignored");
pub(crate) static EXCHANGE_DURATION: Moments =
    Moments::new("propchat.chat.exchange_duration_seconds");

pub(crate) static SESSION_UPDATES: Counter = Counter::new("propchat.session.updates");
pub(crate) static SESSION_STORE_ERRORS: Counter = Counter::new("propchat.session.store_errors");
pub(crate) static SESSION_RESETS: Counter = Counter::new("propchat.session.resets");

pub(crate) static LISTINGS_RENDERED: Counter = Counter::new("propchat.listings.rendered");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&EXCHANGES);
    collector.register_counter(&EXCHANGE_FAILURES);
    collector.register_counter(&EXCHANGES_IGNORED);
    collector.register_moments(&EXCHANGE_DURATION);

    collector.register_counter(&SESSION_UPDATES);
    collector.register_counter(&SESSION_STORE_ERRORS);
    collector.register_counter(&SESSION_RESETS);

    collector.register_counter(&LISTINGS_RENDERED);
}

/// Builds the log filter from `RUST_LOG`-style directives.
///
/// Without directives everything at `warn` and above is logged.  Any
/// directive given replaces that default, so `debug` lowers the level.
/// Malformed directives are skipped.
pub fn log_filter(directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives.unwrap_or_default())
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

    fn logged_with(directives: Option<&str>) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(log_filter(directives))
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!("adopted new agent session");
            tracing::warn!("agent exchange failed");
        });
        let bytes = captured.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn default_filter_is_warn() {
        let logged = logged_with(None);
        assert!(logged.contains("agent exchange failed"));
        assert!(!logged.contains("adopted new agent session"));
    }

    #[test]
    fn directives_can_lower_the_level() {
        let logged = logged_with(Some("debug"));
        assert!(logged.contains("adopted new agent session"));
        assert!(logged.contains("agent exchange failed"));
    }

    #[test]
    fn directives_can_target_this_crate() {
        let logged = logged_with(Some("error,propchat=debug"));
        assert!(logged.contains("adopted new agent session"));
    }

    #[test]
    fn malformed_directives_fall_back_to_warn() {
        let logged = logged_with(Some("propchat=loudest"));
        assert!(logged.contains("agent exchange failed"));
        assert!(!logged.contains("adopted new agent session"));
    }

    #[test]
    fn registers_without_panicking() {
        register_biometrics(Collector::new());
    }
}
