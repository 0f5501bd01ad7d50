use tracing::{Span, Subscriber};
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

pub const CLI_FILTER: &str = "lead_intake=info";
pub const CLI_VERBOSE_FILTER: &str = "lead_intake=debug,info";
pub const RELAY_FILTER: &str = "lead_intake=info,relay=info";

/// `RUST_LOG` wins over the built-in default.
fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_cli_logger(verbose: bool) {
    let default = if verbose { CLI_VERBOSE_FILTER } else { CLI_FILTER };

    tracing_subscriber::registry()
        .with(env_filter(default))
        .with(fmt::layer().with_target(false).compact())
        .init();
}

/// JSON lines with the event fields flattened to the top level; events inside
/// [`relay_span`] carry its `request_id` under `span`.
pub fn relay_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_target(false)
            .without_time() // 函數平台自己加時間戳
            .with_writer(writer),
    )
}

pub fn init_lambda_logger() {
    relay_subscriber(env_filter(RELAY_FILTER), std::io::stdout).init();
}

/// One span per function invocation.
pub fn relay_span(request_id: &str) -> Span {
    tracing::info_span!("relay_invocation", request_id = %request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_default_filters_parse() {
        for directive in [CLI_FILTER, CLI_VERBOSE_FILTER, RELAY_FILTER] {
            assert!(EnvFilter::try_new(directive).is_ok(), "{}", directive);
        }
    }

    #[test]
    fn test_relay_events_carry_request_id() {
        let captured = Captured::default();
        let subscriber = relay_subscriber(EnvFilter::new(RELAY_FILTER), captured.clone());

        tracing::subscriber::with_default(subscriber, || {
            relay_span("req-7").in_scope(|| {
                tracing::info!(status = 200, "Notification relay responded");
            });
        });

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        let line: serde_json::Value = serde_json::from_str(output.trim()).unwrap();

        assert_eq!(line["level"], "INFO");
        assert_eq!(line["message"], "Notification relay responded");
        assert_eq!(line["status"], 200);
        assert_eq!(line["span"]["name"], "relay_invocation");
        assert_eq!(line["span"]["request_id"], "req-7");
        assert!(line.get("timestamp").is_none());
    }
}
