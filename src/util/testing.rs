use std::io::Cursor;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::IoConsole;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    // RUST_LOG wins, otherwise debug
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Console fed with the given answers, one per line, capturing all output.
pub fn scripted_console(answers: &[&str]) -> IoConsole<Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = answers.join("\n");
    if !answers.is_empty() {
        input.push('\n');
    }
    IoConsole::new(Cursor::new(input.into_bytes()), Vec::new())
}

/// Captured console output as text.
pub fn captured(console: IoConsole<Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(&console.into_output()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn test_scripted_console_feeds_lines() {
        use crate::infrastructure::Console;

        let mut console = scripted_console(&["yes", "no"]);
        assert_eq!(console.ask("> ").unwrap().as_deref(), Some("yes"));
        assert_eq!(console.ask("> ").unwrap().as_deref(), Some("no"));
        assert_eq!(console.ask("> ").unwrap(), None);
        assert_eq!(captured(console), "> > > ");
    }
}
