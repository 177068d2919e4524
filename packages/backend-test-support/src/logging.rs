//! Tracing setup shared by the polis unit and integration tests.
//!
//! Filter precedence: `POLIS_TEST_LOG`, then `RUST_LOG`, then
//! [`DEFAULT_FILTER`]. Setting `POLIS_TEST_LOG_FORMAT=json` switches to one
//! JSON object per event, which is easier to grep for `trace_id` when chasing
//! a room conflict across concurrent requests.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

/// Quiet by default; SQL statement logging from sqlx is muted entirely.
pub const DEFAULT_FILTER: &str = "warn,sqlx=off,sea_orm=warn";

const FILTER_VARS: [&str; 2] = ["POLIS_TEST_LOG", "RUST_LOG"];
const FORMAT_VAR: &str = "POLIS_TEST_LOG_FORMAT";

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// The filter directive in effect for this process.
pub fn filter_directive() -> String {
    FILTER_VARS
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned())
}

fn wants_json() -> bool {
    std::env::var(FORMAT_VAR)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Install the test subscriber once. Safe to call from every test.
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter =
            EnvFilter::try_new(filter_directive()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let builder = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true);

        // another harness may have installed a global subscriber first
        if wants_json() {
            builder.json().with_current_span(true).try_init().ok();
        } else {
            builder.without_time().compact().try_init().ok();
        }
    });
}
