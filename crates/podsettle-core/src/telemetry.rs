//! Log setup for the `podsettle` binary.
//!
//! Check results are printed to stdout, so every log line goes to stderr.
//! With `--verbose` the check's own debug output (listings, extracted facts,
//! verdicts) is wanted, but the kube client stack underneath is kept at
//! `warn` unless `RUST_LOG` asks for more.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates that log every HTTP round trip at debug level.
const QUIET_TARGETS: &[&str] = &["kube", "kube_client", "hyper", "hyper_util", "tower", "rustls"];

fn default_directives(level: Level) -> String {
    let mut directives = level.as_str().to_lowercase();
    for target in QUIET_TARGETS {
        directives.push_str(&format!(",{}=warn", target));
    }
    directives
}

/// Install the stderr subscriber for a check run.
///
/// `json` switches to one JSON object per line for CI log collectors.
/// `level` applies when `RUST_LOG` is unset. A second call is a no-op.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_quiet_client_stack() {
        let directives = default_directives(Level::DEBUG);
        assert!(directives.starts_with("debug,"));
        assert!(directives.contains("kube=warn"));
        assert!(directives.contains("hyper=warn"));
        assert!(directives.parse::<EnvFilter>().is_ok());
    }

    #[test]
    fn test_init_tracing_is_repeatable() {
        init_tracing(false, Level::INFO);
        init_tracing(true, Level::DEBUG);
    }
}
