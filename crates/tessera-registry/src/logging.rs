// SPDX-FileCopyrightText: 2026 Tessera Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracing subscriber setup for hosts that do not install their own.

use tracing_subscriber::EnvFilter;

const CRATES: [&str; 4] = [
    "tessera_core",
    "tessera_registry",
    "tessera_analytics",
    "tessera_config",
];

/// Filter directives enabling `log_level` for Tessera crates and `warn` elsewhere.
pub fn filter_directives(log_level: &str) -> String {
    let mut directives: Vec<String> = CRATES
        .iter()
        .map(|krate| format!("{krate}={log_level}"))
        .collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Install a formatted subscriber filtered at `log_level` for Tessera crates.
///
/// `RUST_LOG` takes precedence when set. Returns `false` if a global
/// subscriber was already installed, which leaves the existing one in place.
pub fn init_tracing(log_level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_cover_every_crate() {
        let directives = filter_directives("debug");
        assert_eq!(
            directives,
            "tessera_core=debug,tessera_registry=debug,tessera_analytics=debug,tessera_config=debug,warn"
        );
    }

    #[test]
    fn directives_parse_as_env_filter() {
        for level in ["trace", "debug", "info", "warn", "error"] {
            assert!(EnvFilter::try_new(filter_directives(level)).is_ok(), "{level}");
        }
    }
}
