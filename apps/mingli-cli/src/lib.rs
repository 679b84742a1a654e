//! Shared start-up for the `mingli` binaries.

use anyhow::Context;
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use mingli_core::config::Config;

/// Log to stderr so chart and reference text on stdout stay clean.
/// `RUST_LOG` wins; otherwise `-v` raises the default `info` level.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    });
    fmt().with_env_filter(filter).with_target(false).with_writer(std::io::stderr).init();
}

/// Layered config from `dir`, or from the working directory.
pub fn load_config(dir: Option<&Path>) -> anyhow::Result<Config> {
    match dir {
        Some(d) => Config::load_from(d).with_context(|| format!("loading config from {}", d.display())),
        None => Config::load().context("loading config"),
    }
}
