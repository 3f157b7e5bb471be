//! Logging setup shared by the demo programs.

use std::io::IsTerminal as _;

use rama::error::{BoxError, ErrorContext as _};
use tracing_subscriber::{
    EnvFilter, filter::Directive, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive` when it is unset.
pub fn init_tracing(default_directive: impl Into<Directive>) -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(std::io::stderr().is_terminal()))
        .with(
            EnvFilter::builder()
                .with_default_directive(default_directive.into())
                .from_env_lossy(),
        )
        .try_init()
        .context("try init (default) tracing subscriber")?;

    Ok(())
}
