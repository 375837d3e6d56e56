//! `env_logger` setup for hosts of the lock-on core.
//!
//! The library only emits through `log`. Hosts call [`init`] once; the
//! default filter keeps Bevy's own records at `warn` so lunge traces are not
//! drowned out, and `RUST_LOG` replaces it entirely when set.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter applied when `RUST_LOG` is unset.
///
/// `verbose` lowers this crate to `debug`, where commits and attack ends are
/// logged. Everything else stays one level quieter.
#[must_use]
pub fn default_filter(verbose: bool) -> String {
    let (others, ours) = if verbose {
        (LevelFilter::Info, LevelFilter::Debug)
    } else {
        (LevelFilter::Warn, LevelFilter::Info)
    };
    format!(
        "{},{}={}",
        others.as_str().to_ascii_lowercase(),
        env!("CARGO_CRATE_NAME"),
        ours.as_str().to_ascii_lowercase()
    )
}

/// Installs the global logger with [`default_filter`].
///
/// A logger that is already installed stays in place.
pub fn init(verbose: bool) {
    let installed = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)))
        .format_timestamp_millis()
        .try_init();
    if installed.is_err() {
        log::debug!("logger already installed; keeping it");
    }
}
