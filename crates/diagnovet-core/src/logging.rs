//! Log output for hosts that do not install their own subscriber.

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global fmt subscriber filtered at `level`.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_logging(level: Level) -> bool {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
