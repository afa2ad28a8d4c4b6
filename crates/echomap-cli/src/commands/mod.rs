pub mod dashboard;
pub mod watch;

use std::time::Duration;

use echomap_link::LinkConfig;

/// Build a link configuration from the shared CLI flags.
pub fn make_link_config(url: &str, reconnect_ms: u64) -> LinkConfig {
    LinkConfig::new(url).with_reconnect_delay(Duration::from_millis(reconnect_ms))
}
