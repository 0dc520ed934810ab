use std::thread;
use std::time::Duration;
use log::debug;

const DETAIL_DELAY_SECS: u64 = 1;

/// Fixed pause between consecutive detail fetches. Politeness only; nothing
/// depends on it for correctness.
pub fn detail_fetch_delay() {
    debug!("Waiting {} second(s) before next detail fetch...", DETAIL_DELAY_SECS);
    thread::sleep(Duration::from_secs(DETAIL_DELAY_SECS));
}
