//! Request statistics printing.

use log::info;

use crate::error_handling::RequestStats;

/// Logs the per-event request counters.
///
/// Nothing is logged for a run that made no requests.
pub fn print_request_statistics(stats: &RequestStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }

    info!("Request Counts ({} total):", total);
    for (event, count) in stats.non_zero() {
        info!("   {}: {}", event.as_str(), count);
    }
}
