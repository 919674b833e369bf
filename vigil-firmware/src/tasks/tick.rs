//! Tick task for the alert poll
//!
//! Signals the alert task once per poll period with the time since boot.
//! A signal that has not been consumed yet is overwritten, so a slow
//! evaluation never queues up overlapping ticks.

use defmt::*;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

/// Signal to notify the alert task of a tick (milliseconds since start)
pub static TICK_SIGNAL: Signal<CriticalSectionRawMutex, u32> = Signal::new();

/// Tick task - sends periodic tick signals with timestamp
#[embassy_executor::task]
pub async fn tick_task(period_ms: u32) {
    info!("Tick task started ({}ms period)", period_ms);

    let mut ticker = Ticker::every(Duration::from_millis(period_ms as u64));
    let start = Instant::now();

    loop {
        ticker.next().await;

        // Truncation wraps every ~49 days; phase timing uses wrapping math
        let now_ms = start.elapsed().as_millis() as u32;

        TICK_SIGNAL.signal(now_ms);
    }
}
