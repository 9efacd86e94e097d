use crate::prelude::*;
use embassy_nrf::peripherals::WDT;
use embassy_nrf::wdt::{self, Watchdog};
use embassy_nrf::Peri;

pub mod mic;
pub mod pipeline;
pub mod speaker;

// Re-exports
pub use mic::*;
pub use pipeline::*;
pub use speaker::*;

/// Watchdog period in 32.768 kHz ticks, well above the 2 s pet interval.
const WDT_TIMEOUT_TICKS: u32 = 32_768 * 8;

// Keeps our system alive
#[embassy_executor::task]
pub async fn watchdog_task(wdt: Peri<'static, WDT>) {
    let Some(mut wdt_config) = wdt::Config::try_new(&wdt) else {
        wait_for_watchdog_reset();
    };
    wdt_config.timeout_ticks = WDT_TIMEOUT_TICKS;
    let (_wdt, [mut handle]) = match Watchdog::try_new(wdt, wdt_config) {
        Ok(x) => x,
        Err(_) => wait_for_watchdog_reset(),
    };
    loop {
        handle.pet();
        Timer::after(Duration::from_secs(2)).await;
    }
}

/// The watchdog was left running by a previous image with settings we
/// cannot take over. Let it expire.
fn wait_for_watchdog_reset() -> ! {
    warn!("Watchdog already running, waiting for it to time out");
    loop {
        cortex_m::asm::wfe();
    }
}
