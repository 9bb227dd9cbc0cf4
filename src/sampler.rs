//! Polling loop: reads every sensor once per [`SAMPLE_PERIOD`] and queues the frame for printing.

use adt7410_monitor::{config::SAMPLE_PERIOD, Frame};
use defmt::*;
use rtic_monotonics::{
    stm32::{Tim2 as Mono, *},
    Monotonic,
};

/// Milliseconds since boot, wrapping like a 32-bit millisecond counter
#[allow(clippy::cast_possible_truncation)]
fn timestamp_ms() -> u32 {
    Mono::now().duration_since_epoch().to_millis() as u32
}

#[cfg_attr(feature = "sizing", inline(never))]
pub async fn sampler(cx: crate::app::sampler::Context<'_>) {
    let sensors = cx.local.sensors;
    let tx = cx.local.tx;

    let period = u64::from(SAMPLE_PERIOD.to_millis());
    let mut now = Mono::now();

    loop {
        trace!("sampler");

        let frame = Frame::new(timestamp_ms(), sensors.readings());
        debug!("t={=u32}ms readings: {}", frame.timestamp_ms, frame.readings);

        if tx.try_send(frame).is_err() {
            warn!("Report queue full, dropping frame");
        }

        now += period.millis();
        Mono::delay_until(now).await;
    }
}
