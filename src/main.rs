#![no_std]
#![no_main]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::wildcard_imports)]

mod sampler;

use defmt_rtt as _;
use panic_probe as _;
use stm32f0xx_hal::{
    gpio::{
        gpioa::{PA15, PA2},
        gpiob::{PB6, PB7},
        Alternate, AF1,
    },
    i2c::I2c,
    pac::{I2C1, USART2},
    serial::Serial,
};

type Bus = I2c<I2C1, PB6<Alternate<AF1>>, PB7<Alternate<AF1>>>;
type Usart = Serial<USART2, PA2<Alternate<AF1>>, PA15<Alternate<AF1>>>;

/// Frames waiting to be printed
const QUEUE_SIZE: usize = 2;

#[rtic::app(device = stm32f0xx_hal::pac, dispatchers = [USART1, TIM14])]
mod app {
    use adt7410_monitor::{
        config::{BAUD_RATE, I2C_SPEED_KHZ, SENSOR_COUNT},
        Adt7410Array, Frame,
    };
    use defmt::{panic, unreachable, *};
    use rtic_monotonics::{
        stm32::{Tim2 as Mono, *},
        Monotonic,
    };
    use rtic_sync::{
        channel::{ReceiveError, Receiver, Sender},
        make_channel,
    };
    use stm32f0xx_hal::{
        gpio::{Output, Pin, PushPull},
        i2c::I2c,
        pac::IWDG,
        prelude::*,
        serial::Serial,
        watchdog::Watchdog,
    };

    use crate::{Bus, Usart, QUEUE_SIZE};

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        sensors: Adt7410Array<Bus, SENSOR_COUNT>,
        tx: Sender<'static, Frame, QUEUE_SIZE>,
        usart: Usart,
    }

    #[init]
    fn init(mut cx: init::Context) -> (Shared, Local) {
        // Set system clock to 24 MHz
        let mut rcc = cx
            .device
            .RCC
            .configure()
            .hsi48()
            .sysclk(24.mhz())
            .pclk(24.mhz())
            .hclk(24.mhz())
            .freeze(&mut cx.device.FLASH);

        trace!("sysclk: {}", rcc.clocks.sysclk().0);
        trace!("hclk: {}", rcc.clocks.hclk().0);
        trace!("pclk: {}", rcc.clocks.pclk().0);

        // Enable tim2 monotonic
        let token = rtic_monotonics::create_stm32_tim2_monotonic_token!();
        Mono::start(24_000_000, token);

        // Setup GPIO
        let gpioa = cx.device.GPIOA.split(&mut rcc);
        let gpiob = cx.device.GPIOB.split(&mut rcc);
        let pb3 = gpiob.pb3.into_push_pull_output(&cx.cs);

        let _ = blinky::spawn(pb3.downgrade());
        let _ = watchdog::spawn(cx.device.IWDG);

        // Setup USART, transmit only
        let usart = Serial::usart2(
            cx.device.USART2,
            (
                gpioa.pa2.into_alternate_af1(&cx.cs),
                gpioa.pa15.into_alternate_af1(&cx.cs),
            ),
            BAUD_RATE.bps(),
            &mut rcc,
        );

        // Setup I2C & sensors
        let i2c = I2c::i2c1(
            cx.device.I2C1,
            (
                gpiob.pb6.into_alternate_af1(&cx.cs),
                gpiob.pb7.into_alternate_af1(&cx.cs),
            ),
            I2C_SPEED_KHZ.khz(),
            &mut rcc,
        );

        let mut sensors = Adt7410Array::new(i2c);
        for id in (0u8..).take(SENSOR_COUNT) {
            if sensors.add(id).is_err() {
                panic!("Failed to add sensor: OOM");
            }
        }

        match sensors.initialise_all() {
            Ok(ids) => info!("Initialised {} sensors", ids.len()),
            Err(e) => error!("Sensor initialisation failed: {}", e.as_str()),
        }

        // Setup channels
        let (tx, rx) = make_channel!(Frame, QUEUE_SIZE);

        let _ = sampler::spawn();
        let _ = report::spawn(rx);

        (Shared {}, Local { sensors, tx, usart })
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    #[task(priority = 1)]
    async fn blinky(_: blinky::Context, mut pin: Pin<Output<PushPull>>) {
        unwrap!(pin.set_low());
        let mut now = Mono::now();
        loop {
            unwrap!(pin.toggle());
            now += 500.millis();
            Mono::delay_until(now).await;
        }
    }

    #[task(priority = 1)]
    async fn watchdog(_: watchdog::Context, wdg: IWDG) {
        let mut wdg = Watchdog::new(wdg);
        wdg.start(1.hz());

        loop {
            wdg.feed();
            Mono::delay(100.millis()).await;
        }
    }

    #[task(priority = 2, local = [sensors, tx])]
    async fn sampler(cx: sampler::Context) {
        crate::sampler::sampler(cx).await;
    }

    #[task(priority = 1, local = [usart])]
    async fn report(cx: report::Context, mut rx: Receiver<'static, Frame, QUEUE_SIZE>) {
        loop {
            let frame = match rx.recv().await {
                Ok(frame) => frame,
                Err(ReceiveError::Empty) => continue,
                Err(ReceiveError::NoSender) => unreachable!("Sender dropped"),
            };

            if frame.write_to(cx.local.usart).is_err() {
                error!("Failed to write frame to UART");
            }
            let _ = nb::block!(cx.local.usart.flush());
        }
    }

    timestamp!("{=u64:us}", {
        Mono::now().duration_since_epoch().to_micros()
    });
}
