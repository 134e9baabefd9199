#![no_std]
#![no_main]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::wildcard_imports)]

use defmt_rtt as _;
use panic_probe as _;

#[rtic::app(device = stm32f0xx_hal::pac, dispatchers = [USART1])]
mod app {
    use defmt::*;
    use desk_thermometer::{
        config::{ADC_STARTUP_TIME, REPORT_INTERVAL},
        AnalogSampler, Calibration, DisplayController, SamplerConfig, ShiftRegisterBus,
        Thermometer,
    };
    use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};
    use rtic_monotonics::{
        stm32::{Tim2 as Mono, *},
        Monotonic,
    };
    use stm32f0xx_hal::{
        adc::{Adc, AdcAlign, AdcPrecision, AdcSampleTime},
        delay::Delay,
        gpio::{gpioa::PA0, Analog, Output, Pin, PushPull},
        pac::IWDG,
        prelude::*,
        watchdog::Watchdog,
    };

    type Board = Thermometer<Adc, Adc, PA0<Analog>, Pin<Output<PushPull>>>;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        thermometer: Board,
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

        // Enable tim2 monotonic
        let token = rtic_monotonics::create_stm32_tim2_monotonic_token!();
        Mono::start(24_000_000, token);

        // Setup systick delay, used for all pulse and settle timing
        let mut delay = Delay::new(cx.core.SYST, &rcc);

        // Setup GPIO
        //  PA0 - TMP36 sense
        //  PA1 - RCLK
        //  PA2 - SRCLR
        //  PA4 - SRCLK
        //  PA5 - DATA
        let gpioa = cx.device.GPIOA.split(&mut rcc);
        let sense = gpioa.pa0.into_analog(&cx.cs);
        let mut latch = gpioa.pa1.into_push_pull_output(&cx.cs).downgrade();
        let mut clear = gpioa.pa2.into_push_pull_output(&cx.cs).downgrade();
        let mut clock = gpioa.pa4.into_push_pull_output(&cx.cs).downgrade();
        let mut data = gpioa.pa5.into_push_pull_output(&cx.cs).downgrade();

        // All lines idle low, which also resets the register contents
        for pin in [&mut latch, &mut clear, &mut clock, &mut data] {
            unwrap!(pin.set_low());
        }

        // Setup ADC. VDDA is supplied from a 2.048V reference.
        let mut adc = Adc::new(cx.device.ADC, &mut rcc);
        adc.set_precision(AdcPrecision::B_10);
        adc.set_align(AdcAlign::Right);
        adc.set_sample_time(AdcSampleTime::T_239);
        delay.delay_us(ADC_STARTUP_TIME.to_micros());

        let thermometer = Thermometer::new(
            AnalogSampler::new(adc, sense, SamplerConfig::DEFAULT),
            Calibration::DEFAULT,
            DisplayController::new(ShiftRegisterBus::new(data, clock, latch), clear),
        );

        let _ = watchdog::spawn(cx.device.IWDG);
        let _ = report::spawn(delay);

        (Shared {}, Local { thermometer })
    }

    #[idle]
    fn idle(_: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    /// Feeds the watchdog. Runs at the same priority as the thermometer, so a
    /// stalled ADC conversion starves it and resets the MCU.
    #[task(priority = 1)]
    async fn watchdog(_: watchdog::Context, wdg: IWDG) {
        let mut wdg = Watchdog::new(wdg);
        wdg.start(1.hz());

        loop {
            wdg.feed();
            Mono::delay(100.millis()).await;
        }
    }

    #[task(priority = 1, local = [thermometer])]
    async fn report(cx: report::Context, mut delay: Delay) {
        let mut now = Mono::now();

        loop {
            match cx.local.thermometer.cycle(&mut delay) {
                Ok(reading) => info!(
                    "Temperature: {=i32} dC ({=u32} mV), display: {}",
                    reading.temperature.0,
                    reading.voltage.0,
                    reading.update
                ),
                Err(e) => error!("Cycle failed: {}", e.as_str()),
            }

            now += u64::from(REPORT_INTERVAL.to_secs()).secs();
            Mono::delay_until(now).await;
        }
    }

    timestamp!("{=u64:us}", {
        Mono::now().duration_since_epoch().to_micros()
    });
}
