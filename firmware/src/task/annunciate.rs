//! Alarm Annunciation
//!
//! Renders the alarm condition on the node's local outputs: the onboard LED
//! (reached through the CYW43 radio's GPIO) and the buzzer.
//!
//! While the alarm is active both outputs pulse at 100 ms on / 100 ms off
//! (~5 Hz), and the flag is re-read every full pulse so a cleared alarm goes
//! quiet within one cycle. While the alarm is clear both outputs are held low
//! and the flag is re-checked once a second.

use cyw43::Control;
use embassy_rp::gpio::{Level, Output};
use embassy_time::Timer;

use crate::system::{config, resources::AnnunciatorResources, state::SYSTEM_STATE};

/// Onboard LED line on the CYW43's GPIO bank
const LED_GPIO: u32 = 0;

/// Annunciator task driving the LED and buzzer from the alarm flag
#[embassy_executor::task]
pub async fn annunciate(mut control: Control<'static>, r: AnnunciatorResources) {
    let mut buzzer = Output::new(r.buzzer_pin, Level::Low);

    loop {
        if SYSTEM_STATE.alarm_active() {
            control.gpio_set(LED_GPIO, true).await;
            buzzer.set_high();
            Timer::after(config::ALARM_PULSE_INTERVAL).await;

            control.gpio_set(LED_GPIO, false).await;
            buzzer.set_low();
            Timer::after(config::ALARM_PULSE_INTERVAL).await;
        } else {
            control.gpio_set(LED_GPIO, false).await;
            buzzer.set_low();
            Timer::after(config::IDLE_RECHECK_INTERVAL).await;
        }
    }
}
