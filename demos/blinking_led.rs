//! A very basic example of a program blinking a LED diode using native library API.
//!
//! This example assumes that kernel GPIO 17 is connected to diode's anode (+).
//! Make sure to put resistor to reduce current flowing through the diode.
//! Run with `RUST_LOG=debug` to see the pin being exported and configured.

use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use sysfs_gpio_pin::Pin;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut led_pin = Pin::new_output(17, false)?;
    let blink_interval = Duration::from_millis(500);

    for _ in 0..10 {
        led_pin.high()?;
        sleep(blink_interval);
        led_pin.low()?;
        sleep(blink_interval);
    }

    led_pin.close()?;
    Ok(())
}
