//! This example demonstrates the usage of embedded_hal trait usage.
//!
//! The main benefit over the blinking_led example is that `blink_led`
//! can be used for _any_ device with embedded-hal digital pins abstraction.
//!
//! This example assumes that kernel GPIO 17 is connected to diode's anode (+).
//! Make sure to put resistor to reduce current flowing through the diode.

use embedded_hal::digital::v2::*;
use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use sysfs_gpio_pin::{Config, Device, Value};

fn blink_led<T: OutputPin<Error = impl Error + 'static>>(pin: &mut T) -> Result<(), Box<dyn Error>> {
    let blink_interval = Duration::from_millis(500);

    for _ in 0..10 {
        pin.set_high()?;
        sleep(blink_interval);
        pin.set_low()?;
        sleep(blink_interval);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Slow boards can take a while to create the pin's files after export.
    let config = Config::default()
        .with_wait(200, Duration::from_millis(20))
        .unexport_on_close(true);
    let mut led_pin = Device::with_config(config).output_pin(17, Value::Low)?;

    blink_led(&mut led_pin)?;
    led_pin.close()?;
    Ok(())
}
