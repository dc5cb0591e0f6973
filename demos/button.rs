//! Mirrors a push button on a LED.
//!
//! Assumes a button between kernel GPIO 27 and ground with a pull-up, and a LED on kernel GPIO 17.
//! The button reads 0 when pressed, so its pin is switched to active low to read 1 instead.

use std::error::Error;
use std::thread::sleep;
use std::time::Duration;
use sysfs_gpio_pin::{Device, LogicLevel, Value};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let device = Device::new();
    let mut button = device.input_pin(27)?;
    let mut led = device.output_pin(17, Value::Low)?;
    button.set_logic_level(LogicLevel::ActiveLow)?;

    for _ in 0..500 {
        led.set_value(button.read()?)?;
        sleep(Duration::from_millis(20));
    }

    button.close()?;
    led.close()?;
    Ok(())
}
