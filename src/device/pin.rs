use super::attr;
use super::error::{PinError, ValueError};
use crate::{GpioError, GpioResult};
use derive_try_from_primitive::TryFromPrimitive;
use embedded_hal::digital::v2 as eh;
use log::debug;
use std::fmt;
use std::fs::File;
use std::path::PathBuf;

/// Enum representing the logic level of a given pin, as reported by the kernel.
///
/// This usually correlates to electric low/high state of voltage for GPIO pins,
/// but keep in mind that the kernel inverts it for pins configured as `LogicLevel::ActiveLow`.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
pub enum Value {
    High = 1,
    Low = 0,
}

impl Value {
    /// Text accepted and produced by the kernel's `value` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Value::High => "1",
            Value::Low => "0",
        }
    }
}

impl From<bool> for Value {
    fn from(high: bool) -> Self {
        if high {
            Value::High
        } else {
            Value::Low
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Input => "in",
            Direction::Output => "out",
        })
    }
}

/// Polarity of a pin, kept by the kernel driver in the `active_low` attribute.
///
/// With `ActiveLow` the kernel inverts the electrical level both when reporting and when accepting values.
/// This crate never inverts anything by itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogicLevel {
    ActiveHigh,
    ActiveLow,
}

/// Abstraction over one exported GPIO pin.
///
/// This is obtainable by using `input_pin` or `output_pin` methods of `Device` struct (or `Pin::new_input` / `Pin::new_output`).
/// A pin owns an open handle to its `value` attribute until `close` is called. Its direction is fixed for its whole life:
/// reading an output pin or writing an input pin fails with `GpioError::InvalidOperationError`.
///
/// Pins are not synchronized. If multiple threads use one pin, access needs to be serialized by the caller.
#[derive(Debug)]
pub struct Pin {
    number: u32,
    direction: Direction,
    value: Option<File>,
    root: PathBuf,
    unexport_on_close: bool,
}

impl Pin {
    pub(crate) fn new(
        number: u32,
        direction: Direction,
        value: File,
        root: PathBuf,
        unexport_on_close: bool,
    ) -> Self {
        Self {
            number,
            direction,
            value: Some(value),
            root,
            unexport_on_close,
        }
    }

    /// Exports `number` and opens it for reading, using default `Device` settings.
    pub fn new_input(number: u32) -> GpioResult<Self> {
        super::Device::new().input_pin(number)
    }

    /// Exports `number` and opens it for writing, driving it high or low from the start.
    pub fn new_output(number: u32, initial_high: bool) -> GpioResult<Self> {
        super::Device::new().output_pin(number, Value::from(initial_high))
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_closed(&self) -> bool {
        self.value.is_none()
    }

    /// Reads the current level of an input pin.
    pub fn read(&self) -> GpioResult<Value> {
        if self.direction != Direction::Input {
            return Err(GpioError::InvalidOperationError(PinError::NotInput));
        }

        attr::read_value(self.handle()?).map_err(GpioError::IoError)
    }

    pub fn high(&mut self) -> GpioResult<()> {
        self.set_value(Value::High)
    }

    pub fn low(&mut self) -> GpioResult<()> {
        self.set_value(Value::Low)
    }

    /// Drives an output pin to `value`.
    pub fn set_value(&mut self, value: Value) -> GpioResult<()> {
        if self.direction != Direction::Output {
            return Err(GpioError::InvalidOperationError(PinError::NotOutput));
        }

        attr::write_value(self.handle()?, value)
            .map_err(ValueError::WriteFailed)
            .map_err(GpioError::IoError)
    }

    /// Sets the polarity of the pin. Works for both directions.
    pub fn set_logic_level(&mut self, level: LogicLevel) -> GpioResult<()> {
        self.handle()?;
        attr::set_active_low(&self.root, self.number, level).map_err(GpioError::IoError)?;
        debug!("pin {} logic level set to {:?}", self.number, level);
        Ok(())
    }

    pub fn logic_level(&self) -> GpioResult<LogicLevel> {
        self.handle()?;
        attr::active_low(&self.root, self.number).map_err(GpioError::IoError)
    }

    /// Releases the value handle.
    ///
    /// The pin stays exported unless the `Device` was configured with `unexport_on_close`.
    /// Closing an already closed pin does nothing.
    pub fn close(&mut self) -> GpioResult<()> {
        let handle = match self.value.take() {
            Some(handle) => handle,
            None => return Ok(()),
        };
        drop(handle);
        debug!("pin {} closed", self.number);

        if self.unexport_on_close {
            attr::unexport(&self.root, self.number).map_err(GpioError::ConfigurationError)?;
        }

        Ok(())
    }

    fn handle(&self) -> GpioResult<&File> {
        self.value
            .as_ref()
            .ok_or(GpioError::IoError(ValueError::Closed))
    }
}

impl eh::InputPin for Pin {
    type Error = GpioError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.read()? == Value::High)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.is_high().map(|v| !v)
    }
}

impl eh::OutputPin for Pin {
    type Error = GpioError;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.low()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high()
    }
}
