//! This crate exposes a single GPIO pin of a Linux machine through the kernel's sysfs interface (`/sys/class/gpio`).
//!
//! A pin is exported, configured as input or output and opened in one step by `Device::input_pin` or `Device::output_pin`.
//! The kernel creates the pin's control files asynchronously after an export request, so construction polls for the
//! `direction` file with a bounded number of attempts (see `Config`) and fails with a configuration error if it never shows up.
//!
//! Basic abstraction for GPIO pins (`Pin`) implements relevant [`embedded_hal`](https://crates.io/crates/embedded-hal)
//! abstractions so this crate can be used with driver implementations using `embedded_hal` generic traits.
//!
//! The export state of a pin lives in the kernel. This crate does not track which pins are exported and leaves conflicts
//! between processes using the same pin to the kernel. Closing a pin does not unexport it unless asked to with
//! `Config::unexport_on_close`.

use thiserror::Error;

mod device;

pub use device::error::{ConfigError, PinError, ValueError};
pub use device::{Config, Device, Direction, LogicLevel, Pin, Value};

/// Main error type for this crate.
///
/// Every failure falls in one of three kinds:
/// - `ConfigurationError` - exporting or configuring a pin failed. No pin is returned.
/// - `InvalidOperationError` - the operation does not match the pin's direction. Detected before any I/O.
/// - `IoError` - reading or writing a configured pin failed.
///
/// For more details, see `ConfigError`, `PinError` and `ValueError` enums documentation.
#[derive(Error, Debug)]
pub enum GpioError {
    #[error("error while configuring a pin")]
    ConfigurationError(#[source] device::error::ConfigError),
    #[error("operation not supported by pin direction")]
    InvalidOperationError(#[source] device::error::PinError),
    #[error("error while accessing a pin")]
    IoError(#[source] device::error::ValueError),
}

pub type GpioResult<T> = Result<T, GpioError>;
