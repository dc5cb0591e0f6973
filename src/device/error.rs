use std::io;
use thiserror::Error;

/// Enum representing possible failures when exporting and configuring a pin.
///
/// - ExportFailed - The kernel refused the export request or the GPIO class directory is not accessible.
/// - NotReady - The pin's `direction` file did not become writable within the configured number of attempts.
/// - DirectionFailed - Writing the requested direction was rejected.
/// - ValueOpenFailed - The pin's `value` file could not be opened.
/// - InitialValueFailed - The initial level of an output pin could not be written.
/// - UnexportFailed - Releasing the pin back to the kernel on close failed.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to export pin {pin}")]
    ExportFailed {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("pin {pin} direction not accessible after {attempts} attempts")]
    NotReady {
        pin: u32,
        attempts: u32,
        #[source]
        source: io::Error,
    },
    #[error("failed to set direction of pin {pin}")]
    DirectionFailed {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("failed to open value of pin {pin}")]
    ValueOpenFailed {
        pin: u32,
        #[source]
        source: nix::Error,
    },
    #[error("failed to write initial value of pin {pin}")]
    InitialValueFailed {
        pin: u32,
        #[source]
        source: io::Error,
    },
    #[error("failed to unexport pin {pin}")]
    UnexportFailed {
        pin: u32,
        #[source]
        source: io::Error,
    },
}

/// Enum representing operations rejected because of the pin's direction.
#[derive(Error, Debug)]
pub enum PinError {
    #[error("pin is not configured for input")]
    NotInput,
    #[error("pin is not configured for output")]
    NotOutput,
}

/// Enum representing failures when reading or writing a configured pin.
///
/// - Closed - The pin was already closed, its value handle is gone.
/// - Malformed - The kernel returned something that is not a logic level.
#[derive(Error, Debug)]
pub enum ValueError {
    #[error("failed to read pin value")]
    ReadFailed(#[source] io::Error),
    #[error("failed to write pin value")]
    WriteFailed(#[source] io::Error),
    #[error("malformed pin value: {0:?}")]
    Malformed(String),
    #[error("failed to access active_low")]
    ActiveLowFailed(#[source] io::Error),
    #[error("pin is closed")]
    Closed,
}
