use std::path::{Path, PathBuf};
use std::time::Duration;

mod attr;
pub mod error;
mod pin;

use crate::{GpioError, GpioResult};
use attr::DirectionSetting;

pub use pin::{Direction, LogicLevel, Pin, Value};

/// Settings used by `Device` when exporting and opening pins.
///
/// Defaults match a stock kernel: the GPIO class lives at `/sys/class/gpio`, a freshly exported pin is waited for
/// up to 100 times with 10ms between attempts and pins stay exported after `Pin::close`.
#[derive(Clone, Debug)]
pub struct Config {
    pub root: PathBuf,
    pub wait_attempts: u32,
    pub wait_interval: Duration,
    pub unexport_on_close: bool,
}

impl Config {
    pub const DEFAULT_ROOT: &'static str = "/sys/class/gpio";
    pub const DEFAULT_WAIT_ATTEMPTS: u32 = 100;
    pub const DEFAULT_WAIT_INTERVAL: Duration = Duration::from_millis(10);

    pub fn with_root<T: AsRef<Path>>(mut self, root: T) -> Self {
        self.root = root.as_ref().to_path_buf();
        self
    }

    /// Sets how many times the `direction` attribute is probed after export, and the delay between probes.
    pub fn with_wait(mut self, attempts: u32, interval: Duration) -> Self {
        self.wait_attempts = attempts;
        self.wait_interval = interval;
        self
    }

    pub fn unexport_on_close(mut self, unexport: bool) -> Self {
        self.unexport_on_close = unexport;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(Self::DEFAULT_ROOT),
            wait_attempts: Self::DEFAULT_WAIT_ATTEMPTS,
            wait_interval: Self::DEFAULT_WAIT_INTERVAL,
            unexport_on_close: false,
        }
    }
}

/// The main abstraction for the sysfs GPIO class of your machine.
///
/// This is the struct you need to instantiate in order to produce input/output GPIO pins to be used by your program.
/// It holds no kernel resources by itself, every pin it produces owns its own file handle.
#[derive(Clone, Debug, Default)]
pub struct Device {
    config: Config,
}

impl Device {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Export a GPIO pin and open it for reading.
    ///
    /// A `number` is the pin number known by the kernel.
    ///
    /// **Note:** This call blocks until the kernel creates the pin's attribute files, up to
    /// `wait_attempts * wait_interval`. Try to initialize required pins before hot paths in your code.
    pub fn input_pin(&self, number: u32) -> GpioResult<Pin> {
        self.open_pin(number, DirectionSetting::Input)
    }

    /// Export a GPIO pin and open it for writing.
    ///
    /// The pin is driven to `initial` as part of switching its direction, there is no moment in which
    /// it is an output with an undefined level.
    pub fn output_pin(&self, number: u32, initial: Value) -> GpioResult<Pin> {
        self.open_pin(number, DirectionSetting::Output(initial))
    }

    fn open_pin(&self, number: u32, setting: DirectionSetting) -> GpioResult<Pin> {
        use error::ConfigError::*;

        let root = self.config.root.as_path();
        let direction = match setting {
            DirectionSetting::Input => Direction::Input,
            DirectionSetting::Output(_) => Direction::Output,
        };

        attr::export(root, number).map_err(GpioError::ConfigurationError)?;
        attr::wait_until_ready(
            root,
            number,
            self.config.wait_attempts,
            self.config.wait_interval,
        )
        .map_err(GpioError::ConfigurationError)?;
        attr::set_direction(root, number, setting).map_err(GpioError::ConfigurationError)?;

        let handle =
            attr::open_value(root, number, direction).map_err(GpioError::ConfigurationError)?;

        if let DirectionSetting::Output(initial) = setting {
            attr::write_value(&handle, initial)
                .map_err(|source| InitialValueFailed {
                    pin: number,
                    source,
                })
                .map_err(GpioError::ConfigurationError)?;
        }

        Ok(Pin::new(
            number,
            direction,
            handle,
            self.config.root.clone(),
            self.config.unexport_on_close,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.root, PathBuf::from("/sys/class/gpio"));
        assert_eq!(config.wait_attempts, 100);
        assert_eq!(config.wait_interval, Duration::from_millis(10));
        assert!(!config.unexport_on_close);
    }

    #[test]
    fn test_config_builders() {
        let config = Config::default()
            .with_root("/tmp/gpio")
            .with_wait(5, Duration::from_millis(2))
            .unexport_on_close(true);

        assert_eq!(config.root, PathBuf::from("/tmp/gpio"));
        assert_eq!(config.wait_attempts, 5);
        assert_eq!(config.wait_interval, Duration::from_millis(2));
        assert!(config.unexport_on_close);
    }
}
