/* Free functions operating on the sysfs GPIO attribute files.
 *
 * Nothing here keeps state. Export state belongs to the kernel and is read or changed
 * through these files only, so two pins with the same number are indistinguishable from here.
 */
use log::{debug, trace, warn};
use nix::errno::Errno;
use nix::fcntl::{open, OFlag};
use nix::sys::stat::Mode;
use std::convert::TryFrom;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::FileExt;
use std::os::unix::io::FromRawFd;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

use super::error::{ConfigError, ValueError};
use super::pin::{Direction, LogicLevel, Value};

/// What gets written to the `direction` attribute.
///
/// `Output` carries the initial level, the kernel accepts `high`/`low` to switch direction and set the level at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DirectionSetting {
    Input,
    Output(Value),
}

impl DirectionSetting {
    pub fn as_str(&self) -> &'static str {
        use DirectionSetting::*;
        match self {
            Input => "in",
            Output(Value::High) => "high",
            Output(Value::Low) => "low",
        }
    }
}

pub fn pin_dir(root: &Path, pin: u32) -> PathBuf {
    root.join(format!("gpio{}", pin))
}

pub fn export(root: &Path, pin: u32) -> Result<(), ConfigError> {
    match write_attr(&root.join("export"), &pin.to_string()) {
        Ok(()) => {
            debug!("exported pin {}", pin);
            Ok(())
        }
        Err(err) => export_refused(pin, err),
    }
}

// The kernel answers EBUSY for a pin that is already exported, which is as good as a fresh export.
fn export_refused(pin: u32, err: io::Error) -> Result<(), ConfigError> {
    if err.raw_os_error() == Some(Errno::EBUSY as i32) {
        debug!("pin {} is already exported", pin);
        Ok(())
    } else {
        Err(ConfigError::ExportFailed { pin, source: err })
    }
}

pub fn unexport(root: &Path, pin: u32) -> Result<(), ConfigError> {
    write_attr(&root.join("unexport"), &pin.to_string())
        .map_err(|source| ConfigError::UnexportFailed { pin, source })?;
    debug!("unexported pin {}", pin);
    Ok(())
}

/// Blocks until the `direction` attribute of `pin` can be opened for writing.
///
/// Returns the number of attempts it took.
pub fn wait_until_ready(
    root: &Path,
    pin: u32,
    attempts: u32,
    interval: Duration,
) -> Result<u32, ConfigError> {
    let direction = pin_dir(root, pin).join("direction");

    poll(attempts, interval, || {
        open_file(&direction, OFlag::O_WRONLY)
            .map(drop)
            .map_err(io::Error::from)
    })
    .map_err(|(attempts, source)| {
        warn!(
            "pin {} direction still not accessible after {} attempts: {}",
            pin, attempts, source
        );
        ConfigError::NotReady {
            pin,
            attempts,
            source,
        }
    })
}

/// Runs `probe` until it succeeds, at most `attempts` times, sleeping `interval` between failures.
///
/// A bound of zero still probes once. On exhaustion the attempt count and the last error are returned.
pub(crate) fn poll<F>(
    attempts: u32,
    interval: Duration,
    mut probe: F,
) -> Result<u32, (u32, io::Error)>
where
    F: FnMut() -> io::Result<()>,
{
    let attempts = attempts.max(1);
    let mut attempt = 1;

    loop {
        match probe() {
            Ok(()) => return Ok(attempt),
            Err(err) if attempt >= attempts => return Err((attempt, err)),
            Err(err) => {
                trace!("attempt {}/{} failed: {}", attempt, attempts, err);
                sleep(interval);
                attempt += 1;
            }
        }
    }
}

pub fn set_direction(root: &Path, pin: u32, setting: DirectionSetting) -> Result<(), ConfigError> {
    write_attr(&pin_dir(root, pin).join("direction"), setting.as_str())
        .map_err(|source| ConfigError::DirectionFailed { pin, source })?;
    debug!("pin {} direction set to {}", pin, setting.as_str());
    Ok(())
}

/// Opens the `value` attribute, read-only for inputs and write-only for outputs.
pub fn open_value(root: &Path, pin: u32, direction: Direction) -> Result<File, ConfigError> {
    let flags = match direction {
        Direction::Input => OFlag::O_RDONLY,
        Direction::Output => OFlag::O_WRONLY,
    };

    open_file(&pin_dir(root, pin).join("value"), flags)
        .map_err(|source| ConfigError::ValueOpenFailed { pin, source })
}

pub fn read_value(handle: &File) -> Result<Value, ValueError> {
    // sysfs attributes have to be re-read from the start to get a fresh value.
    let mut contents = Vec::new();
    let mut chunk = [0u8; 16];

    loop {
        let offset = contents.len() as u64;
        let read = handle
            .read_at(&mut chunk, offset)
            .map_err(ValueError::ReadFailed)?;
        if read == 0 {
            break;
        }
        contents.extend_from_slice(&chunk[..read]);
    }

    parse_value(&contents)
}

pub fn write_value(handle: &File, value: Value) -> io::Result<()> {
    handle.write_all_at(value.as_str().as_bytes(), 0)
}

pub fn set_active_low(root: &Path, pin: u32, level: LogicLevel) -> Result<(), ValueError> {
    let contents = match level {
        LogicLevel::ActiveHigh => "0",
        LogicLevel::ActiveLow => "1",
    };

    write_attr(&pin_dir(root, pin).join("active_low"), contents)
        .map_err(ValueError::ActiveLowFailed)
}

pub fn active_low(root: &Path, pin: u32) -> Result<LogicLevel, ValueError> {
    let contents =
        fs::read(pin_dir(root, pin).join("active_low")).map_err(ValueError::ActiveLowFailed)?;

    Ok(match parse_value(&contents)? {
        Value::Low => LogicLevel::ActiveHigh,
        Value::High => LogicLevel::ActiveLow,
    })
}

pub fn parse_value(raw: &[u8]) -> Result<Value, ValueError> {
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();

    text.parse::<u8>()
        .ok()
        .and_then(|level| Value::try_from(level).ok())
        .ok_or_else(|| ValueError::Malformed(text.to_owned()))
}

// Never creates files: a missing attribute means the pin or the GPIO class is not there.
fn write_attr(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
    file.write_all(contents.as_bytes())
}

fn open_file(path: &Path, flags: OFlag) -> nix::Result<File> {
    let fd = open(path, flags | OFlag::O_CLOEXEC, Mode::empty())?;

    // SAFETY: fd was just returned by open(2) and nothing else owns it.
    Ok(unsafe { File::from_raw_fd(fd) })
}
