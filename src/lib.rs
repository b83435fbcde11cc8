//! Generates per-key RGB animations for KLL keyboard configurator layouts
//! and merges them, together with key triggers, back into the device config.

use std::fmt;

pub mod animation;
pub mod config;
pub mod device;
pub mod generators;

use config::ConfigError;
use device::DeviceError;
use generators::GeneratorError;

#[derive(Debug)]
pub enum Error
{
	Device(DeviceError),
	Config(ConfigError),
	Generator(GeneratorError)
}

impl From<DeviceError> for Error
{
	fn from(error: DeviceError) -> Self
	{
		Error::Device(error)
	}
}

impl From<ConfigError> for Error
{
	fn from(error: ConfigError) -> Self
	{
		Error::Config(error)
	}
}

impl From<GeneratorError> for Error
{
	fn from(error: GeneratorError) -> Self
	{
		Error::Generator(error)
	}
}

impl fmt::Display for Error
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			Error::Device(error) => error.fmt(f),
			Error::Config(error) => error.fmt(f),
			Error::Generator(error) => error.fmt(f)
		}
	}
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
