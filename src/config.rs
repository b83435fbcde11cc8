use std::fmt;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::RngCore;
use serde::{Serialize, Deserialize};

use crate::animation::Animation;
use crate::device::DeviceGeometry;
use crate::device::keygroup::Layout;
use crate::device::trigger::{TriggerAction, TriggerBinding};
use crate::generators::{GeneratorError, GeneratorResult, Param, Params, Registry, ALL};

#[derive(Debug)]
pub enum ConfigError
{
	Io(std::io::Error),
	Yaml(serde_yaml::Error),
	AlreadyExists(PathBuf)
}

impl From<std::io::Error> for ConfigError
{
	fn from(error: std::io::Error) -> Self
	{
		ConfigError::Io(error)
	}
}

impl From<serde_yaml::Error> for ConfigError
{
	fn from(error: serde_yaml::Error) -> Self
	{
		ConfigError::Yaml(error)
	}
}

impl fmt::Display for ConfigError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			ConfigError::Io(error) => write!(f, "configuration io error: {}", error),
			ConfigError::Yaml(error) => write!(f, "configuration parse error: {}", error),
			ConfigError::AlreadyExists(path) => write!(f, "{} already exists, not overwriting it", path.display())
		}
	}
}

impl std::error::Error for ConfigError {}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// One generator run from the configuration file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratorRequest
{
	pub generator: String,
	// animation name to store the result under, defaults to the generator name
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub params: Vec<Param>
}

impl GeneratorRequest
{
	pub fn animation_name(&self) -> &str
	{
		self.name.as_deref().unwrap_or(&self.generator)
	}

	pub fn params(&self) -> Params
	{
		Params::new(&self.params)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Configuration
{
	#[serde(default)]
	pub generators: Vec<GeneratorRequest>,
	#[serde(default)]
	pub triggers: Vec<TriggerBinding>,
	#[serde(default)]
	pub layout: Layout
}

impl Default for Configuration
{
	/// Runs every generator and binds two of them to keys, as a starting
	/// point for editing.
	fn default() -> Self
	{
		Self
		{
			generators: vec![
				GeneratorRequest { generator: ALL.into(), name: None, params: Vec::new() },
				GeneratorRequest
				{
					generator: "kitt2000".into(),
					name: Some("kitt_blue".into()),
					params: vec![Param::Color([0, 64, 255].into()), Param::Color([0, 0, 16].into()), Param::Number(6.0)]
				}
			],
			triggers: vec![
				TriggerBinding { key: "F1".into(), layer: 1, animation: "kitt_blue".into(), action: TriggerAction::Start },
				TriggerBinding { key: "F2".into(), layer: 1, animation: "kitt_blue".into(), action: TriggerAction::Stop }
			],
			layout: Layout::default()
		}
	}
}

impl Configuration
{
	pub const DEFAULT_FILE_NAME: &'static str = "kll-animgen.yaml";

	pub fn config_file_location() -> PathBuf
	{
		PathBuf::from(Self::DEFAULT_FILE_NAME)
	}

	pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self>
	{
		debug!("loading configuration from {}", path.as_ref().display());
		let reader = BufReader::new(File::open(path)?);
		Ok(serde_yaml::from_reader(reader)?)
	}

	/// Writes the default configuration to `path`, refusing to replace an
	/// existing file.
	pub fn init<P: AsRef<Path>>(path: P) -> ConfigResult<Self>
	{
		let path = path.as_ref();

		if path.exists()
		{
			return Err(ConfigError::AlreadyExists(path.to_path_buf()))
		}

		if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty())
		{
			fs::create_dir_all(parent)?;
		}

		let config = Self::default();
		fs::write(path, serde_yaml::to_string(&config)?)?;

		info!("wrote default configuration to {}", path.display());
		Ok(config)
	}

	/// Runs every generator request in order. A request for `all` stores
	/// each result under its generator name, any other request under its
	/// `name`. Later results replace earlier ones with the same name.
	pub fn run_generators(
		&self,
		registry: &Registry,
		geometry: &DeviceGeometry,
		rng: &mut dyn RngCore) -> GeneratorResult<Vec<(String, Animation)>>
	{
		let mut animations = Vec::new();

		for request in &self.generators
		{
			if request.generator == ALL
			{
				animations.extend(registry.run_all(geometry, rng));
				continue
			}

			let name = request.animation_name();

			if !registry.is_valid_name(name)
			{
				return Err(GeneratorError::InvalidName(name.into()))
			}

			let animation = registry.run(&request.generator, geometry, &request.params(), rng)?;
			animations.push((name.to_string(), animation));
		}

		Ok(animations)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use crate::device::rgb::Color;

	#[test]
	fn default_configuration_round_trips()
	{
		let yaml = serde_yaml::to_string(&Configuration::default()).unwrap();
		let parsed: Configuration = serde_yaml::from_str(&yaml).unwrap();

		assert_eq!(parsed, Configuration::default());
	}

	#[test]
	fn minimal_configuration()
	{
		let config: Configuration = serde_yaml::from_str(
			"generators:\n  - generator: breathe\n    name: slow_breath\n    params: [6, \"255,0,0\", [0, 0, 0]]\n")
			.unwrap();

		let request = &config.generators[0];
		let params = request.params();

		assert_eq!(request.animation_name(), "slow_breath");
		assert_eq!(params.colors(), &[Color::new(255, 0, 0), Color::black()]);
		assert_eq!(params.number_or(0, 0.0), 6.0);
		assert!(config.triggers.is_empty());
		assert_eq!(config.layout, Layout::default());
	}

	#[test]
	fn triggers_default_to_start_on_layer_zero()
	{
		let config: Configuration = serde_yaml::from_str(
			"triggers:\n  - key: F5\n    animation: rainbow\n")
			.unwrap();

		assert_eq!(config.triggers, vec![TriggerBinding
		{
			key: "F5".into(),
			layer: 0,
			animation: "rainbow".into(),
			action: TriggerAction::Start
		}]);
	}

	#[test]
	fn requests_run_in_order()
	{
		let registry = Registry::default();
		let geometry = DeviceGeometry::with_layout(5, 20, 119, &Layout::default());
		let mut rng = StdRng::seed_from_u64(4);

		let animations = Configuration::default()
			.run_generators(&registry, &geometry, &mut rng)
			.unwrap();

		assert_eq!(animations.len(), registry.public_names().len() + 1);
		assert_eq!(animations[0].0, "kitt2000");
		assert_eq!(animations.last().map(|(name, _)| name.as_str()), Some("kitt_blue"));
	}

	#[test]
	fn bad_requests_stop_the_run()
	{
		let registry = Registry::default();
		let geometry = DeviceGeometry::with_layout(0, 0, 1, &Layout::default());
		let mut rng = StdRng::seed_from_u64(4);

		let renamed: Configuration = serde_yaml::from_str(
			"generators:\n  - generator: solid\n    name: not valid\n").unwrap();
		assert_eq!(
			renamed.run_generators(&registry, &geometry, &mut rng),
			Err(GeneratorError::InvalidName("not valid".into())));

		let unknown: Configuration = serde_yaml::from_str("generators:\n  - generator: sparkle\n").unwrap();
		assert!(matches!(
			unknown.run_generators(&registry, &geometry, &mut rng),
			Err(GeneratorError::UnknownGenerator { .. })));
	}

	#[test]
	fn init_refuses_to_overwrite()
	{
		let dir = std::env::temp_dir().join(format!("kll-animgen-config-{}", std::process::id()));
		let path = dir.join("conf.yaml");

		let written = Configuration::init(&path).unwrap();
		assert_eq!(Configuration::load(&path).unwrap(), written);

		match Configuration::init(&path)
		{
			Err(ConfigError::AlreadyExists(existing)) => assert_eq!(existing, path),
			other => panic!("unexpected result: {:?}", other)
		}

		fs::remove_dir_all(&dir).unwrap();
	}
}
