use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::{debug, info};
use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

use crate::animation::Animation;

pub mod geometry;
pub mod keygroup;
pub mod rgb;
pub mod trigger;

pub use geometry::DeviceGeometry;

#[derive(Debug)]
pub enum DeviceError
{
	Io(std::io::Error),
	Json(serde_json::Error)
}

impl From<std::io::Error> for DeviceError
{
	fn from(error: std::io::Error) -> Self
	{
		DeviceError::Io(error)
	}
}

impl From<serde_json::Error> for DeviceError
{
	fn from(error: serde_json::Error) -> Self
	{
		DeviceError::Json(error)
	}
}

impl fmt::Display for DeviceError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			DeviceError::Io(error) => write!(f, "device file io error: {}", error),
			DeviceError::Json(error) => write!(f, "device file json error: {}", error)
		}
	}
}

impl std::error::Error for DeviceError {}

pub type DeviceResult<T> = Result<T, DeviceError>;

/// One LED entry of the device config. Only the id and scan code are
/// interpreted, everything else is carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Led
{
	pub id: u32,
	#[serde(rename = "scanCode", default, skip_serializing_if = "Option::is_none")]
	pub scan_code: Option<Value>,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

impl Led
{
	pub fn scan_code(&self) -> Option<u32>
	{
		self.scan_code.as_ref().and_then(parse_scan_code)
	}
}

/// Scan codes show up either as plain numbers or as `0x..` hex strings.
pub fn parse_scan_code(value: &Value) -> Option<u32>
{
	match value
	{
		Value::Number(number) => number.as_u64().map(|code| code as u32),
		Value::String(text) =>
		{
			let text = text.trim();

			if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X"))
			{
				u32::from_str_radix(hex, 16).ok()
			}
			else
			{
				text.parse().ok()
			}
		},
		_ => None
	}
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyLayer
{
	#[serde(default)]
	pub key: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger
{
	pub layer: u32,
	pub action: String
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixKey
{
	// layer number (as a string key) -> key assignment on that layer
	#[serde(default)]
	pub layers: BTreeMap<String, KeyLayer>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub triggers: Vec<Trigger>,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

impl MatrixKey
{
	pub fn key_on_layer(&self, layer: u32) -> Option<&str>
	{
		self.layers
			.get(&layer.to_string())
			.map(|layer| layer.key.as_str())
	}
}

/// The configurator's device layout document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceConfig
{
	#[serde(default, skip_serializing_if = "Value::is_null")]
	pub header: Value,
	#[serde(default)]
	pub leds: Vec<Led>,
	#[serde(default)]
	pub matrix: Vec<MatrixKey>,
	#[serde(default)]
	pub animations: Map<String, Value>,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

impl DeviceConfig
{
	pub fn load<P: AsRef<Path>>(path: P) -> DeviceResult<Self>
	{
		debug!("loading device config from {}", path.as_ref().display());
		let reader = BufReader::new(File::open(path)?);
		Ok(serde_json::from_reader(reader)?)
	}

	/// Inserts each animation under its name, replacing any existing one.
	pub fn merge_animations<I>(&mut self, animations: I) -> DeviceResult<usize>
	where
		I: IntoIterator<Item = (String, Animation)>
	{
		let mut merged = 0;

		for (name, animation) in animations
		{
			let value = serde_json::to_value(&animation)?;

			if self.animations.insert(name.clone(), value).is_some()
			{
				info!("overwriting existing animation {}", &name);
			}
			else
			{
				debug!("adding animation {}", &name);
			}

			merged += 1;
		}

		Ok(merged)
	}

	/// Writes the config as pretty json to `<dir>/<stem>-<timestamp>.json`,
	/// creating `dir` if needed.
	pub fn write_timestamped<P: AsRef<Path>>(&self, dir: P, stem: &str) -> DeviceResult<PathBuf>
	{
		let dir = dir.as_ref();
		fs::create_dir_all(dir)?;

		let path = dir.join(timestamped_file_name(stem, &Local::now()));
		let writer = BufWriter::new(File::create(&path)?);
		serde_json::to_writer_pretty(writer, self)?;

		info!("wrote {}", path.display());
		Ok(path)
	}
}

pub fn timestamped_file_name(stem: &str, time: &DateTime<Local>) -> String
{
	format!("{}-{}.json", stem, time.format("%Y%m%d-%H%M%S"))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelEntry
{
	#[serde(rename = "Row", default)]
	pub row: u32,
	#[serde(rename = "Col", default)]
	pub col: u32,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

/// The configurator's pixel geometry document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PixelMap
{
	#[serde(rename = "PixelIds", default)]
	pub pixel_ids: Vec<PixelEntry>,
	#[serde(flatten)]
	pub extra: Map<String, Value>
}

impl PixelMap
{
	pub fn load<P: AsRef<Path>>(path: P) -> DeviceResult<Self>
	{
		debug!("loading pixel map from {}", path.as_ref().display());
		let reader = BufReader::new(File::open(path)?);
		Ok(serde_json::from_reader(reader)?)
	}

	pub fn max_row(&self) -> u32
	{
		self.pixel_ids.iter().map(|pixel| pixel.row).max().unwrap_or(0)
	}

	pub fn max_col(&self) -> u32
	{
		self.pixel_ids.iter().map(|pixel| pixel.col).max().unwrap_or(0)
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use chrono::TimeZone;
	use serde_json::json;

	use crate::animation::Settings;

	fn sample_config() -> DeviceConfig
	{
		serde_json::from_value(json!({
			"header": { "Name": "test board" },
			"leds": [
				{ "id": 1, "scanCode": "0x01", "x": 3 },
				{ "id": 2, "scanCode": 5 },
				{ "id": 3 }
			],
			"matrix": [
				{ "code": "0x01", "layers": { "0": { "key": "ESC", "label": "Esc" } } }
			],
			"animations": {
				"old": { "settings": "loop", "type": "animation", "frames": [] }
			},
			"defines": { "x": 1 }
		})).unwrap()
	}

	#[test]
	fn unknown_fields_survive_a_round_trip()
	{
		let config = sample_config();
		let value = serde_json::to_value(&config).unwrap();

		assert_eq!(value["defines"], json!({ "x": 1 }));
		assert_eq!(value["leds"][0]["x"], json!(3));
		assert_eq!(value["matrix"][0]["code"], json!("0x01"));
		assert_eq!(value["matrix"][0]["layers"]["0"]["label"], json!("Esc"));
		assert!(value["matrix"][0].get("triggers").is_none());
	}

	#[test]
	fn missing_header_stays_missing()
	{
		let config: DeviceConfig = serde_json::from_value(json!({ "leds": [], "animations": {} })).unwrap();
		let value = serde_json::to_value(&config).unwrap();

		assert!(value.get("header").is_none());
		assert_eq!(sample_config().header, json!({ "Name": "test board" }));
	}

	#[test]
	fn scan_codes_parse_from_hex_and_numbers()
	{
		let config = sample_config();
		let codes: Vec<_> = config.leds.iter().map(Led::scan_code).collect();

		assert_eq!(codes, vec![Some(1), Some(5), None]);
		assert_eq!(parse_scan_code(&json!("17")), Some(17));
		assert_eq!(parse_scan_code(&json!(true)), None);
	}

	#[test]
	fn merging_overwrites_by_name()
	{
		let mut config = sample_config();
		let animation = Animation::new(Settings::new().looping(), Vec::new());

		let merged = config
			.merge_animations(vec![("old".to_string(), animation.clone()), ("new".to_string(), animation)])
			.unwrap();

		assert_eq!(merged, 2);
		assert_eq!(config.animations.len(), 2);
		assert_eq!(config.animations["old"]["type"], json!("animation"));
	}

	#[test]
	fn pixel_map_extents_default_to_zero()
	{
		let empty: PixelMap = serde_json::from_value(json!({ "PixelIds": [] })).unwrap();
		assert_eq!((empty.max_row(), empty.max_col()), (0, 0));

		let pixels: PixelMap = serde_json::from_value(json!({
			"PixelIds": [ { "Row": 2, "Col": 9 }, { "Row": 5, "Col": 1 } ]
		})).unwrap();
		assert_eq!((pixels.max_row(), pixels.max_col()), (5, 9));
	}

	#[test]
	fn output_names_carry_a_timestamp()
	{
		let time = Local.with_ymd_and_hms(2021, 3, 4, 5, 6, 7).unwrap();
		assert_eq!(timestamped_file_name("board", &time), "board-20210304-050607.json");
	}

	#[test]
	fn writes_into_a_fresh_directory()
	{
		let dir = std::env::temp_dir()
			.join(format!("kll-animgen-test-{}", std::process::id()))
			.join("nested");

		let path = sample_config().write_timestamped(&dir, "board").unwrap();
		let reloaded = DeviceConfig::load(&path).unwrap();

		assert_eq!(reloaded, sample_config());
		fs::remove_dir_all(dir.parent().unwrap()).unwrap();
	}
}
