//! Named animation generators and the registry used to look them up.
//!
//! Every generator is a plain function of the board geometry, its
//! positional parameters and a random source. Colors and numbers are
//! collected into two separate ordered lists so each generator can read
//! "the second color" or "the first number" regardless of how they were
//! interleaved on the command line.

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use enum_derive::*;
use log::{debug, info};
use macro_attr::*;
use rand::RngCore;
use regex::Regex;
use serde::{Serialize, Deserialize, Serializer, Deserializer};
use serde::de::{self, SeqAccess, Visitor};

use crate::animation::{Animation, PixelCommand};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

pub mod breathe;
pub mod chase;
pub mod diagnostic;
pub mod groups;
pub mod noise;
pub mod pulse;
pub mod sweep;

/// Upper bound for any frame or step count taken from parameters.
pub const MAX_FRAMES: u32 = 1000;

/// Pseudo generator name that runs every public generator.
pub const ALL: &str = "all";

/// Generators whose name starts with this are skipped by `all`.
pub const INTERNAL_PREFIX: char = '_';

// names end up inside `A[<name>](start)` triggers, keep them identifiers
const NAME_PATTERN: &str = r"^_?[A-Za-z][A-Za-z0-9_]*$";

#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorError
{
	UnknownGenerator { name: String, valid: Vec<String> },
	InvalidParameter(String),
	InvalidName(String)
}

impl fmt::Display for GeneratorError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		match self
		{
			GeneratorError::UnknownGenerator { name, valid } =>
				write!(f, "unknown generator '{}', valid generators are: {}", name, valid.join(", ")),
			GeneratorError::InvalidParameter(param) =>
				write!(f, "invalid parameter '{}', expected a number or a color (r,g,b or #rrggbb)", param),
			GeneratorError::InvalidName(name) =>
				write!(f, "invalid animation name '{}'", name)
		}
	}
}

impl std::error::Error for GeneratorError {}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

pub type GeneratorFn = fn(&DeviceGeometry, &Params, &mut dyn RngCore) -> Animation;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Param
{
	Color(Color),
	Number(f64)
}

impl FromStr for Param
{
	type Err = GeneratorError;

	fn from_str(string: &str) -> Result<Self, Self::Err>
	{
		let trimmed = string.trim();

		// bare rrggbb, digits only or not, is always a color
		if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_hexdigit())
		{
			return Color::try_from(trimmed)
				.map(Param::Color)
				.map_err(|_| GeneratorError::InvalidParameter(string.into()))
		}

		if let Ok(number) = trimmed.parse::<f64>()
		{
			return Ok(Param::Number(number))
		}

		Color::try_from(string)
			.map(Param::Color)
			.map_err(|_| GeneratorError::InvalidParameter(string.into()))
	}
}

impl Serialize for Param
{
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer
	{
		match self
		{
			Param::Color(color) => serializer.serialize_str(&color.to_string()),
			Param::Number(number) if number.fract() == 0.0 => serializer.serialize_i64(*number as i64),
			Param::Number(number) => serializer.serialize_f64(*number)
		}
	}
}

struct ParamVisitor;

impl<'de> Visitor<'de> for ParamVisitor
{
	type Value = Param;

	fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		formatter.write_str("a number, an \"r,g,b\" or hex color string, or an [r, g, b] list")
	}

	fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
	where
		E: de::Error
	{
		value.parse().map_err(|error: GeneratorError| E::custom(error.to_string()))
	}

	fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
	where
		E: de::Error
	{
		Ok(Param::Number(value as f64))
	}

	fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
	where
		E: de::Error
	{
		Ok(Param::Number(value as f64))
	}

	fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
	where
		E: de::Error
	{
		Ok(Param::Number(value))
	}

	fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
	where
		A: SeqAccess<'de>
	{
		let mut channels = Vec::with_capacity(3);

		while let Some(channel) = seq.next_element::<u8>()?
		{
			channels.push(channel);
		}

		match channels.as_slice()
		{
			[r, g, b] => Ok(Param::Color(Color::new(*r, *g, *b))),
			_ => Err(de::Error::invalid_length(channels.len(), &self))
		}
	}
}

impl<'de> Deserialize<'de> for Param
{
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>
	{
		deserializer.deserialize_any(ParamVisitor)
	}
}

/// Positional generator parameters, split by kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params
{
	colors: Vec<Color>,
	numbers: Vec<f64>
}

impl Params
{
	pub fn new(params: &[Param]) -> Self
	{
		params.iter().copied().collect()
	}

	pub fn parse<S: AsRef<str>>(args: &[S]) -> GeneratorResult<Self>
	{
		args
			.iter()
			.map(|arg| arg.as_ref().parse::<Param>())
			.collect()
	}

	pub fn colors(&self) -> &[Color]
	{
		&self.colors
	}

	/// The given colors, or `defaults` when none were passed.
	pub fn colors_or(&self, defaults: &[Color]) -> Vec<Color>
	{
		if self.colors.is_empty()
		{
			defaults.to_vec()
		}
		else
		{
			self.colors.clone()
		}
	}

	pub fn color_or(&self, index: usize, default: Color) -> Color
	{
		self.colors.get(index).copied().unwrap_or(default)
	}

	pub fn number_or(&self, index: usize, default: f64) -> f64
	{
		self.numbers
			.get(index)
			.copied()
			.filter(|number| number.is_finite())
			.unwrap_or(default)
	}

	/// A rounded whole number no smaller than `min`.
	pub fn count_or(&self, index: usize, default: u32, min: u32) -> u32
	{
		let count = self.number_or(index, default as f64).round();

		if count < min as f64
		{
			min
		}
		else if count > u32::MAX as f64
		{
			u32::MAX
		}
		else
		{
			count as u32
		}
	}
}

impl std::iter::FromIterator<Param> for Params
{
	fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self
	{
		let mut params = Params::default();

		for param in iter
		{
			match param
			{
				Param::Color(color) => params.colors.push(color),
				Param::Number(number) => params.numbers.push(number)
			}
		}

		params
	}
}

/// Frames per inhale (half a breath) for a breathing rate and frame delay.
pub fn steps_per_inhale(breaths_per_minute: f64, frame_delay: u32) -> u32
{
	let breaths_per_minute = breaths_per_minute.max(0.1);
	let frame_delay = frame_delay.max(1) as f64;
	let steps = (60.0 / breaths_per_minute * 100.0 / frame_delay) / 2.0;

	steps.round().max(1.0) as u32
}

/// One command per id, all the same color.
pub fn fill<I>(ids: I, color: Color) -> impl Iterator<Item = PixelCommand>
where
	I: IntoIterator<Item = u32>
{
	ids.into_iter().map(move |id| PixelCommand::id(id, color))
}

macro_attr!
{
	#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, IterVariants!(GeneratorKinds))]
	pub enum GeneratorKind
	{
		Kitt2000,
		Breathe,
		BreatheZones,
		GroupCycle,
		GroupTracer,
		VerticalPulse,
		DodgyPixel,
		Flicker,
		Rainbow,
		BaseSpin,
		ZoneFill,
		IdWalk,
		RowSweep,
		ScanWalk,
		Solid,
		Blank
	}
}

impl GeneratorKind
{
	pub fn name(&self) -> &'static str
	{
		match self
		{
			GeneratorKind::Kitt2000 => "kitt2000",
			GeneratorKind::Breathe => "breathe",
			GeneratorKind::BreatheZones => "breathe_zones",
			GeneratorKind::GroupCycle => "group_cycle",
			GeneratorKind::GroupTracer => "group_tracer",
			GeneratorKind::VerticalPulse => "vertical_pulse",
			GeneratorKind::DodgyPixel => "dodgy_pixel",
			GeneratorKind::Flicker => "flicker",
			GeneratorKind::Rainbow => "rainbow",
			GeneratorKind::BaseSpin => "base_spin",
			GeneratorKind::ZoneFill => "zone_fill",
			GeneratorKind::IdWalk => "id_walk",
			GeneratorKind::RowSweep => "row_sweep",
			GeneratorKind::ScanWalk => "scan_walk",
			GeneratorKind::Solid => "solid",
			GeneratorKind::Blank => "_blank"
		}
	}

	pub fn function(&self) -> GeneratorFn
	{
		match self
		{
			GeneratorKind::Kitt2000 => chase::kitt2000,
			GeneratorKind::Breathe => breathe::breathe,
			GeneratorKind::BreatheZones => breathe::breathe_zones,
			GeneratorKind::GroupCycle => groups::group_cycle,
			GeneratorKind::GroupTracer => groups::group_tracer,
			GeneratorKind::VerticalPulse => pulse::vertical_pulse,
			GeneratorKind::DodgyPixel => noise::dodgy_pixel,
			GeneratorKind::Flicker => noise::flicker,
			GeneratorKind::Rainbow => sweep::rainbow,
			GeneratorKind::BaseSpin => sweep::base_spin,
			GeneratorKind::ZoneFill => diagnostic::zone_fill,
			GeneratorKind::IdWalk => diagnostic::id_walk,
			GeneratorKind::RowSweep => diagnostic::row_sweep,
			GeneratorKind::ScanWalk => diagnostic::scan_walk,
			GeneratorKind::Solid => diagnostic::solid,
			GeneratorKind::Blank => diagnostic::blank
		}
	}
}

struct Entry
{
	name: String,
	function: GeneratorFn
}

/// Maps generator names to their functions, in registration order.
pub struct Registry
{
	entries: Vec<Entry>,
	name_pattern: Regex
}

impl Registry
{
	/// A registry with no generators at all.
	pub fn empty() -> Self
	{
		Self
		{
			entries: Vec::new(),
			name_pattern: Regex::new(NAME_PATTERN).expect("generator name pattern is valid")
		}
	}

	pub fn is_valid_name(&self, name: &str) -> bool
	{
		name != ALL && self.name_pattern.is_match(name)
	}

	pub fn is_internal(name: &str) -> bool
	{
		name.starts_with(INTERNAL_PREFIX)
	}

	/// Adds a generator, replacing any generator already using `name`.
	pub fn register(&mut self, name: &str, function: GeneratorFn) -> GeneratorResult<()>
	{
		if !self.is_valid_name(name)
		{
			return Err(GeneratorError::InvalidName(name.into()))
		}

		match self.entries.iter_mut().find(|entry| entry.name == name)
		{
			Some(entry) =>
			{
				debug!("replacing generator {}", name);
				entry.function = function;
			},
			None => self.entries.push(Entry { name: name.into(), function })
		}

		Ok(())
	}

	pub fn names(&self) -> Vec<&str>
	{
		self.entries.iter().map(|entry| entry.name.as_str()).collect()
	}

	/// Names `all` runs, in registration order.
	pub fn public_names(&self) -> Vec<&str>
	{
		self.names()
			.into_iter()
			.filter(|name| !Self::is_internal(name))
			.collect()
	}

	fn lookup(&self, name: &str) -> GeneratorResult<GeneratorFn>
	{
		self.entries
			.iter()
			.find(|entry| entry.name == name)
			.map(|entry| entry.function)
			.ok_or_else(|| GeneratorError::UnknownGenerator
			{
				name: name.into(),
				valid: self.names().into_iter().map(String::from).collect()
			})
	}

	pub fn run(
		&self,
		name: &str,
		geometry: &DeviceGeometry,
		params: &Params,
		rng: &mut dyn RngCore) -> GeneratorResult<Animation>
	{
		let function = self.lookup(name)?;
		let animation = function(geometry, params, rng);

		info!("generated {} ({} frames)", name, animation.frames.len());
		Ok(animation)
	}

	/// Runs every public generator with its default parameters.
	pub fn run_all(&self, geometry: &DeviceGeometry, rng: &mut dyn RngCore) -> Vec<(String, Animation)>
	{
		let params = Params::default();

		self.entries
			.iter()
			.filter(|entry| !Self::is_internal(&entry.name))
			.map(|entry|
			{
				let animation = (entry.function)(geometry, &params, rng);
				info!("generated {} ({} frames)", &entry.name, animation.frames.len());
				(entry.name.clone(), animation)
			})
			.collect()
	}

	/// Runs `name`, or every public generator when `name` is `all`. Results
	/// are keyed by generator name.
	pub fn invoke(
		&self,
		name: &str,
		geometry: &DeviceGeometry,
		params: &Params,
		rng: &mut dyn RngCore) -> GeneratorResult<Vec<(String, Animation)>>
	{
		if name == ALL
		{
			Ok(self.run_all(geometry, rng))
		}
		else
		{
			self.run(name, geometry, params, rng)
				.map(|animation| vec![(name.to_string(), animation)])
		}
	}
}

impl Default for Registry
{
	fn default() -> Self
	{
		let mut registry = Self::empty();

		for kind in GeneratorKind::iter_variants()
		{
			registry.entries.push(Entry { name: kind.name().into(), function: kind.function() });
		}

		registry
	}
}
