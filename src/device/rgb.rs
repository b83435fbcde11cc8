use std::convert::TryFrom;
use std::fmt;

use hsl::HSL;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color
{
	pub r: u8,
	pub g: u8,
	pub b: u8
}

impl Color
{
	pub fn new(r: u8, g: u8, b: u8) -> Self
	{
		Self { r, g, b }
	}

	pub fn black() -> Self
	{
		Self::new(0, 0, 0)
	}

	pub fn gray(level: u8) -> Self
	{
		Self::new(level, level, level)
	}

	/// Builds a color from unbounded channel values, rounding each to the
	/// nearest integer and clamping it into 0..=255.
	pub fn from_channels(r: f64, g: f64, b: f64) -> Self
	{
		Self::new(clamp_channel(r), clamp_channel(g), clamp_channel(b))
	}

	pub fn channels(&self) -> [f64; 3]
	{
		[self.r as f64, self.g as f64, self.b as f64]
	}

	/// Multiplies every channel by `intensity`, rounded and clamped.
	pub fn scale(&self, intensity: f64) -> Self
	{
		let [r, g, b] = self.channels();
		Self::from_channels(r * intensity, g * intensity, b * intensity)
	}
}

pub fn clamp_channel(value: f64) -> u8
{
	if value.is_nan()
	{
		return 0
	}

	value.round().max(0.0).min(255.0) as u8
}

impl Default for Color
{
	fn default() -> Self
	{
		Color::black()
	}
}

impl From<HSL> for Color
{
	fn from(hsl: HSL) -> Self
	{
		let (r, g, b) = hsl.to_rgb();
		Self::new(r, g, b)
	}
}

impl From<u32> for Color
{
	fn from(color: u32) -> Self
	{
		Color::new(
			(color >> 16 & 0xff) as u8,
			(color >> 8 & 0xff) as u8,
			color as u8)
	}
}

impl From<[u8; 3]> for Color
{
	fn from([r, g, b]: [u8; 3]) -> Self
	{
		Self::new(r, g, b)
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "invalid color '{}', expected r,g,b or a hex code like ff8800", self.0)
	}
}

impl std::error::Error for ColorParseError {}

/// Accepts `r,g,b` triples as well as `rrggbb` / `#rrggbb` hex codes.
impl TryFrom<&str> for Color
{
	type Error = ColorParseError;

	fn try_from(string: &str) -> Result<Self, Self::Error>
	{
		let trimmed = string.trim();

		if trimmed.contains(',')
		{
			let channels = trimmed
				.split(',')
				.map(|channel| channel.trim().parse::<u8>())
				.collect::<Result<Vec<_>, _>>()
				.map_err(|_| ColorParseError(string.into()))?;

			return match channels.as_slice()
			{
				[r, g, b] => Ok(Color::new(*r, *g, *b)),
				_ => Err(ColorParseError(string.into()))
			}
		}

		let hex = trimmed.trim_start_matches('#');

		if hex.len() != 6
		{
			return Err(ColorParseError(string.into()))
		}

		u32::from_str_radix(hex, 16)
			.map(|color| color.into())
			.map_err(|_| ColorParseError(string.into()))
	}
}

impl fmt::Display for Color
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "{},{},{}", self.r, self.g, self.b)
	}
}
