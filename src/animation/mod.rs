//! Pixel commands, frames and the animation objects the configurator
//! stores, plus the color math the generators are built from.

use std::fmt;

use serde::{Serialize, Deserialize};

use crate::device::rgb::Color;

pub mod bleed;
pub mod interpolate;
pub mod pixel;

pub use bleed::{color_bleed, color_bleed_step, multi_color_bleed, rotate_colors};
pub use interpolate::{Interpolate, Linear, Random, Sine};
pub use pixel::{Address, PixelCommand};

/// Replay settings, serialized as the comma separated `key:value` list the
/// firmware reads. Flags carry no value, their presence is the signal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings
{
	pub frame_delay: Option<u32>,
	pub frame_stretch: bool,
	pub looping: bool,
	pub replace_all: bool,
	pub interpolate: bool
}

impl Settings
{
	pub fn new() -> Self
	{
		Self::default()
	}

	pub fn frame_delay(mut self, delay: u32) -> Self
	{
		self.frame_delay = Some(delay);
		self
	}

	pub fn frame_stretch(mut self) -> Self
	{
		self.frame_stretch = true;
		self
	}

	pub fn looping(mut self) -> Self
	{
		self.looping = true;
		self
	}

	pub fn replace_all(mut self) -> Self
	{
		self.replace_all = true;
		self
	}

	pub fn interpolate(mut self) -> Self
	{
		self.interpolate = true;
		self
	}
}

impl fmt::Display for Settings
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let mut tokens = Vec::new();

		if let Some(delay) = self.frame_delay
		{
			tokens.push(format!("framedelay:{}", delay));
		}

		if self.frame_stretch { tokens.push("framestretch".into()); }
		if self.looping { tokens.push("loop".into()); }
		if self.replace_all { tokens.push("replace:all".into()); }
		if self.interpolate { tokens.push("pfunc:interp".into()); }

		f.write_str(&tokens.join(","))
	}
}

/// Every pixel assignment for one moment of playback.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Frame
{
	commands: Vec<PixelCommand>
}

impl Frame
{
	pub fn new() -> Self
	{
		Self::default()
	}

	pub fn push(&mut self, command: PixelCommand)
	{
		self.commands.push(command);
	}

	pub fn set(&mut self, address: Address, color: Color)
	{
		self.push(PixelCommand::new(address, color));
	}

	pub fn commands(&self) -> &[PixelCommand]
	{
		&self.commands
	}

	pub fn is_empty(&self) -> bool
	{
		self.commands.is_empty()
	}

	/// Stable sort by pixel id. Commands without an id keep their relative
	/// order ahead of the addressed ones.
	pub fn sort_by_id(&mut self)
	{
		self.commands.sort_by_key(|command| command.address.id());
	}
}

impl Extend<PixelCommand> for Frame
{
	fn extend<I: IntoIterator<Item = PixelCommand>>(&mut self, iter: I)
	{
		self.commands.extend(iter);
	}
}

impl std::iter::FromIterator<PixelCommand> for Frame
{
	fn from_iter<I: IntoIterator<Item = PixelCommand>>(iter: I) -> Self
	{
		Self { commands: iter.into_iter().collect() }
	}
}

impl fmt::Display for Frame
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		let commands: Vec<String> = self.commands
			.iter()
			.map(PixelCommand::to_string)
			.collect();

		f.write_str(&commands.join(","))
	}
}

/// An animation as stored in the device config's `animations` map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animation
{
	pub settings: String,
	#[serde(rename = "type")]
	pub kind: String,
	pub frames: Vec<String>
}

impl Animation
{
	pub const KIND: &'static str = "animation";

	pub fn new(settings: Settings, frames: Vec<Frame>) -> Self
	{
		Self
		{
			settings: settings.to_string(),
			kind: Self::KIND.into(),
			frames: frames.iter().map(Frame::to_string).collect()
		}
	}
}
