//! Calibration patterns for checking the led mapping of a board.

use rand::RngCore;

use crate::animation::{Address, Animation, Frame, PixelCommand, Settings};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::{fill, Params};

const ZONE_PALETTE: [Color; 8] = [
	Color { r: 255, g: 0, b: 0 },
	Color { r: 0, g: 255, b: 0 },
	Color { r: 0, g: 0, b: 255 },
	Color { r: 255, g: 255, b: 0 },
	Color { r: 255, g: 0, b: 255 },
	Color { r: 0, g: 255, b: 255 },
	Color { r: 255, g: 255, b: 255 },
	Color { r: 255, g: 128, b: 0 }
];

/// Lights one target per frame and turns the previous one off again.
fn walk<T: Copy>(targets: &[T], color: Color, command: impl Fn(T, Color) -> PixelCommand) -> Vec<Frame>
{
	if targets.is_empty()
	{
		return vec![Frame::new()]
	}

	(0..targets.len())
		.map(|index|
		{
			let mut frame = Frame::new();

			if targets.len() > 1
			{
				let previous = (index + targets.len() - 1) % targets.len();
				frame.push(command(targets[previous], Color::black()));
			}

			frame.push(command(targets[index], color));
			frame
		})
		.collect()
}

fn walk_settings(frame_delay: u32) -> Settings
{
	Settings::new()
		.frame_delay(frame_delay)
		.looping()
}

/// Every key group in its own color.
///
/// Colors: the palette, cycled if there are more groups than colors.
pub fn zone_fill(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let palette = params.colors_or(&ZONE_PALETTE);
	let mut frame = Frame::new();

	for (index, group) in geometry.key_groups.iter().enumerate()
	{
		frame.extend(fill(group.ids(), palette[index % palette.len()]));
	}

	Animation::new(Settings::new().replace_all(), vec![frame])
}

/// Lights led ids one at a time in ascending order.
///
/// Colors: the walking color (white). Numbers: frame delay (10).
pub fn id_walk(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let color = params.color_or(0, Color::new(255, 255, 255));
	let frame_delay = params.count_or(0, 10, 1);
	let ids: Vec<u32> = geometry.led_ids().collect();

	Animation::new(walk_settings(frame_delay), walk(&ids, color, PixelCommand::id))
}

/// Lights grid rows one at a time from the top.
///
/// Colors: the row color (white). Numbers: frame delay (20).
pub fn row_sweep(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let color = params.color_or(0, Color::new(255, 255, 255));
	let frame_delay = params.count_or(0, 20, 1);
	let rows: Vec<i32> = (0..=geometry.max_row as i32).collect();

	let frames = walk(&rows, color, |row, color| PixelCommand::new(Address::row(row), color));

	Animation::new(walk_settings(frame_delay), frames)
}

/// Lights the led behind each scan code, in scan code order.
///
/// Colors: the walking color (white). Numbers: frame delay (10).
pub fn scan_walk(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let color = params.color_or(0, Color::new(255, 255, 255));
	let frame_delay = params.count_or(0, 10, 1);
	let ids: Vec<u32> = geometry.scan_code_leds.values().copied().collect();

	Animation::new(walk_settings(frame_delay), walk(&ids, color, PixelCommand::id))
}

/// The whole board in one color.
///
/// Colors: the fill (dim white).
pub fn solid(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let color = params.color_or(0, Color::gray(64));
	let frame = fill(geometry.led_ids(), color).collect();

	Animation::new(Settings::new().replace_all(), vec![frame])
}

/// Turns every led off.
pub fn blank(geometry: &DeviceGeometry, _params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let frame = fill(geometry.led_ids(), Color::black()).collect();

	Animation::new(Settings::new().replace_all(), vec![frame])
}
