use hsl::HSL;
use rand::RngCore;

use crate::animation::{color_bleed, Address, Animation, Frame, Linear, PixelCommand, Settings};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::Params;

/// The hue wheel spread over the grid columns, rolling sideways.
///
/// Numbers: hue advance per frame in degrees (12, min 1), frame delay (3).
pub fn rainbow(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let hue_step = params.count_or(0, 12, 1).min(360);
	let frame_delay = params.count_or(1, 3, 1);

	let columns = geometry.max_col + 1;
	let frame_count = (360 + hue_step - 1) / hue_step;

	let frames = (0..frame_count)
		.map(|index|
		{
			(0..columns)
				.map(|col|
				{
					let hue = (col as f64 * 360.0 / columns as f64 + (index * hue_step) as f64) % 360.0;
					let color: Color = HSL { h: hue, s: 1.0, l: 0.5 }.into();

					PixelCommand::new(Address::column(col as i32), color)
				})
				.collect()
		})
		.collect();

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.frame_stretch()
			.looping(),
		frames)
}

/// A comet spinning around the base ring.
///
/// Colors: comet (mint), background (black). Numbers: frame delay (4).
pub fn base_spin(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let color = params.color_or(0, Color::new(0, 255, 128));
	let background = params.color_or(1, Color::black());
	let frame_delay = params.count_or(0, 4, 1);

	let ring = &geometry.base_ring;
	let gradient = color_bleed(color, background, ring.len().max(2) as u32, &mut Linear);

	let frames = if ring.is_empty()
	{
		vec![Frame::new()]
	}
	else
	{
		(0..ring.len())
			.map(|index|
			{
				ring
					.iter()
					.enumerate()
					.map(|(position, id)|
					{
						let behind = (index + ring.len() - position) % ring.len();
						PixelCommand::id(*id, gradient[behind])
					})
					.collect()
			})
			.collect()
	};

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.looping(),
		frames)
}
