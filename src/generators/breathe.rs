use rand::RngCore;

use crate::animation::{multi_color_bleed, rotate_colors, Animation, Frame, PixelCommand, Settings, Sine};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::{fill, steps_per_inhale, Params};

const DEFAULT_BREATHS_PER_MINUTE: f64 = 12.0;
const DEFAULT_FRAME_DELAY: u32 = 10;

/// Whole board breathing through a loop of colors.
///
/// Colors: the loop (sky blue, black). Numbers: breaths per minute (12),
/// frame delay (10).
pub fn breathe(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let colors = params.colors_or(&[Color::new(0, 128, 255), Color::black()]);
	let breaths_per_minute = params.number_or(0, DEFAULT_BREATHS_PER_MINUTE);
	let frame_delay = params.count_or(1, DEFAULT_FRAME_DELAY, 1);

	let steps = steps_per_inhale(breaths_per_minute, frame_delay);
	let frames = multi_color_bleed(steps + 1, &mut Sine, &colors)
		.into_iter()
		.map(|color| fill(geometry.led_ids(), color).collect())
		.collect();

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.looping()
			.replace_all(),
		frames)
}

/// Brightness of base ring slot `slot`, dimming linearly away from the lead.
fn ring_intensity(slot: usize, ring_length: usize) -> f64
{
	1.0 - slot as f64 / ring_length as f64
}

/// Top keys and base ring breathing out of phase, with a bright spot
/// running around the ring.
///
/// Colors: the loop (red, green, blue); the base uses the same loop started
/// one color later. Numbers: breaths per minute (12), frame delay (10).
pub fn breathe_zones(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let colors = params.colors_or(&[Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255)]);
	let breaths_per_minute = params.number_or(0, DEFAULT_BREATHS_PER_MINUTE);
	let frame_delay = params.count_or(1, DEFAULT_FRAME_DELAY, 1);

	let steps = steps_per_inhale(breaths_per_minute, frame_delay);
	let top = multi_color_bleed(steps + 1, &mut Sine, &colors);
	let base = multi_color_bleed(steps + 1, &mut Sine, &rotate_colors(&colors, 1));

	let top_ids = geometry.top_ids();
	let ring = &geometry.base_ring;

	let frames = top
		.iter()
		.zip(base.iter())
		.enumerate()
		.map(|(index, (top_color, base_color))|
		{
			let mut frame: Frame = fill(top_ids.iter().copied(), *top_color).collect();

			// the lead moves forward one led per frame, dimmer slots trail it
			frame.extend(ring
				.iter()
				.enumerate()
				.map(|(position, id)|
				{
					let slot = (index % ring.len() + ring.len() - position) % ring.len();
					PixelCommand::id(*id, base_color.scale(ring_intensity(slot, ring.len())))
				}));

			frame
		})
		.collect();

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.looping()
			.replace_all(),
		frames)
}

#[cfg(test)]
mod tests
{
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use crate::device::keygroup::Layout;

	fn geometry() -> DeviceGeometry
	{
		let layout = Layout { key_groups: Vec::new(), base_ring: vec![5, 6, 7, 8] };
		DeviceGeometry::with_layout(1, 3, 8, &layout)
	}

	#[test]
	fn breathe_cycles_every_led()
	{
		let params = Params::parse(&["255,0,0", "0,0,0", "60", "25"]).unwrap();
		let animation = breathe(&geometry(), &params, &mut StdRng::seed_from_u64(0));

		// (60 / 60 * 100 / 25) / 2 = 2 steps per inhale, two colors
		assert_eq!(animation.settings, "framedelay:25,loop,replace:all");
		assert_eq!(animation.frames, vec![
			"P[1](255,0,0),P[2](255,0,0),P[3](255,0,0),P[4](255,0,0),P[5](255,0,0),P[6](255,0,0),P[7](255,0,0),P[8](255,0,0)",
			"P[1](128,0,0),P[2](128,0,0),P[3](128,0,0),P[4](128,0,0),P[5](128,0,0),P[6](128,0,0),P[7](128,0,0),P[8](128,0,0)",
			"P[1](0,0,0),P[2](0,0,0),P[3](0,0,0),P[4](0,0,0),P[5](0,0,0),P[6](0,0,0),P[7](0,0,0),P[8](0,0,0)",
			"P[1](128,0,0),P[2](128,0,0),P[3](128,0,0),P[4](128,0,0),P[5](128,0,0),P[6](128,0,0),P[7](128,0,0),P[8](128,0,0)"
		]);
	}

	#[test]
	fn default_breath_length()
	{
		let animation = breathe(&geometry(), &Params::default(), &mut StdRng::seed_from_u64(0));

		// 25 steps per inhale over a two color loop
		assert_eq!(animation.frames.len(), 50);
	}

	#[test]
	fn zones_rotate_the_base_gradient()
	{
		let params = Params::parse(&["200,0,0", "0,0,200", "60", "25"]).unwrap();
		let animation = breathe_zones(&geometry(), &params, &mut StdRng::seed_from_u64(0));

		assert_eq!(animation.frames.len(), 4);
		// top starts red while the base starts blue, lead slot on the first ring led
		assert_eq!(
			animation.frames[0],
			"P[1](200,0,0),P[2](200,0,0),P[3](200,0,0),P[4](200,0,0),\
			P[5](0,0,200),P[6](0,0,50),P[7](0,0,100),P[8](0,0,150)");
		// one frame later the lead has moved to the second ring led
		assert_eq!(
			animation.frames[1],
			"P[1](100,0,100),P[2](100,0,100),P[3](100,0,100),P[4](100,0,100),\
			P[5](75,0,75),P[6](100,0,100),P[7](25,0,25),P[8](50,0,50)");
	}
}
