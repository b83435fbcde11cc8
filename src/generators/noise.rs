use rand::{Rng, RngCore};

use crate::animation::{color_bleed_step, Animation, Frame, PixelCommand, Random, Settings};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::{fill, Params, MAX_FRAMES};

/// Television static. Every frame draws a fresh gray level for every led,
/// nothing carries over from the previous frame.
///
/// Numbers: noise frames (5, 1 to 1000), brightest gray level (96, at most
/// 255), frame delay (4).
pub fn dodgy_pixel(geometry: &DeviceGeometry, params: &Params, rng: &mut dyn RngCore) -> Animation
{
	let frame_count = params.count_or(0, 5, 1).min(MAX_FRAMES);
	let cap = params.count_or(1, 96, 0).min(255) as u8;
	let frame_delay = params.count_or(2, 4, 1);

	let mut frames = Vec::with_capacity(frame_count as usize + 1);
	frames.push(fill(geometry.led_ids(), Color::black()).collect::<Frame>());

	for _ in 0..frame_count
	{
		frames.push(geometry
			.led_ids()
			.map(|id| PixelCommand::id(id, Color::gray(rng.gen_range(0..=cap))))
			.collect());
	}

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.looping()
			.replace_all(),
		frames)
}

/// Candle light, the whole board jumping to a random point between a dim
/// and a bright color each frame.
///
/// Colors: dim (dark orange), bright (warm yellow). Numbers: frames (24,
/// 1 to 1000), frame delay (6).
pub fn flicker(geometry: &DeviceGeometry, params: &Params, rng: &mut dyn RngCore) -> Animation
{
	let dim = params.color_or(0, Color::new(96, 32, 0));
	let bright = params.color_or(1, Color::new(255, 160, 32));
	let frame_count = params.count_or(0, 24, 1).min(MAX_FRAMES);
	let frame_delay = params.count_or(1, 6, 1);

	let mut random = Random::new(rng);

	let frames = (0..frame_count)
		.map(|step|
		{
			let color = color_bleed_step(dim, bright, frame_count, step, &mut random).unwrap_or(dim);
			fill(geometry.led_ids(), color).collect()
		})
		.collect();

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.frame_stretch()
			.looping(),
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
		DeviceGeometry::with_layout(2, 5, 12, &Layout::default())
	}

	fn gray_levels(frame: &str) -> Vec<u8>
	{
		frame
			.split("),")
			.map(|command|
			{
				let channels = command.split('(').nth(1).unwrap().trim_end_matches(')');
				let values: Vec<u8> = channels.split(',').map(|value| value.parse().unwrap()).collect();
				assert_eq!(values[0], values[1]);
				assert_eq!(values[1], values[2]);
				values[0]
			})
			.collect()
	}

	#[test]
	fn static_has_a_background_frame_and_stays_capped()
	{
		let params = Params::parse(&["5", "40"]).unwrap();
		let animation = dodgy_pixel(&geometry(), &params, &mut StdRng::seed_from_u64(3));

		assert_eq!(animation.frames.len(), 6);
		assert!(gray_levels(&animation.frames[0]).iter().all(|level| *level == 0));

		for frame in &animation.frames[1..]
		{
			let levels = gray_levels(frame);
			assert_eq!(levels.len(), 12);
			assert!(levels.iter().all(|level| *level <= 40));
		}
	}

	#[test]
	fn static_is_reproducible_with_a_seed()
	{
		let first = dodgy_pixel(&geometry(), &Params::default(), &mut StdRng::seed_from_u64(9));
		let second = dodgy_pixel(&geometry(), &Params::default(), &mut StdRng::seed_from_u64(9));

		assert_eq!(first, second);
	}

	#[test]
	fn frame_counts_are_capped()
	{
		let geometry = DeviceGeometry::with_layout(0, 0, 1, &Layout::default());
		let params = Params::parse(&["1000000000"]).unwrap();

		let noise = dodgy_pixel(&geometry, &params, &mut StdRng::seed_from_u64(1));
		let candle = flicker(&geometry, &params, &mut StdRng::seed_from_u64(1));

		assert_eq!(noise.frames.len(), MAX_FRAMES as usize + 1);
		assert_eq!(candle.frames.len(), MAX_FRAMES as usize);
	}

	#[test]
	fn flicker_stays_between_its_colors()
	{
		let params = Params::parse(&["10,20,30", "50,60,70", "30"]).unwrap();
		let animation = flicker(&geometry(), &params, &mut StdRng::seed_from_u64(5));

		assert_eq!(animation.frames.len(), 30);

		for frame in &animation.frames
		{
			let first = frame.split("),").next().unwrap();
			let channels: Vec<u8> = first
				.split('(').nth(1).unwrap()
				.trim_end_matches(')')
				.split(',')
				.map(|value| value.parse().unwrap())
				.collect();

			assert!((10..=50).contains(&channels[0]));
			assert!((20..=60).contains(&channels[1]));
			assert!((30..=70).contains(&channels[2]));
		}
	}
}
