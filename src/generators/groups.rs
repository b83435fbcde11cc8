use rand::RngCore;

use crate::animation::{color_bleed, multi_color_bleed, Animation, Frame, Linear, Settings};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::{fill, Params, MAX_FRAMES};

/// Every key group runs the same color loop, each one a color further
/// along than the group before it.
///
/// Colors: the loop (red, green, blue). Numbers: frames per color
/// transition (16, 3 to 1000), frame delay (3).
pub fn group_cycle(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let colors = params.colors_or(&[Color::new(255, 0, 0), Color::new(0, 255, 0), Color::new(0, 0, 255)]);
	let frames_per_segment = params.count_or(0, 16, 3).min(MAX_FRAMES);
	let frame_delay = params.count_or(1, 3, 1);

	let sequence = multi_color_bleed(frames_per_segment, &mut Linear, &colors);
	// starting one color later is the same as skipping one transition ahead
	let shift = (frames_per_segment - 1) as usize;
	let group_ids: Vec<Vec<u32>> = geometry.key_groups
		.iter()
		.map(|group| group.ids())
		.collect();

	let frames = (0..sequence.len())
		.map(|index|
		{
			let mut frame = Frame::new();

			for (group, ids) in group_ids.iter().enumerate()
			{
				let color = sequence[(index + group * shift) % sequence.len()];
				frame.extend(fill(ids.iter().copied(), color));
			}

			frame
		})
		.collect();

	Animation::new(
		Settings::new()
			.frame_delay(frame_delay)
			.looping(),
		frames)
}

/// A highlight hopping from key group to key group, leaving a fading trail.
///
/// Colors: highlight (white), background (dark blue). Numbers: trail length
/// in groups (2, at most the group count), frame delay (8).
pub fn group_tracer(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let highlight = params.color_or(0, Color::new(255, 255, 255));
	let background = params.color_or(1, Color::new(0, 0, 32));
	let groups = &geometry.key_groups;
	// every group is at most `groups.len() - 1` behind the head
	let trail = (params.count_or(0, 2, 1) as usize).min(groups.len().max(1));
	let frame_delay = params.count_or(1, 8, 1);

	// head, trail.., background
	let gradient = color_bleed(highlight, background, trail as u32 + 1, &mut Linear);

	let frames = (0..groups.len().max(1))
		.map(|head|
		{
			let mut frame = Frame::new();

			for (index, group) in groups.iter().enumerate()
			{
				let behind = (head + groups.len() - index) % groups.len();
				let color = gradient.get(behind).copied().unwrap_or(background);

				frame.extend(fill(group.ids(), color));
			}

			frame
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

	use crate::device::keygroup::{KeyGroup, Layout, LedRange};

	fn geometry() -> DeviceGeometry
	{
		let layout = Layout
		{
			key_groups: vec![
				KeyGroup::new("a", vec![LedRange::Single(1)]),
				KeyGroup::new("b", vec![LedRange::Span([2, 3])]),
				KeyGroup::new("c", vec![LedRange::Single(4)]),
				KeyGroup::new("d", vec![LedRange::Single(5)])
			],
			base_ring: Vec::new()
		};

		DeviceGeometry::with_layout(0, 4, 5, &layout)
	}

	#[test]
	fn groups_are_a_color_apart()
	{
		let params = Params::parse(&["255,0,0", "0,255,0", "0,0,255", "3"]).unwrap();
		let animation = group_cycle(&geometry(), &params, &mut StdRng::seed_from_u64(0));

		assert_eq!(animation.frames.len(), 6);
		assert_eq!(
			animation.frames[0],
			"P[1](255,0,0),P[2](0,255,0),P[3](0,255,0),P[4](0,0,255),P[5](255,0,0)");
		assert_eq!(
			animation.frames[1],
			"P[1](128,128,0),P[2](0,128,128),P[3](0,128,128),P[4](128,0,128),P[5](128,128,0)");
	}

	#[test]
	fn tracer_trails_behind_the_head()
	{
		let params = Params::parse(&["200,200,200", "0,0,0", "1"]).unwrap();
		let animation = group_tracer(&geometry(), &params, &mut StdRng::seed_from_u64(0));

		assert_eq!(animation.frames.len(), 4);
		assert_eq!(
			animation.frames[0],
			"P[1](200,200,200),P[2](0,0,0),P[3](0,0,0),P[4](0,0,0),P[5](100,100,100)");
		assert_eq!(
			animation.frames[2],
			"P[1](0,0,0),P[2](100,100,100),P[3](100,100,100),P[4](200,200,200),P[5](0,0,0)");
	}

	#[test]
	fn oversized_counts_are_capped()
	{
		let params = Params::parse(&["1000000000"]).unwrap();

		let tracer = group_tracer(&geometry(), &params, &mut StdRng::seed_from_u64(0));
		let capped = group_tracer(&geometry(), &Params::parse(&["4"]).unwrap(), &mut StdRng::seed_from_u64(0));
		assert_eq!(tracer, capped);

		let cycle = group_cycle(&geometry(), &params, &mut StdRng::seed_from_u64(0));
		assert_eq!(cycle.frames.len(), 3 * (MAX_FRAMES as usize - 1));
	}

	#[test]
	fn no_groups_still_yields_a_frame()
	{
		let geometry = DeviceGeometry::with_layout(0, 0, 0, &Layout { key_groups: Vec::new(), base_ring: Vec::new() });
		let animation = group_tracer(&geometry, &Params::default(), &mut StdRng::seed_from_u64(0));

		assert_eq!(animation.frames, vec![String::new()]);
	}
}
