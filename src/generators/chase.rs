use rand::RngCore;

use crate::animation::{color_bleed, Address, Animation, Frame, Linear, Settings};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::Params;

const TRACK_START: i32 = 0;
const TRACK_END: i32 = 100;

/// Builds the commands for a gradient whose head sits at `head` and whose
/// tail trails behind it against `direction` (1 forward, -1 backward).
///
/// Gradient entries that fall off the track are dropped, except the one
/// nearest to each edge which is pinned just outside it so the bleed still
/// runs all the way to the edge.
fn chase_frame(head: i32, direction: i32, spacing: i32, gradient: &[Color]) -> Frame
{
	let mut frame = Frame::new();
	let mut below: Option<(i32, Color)> = None;
	let mut above: Option<(i32, Color)> = None;

	for (index, color) in gradient.iter().enumerate()
	{
		let position = head - direction * index as i32 * spacing;

		if position < TRACK_START
		{
			if below.map_or(true, |(nearest, _)| position > nearest)
			{
				below = Some((position, *color));
			}
		}
		else if position > TRACK_END
		{
			if above.map_or(true, |(nearest, _)| position < nearest)
			{
				above = Some((position, *color));
			}
		}
		else
		{
			frame.set(Address::column_percent(position), *color);
		}
	}

	if frame.is_empty()
	{
		return frame
	}

	if let Some((_, color)) = below
	{
		frame.set(Address::column_percent(TRACK_START - 1), color);
	}

	if let Some((_, color)) = above
	{
		frame.set(Address::column_percent(TRACK_END + 1), color);
	}

	frame
}

/// Scanner bar bouncing across the board.
///
/// Colors: highlight (red), background (black).
/// Numbers: trail width in gradient steps (4, 2 to 100), spacing between
/// gradient steps in percent (5), frame delay (2).
///
/// Each frame only carries the head, its trailing bleed and the background
/// entry that erases where the tail was, the firmware keeps everything else.
pub fn kitt2000(_geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let highlight = params.color_or(0, Color::new(255, 0, 0));
	let background = params.color_or(1, Color::black());
	// a trail longer than the track never shows
	let width = params.count_or(0, 4, 2).min(TRACK_END as u32);
	let spacing = params.count_or(1, 5, 1).min(TRACK_END as u32) as i32;
	let frame_delay = params.count_or(2, 2, 1);

	// head first, the last entry is the background
	let gradient = color_bleed(highlight, background, width, &mut Linear);
	let span = (width as i32).saturating_mul(spacing);

	let forward = (TRACK_START..=TRACK_END + span)
		.step_by(spacing as usize)
		.map(|head| chase_frame(head, 1, spacing, &gradient));

	let backward = (TRACK_START - span..=TRACK_END)
		.rev()
		.step_by(spacing as usize)
		.map(|head| chase_frame(head, -1, spacing, &gradient));

	let frames = forward.chain(backward).collect();

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

	fn run(params: &Params) -> Animation
	{
		let geometry = DeviceGeometry::with_layout(5, 20, 87, &Layout::default());
		kitt2000(&geometry, params, &mut StdRng::seed_from_u64(0))
	}

	#[test]
	fn bounces_across_the_track()
	{
		let animation = run(&Params::default());

		assert_eq!(animation.settings, "framedelay:2,framestretch,loop");
		// heads 0..=120 forward and 100..=-20 backward, every 5%
		assert_eq!(animation.frames.len(), 50);
		assert_eq!(
			animation.frames[10],
			"P[c:50%](255,0,0),P[c:45%](191,0,0),P[c:40%](128,0,0),P[c:35%](64,0,0),P[c:30%](0,0,0)");
	}

	#[test]
	fn trail_is_pinned_at_the_start_edge()
	{
		let animation = run(&Params::default());

		assert_eq!(animation.frames[0], "P[c:0%](255,0,0),P[c:-1%](191,0,0)");
		assert_eq!(animation.frames[1], "P[c:5%](255,0,0),P[c:0%](191,0,0),P[c:-1%](128,0,0)");
	}

	#[test]
	fn head_leaving_the_end_edge()
	{
		let animation = run(&Params::default());

		// head at 105%, everything behind it still on the board
		assert_eq!(
			animation.frames[21],
			"P[c:100%](191,0,0),P[c:95%](128,0,0),P[c:90%](64,0,0),P[c:85%](0,0,0),P[c:101%](255,0,0)");
		// only the background entry is left on the board
		assert_eq!(animation.frames[24], "P[c:100%](0,0,0),P[c:101%](64,0,0)");
		// backward pass re-enters at the end edge
		assert_eq!(animation.frames[25], "P[c:100%](255,0,0),P[c:101%](191,0,0)");
	}

	#[test]
	fn oversized_width_is_clamped_to_the_track()
	{
		let widest = run(&Params::parse(&["100"]).unwrap());

		assert_eq!(run(&Params::parse(&["1000000000"]).unwrap()), widest);
		assert_eq!(run(&Params::parse(&["4294967295"]).unwrap()), widest);
		// heads 0..=600 forward and 100..=-500 backward, every 5%
		assert_eq!(widest.frames.len(), 242);
	}

	#[test]
	fn custom_colors_and_width()
	{
		let params = Params::parse(&["0,0,255", "0,0,55", "2", "50"]).unwrap();
		let animation = run(&params);

		// forward heads 0, 50, 100, 150, 200 and backward heads 100, 50, 0, -50, -100
		assert_eq!(animation.frames.len(), 10);
		assert_eq!(animation.frames[2], "P[c:100%](0,0,255),P[c:50%](0,0,155),P[c:0%](0,0,55)");
		assert_eq!(animation.frames[9], "P[c:0%](0,0,55),P[c:-1%](0,0,155)");
	}
}
