use crate::device::rgb::Color;

use super::interpolate::Interpolate;

/// Fewer than two steps leaves nothing between the endpoints, so those
/// requests collapse onto the midpoint of a two step bleed.
const FALLBACK_STEPS: u32 = 2;
const FALLBACK_STEP: u32 = 1;

fn blend(orig: Color, dest: Color, step: u32, steps: u32, interp: &mut dyn Interpolate) -> Color
{
	let [r1, g1, b1] = orig.channels();
	let [r2, g2, b2] = dest.channels();

	Color::from_channels(
		interp.interpolate(step, steps, r1, r2),
		interp.interpolate(step, steps, g1, g2),
		interp.interpolate(step, steps, b1, b2))
}

/// Every color from `orig` to `dest` inclusive, `steps + 1` of them.
///
/// With `steps < 2` the result is the single midpoint color.
pub fn color_bleed(orig: Color, dest: Color, steps: u32, interp: &mut dyn Interpolate) -> Vec<Color>
{
	if steps < FALLBACK_STEPS
	{
		return vec![blend(orig, dest, FALLBACK_STEP, FALLBACK_STEPS, interp)]
	}

	(0..=steps)
		.map(|step| blend(orig, dest, step, steps, interp))
		.collect()
}

/// A single color of the bleed, `None` when `step` is past `steps`.
pub fn color_bleed_step(
	orig: Color,
	dest: Color,
	steps: u32,
	step: u32,
	interp: &mut dyn Interpolate) -> Option<Color>
{
	let (steps, step) = if steps < FALLBACK_STEPS
	{
		(FALLBACK_STEPS, FALLBACK_STEP)
	}
	else
	{
		(steps, step)
	};

	(step <= steps).then(|| blend(orig, dest, step, steps, interp))
}

/// Bleeds around the closed loop of `colors`, each segment spanning
/// `frames_per_segment` colors including both of its endpoints.
///
/// Shared segment boundaries appear once and the final color (which equals
/// the first) is dropped, so the result can be replayed as a seamless loop
/// of `colors.len() * (frames_per_segment - 1)` colors.
pub fn multi_color_bleed(frames_per_segment: u32, interp: &mut dyn Interpolate, colors: &[Color]) -> Vec<Color>
{
	let steps = frames_per_segment.saturating_sub(1).max(FALLBACK_STEPS);
	let mut sequence = Vec::with_capacity(colors.len() * steps as usize + 1);

	for (index, orig) in colors.iter().enumerate()
	{
		let dest = colors[(index + 1) % colors.len()];
		let segment = color_bleed(*orig, dest, steps, interp);
		let skip = if index == 0 { 0 } else { 1 };

		sequence.extend(segment.into_iter().skip(skip));
	}

	sequence.pop();
	sequence
}

/// Rotates `colors` left by `offset`, wrapping around.
pub fn rotate_colors(colors: &[Color], offset: usize) -> Vec<Color>
{
	if colors.is_empty()
	{
		return Vec::new()
	}

	let offset = offset % colors.len();
	colors[offset..]
		.iter()
		.chain(colors[..offset].iter())
		.copied()
		.collect()
}
