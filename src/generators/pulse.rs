use rand::RngCore;

use crate::animation::{multi_color_bleed, Animation, Frame, PixelCommand, Settings, Sine};
use crate::device::DeviceGeometry;
use crate::device::rgb::Color;

use super::{fill, steps_per_inhale, Params};

const IDLE_INTENSITY: f64 = 0.15;

/// One step of the tracer track: a left ring led and its mirror image on the
/// right, which is absent for the middle led of an odd sized ring.
type TrackSlot = (u32, Option<u32>);

/// Folds the base ring onto itself so slot `n` holds the `n`th led from the
/// front on both sides.
fn mirrored_track(ring: &[u32]) -> Vec<TrackSlot>
{
	let half = (ring.len() + 1) / 2;

	(0..half)
		.map(|index|
		{
			let mirror = ring.len() - 1 - index;
			(ring[index], (mirror != index).then(|| ring[mirror]))
		})
		.collect()
}

/// Picks how many frames the animation needs and how long the padded track
/// is so that both the breath cycle and the tracer loop end on the last
/// frame.
///
/// The frame count is the breath cycle, repeated until it is at least as
/// long as the track. The padded track length is then the smallest length
/// no shorter than the track that divides the frame count evenly.
fn synchronize(cycle_length: usize, track_length: usize) -> (usize, usize)
{
	if cycle_length == 0 || track_length == 0
	{
		return (cycle_length.max(1), track_length)
	}

	let repeats = (track_length + cycle_length - 1) / cycle_length;
	let frame_count = cycle_length * repeats;
	let padded = (track_length..=frame_count)
		.find(|length| frame_count % length == 0)
		.unwrap_or(frame_count);

	(frame_count, padded)
}

/// The board breathes through a loop of colors while tracers climb both
/// sides of the base ring in step with it.
///
/// Colors: the loop (red, orange, purple). Numbers: breaths per minute
/// (12), frame delay (10), tracer length in ring slots (3, min 1).
pub fn vertical_pulse(geometry: &DeviceGeometry, params: &Params, _rng: &mut dyn RngCore) -> Animation
{
	let colors = params.colors_or(&[Color::new(255, 0, 0), Color::new(255, 96, 0), Color::new(128, 0, 255)]);
	let breaths_per_minute = params.number_or(0, 12.0);
	let frame_delay = params.count_or(1, 10, 1);
	let tracer_length = params.count_or(2, 3, 1) as usize;

	let steps = steps_per_inhale(breaths_per_minute, frame_delay);
	let cycle = multi_color_bleed(steps + 1, &mut Sine, &colors);

	let mut track: Vec<Option<TrackSlot>> = mirrored_track(&geometry.base_ring)
		.into_iter()
		.map(Some)
		.collect();

	let (frame_count, padded_length) = synchronize(cycle.len(), track.len());
	track.resize(padded_length, None);

	let top_ids = geometry.top_ids();

	let frames = (0..frame_count)
		.map(|index|
		{
			let color = cycle.get(index % cycle.len().max(1)).copied().unwrap_or_default();
			let mut frame: Frame = fill(top_ids.iter().copied(), color).collect();

			if !track.is_empty()
			{
				let head = index % track.len();

				for (position, slot) in track.iter().enumerate()
				{
					let (left, right) = match slot
					{
						Some(slot) => *slot,
						None => continue
					};

					let behind = (head + track.len() - position) % track.len();
					let intensity = if behind < tracer_length { 1.0 } else { IDLE_INTENSITY };
					let shade = color.scale(intensity);

					frame.push(PixelCommand::id(left, shade));

					if let Some(right) = right
					{
						frame.push(PixelCommand::id(right, shade));
					}
				}
			}

			frame.sort_by_id();
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
