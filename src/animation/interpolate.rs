use std::f64::consts::PI;

use rand::{Rng, RngCore};

/// Scalar interpolation between two values given a step index out of a
/// total step count.
pub trait Interpolate
{
	fn interpolate(&mut self, step: u32, steps: u32, from: f64, to: f64) -> f64;
}

fn progress(step: u32, steps: u32) -> f64
{
	if steps == 0
	{
		1.0
	}
	else
	{
		step as f64 / steps as f64
	}
}

#[derive(Copy, Clone, Debug, Default)]
pub struct Linear;

impl Interpolate for Linear
{
	fn interpolate(&mut self, step: u32, steps: u32, from: f64, to: f64) -> f64
	{
		from + (to - from) * progress(step, steps)
	}
}

/// Eases in and out along the sine curve between -π/2 and π/2.
#[derive(Copy, Clone, Debug, Default)]
pub struct Sine;

impl Interpolate for Sine
{
	fn interpolate(&mut self, step: u32, steps: u32, from: f64, to: f64) -> f64
	{
		let angle = -PI / 2.0 + progress(step, steps) * PI;
		let eased = (angle.sin() + 1.0) / 2.0;

		from + (to - from) * eased
	}
}

/// Ignores the step and lands anywhere between the two values.
pub struct Random<'a>
{
	rng: &'a mut dyn RngCore
}

impl<'a> Random<'a>
{
	pub fn new(rng: &'a mut dyn RngCore) -> Self
	{
		Self { rng }
	}
}

impl Interpolate for Random<'_>
{
	fn interpolate(&mut self, _step: u32, _steps: u32, from: f64, to: f64) -> f64
	{
		let draw: f64 = self.rng.gen();
		from + (to - from) * draw
	}
}
