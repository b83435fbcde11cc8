use std::collections::{BTreeMap, BTreeSet};

use log::debug;

use super::{DeviceConfig, PixelMap};
use super::keygroup::{KeyGroup, Layout};

/// Everything a generator may know about the board. Built once from the
/// loaded documents and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeviceGeometry
{
	pub max_row: u32,
	pub max_col: u32,
	pub led_count: u32,
	pub scan_code_leds: BTreeMap<u32, u32>,
	pub key_groups: Vec<KeyGroup>,
	pub base_ring: Vec<u32>
}

impl DeviceGeometry
{
	pub fn new(config: &DeviceConfig, pixels: &PixelMap, layout: &Layout) -> Self
	{
		let scan_code_leds: BTreeMap<u32, u32> = config.leds
			.iter()
			.filter_map(|led| led.scan_code().map(|code| (code, led.id)))
			.collect();

		// pixel ids are 1 based and dense, fall back to the led list when the
		// geometry document has no pixels
		let led_count = if pixels.pixel_ids.is_empty()
		{
			config.leds.iter().map(|led| led.id).max().unwrap_or(0)
		}
		else
		{
			pixels.pixel_ids.len() as u32
		};

		let geometry = Self
		{
			max_row: pixels.max_row(),
			max_col: pixels.max_col(),
			led_count,
			scan_code_leds,
			key_groups: layout.key_groups.clone(),
			base_ring: layout.base_ring.clone()
		};

		debug!(
			"geometry: {} rows, {} columns, {} leds, {} scan codes, {} key groups, {} base leds",
			geometry.max_row + 1,
			geometry.max_col + 1,
			geometry.led_count,
			geometry.scan_code_leds.len(),
			geometry.key_groups.len(),
			geometry.base_ring.len());

		geometry
	}

	/// A geometry without any documents, mostly useful for tests.
	pub fn with_layout(max_row: u32, max_col: u32, led_count: u32, layout: &Layout) -> Self
	{
		Self
		{
			max_row,
			max_col,
			led_count,
			scan_code_leds: BTreeMap::new(),
			key_groups: layout.key_groups.clone(),
			base_ring: layout.base_ring.clone()
		}
	}

	pub fn led_ids(&self) -> impl Iterator<Item = u32>
	{
		1..=self.led_count
	}

	/// Every LED that isn't part of the base ring.
	pub fn top_ids(&self) -> Vec<u32>
	{
		let base: BTreeSet<u32> = self.base_ring.iter().copied().collect();

		self.led_ids()
			.filter(|id| !base.contains(id))
			.collect()
	}

	pub fn led_for_scan_code(&self, scan_code: u32) -> Option<u32>
	{
		self.scan_code_leds.get(&scan_code).copied()
	}
}
