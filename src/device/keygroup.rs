use serde::{Serialize, Deserialize};

/// Either a single LED id or an inclusive `[low, high]` span of them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LedRange
{
	Single(u32),
	Span([u32; 2])
}

impl LedRange
{
	pub fn ids(&self) -> impl Iterator<Item = u32>
	{
		let (low, high) = match *self
		{
			LedRange::Single(id) => (id, id),
			LedRange::Span([a, b]) => (a.min(b), a.max(b))
		};

		low..=high
	}
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KeyGroup
{
	pub name: String,
	pub ranges: Vec<LedRange>
}

impl KeyGroup
{
	pub fn new<S: Into<String>>(name: S, ranges: Vec<LedRange>) -> Self
	{
		Self { name: name.into(), ranges }
	}

	pub fn ids(&self) -> Vec<u32>
	{
		self.ranges
			.iter()
			.flat_map(|range| range.ids())
			.collect()
	}

	pub fn contains(&self, id: u32) -> bool
	{
		self.ranges
			.iter()
			.any(|range| range.ids().any(|candidate| candidate == id))
	}
}

/// Physical zones and the underglow ring for a board. The defaults describe
/// a tenkeyless board with 87 key LEDs followed by a 32 LED base ring.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Layout
{
	pub key_groups: Vec<KeyGroup>,
	// ordered clockwise starting at the middle of the front edge
	pub base_ring: Vec<u32>
}

impl Default for Layout
{
	fn default() -> Self
	{
		use LedRange::{Single, Span};

		Self
		{
			key_groups: vec![
				KeyGroup::new("function", vec![Span([1, 16])]),
				KeyGroup::new("left", vec![Span([17, 23]), Span([34, 38]), Span([50, 54]), Span([63, 68]), Span([76, 78])]),
				KeyGroup::new("right", vec![Span([24, 30]), Span([39, 46]), Span([55, 62]), Span([69, 74]), Span([80, 83])]),
				KeyGroup::new("letters", vec![Span([35, 44]), Span([51, 59]), Span([64, 70])]),
				KeyGroup::new("space", vec![Single(79)]),
				KeyGroup::new("navigation", vec![Span([31, 33]), Span([47, 49])]),
				KeyGroup::new("arrows", vec![Single(75), Span([84, 87])]),
				KeyGroup::new("base", vec![Span([88, 119])])
			],
			base_ring: (88..=119).collect()
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn ranges_expand_inclusively()
	{
		let group = KeyGroup::new("mixed", vec![LedRange::Span([5, 3]), LedRange::Single(9)]);

		assert_eq!(group.ids(), vec![3, 4, 5, 9]);
		assert!(group.contains(4));
		assert!(!group.contains(6));
	}

	#[test]
	fn ranges_deserialize_from_numbers_and_pairs()
	{
		let ranges: Vec<LedRange> = serde_yaml::from_str("[7, [1, 3]]").unwrap();

		assert_eq!(ranges, vec![LedRange::Single(7), LedRange::Span([1, 3])]);
	}
}
