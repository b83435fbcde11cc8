use std::fmt;

use crate::device::rgb::Color;

/// Where a pixel command lands. Percent positions may sit outside 0..=100
/// to anchor bleeds just past the edge of the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Address
{
	Grid { row: Option<i32>, col: Option<i32> },
	Percent { row: Option<i32>, col: Option<i32> },
	Id(u32)
}

impl Address
{
	pub fn cell(row: i32, col: i32) -> Self
	{
		Address::Grid { row: Some(row), col: Some(col) }
	}

	pub fn row(row: i32) -> Self
	{
		Address::Grid { row: Some(row), col: None }
	}

	pub fn column(col: i32) -> Self
	{
		Address::Grid { row: None, col: Some(col) }
	}

	pub fn column_percent(col: i32) -> Self
	{
		Address::Percent { row: None, col: Some(col) }
	}

	pub fn id(&self) -> Option<u32>
	{
		match self
		{
			Address::Id(id) => Some(*id),
			_ => None
		}
	}

	fn parts(&self) -> Vec<String>
	{
		match *self
		{
			Address::Grid { row, col } => row
				.map(|row| format!("r:{}", row))
				.into_iter()
				.chain(col.map(|col| format!("c:{}", col)))
				.collect(),
			Address::Percent { row, col } => row
				.map(|row| format!("r:{}%", row))
				.into_iter()
				.chain(col.map(|col| format!("c:{}%", col)))
				.collect(),
			Address::Id(id) => vec![id.to_string()]
		}
	}
}

/// One color assignment in the firmware's pixel syntax:
/// `P[r:<row>,c:<col>](<r>,<g>,<b>)` or `P[<id>](<r>,<g>,<b>)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PixelCommand
{
	pub address: Address,
	pub color: Color
}

impl PixelCommand
{
	pub fn new(address: Address, color: Color) -> Self
	{
		Self { address, color }
	}

	pub fn id(id: u32, color: Color) -> Self
	{
		Self::new(Address::Id(id), color)
	}
}

impl fmt::Display for PixelCommand
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		write!(f, "P[{}]({},{},{})",
			self.address.parts().join(","),
			self.color.r,
			self.color.g,
			self.color.b)
	}
}
