use serde::Serialize;

pub const BASE_PRIORITY: i32 = 0;
pub const HIGH_PRIORITY: i32 = 100;
pub const LOW_PRIORITY: i32 = -100;

/// A line number together with the priority declarations on that line get.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LinePriority {
	pub coord: u32,
	pub priority: i32,
}

impl LinePriority {
	pub fn new(coord: u32, priority: i32) -> LinePriority {
		LinePriority { coord, priority }
	}

	pub fn base(coord: u32) -> LinePriority {
		LinePriority::new(coord, BASE_PRIORITY)
	}

	pub fn high(coord: u32) -> LinePriority {
		LinePriority::new(coord, HIGH_PRIORITY)
	}

	pub fn low(coord: u32) -> LinePriority {
		LinePriority::new(coord, LOW_PRIORITY)
	}
}

/// The position of a declaration in a mapping file.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileCoords {
	pub line: Option<u32>,
	pub col: u32,
	pub priority: i32,
}

impl FileCoords {
	pub fn new(line: u32, col: u32) -> FileCoords {
		FileCoords { line: Some(line), col, priority: BASE_PRIORITY }
	}

	/// Creates coordinates from an optional line, taking the priority from it.
	pub fn at(line: Option<LinePriority>, col: u32) -> FileCoords {
		FileCoords {
			line: line.map(|line| line.coord),
			col,
			priority: line.map_or(BASE_PRIORITY, |line| line.priority),
		}
	}

	pub fn with_priority(self, priority: i32) -> FileCoords {
		FileCoords { priority, ..self }
	}
}

impl Default for FileCoords {
	fn default() -> Self {
		FileCoords { line: None, col: 1, priority: BASE_PRIORITY }
	}
}

impl From<LinePriority> for FileCoords {
	fn from(value: LinePriority) -> Self {
		FileCoords::at(Some(value), 1)
	}
}

/// Where an element was declared.
///
/// Locations carry the priority used when two declarations target the same parameter or local variable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum MappingLocation {
	File(FileCoords),
	/// Has the lowest possible priority.
	Unknown,
}

impl MappingLocation {
	pub fn priority(&self) -> i32 {
		match self {
			MappingLocation::File(coords) => coords.priority,
			MappingLocation::Unknown => i32::MIN,
		}
	}

	/// Replaces the priority. Does nothing for [`MappingLocation::Unknown`].
	pub fn with_priority(self, priority: i32) -> MappingLocation {
		match self {
			MappingLocation::File(coords) => MappingLocation::File(coords.with_priority(priority)),
			MappingLocation::Unknown => MappingLocation::Unknown,
		}
	}

	pub fn coords(&self) -> Option<FileCoords> {
		match self {
			MappingLocation::File(coords) => Some(*coords),
			MappingLocation::Unknown => None,
		}
	}

	/// Returns `true` if a declaration at `self` must leave an `existing` declaration of the same slot in place.
	///
	/// This is the case if the existing one has the same or a higher priority.
	pub fn yields_to(&self, existing: &MappingLocation) -> bool {
		self.priority() <= existing.priority()
	}
}

impl From<FileCoords> for MappingLocation {
	fn from(value: FileCoords) -> Self {
		MappingLocation::File(value)
	}
}
