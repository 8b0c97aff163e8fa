//! The vocabulary shared by everything that deals with JVM symbols in mapping files: names, type
//! descriptors and references to members.

mod macros;

pub mod names;
pub mod descriptor;
pub mod refs;

/// A boolean that might not be known.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Tristate {
	True,
	False,
	#[default]
	Unknown,
}

impl From<bool> for Tristate {
	fn from(value: bool) -> Self {
		if value { Tristate::True } else { Tristate::False }
	}
}

impl Tristate {
	pub fn as_bool(self) -> Option<bool> {
		match self {
			Tristate::True => Some(true),
			Tristate::False => Some(false),
			Tristate::Unknown => None,
		}
	}
}
