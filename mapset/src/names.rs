use std::fmt::{Debug, Formatter};
use std::ops::{Index, IndexMut};

/// The names of an element, one slot per namespace.
///
/// The slot for a namespace is at the index of that namespace. Slots may be empty.
///
/// Implements the [Index] and [IndexMut] traits for namespace indices.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Names {
	names: Box<[Option<String>]>,
}

impl Index<usize> for Names {
	type Output = Option<String>;

	fn index(&self, index: usize) -> &Self::Output {
		&self.names[index]
	}
}

impl IndexMut<usize> for Names {
	fn index_mut(&mut self, index: usize) -> &mut Self::Output {
		&mut self.names[index]
	}
}

impl Names {
	/// Creates names with `len` empty slots.
	pub fn none(len: usize) -> Names {
		Names { names: vec![None; len].into_boxed_slice() }
	}

	pub fn len(&self) -> usize {
		self.names.len()
	}

	pub fn is_empty(&self) -> bool {
		self.names.is_empty()
	}

	/// Returns the name in the namespace with the given index, `None` if there's no name or the index is out of bounds.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.names.get(index)?.as_deref()
	}

	pub(crate) fn slot_mut(&mut self, index: usize) -> Option<&mut Option<String>> {
		self.names.get_mut(index)
	}

	pub fn iter(&self) -> impl Iterator<Item = Option<&str>> {
		self.names.iter().map(Option::as_deref)
	}

	/// Returns if any slot holds the given name.
	pub fn contains(&self, name: &str) -> bool {
		self.iter().any(|x| x == Some(name))
	}

	pub fn all_none(&self) -> bool {
		self.names.iter().all(Option::is_none)
	}

	pub fn missing(&self) -> usize {
		self.names.iter().filter(|x| x.is_none()).count()
	}

	/// Empties all slots that only contain whitespace.
	pub(crate) fn without_blanks(self) -> Names {
		let names = self.names.into_vec()
			.into_iter()
			.map(|name| name.filter(|name| !name.trim().is_empty()))
			.collect();
		Names { names }
	}
}

impl Debug for Names {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list()
			.entries(self.names.iter())
			.finish()
	}
}

impl From<Vec<Option<String>>> for Names {
	fn from(value: Vec<Option<String>>) -> Self {
		Names { names: value.into_boxed_slice() }
	}
}

impl<const N: usize> From<[Option<&str>; N]> for Names {
	fn from(value: [Option<&str>; N]) -> Self {
		let names = value.into_iter()
			.map(|name| name.map(str::to_owned))
			.collect();
		Names { names }
	}
}

impl From<Names> for Vec<Option<String>> {
	fn from(value: Names) -> Self {
		value.names.into_vec()
	}
}
