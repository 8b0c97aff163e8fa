use std::sync::atomic::{AtomicU64, Ordering};
use anyhow::{bail, Result};

/// The name of the first namespace of mappings that don't name their namespaces.
pub const UNNAMED_FROM: &str = "from";
/// The name of the second namespace of mappings that don't name their namespaces.
pub const UNNAMED_TO: &str = "to";

static NEXT_SET_ID: AtomicU64 = AtomicU64::new(0);

/// Identifies a [`MappingSet`][crate::set::MappingSet] for the lifetime of the process.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SetId(u64);

impl SetId {
	pub(crate) fn next() -> SetId {
		SetId(NEXT_SET_ID.fetch_add(1, Ordering::Relaxed))
	}
}

/// A named column of a [`MappingSet`][crate::set::MappingSet].
///
/// The index of a namespace is its position in [`MappingSet::namespaces`][crate::set::MappingSet::namespaces]
/// and never changes. A namespace remembers the set it was created for, and a set only accepts a namespace of
/// another set if it has a namespace with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingNamespace {
	name: String,
	index: usize,
	set: SetId,
}

impl MappingNamespace {
	pub(crate) fn new(name: String, index: usize, set: SetId) -> MappingNamespace {
		MappingNamespace { name, index, set }
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn set_id(&self) -> SetId {
		self.set
	}
}

/// Validates the names of namespaces.
///
/// No names at all results in [`UNNAMED_FROM`] and [`UNNAMED_TO`]. Otherwise there need to be at least two
/// non-empty and distinct names.
pub(crate) fn namespace_names<I, S>(names: I) -> Result<Vec<String>>
where
	I: IntoIterator<Item = S>,
	S: Into<String>,
{
	let names: Vec<String> = names.into_iter().map(Into::into).collect();

	if names.is_empty() {
		return Ok(vec![UNNAMED_FROM.to_owned(), UNNAMED_TO.to_owned()]);
	}
	if names.len() < 2 {
		bail!("a mapping set must contain at least 2 namespaces, got {names:?}");
	}
	if names.iter().any(|name| name.is_empty()) {
		bail!("found empty namespace name in {names:?}, every namespace name must be non-empty");
	}
	for (i, name) in names.iter().enumerate() {
		if names[..i].contains(name) {
			bail!("namespace {name:?} is given more than once in {names:?}");
		}
	}

	Ok(names)
}
