//! The elements of a [`MappingSet`].
//!
//! Elements are owned by the set (or by their containing class or method), and are reached through a
//! [`Handle`], which pairs an element with the set it lives in. This is what allows asking an element for its name
//! in a [`MappingNamespace`], or for the class it's contained in.

use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use anyhow::Result;
use jtypes::Tristate;
use crate::location::MappingLocation;
use crate::names::Names;
use crate::namespace::{MappingNamespace, SetId, UNNAMED_FROM, UNNAMED_TO};
use crate::set::MappingSet;

pub mod class;
pub mod method;

pub use class::{ClassMappingElement, FieldMappingElement};
pub use method::{LocalVariableMappingElement, MethodMappingElement, MethodParameterMappingElement};

/// Something with one name slot per namespace of its set.
pub trait MappingElement {
	fn names(&self) -> &Names;
	fn location(&self) -> &MappingLocation;

	/// The name in the namespace with the given index.
	fn name_at(&self, index: usize) -> Option<&str> {
		self.names().get(index)
	}
}

/// The position of a class in its set.
///
/// Only the set that handed out an id accepts it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassId {
	pub(crate) set: SetId,
	pub(crate) index: usize,
}

impl ClassId {
	pub fn set(&self) -> SetId {
		self.set
	}
}

/// The position of a method in its set.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId {
	pub(crate) class: ClassId,
	pub(crate) index: usize,
}

impl MethodId {
	pub fn class(&self) -> ClassId {
		self.class
	}
}

/// Facts about a field or method that might not be known.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MemberMetadata {
	pub is_static: Tristate,
	pub is_synthetic: Tristate,
}

impl MemberMetadata {
	pub const UNKNOWN: MemberMetadata = MemberMetadata {
		is_static: Tristate::Unknown,
		is_synthetic: Tristate::Unknown,
	};
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageMappingElement {
	names: Names,
	location: MappingLocation,
}

impl PackageMappingElement {
	pub(crate) fn new(names: Names, location: MappingLocation) -> PackageMappingElement {
		PackageMappingElement { names, location }
	}
}

impl MappingElement for PackageMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

/// An element of a [`MappingSet`], borrowed together with that set.
///
/// Dereferences to the element itself. Two handles are equal if they point to the same element.
pub struct Handle<'s, T> {
	set: &'s MappingSet,
	element: &'s T,
}

impl<'s, T> Handle<'s, T> {
	pub(crate) fn new(set: &'s MappingSet, element: &'s T) -> Handle<'s, T> {
		Handle { set, element }
	}

	pub fn set(&self) -> &'s MappingSet {
		self.set
	}

	pub fn element(&self) -> &'s T {
		self.element
	}

	pub(crate) fn child<U>(&self, element: &'s U) -> Handle<'s, U> {
		Handle::new(self.set, element)
	}
}

impl<'s, T: MappingElement> Handle<'s, T> {
	/// The name of this element in the given namespace.
	///
	/// Fails if the namespace doesn't belong to the set of this element and the set has no namespace of that name.
	pub fn name(&self, namespace: &MappingNamespace) -> Result<Option<&'s str>> {
		let index = self.set.namespace_index(namespace)?;
		Ok(self.element.name_at(index))
	}

	/// The name of this element in the namespace with the given name.
	pub fn name_by(&self, namespace: &str) -> Result<Option<&'s str>> {
		let index = self.set.namespace_index_by_name(namespace)?;
		Ok(self.element.name_at(index))
	}

	pub fn unnamed_from(&self) -> Result<Option<&'s str>> {
		self.name_by(UNNAMED_FROM)
	}

	pub fn unnamed_to(&self) -> Result<Option<&'s str>> {
		self.name_by(UNNAMED_TO)
	}
}

impl<T> Clone for Handle<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Handle<'_, T> {}

impl<T> Deref for Handle<'_, T> {
	type Target = T;

	fn deref(&self) -> &Self::Target {
		self.element
	}
}

impl<T> PartialEq for Handle<'_, T> {
	fn eq(&self, other: &Self) -> bool {
		std::ptr::eq(self.element, other.element)
	}
}

impl<T> Eq for Handle<'_, T> {}

impl<T: Debug> Debug for Handle<'_, T> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Handle")
			.field(&self.set.id())
			.field(self.element)
			.finish()
	}
}
