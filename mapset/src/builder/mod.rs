//! Incremental construction of a [`MappingSet`].
//!
//! Readers of mapping files create one builder per declaration, fill in names as they become known, and hand the
//! [`MappingSetBuilder`] over to [`MappingSetBuilder::build`] at the end. Problems are reported as they're found:
//! while reading, through the [`MappingIssuesRegistry`] implementation of the set builder, and while building, when
//! names are missing or a method has no descriptor.

use std::rc::Rc;
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use jtypes::names::ClassName;
use crate::issues::{MappingIssues, MappingIssuesRegistry};
use crate::location::{FileCoords, LinePriority};
use crate::names::Names;
use crate::namespace::namespace_names;
use crate::set::MappingSet;

pub mod class;
pub mod method;

pub use class::{ClassMappingBuilder, FieldMappingBuilder};
pub use method::{LocalVarMappingBuilder, MethodMappingBuilder, ParamMappingBuilder};

/// A value spelled in the namespace with the index `ns`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ns<T> {
	pub value: T,
	pub ns: usize,
}

impl<T> Ns<T> {
	pub fn new(value: T, ns: usize) -> Ns<T> {
		Ns { value, ns }
	}

	pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Ns<U> {
		Ns { value: f(self.value), ns: self.ns }
	}
}

/// A builder holding one name slot for each namespace.
pub trait NamingBuilder {
	fn namespaces(&self) -> &[String];
	fn names(&self) -> &Names;
	fn names_mut(&mut self) -> &mut Names;

	/// Sets the name in the namespace with the given index.
	///
	/// An already present name is only replaced if `overwrite` is set.
	fn declare(&mut self, ns: usize, name: impl Into<String>, overwrite: bool) -> Result<&mut Self>
	where
		Self: Sized,
	{
		let count = self.namespaces().len();
		let slot = self.names_mut()
			.slot_mut(ns)
			.with_context(|| anyhow!("namespace index {ns} is out of bounds for {count} namespaces"))?;

		if overwrite || slot.is_none() {
			*slot = Some(name.into());
		}
		Ok(self)
	}

	/// Sets the name in the namespace with the given name, see [`declare`][NamingBuilder::declare].
	fn declare_in(&mut self, namespace: &str, name: impl Into<String>, overwrite: bool) -> Result<&mut Self>
	where
		Self: Sized,
	{
		let ns = self.namespace_index(namespace)?;
		self.declare(ns, name, overwrite)
	}

	fn namespace_index(&self, namespace: &str) -> Result<usize> {
		self.namespaces()
			.iter()
			.position(|x| x == namespace)
			.with_context(|| anyhow!("no namespace {namespace:?} in {:?}", self.namespaces()))
	}

	fn name(&self, ns: usize) -> Option<&str> {
		self.names().get(ns)
	}
}

/// Normalizes the names of a builder, reporting missing ones.
///
/// With `warn_missing`, every empty slot is reported as a warning. If all slots are empty, that's an error, but
/// the names are returned anyway.
pub(crate) fn finish_names(
	names: Names,
	kind: &str,
	coords: FileCoords,
	warn_missing: bool,
	issues: &mut dyn MappingIssuesRegistry,
) -> Names {
	if warn_missing {
		for _ in 0..names.missing() {
			issues.warning(format!("{kind} mapping found without target name"), Some(coords));
		}
	}

	let names = names.without_blanks();
	if names.all_none() {
		issues.error(format!("{kind} mapping found with no target names"), Some(coords));
	}
	names
}

/// Builds a [`MappingSet`].
///
/// Looking up a class by name remembers the reference and the class found, so that consecutive declarations of
/// members of the same class don't search through all classes again. Only a repeated lookup of the exact same
/// reference takes that shortcut.
#[derive(Debug)]
pub struct MappingSetBuilder {
	namespaces: Rc<[String]>,
	issues: MappingIssues,
	packages: Vec<PackageMappingBuilder>,
	classes: Vec<ClassMappingBuilder>,
	last_class: Option<(usize, Ns<ClassName>)>,
}

impl MappingSetBuilder {
	/// Creates a builder for a set with the given namespaces, see [`MappingSet::new`].
	pub fn new<I, S>(namespaces: I) -> Result<MappingSetBuilder>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Ok(MappingSetBuilder {
			namespaces: namespace_names(namespaces)?.into(),
			issues: MappingIssues::new(),
			packages: Vec::new(),
			classes: Vec::new(),
			last_class: None,
		})
	}

	pub fn namespaces(&self) -> &[String] {
		&self.namespaces
	}

	/// The index of the namespace with the given name.
	pub fn ns(&self, namespace: &str) -> Option<usize> {
		self.namespaces.iter().position(|x| x == namespace)
	}

	pub fn issues(&self) -> &MappingIssues {
		&self.issues
	}

	pub fn packages(&self) -> &[PackageMappingBuilder] {
		&self.packages
	}

	pub fn classes(&self) -> &[ClassMappingBuilder] {
		&self.classes
	}

	/// Adds a new package declaration.
	pub fn package(&mut self, line: Option<LinePriority>, col: u32) -> &mut PackageMappingBuilder {
		let index = self.packages.len();
		self.packages.push(PackageMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col)));
		&mut self.packages[index]
	}

	/// Adds a new class declaration.
	pub fn class(&mut self, line: Option<LinePriority>, col: u32) -> &mut ClassMappingBuilder {
		let index = self.classes.len();
		self.classes.push(ClassMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col)));
		&mut self.classes[index]
	}

	/// Finds the first class declaration with the given name, creating one if there is none.
	///
	/// A created declaration gets the name and the given position.
	pub fn class_ref(&mut self, reference: Ns<ClassName>, line: Option<LinePriority>, col: u32) -> Result<&mut ClassMappingBuilder> {
		if reference.ns >= self.namespaces.len() {
			bail!("namespace index {} of class {:?} is out of bounds for namespaces {:?}", reference.ns, reference.value, self.namespaces);
		}

		let matches = |class: &ClassMappingBuilder| class.name(reference.ns) == Some(reference.value.as_str());

		if let Some((last, key)) = &self.last_class {
			let last = *last;
			if *key == reference && self.classes.get(last).is_some_and(matches) {
				return Ok(&mut self.classes[last]);
			}
		}

		let index = match self.classes.iter().position(matches) {
			Some(index) => index,
			None => {
				let mut class = ClassMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col));
				class.declare(reference.ns, reference.value.clone(), true)?;
				self.classes.push(class);
				self.classes.len() - 1
			},
		};

		self.last_class = Some((index, reference));
		Ok(&mut self.classes[index])
	}

	/// Builds the set, returning it together with all problems found while reading and building.
	///
	/// Packages are added before classes, each in the order they were declared in.
	pub fn build(self) -> Result<(MappingSet, MappingIssues)> {
		let MappingSetBuilder { namespaces, mut issues, packages, classes, .. } = self;

		debug!("building mapping set with namespaces {namespaces:?} from {} packages and {} classes", packages.len(), classes.len());

		let mut set = MappingSet::new(namespaces.iter().cloned())?;

		for package in packages {
			package.build(&mut set, &mut issues)?;
		}
		for class in classes {
			class.build(&mut set, None, &mut issues)?;
		}

		debug!("built mapping set {:?} with {} errors and {} warnings", set.id(), issues.errors().len(), issues.warnings().len());

		Ok((set, issues))
	}
}

impl MappingIssuesRegistry for MappingSetBuilder {
	fn error(&mut self, message: String, coords: Option<FileCoords>) {
		self.issues.error(message, coords);
	}

	fn warning(&mut self, message: String, coords: Option<FileCoords>) {
		self.issues.warning(message, coords);
	}
}

#[derive(Debug, Clone)]
pub struct PackageMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	pub coords: FileCoords,
}

impl PackageMappingBuilder {
	fn new(namespaces: Rc<[String]>, coords: FileCoords) -> PackageMappingBuilder {
		PackageMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			coords,
		}
	}

	fn build(self, set: &mut MappingSet, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		let names = finish_names(self.names, "Package", self.coords, true, issues);
		set.add_package_mapping(names, self.coords.into())?;
		Ok(())
	}
}

impl NamingBuilder for PackageMappingBuilder {
	fn namespaces(&self) -> &[String] {
		&self.namespaces
	}

	fn names(&self) -> &Names {
		&self.names
	}

	fn names_mut(&mut self) -> &mut Names {
		&mut self.names
	}
}
