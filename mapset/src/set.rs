use anyhow::{anyhow, bail, Context, Result};
use jtypes::descriptor::{MethodDescriptor, ReturnTypeDef, TypeDef};
use jtypes::names::{ClassName, PackName};
use jtypes::refs::{FieldRef, MethodRef};
use crate::element::{ClassId, ClassMappingElement, FieldMappingElement, Handle, MappingElement, MethodId, MethodMappingElement, PackageMappingElement};
use crate::location::MappingLocation;
use crate::lookup::LookupTable;
use crate::names::Names;
use crate::namespace::{namespace_names, MappingNamespace, SetId, UNNAMED_FROM, UNNAMED_TO};

/// The index of the namespace types of members are stored in.
const TYPE_NAMESPACE: usize = 0;

/// Something that contains class names, which can be translated between the namespaces of a set.
pub trait Remap: Clone {
	/// Returns if the spelling of this can differ between namespaces.
	fn is_mappable(&self) -> bool;

	/// Translates each class name from the namespace with index `from` to the one with index `to`.
	fn remap(&self, set: &MappingSet, from: usize, to: usize) -> Self;
}

impl Remap for TypeDef {
	fn is_mappable(&self) -> bool {
		TypeDef::is_mappable(self)
	}

	fn remap(&self, set: &MappingSet, from: usize, to: usize) -> TypeDef {
		match self {
			TypeDef::Primitive(_) => self.clone(),
			TypeDef::Class(name) => TypeDef::Class(set.remap_class_name(name, from, to)),
			TypeDef::Array { component, dimension } => TypeDef::array(component.remap(set, from, to), *dimension),
		}
	}
}

impl Remap for ReturnTypeDef {
	fn is_mappable(&self) -> bool {
		ReturnTypeDef::is_mappable(self)
	}

	fn remap(&self, set: &MappingSet, from: usize, to: usize) -> ReturnTypeDef {
		match self {
			ReturnTypeDef::Void => ReturnTypeDef::Void,
			ReturnTypeDef::Type(type_def) => ReturnTypeDef::Type(type_def.remap(set, from, to)),
		}
	}
}

impl Remap for MethodDescriptor {
	fn is_mappable(&self) -> bool {
		MethodDescriptor::is_mappable(self)
	}

	fn remap(&self, set: &MappingSet, from: usize, to: usize) -> MethodDescriptor {
		MethodDescriptor::new(
			self.params.iter().map(|param| param.remap(set, from, to)).collect(),
			self.return_type.remap(set, from, to),
		)
	}
}

/// A set of mappings between two or more namespaces.
///
/// The set owns all packages and classes; classes own their fields and methods, and methods own their parameters
/// and local variables. Every element has one name slot per namespace.
///
/// Types of fields and descriptors of methods are stored in the first namespace, the type namespace.
#[derive(Debug, Clone)]
pub struct MappingSet {
	id: SetId,
	namespaces: Vec<MappingNamespace>,
	packages: LookupTable<PackageMappingElement>,
	classes: LookupTable<ClassMappingElement>,
}

impl MappingSet {
	/// Creates an empty set with the given namespaces.
	///
	/// No namespaces at all results in the two namespaces [`UNNAMED_FROM`] and [`UNNAMED_TO`]. Fails for just one
	/// namespace, and for empty or duplicate names.
	pub fn new<I, S>(namespaces: I) -> Result<MappingSet>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let id = SetId::next();
		let namespaces: Vec<_> = namespace_names(namespaces)?
			.into_iter()
			.enumerate()
			.map(|(index, name)| MappingNamespace::new(name, index, id))
			.collect();

		Ok(MappingSet {
			id,
			packages: LookupTable::new(namespaces.len()),
			classes: LookupTable::new(namespaces.len()),
			namespaces,
		})
	}

	pub fn id(&self) -> SetId {
		self.id
	}

	pub fn namespaces(&self) -> &[MappingNamespace] {
		&self.namespaces
	}

	/// The namespace types and descriptors of members are stored in.
	pub fn type_namespace(&self) -> &MappingNamespace {
		&self.namespaces[TYPE_NAMESPACE]
	}

	pub fn namespace_of_opt(&self, name: &str) -> Option<&MappingNamespace> {
		self.namespaces.iter().find(|namespace| namespace.name() == name)
	}

	pub fn namespace_of(&self, name: &str) -> Result<&MappingNamespace> {
		self.namespace_of_opt(name)
			.with_context(|| anyhow!("no namespace {name:?} in mapping set with namespaces {:?}", self.namespace_names()))
	}

	pub fn unnamed_from(&self) -> Result<&MappingNamespace> {
		self.namespace_of(UNNAMED_FROM)
	}

	pub fn unnamed_to(&self) -> Result<&MappingNamespace> {
		self.namespace_of(UNNAMED_TO)
	}

	fn namespace_names(&self) -> Vec<&str> {
		self.namespaces.iter().map(MappingNamespace::name).collect()
	}

	/// Resolves a namespace to its index in this set.
	///
	/// A namespace of another set is resolved by its name.
	pub fn namespace_index(&self, namespace: &MappingNamespace) -> Result<usize> {
		if namespace.set_id() == self.id {
			if namespace.index() >= self.namespaces.len() {
				bail!("namespace {namespace:?} is out of bounds for mapping set with namespaces {:?}", self.namespace_names());
			}
			return Ok(namespace.index());
		}
		self.namespace_of(namespace.name())
			.map(MappingNamespace::index)
			.with_context(|| anyhow!("namespace {:?} belongs to another mapping set", namespace.name()))
	}

	pub fn namespace_index_by_name(&self, name: &str) -> Result<usize> {
		self.namespace_of(name).map(MappingNamespace::index)
	}

	/// Translates the class names in a type from one namespace to another.
	///
	/// Class names without a mapping, or without a name in `to`, stay as they are.
	pub fn map_type<T: Remap>(&self, from: &MappingNamespace, to: &MappingNamespace, value: &T) -> Result<T> {
		if !value.is_mappable() {
			return Ok(value.clone());
		}
		let from = self.namespace_index(from)?;
		let to = self.namespace_index(to)?;
		Ok(self.remap_at(value, from, to))
	}

	/// Translates a type from the type namespace to the given one.
	pub fn map_type_to<T: Remap>(&self, to: &MappingNamespace, value: &T) -> Result<T> {
		self.map_type(self.type_namespace(), to, value)
	}

	/// Translates a type from the given namespace to the type namespace.
	pub fn map_type_from<T: Remap>(&self, from: &MappingNamespace, value: &T) -> Result<T> {
		self.map_type(from, self.type_namespace(), value)
	}

	pub(crate) fn remap_at<T: Remap>(&self, value: &T, from: usize, to: usize) -> T {
		if from == to || !value.is_mappable() {
			value.clone()
		} else {
			value.remap(self, from, to)
		}
	}

	pub(crate) fn remap_to_types<T: Remap>(&self, value: &T, from: usize) -> T {
		self.remap_at(value, from, TYPE_NAMESPACE)
	}

	/// For each namespace, the value read as spelled in it and translated to the type namespace.
	pub(crate) fn types_by_namespace<T: Remap>(&self, value: &T) -> Vec<T> {
		(0..self.namespaces.len())
			.map(|from| self.remap_to_types(value, from))
			.collect()
	}

	fn remap_class_name(&self, name: &ClassName, from: usize, to: usize) -> ClassName {
		self.classes.query_in(from, name.as_str())
			.next()
			.and_then(|class| self.fully_qualified_name_at(class, to))
			.map(|name| ClassName::normalized(&name))
			.unwrap_or_else(|| name.clone())
	}

	pub(crate) fn fully_qualified_name_at(&self, class: &ClassMappingElement, index: usize) -> Option<String> {
		let name = ClassName::from(class.name_at(index)?).dotted();
		match class.parent_id() {
			None => Some(name),
			Some(parent) => {
				let parent = self.classes.get(self.class_index(parent)?)?;
				Some(format!("{}.{name}", self.fully_qualified_name_at(parent, index)?))
			},
		}
	}

	/// The index of a class of this set, `None` for ids handed out by another set.
	fn class_index(&self, id: ClassId) -> Option<usize> {
		(id.set == self.id).then_some(id.index)
	}

	pub(crate) fn class_by_id(&self, id: ClassId) -> Option<Handle<'_, ClassMappingElement>> {
		self.classes.get(self.class_index(id)?).map(|class| Handle::new(self, class))
	}

	pub(crate) fn method_by_id(&self, id: MethodId) -> Option<Handle<'_, MethodMappingElement>> {
		let class = self.classes.get(self.class_index(id.class)?)?;
		class.method_list().get(id.index).map(|method| Handle::new(self, method))
	}

	fn check_names(&self, names: &Names) -> Result<()> {
		if names.len() != self.namespaces.len() {
			bail!("got {} names, expected one for each namespace of {:?}", names.len(), self.namespace_names());
		}
		Ok(())
	}

	pub fn add_package_mapping(&mut self, names: Names, location: MappingLocation) -> Result<Handle<'_, PackageMappingElement>> {
		self.check_names(&names)?;

		let index = self.packages.add(PackageMappingElement::new(names, location));
		let set: &MappingSet = self;
		set.packages.get(index)
			.map(|package| Handle::new(set, package))
			.context("added package vanished")
	}

	/// Adds a class, possibly as an inner class of the given parent, and returns its id.
	pub fn add_class_mapping(&mut self, names: Names, location: MappingLocation, parent: Option<ClassId>) -> Result<ClassId> {
		self.check_names(&names)?;
		if let Some(parent) = parent {
			if self.class_index(parent).and_then(|index| self.classes.get(index)).is_none() {
				bail!("parent {parent:?} of class {names:?} is not part of this mapping set");
			}
		}

		let id = ClassId { set: self.id, index: self.classes.len() };
		self.classes.add(ClassMappingElement::new(id, names, location, parent));
		Ok(id)
	}

	/// Gives mutable access to a class, for adding members to it.
	pub fn class_mut(&mut self, id: ClassId) -> Result<&mut ClassMappingElement> {
		let index = self.class_index(id);
		index.and_then(|index| self.classes.get_mut(index))
			.with_context(|| anyhow!("class {id:?} is not part of this mapping set"))
	}

	pub fn packages(&self) -> impl Iterator<Item = Handle<'_, PackageMappingElement>> {
		self.packages.list().iter().map(move |package| Handle::new(self, package))
	}

	/// All packages with the given name in any namespace.
	pub fn packages_named(&self, name: &str) -> Vec<Handle<'_, PackageMappingElement>> {
		let name = PackName::normalized(name);
		self.packages.query(name.as_str())
			.map(|package| Handle::new(self, package))
			.collect()
	}

	pub fn package(&self, name: &str) -> Option<Handle<'_, PackageMappingElement>> {
		self.packages_named(name).into_iter().next()
	}

	pub fn packages_in(&self, namespace: &MappingNamespace, name: &str) -> Result<Vec<Handle<'_, PackageMappingElement>>> {
		let index = self.namespace_index(namespace)?;
		let name = PackName::normalized(name);
		Ok(self.packages.query_in(index, name.as_str())
			.map(|package| Handle::new(self, package))
			.collect())
	}

	pub fn package_in(&self, namespace: &MappingNamespace, name: &str) -> Result<Option<Handle<'_, PackageMappingElement>>> {
		Ok(self.packages_in(namespace, name)?.into_iter().next())
	}

	pub fn classes(&self) -> impl Iterator<Item = Handle<'_, ClassMappingElement>> {
		self.classes.list().iter().map(move |class| Handle::new(self, class))
	}

	/// All classes with the given name in any namespace.
	pub fn classes_named(&self, name: &str) -> Vec<Handle<'_, ClassMappingElement>> {
		let name = ClassName::normalized(name);
		self.classes.query(name.as_str())
			.map(|class| Handle::new(self, class))
			.collect()
	}

	pub fn class(&self, name: &str) -> Option<Handle<'_, ClassMappingElement>> {
		self.classes_named(name).into_iter().next()
	}

	pub fn classes_in(&self, namespace: &MappingNamespace, name: &str) -> Result<Vec<Handle<'_, ClassMappingElement>>> {
		let index = self.namespace_index(namespace)?;
		let name = ClassName::normalized(name);
		Ok(self.classes.query_in(index, name.as_str())
			.map(|class| Handle::new(self, class))
			.collect())
	}

	pub fn class_in(&self, namespace: &MappingNamespace, name: &str) -> Result<Option<Handle<'_, ClassMappingElement>>> {
		Ok(self.classes_in(namespace, name)?.into_iter().next())
	}

	/// Finds a field by a reference spelled in the given namespace.
	pub fn field_mapping_in(&self, namespace: &MappingNamespace, reference: &FieldRef) -> Result<Option<Handle<'_, FieldMappingElement>>> {
		match self.class_in(namespace, reference.containing_class.as_str())? {
			Some(class) => class.find_field_in(namespace, &reference.field),
			None => Ok(None),
		}
	}

	/// Finds a field by a reference spelled in any namespace, trying the namespaces in order.
	pub fn field_mapping(&self, reference: &FieldRef) -> Result<Option<Handle<'_, FieldMappingElement>>> {
		for namespace in &self.namespaces {
			if let Some(field) = self.field_mapping_in(namespace, reference)? {
				return Ok(Some(field));
			}
		}
		Ok(None)
	}

	pub fn method_mapping_in(&self, namespace: &MappingNamespace, reference: &MethodRef) -> Result<Option<Handle<'_, MethodMappingElement>>> {
		match self.class_in(namespace, reference.containing_class.as_str())? {
			Some(class) => class.find_method_in(namespace, &reference.method),
			None => Ok(None),
		}
	}

	pub fn method_mapping(&self, reference: &MethodRef) -> Result<Option<Handle<'_, MethodMappingElement>>> {
		for namespace in &self.namespaces {
			if let Some(method) = self.method_mapping_in(namespace, reference)? {
				return Ok(Some(method));
			}
		}
		Ok(None)
	}
}

#[cfg(test)]
mod testing {
	use pretty_assertions::assert_eq;
	use crate::location::MappingLocation;
	use crate::names::Names;
	use crate::set::MappingSet;

	#[test]
	fn foreign_namespace() -> anyhow::Result<()> {
		let a = MappingSet::new(["named", "official"])?;
		let b = MappingSet::new(["official", "named"])?;
		let c = MappingSet::new(["x", "y"])?;

		let named = a.namespace_of("named")?;
		assert_eq!(a.namespace_index(named)?, 0);
		assert_eq!(b.namespace_index(named)?, 1);
		assert!(c.namespace_index(named).is_err());

		Ok(())
	}

	#[test]
	fn inner_parent_must_exist() -> anyhow::Result<()> {
		let mut a = MappingSet::new(["a", "b"])?;
		let mut b = MappingSet::new(["a", "b"])?;
		let foreign = b.add_class_mapping(Names::from([Some("x/A"), None]), MappingLocation::Unknown, None)?;
		let foreign_inner = b.add_class_mapping(Names::from([Some("x/B"), None]), MappingLocation::Unknown, Some(foreign))?;

		assert!(a.add_class_mapping(Names::from([Some("y/A"), None]), MappingLocation::Unknown, Some(foreign_inner)).is_err());
		assert!(a.add_class_mapping(Names::from([Some("y/A")]), MappingLocation::Unknown, None).is_err());

		// the index of `foreign` is also the index of a class of `a`, but it was handed out by `b`
		let own = a.add_class_mapping(Names::from([Some("y/A"), None]), MappingLocation::Unknown, None)?;
		assert!(a.add_class_mapping(Names::from([Some("y/B"), None]), MappingLocation::Unknown, Some(foreign)).is_err());
		assert!(a.class_mut(foreign).is_err());
		assert!(a.class_by_id(foreign).is_none());
		assert!(a.class_mut(own).is_ok());
		assert!(a.add_class_mapping(Names::from([Some("y/B"), None]), MappingLocation::Unknown, Some(own)).is_ok());
		assert_eq!(a.classes().count(), 2);

		Ok(())
	}

	#[test]
	fn sets_can_be_shared() {
		fn assert_send_sync<T: Send + Sync>() {}

		assert_send_sync::<MappingSet>();
	}
}
