use anyhow::{bail, Result};
use jtypes::descriptor::{MethodDescriptor, TypeDef};
use jtypes::refs::{LocalFieldRef, LocalMethodRef};
use crate::element::{ClassId, Handle, MappingElement, MemberMetadata, MethodId, MethodMappingElement};
use crate::location::MappingLocation;
use crate::names::Names;
use crate::namespace::MappingNamespace;

#[derive(Debug, Clone, PartialEq)]
pub struct ClassMappingElement {
	id: ClassId,
	names: Names,
	location: MappingLocation,
	/// For inner classes, the class this class is nested in.
	parent: Option<ClassId>,
	fields: Vec<FieldMappingElement>,
	methods: Vec<MethodMappingElement>,
}

impl ClassMappingElement {
	pub(crate) fn new(id: ClassId, names: Names, location: MappingLocation, parent: Option<ClassId>) -> ClassMappingElement {
		ClassMappingElement {
			id,
			names,
			location,
			parent,
			fields: Vec::new(),
			methods: Vec::new(),
		}
	}

	pub fn id(&self) -> ClassId {
		self.id
	}

	pub fn parent_id(&self) -> Option<ClassId> {
		self.parent
	}

	pub fn field_list(&self) -> &[FieldMappingElement] {
		&self.fields
	}

	pub fn method_list(&self) -> &[MethodMappingElement] {
		&self.methods
	}

	pub fn method_mut(&mut self, id: MethodId) -> Option<&mut MethodMappingElement> {
		if id.class != self.id {
			return None;
		}
		self.methods.get_mut(id.index)
	}

	fn check_names(&self, names: &Names) -> Result<()> {
		if names.len() != self.names.len() {
			bail!("member of class {:?} has {} names, expected one for each of the {} namespaces", self.names, names.len(), self.names.len());
		}
		Ok(())
	}

	/// Adds a field to this class.
	///
	/// The type, if known, is given in the type namespace.
	pub fn add_field_mapping(
		&mut self,
		names: Names,
		location: MappingLocation,
		type_def: Option<TypeDef>,
		metadata: MemberMetadata,
	) -> Result<&FieldMappingElement> {
		self.check_names(&names)?;

		let index = self.fields.len();
		self.fields.push(FieldMappingElement {
			names,
			location,
			containing_class: self.id,
			type_def,
			metadata,
		});
		Ok(&self.fields[index])
	}

	/// Adds a method to this class, returning it so that parameters and local variables can be added.
	///
	/// The descriptor is given in the type namespace.
	pub fn add_method_mapping(
		&mut self,
		names: Names,
		location: MappingLocation,
		descriptor: MethodDescriptor,
		metadata: MemberMetadata,
	) -> Result<&mut MethodMappingElement> {
		self.check_names(&names)?;

		let id = MethodId { class: self.id, index: self.methods.len() };
		self.methods.push(MethodMappingElement::new(id, names, location, descriptor, metadata));
		Ok(&mut self.methods[id.index])
	}
}

impl MappingElement for ClassMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldMappingElement {
	names: Names,
	location: MappingLocation,
	containing_class: ClassId,
	/// In the type namespace.
	type_def: Option<TypeDef>,
	metadata: MemberMetadata,
}

impl FieldMappingElement {
	pub fn containing_class_id(&self) -> ClassId {
		self.containing_class
	}

	pub fn type_def(&self) -> Option<&TypeDef> {
		self.type_def.as_ref()
	}

	pub fn metadata(&self) -> MemberMetadata {
		self.metadata
	}
}

impl MappingElement for FieldMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

impl<'s> Handle<'s, ClassMappingElement> {
	pub fn parent(&self) -> Option<Handle<'s, ClassMappingElement>> {
		self.set().class_by_id(self.parent_id()?)
	}

	/// The name of this class with the names of all enclosing classes prepended, joined by `.`.
	///
	/// Is `None` if this class or any enclosing class has no name in the namespace.
	pub fn fully_qualified_name(&self, namespace: &MappingNamespace) -> Result<Option<String>> {
		let index = self.set().namespace_index(namespace)?;
		Ok(self.set().fully_qualified_name_at(self.element(), index))
	}

	pub fn fields(&self) -> impl Iterator<Item = Handle<'s, FieldMappingElement>> + 's {
		let handle = *self;
		self.element().fields.iter().map(move |field| handle.child(field))
	}

	pub fn methods(&self) -> impl Iterator<Item = Handle<'s, MethodMappingElement>> + 's {
		let handle = *self;
		self.element().methods.iter().map(move |method| handle.child(method))
	}

	/// Finds the fields matching the reference in any namespace.
	///
	/// A field matches if in some namespace both its name and its type are the ones of the reference, with the
	/// type of the reference spelled in that namespace. A reference without a type matches by name alone.
	pub fn find_fields(&self, reference: &LocalFieldRef) -> Vec<Handle<'s, FieldMappingElement>> {
		let name = reference.name.as_str();
		match &reference.type_def {
			None => self.fields()
				.filter(|field| field.names.contains(name))
				.collect(),
			Some(type_def) => {
				let types = self.set().types_by_namespace(type_def);
				self.fields()
					.filter(|field| types.iter().enumerate().any(|(index, type_def)| {
						field.name_at(index) == Some(name) && field.type_def.as_ref() == Some(type_def)
					}))
					.collect()
			},
		}
	}

	/// Finds the fields matching the reference, which is spelled in the given namespace.
	pub fn find_fields_in(&self, namespace: &MappingNamespace, reference: &LocalFieldRef) -> Result<Vec<Handle<'s, FieldMappingElement>>> {
		let index = self.set().namespace_index(namespace)?;
		let name = reference.name.as_str();
		let type_def = reference.type_def.as_ref()
			.map(|type_def| self.set().remap_to_types(type_def, index));

		Ok(self.fields()
			.filter(|field| field.name_at(index) == Some(name))
			.filter(|field| type_def.is_none() || field.type_def == type_def)
			.collect())
	}

	/// The first field found by [`find_fields_in`][Self::find_fields_in], trying the namespaces in order.
	pub fn find_field(&self, reference: &LocalFieldRef) -> Result<Option<Handle<'s, FieldMappingElement>>> {
		for namespace in self.set().namespaces() {
			if let Some(field) = self.find_fields_in(namespace, reference)?.into_iter().next() {
				return Ok(Some(field));
			}
		}
		Ok(None)
	}

	pub fn find_field_in(&self, namespace: &MappingNamespace, reference: &LocalFieldRef) -> Result<Option<Handle<'s, FieldMappingElement>>> {
		Ok(self.find_fields_in(namespace, reference)?.into_iter().next())
	}

	/// Finds the methods matching the reference in any namespace, like [`find_fields`][Self::find_fields].
	pub fn find_methods(&self, reference: &LocalMethodRef) -> Vec<Handle<'s, MethodMappingElement>> {
		let name = reference.name.as_str();
		match &reference.desc {
			None => self.methods()
				.filter(|method| method.names().contains(name))
				.collect(),
			Some(desc) => {
				let descs = self.set().types_by_namespace(desc);
				self.methods()
					.filter(|method| descs.iter().enumerate().any(|(index, desc)| {
						method.name_at(index) == Some(name) && method.descriptor() == desc
					}))
					.collect()
			},
		}
	}

	/// Finds the methods matching the reference, which is spelled in the given namespace.
	pub fn find_methods_in(&self, namespace: &MappingNamespace, reference: &LocalMethodRef) -> Result<Vec<Handle<'s, MethodMappingElement>>> {
		let index = self.set().namespace_index(namespace)?;
		let name = reference.name.as_str();
		let desc = reference.desc.as_ref()
			.map(|desc| self.set().remap_to_types(desc, index));

		Ok(self.methods()
			.filter(|method| method.name_at(index) == Some(name))
			.filter(|method| desc.as_ref().map_or(true, |desc| method.descriptor() == desc))
			.collect())
	}

	pub fn find_method(&self, reference: &LocalMethodRef) -> Result<Option<Handle<'s, MethodMappingElement>>> {
		for namespace in self.set().namespaces() {
			if let Some(method) = self.find_methods_in(namespace, reference)?.into_iter().next() {
				return Ok(Some(method));
			}
		}
		Ok(None)
	}

	pub fn find_method_in(&self, namespace: &MappingNamespace, reference: &LocalMethodRef) -> Result<Option<Handle<'s, MethodMappingElement>>> {
		Ok(self.find_methods_in(namespace, reference)?.into_iter().next())
	}
}

impl<'s> Handle<'s, FieldMappingElement> {
	pub fn containing_class(&self) -> Option<Handle<'s, ClassMappingElement>> {
		self.set().class_by_id(self.containing_class)
	}

	/// The type of this field, spelled in the given namespace.
	pub fn type_in(&self, namespace: &MappingNamespace) -> Result<Option<TypeDef>> {
		self.type_def.as_ref()
			.map(|type_def| self.set().map_type_to(namespace, type_def))
			.transpose()
	}
}
