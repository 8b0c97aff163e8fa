use anyhow::{bail, Result};
use indexmap::IndexMap;
use indexmap::map::Entry;
use log::trace;
use jtypes::descriptor::{MethodDescriptor, TypeDef};
use jtypes::refs::{LocalVarIndex, LvtIndex, ParamIndex};
use crate::element::{ClassMappingElement, Handle, MappingElement, MemberMetadata, MethodId};
use crate::location::MappingLocation;
use crate::names::Names;
use crate::namespace::MappingNamespace;

#[derive(Debug, Clone, PartialEq)]
pub struct MethodMappingElement {
	id: MethodId,
	names: Names,
	location: MappingLocation,
	/// In the type namespace.
	descriptor: MethodDescriptor,
	metadata: MemberMetadata,
	params: IndexMap<ParamIndex, MethodParameterMappingElement>,
	local_vars: Vec<LocalVariableMappingElement>,
}

impl MethodMappingElement {
	pub(crate) fn new(id: MethodId, names: Names, location: MappingLocation, descriptor: MethodDescriptor, metadata: MemberMetadata) -> MethodMappingElement {
		MethodMappingElement {
			id,
			names,
			location,
			descriptor,
			metadata,
			params: IndexMap::new(),
			local_vars: Vec::new(),
		}
	}

	pub fn id(&self) -> MethodId {
		self.id
	}

	pub fn descriptor(&self) -> &MethodDescriptor {
		&self.descriptor
	}

	pub fn metadata(&self) -> MemberMetadata {
		self.metadata
	}

	pub fn param_list(&self) -> impl Iterator<Item = &MethodParameterMappingElement> {
		self.params.values()
	}

	pub fn local_var_list(&self) -> &[LocalVariableMappingElement] {
		&self.local_vars
	}

	fn check_names(&self, names: &Names) -> Result<()> {
		if names.len() != self.names.len() {
			bail!("child of method {:?} has {} names, expected one for each of the {} namespaces", self.names, names.len(), self.names.len());
		}
		Ok(())
	}

	/// Adds a parameter to this method.
	///
	/// If there already is a parameter with that index, the one with the higher priority is kept. On equal
	/// priority the existing one stays.
	pub fn add_param_mapping(
		&mut self,
		names: Names,
		location: MappingLocation,
		index: ParamIndex,
		lvt_index: LvtIndex,
		type_def: Option<TypeDef>,
	) -> Result<&MethodParameterMappingElement> {
		self.check_names(&names)?;

		let param = MethodParameterMappingElement {
			names,
			location,
			method: self.id,
			index,
			lvt_index,
			type_def,
		};

		Ok(match self.params.entry(index) {
			Entry::Occupied(entry) if location.yields_to(&entry.get().location) => {
				trace!("keeping parameter {index:?} with priority {}, dropping one with priority {}", entry.get().location.priority(), location.priority());
				entry.into_mut()
			},
			Entry::Occupied(mut entry) => {
				entry.insert(param);
				entry.into_mut()
			},
			Entry::Vacant(entry) => entry.insert(param),
		})
	}

	/// Adds a local variable to this method.
	///
	/// Fails if neither the local variable index nor the local variable table index is known. If there already
	/// is a local variable matching the given indices, it's replaced in place, unless it has the same or a
	/// higher priority.
	pub fn add_local_var_mapping(
		&mut self,
		names: Names,
		location: MappingLocation,
		local_var_index: LocalVarIndex,
		lvt_index: LvtIndex,
		type_def: Option<TypeDef>,
	) -> Result<&LocalVariableMappingElement> {
		self.check_names(&names)?;

		if !local_var_index.is_known() && !lvt_index.is_known() {
			bail!("local variable {names:?} needs a known local variable index or local variable table index");
		}

		let local_var = LocalVariableMappingElement {
			names,
			location,
			method: self.id,
			local_var_index,
			lvt_index,
			type_def,
		};

		let position = self.local_vars.iter()
			.position(|existing| existing.is_matched_by(&local_var_index, lvt_index));

		let index = match position {
			Some(position) if location.yields_to(&self.local_vars[position].location) => {
				trace!("keeping local variable {local_var_index:?} {lvt_index:?}, dropping one with priority {}", location.priority());
				position
			},
			Some(position) => {
				self.local_vars[position] = local_var;
				position
			},
			None => {
				self.local_vars.push(local_var);
				self.local_vars.len() - 1
			},
		};
		Ok(&self.local_vars[index])
	}
}

impl MappingElement for MethodMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodParameterMappingElement {
	names: Names,
	location: MappingLocation,
	method: MethodId,
	index: ParamIndex,
	lvt_index: LvtIndex,
	type_def: Option<TypeDef>,
}

impl MethodParameterMappingElement {
	pub fn method_id(&self) -> MethodId {
		self.method
	}

	pub fn index(&self) -> ParamIndex {
		self.index
	}

	pub fn lvt_index(&self) -> LvtIndex {
		self.lvt_index
	}

	pub fn type_def(&self) -> Option<&TypeDef> {
		self.type_def.as_ref()
	}
}

impl MappingElement for MethodParameterMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocalVariableMappingElement {
	names: Names,
	location: MappingLocation,
	method: MethodId,
	local_var_index: LocalVarIndex,
	lvt_index: LvtIndex,
	type_def: Option<TypeDef>,
}

impl LocalVariableMappingElement {
	pub fn method_id(&self) -> MethodId {
		self.method
	}

	pub fn local_var_index(&self) -> LocalVarIndex {
		self.local_var_index
	}

	pub fn lvt_index(&self) -> LvtIndex {
		self.lvt_index
	}

	pub fn type_def(&self) -> Option<&TypeDef> {
		self.type_def.as_ref()
	}

	/// Checks if this local variable agrees with every known part of the given indices.
	pub fn is_matched_by(&self, local_var_index: &LocalVarIndex, lvt_index: LvtIndex) -> bool {
		(!lvt_index.is_known() || self.lvt_index == lvt_index) && local_var_index.matches(&self.local_var_index)
	}
}

impl MappingElement for LocalVariableMappingElement {
	fn names(&self) -> &Names {
		&self.names
	}

	fn location(&self) -> &MappingLocation {
		&self.location
	}
}

impl<'s> Handle<'s, MethodMappingElement> {
	pub fn containing_class(&self) -> Option<Handle<'s, ClassMappingElement>> {
		self.set().class_by_id(self.id.class)
	}

	/// The descriptor of this method, spelled in the given namespace.
	pub fn descriptor_in(&self, namespace: &MappingNamespace) -> Result<MethodDescriptor> {
		self.set().map_type_to(namespace, &self.element().descriptor)
	}

	pub fn params(&self) -> impl Iterator<Item = Handle<'s, MethodParameterMappingElement>> + 's {
		let handle = *self;
		self.element().params.values().map(move |param| handle.child(param))
	}

	pub fn param(&self, index: ParamIndex) -> Option<Handle<'s, MethodParameterMappingElement>> {
		self.element().params.get(&index).map(|param| self.child(param))
	}

	pub fn local_vars(&self) -> impl Iterator<Item = Handle<'s, LocalVariableMappingElement>> + 's {
		let handle = *self;
		self.element().local_vars.iter().map(move |local_var| handle.child(local_var))
	}

	/// Finds the local variables agreeing with every known part of the given indices.
	pub fn find_local_vars(&self, local_var_index: LocalVarIndex, lvt_index: LvtIndex) -> Vec<Handle<'s, LocalVariableMappingElement>> {
		self.local_vars()
			.filter(|local_var| local_var.is_matched_by(&local_var_index, lvt_index))
			.collect()
	}

	pub fn find_local_var(&self, local_var_index: LocalVarIndex, lvt_index: LvtIndex) -> Option<Handle<'s, LocalVariableMappingElement>> {
		self.local_vars()
			.find(|local_var| local_var.is_matched_by(&local_var_index, lvt_index))
	}
}

impl<'s> Handle<'s, MethodParameterMappingElement> {
	pub fn method(&self) -> Option<Handle<'s, MethodMappingElement>> {
		self.set().method_by_id(self.method)
	}
}

impl<'s> Handle<'s, LocalVariableMappingElement> {
	pub fn method(&self) -> Option<Handle<'s, MethodMappingElement>> {
		self.set().method_by_id(self.method)
	}
}
