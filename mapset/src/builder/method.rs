use std::rc::Rc;
use anyhow::Result;
use indexmap::IndexMap;
use jtypes::descriptor::{MethodDescriptor, TypeDef};
use jtypes::refs::{LocalVarIndex, LvtIndex, ParamIndex};
use crate::builder::{finish_names, NamingBuilder};
use crate::element::{ClassId, MemberMetadata, MethodMappingElement};
use crate::issues::MappingIssuesRegistry;
use crate::location::{FileCoords, LinePriority};
use crate::names::Names;
use crate::set::MappingSet;

/// Builds a method with its parameters and local variables.
///
/// A method without a descriptor is reported as an error when built, and left out of the set together with its
/// parameters and local variables.
#[derive(Debug, Clone)]
pub struct MethodMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	pub coords: FileCoords,
	/// In the first namespace.
	pub desc: Option<MethodDescriptor>,
	pub metadata: MemberMetadata,
	params: IndexMap<ParamIndex, ParamMappingBuilder>,
	local_vars: Vec<LocalVarMappingBuilder>,
}

impl MethodMappingBuilder {
	pub(crate) fn new(namespaces: Rc<[String]>, coords: FileCoords) -> MethodMappingBuilder {
		MethodMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			coords,
			desc: None,
			metadata: MemberMetadata::UNKNOWN,
			params: IndexMap::new(),
			local_vars: Vec::new(),
		}
	}

	pub fn params(&self) -> impl Iterator<Item = &ParamMappingBuilder> {
		self.params.values()
	}

	pub fn local_vars(&self) -> &[LocalVarMappingBuilder] {
		&self.local_vars
	}

	/// The declaration of the parameter with the given index, created at the given position if there is none yet.
	///
	/// An existing declaration keeps its position and priority, whatever is passed here. Priorities only decide
	/// between parameters of separately built declarations, see
	/// [`MethodMappingElement::add_param_mapping`][crate::element::MethodMappingElement::add_param_mapping].
	pub fn param(&mut self, index: ParamIndex, line: Option<LinePriority>, col: u32) -> &mut ParamMappingBuilder {
		let namespaces = &self.namespaces;
		self.params.entry(index)
			.or_insert_with(|| ParamMappingBuilder::new(namespaces.clone(), index, FileCoords::at(line, col)))
	}

	/// The declaration of the local variable with exactly the given indices, created at the given position if there
	/// is none yet.
	///
	/// Like for [`param`][MethodMappingBuilder::param], an existing declaration keeps its position and priority.
	pub fn local_var(&mut self, local_var_index: LocalVarIndex, lvt_index: LvtIndex, line: Option<LinePriority>, col: u32) -> &mut LocalVarMappingBuilder {
		let index = match self.local_vars.iter().position(|x| x.local_var_index == local_var_index && x.lvt_index == lvt_index) {
			Some(index) => index,
			None => {
				let coords = FileCoords::at(line, col);
				self.local_vars.push(LocalVarMappingBuilder::new(self.namespaces.clone(), local_var_index, lvt_index, coords));
				self.local_vars.len() - 1
			},
		};
		&mut self.local_vars[index]
	}

	pub(crate) fn build(self, set: &mut MappingSet, class: ClassId, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		let names = finish_names(self.names, "Method", self.coords, true, issues);

		let Some(desc) = self.desc else {
			issues.error("Method mappings must have a descriptor".to_owned(), Some(self.coords));
			return Ok(());
		};

		let method = set.class_mut(class)?
			.add_method_mapping(names, self.coords.into(), desc, self.metadata)?;

		for param in self.params.into_values() {
			param.build(method, issues)?;
		}
		for local_var in self.local_vars {
			local_var.build(method, issues)?;
		}
		Ok(())
	}
}

impl NamingBuilder for MethodMappingBuilder {
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

#[derive(Debug, Clone)]
pub struct ParamMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	index: ParamIndex,
	pub coords: FileCoords,
	pub lvt_index: LvtIndex,
	/// In the first namespace.
	pub type_def: Option<TypeDef>,
}

impl ParamMappingBuilder {
	fn new(namespaces: Rc<[String]>, index: ParamIndex, coords: FileCoords) -> ParamMappingBuilder {
		ParamMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			index,
			coords,
			lvt_index: LvtIndex::UNKNOWN,
			type_def: None,
		}
	}

	pub fn index(&self) -> ParamIndex {
		self.index
	}

	fn build(self, method: &mut MethodMappingElement, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		let names = finish_names(self.names, "Method parameter", self.coords, false, issues);
		method.add_param_mapping(names, self.coords.into(), self.index, self.lvt_index, self.type_def)?;
		Ok(())
	}
}

impl NamingBuilder for ParamMappingBuilder {
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

#[derive(Debug, Clone)]
pub struct LocalVarMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	local_var_index: LocalVarIndex,
	lvt_index: LvtIndex,
	pub coords: FileCoords,
	/// In the first namespace.
	pub type_def: Option<TypeDef>,
}

impl LocalVarMappingBuilder {
	fn new(namespaces: Rc<[String]>, local_var_index: LocalVarIndex, lvt_index: LvtIndex, coords: FileCoords) -> LocalVarMappingBuilder {
		LocalVarMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			local_var_index,
			lvt_index,
			coords,
			type_def: None,
		}
	}

	pub fn local_var_index(&self) -> LocalVarIndex {
		self.local_var_index
	}

	pub fn lvt_index(&self) -> LvtIndex {
		self.lvt_index
	}

	fn build(self, method: &mut MethodMappingElement, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		if !self.local_var_index.is_known() && !self.lvt_index.is_known() {
			issues.error("Method local var mapping found without any known indices".to_owned(), Some(self.coords));
			return Ok(());
		}

		let names = finish_names(self.names, "Method local var", self.coords, false, issues);
		method.add_local_var_mapping(names, self.coords.into(), self.local_var_index, self.lvt_index, self.type_def)?;
		Ok(())
	}
}

impl NamingBuilder for LocalVarMappingBuilder {
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
