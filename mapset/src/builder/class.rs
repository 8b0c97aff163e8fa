use std::rc::Rc;
use anyhow::{bail, Result};
use log::trace;
use jtypes::descriptor::TypeDef;
use jtypes::refs::LocalMethodRef;
use crate::builder::{finish_names, MethodMappingBuilder, NamingBuilder, Ns};
use crate::element::{ClassId, MemberMetadata};
use crate::issues::MappingIssuesRegistry;
use crate::location::{FileCoords, LinePriority};
use crate::names::Names;
use crate::set::MappingSet;

/// Builds a class, its members and its inner classes.
#[derive(Debug, Clone)]
pub struct ClassMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	pub coords: FileCoords,
	fields: Vec<FieldMappingBuilder>,
	methods: Vec<MethodMappingBuilder>,
	inner_classes: Vec<ClassMappingBuilder>,
	last_method: Option<(usize, Ns<LocalMethodRef>)>,
}

impl ClassMappingBuilder {
	pub(crate) fn new(namespaces: Rc<[String]>, coords: FileCoords) -> ClassMappingBuilder {
		ClassMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			coords,
			fields: Vec::new(),
			methods: Vec::new(),
			inner_classes: Vec::new(),
			last_method: None,
		}
	}

	pub fn fields(&self) -> &[FieldMappingBuilder] {
		&self.fields
	}

	pub fn methods(&self) -> &[MethodMappingBuilder] {
		&self.methods
	}

	pub fn inner_classes(&self) -> &[ClassMappingBuilder] {
		&self.inner_classes
	}

	pub fn field(&mut self, line: Option<LinePriority>, col: u32) -> &mut FieldMappingBuilder {
		let index = self.fields.len();
		self.fields.push(FieldMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col)));
		&mut self.fields[index]
	}

	pub fn method(&mut self, line: Option<LinePriority>, col: u32) -> &mut MethodMappingBuilder {
		let index = self.methods.len();
		self.methods.push(MethodMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col)));
		&mut self.methods[index]
	}

	/// Finds the first method declaration with the name and descriptor of the reference, creating one if there is
	/// none.
	///
	/// A created declaration gets the name, the descriptor and the given position.
	pub fn method_ref(&mut self, reference: Ns<LocalMethodRef>, line: Option<LinePriority>, col: u32) -> Result<&mut MethodMappingBuilder> {
		if reference.ns >= self.namespaces.len() {
			bail!("namespace index {} of method {:?} is out of bounds for namespaces {:?}", reference.ns, reference.value, self.namespaces);
		}

		let matches = |method: &MethodMappingBuilder| {
			method.name(reference.ns) == Some(reference.value.name.as_str()) && method.desc == reference.value.desc
		};

		if let Some((last, key)) = &self.last_method {
			let last = *last;
			if *key == reference && self.methods.get(last).is_some_and(matches) {
				return Ok(&mut self.methods[last]);
			}
		}

		let index = match self.methods.iter().position(matches) {
			Some(index) => index,
			None => {
				trace!("new method declaration for {:?}", reference.value);
				let mut method = MethodMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col));
				method.declare(reference.ns, reference.value.name.clone(), true)?;
				method.desc = reference.value.desc.clone();
				self.methods.push(method);
				self.methods.len() - 1
			},
		};

		self.last_method = Some((index, reference));
		Ok(&mut self.methods[index])
	}

	/// Adds a class nested in this one.
	pub fn inner_class(&mut self, line: Option<LinePriority>, col: u32) -> &mut ClassMappingBuilder {
		let index = self.inner_classes.len();
		self.inner_classes.push(ClassMappingBuilder::new(self.namespaces.clone(), FileCoords::at(line, col)));
		&mut self.inner_classes[index]
	}

	pub(crate) fn build(self, set: &mut MappingSet, parent: Option<ClassId>, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		let names = finish_names(self.names, "Class", self.coords, true, issues);
		let id = set.add_class_mapping(names, self.coords.into(), parent)?;

		for field in self.fields {
			field.build(set, id, issues)?;
		}
		for method in self.methods {
			method.build(set, id, issues)?;
		}
		for inner_class in self.inner_classes {
			inner_class.build(set, Some(id), issues)?;
		}
		Ok(())
	}
}

impl NamingBuilder for ClassMappingBuilder {
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
pub struct FieldMappingBuilder {
	namespaces: Rc<[String]>,
	names: Names,
	pub coords: FileCoords,
	/// In the first namespace.
	pub type_def: Option<TypeDef>,
	pub metadata: MemberMetadata,
}

impl FieldMappingBuilder {
	fn new(namespaces: Rc<[String]>, coords: FileCoords) -> FieldMappingBuilder {
		FieldMappingBuilder {
			names: Names::none(namespaces.len()),
			namespaces,
			coords,
			type_def: None,
			metadata: MemberMetadata::UNKNOWN,
		}
	}

	fn build(self, set: &mut MappingSet, class: ClassId, issues: &mut dyn MappingIssuesRegistry) -> Result<()> {
		let names = finish_names(self.names, "Field", self.coords, true, issues);
		set.class_mut(class)?
			.add_field_mapping(names, self.coords.into(), self.type_def, self.metadata)?;
		Ok(())
	}
}

impl NamingBuilder for FieldMappingBuilder {
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
