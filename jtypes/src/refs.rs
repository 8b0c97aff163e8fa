//! References to members, as well as indices of parameters and local variables.

use crate::descriptor::{MethodDescriptor, TypeDef};
use crate::names::{ClassName, FieldName, MethodName};

/// A reference to a field inside some class.
///
/// The type is optional, and if given it's spelled in whatever namespace the reference comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalFieldRef {
	pub name: FieldName,
	pub type_def: Option<TypeDef>,
}

impl LocalFieldRef {
	pub fn new(name: impl Into<FieldName>, type_def: Option<TypeDef>) -> LocalFieldRef {
		LocalFieldRef { name: name.into(), type_def }
	}

	pub fn with_type(self, type_def: Option<TypeDef>) -> LocalFieldRef {
		LocalFieldRef { type_def, ..self }
	}

	pub fn without_type(self) -> LocalFieldRef {
		self.with_type(None)
	}

	pub fn with_class(self, containing_class: ClassName) -> FieldRef {
		FieldRef { containing_class, field: self }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
	pub containing_class: ClassName,
	pub field: LocalFieldRef,
}

/// A reference to a method inside some class.
///
/// Like with [`LocalFieldRef`], the descriptor is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalMethodRef {
	pub name: MethodName,
	pub desc: Option<MethodDescriptor>,
}

impl LocalMethodRef {
	pub fn new(name: impl Into<MethodName>, desc: Option<MethodDescriptor>) -> LocalMethodRef {
		LocalMethodRef { name: name.into(), desc }
	}

	pub fn with_desc(self, desc: MethodDescriptor) -> LocalMethodRef {
		LocalMethodRef { desc: Some(desc), ..self }
	}

	pub fn with_class(self, containing_class: ClassName) -> MethodRef {
		MethodRef { containing_class, method: self }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodRef {
	pub containing_class: ClassName,
	pub method: LocalMethodRef,
}

/// The index of a method parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParamIndex(pub u32);

/// A possibly unknown slot index.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Local(Option<u32>);

impl Local {
	pub const UNKNOWN: Local = Local(None);

	pub const fn new(index: u32) -> Local {
		Local(Some(index))
	}

	pub fn get(self) -> Option<u32> {
		self.0
	}

	pub fn is_known(self) -> bool {
		self.0.is_some()
	}
}

impl From<u32> for Local {
	fn from(value: u32) -> Self {
		Local::new(value)
	}
}

/// The local variable index of a local variable, optionally with the range of instructions it is valid for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct LocalVarIndex {
	pub index: Local,
	pub start: Local,
	pub end: Local,
}

impl LocalVarIndex {
	pub const UNKNOWN: LocalVarIndex = LocalVarIndex {
		index: Local::UNKNOWN,
		start: Local::UNKNOWN,
		end: Local::UNKNOWN,
	};

	pub fn new(index: u32) -> LocalVarIndex {
		LocalVarIndex { index: Local::new(index), ..LocalVarIndex::UNKNOWN }
	}

	pub fn with_range(index: u32, start: Local, end: Local) -> LocalVarIndex {
		LocalVarIndex { index: Local::new(index), start, end }
	}

	pub fn is_known(&self) -> bool {
		self.index.is_known()
	}

	/// Checks if `other` agrees with `self` on every part that is known in `self`.
	///
	/// Unknown parts of `self` match anything.
	pub fn matches(&self, other: &LocalVarIndex) -> bool {
		(!self.index.is_known() || self.index == other.index) &&
			(!self.start.is_known() || self.start == other.start) &&
			(!self.end.is_known() || self.end == other.end)
	}
}

/// The index into the local variable table of a method.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct LvtIndex(pub Local);

impl LvtIndex {
	pub const UNKNOWN: LvtIndex = LvtIndex(Local::UNKNOWN);

	pub const fn new(index: u32) -> LvtIndex {
		LvtIndex(Local::new(index))
	}

	pub fn is_known(&self) -> bool {
		self.0.is_known()
	}
}

#[cfg(test)]
mod testing {
	use crate::refs::{Local, LocalVarIndex, LvtIndex};

	#[test]
	fn local_var_index_matching() {
		let full = LocalVarIndex::with_range(3, Local::new(10), Local::new(20));

		assert!(LocalVarIndex::UNKNOWN.matches(&full));
		assert!(LocalVarIndex::new(3).matches(&full));
		assert!(!LocalVarIndex::new(4).matches(&full));
		assert!(!full.matches(&LocalVarIndex::new(3)));
	}

	#[test]
	fn known() {
		assert!(!LvtIndex::UNKNOWN.is_known());
		assert!(LvtIndex::new(0).is_known());
		assert!(!LocalVarIndex::default().is_known());
	}
}
