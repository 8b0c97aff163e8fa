use log::debug;
use serde::Serialize;
use crate::location::FileCoords;

/// A problem found while reading mappings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingParseIssue {
	pub message: String,
	pub coords: Option<FileCoords>,
}

/// Somewhere to report problems with mappings to.
///
/// Reporting never fails and never stops the reading of the mappings.
pub trait MappingIssuesRegistry {
	fn error(&mut self, message: String, coords: Option<FileCoords>);
	fn warning(&mut self, message: String, coords: Option<FileCoords>);
}

/// Collects errors and warnings in the order they're reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MappingIssues {
	errors: Vec<MappingParseIssue>,
	warnings: Vec<MappingParseIssue>,
}

impl MappingIssues {
	pub fn new() -> MappingIssues {
		MappingIssues::default()
	}

	pub fn errors(&self) -> &[MappingParseIssue] {
		&self.errors
	}

	pub fn warnings(&self) -> &[MappingParseIssue] {
		&self.warnings
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty() && self.warnings.is_empty()
	}

	/// Returns the errors and the warnings.
	pub fn into_parts(self) -> (Vec<MappingParseIssue>, Vec<MappingParseIssue>) {
		(self.errors, self.warnings)
	}
}

impl MappingIssuesRegistry for MappingIssues {
	fn error(&mut self, message: String, coords: Option<FileCoords>) {
		debug!("mapping error at {coords:?}: {message}");
		self.errors.push(MappingParseIssue { message, coords });
	}

	fn warning(&mut self, message: String, coords: Option<FileCoords>) {
		debug!("mapping warning at {coords:?}: {message}");
		self.warnings.push(MappingParseIssue { message, coords });
	}
}
