use std::ops::{Deref, DerefMut};
use anyhow::Result;
use serde::Serialize;
use mapset::{MappingIssuesRegistry, MappingParseIssue, MappingSet, MappingSetBuilder};
use mapset::location::FileCoords;

/// The mapping file a [`MappingSet`] was read from, together with everything that went wrong while reading it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingsFile {
	pub source_name: String,
	/// The [id][crate::format::MappingsFormatParser::id] of the format the file was read as.
	pub format: String,
	pub errors: Vec<MappingParseIssue>,
	pub warnings: Vec<MappingParseIssue>,
}

impl MappingsFile {
	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}
}

/// Mappings together with their source.
#[derive(Debug, Clone)]
pub struct MappingsDefinition {
	pub mappings: MappingSet,
	pub source: MappingsFile,
}

/// Builds a [`MappingsDefinition`] from one mapping file.
///
/// Dereferences to the [`MappingSetBuilder`] the mappings are declared with.
#[derive(Debug)]
pub struct MappingsDefinitionBuilder {
	mappings: MappingSetBuilder,
	source_name: String,
	format: String,
}

impl MappingsDefinitionBuilder {
	pub fn new<I, S>(format: impl Into<String>, source_name: impl Into<String>, namespaces: I) -> Result<MappingsDefinitionBuilder>
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Ok(MappingsDefinitionBuilder {
			mappings: MappingSetBuilder::new(namespaces)?,
			source_name: source_name.into(),
			format: format.into(),
		})
	}

	/// For formats that don't name their namespaces. The namespaces are called `from` and `to`.
	pub fn unnamed(format: impl Into<String>, source_name: impl Into<String>) -> Result<MappingsDefinitionBuilder> {
		MappingsDefinitionBuilder::new(format, source_name, Vec::<String>::new())
	}

	pub fn source_name(&self) -> &str {
		&self.source_name
	}

	pub fn build(self) -> Result<MappingsDefinition> {
		let (mappings, issues) = self.mappings.build()?;
		let (errors, warnings) = issues.into_parts();

		Ok(MappingsDefinition {
			mappings,
			source: MappingsFile {
				source_name: self.source_name,
				format: self.format,
				errors,
				warnings,
			},
		})
	}
}

impl Deref for MappingsDefinitionBuilder {
	type Target = MappingSetBuilder;

	fn deref(&self) -> &Self::Target {
		&self.mappings
	}
}

impl DerefMut for MappingsDefinitionBuilder {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut self.mappings
	}
}

impl MappingIssuesRegistry for MappingsDefinitionBuilder {
	fn error(&mut self, message: String, coords: Option<FileCoords>) {
		self.mappings.error(message, coords);
	}

	fn warning(&mut self, message: String, coords: Option<FileCoords>) {
		self.mappings.warning(message, coords);
	}
}
