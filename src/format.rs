use log::{debug, warn};
use crate::definition::MappingsDefinition;

/// A reader for one mapping file format.
pub trait MappingsFormatParser: Sync {
	/// A short name of the format, stored in the [`MappingsFile`][crate::definition::MappingsFile] of parsed
	/// mappings.
	fn id(&self) -> &'static str;

	/// Endings of file names in this format. This is the first thing looked at to find the parser for a file.
	fn expected_file_extensions(&self) -> &'static [&'static str];

	/// Quickly checks if the contents are in this format.
	///
	/// Only asked if more than one parser expects the file name.
	fn is_supported(&self, _bytes: &[u8]) -> bool {
		false
	}

	/// Reads the mappings, returning `None` if the contents are not in this format or too broken to read.
	///
	/// Problems in the contents that still allow reading the rest should be reported through the
	/// [`MappingsDefinitionBuilder`][crate::definition::MappingsDefinitionBuilder] instead, so that as many
	/// mappings as possible are kept.
	fn parse(&self, source_name: &str, bytes: &[u8]) -> Option<MappingsDefinition>;
}

/// The known mapping formats, in order of registration.
#[derive(Default)]
pub struct FormatRegistry {
	parsers: Vec<&'static dyn MappingsFormatParser>,
}

impl FormatRegistry {
	pub fn new(parsers: &[&'static dyn MappingsFormatParser]) -> FormatRegistry {
		FormatRegistry { parsers: parsers.to_vec() }
	}

	pub fn register(&mut self, parser: &'static dyn MappingsFormatParser) -> &mut FormatRegistry {
		self.parsers.push(parser);
		self
	}

	pub fn parsers(&self) -> &[&'static dyn MappingsFormatParser] {
		&self.parsers
	}

	pub fn get(&self, id: &str) -> Option<&'static dyn MappingsFormatParser> {
		self.parsers.iter().copied().find(|parser| parser.id() == id)
	}

	/// The parsers to try for a file, best fitting first.
	///
	/// These are the parsers expecting the file name. If there's more than one, only the ones accepting the
	/// contents are left.
	pub fn candidates(&self, file_name: &str, bytes: &[u8]) -> Vec<&'static dyn MappingsFormatParser> {
		let by_extension: Vec<_> = self.parsers.iter()
			.copied()
			.filter(|parser| parser.expected_file_extensions().iter().any(|ext| file_name.ends_with(ext)))
			.collect();

		if by_extension.len() <= 1 {
			return by_extension;
		}

		let supported: Vec<_> = by_extension.into_iter()
			.filter(|parser| parser.is_supported(bytes))
			.collect();

		if supported.len() > 1 {
			let ids: Vec<_> = supported.iter().map(|parser| parser.id()).collect();
			warn!("multiple mapping formats {ids:?} support {file_name:?}, preferring the first registered");
		}
		supported
	}

	/// Parses the file with the first of the [candidates][FormatRegistry::candidates] able to read it.
	pub fn parse(&self, file_name: &str, bytes: &[u8]) -> Option<MappingsDefinition> {
		let candidates = self.candidates(file_name, bytes);
		if candidates.is_empty() {
			debug!("no mapping format found for {file_name:?}");
		}

		candidates.into_iter().find_map(|parser| {
			debug!("reading {file_name:?} as {}", parser.id());
			parser.parse(file_name, bytes)
		})
	}
}
