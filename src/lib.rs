//! Reading obfuscation mappings into a [`MappingSet`][mapset::MappingSet].
//!
//! Mapping file formats implement [`MappingsFormatParser`] and are collected in a [`FormatRegistry`], which picks
//! the format of a file by its name and, if that's ambiguous, by its contents. Parsers declare what they read on a
//! [`MappingsDefinitionBuilder`], resulting in a [`MappingsDefinition`]: the mappings together with the file they
//! came from and the problems found in it.

pub mod definition;
pub mod format;

pub use definition::{MappingsDefinition, MappingsDefinitionBuilder, MappingsFile};
pub use format::{FormatRegistry, MappingsFormatParser};

pub use jtypes;
pub use mapset;
