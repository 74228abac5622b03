/* src/source/file.rs */

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{OverrideSource, SourceError};

/// Encodings a [`FileSource`] can read. Each one is a flat key-value table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
	#[cfg(feature = "json")]
	Json,
	#[cfg(feature = "toml")]
	Toml,
	#[cfg(feature = "yaml")]
	Yaml,
}

impl FileFormat {
	/// File extensions recognized for this format.
	pub fn extensions(&self) -> &'static [&'static str] {
		match self {
			#[cfg(feature = "json")]
			Self::Json => &["json"],
			#[cfg(feature = "toml")]
			Self::Toml => &["toml"],
			#[cfg(feature = "yaml")]
			Self::Yaml => &["yaml", "yml"],
		}
	}

	/// Picks a format from the path's extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension()?.to_str()? {
			#[cfg(feature = "json")]
			"json" => Some(Self::Json),
			#[cfg(feature = "toml")]
			"toml" => Some(Self::Toml),
			#[cfg(feature = "yaml")]
			"yaml" | "yml" => Some(Self::Yaml),
			_ => None,
		}
	}

	/// Decodes a flat table, stringifying scalar values. Nulls are dropped.
	pub fn parse(&self, input: &[u8]) -> Result<BTreeMap<String, String>, SourceError> {
		match self {
			#[cfg(feature = "json")]
			Self::Json => parse_json(input),
			#[cfg(feature = "toml")]
			Self::Toml => parse_toml(input),
			#[cfg(feature = "yaml")]
			Self::Yaml => parse_yaml(input),
		}
	}
}

#[cfg(feature = "json")]
fn parse_json(input: &[u8]) -> Result<BTreeMap<String, String>, SourceError> {
	use serde_json::Value;

	let table: BTreeMap<String, Value> =
		serde_json::from_slice(input).map_err(|e| SourceError::Parse(e.to_string()))?;

	Ok(table
		.into_iter()
		.filter_map(|(key, value)| match value {
			Value::Null => None,
			Value::String(s) => Some((key, s)),
			other => Some((key, other.to_string())),
		})
		.collect())
}

#[cfg(feature = "toml")]
fn parse_toml(input: &[u8]) -> Result<BTreeMap<String, String>, SourceError> {
	use toml::Value;

	let s = std::str::from_utf8(input).map_err(|e| SourceError::Parse(e.to_string()))?;
	let table: toml::Table = toml::from_str(s).map_err(|e| SourceError::Parse(e.to_string()))?;

	Ok(table
		.into_iter()
		.map(|(key, value)| match value {
			Value::String(s) => (key, s),
			other => (key, other.to_string()),
		})
		.collect())
}

#[cfg(feature = "yaml")]
fn parse_yaml(input: &[u8]) -> Result<BTreeMap<String, String>, SourceError> {
	use serde_yaml::Value;

	let table: BTreeMap<String, Value> =
		serde_yaml::from_slice(input).map_err(|e| SourceError::Parse(e.to_string()))?;

	let mut out = BTreeMap::new();
	for (key, value) in table {
		let value = match value {
			Value::Null => continue,
			Value::String(s) => s,
			Value::Bool(b) => b.to_string(),
			Value::Number(n) => n.to_string(),
			other => serde_yaml::to_string(&other)
				.map_err(|e| SourceError::Parse(e.to_string()))?
				.trim_end()
				.to_string(),
		};
		out.insert(key, value);
	}
	Ok(out)
}

/// A per-origin override file holding a flat key-value table.
///
/// The file is re-read on every lookup so edits made by other processes are
/// seen on the next resolution. A resolution reads it once through
/// `get_many`, so all flags come from the same version of the file. A
/// missing file behaves as an empty store.
#[derive(Debug, Clone)]
pub struct FileSource {
	path: PathBuf,
	format: FileFormat,
}

impl FileSource {
	/// Creates a source, choosing the format from the file extension.
	pub fn new(path: impl Into<PathBuf>) -> Result<Self, SourceError> {
		let path = path.into();
		let format = FileFormat::from_path(&path).ok_or_else(|| {
			SourceError::Parse(format!("unsupported override file extension: {}", path.display()))
		})?;
		Ok(Self { path, format })
	}

	/// Creates a source with an explicit format, ignoring the extension.
	pub fn with_format(path: impl Into<PathBuf>, format: FileFormat) -> Self {
		Self {
			path: path.into(),
			format,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn format(&self) -> FileFormat {
		self.format
	}

	/// Reads the whole table. A missing file yields an empty table.
	pub fn entries(&self) -> Result<BTreeMap<String, String>, SourceError> {
		match std::fs::read(&self.path) {
			Ok(bytes) => self.format.parse(&bytes),
			Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
			Err(e) => Err(SourceError::Io(e)),
		}
	}
}

impl OverrideSource for FileSource {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		let mut entries = self.entries()?;
		Ok(entries.remove(key))
	}

	/// Reads and parses the file once for all keys.
	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		match self.entries() {
			Ok(entries) => keys.iter().map(|key| Ok(entries.get(*key).cloned())).collect(),
			Err(e) => {
				let reason = e.to_string();
				keys.iter()
					.map(|_| Err(SourceError::Custom(reason.clone())))
					.collect()
			}
		}
	}
}
