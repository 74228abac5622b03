/* tests/resolver_tests.rs */

use std::sync::atomic::{AtomicUsize, Ordering};

use flagscope::{
	DuplicatePolicy, FlagNames, MemorySource, OverrideSource, SourceError, coerce,
	resolve_overrides,
};

struct FailingSource;

impl OverrideSource for FailingSource {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		if key == "broken" {
			Err(SourceError::Custom("storage unavailable".to_string()))
		} else {
			Ok(Some("true".to_string()))
		}
	}
}

/// Counts how the resolver reads from it.
#[derive(Default)]
struct CountingSource {
	single: AtomicUsize,
	batch: AtomicUsize,
}

impl OverrideSource for CountingSource {
	fn get(&self, _key: &str) -> Result<Option<String>, SourceError> {
		self.single.fetch_add(1, Ordering::SeqCst);
		Ok(None)
	}

	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		self.batch.fetch_add(1, Ordering::SeqCst);
		keys.iter().map(|_| Ok(Some("TRUE".to_string()))).collect()
	}
}

fn names(list: &[&str]) -> FlagNames {
	FlagNames::new(list.iter().copied(), DuplicatePolicy::Reject).unwrap()
}

#[test]
fn test_coerce_only_true_is_true() {
	assert!(coerce("true"));
	assert!(coerce("TRUE"));
	assert!(coerce("True"));
	assert!(!coerce("false"));
	assert!(!coerce("1"));
	assert!(!coerce("yes"));
	assert!(!coerce("nope"));
	assert!(!coerce(""));
	assert!(!coerce(" true"));
}

#[test]
fn test_absent_entries_are_omitted() {
	let source = MemorySource::new();
	source.insert("betaSearch", "TRUE");

	let overrides = resolve_overrides(&source, &names(&["darkMode", "betaSearch"]));
	assert_eq!(overrides.len(), 1);
	assert_eq!(overrides.get("betaSearch"), Some(true));
	assert_eq!(overrides.get("darkMode"), None);
	assert!(!overrides.contains("darkMode"));
}

#[test]
fn test_garbage_coerces_to_false() {
	let source = MemorySource::new();
	source.insert("darkMode", "nope");

	let overrides = resolve_overrides(&source, &names(&["darkMode"]));
	assert_eq!(overrides.get("darkMode"), Some(false));
}

#[test]
fn test_keys_are_case_sensitive() {
	let source = MemorySource::new();
	source.insert("darkmode", "true");

	let overrides = resolve_overrides(&source, &names(&["darkMode"]));
	assert!(overrides.is_empty());
}

#[test]
fn test_read_failures_are_skipped() {
	let overrides = resolve_overrides(&FailingSource, &names(&["broken", "fine"]));
	assert_eq!(overrides.get("broken"), None);
	assert_eq!(overrides.get("fine"), Some(true));
}

#[test]
fn test_resolution_is_repeatable() {
	let source = MemorySource::new();
	source.insert("a", "true");
	source.insert("b", "False");
	let names = names(&["a", "b", "c"]);

	let first = resolve_overrides(&source, &names);
	let second = resolve_overrides(&source, &names);
	assert_eq!(first, second);
}

#[test]
fn test_resolution_reads_source_once() {
	let source = CountingSource::default();
	let overrides = resolve_overrides(&source, &names(&["a", "b", "c"]));

	assert_eq!(source.batch.load(Ordering::SeqCst), 1);
	assert_eq!(source.single.load(Ordering::SeqCst), 0);
	assert_eq!(overrides.len(), 3);
	assert!(overrides.iter().all(|(_, value)| value));
}
