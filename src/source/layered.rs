/* src/source/layered.rs */

use super::{OverrideSource, SourceError};

/// Consults several sources in order; the first one holding the key wins.
///
/// A failing layer is skipped. Its error is only reported when no later
/// layer has the key.
#[derive(Default)]
pub struct LayeredSource {
	layers: Vec<Box<dyn OverrideSource>>,
}

impl LayeredSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a layer with lower priority than the existing ones.
	pub fn layer(mut self, source: impl OverrideSource + 'static) -> Self {
		self.layers.push(Box::new(source));
		self
	}

	pub fn len(&self) -> usize {
		self.layers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.layers.is_empty()
	}
}

impl OverrideSource for LayeredSource {
	fn get(&self, key: &str) -> Result<Option<String>, SourceError> {
		let mut first_error = None;

		for layer in &self.layers {
			match layer.get(key) {
				Ok(Some(value)) => return Ok(Some(value)),
				Ok(None) => {}
				Err(e) => {
					#[cfg(feature = "logging")]
					log::debug!("Skipping failing override layer for '{}': {}", key, e);
					first_error.get_or_insert(e);
				}
			}
		}

		match first_error {
			Some(e) => Err(e),
			None => Ok(None),
		}
	}

	/// Asks each layer once for every key still unanswered.
	fn get_many(&self, keys: &[&str]) -> Vec<Result<Option<String>, SourceError>> {
		let mut results: Vec<Result<Option<String>, SourceError>> =
			keys.iter().map(|_| Ok(None)).collect();

		for layer in &self.layers {
			let open: Vec<usize> = (0..keys.len())
				.filter(|&idx| !matches!(results[idx], Ok(Some(_))))
				.collect();
			if open.is_empty() {
				break;
			}

			let asked: Vec<&str> = open.iter().map(|&idx| keys[idx]).collect();
			for (idx, read) in open.into_iter().zip(layer.get_many(&asked)) {
				match read {
					Ok(Some(value)) => results[idx] = Ok(Some(value)),
					Ok(None) => {}
					Err(e) => {
						#[cfg(feature = "logging")]
						log::debug!(
							"Skipping failing override layer for '{}': {}",
							keys[idx],
							e
						);
						// Keep the first error for the key.
						if matches!(results[idx], Ok(None)) {
							results[idx] = Err(e);
						}
					}
				}
			}
		}

		results
	}
}
