/* src/lib.rs */

//!
//! Scoped boolean feature flags with locally persisted overrides.
//!
//! This crate integrates four components:
//!
//! - **flags**: The closed flag name set, tri-state values and total snapshots.
//! - **source** / **resolver**: Read-only override stores and the coercion of
//!   their string entries to booleans.
//! - **scope**: Atomic snapshot storage plus synchronous change propagation.
//! - **system**: The factory (`FeatureSystem`) with its accessors and `Gate`.
//!
//! Scopes are looked up through an explicitly passed [`Context`].
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `events`: Enables broadcast `FlagEvent`s for `Scope`.
//! - `stream`: Enables `Scope::stream` (requires `events`).
//! - `serde`: Serialize/deserialize `Options`, `FlagValue` and `FlagSet`.
//! - `json`, `toml`, `yaml`: File-backed override sources (`FileSource`).
//! - `logging`: Emits diagnostics through the `log` facade.
//!
//! ## Basic Usage
//!
//! ```
//! use flagscope::{Context, FeatureSystem, FlagPatch, FlagValue, MemorySource};
//!
//! let overrides = MemorySource::new();
//! overrides.insert("betaSearch", "TRUE");
//!
//! let system = FeatureSystem::builder(["darkMode", "betaSearch"])
//! 	.source(overrides)
//! 	.build()?;
//! let scope = system.enter_scope(&FlagPatch::new().set("darkMode", true))?;
//! let ctx = Context::root().provide(&scope);
//!
//! assert_eq!(system.read_flag(&ctx, "betaSearch")?, FlagValue::Enabled);
//! assert_eq!(system.gate("darkMode")?.render(&ctx, || "dark")?, Some("dark"));
//! # Ok::<(), flagscope::FlagError>(())
//! ```
//!
//! See `demos/basic.rs` for a complete example.

pub mod context;
pub mod flags;
pub mod resolver;
pub mod scope;
pub mod source;
pub mod system;

pub use context::Context;
pub use flags::{FlagError, FlagNames, FlagPatch, FlagSet, FlagValue};
pub use resolver::{Overrides, coerce, resolve_overrides};
pub use scope::{FlagWriter, Scope, Subscription};
pub use source::{EnvSource, LayeredSource, MemorySource, OverrideSource, SourceError};
pub use system::{
	DuplicatePolicy, FeatureSystem, FeatureSystemBuilder, Gate, MissingScopePolicy, Options,
	ResolvePolicy,
};

#[cfg(feature = "events")]
pub use scope::FlagEvent;
#[cfg(feature = "stream")]
pub use scope::FlagStream;
#[cfg(any(feature = "json", feature = "toml", feature = "yaml"))]
pub use source::{FileFormat, FileSource};
