/* src/flags/mod.rs */

//!
//! The flag data model: a closed name set, tri-state values, and total
//! snapshots over that name set.

mod error;
mod name;
mod patch;
mod set;
mod value;

pub use error::FlagError;
pub use name::{DuplicatePolicy, FlagNames};
pub use patch::FlagPatch;
pub use set::FlagSet;
pub use value::FlagValue;
