/* src/context.rs */

//!
//! Explicit, lexically passed lookup of the nearest enclosing scope.

use std::fmt;
use std::sync::Arc;

use crate::scope::Scope;

/// The chain of scopes visible at one position of the consumer tree.
///
/// Contexts are immutable; [`provide`](Context::provide) returns a child
/// context. A scope shadows outer scopes of the same feature system only,
/// so unrelated systems can nest freely.
#[derive(Clone, Default)]
pub struct Context {
	head: Option<Arc<Node>>,
}

struct Node {
	scope: Scope,
	parent: Option<Arc<Node>>,
}

impl Context {
	/// A context with no scopes.
	pub fn root() -> Self {
		Self::default()
	}

	/// Returns a child context in which `scope` is the nearest scope of its
	/// system.
	pub fn provide(&self, scope: &Scope) -> Self {
		Self {
			head: Some(Arc::new(Node {
				scope: scope.clone(),
				parent: self.head.clone(),
			})),
		}
	}

	/// Number of scopes provided along this chain.
	pub fn depth(&self) -> usize {
		self.scopes().count()
	}

	pub(crate) fn nearest(&self, system_id: u64) -> Option<&Scope> {
		self.scopes().find(|scope| scope.system_id() == system_id)
	}

	fn scopes(&self) -> impl Iterator<Item = &Scope> {
		std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
			.map(|node| &node.scope)
	}
}

impl fmt::Debug for Context {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Context")
			.field("depth", &self.depth())
			.finish()
	}
}
