//! Member model: callables, visibility, and call contexts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// A member's executable body.
///
/// Bodies take their arguments as a slice of JSON values and may fail; the
/// namespace clones the `Arc` when a definition is captured for promotion, so
/// a promoted member runs the same body it was declared with.
pub type Callable = Arc<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

/// Wrap a closure as a member body.
///
/// # Example
///
/// ```
/// use namespace_guard::callable;
/// use serde_json::json;
///
/// let body = callable(|_args| Ok(json!("A test.")));
/// assert_eq!(body(&[]).unwrap(), json!("A test."));
/// ```
pub fn callable<F>(body: F) -> Callable
where
    F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
{
    Arc::new(body)
}

/// Visibility of a namespace member.
///
/// Non-public members are reachable only from [`CallContext::Internal`];
/// external invocation fails with a visibility-violation error. Concealment
/// restricts a namespace-scope member to `Private`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Callable from any context.
    #[default]
    Public,
    /// Callable from internal contexts and related namespaces.
    Protected,
    /// Callable from internal contexts only.
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        };
        f.write_str(label)
    }
}

/// The context a member invocation originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallContext {
    /// A caller outside the namespace. Sees public members only.
    External,
    /// The namespace's own code. Sees all members.
    Internal,
}

/// A registered member: a body plus its effective visibility.
#[derive(Clone)]
pub struct Member {
    /// The member's executable body.
    pub body: Callable,
    /// The member's effective visibility.
    pub visibility: Visibility,
}

impl Member {
    /// Create a member with the given visibility.
    pub fn new(body: Callable, visibility: Visibility) -> Self {
        Self { body, visibility }
    }

    /// Create a public member.
    pub fn public(body: Callable) -> Self {
        Self::new(body, Visibility::Public)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("visibility", &self.visibility)
            .finish_non_exhaustive()
    }
}
