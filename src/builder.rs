//! Registration-style construction of namespaces.
//!
//! The builder collects a policy choice, declarations, and concealments up
//! front; [`build`](NamespaceBuilder::build) attaches the policy first and
//! then replays the declarations, so each one flows through the policy's
//! declaration hooks exactly as if it had been declared live.
//!
//! # Example
//!
//! ```
//! use namespace_guard::{callable, GuardError, NamespaceBuilder};
//! use serde_json::json;
//!
//! let ns = NamespaceBuilder::new("greeter")
//!     .guarded()
//!     .declare("hello", callable(|_| Ok(json!("hi"))))
//!     .declare("secret", callable(|_| Ok(json!("shh"))))
//!     .conceal("secret")
//!     .build()?;
//!
//! assert_eq!(ns.call("hello", &[])?, json!("hi"));
//! assert!(ns.call("secret", &[]).is_err());
//! # Ok::<(), GuardError>(())
//! ```

use std::sync::Arc;

use crate::conceal::ConcealTargets;
use crate::error::Result;
use crate::member::Callable;
use crate::namespace::Namespace;
use crate::policy::NamespacePolicy;
use crate::promotion::StaticPromotion;

/// Builder that collects declarations and constructs a [`Namespace`].
#[derive(Default)]
pub struct NamespaceBuilder {
    name: String,
    policy: Option<Arc<dyn NamespacePolicy>>,
    declarations: Vec<(String, Callable)>,
    concealed: Vec<String>,
}

impl std::fmt::Debug for NamespaceBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NamespaceBuilder")
            .field("name", &self.name)
            .field("policy", &self.policy)
            .field("declarations", &self.declarations.len())
            .field("concealed", &self.concealed)
            .finish()
    }
}

impl NamespaceBuilder {
    /// Start a builder for a namespace with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attach the [`StaticPromotion`] guard policy at build time.
    pub fn guarded(self) -> Self {
        self.policy(Arc::new(StaticPromotion))
    }

    /// Attach an arbitrary policy at build time.
    pub fn policy(mut self, policy: Arc<dyn NamespacePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Collect an instance-scope declaration.
    pub fn declare(mut self, name: impl Into<String>, body: Callable) -> Self {
        self.declarations.push((name.into(), body));
        self
    }

    /// Collect members to conceal after the declarations are replayed.
    pub fn conceal<T: ConcealTargets>(mut self, targets: T) -> Self {
        self.concealed.extend(targets.into_names());
        self
    }

    /// Construct the namespace: attach the policy, replay the declarations,
    /// then apply the concealments.
    pub fn build(self) -> Result<Namespace> {
        let mut namespace = Namespace::new(self.name);
        if let Some(policy) = self.policy {
            namespace.apply_policy(policy)?;
        }
        for (name, body) in self.declarations {
            namespace.declare(&name, body)?;
        }
        if !self.concealed.is_empty() {
            namespace.conceal(self.concealed)?;
        }
        Ok(namespace)
    }
}
