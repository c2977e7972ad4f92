//! # Namespace Guard
//!
//! A declaration-time policy layer for namespaces: once the guard policy is
//! applied, every instance-style callable declared on the namespace is
//! transparently promoted to namespace (static) scope, and the namespace's
//! dynamic-mutation surface — visibility changes, aliasing, member removal
//! and redefinition, class-variable and constant mutation, re-application of
//! the policy — is locked down with fixed rejection messages. The one
//! sanctioned channel left open is [`Namespace::conceal`], which restricts
//! named static members to private visibility.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use namespace_guard::{callable, GuardError, Namespace, StaticPromotion};
//! use serde_json::json;
//!
//! let mut greeter = Namespace::new("greeter");
//! greeter.apply_policy(Arc::new(StaticPromotion))?;
//!
//! // Instance-style declarations are promoted to namespace scope.
//! greeter.declare("test", callable(|_| Ok(json!("A test."))))?;
//! assert_eq!(greeter.call("test", &[])?, json!("A test."));
//! assert!(!greeter.has_instance_member("test"));
//!
//! // Dynamic mutation is rejected with a fixed message.
//! let err = greeter.undefine_member("test").unwrap_err();
//! assert_eq!(err.to_string(), "Undefining method test is disabled.");
//! # Ok::<(), GuardError>(())
//! ```
//!
//! ## Design
//!
//! The host construct ([`Namespace`]) is a plain registry with the full
//! mutation surface; enforcement lives behind the [`NamespacePolicy`] trait,
//! which the namespace consults on every declaration and mutation event.
//! Ungoverned namespaces never touch the policy layer and keep ordinary
//! permissive semantics. [`StaticPromotion`] is the guard policy; once
//! applied it cannot be detached, and applying it again — directly or by
//! using the guarded namespace as an extend/include/prepend source — is
//! rejected.
//!
//! Promotion runs as a short transaction flagged per namespace: capture the
//! definition, remove the instance-scope copy (the one removal the policy
//! permits), re-declare at namespace scope, and clear the flag through a
//! drop guard so a failed step can never leave the namespace stuck
//! mid-transaction.

#![deny(missing_docs)]
#![deny(unsafe_code)]

mod builder;
mod conceal;
mod error;
mod member;
mod namespace;
mod policy;
mod promotion;

pub use builder::NamespaceBuilder;
pub use conceal::ConcealTargets;
pub use error::{GuardError, Result};
pub use member::{callable, CallContext, Callable, Member, Visibility};
pub use namespace::Namespace;
pub use policy::{MutationRequest, NamespacePolicy};
pub use promotion::{StaticPromotion, RESERVED_STATIC_HOOKS};
