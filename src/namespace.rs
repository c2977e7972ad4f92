//! The host namespace construct the guard policy governs.
//!
//! A [`Namespace`] is a named registry of callable members in two scopes
//! (instance and namespace/static), plus class variables, constants, and the
//! mutation surface a host runtime exposes over them. Without a policy every
//! operation has ordinary permissive semantics; with a policy installed,
//! every mutation is classified as a [`MutationRequest`] and routed through
//! the policy before it takes effect.
//!
//! # Example
//!
//! ```
//! use namespace_guard::{callable, GuardError, Namespace};
//! use serde_json::json;
//!
//! let mut ns = Namespace::new("math");
//! ns.declare_static("double", callable(|args| {
//!     let n = args[0].as_i64().unwrap_or(0);
//!     Ok(json!(n * 2))
//! }))?;
//! assert_eq!(ns.call("double", &[json!(21)])?, json!(42));
//! # Ok::<(), GuardError>(())
//! ```

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::conceal::ConcealTargets;
use crate::error::{GuardError, Result};
use crate::member::{CallContext, Callable, Member, Visibility};
use crate::policy::{MutationRequest, NamespacePolicy};

/// A named registry of callable members with a guarded mutation surface.
#[derive(Debug, Clone)]
pub struct Namespace {
    name: String,
    instance_members: BTreeMap<String, Member>,
    static_members: BTreeMap<String, Member>,
    class_variables: BTreeMap<String, Value>,
    constants: BTreeMap<String, Value>,
    undefined: BTreeSet<String>,
    default_visibility: Visibility,
    module_function_mode: bool,
    policy: Option<Arc<dyn NamespacePolicy>>,
    promoting: bool,
}

impl Namespace {
    /// Create an ungoverned namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instance_members: BTreeMap::new(),
            static_members: BTreeMap::new(),
            class_variables: BTreeMap::new(),
            constants: BTreeMap::new(),
            undefined: BTreeSet::new(),
            default_visibility: Visibility::Public,
            module_function_mode: false,
            policy: None,
            promoting: false,
        }
    }

    /// The namespace's name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether a policy is installed.
    pub fn is_guarded(&self) -> bool {
        self.policy.is_some()
    }

    /// Whether a promotion transaction is in flight.
    pub fn promoting(&self) -> bool {
        self.promoting
    }

    pub(crate) fn set_promoting(&mut self, promoting: bool) {
        self.promoting = promoting;
    }

    fn authorize(&self, request: MutationRequest<'_>) -> Result<()> {
        match &self.policy {
            Some(policy) => policy.authorize(self, request),
            None => Ok(()),
        }
    }

    // ---- policy attachment ----

    /// Attach a policy to this namespace (the "apply" mechanism).
    ///
    /// The policy's `applied` hook runs after installation, so members
    /// declared before attachment are subject to the policy's attach-time
    /// pass. Re-applying a policy to an already-guarded namespace is
    /// rejected by the installed policy.
    pub fn apply_policy(&mut self, policy: Arc<dyn NamespacePolicy>) -> Result<()> {
        self.authorize(MutationRequest::ApplyPolicy)?;
        self.policy = Some(Arc::clone(&policy));
        policy.applied(self)
    }

    /// Attach a policy via the include mechanism.
    ///
    /// Policies decide whether they support this attach path; the guard
    /// policy rejects it unconditionally.
    pub fn include_policy(&mut self, policy: Arc<dyn NamespacePolicy>) -> Result<()> {
        policy.policy_included(self)
    }

    /// Attach a policy via the prepend mechanism.
    ///
    /// Policies decide whether they support this attach path; the guard
    /// policy rejects it unconditionally.
    pub fn prepend_policy(&mut self, policy: Arc<dyn NamespacePolicy>) -> Result<()> {
        policy.policy_prepended(self)
    }

    // ---- declaration ----

    /// Declare an instance-scope callable.
    ///
    /// This is the member-declaration event: the definition is registered
    /// under the namespace's current default visibility and the installed
    /// policy's `member_declared` hook fires. In module-function mode an
    /// ungoverned namespace also registers a public namespace-scope copy and
    /// demotes the instance copy to private.
    pub fn declare(&mut self, name: &str, body: Callable) -> Result<()> {
        self.undefined.remove(name);
        if self.module_function_mode && self.policy.is_none() {
            self.static_members
                .insert(name.to_owned(), Member::public(Arc::clone(&body)));
            self.instance_members
                .insert(name.to_owned(), Member::new(body, Visibility::Private));
        } else {
            self.instance_members
                .insert(name.to_owned(), Member::new(body, self.default_visibility));
        }
        if let Some(policy) = self.policy.clone() {
            policy.member_declared(self, name)?;
        }
        Ok(())
    }

    /// Declare a namespace-scope (static) callable directly.
    ///
    /// On a guarded namespace this is rejected unless the declaration is
    /// part of an active promotion transaction or the name is a reserved
    /// bookkeeping hook.
    pub fn declare_static(&mut self, name: &str, body: Callable) -> Result<()> {
        self.authorize(MutationRequest::DeclareStatic { name })?;
        self.undefined.remove(name);
        self.static_members.insert(name.to_owned(), Member::public(body));
        Ok(())
    }

    // ---- namespace composition ----

    /// Copy `source`'s instance members into this namespace's static scope.
    ///
    /// Fails if `source` is guarded: a guarded namespace refuses to act as
    /// an extend source.
    pub fn extend_with(&mut self, source: &Namespace) -> Result<()> {
        source.authorize(MutationRequest::ExtendSource)?;
        for (name, member) in &source.instance_members {
            self.static_members.insert(name.clone(), member.clone());
        }
        Ok(())
    }

    /// Merge `source`'s instance members behind this namespace's own.
    ///
    /// Existing members win; tombstoned names stay undefined. Fails if
    /// `source` is guarded.
    pub fn include(&mut self, source: &Namespace) -> Result<()> {
        source.authorize(MutationRequest::IncludeSource)?;
        for (name, member) in &source.instance_members {
            if self.undefined.contains(name) || self.instance_members.contains_key(name) {
                continue;
            }
            self.instance_members.insert(name.clone(), member.clone());
        }
        Ok(())
    }

    /// Merge `source`'s instance members ahead of this namespace's own.
    ///
    /// The source wins on name collisions; tombstoned names stay undefined.
    /// Fails if `source` is guarded.
    pub fn prepend(&mut self, source: &Namespace) -> Result<()> {
        source.authorize(MutationRequest::PrependSource)?;
        for (name, member) in &source.instance_members {
            if self.undefined.contains(name) {
                continue;
            }
            self.instance_members.insert(name.clone(), member.clone());
        }
        Ok(())
    }

    // ---- visibility and declaration modes ----

    /// Switch to module-function declaration mode: subsequent instance
    /// declarations also register a namespace-scope copy.
    pub fn set_module_function(&mut self) -> Result<()> {
        self.authorize(MutationRequest::ModuleFunction)?;
        self.module_function_mode = true;
        Ok(())
    }

    /// Set public default visibility for subsequent declarations.
    pub fn set_public(&mut self) -> Result<()> {
        self.authorize(MutationRequest::SetPublic)?;
        self.default_visibility = Visibility::Public;
        Ok(())
    }

    /// Set protected default visibility for subsequent declarations.
    pub fn set_protected(&mut self) -> Result<()> {
        self.authorize(MutationRequest::SetProtected)?;
        self.default_visibility = Visibility::Protected;
        Ok(())
    }

    /// Set private default visibility for subsequent declarations.
    pub fn set_private(&mut self) -> Result<()> {
        self.authorize(MutationRequest::SetPrivate)?;
        self.default_visibility = Visibility::Private;
        Ok(())
    }

    /// Restrict namespace-scope members to private visibility.
    ///
    /// This is the one sanctioned visibility channel on a guarded namespace.
    /// Accepts a single name, an array of names, or a sequence of names;
    /// each is forwarded to the underlying visibility restriction. Fails with
    /// an unknown-member error if any name has no namespace-scope member.
    pub fn conceal<T: ConcealTargets>(&mut self, targets: T) -> Result<()> {
        let names = targets.into_names();
        self.authorize(MutationRequest::Conceal { names: &names })?;
        for name in &names {
            let member = self.static_members.get_mut(name).ok_or_else(|| {
                GuardError::UnknownMember {
                    namespace: self.name.clone(),
                    name: name.clone(),
                }
            })?;
            member.visibility = Visibility::Private;
            debug!(namespace = %self.name, member = %name, "member concealed");
        }
        Ok(())
    }

    // ---- aliasing, shared state, constants ----

    /// Register `from`'s definition under the additional name `to`.
    pub fn alias_member(&mut self, to: &str, from: &str) -> Result<()> {
        self.authorize(MutationRequest::Alias { to, from })?;
        let member = self.instance_members.get(from).cloned().ok_or_else(|| {
            GuardError::UnknownMember {
                namespace: self.name.clone(),
                name: from.to_owned(),
            }
        })?;
        self.undefined.remove(to);
        self.instance_members.insert(to.to_owned(), member);
        Ok(())
    }

    /// Write a class variable.
    pub fn set_class_variable(&mut self, name: &str, value: Value) -> Result<()> {
        self.authorize(MutationRequest::SetClassVariable { name })?;
        self.class_variables.insert(name.to_owned(), value);
        Ok(())
    }

    /// Read a class variable.
    pub fn class_variable(&self, name: &str) -> Result<Value> {
        self.authorize(MutationRequest::GetClassVariable { name })?;
        self.class_variables.get(name).cloned().ok_or_else(|| {
            GuardError::UninitializedClassVariable {
                namespace: self.name.clone(),
                name: name.to_owned(),
            }
        })
    }

    /// Define a constant.
    pub fn define_constant(&mut self, name: &str, value: Value) -> Result<()> {
        self.authorize(MutationRequest::DefineConstant { name })?;
        self.constants.insert(name.to_owned(), value);
        Ok(())
    }

    /// Read a constant, if defined.
    pub fn constant(&self, name: &str) -> Option<&Value> {
        self.constants.get(name)
    }

    // ---- dynamic definition and removal ----

    /// Dynamically define an instance member.
    pub fn define_member(&mut self, name: &str, body: Callable) -> Result<()> {
        self.authorize(MutationRequest::DefineMember { name })?;
        self.undefined.remove(name);
        self.instance_members
            .insert(name.to_owned(), Member::new(body, self.default_visibility));
        Ok(())
    }

    /// Remove an instance member.
    ///
    /// On a guarded namespace this succeeds only inside an active promotion
    /// transaction; everywhere else the removal is ordinary.
    pub fn remove_member(&mut self, name: &str) -> Result<()> {
        self.authorize(MutationRequest::RemoveMember { name })?;
        match self.instance_members.remove(name) {
            Some(_) => Ok(()),
            None => Err(GuardError::UnknownMember {
                namespace: self.name.clone(),
                name: name.to_owned(),
            }),
        }
    }

    /// Undefine an instance member, tombstoning the name so a later include
    /// cannot resurrect it.
    pub fn undefine_member(&mut self, name: &str) -> Result<()> {
        self.authorize(MutationRequest::UndefineMember { name })?;
        if self.instance_members.remove(name).is_none() {
            return Err(GuardError::UnknownMember {
                namespace: self.name.clone(),
                name: name.to_owned(),
            });
        }
        self.undefined.insert(name.to_owned());
        Ok(())
    }

    // ---- invocation ----

    /// Invoke a namespace-scope member from an external context.
    pub fn call(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.invoke(CallContext::External, name, args)
    }

    /// Invoke a namespace-scope member from the namespace's own context,
    /// bypassing visibility restrictions.
    pub fn call_internal(&self, name: &str, args: &[Value]) -> Result<Value> {
        self.invoke(CallContext::Internal, name, args)
    }

    /// Invoke a namespace-scope member from an explicit context.
    pub fn invoke(&self, context: CallContext, name: &str, args: &[Value]) -> Result<Value> {
        let member = self
            .static_members
            .get(name)
            .ok_or_else(|| GuardError::UnknownMember {
                namespace: self.name.clone(),
                name: name.to_owned(),
            })?;
        if context == CallContext::External && member.visibility != Visibility::Public {
            return Err(GuardError::VisibilityViolation {
                namespace: self.name.clone(),
                name: name.to_owned(),
                visibility: member.visibility,
            });
        }
        (member.body)(args)
    }

    // ---- introspection ----

    /// Whether an instance-scope member is registered under `name`.
    pub fn has_instance_member(&self, name: &str) -> bool {
        self.instance_members.contains_key(name)
    }

    /// Whether a namespace-scope member is registered under `name`.
    pub fn has_static_member(&self, name: &str) -> bool {
        self.static_members.contains_key(name)
    }

    /// Names of all instance-scope members.
    pub fn instance_members(&self) -> Vec<String> {
        self.instance_members.keys().cloned().collect()
    }

    /// Names of all namespace-scope members.
    pub fn static_members(&self) -> Vec<String> {
        self.static_members.keys().cloned().collect()
    }

    /// The visibility of the namespace-scope member `name`, if registered.
    pub fn static_visibility(&self, name: &str) -> Option<Visibility> {
        self.static_members.get(name).map(|m| m.visibility)
    }

    /// The visibility of the instance-scope member `name`, if registered.
    pub fn instance_visibility(&self, name: &str) -> Option<Visibility> {
        self.instance_members.get(name).map(|m| m.visibility)
    }

    /// The definition of the instance-scope member `name`, if registered.
    pub fn instance_definition(&self, name: &str) -> Option<Callable> {
        self.instance_members.get(name).map(|m| Arc::clone(&m.body))
    }
}
