//! Function registry: the set of overloads, looked up by name.
//!
//! Built once (usually with [`FunctionRegistry::builtins`]) and then only
//! read. Overload order is registration order; it decides which overload
//! is tried first when several could apply.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use texl_diagnostic::{Diagnostic, ErrorCode};
use texl_ir::NodeKind;
use texl_types::{DType, Kind};

use crate::check::{check_overload, CallCheckResult, CallSite, CheckPhase};
use crate::delegation::{
    fallback_diagnostic, DelegationCheck, DelegationQuery, DelegationTelemetry, NotDelegable,
};
use crate::descriptor::{
    Arity, DelegationCapability, FunctionDescriptor, ParamSpec, ReturnSpec, Scalar, ScalarReturn,
    Shape,
};
use crate::signatures::Signature;
use crate::{register_builtins, CheckContext, FunctionOverload};

/// A registration that would make the registry inconsistent.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("{name} is already registered with arity {arity} and shape {shape:?}")]
    Duplicate {
        name: String,
        arity: Arity,
        shape: Shape,
    },
    #[error("{name} declares arity {arity} over {params} parameter(s)")]
    InvalidArity {
        name: String,
        arity: Arity,
        params: usize,
    },
    #[error("{name} names {kind:?}, which is not a primitive kind")]
    InvalidKind { name: String, kind: Kind },
}

/// The overload a call resolved to, with its check result.
#[derive(Debug)]
pub struct Resolution<'r> {
    /// `None` when the name is unknown or no overload takes the first
    /// argument's shape.
    pub overload: Option<&'r dyn FunctionOverload>,
    pub result: CallCheckResult,
}

#[derive(Default, Debug)]
pub struct FunctionRegistry {
    overloads: Vec<Box<dyn FunctionOverload>>,
    by_name: FxHashMap<&'static str, SmallVec<[usize; 4]>>,
}

impl FunctionRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The builtin library.
    ///
    /// # Panics
    ///
    /// If the builtin table is inconsistent, which is a defect in this
    /// crate, never in the caller.
    pub fn builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry)
            .unwrap_or_else(|err| panic!("builtin function table is inconsistent: {err}"));
        tracing::debug!(overloads = registry.len(), "builtin registry built");
        registry
    }

    /// Add an overload after validating its descriptor.
    pub fn register<O: FunctionOverload + 'static>(&mut self, overload: O) -> Result<(), RegistryError> {
        let descriptor = overload.descriptor();
        validate(descriptor)?;

        let indices = self.by_name.entry(descriptor.name).or_default();
        let duplicate = indices.iter().any(|&index| {
            let existing = self.overloads[index].descriptor();
            existing.namespace == descriptor.namespace
                && existing.arity == descriptor.arity
                && existing.shape == descriptor.shape
                && existing.params == descriptor.params
                && existing.returns == descriptor.returns
        });
        if duplicate {
            return Err(RegistryError::Duplicate {
                name: descriptor.qualified_name(),
                arity: descriptor.arity,
                shape: descriptor.shape,
            });
        }

        indices.push(self.overloads.len());
        self.overloads.push(Box::new(overload));
        Ok(())
    }

    /// Number of overloads, not of distinct names.
    pub fn len(&self) -> usize {
        self.overloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overloads.is_empty()
    }

    /// Every overload in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn FunctionOverload> + '_ {
        self.overloads.iter().map(AsRef::as_ref)
    }

    /// Overloads of `name` in `namespace`, in registration order.
    pub fn overloads<'r>(
        &'r self,
        namespace: Option<&'r str>,
        name: &str,
    ) -> impl Iterator<Item = &'r dyn FunctionOverload> + 'r {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&index| self.overloads[index].as_ref())
            .filter(move |overload| overload.descriptor().namespace == namespace)
    }

    pub fn contains(&self, namespace: Option<&str>, name: &str) -> bool {
        self.overloads(namespace, name).next().is_some()
    }

    /// Qualified names of every registered function, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.iter().map(|o| o.descriptor().qualified_name()).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    /// Capability of `name` when it appears inside a delegated expression:
    /// the first overload that declares one.
    pub fn delegation_capability(
        &self,
        namespace: Option<&str>,
        name: &str,
    ) -> Option<DelegationCapability> {
        self.overloads(namespace, name)
            .map(|overload| overload.delegation_capability())
            .find(|capability| !capability.is_empty())
    }

    /// Signatures offered for `name` at `arity` arguments.
    pub fn signatures_for(&self, namespace: Option<&str>, name: &str, arity: usize) -> Vec<Signature> {
        let mut out: Vec<Signature> = Vec::new();
        for signature in self
            .overloads(namespace, name)
            .filter_map(|overload| overload.signature(arity))
        {
            if !out.contains(&signature) {
                out.push(signature);
            }
        }
        out
    }

    /// Check one call node.
    pub fn check_call(&self, cx: &CheckContext<'_>, call: &CallSite<'_>) -> CallCheckResult {
        self.resolve(cx, call).result
    }

    /// Pick the overload for one call node and check it.
    ///
    /// Candidates whose shape matches the first argument are tried,
    /// arity matches first, each group in registration order. The first
    /// valid result wins; if none is valid the first candidate's result is
    /// returned, so the diagnostics describe the most likely intent.
    ///
    /// # Panics
    ///
    /// If the call site's node is not a call node.
    #[tracing::instrument(level = "debug", skip_all, fields(node = ?call.node()))]
    pub fn resolve<'r>(&'r self, cx: &CheckContext<'_>, call: &CallSite<'_>) -> Resolution<'r> {
        let NodeKind::Call { namespace, func, .. } = cx.arena.kind(call.node()) else {
            panic!("{:?} is not a call node", call.node());
        };
        let name = cx.interner.lookup(*func);
        let namespace = namespace.map(|ns| cx.interner.lookup(ns));

        let mut candidates: SmallVec<[&dyn FunctionOverload; 4]> =
            self.overloads(namespace, name).collect();
        if candidates.is_empty() {
            return Resolution {
                overload: None,
                result: unresolved(unknown_function(cx, call, namespace, name)),
            };
        }

        let first = call.arg_types().first();
        candidates.retain(|overload| overload.descriptor().shape.matches(first));
        candidates.sort_by_key(|overload| !overload.descriptor().arity.contains(call.arg_count()));

        let mut fallback: Option<(&dyn FunctionOverload, CallCheckResult)> = None;
        for overload in candidates {
            let result = check_overload(overload, cx, call);
            if result.is_valid() {
                tracing::debug!(function = name, "overload selected");
                return Resolution {
                    overload: Some(overload),
                    result,
                };
            }
            if fallback.is_none() {
                fallback = Some((overload, result));
            }
        }

        match fallback {
            Some((overload, result)) => Resolution {
                overload: Some(overload),
                result,
            },
            None => Resolution {
                overload: None,
                result: unresolved(shape_mismatch(cx, call, name)),
            },
        }
    }

    /// Decide whether one call node can run on its data source.
    ///
    /// Every negative answer for a resolved overload is recorded to the
    /// context's telemetry sink.
    pub fn check_delegation(&self, cx: &CheckContext<'_>, call: &CallSite<'_>) -> DelegationCheck {
        let resolution = self.resolve(cx, call);
        let Some(overload) = resolution.overload else {
            return DelegationCheck::local(NotDelegable::InvalidCall, None);
        };
        let query = DelegationQuery {
            cx,
            call,
            registry: self,
            descriptor: overload.descriptor(),
        };
        let outcome = if resolution.result.is_valid() {
            overload.is_delegable(&query)
        } else {
            Err(NotDelegable::InvalidCall)
        };

        match outcome {
            Ok(()) => DelegationCheck::delegable(),
            Err(reason) => {
                tracing::debug!(function = query.descriptor.name, %reason, "not delegable");
                cx.telemetry.record(DelegationTelemetry {
                    function: query.descriptor.name,
                    node: call.node(),
                    source: query.source(),
                    reason: reason.clone(),
                });
                let diagnostic = fallback_diagnostic(&query, &reason);
                DelegationCheck::local(reason, diagnostic)
            }
        }
    }
}

fn validate(descriptor: &FunctionDescriptor) -> Result<(), RegistryError> {
    let arity = descriptor.arity;
    let params = descriptor.params.len();
    let arity_ok = match arity.max {
        Some(max) => arity.min <= max && max == params,
        None => params > 0,
    };
    if !arity_ok {
        return Err(RegistryError::InvalidArity {
            name: descriptor.qualified_name(),
            arity,
            params,
        });
    }

    let param_kinds = descriptor.params.iter().filter_map(|spec| match spec {
        ParamSpec::Scalar(Scalar::Of(kind)) | ParamSpec::Column(Scalar::Of(kind)) => Some(*kind),
        _ => None,
    });
    let return_kind = match descriptor.returns {
        ReturnSpec::Scalar(ScalarReturn::Kind(kind)) | ReturnSpec::Lifted(ScalarReturn::Kind(kind)) => {
            Some(kind)
        }
        _ => None,
    };
    match param_kinds.chain(return_kind).find(|kind| !kind.is_primitive()) {
        Some(kind) => Err(RegistryError::InvalidKind {
            name: descriptor.qualified_name(),
            kind,
        }),
        None => Ok(()),
    }
}

fn unknown_function(
    cx: &CheckContext<'_>,
    call: &CallSite<'_>,
    namespace: Option<&str>,
    name: &str,
) -> Diagnostic {
    let qualified = match namespace {
        Some(namespace) => format!("{namespace}.{name}"),
        None => name.to_string(),
    };
    Diagnostic::new(ErrorCode::E1002)
        .at(call.node(), cx.arena.span(call.node()))
        .with_message(format!("'{qualified}' is an unknown or unsupported function"))
        .with_arg(qualified)
}

fn shape_mismatch(cx: &CheckContext<'_>, call: &CallSite<'_>, name: &str) -> Diagnostic {
    let node = call.args().first().copied().unwrap_or(call.node());
    let found = call
        .arg_types()
        .first()
        .map_or_else(|| "nothing".to_string(), |ty| ty.display(cx.interner).to_string());
    Diagnostic::new(ErrorCode::E1003)
        .at(node, cx.arena.span(node))
        .with_message(format!("no overload of {name} takes {found} as its first argument"))
        .with_arg(name)
        .with_arg(found)
}

fn unresolved(diagnostic: Diagnostic) -> CallCheckResult {
    tracing::debug!(code = %diagnostic.code, "call unresolved");
    CallCheckResult::from_diagnostic(DType::ERROR, diagnostic, CheckPhase::Started)
}
