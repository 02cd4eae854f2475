//! Arena and call-site builders shared by the unit tests.

use std::sync::OnceLock;

use texl_ir::{Name, NodeArena, NodeId, NodeKind, Span, StringInterner};
use texl_types::{DType, Features};

use crate::{
    CallCheckResult, CallSite, CheckContext, DelegationCheck, FunctionRegistry, RecordingTelemetry,
    StaticCatalog,
};

/// The builtin registry, built once per test binary.
pub(crate) fn registry() -> &'static FunctionRegistry {
    static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FunctionRegistry::builtins)
}

pub(crate) struct Fixture {
    pub features: Features,
    pub interner: StringInterner,
    pub arena: NodeArena,
    pub catalog: StaticCatalog,
    pub telemetry: RecordingTelemetry,
    pub behavior: bool,
    offset: u32,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_features(Features::default())
    }

    pub fn with_features(features: Features) -> Self {
        crate::init_tracing();
        Fixture {
            features,
            interner: StringInterner::new(),
            arena: NodeArena::new(),
            catalog: StaticCatalog::new(),
            telemetry: RecordingTelemetry::new(),
            behavior: false,
            offset: 0,
        }
    }

    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        let start = self.offset;
        self.offset += 4;
        self.arena.alloc(kind, Span::new(start, start + 3))
    }

    /// Any value node; the type comes from the caller.
    pub fn value(&mut self) -> NodeId {
        self.node(NodeKind::NumLit)
    }

    pub fn ident(&mut self, text: &str) -> NodeId {
        let name = self.name(text);
        self.node(NodeKind::FirstName(name))
    }

    pub fn text(&mut self, text: &str) -> NodeId {
        let name = self.name(text);
        self.node(NodeKind::StrLit(name))
    }

    pub fn call(&mut self, func: &str, args: &[NodeId]) -> NodeId {
        let func = self.name(func);
        self.node(NodeKind::Call {
            namespace: None,
            func,
            args: args.iter().copied().collect(),
        })
    }

    pub fn cx(&self) -> CheckContext<'_> {
        CheckContext::new(&self.features, &self.interner, &self.arena)
            .with_catalog(&self.catalog)
            .with_telemetry(&self.telemetry)
            .with_behavior(self.behavior)
    }

    pub fn site<'a>(&'a self, call: NodeId, arg_types: &'a [DType]) -> CallSite<'a> {
        CallSite::new(call, self.arena.call_args(call), arg_types)
    }

    /// Check `func(args)` where argument `i` has type `arg_types[i]`.
    pub fn check(&mut self, func: &str, arg_types: &[DType]) -> (NodeId, CallCheckResult) {
        let args: Vec<NodeId> = arg_types.iter().map(|_| self.value()).collect();
        let call = self.call(func, &args);
        (call, self.check_node(call, arg_types))
    }

    pub fn check_node(&self, call: NodeId, arg_types: &[DType]) -> CallCheckResult {
        registry().check_call(&self.cx(), &self.site(call, arg_types))
    }

    pub fn delegation(&self, call: NodeId, arg_types: &[DType]) -> DelegationCheck {
        registry().check_delegation(&self.cx(), &self.site(call, arg_types))
    }

    /// `Table{name: ty, ...}`.
    pub fn table(&self, fields: &[(&str, DType)]) -> DType {
        DType::table(fields.iter().map(|(name, ty)| (self.name(name), ty.clone())))
    }

    pub fn record(&self, fields: &[(&str, DType)]) -> DType {
        DType::record(fields.iter().map(|(name, ty)| (self.name(name), ty.clone())))
    }

    pub fn display(&self, ty: &DType) -> String {
        ty.display(&self.interner).to_string()
    }
}
