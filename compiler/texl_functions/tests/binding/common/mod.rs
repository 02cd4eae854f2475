//! Shared harness: an arena, an interner and a catalog for one binding pass.

use std::sync::OnceLock;

use texl_functions::{
    init_tracing, CallCheckResult, CallSite, CheckContext, DataSourceInfo, DelegationCapability,
    DelegationCheck, FunctionRegistry, RecordingTelemetry, StaticCatalog, TelemetrySink,
};
use texl_ir::{NodeArena, NodeId, NodeKind, Span, StringInterner};
use texl_types::{DType, DataSourceId, Features};

pub const ACCOUNTS: DataSourceId = DataSourceId::new(1);

/// The builtin registry, shared by every test in the binary.
pub fn registry() -> &'static FunctionRegistry {
    static REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(FunctionRegistry::builtins)
}

pub struct Harness {
    pub features: Features,
    pub interner: StringInterner,
    pub arena: NodeArena,
    pub catalog: StaticCatalog,
    pub telemetry: RecordingTelemetry,
    offset: u32,
}

impl Harness {
    pub fn new(features: Features) -> Self {
        init_tracing();
        Harness {
            features,
            interner: StringInterner::new(),
            arena: NodeArena::new(),
            catalog: StaticCatalog::new(),
            telemetry: RecordingTelemetry::new(),
            offset: 0,
        }
    }

    /// Register `Accounts` as a connected source delegating `capabilities`.
    pub fn connect_accounts(&mut self, capabilities: DelegationCapability) {
        self.catalog
            .insert(ACCOUNTS, DataSourceInfo::connected("Accounts", capabilities));
    }

    /// `Accounts` as a table type: `Table{Name: Text, Rating: Number}`.
    pub fn accounts(&self) -> DType {
        self.table(&[("Name", DType::STRING), ("Rating", DType::NUMBER)])
            .with_source(ACCOUNTS)
    }

    pub fn node(&mut self, kind: NodeKind) -> NodeId {
        let start = self.offset;
        self.offset += 8;
        self.arena.alloc(kind, Span::new(start, start + 7))
    }

    pub fn ident(&mut self, name: &str) -> NodeId {
        let name = self.interner.intern(name);
        self.node(NodeKind::FirstName(name))
    }

    pub fn call(&mut self, func: &str, args: &[NodeId]) -> NodeId {
        let func = self.interner.intern(func);
        self.node(NodeKind::Call {
            namespace: None,
            func,
            args: args.iter().copied().collect(),
        })
    }

    /// `func(v0, v1, ...)` with one placeholder node per argument type.
    pub fn call_with(&mut self, func: &str, arg_types: &[DType]) -> NodeId {
        let args: Vec<NodeId> = arg_types.iter().map(|_| self.node(NodeKind::NumLit)).collect();
        self.call(func, &args)
    }

    pub fn arg(&self, call: NodeId, index: usize) -> NodeId {
        self.arena.call_args(call)[index]
    }

    pub fn cx(&self) -> CheckContext<'_> {
        self.cx_with(&self.telemetry)
    }

    pub fn cx_with<'a>(&'a self, telemetry: &'a dyn TelemetrySink) -> CheckContext<'a> {
        CheckContext::new(&self.features, &self.interner, &self.arena)
            .with_catalog(&self.catalog)
            .with_telemetry(telemetry)
    }

    pub fn site<'a>(&'a self, call: NodeId, arg_types: &'a [DType]) -> CallSite<'a> {
        CallSite::new(call, self.arena.call_args(call), arg_types)
    }

    pub fn check(&mut self, func: &str, arg_types: &[DType]) -> (NodeId, CallCheckResult) {
        let call = self.call_with(func, arg_types);
        let result = registry().check_call(&self.cx(), &self.site(call, arg_types));
        (call, result)
    }

    pub fn delegation(&self, call: NodeId, arg_types: &[DType]) -> DelegationCheck {
        registry().check_delegation(&self.cx(), &self.site(call, arg_types))
    }

    pub fn table(&self, fields: &[(&str, DType)]) -> DType {
        DType::table(fields.iter().map(|(name, ty)| (self.interner.intern(name), ty.clone())))
    }

    pub fn record(&self, fields: &[(&str, DType)]) -> DType {
        DType::record(fields.iter().map(|(name, ty)| (self.interner.intern(name), ty.clone())))
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(Features::default())
    }
}
