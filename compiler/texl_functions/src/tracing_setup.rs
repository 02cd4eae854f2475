use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times, and a no-op if
/// the host already installed a subscriber.
/// Enable with `TEXL_LOG=texl_functions=debug` (or `RUST_LOG`); `trace`
/// shows every protocol phase of every call-site check as a tree.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        let Some(directives) = std::env::var("TEXL_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()
        else {
            return;
        };
        let layer = tracing_tree::HierarchicalLayer::new(2)
            .with_targets(true)
            .with_bracketed_fields(true);
        let _ = tracing_subscriber::registry()
            .with(EnvFilter::new(directives))
            .with(layer)
            .try_init();
    });
}
