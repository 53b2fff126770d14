use std::sync::Once;

use time::format_description::well_known::Iso8601;
use tracing_subscriber::{
    fmt::{format::Pretty, time::UtcTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use tracing_web::{performance_layer, MakeWebConsoleWriter};

/// Routes tracing events to the browser console. Guarded by a Once so the
/// page and worker entry points can both call it without panicking on the
/// second init
pub fn configure_tracing_once() {
    static ONCE: Once = Once::new();

    ONCE.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            // ANSI escapes are only partially supported across browser consoles
            .with_ansi(false)
            // std::time is unavailable in wasm
            .with_timer(UtcTime::new(Iso8601::DEFAULT))
            .with_writer(MakeWebConsoleWriter::new());

        let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

        tracing_subscriber::registry().with(fmt_layer).with(perf_layer).init();
    });
}
