//! ---
//! sb_section: "03-logging"
//! sb_subsection: "module"
//! sb_type: "source"
//! sb_scope: "code"
//! sb_description: "Context-enriched logging macros."
//! sb_version: "v0.0.0-prealpha"
//! sb_owner: "tbd"
//! ---
/// Emit an informational log enriched with scenario context.
#[macro_export]
macro_rules! bench_info {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::INFO,
            scenario = ctx.scenario.unwrap_or(""),
            index = ctx.index.unwrap_or_default(),
            mode = ctx.mode.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {
        $crate::bench_info!(context = $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit a debug log enriched with scenario context.
#[macro_export]
macro_rules! bench_debug {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::DEBUG,
            scenario = ctx.scenario.unwrap_or(""),
            index = ctx.index.unwrap_or_default(),
            mode = ctx.mode.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {
        $crate::bench_debug!(context = $crate::LogContext::default(), $($arg)+)
    };
}

/// Emit an error log enriched with scenario context.
#[macro_export]
macro_rules! bench_error {
    (context = $ctx:expr, $($arg:tt)+) => {{
        let ctx = &$ctx;
        tracing::event!(
            tracing::Level::ERROR,
            scenario = ctx.scenario.unwrap_or(""),
            index = ctx.index.unwrap_or_default(),
            mode = ctx.mode.unwrap_or(""),
            message = %format_args!($($arg)+)
        );
    }};
    ($($arg:tt)+) => {
        $crate::bench_error!(context = $crate::LogContext::default(), $($arg)+)
    };
}
