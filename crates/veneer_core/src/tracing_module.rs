//! Tracing and observability module.
//!
//! # Lifecycle
//!
//! - **`build()`** attaches [`TracingConfig`] as an extension so other
//!   modules can read the intended configuration.
//! - **`ready()`** installs the subscriber. Deferring this to the ready phase
//!   lets other modules adjust settings first.

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use veneer_interop::{BindingModule, BindingsBuilder};

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing configuration, readable from the finished bindings.
///
/// ```
/// use veneer_core::{TracingConfig, TracingModule};
/// use veneer_interop::Bindings;
/// use tracing::Level;
///
/// let bindings = Bindings::builder()
///     .add_modules(TracingModule::new().with_level(Level::DEBUG))
///     .finish()
///     .unwrap();
///
/// let config = bindings.extension::<TracingConfig>().unwrap();
/// if config.level >= Level::DEBUG {
///     tracing::debug!("cast tracing enabled");
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Maximum log level.
    pub level: Level,
    /// Output format.
    pub format: TracingFormat,
    /// Target-specific filter (`veneer_interop=trace,...`), if any.
    pub env_filter: Option<String>,
    /// Whether span enter/exit events are logged.
    pub span_events: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingModule
// ─────────────────────────────────────────────────────────────────────────────

/// Configures the `tracing` subscriber.
///
/// Construction and cast decisions are logged at `debug`, rejected downcasts
/// at `warn`, and every property read, write or call at `trace`:
///
/// ```
/// use veneer_core::{TracingFormat, TracingModule};
/// use tracing::Level;
///
/// // Development: every marshalled property access.
/// let dev = TracingModule::default()
///     .with_format(TracingFormat::Pretty)
///     .with_env_filter("veneer_interop=trace");
///
/// // Production: JSON, casts and construction only.
/// let prod = TracingModule::default()
///     .with_level(Level::DEBUG)
///     .with_format(TracingFormat::Json);
/// ```
///
/// Installing a subscriber is a no-op if one is already set, so several
/// bindings can be built in one process.
#[derive(Debug, Clone)]
pub struct TracingModule {
    level: Level,
    format: TracingFormat,
    env_filter: Option<String>,
    span_events: bool,
}

impl Default for TracingModule {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingModule {
    /// Creates a module with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a target-specific filter, `target=level,target=level,...`.
    ///
    /// An unparsable filter falls back to the configured level.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    fn config(&self) -> TracingConfig {
        TracingConfig {
            level: self.level,
            format: self.format,
            env_filter: self.env_filter.clone(),
            span_events: self.span_events,
        }
    }
}

fn install(config: &TracingConfig) {
    let env_filter = match &config.env_filter {
        Some(filter) => {
            EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(config.level.as_str()))
        }
        None => EnvFilter::new(config.level.as_str()),
    };

    let span_events = if config.span_events {
        FmtSpan::ENTER | FmtSpan::EXIT
    } else {
        FmtSpan::NONE
    };

    // try_init fails if a global subscriber is already set.
    match config.format {
        TracingFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
        TracingFormat::Compact => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
        TracingFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
    }
}

impl BindingModule for TracingModule {
    fn build(&self, builder: &mut BindingsBuilder) {
        builder.insert_extension(self.config());
    }

    fn ready(&self, builder: &mut BindingsBuilder) {
        // Another module may have replaced the configuration during build.
        let config = builder
            .extension::<TracingConfig>()
            .cloned()
            .unwrap_or_else(|| self.config());
        install(&config);

        tracing::info!(
            level = %config.level,
            format = ?config.format,
            "TracingModule initialized"
        );
    }
}
