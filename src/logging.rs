//! Structured logging with per-context field redaction.

use std::collections::BTreeSet;
use std::fmt;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Rendered in place of any masked field value.
pub const MASKED_VALUE: &str = "***";

/// Installs the global subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "matrix_provider=debug,warn"
    } else {
        "matrix_provider=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();
}

/// Named fields attached to log output, some of them masked.
///
/// Contexts are immutable: adding a field or a mask returns a derived context.
/// Masks are inherited by every derived context and cannot be lifted. Values
/// read back through [`LogContext::value`] are already masked, so whatever
/// records them (span fields, event fields) never sees the literal.
#[derive(Clone, Default)]
pub struct LogContext {
    fields: Vec<(String, String)>,
    masked: BTreeSet<String>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        let mut next = self.clone();
        match next.fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = value,
            None => next.fields.push((key, value)),
        }
        next
    }

    pub fn mask_field_values_with_keys<I, S>(&self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        next.masked.extend(keys.into_iter().map(Into::into));
        next
    }

    pub fn is_masked(&self, key: &str) -> bool {
        self.masked.contains(key)
    }

    /// Value to record for `key`, or [`MASKED_VALUE`] when the key is masked.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(key, value)| if self.is_masked(key) { MASKED_VALUE } else { value.as_str() })
    }

    /// Renders the fields as space-separated `key=value` pairs.
    pub fn render(&self) -> String {
        self.fields
            .iter()
            .filter_map(|(key, _)| self.value(key).map(|value| format!("{key}={value}")))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Debug for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogContext")
            .field("fields", &format_args!("{}", self.render()))
            .field("masked", &self.masked)
            .finish()
    }
}
