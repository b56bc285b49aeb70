/// Output formatting: table, JSON and YAML rendering of catalog resources.
///
/// Every command goes through [`print`] or [`print_one`]. Output is encoded in
/// full before anything is written, so a serialization failure never leaves a
/// partial document on stdout.
use std::io::{self, Write};

use comfy_table::{Table, presets::ASCII_FULL_CONDENSED};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::args::OutputFormat;
use crate::types::{ErrorOutput, Product, Release, ReleaseDependency, UserGroup};

/// Errors raised while encoding or writing output.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),

    /// A format name outside `table`, `json`, `yaml`.
    #[error("Unknown output format '{0}' (expected one of: table, json, yaml)")]
    UnknownFormat(String),
}

/// Output context passed to all commands.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// When true, emit per-step timings as debug events.
    pub debug: bool,
}

impl OutputCtx {
    #[must_use]
    pub fn new(format: OutputFormat, debug: bool) -> Self {
        Self { format, debug }
    }

    /// Start a named debug timer. Reports elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

/// Per-kind table layout: fixed header labels plus one cell per label.
pub trait TableRow {
    const HEADER: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

impl TableRow for Product {
    const HEADER: &'static [&'static str] = &["ID", "Slug", "Name"];

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.slug.clone(), self.name.clone()]
    }
}

impl TableRow for Release {
    const HEADER: &'static [&'static str] = &["ID", "Version", "Description"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.version.clone(),
            self.description.clone(),
        ]
    }
}

impl TableRow for UserGroup {
    const HEADER: &'static [&'static str] = &["ID", "Name", "Description"];

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone(), self.description.clone()]
    }
}

impl TableRow for ReleaseDependency {
    const HEADER: &'static [&'static str] = &["ID", "Version", "Product ID", "Product Slug"];

    fn row(&self) -> Vec<String> {
        vec![
            self.release.id.to_string(),
            self.release.version.clone(),
            self.release.product.id.to_string(),
            self.release.product.slug.clone(),
        ]
    }
}

// --- Rendering ---

/// Encode a whole collection in the selected format.
///
/// # Errors
///
/// Returns `RenderError::Json` / `RenderError::Yaml` if serialization fails.
pub fn render<T: Serialize + TableRow>(
    items: &[T],
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(items)),
        OutputFormat::Json => render_json(items),
        OutputFormat::Yaml => render_yaml(items),
    }
}

/// Encode a single resource: a one-row table, or a JSON/YAML object.
///
/// # Errors
///
/// Returns `RenderError::Json` / `RenderError::Yaml` if serialization fails.
pub fn render_one<T: Serialize + TableRow>(
    item: &T,
    format: OutputFormat,
) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(std::slice::from_ref(item))),
        OutputFormat::Json => render_json(item),
        OutputFormat::Yaml => render_yaml(item),
    }
}

/// Render a collection and write it to stdout.
///
/// # Errors
///
/// Returns `RenderError` if encoding or writing fails; nothing is written on
/// an encoding failure.
pub fn print<T: Serialize + TableRow>(items: &[T], format: OutputFormat) -> Result<(), RenderError> {
    debug!(count = items.len(), %format, "rendering collection");
    write_stdout(&render(items, format)?)
}

/// Render a single resource and write it to stdout.
///
/// # Errors
///
/// Same as [`print`].
pub fn print_one<T: Serialize + TableRow>(item: &T, format: OutputFormat) -> Result<(), RenderError> {
    write_stdout(&render_one(item, format)?)
}

fn render_table<T: TableRow>(items: &[T]) -> String {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL_CONDENSED);
    table.set_header(T::HEADER.to_vec());
    for item in items {
        table.add_row(item.row());
    }
    format!("{table}\n")
}

fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let mut s = serde_json::to_string(value)?;
    s.push('\n');
    Ok(s)
}

fn render_yaml<T: Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    let body = serde_yaml::to_string(value)?;
    let mut s = format!("---\n{body}");
    if !s.ends_with('\n') {
        s.push('\n');
    }
    Ok(s)
}

fn write_stdout(s: &str) -> Result<(), RenderError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(s.as_bytes())?;
    out.flush()?;
    Ok(())
}

// --- Error output ---

/// Write a structured error to stderr, encoded to match the selected format.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Yaml => {
            let s = serde_yaml::to_string(err).unwrap_or_default();
            let _ = write!(out, "---\n{s}");
        }
        OutputFormat::Table => {
            let _ = writeln!(out, "Error: {}", err.error.message);
            if let Some(suggestions) = &err.error.suggestions {
                let _ = writeln!(out, "  Did you mean:");
                for s in suggestions {
                    let _ = writeln!(out, "    {s}");
                }
            }
        }
    }
}

// --- Debug timer ---

/// A RAII timer that reports elapsed milliseconds as a debug event on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            debug!(step = self.label, elapsed_ms = ms, "timing");
        }
    }
}
