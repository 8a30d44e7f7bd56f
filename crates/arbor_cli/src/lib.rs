//! Command-line interface for Arbor.
//!
//! This crate provides:
//! - [`Cli`] - Argument definitions for the `arbor` binary
//! - [`process`] - Source text in, rewritten text (or JSON tree) out
//! - [`logging`] - Stderr logging setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use arbor_foundation::{Error, ErrorKind, Result};
use arbor_syntax::visitor::{NodeCounter, walk_node};
use arbor_syntax::{Node, PrettyConfig};
use arbor_transform::features::DEFAULT_GUARD;
use arbor_transform::{
    BoxedFilter, FeatureSet, GenerateConfig, Source, generate_with_config, transform,
};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

/// Output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// JavaScript source.
    Js,
    /// The syntax tree as JSON.
    Ast,
}

/// Strip feature-guarded dead branches from JavaScript.
#[derive(Debug, Parser)]
#[command(name = "arbor", version, about)]
pub struct Cli {
    /// Input file; reads stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Output file; writes stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Features to treat as present
    #[arg(short, long, value_delimiter = ',')]
    pub enable: Vec<String>,

    /// Features to treat as absent
    #[arg(short, long, value_delimiter = ',')]
    pub disable: Vec<String>,

    /// Treat features that are neither enabled nor disabled as absent
    #[arg(long)]
    pub strict: bool,

    /// Name of the guard function
    #[arg(long, default_value = DEFAULT_GUARD)]
    pub guard: String,

    /// Skip dead-branch elimination
    #[arg(long)]
    pub no_prune: bool,

    /// Drop empty statements and blocks before printing
    #[arg(short, long)]
    pub minify: bool,

    /// Indented output, one statement per line
    #[arg(short, long)]
    pub beautify: bool,

    /// Spaces per indentation level when beautifying
    #[arg(long, default_value_t = 4)]
    pub indent: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Js)]
    pub emit: Emit,

    /// Read the input as a JSON tree instead of JavaScript
    #[arg(long)]
    pub from_ast: bool,

    /// Log filter, e.g. `debug` or `arbor_transform=trace` (default: `RUST_LOG`, then `warn`)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Disable ANSI colors on stderr
    #[arg(long)]
    pub no_color: bool,
}

impl Cli {
    /// Feature set described by the flags.
    #[must_use]
    pub fn features(&self) -> FeatureSet {
        let features = FeatureSet::new()
            .with_guard(self.guard.as_str())
            .with_enabled(&self.enable)
            .with_disabled(&self.disable);
        if self.strict {
            features.strict()
        } else {
            features
        }
    }

    /// Code generation settings described by the flags.
    #[must_use]
    pub fn generate_config(&self) -> GenerateConfig {
        let pretty = if self.beautify {
            PrettyConfig::beautified().with_indent_width(self.indent)
        } else {
            PrettyConfig::compact()
        };
        GenerateConfig::compact()
            .with_minify(self.minify)
            .with_pretty(pretty)
    }

    fn input_name(&self) -> String {
        match &self.input {
            Some(path) if path.as_os_str() != "-" => path.display().to_string(),
            _ => "<stdin>".to_string(),
        }
    }
}

/// Rewrites `input` as the flags describe and returns the output text.
///
/// # Errors
///
/// Returns parse, structural, and serialization errors.
pub fn process(cli: &Cli, input: &str) -> Result<String> {
    let source = if cli.from_ast {
        let tree: Node = serde_json::from_str(input).map_err(Error::serialization)?;
        Source::Tree(tree)
    } else {
        Source::Text(input)
    };

    let features = cli.features();
    let filters: Vec<BoxedFilter<'_>> = if cli.no_prune {
        Vec::new()
    } else {
        vec![features.filter()]
    };
    let tree = transform(source, &filters)?;

    let mut counter = NodeCounter::default();
    walk_node(&mut counter, &tree);
    debug!(nodes = counter.total, "transformed tree");

    match cli.emit {
        Emit::Js => generate_with_config(&tree, &cli.generate_config()),
        Emit::Ast if cli.beautify => {
            serde_json::to_string_pretty(&tree).map_err(Error::serialization)
        }
        Emit::Ast => serde_json::to_string(&tree).map_err(Error::serialization),
    }
}

/// Reads the input, processes it, and writes the output.
///
/// # Errors
///
/// Returns I/O errors and everything [`process`] returns. Errors carry the
/// input name as their source.
pub fn run(cli: &Cli) -> Result<()> {
    let name = cli.input_name();
    info!(input = %name, "reading");

    let input = match &cli.input {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)?,
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut output = process(cli, &input).map_err(|e| with_source(e, &name))?;
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &cli.output {
        Some(path) => fs::write(path, output)?,
        None => io::stdout().write_all(output.as_bytes())?,
    }
    Ok(())
}

fn with_source(mut error: Error, name: &str) -> Error {
    let context = error.context.take().unwrap_or_default().with_source(name);
    error.with_context(context)
}

/// Formats an error for the terminal, with the offending line and a caret
/// under the column for parse errors.
#[must_use]
pub fn render_error(error: &Error) -> String {
    let mut out = error.to_string();
    if let ErrorKind::ParseError {
        column, context, ..
    } = &error.kind
    {
        let pad = " ".repeat(usize::try_from(*column).unwrap_or(1).saturating_sub(1));
        let _ = write!(out, "\n  {context}\n  {pad}^");
    }
    if let Some(context) = &error.context {
        let _ = write!(out, "\n{context}");
    }
    out.trim_end().to_string()
}
