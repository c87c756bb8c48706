//! Command-line interface for the codeblock binary
//!
//! Supports:
//! - Printing the tokens of a file or stdin
//! - Exporting a tokenized block as JSON
//! - Importing exported JSON back to source text
//! - Listing the supported languages

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::EditorConfig;
use crate::model::{CodeBlock, LineBounds, NodeTree};
use crate::serialization;
use crate::syntax::LanguageId;

/// Tokenize code blocks
#[derive(Parser, Debug)]
#[command(name = "codeblock", version, about = "Tokenize code blocks")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,

    /// Config file (defaults to ~/.config/codeblock/config.yaml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print each line's tokens
    Tokenize {
        /// Source file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Language identifier (defaults to the file extension, then the config)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// Export a tokenized block as JSON
    Export {
        /// Source file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,

        /// Language identifier (defaults to the file extension, then the config)
        #[arg(short, long)]
        language: Option<String>,

        /// Write JSON here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Read exported JSON and print the block's source text
    Import {
        /// JSON file, or `-` for stdin
        #[arg(value_name = "FILE", default_value = "-")]
        input: PathBuf,
    },

    /// List languages with syntax highlighting
    Languages,
}

impl CliArgs {
    pub fn load_config(&self) -> EditorConfig {
        match &self.config {
            Some(path) => EditorConfig::load_from(path),
            None => EditorConfig::load(),
        }
    }
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a file, or stdin for `-`
pub fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Language for a source file: explicit flag, then extension, then config
pub fn resolve_language(
    explicit: Option<&str>,
    path: &Path,
    config: &EditorConfig,
) -> Option<String> {
    if let Some(language) = explicit {
        return Some(language.to_string());
    }
    let from_extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| LanguageId::from_name(ext).has_highlighting());
    from_extension
        .map(str::to_string)
        .or_else(|| config.default_language.clone())
}

/// One line of `tokenize` output: `class:"text"` per token, `-` for plain
pub fn format_line(block: &CodeBlock, bounds: &LineBounds) -> String {
    bounds
        .tokens
        .iter()
        .filter_map(|&key| block.token(key))
        .map(|t| format!("{}:{:?}", t.class.map_or("-", |c| c.as_str()), t.text))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute a parsed command, writing results to `out`
pub fn run(args: &CliArgs, out: &mut impl Write) -> Result<()> {
    let config = args.load_config();

    match &args.command {
        CliCommand::Tokenize { input, language } => {
            let text = read_input(input)?;
            let language = resolve_language(language.as_deref(), input, &config);
            let block = CodeBlock::from_text(&text, language.as_deref());
            let lines = block.all_line_bounds();
            let line_count = lines.len();
            tracing::info!(
                language = %block.language_id(),
                lines = line_count,
                "Tokenized {}",
                input.display()
            );

            let width = (line_count + config.gutter_start).to_string().len();
            for (line, bounds) in lines.iter().enumerate() {
                writeln!(
                    out,
                    "{:>width$}  {}",
                    line + config.gutter_start,
                    format_line(&block, bounds)
                )?;
            }
        }

        CliCommand::Export {
            input,
            language,
            output,
        } => {
            let text = read_input(input)?;
            let language = resolve_language(language.as_deref(), input, &config);
            let block = CodeBlock::from_text(&text, language.as_deref());
            let json = serialization::to_json(&block)?;

            match output {
                Some(path) => {
                    std::fs::write(path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!("Exported code block to {}", path.display());
                }
                None => writeln!(out, "{}", json)?,
            }
        }

        CliCommand::Import { input } => {
            let json = read_input(input)?;
            let block = serialization::from_json(&json)
                .with_context(|| format!("Invalid code block in {}", input.display()))?;
            writeln!(out, "{}", block.text())?;
        }

        CliCommand::Languages => {
            for language in LanguageId::HIGHLIGHTED {
                writeln!(out, "{:<12}{}", language.name(), language.display_name())?;
            }
        }
    }

    Ok(())
}
