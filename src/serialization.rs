//! JSON export and import of code blocks
//!
//! Export writes each line as a list of `{ text, highlightType }` tokens.
//! Import only trusts the text: tokens are rebuilt by tokenizing the joined
//! lines with the stored language, so stale or foreign `highlightType`
//! values never reach the block.

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::CodeBlock;
use crate::syntax::{Line, Token};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedToken {
    pub text: String,
    pub highlight_type: Option<String>,
}

impl From<&Token> for SerializedToken {
    fn from(token: &Token) -> Self {
        Self {
            text: token.text.clone(),
            highlight_type: token.class.map(|c| c.as_str().to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedCodeBlock {
    #[serde(default = "format_version")]
    pub version: u32,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub lines: Vec<Vec<SerializedToken>>,
}

fn format_version() -> u32 {
    FORMAT_VERSION
}

impl SerializedCodeBlock {
    /// Source text: token text joined, lines separated by `\n`
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().map(|t| t.text.as_str()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn export_block(block: &CodeBlock) -> SerializedCodeBlock {
    SerializedCodeBlock {
        version: FORMAT_VERSION,
        language: block.language().map(str::to_owned),
        lines: block
            .lines()
            .iter()
            .map(|line: &Line| line.tokens.iter().map(SerializedToken::from).collect())
            .collect(),
    }
}

pub fn import_block(data: &SerializedCodeBlock) -> CodeBlock {
    if data.version != FORMAT_VERSION {
        tracing::warn!(
            version = data.version,
            expected = FORMAT_VERSION,
            "importing code block with unknown format version"
        );
    }
    CodeBlock::from_text(&data.text(), data.language.as_deref())
}

pub fn to_json(block: &CodeBlock) -> anyhow::Result<String> {
    serde_json::to_string_pretty(&export_block(block)).context("Failed to serialize code block")
}

pub fn from_json(json: &str) -> anyhow::Result<CodeBlock> {
    let data: SerializedCodeBlock =
        serde_json::from_str(json).context("Failed to parse code block JSON")?;
    Ok(import_block(&data))
}
