//! Path alias rewriting for renamed installs
//!
//! Installed sources import each other through the `@/identityuser` path
//! alias. When the install folder gets a suffix, every alias token in the
//! copied text files has to point at the new folder instead.
//!
//! A token is only rewritten when it stands alone: followed by the end of
//! the text, a `/`, or any character that cannot continue an identifier.
//! `@/identityuser2` and `@/identityuser-extra` are left as they are, which
//! also makes a second pass with the same target a no-op.

use crate::error::{IoContext, Result};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Prefix every alias reference starts with
pub const ALIAS_PREFIX: &str = "@/";

/// Extensions opened as text during a rewrite; everything else is skipped
pub const TEXT_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "json", "md"];

/// Matches `@/<from>` alias tokens and replaces them with `@/<to>`
#[derive(Debug, Clone)]
pub struct AliasRewriter {
    token: String,
    replacement: String,
}

impl AliasRewriter {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            token: format!("{}{}", ALIAS_PREFIX, from),
            replacement: format!("{}{}", ALIAS_PREFIX, to),
        }
    }

    /// Byte offsets of every standalone alias token in `text`
    pub fn find_tokens(&self, text: &str) -> Vec<usize> {
        text.match_indices(&self.token)
            .filter(|(start, _)| is_token_end(&text[start + self.token.len()..]))
            .map(|(start, _)| start)
            .collect()
    }

    /// Rewrite all standalone tokens, borrowing when nothing matched
    pub fn rewrite<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let starts = self.find_tokens(text);
        if starts.is_empty() {
            return Cow::Borrowed(text);
        }

        let mut out = String::with_capacity(text.len() + starts.len() * self.replacement.len());
        let mut last = 0;
        for start in starts {
            out.push_str(&text[last..start]);
            out.push_str(&self.replacement);
            last = start + self.token.len();
        }
        out.push_str(&text[last..]);
        Cow::Owned(out)
    }
}

/// True when the text following a candidate token does not extend it
fn is_token_end(rest: &str) -> bool {
    match rest.chars().next() {
        None => true,
        Some(c) => !(c.is_ascii_alphanumeric() || c == '_' || c == '-'),
    }
}

/// Check whether a file is eligible for alias rewriting by extension
pub fn is_text_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    matches!(ext.as_deref(), Some(e) if TEXT_EXTENSIONS.contains(&e))
}

/// Rewrite alias references in every text file under `root`
///
/// Returns the number of files whose content changed. Files outside the
/// extension allow-list are never opened.
pub fn rewrite_alias_references(root: &Path, from: &str, to: &str) -> Result<usize> {
    let rewriter = AliasRewriter::new(from, to);
    let mut changed = 0;

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_text_file(entry.path()) {
            continue;
        }

        let path = entry.path();
        let content = fs::read_to_string(path).io_context("read", path)?;
        if let Cow::Owned(updated) = rewriter.rewrite(&content) {
            fs::write(path, updated).io_context("write", path)?;
            debug!("Rewrote imports in {}", path.display());
            changed += 1;
        }
    }

    Ok(changed)
}
