// ABOUTME: Tokenizer for the template directive language
// ABOUTME: Splits template text into literal spans, variable tags and block open/close tags

use super::error::{Result, TemplateError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    If,
    Each,
}

impl BlockKind {
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::If => "if",
            BlockKind::Each => "each",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(BlockKind::If),
            "each" => Some(BlockKind::Each),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind<'t> {
    Text(&'t str),
    Variable(&'t str),
    Open { kind: BlockKind, path: &'t str },
    Close(BlockKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'t> {
    pub kind: TokenKind<'t>,
    /// Byte offset of the token in the source text
    pub offset: usize,
}

/// Split `source` into a flat token stream.
///
/// A `{{` that is never closed is kept as literal text.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let Some(open) = source[pos..].find("{{").map(|i| pos + i) else {
            tokens.push(Token {
                kind: TokenKind::Text(&source[pos..]),
                offset: pos,
            });
            break;
        };
        let Some(close) = source[open + 2..].find("}}").map(|i| open + 2 + i) else {
            tokens.push(Token {
                kind: TokenKind::Text(&source[pos..]),
                offset: pos,
            });
            break;
        };
        // A tag body never contains `{{`, so an earlier `{{` is literal text
        let open = match source[open + 2..close].rfind("{{") {
            Some(inner) => open + 2 + inner,
            None => open,
        };

        if open > pos {
            tokens.push(Token {
                kind: TokenKind::Text(&source[pos..open]),
                offset: pos,
            });
        }

        let kind = classify(source[open + 2..close].trim(), source, open)?;
        tokens.push(Token { kind, offset: open });
        pos = close + 2;
    }

    Ok(tokens)
}

fn classify<'t>(tag: &'t str, source: &str, offset: usize) -> Result<TokenKind<'t>> {
    if tag.is_empty() {
        return Err(TemplateError::parse("empty tag '{{}}'", source, offset));
    }

    if let Some(rest) = tag.strip_prefix('#') {
        let rest = rest.trim_start();
        let (keyword, path) = match rest.split_once(char::is_whitespace) {
            Some((keyword, path)) => (keyword, path.trim()),
            None => (rest, ""),
        };
        let kind = BlockKind::from_keyword(keyword).ok_or_else(|| {
            TemplateError::parse(
                format!("unsupported block directive '{{{{#{}}}}}'", keyword),
                source,
                offset,
            )
        })?;
        if path.is_empty() {
            return Err(TemplateError::parse(
                format!("'{{{{#{}}}}}' requires a path", keyword),
                source,
                offset,
            ));
        }
        check_path(path, source, offset)?;
        return Ok(TokenKind::Open { kind, path });
    }

    if let Some(rest) = tag.strip_prefix('/') {
        let keyword = rest.trim();
        return BlockKind::from_keyword(keyword)
            .map(TokenKind::Close)
            .ok_or_else(|| {
                TemplateError::parse(
                    format!("unsupported closing tag '{{{{/{}}}}}'", keyword),
                    source,
                    offset,
                )
            });
    }

    if tag == "else" {
        return Err(TemplateError::parse(
            "'{{else}}' branches are not supported",
            source,
            offset,
        ));
    }

    check_path(tag, source, offset)?;
    Ok(TokenKind::Variable(tag))
}

fn check_path(path: &str, source: &str, offset: usize) -> Result<()> {
    let valid = path.split('.').all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '@' | '$'))
    });

    if valid {
        Ok(())
    } else {
        Err(TemplateError::parse(
            format!("invalid path '{}'", path),
            source,
            offset,
        ))
    }
}
