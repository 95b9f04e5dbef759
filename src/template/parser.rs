// ABOUTME: Recursive-descent parser turning the token stream into a block tree
// ABOUTME: Matches if/each openers with their closers innermost-first and reports unbalanced tags

use super::error::{Position, Result, TemplateError};
use super::lexer::{tokenize, BlockKind, Token, TokenKind};

/// Deepest block nesting a template may use
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Variable(String),
    If { path: String, body: Vec<Node> },
    Each { path: String, body: Vec<Node> },
}

/// A parsed template body, ready to be rendered any number of times
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    nodes: Vec<Node>,
}

struct OpenBlock<'t> {
    kind: BlockKind,
    path: &'t str,
    offset: usize,
}

struct Parser<'t> {
    source: &'t str,
    tokens: std::vec::IntoIter<Token<'t>>,
}

impl Template {
    /// Parse template text. Every `{{#if}}`/`{{#each}}` must be closed by the
    /// matching `{{/if}}`/`{{/each}}` in the same scope.
    pub fn parse(source: &str) -> Result<Self> {
        let mut parser = Parser {
            source,
            tokens: tokenize(source)?.into_iter(),
        };
        let nodes = parser.parse_nodes(None, 0)?;
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True when the template contains at least one `if` or `each` block
    pub fn has_blocks(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, Node::If { .. } | Node::Each { .. }))
    }
}

impl<'t> Parser<'t> {
    fn parse_nodes(&mut self, open: Option<OpenBlock<'t>>, depth: usize) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();

        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::Text(text) => nodes.push(Node::Text(text.to_string())),
                TokenKind::Variable(path) => nodes.push(Node::Variable(path.to_string())),
                TokenKind::Open { kind, path } => {
                    if depth >= MAX_DEPTH {
                        return Err(TemplateError::parse(
                            format!(
                                "'{{{{#{} {}}}}}' nests blocks deeper than {} levels",
                                kind.keyword(),
                                path,
                                MAX_DEPTH
                            ),
                            self.source,
                            token.offset,
                        ));
                    }
                    let body = self.parse_nodes(
                        Some(OpenBlock {
                            kind,
                            path,
                            offset: token.offset,
                        }),
                        depth + 1,
                    )?;
                    let path = path.to_string();
                    nodes.push(match kind {
                        BlockKind::If => Node::If { path, body },
                        BlockKind::Each => Node::Each { path, body },
                    });
                }
                TokenKind::Close(kind) => {
                    return match open {
                        Some(block) if block.kind == kind => Ok(nodes),
                        Some(block) => Err(TemplateError::parse(
                            format!(
                                "'{{{{/{}}}}}' does not close '{{{{#{} {}}}}}' opened at {}",
                                kind.keyword(),
                                block.kind.keyword(),
                                block.path,
                                Position::locate(self.source, block.offset)
                            ),
                            self.source,
                            token.offset,
                        )),
                        None => Err(TemplateError::parse(
                            format!("'{{{{/{}}}}}' has no matching opener", kind.keyword()),
                            self.source,
                            token.offset,
                        )),
                    };
                }
            }
        }

        match open {
            Some(block) => Err(TemplateError::parse(
                format!(
                    "'{{{{#{} {}}}}}' is never closed by '{{{{/{}}}}}'",
                    block.kind.keyword(),
                    block.path,
                    block.kind.keyword()
                ),
                self.source,
                block.offset,
            )),
            None => Ok(nodes),
        }
    }
}
