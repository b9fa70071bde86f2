//! Text description format for graphs.
//!
//! ```text
//! <directed 0|1> <weighted 0|1> <vertex count> <edge count>
//! <from> <to> [<weight>]
//! ...
//! ```
//!
//! Tokens are separated by any whitespace, so an edge may span lines. A `#`
//! starts a comment that runs to the end of the line. Weighted graphs need
//! exactly three tokens per edge, unweighted graphs exactly two.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::error::{GraphError, Result};
use crate::graph::{Graph, VertexId, Weight};

/// A token together with the 1-based line it came from.
#[derive(Debug, Clone, Copy)]
struct Token<'a> {
    line: usize,
    text: &'a str,
}

struct Tokens<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    last_line: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        let tokens: Vec<Token<'a>> = input
            .lines()
            .enumerate()
            .flat_map(|(i, raw)| {
                let content = raw.split_once('#').map_or(raw, |(before, _)| before);
                content
                    .split_whitespace()
                    .map(move |text| Token { line: i + 1, text })
            })
            .collect();
        let last_line = input.lines().count().max(1);
        Self {
            tokens,
            pos: 0,
            last_line,
        }
    }

    fn next_token(&mut self, what: &str) -> Result<Token<'a>> {
        let token = self
            .tokens
            .get(self.pos)
            .copied()
            .ok_or_else(|| GraphError::parse(self.last_line, format!("missing {what}")))?;
        self.pos += 1;
        Ok(token)
    }

    fn next_number<T: FromStr>(&mut self, what: &str) -> Result<(T, usize)> {
        let token = self.next_token(what)?;
        let value = token.text.parse::<T>().map_err(|_| {
            GraphError::parse(token.line, format!("invalid {what} `{}`", token.text))
        })?;
        Ok((value, token.line))
    }

    fn next_flag(&mut self, what: &str) -> Result<bool> {
        let token = self.next_token(what)?;
        match token.text {
            "0" => Ok(false),
            "1" => Ok(true),
            other => Err(GraphError::parse(
                token.line,
                format!("{what} flag must be 0 or 1, found `{other}`"),
            )),
        }
    }

    fn remaining(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }
}

/// Parse a graph description from a string.
///
/// # Errors
///
/// Returns [`GraphError::Parse`] with the offending line for malformed
/// headers, bad numbers, out-of-range endpoints, self-loops, duplicate
/// edges, or trailing tokens after the declared edges, and
/// [`GraphError::Allocation`] when the declared vertex count does not fit in
/// memory.
#[instrument(skip(input), fields(bytes = input.len()))]
pub fn parse_graph(input: &str) -> Result<Graph> {
    let mut tokens = Tokens::new(input);

    let directed = tokens.next_flag("directed")?;
    let weighted = tokens.next_flag("weighted")?;
    let (vertex_count, _) = tokens.next_number::<usize>("vertex count")?;
    let (edge_count, _) = tokens.next_number::<usize>("edge count")?;

    let mut graph = Graph::try_new(vertex_count, directed, weighted)?;

    for _ in 0..edge_count {
        let (from, line) = tokens.next_number::<VertexId>("edge source")?;
        let (to, _) = tokens.next_number::<VertexId>("edge target")?;
        let inserted = if weighted {
            let (weight, _) = tokens.next_number::<Weight>("edge weight")?;
            graph.add_weighted_edge(from, to, weight)
        } else {
            graph.add_edge(from, to)
        }
        .map_err(|e| GraphError::parse(line, e.to_string()))?;

        if !inserted {
            return Err(GraphError::parse(
                line,
                format!("duplicate edge {from} -> {to}"),
            ));
        }
    }

    if let Some(extra) = tokens.remaining() {
        return Err(GraphError::parse(
            extra.line,
            format!(
                "unexpected token `{}` after {edge_count} declared edges",
                extra.text
            ),
        ));
    }

    debug!(
        vertices = vertex_count,
        edges = edge_count,
        directed,
        weighted,
        "parsed graph description"
    );
    Ok(graph)
}

impl FromStr for Graph {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        parse_graph(s)
    }
}

impl Graph {
    /// Read and parse a graph description from any reader.
    ///
    /// # Errors
    ///
    /// [`GraphError::Io`] if reading fails, otherwise see [`parse_graph`].
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        parse_graph(&input)
    }

    /// Read and parse a graph description file.
    ///
    /// # Errors
    ///
    /// [`GraphError::Io`] if the file cannot be read, otherwise see
    /// [`parse_graph`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let input = fs::read_to_string(path)?;
        parse_graph(&input)
    }
}
