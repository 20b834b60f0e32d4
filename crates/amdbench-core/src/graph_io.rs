//! Line-based text format shared with the AMD executables.
//!
//! ```text
//! V E
//! u v w
//! u v w
//! ```
//!
//! The first line holds the vertex and edge counts; each following line is
//! one edge as source, target and weight. Only integers appear and there are
//! no comments.
//!
//! Reading is lenient about edge lines: a line that does not parse, or that
//! would break a [`Graph`] invariant, is skipped and reported as a
//! [`LineDiagnostic`]. Only a missing or malformed header is fatal, since the
//! vertex count cannot be recovered without it.
use std::fmt;
use std::io::Write;

use crate::graph::{Edge, Graph, check_edge};

/// Renders a [`Graph`] in the text format.
struct Text<'a>(&'a Graph);

impl fmt::Display for Text<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.0.vertex_count(), self.0.edge_count())?;
        for edge in self.0.edges() {
            writeln!(f, "{} {} {}", edge.source, edge.target, edge.weight)?;
        }
        Ok(())
    }
}

/// Writes `graph` in the text format.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_graph<W: Write>(writer: &mut W, graph: &Graph) -> std::io::Result<()> {
    write!(writer, "{}", Text(graph))
}

/// Serializes `graph` to a `String`.
pub fn to_text(graph: &Graph) -> String {
    Text(graph).to_string()
}

/// Why an edge line was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineIssue {
    /// The line does not have exactly three fields.
    FieldCount(usize),
    /// A field is not a non-negative integer.
    NotAnInteger(String),
    /// An endpoint is outside `0..V`.
    EndpointOutOfRange,
    /// The weight is zero.
    ZeroWeight,
    /// The header edge count disagrees with the number of edges read.
    EdgeCountMismatch {
        /// Edge count declared in the header.
        declared: usize,
        /// Edge lines actually accepted.
        read: usize,
    },
}

impl fmt::Display for LineIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldCount(n) => write!(f, "expected 3 fields, found {n}"),
            Self::NotAnInteger(field) => write!(f, "{field:?} is not a non-negative integer"),
            Self::EndpointOutOfRange => f.write_str("endpoint outside the declared vertex range"),
            Self::ZeroWeight => f.write_str("weight must be positive"),
            Self::EdgeCountMismatch { declared, read } => {
                write!(f, "header declares {declared} edges but {read} were read")
            }
        }
    }
}

/// A non-fatal problem found while reading a graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiagnostic {
    /// 1-based line number.
    pub line: usize,
    /// The raw (trimmed) line content.
    pub content: String,
    /// What was wrong with it.
    pub issue: LineIssue,
}

impl fmt::Display for LineDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: skipping {:?}: {}",
            self.line, self.content, self.issue
        )
    }
}

/// A successfully read graph plus every diagnostic raised while reading it.
#[derive(Debug, Clone)]
pub struct ParsedGraph {
    /// The reconstructed graph.
    pub graph: Graph,
    /// Skipped lines in line order, then any header count mismatch.
    pub diagnostics: Vec<LineDiagnostic>,
}

/// Fatal errors while reading a graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphParseError {
    /// The input contains no non-blank line.
    #[error("graph input is empty; expected a \"V E\" header")]
    Empty,
    /// The first non-blank line is not `"V E"`.
    #[error("line {line}: malformed header {content:?}; expected \"V E\"")]
    MalformedHeader {
        /// 1-based line number of the header.
        line: usize,
        /// The raw header content.
        content: String,
    },
}

/// Parses the text format.
///
/// Blank lines are ignored. Edge order is preserved.
///
/// # Errors
///
/// Returns [`GraphParseError`] if the header is missing or malformed.
pub fn parse_graph(input: &str) -> Result<ParsedGraph, GraphParseError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (header_line, header) = lines.next().ok_or(GraphParseError::Empty)?;
    let (vertex_count, declared_edges) =
        parse_header(header).ok_or_else(|| GraphParseError::MalformedHeader {
            line: header_line,
            content: header.to_owned(),
        })?;

    let mut edges = Vec::with_capacity(declared_edges.min(1 << 20));
    let mut diagnostics = Vec::new();

    for (line, content) in lines {
        match parse_edge(content, vertex_count) {
            Ok(edge) => edges.push(edge),
            Err(issue) => {
                let diag = LineDiagnostic {
                    line,
                    content: content.to_owned(),
                    issue,
                };
                tracing::warn!(line, "{diag}");
                diagnostics.push(diag);
            }
        }
    }

    if edges.len() != declared_edges {
        let diag = LineDiagnostic {
            line: header_line,
            content: header.to_owned(),
            issue: LineIssue::EdgeCountMismatch {
                declared: declared_edges,
                read: edges.len(),
            },
        };
        tracing::warn!(line = header_line, "{diag}");
        diagnostics.push(diag);
    }

    Ok(ParsedGraph {
        graph: Graph::from_checked_edges(vertex_count, edges),
        diagnostics,
    })
}

/// Reads only the `"V E"` header of `input`, ignoring leading blank lines.
///
/// Used by test discovery to describe a file without parsing every edge.
pub fn read_header(input: &str) -> Option<(usize, usize)> {
    input
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .and_then(parse_header)
}

fn parse_header(line: &str) -> Option<(usize, usize)> {
    let mut fields = line.split_whitespace();
    let v = fields.next()?.parse().ok()?;
    let e = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some((v, e))
}

fn parse_edge(line: &str, vertex_count: usize) -> Result<Edge, LineIssue> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [u, v, w] = fields.as_slice() else {
        return Err(LineIssue::FieldCount(fields.len()));
    };
    let source = parse_field::<usize>(u)?;
    let target = parse_field::<usize>(v)?;
    let weight = parse_field::<u32>(w)?;
    let edge = Edge::new(source, target, weight);
    check_edge(vertex_count, &edge).map_err(|e| match e {
        crate::graph::GraphError::EndpointOutOfRange { .. } => LineIssue::EndpointOutOfRange,
        crate::graph::GraphError::ZeroWeight { .. } => LineIssue::ZeroWeight,
    })?;
    Ok(edge)
}

fn parse_field<T: std::str::FromStr>(field: &str) -> Result<T, LineIssue> {
    field
        .parse()
        .map_err(|_| LineIssue::NotAnInteger(field.to_owned()))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn sample() -> Graph {
        Graph::new(
            4,
            vec![Edge::new(0, 1, 3), Edge::new(1, 2, 10), Edge::new(3, 0, 1)],
        )
        .expect("valid")
    }

    #[test]
    fn to_text_writes_header_then_edges() {
        assert_eq!(to_text(&sample()), "4 3\n0 1 3\n1 2 10\n3 0 1\n");
    }

    #[test]
    fn write_graph_matches_to_text() {
        let mut buf = Vec::new();
        write_graph(&mut buf, &sample()).expect("write to vec");
        assert_eq!(String::from_utf8(buf).expect("utf8"), to_text(&sample()));
    }

    #[test]
    fn parse_reads_back_written_graph() {
        let parsed = parse_graph(&to_text(&sample())).expect("parse");
        assert_eq!(parsed.graph, sample());
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn parse_skips_malformed_lines_with_diagnostics() {
        let input = "3 4\n0 1 2\nhello world\n1 2\n2 0 x\n1 2 5\n";
        let parsed = parse_graph(input).expect("header is fine");
        assert_eq!(parsed.graph.edge_count(), 2);
        let lines: Vec<usize> = parsed.diagnostics.iter().map(|d| d.line).collect();
        // lines 3, 4 and 5 are bad; line 1 reports the count mismatch
        assert_eq!(lines, vec![3, 4, 5, 1]);
        assert_eq!(parsed.diagnostics[1].issue, LineIssue::FieldCount(2));
        assert_eq!(
            parsed.diagnostics[3].issue,
            LineIssue::EdgeCountMismatch {
                declared: 4,
                read: 2
            }
        );
    }

    #[test]
    fn parse_skips_out_of_range_and_zero_weight() {
        let parsed = parse_graph("2 3\n0 5 1\n0 1 0\n1 0 4\n").expect("parse");
        assert_eq!(parsed.graph.edges(), &[Edge::new(1, 0, 4)]);
        assert_eq!(parsed.diagnostics[0].issue, LineIssue::EndpointOutOfRange);
        assert_eq!(parsed.diagnostics[1].issue, LineIssue::ZeroWeight);
    }

    #[test]
    fn parse_ignores_blank_lines() {
        let parsed = parse_graph("\n2 1\n\n0 1 9\n\n").expect("parse");
        assert_eq!(parsed.graph.edge_count(), 1);
        assert!(parsed.diagnostics.is_empty());
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert_eq!(parse_graph("  \n\n").expect_err("empty"), GraphParseError::Empty);
    }

    #[test]
    fn parse_rejects_malformed_header() {
        let err = parse_graph("five 3\n0 1 1\n").expect_err("bad header");
        assert!(matches!(err, GraphParseError::MalformedHeader { line: 1, .. }));
    }

    #[test]
    fn read_header_skips_leading_blank_lines() {
        assert_eq!(read_header("\n\n20 76\n0 1 2\n"), Some((20, 76)));
        assert_eq!(read_header("20\n"), None);
    }
}
