use crate::error::LayoutError;
use crate::geometry::Point;
use crate::ir::{EdgeType, LayoutEdge, LayoutGraph, LayoutNode, Viewport};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Statements in the engine's output are terminated by `;` and a newline.
const STATEMENT_SEPARATOR: &str = ";\n";
/// `graph [...]`, `node [...]` and `edge [...]` precede the body.
const HEADER_STATEMENTS: usize = 3;
const EDGE_ARROW: &str = " -> ";

static BB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\bbb\s*=\s*"([^"]*)""#).unwrap());
static HEADER_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(graph|node|edge)\s*\[").unwrap());

/// Parses the text a Graphviz layout run produces (`dot` output with `pos`, `width`,
/// `height` and `bb` attributes filled in) into node and edge records.
///
/// A single malformed statement fails the whole parse.
pub fn parse_layout(input: &str) -> Result<LayoutGraph, LayoutError> {
    let normalized = input.replace("\r\n", "\n");
    let statements: Vec<&str> = normalized.split(STATEMENT_SEPARATOR).collect();
    if statements.len() <= HEADER_STATEMENTS {
        return Err(LayoutError::MalformedHeader {
            reason: format!(
                "expected {HEADER_STATEMENTS} header statements followed by a body, found {} statements",
                statements.len()
            ),
        });
    }

    let (header, rest) = statements.split_at(HEADER_STATEMENTS);
    let viewport = parse_header(header)?;

    // The final piece is the closing brace of the graph.
    let body = match rest.split_last() {
        Some((footer, body)) if footer.trim().ends_with('}') => body,
        _ => {
            return Err(LayoutError::MalformedHeader {
                reason: "layout text does not end with a closing brace".to_string(),
            });
        }
    };

    let mut graph = LayoutGraph::new(viewport);
    let mut edges = Vec::new();
    for statement in body {
        if statement.trim().is_empty() {
            continue;
        }
        if statement.contains(EDGE_ARROW) {
            edges.push(parse_edge_statement(statement)?);
        } else {
            let node = parse_node_statement(statement)?;
            if graph.nodes.contains_key(&node.id) {
                return Err(LayoutError::MalformedNodeRecord {
                    record: node.id,
                    reason: "duplicate node id".to_string(),
                });
            }
            graph.nodes.insert(node.id.clone(), node);
        }
    }

    // Edges may precede the nodes they connect, so ids are checked once every node is known.
    for edge in &edges {
        for id in [&edge.source_id, &edge.target_id] {
            if !graph.nodes.contains_key(id) {
                return Err(LayoutError::UnknownNodeReference {
                    edge: format!("{}{EDGE_ARROW}{}", edge.source_id, edge.target_id),
                    id: id.clone(),
                });
            }
        }
    }
    graph.edges = edges;

    debug!(
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        width = graph.viewport.width,
        height = graph.viewport.height;
        "Parsed layout"
    );
    Ok(graph)
}

fn parse_header(header: &[&str]) -> Result<Viewport, LayoutError> {
    for statement in header {
        let line = statement_after_graph_open(statement);
        if !HEADER_KEYWORD_RE.is_match(line) {
            return Err(LayoutError::MalformedHeader {
                reason: format!(
                    "expected a graph/node/edge attribute statement, found `{}`",
                    line.trim()
                ),
            });
        }
    }

    let bb = header
        .iter()
        .find_map(|statement| BB_RE.captures(statement))
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| LayoutError::MalformedHeader {
            reason: "missing bounding box (`bb`) attribute".to_string(),
        })?;

    let values = bb
        .as_str()
        .split(',')
        .map(parse_number)
        .collect::<Option<Vec<f32>>>()
        .filter(|values| values.len() == 4)
        .ok_or_else(|| LayoutError::MalformedHeader {
            reason: format!("bounding box `{}` is not four numbers", bb.as_str()),
        })?;

    Ok(Viewport {
        width: values[2],
        height: values[3],
    })
}

/// Strips the `strict digraph "name" {` opener that precedes the first header statement.
fn statement_after_graph_open(statement: &str) -> &str {
    match find_unquoted(statement, '{') {
        Some(idx) => &statement[idx + 1..],
        None => statement,
    }
}

fn parse_node_statement(statement: &str) -> Result<LayoutNode, LayoutError> {
    let malformed = |record: &str, reason: String| LayoutError::MalformedNodeRecord {
        record: record.to_string(),
        reason,
    };
    let raw = statement.trim();

    let (head, body) = split_statement(statement);
    let (id, _) = parse_id(head).ok_or_else(|| malformed(raw, "missing node id".to_string()))?;
    let body = body.ok_or_else(|| malformed(&id, "missing attribute list".to_string()))?;
    let attrs = Attributes::parse(body).map_err(|reason| malformed(&id, reason))?;

    let number = |key: &str| -> Result<f32, LayoutError> {
        let value = attrs
            .get(key)
            .ok_or_else(|| malformed(&id, format!("missing `{key}` attribute")))?;
        parse_number(value)
            .ok_or_else(|| malformed(&id, format!("`{key}` is not a number: `{value}`")))
    };
    let height = number("height")?;
    let width = number("width")?;

    let pos = attrs
        .get("pos")
        .ok_or_else(|| malformed(&id, "missing `pos` attribute".to_string()))?;
    // A trailing `!` marks a pinned node.
    let position = parse_pair(pos.trim_end_matches('!'))
        .ok_or_else(|| malformed(&id, format!("`pos` is not an `x,y` pair: `{pos}`")))?;

    Ok(LayoutNode {
        id,
        position,
        width,
        height,
    })
}

fn parse_edge_statement(statement: &str) -> Result<LayoutEdge, LayoutError> {
    let raw = statement.trim();
    let (head, body) = split_statement(statement);
    let (source_id, target_id) =
        parse_edge_ends(head).ok_or_else(|| LayoutError::MalformedEdgeRecord {
            record: raw.to_string(),
            reason: format!("cannot split `{}` into source and target ids", head.trim()),
        })?;

    let record = format!("{source_id}{EDGE_ARROW}{target_id}");
    let malformed = |reason: String| LayoutError::MalformedEdgeRecord {
        record: record.clone(),
        reason,
    };

    let body = body.ok_or_else(|| malformed("missing attribute list".to_string()))?;
    let attrs = Attributes::parse(body).map_err(&malformed)?;
    let pos = attrs
        .get("pos")
        .ok_or_else(|| malformed("missing `pos` attribute".to_string()))?;
    let control_points = parse_edge_pos(pos).map_err(&malformed)?;

    let edge_type = attrs
        .get("type")
        .map(EdgeType::from_label)
        .unwrap_or(EdgeType::Untyped);

    Ok(LayoutEdge {
        source_id,
        target_id,
        control_points,
        edge_type,
    })
}

/// Parses an edge `pos` value: an `e,x,y` tagged endpoint followed by the spline points.
/// The returned list starts with the tagged endpoint.
fn parse_edge_pos(pos: &str) -> Result<Vec<Point>, String> {
    let mut end_point = None;
    let mut spline = Vec::new();

    for token in pos.split_whitespace() {
        if let Some(rest) = token.strip_prefix("s,") {
            let point = parse_pair(rest).ok_or_else(|| format!("bad start tag `{token}`"))?;
            debug!(x = point.x, y = point.y; "Ignoring start-tagged edge point");
            continue;
        }
        if let Some(rest) = token.strip_prefix("e,") {
            if end_point.is_some() {
                return Err("more than one `e,` tagged point".to_string());
            }
            end_point = Some(parse_pair(rest).ok_or_else(|| format!("bad end tag `{token}`"))?);
            continue;
        }
        spline.push(parse_pair(token).ok_or_else(|| format!("bad coordinate pair `{token}`"))?);
    }

    let end_point = end_point.ok_or_else(|| "`pos` has no `e,` tagged endpoint".to_string())?;
    let n = spline.len();
    if n < 4 || (n - 1) % 3 != 0 {
        return Err(format!(
            "spline has {n} control points; expected 3k+1 points with k >= 1"
        ));
    }

    let mut points = Vec::with_capacity(n + 1);
    points.push(end_point);
    points.extend(spline);
    Ok(points)
}

fn parse_edge_ends(head: &str) -> Option<(String, String)> {
    let (source, rest) = parse_id(head)?;
    let rest = rest.trim_start().strip_prefix("->")?;
    let (target, rest) = parse_id(rest)?;
    if !rest.trim().is_empty() {
        return None;
    }
    Some((source, target))
}

/// Reads a quoted or bare id from the start of `input`, returning it with the remainder.
fn parse_id(input: &str) -> Option<(String, &str)> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('"') {
        let (value, rest) = split_leading_quoted(trimmed)?;
        return Some((unescape(value), rest));
    }
    let end = trimmed
        .find(|ch: char| ch.is_whitespace() || ch == '[' || ch == '-')
        .unwrap_or(trimmed.len());
    if end == 0 {
        return None;
    }
    Some((trimmed[..end].to_string(), &trimmed[end..]))
}

/// Splits a statement into the part before its attribute list and the list body.
fn split_statement(statement: &str) -> (&str, Option<&str>) {
    let Some(open) = find_unquoted(statement, '[') else {
        return (statement, None);
    };
    let head = &statement[..open];
    let after = &statement[open + 1..];
    match after.rfind(']') {
        Some(close) => (head, Some(&after[..close])),
        None => (head, None),
    }
}

fn find_unquoted(input: &str, needle: char) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (idx, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            c if c == needle && !in_quotes => return Some(idx),
            _ => {}
        }
    }
    None
}

fn split_leading_quoted(input: &str) -> Option<(&str, &str)> {
    let mut iter = input.char_indices();
    let (_, quote) = iter.next()?;
    if quote != '"' {
        return None;
    }
    let mut escaped = false;
    for (idx, ch) in iter {
        if escaped {
            escaped = false;
            continue;
        }
        if ch == '\\' {
            escaped = true;
        } else if ch == quote {
            return Some((&input[1..idx], &input[idx + 1..]));
        }
    }
    None
}

/// Removes the engine's `\`-newline line continuations and unescapes `\"`.
/// Other escapes such as `\N` are kept verbatim.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.peek() {
            Some('\n') => {
                chars.next();
            }
            Some('"') => {
                out.push('"');
                chars.next();
            }
            _ => out.push('\\'),
        }
    }
    out
}

fn parse_number(text: &str) -> Option<f32> {
    text.trim().parse::<f32>().ok().filter(|value| value.is_finite())
}

fn parse_pair(text: &str) -> Option<Point> {
    let (x, y) = text.split_once(',')?;
    Some(Point::new(parse_number(x)?, parse_number(y)?))
}

/// `key=value` pairs of one attribute list, values unquoted.
#[derive(Debug, Default)]
struct Attributes {
    values: HashMap<String, String>,
}

impl Attributes {
    fn parse(body: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for entry in split_unquoted_commas(body) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let Some((key, value)) = entry.split_once('=') else {
                return Err(format!("attribute `{entry}` has no value"));
            };
            let value = value.trim();
            let value = match split_leading_quoted(value) {
                Some((inner, rest)) if rest.trim().is_empty() => unescape(inner),
                Some(_) => return Err(format!("trailing text after quoted value in `{entry}`")),
                None if value.starts_with('"') => {
                    return Err(format!("unterminated quoted value in `{entry}`"));
                }
                None => value.to_string(),
            };
            values.insert(key.trim().to_string(), value);
        }
        Ok(Self { values })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

fn split_unquoted_commas(body: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut escaped = false;
    let mut start = 0;
    for (idx, ch) in body.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                parts.push(&body[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&body[start..]);
    parts
}
