//! Schema-driven parse engine for resource ID paths
//!
//! Two entry points with one load-bearing difference:
//!
//! - [`parse`] is case-sensitive and is the parser for user-authored
//!   configuration. An ID whose static or provider segments don't match
//!   Azure's canonical casing is rejected.
//! - [`parse_insensitively`] tolerates arbitrary casing of fixed segments
//!   and binds their canonical form instead. It only accepts a
//!   [`ServerSuppliedValue`], so it cannot be applied to user input by
//!   accident: API responses are the one place Azure's own casing is
//!   inconsistent.

use std::sync::OnceLock;

use regex::Regex;

use super::{IdSchema, ParsedId, Segment};

/// Marker for a string that originated from an API response
///
/// Construct one only at the point where a value comes off the wire.
#[derive(Debug, Clone, Copy)]
pub struct ServerSuppliedValue<'a>(&'a str);

impl<'a> ServerSuppliedValue<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }
}

/// Parse failure, carrying the offending input for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("cannot parse an empty string as a {type_name} ID")]
    EmptyInput { type_name: &'static str },

    #[error("a {type_name} ID must begin with `/`, got {input:?}")]
    MissingLeadingSlash {
        type_name: &'static str,
        input: String,
    },

    #[error("ID is missing the `{segment}` segment: {input:?}")]
    MissingSegment { segment: &'static str, input: String },

    #[error("the `{segment}` segment has no value in {input:?}")]
    EmptySegmentValue { segment: &'static str, input: String },

    #[error("expected `{expected}` but found `{actual}` for the `{segment}` segment in {input:?}")]
    StaticMismatch {
        segment: &'static str,
        expected: &'static str,
        actual: String,
        input: String,
    },

    #[error("`{actual}` is not a valid subscription id (expected a GUID) in {input:?}")]
    InvalidSubscriptionId { actual: String, input: String },

    #[error("found extra segments {remainder:?} after the end of the ID: {input:?}")]
    TrailingSegments { remainder: String, input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseMode {
    Sensitive,
    Insensitive,
}

/// Parse user-authored input against a schema, case-sensitively
pub fn parse(schema: &IdSchema, input: &str) -> Result<ParsedId, ParseError> {
    parse_with_mode(schema, input, CaseMode::Sensitive)
}

/// Parse an API-originated value, tolerating non-canonical casing of
/// static and provider segments
pub fn parse_insensitively(
    schema: &IdSchema,
    value: ServerSuppliedValue<'_>,
) -> Result<ParsedId, ParseError> {
    parse_with_mode(schema, value.as_str(), CaseMode::Insensitive)
}

fn parse_with_mode(schema: &IdSchema, input: &str, mode: CaseMode) -> Result<ParsedId, ParseError> {
    if input.is_empty() {
        return Err(ParseError::EmptyInput {
            type_name: schema.type_name,
        });
    }
    let Some(rest) = input.strip_prefix('/') else {
        return Err(ParseError::MissingLeadingSlash {
            type_name: schema.type_name,
            input: input.to_string(),
        });
    };

    let tokens: Vec<&str> = rest.split('/').collect();
    let segments = schema.segments();
    let mut values = ParsedId::new();
    let mut pos = 0;

    for (i, segment) in segments.iter().enumerate() {
        if let Segment::Scope { name } = segment {
            pos = consume_scope(&tokens, pos, segments.len() - i - 1, name, input, &mut values)?;
            continue;
        }

        let token = match tokens.get(pos) {
            Some(t) => *t,
            None => {
                return Err(ParseError::MissingSegment {
                    segment: segment.name(),
                    input: input.to_string(),
                });
            }
        };
        if token.is_empty() {
            return Err(ParseError::EmptySegmentValue {
                segment: segment.name(),
                input: input.to_string(),
            });
        }

        match segment {
            Segment::Static { name, value } => {
                expect_fixed(name, value, token, input, mode)?;
                values.set(name, *value);
            }
            Segment::ResourceProvider { name, namespace } => {
                expect_fixed(name, namespace, token, input, mode)?;
                values.set(name, *namespace);
            }
            Segment::SubscriptionId { name } => {
                if !guid_pattern().is_match(token) {
                    return Err(ParseError::InvalidSubscriptionId {
                        actual: token.to_string(),
                        input: input.to_string(),
                    });
                }
                values.set(name, token);
            }
            Segment::ResourceGroupName { name } | Segment::UserSpecified { name } => {
                values.set(name, token);
            }
            Segment::Scope { .. } => unreachable!("scope segments are consumed above"),
        }
        pos += 1;
    }

    if pos < tokens.len() {
        return Err(ParseError::TrailingSegments {
            remainder: tokens[pos..].join("/"),
            input: input.to_string(),
        });
    }

    Ok(values)
}

/// Greedily consume tokens for a scope segment, leaving exactly enough for
/// the rest of the schema (one token per remaining segment)
fn consume_scope(
    tokens: &[&str],
    pos: usize,
    segments_after: usize,
    name: &'static str,
    input: &str,
    values: &mut ParsedId,
) -> Result<usize, ParseError> {
    let available = tokens.len().saturating_sub(pos);
    if available < segments_after + 1 {
        return Err(ParseError::MissingSegment {
            segment: name,
            input: input.to_string(),
        });
    }
    let end = tokens.len() - segments_after;
    let taken = &tokens[pos..end];
    if taken.iter().any(|t| t.is_empty()) {
        return Err(ParseError::EmptySegmentValue {
            segment: name,
            input: input.to_string(),
        });
    }
    values.set(name, format!("/{}", taken.join("/")));
    Ok(end)
}

fn expect_fixed(
    segment: &'static str,
    expected: &'static str,
    actual: &str,
    input: &str,
    mode: CaseMode,
) -> Result<(), ParseError> {
    let matches = match mode {
        CaseMode::Sensitive => actual == expected,
        CaseMode::Insensitive => actual.eq_ignore_ascii_case(expected),
    };
    if matches {
        Ok(())
    } else {
        Err(ParseError::StaticMismatch {
            segment,
            expected,
            actual: actual.to_string(),
            input: input.to_string(),
        })
    }
}

fn guid_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
            .expect("guid pattern is valid")
    })
}
