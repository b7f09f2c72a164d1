//! Canonical formatting of resource IDs
//!
//! Formatting is positional substitution over the segment schema and has no
//! failure modes: field validity is the parser's (or the constructor
//! caller's) responsibility. `describe` renders the same fields as a
//! multi-line, human-readable listing for error messages and logs; it is
//! not meant to round-trip.

use super::{IdSchema, ParsedId, Segment};

/// Render the canonical slash-delimited path for a parsed or constructed ID
pub fn format(schema: &IdSchema, values: &ParsedId) -> String {
    let mut out = String::new();
    for segment in schema.segments() {
        match segment {
            Segment::Static { value, .. } => {
                out.push('/');
                out.push_str(value);
            }
            Segment::ResourceProvider { namespace, .. } => {
                out.push('/');
                out.push_str(namespace);
            }
            Segment::Scope { name } => {
                // scope values carry their own leading slash
                out.push_str(values.get(name).unwrap_or_default());
            }
            Segment::SubscriptionId { name }
            | Segment::ResourceGroupName { name }
            | Segment::UserSpecified { name } => {
                out.push('/');
                out.push_str(values.get(name).unwrap_or_default());
            }
        }
    }
    out
}

/// Render a human-readable listing of the ID's components, one per line
pub fn describe(schema: &IdSchema, values: &ParsedId) -> String {
    let mut lines = vec![format!("{}:", schema.type_name)];
    for segment in schema.segments() {
        if segment.fixed_value().is_some() {
            continue;
        }
        lines.push(format!(
            "{}: {:?}",
            humanize(segment.name()),
            values.get(segment.name()).unwrap_or_default()
        ));
    }
    lines.join("\n")
}

/// Turn a camelCase parameter name into a spaced label
/// e.g., "resourceGroupName" -> "Resource Group Name"
fn humanize(name: &str) -> String {
    let mut out = String::new();
    for (i, c) in name.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}
