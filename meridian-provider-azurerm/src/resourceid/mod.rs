//! Resource ID codec for Azure Resource Manager identifiers
//!
//! ARM identifies every resource with a slash-delimited path such as
//! `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Storage/storageAccounts/{name}`.
//! Rather than hand-writing a parser and formatter per resource type, each
//! type declares an ordered segment schema as a `const` table and the
//! generic engine in this module does the rest.
//!
//! ## Module Structure
//!
//! - `parser` - schema-driven parse engine (case-sensitive and insensitive)
//! - `format` - canonical path formatting and human-readable descriptions
//! - `validate` - bridges the parser into attribute validation
//! - `recaser` - registry that restores canonical casing to identifiers

pub mod format;
pub mod parser;
pub mod recaser;
pub mod validate;

use std::collections::HashMap;

pub use parser::{ParseError, ServerSuppliedValue};

/// One atomic unit of a resource ID path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    /// A fixed literal that must match exactly (e.g., "resourceGroups")
    Static {
        name: &'static str,
        value: &'static str,
    },
    /// A GUID-shaped subscription id
    SubscriptionId { name: &'static str },
    /// A resource group name
    ResourceGroupName { name: &'static str },
    /// A resource provider namespace (e.g., "Microsoft.Storage")
    ResourceProvider {
        name: &'static str,
        namespace: &'static str,
    },
    /// An arbitrary name supplied by the caller
    UserSpecified { name: &'static str },
    /// An entire arbitrary sub-path, for IDs that can be rooted anywhere
    Scope { name: &'static str },
}

impl Segment {
    /// Parameter name this segment binds to
    pub fn name(&self) -> &'static str {
        match self {
            Segment::Static { name, .. }
            | Segment::SubscriptionId { name }
            | Segment::ResourceGroupName { name }
            | Segment::ResourceProvider { name, .. }
            | Segment::UserSpecified { name }
            | Segment::Scope { name } => name,
        }
    }

    /// Canonical value for fixed segments, None for caller-supplied ones
    pub fn fixed_value(&self) -> Option<&'static str> {
        match self {
            Segment::Static { value, .. } => Some(value),
            Segment::ResourceProvider { namespace, .. } => Some(namespace),
            _ => None,
        }
    }
}

/// Ordered segment schema for one resource ID type
///
/// Defined as a `const` table per resource type; order is positional and
/// significant. The schema is a pure static description consumed by both
/// the parser and the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSchema {
    /// Human-readable type name used in diagnostics (e.g., "Resource Group")
    pub type_name: &'static str,
    pub segments: &'static [Segment],
}

impl IdSchema {
    pub fn segments(&self) -> &'static [Segment] {
        self.segments
    }
}

/// Parameter name to matched value bindings produced by a successful parse
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedId {
    values: HashMap<&'static str, String>,
}

impl ParsedId {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.values.insert(name, value.into());
    }

    /// Remove and return the value bound to `name`
    ///
    /// The parse engine binds every segment name in the schema, so a miss
    /// here means the caller asked for a name the schema never defined.
    pub fn take(&mut self, name: &'static str, input: &str) -> Result<String, ParseError> {
        self.values
            .remove(name)
            .ok_or_else(|| ParseError::MissingSegment {
                segment: name,
                input: input.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_name_covers_all_variants() {
        let segments = [
            Segment::Static {
                name: "staticSubscriptions",
                value: "subscriptions",
            },
            Segment::SubscriptionId {
                name: "subscriptionId",
            },
            Segment::ResourceGroupName {
                name: "resourceGroupName",
            },
            Segment::ResourceProvider {
                name: "resourceProvider",
                namespace: "Microsoft.Storage",
            },
            Segment::UserSpecified {
                name: "storageAccountName",
            },
            Segment::Scope { name: "scope" },
        ];
        let names: Vec<&str> = segments.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec![
                "staticSubscriptions",
                "subscriptionId",
                "resourceGroupName",
                "resourceProvider",
                "storageAccountName",
                "scope",
            ]
        );
    }

    #[test]
    fn fixed_value_only_for_static_segments() {
        let s = Segment::Static {
            name: "staticResourceGroups",
            value: "resourceGroups",
        };
        assert_eq!(s.fixed_value(), Some("resourceGroups"));

        let p = Segment::ResourceProvider {
            name: "resourceProvider",
            namespace: "Microsoft.Billing",
        };
        assert_eq!(p.fixed_value(), Some("Microsoft.Billing"));

        let u = Segment::UserSpecified { name: "name" };
        assert_eq!(u.fixed_value(), None);
    }

    #[test]
    fn parsed_id_take_removes_binding() {
        let mut parsed = ParsedId::new();
        parsed.set("subscriptionId", "sub-123");
        assert_eq!(parsed.take("subscriptionId", "/x").unwrap(), "sub-123");
        assert!(parsed.take("subscriptionId", "/x").is_err());
    }
}
