//! Case-normalization registry ("recaser")
//!
//! Identifiers that arrive in API responses may carry non-canonical casing
//! of their static and provider segments. The recaser holds the segment
//! schemas of every known ID type and rewrites such identifiers to
//! canonical casing before they are persisted or re-emitted.
//!
//! The registry is populated once by an explicit startup call
//! ([`initialize`]) and is read-only afterwards. There are no registration
//! side effects at module load time; if the registry was never initialized,
//! [`re_case`] passes input through unchanged.

use std::sync::OnceLock;

use super::{IdSchema, Segment, ServerSuppliedValue, format, parser};

/// Immutable lookup table of known ID schemas
#[derive(Debug)]
pub struct Recaser {
    schemas: Vec<&'static IdSchema>,
}

impl Recaser {
    /// Build a registry from an ordered schema list
    ///
    /// Order matters: the first schema that matches wins, so callers list
    /// more specific schemas (child resources, fixed-prefix IDs) before
    /// scoped catch-alls.
    pub fn new(schemas: Vec<&'static IdSchema>) -> Self {
        Self { schemas }
    }

    /// Restore canonical casing of static/provider segments in `input`
    ///
    /// Identifiers that match no registered schema are returned unchanged,
    /// so this can be applied blindly to any server-originated string.
    pub fn re_case(&self, input: &str) -> String {
        for schema in &self.schemas {
            let Ok(mut parsed) = parser::parse_insensitively(schema, ServerSuppliedValue::new(input))
            else {
                continue;
            };
            // a matched scope prefix may itself be a known ID
            if let Some(scope_name) = schema
                .segments()
                .iter()
                .find_map(|s| match s {
                    Segment::Scope { name } => Some(*name),
                    _ => None,
                })
                && let Some(scope) = parsed.get(scope_name).map(|s| s.to_string())
            {
                parsed.set(scope_name, self.re_case(&scope));
            }
            return format::format(schema, &parsed);
        }
        input.to_string()
    }
}

static REGISTRY: OnceLock<Recaser> = OnceLock::new();

/// Populate the process-wide registry; first call wins, later calls are no-ops
pub fn initialize(schemas: Vec<&'static IdSchema>) -> &'static Recaser {
    REGISTRY.get_or_init(|| Recaser::new(schemas))
}

/// Re-case `input` against the process-wide registry
pub fn re_case(input: &str) -> String {
    match REGISTRY.get() {
        Some(registry) => registry.re_case(input),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESOURCE_GROUP: IdSchema = IdSchema {
        type_name: "Resource Group",
        segments: &[
            Segment::Static {
                name: "staticSubscriptions",
                value: "subscriptions",
            },
            Segment::SubscriptionId {
                name: "subscriptionId",
            },
            Segment::Static {
                name: "staticResourceGroups",
                value: "resourceGroups",
            },
            Segment::ResourceGroupName {
                name: "resourceGroupName",
            },
        ],
    };

    const SCOPED_LOCK: IdSchema = IdSchema {
        type_name: "Management Lock",
        segments: &[
            Segment::Scope { name: "scope" },
            Segment::Static {
                name: "staticProviders",
                value: "providers",
            },
            Segment::ResourceProvider {
                name: "resourceProvider",
                namespace: "Microsoft.Authorization",
            },
            Segment::Static {
                name: "staticLocks",
                value: "locks",
            },
            Segment::UserSpecified { name: "lockName" },
        ],
    };

    #[test]
    fn re_cases_fixed_segments_and_keeps_names() {
        let recaser = Recaser::new(vec![&RESOURCE_GROUP]);
        assert_eq!(
            recaser.re_case(
                "/SUBSCRIPTIONS/12345678-1234-9876-4563-123456789012/RESOURCEGROUPS/MyGroup"
            ),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/MyGroup"
        );
    }

    #[test]
    fn unknown_identifiers_pass_through() {
        let recaser = Recaser::new(vec![&RESOURCE_GROUP]);
        assert_eq!(recaser.re_case("/PROVIDERS/Unknown/things/x"), "/PROVIDERS/Unknown/things/x");
        assert_eq!(recaser.re_case("not an id"), "not an id");
    }

    #[test]
    fn re_cases_scope_prefix_recursively() {
        let recaser = Recaser::new(vec![&RESOURCE_GROUP, &SCOPED_LOCK]);
        assert_eq!(
            recaser.re_case(
                "/SUBSCRIPTIONS/12345678-1234-9876-4563-123456789012/RESOURCEGROUPS/MyGroup/PROVIDERS/microsoft.authorization/LOCKS/lock1"
            ),
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/MyGroup/providers/Microsoft.Authorization/locks/lock1"
        );
    }
}
