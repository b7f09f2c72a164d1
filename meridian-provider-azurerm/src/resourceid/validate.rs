//! Attribute validation backed by the ID parser
//!
//! Wraps the case-sensitive parser into the `(field, value)` validation
//! shape the calling tool expects. Validation always uses the strict
//! parser: user configuration must carry canonical casing.

use meridian_core::validate::{ValidationError, ValidationResult};

use super::{IdSchema, parser};

/// Validate that `value` is a well-formed ID for `schema`
///
/// Succeeds exactly when [`parser::parse`] succeeds; a parse failure is
/// surfaced as a single validation error attributed to `field`.
pub fn validate_id(schema: &IdSchema, field: &str, value: &str) -> ValidationResult {
    match parser::parse(schema, value) {
        Ok(_) => Ok(()),
        Err(e) => Err(ValidationError::new(field, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::super::Segment;
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

    const VALID: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/group1";

    #[test]
    fn agrees_with_parser() {
        let inputs = [
            VALID,
            "",
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups",
            "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/",
            "/SUBSCRIPTIONS/12345678-1234-9876-4563-123456789012/RESOURCEGROUPS/GROUP1",
        ];
        for input in inputs {
            assert_eq!(
                validate_id(&RESOURCE_GROUP, "id", input).is_ok(),
                parser::parse(&RESOURCE_GROUP, input).is_ok(),
                "validator and parser disagree on {input:?}"
            );
        }
    }

    #[test]
    fn error_names_the_field() {
        let err = validate_id(&RESOURCE_GROUP, "resource_group_id", "").unwrap_err();
        assert_eq!(err.path, "resource_group_id");
        assert!(err.message.contains("empty string"));
    }
}
