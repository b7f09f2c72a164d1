//! Resource Group IDs

use std::fmt;

use meridian_core::validate::ValidationResult;

use crate::resourceid::{
    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,
};

pub const RESOURCE_GROUP: IdSchema = IdSchema {
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

/// `/subscriptions/{subscriptionId}/resourceGroups/{resourceGroupName}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroupId {
    pub subscription_id: String,
    pub resource_group_name: String,
}

impl ResourceGroupId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
        }
    }

    /// Parse user-authored input (case-sensitive)
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&RESOURCE_GROUP, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    /// Parse an API-originated value, tolerating non-canonical casing
    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&RESOURCE_GROUP, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.take("subscriptionId", input)?,
            resource_group_name: parsed.take("resourceGroupName", input)?,
        })
    }

    /// Canonical resource ID path
    pub fn id(&self) -> String {
        format::format(&RESOURCE_GROUP, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("subscriptionId", &self.subscription_id);
        values.set("resourceGroupName", &self.resource_group_name);
        values
    }
}

impl fmt::Display for ResourceGroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&RESOURCE_GROUP, &self.to_parsed()))
    }
}

/// Validate that `value` is a well-formed resource group ID
pub fn validate_resource_group_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&RESOURCE_GROUP, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "12345678-1234-9876-4563-123456789012";

    #[test]
    fn round_trip() {
        let id = ResourceGroupId::new(SUB, "group1");
        let formatted = id.id();
        assert_eq!(
            formatted,
            format!("/subscriptions/{SUB}/resourceGroups/group1")
        );
        assert_eq!(ResourceGroupId::parse(&formatted).unwrap(), id);
    }

    #[test]
    fn rejects_empty_and_upper_cased_input() {
        assert!(ResourceGroupId::parse("").is_err());
        let upper = format!("/SUBSCRIPTIONS/{SUB}/RESOURCEGROUPS/GROUP1");
        assert!(ResourceGroupId::parse(&upper).is_err());
    }

    #[test]
    fn insensitive_parse_accepts_upper_cased_input() {
        let upper = format!("/SUBSCRIPTIONS/{SUB}/RESOURCEGROUPS/GROUP1");
        let id = ResourceGroupId::parse_insensitively(ServerSuppliedValue::new(&upper)).unwrap();
        assert_eq!(id.subscription_id, SUB);
        assert_eq!(id.resource_group_name, "GROUP1");
        // reformatting restores canonical static casing
        assert_eq!(
            id.id(),
            format!("/subscriptions/{SUB}/resourceGroups/GROUP1")
        );
    }

    #[test]
    fn validator_agrees_with_parser() {
        let valid = format!("/subscriptions/{SUB}/resourceGroups/group1");
        assert!(validate_resource_group_id("id", &valid).is_ok());
        assert!(validate_resource_group_id("id", "").is_err());
        assert!(validate_resource_group_id("id", &format!("{valid}/")).is_err());
    }

    #[test]
    fn display_is_human_readable() {
        let id = ResourceGroupId::new(SUB, "group1");
        let rendered = id.to_string();
        assert!(rendered.starts_with("Resource Group:\n"));
        assert!(rendered.contains("Resource Group Name: \"group1\""));
    }
}
