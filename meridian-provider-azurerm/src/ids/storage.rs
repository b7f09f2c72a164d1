//! Storage IDs

use std::fmt;

use meridian_core::validate::ValidationResult;

use crate::resourceid::{
    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,
};

pub const STORAGE_ACCOUNT: IdSchema = IdSchema {
    type_name: "Storage Account",
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
        Segment::Static {
            name: "staticProviders",
            value: "providers",
        },
        Segment::ResourceProvider {
            name: "resourceProvider",
            namespace: "Microsoft.Storage",
        },
        Segment::Static {
            name: "staticStorageAccounts",
            value: "storageAccounts",
        },
        Segment::UserSpecified {
            name: "storageAccountName",
        },
    ],
};

/// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Storage/storageAccounts/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageAccountId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub storage_account_name: String,
}

impl StorageAccountId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        storage_account_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            storage_account_name: storage_account_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&STORAGE_ACCOUNT, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&STORAGE_ACCOUNT, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.take("subscriptionId", input)?,
            resource_group_name: parsed.take("resourceGroupName", input)?,
            storage_account_name: parsed.take("storageAccountName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&STORAGE_ACCOUNT, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("subscriptionId", &self.subscription_id);
        values.set("resourceGroupName", &self.resource_group_name);
        values.set("storageAccountName", &self.storage_account_name);
        values
    }
}

impl fmt::Display for StorageAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&STORAGE_ACCOUNT, &self.to_parsed()))
    }
}

/// Validate that `value` is a well-formed storage account ID
pub fn validate_storage_account_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&STORAGE_ACCOUNT, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "12345678-1234-9876-4563-123456789012";

    fn canonical() -> String {
        format!(
            "/subscriptions/{SUB}/resourceGroups/group1/providers/Microsoft.Storage/storageAccounts/account1"
        )
    }

    #[test]
    fn round_trip() {
        let id = StorageAccountId::new(SUB, "group1", "account1");
        assert_eq!(id.id(), canonical());
        assert_eq!(StorageAccountId::parse(&canonical()).unwrap(), id);
    }

    #[test]
    fn rejects_wrong_provider_casing() {
        let input = canonical().replace("Microsoft.Storage", "microsoft.storage");
        assert!(StorageAccountId::parse(&input).is_err());
        // server responses with that casing are fine
        let id = StorageAccountId::parse_insensitively(ServerSuppliedValue::new(&input)).unwrap();
        assert_eq!(id.id(), canonical());
    }

    #[test]
    fn validator_agrees_with_parser() {
        assert!(validate_storage_account_id("id", &canonical()).is_ok());
        assert!(validate_storage_account_id("id", "").is_err());
        let truncated = canonical().replace("/storageAccounts/account1", "");
        assert!(validate_storage_account_id("id", &truncated).is_err());
    }
}
