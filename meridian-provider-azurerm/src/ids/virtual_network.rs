//! Network IDs

use std::fmt;

use meridian_core::validate::ValidationResult;

use crate::resourceid::{
    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,
};

pub const VIRTUAL_NETWORK: IdSchema = IdSchema {
    type_name: "Virtual Network",
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
            namespace: "Microsoft.Network",
        },
        Segment::Static {
            name: "staticVirtualNetworks",
            value: "virtualNetworks",
        },
        Segment::UserSpecified {
            name: "virtualNetworkName",
        },
    ],
};

pub const SUBNET: IdSchema = IdSchema {
    type_name: "Subnet",
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
            namespace: "Microsoft.Network",
        },
        Segment::Static {
            name: "staticVirtualNetworks",
            value: "virtualNetworks",
        },
        Segment::UserSpecified {
            name: "virtualNetworkName",
        },
        Segment::Static {
            name: "staticSubnets",
            value: "subnets",
        },
        Segment::UserSpecified { name: "subnetName" },
    ],
};

/// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Network/virtualNetworks/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualNetworkId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub virtual_network_name: String,
}

impl VirtualNetworkId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        virtual_network_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            virtual_network_name: virtual_network_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&VIRTUAL_NETWORK, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&VIRTUAL_NETWORK, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.take("subscriptionId", input)?,
            resource_group_name: parsed.take("resourceGroupName", input)?,
            virtual_network_name: parsed.take("virtualNetworkName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&VIRTUAL_NETWORK, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("subscriptionId", &self.subscription_id);
        values.set("resourceGroupName", &self.resource_group_name);
        values.set("virtualNetworkName", &self.virtual_network_name);
        values
    }
}

impl fmt::Display for VirtualNetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&VIRTUAL_NETWORK, &self.to_parsed()))
    }
}

/// `/subscriptions/{sub}/resourceGroups/{rg}/providers/Microsoft.Network/virtualNetworks/{vnet}/subnets/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub virtual_network_name: String,
    pub subnet_name: String,
}

impl SubnetId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        virtual_network_name: impl Into<String>,
        subnet_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            virtual_network_name: virtual_network_name.into(),
            subnet_name: subnet_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&SUBNET, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&SUBNET, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            subscription_id: parsed.take("subscriptionId", input)?,
            resource_group_name: parsed.take("resourceGroupName", input)?,
            virtual_network_name: parsed.take("virtualNetworkName", input)?,
            subnet_name: parsed.take("subnetName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&SUBNET, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("subscriptionId", &self.subscription_id);
        values.set("resourceGroupName", &self.resource_group_name);
        values.set("virtualNetworkName", &self.virtual_network_name);
        values.set("subnetName", &self.subnet_name);
        values
    }
}

impl fmt::Display for SubnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&SUBNET, &self.to_parsed()))
    }
}

/// Validate that `value` is a well-formed virtual network ID
pub fn validate_virtual_network_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&VIRTUAL_NETWORK, field, value)
}

/// Validate that `value` is a well-formed subnet ID
pub fn validate_subnet_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&SUBNET, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUB: &str = "12345678-1234-9876-4563-123456789012";

    #[test]
    fn virtual_network_round_trip() {
        let id = VirtualNetworkId::new(SUB, "group1", "network1");
        let formatted = id.id();
        assert_eq!(
            formatted,
            format!(
                "/subscriptions/{SUB}/resourceGroups/group1/providers/Microsoft.Network/virtualNetworks/network1"
            )
        );
        assert_eq!(VirtualNetworkId::parse(&formatted).unwrap(), id);
    }

    #[test]
    fn subnet_round_trip() {
        let id = SubnetId::new(SUB, "group1", "network1", "internal");
        let formatted = id.id();
        assert_eq!(
            formatted,
            format!(
                "/subscriptions/{SUB}/resourceGroups/group1/providers/Microsoft.Network/virtualNetworks/network1/subnets/internal"
            )
        );
        assert_eq!(SubnetId::parse(&formatted).unwrap(), id);
    }

    #[test]
    fn subnet_id_is_not_a_virtual_network_id() {
        let subnet = SubnetId::new(SUB, "group1", "network1", "internal").id();
        assert!(VirtualNetworkId::parse(&subnet).is_err());
        let vnet = VirtualNetworkId::new(SUB, "group1", "network1").id();
        assert!(SubnetId::parse(&vnet).is_err());
    }

    #[test]
    fn validators_agree_with_parsers() {
        let subnet = SubnetId::new(SUB, "group1", "network1", "internal").id();
        assert!(validate_subnet_id("subnet_id", &subnet).is_ok());
        assert!(validate_virtual_network_id("virtual_network_id", &subnet).is_err());
        assert!(validate_subnet_id("subnet_id", "").is_err());
    }
}
