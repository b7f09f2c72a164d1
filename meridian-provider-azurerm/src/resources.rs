//! Resource type configurations for Azure Resource Manager
//!
//! This module defines:
//! - Resource type definitions (implementing ResourceType trait)
//! - Mapping between tool resource types and ARM resource types

use meridian_core::provider::ResourceType;

// =============================================================================
// Resource Type Definitions
// =============================================================================

macro_rules! define_resource_type {
    ($name:ident, $type_name:expr) => {
        pub struct $name;
        impl ResourceType for $name {
            fn name(&self) -> &'static str {
                $type_name
            }
        }
    };
}

define_resource_type!(ResourceGroupType, "resource_group");
define_resource_type!(StorageAccountType, "storage_account");
define_resource_type!(VirtualNetworkType, "virtual_network");
define_resource_type!(SubnetType, "subnet");

/// Returns all resource types supported by this provider
pub fn resource_types() -> Vec<Box<dyn ResourceType>> {
    vec![
        Box::new(ResourceGroupType),
        Box::new(StorageAccountType),
        Box::new(VirtualNetworkType),
        Box::new(SubnetType),
    ]
}

// =============================================================================
// Resource Configuration
// =============================================================================

/// Attribute mapping: (tool name, ARM property name, lives under properties{})
///
/// ARM bodies keep most settings under a nested `properties` object, with a
/// few top-level exceptions (`location`, `tags`, `sku`, `kind`).
pub type AttrMapping = (&'static str, &'static str, bool);

/// Resource type configuration
pub struct ResourceConfig {
    /// ARM resource type path (e.g., "Microsoft.Storage/storageAccounts")
    pub arm_type: &'static str,
    /// API version used for all operations on this type
    pub api_version: &'static str,
    /// Attribute mappings (tool name -> ARM property)
    pub attributes: &'static [AttrMapping],
    /// Whether this resource type carries a location
    pub has_location: bool,
    /// Whether this resource type supports tags
    pub has_tags: bool,
}

pub const RESOURCE_GROUP_CONFIG: ResourceConfig = ResourceConfig {
    arm_type: "Microsoft.Resources/resourceGroups",
    api_version: "2024-03-01",
    attributes: &[],
    has_location: true,
    has_tags: true,
};

pub const STORAGE_ACCOUNT_CONFIG: ResourceConfig = ResourceConfig {
    arm_type: "Microsoft.Storage/storageAccounts",
    api_version: "2023-01-01",
    attributes: &[
        ("account_kind", "kind", false),
        ("access_tier", "accessTier", true),
        ("https_traffic_only_enabled", "supportsHttpsTrafficOnly", true),
        ("allow_blob_public_access", "allowBlobPublicAccess", true),
        ("minimum_tls_version", "minimumTlsVersion", true),
    ],
    has_location: true,
    has_tags: true,
};

pub const VIRTUAL_NETWORK_CONFIG: ResourceConfig = ResourceConfig {
    arm_type: "Microsoft.Network/virtualNetworks",
    api_version: "2023-06-01",
    attributes: &[],
    has_location: true,
    has_tags: true,
};

pub const SUBNET_CONFIG: ResourceConfig = ResourceConfig {
    arm_type: "Microsoft.Network/virtualNetworks/subnets",
    api_version: "2023-06-01",
    attributes: &[("address_prefix", "addressPrefix", true)],
    has_location: false,
    has_tags: false,
};

// =============================================================================
// Config Lookup
// =============================================================================

/// Get resource configuration by tool type name
pub fn get_resource_config(resource_type: &str) -> Option<&'static ResourceConfig> {
    match resource_type {
        "resource_group" => Some(&RESOURCE_GROUP_CONFIG),
        "storage_account" => Some(&STORAGE_ACCOUNT_CONFIG),
        "virtual_network" => Some(&VIRTUAL_NETWORK_CONFIG),
        "subnet" => Some(&SUBNET_CONFIG),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_resource_config() {
        assert!(get_resource_config("resource_group").is_some());
        assert!(get_resource_config("storage_account").is_some());
        assert!(get_resource_config("unknown").is_none());
    }

    #[test]
    fn test_resource_config_arm_type() {
        assert_eq!(
            get_resource_config("resource_group").unwrap().arm_type,
            "Microsoft.Resources/resourceGroups"
        );
        assert_eq!(
            get_resource_config("subnet").unwrap().arm_type,
            "Microsoft.Network/virtualNetworks/subnets"
        );
    }

    #[test]
    fn every_config_has_a_resource_type() {
        let names: Vec<&str> = resource_types().iter().map(|t| t.name()).collect();
        for name in ["resource_group", "storage_account", "virtual_network", "subnet"] {
            assert!(names.contains(&name));
            assert!(get_resource_config(name).is_some());
        }
    }
}
