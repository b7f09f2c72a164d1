//! Typed resource IDs
//!
//! One module per service area. Each ID type declares its segment schema as
//! a `const` table and delegates parsing and formatting to the generic
//! engine in [`crate::resourceid`]; no per-type walk logic.

pub mod billing;
pub mod resource_group;
pub mod role_assignment;
pub mod storage;
pub mod virtual_network;

use crate::resourceid::IdSchema;

pub use billing::{EnrollmentAccountId, EnrollmentBillingScopeId, McaBillingScopeId};
pub use resource_group::ResourceGroupId;
pub use role_assignment::RoleAssignmentId;
pub use storage::StorageAccountId;
pub use virtual_network::{SubnetId, VirtualNetworkId};

/// Every schema known to this provider, most specific first
///
/// The recaser tries these in order and stops at the first match, so child
/// resources come before their parents and scoped IDs come last.
pub fn known_schemas() -> Vec<&'static IdSchema> {
    vec![
        &virtual_network::SUBNET,
        &virtual_network::VIRTUAL_NETWORK,
        &storage::STORAGE_ACCOUNT,
        &resource_group::RESOURCE_GROUP,
        &billing::MCA_BILLING_SCOPE,
        &billing::ENROLLMENT_BILLING_SCOPE,
        &billing::ENROLLMENT_ACCOUNT,
        &role_assignment::ROLE_ASSIGNMENT,
    ]
}
