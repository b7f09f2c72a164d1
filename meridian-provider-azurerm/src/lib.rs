//! Meridian AzureRM Provider
//!
//! Azure Resource Manager Provider implementation.
//!
//! ## Module Structure
//!
//! - `resourceid` - Resource ID parsing, formatting, validation, re-casing
//! - `ids` - Typed resource ID definitions per Azure service
//! - `resources` - Resource type definitions and configurations
//! - `provider` - AzureRmProvider implementation
//! - `client` - ARM REST client with long-running-operation polling
//! - `case_convert` - snake_case / lowerCamelCase attribute key conversion

pub mod case_convert;
pub mod client;
pub mod ids;
pub mod provider;
pub mod resourceid;
pub mod resources;

// Re-export main types
pub use client::ArmClient;
pub use provider::AzureRmProvider;
pub use resourceid::{ParseError, ServerSuppliedValue};

use meridian_core::provider::{BoxFuture, Provider, ProviderResult};
use meridian_core::resource::{Resource, ResourceId, State};

use resources::resource_types;

// =============================================================================
// Provider Trait Implementation
// =============================================================================

impl Provider for AzureRmProvider {
    fn name(&self) -> &'static str {
        "azurerm"
    }

    fn resource_types(&self) -> Vec<Box<dyn meridian_core::provider::ResourceType>> {
        resource_types()
    }

    fn read(
        &self,
        id: &ResourceId,
        identifier: Option<&str>,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.map(|s| s.to_string());
        Box::pin(async move {
            self.read_resource(&id.resource_type, &id.name, identifier.as_deref())
                .await
        })
    }

    fn create(&self, resource: &Resource) -> BoxFuture<'_, ProviderResult<State>> {
        let resource = resource.clone();
        Box::pin(async move { self.create_resource(&resource).await })
    }

    fn update(
        &self,
        id: &ResourceId,
        identifier: &str,
        _from: &State,
        to: &Resource,
    ) -> BoxFuture<'_, ProviderResult<State>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        let to = to.clone();
        Box::pin(async move { self.update_resource(id, &identifier, &to).await })
    }

    fn delete(&self, id: &ResourceId, identifier: &str) -> BoxFuture<'_, ProviderResult<()>> {
        let id = id.clone();
        let identifier = identifier.to_string();
        Box::pin(async move { self.delete_resource(&id, &identifier).await })
    }
}
