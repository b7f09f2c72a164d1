//! Azure Resource Manager Provider implementation
//!
//! This module contains the main provider implementation that communicates
//! with the ARM REST API to manage resources. Identifiers handed back to
//! the calling tool are always canonical resource ID paths; identifiers
//! read back from state are treated as server-originated (insensitive
//! parse + recase).

use std::collections::HashMap;

use meridian_core::provider::{ProviderError, ProviderResult};
use meridian_core::resource::{Resource, ResourceId, State, Value};
use serde_json::json;

use crate::case_convert;
use crate::client::ArmClient;
use crate::ids::{self, ResourceGroupId, StorageAccountId, SubnetId, VirtualNetworkId};
use crate::resourceid::recaser;
use crate::resources::{ResourceConfig, get_resource_config};

/// Azure Resource Manager Provider
pub struct AzureRmProvider {
    client: ArmClient,
    subscription_id: String,
}

impl AzureRmProvider {
    /// Create a provider for one subscription
    ///
    /// Also performs the one-time recaser registration; the registry is
    /// read-only after this call.
    pub fn new(client: ArmClient, subscription_id: impl Into<String>) -> Self {
        recaser::initialize(ids::known_schemas());
        Self {
            client,
            subscription_id: subscription_id.into(),
        }
    }

    // =========================================================================
    // Resource Operations
    // =========================================================================

    /// Read a resource by its canonical ID
    pub async fn read_resource(
        &self,
        resource_type: &str,
        name: &str,
        identifier: Option<&str>,
    ) -> ProviderResult<State> {
        let id = ResourceId::new(resource_type, name);

        let config = get_resource_config(resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {resource_type}"))
                .for_resource(id.clone())
        })?;

        let identifier = match identifier {
            Some(raw) => recaser::re_case(raw),
            None => return Ok(State::not_found(id)),
        };

        let body = match self
            .client
            .get_resource(&identifier, config.api_version)
            .await?
        {
            Some(body) => body,
            None => return Ok(State::not_found(id)),
        };

        let attributes = body_to_attributes(config, resource_type, &body);
        Ok(State::existing(id, attributes).with_identifier(identifier))
    }

    /// Create a resource; returns state with the canonical ID as identifier
    pub async fn create_resource(&self, resource: &Resource) -> ProviderResult<State> {
        let config = get_resource_config(&resource.id.resource_type).ok_or_else(|| {
            ProviderError::new(format!(
                "Unknown resource type: {}",
                resource.id.resource_type
            ))
            .for_resource(resource.id.clone())
        })?;

        let identifier = self.canonical_id(resource)?;
        let body = build_body(config, resource).map_err(|e| e.for_resource(resource.id.clone()))?;

        self.client
            .put_resource(&identifier, config.api_version, &body)
            .await
            .map_err(|e| e.for_resource(resource.id.clone()))?;

        self.read_resource(&resource.id.resource_type, &resource.id.name, Some(&identifier))
            .await
    }

    /// Update a resource in place
    ///
    /// ARM PUT is an upsert, so updates reuse the create body.
    pub async fn update_resource(
        &self,
        id: ResourceId,
        identifier: &str,
        to: &Resource,
    ) -> ProviderResult<State> {
        let config = get_resource_config(&id.resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })?;

        let identifier = recaser::re_case(identifier);
        let body = build_body(config, to).map_err(|e| e.for_resource(id.clone()))?;

        self.client
            .put_resource(&identifier, config.api_version, &body)
            .await
            .map_err(|e| e.for_resource(id.clone()))?;

        self.read_resource(&id.resource_type, &id.name, Some(&identifier))
            .await
    }

    /// Delete a resource
    pub async fn delete_resource(&self, id: &ResourceId, identifier: &str) -> ProviderResult<()> {
        let config = get_resource_config(&id.resource_type).ok_or_else(|| {
            ProviderError::new(format!("Unknown resource type: {}", id.resource_type))
                .for_resource(id.clone())
        })?;

        let identifier = recaser::re_case(identifier);
        self.client
            .delete_resource(&identifier, config.api_version)
            .await
            .map_err(|e| e.for_resource(id.clone()))
    }

    // =========================================================================
    // ID Construction
    // =========================================================================

    /// Build the canonical resource ID for a declared resource
    ///
    /// The ARM name defaults to the configuration binding name; parent
    /// references (resource group, virtual network) come from attributes.
    pub fn canonical_id(&self, resource: &Resource) -> ProviderResult<String> {
        let name = attr_string(resource, "name").unwrap_or(&resource.id.name);
        let id = match resource.id.resource_type.as_str() {
            "resource_group" => ResourceGroupId::new(&self.subscription_id, name).id(),
            "storage_account" => StorageAccountId::new(
                &self.subscription_id,
                require_attr(resource, "resource_group_name")?,
                name,
            )
            .id(),
            "virtual_network" => VirtualNetworkId::new(
                &self.subscription_id,
                require_attr(resource, "resource_group_name")?,
                name,
            )
            .id(),
            "subnet" => SubnetId::new(
                &self.subscription_id,
                require_attr(resource, "resource_group_name")?,
                require_attr(resource, "virtual_network_name")?,
                name,
            )
            .id(),
            other => {
                return Err(ProviderError::new(format!("Unknown resource type: {other}"))
                    .for_resource(resource.id.clone()));
            }
        };
        Ok(id)
    }
}

fn attr_string<'a>(resource: &'a Resource, key: &str) -> Option<&'a str> {
    match resource.attributes.get(key) {
        Some(Value::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn require_attr<'a>(resource: &'a Resource, key: &str) -> ProviderResult<&'a str> {
    attr_string(resource, key).ok_or_else(|| {
        ProviderError::new(format!("Missing required attribute '{key}'"))
            .for_resource(resource.id.clone())
    })
}

// =============================================================================
// Body Construction
// =============================================================================

/// Build the ARM request body for a create/update PUT
fn build_body(config: &ResourceConfig, resource: &Resource) -> ProviderResult<serde_json::Value> {
    let mut body = serde_json::Map::new();
    let mut properties = serde_json::Map::new();

    if config.has_location {
        let location = require_attr(resource, "location")?;
        body.insert("location".to_string(), json!(location));
    }

    if config.has_tags
        && let Some(Value::Map(tags)) = resource.attributes.get("tags")
    {
        let mut out = serde_json::Map::new();
        for (key, value) in tags {
            if let Value::String(v) = value {
                out.insert(key.clone(), json!(v));
            }
        }
        if !out.is_empty() {
            body.insert("tags".to_string(), serde_json::Value::Object(out));
        }
    }

    for (tool_name, arm_name, nested) in config.attributes {
        if let Some(value) = resource.attributes.get(*tool_name)
            && let Some(v) = value_to_json(value)
        {
            if *nested {
                properties.insert(arm_name.to_string(), v);
            } else {
                body.insert(arm_name.to_string(), v);
            }
        }
    }

    build_special_attributes(resource, &mut body, &mut properties);

    if !properties.is_empty() {
        body.insert(
            "properties".to_string(),
            serde_json::Value::Object(properties),
        );
    }
    Ok(serde_json::Value::Object(body))
}

/// Handle attributes that don't follow the standard property mapping
fn build_special_attributes(
    resource: &Resource,
    body: &mut serde_json::Map<String, serde_json::Value>,
    properties: &mut serde_json::Map<String, serde_json::Value>,
) {
    match resource.id.resource_type.as_str() {
        "storage_account" => {
            // sku name is the tier and replication joined: Standard_LRS
            let tier = attr_string(resource, "account_tier").unwrap_or("Standard");
            let replication = attr_string(resource, "account_replication_type").unwrap_or("LRS");
            body.insert("sku".to_string(), json!({ "name": format!("{tier}_{replication}") }));
            if !body.contains_key("kind") {
                body.insert("kind".to_string(), json!("StorageV2"));
            }
        }
        "virtual_network" => {
            if let Some(Value::List(prefixes)) = resource.attributes.get("address_space") {
                let out: Vec<serde_json::Value> = prefixes
                    .iter()
                    .filter_map(|v| match v {
                        Value::String(s) => Some(json!(s)),
                        _ => None,
                    })
                    .collect();
                properties.insert("addressSpace".to_string(), json!({ "addressPrefixes": out }));
            }
        }
        _ => {}
    }
}

/// Map an ARM response body back onto tool attributes
fn body_to_attributes(
    config: &ResourceConfig,
    resource_type: &str,
    body: &serde_json::Value,
) -> HashMap<String, Value> {
    let mut attributes = HashMap::new();

    if config.has_location
        && let Some(location) = body.get("location").and_then(|v| v.as_str())
    {
        attributes.insert("location".to_string(), Value::String(location.to_string()));
    }

    if config.has_tags
        && let Some(tags) = body.get("tags").and_then(|v| v.as_object())
    {
        let mut out = HashMap::new();
        for (key, value) in tags {
            if let Some(v) = value.as_str() {
                out.insert(key.clone(), Value::String(v.to_string()));
            }
        }
        if !out.is_empty() {
            attributes.insert("tags".to_string(), Value::Map(out));
        }
    }

    let empty = json!({});
    let properties = body.get("properties").unwrap_or(&empty);
    for (tool_name, arm_name, nested) in config.attributes {
        let source = if *nested { properties } else { body };
        if let Some(value) = source.get(*arm_name)
            && let Some(v) = json_to_value(value)
        {
            attributes.insert(tool_name.to_string(), v);
        }
    }

    read_special_attributes(resource_type, body, &mut attributes);
    attributes
}

/// Handle response properties that don't follow the standard mapping
fn read_special_attributes(
    resource_type: &str,
    body: &serde_json::Value,
    attributes: &mut HashMap<String, Value>,
) {
    match resource_type {
        "storage_account" => {
            if let Some(sku) = body.get("sku").and_then(|v| v.get("name")).and_then(|v| v.as_str())
                && let Some((tier, replication)) = sku.split_once('_')
            {
                attributes.insert("account_tier".to_string(), Value::String(tier.to_string()));
                attributes.insert(
                    "account_replication_type".to_string(),
                    Value::String(replication.to_string()),
                );
            }
        }
        "virtual_network" => {
            if let Some(prefixes) = body
                .pointer("/properties/addressSpace/addressPrefixes")
                .and_then(|v| v.as_array())
            {
                let out: Vec<Value> = prefixes
                    .iter()
                    .filter_map(|v| v.as_str().map(|s| Value::String(s.to_string())))
                    .collect();
                if !out.is_empty() {
                    attributes.insert("address_space".to_string(), Value::List(out));
                }
            }
        }
        _ => {}
    }
}

// =============================================================================
// Value Conversion Helpers
// =============================================================================

/// Convert a tool Value to a JSON value
fn value_to_json(value: &Value) -> Option<serde_json::Value> {
    match value {
        Value::String(s) => Some(json!(s)),
        Value::Bool(b) => Some(json!(b)),
        Value::Int(i) => Some(json!(i)),
        Value::List(items) => {
            let arr: Vec<serde_json::Value> = items.iter().filter_map(value_to_json).collect();
            Some(serde_json::Value::Array(arr))
        }
        // nested object keys follow ARM's lowerCamelCase convention
        Value::Map(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                if let Some(j) = value_to_json(v) {
                    out.insert(case_convert::to_camel_case(k), j);
                }
            }
            Some(serde_json::Value::Object(out))
        }
    }
}

/// Convert a JSON value to a tool Value
fn json_to_value(value: &serde_json::Value) -> Option<Value> {
    match value {
        serde_json::Value::String(s) => Some(Value::String(s.clone())),
        serde_json::Value::Bool(b) => Some(Value::Bool(*b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Value::Int(i))
            } else {
                n.as_f64().map(|f| Value::Int(f as i64))
            }
        }
        serde_json::Value::Array(arr) => {
            let items: Vec<Value> = arr.iter().filter_map(json_to_value).collect();
            Some(Value::List(items))
        }
        serde_json::Value::Object(map) => {
            let mut out = HashMap::new();
            for (k, v) in map {
                if let Some(value) = json_to_value(v) {
                    out.insert(case_convert::to_snake_case(k), value);
                }
            }
            Some(Value::Map(out))
        }
        serde_json::Value::Null => None,
    }
}
