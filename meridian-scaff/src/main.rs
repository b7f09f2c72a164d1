//! Resource boilerplate generator for the AzureRM provider
//!
//! `scaff` renders a resource module (ID schema, typed ID, validator, CRUD
//! skeleton) and its test module from flags describing the new resource.
//!
//! Usage:
//!   scaff resource --name container_registry \
//!     --service-package-name meridian-provider-azurerm/src/ids \
//!     --rp-name Microsoft.ContainerRegistry \
//!     --client-name RegistriesClient \
//!     --api-version 2023-07-01 \
//!     --id-type ContainerRegistryId \
//!     --id-segments static:staticSubscriptions:subscriptions,subscription:subscriptionId,static:staticResourceGroups:resourceGroups,resource-group:resourceGroupName,static:staticProviders:providers,provider:resourceProvider:Microsoft.ContainerRegistry,static:staticRegistries:registries,user:registryName
//!
//! Exit codes: 0 success, 1 flag validation failure, 2 generation/IO failure.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use heck::{ToShoutySnakeCase, ToSnakeCase, ToTitleCase, ToUpperCamelCase};

#[derive(Parser, Debug)]
#[command(name = "scaff")]
#[command(about = "Generate AzureRM provider resource boilerplate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Scaffold a new resource module and its test module
    Resource(ResourceArgs),
}

#[derive(clap::Args, Debug)]
struct ResourceArgs {
    /// Resource name in snake_case (e.g., container_registry)
    #[arg(long)]
    name: String,

    /// Directory the generated files are written into
    #[arg(long)]
    service_package_name: String,

    /// Resource provider namespace (e.g., Microsoft.ContainerRegistry)
    #[arg(long)]
    rp_name: String,

    /// SDK client the CRUD skeleton is wired against
    #[arg(long)]
    client_name: String,

    /// ARM API version (e.g., 2023-07-01)
    #[arg(long)]
    api_version: String,

    /// Name of the generated ID type (e.g., ContainerRegistryId)
    #[arg(long)]
    id_type: String,

    /// Comma-separated segments: kind:name[:fixed-value]
    ///
    /// Kinds: static, subscription, resource-group, provider, user, scope.
    /// static and provider require the fixed value.
    #[arg(long)]
    id_segments: String,

    /// Generate an update method (PUT; ARM upserts)
    #[arg(long)]
    update: bool,

    /// Note that create/delete complete through a long-running operation
    #[arg(long)]
    long_running: bool,

    /// Generate an options struct threaded through create
    #[arg(long)]
    options: bool,
}

fn main() {
    let cli = Cli::parse();
    let Commands::Resource(args) = cli.command;

    let segments = match validate_args(&args) {
        Ok(segments) => segments,
        Err(message) => {
            eprintln!("scaff: {message}");
            std::process::exit(1);
        }
    };

    if let Err(err) = scaffold(&args, &segments) {
        eprintln!("scaff: {err:#}");
        std::process::exit(2);
    }
}

// =============================================================================
// Segment Grammar
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmentKind {
    Static,
    Subscription,
    ResourceGroup,
    Provider,
    User,
    Scope,
}

impl SegmentKind {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "static" => Some(SegmentKind::Static),
            "subscription" => Some(SegmentKind::Subscription),
            "resource-group" => Some(SegmentKind::ResourceGroup),
            "provider" => Some(SegmentKind::Provider),
            "user" => Some(SegmentKind::User),
            "scope" => Some(SegmentKind::Scope),
            _ => None,
        }
    }

    fn requires_value(&self) -> bool {
        matches!(self, SegmentKind::Static | SegmentKind::Provider)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SegmentSpec {
    kind: SegmentKind,
    name: String,
    value: Option<String>,
}

impl SegmentSpec {
    /// True when the segment binds a caller-supplied value (a struct field)
    fn is_field(&self) -> bool {
        !matches!(self.kind, SegmentKind::Static | SegmentKind::Provider)
    }

    fn field_name(&self) -> String {
        self.name.to_snake_case()
    }
}

fn parse_segments(input: &str) -> Result<Vec<SegmentSpec>, String> {
    let mut segments = Vec::new();
    for spec in input.split(',') {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(format!("empty segment in --id-segments: {input}"));
        }
        let mut parts = spec.splitn(3, ':');
        let kind_str = parts.next().unwrap_or_default();
        let kind = SegmentKind::parse(kind_str)
            .ok_or_else(|| format!("unknown segment kind '{kind_str}' in '{spec}'"))?;
        let name = parts
            .next()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| format!("segment '{spec}' is missing a name"))?
            .to_string();
        let value = parts.next().map(|v| v.to_string());

        if kind.requires_value() && value.is_none() {
            return Err(format!("segment '{spec}' requires a fixed value ({kind_str}:name:value)"));
        }
        if !kind.requires_value() && value.is_some() {
            return Err(format!("segment '{spec}' does not take a fixed value"));
        }
        segments.push(SegmentSpec { kind, name, value });
    }
    Ok(segments)
}

/// Validate all flags before anything touches the filesystem
fn validate_args(args: &ResourceArgs) -> Result<Vec<SegmentSpec>, String> {
    if args.name.is_empty()
        || !args
            .name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        return Err(format!("--name must be snake_case, got '{}'", args.name));
    }
    if args.service_package_name.is_empty() {
        return Err("--service-package-name must not be empty".to_string());
    }
    if !args.rp_name.contains('.') {
        return Err(format!(
            "--rp-name must be a provider namespace like Microsoft.Storage, got '{}'",
            args.rp_name
        ));
    }
    if args.client_name.is_empty() {
        return Err("--client-name must not be empty".to_string());
    }
    if args.api_version.is_empty() {
        return Err("--api-version must not be empty".to_string());
    }
    if !args.id_type.ends_with("Id") || args.id_type.to_upper_camel_case() != args.id_type {
        return Err(format!(
            "--id-type must be an UpperCamelCase name ending in Id, got '{}'",
            args.id_type
        ));
    }

    let segments = parse_segments(&args.id_segments)?;
    if !segments.iter().any(|s| s.is_field()) {
        return Err("--id-segments must contain at least one non-fixed segment".to_string());
    }
    match segments.iter().position(|s| s.kind == SegmentKind::Scope) {
        Some(pos) if pos != 0 => {
            return Err("a scope segment must come first".to_string());
        }
        _ => {}
    }
    Ok(segments)
}

// =============================================================================
// Generation
// =============================================================================

fn scaffold(args: &ResourceArgs, segments: &[SegmentSpec]) -> Result<()> {
    let dir = PathBuf::from(&args.service_package_name);
    let resource_path = dir.join(format!("{}_resource.rs", args.name));
    let test_path = dir.join(format!("{}_resource_test.rs", args.name));

    let resource_code = render_resource(args, segments);
    let test_code = render_tests(args, segments);

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    std::fs::write(&resource_path, &resource_code)
        .with_context(|| format!("Failed to write: {}", resource_path.display()))?;
    std::fs::write(&test_path, &test_code)
        .with_context(|| format!("Failed to write: {}", test_path.display()))?;

    rustfmt(&resource_path);
    rustfmt(&test_path);

    eprintln!("Generated: {}", resource_path.display());
    eprintln!("Generated: {}", test_path.display());
    Ok(())
}

/// Best-effort formatting pass; a missing rustfmt is not an error
fn rustfmt(path: &Path) {
    match Command::new("rustfmt").arg("--edition=2024").arg(path).status() {
        Ok(status) if status.success() => {}
        Ok(status) => eprintln!("rustfmt {} exited with {status}", path.display()),
        Err(_) => eprintln!("rustfmt not found, skipping format of {}", path.display()),
    }
}

fn human_name(args: &ResourceArgs) -> String {
    args.name.to_title_case()
}

fn render_segment(out: &mut String, segment: &SegmentSpec) {
    match segment.kind {
        SegmentKind::Static => {
            let value = segment.value.as_deref().unwrap_or_default();
            let _ = writeln!(
                out,
                "        Segment::Static {{\n            name: \"{}\",\n            value: \"{}\",\n        }},",
                segment.name, value
            );
        }
        SegmentKind::Subscription => {
            let _ = writeln!(
                out,
                "        Segment::SubscriptionId {{\n            name: \"{}\",\n        }},",
                segment.name
            );
        }
        SegmentKind::ResourceGroup => {
            let _ = writeln!(
                out,
                "        Segment::ResourceGroupName {{\n            name: \"{}\",\n        }},",
                segment.name
            );
        }
        SegmentKind::Provider => {
            let namespace = segment.value.as_deref().unwrap_or_default();
            let _ = writeln!(
                out,
                "        Segment::ResourceProvider {{\n            name: \"{}\",\n            namespace: \"{}\",\n        }},",
                segment.name, namespace
            );
        }
        SegmentKind::User => {
            let _ = writeln!(
                out,
                "        Segment::UserSpecified {{\n            name: \"{}\",\n        }},",
                segment.name
            );
        }
        SegmentKind::Scope => {
            let _ = writeln!(
                out,
                "        Segment::Scope {{ name: \"{}\" }},",
                segment.name
            );
        }
    }
}

fn render_resource(args: &ResourceArgs, segments: &[SegmentSpec]) -> String {
    let schema_const = args.name.to_shouty_snake_case();
    let id_type = &args.id_type;
    let pascal = args.name.to_upper_camel_case();
    let human = human_name(args);
    let fields: Vec<&SegmentSpec> = segments.iter().filter(|s| s.is_field()).collect();

    let mut code = String::new();
    let _ = writeln!(code, "//! {human} IDs");
    code.push('\n');
    code.push_str("use std::fmt;\n\n");
    code.push_str("use meridian_core::provider::ProviderResult;\n");
    code.push_str("use meridian_core::validate::ValidationResult;\n\n");
    code.push_str("use crate::client::ArmClient;\n");
    code.push_str("use crate::resourceid::{\n    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,\n};\n\n");

    // Segment schema
    let _ = writeln!(code, "pub const {schema_const}: IdSchema = IdSchema {{");
    let _ = writeln!(code, "    type_name: \"{human}\",");
    code.push_str("    segments: &[\n");
    for segment in segments {
        render_segment(&mut code, segment);
    }
    code.push_str("    ],\n};\n\n");

    // Typed ID
    code.push_str("#[derive(Debug, Clone, PartialEq, Eq)]\n");
    let _ = writeln!(code, "pub struct {id_type} {{");
    for field in &fields {
        let _ = writeln!(code, "    pub {}: String,", field.field_name());
    }
    code.push_str("}\n\n");

    let _ = writeln!(code, "impl {id_type} {{");
    code.push_str("    pub fn new(\n");
    for field in &fields {
        let _ = writeln!(code, "        {}: impl Into<String>,", field.field_name());
    }
    code.push_str("    ) -> Self {\n        Self {\n");
    for field in &fields {
        let _ = writeln!(code, "            {}: {}.into(),", field.field_name(), field.field_name());
    }
    code.push_str("        }\n    }\n\n");

    let _ = writeln!(
        code,
        "    pub fn parse(input: &str) -> Result<Self, ParseError> {{\n        let mut parsed = parser::parse(&{schema_const}, input)?;\n        Self::from_parsed(&mut parsed, input)\n    }}\n"
    );
    let _ = writeln!(
        code,
        "    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {{\n        let mut parsed = parser::parse_insensitively(&{schema_const}, value)?;\n        Self::from_parsed(&mut parsed, value.as_str())\n    }}\n"
    );

    code.push_str("    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {\n        Ok(Self {\n");
    for field in &fields {
        let _ = writeln!(
            code,
            "            {}: parsed.take(\"{}\", input)?,",
            field.field_name(),
            field.name
        );
    }
    code.push_str("        })\n    }\n\n");

    let _ = writeln!(
        code,
        "    pub fn id(&self) -> String {{\n        format::format(&{schema_const}, &self.to_parsed())\n    }}\n"
    );

    code.push_str("    fn to_parsed(&self) -> ParsedId {\n        let mut values = ParsedId::new();\n");
    for field in &fields {
        let _ = writeln!(
            code,
            "        values.set(\"{}\", &self.{});",
            field.name,
            field.field_name()
        );
    }
    code.push_str("        values\n    }\n}\n\n");

    let _ = writeln!(
        code,
        "impl fmt::Display for {id_type} {{\n    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {{\n        write!(f, \"{{}}\", format::describe(&{schema_const}, &self.to_parsed()))\n    }}\n}}\n"
    );

    let _ = writeln!(
        code,
        "/// Validate that `value` is a well-formed {} ID",
        human.to_lowercase()
    );
    let _ = writeln!(
        code,
        "pub fn validate_{}_id(field: &str, value: &str) -> ValidationResult {{\n    validate::validate_id(&{schema_const}, field, value)\n}}\n",
        args.name
    );

    // CRUD skeleton
    let _ = writeln!(code, "pub const API_VERSION: &str = \"{}\";", args.api_version);
    code.push('\n');
    if args.options {
        let _ = writeln!(
            code,
            "#[derive(Debug, Default, Clone)]\npub struct {pascal}Options {{\n    pub tags: Option<std::collections::HashMap<String, String>>,\n}}\n"
        );
    }
    let _ = writeln!(code, "/// {human} operations against {} ({})", args.rp_name, args.client_name);
    if args.long_running {
        code.push_str("///\n/// Create and delete complete through a long-running operation; the\n/// client polls the operation to a terminal status before returning.\n");
    }
    let _ = writeln!(code, "pub struct {pascal}Resource;\n");
    let _ = writeln!(code, "impl {pascal}Resource {{");

    if args.options {
        let _ = writeln!(
            code,
            "    pub async fn create(\n        client: &ArmClient,\n        id: &{id_type},\n        body: &serde_json::Value,\n        options: &{pascal}Options,\n    ) -> ProviderResult<serde_json::Value> {{\n        let mut body = body.clone();\n        if let (Some(tags), Some(map)) = (&options.tags, body.as_object_mut()) {{\n            map.insert(\"tags\".to_string(), serde_json::json!(tags));\n        }}\n        client.put_resource(&id.id(), API_VERSION, &body).await\n    }}\n"
        );
    } else {
        let _ = writeln!(
            code,
            "    pub async fn create(\n        client: &ArmClient,\n        id: &{id_type},\n        body: &serde_json::Value,\n    ) -> ProviderResult<serde_json::Value> {{\n        client.put_resource(&id.id(), API_VERSION, body).await\n    }}\n"
        );
    }

    let _ = writeln!(
        code,
        "    pub async fn read(\n        client: &ArmClient,\n        id: &{id_type},\n    ) -> ProviderResult<Option<serde_json::Value>> {{\n        client.get_resource(&id.id(), API_VERSION).await\n    }}\n"
    );

    if args.update {
        code.push_str("    // PUT is an upsert; a partial PATCH variant needs its own body type\n");
        let _ = writeln!(
            code,
            "    pub async fn update(\n        client: &ArmClient,\n        id: &{id_type},\n        body: &serde_json::Value,\n    ) -> ProviderResult<serde_json::Value> {{\n        client.put_resource(&id.id(), API_VERSION, body).await\n    }}\n"
        );
    }

    let _ = writeln!(
        code,
        "    pub async fn delete(client: &ArmClient, id: &{id_type}) -> ProviderResult<()> {{\n        client.delete_resource(&id.id(), API_VERSION).await\n    }}\n}}"
    );

    code
}

/// Example value for a field segment, used in the generated tests
fn example_value(segment: &SegmentSpec) -> String {
    match segment.kind {
        SegmentKind::Subscription => "12345678-1234-9876-4563-123456789012".to_string(),
        SegmentKind::ResourceGroup => "group1".to_string(),
        SegmentKind::Scope => {
            "/subscriptions/12345678-1234-9876-4563-123456789012".to_string()
        }
        _ => "example".to_string(),
    }
}

fn render_tests(args: &ResourceArgs, segments: &[SegmentSpec]) -> String {
    let id_type = &args.id_type;
    let human = human_name(args);
    let fields: Vec<&SegmentSpec> = segments.iter().filter(|s| s.is_field()).collect();
    let module = format!("{}_resource", args.name);

    let mut code = String::new();
    let _ = writeln!(code, "//! {human} ID tests");
    code.push('\n');
    let _ = writeln!(
        code,
        "use super::{module}::{{{id_type}, validate_{}_id}};\n",
        args.name
    );

    let arg_list = fields
        .iter()
        .map(|f| format!("\"{}\"", example_value(f)))
        .collect::<Vec<_>>()
        .join(", ");

    code.push_str("#[test]\nfn round_trip() {\n");
    let _ = writeln!(code, "    let id = {id_type}::new({arg_list});");
    code.push_str("    let formatted = id.id();\n");
    let _ = writeln!(code, "    assert_eq!({id_type}::parse(&formatted).unwrap(), id);");
    code.push_str("}\n\n");

    code.push_str("#[test]\nfn rejects_malformed_input() {\n");
    let _ = writeln!(code, "    assert!({id_type}::parse(\"\").is_err());");
    let _ = writeln!(code, "    assert!({id_type}::parse(\"/\").is_err());");
    code.push_str("}\n\n");

    code.push_str("#[test]\nfn validator_agrees_with_parser() {\n");
    let _ = writeln!(code, "    let id = {id_type}::new({arg_list});");
    let _ = writeln!(
        code,
        "    assert!(validate_{}_id(\"id\", &id.id()).is_ok());",
        args.name
    );
    let _ = writeln!(code, "    assert!(validate_{}_id(\"id\", \"\").is_err());", args.name);
    code.push_str("}\n");

    code
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_args() -> ResourceArgs {
        ResourceArgs {
            name: "storage_account".to_string(),
            service_package_name: "out".to_string(),
            rp_name: "Microsoft.Storage".to_string(),
            client_name: "StorageAccountsClient".to_string(),
            api_version: "2023-01-01".to_string(),
            id_type: "StorageAccountId".to_string(),
            id_segments: "static:staticSubscriptions:subscriptions,subscription:subscriptionId,static:staticResourceGroups:resourceGroups,resource-group:resourceGroupName,static:staticProviders:providers,provider:resourceProvider:Microsoft.Storage,static:staticStorageAccounts:storageAccounts,user:storageAccountName".to_string(),
            update: false,
            long_running: false,
            options: false,
        }
    }

    #[test]
    fn parses_all_segment_kinds() {
        let segments = parse_segments(
            "scope:scope,static:staticProviders:providers,provider:resourceProvider:Microsoft.Authorization,user:name",
        )
        .unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].kind, SegmentKind::Scope);
        assert_eq!(segments[2].value.as_deref(), Some("Microsoft.Authorization"));
        assert!(segments[3].is_field());
        assert!(!segments[1].is_field());
    }

    #[test]
    fn static_segment_requires_value() {
        assert!(parse_segments("static:staticSubscriptions").is_err());
        assert!(parse_segments("user:name:extra").is_err());
        assert!(parse_segments("banana:name").is_err());
        assert!(parse_segments("").is_err());
    }

    #[test]
    fn validates_flags_before_generation() {
        let mut args = storage_args();
        assert!(validate_args(&args).is_ok());

        args.name = "StorageAccount".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = storage_args();
        args.id_type = "storage_account_id".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = storage_args();
        args.rp_name = "Storage".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = storage_args();
        args.id_segments = "static:a:subscriptions".to_string();
        assert!(validate_args(&args).is_err());

        let mut args = storage_args();
        args.id_segments = "user:name,scope:scope".to_string();
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn rendered_resource_contains_schema_and_id_type() {
        let args = storage_args();
        let segments = validate_args(&args).unwrap();
        let code = render_resource(&args, &segments);

        assert!(code.contains("pub const STORAGE_ACCOUNT: IdSchema"));
        assert!(code.contains("pub struct StorageAccountId {"));
        assert!(code.contains("pub subscription_id: String,"));
        assert!(code.contains("pub storage_account_name: String,"));
        assert!(code.contains("namespace: \"Microsoft.Storage\""));
        assert!(code.contains("pub const API_VERSION: &str = \"2023-01-01\";"));
        assert!(code.contains("pub fn validate_storage_account_id"));
        // no update or options unless asked
        assert!(!code.contains("async fn update"));
        assert!(!code.contains("Options"));
    }

    #[test]
    fn flags_toggle_optional_sections() {
        let mut args = storage_args();
        args.update = true;
        args.options = true;
        args.long_running = true;
        let segments = validate_args(&args).unwrap();
        let code = render_resource(&args, &segments);

        assert!(code.contains("pub async fn update"));
        assert!(code.contains("pub struct StorageAccountOptions"));
        assert!(code.contains("long-running operation"));
    }

    #[test]
    fn rendered_tests_use_example_values() {
        let args = storage_args();
        let segments = validate_args(&args).unwrap();
        let code = render_tests(&args, &segments);

        assert!(code.contains("use super::storage_account_resource::"));
        assert!(code.contains(
            "StorageAccountId::new(\"12345678-1234-9876-4563-123456789012\", \"group1\", \"example\")"
        ));
        assert!(code.contains("fn validator_agrees_with_parser"));
    }

    #[test]
    fn scaffold_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = storage_args();
        args.service_package_name = dir.path().join("network").to_string_lossy().to_string();

        let segments = validate_args(&args).unwrap();
        scaffold(&args, &segments).unwrap();

        let resource = dir.path().join("network/storage_account_resource.rs");
        let test = dir.path().join("network/storage_account_resource_test.rs");
        assert!(resource.exists());
        assert!(test.exists());
        let contents = std::fs::read_to_string(resource).unwrap();
        assert!(contents.contains("StorageAccountId"));
    }
}
