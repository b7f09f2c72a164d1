//! Authorization IDs
//!
//! Role assignments are scoped: the same ID shape can be rooted at a
//! subscription, a resource group, a management group, or an individual
//! resource. The `scope` field holds that entire prefix.

use std::fmt;

use meridian_core::validate::ValidationResult;

use crate::resourceid::{
    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,
};

pub const ROLE_ASSIGNMENT: IdSchema = IdSchema {
    type_name: "Role Assignment",
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
            name: "staticRoleAssignments",
            value: "roleAssignments",
        },
        Segment::UserSpecified {
            name: "roleAssignmentName",
        },
    ],
};

/// `{scope}/providers/Microsoft.Authorization/roleAssignments/{name}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAssignmentId {
    pub scope: String,
    pub role_assignment_name: String,
}

impl RoleAssignmentId {
    pub fn new(scope: impl Into<String>, role_assignment_name: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            role_assignment_name: role_assignment_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&ROLE_ASSIGNMENT, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&ROLE_ASSIGNMENT, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            scope: parsed.take("scope", input)?,
            role_assignment_name: parsed.take("roleAssignmentName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&ROLE_ASSIGNMENT, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("scope", &self.scope);
        values.set("roleAssignmentName", &self.role_assignment_name);
        values
    }
}

impl fmt::Display for RoleAssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&ROLE_ASSIGNMENT, &self.to_parsed()))
    }
}

/// Validate that `value` is a well-formed role assignment ID
pub fn validate_role_assignment_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&ROLE_ASSIGNMENT, field, value)
}
