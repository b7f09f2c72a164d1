//! Billing IDs
//!
//! Billing identifiers are rooted at `/providers/Microsoft.Billing` with no
//! subscription prefix. Billing account names are opaque server-assigned
//! strings and may contain colons and embedded dates, e.g.
//! `e879cf0f-2b4d-5431-109a-f72fc9868693:024cabf4-7321-4cf9-be59-df0c77ca51de_2019-05-31`.

use std::fmt;

use meridian_core::validate::ValidationResult;

use crate::resourceid::{
    IdSchema, ParseError, ParsedId, Segment, ServerSuppliedValue, format, parser, validate,
};

pub const ENROLLMENT_ACCOUNT: IdSchema = IdSchema {
    type_name: "Enrollment Account",
    segments: &[
        Segment::Static {
            name: "staticProviders",
            value: "providers",
        },
        Segment::ResourceProvider {
            name: "resourceProvider",
            namespace: "Microsoft.Billing",
        },
        Segment::Static {
            name: "staticEnrollmentAccounts",
            value: "enrollmentAccounts",
        },
        Segment::UserSpecified {
            name: "enrollmentAccountName",
        },
    ],
};

pub const ENROLLMENT_BILLING_SCOPE: IdSchema = IdSchema {
    type_name: "Enrollment Billing Scope",
    segments: &[
        Segment::Static {
            name: "staticProviders",
            value: "providers",
        },
        Segment::ResourceProvider {
            name: "resourceProvider",
            namespace: "Microsoft.Billing",
        },
        Segment::Static {
            name: "staticBillingAccounts",
            value: "billingAccounts",
        },
        Segment::UserSpecified {
            name: "billingAccountName",
        },
        Segment::Static {
            name: "staticEnrollmentAccounts",
            value: "enrollmentAccounts",
        },
        Segment::UserSpecified {
            name: "enrollmentAccountName",
        },
    ],
};

pub const MCA_BILLING_SCOPE: IdSchema = IdSchema {
    type_name: "Microsoft Customer Account Billing Scope",
    segments: &[
        Segment::Static {
            name: "staticProviders",
            value: "providers",
        },
        Segment::ResourceProvider {
            name: "resourceProvider",
            namespace: "Microsoft.Billing",
        },
        Segment::Static {
            name: "staticBillingAccounts",
            value: "billingAccounts",
        },
        Segment::UserSpecified {
            name: "billingAccountName",
        },
        Segment::Static {
            name: "staticBillingProfiles",
            value: "billingProfiles",
        },
        Segment::UserSpecified {
            name: "billingProfileName",
        },
        Segment::Static {
            name: "staticInvoiceSections",
            value: "invoiceSections",
        },
        Segment::UserSpecified {
            name: "invoiceSectionName",
        },
    ],
};

/// `/providers/Microsoft.Billing/enrollmentAccounts/{enrollmentAccountName}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentAccountId {
    pub enrollment_account_name: String,
}

impl EnrollmentAccountId {
    pub fn new(enrollment_account_name: impl Into<String>) -> Self {
        Self {
            enrollment_account_name: enrollment_account_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&ENROLLMENT_ACCOUNT, input)?;
        Ok(Self {
            enrollment_account_name: parsed.take("enrollmentAccountName", input)?,
        })
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&ENROLLMENT_ACCOUNT, value)?;
        Ok(Self {
            enrollment_account_name: parsed.take("enrollmentAccountName", value.as_str())?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&ENROLLMENT_ACCOUNT, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("enrollmentAccountName", &self.enrollment_account_name);
        values
    }
}

impl fmt::Display for EnrollmentAccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&ENROLLMENT_ACCOUNT, &self.to_parsed()))
    }
}

/// `/providers/Microsoft.Billing/billingAccounts/{account}/enrollmentAccounts/{enrollment}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentBillingScopeId {
    pub billing_account_name: String,
    pub enrollment_account_name: String,
}

impl EnrollmentBillingScopeId {
    pub fn new(
        billing_account_name: impl Into<String>,
        enrollment_account_name: impl Into<String>,
    ) -> Self {
        Self {
            billing_account_name: billing_account_name.into(),
            enrollment_account_name: enrollment_account_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&ENROLLMENT_BILLING_SCOPE, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&ENROLLMENT_BILLING_SCOPE, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            billing_account_name: parsed.take("billingAccountName", input)?,
            enrollment_account_name: parsed.take("enrollmentAccountName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&ENROLLMENT_BILLING_SCOPE, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("billingAccountName", &self.billing_account_name);
        values.set("enrollmentAccountName", &self.enrollment_account_name);
        values
    }
}

impl fmt::Display for EnrollmentBillingScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format::describe(&ENROLLMENT_BILLING_SCOPE, &self.to_parsed())
        )
    }
}

/// `/providers/Microsoft.Billing/billingAccounts/{account}/billingProfiles/{profile}/invoiceSections/{section}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McaBillingScopeId {
    pub billing_account_name: String,
    pub billing_profile_name: String,
    pub invoice_section_name: String,
}

impl McaBillingScopeId {
    pub fn new(
        billing_account_name: impl Into<String>,
        billing_profile_name: impl Into<String>,
        invoice_section_name: impl Into<String>,
    ) -> Self {
        Self {
            billing_account_name: billing_account_name.into(),
            billing_profile_name: billing_profile_name.into(),
            invoice_section_name: invoice_section_name.into(),
        }
    }

    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut parsed = parser::parse(&MCA_BILLING_SCOPE, input)?;
        Self::from_parsed(&mut parsed, input)
    }

    pub fn parse_insensitively(value: ServerSuppliedValue<'_>) -> Result<Self, ParseError> {
        let mut parsed = parser::parse_insensitively(&MCA_BILLING_SCOPE, value)?;
        Self::from_parsed(&mut parsed, value.as_str())
    }

    fn from_parsed(parsed: &mut ParsedId, input: &str) -> Result<Self, ParseError> {
        Ok(Self {
            billing_account_name: parsed.take("billingAccountName", input)?,
            billing_profile_name: parsed.take("billingProfileName", input)?,
            invoice_section_name: parsed.take("invoiceSectionName", input)?,
        })
    }

    pub fn id(&self) -> String {
        format::format(&MCA_BILLING_SCOPE, &self.to_parsed())
    }

    fn to_parsed(&self) -> ParsedId {
        let mut values = ParsedId::new();
        values.set("billingAccountName", &self.billing_account_name);
        values.set("billingProfileName", &self.billing_profile_name);
        values.set("invoiceSectionName", &self.invoice_section_name);
        values
    }
}

impl fmt::Display for McaBillingScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format::describe(&MCA_BILLING_SCOPE, &self.to_parsed()))
    }
}

/// Validate that `value` is a well-formed enrollment account ID
pub fn validate_enrollment_account_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&ENROLLMENT_ACCOUNT, field, value)
}

/// Validate that `value` is a well-formed enrollment billing scope ID
pub fn validate_enrollment_billing_scope_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&ENROLLMENT_BILLING_SCOPE, field, value)
}

/// Validate that `value` is a well-formed MCA billing scope ID
pub fn validate_mca_billing_scope_id(field: &str, value: &str) -> ValidationResult {
    validate::validate_id(&MCA_BILLING_SCOPE, field, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrollment_account_round_trip() {
        let input = "/providers/Microsoft.Billing/enrollmentAccounts/ACCT123";
        let id = EnrollmentAccountId::parse(input).unwrap();
        assert_eq!(id, EnrollmentAccountId::new("ACCT123"));
        assert_eq!(id.id(), input);
    }

    #[test]
    fn enrollment_billing_scope_round_trip() {
        let input =
            "/providers/Microsoft.Billing/billingAccounts/12345678/enrollmentAccounts/123456";
        let id = EnrollmentBillingScopeId::parse(input).unwrap();
        assert_eq!(id, EnrollmentBillingScopeId::new("12345678", "123456"));
        assert_eq!(id.id(), input);
    }

    #[test]
    fn mca_billing_scope_round_trip_with_colon_and_date() {
        let account =
            "e879cf0f-2b4d-5431-109a-f72fc9868693:024cabf4-7321-4cf9-be59-df0c77ca51de_2019-05-31";
        let input = format!(
            "/providers/Microsoft.Billing/billingAccounts/{account}/billingProfiles/PE2Q-NOIT-BG7-TGB/invoiceSections/MTT4-OBS7-PJA-TGB"
        );
        let id = McaBillingScopeId::parse(&input).unwrap();
        assert_eq!(id.billing_account_name, account);
        assert_eq!(id.billing_profile_name, "PE2Q-NOIT-BG7-TGB");
        assert_eq!(id.invoice_section_name, "MTT4-OBS7-PJA-TGB");
        assert_eq!(id.id(), input);
    }

    #[test]
    fn empty_input_is_an_error_for_every_billing_parser() {
        assert!(EnrollmentAccountId::parse("").is_err());
        assert!(EnrollmentBillingScopeId::parse("").is_err());
        assert!(McaBillingScopeId::parse("").is_err());
    }

    #[test]
    fn upper_cased_input_is_rejected_case_sensitively() {
        let upper = "/PROVIDERS/MICROSOFT.BILLING/ENROLLMENTACCOUNTS/ACCT123";
        assert!(EnrollmentAccountId::parse(upper).is_err());
        let id = EnrollmentAccountId::parse_insensitively(ServerSuppliedValue::new(upper)).unwrap();
        assert_eq!(id.enrollment_account_name, "ACCT123");
        assert_eq!(
            id.id(),
            "/providers/Microsoft.Billing/enrollmentAccounts/ACCT123"
        );
    }

    #[test]
    fn missing_segment_value_is_rejected() {
        assert!(
            EnrollmentAccountId::parse("/providers/Microsoft.Billing/enrollmentAccounts").is_err()
        );
        assert!(
            EnrollmentAccountId::parse("/providers/Microsoft.Billing/enrollmentAccounts/").is_err()
        );
    }

    #[test]
    fn validators_agree_with_parsers() {
        let scope = "/providers/Microsoft.Billing/billingAccounts/12345678/enrollmentAccounts/123456";
        assert!(validate_enrollment_billing_scope_id("billing_scope_id", scope).is_ok());
        assert!(validate_enrollment_account_id("billing_scope_id", scope).is_err());
        assert!(validate_mca_billing_scope_id("billing_scope_id", scope).is_err());
        assert!(validate_enrollment_billing_scope_id("billing_scope_id", "").is_err());
    }
}
