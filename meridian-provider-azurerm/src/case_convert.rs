//! Case conversion for tool attribute names and ARM property names
//!
//! Meridian uses snake_case (e.g., `account_tier`, `address_space`)
//! ARM bodies use lowerCamelCase (e.g., `accountTier`, `addressSpace`)
//!
//! Only keys are converted; ARM enum values are plain strings with their
//! own service-defined casing and pass through untouched.

/// Convert snake_case to lowerCamelCase
/// e.g., "account_tier" -> "accountTier"
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::new();
    for (i, part) in s.split('_').enumerate() {
        if i == 0 {
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// Convert lowerCamelCase to snake_case
/// e.g., "accountTier" -> "account_tier"
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("account_tier"), "accountTier");
        assert_eq!(to_camel_case("address_space"), "addressSpace");
        assert_eq!(to_camel_case("location"), "location");
        assert_eq!(to_camel_case("enable_https_traffic_only"), "enableHttpsTrafficOnly");
    }

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("accountTier"), "account_tier");
        assert_eq!(to_snake_case("addressSpace"), "address_space");
        assert_eq!(to_snake_case("location"), "location");
    }

    #[test]
    fn key_names_round_trip() {
        for key in ["account_tier", "dns_servers", "address_space", "location"] {
            assert_eq!(to_snake_case(&to_camel_case(key)), key);
        }
    }
}
