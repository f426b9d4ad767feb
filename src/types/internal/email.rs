use std::fmt;

use crate::errors::internal::ValidationError;

/// A trimmed, syntactically valid email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parse raw input reported against `field`
    ///
    /// Blank input is reported as a missing field; anything that is not
    /// `local@domain.tld` (or `local@localhost`) is reported as an invalid
    /// format.
    pub fn parse(field: &str, raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required(field));
        }

        if !Self::is_well_formed(trimmed) {
            return Err(ValidationError::invalid_format(
                field,
                "Enter a valid email address.",
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Parse an optional input; `None` and blank both mean "no address"
    pub fn parse_optional(field: &str, raw: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(field, value).map(Some),
        }
    }

    fn is_well_formed(value: &str) -> bool {
        if value.chars().any(char::is_whitespace) {
            return false;
        }

        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };

        if local.is_empty() || domain.contains('@') {
            return false;
        }

        if domain.eq_ignore_ascii_case("localhost") {
            return true;
        }

        if !domain.contains('.') {
            return false;
        }

        domain
            .split('.')
            .all(|label| !label.is_empty() && !label.starts_with('-') && !label.ends_with('-'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let email = EmailAddress::parse("email", "  admin@acme.io ").unwrap();
        assert_eq!(email.as_str(), "admin@acme.io");
    }

    #[test]
    fn test_blank_is_required() {
        let err = EmailAddress::parse("email", "   ").unwrap_err();
        assert_eq!(err, ValidationError::required("email"));
        assert_eq!(err.to_string(), "Email is required");
    }

    #[test]
    fn test_malformed_addresses_are_rejected() {
        for raw in ["admin", "admin@", "@acme.io", "admin@acme", "a b@acme.io", "a@b@c.io", "a@acme..io"] {
            let err = EmailAddress::parse("email", raw).unwrap_err();
            assert_eq!(err.field(), "email", "expected rejection of {}", raw);
        }
    }

    #[test]
    fn test_localhost_domain_is_accepted() {
        let email = EmailAddress::parse("email", "admin@localhost").unwrap();
        assert_eq!(email.as_str(), "admin@localhost");
        assert!(EmailAddress::parse("email", "admin@LocalHost").is_ok());
        assert!(EmailAddress::parse("email", "@localhost").is_err());
    }

    #[test]
    fn test_parse_optional_treats_blank_as_none() {
        assert_eq!(EmailAddress::parse_optional("contact_email", None).unwrap(), None);
        assert_eq!(EmailAddress::parse_optional("contact_email", Some(" ")).unwrap(), None);
        assert!(EmailAddress::parse_optional("contact_email", Some("x")).is_err());
    }
}
