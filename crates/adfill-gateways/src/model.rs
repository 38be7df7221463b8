//! Core models shared by the ports
//!
//! Identifiers arrive from the ads platform as opaque strings; they are
//! wrapped in newtypes so a customer id can never be passed where an
//! ad-group id is expected.

use serde::{Deserialize, Serialize};

/// Unique ad-group identifier (opaque string from the ads platform)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AdGroupId(pub String);

impl AdGroupId {
    /// Create new ad-group id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AdGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AdGroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Unique customer (account) identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub String);

impl CustomerId {
    /// Create new customer id
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get id as string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One unit of work: an advertising ad group
///
/// Immutable for the duration of a run; sourced from the ads port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdGroup {
    /// Ad-group identifier
    pub id: AdGroupId,
    /// Display name (input to prompt construction)
    pub name: String,
    /// Owning customer account
    pub customer_id: CustomerId,
}

impl AdGroup {
    /// Create new ad group
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        customer_id: impl Into<String>,
    ) -> Self {
        Self {
            id: AdGroupId::new(id),
            name: name.into(),
            customer_id: CustomerId::new(customer_id),
        }
    }
}

/// A keyword attached to an ad group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Keyword text
    pub text: String,
}

impl Keyword {
    /// Create new keyword
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_types() {
        let group = AdGroupId::new("42");
        let customer = CustomerId::new("42");

        assert_eq!(group.as_str(), customer.as_str());
        // The whole point: you can't accidentally mix these types.
        // (Compile-time property; kept as a comment.)
        // let _: AdGroupId = customer; // <- does not compile
    }

    #[test]
    fn ad_group_construction() {
        let group = AdGroup::new("123", "Running Shoes - Summer", "999");

        assert_eq!(group.id.as_str(), "123");
        assert_eq!(group.name, "Running Shoes - Summer");
        assert_eq!(group.customer_id.as_str(), "999");
    }

    #[test]
    fn ids_display_without_decoration() {
        assert_eq!(AdGroupId::new("7").to_string(), "7");
        assert_eq!(CustomerId::new("8").to_string(), "8");
    }
}
