//! Privacy tiers for logged values and the redaction policy.
//!
//! Every metadata value carries a [`Privacy`] tier. Destinations turn a value
//! into display text through [`redact`] at format time, so the decision of
//! what reaches an output channel depends only on the tier and on whether the
//! logger runs in production:
//!
//! | tier        | development | production    |
//! |-------------|-------------|---------------|
//! | `Public`    | raw value   | raw value     |
//! | `Private`   | raw value   | `<private>`   |
//! | `Sensitive` | `<sensitive>` | `<sensitive>` |
//!
//! Placeholders are fixed strings. They never depend on the raw value.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Placeholder emitted for private values in production.
pub const PRIVATE_PLACEHOLDER: &str = "<private>";

/// Placeholder emitted for sensitive values in every environment.
pub const SENSITIVE_PLACEHOLDER: &str = "<sensitive>";

/// Privacy tier of a logged value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Always visible
    Public,
    /// Visible during development, hidden in production
    Private,
    /// Never visible
    Sensitive,
}

impl Privacy {
    /// Whether values of this tier are replaced by a placeholder.
    pub fn is_redacted(&self, is_production: bool) -> bool {
        match self {
            Self::Public => false,
            Self::Private => is_production,
            Self::Sensitive => true,
        }
    }
}

/// A string value tagged with a privacy tier.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivacyValue {
    value: String,
    privacy: Privacy,
}

impl PrivacyValue {
    /// Create a value with an explicit tier
    pub fn new(value: impl Into<String>, privacy: Privacy) -> Self {
        Self {
            value: value.into(),
            privacy,
        }
    }

    /// A value that is always shown.
    pub fn public(value: impl Into<String>) -> Self {
        Self::new(value, Privacy::Public)
    }

    /// A value that is hidden in production.
    pub fn private(value: impl Into<String>) -> Self {
        Self::new(value, Privacy::Private)
    }

    /// A value that is always hidden.
    pub fn sensitive(value: impl Into<String>) -> Self {
        Self::new(value, Privacy::Sensitive)
    }

    /// The tier this value was created with
    pub fn privacy(&self) -> Privacy {
        self.privacy
    }

    /// The unredacted value.
    ///
    /// Output code should go through [`PrivacyValue::redacted`] instead.
    pub fn raw(&self) -> &str {
        &self.value
    }

    /// Display text for this value in the given environment.
    pub fn redacted(&self, is_production: bool) -> Cow<'_, str> {
        match self.privacy {
            Privacy::Public => Cow::Borrowed(&self.value),
            Privacy::Private if !is_production => Cow::Borrowed(&self.value),
            Privacy::Private => Cow::Borrowed(PRIVATE_PLACEHOLDER),
            Privacy::Sensitive => Cow::Borrowed(SENSITIVE_PLACEHOLDER),
        }
    }
}

/// Shorthand for [`PrivacyValue::public`]
pub fn public(value: impl Into<String>) -> PrivacyValue {
    PrivacyValue::public(value)
}

/// Shorthand for [`PrivacyValue::private`]
pub fn private(value: impl Into<String>) -> PrivacyValue {
    PrivacyValue::private(value)
}

/// Shorthand for [`PrivacyValue::sensitive`]
pub fn sensitive(value: impl Into<String>) -> PrivacyValue {
    PrivacyValue::sensitive(value)
}

/// Redact a value for display.
///
/// Pure and total: the same `(value, is_production)` pair always yields the
/// same string.
pub fn redact(value: &PrivacyValue, is_production: bool) -> String {
    value.redacted(is_production).into_owned()
}

// Formatting a value directly applies the production policy, so a stray
// `{}` can never print a private or sensitive value.
impl fmt::Display for PrivacyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted(true))
    }
}

impl fmt::Debug for PrivacyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivacyValue")
            .field("value", &self.redacted(true))
            .field("privacy", &self.privacy)
            .finish()
    }
}

impl From<&str> for PrivacyValue {
    fn from(value: &str) -> Self {
        Self::public(value)
    }
}

impl From<String> for PrivacyValue {
    fn from(value: String) -> Self {
        Self::public(value)
    }
}
