//! Validated scalar newtypes
//!
//! A value of these types always satisfies its constraint, so records built
//! from them cannot hold an invalid email or out-of-range confidence.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_LEN: usize = 64;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,63}$",
        )
        .expect("email pattern compiles")
    })
}

/// Syntactically valid email address.
///
/// Normalized on parse: surrounding whitespace is dropped and the domain
/// part is lowercased. Whitespace inside the address is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Parses and normalizes an address. `" a@B.com "` becomes `a@b.com`.
    ///
    /// Returns a short reason on failure, suitable for a violation message.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        if trimmed.len() > MAX_EMAIL_LEN {
            return Err(format!("address longer than {} characters", MAX_EMAIL_LEN));
        }
        let (local, domain) = trimmed
            .rsplit_once('@')
            .ok_or_else(|| "missing '@'".to_string())?;
        if local.is_empty() || local.len() > MAX_LOCAL_LEN {
            return Err("invalid local part".to_string());
        }
        if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
            return Err("invalid dots in local part".to_string());
        }
        if !email_pattern().is_match(trimmed) {
            return Err(format!("'{}' is not a valid address", trimmed));
        }
        Ok(Self(format!("{}@{}", local, domain.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(email: EmailAddress) -> Self {
        email.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Confidence score in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Confidence(u8);

impl Confidence {
    pub const MIN: i64 = 0;
    pub const MAX: i64 = 100;

    pub fn new(value: i64) -> Result<Self, String> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(format!(
                "confidence {} outside [{}, {}]",
                value,
                Self::MIN,
                Self::MAX
            ))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Confidence {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Confidence> for i64 {
    fn from(c: Confidence) -> Self {
        i64::from(c.0)
    }
}
