use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// DNS record type.
///
/// Known types get their own variant; anything else is kept verbatim
/// (upper-cased) in [`RecordType::Other`] so that validation can happen
/// downstream instead of at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
    /// Canonical name alias
    Cname,
    /// Mail exchanger
    Mx,
    /// Free-form text
    Txt,
    /// Name server delegation
    Ns,
    /// Start of authority
    Soa,
    /// Service locator
    Srv,
    /// Reverse pointer
    Ptr,
    /// Certification authority authorization
    Caa,
    /// Any other type, upper-cased
    Other(String),
}

impl RecordType {
    /// Canonical upper-case mnemonic
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Mx => "MX",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Soa => "SOA",
            Self::Srv => "SRV",
            Self::Ptr => "PTR",
            Self::Caa => "CAA",
            Self::Other(s) => s,
        }
    }
}

impl FromStr for RecordType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Ok(match upper.as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "MX" => Self::Mx,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "SOA" => Self::Soa,
            "SRV" => Self::Srv,
            "PTR" => Self::Ptr,
            "CAA" => Self::Caa,
            _ => Self::Other(upper),
        })
    }
}

impl From<String> for RecordType {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for RecordType {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<RecordType> for String {
    fn from(t: RecordType) -> Self {
        match t {
            RecordType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default TTL applied when a row has no usable TTL
pub const DEFAULT_TTL: u32 = 300;

/// Unified representation of one DNS record from any provider export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRecord {
    /// `<provider>-<row index>`, unique within one parse
    pub id: String,

    /// Owner name without the trailing root dot
    pub name: String,

    /// Record type, always upper-case
    #[serde(rename = "type")]
    pub record_type: RecordType,

    /// Record data (address, target, text)
    pub value: String,

    /// Time to live in seconds
    pub ttl: u32,

    /// MX/SRV priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,

    /// SRV or weighted-routing weight
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u16>,

    /// SRV port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Cloudflare proxy flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,

    /// Route53 routing-policy set identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_identifier: Option<String>,

    /// When the record was parsed
    pub created: DateTime<Utc>,

    /// Last modification, equal to `created` at parse time
    pub updated: DateTime<Utc>,
}

impl CanonicalRecord {
    /// Create a record with required fields and the default TTL
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        record_type: impl Into<RecordType>,
        value: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            record_type: record_type.into(),
            value: value.into(),
            ttl: DEFAULT_TTL,
            priority: None,
            weight: None,
            port: None,
            proxied: None,
            set_identifier: None,
            created: now,
            updated: now,
        }
    }

    /// Set the TTL
    #[must_use]
    pub const fn with_ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    /// Labels of the owner name, ignoring empty ones
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.name.split('.').filter(|l| !l.is_empty())
    }

    /// Number of labels left of the registrable domain (last two labels)
    #[must_use]
    pub fn subdomain_depth(&self) -> usize {
        self.labels().count().saturating_sub(2)
    }

    /// Host labels left of the registrable domain, joined with dots.
    ///
    /// Empty for apex records.
    #[must_use]
    pub fn host_part(&self) -> String {
        let depth = self.subdomain_depth();
        self.labels().take(depth).collect::<Vec<_>>().join(".")
    }
}
