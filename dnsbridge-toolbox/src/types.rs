//! Public types returned by toolbox operations.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Record types supported by the propagation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsCheckType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Canonical name (alias) record.
    Cname,
    /// Mail exchange record; the value is the exchange host.
    Mx,
    /// Text record.
    Txt,
    /// Name server record.
    Ns,
}

impl fmt::Display for DnsCheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Cname => write!(f, "CNAME"),
            Self::Mx => write!(f, "MX"),
            Self::Txt => write!(f, "TXT"),
            Self::Ns => write!(f, "NS"),
        }
    }
}

impl FromStr for DnsCheckType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "CNAME" => Ok(Self::Cname),
            "MX" => Ok(Self::Mx),
            "TXT" => Ok(Self::Txt),
            "NS" => Ok(Self::Ns),
            _ => Err(format!("Unsupported record type: {}", s.trim())),
        }
    }
}

/// Result of a propagation check.
///
/// Resolver failures are reported here through `message`, never as an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsCheckResult {
    /// The queried domain name.
    pub domain: String,
    /// Upper-case record type.
    pub record_type: String,
    /// Values returned by the answering resolver.
    pub values: Vec<String>,
    /// Expected value, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    pub matched: bool,
    pub message: String,
    /// RFC 3339 time of the check.
    pub timestamp: String,
    /// Resolver that answered (`ip:port`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_server: Option<String>,
}

/// Public resolvers queried in order.
pub const DEFAULT_RESOLVERS: [IpAddr; 3] = [
    IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
    IpAddr::V4(Ipv4Addr::new(1, 1, 1, 1)),
    IpAddr::V4(Ipv4Addr::new(208, 67, 222, 222)),
];

/// Tuning for [`ToolboxService::check_dns_with`](crate::ToolboxService::check_dns_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsCheckOptions {
    /// Resolvers tried sequentially; the first non-empty answer wins.
    pub resolvers: Vec<SocketAddr>,
    /// Budget for the whole check.
    pub overall_timeout: Duration,
    /// Budget for a single resolver.
    pub per_resolver_timeout: Duration,
}

impl Default for DnsCheckOptions {
    fn default() -> Self {
        Self {
            resolvers: DEFAULT_RESOLVERS
                .iter()
                .map(|ip| SocketAddr::new(*ip, 53))
                .collect(),
            overall_timeout: Duration::from_secs(10),
            per_resolver_timeout: Duration::from_secs(5),
        }
    }
}
