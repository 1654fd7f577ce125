//! DNS propagation checks for dnsbridge
//!
//! 向公共解析器依次查询记录，判断变更是否已生效。无状态，独立于 DNS 业务逻辑。

mod error;
mod services;
mod types;

pub use error::{ToolboxError, ToolboxResult};
pub use services::{DnsLookupBackend, HickoryBackend, ToolboxService};
pub use types::{DEFAULT_RESOLVERS, DnsCheckOptions, DnsCheckResult, DnsCheckType};
