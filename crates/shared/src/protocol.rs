use std::net::IpAddr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{AddressConfig, MacAddress, RuleAction, RuleSource, SystemName, Transport};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemInfo {
    pub system_name: SystemName,
    pub owner: String,
    pub os_name: String,
    pub os_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub date_created: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceRecord {
    pub mac: MacAddress,
    pub system_name: SystemName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressRecord {
    pub address: IpAddr,
    pub mac: MacAddress,
    pub family: u8,
    pub config: AddressConfig,
    pub is_primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FirewallRuleRecord {
    pub rule_id: i64,
    pub address: IpAddr,
    pub source: RuleSource,
    pub action: RuleAction,
    pub transport: Transport,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub date_created: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributionEntry {
    pub label: String,
    pub count: u64,
}

/// Systems grouped by operating system name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OsDistribution(pub Vec<DistributionEntry>);

/// Systems grouped by operating system family.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct OsFamilyDistribution(pub Vec<DistributionEntry>);

/// Firewall rules of one address split by [`RuleSource`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleBuckets {
    pub standalone_rules: Vec<FirewallRuleRecord>,
    pub standalone_programs: Vec<FirewallRuleRecord>,
    /// Rules whose source matched neither bucket.
    #[serde(default)]
    pub unclassified: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressView {
    pub address: AddressRecord,
    pub rules: RuleBuckets,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterfaceView {
    pub interface: InterfaceRecord,
    pub addresses: Vec<AddressView>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemView {
    pub system: SystemInfo,
    pub interfaces: Vec<InterfaceView>,
}
