use std::net::IpAddr;

use shared::{
    domain::{MacAddress, RuleSource, SystemName},
    error::{ApiError, ErrorCode},
    protocol::{
        AddressRecord, AddressView, FirewallRuleRecord, InterfaceRecord, InterfaceView,
        RuleBuckets, SystemInfo, SystemView,
    },
};
use storage::Storage;
use tracing::{debug, error};

const STORAGE_UNAVAILABLE: &str = "inventory storage is unavailable";

pub mod statistics;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

impl ApiContext {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

pub async fn list_systems(ctx: &ApiContext) -> Result<Vec<SystemInfo>, ApiError> {
    ctx.storage.list_systems().await.map_err(internal)
}

pub async fn get_system_info(
    ctx: &ApiContext,
    system_name: &SystemName,
) -> Result<SystemInfo, ApiError> {
    ctx.storage
        .system_info(system_name)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("system '{system_name}' not found")))
}

pub async fn get_system_interfaces(
    ctx: &ApiContext,
    system_name: &SystemName,
) -> Result<Vec<InterfaceRecord>, ApiError> {
    ctx.storage
        .system_interfaces(system_name)
        .await
        .map_err(internal)
}

pub async fn get_interface_addresses(
    ctx: &ApiContext,
    mac: &MacAddress,
) -> Result<Vec<AddressRecord>, ApiError> {
    ctx.storage.interface_addresses(mac).await.map_err(internal)
}

pub async fn get_address_rules(
    ctx: &ApiContext,
    address: &IpAddr,
) -> Result<Vec<FirewallRuleRecord>, ApiError> {
    ctx.storage.address_rules(address).await.map_err(internal)
}

/// Splits rules into the standalone-rule and standalone-program buckets.
///
/// Rules with any other source land in neither bucket and are only counted.
/// Input order is preserved inside each bucket.
pub fn partition_rules(rules: Vec<FirewallRuleRecord>) -> RuleBuckets {
    let mut buckets = RuleBuckets::default();
    for rule in rules {
        match &rule.source {
            RuleSource::StandaloneStandalone => buckets.standalone_rules.push(rule),
            RuleSource::StandaloneProgram => buckets.standalone_programs.push(rule),
            RuleSource::Other(tag) => {
                debug!(rule_id = rule.rule_id, source = %tag, "firewall rule has no display bucket");
                buckets.unclassified += 1;
            }
        }
    }
    buckets
}

/// Fetches a system, then each interface, each address on it, and each
/// address's firewall rules.
pub async fn load_system_view(
    ctx: &ApiContext,
    system_name: &SystemName,
) -> Result<SystemView, ApiError> {
    let system = get_system_info(ctx, system_name).await?;
    let interfaces = get_system_interfaces(ctx, system_name).await?;

    let mut interface_views = Vec::with_capacity(interfaces.len());
    for interface in interfaces {
        let addresses = get_interface_addresses(ctx, &interface.mac).await?;
        let mut address_views = Vec::with_capacity(addresses.len());
        for address in addresses {
            let rules = get_address_rules(ctx, &address.address).await?;
            address_views.push(AddressView {
                address,
                rules: partition_rules(rules),
            });
        }
        interface_views.push(InterfaceView {
            interface,
            addresses: address_views,
        });
    }

    Ok(SystemView {
        system,
        interfaces: interface_views,
    })
}

pub(crate) fn internal(err: anyhow::Error) -> ApiError {
    // the chain is logged here, clients only get the generic message
    error!(error = %format!("{err:#}"), "inventory storage failure");
    ApiError::new(ErrorCode::Internal, STORAGE_UNAVAILABLE)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
