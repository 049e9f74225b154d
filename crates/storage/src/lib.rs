use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    net::IpAddr,
    path::{Path, PathBuf},
    str::FromStr,
};

use shared::{
    domain::{AddressConfig, MacAddress, RuleAction, RuleSource, SystemName, Transport},
    protocol::{AddressRecord, DistributionEntry, FirewallRuleRecord, InterfaceRecord, SystemInfo},
};

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

#[derive(Debug, Clone)]
pub struct NewSystem {
    pub system_name: SystemName,
    pub owner: String,
    pub os_name: String,
    pub os_family: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAddress {
    pub address: IpAddr,
    pub mac: MacAddress,
    pub config: AddressConfig,
    pub is_primary: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewFirewallRule {
    pub address: IpAddr,
    pub source: RuleSource,
    pub action: RuleAction,
    pub transport: Transport,
    pub port: Option<u16>,
    pub program: Option<String>,
    pub comment: Option<String>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool_options = if is_memory_url(database_url) {
            // every connection to an in-memory url opens a fresh database
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };
        let pool = pool_options.connect_with(connect_options).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn create_system(&self, system: &NewSystem) -> Result<()> {
        sqlx::query(
            "INSERT INTO systems (system_name, owner, os_name, os_family, comment)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(system.system_name.as_str())
        .bind(&system.owner)
        .bind(&system.os_name)
        .bind(&system.os_family)
        .bind(system.comment.as_deref())
        .execute(&self.pool)
        .await
        .with_context(|| format!("failed to create system '{}'", system.system_name))?;
        Ok(())
    }

    /// Removes a system together with its interfaces, addresses and rules.
    pub async fn delete_system(&self, system_name: &SystemName) -> Result<bool> {
        let result = sqlx::query("DELETE FROM systems WHERE system_name = ?")
            .bind(system_name.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn create_interface(
        &self,
        system_name: &SystemName,
        mac: &MacAddress,
        comment: Option<&str>,
    ) -> Result<()> {
        sqlx::query("INSERT INTO interfaces (mac, system_name, comment) VALUES (?1, ?2, ?3)")
            .bind(mac.as_str())
            .bind(system_name.as_str())
            .bind(comment)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to attach interface {mac} to system '{system_name}'"))?;
        self.touch_system(system_name).await
    }

    pub async fn create_address(&self, address: &NewAddress) -> Result<()> {
        let family: i64 = if address.address.is_ipv4() { 4 } else { 6 };
        sqlx::query(
            "INSERT INTO interface_addresses (address, mac, family, config, is_primary, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(address.address.to_string())
        .bind(address.mac.as_str())
        .bind(family)
        .bind(address.config.as_str())
        .bind(address.is_primary)
        .bind(address.comment.as_deref())
        .execute(&self.pool)
        .await
        .with_context(|| {
            format!(
                "failed to bind address {} to interface {}",
                address.address, address.mac
            )
        })?;
        Ok(())
    }

    pub async fn create_firewall_rule(&self, rule: &NewFirewallRule) -> Result<i64> {
        let rec = sqlx::query(
            "INSERT INTO firewall_rules (address, source, action, transport, port, program, comment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING rule_id",
        )
        .bind(rule.address.to_string())
        .bind(rule.source.as_str())
        .bind(rule.action.as_str())
        .bind(rule.transport.as_str())
        .bind(rule.port.map(i64::from))
        .bind(rule.program.as_deref())
        .bind(rule.comment.as_deref())
        .fetch_one(&self.pool)
        .await
        .with_context(|| format!("failed to add firewall rule for {}", rule.address))?;
        Ok(rec.try_get::<i64, _>(0)?)
    }

    pub async fn system_info(&self, system_name: &SystemName) -> Result<Option<SystemInfo>> {
        let row = sqlx::query(
            "SELECT system_name, owner, os_name, os_family, comment, date_created, date_modified
             FROM systems WHERE system_name = ?",
        )
        .bind(system_name.as_str())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(system_from_row).transpose()
    }

    pub async fn list_systems(&self) -> Result<Vec<SystemInfo>> {
        let rows = sqlx::query(
            "SELECT system_name, owner, os_name, os_family, comment, date_created, date_modified
             FROM systems ORDER BY system_name ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(system_from_row).collect()
    }

    pub async fn system_interfaces(&self, system_name: &SystemName) -> Result<Vec<InterfaceRecord>> {
        let rows = sqlx::query(
            "SELECT mac, system_name, comment, date_created
             FROM interfaces WHERE system_name = ? ORDER BY mac ASC",
        )
        .bind(system_name.as_str())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|r| -> Result<InterfaceRecord> {
                Ok(InterfaceRecord {
                    mac: MacAddress(r.try_get("mac")?),
                    system_name: SystemName(r.try_get("system_name")?),
                    comment: r.try_get("comment")?,
                    date_created: r.try_get::<DateTime<Utc>, _>("date_created")?,
                })
            })
            .collect()
    }

    pub async fn interface_addresses(&self, mac: &MacAddress) -> Result<Vec<AddressRecord>> {
        let rows = sqlx::query(
            "SELECT address, mac, family, config, is_primary, comment
             FROM interface_addresses WHERE mac = ?",
        )
        .bind(mac.as_str())
        .fetch_all(&self.pool)
        .await?;
        let mut records = rows
            .iter()
            .map(|r| -> Result<AddressRecord> {
                let config: String = r.try_get("config")?;
                Ok(AddressRecord {
                    address: parse_address(r)?,
                    mac: MacAddress(r.try_get("mac")?),
                    family: u8::try_from(r.try_get::<i64, _>("family")?)
                        .context("address family out of range")?,
                    config: AddressConfig::parse(&config)?,
                    is_primary: r.try_get("is_primary")?,
                    comment: r.try_get("comment")?,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        // stored as text, so order numerically here; v4 sorts before v6
        records.sort_by_key(|r| r.address);
        Ok(records)
    }

    pub async fn address_rules(&self, address: &IpAddr) -> Result<Vec<FirewallRuleRecord>> {
        let rows = sqlx::query(
            "SELECT rule_id, address, source, action, transport, port, program, comment, date_created
             FROM firewall_rules WHERE address = ? ORDER BY rule_id ASC",
        )
        .bind(address.to_string())
        .fetch_all(&self.pool)
        .await?;
        rows.iter()
            .map(|r| -> Result<FirewallRuleRecord> {
                let action: String = r.try_get("action")?;
                let transport: String = r.try_get("transport")?;
                let port = r
                    .try_get::<Option<i64>, _>("port")?
                    .map(u16::try_from)
                    .transpose()
                    .context("firewall rule port out of range")?;
                Ok(FirewallRuleRecord {
                    rule_id: r.try_get("rule_id")?,
                    address: parse_address(r)?,
                    source: RuleSource::from(r.try_get::<String, _>("source")?),
                    action: RuleAction::parse(&action)?,
                    transport: Transport::parse(&transport)?,
                    port,
                    program: r.try_get("program")?,
                    comment: r.try_get("comment")?,
                    date_created: r.try_get::<DateTime<Utc>, _>("date_created")?,
                })
            })
            .collect()
    }

    pub async fn os_distribution(&self) -> Result<Vec<DistributionEntry>> {
        self.distribution_by("os_name").await
    }

    pub async fn os_family_distribution(&self) -> Result<Vec<DistributionEntry>> {
        self.distribution_by("os_family").await
    }

    async fn distribution_by(&self, column: &'static str) -> Result<Vec<DistributionEntry>> {
        let sql = format!(
            "SELECT {column} AS label, COUNT(*) AS total FROM systems
             GROUP BY {column} ORDER BY total DESC, label ASC"
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter()
            .map(|r| -> Result<DistributionEntry> {
                Ok(DistributionEntry {
                    label: r.try_get("label")?,
                    count: u64::try_from(r.try_get::<i64, _>("total")?)?,
                })
            })
            .collect()
    }

    async fn touch_system(&self, system_name: &SystemName) -> Result<()> {
        sqlx::query("UPDATE systems SET date_modified = CURRENT_TIMESTAMP WHERE system_name = ?")
            .bind(system_name.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

fn system_from_row(r: &SqliteRow) -> Result<SystemInfo> {
    Ok(SystemInfo {
        system_name: SystemName(r.try_get("system_name")?),
        owner: r.try_get("owner")?,
        os_name: r.try_get("os_name")?,
        os_family: r.try_get("os_family")?,
        comment: r.try_get("comment")?,
        date_created: r.try_get::<DateTime<Utc>, _>("date_created")?,
        date_modified: r.try_get::<DateTime<Utc>, _>("date_modified")?,
    })
}

fn parse_address(r: &SqliteRow) -> Result<IpAddr> {
    let raw: String = r.try_get("address")?;
    raw.parse()
        .with_context(|| format!("stored address '{raw}' is not an ip address"))
}

fn is_memory_url(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if is_memory_url(database_url) || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
