use std::net::IpAddr;

use shared::domain::{AddressConfig, MacAddress, RuleAction, RuleSource, SystemName, Transport};
use storage::{NewAddress, NewFirewallRule, NewSystem, Storage};

#[tokio::test]
async fn file_backed_inventory_survives_reopen() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("inventory.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let system = SystemName::parse("mail01").expect("name");
    let mac = MacAddress::parse("de:ad:be:ef:00:01").expect("mac");
    let address: IpAddr = "172.16.0.25".parse().expect("ip");

    {
        let storage = Storage::new(&database_url).await.expect("db");
        storage
            .create_system(&NewSystem {
                system_name: system.clone(),
                owner: "postmaster".into(),
                os_name: "Ubuntu".into(),
                os_family: "Linux".into(),
                comment: Some("mx relay".into()),
            })
            .await
            .expect("system");
        storage
            .create_interface(&system, &mac, None)
            .await
            .expect("iface");
        storage
            .create_address(&NewAddress {
                address,
                mac: mac.clone(),
                config: AddressConfig::Static,
                is_primary: true,
                comment: None,
            })
            .await
            .expect("address");
        storage
            .create_firewall_rule(&NewFirewallRule {
                address,
                source: RuleSource::StandaloneStandalone,
                action: RuleAction::Allow,
                transport: Transport::Tcp,
                port: Some(25),
                program: None,
                comment: Some("smtp".into()),
            })
            .await
            .expect("rule");
        storage.pool().close().await;
    }

    let reopened = Storage::new(&database_url).await.expect("reopen");
    let info = reopened
        .system_info(&system)
        .await
        .expect("query")
        .expect("system");
    assert_eq!(info.comment.as_deref(), Some("mx relay"));
    assert!(info.date_modified >= info.date_created);

    let interfaces = reopened.system_interfaces(&system).await.expect("ifaces");
    assert_eq!(interfaces.len(), 1);
    let addresses = reopened.interface_addresses(&mac).await.expect("addresses");
    assert_eq!(addresses[0].address, address);
    let rules = reopened.address_rules(&address).await.expect("rules");
    assert_eq!(rules[0].port, Some(25));
    assert_eq!(rules[0].comment.as_deref(), Some("smtp"));
}
