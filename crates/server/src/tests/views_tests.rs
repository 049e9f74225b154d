use super::*;
use chrono::Utc;
use shared::{
    domain::{AddressConfig, MacAddress, RuleAction, RuleSource, SystemName, Transport},
    protocol::{
        AddressRecord, AddressView, DistributionEntry, FirewallRuleRecord, InterfaceRecord,
        InterfaceView, RuleBuckets, SystemInfo, SystemView,
    },
};

fn system_info(name: &str) -> SystemInfo {
    SystemInfo {
        system_name: SystemName(name.to_string()),
        owner: "ops".into(),
        os_name: "Debian".into(),
        os_family: "Linux".into(),
        comment: Some("rack 4 & 5".into()),
        date_created: Utc::now(),
        date_modified: Utc::now(),
    }
}

fn rule(rule_id: i64, source: &str, program: Option<&str>) -> FirewallRuleRecord {
    FirewallRuleRecord {
        rule_id,
        address: "10.9.9.9".parse().expect("ip"),
        source: RuleSource::from(source),
        action: RuleAction::Deny,
        transport: Transport::Udp,
        port: None,
        program: program.map(str::to_string),
        comment: None,
        date_created: Utc::now(),
    }
}

fn view_with(rules: RuleBuckets) -> SystemView {
    let mac = MacAddress("00:00:5e:00:53:01".into());
    SystemView {
        system: system_info("edge01"),
        interfaces: vec![InterfaceView {
            interface: InterfaceRecord {
                mac: mac.clone(),
                system_name: SystemName("edge01".into()),
                comment: None,
                date_created: Utc::now(),
            },
            addresses: vec![AddressView {
                address: AddressRecord {
                    address: "10.9.9.9".parse().expect("ip"),
                    mac,
                    family: 4,
                    config: AddressConfig::Dhcp,
                    is_primary: false,
                    comment: None,
                },
                rules,
            }],
        }],
    }
}

#[test]
fn escape_covers_markup_characters() {
    assert_eq!(
        escape("<a href=\"x\">Tom & Jerry's</a>"),
        "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
    assert_eq!(escape("plain"), "plain");
}

#[test]
fn empty_buckets_render_no_firewall_views() {
    let html = systems::system_view(&view_with(RuleBuckets::default()));
    assert!(html.contains("<h2>edge01</h2>"));
    assert!(html.contains("rack 4 &amp; 5"));
    assert!(html.contains("<dd>dhcp</dd>"));
    assert!(!html.contains("firewall"));
}

#[test]
fn each_non_empty_bucket_renders_its_own_view() {
    let html = systems::system_view(&view_with(RuleBuckets {
        standalone_rules: vec![rule(1, "standalone-standalone", None)],
        standalone_programs: Vec::new(),
        unclassified: 0,
    }));
    assert!(html.contains("standalone-rules"));
    assert!(!html.contains("standalone-programs"));
    assert!(html.contains("<td>deny</td><td>udp</td><td>any</td>"));

    let html = systems::system_view(&view_with(RuleBuckets {
        standalone_rules: Vec::new(),
        standalone_programs: vec![rule(2, "standalone-program", Some("named"))],
        unclassified: 2,
    }));
    assert!(!html.contains("standalone-rules"));
    assert!(html.contains("standalone-programs"));
    assert!(html.contains("<td>named</td>"));
}

#[test]
fn navbar_renders_only_present_actions() {
    let bare = chrome::navbar(&Navbar::new("Statistics", None, None));
    assert!(bare.contains("<h1>Statistics</h1>"));
    assert!(!bare.contains("class=\"action"));

    let with_edit = chrome::navbar(&Navbar::new(
        "System - a<b",
        None,
        Some("/systems/edit/a%3Cb".into()),
    ));
    assert!(with_edit.contains("<h1>System - a&lt;b</h1>"));
    assert!(with_edit.contains("href=\"/systems/edit/a%3Cb\""));
    assert!(!with_edit.contains("class=\"action create\""));
}

#[test]
fn main_layout_wraps_every_piece_of_chrome() {
    let page = Page {
        title: "OS Distribution".into(),
        navbar: Navbar::new("Statistics - Operating System Distribution", None, None),
        data: "<p>payload</p>\n".into(),
    };
    let html = chrome::main_layout(&page, &Sidebar::standard(), "grid");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>OS Distribution | Impulse</title>"));
    assert!(html.contains("href=\"/css/grid/full/main.css\""));
    assert!(html.contains("href=\"/statistics/os_family_distribution\""));
    assert!(html.contains("<section class=\"data\">\n<p>payload</p>"));
}

#[test]
fn empty_distribution_renders_placeholder() {
    let html = statistics::os_distribution(&[]);
    assert!(html.contains("No systems recorded."));
    assert!(!html.contains("<table>"));
}

#[test]
fn distribution_table_lists_entries_in_given_order() {
    let html = statistics::os_family_distribution(&[
        DistributionEntry { label: "Linux".into(), count: 3 },
        DistributionEntry { label: "Windows".into(), count: 1 },
    ]);
    let linux = html.find("Linux").expect("linux row");
    let windows = html.find("Windows").expect("windows row");
    assert!(linux < windows);
    assert!(html.contains("<td>75.0%</td>"));
    assert!(html.contains("<td>Total</td><td>4</td>"));
}

#[test]
fn share_handles_zero_total() {
    assert_eq!(statistics::share(0, 0), "0.0%");
    assert_eq!(statistics::share(1, 8), "12.5%");
}

#[test]
fn system_href_percent_encodes_names() {
    assert_eq!(
        systems::system_href("view", &SystemName("web01".into())),
        "/systems/view/web01"
    );
    assert_eq!(
        systems::system_href("edit", &SystemName("lab box/2".into())),
        "/systems/edit/lab%20box%2F2"
    );
}
