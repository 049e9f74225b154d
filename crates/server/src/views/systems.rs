use chrono::{DateTime, Utc};
use shared::{
    domain::SystemName,
    protocol::{AddressRecord, FirewallRuleRecord, InterfaceRecord, SystemInfo, SystemView},
};
use url::Url;

use super::escape;

/// Path to a systems controller action for `name`, with the name percent-encoded.
pub(crate) fn system_href(action: &str, name: &SystemName) -> String {
    let fallback = || format!("/systems/{action}/{name}");
    let Ok(mut url) = Url::parse("http://impulse.invalid/") else {
        return fallback();
    };
    match url.path_segments_mut() {
        Ok(mut segments) => {
            segments.clear().extend(["systems", action, name.as_str()]);
        }
        Err(()) => return fallback(),
    }
    url.path().to_string()
}

pub(crate) fn index(systems: &[SystemInfo]) -> String {
    if systems.is_empty() {
        return "<div class=\"systems\">\n<p>No systems recorded.</p>\n</div>\n".to_string();
    }
    let mut out = String::from(
        "<div class=\"systems\">\n<table>\n<thead><tr><th>System</th><th>Owner</th><th>Operating System</th></tr></thead>\n<tbody>\n",
    );
    for system in systems {
        out.push_str(&format!(
            "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>\n",
            escape(&system_href("view", &system.system_name)),
            escape(system.system_name.as_str()),
            escape(&system.owner),
            escape(&system.os_name),
        ));
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
    out
}

/// Renders the system, each interface, each address and its non-empty rule buckets, in that order.
pub(crate) fn system_view(view: &SystemView) -> String {
    let mut out = system(&view.system);
    for interface_view in &view.interfaces {
        out.push_str(&interface(&interface_view.interface));
        for address_view in &interface_view.addresses {
            out.push_str(&address(&address_view.address));
            let rules = &address_view.rules;
            if !rules.standalone_rules.is_empty() {
                out.push_str(&standalone_rules(&rules.standalone_rules));
            }
            if !rules.standalone_programs.is_empty() {
                out.push_str(&standalone_programs(&rules.standalone_programs));
            }
        }
    }
    out
}

pub(crate) fn system(info: &SystemInfo) -> String {
    format!(
        "<div class=\"system\">\n<h2>{name}</h2>\n<dl>\n\
         <dt>Owner</dt><dd>{owner}</dd>\n\
         <dt>Operating System</dt><dd>{os_name} ({os_family})</dd>\n\
         <dt>Comment</dt><dd>{comment}</dd>\n\
         <dt>Created</dt><dd>{created}</dd>\n\
         <dt>Modified</dt><dd>{modified}</dd>\n\
         </dl>\n</div>\n",
        name = escape(info.system_name.as_str()),
        owner = escape(&info.owner),
        os_name = escape(&info.os_name),
        os_family = escape(&info.os_family),
        comment = escape(info.comment.as_deref().unwrap_or("")),
        created = timestamp(&info.date_created),
        modified = timestamp(&info.date_modified),
    )
}

pub(crate) fn interface(record: &InterfaceRecord) -> String {
    format!(
        "<div class=\"interface\">\n<h3>Interface {mac}</h3>\n<p class=\"comment\">{comment}</p>\n</div>\n",
        mac = escape(record.mac.as_str()),
        comment = escape(record.comment.as_deref().unwrap_or("")),
    )
}

pub(crate) fn address(record: &AddressRecord) -> String {
    format!(
        "<div class=\"address\">\n<h4>{address}</h4>\n<dl>\n\
         <dt>Family</dt><dd>IPv{family}</dd>\n\
         <dt>Config</dt><dd>{config}</dd>\n\
         <dt>Primary</dt><dd>{primary}</dd>\n\
         </dl>\n</div>\n",
        address = escape(&record.address.to_string()),
        family = record.family,
        config = record.config,
        primary = if record.is_primary { "yes" } else { "no" },
    )
}

pub(crate) fn standalone_rules(rules: &[FirewallRuleRecord]) -> String {
    let mut out = String::from(
        "<div class=\"firewall standalone-rules\">\n<h5>Standalone Rules</h5>\n<table>\n\
         <thead><tr><th>Action</th><th>Transport</th><th>Port</th><th>Comment</th></tr></thead>\n<tbody>\n",
    );
    for rule in rules {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            rule.action,
            rule.transport,
            port(rule.port),
            escape(rule.comment.as_deref().unwrap_or("")),
        ));
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
    out
}

pub(crate) fn standalone_programs(rules: &[FirewallRuleRecord]) -> String {
    let mut out = String::from(
        "<div class=\"firewall standalone-programs\">\n<h5>Standalone Programs</h5>\n<table>\n\
         <thead><tr><th>Program</th><th>Action</th><th>Transport</th><th>Port</th><th>Comment</th></tr></thead>\n<tbody>\n",
    );
    for rule in rules {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(rule.program.as_deref().unwrap_or("")),
            rule.action,
            rule.transport,
            port(rule.port),
            escape(rule.comment.as_deref().unwrap_or("")),
        ));
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
    out
}

pub(crate) fn edit_acknowledgment(name: &SystemName) -> String {
    format!(
        "<p class=\"edit\">Editing system \"{}\"</p>\n",
        escape(name.as_str())
    )
}

fn port(port: Option<u16>) -> String {
    port.map_or_else(|| "any".to_string(), |p| p.to_string())
}

fn timestamp(at: &DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
