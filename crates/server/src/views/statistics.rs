use shared::protocol::DistributionEntry;

use super::escape;

pub(crate) fn get_started() -> String {
    "<div class=\"getstarted\">\n\
     <p>Pick a report from the sidebar to see how the systems in the inventory break down.</p>\n\
     <ul>\n\
     <li><a href=\"/statistics/os_distribution\">Operating System Distribution</a></li>\n\
     <li><a href=\"/statistics/os_family_distribution\">Operating System Family Distribution</a></li>\n\
     </ul>\n</div>\n"
        .to_string()
}

pub(crate) fn os_distribution(entries: &[DistributionEntry]) -> String {
    distribution_table("os_distribution", "Operating System", entries)
}

pub(crate) fn os_family_distribution(entries: &[DistributionEntry]) -> String {
    distribution_table("os_family_distribution", "Operating System Family", entries)
}

fn distribution_table(class: &str, label_heading: &str, entries: &[DistributionEntry]) -> String {
    let total: u64 = entries.iter().map(|entry| entry.count).sum();
    if total == 0 {
        return format!("<div class=\"{class}\">\n<p>No systems recorded.</p>\n</div>\n");
    }

    let mut out = format!(
        "<div class=\"{class}\">\n<table>\n<thead><tr><th>{}</th><th>Systems</th><th>Share</th></tr></thead>\n<tbody>\n",
        escape(label_heading)
    );
    for entry in entries {
        out.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&entry.label),
            entry.count,
            share(entry.count, total)
        ));
    }
    out.push_str(&format!(
        "</tbody>\n<tfoot><tr><td>Total</td><td>{total}</td><td>100.0%</td></tr></tfoot>\n</table>\n</div>\n"
    ));
    out
}

pub(crate) fn share(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}
