//! HTML views. Each function turns a view model into a markup fragment; the
//! chrome module stitches fragments into a full page.

pub(crate) mod chrome;
pub(crate) mod statistics;
pub(crate) mod systems;

pub(crate) use chrome::{Navbar, Page, Sidebar};

/// Escapes text for use inside element content and quoted attributes.
pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../tests/views_tests.rs"]
mod tests;
