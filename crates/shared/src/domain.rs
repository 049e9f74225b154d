use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ApiException, ErrorCode};

macro_rules! name_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

name_newtype!(SystemName);
name_newtype!(MacAddress);

impl SystemName {
    pub fn parse(raw: &str) -> Result<Self, ApiException> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ApiException::new(
                ErrorCode::Validation,
                "system name cannot be empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl MacAddress {
    /// Accepts `aa:bb:cc:dd:ee:ff` or `AA-BB-CC-DD-EE-FF`, stored lowercase with colons.
    pub fn parse(raw: &str) -> Result<Self, ApiException> {
        let invalid = || ApiException::new(ErrorCode::Validation, format!("invalid mac address '{raw}'"));
        let octets: Vec<&str> = raw.trim().split([':', '-']).collect();
        if octets.len() != 6 {
            return Err(invalid());
        }
        let mut normalized = Vec::with_capacity(6);
        for octet in octets {
            if octet.len() != 2 || !octet.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            normalized.push(octet.to_ascii_lowercase());
        }
        Ok(Self(normalized.join(":")))
    }
}

pub const STANDALONE_STANDALONE: &str = "standalone-standalone";
pub const STANDALONE_PROGRAM: &str = "standalone-program";

/// Origin tag of a firewall rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RuleSource {
    StandaloneStandalone,
    StandaloneProgram,
    Other(String),
}

impl RuleSource {
    pub fn as_str(&self) -> &str {
        match self {
            RuleSource::StandaloneStandalone => STANDALONE_STANDALONE,
            RuleSource::StandaloneProgram => STANDALONE_PROGRAM,
            RuleSource::Other(tag) => tag,
        }
    }
}

impl From<String> for RuleSource {
    fn from(value: String) -> Self {
        match value.as_str() {
            STANDALONE_STANDALONE => RuleSource::StandaloneStandalone,
            STANDALONE_PROGRAM => RuleSource::StandaloneProgram,
            _ => RuleSource::Other(value),
        }
    }
}

impl From<&str> for RuleSource {
    fn from(value: &str) -> Self {
        RuleSource::from(value.to_string())
    }
}

impl From<RuleSource> for String {
    fn from(value: RuleSource) -> Self {
        match value {
            RuleSource::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RuleSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! keyword_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }

            pub fn parse(raw: &str) -> Result<Self, ApiException> {
                match raw.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ApiException::new(
                        ErrorCode::Validation,
                        format!(concat!("unknown ", stringify!($name), " '{}'"), other),
                    )),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum!(RuleAction { Allow => "allow", Deny => "deny" });
keyword_enum!(Transport { Tcp => "tcp", Udp => "udp" });
keyword_enum!(AddressConfig { Static => "static", Dhcp => "dhcp", Autoconf => "autoconf" });

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_address_is_normalized() {
        let mac = MacAddress::parse("AA-bb-CC-00-11-f2").expect("mac");
        assert_eq!(mac.as_str(), "aa:bb:cc:00:11:f2");
    }

    #[test]
    fn mac_address_rejects_garbage() {
        let err = MacAddress::parse("aa:bb:cc").expect_err("too short");
        assert!(matches!(err.code, ErrorCode::Validation));
        assert!(MacAddress::parse("zz:bb:cc:dd:ee:ff").is_err());
        assert!(MacAddress::parse("aaa:bb:cc:dd:ee:f").is_err());
    }

    #[test]
    fn system_name_is_trimmed_and_required() {
        assert_eq!(SystemName::parse("  web01 ").expect("name").as_str(), "web01");
        assert!(SystemName::parse("   ").is_err());
    }

    #[test]
    fn rule_source_keeps_unknown_tags() {
        assert_eq!(
            RuleSource::from("standalone-standalone"),
            RuleSource::StandaloneStandalone
        );
        assert_eq!(
            RuleSource::from("standalone-program"),
            RuleSource::StandaloneProgram
        );
        let other = RuleSource::from("metahost-standalone");
        assert_eq!(other, RuleSource::Other("metahost-standalone".to_string()));
        assert_eq!(other.as_str(), "metahost-standalone");
    }

    #[test]
    fn rule_source_serializes_as_raw_tag() {
        let json = serde_json::to_string(&RuleSource::StandaloneProgram).expect("json");
        assert_eq!(json, "\"standalone-program\"");
        let parsed: RuleSource = serde_json::from_str("\"custom\"").expect("parse");
        assert_eq!(parsed, RuleSource::Other("custom".into()));
    }

    #[test]
    fn keyword_enums_parse_case_insensitively() {
        assert_eq!(RuleAction::parse("DENY").expect("action"), RuleAction::Deny);
        assert_eq!(Transport::parse("udp").expect("transport"), Transport::Udp);
        assert_eq!(
            AddressConfig::parse(" Dhcp ").expect("config"),
            AddressConfig::Dhcp
        );
        assert!(Transport::parse("sctp").is_err());
    }
}
