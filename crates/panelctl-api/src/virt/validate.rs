// Argument validation for virtualization calls.
//
// One rule per kind of input. Every rule either returns the normalized
// value or an `Error::InvalidArgument` naming the parameter.

use std::net::IpAddr;
use std::str::FromStr;

use crate::error::Error;

/// Non-empty string of ASCII decimal digits.
pub fn numeric<'a>(param: &'static str, value: &'a str) -> Result<&'a str, Error> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value)
    } else {
        Err(Error::invalid(param, value, "must be numeric"))
    }
}

/// Boolean-coercible flag: true/false, 1/0, yes/no, on/off (any case).
pub fn flag(param: &'static str, value: &str) -> Result<bool, Error> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::invalid(param, value, "must be a boolean")),
    }
}

/// Wire form of a flag.
pub fn flag_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// IPv4 or IPv6 address. The value is returned as written, not in
/// canonical form, so the panel sees the same text it stored.
pub fn ip<'a>(param: &'static str, value: &'a str) -> Result<&'a str, Error> {
    match value.parse::<IpAddr>() {
        Ok(_) => Ok(value),
        Err(_) => Err(Error::invalid(param, value, "must be a valid IP address")),
    }
}

/// Non-empty ASCII letters and digits.
pub fn alphanumeric<'a>(param: &'static str, value: &'a str) -> Result<&'a str, Error> {
    if !value.is_empty() && value.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Ok(value)
    } else {
        Err(Error::invalid(param, value, "must be alphanumeric"))
    }
}

/// ASCII word characters, hyphens, and dots only.
pub fn hostname<'a>(param: &'static str, value: &'a str) -> Result<&'a str, Error> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(value)
    } else {
        Err(Error::invalid(
            param,
            value,
            "may only contain letters, digits, '_', '-' and '.'",
        ))
    }
}

/// Member of a closed set, parsed through the enum's `FromStr`.
pub fn one_of<T: FromStr>(param: &'static str, value: &str, allowed: &str) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| Error::invalid(param, value, format!("must be one of: {allowed}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::virt::request::{BootOrder, VirtType};

    #[test]
    fn numeric_accepts_digits_only() {
        assert_eq!(numeric("server_id", "100").ok(), Some("100"));
        assert_eq!(numeric("server_id", "007").ok(), Some("007"));
        for bad in ["", "abc", "12a", "-1", "1.5", " 1", "1e3"] {
            let err = numeric("server_id", bad).unwrap_err();
            assert!(
                matches!(
                    err,
                    Error::InvalidArgument { param: "server_id", ref value, .. } if value == bad
                ),
                "expected rejection of {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn flag_coercion() {
        for yes in ["true", "TRUE", "1", "yes", "On"] {
            assert_eq!(flag("f", yes).ok(), Some(true), "{yes}");
        }
        for no in ["false", "0", "no", "OFF"] {
            assert_eq!(flag("f", no).ok(), Some(false), "{no}");
        }
        assert!(flag("f", "maybe").is_err());
        assert!(flag("f", "").is_err());
        assert_eq!(flag_str(true), "true");
        assert_eq!(flag_str(false), "false");
    }

    #[test]
    fn ip_accepts_v4_and_v6() {
        assert!(ip("ipaddr", "10.0.0.5").is_ok());
        assert!(ip("ipaddr", "2001:db8::1").is_ok());
        assert_eq!(ip("ipaddr", "2001:DB8:0:0::1").ok(), Some("2001:DB8:0:0::1"));
        assert!(ip("ipaddr", "999.999.999.999").is_err());
        assert!(ip("ipaddr", "10.0.0").is_err());
        assert!(ip("ipaddr", "").is_err());
    }

    #[test]
    fn alphanumeric_username() {
        assert!(alphanumeric("username", "client42").is_ok());
        assert!(alphanumeric("username", "client_42").is_err());
        assert!(alphanumeric("username", "").is_err());
    }

    #[test]
    fn hostname_must_match_entirely() {
        assert!(hostname("hostname", "vps-01.example.com").is_ok());
        assert!(hostname("hostname", "under_score").is_ok());
        assert!(hostname("hostname", "bad host").is_err());
        assert!(hostname("hostname", "semi;colon").is_err());
        assert!(hostname("hostname", "h\u{e9}llo").is_err());
        assert!(hostname("hostname", "\u{4f8b}\u{3048}").is_err());
        assert!(hostname("hostname", "").is_err());
    }

    #[test]
    fn one_of_reports_allowed_values() {
        let parsed: BootOrder = one_of("boot_order", "dc", BootOrder::ALL).unwrap();
        assert_eq!(parsed, BootOrder::Dc);

        let err = one_of::<VirtType>("type", "bogus", VirtType::ALL).unwrap_err();
        match err {
            Error::InvalidArgument { param, reason, .. } => {
                assert_eq!(param, "type");
                assert!(reason.contains("xen hvm"));
            }
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}
