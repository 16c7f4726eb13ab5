//! # Value Validators
//!
//! Format predicates that can be attached to a [`Field`](metaval_core::Field)
//! as a [`ValueValidator`](metaval_core::ValueValidator). Each returns `Ok(())`
//! for an acceptable value and an [`InvalidValue`] naming the value otherwise.
//! Only string values can pass; every other JSON type is rejected.
//!
//! - [`validate_email`] — syntactically valid email address.
//! - [`validate_url`] — absolute URL with a publicly routable host.
//! - [`validate_http_url`] — [`validate_url`] plus an `http:`/`https:` prefix.
//! - [`validate_md5`] — exactly 32 hex digits. Format only; nothing is hashed.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use metaval_core::{render, InvalidValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use url::{Host, Url};

const MAX_EMAIL_LEN: usize = 254;
const MAX_LOCAL_PART_LEN: usize = 64;

static EMAIL_LOCAL_PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^(?:[-!#$%&'*+/=?^_`{}|~0-9a-z]+(?:\.[-!#$%&'*+/=?^_`{}|~0-9a-z]+)*|"(?:[\x01-\x08\x0b\x0c\x0e-\x21#-\[\]-\x7f]|\\[\x01-\x09\x0b\x0c\x0d-\x7f])*")$"#,
    )
    .expect("email local-part pattern is valid")
});

static DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+(?:[a-z]{2,63}|xn--[a-z0-9-]{1,59})\.?$")
        .expect("domain pattern is valid")
});

static MD5_HEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-fA-F0-9]{32}$").expect("md5 pattern is valid"));

fn text<'a>(value: &'a Value, complaint: &str) -> Result<&'a str, InvalidValue> {
    value
        .as_str()
        .ok_or_else(|| InvalidValue::new(format!("{complaint}: {}", render(value))))
}

/// Check that `value` is a syntactically valid email address.
pub fn validate_email(value: &Value) -> Result<(), InvalidValue> {
    let address = text(value, "invalid email address")?;
    if is_email(address) {
        Ok(())
    } else {
        Err(InvalidValue::new(format!("invalid email address: {address}")))
    }
}

fn is_email(address: &str) -> bool {
    if address.len() > MAX_EMAIL_LEN {
        return false;
    }
    let Some((local, domain)) = address.rsplit_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > MAX_LOCAL_PART_LEN || !EMAIL_LOCAL_PART.is_match(local) {
        return false;
    }
    if let Some(literal) = domain.strip_prefix('[').and_then(|d| d.strip_suffix(']')) {
        let literal = literal.strip_prefix("IPv6:").unwrap_or(literal);
        return literal.parse::<IpAddr>().is_ok();
    }
    DOMAIN.is_match(domain)
}

/// Check that `value` is an absolute URL whose host is publicly routable.
///
/// Rejects `localhost`, single-label hosts, and IP addresses that are
/// loopback, private, link-local, unspecified, broadcast, multicast, or
/// reserved for documentation. IPv4 and IPv6 hosts follow the same rules.
pub fn validate_url(value: &Value) -> Result<(), InvalidValue> {
    let candidate = text(value, "invalid URL")?;
    if is_public_url(candidate) {
        Ok(())
    } else {
        Err(InvalidValue::new(format!("invalid URL: {candidate}")))
    }
}

fn is_public_url(candidate: &str) -> bool {
    if candidate.chars().any(char::is_whitespace) {
        return false;
    }
    match candidate.split_once("://") {
        Some((scheme, rest)) if !scheme.is_empty() && !rest.is_empty() => {}
        _ => return false,
    }
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => is_public_domain(domain),
        Some(Host::Ipv4(ip)) => is_public_ipv4(ip),
        Some(Host::Ipv6(ip)) => is_public_ipv6(ip),
        None => false,
    }
}

fn is_public_domain(domain: &str) -> bool {
    !domain.eq_ignore_ascii_case("localhost") && DOMAIN.is_match(domain)
}

fn is_public_ipv4(ip: Ipv4Addr) -> bool {
    !(ip.is_private()
        || ip.is_loopback()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || ip.is_multicast()
        || ip.is_documentation()
        || ip.octets()[0] == 0)
}

fn is_public_ipv6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_public_ipv4(v4);
    }
    let [first, second, ..] = ip.segments();
    let unique_local = first & 0xfe00 == 0xfc00;
    let link_local = first & 0xffc0 == 0xfe80;
    let documentation = first == 0x2001 && second == 0x0db8;
    !(ip.is_loopback()
        || ip.is_unspecified()
        || ip.is_multicast()
        || unique_local
        || link_local
        || documentation)
}

/// Check that `value` is a public URL with an `http:` or `https:` scheme.
pub fn validate_http_url(value: &Value) -> Result<(), InvalidValue> {
    validate_url(value)?;
    let candidate = text(value, "must be an HTTP URL")?;
    if candidate.starts_with("http:") || candidate.starts_with("https:") {
        Ok(())
    } else {
        Err(InvalidValue::new(format!("must be an HTTP URL: {candidate}")))
    }
}

/// Check that `value` is an MD5 digest: 32 hexadecimal characters.
pub fn validate_md5(value: &Value) -> Result<(), InvalidValue> {
    let digest = text(value, "MD5 must be a 128-bit hexadecimal number")?;
    if MD5_HEX.is_match(digest) {
        Ok(())
    } else {
        Err(InvalidValue::new(format!(
            "MD5 must be a 128-bit hexadecimal number: {digest}"
        )))
    }
}
