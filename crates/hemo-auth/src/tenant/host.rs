//! `Host` header parsing and classification.

use std::net::IpAddr;

use hemo_core::config::TenancyConfig;
use hemo_core::error::AppError;
use hemo_core::result::AppResult;
use hemo_entity::center::normalize_slug;

/// What a normalized host names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostClass {
    /// Platform root, IP literal, or reserved name: no tenant.
    Root,
    /// A center slug that still has to be looked up.
    Candidate(String),
}

/// A host with its port removed, lowercased, without a trailing dot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedHost {
    /// IPv4 or IPv6 literal.
    Ip(IpAddr),
    /// DNS name.
    Name(String),
}

/// Normalize a raw `Host` header value.
///
/// Fails with a bad-request error when the value is empty or is not a
/// syntactically valid host.
pub fn normalize_host(raw: &str) -> AppResult<NormalizedHost> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(malformed(raw));
    }

    if let Some(rest) = raw.strip_prefix('[') {
        let (literal, after) = rest.split_once(']').ok_or_else(|| malformed(raw))?;
        if !after.is_empty() && !is_port_suffix(after) {
            return Err(malformed(raw));
        }
        return literal
            .parse::<IpAddr>()
            .map(NormalizedHost::Ip)
            .map_err(|_| malformed(raw));
    }

    // Bare IPv6 without brackets.
    if raw.matches(':').count() > 1 {
        return raw
            .parse::<IpAddr>()
            .map(NormalizedHost::Ip)
            .map_err(|_| malformed(raw));
    }

    let host = match raw.split_once(':') {
        Some((name, port)) if is_port_suffix(&format!(":{port}")) => name,
        Some(_) => return Err(malformed(raw)),
        None => raw,
    };

    let host = host.to_ascii_lowercase();
    let host = host.strip_suffix('.').unwrap_or(&host);

    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(NormalizedHost::Ip(ip));
    }

    let valid = !host.is_empty()
        && host.len() <= 253
        && host.split('.').all(|label| {
            !label.is_empty()
                && label.len() <= 63
                && label
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        });
    if !valid {
        return Err(malformed(raw));
    }

    Ok(NormalizedHost::Name(host.to_string()))
}

/// Decide whether a normalized host names a candidate center.
pub fn classify_host(host: &NormalizedHost, config: &TenancyConfig) -> HostClass {
    let name = match host {
        NormalizedHost::Ip(_) => return HostClass::Root,
        NormalizedHost::Name(name) => name.as_str(),
    };

    let root = config.root_domain.to_ascii_lowercase();
    if name == root || name.strip_prefix("www.") == Some(root.as_str()) {
        return HostClass::Root;
    }
    if config
        .reserved_hosts
        .iter()
        .any(|h| h.eq_ignore_ascii_case(name))
    {
        return HostClass::Root;
    }

    let labels: Vec<&str> = name.split('.').collect();
    if labels.len() < config.subdomain_min_labels {
        return HostClass::Root;
    }

    let slug = normalize_slug(labels[0]);
    if config
        .reserved_slugs
        .iter()
        .any(|s| s.eq_ignore_ascii_case(&slug))
    {
        return HostClass::Root;
    }

    HostClass::Candidate(slug)
}

fn is_port_suffix(s: &str) -> bool {
    s.strip_prefix(':')
        .is_some_and(|p| !p.is_empty() && p.len() <= 5 && p.chars().all(|c| c.is_ascii_digit()))
}

fn malformed(raw: &str) -> AppError {
    AppError::bad_request("Malformed Host header")
        .with_details(serde_json::json!({ "host": raw }))
}
