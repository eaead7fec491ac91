//! Subdomain-to-center resolution configuration.

use serde::{Deserialize, Serialize};

/// Controls how the inbound `Host` header is mapped to a center.
///
/// A host carries a center slug only when it has at least
/// `subdomain_min_labels` dot-separated labels. With the default of 3,
/// `clinic1.cimssante.com` names a center while `cimssante.com` is root
/// traffic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenancyConfig {
    /// The platform's root domain, without `www`.
    #[serde(default = "default_root_domain")]
    pub root_domain: String,
    /// Minimum number of labels for a host to carry a subdomain.
    #[serde(default = "default_min_labels")]
    pub subdomain_min_labels: usize,
    /// Requests whose path starts with this prefix skip resolution.
    #[serde(default = "default_admin_prefix")]
    pub admin_path_prefix: String,
    /// Full host names that are always root traffic.
    #[serde(default = "default_reserved_hosts")]
    pub reserved_hosts: Vec<String>,
    /// Leading labels that never name a center.
    #[serde(default = "default_reserved_slugs")]
    pub reserved_slugs: Vec<String>,
}

impl Default for TenancyConfig {
    fn default() -> Self {
        Self {
            root_domain: default_root_domain(),
            subdomain_min_labels: default_min_labels(),
            admin_path_prefix: default_admin_prefix(),
            reserved_hosts: default_reserved_hosts(),
            reserved_slugs: default_reserved_slugs(),
        }
    }
}

fn default_root_domain() -> String {
    "cimssante.com".to_string()
}

fn default_min_labels() -> usize {
    3
}

fn default_admin_prefix() -> String {
    "/admin/".to_string()
}

fn default_reserved_hosts() -> Vec<String> {
    vec!["localhost".to_string(), "127.0.0.1".to_string()]
}

fn default_reserved_slugs() -> Vec<String> {
    vec!["www".to_string(), "admin".to_string(), "api".to_string()]
}
