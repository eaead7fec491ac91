//! CORS layer configuration.

use std::time::Duration;

use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use hemo_core::config::CorsConfig;

/// Builds the CORS layer.
///
/// Explicit origins come from configuration. When enabled, any
/// `http(s)://<label>.<root_domain>` origin is accepted as well so each
/// center's front-end can call the API from its own subdomain.
pub fn build_cors_layer(config: &CorsConfig, root_domain: &str) -> CorsLayer {
    let methods: Vec<Method> = config
        .allowed_methods
        .iter()
        .filter_map(|m| m.parse().ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age_seconds));

    if config.allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let listed: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();
    let suffix = format!(".{}", root_domain.trim_end_matches('.').to_ascii_lowercase());
    let subdomains = config.allow_center_subdomains;

    layer.allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _: &Parts| {
        listed.iter().any(|o| o == origin)
            || (subdomains && is_center_origin(origin, &suffix))
    }))
}

fn is_center_origin(origin: &HeaderValue, suffix: &str) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Some((_, authority)) = origin.split_once("://") else {
        return false;
    };
    let host = authority
        .rsplit_once(':')
        .map_or(authority, |(host, _)| host)
        .to_ascii_lowercase();
    host.strip_suffix(suffix)
        .is_some_and(|label| !label.is_empty() && !label.contains('.'))
}
