//! Host-to-center resolution over the in-memory directory.

use std::sync::Arc;

use hemo_auth::directory::{AccountStore, MemoryDirectory};
use hemo_auth::tenant::{TenantResolution, TenantResolver};
use hemo_core::config::TenancyConfig;
use hemo_core::error::ErrorKind;
use hemo_entity::center::{CreateCenter, normalize_slug};

async fn resolver_with(slugs: &[&str]) -> TenantResolver {
    let dir = MemoryDirectory::new();
    for slug in slugs {
        dir.create_center(&CreateCenter {
            sub_domain: normalize_slug(slug),
            label: slug.to_string(),
            tel: None,
            mail: None,
            address: None,
        })
        .await
        .unwrap();
    }
    TenantResolver::new(TenancyConfig::default(), Arc::new(dir))
}

#[tokio::test]
async fn test_known_subdomain_resolves() {
    let resolver = resolver_with(&["clinic1"]).await;
    let resolution = resolver
        .resolve("/api/patients", Some("clinic1.example.com"))
        .await
        .unwrap();
    assert_eq!(resolution.center().unwrap().sub_domain, "clinic1");
}

#[tokio::test]
async fn test_two_labels_is_root() {
    let resolver = resolver_with(&["example"]).await;
    let resolution = resolver
        .resolve("/api/patients", Some("example.com"))
        .await
        .unwrap();
    assert_eq!(resolution, TenantResolution::Root);
}

#[tokio::test]
async fn test_four_labels_use_leading_label() {
    let resolver = resolver_with(&["clinic1"]).await;
    let resolution = resolver
        .resolve("/", Some("clinic1.staging.example.com"))
        .await
        .unwrap();
    assert_eq!(resolution.center().unwrap().sub_domain, "clinic1");
}

#[tokio::test]
async fn test_unknown_subdomain_is_not_found() {
    let resolver = resolver_with(&["clinic1"]).await;
    let err = resolver
        .resolve("/api/patients", Some("unknownslug.example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(
        err.details.unwrap()["sub_domain"],
        serde_json::json!("unknownslug")
    );
}

#[tokio::test]
async fn test_lookup_uses_write_time_normalization() {
    let resolver = resolver_with(&["Clinic One"]).await;
    let resolution = resolver
        .resolve("/", Some("CLINIC-ONE.example.com:8000"))
        .await
        .unwrap();
    assert_eq!(resolution.center().unwrap().sub_domain, "clinic-one");
}

#[tokio::test]
async fn test_admin_path_skips_resolution() {
    let resolver = resolver_with(&[]).await;
    let resolution = resolver
        .resolve("/admin/centers", Some("unknownslug.example.com"))
        .await
        .unwrap();
    assert_eq!(resolution, TenantResolution::Skipped);

    let without_host = resolver.resolve("/admin/", None).await.unwrap();
    assert_eq!(without_host, TenantResolution::Skipped);

    let bare = resolver.resolve("/admin", None).await.unwrap();
    assert_eq!(bare, TenantResolution::Skipped);

    // A longer first segment is ordinary traffic.
    let err = resolver
        .resolve("/administrators", Some("unknownslug.example.com"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_reserved_hosts_and_slugs_skip_lookup() {
    let resolver = resolver_with(&["www", "api"]).await;
    for host in ["localhost:8000", "127.0.0.1", "www.cimssante.com", "api.cimssante.com"] {
        let resolution = resolver.resolve("/", Some(host)).await.unwrap();
        assert_eq!(resolution, TenantResolution::Root, "{host}");
    }
}

#[tokio::test]
async fn test_missing_or_malformed_host_is_bad_request() {
    let resolver = resolver_with(&["clinic1"]).await;

    let missing = resolver.resolve("/api/patients", None).await.unwrap_err();
    assert_eq!(missing.kind, ErrorKind::BadRequest);

    let malformed = resolver
        .resolve("/api/patients", Some("clinic1..example.com"))
        .await
        .unwrap_err();
    assert_eq!(malformed.kind, ErrorKind::BadRequest);
}

#[tokio::test]
async fn test_threshold_is_configurable() {
    let dir = MemoryDirectory::new();
    dir.create_center(&CreateCenter {
        sub_domain: "clinic1".to_string(),
        label: "Clinic 1".to_string(),
        tel: None,
        mail: None,
        address: None,
    })
    .await
    .unwrap();
    let config = TenancyConfig {
        subdomain_min_labels: 4,
        ..TenancyConfig::default()
    };
    let resolver = TenantResolver::new(config, Arc::new(dir));

    let three = resolver
        .resolve("/", Some("clinic1.example.com"))
        .await
        .unwrap();
    assert_eq!(three, TenantResolution::Root);

    let four = resolver
        .resolve("/", Some("clinic1.eu.example.com"))
        .await
        .unwrap();
    assert!(four.center().is_some());
}
