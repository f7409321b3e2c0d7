use servicetitan_client::{Config, Error, PathParts, ServiceTitanClient};

fn client(tenant: Option<&str>) -> ServiceTitanClient {
    let mut config = Config::new("id", "secret", "key");
    if let Some(tenant) = tenant {
        config = config.with_tenant(tenant);
    }
    ServiceTitanClient::new(config).expect("valid config")
}

#[test]
fn tenant_is_spliced_into_relative_paths() {
    let client = client(Some("123456"));
    assert_eq!(
        client.prepare_url("tenant/employees"),
        "https://api-integration.servicetitan.io/tenant/123456/employees"
    );
    assert_eq!(
        client.prepare_url("/tenant/employees"),
        "https://api-integration.servicetitan.io/tenant/123456/employees"
    );
}

#[test]
fn absolute_urls_ignore_tenant() {
    let client = client(Some("123456"));
    assert_eq!(client.prepare_url("https://x/y"), "https://x/y");
}

#[test]
fn build_url_uses_default_tenant() {
    let client = client(Some("123456"));
    let url = client
        .build_url(&PathParts::new("jpm", "jobs").version(2).resource_id(123).modifier("notes"))
        .unwrap();
    assert_eq!(
        url,
        "https://api-integration.servicetitan.io/jpm/v2/tenant/123456/jobs/123/notes"
    );
}

#[test]
fn build_url_without_tenant_shows_placeholder() {
    let client = client(None);
    let url = client.build_url(&PathParts::new("settings", "employees")).unwrap();
    assert_eq!(
        url,
        "https://api-integration.servicetitan.io/settings/v2/tenant/{tenant}/employees"
    );
}

#[test]
fn build_url_rejects_empty_endpoint() {
    let client = client(None);
    let err = client.build_url(&PathParts::new("settings", "")).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}
