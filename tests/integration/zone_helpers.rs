use jiff::civil::date;

use servicetitan_client::{Config, ServiceTitanClient};

fn client(zone: Option<&str>) -> ServiceTitanClient {
    let mut config = Config::new("id", "secret", "key");
    if let Some(zone) = zone {
        config = config.with_local_timezone(zone);
    }
    ServiceTitanClient::new(config).expect("client")
}

#[test]
fn default_zone_is_sydney() {
    let client = client(None);
    assert_eq!(client.zone().name(), "Australia/Sydney");
    assert_eq!(
        client.zone().start_of_day_utc_string(date(2025, 11, 7)).unwrap(),
        "2025-11-06T13:00:00Z"
    );
}

#[test]
fn configured_zone_drives_conversions() {
    let client = client(Some("America/New_York"));
    // EST, UTC-5
    assert_eq!(
        client
            .zone()
            .to_utc_string(date(2025, 1, 15).at(9, 0, 0, 0))
            .unwrap(),
        "2025-01-15T14:00:00Z"
    );
    assert_eq!(
        client
            .zone()
            .st_date_to_local_with("2025-01-15T14:00:00Z", "%Y-%m-%d %H:%M %Z")
            .unwrap(),
        "2025-01-15 09:00 EST"
    );
}
