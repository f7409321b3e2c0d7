use std::time::Duration;

use jiff::SignedDuration;

use servicetitan_client::errors::Error;
use servicetitan_client::token::RefreshPolicy;

#[test]
fn default_policy_uses_vendor_values() {
    let policy = RefreshPolicy::default();
    assert_eq!(policy.safety_margin, SignedDuration::from_secs(60));
    assert_eq!(policy.default_lifetime, SignedDuration::from_secs(900));
}

#[test]
fn policy_rejects_zero_margin() {
    let err = RefreshPolicy::new(SignedDuration::ZERO, SignedDuration::from_secs(900))
        .expect_err("margin must be positive");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn policy_rejects_negative_lifetime() {
    let err = RefreshPolicy::new(SignedDuration::from_secs(60), SignedDuration::from_secs(-1))
        .expect_err("lifetime must be positive");
    assert!(matches!(err, Error::Config(_)));
}

#[test]
fn exchange_timeout_defaults_and_rejects_zero() {
    let policy = RefreshPolicy::default();
    assert_eq!(policy.exchange_timeout, Duration::from_secs(30));

    let tuned = policy
        .clone()
        .with_exchange_timeout(Duration::from_millis(250))
        .unwrap();
    assert_eq!(tuned.exchange_timeout, Duration::from_millis(250));

    let err = policy
        .with_exchange_timeout(Duration::ZERO)
        .expect_err("timeout must be positive");
    assert!(matches!(err, Error::Config(_)));
}
