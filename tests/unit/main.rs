mod refresh_policy_tests;
mod refresh_telemetry_tests;
mod url;
