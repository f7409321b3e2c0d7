#[path = "../common/mod.rs"]
mod common;

mod zone_helpers;
