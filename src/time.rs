//! Conversions between the API's UTC timestamps and a configured local zone.

use jiff::civil::{Date, DateTime, Time};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::errors::Error;

pub const DEFAULT_TIMEZONE: &str = "Australia/Sydney";
pub const UTC_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Local time zone resolved once, plus the conversions built on it.
///
/// Naive (civil) inputs are always read as local wall-clock time; naive
/// strings coming back from the API are read as UTC.
#[derive(Clone, Debug)]
pub struct ZoneConverter {
    name: String,
    zone: TimeZone,
}

impl ZoneConverter {
    pub fn new(name: &str) -> Result<Self, Error> {
        let zone = TimeZone::get(name)
            .map_err(|e| Error::Config(format!("Unknown local timezone '{name}': {e}")))?;
        Ok(Self {
            name: name.to_string(),
            zone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn zone(&self) -> &TimeZone {
        &self.zone
    }

    /// Attaches the local zone to a wall-clock value.
    pub fn localize(&self, dt: DateTime) -> Result<Zoned, Error> {
        Ok(dt.to_zoned(self.zone.clone())?)
    }

    pub fn to_utc(&self, dt: DateTime) -> Result<Timestamp, Error> {
        Ok(self.localize(dt)?.timestamp())
    }

    pub fn zoned_to_utc(&self, zoned: &Zoned) -> Timestamp {
        zoned.timestamp()
    }

    pub fn to_utc_string(&self, dt: DateTime) -> Result<String, Error> {
        self.to_utc_string_with(dt, UTC_FORMAT)
    }

    pub fn to_utc_string_with(&self, dt: DateTime, fmt: &str) -> Result<String, Error> {
        Ok(self.to_utc(dt)?.strftime(fmt).to_string())
    }

    pub fn from_utc(&self, ts: Timestamp) -> Zoned {
        ts.to_zoned(self.zone.clone())
    }

    /// Parses an API timestamp. Strings without an offset are taken as UTC.
    pub fn from_utc_string(&self, s: &str) -> Result<Zoned, Error> {
        let ts = match s.parse::<Timestamp>() {
            Ok(ts) => ts,
            Err(_) => s.parse::<DateTime>()?.to_zoned(TimeZone::UTC)?.timestamp(),
        };
        Ok(self.from_utc(ts))
    }

    pub fn format_local(&self, ts: Timestamp, fmt: &str) -> String {
        self.from_utc(ts).strftime(fmt).to_string()
    }

    pub fn format_local_civil(&self, dt: DateTime, fmt: &str) -> Result<String, Error> {
        Ok(self.localize(dt)?.strftime(fmt).to_string())
    }

    pub fn st_date_to_local(&self, s: &str) -> Result<String, Error> {
        self.st_date_to_local_with(s, LOCAL_FORMAT)
    }

    pub fn st_date_to_local_with(&self, s: &str, fmt: &str) -> Result<String, Error> {
        Ok(self.from_utc_string(s)?.strftime(fmt).to_string())
    }

    pub fn local_start_of_day(&self, date: Date) -> Result<Zoned, Error> {
        self.localize(date.to_datetime(Time::midnight()))
    }

    /// 23:59:59 local; sub-second precision is left at zero.
    pub fn local_end_of_day(&self, date: Date) -> Result<Zoned, Error> {
        self.localize(date.at(23, 59, 59, 0))
    }

    pub fn start_of_day_utc(&self, date: Date) -> Result<Timestamp, Error> {
        Ok(self.local_start_of_day(date)?.timestamp())
    }

    pub fn end_of_day_utc(&self, date: Date) -> Result<Timestamp, Error> {
        Ok(self.local_end_of_day(date)?.timestamp())
    }

    pub fn start_of_day_utc_string(&self, date: Date) -> Result<String, Error> {
        Ok(self.start_of_day_utc(date)?.strftime(UTC_FORMAT).to_string())
    }

    pub fn end_of_day_utc_string(&self, date: Date) -> Result<String, Error> {
        Ok(self.end_of_day_utc(date)?.strftime(UTC_FORMAT).to_string())
    }
}
