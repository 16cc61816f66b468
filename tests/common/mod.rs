//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use tracing_subscriber::{fmt, EnvFilter};

/// Routes engine events to the test output; `RUST_LOG` overrides the level.
pub fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
