//! Temporal type builders for date and time Arrow arrays.
//!
//! Implements builders for:
//! - Date32 (DATE)
//! - Time64(Microsecond) (TIME)
//! - Timestamp(Microsecond, None) (TIMESTAMP)
//! - Timestamp(Microsecond, "UTC") (TIMESTAMPTZ)
//!
//! PostgreSQL stores times with microsecond resolution, so every temporal
//! column is read at microsecond precision without loss.

use std::sync::Arc;

use arrow_array::ArrayRef;
use arrow_array::builder::{Date32Builder, Time64MicrosecondBuilder, TimestampMicrosecondBuilder};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use sqlx::Row;
use sqlx::postgres::PgRow;

use crate::Result;
use crate::traits::builder::PgCompatibleBuilder;
use crate::traits::sealed::private::Sealed;
use crate::types::arrow::UTC;

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a date to days since the Unix epoch.
#[must_use]
pub fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert a time of day to microseconds since midnight.
#[must_use]
pub fn time_to_micros(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) * 1_000_000
        + i64::from(time.nanosecond() / 1_000)
}

// ═══════════════════════════════════════════════════════════════════════════
// Date32 Builder (Days since Unix epoch)
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for Arrow Date32 arrays (DATE).
#[derive(Debug)]
pub struct Date32BuilderWrapper {
    builder: Date32Builder,
    len: usize,
}

impl Date32BuilderWrapper {
    /// Create a new date builder.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            builder: Date32Builder::with_capacity(capacity),
            len: 0,
        }
    }
}

impl Sealed for Date32BuilderWrapper {}

impl PgCompatibleBuilder for Date32BuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match row.try_get::<Option<NaiveDate>, _>(index)? {
            Some(date) => {
                self.builder.append_value(date_to_days(date));
                self.len += 1;
            }
            None => self.append_null(),
        }
        Ok(())
    }

    fn append_null(&mut self) {
        self.builder.append_null();
        self.len += 1;
    }

    fn finish(&mut self) -> ArrayRef {
        self.len = 0;
        Arc::new(self.builder.finish())
    }

    fn len(&self) -> usize {
        self.len
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Time64 Builder (Microseconds since midnight)
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for Arrow Time64(Microsecond) arrays (TIME).
#[derive(Debug)]
pub struct Time64MicrosecondBuilderWrapper {
    builder: Time64MicrosecondBuilder,
    len: usize,
}

impl Time64MicrosecondBuilderWrapper {
    /// Create a new time builder.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            builder: Time64MicrosecondBuilder::with_capacity(capacity),
            len: 0,
        }
    }
}

impl Sealed for Time64MicrosecondBuilderWrapper {}

impl PgCompatibleBuilder for Time64MicrosecondBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match row.try_get::<Option<NaiveTime>, _>(index)? {
            Some(time) => {
                self.builder.append_value(time_to_micros(time));
                self.len += 1;
            }
            None => self.append_null(),
        }
        Ok(())
    }

    fn append_null(&mut self) {
        self.builder.append_null();
        self.len += 1;
    }

    fn finish(&mut self) -> ArrayRef {
        self.len = 0;
        Arc::new(self.builder.finish())
    }

    fn len(&self) -> usize {
        self.len
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Timestamp Builder (Microseconds since Unix epoch)
// ═══════════════════════════════════════════════════════════════════════════

/// Builder for Arrow Timestamp(Microsecond) arrays.
///
/// `TIMESTAMP` columns produce naive timestamps; `TIMESTAMPTZ` columns are
/// normalised to UTC and tagged with the `"UTC"` time zone.
#[derive(Debug)]
pub struct TimestampMicrosecondBuilderWrapper {
    builder: TimestampMicrosecondBuilder,
    with_time_zone: bool,
    len: usize,
}

impl TimestampMicrosecondBuilderWrapper {
    /// Create a new timestamp builder.
    #[must_use]
    pub fn new(capacity: usize, with_time_zone: bool) -> Self {
        let builder = TimestampMicrosecondBuilder::with_capacity(capacity);
        let builder = if with_time_zone {
            builder.with_timezone(UTC)
        } else {
            builder
        };
        Self {
            builder,
            with_time_zone,
            len: 0,
        }
    }

    fn decode(&self, row: &PgRow, index: usize) -> Result<Option<i64>> {
        let micros = if self.with_time_zone {
            row.try_get::<Option<DateTime<Utc>>, _>(index)?
                .map(|ts| ts.timestamp_micros())
        } else {
            row.try_get::<Option<NaiveDateTime>, _>(index)?
                .map(|ts| ts.and_utc().timestamp_micros())
        };
        Ok(micros)
    }
}

impl Sealed for TimestampMicrosecondBuilderWrapper {}

impl PgCompatibleBuilder for TimestampMicrosecondBuilderWrapper {
    fn append_pg_value(&mut self, row: &PgRow, index: usize) -> Result<()> {
        match self.decode(row, index)? {
            Some(micros) => {
                self.builder.append_value(micros);
                self.len += 1;
            }
            None => self.append_null(),
        }
        Ok(())
    }

    fn append_null(&mut self) {
        self.builder.append_null();
        self.len += 1;
    }

    fn finish(&mut self) -> ArrayRef {
        self.len = 0;
        Arc::new(self.builder.finish())
    }

    fn len(&self) -> usize {
        self.len
    }
}
