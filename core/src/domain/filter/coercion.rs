use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use rust_decimal::Decimal;

use crate::domain::filter::{
    schema::{DeclaredType, EnumDef, TemporalKind},
    value_objects::FilterOperator,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValue {
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    OffsetDateTime(DateTime<FixedOffset>),
    Instant(DateTime<Utc>),
}

/// Value converted to the declared type of its target attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Bool(bool),
    Int64(i64),
    Int32(i32),
    Int16(i16),
    Int8(i8),
    Float64(f64),
    Float32(f32),
    Decimal(Decimal),
    String(String),
    Enum {
        kind: &'static EnumDef,
        member: &'static str,
    },
    Temporal(TemporalValue),
    List(Vec<TypedValue>),
}

/// Converts raw parameter strings into typed values.
///
/// `now` is captured once so every `now`/`today` in a request sees the same clock.
#[derive(Debug, Clone, Copy)]
pub struct ValueCoercer {
    now: DateTime<Local>,
}

impl Default for ValueCoercer {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueCoercer {
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    pub fn at(now: DateTime<Local>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Local> {
        self.now
    }

    /// `None` when `raw` is not a valid textual form of `target`.
    pub fn coerce(&self, raw: &str, target: DeclaredType) -> Option<TypedValue> {
        let s = raw.trim();

        match target {
            DeclaredType::Bool => parse_bool(s).map(TypedValue::Bool),
            DeclaredType::Int64 => s.parse().ok().map(TypedValue::Int64),
            DeclaredType::Int32 => s.parse().ok().map(TypedValue::Int32),
            DeclaredType::Int16 => s.parse().ok().map(TypedValue::Int16),
            DeclaredType::Int8 => s.parse().ok().map(TypedValue::Int8),
            DeclaredType::Float64 => s.parse().ok().map(TypedValue::Float64),
            DeclaredType::Float32 => s.parse().ok().map(TypedValue::Float32),
            DeclaredType::Decimal => s
                .parse::<Decimal>()
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
                .map(TypedValue::Decimal),
            DeclaredType::Enum(kind) => kind
                .member(s)
                .map(|member| TypedValue::Enum { kind, member }),
            DeclaredType::Temporal(kind) => self.temporal(s, kind).map(TypedValue::Temporal),
            DeclaredType::String => Some(TypedValue::String(s.to_string())),
        }
    }

    fn temporal(&self, s: &str, kind: TemporalKind) -> Option<TemporalValue> {
        if s.eq_ignore_ascii_case("now") {
            return Some(match kind {
                TemporalKind::Date => TemporalValue::Date(self.now.date_naive()),
                TemporalKind::DateTime => TemporalValue::DateTime(self.now.naive_local()),
                TemporalKind::OffsetDateTime => {
                    TemporalValue::OffsetDateTime(self.now.fixed_offset())
                }
                TemporalKind::Instant => TemporalValue::Instant(self.now.with_timezone(&Utc)),
            });
        }

        if s.eq_ignore_ascii_case("today") {
            return match kind {
                TemporalKind::Date => Some(TemporalValue::Date(self.now.date_naive())),
                _ => None,
            };
        }

        match kind {
            TemporalKind::Date => s.parse::<NaiveDate>().ok().map(TemporalValue::Date),
            TemporalKind::DateTime => s
                .parse::<NaiveDateTime>()
                .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
                .ok()
                .map(TemporalValue::DateTime),
            TemporalKind::OffsetDateTime => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(TemporalValue::OffsetDateTime),
            TemporalKind::Instant => s.parse::<DateTime<Utc>>().ok().map(TemporalValue::Instant),
        }
    }

    /// Lifts a bare date (or `today`) compared against a datetime column to the
    /// first or last instant of that day, depending on the comparison side.
    ///
    /// Only `DateTime` and `OffsetDateTime` columns are lifted; offset columns
    /// use the current system offset.
    pub fn day_bound(
        &self,
        raw: &str,
        kind: TemporalKind,
        operator: FilterOperator,
    ) -> Option<TemporalValue> {
        if !matches!(kind, TemporalKind::DateTime | TemporalKind::OffsetDateTime) {
            return None;
        }

        let s = raw.trim();
        let date = if s.eq_ignore_ascii_case("today") {
            self.now.date_naive()
        } else if is_date_only(s) {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?
        } else {
            return None;
        };

        let time = if operator.is_upper_bound() {
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999)?
        } else {
            NaiveTime::from_hms_opt(0, 0, 0)?
        };
        let bound = date.and_time(time);

        match kind {
            TemporalKind::DateTime => Some(TemporalValue::DateTime(bound)),
            _ => self
                .now
                .offset()
                .fix()
                .from_local_datetime(&bound)
                .single()
                .map(TemporalValue::OffsetDateTime),
        }
    }
}

/// Exactly ten characters with two dashes, e.g. `2024-01-15`.
pub fn is_date_only(s: &str) -> bool {
    s.len() == 10 && s.chars().filter(|c| *c == '-').count() == 2
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => other.parse().ok(),
    }
}
