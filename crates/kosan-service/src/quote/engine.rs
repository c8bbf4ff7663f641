//! Booking quote engine.
//!
//! Turns a start instant, a duration option and a room's price table into a
//! priced, time-bounded quote. The engine never reads the wall clock and
//! never performs I/O; identical inputs always produce identical output.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use thiserror::Error;

use kosan_core::types::Rupiah;
use kosan_entity::duration::{DurationOption, DurationType};
use kosan_entity::pricing::PriceTable;

/// Length of a monthly booking. A monthly option's `value` is not used.
pub const MONTH_LENGTH_DAYS: i64 = 30;

/// Why a quote could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteRejection {
    /// Start time, duration or price table missing, or start time unparseable.
    #[error("Data tidak lengkap")]
    IncompleteInput,
    /// The price table has no active, positive price for this duration.
    #[error("Duration {label} is not available for this property")]
    DurationUnavailable {
        /// Label of the rejected duration option.
        label: String,
    },
}

/// An accepted quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    /// Check-in instant.
    pub check_in_time: DateTime<Utc>,
    /// Check-out instant.
    pub check_out_time: DateTime<Utc>,
    /// Label of the selected duration.
    pub duration_label: String,
    /// Type of the selected duration.
    pub duration_type: DurationType,
    /// Magnitude of the selected duration, echoed as given.
    pub duration_value: u32,
    /// Price resolved from the price table.
    pub total_price: Rupiah,
}

/// Tagged quote result for callers that render validation inline.
///
/// When `is_valid` is `false`, `error` holds a displayable message and no
/// timestamps or price are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingQuote {
    /// Whether a quote could be constructed.
    pub is_valid: bool,
    /// Reason the quote is invalid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Check-in instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<DateTime<Utc>>,
    /// Check-out instant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Utc>>,
    /// Label of the selected duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_label: Option<String>,
    /// Type of the selected duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_type: Option<DurationType>,
    /// Magnitude of the selected duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_value: Option<u32>,
    /// Resolved price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<Rupiah>,
    #[serde(skip)]
    rejection: Option<QuoteRejection>,
}

impl BookingQuote {
    /// The accepted quote, or the reason there is none.
    pub fn to_quote(&self) -> Result<Quote, QuoteRejection> {
        if let Some(rejection) = &self.rejection {
            return Err(rejection.clone());
        }

        match (
            self.is_valid,
            self.check_in_time,
            self.check_out_time,
            &self.duration_label,
            self.duration_type,
            self.duration_value,
            self.total_price,
        ) {
            (true, Some(check_in), Some(check_out), Some(label), Some(kind), Some(value), Some(price)) => {
                Ok(Quote {
                    check_in_time: check_in,
                    check_out_time: check_out,
                    duration_label: label.clone(),
                    duration_type: kind,
                    duration_value: value,
                    total_price: price,
                })
            }
            _ => Err(QuoteRejection::IncompleteInput),
        }
    }
}

impl From<Result<Quote, QuoteRejection>> for BookingQuote {
    fn from(result: Result<Quote, QuoteRejection>) -> Self {
        match result {
            Ok(quote) => Self {
                is_valid: true,
                error: None,
                check_in_time: Some(quote.check_in_time),
                check_out_time: Some(quote.check_out_time),
                duration_label: Some(quote.duration_label),
                duration_type: Some(quote.duration_type),
                duration_value: Some(quote.duration_value),
                total_price: Some(quote.total_price),
                rejection: None,
            },
            Err(rejection) => Self {
                is_valid: false,
                error: Some(rejection.to_string()),
                check_in_time: None,
                check_out_time: None,
                duration_label: None,
                duration_type: None,
                duration_value: None,
                total_price: None,
                rejection: Some(rejection),
            },
        }
    }
}

/// Compute a quote from possibly-missing inputs. Never panics.
///
/// `start_time` must be an RFC 3339 timestamp; any offset is normalized
/// to UTC.
pub fn compute_quote(
    start_time: Option<&str>,
    duration: Option<&DurationOption>,
    prices: Option<&PriceTable>,
) -> BookingQuote {
    let start = start_time.and_then(parse_start_time);

    let result = match (start, duration, prices) {
        (Some(start), Some(duration), Some(prices)) => try_quote(start, duration, prices),
        _ => Err(QuoteRejection::IncompleteInput),
    };

    result.into()
}

/// Compute a quote from complete, typed inputs.
pub fn try_quote(
    start: DateTime<Utc>,
    duration: &DurationOption,
    prices: &PriceTable,
) -> Result<Quote, QuoteRejection> {
    let check_out = check_out_time(start, duration).ok_or(QuoteRejection::IncompleteInput)?;

    let total_price =
        prices
            .bookable_price(&duration.key)
            .ok_or_else(|| QuoteRejection::DurationUnavailable {
                label: duration.label.clone(),
            })?;

    Ok(Quote {
        check_in_time: start,
        check_out_time: check_out,
        duration_label: duration.label.clone(),
        duration_type: duration.kind,
        duration_value: duration.value,
        total_price,
    })
}

/// Check-out for a stay starting at `start`.
///
/// Monthly stays are a fixed 30 days; hourly and daily stays add `value`
/// hours. Returns `None` only on calendar overflow.
pub fn check_out_time(start: DateTime<Utc>, duration: &DurationOption) -> Option<DateTime<Utc>> {
    let length = match duration.kind {
        DurationType::Monthly => Duration::days(MONTH_LENGTH_DAYS),
        DurationType::Hourly | DurationType::Daily => Duration::hours(i64::from(duration.value)),
    };
    start.checked_add_signed(length)
}

fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const START: &str = "2025-03-01T10:00:00Z";

    fn three_hours() -> DurationOption {
        DurationOption::new("3 Jam", 3, DurationType::Hourly, "3_hours")
    }

    fn monthly() -> DurationOption {
        DurationOption::new("Bulanan (30 Hari)", 720, DurationType::Monthly, "monthly")
    }

    fn at(raw: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(raw).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_hourly_quote() {
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let quote = compute_quote(Some(START), Some(&three_hours()), Some(&prices));

        assert!(quote.is_valid);
        assert_eq!(quote.error, None);
        assert_eq!(quote.check_in_time, Some(at("2025-03-01T10:00:00Z")));
        assert_eq!(quote.check_out_time, Some(at("2025-03-01T13:00:00Z")));
        assert_eq!(quote.total_price, Some(Rupiah(45_000)));
        assert_eq!(quote.duration_type, Some(DurationType::Hourly));
        assert_eq!(quote.duration_label.as_deref(), Some("3 Jam"));
    }

    #[test]
    fn test_monthly_quote_ignores_value() {
        let prices = PriceTable::from_prices([("monthly", 1_500_000)]);
        let quote = compute_quote(Some(START), Some(&monthly()), Some(&prices));

        assert!(quote.is_valid);
        assert_eq!(quote.check_out_time, Some(at("2025-03-31T10:00:00Z")));
        assert_eq!(quote.total_price, Some(Rupiah(1_500_000)));
        assert_eq!(quote.duration_value, Some(720));

        let mut odd = monthly();
        odd.value = 1;
        let quote = compute_quote(Some(START), Some(&odd), Some(&prices));
        assert_eq!(quote.check_out_time, Some(at("2025-03-31T10:00:00Z")));
    }

    #[test]
    fn test_zero_price_rejected_with_label() {
        let prices = PriceTable::from_prices([("3_hours", 0)]);
        let quote = compute_quote(Some(START), Some(&three_hours()), Some(&prices));

        assert!(!quote.is_valid);
        let error = quote.error.clone().expect("error message");
        assert!(error.contains("3 Jam"));
        assert_eq!(quote.check_in_time, None);
        assert_eq!(quote.check_out_time, None);
        assert_eq!(quote.total_price, None);
    }

    #[test]
    fn test_absent_null_negative_and_inactive_prices_rejected() {
        let absent = PriceTable::from_prices([("6_hours", 60_000)]);
        let null: PriceTable = serde_json::from_str(r#"{ "3_hours": null }"#).unwrap();
        let negative = PriceTable::from_prices([("3_hours", -1)]);
        let inactive: PriceTable =
            serde_json::from_str(r#"{ "3_hours": { "price": 45000, "active": false } }"#).unwrap();

        for prices in [absent, null, negative, inactive] {
            let result = try_quote(at(START), &three_hours(), &prices);
            assert_eq!(
                result,
                Err(QuoteRejection::DurationUnavailable {
                    label: "3 Jam".to_string()
                })
            );
        }
    }

    #[test]
    fn test_missing_inputs_are_incomplete() {
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let option = three_hours();

        let cases = [
            compute_quote(None, Some(&option), Some(&prices)),
            compute_quote(Some(START), None, Some(&prices)),
            compute_quote(Some(START), Some(&option), None),
            compute_quote(Some("besok pagi"), Some(&option), Some(&prices)),
            compute_quote(Some(""), Some(&option), Some(&prices)),
        ];

        for quote in cases {
            assert!(!quote.is_valid);
            assert_eq!(quote.error.as_deref(), Some("Data tidak lengkap"));
            assert_eq!(quote.to_quote(), Err(QuoteRejection::IncompleteInput));
        }
    }

    #[test]
    fn test_offset_start_time_normalized_to_utc() {
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let quote = compute_quote(
            Some("2025-03-01T17:00:00+07:00"),
            Some(&three_hours()),
            Some(&prices),
        );
        assert_eq!(quote.check_in_time, Some(at(START)));
    }

    #[test]
    fn test_duration_matches_option_for_every_hour_based_option() {
        let start = Utc.with_ymd_and_hms(2025, 2, 28, 23, 30, 0).unwrap();
        for value in [1_u32, 3, 6, 12, 24, 48] {
            let option = DurationOption::new(format!("{value} Jam"), value, DurationType::Hourly, "k");
            let prices = PriceTable::from_prices([("k", 10_000)]);
            let quote = try_quote(start, &option, &prices).unwrap();
            assert_eq!(
                quote.check_out_time - quote.check_in_time,
                Duration::hours(i64::from(value))
            );
        }

        let daily = DurationOption::new("Harian", 24, DurationType::Daily, "daily");
        let prices = PriceTable::from_prices([("daily", 120_000)]);
        let quote = try_quote(start, &daily, &prices).unwrap();
        assert_eq!(quote.check_out_time - quote.check_in_time, Duration::hours(24));
    }

    #[test]
    fn test_is_deterministic() {
        let prices = PriceTable::from_prices([("3_hours", 45_000), ("monthly", 1_500_000)]);
        for option in [three_hours(), monthly()] {
            let first = compute_quote(Some(START), Some(&option), Some(&prices));
            let second = compute_quote(Some(START), Some(&option), Some(&prices));
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_to_quote_round_trips_accepted_quote() {
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let accepted = try_quote(at(START), &three_hours(), &prices).unwrap();
        let tagged = BookingQuote::from(Ok(accepted.clone()));
        assert_eq!(tagged.to_quote(), Ok(accepted));
    }

    #[test]
    fn test_serialized_shape() {
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let quote = compute_quote(Some(START), Some(&three_hours()), Some(&prices));
        let value = serde_json::to_value(&quote).unwrap();
        assert_eq!(value["is_valid"], true);
        assert_eq!(value["check_out_time"], "2025-03-01T13:00:00Z");
        assert_eq!(value["total_price"], 45000);
        assert!(value.get("error").is_none());

        let invalid = compute_quote(None, None, None);
        let value = serde_json::to_value(&invalid).unwrap();
        assert_eq!(value, serde_json::json!({ "is_valid": false, "error": "Data tidak lengkap" }));
    }
}
