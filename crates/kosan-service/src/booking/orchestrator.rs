//! Booking submission orchestrator.
//!
//! Turns an accepted quote into a pending booking with two bounded calls:
//! the availability oracle, then the booking store. The oracle answer is a
//! hard gate; nothing is inserted when it says the room is taken. The
//! store's overlap rejection closes the window between the two calls, so a
//! losing concurrent submission surfaces as [`BookingError::RoomUnavailable`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use kosan_core::config::BookingConfig;
use kosan_core::error::AppError;
use kosan_core::traits::AvailabilityOracle;
use kosan_core::types::{RoomId, UserId};
use kosan_database::store::BookingStore;
use kosan_entity::booking::{BookingRecord, BookingRequest, BookingStatus};

use super::error::BookingError;
use super::state::{SubmissionAttempt, SubmissionState};
use crate::quote::{BookingQuote, Quote};

/// Sequences the availability check and the insert for one submission.
#[derive(Clone)]
pub struct SubmissionOrchestrator {
    /// Availability oracle.
    oracle: Arc<dyn AvailabilityOracle>,
    /// Booking store.
    store: Arc<dyn BookingStore>,
    /// Bound on the oracle call.
    availability_timeout: Duration,
    /// Bound on the insert.
    persistence_timeout: Duration,
}

impl fmt::Debug for SubmissionOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmissionOrchestrator")
            .field("oracle", &self.oracle.name())
            .field("availability_timeout", &self.availability_timeout)
            .field("persistence_timeout", &self.persistence_timeout)
            .finish()
    }
}

impl SubmissionOrchestrator {
    /// Creates an orchestrator with timeouts from configuration.
    pub fn new(
        oracle: Arc<dyn AvailabilityOracle>,
        store: Arc<dyn BookingStore>,
        config: &BookingConfig,
    ) -> Self {
        Self::with_timeouts(
            oracle,
            store,
            Duration::from_millis(config.availability_timeout_ms),
            Duration::from_millis(config.persistence_timeout_ms),
        )
    }

    /// Creates an orchestrator with explicit timeouts.
    pub fn with_timeouts(
        oracle: Arc<dyn AvailabilityOracle>,
        store: Arc<dyn BookingStore>,
        availability_timeout: Duration,
        persistence_timeout: Duration,
    ) -> Self {
        Self {
            oracle,
            store,
            availability_timeout,
            persistence_timeout,
        }
    }

    /// Submit a tagged quote. An invalid quote is rejected before any call.
    pub async fn submit_booking(
        &self,
        room_id: RoomId,
        quote: &BookingQuote,
        user_id: UserId,
    ) -> Result<BookingRecord, BookingError> {
        let quote = quote.to_quote()?;
        self.submit_quote(room_id, &quote, user_id).await
    }

    /// Check availability for the quoted interval, then insert a pending booking.
    pub async fn submit_quote(
        &self,
        room_id: RoomId,
        quote: &Quote,
        user_id: UserId,
    ) -> Result<BookingRecord, BookingError> {
        let mut attempt = SubmissionAttempt::start(room_id);

        attempt.advance(SubmissionState::CheckingAvailability);
        let available = match tokio::time::timeout(
            self.availability_timeout,
            self.oracle
                .is_available(room_id, quote.check_in_time, quote.check_out_time),
        )
        .await
        {
            Ok(Ok(available)) => available,
            Ok(Err(e)) => {
                attempt.advance(SubmissionState::Failed);
                error!(room_id = %room_id, oracle = self.oracle.name(), error = %e, "Availability check failed");
                return Err(BookingError::AvailabilityCheckFailed(e.message));
            }
            Err(_) => {
                attempt.advance(SubmissionState::Failed);
                error!(
                    room_id = %room_id,
                    oracle = self.oracle.name(),
                    timeout_ms = self.availability_timeout.as_millis() as u64,
                    "Availability check timed out"
                );
                return Err(BookingError::AvailabilityCheckFailed(format!(
                    "no answer within {}ms",
                    self.availability_timeout.as_millis()
                )));
            }
        };

        if !available {
            attempt.advance(SubmissionState::Unavailable);
            info!(room_id = %room_id, "Room unavailable for requested interval");
            return Err(BookingError::RoomUnavailable);
        }
        attempt.advance(SubmissionState::Available);

        let request = BookingRequest {
            user_id,
            room_id,
            start_time: quote.check_in_time,
            end_time: quote.check_out_time,
            duration_type: quote.duration_type,
            total_price: quote.total_price,
            status: BookingStatus::Pending,
        };

        attempt.advance(SubmissionState::Persisting);
        let record =
            match tokio::time::timeout(self.persistence_timeout, self.store.insert(&request))
                .await
            {
                Ok(Ok(record)) => record,
                Ok(Err(e)) if e.is_conflict() => {
                    attempt.advance(SubmissionState::Unavailable);
                    warn!(room_id = %room_id, "Booking lost an overlapping insert");
                    return Err(BookingError::RoomUnavailable);
                }
                Ok(Err(e)) => {
                    attempt.advance(SubmissionState::Failed);
                    error!(room_id = %room_id, error = %e, "Booking insert failed");
                    return Err(BookingError::PersistenceFailed(failure_message(e)));
                }
                Err(_) => {
                    attempt.advance(SubmissionState::Failed);
                    error!(
                        room_id = %room_id,
                        timeout_ms = self.persistence_timeout.as_millis() as u64,
                        "Booking insert timed out"
                    );
                    return Err(BookingError::PersistenceFailed(format!(
                        "no answer within {}ms",
                        self.persistence_timeout.as_millis()
                    )));
                }
            };

        attempt.advance(SubmissionState::Persisted);
        info!(
            booking_id = %record.id,
            room_id = %room_id,
            user_id = %user_id,
            total_price = %record.total_price,
            "Booking persisted"
        );
        Ok(record)
    }
}

/// The store's message followed by its underlying cause, if any.
fn failure_message(err: AppError) -> String {
    match err.source {
        Some(cause) => format!("{}: {cause}", err.message),
        None => err.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use kosan_core::error::ErrorKind;
    use kosan_core::result::AppResult;
    use kosan_core::types::{BookingId, PageRequest, PageResponse};
    use kosan_database::memory::{MemoryBookingStore, StaticAvailabilityOracle};
    use kosan_entity::duration::{DurationOption, DurationType};
    use kosan_entity::pricing::PriceTable;

    use crate::quote::{compute_quote, try_quote};

    const START: &str = "2025-03-01T10:00:00Z";

    struct FailingOracle;

    #[async_trait]
    impl AvailabilityOracle for FailingOracle {
        async fn is_available(&self, _: RoomId, _: DateTime<Utc>, _: DateTime<Utc>) -> AppResult<bool> {
            Err(AppError::external_service("rpc returned 500"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    struct StalledOracle;

    #[async_trait]
    impl AvailabilityOracle for StalledOracle {
        async fn is_available(&self, _: RoomId, _: DateTime<Utc>, _: DateTime<Utc>) -> AppResult<bool> {
            std::future::pending::<AppResult<_>>().await
        }

        fn name(&self) -> &'static str {
            "stalled"
        }
    }

    struct BrokenStore {
        stall: bool,
    }

    #[async_trait]
    impl BookingStore for BrokenStore {
        async fn insert(&self, _: &BookingRequest) -> AppResult<BookingRecord> {
            if self.stall {
                std::future::pending::<AppResult<_>>().await
            } else {
                Err(AppError::with_source(
                    ErrorKind::Database,
                    "Failed to insert booking",
                    std::io::Error::other("connection reset by peer"),
                ))
            }
        }

        async fn find_by_id(&self, _: BookingId) -> AppResult<Option<BookingRecord>> {
            Ok(None)
        }

        async fn find_by_user(
            &self,
            _: UserId,
            page: &PageRequest,
        ) -> AppResult<PageResponse<BookingRecord>> {
            Ok(PageResponse::from_vec(Vec::new(), page))
        }

        async fn transition_status(
            &self,
            _: BookingId,
            _: BookingStatus,
            _: BookingStatus,
        ) -> AppResult<Option<BookingRecord>> {
            Ok(None)
        }

        async fn health_check(&self) -> AppResult<bool> {
            Ok(false)
        }
    }

    fn quote() -> Quote {
        quote_at(START)
    }

    fn quote_at(start: &str) -> Quote {
        let option = DurationOption::new("3 Jam", 3, DurationType::Hourly, "3_hours");
        let prices = PriceTable::from_prices([("3_hours", 45_000)]);
        let start = DateTime::parse_from_rfc3339(start).unwrap().with_timezone(&Utc);
        try_quote(start, &option, &prices).unwrap()
    }

    fn orchestrator(
        oracle: Arc<dyn AvailabilityOracle>,
        store: Arc<dyn BookingStore>,
    ) -> SubmissionOrchestrator {
        SubmissionOrchestrator::with_timeouts(
            oracle,
            store,
            Duration::from_secs(5),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_persists_pending_booking() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(
            Arc::new(StaticAvailabilityOracle::always_available()),
            store.clone(),
        );
        let user = UserId::new();
        let room = RoomId::new();
        let quote = quote();

        let record = orch.submit_quote(room, &quote, user).await.unwrap();

        assert_eq!(record.status, BookingStatus::Pending);
        assert_eq!(record.user_id, user);
        assert_eq!(record.room_id, room);
        assert_eq!(record.start_time, quote.check_in_time);
        assert_eq!(record.end_time, quote.check_out_time);
        assert_eq!(record.total_price, quote.total_price);
        assert_eq!(record.duration_type, DurationType::Hourly);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unavailable_never_inserts() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(
            Arc::new(StaticAvailabilityOracle::never_available()),
            store.clone(),
        );

        let err = orch
            .submit_quote(RoomId::new(), &quote(), UserId::new())
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::RoomUnavailable);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_oracle_failure_is_availability_check_failed() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(Arc::new(FailingOracle), store.clone());

        let err = orch
            .submit_quote(RoomId::new(), &quote(), UserId::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::AvailabilityCheckFailed("rpc returned 500".into())
        );
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_oracle_timeout_is_never_success() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(Arc::new(StalledOracle), store.clone());

        let err = orch
            .submit_quote(RoomId::new(), &quote(), UserId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::AvailabilityCheckFailed(_)));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_failure_carries_underlying_cause() {
        let orch = orchestrator(
            Arc::new(StaticAvailabilityOracle::always_available()),
            Arc::new(BrokenStore { stall: false }),
        );

        let err = orch
            .submit_quote(RoomId::new(), &quote(), UserId::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::PersistenceFailed(
                "Failed to insert booking: connection reset by peer".into()
            )
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_store_timeout_is_persistence_failed() {
        let orch = orchestrator(
            Arc::new(StaticAvailabilityOracle::always_available()),
            Arc::new(BrokenStore { stall: true }),
        );

        let err = orch
            .submit_quote(RoomId::new(), &quote(), UserId::new())
            .await
            .unwrap_err();

        assert!(matches!(err, BookingError::PersistenceFailed(_)));
    }

    #[tokio::test]
    async fn test_invalid_quote_calls_nothing() {
        let oracle = Arc::new(StaticAvailabilityOracle::always_available());
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(oracle.clone(), store.clone());

        let option = DurationOption::new("3 Jam", 3, DurationType::Hourly, "3_hours");
        let prices = PriceTable::from_prices([("3_hours", 0)]);
        let invalid = compute_quote(Some(START), Some(&option), Some(&prices));

        let err = orch
            .submit_booking(RoomId::new(), &invalid, UserId::new())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            BookingError::DurationUnavailable {
                label: "3 Jam".into()
            }
        );
        assert_eq!(oracle.calls(), 0);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_concurrent_submissions_book_room_once() {
        let store = Arc::new(MemoryBookingStore::new());
        let oracle = Arc::new(StaticAvailabilityOracle::always_available());
        let orch = orchestrator(oracle.clone(), store.clone());
        let room = RoomId::new();
        let quote = quote();

        let (first, second) = tokio::join!(
            orch.submit_quote(room, &quote, UserId::new()),
            orch.submit_quote(room, &quote, UserId::new()),
        );

        let results = [first, second];
        let won = results.iter().filter(|r| r.is_ok()).count();
        let lost = results
            .iter()
            .filter(|r| matches!(r, Err(BookingError::RoomUnavailable)))
            .count();

        assert_eq!(oracle.calls(), 2);
        assert_eq!((won, lost), (1, 1));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_partially_overlapping_submissions_book_room_once() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(
            Arc::new(StaticAvailabilityOracle::always_available()),
            store.clone(),
        );
        let room = RoomId::new();
        let morning = quote_at("2025-03-01T10:00:00Z");
        let midday = quote_at("2025-03-01T12:00:00Z");

        let (first, second) = tokio::join!(
            orch.submit_quote(room, &morning, UserId::new()),
            orch.submit_quote(room, &midday, UserId::new()),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r, Err(BookingError::RoomUnavailable)))
                .count(),
            1
        );
        assert_eq!(store.len().await, 1);

        // Whichever interval won ends by 15:00, so a 15:00 check-in still fits.
        let afternoon = quote_at("2025-03-01T15:00:00Z");
        assert!(orch.submit_quote(room, &afternoon, UserId::new()).await.is_ok());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_memory_store_as_oracle_rejects_second_booking() {
        let store = Arc::new(MemoryBookingStore::new());
        let orch = orchestrator(store.clone(), store.clone());
        let room = RoomId::new();

        orch.submit_quote(room, &quote(), UserId::new()).await.unwrap();
        let err = orch
            .submit_quote(room, &quote(), UserId::new())
            .await
            .unwrap_err();

        assert_eq!(err, BookingError::RoomUnavailable);
        assert_eq!(store.len().await, 1);
    }
}
