//! SQLite history integration tests.

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use fx_types::{ConversionRecord, ExchangeRate, History, HistoryStore, StorageMode};

    use crate::SqliteHistory;

    async fn setup_store() -> SqliteHistory {
        SqliteHistory::new("sqlite::memory:").await.unwrap()
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn record_at(to: &str, amount: f64, timestamp: DateTime<Utc>) -> ConversionRecord {
        let rate = ExchangeRate::new(0.85).unwrap();
        ConversionRecord::new("USD", to, amount, amount * 0.85, rate, timestamp)
    }

    fn records(history: History) -> Vec<ConversionRecord> {
        match history {
            History::Records(records) => records,
            other => panic!("expected stored records, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_history() {
        let store = setup_store().await;

        let history = records(store.recent_history(10).await.unwrap());

        assert!(history.is_empty());
        assert_eq!(store.mode(), StorageMode::Sqlite);
    }

    #[tokio::test]
    async fn test_record_round_trips_fields() {
        let store = setup_store().await;
        let record = record_at("EUR", 100.0, base_time());

        store.record(&record).await.unwrap();
        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
    }

    #[tokio::test]
    async fn test_three_conversions_newest_first() {
        let store = setup_store().await;
        let first = record_at("EUR", 1.0, base_time());
        let second = record_at("GBP", 2.0, base_time() + Duration::seconds(1));
        let third = record_at("INR", 3.0, base_time() + Duration::seconds(2));

        store.record(&first).await.unwrap();
        store.record(&second).await.unwrap();
        store.record(&third).await.unwrap();

        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history, vec![third, second, first]);
    }

    #[tokio::test]
    async fn test_ordering_by_timestamp_not_insertion() {
        let store = setup_store().await;
        let newer = record_at("EUR", 1.0, base_time() + Duration::minutes(5));
        let older = record_at("GBP", 2.0, base_time());

        store.record(&newer).await.unwrap();
        store.record(&older).await.unwrap();

        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history[0].id, newer.id);
        assert_eq!(history[1].id, older.id);
    }

    #[tokio::test]
    async fn test_sub_second_timestamps_order_correctly() {
        let store = setup_store().await;
        let earlier = record_at("EUR", 1.0, base_time() + Duration::milliseconds(90));
        let later = record_at("GBP", 2.0, base_time() + Duration::milliseconds(100));

        store.record(&later).await.unwrap();
        store.record(&earlier).await.unwrap();

        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history[0].id, later.id);
    }

    #[tokio::test]
    async fn test_equal_timestamps_latest_insert_first() {
        let store = setup_store().await;
        let a = record_at("EUR", 1.0, base_time());
        let b = record_at("GBP", 2.0, base_time());

        store.record(&a).await.unwrap();
        store.record(&b).await.unwrap();

        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history[0].id, b.id);
        assert_eq!(history[1].id, a.id);
    }

    #[tokio::test]
    async fn test_limit_caps_results() {
        let store = setup_store().await;
        for i in 0..15 {
            let record = record_at("EUR", i as f64, base_time() + Duration::seconds(i));
            store.record(&record).await.unwrap();
        }

        let history = records(store.recent_history(10).await.unwrap());

        assert_eq!(history.len(), 10);
        assert_eq!(history[0].amount, 14.0);
        assert_eq!(history[9].amount, 5.0);
        assert!(
            history
                .windows(2)
                .all(|pair| pair[0].timestamp > pair[1].timestamp)
        );
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = setup_store().await;
        let record = record_at("EUR", 1.0, base_time());

        store.record(&record).await.unwrap();
        let result = store.record(&record).await;

        assert!(result.is_err());
    }
}
