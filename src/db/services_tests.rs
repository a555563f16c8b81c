#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use crate::api::{Level, ReservoirId, ReservoirInfo, SeriesPoint};
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::{RepositoryError, RepositoryResult, ReservoirRepository};
    use crate::db::services;

    const DEADLINE: Duration = Duration::from_secs(5);

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 6, d).unwrap()
    }

    fn info(name: &str) -> ReservoirInfo {
        ReservoirInfo {
            name: ReservoirId::new(name),
            basin: "cauvery".to_string(),
            capacity_mcm: 100.0,
        }
    }

    /// Repository with three reservoirs seeded in non-alphabetical
    /// order, each forecasting a distinct value.
    fn seeded_repo() -> LocalRepository {
        let repo = LocalRepository::new();
        for (i, name) in ["krs", "harangi", "kabini"].iter().enumerate() {
            repo.seed_reservoir(
                info(name),
                vec![SeriesPoint::new(day(1), 10.0 + i as f64)],
                vec![SeriesPoint::new(day(15), 40.0 + i as f64)],
            );
        }
        repo
    }

    // =========================================================
    // Pass-through Operations
    // =========================================================

    #[tokio::test]
    async fn test_list_reservoirs_passes_through() {
        let repo = seeded_repo();

        let reservoirs = services::list_reservoirs(&repo, DEADLINE).await.unwrap();
        assert_eq!(reservoirs.len(), 3);
        assert_eq!(reservoirs[0].basin, "cauvery");
    }

    #[tokio::test]
    async fn test_latest_levels_passes_through() {
        let repo = seeded_repo();

        let levels: Vec<Level> = services::latest_levels(&repo, DEADLINE).await.unwrap();
        assert_eq!(levels.len(), 3);
        assert!(levels.iter().all(|level| level.date == day(1)));
    }

    #[tokio::test]
    async fn test_prediction_for_unknown_reservoir_is_not_found() {
        let repo = seeded_repo();

        let result =
            services::prediction_for(&repo, DEADLINE, &ReservoirId::new("atlantis"), None).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_historic_for_honours_the_anchor() {
        let repo = LocalRepository::new();
        repo.seed_reservoir(
            info("kabini"),
            vec![
                SeriesPoint::new(day(1), 10.0),
                SeriesPoint::new(day(2), 11.0),
                SeriesPoint::new(day(3), 12.0),
            ],
            vec![],
        );

        let series = services::historic_for(
            &repo,
            DEADLINE,
            &ReservoirId::new("kabini"),
            Some(day(2)),
        )
        .await
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.last().unwrap().date, day(2));
    }

    // =========================================================
    // Aggregate Fan-out
    // =========================================================

    #[tokio::test]
    async fn test_predictions_for_all_preserves_enumeration_order() {
        let repo = seeded_repo();

        let predictions = services::predictions_for_all(&repo, DEADLINE, day(15))
            .await
            .unwrap();

        let order: Vec<&str> = predictions
            .iter()
            .map(|entry| entry.reservoir.as_str())
            .collect();
        assert_eq!(order, vec!["krs", "harangi", "kabini"]);

        // Each entry carries its own reservoir's forecast.
        assert_eq!(predictions[0].prediction, vec![SeriesPoint::new(day(15), 40.0)]);
        assert_eq!(predictions[2].prediction, vec![SeriesPoint::new(day(15), 42.0)]);
    }

    #[tokio::test]
    async fn test_predictions_for_all_is_all_or_nothing() {
        let repo = seeded_repo();
        repo.fail_prediction(
            &ReservoirId::new("harangi"),
            RepositoryError::unavailable("Forecast store is not reachable"),
        );

        let result = services::predictions_for_all(&repo, DEADLINE, day(15)).await;
        assert!(matches!(result, Err(RepositoryError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_predictions_for_all_on_empty_store_is_empty() {
        let repo = LocalRepository::new();

        let predictions = services::predictions_for_all(&repo, DEADLINE, day(15))
            .await
            .unwrap();
        assert!(predictions.is_empty());
    }

    // =========================================================
    // Deadlines
    // =========================================================

    /// Repository whose every query hangs far longer than any deadline.
    struct StalledRepository;

    async fn stall() {
        tokio::time::sleep(Duration::from_secs(3600)).await;
    }

    #[async_trait]
    impl ReservoirRepository for StalledRepository {
        async fn list_reservoirs(&self) -> RepositoryResult<Vec<ReservoirInfo>> {
            stall().await;
            Ok(Vec::new())
        }

        async fn latest_levels(&self) -> RepositoryResult<Vec<Level>> {
            stall().await;
            Ok(Vec::new())
        }

        async fn prediction(
            &self,
            _reservoir: &ReservoirId,
            _anchor: Option<NaiveDate>,
        ) -> RepositoryResult<Vec<SeriesPoint>> {
            stall().await;
            Ok(Vec::new())
        }

        async fn historic(
            &self,
            _reservoir: &ReservoirId,
            _anchor: Option<NaiveDate>,
        ) -> RepositoryResult<Vec<SeriesPoint>> {
            stall().await;
            Ok(Vec::new())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_query_times_out() {
        let repo = StalledRepository;

        let result = services::latest_levels(&repo, Duration::from_secs(1)).await;
        match result {
            Err(RepositoryError::Timeout { context, .. }) => {
                assert_eq!(context.operation.as_deref(), Some("latest_levels"));
                assert!(context.retryable);
            }
            other => panic!("expected Timeout, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_covers_the_whole_fan_out() {
        let repo = StalledRepository;

        let result = services::predictions_for_all(&repo, Duration::from_secs(1), day(15)).await;
        assert!(matches!(result, Err(RepositoryError::Timeout { .. })));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RepositoryError::unavailable("down").is_retryable());
        assert!(RepositoryError::timeout("slow").is_retryable());
        assert!(!RepositoryError::not_found("missing").is_retryable());
        assert!(!RepositoryError::invalid_input("bad date").is_retryable());
    }
}
