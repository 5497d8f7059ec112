mod utils;

use anicatalog_lib::modules::catalog::{AnimeUpdate, AnimeUpdateRequest, Genre};
use anicatalog_lib::modules::ranking::{DisplayScore, EngagementKind};
use anicatalog_lib::shared::application::{PaginationParams, SortOrder};
use anicatalog_lib::shared::config::RankingConfig;
use anicatalog_lib::shared::errors::AppError;
use chrono_tz::Tz;
use tokio_test::assert_ok;
use utils::factories::{anime, anime_with_id, engagements, ratings, topic, utc};
use utils::TestCatalog;
use uuid::Uuid;

fn ranking(prior_weight: f64, recommended_min_reviews: usize) -> RankingConfig {
    RankingConfig {
        prior_weight,
        recommended_min_reviews,
        ..RankingConfig::default()
    }
}

#[tokio::test]
async fn test_most_popular_orders_by_weighted_rating() {
    let catalog = TestCatalog::with_config(ranking(5.0, 3), Tz::UTC);
    let steady = catalog.anime.insert(anime_with_id(1, "Monster"));
    let lucky = catalog.anime.insert(anime_with_id(2, "One Hit"));
    let weak = catalog.anime.insert(anime_with_id(3, "Filler Arc"));
    let unrated = catalog.anime.insert(anime_with_id(4, "Unseen"));

    catalog
        .reviews
        .rate(steady.id, ratings(&[5.0, 5.0, 5.0, 5.0, 4.0, 5.0]));
    catalog.reviews.rate(lucky.id, ratings(&[5.0]));
    catalog.reviews.rate(weak.id, ratings(&[2.0, 2.0, 2.0, 2.0]));

    let ranked = assert_ok!(catalog.facade.most_popular_anime().await);

    // The single 5 is pulled toward the catalog mean of 42/11 and falls
    // behind six mostly perfect ratings
    let ids: Vec<Uuid> = ranked.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![steady.id, lucky.id, weak.id]);
    assert!(!ids.contains(&unrated.id));
    assert_eq!(ranked[1].average_rating, DisplayScore::from_raw(5.0));
    assert_eq!(ranked[1].weighted_rating.to_string(), "4.0");
    assert_eq!(ranked[1].review_count, 1);
}

#[tokio::test]
async fn test_empty_catalog_has_no_popular_anime() {
    let catalog = TestCatalog::new();
    catalog.anime.insert(anime("Unrated"));

    let ranked = assert_ok!(catalog.facade.most_popular_anime().await);
    assert!(ranked.is_empty());
}

#[tokio::test]
async fn test_recommended_requires_more_reviews_than_threshold() {
    let catalog = TestCatalog::with_config(ranking(1.0, 3), Tz::UTC);
    let three = catalog.anime.insert(anime("Three reviews"));
    let four = catalog.anime.insert(anime("Four reviews"));

    catalog.reviews.rate(three.id, ratings(&[5.0, 5.0, 5.0]));
    catalog.reviews.rate(four.id, ratings(&[2.0, 3.0, 2.0, 3.0]));

    let recommended = assert_ok!(catalog.facade.recommended_anime().await);

    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended[0].id, four.id);
    assert_eq!(recommended[0].review_count, 4);
}

#[tokio::test]
async fn test_recommended_without_candidates_is_not_found() {
    let catalog = TestCatalog::new();
    let few = catalog.anime.insert(anime("Barely rated"));
    catalog.reviews.rate(few.id, ratings(&[4.0]));

    let err = catalog.facade.recommended_anime().await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_unbounded_review_threshold_recommends_nothing() {
    let catalog = TestCatalog::with_config(ranking(1.0, usize::MAX), Tz::UTC);
    let show = catalog.anime.insert(anime("Cowboy Bebop"));
    catalog.reviews.rate(show.id, ratings(&[5.0, 5.0, 5.0, 5.0, 5.0]));

    let err = catalog.facade.recommended_anime().await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_details_aggregate_reviews_topics_and_favorites() {
    let catalog = TestCatalog::new();
    let show = catalog.anime.insert(anime("Frieren"));
    catalog.reviews.rate(show.id, ratings(&[4.0, 5.0, 3.0, 4.0]));
    catalog.topics.insert(topic(show.id, "Himmel appreciation"));
    catalog.topics.insert(topic(show.id, "Magic system"));
    catalog.topics.insert(topic(Uuid::new_v4(), "Other show"));
    catalog.engagements.record(
        show.id,
        engagements(EngagementKind::Favorite, &[utc(2024, 1, 2), utc(2024, 2, 3)]),
    );

    let details = assert_ok!(catalog.facade.anime_details(show.id).await);

    assert_eq!(details.review_count, 4);
    assert_eq!(details.average_rating, Some(DisplayScore::from_raw(4.0)));
    assert_eq!(details.topic_count, 2);
    assert_eq!(details.favorite_count, 2);
}

#[tokio::test]
async fn test_admin_page_filters_sorts_and_rounds() {
    let catalog = TestCatalog::new();
    let a = catalog.anime.insert(anime("Naruto"));
    let b = catalog.anime.insert(anime("Naruto Shippuden"));
    catalog.anime.insert(anime("Bleach"));
    catalog.reviews.rate(b.id, ratings(&[4.0, 4.0, 5.0, 4.0]));

    let page = assert_ok!(
        catalog
            .facade
            .anime_admin_page(PaginationParams::new(1, 10), "  naru ", SortOrder::Desc)
            .await
    );

    assert_eq!(page.total_count, 2);
    let ids: Vec<Uuid> = page.items.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![b.id, a.id]);
    assert_eq!(page.items[0].average_rating.map(|s| s.to_string()), Some("4.3".into()));
    assert_eq!(page.items[1].average_rating, None);
}

#[tokio::test]
async fn test_admin_page_rejects_page_zero() {
    let catalog = TestCatalog::new();

    let err = catalog
        .facade
        .anime_admin_page(PaginationParams::new(0, 10), "", SortOrder::Asc)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_genres_are_replaced_and_listed() {
    let catalog = TestCatalog::new();
    catalog.anime.add_genre(Genre::new(1, "Action"));
    catalog.anime.add_genre(Genre::new(2, "Comedy"));
    let show = catalog.anime.insert(anime("Gintama"));

    let updated = assert_ok!(
        catalog
            .facade
            .update_anime(
                show.id,
                AnimeUpdateRequest {
                    fields: AnimeUpdate {
                        title: Some("Gintama.".to_string()),
                        episodes: Some(367),
                        ..Default::default()
                    },
                    genre_ids: vec![2, 1, 2],
                    ..Default::default()
                },
            )
            .await
    );

    assert_eq!(updated.anime.slug.as_str(), "gintama");
    assert_eq!(updated.anime.episodes, 367);
    assert_eq!(updated.anime.version, show.version + 1);
    let mut genre_ids = updated.anime.genre_ids();
    genre_ids.sort();
    assert_eq!(genre_ids, vec![1, 2]);

    let comedy = assert_ok!(catalog.facade.anime_by_genre(2).await);
    assert_eq!(comedy.len(), 1);
    assert_eq!(comedy[0].id, show.id);
    assert_eq!(comedy[0].average_rating, None);

    let missing = catalog.facade.anime_by_genre(3).await.unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_invalid_episode_count_saves_nothing() {
    let catalog = TestCatalog::new();
    let show = catalog.anime.insert(anime("Trigun"));

    let err = catalog
        .facade
        .update_anime(
            show.id,
            AnimeUpdateRequest {
                fields: AnimeUpdate {
                    episodes: Some(-1),
                    ..Default::default()
                },
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::InvalidArgument(_)));
    assert_eq!(catalog.anime.save_count(), 0);
}

#[tokio::test]
async fn test_trending_topics_use_the_local_half_year() {
    let tz: Tz = "Asia/Jakarta".parse().unwrap();
    let catalog = TestCatalog::with_config(RankingConfig::default(), tz);
    let show = Uuid::new_v4();
    let hot = catalog.topics.insert(topic(show, "Finale reactions"));
    let cold = catalog.topics.insert(topic(show, "Old news"));

    // 2024-06-30 20:00 UTC is already July 1st in Jakarta
    let late_june_utc = chrono::DateTime::parse_from_rfc3339("2024-06-30T20:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    catalog.engagements.record(
        hot.id,
        engagements(
            EngagementKind::Like,
            &[utc(2024, 7, 3), utc(2024, 8, 1), late_june_utc],
        ),
    );
    catalog.engagements.record(
        cold.id,
        engagements(EngagementKind::Like, &[utc(2024, 3, 1), utc(2024, 7, 5)]),
    );
    catalog
        .engagements
        .record(cold.id, engagements(EngagementKind::Dislike, &[utc(2024, 9, 1)]));

    let trending = assert_ok!(catalog.facade.trending_topics(utc(2024, 10, 1)).await);

    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0].id, hot.id);
    assert_eq!(trending[0].like_count, 3);
    assert_eq!(trending[1].id, cold.id);
    assert_eq!(trending[1].like_count, 1);
}

#[tokio::test]
async fn test_topic_reactions_and_deletion() {
    let catalog = TestCatalog::new();
    let thread = catalog.topics.insert(topic(Uuid::new_v4(), "Is season 2 good?"));
    catalog.engagements.record(
        thread.id,
        engagements(EngagementKind::Like, &[utc(2024, 1, 1), utc(2024, 1, 2)]),
    );
    catalog
        .engagements
        .record(thread.id, engagements(EngagementKind::Dislike, &[utc(2024, 1, 3)]));

    let reactions = assert_ok!(catalog.facade.topic_reactions(thread.id).await);
    assert_eq!((reactions.likes, reactions.dislikes), (2, 1));

    let deleted = assert_ok!(catalog.facade.delete_topic(thread.id).await);
    assert_eq!(deleted.media_retired, 0);
    assert!(catalog.topics.is_deleted(thread.id));

    let err = catalog.facade.topic_reactions(thread.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let again = catalog.facade.delete_topic(thread.id).await.unwrap_err();
    assert!(matches!(again, AppError::NotFound(_)));
}
