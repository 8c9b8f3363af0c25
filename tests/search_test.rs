mod helpers;

use helpers::{record, sample_corpus, search_service};

#[tokio::test]
async fn health_query_finds_health_records_only() {
    let (service, _store, _index) = search_service(sample_corpus()).await;

    let response = service.search("AI startups for healthcare", 10).await;
    assert!(!response.degraded);
    let ids: Vec<&str> = response.results.iter().map(|r| r.record.id.as_str()).collect();
    assert!(ids.contains(&"medi"), "expected medi in {ids:?}");
    assert!(!ids.contains(&"farm"));
    assert!(!ids.contains(&"game"));
}

#[tokio::test]
async fn banking_query_respects_category_gate() {
    let (service, _store, _index) = search_service(sample_corpus()).await;

    let response = service.search("mobile banking wallet", 10).await;
    let ids: Vec<&str> = response.results.iter().map(|r| r.record.id.as_str()).collect();
    assert_eq!(ids, vec!["pay"]);
    assert!(response
        .reasons
        .iter()
        .any(|r| r.contains("banking")));
}

#[tokio::test]
async fn exact_phrase_ranks_above_scattered_tokens() {
    let (service, _store, _index) = search_service(vec![
        record(
            "exact",
            "MonitorCo",
            "healthtech",
            "remote patient monitoring sensors",
            "hardware for clinics",
        ),
        record(
            "scattered",
            "HealthHub",
            "healthtech",
            "monitoring tools, remote work for patient groups",
            "software for clinics",
        ),
    ])
    .await;

    let response = service.search("remote patient monitoring", 10).await;
    assert_eq!(response.results[0].record.id, "exact");
    assert!(response.results[0].breakdown.exact_phrase > 0.0);
}

#[tokio::test]
async fn synonym_expansion_reaches_related_vocabulary() {
    // Indexed text says "medical", the query says "healthcare"; expansion
    // bridges the two.
    let (service, _store, _index) = search_service(vec![record(
        "medi",
        "MediScan",
        "healthtech",
        "medical imaging for hospitals and doctors",
        "diagnostics",
    )])
    .await;

    let response = service.search("healthcare imaging", 5).await;
    assert!(!response.degraded);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].record.id, "medi");
}

#[tokio::test]
async fn limit_caps_result_count() {
    let records: Vec<_> = (0..6)
        .map(|i| {
            record(
                &format!("h{i}"),
                &format!("HealthCo {i}"),
                "healthtech",
                "diagnosis tools for clinics and doctors",
                "health support",
            )
        })
        .collect();
    let (service, _store, _index) = search_service(records).await;

    let response = service.search("diagnosis clinics", 3).await;
    assert_eq!(response.results.len(), 3);
}

#[tokio::test]
async fn zero_limit_uses_default() {
    let (service, _store, _index) = search_service(sample_corpus()).await;
    let response = service.search("healthcare diagnosis", 0).await;
    assert!(!response.results.is_empty());
    assert!(response.results.len() <= 10);
}

#[tokio::test]
async fn stopword_only_query_yields_structured_empty() {
    let (service, _store, _index) = search_service(sample_corpus()).await;
    let response = service.search("the of and a", 5).await;
    assert!(response.results.is_empty());
    assert_eq!(response.confidence, 0.0);
    assert!(!response.degraded);
}

#[tokio::test]
async fn repeated_query_served_from_cache() {
    let (service, store, _index) = search_service(sample_corpus()).await;

    let first = service.search("healthcare diagnosis clinics", 5).await;
    assert!(!first.results.is_empty());

    // Removing the backing record doesn't change the cached response.
    store.remove("medi").await;
    store.remove("care").await;
    let second = service.search("healthcare diagnosis clinics", 5).await;
    assert_eq!(second.results.len(), first.results.len());
}

#[tokio::test]
async fn confidence_tracks_top_similarity() {
    let (service, _store, _index) = search_service(sample_corpus()).await;
    let response = service.search("AI startups for healthcare", 5).await;
    assert!(!response.results.is_empty());
    let top = response.results[0].similarity.clamp(0.0, 1.0);
    assert!((response.confidence - top).abs() < 1e-6);
}

#[tokio::test]
async fn reindex_rebuilds_after_index_loss() {
    let (service, store, index) = search_service(sample_corpus()).await;
    assert_eq!(index.len().await, 5);

    for id in ["medi", "farm", "pay", "care", "game"] {
        service.remove_record(id).await.unwrap();
    }
    assert!(index.is_empty().await);

    let indexed = service
        .reindex(&pitchscout::content::RecordFilter::default())
        .await
        .unwrap();
    assert_eq!(indexed, 5);
    assert_eq!(store.len().await, 5);
}
