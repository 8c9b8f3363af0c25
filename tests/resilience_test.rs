mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{degraded_search_service, hash_only_chain, sample_corpus, DIM};
use pitchscout::cache::TtlCache;
use pitchscout::embedding::hash::hash_embedding;
use pitchscout::embedding::EmbeddingChain;
use pitchscout::ratelimit::SlidingWindowLimiter;

#[tokio::test]
async fn index_outage_degrades_to_text_match() {
    let (service, _store) = degraded_search_service(sample_corpus()).await;

    let response = service.search("patient monitoring", 5).await;
    assert!(response.degraded);
    assert!(!response.results.is_empty());
    assert_eq!(response.results[0].record.id, "care");
    assert!(response.confidence <= 0.1);
    for result in &response.results {
        assert!((result.similarity - 0.01).abs() < 1e-6);
    }
}

#[tokio::test]
async fn index_outage_with_no_text_match_is_empty_not_error() {
    let (service, _store) = degraded_search_service(sample_corpus()).await;

    let response = service.search("zebra unicycles", 5).await;
    assert!(response.degraded);
    assert!(response.results.is_empty());
    assert_eq!(response.confidence, 0.0);
    assert!(!response.reasons.is_empty());
}

#[tokio::test]
async fn empty_provider_chain_always_produces_vectors() {
    let chain = hash_only_chain();
    let vector = chain.embed("any text at all").await;
    assert_eq!(vector.len(), DIM);
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn hash_fallback_is_deterministic_across_chains() {
    let a = hash_only_chain().embed("fintech lending platform").await;
    let b = hash_only_chain().embed("fintech lending platform").await;
    assert_eq!(a, b);
    assert_eq!(a, hash_embedding("fintech lending platform", DIM));
}

#[tokio::test]
async fn saturated_limiter_never_blocks_embedding() {
    // One-call budget, saturated before the chain runs: every embed must
    // still resolve via the hash fallback.
    let limiter = Arc::new(SlidingWindowLimiter::new(1, Duration::from_secs(60)));
    assert!(limiter.try_acquire("primary"));

    let chain = EmbeddingChain::new(
        vec![],
        limiter,
        Arc::new(TtlCache::new(10, Duration::from_secs(60))),
        DIM,
    );
    for text in ["one", "two", "three"] {
        assert_eq!(chain.embed(text).await.len(), DIM);
    }
}

#[tokio::test]
async fn search_over_degraded_stack_never_panics_on_odd_input() {
    let (service, _store) = degraded_search_service(sample_corpus()).await;

    for query in ["", "   ", "!!!", "the of and", "<b>html</b> soup &amp; entities"] {
        let response = service.search(query, 5).await;
        assert!(response.confidence >= 0.0);
    }
}
