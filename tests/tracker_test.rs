//! Integration tests for coverage tracking and question evaluation
//!
//! The model boundary is mocked with mockall so evaluation behavior can be
//! scripted precisely.

use std::sync::Arc;

use mockall::mock;
use mockall::Sequence;
use pretty_assertions::assert_eq;

use discovery_coach::error::ModelResult;
use discovery_coach::gemini::{GenerateRequest, TextModel};
use discovery_coach::session::Turn;
use discovery_coach::tracker::{CoverageBand, CoverageTracker, Topic};

mock! {
    Model {}

    #[async_trait::async_trait]
    impl TextModel for Model {
        async fn generate(&self, request: GenerateRequest) -> ModelResult<String>;
    }
}

fn verdict_json(score: u8, areas: &[&str]) -> String {
    serde_json::json!({
        "score": score,
        "coverage_areas": areas,
        "strengths": "Specific and contextual",
        "improvement": "Quantify the impact",
        "follow_up_suggestion": "What happens when that fails?",
        "tip": "Build on earlier answers"
    })
    .to_string()
}

#[tokio::test]
async fn test_evaluate_updates_tally_scores_and_history() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(1)
        .returning(|_| Ok(verdict_json(4, &["guardrails", "data"])));

    let mut tracker = CoverageTracker::new(Arc::new(model));
    let verdict = tracker
        .evaluate("What should the agent never do?", "Never auto-close legal tickets.", &[])
        .await
        .unwrap();

    assert_eq!(verdict.score, 4);

    let stats = tracker.stats();
    assert_eq!(stats.questions, 1);
    assert_eq!(stats.max, 4);
    assert_eq!(stats.min, 4);

    let status = tracker.coverage_status();
    let guardrails = status.iter().find(|e| e.topic == Topic::Guardrails).unwrap();
    assert_eq!(guardrails.count, 1);
    assert_eq!(guardrails.band, CoverageBand::LightlyCovered);

    let data = status.iter().find(|e| e.topic == Topic::Data).unwrap();
    assert_eq!(data.count, 1);

    assert_eq!(tracker.history().len(), 1);
    assert_eq!(tracker.history()[0].question, "What should the agent never do?");
}

#[tokio::test]
async fn test_all_topics_start_not_covered() {
    let tracker = CoverageTracker::new(Arc::new(MockModel::new()));

    let status = tracker.coverage_status();
    assert_eq!(status.len(), 8);
    for entry in status {
        assert_eq!(entry.count, 0);
        assert_eq!(entry.band, CoverageBand::NotCovered);
    }
    assert_eq!(tracker.average_score(), 0.0);
}

#[tokio::test]
async fn test_unknown_coverage_tag_is_ignored() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(1)
        .returning(|_| Ok(verdict_json(3, &["guardrails", "mystery_topic"])));

    let mut tracker = CoverageTracker::new(Arc::new(model));
    tracker.evaluate("q", "a", &[]).await.unwrap();

    let total: u32 = tracker.coverage_status().iter().map(|e| e.count).sum();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_malformed_reply_yields_fallback_and_still_advances() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(1)
        .returning(|_| Ok("I'd rather not produce JSON.".to_string()));

    let mut tracker = CoverageTracker::new(Arc::new(model));
    let verdict = tracker.evaluate("q", "a", &[]).await.unwrap();

    assert_eq!(verdict.score, 3);
    assert_eq!(verdict.strengths, "Question received");
    assert_eq!(tracker.history().len(), 1);

    let status = tracker.coverage_status();
    let process = status
        .iter()
        .find(|e| e.topic == Topic::ProcessMapping)
        .unwrap();
    assert_eq!(process.count, 1);
}

#[tokio::test]
async fn test_average_over_multiple_scores() {
    let mut model = MockModel::new();
    let mut seq = Sequence::new();
    for score in [2u8, 4, 5] {
        model
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(verdict_json(score, &["process_mapping"])));
    }

    let mut tracker = CoverageTracker::new(Arc::new(model));
    for q in ["q1", "q2", "q3"] {
        tracker.evaluate(q, "a", &[]).await.unwrap();
    }

    let stats = tracker.stats();
    assert_eq!(stats.questions, 3);
    assert!((stats.average - 11.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.max, 5);
    assert_eq!(stats.min, 2);
}

#[tokio::test]
async fn test_repeated_topic_reaches_well_covered() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(4)
        .returning(|_| Ok(verdict_json(4, &["roi_metrics"])));

    let mut tracker = CoverageTracker::new(Arc::new(model));

    let mut last_count = 0;
    for q in ["q1", "q2", "q3", "q4"] {
        tracker.evaluate(q, "a", &[]).await.unwrap();
        let entry = tracker
            .coverage_status()
            .into_iter()
            .find(|e| e.topic == Topic::RoiMetrics)
            .unwrap();
        // Counts only ever grow within a session
        assert!(entry.count > last_count);
        last_count = entry.count;
    }

    let entry = tracker
        .coverage_status()
        .into_iter()
        .find(|e| e.topic == Topic::RoiMetrics)
        .unwrap();
    assert_eq!(entry.count, 4);
    assert_eq!(entry.band, CoverageBand::WellCovered);
}

#[tokio::test]
async fn test_reset_clears_all_state() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(2)
        .returning(|_| Ok(verdict_json(5, &["adoption", "deployment"])));

    let mut tracker = CoverageTracker::new(Arc::new(model));
    tracker.evaluate("q1", "a", &[]).await.unwrap();
    tracker.evaluate("q2", "a", &[]).await.unwrap();

    tracker.reset();

    assert_eq!(tracker.stats().questions, 0);
    assert_eq!(tracker.average_score(), 0.0);
    assert!(tracker.history().is_empty());
    for entry in tracker.coverage_status() {
        assert_eq!(entry.band, CoverageBand::NotCovered);
    }
}

#[tokio::test]
async fn test_summarize_returns_model_reply_verbatim() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(1)
        .withf(|request: &GenerateRequest| {
            request.contents[0].text().contains("## Session Transcript")
        })
        .returning(|_| Ok("You asked strong process questions today.".to_string()));

    let tracker = CoverageTracker::new(Arc::new(model));
    let transcript = vec![
        Turn::persona("Hi, I run support."),
        Turn::practitioner("What does triage look like today?"),
        Turn::persona("Mostly manual routing."),
    ];

    let summary = tracker.summarize(&transcript).await.unwrap();
    assert_eq!(summary, "You asked strong process questions today.");
}

#[tokio::test]
async fn test_coverage_summary_text_groups_by_band() {
    let mut model = MockModel::new();
    model
        .expect_generate()
        .times(2)
        .returning(|_| Ok(verdict_json(4, &["guardrails"])));

    let mut tracker = CoverageTracker::new(Arc::new(model));
    tracker.evaluate("q1", "a", &[]).await.unwrap();
    tracker.evaluate("q2", "a", &[]).await.unwrap();

    let text = tracker.coverage_summary_text();
    assert!(text.contains("**Partially Covered:**"));
    assert!(text.contains("Guardrails (2 questions)"));
    assert!(text.contains("**Not Yet Explored:**"));
    assert!(text.contains("- Deployment"));
}
