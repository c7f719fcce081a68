//! Question-quality evaluation and framework-coverage tracking.
//!
//! [`CoverageTracker`] exclusively owns the per-topic tally, the score
//! list, and the verdict history. Evaluation never blocks the interaction
//! loop: a malformed model reply is replaced by a fixed neutral verdict.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::AppResult;
use crate::gemini::{GenerateRequest, TextModel};
use crate::prompts;
use crate::session::Turn;

/// The closed set of eight framework topics a question can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    ProcessMapping,
    UserValue,
    Capabilities,
    Guardrails,
    Data,
    RoiMetrics,
    Adoption,
    Deployment,
}

impl Topic {
    /// All topics, in display order
    pub const ALL: [Topic; 8] = [
        Topic::ProcessMapping,
        Topic::UserValue,
        Topic::Capabilities,
        Topic::Guardrails,
        Topic::Data,
        Topic::RoiMetrics,
        Topic::Adoption,
        Topic::Deployment,
    ];

    /// Get the topic identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::ProcessMapping => "process_mapping",
            Topic::UserValue => "user_value",
            Topic::Capabilities => "capabilities",
            Topic::Guardrails => "guardrails",
            Topic::Data => "data",
            Topic::RoiMetrics => "roi_metrics",
            Topic::Adoption => "adoption",
            Topic::Deployment => "deployment",
        }
    }

    /// One-line description of what the topic covers
    pub fn description(&self) -> &'static str {
        match self {
            Topic::ProcessMapping => "Current state, future state, workflow details",
            Topic::UserValue => "User needs, value proposition, adoption motivation",
            Topic::Capabilities => "What the agent should do, must-haves vs nice-to-haves",
            Topic::Guardrails => "Safety, escalation, compliance, what NOT to do",
            Topic::Data => "Data sources, quality, accessibility, gaps",
            Topic::RoiMetrics => "Success metrics, baselines, targets, ROI calculation",
            Topic::Adoption => "Barriers, champions, training, change management",
            Topic::Deployment => "Rollout strategy, first users, feedback collection",
        }
    }

    /// Display-friendly topic name
    pub fn display_name(&self) -> String {
        prompts::title_words(self.as_str())
    }

    /// Map a model-provided tag to a known topic. Unknown tags map to
    /// `None` and are silently ignored by the tally.
    pub fn from_tag(tag: &str) -> Option<Topic> {
        Topic::ALL.iter().copied().find(|t| t.as_str() == tag)
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Coverage level derived from a topic's question count.
///
/// A pure function of the count, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageBand {
    NotCovered,
    LightlyCovered,
    PartiallyCovered,
    WellCovered,
}

impl CoverageBand {
    /// Band for a given occurrence count
    pub fn from_count(count: u32) -> Self {
        match count {
            0 => CoverageBand::NotCovered,
            1 => CoverageBand::LightlyCovered,
            2..=3 => CoverageBand::PartiallyCovered,
            _ => CoverageBand::WellCovered,
        }
    }

    /// Get the band identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageBand::NotCovered => "not_covered",
            CoverageBand::LightlyCovered => "lightly_covered",
            CoverageBand::PartiallyCovered => "partially_covered",
            CoverageBand::WellCovered => "well_covered",
        }
    }
}

/// Per-topic coverage snapshot
#[derive(Debug, Clone, Serialize)]
pub struct TopicCoverage {
    pub topic: Topic,
    pub count: u32,
    pub band: CoverageBand,
    pub description: &'static str,
}

/// Structured result of judging one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default = "default_score")]
    pub score: u8,
    #[serde(default)]
    pub coverage_areas: Vec<String>,
    #[serde(default)]
    pub strengths: String,
    #[serde(default)]
    pub improvement: String,
    #[serde(default)]
    pub follow_up_suggestion: String,
    #[serde(default)]
    pub tip: String,
}

fn default_score() -> u8 {
    3
}

impl Verdict {
    /// Fixed neutral verdict substituted when the model reply is not
    /// parseable. Evaluation must never block the interaction loop.
    pub fn fallback() -> Self {
        Self {
            score: 3,
            coverage_areas: vec!["process_mapping".to_string()],
            strengths: "Question received".to_string(),
            improvement: "Try to be more specific".to_string(),
            follow_up_suggestion: "Can you tell me more about the specific steps involved?"
                .to_string(),
            tip: "Ask follow-up questions to dig deeper".to_string(),
        }
    }

    /// Parse a verdict from the model's completion text, substituting the
    /// fallback on any parse failure and clamping the score to 1-5.
    pub fn from_completion(completion: &str) -> Self {
        match serde_json::from_str::<Verdict>(completion) {
            Ok(mut verdict) => {
                verdict.score = verdict.score.clamp(1, 5);
                verdict
            }
            Err(e) => {
                warn!(error = %e, "Evaluation reply was not valid JSON, using fallback verdict");
                Self::fallback()
            }
        }
    }
}

/// A verdict retained with its originating question
#[derive(Debug, Clone, Serialize)]
pub struct VerdictRecord {
    pub question: String,
    pub verdict: Verdict,
}

/// Aggregate score statistics for the session
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SessionStats {
    pub questions: usize,
    pub average: f64,
    pub max: u8,
    pub min: u8,
}

/// Tracks question quality and topical coverage across a session.
pub struct CoverageTracker {
    model: Arc<dyn TextModel>,
    tally: BTreeMap<Topic, u32>,
    scores: Vec<u8>,
    history: Vec<VerdictRecord>,
}

impl CoverageTracker {
    /// Create a tracker with all eight topic counts at zero
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self {
            model,
            tally: empty_tally(),
            scores: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Evaluate one question/answer pair and update cumulative state.
    ///
    /// Known topic tags in the verdict each increment their tally once;
    /// unknown tags are ignored without error. Upstream service failures
    /// propagate; a malformed reply yields the fallback verdict and still
    /// advances history and tally normally.
    pub async fn evaluate(
        &mut self,
        question: &str,
        answer: &str,
        recent_transcript: &[Turn],
    ) -> AppResult<Verdict> {
        let prompt = prompts::evaluation_prompt(recent_transcript, question, answer);
        let request = GenerateRequest::from_prompt(prompt).with_json_output();
        let completion = self.model.generate(request).await?;

        let verdict = Verdict::from_completion(&completion);

        for tag in &verdict.coverage_areas {
            match Topic::from_tag(tag) {
                Some(topic) => {
                    *self.tally.entry(topic).or_insert(0) += 1;
                }
                None => {
                    debug!(tag = %tag, "Ignoring unknown coverage tag");
                }
            }
        }

        self.scores.push(verdict.score);
        self.history.push(VerdictRecord {
            question: question.to_string(),
            verdict: verdict.clone(),
        });

        info!(
            score = verdict.score,
            questions = self.scores.len(),
            "Question evaluated"
        );

        Ok(verdict)
    }

    /// Coverage snapshot for all eight topics, in display order
    pub fn coverage_status(&self) -> Vec<TopicCoverage> {
        Topic::ALL
            .iter()
            .map(|&topic| {
                let count = self.tally.get(&topic).copied().unwrap_or(0);
                TopicCoverage {
                    topic,
                    count,
                    band: CoverageBand::from_count(count),
                    description: topic.description(),
                }
            })
            .collect()
    }

    /// Plain-text coverage summary grouped by band
    pub fn coverage_summary_text(&self) -> String {
        let status = self.coverage_status();

        let mut well_covered = Vec::new();
        let mut partial = Vec::new();
        let mut light = Vec::new();
        let mut not_covered = Vec::new();

        for entry in &status {
            let name = entry.topic.display_name();
            match entry.band {
                CoverageBand::WellCovered => {
                    well_covered.push(format!("- {} ({} questions)", name, entry.count))
                }
                CoverageBand::PartiallyCovered => {
                    partial.push(format!("- {} ({} questions)", name, entry.count))
                }
                CoverageBand::LightlyCovered => {
                    light.push(format!("- {} ({} questions)", name, entry.count))
                }
                CoverageBand::NotCovered => not_covered.push(format!("- {}", name)),
            }
        }

        let mut lines = vec!["## Framework Coverage\n".to_string()];
        for (heading, group) in [
            ("**Well Covered:**", well_covered),
            ("**Partially Covered:**", partial),
            ("**Needs More Depth:**", light),
            ("**Not Yet Explored:**", not_covered),
        ] {
            if !group.is_empty() {
                lines.push(heading.to_string());
                lines.extend(group);
                lines.push(String::new());
            }
        }

        lines.join("\n").trim_end().to_string()
    }

    /// Average question score, 0.0 before any evaluation
    pub fn average_score(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        self.scores.iter().map(|&s| s as f64).sum::<f64>() / self.scores.len() as f64
    }

    /// Aggregate score statistics; max/min are 0 with no history
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            questions: self.scores.len(),
            average: self.average_score(),
            max: self.scores.iter().copied().max().unwrap_or(0),
            min: self.scores.iter().copied().min().unwrap_or(0),
        }
    }

    /// Ordered verdict history with originating questions
    pub fn history(&self) -> &[VerdictRecord] {
        &self.history
    }

    /// Generate a free-text end-of-session summary over the full
    /// transcript and accumulated statistics. Returned verbatim.
    pub async fn summarize(&self, transcript: &[Turn]) -> AppResult<String> {
        let prompt = prompts::summary_prompt(
            transcript,
            &self.history,
            &self.coverage_summary_text(),
            &self.stats(),
        );
        let summary = self.model.generate(GenerateRequest::from_prompt(prompt)).await?;
        Ok(summary)
    }

    /// Clear tally, scores, and history for a new session
    pub fn reset(&mut self) {
        self.tally = empty_tally();
        self.scores.clear();
        self.history.clear();
    }
}

fn empty_tally() -> BTreeMap<Topic, u32> {
    Topic::ALL.iter().map(|&topic| (topic, 0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_from_tag() {
        assert_eq!(Topic::from_tag("process_mapping"), Some(Topic::ProcessMapping));
        assert_eq!(Topic::from_tag("roi_metrics"), Some(Topic::RoiMetrics));
        assert_eq!(Topic::from_tag("totally_unknown_tag"), None);
    }

    #[test]
    fn test_topic_display_name() {
        assert_eq!(Topic::ProcessMapping.display_name(), "Process Mapping");
        assert_eq!(Topic::RoiMetrics.display_name(), "Roi Metrics");
    }

    #[test]
    fn test_band_thresholds() {
        assert_eq!(CoverageBand::from_count(0), CoverageBand::NotCovered);
        assert_eq!(CoverageBand::from_count(1), CoverageBand::LightlyCovered);
        assert_eq!(CoverageBand::from_count(2), CoverageBand::PartiallyCovered);
        assert_eq!(CoverageBand::from_count(3), CoverageBand::PartiallyCovered);
        assert_eq!(CoverageBand::from_count(4), CoverageBand::WellCovered);
        assert_eq!(CoverageBand::from_count(17), CoverageBand::WellCovered);
    }

    #[test]
    fn test_verdict_from_valid_completion() {
        let verdict = Verdict::from_completion(
            r#"{"score": 4, "coverage_areas": ["data"], "strengths": "specific",
                "improvement": "quantify", "follow_up_suggestion": "How fresh is it?",
                "tip": "keep digging"}"#,
        );
        assert_eq!(verdict.score, 4);
        assert_eq!(verdict.coverage_areas, vec!["data"]);
    }

    #[test]
    fn test_verdict_missing_fields_get_defaults() {
        let verdict = Verdict::from_completion(r#"{"coverage_areas": ["guardrails"]}"#);
        assert_eq!(verdict.score, 3);
        assert!(verdict.strengths.is_empty());
    }

    #[test]
    fn test_verdict_score_clamped() {
        let verdict = Verdict::from_completion(r#"{"score": 99}"#);
        assert_eq!(verdict.score, 5);
        let verdict = Verdict::from_completion(r#"{"score": 0}"#);
        assert_eq!(verdict.score, 1);
    }

    #[test]
    fn test_verdict_malformed_completion_is_fallback() {
        let verdict = Verdict::from_completion("sorry, I can't do JSON today");
        assert_eq!(verdict.score, 3);
        assert_eq!(verdict.coverage_areas, vec!["process_mapping"]);
        assert_eq!(verdict.strengths, "Question received");
    }
}
