//! End-to-end flow tests: session and tracker driven through the real
//! Gemini client against a wiremock server.
//!
//! Calls are distinguished by prompt markers: the opening directive for
//! session start, the role-reinforcement wrapper for persona answers, the
//! rubric's analysis heading for evaluation, and the transcript heading
//! for the closing summary.

use std::sync::Arc;

use serde_json::json;
use wiremock::{
    matchers::{body_string_contains, method, path},
    Mock, MockServer, ResponseTemplate,
};

use discovery_coach::catalog::builtin_catalog;
use discovery_coach::config::{GeminiConfig, RequestConfig};
use discovery_coach::gemini::GeminiClient;
use discovery_coach::session::{RoleplaySession, ScenarioSource, Speaker, StakeholderRole};
use discovery_coach::tracker::{CoverageBand, CoverageTracker, Topic};

fn create_test_client(base_url: &str) -> Arc<GeminiClient> {
    let config = GeminiConfig {
        api_key: "test-api-key".to_string(),
        base_url: base_url.to_string(),
        model: "gemini-2.0-flash".to_string(),
    };
    Arc::new(
        GeminiClient::new(&config, RequestConfig { timeout_ms: 5000 })
            .expect("Failed to create client"),
    )
}

fn candidate_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]}
        }]
    }))
}

const GENERATE_PATH: &str = "/v1beta/models/gemini-2.0-flash:generateContent";

#[tokio::test]
async fn test_full_question_cycle() {
    let mock_server = MockServer::start().await;

    // Respond bodies resend the full chat history including the opening
    // directive, so the respond mock must be mounted before the start mock
    // (wiremock gives the earliest mounted match precedence).
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("[The practitioner asks]"))
        .respond_with(candidate_response(
            "One thing worries me: any ticket mentioning legal or a lawsuit has to go \
             straight to a human. The agent must never answer those on its own.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("briefly introducing yourself"))
        .respond_with(candidate_response(
            "Hi, I'm the VP of Customer Experience. We're exploring an agent for ticket triage.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("## Question to Analyze"))
        .respond_with(candidate_response(
            &json!({
                "score": 5,
                "coverage_areas": ["guardrails"],
                "strengths": "Directly probes what the agent must never do",
                "improvement": "Also ask who reviews escalations",
                "follow_up_suggestion": "Who owns the escalation queue?",
                "tip": "Guardrail questions uncover hidden risk"
            })
            .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = create_test_client(&mock_server.uri());
    let mut session = RoleplaySession::new(model.clone());
    let mut tracker = CoverageTracker::new(model);

    // customer_support_triage carries the legal/lawsuit escalation guardrail
    let scenario = builtin_catalog()[0].clone();
    assert_eq!(scenario.id, "customer_support_triage");

    let intro = session
        .start(StakeholderRole::BusinessOwner, ScenarioSource::Fixed(scenario))
        .await
        .unwrap();
    assert!(intro.contains("ticket triage"));

    let question = "What should the agent absolutely never handle on its own?";
    let answer = session.respond(question).await.unwrap();
    assert!(answer.contains("lawsuit"));

    let transcript = session.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[0].speaker, Speaker::Persona);
    assert_eq!(transcript[1].speaker, Speaker::Practitioner);
    assert_eq!(transcript[1].text, question);
    assert_eq!(transcript[2].speaker, Speaker::Persona);

    let verdict = tracker.evaluate(question, &answer, transcript).await.unwrap();
    assert_eq!(verdict.score, 5);

    let guardrails = tracker
        .coverage_status()
        .into_iter()
        .find(|e| e.topic == Topic::Guardrails)
        .unwrap();
    assert_eq!(guardrails.count, 1);
    assert_eq!(guardrails.band, CoverageBand::LightlyCovered);
}

#[tokio::test]
async fn test_generated_scenario_session_start() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("Random seed:"))
        .respond_with(candidate_response(
            &json!({
                "id": "generated",
                "name": "Invoice Dispute Resolver",
                "brief_description": "An agent that resolves invoice disputes end-to-end.",
                "hidden_details": {
                    "guardrails_needed": ["Human sign-off above 10k"],
                    "current_process": {
                        "steps": ["Collect dispute", "Check contract", "Reply"],
                        "pain_points": ["slow response time"],
                        "volume": "300 disputes/month"
                    }
                }
            })
            .to_string(),
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("briefly introducing yourself"))
        .respond_with(candidate_response(
            "Hello, I own our finance operations. We want help with invoice disputes.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = create_test_client(&mock_server.uri());
    let mut session = RoleplaySession::new(model);

    let intro = session
        .start(StakeholderRole::AgentOwner, ScenarioSource::Generate)
        .await
        .unwrap();

    assert!(intro.contains("invoice disputes"));
    assert_eq!(session.scenario().unwrap().name, "Invoice Dispute Resolver");
    assert!(session
        .scenario_brief()
        .contains("Invoice Dispute Resolver"));
}

#[tokio::test]
async fn test_summary_over_full_session() {
    let mock_server = MockServer::start().await;

    // Respond mock before start mock: respond bodies include the opening
    // directive from the resent chat history.
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("[The practitioner asks]"))
        .respond_with(candidate_response("We route everything by hand today."))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("briefly introducing yourself"))
        .respond_with(candidate_response("Hi, I'm the business owner."))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("## Question to Analyze"))
        .respond_with(candidate_response(
            &json!({
                "score": 3,
                "coverage_areas": ["process_mapping"],
                "strengths": "On topic",
                "improvement": "Ask for volumes",
                "follow_up_suggestion": "How many per day?",
                "tip": "Quantify"
            })
            .to_string(),
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_string_contains("## Session Transcript"))
        .respond_with(candidate_response(
            "Solid start. You mapped the process; next time push on metrics.",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let model = create_test_client(&mock_server.uri());
    let mut session = RoleplaySession::new(model.clone());
    let mut tracker = CoverageTracker::new(model);

    session
        .start(
            StakeholderRole::BusinessOwner,
            ScenarioSource::Fixed(builtin_catalog()[1].clone()),
        )
        .await
        .unwrap();

    let question = "How is a ticket routed today?";
    let answer = session.respond(question).await.unwrap();
    tracker
        .evaluate(question, &answer, session.transcript())
        .await
        .unwrap();

    let summary = tracker.summarize(session.transcript()).await.unwrap();
    assert!(summary.contains("Solid start"));
}
