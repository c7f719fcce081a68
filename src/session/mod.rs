//! Roleplay session management.
//!
//! [`RoleplaySession`] owns the conversation transcript and the live chat
//! context with the persona. The chat is stateful and cumulative: every
//! prior exchange stays in the model's context so later answers can
//! reference earlier ones. The session holds private mutable state and is
//! not safe to share across concurrent sessions.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::{builtin_catalog, Scenario};
use crate::error::AppResult;
use crate::gemini::{Content, GenerateRequest, TextModel};
use crate::prompts;

/// Fixed message returned by [`RoleplaySession::respond`] when no session
/// has been started. A missing precondition is not an error here.
pub const START_SESSION_FIRST: &str = "Please start a session first.";

/// Stakeholder persona the practitioner interviews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderRole {
    AgentOwner,
    BusinessOwner,
}

impl StakeholderRole {
    /// Get the role identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            StakeholderRole::AgentOwner => "agent_owner",
            StakeholderRole::BusinessOwner => "business_owner",
        }
    }

    /// Display-friendly role name
    pub fn display_name(&self) -> &'static str {
        match self {
            StakeholderRole::AgentOwner => "Agent Owner",
            StakeholderRole::BusinessOwner => "Business Owner",
        }
    }
}

impl std::fmt::Display for StakeholderRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for StakeholderRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "agent_owner" => Ok(StakeholderRole::AgentOwner),
            "business_owner" => Ok(StakeholderRole::BusinessOwner),
            _ => Err(format!("Unknown stakeholder role: {}", s)),
        }
    }
}

/// Who spoke a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Practitioner,
    Persona,
}

impl Speaker {
    /// Get the speaker identifier as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Practitioner => "practitioner",
            Speaker::Persona => "persona",
        }
    }
}

/// One ordered transcript entry. Append-only within a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    /// Create a practitioner turn
    pub fn practitioner(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Practitioner,
            text: text.into(),
        }
    }

    /// Create a persona turn
    pub fn persona(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Persona,
            text: text.into(),
        }
    }
}

/// Where the session's scenario comes from
#[derive(Debug, Clone)]
pub enum ScenarioSource {
    /// Uniformly random pick from the built-in catalog
    Catalog,
    /// Ask the model to generate a fresh scenario
    Generate,
    /// Use this exact scenario
    Fixed(Scenario),
}

struct ActiveSession {
    role: StakeholderRole,
    scenario: Scenario,
    system_prompt: String,
    chat: Vec<Content>,
    turns: Vec<Turn>,
}

/// Manages one roleplay conversation with a stakeholder persona.
///
/// Exclusively owns the transcript and the chat context. Coverage and
/// scoring live in the tracker; the caller passes data between the two.
pub struct RoleplaySession {
    model: Arc<dyn TextModel>,
    rng: StdRng,
    active: Option<ActiveSession>,
}

impl RoleplaySession {
    /// Create a session manager with an entropy-seeded randomness source
    pub fn new(model: Arc<dyn TextModel>) -> Self {
        Self::with_rng(model, StdRng::from_entropy())
    }

    /// Create a session manager with an explicit randomness source, so
    /// catalog selection and generation variety are deterministic in tests
    pub fn with_rng(model: Arc<dyn TextModel>, rng: StdRng) -> Self {
        Self {
            model,
            rng,
            active: None,
        }
    }

    /// Start a new practice session and return the persona's opening line.
    ///
    /// Clears all prior state for a fresh role/scenario pair. The opening
    /// line is appended to the transcript as the first persona turn.
    pub async fn start(
        &mut self,
        role: StakeholderRole,
        source: ScenarioSource,
    ) -> AppResult<String> {
        // Drop prior state first so a failed start leaves no stale session
        self.active = None;

        let scenario = match source {
            ScenarioSource::Fixed(scenario) => scenario,
            ScenarioSource::Generate => self.generate_scenario(role).await?,
            ScenarioSource::Catalog => self.random_catalog_scenario(),
        };

        let system_prompt = prompts::stakeholder_system_prompt(role, &scenario);
        let mut chat = vec![Content::user(prompts::OPENING_DIRECTIVE)];

        let request = GenerateRequest::new(chat.clone()).with_system(system_prompt.as_str());
        let intro = self.model.generate(request).await?;

        chat.push(Content::model(intro.as_str()));

        info!(
            role = %role,
            scenario = %scenario.id,
            "Session started"
        );

        self.active = Some(ActiveSession {
            role,
            scenario,
            system_prompt,
            chat,
            turns: vec![Turn::persona(intro.as_str())],
        });

        Ok(intro)
    }

    /// Forward a practitioner question to the persona and return its answer.
    ///
    /// Both the question and the answer are appended to the transcript.
    /// Without a started session this returns [`START_SESSION_FIRST`] and
    /// mutates nothing.
    pub async fn respond(&mut self, question: &str) -> AppResult<String> {
        let Some(active) = self.active.as_mut() else {
            return Ok(START_SESSION_FIRST.to_string());
        };

        active.turns.push(Turn::practitioner(question));
        active
            .chat
            .push(Content::user(prompts::respond_directive(active.role, question)));

        let request =
            GenerateRequest::new(active.chat.clone()).with_system(active.system_prompt.as_str());
        let answer = self.model.generate(request).await?;

        active.chat.push(Content::model(answer.as_str()));
        active.turns.push(Turn::persona(answer.as_str()));

        debug!(
            role = %active.role,
            turns = active.turns.len(),
            "Persona responded"
        );

        Ok(answer)
    }

    /// Generate a fresh scenario for the given role.
    ///
    /// Parse failures never surface: an unusable reply falls back to a
    /// random catalog scenario. Upstream service errors propagate.
    pub async fn generate_scenario(&mut self, role: StakeholderRole) -> AppResult<Scenario> {
        let function =
            prompts::DOMAIN_FUNCTIONS[self.rng.gen_range(0..prompts::DOMAIN_FUNCTIONS.len())];
        let challenge =
            prompts::KNOWN_PAIN_POINTS[self.rng.gen_range(0..prompts::KNOWN_PAIN_POINTS.len())];
        let seed: u32 = self.rng.gen_range(0..10_000);

        let prompt = prompts::scenario_generation_prompt(role, function, challenge, seed);
        let request = GenerateRequest::from_prompt(prompt).with_json_output();
        let completion = self.model.generate(request).await?;

        match Scenario::from_completion(&completion) {
            Some(scenario) => {
                debug!(scenario = %scenario.name, "Generated scenario");
                Ok(scenario)
            }
            None => {
                warn!("Generated scenario was not usable JSON, falling back to catalog");
                Ok(self.random_catalog_scenario())
            }
        }
    }

    /// Full conversation transcript, in order. Empty before `start`.
    pub fn transcript(&self) -> &[Turn] {
        self.active
            .as_ref()
            .map(|a| a.turns.as_slice())
            .unwrap_or(&[])
    }

    /// Whether a session has been started
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Role of the active session, if any
    pub fn role(&self) -> Option<StakeholderRole> {
        self.active.as_ref().map(|a| a.role)
    }

    /// Scenario of the active session, if any
    pub fn scenario(&self) -> Option<&Scenario> {
        self.active.as_ref().map(|a| &a.scenario)
    }

    /// Display-friendly name of the active role
    pub fn role_display(&self) -> &'static str {
        self.active
            .as_ref()
            .map(|a| a.role.display_name())
            .unwrap_or("Stakeholder")
    }

    /// Visible scenario information (name and description)
    pub fn scenario_brief(&self) -> String {
        self.active
            .as_ref()
            .map(|a| a.scenario.brief())
            .unwrap_or_else(|| "No scenario selected".to_string())
    }

    fn random_catalog_scenario(&mut self) -> Scenario {
        let catalog = builtin_catalog();
        catalog[self.rng.gen_range(0..catalog.len())].clone()
    }
}
