//! Centralized prompt construction.
//!
//! Every prompt the crate sends to the model is built here as a pure
//! function of (role, scenario, context), independent of the network
//! call, so prompt content is testable without invoking the service.

use serde_json::Value;

use crate::catalog::{Concerns, Scenario, SuccessMetrics};
use crate::session::{StakeholderRole, Turn};
use crate::tracker::{SessionStats, VerdictRecord};

/// Directive appended when opening a session: a short, vague
/// self-introduction that sets the stage without revealing details.
pub const OPENING_DIRECTIVE: &str = "Start the session by briefly introducing yourself and the \
initiative you're working on.\nDon't reveal too much detail - just set the stage for the \
discovery conversation.\nKeep your introduction to 2-3 sentences.";

/// Domain functions injected into the generation prompt for variety.
pub const DOMAIN_FUNCTIONS: &[&str] = &[
    "Sales",
    "Supply Chain",
    "Trade Marketing",
    "Distribution",
    "Field Force",
    "Finance",
    "Quality",
    "Customer Service",
];

/// Known pain points injected into the generation prompt for variety.
pub const KNOWN_PAIN_POINTS: &[&str] = &[
    "manual data entry",
    "delayed decisions",
    "inconsistent execution",
    "lack of visibility",
    "coordination gaps",
    "compliance issues",
    "slow response time",
    "data silos",
];

/// Evaluation rubric for the question analyzer.
///
/// Embeds the 1-5 scoring anchors, the eight topic definitions, and
/// worked examples of strong vs. weak questions.
pub const ANALYZER_RUBRIC: &str = r#"You are an expert facilitator for Agentic Transformation Discovery Workshops.
Your job is to evaluate questions asked during discovery sessions and provide constructive feedback.

## Your Evaluation Criteria

### 1. Question Depth (1-5 scale)
- **1 - Surface Level**: Generic question that could apply to any project ("What's the goal?")
- **2 - Basic**: Asks about a topic but doesn't dig in ("What data do you use?")
- **3 - Moderate**: Shows understanding, asks for specifics ("What are the main data sources and how current is the data?")
- **4 - Good**: Probes deeper, connects concepts ("Given the data quality issues you mentioned, how does that affect the accuracy requirements for the agent?")
- **5 - Excellent**: Reveals hidden assumptions, uncovers risks, shows expert thinking ("When the agent misclassifies a ticket, what's the downstream impact on resolution time and customer satisfaction?")

### 2. Framework Coverage
Identify which area(s) the question addresses:
- **process_mapping**: Current state, future state, workflow details
- **user_value**: User needs, value proposition, adoption motivation
- **capabilities**: What the agent should do, must-haves vs nice-to-haves
- **guardrails**: Safety, escalation, compliance, what NOT to do
- **data**: Data sources, quality, accessibility, gaps
- **roi_metrics**: Success metrics, baselines, targets, ROI calculation
- **adoption**: Barriers, champions, training, change management
- **deployment**: Rollout strategy, first users, feedback collection

### 3. Question Quality Indicators

**Strong questions:**
- Ask "why" and "how" not just "what"
- Build on previous answers
- Uncover hidden assumptions
- Explore edge cases and exceptions
- Connect different aspects of the problem
- Challenge stated requirements
- Quantify when possible ("How many? How often? What percentage?")

**Weak questions:**
- Too broad or vague
- Could be answered with a simple yes/no
- Don't follow up on interesting threads
- Miss obvious follow-up opportunities
- Repeat information already given
- Stay at surface level

## Your Response Format

For each question, provide:

```json
{
    "score": <1-5>,
    "coverage_areas": ["<area1>", "<area2>"],
    "strengths": "<what was good about this question>",
    "improvement": "<specific suggestion to make it better>",
    "follow_up_suggestion": "<a better follow-up question they could ask>",
    "tip": "<brief coaching tip>"
}
```

## Examples

**Question**: "What's the current process?"
```json
{
    "score": 2,
    "coverage_areas": ["process_mapping"],
    "strengths": "Good starting point to understand the baseline",
    "improvement": "Too broad - specify which part of the process or ask for a step-by-step walkthrough",
    "follow_up_suggestion": "Can you walk me through what happens from the moment a ticket comes in until it's resolved, step by step?",
    "tip": "Start broad, then immediately narrow down. Ask for specific examples."
}
```

**Question**: "You mentioned tickets get misrouted 20% of the time - what happens when that occurs? Does the customer have to re-explain their issue?"
```json
{
    "score": 5,
    "coverage_areas": ["process_mapping", "user_value"],
    "strengths": "Excellent follow-up that quantifies the problem, explores downstream impact, and shows empathy for user experience",
    "improvement": "Could also ask about the cost/time impact of misrouting",
    "follow_up_suggestion": "How long does it typically add to resolution time when a ticket is misrouted?",
    "tip": "Great job connecting process issues to user experience. Keep quantifying impacts."
}
```

## Important Guidelines

1. Be encouraging but honest - the goal is to help them improve
2. Always provide a specific, actionable follow-up question they could ask
3. Recognize when questions build well on previous context
4. Note when they're missing obvious areas to explore
5. Celebrate when they uncover something important

Remember: You're coaching someone to become a better discovery facilitator.
Be constructive and specific in your feedback."#;

/// Format directive for the end-of-session summary.
pub const SESSION_SUMMARY_FORMAT: &str = r#"Based on this discovery session, provide a comprehensive summary:

## Session Summary Format

### Overall Score: X/5

### Coverage Analysis
For each framework area, indicate:
- Covered thoroughly
- Partially covered
- Not addressed

### Strengths
What did the questioner do well?

### Areas for Improvement
What patterns should they work on?

### Key Insights Uncovered
What important information did they successfully discover?

### Missed Opportunities
What important topics or follow-ups did they miss?

### Recommendations
3-5 specific things to practice for next time

Be specific and actionable in your feedback. Reference actual questions from the session."#;

/// System instruction for the stakeholder persona: role framing plus the
/// scenario's hidden details formatted as structured text.
pub fn stakeholder_system_prompt(role: StakeholderRole, scenario: &Scenario) -> String {
    let hidden = &scenario.hidden_details;

    format!(
        r#"You are roleplaying as the {title} in a Discovery Workshop for an AI agent initiative.

## Your Role
{perspective}

## The Use Case
**Name:** {name}
**Description:** {description}

## Your Hidden Knowledge (reveal only when asked good questions)

### Current Process
**Steps:**
{steps}
**Pain Points:**
{pain_points}
**Volume:** {volume}

### Data Landscape
**Sources:**
{sources}
**Quality Issues:**
{quality_issues}

### Your Specific Concerns
{concerns}

### Guardrails You Know About
{guardrails}

### Success Metrics You're Tracking
{metrics}

### Adoption Challenges You're Aware Of
{adoption}

## How to Respond

1. **Be authentic to your role** - Answer from your perspective with appropriate knowledge gaps
2. **Don't volunteer information** - Wait for the questioner to ask. If they ask a vague question, give a vague answer
3. **Reward good questions** - When asked specific, insightful questions, provide rich detail
4. **Show realistic behavior**:
   - If asked about something outside your expertise, say so
   - Express genuine concerns and hopes
   - Sometimes be uncertain or say "I'd need to check on that"
5. **Stay in character** - You're a real stakeholder, not an AI assistant

## Response Style
- Speak naturally as a business professional
- Use realistic hedging ("I think...", "From what I've seen...", "The team tells me...")
- Show appropriate emotion (frustration with pain points, excitement about potential)
- Keep responses conversational, not like a data dump
- If a question is too broad, answer broadly and let them follow up

Remember: The goal is to help the questioner practice asking detailed, specific questions.
Reward depth with depth. Punish vagueness with vagueness (politely)."#,
        title = role.display_name(),
        perspective = role_perspective(role),
        name = scenario.name,
        description = scenario.brief_description,
        steps = format_list(&hidden.current_process.steps),
        pain_points = format_list(&hidden.current_process.pain_points),
        volume = non_empty_or(&hidden.current_process.volume, "No information available"),
        sources = format_list(&hidden.data_landscape.sources),
        quality_issues = format_list(&hidden.data_landscape.quality_issues),
        concerns = format_concerns(hidden.stakeholder_concerns.for_role(role)),
        guardrails = format_list(&hidden.guardrails_needed),
        metrics = format_metrics(&hidden.success_metrics),
        adoption = format_list(&hidden.adoption_challenges),
    )
}

/// Role-reinforcement wrapper sent with every practitioner question.
pub fn respond_directive(role: StakeholderRole, question: &str) -> String {
    format!(
        r#"[The practitioner asks]: {question}

Remember:
- Stay in character as the {role}
- Match the depth of your answer to the depth of the question
- Don't volunteer information they haven't asked about
- Be realistic and authentic"#,
        question = question,
        role = role.display_name(),
    )
}

/// Prompt for generating a new scenario.
///
/// The function/challenge pair and the seed exist purely for variety;
/// callers pick them from an injectable randomness source. The prompt
/// insists on an agentic (action-taking) use case rather than an
/// analytics one.
pub fn scenario_generation_prompt(
    role: StakeholderRole,
    function: &str,
    challenge: &str,
    seed: u32,
) -> String {
    format!(
        r#"Generate a unique AGENTIC AI use case for an FMCG Discovery Workshop.

IMPORTANT: This must be an AGENTIC AI use case, not just analytics or insights.

Agentic AI means the agent:
- Takes ACTIONS autonomously (not just provides recommendations)
- Orchestrates multi-step workflows
- Integrates with multiple systems (ERP, DMS, CRM, etc.)
- Makes decisions within defined guardrails
- Escalates to humans when needed
- Executes tasks end-to-end

Random seed: {seed}
FMCG Function: {function}
Key Challenge: {challenge}

Generate a COMPLETELY NEW and UNIQUE agentic use case. Examples of agentic behaviors:
- Auto-creates purchase orders when stock falls below threshold
- Sends WhatsApp reminders to retailers and updates CRM
- Processes claims, validates documents, and triggers payments
- Monitors shelf photos, flags issues, and assigns tasks to reps
- Handles customer complaints end-to-end including refund processing

Create a use case with:
1. A clear, professional name (e.g., "Distributor Claims Processing Agent")
2. A 1-2 sentence description highlighting the AGENTIC nature (actions it takes)
3. Hidden details for the {role}:
   - Current manual process and pain points
   - Volume and scale (SKUs, outlets, distributors)
   - Systems it would integrate with
   - Actions it would take autonomously
   - Guardrails and approval workflows
   - Success metrics
   - Adoption challenges

Focus on ACTIONS the agent takes, not just insights it provides.

Output as a JSON object with this structure:
{{
    "name": "Use Case Name",
    "brief_description": "One sentence description",
    "hidden_details": {{
        "current_process": {{
            "steps": [...],
            "pain_points": [...],
            "volume": "..."
        }},
        "data_landscape": {{
            "sources": [...],
            "quality_issues": [...]
        }},
        "stakeholder_concerns": {{
            "agent_owner": {{"worries": "...", "hopes": "..."}},
            "business_owner": {{"worries": "...", "hopes": "..."}}
        }},
        "guardrails_needed": [...],
        "success_metrics": {{
            "baseline": {{...}},
            "targets": {{...}}
        }},
        "adoption_challenges": [...]
    }}
}}"#,
        seed = seed,
        function = function,
        challenge = challenge,
        role = role.as_str(),
    )
}

/// Evaluation prompt for one question/answer pair.
///
/// Short-term context is limited to the last six transcript entries
/// (about three exchanges).
pub fn evaluation_prompt(recent: &[Turn], question: &str, answer: &str) -> String {
    let window = if recent.len() > 6 {
        &recent[recent.len() - 6..]
    } else {
        recent
    };

    let mut context = String::new();
    for turn in window {
        context.push_str(&format!(
            "\n{}: {}\n",
            turn.speaker.as_str().to_uppercase(),
            turn.text
        ));
    }

    format!(
        r#"{rubric}

## Current Conversation Context
{context}

## Question to Analyze
"{question}"

## Stakeholder's Response
"{answer}"

Analyze this question and provide your evaluation in JSON format.
Consider the conversation context - reward questions that build on previous answers."#,
        rubric = ANALYZER_RUBRIC,
        context = context,
        question = question,
        answer = answer,
    )
}

/// End-of-session summary prompt: full transcript, per-question verdict
/// history, coverage summary, and aggregate stats.
pub fn summary_prompt(
    transcript: &[Turn],
    history: &[VerdictRecord],
    coverage_summary: &str,
    stats: &SessionStats,
) -> String {
    let mut transcript_text = String::new();
    for turn in transcript {
        transcript_text.push_str(&format!(
            "\n**{}**: {}\n",
            turn.speaker.as_str().to_uppercase(),
            turn.text
        ));
    }

    let mut feedback_text = String::new();
    for (i, record) in history.iter().enumerate() {
        feedback_text.push_str(&format!(
            "\nQuestion {n}: \"{q}...\"\n- Score: {score}/5\n- Areas: {areas}\n",
            n = i + 1,
            q = record.question.chars().take(50).collect::<String>(),
            score = record.verdict.score,
            areas = record.verdict.coverage_areas.join(", "),
        ));
    }

    format!(
        r#"{format}

## Session Transcript
{transcript}

## Question-by-Question Analysis
{feedback}

## Coverage Statistics
{coverage}

## Overall Statistics
- Total Questions: {questions}
- Average Score: {average:.1}/5
- Highest Score: {max}
- Lowest Score: {min}

Generate a comprehensive, encouraging but honest summary of this session."#,
        format = SESSION_SUMMARY_FORMAT,
        transcript = transcript_text,
        feedback = feedback_text,
        coverage = coverage_summary,
        questions = stats.questions,
        average = stats.average,
        max = stats.max,
        min = stats.min,
    )
}

fn role_perspective(role: StakeholderRole) -> &'static str {
    match role {
        StakeholderRole::AgentOwner => {
            r#"You are the Agent Owner for this initiative. Your focus is on:
- Day-to-day operations and user experience
- Making sure users actually adopt and use the agent
- Collecting feedback and iterating on the agent
- Understanding user pain points deeply
- Balancing feature requests vs. core value

You know the operational details intimately but may not have full visibility into
budget constraints or strategic priorities at the executive level."#
        }
        StakeholderRole::BusinessOwner => {
            r#"You are the Business Owner for this initiative. Your focus is on:
- ROI and business case justification
- Strategic alignment with company goals
- Resource allocation and prioritization
- Risk management and compliance
- Making scale/fix/kill decisions for the agent portfolio

You understand the business context and executive expectations but may not know
every operational detail of how users interact with systems day-to-day."#
        }
    }
}

fn format_list(items: &[String]) -> String {
    if items.is_empty() {
        return "No items".to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_concerns(concerns: &Concerns) -> String {
    if concerns.worries.is_empty() && concerns.hopes.is_empty() {
        return "No specific concerns for this role".to_string();
    }
    format!(
        "**Your Worries:** {}\n**Your Hopes:** {}",
        non_empty_or(&concerns.worries, "None specified"),
        non_empty_or(&concerns.hopes, "None specified"),
    )
}

fn format_metrics(metrics: &SuccessMetrics) -> String {
    if metrics.baseline.is_empty() && metrics.targets.is_empty() {
        return "No metrics defined".to_string();
    }

    let mut lines = vec!["**Current Baseline:**".to_string()];
    for (key, value) in &metrics.baseline {
        lines.push(format!("  - {}: {}", title_words(key), metric_value(value)));
    }
    lines.push("\n**Targets:**".to_string());
    for (key, value) in &metrics.targets {
        lines.push(format!("  - {}: {}", title_words(key), metric_value(value)));
    }
    lines.join("\n")
}

fn metric_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Snake_case identifier rendered as spaced title case, for display.
pub fn title_words(identifier: &str) -> String {
    identifier
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
