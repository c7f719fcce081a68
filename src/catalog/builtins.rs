//! Built-in practice scenarios with rich hidden details.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde_json::Value;

use super::{
    Concerns, DataLandscape, HiddenDetails, ProcessSnapshot, Scenario, StakeholderConcerns,
    SuccessMetrics,
};

/// The fixed catalog of built-in scenarios.
///
/// Built once and cached; callers treat entries as immutable.
pub fn builtin_catalog() -> &'static [Scenario] {
    static CATALOG: OnceLock<Vec<Scenario>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        vec![
            customer_support_triage(),
            contract_review(),
            sales_proposal(),
            employee_onboarding(),
            incident_response(),
        ]
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn metrics(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

fn customer_support_triage() -> Scenario {
    Scenario {
        id: "customer_support_triage".to_string(),
        name: "Customer Support Ticket Triage Agent".to_string(),
        brief_description:
            "An AI agent that automatically categorizes and routes incoming customer support tickets."
                .to_string(),
        hidden_details: HiddenDetails {
            current_process: ProcessSnapshot {
                steps: strings(&[
                    "Tickets come in via email, chat, and phone (transcribed)",
                    "L1 support manually reads each ticket (avg 3 min per ticket)",
                    "They categorize into 12 categories with 45 sub-categories",
                    "Tickets are assigned based on agent expertise and availability",
                    "20% of tickets get misrouted, requiring re-assignment",
                ]),
                pain_points: strings(&[
                    "High volume during product launches (10x normal)",
                    "Inconsistent categorization between agents",
                    "Senior agents spend 40% of time on simple tickets",
                    "Customer frustration from multiple transfers",
                ]),
                volume: "2,500 tickets/day, 50 support agents".to_string(),
            },
            data_landscape: DataLandscape {
                sources: strings(&[
                    "Zendesk ticket history (3 years, 2.7M tickets)",
                    "Product documentation in Confluence",
                    "CRM data in Salesforce",
                    "Agent performance metrics",
                ]),
                quality_issues: strings(&[
                    "Historical categorization is inconsistent",
                    "Some tickets missing customer context",
                    "Documentation is outdated in places",
                ]),
            },
            stakeholder_concerns: StakeholderConcerns {
                agent_owner: Concerns {
                    worries: "Will agents trust the AI? Will it handle edge cases?".to_string(),
                    hopes: "Reduce agent burnout, faster resolution times".to_string(),
                },
                business_owner: Concerns {
                    worries: "What if we route VIP customers wrong?".to_string(),
                    hopes: "Reduce support costs by 30%, improve CSAT".to_string(),
                },
            },
            guardrails_needed: strings(&[
                "Never auto-respond to VIP customers",
                "Escalate any ticket mentioning legal/lawsuit",
                "Human review for refund requests over $500",
                "Flag potential PR issues for manager review",
            ]),
            success_metrics: SuccessMetrics {
                baseline: metrics(&[
                    ("avg_triage_time", "3 minutes"),
                    ("misroute_rate", "20%"),
                    ("first_response_time", "4 hours"),
                    ("csat_score", "3.8/5"),
                ]),
                targets: metrics(&[
                    ("avg_triage_time", "30 seconds"),
                    ("misroute_rate", "5%"),
                    ("first_response_time", "1 hour"),
                    ("csat_score", "4.3/5"),
                ]),
            },
            adoption_challenges: strings(&[
                "Some senior agents feel threatened",
                "Union concerns about job displacement",
                "Need to prove AI doesn't make more mistakes",
            ]),
        },
    }
}

fn contract_review() -> Scenario {
    Scenario {
        id: "contract_review".to_string(),
        name: "Contract Review Assistant".to_string(),
        brief_description:
            "An AI agent that reviews vendor contracts and highlights key terms, risks, and deviations from standard templates."
                .to_string(),
        hidden_details: HiddenDetails {
            current_process: ProcessSnapshot {
                steps: strings(&[
                    "Procurement sends contract to legal inbox",
                    "Legal assistant does initial review (2-3 hours)",
                    "Senior attorney reviews flagged items (1-2 hours)",
                    "Back-and-forth with vendor on redlines (days to weeks)",
                    "Final approval and signature",
                ]),
                pain_points: strings(&[
                    "Legal team is bottleneck - 3 week average turnaround",
                    "Junior reviewers miss non-standard clauses",
                    "Same negotiation points come up repeatedly",
                    "No institutional memory of vendor-specific issues",
                ]),
                volume: "150 contracts/month, 4 attorneys".to_string(),
            },
            data_landscape: DataLandscape {
                sources: strings(&[
                    "5,000 historical contracts in DocuSign/SharePoint",
                    "Standard template library (12 templates)",
                    "Negotiation playbook (PDF)",
                    "Vendor risk scores from security team",
                ]),
                quality_issues: strings(&[
                    "Historical contracts in various formats (PDF, Word, scans)",
                    "Some contracts missing metadata",
                    "Playbook hasn't been updated in 2 years",
                ]),
            },
            stakeholder_concerns: StakeholderConcerns {
                agent_owner: Concerns {
                    worries: "Legal team resistant to 'AI doing their job'".to_string(),
                    hopes: "Free up attorneys for strategic work".to_string(),
                },
                business_owner: Concerns {
                    worries: "What if AI misses critical liability clause?".to_string(),
                    hopes: "Reduce contract cycle time by 50%".to_string(),
                },
            },
            guardrails_needed: strings(&[
                "Always require human approval before any response to vendor",
                "Flag contracts over $1M for senior review",
                "Never modify contract text directly",
                "Escalate any IP or indemnification deviations",
                "Cannot access confidential M&A contracts",
            ]),
            success_metrics: SuccessMetrics {
                baseline: metrics(&[
                    ("avg_review_time", "5 hours"),
                    ("turnaround_days", "15 days"),
                    ("missed_issues_rate", "12%"),
                    ("attorney_utilization", "80% on routine"),
                ]),
                targets: metrics(&[
                    ("avg_review_time", "1 hour"),
                    ("turnaround_days", "5 days"),
                    ("missed_issues_rate", "3%"),
                    ("attorney_utilization", "30% on routine"),
                ]),
            },
            adoption_challenges: strings(&[
                "Legal team pride/expertise concerns",
                "Regulatory requirements for human oversight",
                "Building trust in AI recommendations",
            ]),
        },
    }
}

fn sales_proposal() -> Scenario {
    Scenario {
        id: "sales_proposal".to_string(),
        name: "Sales Proposal Generator".to_string(),
        brief_description:
            "An AI agent that helps sales reps create customized proposals by pulling relevant case studies, pricing, and product info."
                .to_string(),
        hidden_details: HiddenDetails {
            current_process: ProcessSnapshot {
                steps: strings(&[
                    "Rep identifies opportunity in Salesforce",
                    "Searches for relevant case studies (30 min avg)",
                    "Pulls pricing from spreadsheet (often outdated)",
                    "Copies from previous proposals (inconsistent)",
                    "Gets manager approval for discounts",
                    "Sends to customer",
                ]),
                pain_points: strings(&[
                    "Reps spend 6 hours/week on proposals",
                    "Inconsistent messaging and branding",
                    "Can't find the right case studies",
                    "Pricing errors cause deal delays",
                ]),
                volume: "200 proposals/month, 35 sales reps".to_string(),
            },
            data_landscape: DataLandscape {
                sources: strings(&[
                    "Salesforce CRM (opportunities, accounts)",
                    "Case study library in Seismic (500+ studies)",
                    "Pricing engine API",
                    "Product catalog in PIM system",
                    "Competitor battlecards",
                ]),
                quality_issues: strings(&[
                    "Case studies tagged inconsistently",
                    "Some pricing rules are tribal knowledge",
                    "Product descriptions vary by region",
                ]),
            },
            stakeholder_concerns: StakeholderConcerns {
                agent_owner: Concerns {
                    worries: "Will proposals feel generic/robotic?".to_string(),
                    hopes: "Reps can focus on relationships, not paperwork".to_string(),
                },
                business_owner: Concerns {
                    worries: "Will AI give away too much discount?".to_string(),
                    hopes: "Increase proposal volume, improve win rates".to_string(),
                },
            },
            guardrails_needed: strings(&[
                "Discounts over 20% require manager approval",
                "Cannot include competitor disparagement",
                "Must use approved legal terms only",
                "Cannot promise features not in roadmap",
                "Pricing must validate against current price book",
            ]),
            success_metrics: SuccessMetrics {
                baseline: metrics(&[
                    ("time_per_proposal", "3 hours"),
                    ("proposals_per_rep_week", "4"),
                    ("pricing_error_rate", "8%"),
                    ("win_rate", "22%"),
                ]),
                targets: metrics(&[
                    ("time_per_proposal", "45 minutes"),
                    ("proposals_per_rep_week", "8"),
                    ("pricing_error_rate", "1%"),
                    ("win_rate", "28%"),
                ]),
            },
            adoption_challenges: strings(&[
                "Top reps think their way is better",
                "Fear of losing personal touch",
                "Regional variations in sales process",
            ]),
        },
    }
}

fn employee_onboarding() -> Scenario {
    Scenario {
        id: "employee_onboarding".to_string(),
        name: "Employee Onboarding Assistant".to_string(),
        brief_description:
            "An AI agent that guides new hires through their first 90 days, answering questions and coordinating tasks."
                .to_string(),
        hidden_details: HiddenDetails {
            current_process: ProcessSnapshot {
                steps: strings(&[
                    "HR sends welcome email with 20+ links",
                    "Manager creates onboarding checklist (often forgotten)",
                    "New hire figures things out by asking around",
                    "IT provisions access (often delayed)",
                    "Buddy assigned but meetings irregular",
                ]),
                pain_points: strings(&[
                    "New hires feel lost, ask same questions",
                    "Managers spend 10+ hours per new hire",
                    "Access/equipment delays waste first week",
                    "30% don't complete compliance training on time",
                ]),
                volume: "50 new hires/month across 8 departments".to_string(),
            },
            data_landscape: DataLandscape {
                sources: strings(&[
                    "Workday HRIS (employee data)",
                    "Confluence knowledge base",
                    "IT ticketing system (ServiceNow)",
                    "Learning management system (LMS)",
                    "Department-specific wikis",
                ]),
                quality_issues: strings(&[
                    "Knowledge base articles often outdated",
                    "Different departments have different processes",
                    "Some info only exists in people's heads",
                ]),
            },
            stakeholder_concerns: StakeholderConcerns {
                agent_owner: Concerns {
                    worries: "Will it feel impersonal for new hires?".to_string(),
                    hopes: "Consistent experience, faster productivity".to_string(),
                },
                business_owner: Concerns {
                    worries: "Sensitive HR questions need human touch".to_string(),
                    hopes: "Reduce time-to-productivity by 30%".to_string(),
                },
            },
            guardrails_needed: strings(&[
                "Escalate benefits/compensation questions to HR",
                "Cannot access performance review data",
                "Flag harassment or discrimination concerns immediately",
                "Cannot modify system access directly",
                "Must verify identity before sharing personal info",
            ]),
            success_metrics: SuccessMetrics {
                baseline: metrics(&[
                    ("time_to_productivity", "90 days"),
                    ("manager_hours_per_hire", "12 hours"),
                    ("training_completion_rate", "70%"),
                    ("new_hire_satisfaction", "3.5/5"),
                ]),
                targets: metrics(&[
                    ("time_to_productivity", "60 days"),
                    ("manager_hours_per_hire", "4 hours"),
                    ("training_completion_rate", "95%"),
                    ("new_hire_satisfaction", "4.5/5"),
                ]),
            },
            adoption_challenges: strings(&[
                "Managers want to keep their own style",
                "Department-specific needs vary widely",
                "Some prefer human interaction",
            ]),
        },
    }
}

fn incident_response() -> Scenario {
    Scenario {
        id: "incident_response".to_string(),
        name: "IT Incident Response Coordinator".to_string(),
        brief_description:
            "An AI agent that helps coordinate major IT incidents by gathering context, notifying stakeholders, and tracking resolution."
                .to_string(),
        hidden_details: HiddenDetails {
            current_process: ProcessSnapshot {
                steps: strings(&[
                    "Alert fires from monitoring (PagerDuty)",
                    "On-call engineer investigates manually",
                    "War room created, people pulled in ad-hoc",
                    "Status updates via Slack (inconsistent)",
                    "Post-mortem written (sometimes)",
                ]),
                pain_points: strings(&[
                    "Too many alerts, hard to prioritize",
                    "Right people not always engaged quickly",
                    "Stakeholders demand constant updates",
                    "Tribal knowledge about system dependencies",
                    "Post-mortems rarely lead to improvements",
                ]),
                volume: "15 major incidents/month, 200 alerts/day".to_string(),
            },
            data_landscape: DataLandscape {
                sources: strings(&[
                    "PagerDuty alerts and schedules",
                    "DataDog metrics and logs",
                    "CMDB (configuration management database)",
                    "Runbooks in Confluence",
                    "Historical incident tickets (Jira)",
                ]),
                quality_issues: strings(&[
                    "CMDB is 60% accurate",
                    "Runbooks outdated for newer services",
                    "Alert thresholds not well-tuned",
                ]),
            },
            stakeholder_concerns: StakeholderConcerns {
                agent_owner: Concerns {
                    worries: "Will engineers trust AI in crisis?".to_string(),
                    hopes: "Faster resolution, less toil".to_string(),
                },
                business_owner: Concerns {
                    worries: "What if AI makes wrong call during outage?".to_string(),
                    hopes: "Reduce MTTR, improve uptime SLAs".to_string(),
                },
            },
            guardrails_needed: strings(&[
                "Cannot execute remediation commands",
                "Human approval for any customer communication",
                "Escalate security incidents to SecOps immediately",
                "Cannot access production credentials",
                "Must log all recommendations for audit",
            ]),
            success_metrics: SuccessMetrics {
                baseline: metrics(&[
                    ("mttr", "45 minutes"),
                    ("time_to_engage_team", "12 minutes"),
                    ("stakeholder_update_frequency", "every 30 min"),
                    ("post_mortem_completion", "60%"),
                ]),
                targets: metrics(&[
                    ("mttr", "20 minutes"),
                    ("time_to_engage_team", "3 minutes"),
                    ("stakeholder_update_frequency", "every 10 min"),
                    ("post_mortem_completion", "95%"),
                ]),
            },
            adoption_challenges: strings(&[
                "Engineers skeptical of AI in high-stress situations",
                "Existing tools deeply embedded in workflow",
                "Concerns about alert fatigue getting worse",
            ]),
        },
    }
}
