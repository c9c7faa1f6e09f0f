//! Role Catalog — the fixed set of interview archetypes offered by the service.
//!
//! Built once at startup and shared read-only through `AppState`.

use std::collections::BTreeMap;

use serde::Serialize;

/// Interview parameters for one role.
///
/// Serialized as-is for `GET /api/roles`; the opening question is kept
/// server-side and only revealed when an interview starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleConfig {
    pub name: &'static str,
    /// Main questions asked before the interview closes. Follow-ups don't count.
    pub num_questions: u32,
    /// Minutes.
    pub estimated_time: u32,
    pub description: &'static str,
    #[serde(skip)]
    pub opening_question: &'static str,
}

/// Immutable mapping from role identifier to [`RoleConfig`].
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: BTreeMap<&'static str, RoleConfig>,
}

impl RoleCatalog {
    pub fn new(roles: impl IntoIterator<Item = (&'static str, RoleConfig)>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// The six roles the service ships with.
    pub fn builtin() -> Self {
        Self::new([
            (
                "software_engineer",
                RoleConfig {
                    name: "Software Engineer",
                    num_questions: 7,
                    estimated_time: 30,
                    description: "Technical interview focusing on algorithms, system design, and coding practices",
                    opening_question: "Let's start with a bit about yourself. Can you tell me about your background in software development and what interests you most about this role?",
                },
            ),
            (
                "sales",
                RoleConfig {
                    name: "Sales Representative",
                    num_questions: 9,
                    estimated_time: 30,
                    description: "Interview assessing sales skills, customer handling, and negotiation abilities",
                    opening_question: "Great to meet you! Could you tell me about your previous sales experience and what motivates you in a sales role?",
                },
            ),
            (
                "manager",
                RoleConfig {
                    name: "Manager/Team Lead",
                    num_questions: 8,
                    estimated_time: 30,
                    description: "Leadership interview covering team management, decision-making, and strategic thinking",
                    opening_question: "Thank you for joining today. Can you share your leadership experience and what you think makes a great manager?",
                },
            ),
            (
                "retail",
                RoleConfig {
                    name: "Retail Associate",
                    num_questions: 10,
                    estimated_time: 30,
                    description: "Customer service interview focusing on communication and problem-solving",
                    opening_question: "Welcome! Let's begin by hearing about your customer service experience and why you're interested in retail?",
                },
            ),
            (
                "marketing",
                RoleConfig {
                    name: "Marketing Specialist",
                    num_questions: 8,
                    estimated_time: 30,
                    description: "Creative interview covering campaigns, analytics, and brand strategy",
                    opening_question: "Nice to meet you! Can you tell me about your marketing background and what campaigns or projects you're most proud of?",
                },
            ),
            (
                "data_analyst",
                RoleConfig {
                    name: "Data Analyst",
                    num_questions: 7,
                    estimated_time: 30,
                    description: "Analytical interview on data interpretation, SQL, and business insights",
                    opening_question: "Let's get started. Could you describe your experience with data analysis and what tools you're most comfortable using?",
                },
            ),
        ])
    }

    pub fn get(&self, role_id: &str) -> Option<&RoleConfig> {
        self.roles.get(role_id)
    }

    pub fn roles(&self) -> &BTreeMap<&'static str, RoleConfig> {
        &self.roles
    }
}
