//! Client-intake schema and its loader.
//!
//! [`ClientMetadata`] is the single schema definition for the proposal input:
//! every recognized field is listed here with its fallback. Absent optional
//! fields never fail a load; only [`ClientMetadata::validate`] rejects input,
//! and only for a missing `metadata.client_name`.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub mod loader;
pub mod money;

pub use loader::{load_metadata, load_project, parse_metadata, METADATA_FILE_NAME};
pub use money::Money;

/// Fallback for absent free-text fields that are shown inline.
pub const NOT_AVAILABLE: &str = "N/a";

/// Fallback analyst credited on the cover.
pub const DEFAULT_ANALYST: &str = "The Mediaforce Team";

/// Fallback document type shown on the cover.
pub const DEFAULT_PROPOSAL_TYPE: &str = "Digital Marketing Strategy Proposal";

/// Complete client-intake record for one proposal run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientMetadata {
    /// Document-level details (client, date, analyst).
    #[serde(deserialize_with = "null_as_default")]
    pub metadata: ProposalInfo,
    /// What the client does and what they need.
    #[serde(deserialize_with = "null_as_default")]
    pub client_context: ClientContext,
    /// Market and competitor analysis inputs.
    #[serde(deserialize_with = "null_as_default")]
    pub competitive_landscape: CompetitiveLandscape,
    /// Channel pillars and creative services.
    #[serde(deserialize_with = "null_as_default")]
    pub strategy: Strategy,
    /// KPIs, reporting cadence and projections.
    #[serde(deserialize_with = "null_as_default")]
    pub success_metrics: SuccessMetrics,
    /// Rollout phases keyed by period (`week_1`, `weeks_5_12`, ...).
    #[serde(deserialize_with = "null_as_default")]
    pub timeline: IndexMap<String, TimelinePhase>,
    /// Pricing packages and terms.
    #[serde(deserialize_with = "null_as_default")]
    pub investment: Investment,
    /// Onboarding process and contact card.
    #[serde(deserialize_with = "null_as_default")]
    pub next_steps: NextSteps,
}

impl ClientMetadata {
    /// Confirm required fields are present.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ProposalError::MissingRequiredField`] naming
    /// `metadata.client_name` when it is absent or blank.
    pub fn validate(&self) -> Result<(), crate::error::ProposalError> {
        self.client_name().map(|_| ())
    }

    /// The client name, required for every section.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ProposalError::MissingRequiredField`] when absent or blank.
    pub fn client_name(&self) -> Result<&str, crate::error::ProposalError> {
        self.metadata
            .client_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| crate::error::ProposalError::missing("metadata.client_name"))
    }
}

/// Document-level details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProposalInfo {
    /// Client organisation name. Required.
    pub client_name: Option<String>,
    /// Proposal date, conventionally `YYYY-MM-DD`.
    pub proposal_date: Option<String>,
    /// Person or team credited with the proposal.
    pub analyst: Option<String>,
    /// Document type shown on the cover.
    pub proposal_type: Option<String>,
}

impl ProposalInfo {
    /// Proposal date or `"N/a"`.
    pub fn proposal_date(&self) -> &str {
        text_or(&self.proposal_date, NOT_AVAILABLE)
    }

    /// Analyst or the default team credit.
    pub fn analyst(&self) -> &str {
        text_or(&self.analyst, DEFAULT_ANALYST)
    }

    /// Proposal type or the default document type.
    pub fn proposal_type(&self) -> &str {
        text_or(&self.proposal_type, DEFAULT_PROPOSAL_TYPE)
    }
}

/// What the client does, where, and for whom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientContext {
    /// Industry label.
    pub industry: Option<String>,
    /// Brands the client operates, in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub brands: Vec<String>,
    /// Market served.
    pub location: Option<String>,
    /// Where the client stands today.
    #[serde(deserialize_with = "null_as_default")]
    pub current_situation: CurrentSituation,
    /// Short- and long-term goals.
    #[serde(deserialize_with = "null_as_default")]
    pub success_definition: SuccessDefinition,
    /// Audience segments. `None` when the group is absent from the input.
    pub target_audience: Option<TargetAudience>,
}

impl ClientContext {
    /// Industry or `"N/a"`.
    pub fn industry(&self) -> &str {
        text_or(&self.industry, NOT_AVAILABLE)
    }

    /// Location or `"N/a"`.
    pub fn location(&self) -> &str {
        text_or(&self.location, NOT_AVAILABLE)
    }
}

/// Current marketing situation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentSituation {
    /// Free-text summary; the paragraph is omitted when absent.
    pub description: Option<String>,
    /// Problems with the current setup, in priority order.
    #[serde(deserialize_with = "null_as_default")]
    pub pain_points: Vec<String>,
}

/// Goals split by horizon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessDefinition {
    /// Goals for the first three to six months.
    #[serde(deserialize_with = "null_as_default")]
    pub short_term: Vec<String>,
    /// Goals for the first one to three years.
    #[serde(deserialize_with = "null_as_default")]
    pub long_term: Vec<String>,
}

/// Audience segments; each slot renders as one card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetAudience {
    /// Who they are.
    #[serde(deserialize_with = "null_as_default")]
    pub demographics: Vec<String>,
    /// What they value.
    #[serde(deserialize_with = "null_as_default")]
    pub psychographics: Vec<String>,
    /// How they search and buy.
    #[serde(deserialize_with = "null_as_default")]
    pub behaviors: Vec<String>,
}

/// Market context and competitors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveLandscape {
    /// Market summary; the paragraph is omitted when absent.
    pub market_overview: Option<String>,
    /// Competitors in the order given.
    #[serde(deserialize_with = "null_as_default")]
    pub competitors: Vec<Competitor>,
    /// Gaps the strategy will exploit.
    #[serde(deserialize_with = "null_as_default")]
    pub opportunities: Vec<String>,
}

/// One competitor entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Competitor {
    /// Competitor name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    /// Where they are strong.
    #[serde(deserialize_with = "null_as_default")]
    pub strengths: Vec<String>,
    /// Where they are weak.
    #[serde(deserialize_with = "null_as_default")]
    pub weaknesses: Vec<String>,
}

/// Channel pillars and creative services.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Strategy {
    /// Marketing channels keyed by channel key, in source order.
    #[serde(deserialize_with = "null_as_default")]
    pub pillars: IndexMap<String, Pillar>,
    /// Creative service names grouped by category, in source order.
    #[serde(deserialize_with = "null_as_default")]
    pub creative_services: IndexMap<String, Vec<String>>,
}

impl Strategy {
    /// Enabled pillars in source order.
    pub fn enabled_pillars(&self) -> impl Iterator<Item = (&str, &Pillar)> {
        self.pillars
            .iter()
            .filter(|(_, pillar)| pillar.enabled)
            .map(|(key, pillar)| (key.as_str(), pillar))
    }
}

/// One marketing channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pillar {
    /// Whether the channel is part of this proposal.
    #[serde(deserialize_with = "null_as_default")]
    pub enabled: bool,
    /// Monthly media budget.
    pub monthly_budget: Option<Money>,
    /// Monthly management fee (used by fee-based channels such as SEO).
    pub monthly_fee: Option<Money>,
    /// Platforms within the channel (e.g. Meta, LinkedIn).
    #[serde(deserialize_with = "null_as_default")]
    pub platforms: Vec<String>,
    /// Tactics in execution order.
    #[serde(deserialize_with = "null_as_default")]
    pub tactics: Vec<String>,
    /// Results the channel is expected to deliver.
    #[serde(deserialize_with = "null_as_default")]
    pub expected_results: Vec<String>,
}

/// KPIs, reporting and projections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessMetrics {
    /// Primary KPIs in priority order.
    #[serde(deserialize_with = "null_as_default")]
    pub primary_kpis: Vec<String>,
    /// Reporting cadence flags.
    #[serde(deserialize_with = "null_as_default")]
    pub reporting: ReportingFlags,
    /// Performance projections keyed by period.
    #[serde(deserialize_with = "null_as_default")]
    pub projections: IndexMap<String, Projection>,
    /// Worked ROI example.
    pub roi_example: Option<RoiExample>,
}

/// Which recurring reports the client receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingFlags {
    /// Weekly performance snapshot.
    #[serde(deserialize_with = "null_as_default")]
    pub weekly: bool,
    /// Monthly performance report.
    #[serde(deserialize_with = "null_as_default")]
    pub monthly: bool,
    /// Quarterly business review.
    #[serde(deserialize_with = "null_as_default")]
    pub quarterly: bool,
}

/// One projection row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    /// Row label; the humanized period key is used when absent.
    pub label: Option<String>,
    /// Expected leads per month.
    pub leads: Option<u64>,
    /// Expected cost per lead.
    pub cost_per_lead: Option<Money>,
    /// Expected conversion rate in percent (e.g. `"3.5"`).
    pub conversion_rate: Option<String>,
    /// Expected monthly revenue.
    pub revenue: Option<Money>,
}

/// Worked return-on-investment example.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiExample {
    /// Amount invested.
    pub investment: Option<Money>,
    /// Revenue attributed to the investment.
    pub revenue: Option<Money>,
    /// Narrative explaining the example.
    pub description: Option<String>,
}

/// One rollout phase.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelinePhase {
    /// Phase heading; the humanized period key is used when absent.
    pub title: Option<String>,
    /// Deliverables in order.
    #[serde(deserialize_with = "null_as_default")]
    pub deliverables: Vec<String>,
}

/// Pricing packages and terms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Investment {
    /// Packages in display order.
    #[serde(deserialize_with = "null_as_default")]
    pub packages: Vec<Package>,
    /// Payment terms; accepts a single string or a list.
    #[serde(deserialize_with = "string_or_seq")]
    pub payment_terms: Vec<String>,
}

/// One pricing package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    /// Package name.
    pub name: Option<String>,
    /// Descriptive text shown with or without a price block.
    pub description: Option<String>,
    /// Agency retainer per month.
    pub monthly_retainer: Option<Money>,
    /// Media spend per month.
    pub ad_spend: Option<Money>,
    /// Stated monthly total; derived from retainer and ad spend when absent.
    pub total_monthly: Option<Money>,
    /// What the package includes.
    #[serde(deserialize_with = "null_as_default")]
    pub includes: Vec<String>,
    /// Highlight as the recommended option.
    #[serde(deserialize_with = "null_as_default")]
    pub recommended: bool,
}

impl Package {
    /// Package name or a generic label.
    pub fn name(&self) -> &str {
        text_or(&self.name, "Marketing Package")
    }

    /// Whether any pricing field is present.
    pub fn has_pricing(&self) -> bool {
        self.monthly_retainer.is_some() || self.ad_spend.is_some() || self.total_monthly.is_some()
    }

    /// Stated total, or `monthly_retainer + ad_spend` in exact cents.
    ///
    /// Returns `None` for packages without any pricing field.
    pub fn total_monthly(&self) -> Option<Money> {
        if let Some(total) = self.total_monthly {
            return Some(total);
        }
        if !self.has_pricing() {
            return None;
        }
        let retainer = self.monthly_retainer.unwrap_or(Money::ZERO);
        let spend = self.ad_spend.unwrap_or(Money::ZERO);
        Some(retainer.saturating_add(spend))
    }
}

/// Onboarding process and contact details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NextSteps {
    /// Onboarding steps in order.
    #[serde(deserialize_with = "null_as_default")]
    pub process: Vec<String>,
    /// Agency contact card.
    #[serde(deserialize_with = "null_as_default")]
    pub contact: Contact,
}

/// Agency contact card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    /// Contact person or team.
    pub name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Website, shown as text.
    pub website: Option<String>,
}

impl Contact {
    /// Contact name or `"N/a"`.
    pub fn name(&self) -> &str {
        text_or(&self.name, NOT_AVAILABLE)
    }

    /// Email or `"N/a"`.
    pub fn email(&self) -> &str {
        text_or(&self.email, NOT_AVAILABLE)
    }

    /// Phone or `"N/a"`.
    pub fn phone(&self) -> &str {
        text_or(&self.phone, NOT_AVAILABLE)
    }

    /// Website or `"N/a"`.
    pub fn website(&self) -> &str {
        text_or(&self.website, NOT_AVAILABLE)
    }
}

/// Non-blank text or the fallback.
fn text_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or(fallback)
}

/// Explicit `null` reads as the field's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_or_seq<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
        Nothing(()),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(text) if text.trim().is_empty() => Vec::new(),
        OneOrMany::One(text) => vec![text],
        OneOrMany::Many(items) => items,
        OneOrMany::Nothing(()) => Vec::new(),
    })
}
