//! Mapping from the staff intake form onto [`ClientMetadata`].
//!
//! List fields are one entry per line, brands and social platforms are
//! comma separated, pillars are checkboxes and the form builds exactly one
//! package from the retainer and ad spend.

use chrono::NaiveDate;
use serde::Deserialize;

use proposal_generator::metadata::{
    ClientContext, ClientMetadata, CompetitiveLandscape, Competitor, CurrentSituation, Investment,
    Money, NextSteps, Package, Pillar, ProposalInfo, Strategy, SuccessDefinition, TargetAudience,
};

use crate::config::WebConfig;

/// Package name used for form-built proposals.
pub const FORM_PACKAGE_NAME: &str = "Digital Marketing Package";

/// Errors raised while reading the form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    /// The client name field was empty.
    #[error("client name is required")]
    MissingClientName,

    /// A money field could not be parsed.
    #[error("invalid amount in {field}: {reason}")]
    InvalidAmount {
        /// Form field name.
        field: &'static str,
        /// Parser message.
        reason: String,
    },
}

/// Raw form submission. Every field is optional; blanks are treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProposalForm {
    /// Client organisation.
    pub client_name: Option<String>,
    /// `YYYY-MM-DD`; today when blank.
    pub proposal_date: Option<String>,
    /// Analyst credit.
    pub analyst: Option<String>,
    /// Industry label.
    pub industry: Option<String>,
    /// Comma-separated brands.
    pub brands: Option<String>,
    /// Market served.
    pub location: Option<String>,
    /// Current situation summary.
    pub situation_description: Option<String>,
    /// One pain point per line.
    pub pain_points: Option<String>,
    /// One goal per line.
    pub short_term_goals: Option<String>,
    /// One goal per line.
    pub long_term_goals: Option<String>,
    /// One entry per line.
    pub demographics: Option<String>,
    /// One entry per line.
    pub psychographics: Option<String>,
    /// One entry per line.
    pub behaviors: Option<String>,
    /// Market summary.
    pub market_overview: Option<String>,
    /// One competitor name per line.
    pub competitors: Option<String>,
    /// One opportunity per line.
    pub opportunities: Option<String>,
    /// Checkbox.
    pub google_ads_enabled: Option<String>,
    /// Monthly Google Ads budget.
    pub google_ads_budget: Option<String>,
    /// Checkbox.
    pub seo_enabled: Option<String>,
    /// Monthly SEO fee.
    pub seo_fee: Option<String>,
    /// Checkbox.
    pub paid_social_enabled: Option<String>,
    /// Monthly paid social budget.
    pub paid_social_budget: Option<String>,
    /// Comma-separated social platforms.
    pub social_platforms: Option<String>,
    /// Package retainer per month.
    pub monthly_retainer: Option<String>,
    /// Package ad spend per month.
    pub ad_spend: Option<String>,
    /// `1` to receive the document as an attachment.
    pub download: Option<String>,
}

impl ProposalForm {
    /// Whether the submitter asked for an attachment.
    pub fn wants_download(&self) -> bool {
        checked(&self.download)
    }
}

/// Build the metadata record for a form submission.
///
/// # Errors
///
/// Returns [`FormError::MissingClientName`] for a blank client name and
/// [`FormError::InvalidAmount`] for an unparseable money field.
pub fn build_metadata(
    form: &ProposalForm,
    config: &WebConfig,
    today: NaiveDate,
) -> Result<ClientMetadata, FormError> {
    let client_name = text(&form.client_name).ok_or(FormError::MissingClientName)?;

    let target_audience = [&form.demographics, &form.psychographics, &form.behaviors]
        .iter()
        .any(|field| text(field).is_some())
        .then(|| TargetAudience {
            demographics: lines(&form.demographics),
            psychographics: lines(&form.psychographics),
            behaviors: lines(&form.behaviors),
        });

    Ok(ClientMetadata {
        metadata: ProposalInfo {
            client_name: Some(client_name),
            proposal_date: Some(
                text(&form.proposal_date).unwrap_or_else(|| today.format("%Y-%m-%d").to_string()),
            ),
            analyst: text(&form.analyst),
            proposal_type: None,
        },
        client_context: ClientContext {
            industry: text(&form.industry),
            brands: comma_list(&form.brands),
            location: text(&form.location),
            current_situation: CurrentSituation {
                description: text(&form.situation_description),
                pain_points: lines(&form.pain_points),
            },
            success_definition: SuccessDefinition {
                short_term: lines(&form.short_term_goals),
                long_term: lines(&form.long_term_goals),
            },
            target_audience,
        },
        competitive_landscape: CompetitiveLandscape {
            market_overview: text(&form.market_overview),
            competitors: lines(&form.competitors)
                .into_iter()
                .map(|name| Competitor {
                    name,
                    ..Competitor::default()
                })
                .collect(),
            opportunities: lines(&form.opportunities),
        },
        strategy: build_strategy(form)?,
        investment: Investment {
            packages: build_package(form)?.into_iter().collect(),
            payment_terms: Vec::new(),
        },
        next_steps: NextSteps {
            process: Vec::new(),
            contact: config.contact.clone(),
        },
        ..ClientMetadata::default()
    })
}

fn build_strategy(form: &ProposalForm) -> Result<Strategy, FormError> {
    let mut strategy = Strategy::default();
    strategy.pillars.insert(
        "google_ads".to_owned(),
        Pillar {
            enabled: checked(&form.google_ads_enabled),
            monthly_budget: money(&form.google_ads_budget, "google_ads_budget")?,
            ..Pillar::default()
        },
    );
    strategy.pillars.insert(
        "seo".to_owned(),
        Pillar {
            enabled: checked(&form.seo_enabled),
            monthly_fee: money(&form.seo_fee, "seo_fee")?,
            ..Pillar::default()
        },
    );
    strategy.pillars.insert(
        "paid_social".to_owned(),
        Pillar {
            enabled: checked(&form.paid_social_enabled),
            monthly_budget: money(&form.paid_social_budget, "paid_social_budget")?,
            platforms: comma_list(&form.social_platforms),
            ..Pillar::default()
        },
    );
    Ok(strategy)
}

fn build_package(form: &ProposalForm) -> Result<Option<Package>, FormError> {
    let retainer = money(&form.monthly_retainer, "monthly_retainer")?;
    let ad_spend = money(&form.ad_spend, "ad_spend")?;
    if retainer.is_none() && ad_spend.is_none() {
        return Ok(None);
    }
    Ok(Some(Package {
        name: Some(FORM_PACKAGE_NAME.to_owned()),
        monthly_retainer: retainer,
        ad_spend,
        recommended: true,
        ..Package::default()
    }))
}

fn text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

fn lines(value: &Option<String>) -> Vec<String> {
    split_on(value, '\n')
}

fn comma_list(value: &Option<String>) -> Vec<String> {
    split_on(value, ',')
}

fn split_on(value: &Option<String>, separator: char) -> Vec<String> {
    value
        .as_deref()
        .unwrap_or_default()
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn checked(value: &Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim),
        Some("on" | "1" | "true" | "yes")
    )
}

fn money(value: &Option<String>, field: &'static str) -> Result<Option<Money>, FormError> {
    text(value)
        .map(|raw| Money::parse(&raw).map_err(|reason| FormError::InvalidAmount { field, reason }))
        .transpose()
}
