//! Constant external asset URLs. These are the only external references a
//! rendered proposal may contain.

/// Agency logo shown on the cover.
pub const LOGO_URL: &str = "https://mediaforce.ca/wp-content/uploads/2025/10/mf-logo2.png";

/// Google Ads platform badge.
pub const GOOGLE_ADS_BADGE_URL: &str =
    "https://mediaforce.ca/wp-content/uploads/2025/11/guide-google-ads.png";

/// Every external URL a document may reference.
pub const ALLOWED_ASSETS: &[&str] = &[LOGO_URL, GOOGLE_ADS_BADGE_URL];

/// Whether `url` is on the asset allow-list.
pub fn is_allowed_asset(url: &str) -> bool {
    ALLOWED_ASSETS.contains(&url.trim())
}
