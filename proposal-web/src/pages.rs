//! Staff-facing HTML pages. Generated proposals come from the core crate;
//! these are only the login, dashboard, intake form and error screens.

use proposal_generator::render::escape;

const PAGE_STYLE: &str = "body{font-family:system-ui,sans-serif;margin:0;background:#f4f6f9;color:#1f2933}\
main{max-width:760px;margin:40px auto;background:#fff;padding:32px;border-radius:8px}\
h1{margin-top:0}label{display:block;margin-top:14px;font-weight:600}\
input,textarea{width:100%;padding:8px;margin-top:4px;box-sizing:border-box}\
textarea{min-height:80px}fieldset{margin-top:20px;border:1px solid #d9dee5}\
.inline input{width:auto}.error{background:#fdecea;color:#611a15;padding:12px;border-radius:4px}\
button{margin-top:20px;padding:10px 18px}nav a{margin-right:12px}";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
<title>{title}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape(title),
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|message| format!("<p class=\"error\">{}</p>", escape(message)))
        .unwrap_or_default()
}

/// Sign-in page.
pub fn login_page(company: &str, error: Option<&str>) -> String {
    let body = format!(
        "<h1>{company} Proposal Generator</h1>\n{banner}\n\
<form method=\"post\" action=\"/login\">\n\
<label for=\"email\">Staff email</label>\n<input id=\"email\" name=\"email\" type=\"email\" required>\n\
<label for=\"access_code\">Access code</label>\n<input id=\"access_code\" name=\"access_code\" type=\"password\" required>\n\
<button type=\"submit\">Sign in</button>\n</form>",
        company = escape(company),
        banner = error_banner(error),
    );
    page("Sign in", &body)
}

/// Landing page after sign-in.
pub fn dashboard_page(company: &str, user_name: &str) -> String {
    let body = format!(
        "<nav><a href=\"/create\">New proposal</a><a href=\"/logout\">Sign out</a></nav>\n\
<h1>Welcome, {user}</h1>\n\
<p>Create a {company} proposal from a client intake form. The finished proposal \
opens in the browser, where it can be printed to PDF.</p>\n\
<p><a href=\"/create\">Start a new proposal</a></p>",
        user = escape(user_name),
        company = escape(company),
    );
    page("Dashboard", &body)
}

fn text_input(name: &str, label: &str) -> String {
    format!("<label for=\"{name}\">{label}</label>\n<input id=\"{name}\" name=\"{name}\" type=\"text\">\n")
}

fn text_area(name: &str, label: &str) -> String {
    format!("<label for=\"{name}\">{label}</label>\n<textarea id=\"{name}\" name=\"{name}\"></textarea>\n")
}

fn checkbox(name: &str, label: &str) -> String {
    format!(
        "<label class=\"inline\"><input name=\"{name}\" type=\"checkbox\" value=\"on\"> {label}</label>\n"
    )
}

/// Client intake form.
pub fn create_page(error: Option<&str>) -> String {
    let mut body = String::from("<nav><a href=\"/dashboard\">Dashboard</a><a href=\"/logout\">Sign out</a></nav>\n");
    body.push_str("<h1>New proposal</h1>\n");
    body.push_str(&error_banner(error));
    body.push_str("<form method=\"post\" action=\"/create\">\n");

    body.push_str("<fieldset><legend>Client</legend>\n");
    body.push_str(&text_input("client_name", "Client name (required)"));
    body.push_str(&text_input("proposal_date", "Proposal date (YYYY-MM-DD)"));
    body.push_str(&text_input("analyst", "Analyst"));
    body.push_str(&text_input("industry", "Industry"));
    body.push_str(&text_input("brands", "Brands (comma separated)"));
    body.push_str(&text_input("location", "Location"));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>Situation and goals (one per line)</legend>\n");
    body.push_str(&text_area("situation_description", "Current situation"));
    body.push_str(&text_area("pain_points", "Pain points"));
    body.push_str(&text_area("short_term_goals", "Short-term goals"));
    body.push_str(&text_area("long_term_goals", "Long-term goals"));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>Target audience (one per line)</legend>\n");
    body.push_str(&text_area("demographics", "Demographics"));
    body.push_str(&text_area("psychographics", "Psychographics"));
    body.push_str(&text_area("behaviors", "Search behavior"));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>Competitive landscape</legend>\n");
    body.push_str(&text_area("market_overview", "Market overview"));
    body.push_str(&text_area("competitors", "Competitors (one per line)"));
    body.push_str(&text_area("opportunities", "Opportunities (one per line)"));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>Channels</legend>\n");
    body.push_str(&checkbox("google_ads_enabled", "Google Ads"));
    body.push_str(&text_input("google_ads_budget", "Google Ads monthly budget"));
    body.push_str(&checkbox("seo_enabled", "SEO"));
    body.push_str(&text_input("seo_fee", "SEO monthly fee"));
    body.push_str(&checkbox("paid_social_enabled", "Paid social"));
    body.push_str(&text_input("paid_social_budget", "Paid social monthly budget"));
    body.push_str(&text_input("social_platforms", "Social platforms (comma separated)"));
    body.push_str("</fieldset>\n");

    body.push_str("<fieldset><legend>Investment</legend>\n");
    body.push_str(&text_input("monthly_retainer", "Monthly retainer"));
    body.push_str(&text_input("ad_spend", "Monthly ad spend"));
    body.push_str(&checkbox("download", "Download instead of opening in the browser"));
    body.push_str("</fieldset>\n");

    body.push_str("<button type=\"submit\">Generate proposal</button>\n</form>");
    page("New proposal", &body)
}

/// Generic error page.
pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{title}</h1>\n<p class=\"error\">{message}</p>\n<p><a href=\"/dashboard\">Back to dashboard</a></p>",
        title = escape(title),
        message = escape(message),
    );
    page(title, &body)
}
