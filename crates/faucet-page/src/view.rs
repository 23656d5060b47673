//! HTML rendering of the claim page.

use crate::config::PageConfig;
use crate::controller::{ButtonLabel, ClaimFlow, Notice, PageState, Stage};
use crate::messages::Messages;
use crate::networks::NetworkDetails;

/// Form value of the `stage` field while collecting the email
pub const STAGE_EMAIL: &str = "email";
/// Form value of the `stage` field while collecting the code
pub const STAGE_CODE: &str = "code";

/// Mirrors the button rules in the browser so typing re-enables the form
/// without a round trip. The server evaluates them again on submit.
const BUTTON_SCRIPT: &str = r#"(function () {
  var form = document.getElementById("claim-form");
  if (!form) return;
  var button = form.querySelector("button");
  var address = form.querySelector("input[name=address]");
  var consent = form.querySelector("input[name=consent]");
  var pattern = /^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$/;
  function update() {
    var value = address.value;
    if (!pattern.test(value)) {
      button.disabled = true;
      button.textContent = value === "" ? button.dataset.enter : button.dataset.invalid;
    } else if (!consent.checked) {
      button.disabled = true;
      button.textContent = button.dataset.notAllowed;
    } else {
      button.disabled = false;
      button.textContent = button.dataset.ready;
    }
  }
  address.addEventListener("input", update);
  consent.addEventListener("change", update);
  form.addEventListener("submit", function () {
    button.disabled = true;
    button.textContent = button.dataset.processing;
  });
})();"#;

/// Everything needed to render one page
#[derive(Debug)]
pub struct PageView<'a> {
    pub page: &'a PageConfig,
    pub messages: &'a Messages,
    pub state: &'a PageState,
    pub notice: Option<Notice>,
    pub networks: &'a NetworkDetails,
}

/// Escape text for use in HTML content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

impl PageView<'_> {
    /// Render the full HTML document
    pub fn render(&self) -> String {
        let mut html = String::new();
        let m = self.messages;

        html.push_str(&format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<div class="home__cta">
<div>
<a href="{homepage}" target="_blank" rel="noopener noreferrer">
<img src="{logo}" alt="" height="43" width="180">
</a>
</div>
<h1>{title}</h1>
</div>
"#,
            lang = self.page.locale.tag(),
            title = escape(&self.page.title),
            homepage = escape(&self.page.homepage_url),
            logo = escape(&self.page.logo_url),
        ));

        if let Some(notice) = self.notice {
            let kind = if notice.is_success() { "success" } else { "error" };
            html.push_str(&format!(
                r#"<div class="toast toast--{}" role="status">{}</div>
"#,
                kind,
                escape(notice.text(m))
            ));
        }

        html.push_str(&format!(
            r#"<div class="home__card">
<div class="home__card_title"><h3>{}</h3></div>
<div class="home__card_content">
"#,
            escape(m.request_tokens_title)
        ));

        match self.state {
            PageState::Authenticated => html.push_str("<div class=\"content__session\"></div>\n"),
            PageState::Claimed { first_claim } => self.render_claimed(&mut html, *first_claim),
            PageState::Unclaimed(flow) => self.render_flow(&mut html, flow),
        }

        html.push_str("</div>\n</div>\n");
        self.render_details(&mut html);

        if matches!(self.state, PageState::Unclaimed(_)) {
            html.push_str(&format!("<script>{}</script>\n", BUTTON_SCRIPT));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_claimed(&self, html: &mut String, first_claim: bool) {
        let m = self.messages;
        let text = if first_claim { m.claimed_first } else { m.claimed_again };

        html.push_str(&format!(
            r#"<div class="content__claimed">
<p>{}</p>
<button class="button__main" disabled>{}</button>
</div>
"#,
            escape(text),
            escape(ButtonLabel::AlreadyClaimed.text(m))
        ));
    }

    fn render_flow(&self, html: &mut String, flow: &ClaimFlow) {
        let m = self.messages;

        html.push_str(&format!(
            r#"<div class="content__unclaimed">
<p>{}</p>
<form id="claim-form" method="post" action="/">
"#,
            escape(m.enter_email_prompt)
        ));

        match flow.stage() {
            Stage::CollectingEmail => {
                html.push_str(&format!(
                    r#"<input type="hidden" name="stage" value="{}">
<input type="text" name="address" placeholder="{}" value="{}">
"#,
                    STAGE_EMAIL,
                    escape(m.email_placeholder),
                    escape(flow.address())
                ));
            }
            Stage::CollectingCode { code } => {
                html.push_str(&format!(
                    r#"<input type="hidden" name="stage" value="{}">
<input type="hidden" name="address" value="{}">
<input type="text" name="code" placeholder="{}" value="{}">
"#,
                    STAGE_CODE,
                    escape(flow.address()),
                    escape(m.code_placeholder),
                    escape(code)
                ));
            }
        }

        html.push_str(&format!(
            r#"<div class="content__unclaimed_others">
<input type="checkbox" id="consent" name="consent" value="on"{}>
<label for="consent">{}</label>
</div>
"#,
            if flow.consent() { " checked" } else { "" },
            escape(m.consent_label)
        ));

        let button = flow.button();
        html.push_str(&format!(
            r#"<button type="submit" class="button__main"{} data-enter="{}" data-invalid="{}"
 data-not-allowed="{}" data-ready="{}" data-processing="{}">{}</button>
</form>
</div>
"#,
            if button.enabled { "" } else { " disabled" },
            escape(m.button_enter_address),
            escape(m.button_invalid_address),
            escape(m.button_not_allowed),
            escape(flow.ready_label().text(m)),
            escape(m.button_processing),
            escape(button.label.text(m))
        ));
    }

    fn render_details(&self, html: &mut String) {
        let m = self.messages;

        html.push_str(&format!(
            r#"<div class="home__card">
<div class="home__card_title"><h3>{}</h3></div>
<div class="home__card_content_section">
<h4>{}</h4>
"#,
            escape(m.faucet_details_title),
            escape(m.general_information_title)
        ));
        for paragraph in m.general_information {
            html.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
        }

        if self.networks.network_count > 0 {
            html.push_str(&format!(
                "<h4>{} ({})</h4>\n<ul class=\"networks\">\n",
                escape(m.networks_heading),
                self.networks.network_count
            ));
            for network in &self.networks.sorted_networks {
                html.push_str(&format!(
                    "<li>{} <span class=\"chain-id\">{}</span></li>\n",
                    escape(&network.name),
                    network.chain_id
                ));
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</div>\n</div>\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaucetConfig, NetworkConfig};
    use crate::messages::{Locale, EN};
    use crate::networks::network_details;

    fn render(state: &PageState, notice: Option<Notice>) -> String {
        let config = FaucetConfig::default();
        let networks = network_details(&[]);
        PageView {
            page: &config.page,
            messages: &EN,
            state,
            notice,
            networks: &networks,
        }
        .render()
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            escape("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_already_claimed_view() {
        let html = render(&PageState::Claimed { first_claim: false }, None);

        assert!(html.contains(EN.claimed_again));
        assert!(html.contains(
            r#"<button class="button__main" disabled>Tokens Already Claimed</button>"#
        ));
        assert!(!html.contains("claim-form"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_first_claim_view() {
        let html = render(&PageState::Claimed { first_claim: true }, None);
        assert!(html.contains("You have successfully claimed tokens."));
    }

    #[test]
    fn test_authenticated_placeholder() {
        let html = render(&PageState::Authenticated, None);

        assert!(html.contains(r#"<div class="content__session"></div>"#));
        assert!(!html.contains("claim-form"));
    }

    #[test]
    fn test_empty_address_view() {
        let html = render(&PageState::Unclaimed(ClaimFlow::new("")), None);

        assert!(html.contains(r#"name="address""#));
        assert!(!html.contains(r#"name="code""#));
        assert!(html.contains(" disabled data-enter="));
        assert!(html.contains(">Enter a Valid Address</button>"));
        assert!(html.contains(" checked>"));
        assert!(html.contains("<script>"));
    }

    #[test]
    fn test_code_entry_shows_only_code_input() {
        let flow = ClaimFlow::restore(
            "user@example.com",
            Stage::CollectingCode { code: "12".to_string() },
            true,
        );
        let html = render(&PageState::Unclaimed(flow), Some(Notice::CodeSent));

        assert!(html.contains(r#"<input type="hidden" name="address" value="user@example.com">"#));
        assert!(html.contains(r#"<input type="text" name="code""#));
        assert!(!html.contains(r#"<input type="text" name="address""#));
        assert!(html.contains(r#"value="code""#));
        assert!(html.contains(">Verify</button>"));
        assert!(html.contains("toast--success"));
        assert!(html.contains(EN.code_sent));
    }

    #[test]
    fn test_not_allowed_view() {
        let flow = ClaimFlow::restore("user@example.com", Stage::CollectingEmail, false);
        let html = render(&PageState::Unclaimed(flow), None);

        assert!(html.contains(">Not Allowed</button>"));
        assert!(!html.contains(" checked>"));
    }

    #[test]
    fn test_failure_toast() {
        let flow = ClaimFlow::new("user@example.com");
        let html = render(&PageState::Unclaimed(flow), Some(Notice::NetworkError));

        assert!(html.contains("toast--error"));
        assert!(html.contains(EN.network_error));
        assert_eq!(html.matches("role=\"status\"").count(), 1);
    }

    #[test]
    fn test_user_input_is_escaped() {
        let flow = ClaimFlow::new("\"><script>alert(1)</script>");
        let html = render(&PageState::Unclaimed(flow), None);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(html.contains(">Invalid Email Address</button>"));
    }

    #[test]
    fn test_network_list() {
        let mut config = FaucetConfig::default();
        config.page.locale = Locale::En;
        let networks = network_details(&[
            NetworkConfig { name: "Sepolia".to_string(), chain_id: 11155111 },
            NetworkConfig { name: "Holesky".to_string(), chain_id: 17000 },
        ]);
        let state = PageState::Authenticated;

        let html = PageView {
            page: &config.page,
            messages: &EN,
            state: &state,
            notice: None,
            networks: &networks,
        }
        .render();

        assert!(html.contains("Supported networks (2)"));
        let holesky = html.find("Holesky").unwrap();
        let sepolia = html.find("Sepolia").unwrap();
        assert!(holesky < sepolia);
    }
}
