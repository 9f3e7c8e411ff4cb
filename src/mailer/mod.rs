//! Email relay.
//!
//! Normalizes the recipient list, applies subject/body defaults, and
//! delegates delivery to a [`Mailer`] implementation injected at startup.

pub mod smtp;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use smtp::SmtpMailer;

pub const DEFAULT_SUBJECT: &str = "Meeting Summary";
pub const DEFAULT_TEXT_BODY: &str = "No text version provided.";

const PRE_STYLE: &str = "font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, 'Liberation Mono', 'Courier New', monospace; white-space: pre-wrap";

/// Recipients arrive either as one comma/space-separated string or as an
/// array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Recipients {
    Many(Vec<String>),
    One(String),
}

/// A fully defaulted message ready for the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Receipt returned by the transport on acceptance.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    pub message_id: String,
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0}")]
    Validation(String),
    #[error("failed to send email: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<SendReceipt, MailError>;
}

impl OutgoingEmail {
    /// Applies the relay's defaulting rules. Fails when no usable
    /// recipient survives normalization; nothing touches the transport in
    /// that case.
    pub fn build(
        to: Option<&Recipients>,
        subject: Option<&str>,
        text: Option<&str>,
        html: Option<&str>,
    ) -> Result<Self, MailError> {
        let recipients = to.map(normalize_recipients).unwrap_or_default();
        if recipients.is_empty() {
            return Err(MailError::Validation(
                "Recipient email(s) required.".to_string(),
            ));
        }

        let subject = non_blank(subject).unwrap_or(DEFAULT_SUBJECT).to_string();
        let body_text = non_blank(text).unwrap_or(DEFAULT_TEXT_BODY).to_string();
        // The fallback HTML renders the caller's text, not the defaulted
        // placeholder.
        let body_html = match non_blank(html) {
            Some(h) => h.to_string(),
            None => format!(
                "<pre style=\"{}\">{}</pre>",
                PRE_STYLE,
                escape_html(text.unwrap_or(""))
            ),
        };

        Ok(Self {
            to: recipients,
            subject,
            text: body_text,
            html: body_html,
        })
    }
}

/// Splits string input on commas and spaces, trims every token, drops
/// empties, and keeps each address once in order of first appearance.
pub fn normalize_recipients(input: &Recipients) -> Vec<String> {
    let tokens: Vec<&str> = match input {
        Recipients::One(s) => s.split([',', ' ']).collect(),
        Recipients::Many(list) => list.iter().map(String::as_str).collect(),
    };

    let mut seen = Vec::new();
    for token in tokens {
        let token = token.trim();
        if token.is_empty() || seen.iter().any(|s| s == token) {
            continue;
        }
        seen.push(token.to_string());
    }
    seen
}

/// Escapes exactly `&`, `<`, and `>`; everything else passes through.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            other => out.push(other),
        }
    }
    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(s: &str) -> Recipients {
        Recipients::One(s.to_string())
    }

    #[test]
    fn recipients_split_on_commas_and_spaces() {
        assert_eq!(
            normalize_recipients(&one("a@x.com, b@x.com")),
            vec!["a@x.com", "b@x.com"]
        );
        assert_eq!(
            normalize_recipients(&one("a@x.com b@x.com,c@x.com")),
            vec!["a@x.com", "b@x.com", "c@x.com"]
        );
    }

    #[test]
    fn empty_tokens_are_dropped() {
        assert_eq!(
            normalize_recipients(&one(" , a@x.com,, ,b@x.com ,")),
            vec!["a@x.com", "b@x.com"]
        );
        assert!(normalize_recipients(&one("  , ,  ")).is_empty());
    }

    #[test]
    fn duplicates_keep_first_appearance_order() {
        assert_eq!(
            normalize_recipients(&one("b@x.com, a@x.com, b@x.com")),
            vec!["b@x.com", "a@x.com"]
        );
    }

    #[test]
    fn array_input_is_trimmed_and_filtered() {
        let input = Recipients::Many(vec![
            " a@x.com ".to_string(),
            String::new(),
            "b@x.com".to_string(),
        ]);
        assert_eq!(normalize_recipients(&input), vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn escape_touches_only_the_three_characters() {
        assert_eq!(
            escape_html("1 < 2 && \"x\" > 'y'"),
            "1 &lt; 2 &amp;&amp; \"x\" &gt; 'y'"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn build_rejects_empty_recipient_list() {
        let err = OutgoingEmail::build(Some(&one(" , ")), None, Some("hi"), None).unwrap_err();
        match err {
            MailError::Validation(msg) => assert_eq!(msg, "Recipient email(s) required."),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(OutgoingEmail::build(None, None, Some("hi"), None).is_err());
    }

    #[test]
    fn subject_and_text_default() {
        let email =
            OutgoingEmail::build(Some(&one("a@x.com")), Some("  "), None, Some("<p>x</p>"))
                .unwrap();
        assert_eq!(email.subject, DEFAULT_SUBJECT);
        assert_eq!(email.text, DEFAULT_TEXT_BODY);
        assert_eq!(email.html, "<p>x</p>");
    }

    #[test]
    fn html_defaults_to_escaped_pre_block() {
        let email =
            OutgoingEmail::build(Some(&one("a@x.com")), None, Some("a < b & c"), None).unwrap();
        assert!(email.html.starts_with("<pre style=\""));
        assert!(email.html.contains("a &lt; b &amp; c"));
        assert!(email.html.ends_with("</pre>"));
    }

    #[test]
    fn fallback_html_uses_raw_text_not_placeholder() {
        let email = OutgoingEmail::build(Some(&one("a@x.com")), None, None, None).unwrap();
        assert_eq!(email.text, DEFAULT_TEXT_BODY);
        assert!(!email.html.contains(DEFAULT_TEXT_BODY));
        assert!(email.html.ends_with("\"></pre>"));
    }

    #[test]
    fn caller_values_win_over_defaults() {
        let email = OutgoingEmail::build(
            Some(&one("a@x.com")),
            Some(" Weekly sync "),
            Some(" Done "),
            None,
        )
        .unwrap();
        assert_eq!(email.subject, "Weekly sync");
        assert_eq!(email.text, "Done");
    }
}
