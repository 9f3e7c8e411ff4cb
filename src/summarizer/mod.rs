//! Summarization gateway.
//!
//! Validates a transcript, assembles the fixed system/user prompt pair,
//! and hands the exchange to an upstream chat-completion provider. The
//! route layer talks to the [`Summarizer`] trait so tests can substitute
//! the provider.

pub mod groq;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

pub use groq::GroqSummarizer;

/// Cap on transcript length forwarded upstream.
pub const MAX_TRANSCRIPT_CHARS: usize = 18_000;

/// Appended to the transcript whenever it is cut at the cap.
pub const TRUNCATION_MARKER: &str = "\n\n[Truncated for length in demo.]";

/// Instruction used when the caller does not supply one.
pub const DEFAULT_INSTRUCTION: &str = "Summarize the transcript in clear bullet points.";

/// Fixed system message sent with every summarization request.
pub const SYSTEM_MESSAGE: &str = "You are an expert meeting assistant. Read the transcript and produce a structured, concise output. Obey the user's instruction. Include sections when appropriate (Overview, Key Decisions, Action Items with owners & due dates, Risks/Blockers). Keep it clean and scannable.";

/// Body of `POST /api/summarize`. A missing transcript deserializes as
/// empty so validation can answer with a 400 rather than a serde reject.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub transcript: String,
    #[serde(default)]
    pub prompt: Option<String>,
}

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("{0}")]
    Validation(String),
    /// Non-2xx from the completion API; the raw body rides along so the
    /// caller can forward it.
    #[error("Groq API error (status {status})")]
    Upstream { status: u16, body: String },
    /// 2xx response without usable summary text, malformed payloads
    /// included.
    #[error("No summary returned by AI.")]
    EmptyResult,
    #[error("request to Groq failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produces a summary for the request, or fails. One upstream call
    /// per invocation; no retries, no caching.
    async fn summarize(&self, request: &SummarizeRequest) -> Result<String, SummarizeError>;
}

/// Caller-supplied instruction when present and non-blank, else the
/// default.
pub fn effective_prompt(prompt: Option<&str>) -> &str {
    match prompt.map(str::trim) {
        Some(p) if !p.is_empty() => p,
        _ => DEFAULT_INSTRUCTION,
    }
}

/// Cuts the transcript at [`MAX_TRANSCRIPT_CHARS`] characters, appending
/// the truncation marker when anything was dropped.
pub fn truncate_transcript(transcript: &str) -> String {
    match transcript.char_indices().nth(MAX_TRANSCRIPT_CHARS) {
        Some((byte_idx, _)) => format!("{}{}", &transcript[..byte_idx], TRUNCATION_MARKER),
        None => transcript.to_string(),
    }
}

/// The single user message sent upstream: instruction and transcript in
/// labeled sections.
pub fn build_user_message(instruction: &str, transcript: &str) -> String {
    format!(
        "INSTRUCTION:\n{}\n\nTRANSCRIPT:\n{}",
        instruction, transcript
    )
}

/// Rejects empty or whitespace-only transcripts before any network work.
pub fn validate(request: &SummarizeRequest) -> Result<(), SummarizeError> {
    if request.transcript.trim().is_empty() {
        return Err(SummarizeError::Validation(
            "Transcript is required.".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_transcript_passes_through_unchanged() {
        let input = "Alice: let's ship Friday.";
        assert_eq!(truncate_transcript(input), input);
    }

    #[test]
    fn transcript_at_the_cap_is_not_marked() {
        let input = "x".repeat(MAX_TRANSCRIPT_CHARS);
        assert_eq!(truncate_transcript(&input), input);
    }

    #[test]
    fn oversized_transcript_is_cut_and_marked() {
        let input = "x".repeat(MAX_TRANSCRIPT_CHARS + 500);
        let out = truncate_transcript(&input);
        assert_eq!(
            out,
            format!("{}{}", "x".repeat(MAX_TRANSCRIPT_CHARS), TRUNCATION_MARKER)
        );
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let input = "é".repeat(MAX_TRANSCRIPT_CHARS + 1);
        let out = truncate_transcript(&input);
        assert!(out.ends_with(TRUNCATION_MARKER));
        let kept = out.strip_suffix(TRUNCATION_MARKER).unwrap();
        assert_eq!(kept.chars().count(), MAX_TRANSCRIPT_CHARS);
    }

    #[test]
    fn blank_prompt_falls_back_to_default() {
        assert_eq!(effective_prompt(None), DEFAULT_INSTRUCTION);
        assert_eq!(effective_prompt(Some("   ")), DEFAULT_INSTRUCTION);
        assert_eq!(effective_prompt(Some(" key points ")), "key points");
    }

    #[test]
    fn user_message_has_labeled_sections() {
        let msg = build_user_message(DEFAULT_INSTRUCTION, "Alice: let's ship Friday.");
        assert_eq!(
            msg,
            "INSTRUCTION:\nSummarize the transcript in clear bullet points.\n\nTRANSCRIPT:\nAlice: let's ship Friday."
        );
    }

    #[test]
    fn whitespace_only_transcript_is_rejected() {
        let request = SummarizeRequest {
            transcript: "   \n\t ".to_string(),
            prompt: None,
        };
        match validate(&request) {
            Err(SummarizeError::Validation(msg)) => {
                assert_eq!(msg, "Transcript is required.")
            }
            other => panic!("expected validation error, got {:?}", other.err()),
        }
    }

    #[test]
    fn missing_transcript_field_deserializes_empty() {
        let request: SummarizeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.transcript.is_empty());
        assert!(validate(&request).is_err());
    }
}
