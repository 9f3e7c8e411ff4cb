pub mod api;
pub mod config;
pub mod mailer;
pub mod summarizer;
