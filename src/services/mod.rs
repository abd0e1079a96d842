//! Multi-step sequences over the single-request operations in [`crate::ops`].

pub mod pages;

pub use pages::{PublishPageRequest, PublishedPage, StatementDraft, append_statements, publish_page};
