//! Parser traits module for Termin
//!
//! The generative model is an untrusted, non-deterministic collaborator. It
//! sits behind [`LanguageModel`] so the smart parser can run against the
//! real service or a scripted fake.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// A service that completes a prompt under a structured-output schema
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Send `prompt` and return the raw response text.
    ///
    /// The schema is a request, not a guarantee: the text may still be
    /// malformed, incomplete or not JSON at all.
    async fn generate(&self, prompt: &str, schema: &Value) -> Result<String>;

    /// Short name for logs
    fn name(&self) -> &str;
}
