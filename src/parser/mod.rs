//! Termin smart parser
//!
//! Turns a free-text appointment description into an [`AppointmentDraft`]
//! by asking a generative model for schema-constrained JSON, then checking
//! the answer itself before anything reaches the form.

pub mod gemini;
pub mod prompt;
pub mod schema;
pub mod traits;

use crate::appointment::AppointmentDraft;
use crate::config::Config;
use crate::error::{ParseFailed, ParseFailure};
use crate::messages;
use crate::validation::{normalize_time, validate_date_format};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{debug, error, info};
use serde::Deserialize;

pub use traits::LanguageModel;

/// The only fields read from a model response
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ModelAppointment {
    title: Option<String>,
    date: Option<String>,
    time: Option<String>,
    location: Option<String>,
    notes: Option<String>,
}

pub struct SmartParser {
    model: Box<dyn LanguageModel>,
    default_location: String,
    source_language: String,
}

impl SmartParser {
    pub fn new(model: Box<dyn LanguageModel>) -> Self {
        Self {
            model,
            default_location: messages::DEFAULT_LOCATION.to_string(),
            source_language: crate::config::DEFAULT_SOURCE_LANGUAGE.to_string(),
        }
    }

    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        self.default_location = location.into();
        self
    }

    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    /// Parse relative to today's local date.
    ///
    /// Callers reject blank input before getting here.
    pub async fn parse(&self, text: &str) -> Result<AppointmentDraft, ParseFailed> {
        self.parse_on(text, Local::now().date_naive()).await
    }

    /// Parse with an explicit reference date for "today"
    pub async fn parse_on(
        &self,
        text: &str,
        today: NaiveDate,
    ) -> Result<AppointmentDraft, ParseFailed> {
        let schema = schema::appointment_schema(today, &self.default_location);
        let prompt = prompt::build_prompt(text, today, &self.source_language);
        debug!("Smart parse via {} (today = {})", self.model.name(), today);

        let outcome = match self.model.generate(&prompt, &schema).await {
            Ok(raw) => interpret_response(&raw),
            Err(e) => Err(ParseFailure::Request(e)),
        };

        match outcome {
            Ok(draft) => {
                info!("Smart parse produced '{}' on {} at {}", draft.title, draft.date, draft.time);
                Ok(draft)
            }
            Err(cause) => {
                error!("Error parsing appointment details with {}: {}", self.model.name(), cause);
                Err(ParseFailed::new(cause))
            }
        }
    }
}

/// Check raw model output and turn it into a draft
fn interpret_response(raw: &str) -> Result<AppointmentDraft, ParseFailure> {
    let parsed: ModelAppointment = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| ParseFailure::Malformed(e.to_string()))?;

    let field = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
    let (title, date, time, location) =
        (field(parsed.title), field(parsed.date), field(parsed.time), field(parsed.location));

    let missing: Vec<&'static str> = schema::REQUIRED_FIELDS
        .into_iter()
        .zip([&title, &date, &time, &location])
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect();
    let (Some(title), Some(date), Some(time), Some(location)) = (title, date, time, location)
    else {
        return Err(ParseFailure::MissingFields(missing));
    };

    if !validate_date_format(&date) {
        return Err(ParseFailure::Malformed(format!("date '{}' is not YYYY-MM-DD", date)));
    }
    let time = normalize_time(&time)
        .ok_or_else(|| ParseFailure::Malformed(format!("time '{}' is not HH:MM", time)))?;

    Ok(AppointmentDraft { title, date, time, location, notes: field(parsed.notes) })
}

/// Models sometimes wrap JSON in a Markdown fence despite the mime type
fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Factory for creating the configured smart parser
pub struct ParserFactory;

impl ParserFactory {
    pub fn create(config: &Config) -> Result<SmartParser> {
        let client =
            gemini::GeminiClient::new(&config.language_model, crate::env_manager::api_key())?;
        info!("Creating Gemini parser ({})", config.language_model.model);
        Ok(SmartParser::new(Box::new(client))
            .with_default_location(config.appointments.default_location.clone())
            .with_source_language(config.language_model.source_language.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Scripted model that records what it was asked
    struct FakeModel {
        reply: std::result::Result<String, String>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl FakeModel {
        fn answering(reply: &str) -> Self {
            Self { reply: Ok(reply.to_string()), requests: Mutex::new(Vec::new()) }
        }

        fn failing(message: &str) -> Self {
            Self { reply: Err(message.to_string()), requests: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl LanguageModel for FakeModel {
        async fn generate(&self, prompt: &str, schema: &Value) -> Result<String> {
            self.requests.lock().unwrap().push((prompt.to_string(), schema.clone()));
            self.reply.clone().map_err(|e| anyhow!(e))
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    fn june_10() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
    }

    async fn parse_with(model: FakeModel, text: &str) -> Result<AppointmentDraft, ParseFailed> {
        SmartParser::new(Box::new(model)).parse_on(text, june_10()).await
    }

    #[tokio::test]
    async fn resolves_relative_date() {
        let model = FakeModel::answering(
            r#"{"title":"Meeting","date":"2024-06-11","time":"15:00","location":"Hamburg"}"#,
        );
        let draft = parse_with(model, "meeting tomorrow 3pm").await.unwrap();

        assert_eq!(draft.date, "2024-06-11");
        assert_eq!(draft.time, "15:00");
        assert_eq!(draft.notes, None);
    }

    #[tokio::test]
    async fn request_carries_reference_date_and_schema() {
        let model = std::sync::Arc::new(FakeModel::answering("{}"));

        struct Shared(std::sync::Arc<FakeModel>);
        #[async_trait]
        impl LanguageModel for Shared {
            async fn generate(&self, prompt: &str, schema: &Value) -> Result<String> {
                self.0.generate(prompt, schema).await
            }
            fn name(&self) -> &str {
                "shared"
            }
        }

        let parser = SmartParser::new(Box::new(Shared(model.clone())))
            .with_default_location("Altona")
            .with_source_language("German");
        let _ = parser.parse_on("Zahnarzt morgen um 9", june_10()).await;

        let requests = model.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let (prompt, schema) = &requests[0];
        assert!(prompt.contains("2024-06-10"));
        assert!(prompt.contains("German"));
        assert!(prompt.contains("Zahnarzt morgen um 9"));
        assert_eq!(schema["required"], serde_json::json!(["title", "date", "time", "location"]));
        assert!(schema["properties"]["location"]["description"]
            .as_str()
            .unwrap()
            .contains("Altona"));
    }

    #[tokio::test]
    async fn missing_location_fails_whole_parse() {
        let model =
            FakeModel::answering(r#"{"title":"Meeting","date":"2024-06-11","time":"15:00"}"#);
        let err = parse_with(model, "meeting tomorrow 3pm").await.unwrap_err();

        assert!(matches!(err.cause(), ParseFailure::MissingFields(f) if f == &vec!["location"]));
        assert_eq!(err.to_string(), messages::SMART_PARSE_FAILED);
    }

    #[tokio::test]
    async fn blank_required_field_counts_as_missing() {
        let model = FakeModel::answering(
            r#"{"title":"  ","date":"2024-06-11","time":"15:00","location":null}"#,
        );
        let err = parse_with(model, "something").await.unwrap_err();
        assert!(
            matches!(err.cause(), ParseFailure::MissingFields(f) if f == &vec!["title", "location"])
        );
    }

    #[tokio::test]
    async fn non_json_is_malformed() {
        let model = FakeModel::answering("Sure! Your meeting is tomorrow at 3pm.");
        let err = parse_with(model, "meeting tomorrow 3pm").await.unwrap_err();
        assert!(matches!(err.cause(), ParseFailure::Malformed(_)));
    }

    #[tokio::test]
    async fn wrong_field_type_is_malformed() {
        let model = FakeModel::answering(
            r#"{"title":"Meeting","date":"2024-06-11","time":1500,"location":"Hamburg"}"#,
        );
        let err = parse_with(model, "meeting").await.unwrap_err();
        assert!(matches!(err.cause(), ParseFailure::Malformed(_)));
    }

    #[tokio::test]
    async fn bad_date_format_is_malformed() {
        let model = FakeModel::answering(
            r#"{"title":"Meeting","date":"11.06.2024","time":"15:00","location":"Hamburg"}"#,
        );
        let err = parse_with(model, "meeting").await.unwrap_err();
        assert!(matches!(err.cause(), ParseFailure::Malformed(m) if m.contains("11.06.2024")));
    }

    #[tokio::test]
    async fn service_error_is_request_failure() {
        let err = parse_with(FakeModel::failing("quota exceeded"), "meeting").await.unwrap_err();
        assert!(matches!(err.cause(), ParseFailure::Request(_)));
        assert_eq!(err.to_string(), messages::SMART_PARSE_FAILED);
    }

    #[tokio::test]
    async fn extra_fields_are_ignored_and_time_normalized() {
        let model = FakeModel::answering(
            "```json\n{\"title\":\"Dentist\",\"date\":\"2024-06-12\",\"time\":\"9:30\",\
             \"location\":\"Altona\",\"notes\":\"bring card\",\"id\":\"injected\",\"priority\":1}\n```",
        );
        let draft = parse_with(model, "dentist wednesday 9:30").await.unwrap();

        assert_eq!(
            draft,
            AppointmentDraft {
                title: "Dentist".to_string(),
                date: "2024-06-12".to_string(),
                time: "09:30".to_string(),
                location: "Altona".to_string(),
                notes: Some("bring card".to_string()),
            }
        );
    }

    #[test]
    fn empty_notes_become_none() {
        let draft = interpret_response(
            r#"{"title":"Call","date":"2024-06-10","time":"08:00","location":"Office","notes":""}"#,
        )
        .unwrap();
        assert_eq!(draft.notes, None);
    }

    #[test]
    fn array_response_is_malformed() {
        let result = interpret_response(r#"[{"title":"Call"}]"#);
        assert!(matches!(result, Err(ParseFailure::Malformed(_))));
    }
}
