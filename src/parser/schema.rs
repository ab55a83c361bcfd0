//! Response schema sent with every smart parse request.

use chrono::NaiveDate;
use serde_json::{json, Value};

/// Fields the model must fill; `notes` is optional
pub const REQUIRED_FIELDS: [&str; 4] = ["title", "date", "time", "location"];

/// Build the appointment schema in the Gemini `responseSchema` dialect.
///
/// Today's date is embedded so relative expressions ("tomorrow") resolve
/// against the request date.
pub fn appointment_schema(today: NaiveDate, default_location: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": {
                "type": "STRING",
                "description": "The main title or subject of the appointment."
            },
            "date": {
                "type": "STRING",
                "description": format!(
                    "The date of the appointment in YYYY-MM-DD format. Today is {}",
                    today.format("%Y-%m-%d")
                )
            },
            "time": {
                "type": "STRING",
                "description": "The time of the appointment in 24-hour HH:MM format."
            },
            "location": {
                "type": "STRING",
                "description": format!(
                    "The physical address or location of the appointment. Default to \"{}\" if not specified.",
                    default_location
                )
            },
            "notes": {
                "type": "STRING",
                "description": "Any additional notes or details about the appointment."
            }
        },
        "required": REQUIRED_FIELDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn requires_four_fields() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let schema = appointment_schema(today, "هامبورغ");

        assert_eq!(schema["required"], json!(["title", "date", "time", "location"]));
        assert_eq!(schema["properties"]["notes"]["type"], "STRING");
        assert_eq!(schema["properties"].as_object().unwrap().len(), 5);
    }

    #[test]
    fn embeds_today_and_default_location() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let schema = appointment_schema(today, "هامبورغ");

        let date = schema["properties"]["date"]["description"].as_str().unwrap();
        assert!(date.ends_with("Today is 2024-06-10"));
        let location = schema["properties"]["location"]["description"].as_str().unwrap();
        assert!(location.contains("\"هامبورغ\""));
    }
}
