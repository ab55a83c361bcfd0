use chrono::NaiveDate;

/// Instruction text for one smart parse request
pub fn build_prompt(text: &str, today: NaiveDate, language: &str) -> String {
    format!(
        "Analyze the following appointment description and extract the details into the provided JSON schema. \
         The text is in {}. Respond with JSON only. Today's date is {}. Text: \"{}\"",
        language,
        today.format("%Y-%m-%d"),
        sanitize_user_input(text)
    )
}

/// Keep the user's text on one line and stop it from closing the quoted block
pub fn sanitize_user_input(input: &str) -> String {
    input
        .trim()
        .replace('\u{a0}', " ")
        .replace(['\r', '\n'], " ")
        .replace('"', "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_language_date_and_text() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        let prompt = build_prompt("اجتماع مع العميل غدًا الساعة 3 مساءً", today, "Arabic");

        assert!(prompt.contains("The text is in Arabic."));
        assert!(prompt.contains("Respond with JSON only."));
        assert!(prompt.contains("Today's date is 2024-06-10."));
        assert!(prompt.ends_with("Text: \"اجتماع مع العميل غدًا الساعة 3 مساءً\""));
    }

    #[test]
    fn user_text_cannot_break_out_of_quotes() {
        let cleaned = sanitize_user_input("  lunch \"tomorrow\"\nat noon ");
        assert_eq!(cleaned, "lunch 'tomorrow' at noon");
    }
}
