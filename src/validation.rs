use crate::config::Config;
use crate::error::{AppError, Result};
use crate::model::{Method, SummarizationRequest};

/// Check raw input against the configured bounds and build a request.
///
/// `limit` is a sentence count for extractive and a maximum summary length in
/// tokens for abstractive; `None` picks the configured default.
pub fn validate(
    config: &Config,
    text: &str,
    method: Method,
    limit: Option<usize>,
) -> Result<SummarizationRequest> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation("Input text is empty".to_string()));
    }

    let length = text.chars().count();
    if length < config.min_text_length {
        return Err(AppError::Validation(format!(
            "Input text is too short: {} characters, minimum is {}",
            length, config.min_text_length
        )));
    }
    if length > config.max_text_length {
        return Err(AppError::Validation(format!(
            "Input text is too long: {} characters, maximum is {}",
            length, config.max_text_length
        )));
    }

    let (min, max, default, unit) = match method {
        Method::Extractive => (
            config.min_num_sentences,
            config.max_num_sentences,
            config.default_num_sentences,
            "Number of sentences",
        ),
        Method::Abstractive => (
            config.abstractive_min_length,
            config.max_input_tokens,
            config.abstractive_max_length,
            "Maximum summary length",
        ),
    };
    let limit = limit.unwrap_or(default);
    if !(min..=max).contains(&limit) {
        return Err(AppError::Validation(format!(
            "{} must be between {} and {}, got {}",
            unit, min, max, limit
        )));
    }

    Ok(SummarizationRequest {
        text: text.to_string(),
        method,
        limit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The committee met on Tuesday to discuss the budget. \
        Several members raised concerns about rising costs.";

    #[test]
    fn test_rejects_blank_text() {
        let err = validate(&Config::default(), "  \n\t ", Method::Extractive, None).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Input text is empty");
    }

    #[test]
    fn test_rejects_short_text() {
        let err = validate(&Config::default(), "Too short.", Method::Extractive, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("too short")));
    }

    #[test]
    fn test_rejects_long_text() {
        let config = Config {
            max_text_length: 60,
            ..Config::default()
        };
        let err = validate(&config, ARTICLE, Method::Extractive, None).unwrap_err();
        assert!(err.to_string().contains("too long"));
    }

    #[test]
    fn test_length_counts_trimmed_characters() {
        let config = Config {
            min_text_length: 5,
            ..Config::default()
        };
        assert!(validate(&config, "  éééé  ", Method::Extractive, None).is_err());
        assert!(validate(&config, "  ééééé  ", Method::Extractive, None).is_ok());
    }

    #[test]
    fn test_defaults_limit_per_method() {
        let config = Config::default();
        let extractive = validate(&config, ARTICLE, Method::Extractive, None).unwrap();
        assert_eq!(extractive.limit, 3);
        assert_eq!(extractive.text, ARTICLE);

        let abstractive = validate(&config, ARTICLE, Method::Abstractive, None).unwrap();
        assert_eq!(abstractive.limit, 100);
    }

    #[test]
    fn test_limit_bounds() {
        let config = Config::default();
        assert!(validate(&config, ARTICLE, Method::Extractive, Some(0)).is_err());
        assert!(validate(&config, ARTICLE, Method::Extractive, Some(11)).is_err());
        assert!(validate(&config, ARTICLE, Method::Extractive, Some(10)).is_ok());
        assert!(validate(&config, ARTICLE, Method::Abstractive, Some(19)).is_err());
        assert!(validate(&config, ARTICLE, Method::Abstractive, Some(2048)).is_ok());
    }
}
