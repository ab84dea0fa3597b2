use super::settings::AppConfig;
use crate::core::errors::ApiError;

pub fn validate_config(config: &AppConfig) -> Result<(), ApiError> {
    validate_u64_field(
        "app.max_input_length",
        config.app.max_input_length as u64,
        1,
        10_000,
    )?;

    validate_u64_field(
        "llm.request_timeout_secs",
        config.llm.request_timeout_secs,
        1,
        600,
    )?;
    validate_url_field("llm.base_url", &config.llm.base_url)?;
    validate_required_string_field("llm.completion_model", &config.llm.completion_model)?;
    validate_required_string_field("llm.embedding_model", &config.llm.embedding_model)?;
    validate_required_string_field("llm.api_key", &config.llm.api_key)?;

    validate_u64_field(
        "catalog.request_timeout_secs",
        config.catalog.request_timeout_secs,
        1,
        600,
    )?;
    validate_url_field("catalog.supabase_url", &config.catalog.supabase_url)?;
    validate_required_string_field("catalog.supabase_key", &config.catalog.supabase_key)?;
    validate_required_string_field("catalog.products_table", &config.catalog.products_table)?;
    validate_required_string_field("catalog.match_function", &config.catalog.match_function)?;

    let threshold = config.retrieval.match_threshold;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(config_range_error(
            "retrieval.match_threshold",
            "between 0 and 1",
        ));
    }
    validate_u64_field(
        "retrieval.match_count",
        config.retrieval.match_count as u64,
        1,
        50,
    )?;

    validate_required_string_field("brand.name", &config.brand.name)?;

    Ok(())
}

fn validate_u64_field(path: &str, value: u64, min: u64, max: u64) -> Result<(), ApiError> {
    if value < min || value > max {
        return Err(config_range_error(
            path,
            &format!("between {} and {}", min, max),
        ));
    }
    Ok(())
}

fn validate_required_string_field(path: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!(
            "Invalid config: {} must be set",
            path
        )));
    }
    Ok(())
}

fn validate_url_field(path: &str, value: &str) -> Result<(), ApiError> {
    validate_required_string_field(path, value)?;
    if !(value.starts_with("http://") || value.starts_with("https://")) {
        return Err(ApiError::BadRequest(format!(
            "Invalid config: {} must be an http(s) URL",
            path
        )));
    }
    Ok(())
}

fn config_range_error(path: &str, expected: &str) -> ApiError {
    ApiError::BadRequest(format!("Invalid config: {} must be {}", path, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.llm.api_key = "gemini-key".to_string();
        config.catalog.supabase_url = "https://project.supabase.co".to_string();
        config.catalog.supabase_key = "service-key".to_string();
        config
    }

    #[test]
    fn defaults_with_secrets_are_valid() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn missing_api_key_is_rejected() {
        let mut config = valid_config();
        config.llm.api_key = "  ".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("llm.api_key"));
    }

    #[test]
    fn threshold_outside_unit_interval_is_rejected() {
        let mut config = valid_config();
        config.retrieval.match_threshold = 1.5;
        assert!(validate_config(&config).is_err());

        config.retrieval.match_threshold = -0.1;
        assert!(validate_config(&config).is_err());

        config.retrieval.match_threshold = 0.0;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_match_count_is_rejected() {
        let mut config = valid_config();
        config.retrieval.match_count = 0;

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("retrieval.match_count"));
    }

    #[test]
    fn non_http_supabase_url_is_rejected() {
        let mut config = valid_config();
        config.catalog.supabase_url = "project.supabase.co".to_string();

        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("http(s) URL"));
    }
}
