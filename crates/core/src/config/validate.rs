use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - client.min_similarity is within [0, 1]
/// - client.timeout_secs is not 0
/// - client URLs are non-empty and end with '/'
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let client = &config.client;

    if !(0.0..=1.0).contains(&client.min_similarity) {
        return Err(ConfigError::ValidationError(format!(
            "client.min_similarity must be within [0, 1], got {}",
            client.min_similarity
        )));
    }

    if client.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "client.timeout_secs cannot be 0".to_string(),
        ));
    }

    for (name, url) in [
        ("client.homepage_url", &client.homepage_url),
        ("client.base_url", &client.base_url),
    ] {
        if url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "{} cannot be empty",
                name
            )));
        }
        if !url.ends_with('/') {
            return Err(ConfigError::ValidationError(format!(
                "{} must end with '/'",
                name
            )));
        }
    }

    Ok(())
}
