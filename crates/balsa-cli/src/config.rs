use std::path::Path;

use balsa_syntax::ParseConfig;
use ecow::eco_format;

use crate::StrResult;

/// Load the parser limits from a TOML file, or use the defaults when no file
/// is given.
pub fn load(path: Option<&Path>) -> StrResult<ParseConfig> {
    let Some(path) = path else { return Ok(ParseConfig::default()) };
    let text = std::fs::read_to_string(path)
        .map_err(|err| eco_format!("failed to read config file {} ({err})", path.display()))?;
    let config = from_toml(&text)
        .map_err(|err| eco_format!("failed to parse config file {} ({err})", path.display()))?;
    tracing::info!(?config, "loaded config");
    Ok(config)
}

/// Parse and validate the limits.
fn from_toml(text: &str) -> StrResult<ParseConfig> {
    let config: ParseConfig =
        toml::from_str(text).map_err(|err| eco_format!("{}", err.message()))?;
    if config.lookahead_limit == 0 {
        return Err("lookahead-limit must be at least 1".into());
    }
    if config.max_depth == 0 {
        return Err("max-depth must be at least 1".into());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = from_toml("max-depth = 64").unwrap();
        assert_eq!(config.max_depth, 64);
        assert_eq!(config.lookahead_limit, ParseConfig::default().lookahead_limit);
        assert_eq!(from_toml("").unwrap(), ParseConfig::default());
    }

    #[test]
    fn test_invalid_config() {
        assert_eq!(
            from_toml("lookahead-limit = 0").unwrap_err(),
            "lookahead-limit must be at least 1",
        );
        assert!(from_toml("max-depth = \"deep\"").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(err.starts_with("failed to read config file"));
    }
}
