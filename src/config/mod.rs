use serde::Deserialize;

/// Response shape settings for a [`Catcher`](crate::Catcher)
///
/// Deserializes from any serde format; missing keys take the defaults and an
/// explicit `null` switches the key off.
///
/// ```
/// use katch::CatcherConfig;
///
/// let json = r#"{ "envelope": "error", "code": null }"#;
/// let config: CatcherConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.envelope.as_deref(), Some("error"));
/// assert_eq!(config.code, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CatcherConfig {
    /// Key the response body is nested under
    pub envelope: Option<String>,
    /// Key the status code is echoed under
    pub code: Option<String>,
}

impl Default for CatcherConfig {
    fn default() -> Self {
        Self {
            envelope: Some("message".to_string()),
            code: Some("code".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: CatcherConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, CatcherConfig::default());
        assert_eq!(config.envelope.as_deref(), Some("message"));
        assert_eq!(config.code.as_deref(), Some("code"));
    }

    #[test]
    fn test_null_disables_key() {
        let config: CatcherConfig = serde_json::from_str(r#"{ "envelope": null }"#).unwrap();
        assert_eq!(config.envelope, None);
        assert_eq!(config.code.as_deref(), Some("code"));
    }
}
