use crate::model::{Repository, Result, VelocityError};
use serde_json::{from_str, Value};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
const TOKEN_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub github_token: String,
    pub github_api_url: String,
    pub slack_webhook_url: String,
    pub slack_team_id: String,
    pub repositories: Vec<Repository>,
}

// Create
impl Config {
    /// Reads the JSON config at `path`. A `GITHUB_TOKEN` environment variable
    /// takes precedence over the token stored in the file.
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json_str = fs::read_to_string(path).map_err(|e| {
            VelocityError::Config(format!("failed to read `{}`: {e}", path.display()))
        })?;
        let mut config = Self::parse(&json_str)?;
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            if !token.is_empty() {
                config.github_token = token;
            }
        }
        Ok(config)
    }
}

// Parser
impl Config {
    fn parse(json_str: &str) -> Result<Self> {
        let details: Value = from_str(json_str)?;
        let Some(github_token) = details["GITHUB_TOKEN"].as_str() else {
            return Err(missing("GITHUB_TOKEN"));
        };
        let Some(slack_webhook_url) = details["SLACK_WEBHOOK_URL"].as_str() else {
            return Err(missing("SLACK_WEBHOOK_URL"));
        };
        // Team ids are sometimes written as bare numbers.
        let slack_team_id = match &details["SLACK_TEAM_ID"] {
            Value::String(id) => id.clone(),
            Value::Number(id) => id.to_string(),
            _ => return Err(missing("SLACK_TEAM_ID")),
        };
        let repositories = match details["TARGET_REPOSITORY"].as_array() {
            Some(repos) => repos
                .iter()
                .map(|repo| match repo.as_str() {
                    Some(repo) => repo.parse::<Repository>(),
                    None => Err(VelocityError::Config(format!(
                        "'TARGET_REPOSITORY' entries must be strings, got {repo}"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?,
            None => return Err(missing("TARGET_REPOSITORY")),
        };
        if repositories.is_empty() {
            return Err(VelocityError::Config(
                "'TARGET_REPOSITORY' must list at least one repository".into(),
            ));
        }
        let github_api_url = details["GITHUB_API_URL"]
            .as_str()
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            github_token: github_token.to_string(),
            github_api_url,
            slack_webhook_url: slack_webhook_url.to_string(),
            slack_team_id,
            repositories,
        })
    }
}

fn missing(field: &str) -> VelocityError {
    VelocityError::Config(format!("Not found '{field}' field"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL: &str = r#"{
        "GITHUB_TOKEN": "ghp_secret",
        "SLACK_WEBHOOK_URL": "https://hooks.slack.com/services/T/B/X",
        "SLACK_TEAM_ID": "S0123",
        "TARGET_REPOSITORY": ["acme/api", "acme/web"]
    }"#;

    #[test]
    fn parses_all_fields() {
        let config = Config::parse(FULL).unwrap();

        assert_eq!(config.github_token, "ghp_secret");
        assert_eq!(config.github_api_url, DEFAULT_API_URL);
        assert_eq!(config.slack_webhook_url, "https://hooks.slack.com/services/T/B/X");
        assert_eq!(config.slack_team_id, "S0123");
        assert_eq!(
            config.repositories,
            vec![Repository::new("acme", "api"), Repository::new("acme", "web")]
        );
    }

    #[test]
    fn api_url_override_drops_trailing_slash() {
        let json = FULL.replace(
            "\"SLACK_TEAM_ID\"",
            "\"GITHUB_API_URL\": \"https://ghe.example.com/api/v3/\", \"SLACK_TEAM_ID\"",
        );
        let config = Config::parse(&json).unwrap();
        assert_eq!(config.github_api_url, "https://ghe.example.com/api/v3");
    }

    #[test]
    fn numeric_team_id_is_accepted() {
        let json = FULL.replace("\"S0123\"", "42");
        assert_eq!(Config::parse(&json).unwrap().slack_team_id, "42");
    }

    #[test]
    fn missing_field_is_reported_by_name() {
        let json = r#"{"GITHUB_TOKEN": "t", "SLACK_TEAM_ID": "S", "TARGET_REPOSITORY": ["a/b"]}"#;
        let err = Config::parse(json).unwrap_err();
        assert!(err.to_string().contains("SLACK_WEBHOOK_URL"));
    }

    #[test]
    fn empty_repository_list_is_rejected() {
        let json = FULL.replace(r#"["acme/api", "acme/web"]"#, "[]");
        let err = Config::parse(&json).unwrap_err();
        assert!(matches!(err, VelocityError::Config(_)));
    }

    #[test]
    fn malformed_repository_is_rejected() {
        let json = FULL.replace("acme/web", "acme");
        let err = Config::parse(&json).unwrap_err();
        assert!(matches!(err, VelocityError::InvalidRepository(_)));
    }

    #[test]
    fn reads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let config = Config::from_config(file.path()).unwrap();
        assert_eq!(config.repositories.len(), 2);
        assert_eq!(config.slack_team_id, "S0123");
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_config(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, VelocityError::Config(_)));
    }
}
