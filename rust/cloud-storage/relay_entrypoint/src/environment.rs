use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// selects the [Environment], read after `.env` has been loaded
pub const ENVIRONMENT_VAR: &str = "ENVIRONMENT";

/// Where the relay is deployed. Only changes how logs are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Production environment
    #[default]
    Production,
    /// Dev and or staging environment
    Develop,
    /// Running on a developer machine
    Local,
}

/// Represents a value which cannot be converted into an [Environment]
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown environment `{0}`, expected one of prod, dev, local")]
pub struct UnknownEnvironment(String);

impl Environment {
    /// Resolve from a raw variable value. Anything missing or unrecognized is production,
    /// an unrecognized value is reported so a typo does not go unnoticed
    pub fn resolve(raw: Option<&str>) -> (Self, Option<UnknownEnvironment>) {
        match raw.map(str::trim).filter(|v| !v.is_empty()) {
            None => (Environment::default(), None),
            Some(value) => match value.parse() {
                Ok(env) => (env, None),
                Err(err) => (Environment::default(), Some(err)),
            },
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Environment::Production => "prod",
            Environment::Develop => "dev",
            Environment::Local => "local",
        })
    }
}

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "prod" | "production" => Ok(Environment::Production),
            "dev" | "develop" => Ok(Environment::Develop),
            "local" => Ok(Environment::Local),
            _ => Err(UnknownEnvironment(s.to_string())),
        }
    }
}
