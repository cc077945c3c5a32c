#![deny(missing_docs)]
//! Process start for the relay binaries: loads `.env`, picks the log format for the
//! [Environment], and reports required configuration that is missing without halting

mod environment;

pub use environment::{ENVIRONMENT_VAR, Environment, UnknownEnvironment};

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// used when `RUST_LOG` is not set, every stage of the relay logs at info
const DEFAULT_FILTER: &str = "info";

/// describes how the process should be initialized
#[derive(Debug)]
pub struct RelayEntrypoint {
    env: Option<Environment>,
    service_name: &'static str,
    required_vars: Vec<&'static str>,
}

impl Default for RelayEntrypoint {
    fn default() -> Self {
        Self {
            env: None,
            service_name: env!("CARGO_PKG_NAME"),
            required_vars: Vec::new(),
        }
    }
}

/// proof that [RelayEntrypoint::init] ran, carrying what it found
#[derive(Debug)]
pub struct InitializedEntrypoint {
    env: Environment,
    missing_vars: Vec<&'static str>,
}

impl InitializedEntrypoint {
    /// the [Environment] logging was configured for
    pub fn environment(&self) -> Environment {
        self.env
    }

    /// required variables which were unset or blank at startup
    pub fn missing_vars(&self) -> &[&'static str] {
        &self.missing_vars
    }
}

impl RelayEntrypoint {
    /// skip reading [ENVIRONMENT_VAR] and use `env` instead
    pub fn environment(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    /// set the name reported in the startup log line
    pub fn service_name(mut self, service_name: &'static str) -> Self {
        self.service_name = service_name;
        self
    }

    /// report `var` at startup if it is missing. The process keeps running either way
    pub fn require(mut self, var: &'static str) -> Self {
        self.required_vars.push(var);
        self
    }

    /// consume self, initialize this binary, and return a proof that it was initialized [InitializedEntrypoint]
    pub fn init(self) -> InitializedEntrypoint {
        dotenv::dotenv().ok();
        std::panic::set_hook(Box::new(tracing_panic::panic_hook));

        let (env, unknown) = match self.env {
            Some(env) => (env, None),
            None => Environment::resolve(std::env::var(ENVIRONMENT_VAR).ok().as_deref()),
        };
        install_subscriber(LogFormat::from(env));

        if let Some(err) = unknown {
            tracing::warn!(error = %err, "falling back to production logging");
        }

        let missing_vars = missing_vars(&self.required_vars, |name| std::env::var(name).ok());
        for var in &missing_vars {
            tracing::error!(variable = *var, "required environment variable is not set");
        }

        tracing::info!(service = self.service_name, environment = %env, "initialized");

        InitializedEntrypoint { env, missing_vars }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    /// colored multi line output with source locations
    Pretty,
    /// one flattened JSON object per event, read by the log collector
    Json,
}

impl From<Environment> for LogFormat {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Local => LogFormat::Pretty,
            Environment::Production | Environment::Develop => LogFormat::Json,
        }
    }
}

fn install_subscriber(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true);

    let fmt = match format {
        LogFormat::Pretty => fmt.with_ansi(true).pretty().boxed(),
        LogFormat::Json => fmt
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .flatten_event(true)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(fmt).init();
}

fn missing_vars<F>(required: &[&'static str], lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    required
        .iter()
        .copied()
        .filter(|name| lookup(name).is_none_or(|value| value.trim().is_empty()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_local_logs_pretty() {
        assert_eq!(LogFormat::from(Environment::Local), LogFormat::Pretty);
        assert_eq!(LogFormat::from(Environment::Develop), LogFormat::Json);
        assert_eq!(LogFormat::from(Environment::Production), LogFormat::Json);
    }

    #[test]
    fn it_reports_unset_and_blank_vars() {
        let lookup = |name: &str| match name {
            "GCP_PROJECT" => Some("my-project".to_string()),
            "PUBSUB_TOPIC_ID" => Some("  ".to_string()),
            _ => None,
        };

        let missing = missing_vars(&["GCP_PROJECT", "PUBSUB_TOPIC_ID", "OTHER"], lookup);
        assert_eq!(missing, vec!["PUBSUB_TOPIC_ID", "OTHER"]);
    }

    #[test]
    fn builder_collects_required_vars() {
        let entrypoint = RelayEntrypoint::default()
            .environment(Environment::Local)
            .require("GCP_PROJECT")
            .require("PUBSUB_TOPIC_ID");

        assert_eq!(entrypoint.env, Some(Environment::Local));
        assert_eq!(
            entrypoint.required_vars,
            vec!["GCP_PROJECT", "PUBSUB_TOPIC_ID"]
        );
    }
}
