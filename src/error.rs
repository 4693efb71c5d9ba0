use kube::config::KubeconfigError;
use thiserror::Error;

/// Errors raised while querying contexts.
///
/// Only [`Error::LoadConfig`] is fatal. Every other variant belongs to a
/// single context and is reported before moving on to the next one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to load kubeconfig: {0}")]
    LoadConfig(#[source] KubeconfigError),

    #[error("Could not load kubeconfig for context {context}: {source}")]
    ContextConfig {
        context: String,
        #[source]
        source: KubeconfigError,
    },

    #[error("Could not connect to context {context}: {source}")]
    Connect {
        context: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to get {resource} in context {context}: {source}")]
    List {
        resource: String,
        context: String,
        #[source]
        source: kube::Error,
    },

    #[error("Failed to get {resource} in ns {namespace} for context {context}: {source}")]
    RawGet {
        resource: String,
        namespace: String,
        context: String,
        #[source]
        source: kube::Error,
    },
}

impl Error {
    /// Name of the context the error belongs to, if any.
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::LoadConfig(_) => None,
            Error::ContextConfig { context, .. }
            | Error::Connect { context, .. }
            | Error::List { context, .. }
            | Error::RawGet { context, .. } => Some(context),
        }
    }
}
