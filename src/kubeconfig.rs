use std::{collections::HashSet, path::Path};

use kube::config::Kubeconfig;

use crate::Error;

/// Read-only snapshot of the kubeconfig, loaded once per run.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    kubeconfig: Kubeconfig,
}

impl ConfigStore {
    /// Loads the kubeconfig.
    ///
    /// Without `path` the default lookup of `kube` applies: every file listed
    /// in `KUBECONFIG` merged together, else `~/.kube/config`.
    ///
    /// # Errors
    /// Returns [`Error::LoadConfig`] if the file cannot be found, read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let kubeconfig = match path {
            Some(path) => Kubeconfig::read_from(path),
            None => Kubeconfig::read(),
        }
        .map_err(Error::LoadConfig)?;
        Ok(Self::new(kubeconfig))
    }

    pub fn from_yaml(text: &str) -> Result<Self, Error> {
        Kubeconfig::from_yaml(text)
            .map(Self::new)
            .map_err(Error::LoadConfig)
    }

    pub fn new(kubeconfig: Kubeconfig) -> Self {
        Self { kubeconfig }
    }

    pub fn kubeconfig(&self) -> &Kubeconfig {
        &self.kubeconfig
    }

    /// Names of all configured contexts.
    ///
    /// A name appearing more than once (possible when several files are
    /// merged) is only returned for its first occurrence, which is also the
    /// one `kube` resolves.
    pub fn context_names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.kubeconfig
            .contexts
            .iter()
            .filter(|named_context| seen.insert(named_context.name.as_str()))
            .map(|named_context| named_context.name.clone())
            .collect()
    }

    pub fn current_context(&self) -> Option<&str> {
        self.kubeconfig.current_context.as_deref()
    }
}
