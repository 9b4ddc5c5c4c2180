//! Repository map adjustment with central proxy substitution.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::util::diagnostic::suggestions;

/// Ordered mapping from repository name to URL.
pub type RepositoryMap = IndexMap<String, String>;

/// Base URLs of Maven Central, over both schemes.
pub const CENTRAL_URLS: &[&str] = &[
    "https://repo1.maven.org/maven2",
    "http://repo1.maven.org/maven2",
    "https://repo.maven.apache.org/maven2",
    "http://repo.maven.apache.org/maven2",
];

/// Google's Maven Central cache.
pub const GOOGLE_CENTRAL_PROXY: (&str, &str) = (
    "google_central_proxy",
    "https://maven-central.storage-download.googleapis.com/maven2",
);

/// EldoNexus' Maven Central mirror.
pub const ELDONEXUS_CENTRAL_PROXY: (&str, &str) = (
    "eldonexus_central_proxy",
    "https://eldonexus.de/repository/maven-public/",
);

/// Named proxies that replace Maven Central in the libraries file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProxyConfig {
    proxies: IndexMap<String, String>,
}

impl ProxyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a proxy, replacing any proxy of the same name in place.
    pub fn add(&mut self, name: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.proxies.insert(name.into(), url.into());
        self
    }

    /// Use the maintained default: Google's cache, then EldoNexus.
    pub fn use_default_central_proxy(&mut self) -> &mut Self {
        self.use_google_central_proxy();
        self.use_eldonexus_central_proxy()
    }

    /// Use Google's cache only. It serves cached artifacts and nothing else.
    pub fn use_google_central_proxy(&mut self) -> &mut Self {
        let (name, url) = GOOGLE_CENTRAL_PROXY;
        self.add(name, url)
    }

    pub fn use_eldonexus_central_proxy(&mut self) -> &mut Self {
        let (name, url) = ELDONEXUS_CENTRAL_PROXY;
        self.add(name, url)
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.proxies.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Computes the repositories written into a libraries file.
#[derive(Debug, Clone)]
pub struct RepositoryResolver {
    central_urls: Vec<String>,
}

impl RepositoryResolver {
    /// A resolver recognizing the given central URLs.
    pub fn new<I, S>(central_urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RepositoryResolver {
            central_urls: central_urls.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if a URL points at a central repository.
    pub fn is_central(&self, url: &str) -> bool {
        self.central_urls
            .iter()
            .any(|central| url.starts_with(central.as_str()))
    }

    /// Names of the entries that use a central repository directly.
    pub fn central_entries<'a>(&self, repositories: &'a RepositoryMap) -> Vec<&'a str> {
        repositories
            .iter()
            .filter(|(_, url)| self.is_central(url))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Adjust `repositories` for the configured proxies.
    ///
    /// With proxies, central entries are dropped and every proxy is inserted
    /// under its name; an existing entry of that name keeps its position.
    /// Without proxies the map is returned as is, with a warning when it
    /// still points at central.
    pub fn resolve(&self, repositories: &RepositoryMap, proxies: &ProxyConfig) -> RepositoryMap {
        if proxies.is_empty() {
            let central = self.central_entries(repositories);
            if !central.is_empty() {
                tracing::warn!(
                    "Repositories {} use Maven Central directly; {}",
                    central.join(", "),
                    suggestions::CENTRAL_PROXY
                );
            }
            return repositories.clone();
        }

        let mut resolved = RepositoryMap::with_capacity(repositories.len() + 1);
        for (name, url) in repositories {
            if self.is_central(url) {
                tracing::info!("Replacing central repository `{}` ({}) by proxies", name, url);
                continue;
            }
            resolved.insert(name.clone(), url.clone());
        }
        for (name, url) in proxies.iter() {
            resolved.insert(name.to_string(), url.to_string());
        }
        resolved
    }
}

impl Default for RepositoryResolver {
    fn default() -> Self {
        Self::new(CENTRAL_URLS.iter().copied())
    }
}
