use crate::error::{ForageError, Result};
use crate::pricing::{
    PricingProvider, BACKBLAZE_B2, GOOGLE_ONE, ONEDRIVE, S3_INTELLIGENT_TIERING, S3_STANDARD,
};
use std::sync::OnceLock;

/// Providers keyed by display name. Iteration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<(String, PricingProvider)>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// The built-in provider set, created on first use.
    pub fn standard() -> &'static ProviderRegistry {
        static STANDARD: OnceLock<ProviderRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let mut registry = ProviderRegistry::new();
            registry.register("Amazon S3 Standard", PricingProvider::Tiered(S3_STANDARD));
            registry.register(
                "Amazon S3 Intelligent-Tiering",
                PricingProvider::TieringOptimized(S3_INTELLIGENT_TIERING),
            );
            registry.register("Backblaze B2", PricingProvider::Tiered(BACKBLAZE_B2));
            registry.register("Google One", PricingProvider::Bundle(GOOGLE_ONE));
            registry.register("Microsoft OneDrive", PricingProvider::Bundle(ONEDRIVE));
            registry
        })
    }

    /// Adds a provider at the end, or replaces an existing one in place.
    pub fn register(&mut self, name: impl Into<String>, provider: PricingProvider) {
        let name = name.into();
        match self.providers.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = provider,
            None => self.providers.push((name, provider)),
        }
    }

    pub fn get(&self, name: &str) -> Result<&PricingProvider> {
        self.providers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, provider)| provider)
            .ok_or_else(|| ForageError::UnknownProvider(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.iter().any(|(existing, _)| existing == name)
    }

    /// A registry holding only `names`, in the order given.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<ProviderRegistry> {
        let mut selected = ProviderRegistry::new();
        for name in names {
            let name = name.as_ref();
            selected.register(name, *self.get(name)?);
        }
        Ok(selected)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PricingProvider)> {
        self.providers
            .iter()
            .map(|(name, provider)| (name.as_str(), provider))
    }

    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_order() {
        let registry = ProviderRegistry::standard();
        assert_eq!(
            registry.names(),
            vec![
                "Amazon S3 Standard",
                "Amazon S3 Intelligent-Tiering",
                "Backblaze B2",
                "Google One",
                "Microsoft OneDrive",
            ]
        );
        assert_eq!(registry.names(), ProviderRegistry::standard().names());
    }

    #[test]
    fn test_unknown_lookup() {
        let err = ProviderRegistry::standard().get("Dropbox").unwrap_err();
        assert_eq!(err, ForageError::UnknownProvider("Dropbox".to_string()));
    }

    #[test]
    fn test_register_replaces_in_place() {
        let mut registry = ProviderRegistry::new();
        registry.register("a", PricingProvider::Tiered(S3_STANDARD));
        registry.register("b", PricingProvider::Bundle(ONEDRIVE));
        registry.register("a", PricingProvider::Bundle(GOOGLE_ONE));

        assert_eq!(registry.names(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().plan_name(), "Google One");
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let selected = ProviderRegistry::standard()
            .select(&["Microsoft OneDrive", "Backblaze B2"])
            .unwrap();
        assert_eq!(selected.names(), vec!["Microsoft OneDrive", "Backblaze B2"]);

        let missing = ProviderRegistry::standard().select(&["Backblaze B2", "Box"]);
        assert!(missing.unwrap_err().is_unknown_provider());
    }
}
