//! Alias resolution: rewrites configured import prefixes to real paths.

use std::collections::BTreeMap;

/// Rewrites import paths that start with a configured alias.
///
/// Resolution uses longest-prefix-match so that `@shared` wins over `@`
/// regardless of configuration order.
#[derive(Debug, Clone, Default)]
pub struct AliasResolver {
    /// (alias, target) sorted by alias length descending, then alias.
    map: Vec<(String, String)>,
}

impl AliasResolver {
    /// Build a resolver from an alias map. Empty aliases are ignored.
    #[must_use]
    pub fn new<'a, I>(aliases: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut map: Vec<(String, String)> = aliases
            .into_iter()
            .filter(|(alias, _)| !alias.is_empty())
            .map(|(a, t)| (a.clone(), t.clone()))
            .collect();
        map.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { map }
    }

    /// Build a resolver from a `BTreeMap`, as stored in configuration.
    #[must_use]
    pub fn from_map(aliases: &BTreeMap<String, String>) -> Self {
        Self::new(aliases)
    }

    /// Resolves one import path.
    ///
    /// The matching alias prefix is replaced once and a leading `./` is
    /// stripped from the result. Paths without a matching alias, relative
    /// ones included, are returned unchanged.
    #[must_use]
    pub fn resolve(&self, import_path: &str) -> String {
        for (alias, target) in &self.map {
            if let Some(rest) = import_path.strip_prefix(alias.as_str()) {
                let resolved = format!("{target}{rest}");
                return match resolved.strip_prefix("./") {
                    Some(stripped) => stripped.to_string(),
                    None => resolved,
                };
            }
        }
        import_path.to_string()
    }

    /// Number of configured aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when no alias is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
