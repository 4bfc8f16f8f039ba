//! Path location: maps resolved import paths to architecture layers.

use crate::vocabulary::Vocabulary;

/// Layer and slice sub-path an import points into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerSlice {
    /// Layer name.
    pub layer: String,
    /// Path below the layer (`user/api`), or the layer name when nothing follows.
    pub slice: String,
}

impl LayerSlice {
    /// The slice directory name: first component of [`LayerSlice::slice`].
    #[must_use]
    pub fn slice_name(&self) -> &str {
        self.slice.split('/').next().unwrap_or(&self.slice)
    }
}

/// Finds the first layer token in an import path.
pub struct PathLocator<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> PathLocator<'a> {
    /// Creates a locator over a vocabulary.
    #[must_use]
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Which layer and slice does this path point into?
    ///
    /// One leading `./`, `../` and `/` are stripped, in that order. A layer
    /// as the first component wins; otherwise components are scanned left to
    /// right. `None` means the import is outside the architecture.
    #[must_use]
    pub fn locate(&self, import_path: &str) -> Option<LayerSlice> {
        let path = strip_once(import_path, "./");
        let path = strip_once(path, "../");
        let path = strip_once(path, "/");

        let parts: Vec<&str> = path.split('/').collect();
        let first = parts.first()?;
        if self.vocabulary.is_layer(first) {
            return Some(Self::at(&parts, 0));
        }
        if parts.len() < 2 {
            return None;
        }

        parts
            .iter()
            .position(|p| self.vocabulary.is_layer(p))
            .map(|i| Self::at(&parts, i))
    }

    /// [`PathLocator::locate`] in tuple form; `("", "")` when no layer matches.
    #[must_use]
    pub fn extract_layer_and_slice(&self, import_path: &str) -> (String, String) {
        self.locate(import_path)
            .map(|ls| (ls.layer, ls.slice))
            .unwrap_or_default()
    }

    fn at(parts: &[&str], i: usize) -> LayerSlice {
        let layer = parts[i].to_string();
        let rest = parts[i + 1..].join("/");
        let slice = if rest.is_empty() { layer.clone() } else { rest };
        LayerSlice { layer, slice }
    }
}

fn strip_once<'p>(path: &'p str, prefix: &str) -> &'p str {
    path.strip_prefix(prefix).unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(path: &str) -> (String, String) {
        let vocabulary = Vocabulary::default();
        PathLocator::new(&vocabulary).extract_layer_and_slice(path)
    }

    fn pair(layer: &str, slice: &str) -> (String, String) {
        (layer.to_string(), slice.to_string())
    }

    #[test]
    fn layer_as_first_component() {
        assert_eq!(extract("entities/user/api"), pair("entities", "user/api"));
        assert_eq!(extract("features/auth/ui"), pair("features", "auth/ui"));
        assert_eq!(extract("app/routes"), pair("app", "routes"));
        assert_eq!(extract("shared/ui"), pair("shared", "ui"));
    }

    #[test]
    fn relative_prefixes_are_stripped() {
        assert_eq!(extract("../entities/user/api"), pair("entities", "user/api"));
        assert_eq!(extract("./features/auth/ui"), pair("features", "auth/ui"));
        assert_eq!(extract("/shared/lib"), pair("shared", "lib"));
    }

    #[test]
    fn bare_layer_defaults_slice_to_layer() {
        assert_eq!(extract("shared"), pair("shared", "shared"));
        assert_eq!(extract("shared/"), pair("shared", "shared"));
    }

    #[test]
    fn scans_for_layer_deeper_in_path() {
        assert_eq!(extract("src/features/auth"), pair("features", "auth"));
        assert_eq!(extract("../../pages/home/ui"), pair("pages", "home/ui"));
        assert_eq!(extract("src/shared"), pair("shared", "shared"));
    }

    #[test]
    fn unknown_paths_are_outside_architecture() {
        assert_eq!(extract("utils/helpers"), pair("", ""));
        assert_eq!(extract("@testing/library"), pair("", ""));
        assert_eq!(extract("react"), pair("", ""));
        assert_eq!(extract(""), pair("", ""));
    }

    #[test]
    fn component_must_match_exactly() {
        assert_eq!(extract("src/featuresx/auth"), pair("", ""));
        assert_eq!(extract("my-shared/ui"), pair("", ""));
    }

    #[test]
    fn custom_vocabulary_is_respected() {
        let vocabulary = Vocabulary::new(["core", "modules"], ["ui"]);
        let locator = PathLocator::new(&vocabulary);
        assert_eq!(
            locator.locate("modules/cart/ui"),
            Some(LayerSlice {
                layer: "modules".into(),
                slice: "cart/ui".into(),
            })
        );
        assert!(locator.locate("features/auth").is_none());
    }

    #[test]
    fn slice_name_is_first_component() {
        let vocabulary = Vocabulary::default();
        let locator = PathLocator::new(&vocabulary);
        let ls = locator.locate("entities/user/model").unwrap();
        assert_eq!(ls.slice_name(), "user");
        let bare = locator.locate("shared").unwrap();
        assert_eq!(bare.slice_name(), "shared");
    }
}
