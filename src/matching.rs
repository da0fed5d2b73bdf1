//! Cross-provider name joins.
//!
//! The population and flag providers only key their datasets by country
//! name, so the aggregator has to join on the common name resolved by the
//! identity provider. That join is fragile ("Republic of X" vs "X",
//! diacritics) and a mismatch silently degrades the result. Keeping it
//! behind [`NameMatcher`] lets a normalizing strategy be swapped in
//! without touching the orchestration code.

/// Decides whether a provider's name key refers to the resolved country.
pub trait NameMatcher: Send + Sync {
    fn matches(&self, resolved: &str, candidate: &str) -> bool;
}

/// Case-sensitive exact string equality.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExactName;

impl NameMatcher for ExactName {
    fn matches(&self, resolved: &str, candidate: &str) -> bool {
        resolved == candidate
    }
}

/// Return the first entry whose name key matches `name`.
pub fn find_by_name<'a, T>(
    matcher: &dyn NameMatcher,
    name: &str,
    entries: &'a [T],
    key: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    entries
        .iter()
        .find(|&entry| matcher.matches(name, key(entry)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_name_is_case_sensitive() {
        assert!(ExactName.matches("Germany", "Germany"));
        assert!(!ExactName.matches("Germany", "germany"));
        assert!(!ExactName.matches("Côte d'Ivoire", "Cote d'Ivoire"));
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let entries = [("France", 1), ("Germany", 2), ("Germany", 3)];

        let found = find_by_name(&ExactName, "Germany", &entries, |e| e.0);

        assert_eq!(found, Some(&("Germany", 2)));
    }

    #[test]
    fn test_find_by_name_no_match() {
        let entries = [("France", 1)];

        assert!(find_by_name(&ExactName, "Germany", &entries, |e| e.0).is_none());
    }

    #[test]
    fn test_custom_matcher_can_be_substituted() {
        struct CaseFolded;

        impl NameMatcher for CaseFolded {
            fn matches(&self, resolved: &str, candidate: &str) -> bool {
                resolved.to_lowercase() == candidate.to_lowercase()
            }
        }

        let entries = [("GERMANY", 7)];

        assert!(find_by_name(&CaseFolded, "Germany", &entries, |e| e.0).is_some());
    }
}
