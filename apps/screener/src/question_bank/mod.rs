//! Question Bank: static technology → difficulty → questions table.
//!
//! Lookup is a case-insensitive exact match against catalog keys and a fixed alias
//! table. There is no fuzzy matching; anything else is an "other" technology and only
//! gets the generic templated questions.

mod catalog;

use rand::seq::SliceRandom;

use crate::models::question::{Difficulty, QuestionRecord};
use catalog::{CatalogEntry, ALIASES, CATALOG, GENERIC_TEMPLATES};

#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionBank;

impl QuestionBank {
    pub fn new() -> Self {
        Self
    }

    /// Returns the catalog key for a technology name or alias.
    pub fn resolve(&self, technology: &str) -> Option<&'static str> {
        let needle = technology.trim().to_lowercase();
        let key = ALIASES
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, key)| *key)
            .unwrap_or(needle.as_str());

        CATALOG.iter().find(|e| e.name == key).map(|e| e.name)
    }

    /// All catalog keys, in catalog order.
    pub fn supported_technologies(&self) -> Vec<&'static str> {
        CATALOG.iter().map(|e| e.name).collect()
    }

    /// Samples up to `count` distinct questions for a technology at the given tier.
    ///
    /// Sampling is without replacement; if the tier holds fewer than `count`
    /// questions, all of them are returned. Unknown technologies get the generic
    /// templates in a fixed order.
    pub fn questions_for(
        &self,
        technology: &str,
        tier: Difficulty,
        count: usize,
    ) -> Vec<QuestionRecord> {
        match self.resolve(technology).and_then(find_entry) {
            Some(entry) => {
                let pool = tier_questions(entry, tier);
                pool.choose_multiple(&mut rand::thread_rng(), count.min(pool.len()))
                    .map(|text| QuestionRecord {
                        technology: entry.name.to_string(),
                        difficulty: tier,
                        text: (*text).to_string(),
                        ai_generated: false,
                    })
                    .collect()
            }
            None => generic_questions(technology, tier, count),
        }
    }
}

fn find_entry(key: &str) -> Option<&'static CatalogEntry> {
    CATALOG.iter().find(|e| e.name == key)
}

fn tier_questions(entry: &'static CatalogEntry, tier: Difficulty) -> &'static [&'static str] {
    match tier {
        Difficulty::Beginner => entry.beginner,
        Difficulty::Intermediate => entry.intermediate,
        Difficulty::Advanced => entry.advanced,
    }
}

fn generic_questions(technology: &str, tier: Difficulty, count: usize) -> Vec<QuestionRecord> {
    let name = technology.trim();
    GENERIC_TEMPLATES
        .iter()
        .take(count)
        .map(|template| QuestionRecord {
            technology: name.to_string(),
            difficulty: tier,
            text: template.replace("{tech}", name),
            ai_generated: false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_is_case_insensitive_exact() {
        let bank = QuestionBank::new();
        assert_eq!(bank.resolve("Python"), Some("python"));
        assert_eq!(bank.resolve("  KUBERNETES "), Some("kubernetes"));
        assert_eq!(bank.resolve("Pyth"), None);
        assert_eq!(bank.resolve("python3"), None);
    }

    #[test]
    fn test_resolve_aliases() {
        let bank = QuestionBank::new();
        assert_eq!(bank.resolve("Node.js"), Some("node"));
        assert_eq!(bank.resolve("k8s"), Some("kubernetes"));
        assert_eq!(bank.resolve("Postgres"), Some("postgresql"));
        assert_eq!(bank.resolve("JS"), Some("javascript"));
    }

    #[test]
    fn test_every_entry_has_three_questions_per_tier() {
        for entry in CATALOG {
            for tier in [
                Difficulty::Beginner,
                Difficulty::Intermediate,
                Difficulty::Advanced,
            ] {
                assert_eq!(tier_questions(entry, tier).len(), 3, "{} {:?}", entry.name, tier);
            }
        }
        assert_eq!(QuestionBank::new().supported_technologies().len(), 15);
    }

    #[test]
    fn test_questions_for_never_exceeds_count_or_duplicates() {
        let bank = QuestionBank::new();
        for count in 0..6 {
            for _ in 0..20 {
                let qs = bank.questions_for("python", Difficulty::Intermediate, count);
                assert!(qs.len() <= count);
                assert_eq!(qs.len(), count.min(3));
                let unique: HashSet<_> = qs.iter().map(|q| q.text.clone()).collect();
                assert_eq!(unique.len(), qs.len());
            }
        }
    }

    #[test]
    fn test_questions_come_from_requested_tier() {
        let bank = QuestionBank::new();
        let advanced: HashSet<&str> = find_entry("docker").unwrap().advanced.iter().copied().collect();
        for q in bank.questions_for("Docker", Difficulty::Advanced, 3) {
            assert!(advanced.contains(q.text.as_str()));
            assert_eq!(q.technology, "docker");
            assert_eq!(q.difficulty, Difficulty::Advanced);
            assert!(!q.ai_generated);
        }
    }

    #[test]
    fn test_unknown_technology_gets_generic_questions() {
        let bank = QuestionBank::new();
        let qs = bank.questions_for("Elixir", Difficulty::Beginner, 2);
        assert_eq!(qs.len(), 2);
        assert!(qs.iter().all(|q| q.text.contains("Elixir")));
        assert!(qs.iter().all(|q| q.technology == "Elixir"));
    }
}
