//! Author identity and interning
//!
//! Two authors are the same person when their normalized
//! `(given, middle, surname)` triples match.

use super::AuthorId;
use creditforge_common::errors::{CreditError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// Author name as it appears in the corpus
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorName {
    pub given: String,
    pub middle: String,
    pub surname: String,
}

impl AuthorName {
    /// Create a name, collapsing runs of whitespace in each field
    pub fn new(given: &str, middle: &str, surname: &str) -> Self {
        Self {
            given: collapse_whitespace(given),
            middle: collapse_whitespace(middle),
            surname: collapse_whitespace(surname),
        }
    }

    /// Non-empty fields joined by single spaces
    pub fn display_name(&self) -> String {
        [&self.given, &self.middle, &self.surname]
            .iter()
            .filter(|part| !part.is_empty())
            .map(|part| part.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn key(&self) -> (String, String, String) {
        (
            collapse_whitespace(&self.given).to_lowercase(),
            collapse_whitespace(&self.middle).to_lowercase(),
            collapse_whitespace(&self.surname).to_lowercase(),
        )
    }
}

impl PartialEq for AuthorName {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for AuthorName {}

impl Hash for AuthorName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Author with a dense integer id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: AuthorName,

    /// Corresponding author flag from the ingestion record; not part of
    /// identity and not used by credit allocation
    #[serde(default)]
    pub corresponding: bool,
}

impl Author {
    pub fn new(id: AuthorId, name: AuthorName) -> Self {
        Self {
            id,
            name,
            corresponding: false,
        }
    }

    /// Set the corresponding author flag
    pub fn with_corresponding(mut self, corresponding: bool) -> Self {
        self.corresponding = corresponding;
        self
    }
}

impl PartialEq for Author {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Author {}

impl Hash for Author {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Assigns dense author ids in first-seen order
#[derive(Debug, Default)]
pub struct AuthorRegistry {
    ids: HashMap<AuthorName, AuthorId>,
    authors: Vec<Author>,
}

impl AuthorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, registering it if unseen
    pub fn intern(&mut self, name: AuthorName) -> AuthorId {
        if let Some(&id) = self.ids.get(&name) {
            return id;
        }
        let id = self.authors.len();
        self.ids.insert(name.clone(), id);
        self.authors.push(Author::new(id, name));
        id
    }

    /// Flag an already registered author as corresponding
    pub fn mark_corresponding(&mut self, id: AuthorId) -> Result<()> {
        let author = self
            .authors
            .get_mut(id)
            .ok_or_else(|| CreditError::author_not_found(id))?;
        author.corresponding = true;
        Ok(())
    }

    /// Look up an already registered name
    pub fn id_of(&self, name: &AuthorName) -> Option<AuthorId> {
        self.ids.get(name).copied()
    }

    pub fn get(&self, id: AuthorId) -> Result<&Author> {
        self.authors
            .get(id)
            .ok_or_else(|| CreditError::author_not_found(id))
    }

    pub fn len(&self) -> usize {
        self.authors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }

    /// Consume the registry, yielding authors ordered by id
    pub fn into_authors(self) -> Vec<Author> {
        self.authors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_equality_is_normalized() {
        let a = AuthorName::new("Hua-Wei ", "", "Shen");
        let b = AuthorName::new("hua-wei", "", "  SHEN");
        let c = AuthorName::new("Hua-Wei", "X", "Shen");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.display_name(), "Hua-Wei Shen");
        assert_eq!(c.display_name(), "Hua-Wei X Shen");
    }

    #[test]
    fn test_registry_interns_equal_names() {
        let mut registry = AuthorRegistry::new();
        let first = registry.intern(AuthorName::new("Albert", "", "Barabasi"));
        let second = registry.intern(AuthorName::new("Hua-Wei", "", "Shen"));
        let again = registry.intern(AuthorName::new("albert", "", "BARABASI"));

        assert_eq!(first, 0);
        assert_eq!(second, 1);
        assert_eq!(again, first);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(1).unwrap().name.surname, "Shen");
        assert!(registry.get(5).is_err());
    }

    #[test]
    fn test_author_equality_ignores_id() {
        let a = Author::new(0, AuthorName::new("Ada", "", "Lovelace"));
        let b = Author::new(9, AuthorName::new("ada", "", "lovelace"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_corresponding_flag() {
        let plain = Author::new(0, AuthorName::new("Ada", "", "Lovelace"));
        let flagged = plain.clone().with_corresponding(true);
        assert!(!plain.corresponding);
        assert!(flagged.corresponding);
        assert_eq!(plain, flagged);

        let mut registry = AuthorRegistry::new();
        let id = registry.intern(AuthorName::new("Hua-Wei", "", "Shen"));
        registry.mark_corresponding(id).unwrap();
        assert!(registry.get(id).unwrap().corresponding);
        assert!(registry.mark_corresponding(7).is_err());
    }
}
