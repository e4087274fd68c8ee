//! Fuzzy directory search over patients and owners.
//!
//! Retrieval is a wide SQL substring match; ranking combines
//! Jaro-Winkler (typo tolerant, prefix weighted) with normalized
//! Levenshtein. An exact substring hit outranks every fuzzy score.

use strsim::{jaro_winkler, normalized_levenshtein};

use crate::db::{Database, DbResult};
use crate::models::{Owner, Patient};

/// Candidates pulled from SQL before ranking.
const CANDIDATE_LIMIT: usize = 40;

/// Candidates below this similarity are dropped.
const MIN_SIMILARITY: f64 = 0.25;

/// Directory search over the clinic database.
pub struct DirectorySearch<'a> {
    db: &'a Database,
}

impl<'a> DirectorySearch<'a> {
    /// Create a new search over the given database.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Search patients by name. An empty query lists everyone up to the
    /// limit.
    pub fn patients(&self, query: &str, limit: usize) -> DbResult<Vec<Patient>> {
        let query = query.trim();
        if query.is_empty() {
            let mut all = self.db.list_patients()?;
            all.truncate(limit);
            return Ok(all);
        }

        let mut candidates = self.db.match_patients(query, CANDIDATE_LIMIT)?;
        if candidates.is_empty() {
            // Substring miss: fall back to ranking the full directory
            candidates = self.db.list_patients()?;
        }

        let mut scored: Vec<(f64, Patient)> = candidates
            .into_iter()
            .map(|p| (name_score(query, &p.name), p))
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .collect();
        rank(&mut scored);
        Ok(scored.into_iter().take(limit).map(|(_, p)| p).collect())
    }

    /// Search owners by name or cédula. An empty query lists everyone up
    /// to the limit.
    pub fn owners(&self, query: &str, limit: usize) -> DbResult<Vec<Owner>> {
        let query = query.trim();
        if query.is_empty() {
            let mut all = self.db.list_owners()?;
            all.truncate(limit);
            return Ok(all);
        }

        let mut candidates = self.db.match_owners(query, CANDIDATE_LIMIT)?;
        if candidates.is_empty() {
            candidates = self.db.list_owners()?;
        }

        let mut scored: Vec<(f64, Owner)> = candidates
            .into_iter()
            .map(|o| {
                let score = name_score(query, &o.full_name).max(cedula_score(query, &o.cedula));
                (score, o)
            })
            .filter(|(score, _)| *score >= MIN_SIMILARITY)
            .collect();
        rank(&mut scored);
        Ok(scored.into_iter().take(limit).map(|(_, o)| o).collect())
    }
}

fn rank<T>(scored: &mut [(f64, T)]) {
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
}

/// Score a name against the query (0.0 - 1.0).
fn name_score(query: &str, name: &str) -> f64 {
    let query = query.to_lowercase();
    let name = name.to_lowercase();
    if name.contains(&query) {
        return 1.0;
    }
    fuzzy_match(&query, &name)
}

/// Cédulas only match as prefixes; partial digits are common input.
fn cedula_score(query: &str, cedula: &str) -> f64 {
    if !query.is_empty() && cedula.starts_with(query) {
        1.0
    } else {
        0.0
    }
}

/// Compute fuzzy string similarity using combined metrics.
fn fuzzy_match(a: &str, b: &str) -> f64 {
    // Jaro-Winkler favors shared prefixes, Levenshtein overall shape
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Owner, Patient};

    fn setup_db() -> Database {
        let db = Database::open_in_memory().unwrap();

        for (cedula, name) in [
            ("1-1111-1111", "Carlos Gómez"),
            ("2-2222-2222", "María Rodríguez"),
            ("3-3333-3333", "Carla Mora"),
        ] {
            db.insert_owner(&Owner::new(cedula.into(), name.into()))
                .unwrap();
        }

        for (owner_id, name) in [(1, "Luna"), (1, "Lunares"), (2, "Max"), (3, "Rocky")] {
            db.insert_patient(&Patient::new(owner_id, name.into(), "Canino".into()))
                .unwrap();
        }
        db
    }

    #[test]
    fn test_empty_query_lists_up_to_limit() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);
        assert_eq!(search.patients("", 10).unwrap().len(), 4);
        assert_eq!(search.patients("   ", 2).unwrap().len(), 2);
    }

    #[test]
    fn test_substring_match_ranks_first() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);

        let results = search.patients("Luna", 10).unwrap();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.name.starts_with("Luna")));
    }

    #[test]
    fn test_typo_still_finds_patient() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);

        let results = search.patients("Rocki", 10).unwrap();
        assert!(results.iter().any(|p| p.name == "Rocky"));
    }

    #[test]
    fn test_owner_search_by_cedula_prefix() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);

        let results = search.owners("2-2222", 10).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].full_name, "María Rodríguez");
    }

    #[test]
    fn test_owner_search_prefers_closer_name() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);

        let results = search.owners("Carlos", 10).unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].full_name, "Carlos Gómez");
    }

    #[test]
    fn test_gibberish_returns_nothing() {
        let db = setup_db();
        let search = DirectorySearch::new(&db);
        assert!(search.patients("zzzzqqqq", 10).unwrap().is_empty());
    }

    #[test]
    fn test_fuzzy_match() {
        assert!(fuzzy_match("luna", "luna") > 0.99);
        assert!(fuzzy_match("luna", "lunares") > 0.7);
        assert!(fuzzy_match("luna", "rocky") < 0.5);
    }
}
