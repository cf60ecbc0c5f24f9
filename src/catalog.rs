//! Game id catalog: maps the 32 character game id embedded in capture
//! filenames to a human-readable game name.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};

/// Name used for captures whose game id has no catalog entry.
pub const UNKNOWN_GAME: &str = "Unknown";

/// Bundled game id table, embedded at compile time.
static BUNDLED_GAME_IDS: &str = include_str!("../data/gameids.json");

static BUNDLED_CATALOG: LazyLock<Catalog> =
    LazyLock::new(|| Catalog::from_json(BUNDLED_GAME_IDS).expect("Bundled game id table should be valid JSON"));

/// Read-only game id to game name mapping, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    games: HashMap<String, String>,
}

impl Catalog {
    /// The catalog bundled with the binary.
    #[must_use]
    pub fn bundled() -> Self {
        BUNDLED_CATALOG.clone()
    }

    /// Parse a catalog from a JSON object of id to name pairs.
    ///
    /// # Errors
    /// Returns an error if the string is not a valid JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        let games: HashMap<String, String> =
            serde_json::from_str(json).context("Failed to parse game id catalog JSON")?;
        Ok(Self { games })
    }

    /// Bundled catalog extended with entries from an optional user file.
    /// User entries override bundled entries with the same id.
    ///
    /// # Errors
    /// Returns an error if the user file cannot be read or parsed.
    pub fn load(user_catalog: Option<&Path>) -> Result<Self> {
        let mut catalog = Self::bundled();
        if let Some(path) = user_catalog {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
            let user = Self::from_json(&json)
                .with_context(|| format!("Failed to parse catalog file: {}", path.display()))?;
            catalog.games.extend(user.games);
        }
        Ok(catalog)
    }

    /// Resolve a game id to its name, or [`UNKNOWN_GAME`] when absent.
    /// Lookup is an exact, case-sensitive match.
    #[must_use]
    pub fn resolve(&self, game_id: &str) -> &str {
        self.games.get(game_id).map_or(UNKNOWN_GAME, String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::capture::GAME_ID_RANGE;

    #[test]
    fn test_bundled_catalog_ids_are_valid() {
        let catalog = Catalog::bundled();
        assert!(!catalog.is_empty());
        let id_length = GAME_ID_RANGE.len();
        for (id, name) in &catalog.games {
            assert_eq!(id.len(), id_length, "Invalid id length for {name}: {id}");
            assert!(id.chars().all(|c| c.is_ascii_hexdigit()), "Non-hex id for {name}: {id}");
            assert!(!name.is_empty());
        }
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let catalog =
            Catalog::from_json(r#"{"0123456789abcdef0123456789abcdef": "Super Mario Odyssey"}"#).expect("should parse");
        assert_eq!(catalog.resolve("0123456789abcdef0123456789abcdef"), "Super Mario Odyssey");
        assert_eq!(catalog.resolve("ffffffffffffffffffffffffffffffff"), UNKNOWN_GAME);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let catalog = Catalog::from_json(r#"{"ABCDEF": "Some Game"}"#).expect("should parse");
        assert_eq!(catalog.resolve("abcdef"), UNKNOWN_GAME);
        assert_eq!(catalog.resolve("ABCDEF"), "Some Game");
    }

    #[test]
    fn test_load_with_user_catalog_overrides_bundled() {
        let bundled = Catalog::bundled();
        let (id, _) = bundled.games.iter().next().expect("bundled should not be empty");
        let id = id.clone();

        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{"{id}": "Renamed Game", "1111aaaa2222bbbb3333cccc4444dddd": "Homebrew"}}"#)
            .expect("Failed to write temp file");

        let catalog = Catalog::load(Some(file.path())).expect("should load");
        assert_eq!(catalog.resolve(&id), "Renamed Game");
        assert_eq!(catalog.resolve("1111aaaa2222bbbb3333cccc4444dddd"), "Homebrew");
        assert_eq!(catalog.len(), bundled.len() + 1);
    }

    #[test]
    fn test_load_missing_user_catalog_is_an_error() {
        let result = Catalog::load(Some(Path::new("does/not/exist.json")));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_json_rejects_invalid_json() {
        assert!(Catalog::from_json("not json {{{").is_err());
    }
}
