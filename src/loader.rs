// src/loader.rs
//
// File-backed configuration: acronym registry JSON and TOML settings.
// The normalization and expansion code never touches the filesystem; this
// module is what hands it ready-made tables.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::lexicon::{Lexicon, LexiconOverrides};
use crate::normalizer::{Normalizer, RunPunctuation};
use crate::pattern::{self, LetterPattern, PatternTable};
use crate::registry::AcronymRegistry;

/// One entry of a seed list: `{"short": "SP", "long": "Sofrecom Products"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub short: String,
    pub long: String,
}

/// Accepted registry file layouts.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RegistryFile {
    Map(BTreeMap<String, String>),
    Seed(Vec<SeedEntry>),
}

/// Trim codes and phrases, skip entries missing either, later duplicates win.
fn clean_entries<I>(entries: I) -> AcronymRegistry
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut cleaned = BTreeMap::new();
    for (short, long) in entries {
        let (short, long) = (short.trim(), long.trim());
        if short.is_empty() || long.is_empty() {
            warn!("Skipping incomplete registry entry ({:?} -> {:?})", short, long);
            continue;
        }
        cleaned.insert(short.to_string(), long.to_string());
    }
    AcronymRegistry::new(cleaned)
}

/// Parse a registry from JSON text: either an object of `short: long`
/// pairs or a list of `{short, long}` entries.
pub fn parse_registry(json: &str) -> serde_json::Result<AcronymRegistry> {
    let registry = match serde_json::from_str::<RegistryFile>(json)? {
        RegistryFile::Map(map) => clean_entries(map),
        RegistryFile::Seed(list) => clean_entries(list.into_iter().map(|e| (e.short, e.long))),
    };
    Ok(registry)
}

/// Load the registry at `path`, falling back to the compiled-in seed list
/// when the file does not exist.
pub fn load_registry(path: &Path) -> Result<AcronymRegistry> {
    if !path.exists() {
        info!(
            "No registry at {}, using {} seed acronyms",
            path.display(),
            pattern::SEED_ACRONYMS.len()
        );
        return Ok(seed_registry());
    }

    let json = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let registry = parse_registry(&json).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loaded {} acronyms from {}", registry.len(), path.display());
    let reintroducing = registry.reintroducing_codes();
    if !reintroducing.is_empty() {
        warn!(
            "Full phrases of {:?} contain registered codes; expansion will not be idempotent",
            reintroducing
        );
    }
    Ok(registry)
}

/// The compiled-in seed list, cleaned like a loaded file.
pub fn seed_registry() -> AcronymRegistry {
    clean_entries(pattern::seed_registry())
}

/// Write `registry` as a pretty-printed JSON object, creating parent
/// directories as needed.
pub fn save_registry(registry: &AcronymRegistry, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| Error::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(registry)?;
    fs::write(path, json).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Wrote {} acronyms to {}", registry.len(), path.display());
    Ok(())
}

// ----- SETTINGS -----

/// `acronorm.toml`
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Registry JSON file.
    pub registry: Option<PathBuf>,
    pub run_punctuation: RunPunctuation,
    /// Refuse pattern tables where a short pattern shadows a longer one.
    pub strict_patterns: bool,
    pub lexicon: LexiconSettings,
}

/// Extra lexicon entries layered over the defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LexiconSettings {
    pub collapsed: BTreeMap<String, String>,
    pub letter_names: BTreeMap<String, char>,
    /// Tried before the default patterns, in file order.
    pub patterns: Vec<PatternSetting>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternSetting {
    pub tokens: Vec<String>,
    pub acronym: String,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    fn extra_patterns(&self) -> Vec<LetterPattern> {
        self.lexicon
            .patterns
            .iter()
            .map(|p| LetterPattern::new(p.tokens.iter().cloned(), p.acronym.clone()))
            .collect()
    }

    /// Default lexicon with this file's additions.
    pub fn lexicon(&self) -> Result<Lexicon> {
        let overrides = LexiconOverrides {
            collapsed: self.lexicon.collapsed.clone().into_iter().collect(),
            patterns: self.extra_patterns(),
            letter_names: self.lexicon.letter_names.clone().into_iter().collect(),
        };

        if !self.strict_patterns {
            return Ok(Lexicon::default().merge(overrides));
        }

        let LexiconOverrides {
            collapsed,
            patterns,
            letter_names,
        } = overrides;
        let mut ordered = patterns;
        ordered.extend(pattern::default_letter_patterns());
        let table = PatternTable::strict(ordered)?;
        let keyed = LexiconOverrides {
            collapsed,
            patterns: Vec::new(),
            letter_names,
        };
        Ok(Lexicon::default().merge(keyed).with_patterns(table))
    }

    pub fn normalizer(&self) -> Result<Normalizer> {
        Ok(Normalizer::new(self.lexicon()?).with_run_punctuation(self.run_punctuation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_form() {
        let registry = parse_registry(r#"{"SP": "Sofrecom Products", "UX": "User Experience"}"#).unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("UX"), Some("User Experience"));
    }

    #[test]
    fn test_parse_seed_form_cleans_entries() {
        let registry = parse_registry(
            r#"[
                {"short": " SP ", "long": " Sofrecom Products "},
                {"short": "", "long": "nothing"},
                {"short": "CR", "long": "   "},
                {"short": "SP", "long": "Service Provider"}
            ]"#,
        )
        .unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("SP"), Some("Service Provider"));
    }

    #[test]
    fn test_parse_empty_object() {
        assert!(parse_registry("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_registry("[1, 2]").is_err());
        assert!(parse_registry("not json").is_err());
    }

    #[test]
    fn test_seed_registry() {
        let registry = seed_registry();
        assert_eq!(registry.len(), pattern::SEED_ACRONYMS.len());
        assert_eq!(registry.get("سوفريكوم"), Some("منتجات سوفريكوم"));
    }

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::parse("", Path::new("acronorm.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lexicon().unwrap(), Lexicon::default());
    }

    #[test]
    fn test_settings_lexicon_extensions() {
        let settings = Settings::parse(
            r#"
            run_punctuation = "keep_outer"

            [lexicon.collapsed]
            "كيوا" = "QA"

            [lexicon.letter_names]
            "ال" = "L"

            [[lexicon.patterns]]
            tokens = ["جي", "بي", "تي"]
            acronym = "GPT"
            "#,
            Path::new("acronorm.toml"),
        )
        .unwrap();

        assert_eq!(settings.run_punctuation, RunPunctuation::KeepOuter);
        let lexicon = settings.lexicon().unwrap();
        assert_eq!(lexicon.collapsed["كيوا"], "QA");
        assert_eq!(lexicon.letter_names["ال"], 'L');
        assert_eq!(lexicon.patterns.patterns()[0].acronym, "GPT");

        let normalizer = settings.normalizer().unwrap();
        assert_eq!(normalizer.normalize("(جي بي تي)"), "(GPT)");
    }

    #[test]
    fn test_strict_settings_reject_shadowing() {
        let settings = Settings::parse(
            r#"
            strict_patterns = true

            [[lexicon.patterns]]
            tokens = ["سي", "ار"]
            acronym = "CR"
            "#,
            Path::new("acronorm.toml"),
        )
        .unwrap();
        // ["سي", "ار"] is a prefix of the default ["سي", "ار", "ام"]
        assert!(matches!(settings.lexicon(), Err(Error::ShadowedPattern { .. })));
    }

    #[test]
    fn test_invalid_settings() {
        let result = Settings::parse("strict_patterns = 3", Path::new("bad.toml"));
        assert!(matches!(result, Err(Error::Toml { .. })));
    }
}
