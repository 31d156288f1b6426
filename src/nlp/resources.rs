//! Local cache of language resources
//!
//! Normalization needs three resources per language: tokenizer clitic
//! rules, a stopword list and a lemma exception table. They live as plain
//! text files under a cache directory:
//!
//! ```text
//! <root>/tokenizers/<language>.txt          clitic rules ("suffix n't", "prefix d'")
//! <root>/corpora/stopwords/<language>.txt   one stopword per line
//! <root>/corpora/lemmas/<language>.txt      "inflected lemma" pairs
//! ```
//!
//! [`ResourceCache::ensure_present`] fetches any missing file once from a
//! [`ResourceSource`] and never touches files that already exist. Any
//! failure is a fatal [`TopicError::ResourceUnavailable`].

use crate::errors::{Result, TopicError};
use crate::types::Language;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The kinds of resource a language needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Tokenizer,
    Stopwords,
    Lemmas,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Tokenizer,
        ResourceKind::Stopwords,
        ResourceKind::Lemmas,
    ];

    /// Directory of this kind, relative to the cache root
    pub fn dir_name(&self) -> &'static str {
        match self {
            ResourceKind::Tokenizer => "tokenizers",
            ResourceKind::Stopwords => "corpora/stopwords",
            ResourceKind::Lemmas => "corpora/lemmas",
        }
    }

    /// Resource name used in logs and errors, e.g. `corpora/stopwords/english`
    pub fn resource_name(&self, language: Language) -> String {
        format!("{}/{}", self.dir_name(), language.as_str())
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Somewhere a missing resource can be fetched from
pub trait ResourceSource {
    /// Return the full text of one resource file
    fn fetch(&self, kind: ResourceKind, language: Language) -> Result<String>;
}

/// Resources compiled into the binary: stopwords from the `stop-words`
/// crate, tokenizer rules and lemma exceptions from static tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSource;

impl ResourceSource for BundledSource {
    fn fetch(&self, kind: ResourceKind, language: Language) -> Result<String> {
        let text = match kind {
            ResourceKind::Tokenizer => match language {
                Language::Portuguese => PORTUGUESE_CLITICS.to_string(),
                Language::English => ENGLISH_CLITICS.to_string(),
            },
            ResourceKind::Stopwords => {
                let lang = match language {
                    Language::Portuguese => stop_words::LANGUAGE::Portuguese,
                    Language::English => stop_words::LANGUAGE::English,
                };
                let words: Vec<String> = stop_words::get(lang);
                if words.is_empty() {
                    return Err(TopicError::resource_unavailable(
                        kind.resource_name(language),
                        "bundled stopword list is empty",
                    ));
                }
                let mut out = String::with_capacity(words.len() * 8);
                for word in words {
                    out.push_str(word.trim());
                    out.push('\n');
                }
                out
            }
            ResourceKind::Lemmas => match language {
                Language::Portuguese => PORTUGUESE_LEMMAS.to_string(),
                Language::English => ENGLISH_LEMMAS.to_string(),
            },
        };
        Ok(text)
    }
}

const ENGLISH_CLITICS: &str = "\
# kind form
suffix n't
suffix 's
suffix 're
suffix 've
suffix 'll
suffix 'd
suffix 'm
";

const PORTUGUESE_CLITICS: &str = "\
# kind form
prefix d'
prefix n'
prefix c'
";

const ENGLISH_LEMMAS: &str = "\
# inflected lemma
children child
men man
women woman
people person
mice mouse
geese goose
feet foot
teeth tooth
data datum
criteria criterion
phenomena phenomenon
analyses analysis
hypotheses hypothesis
theses thesis
indices index
matrices matrix
vertices vertex
appendices appendix
corpora corpus
genera genus
ideas idea
areas area
eras era
formulas formula
agendas agenda
photos photo
videos video
ratios ratio
scenarios scenario
studios studio
portfolios portfolio
zeros zero
potatoes potato
tomatoes tomato
heroes hero
volcanoes volcano
echoes echo
bias bias
chaos chaos
canvas canvas
atlas atlas
cosmos cosmos
ethos ethos
lens lens
news news
series series
species species
means means
physics physics
mathematics mathematics
economics economics
statistics statistics
genetics genetics
linguistics linguistics
ethics ethics
politics politics
electronics electronics
mechanics mechanics
";

const PORTUGUESE_LEMMAS: &str = "\
# inflected lemma
países país
pais pai
mães mãe
pães pão
cães cão
alemães alemão
capitães capitão
escrivães escrivão
cidadãos cidadão
irmãos irmão
mãos mão
órgãos órgão
análises análise
hipóteses hipótese
teses tese
sínteses síntese
lápis lápis
vírus vírus
ônibus ônibus
atlas atlas
tórax tórax
";

// ============================================================================
// Parsed resources
// ============================================================================

/// Clitic forms split off their host word by the tokenizer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliticRules {
    /// Forms split off the start of a word (`d'água` → `d'`, `água`)
    pub prefixes: Vec<String>,
    /// Forms split off the end of a word (`don't` → `do`, `n't`)
    pub suffixes: Vec<String>,
}

/// Everything the normalizer needs for one language
#[derive(Debug, Clone)]
pub struct LanguageResources {
    pub language: Language,
    pub clitics: CliticRules,
    pub stopwords: FxHashSet<String>,
    pub lemmas: FxHashMap<String, String>,
}

impl LanguageResources {
    /// Parse resources straight from a source, without touching disk
    pub fn from_source(source: &impl ResourceSource, language: Language) -> Result<Self> {
        Self::parse(
            language,
            &source.fetch(ResourceKind::Tokenizer, language)?,
            &source.fetch(ResourceKind::Stopwords, language)?,
            &source.fetch(ResourceKind::Lemmas, language)?,
        )
    }

    /// Bundled resources for `language`
    pub fn bundled(language: Language) -> Result<Self> {
        Self::from_source(&BundledSource, language)
    }

    fn parse(language: Language, tokenizer: &str, stopwords: &str, lemmas: &str) -> Result<Self> {
        Ok(Self {
            language,
            clitics: parse_clitics(tokenizer)
                .map_err(|msg| malformed(ResourceKind::Tokenizer, language, msg))?,
            stopwords: content_lines(stopwords)
                .map(|(_, line)| line.to_lowercase())
                .collect(),
            lemmas: parse_lemmas(lemmas)
                .map_err(|msg| malformed(ResourceKind::Lemmas, language, msg))?,
        })
    }
}

fn malformed(kind: ResourceKind, language: Language, msg: String) -> TopicError {
    TopicError::resource_unavailable(kind.resource_name(language), msg)
}

/// Non-blank, non-comment lines with their 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

fn parse_clitics(text: &str) -> std::result::Result<CliticRules, String> {
    let mut rules = CliticRules::default();
    for (lineno, line) in content_lines(text) {
        let mut parts = line.split_whitespace();
        let (Some(kind), Some(form), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(format!("line {lineno}: expected '<prefix|suffix> <form>'"));
        };
        let form = form.to_lowercase();
        match kind {
            "prefix" => rules.prefixes.push(form),
            "suffix" => rules.suffixes.push(form),
            other => return Err(format!("line {lineno}: unknown clitic kind '{other}'")),
        }
    }
    Ok(rules)
}

fn parse_lemmas(text: &str) -> std::result::Result<FxHashMap<String, String>, String> {
    let mut lemmas = FxHashMap::default();
    for (lineno, line) in content_lines(text) {
        let mut parts = line.split_whitespace();
        let (Some(inflected), Some(lemma), None) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(format!("line {lineno}: expected '<inflected> <lemma>'"));
        };
        lemmas.insert(inflected.to_lowercase(), lemma.to_lowercase());
    }
    Ok(lemmas)
}

// ============================================================================
// Cache
// ============================================================================

/// A directory of language resources, populated lazily and never refreshed
#[derive(Debug, Clone)]
pub struct ResourceCache<S = BundledSource> {
    root: PathBuf,
    source: S,
}

impl ResourceCache<BundledSource> {
    /// Cache rooted at `root`, filled from the bundled source
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_source(root, BundledSource)
    }
}

impl<S: ResourceSource> ResourceCache<S> {
    /// Cache rooted at `root`, filled from a custom source
    pub fn with_source(root: impl Into<PathBuf>, source: S) -> Self {
        Self {
            root: root.into(),
            source,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// On-disk location of one resource
    pub fn path_for(&self, kind: ResourceKind, language: Language) -> PathBuf {
        self.root
            .join(kind.dir_name())
            .join(format!("{}.txt", language.as_str()))
    }

    /// Whether every resource of `language` is already on disk
    pub fn is_present(&self, language: Language) -> bool {
        ResourceKind::ALL
            .iter()
            .all(|&kind| self.path_for(kind, language).is_file())
    }

    /// Fetch whatever is missing for `language`. Idempotent; returns the
    /// number of resources that had to be fetched.
    pub fn ensure_present(&self, language: Language) -> Result<usize> {
        let mut fetched = 0;
        for kind in ResourceKind::ALL {
            let path = self.path_for(kind, language);
            if path.is_file() {
                debug!(resource = %kind.resource_name(language), "resource cached");
                continue;
            }
            self.fetch_into(kind, language, &path)?;
            fetched += 1;
        }
        Ok(fetched)
    }

    fn fetch_into(&self, kind: ResourceKind, language: Language, path: &Path) -> Result<()> {
        let name = kind.resource_name(language);
        info!(resource = %name, path = %path.display(), "fetching language resource");

        let text = self.source.fetch(kind, language)?;
        let io_err = |e: std::io::Error| TopicError::resource_unavailable(&name, e.to_string());

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        // Write then rename so an interrupted fetch never leaves a file
        // that later looks present.
        let partial = path.with_extension("txt.partial");
        fs::write(&partial, text).map_err(io_err)?;
        fs::rename(&partial, path).map_err(io_err)?;
        Ok(())
    }

    /// Ensure presence, then read and parse every resource of `language`
    pub fn load(&self, language: Language) -> Result<LanguageResources> {
        self.ensure_present(language)?;
        let read = |kind: ResourceKind| {
            fs::read_to_string(self.path_for(kind, language)).map_err(|e| {
                TopicError::resource_unavailable(kind.resource_name(language), e.to_string())
            })
        };
        LanguageResources::parse(
            language,
            &read(ResourceKind::Tokenizer)?,
            &read(ResourceKind::Stopwords)?,
            &read(ResourceKind::Lemmas)?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Source that counts fetches and can be told to fail
    struct CountingSource {
        calls: Cell<usize>,
        fail: bool,
    }

    impl ResourceSource for CountingSource {
        fn fetch(&self, kind: ResourceKind, language: Language) -> Result<String> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(TopicError::resource_unavailable(
                    kind.resource_name(language),
                    "offline",
                ));
            }
            BundledSource.fetch(kind, language)
        }
    }

    #[test]
    fn test_bundled_resources_parse() {
        for language in Language::ALL {
            let res = LanguageResources::bundled(language).unwrap();
            assert!(!res.stopwords.is_empty());
            assert!(!res.lemmas.is_empty());
        }
        let en = LanguageResources::bundled(Language::English).unwrap();
        assert!(en.clitics.suffixes.contains(&"n't".to_string()));
        assert_eq!(en.lemmas.get("children").map(String::as_str), Some("child"));
    }

    #[test]
    fn test_ensure_present_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource {
            calls: Cell::new(0),
            fail: false,
        };
        let cache = ResourceCache::with_source(dir.path(), source);

        assert!(!cache.is_present(Language::English));
        assert_eq!(cache.ensure_present(Language::English).unwrap(), 3);
        assert!(cache.is_present(Language::English));
        assert_eq!(cache.ensure_present(Language::English).unwrap(), 0);
        assert_eq!(cache.source.calls.get(), 3);
    }

    #[test]
    fn test_existing_files_are_not_refreshed() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResourceCache::new(dir.path());
        let path = cache.path_for(ResourceKind::Stopwords, Language::English);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "onlyword\n").unwrap();

        let res = cache.load(Language::English).unwrap();
        assert_eq!(res.stopwords.len(), 1);
        assert!(res.stopwords.contains("onlyword"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "onlyword\n");
    }

    #[test]
    fn test_unfetchable_resource_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = CountingSource {
            calls: Cell::new(0),
            fail: true,
        };
        let cache = ResourceCache::with_source(dir.path(), source);
        let err = cache.load(Language::Portuguese).unwrap_err();
        assert!(err.is_fatal());
        // No retries
        assert_eq!(cache.source.calls.get(), 1);
    }

    #[test]
    fn test_malformed_resource_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResourceCache::new(dir.path());
        let path = cache.path_for(ResourceKind::Tokenizer, Language::English);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "infix -\n").unwrap();

        match cache.load(Language::English).unwrap_err() {
            TopicError::ResourceUnavailable { resource, message } => {
                assert_eq!(resource, "tokenizers/english");
                assert!(message.contains("line 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cache_layout() {
        let cache = ResourceCache::new("/tmp/cache");
        assert_eq!(
            cache.path_for(ResourceKind::Lemmas, Language::Portuguese),
            PathBuf::from("/tmp/cache/corpora/lemmas/portuguese.txt")
        );
    }
}
