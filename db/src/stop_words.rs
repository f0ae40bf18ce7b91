//! Stop words and keyword extraction for similarity search.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;

use crate::DbError;

/// Words shorter than or equal to this many characters are never keywords.
const MIN_KEYWORD_CHARS: usize = 3;

/// Maximum number of keywords taken from a verse.
pub const MAX_KEYWORDS: usize = 5;

/// Portuguese conjunctions, articles, prepositions and demonstratives.
const PORTUGUESE: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "de", "da", "do", "das", "dos", "e", "ou", "que", "para",
    "com", "em", "na", "no", "por", "se", "não", "mas", "como", "quando", "onde", "porque",
    "então", "assim", "também", "já", "ainda", "mais", "muito", "todo", "toda", "todos", "todas",
    "este", "esta", "estes", "estas", "esse", "essa", "esses", "essas", "aquele", "aquela",
    "aqueles", "aquelas",
];

/// A closed set of words ignored when extracting keywords from verse text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopWords(HashSet<String>);

impl Default for StopWords {
    fn default() -> Self {
        Self::new(PORTUGUESE.iter().copied())
    }
}

impl StopWords {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StopWords(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        )
    }

    /// Reads one word per line. Blank lines and lines starting with `#`
    /// are skipped.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DbError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| DbError::Other {
            cause: format!("Could not read stop words from {}: {}", path.display(), e),
        })?;

        Ok(Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.starts_with('#')),
        ))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(word)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Takes the first [MAX_KEYWORDS] lowercase words of text that are
    /// neither stop words nor short, then drops repeats among them.
    pub fn keywords(&self, text: &str) -> Vec<String> {
        lazy_static! {
            static ref WORD_RE: Regex = Regex::new(r"\b\w+\b").unwrap();
        }

        let lowered = text.to_lowercase();
        let mut keywords: Vec<String> = Vec::with_capacity(MAX_KEYWORDS);
        WORD_RE
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS && !self.contains(w))
            .take(MAX_KEYWORDS)
            .for_each(|w| {
                if !keywords.iter().any(|k| k == w) {
                    keywords.push(w.to_string());
                }
            });
        keywords
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn keywords() {
        let stop_words = StopWords::default();
        let text = "Porque Deus tanto amou o mundo que deu o seu Filho Unigênito, \
                    para que todo o que nele crer não pereça, mas tenha a vida eterna.";
        assert_eq!(
            stop_words.keywords(text),
            vec!["deus", "tanto", "amou", "mundo", "filho"]
        );
    }

    #[test]
    fn keywords_are_distinct() {
        let stop_words = StopWords::default();
        assert_eq!(
            stop_words.keywords("Luz, luz, LUZES e trevas; trevas."),
            vec!["luzes", "trevas"]
        );
    }

    #[test]
    fn repeats_count_toward_the_limit() {
        let stop_words = StopWords::default();
        assert_eq!(
            stop_words.keywords("Senhor, Senhor, Senhor, Senhor, Senhor, meu pastor"),
            vec!["senhor"]
        );
        assert_eq!(
            stop_words.keywords("santo santo santo Senhor Deus poderoso"),
            vec!["santo", "senhor", "deus"]
        );
    }

    #[test]
    fn short_words_and_stop_words_only() {
        let stop_words = StopWords::default();
        assert!(stop_words.keywords("E lhe deu paz.").is_empty());
        assert!(stop_words.keywords("aquele quando também").is_empty());
        assert!(stop_words.keywords("").is_empty());
    }

    #[test]
    fn accented_words_count_characters() {
        let stop_words = StopWords::new(Vec::<String>::new());
        // "fé" and "já" are two characters even though they are three bytes.
        assert_eq!(stop_words.keywords("fé já éden"), vec!["éden"]);
    }

    #[test]
    fn custom_list() {
        let stop_words = StopWords::new(["Deus", " mundo "]);
        assert!(stop_words.contains("deus"));
        assert!(stop_words.contains("mundo"));
        assert_eq!(stop_words.len(), 2);
        assert_eq!(
            stop_words.keywords("Deus amou o mundo"),
            vec!["amou"]
        );
    }

    #[test]
    fn from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "# English").unwrap();
        writeln!(file, "the").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  And ").unwrap();

        let stop_words = StopWords::from_file(&path).unwrap();
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.contains("and"));
        assert!(!stop_words.contains("# english"));
    }

    #[test]
    fn from_missing_file() {
        assert!(StopWords::from_file("/definitely/not/here.txt").is_err());
    }
}
