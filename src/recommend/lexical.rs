//! TF-IDF lexical index
//!
//! Sparse bag-of-words vector space over the corpus: unigrams and bigrams,
//! English stop-words removed, vocabulary capped by corpus term frequency,
//! smooth IDF weighting and L2-normalized rows. Similarity is the cosine of
//! two normalized rows, i.e. their sparse dot product.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::config::LexicalConfig;
use crate::error::{JmError, Result};
use crate::recommend::normalize::normalize;

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid token regex"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH_STOP_WORDS.iter().copied().collect());

/// Sparse row: (term index, weight), sorted by term index.
type SparseVec = Vec<(usize, f32)>;

/// Fitted TF-IDF vector space plus the corpus matrix.
#[derive(Debug, Clone)]
pub struct LexicalIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
    ngram_max: usize,
    rows: Vec<SparseVec>,
}

impl LexicalIndex {
    /// Fit the vocabulary over `texts` and project every text into it.
    ///
    /// # Errors
    ///
    /// `EmptyVocabulary` when the corpus is empty or contains only
    /// stop-words and single-character tokens.
    pub fn fit<S: AsRef<str>>(texts: &[S], config: &LexicalConfig) -> Result<Self> {
        if texts.is_empty() {
            return Err(JmError::EmptyVocabulary("corpus is empty".to_string()));
        }
        if config.max_features == 0 {
            return Err(JmError::EmptyVocabulary(
                "max_features must be greater than 0".to_string(),
            ));
        }
        let ngram_max = config.ngram_max.max(1);

        let documents: Vec<Vec<String>> = texts
            .iter()
            .map(|text| analyze(&normalize(text.as_ref()), ngram_max))
            .collect();

        let mut term_freq: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for terms in &documents {
            let mut seen = HashSet::new();
            for term in terms {
                *term_freq.entry(term.as_str()).or_insert(0) += 1;
                if seen.insert(term.as_str()) {
                    *doc_freq.entry(term.as_str()).or_insert(0) += 1;
                }
            }
        }

        if term_freq.is_empty() {
            return Err(JmError::EmptyVocabulary(
                "documents only contain stop words".to_string(),
            ));
        }

        // BTreeMap iteration is alphabetical, and the sort is stable, so
        // equal frequencies keep alphabetical order.
        let mut ranked: Vec<(&str, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(config.max_features);

        let mut kept: Vec<&str> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort_unstable();

        let n_docs = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(kept.len());
        let mut idf = Vec::with_capacity(kept.len());
        for (idx, term) in kept.iter().enumerate() {
            let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
            idf.push(((1.0 + n_docs) / (1.0 + df)).ln() + 1.0);
            vocabulary.insert((*term).to_string(), idx);
        }

        let mut index = Self {
            vocabulary,
            idf,
            ngram_max,
            rows: Vec::new(),
        };
        index.rows = documents.iter().map(|terms| index.project(terms)).collect();

        debug!(
            records = index.rows.len(),
            vocabulary = index.vocabulary.len(),
            "fitted lexical index"
        );
        Ok(index)
    }

    /// Number of vocabulary terms.
    #[must_use]
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn contains_term(&self, term: &str) -> bool {
        self.vocabulary.contains_key(term)
    }

    /// Cosine similarity of `text` against every record, highest first.
    ///
    /// Ties keep corpus order. Scores lie in `[0, 1]`.
    #[must_use]
    pub fn query(&self, text: &str) -> Vec<(usize, f32)> {
        let terms = analyze(&normalize(text), self.ngram_max);
        let query = self.project(&terms);

        let mut scores: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx, sparse_dot(&query, row).clamp(0.0, 1.0)))
            .collect();

        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scores
    }

    fn project(&self, terms: &[String]) -> SparseVec {
        let mut counts: BTreeMap<usize, f32> = BTreeMap::new();
        for term in terms {
            if let Some(&idx) = self.vocabulary.get(term) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVec = counts
            .into_iter()
            .map(|(idx, count)| (idx, count * self.idf[idx]))
            .collect();

        let norm = row.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, weight) in &mut row {
                *weight /= norm;
            }
        }
        row
    }
}

/// Tokenize, drop stop-words, then emit n-grams up to `ngram_max`.
fn analyze(text: &str, ngram_max: usize) -> Vec<String> {
    let tokens: Vec<&str> = TOKEN_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|token| !STOP_WORDS.contains(token))
        .collect();

    let mut terms: Vec<String> = tokens.iter().map(|t| (*t).to_string()).collect();
    for n in 2..=ngram_max {
        for window in tokens.windows(n) {
            terms.push(window.join(" "));
        }
    }
    terms
}

fn sparse_dot(a: &[(usize, f32)], b: &[(usize, f32)]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut sum = 0.0;
    while i < a.len() && j < b.len() {
        match a[i].0.cmp(&b[j].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                sum += a[i].1 * b[j].1;
                i += 1;
                j += 1;
            }
        }
    }
    sum
}

/// English stop-word list (the common scikit-learn list).
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> LexicalConfig {
        LexicalConfig::default()
    }

    #[test]
    fn analyze_removes_stop_words_before_bigrams() {
        let terms = analyze("the python and django developer", 2);
        assert_eq!(
            terms,
            vec![
                "python",
                "django",
                "developer",
                "python django",
                "django developer"
            ]
        );
    }

    #[test]
    fn analyze_drops_single_character_tokens() {
        assert_eq!(analyze("r c go rust", 1), vec!["rust"]);
    }

    #[test]
    fn fit_empty_corpus_fails() {
        let texts: Vec<String> = Vec::new();
        assert!(matches!(
            LexicalIndex::fit(&texts, &config()),
            Err(JmError::EmptyVocabulary(_))
        ));
    }

    #[test]
    fn fit_stop_words_only_fails() {
        let texts = ["the and of", "a an the"];
        assert!(matches!(
            LexicalIndex::fit(&texts, &config()),
            Err(JmError::EmptyVocabulary(_))
        ));
    }

    #[test]
    fn vocabulary_is_capped_by_frequency() {
        let texts = ["rust rust rust tokio", "rust serde", "tokio axum"];
        let config = LexicalConfig {
            max_features: 2,
            ngram_max: 1,
        };
        let index = LexicalIndex::fit(&texts, &config).unwrap();
        assert_eq!(index.vocabulary_len(), 2);
        assert!(index.contains_term("rust"));
        assert!(index.contains_term("tokio"));
        assert!(!index.contains_term("serde"));
    }

    #[test]
    fn query_ranks_overlapping_record_first() {
        let texts = [
            "python backend engineer django rest apis",
            "frontend designer figma css",
            "machine learning engineer python tensorflow",
        ];
        let index = LexicalIndex::fit(&texts, &config()).unwrap();
        let results = index.query("Experienced Python developer with Django");
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].0, 0);
        assert_eq!(results[2].0, 1);
        assert_eq!(results[2].1, 0.0);
    }

    #[test]
    fn query_scores_are_sorted_and_bounded() {
        let texts = ["alpha beta", "beta gamma", "gamma delta", "delta alpha"];
        let index = LexicalIndex::fit(&texts, &config()).unwrap();
        let results = index.query("alpha gamma");
        for pair in results.windows(2) {
            assert!(pair[0].1 >= pair[1].1);
        }
        assert!(results.iter().all(|(_, s)| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn identical_text_scores_one() {
        let texts = ["rust systems programmer", "java enterprise developer"];
        let index = LexicalIndex::fit(&texts, &config()).unwrap();
        let results = index.query("Rust systems programmer");
        assert_eq!(results[0].0, 0);
        assert!((results[0].1 - 1.0).abs() < 1e-5);
    }

    #[test]
    fn out_of_vocabulary_query_keeps_corpus_order() {
        let texts = ["rust", "java", "scala"];
        let index = LexicalIndex::fit(&texts, &config()).unwrap();
        let results = index.query("cobol fortran");
        let order: Vec<usize> = results.iter().map(|(i, _)| *i).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }
}
