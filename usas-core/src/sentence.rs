//! # Divisão em Sentenças
//!
//! Antes de anotar, o texto pode ser dividido em sentenças; cada sentença vira
//! um [`TaggedText`](crate::TaggedText). Qualquer função
//! `Fn(&str) -> Result<Vec<String>>` serve como divisor. O crate traz dois:
//!
//! - [`UnicodeSentencizer`]: regras de fronteira de sentença do Unicode (UAX #29),
//!   sem quebrar depois de abreviações comuns ("Dr.", "Mr.", "e.g.").
//! - [`AnnotatorSentenceSplitter`]: usa a detecção de fronteiras do próprio
//!   pipeline de anotação e falha se o pipeline não a oferece, em vez de
//!   devolver o texto inteiro como uma sentença.
//!
//! ## Exemplo
//!
//! ```rust
//! use usas_core::sentence::{SentenceSplitter, UnicodeSentencizer};
//!
//! let sentences = UnicodeSentencizer::default()
//!     .split("Dr. Smith arrived. He sat down!")
//!     .unwrap();
//! assert_eq!(sentences, vec!["Dr. Smith arrived.", "He sat down!"]);
//! ```

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Result, TaggingError};
use crate::pipeline::Annotator;

/// Divide um texto em sentenças, em ordem.
pub trait SentenceSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>>;
}

impl<F> SentenceSplitter for F
where
    F: Fn(&str) -> Result<Vec<String>>,
{
    fn split(&self, text: &str) -> Result<Vec<String>> {
        self(text)
    }
}

/// Abreviações que terminam em ponto sem terminar a sentença
const ABBREVIATIONS: &[&str] = &[
    "Dr", "Dra", "Mr", "Mrs", "Ms", "Prof", "Sr", "Sra", "Jr", "St", "Mt", "Gen", "Gov",
    "Capt", "Col", "Lt", "Rev", "vs", "e.g", "i.e", "cf", "approx", "Fig",
];

/// Divisor baseado nas fronteiras de sentença do Unicode.
#[derive(Debug, Clone)]
pub struct UnicodeSentencizer {
    abbreviations: Vec<String>,
}

impl Default for UnicodeSentencizer {
    fn default() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UnicodeSentencizer {
    /// Divisor sem nenhuma abreviação conhecida.
    pub fn without_abbreviations() -> Self {
        Self {
            abbreviations: Vec::new(),
        }
    }

    pub fn add_abbreviation(&mut self, abbreviation: &str) {
        self.abbreviations
            .push(abbreviation.trim_end_matches('.').to_string());
    }

    /// Verifica se o trecho termina com uma abreviação (ex: "... Dr.")
    fn ends_with_abbreviation(&self, piece: &str) -> bool {
        let Some(stem) = piece.strip_suffix('.') else {
            return false;
        };
        let last_word = stem.rsplit(char::is_whitespace).next().unwrap_or(stem);
        self.abbreviations.iter().any(|a| a == last_word)
    }
}

impl SentenceSplitter for UnicodeSentencizer {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let mut sentences = Vec::new();
        // Início (byte) de uma sentença ainda aberta por causa de abreviação
        let mut open_start: Option<usize> = None;

        for (offset, piece) in text.split_sentence_bound_indices() {
            let start = open_start.unwrap_or(offset);
            let end = offset + piece.len();
            let candidate = text[start..end].trim();

            if candidate.is_empty() {
                open_start = None;
                continue;
            }
            if end < text.len() && self.ends_with_abbreviation(candidate) {
                open_start = Some(start);
                continue;
            }
            open_start = None;
            sentences.push(candidate.to_string());
        }

        Ok(sentences)
    }
}

/// Divisor que delega ao pipeline de anotação.
pub struct AnnotatorSentenceSplitter<'a, A: ?Sized> {
    annotator: &'a A,
}

/// Cria um divisor que usa as fronteiras detectadas por `annotator`.
pub fn annotator_sentence_splitter<A: Annotator + ?Sized>(
    annotator: &A,
) -> AnnotatorSentenceSplitter<'_, A> {
    AnnotatorSentenceSplitter { annotator }
}

impl<A: Annotator + ?Sized> SentenceSplitter for AnnotatorSentenceSplitter<'_, A> {
    fn split(&self, text: &str) -> Result<Vec<String>> {
        let boundaries = self
            .annotator
            .sentence_boundaries(text)
            .ok_or(TaggingError::SplitterCapability)?;

        let mut sentences = Vec::with_capacity(boundaries.len());
        for range in boundaries {
            let sentence = text.get(range.clone()).ok_or(TaggingError::InvalidSentenceBoundary {
                start: range.start,
                end: range.end,
                len: text.len(),
            })?;
            let sentence = sentence.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
        }
        Ok(sentences)
    }
}
