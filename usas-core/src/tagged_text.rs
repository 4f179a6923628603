//! # Registro de Texto Anotado
//!
//! [`TaggedText`] é o agregado de saída de uma unidade de texto (em geral uma
//! sentença): os tokens e, alinhadas por índice, as anotações de cada token.
//!
//! O construtor valida que todas as sequências por token têm o mesmo
//! comprimento. Não existe registro parcialmente construído: ou todas as
//! verificações passam, ou nada é criado. Depois de construído o registro é
//! somente leitura; a desserialização passa pelas mesmas verificações.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggingError};
use crate::tag::UsasTagGroup;

/// Texto anotado com tags USAS e índices de MWE, alinhados por token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedTaggedText")]
pub struct TaggedText {
    text: String,
    tokens: Vec<String>,
    lemmas: Option<Vec<String>>,
    pos_tags: Option<Vec<String>>,
    usas_tags: Vec<Vec<UsasTagGroup>>,
    mwe_indexes: Vec<BTreeSet<usize>>,
}

/// Forma serializada, antes da validação.
#[derive(Deserialize)]
struct UncheckedTaggedText {
    text: String,
    tokens: Vec<String>,
    lemmas: Option<Vec<String>>,
    pos_tags: Option<Vec<String>>,
    usas_tags: Vec<Vec<UsasTagGroup>>,
    mwe_indexes: Vec<BTreeSet<usize>>,
}

impl TryFrom<UncheckedTaggedText> for TaggedText {
    type Error = TaggingError;

    fn try_from(raw: UncheckedTaggedText) -> Result<Self> {
        TaggedText::new(
            raw.text,
            raw.tokens,
            raw.lemmas,
            raw.pos_tags,
            raw.usas_tags,
            raw.mwe_indexes,
        )
    }
}

impl TaggedText {
    /// Constrói o registro, verificando o alinhamento por token.
    ///
    /// Falha com [`TaggingError::RecordInvariant`] no primeiro campo cujo
    /// comprimento difere de `tokens.len()` (ordem: lemmas, pos_tags,
    /// usas_tags, mwe_indexes).
    pub fn new(
        text: impl Into<String>,
        tokens: Vec<String>,
        lemmas: Option<Vec<String>>,
        pos_tags: Option<Vec<String>>,
        usas_tags: Vec<Vec<UsasTagGroup>>,
        mwe_indexes: Vec<BTreeSet<usize>>,
    ) -> Result<Self> {
        let expected = tokens.len();
        let lengths = [
            ("lemmas", lemmas.as_ref().map(Vec::len)),
            ("pos_tags", pos_tags.as_ref().map(Vec::len)),
            ("usas_tags", Some(usas_tags.len())),
            ("mwe_indexes", Some(mwe_indexes.len())),
        ];
        for (field, len) in lengths {
            match len {
                Some(actual) if actual != expected => {
                    return Err(TaggingError::RecordInvariant {
                        field,
                        expected,
                        actual,
                    })
                }
                _ => {}
            }
        }

        Ok(Self {
            text: text.into(),
            tokens,
            lemmas,
            pos_tags,
            usas_tags,
            mwe_indexes,
        })
    }

    /// O trecho original do texto.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Lemas por token, se o tagger foi configurado para fornecê-los.
    pub fn lemmas(&self) -> Option<&[String]> {
        self.lemmas.as_deref()
    }

    /// Classes gramaticais por token, se configuradas.
    pub fn pos_tags(&self) -> Option<&[String]> {
        self.pos_tags.as_deref()
    }

    /// Grupos de tags USAS de cada token (melhor grupo primeiro).
    pub fn usas_tags(&self) -> &[Vec<UsasTagGroup>] {
        &self.usas_tags
    }

    /// IDs das MWEs de cada token; conjunto vazio = fora de qualquer MWE.
    pub fn mwe_indexes(&self) -> &[BTreeSet<usize>] {
        &self.mwe_indexes
    }

    /// Número de tokens.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tag::UsasTag;

    fn groups(tags: &[&str]) -> Vec<Vec<UsasTagGroup>> {
        tags.iter()
            .map(|t| vec![UsasTagGroup::new(vec![UsasTag::new(*t)])])
            .collect()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn set(ids: &[usize]) -> BTreeSet<usize> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_real_world_sentence() {
        let tokens = strings(&["The", "quick", "brown", "fox", "jumps", "over", "the", "lazy", "dog", "."]);
        let lemmas = strings(&["the", "quick", "brown", "fox", "jump", "over", "the", "lazy", "dog", "."]);
        let pos = strings(&["DET", "ADJ", "ADJ", "NOUN", "VERB", "ADP", "DET", "ADJ", "NOUN", "PUNCT"]);
        let mut usas = groups(&["Z5"; 9]);
        usas.extend(groups(&["PUNCT"]));
        let mwe = vec![
            set(&[]), set(&[1]), set(&[1]), set(&[1]), set(&[]),
            set(&[]), set(&[]), set(&[2]), set(&[2]), set(&[]),
        ];

        let tagged = TaggedText::new(
            "The quick brown fox jumps over the lazy dog.",
            tokens,
            Some(lemmas),
            Some(pos),
            usas,
            mwe,
        )
        .unwrap();

        assert_eq!(tagged.text(), "The quick brown fox jumps over the lazy dog.");
        assert_eq!(tagged.len(), 10);
        assert_eq!(tagged.mwe_indexes()[1], set(&[1]));
        assert_eq!(tagged.mwe_indexes()[7], set(&[2]));
        assert_eq!(tagged.pos_tags().unwrap()[9], "PUNCT");
    }

    #[test]
    fn test_optional_fields_none() {
        let tagged = TaggedText::new(
            "Test.",
            strings(&["Test", "."]),
            None,
            None,
            groups(&["Z5", "PUNCT"]),
            vec![set(&[]), set(&[])],
        )
        .unwrap();
        assert!(tagged.lemmas().is_none());
        assert!(tagged.pos_tags().is_none());
    }

    #[test]
    fn test_empty_record() {
        let tagged = TaggedText::new("", vec![], Some(vec![]), Some(vec![]), vec![], vec![]).unwrap();
        assert!(tagged.is_empty());
        assert_eq!(tagged.lemmas(), Some(&[][..]));
        assert!(tagged.usas_tags().is_empty());
    }

    #[test]
    fn test_length_mismatches() {
        let tokens = strings(&["Test", "."]);
        let cases = [
            ("lemmas", Some(strings(&["Test"])), Some(strings(&["NOUN", "PUNCT"])), groups(&["Z5", "PUNCT"]), 2),
            ("pos_tags", Some(strings(&["test", "."])), Some(strings(&["NOUN"])), groups(&["Z5", "PUNCT"]), 2),
            ("usas_tags", Some(strings(&["test", "."])), Some(strings(&["NOUN", "PUNCT"])), groups(&["Z5"]), 2),
            ("mwe_indexes", Some(strings(&["test", "."])), Some(strings(&["NOUN", "PUNCT"])), groups(&["Z5", "PUNCT"]), 1),
        ];

        for (field, lemmas, pos, usas, n_mwe) in cases {
            let err = TaggedText::new("Test.", tokens.clone(), lemmas, pos, usas, vec![set(&[]); n_mwe])
                .unwrap_err();
            match err {
                TaggingError::RecordInvariant { field: f, expected, actual } => {
                    assert_eq!(f, field);
                    assert_eq!(expected, 2);
                    assert_eq!(actual, 1);
                }
                other => panic!("erro inesperado: {other}"),
            }
        }
    }

    #[test]
    fn test_serde_round_trip_and_validation() {
        let tagged = TaggedText::new(
            "On the",
            strings(&["On", "the"]),
            None,
            Some(strings(&["ADP", "DET"])),
            groups(&["Z5", "Z5"]),
            vec![set(&[]), set(&[])],
        )
        .unwrap();
        let json = serde_json::to_string(&tagged).unwrap();
        let back: TaggedText = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tagged);

        let broken = json.replace(r#""tokens":["On","the"]"#, r#""tokens":["On"]"#);
        assert!(serde_json::from_str::<TaggedText>(&broken).is_err());
    }
}
