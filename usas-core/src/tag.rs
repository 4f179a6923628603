//! # Tags Semânticas USAS
//!
//! Uma tag USAS é um código discriminador (letra maiúscula + dígitos, com
//! subdivisões separadas por ponto) seguido de marcadores opcionais:
//!
//! | Marcador | Campo                      | Exemplo    |
//! |----------|----------------------------|------------|
//! | `+`      | `number_positive_markers`  | `A5.1+++`  |
//! | `-`      | `number_negative_markers`  | `N3.2-`    |
//! | `%`      | `rarity_marker_1`          | `O4.1%`    |
//! | `@`      | `rarity_marker_2`          | `S1.2@`    |
//! | `f`      | `female`                   | `S2f`      |
//! | `m`      | `male`                     | `S2m`      |
//! | `c`      | `antecedents`              | `Z8c`      |
//! | `n`      | `neuter`                   | `Z8mfn`    |
//! | `i`      | `idiom`                    | `A1.1.1i`  |
//!
//! A string `PUNCT` é uma sentinela (pontuação) e não é decomposta.
//!
//! ## Exemplo
//!
//! ```rust
//! use usas_core::tag::parse_usas_tag;
//!
//! let tag = parse_usas_tag("A5.1+++").unwrap();
//! assert_eq!(tag.tag, "A5.1");
//! assert_eq!(tag.number_positive_markers, 3);
//! assert_eq!(tag.to_string(), "A5.1+++");
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TaggingError};

/// Sentinela usada pelos taggers para tokens de pontuação.
pub const PUNCT: &str = "PUNCT";

/// Código discriminador: letra maiúscula, dígitos e subdivisões `.N`.
static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][0-9]+(?:\.[0-9]+)*").expect("valid USAS code pattern"));

/// Uma tag semântica USAS com seus marcadores decodificados.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UsasTag {
    /// Código discriminador (ex: "Z5", "A1.1.1", "PUNCT").
    pub tag: String,
    /// Quantidade de `+` (polaridade positiva).
    pub number_positive_markers: u8,
    /// Quantidade de `-` (polaridade negativa).
    pub number_negative_markers: u8,
    /// Marcador de raridade `%`.
    pub rarity_marker_1: bool,
    /// Marcador de raridade `@`.
    pub rarity_marker_2: bool,
    pub female: bool,
    pub male: bool,
    /// Potencial antecedente de anáfora conceitual (`c`).
    pub antecedents: bool,
    pub neuter: bool,
    /// Parte de uma expressão idiomática (`i`).
    pub idiom: bool,
}

impl UsasTag {
    /// Cria uma tag sem nenhum marcador.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Verdadeiro para a sentinela de pontuação.
    pub fn is_punctuation(&self) -> bool {
        self.tag == PUNCT
    }

    /// Aplica um caractere de marcador. Retorna `false` se o caractere não é um marcador.
    fn apply_marker(&mut self, marker: char) -> bool {
        match marker {
            '+' => self.number_positive_markers = self.number_positive_markers.saturating_add(1),
            '-' => self.number_negative_markers = self.number_negative_markers.saturating_add(1),
            '%' => self.rarity_marker_1 = true,
            '@' => self.rarity_marker_2 = true,
            'f' => self.female = true,
            'm' => self.male = true,
            'c' => self.antecedents = true,
            'n' => self.neuter = true,
            'i' => self.idiom = true,
            _ => return false,
        }
        true
    }
}

/// Parseia uma tag USAS compacta (ex: "A1.1.1+" → `UsasTag { tag: "A1.1.1", number_positive_markers: 1, .. }`).
///
/// Falha com [`TaggingError::TagParse`] para string vazia, código fora do padrão
/// ou marcador desconhecido.
pub fn parse_usas_tag(input: &str) -> Result<UsasTag> {
    if input == PUNCT {
        return Ok(UsasTag::new(PUNCT));
    }
    if input.is_empty() {
        return Err(tag_error(input, "empty tag"));
    }

    let code = CODE_PATTERN
        .find(input)
        .ok_or_else(|| tag_error(input, "does not start with a USAS code such as `A1.1`"))?;

    let mut tag = UsasTag::new(code.as_str());
    for marker in input[code.end()..].chars() {
        if !tag.apply_marker(marker) {
            return Err(tag_error(input, &format!("unknown marker `{}`", marker)));
        }
    }
    Ok(tag)
}

fn tag_error(input: &str, reason: &str) -> TaggingError {
    TaggingError::TagParse {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for UsasTag {
    type Err = TaggingError;

    fn from_str(s: &str) -> Result<Self> {
        parse_usas_tag(s)
    }
}

impl fmt::Display for UsasTag {
    /// Forma compacta canônica: código, `+`, `-`, `%`, `@`, `f`, `m`, `c`, `n`, `i`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)?;
        for _ in 0..self.number_positive_markers {
            f.write_str("+")?;
        }
        for _ in 0..self.number_negative_markers {
            f.write_str("-")?;
        }
        let flags = [
            (self.rarity_marker_1, '%'),
            (self.rarity_marker_2, '@'),
            (self.female, 'f'),
            (self.male, 'm'),
            (self.antecedents, 'c'),
            (self.neuter, 'n'),
            (self.idiom, 'i'),
        ];
        for (set, marker) in flags {
            if set {
                write!(f, "{}", marker)?;
            }
        }
        Ok(())
    }
}

/// Leituras alternativas (mutuamente exclusivas) de uma posição, melhor primeiro.
///
/// Na codificação de origem as alternativas são unidas por `/` (ex: "Z3/Z2").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct UsasTagGroup {
    pub tags: Vec<UsasTag>,
}

impl UsasTagGroup {
    pub fn new(tags: Vec<UsasTag>) -> Self {
        Self { tags }
    }

    /// A leitura mais bem ranqueada do grupo.
    pub fn best(&self) -> Option<&UsasTag> {
        self.tags.first()
    }

    /// Verdadeiro quando há mais de uma leitura empatada.
    pub fn is_ambiguous(&self) -> bool {
        self.tags.len() > 1
    }
}

impl fmt::Display for UsasTagGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tag) in self.tags.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", tag)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_code_has_default_markers() {
        assert_eq!(parse_usas_tag("Z5").unwrap(), UsasTag::new("Z5"));
        assert_eq!(parse_usas_tag("A1.1.1").unwrap(), UsasTag::new("A1.1.1"));
    }

    #[test]
    fn test_punct_sentinel() {
        let tag = parse_usas_tag("PUNCT").unwrap();
        assert_eq!(tag, UsasTag::new("PUNCT"));
        assert!(tag.is_punctuation());
    }

    #[test]
    fn test_polarity_markers() {
        let tag = parse_usas_tag("A5.1+++").unwrap();
        assert_eq!(tag.tag, "A5.1");
        assert_eq!(tag.number_positive_markers, 3);
        assert_eq!(tag.number_negative_markers, 0);

        let tag = parse_usas_tag("N3.2--").unwrap();
        assert_eq!(tag.number_negative_markers, 2);
    }

    #[test]
    fn test_flag_markers() {
        let tag = parse_usas_tag("Z8mfn").unwrap();
        assert_eq!(tag.tag, "Z8");
        assert!(tag.male && tag.female && tag.neuter);
        assert!(!tag.antecedents && !tag.idiom);

        let tag = parse_usas_tag("S1.2@%ci").unwrap();
        assert!(tag.rarity_marker_1 && tag.rarity_marker_2);
        assert!(tag.antecedents && tag.idiom);
    }

    #[test]
    fn test_invalid_tags() {
        for input in ["", "z5", "Z", "5Z", "PUNCTX", "Z5x", "A1.+"] {
            assert!(
                matches!(parse_usas_tag(input), Err(TaggingError::TagParse { .. })),
                "`{}` deveria falhar",
                input
            );
        }
    }

    #[test]
    fn test_display_is_canonical() {
        for input in ["Z5", "A5.1+++", "N3.2-", "S2mf", "Z8mfn", "O4.1%", "A1.1.1i", "PUNCT"] {
            let tag: UsasTag = input.parse().unwrap();
            assert_eq!(tag.to_string(), input);
        }
        // A ordem dos marcadores é normalizada
        let tag = parse_usas_tag("S2fm").unwrap();
        assert_eq!(tag.to_string(), "S2mf");
        assert_eq!(parse_usas_tag(&tag.to_string()).unwrap(), tag);
    }

    #[test]
    fn test_group_display() {
        let group = UsasTagGroup::new(vec![UsasTag::new("Z3"), parse_usas_tag("A1+").unwrap()]);
        assert_eq!(group.to_string(), "Z3/A1+");
        assert!(group.is_ambiguous());
        assert_eq!(group.best(), Some(&UsasTag::new("Z3")));
    }
}
