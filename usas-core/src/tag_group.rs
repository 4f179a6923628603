//! # Parser de Grupos de Tags
//!
//! O tagger entrega, por token, uma string com grupos separados por espaço;
//! cada grupo pode ter alternativas unidas por `/`:
//!
//! ```text
//! "Z3/Z2 A1.1.1+ PUNCT"  →  [[Z3, Z2], [A1.1.1+], [PUNCT]]
//! ```
//!
//! A ordem é significativa (melhor ranqueado primeiro) e nunca é reordenada.

use crate::error::Result;
use crate::tag::{parse_usas_tag, UsasTagGroup};

/// Parseia uma string de grupos de tags USAS.
///
/// String vazia (ou só espaços) → nenhum grupo. A primeira tag inválida
/// aborta o parse inteiro.
pub fn parse_usas_tag_groups(input: &str) -> Result<Vec<UsasTagGroup>> {
    input
        .split_whitespace()
        .map(|group| {
            group
                .split('/')
                .map(parse_usas_tag)
                .collect::<Result<Vec<_>>>()
                .map(UsasTagGroup::new)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaggingError;
    use crate::tag::UsasTag;

    #[test]
    fn test_empty_input() {
        assert!(parse_usas_tag_groups("").unwrap().is_empty());
        assert!(parse_usas_tag_groups("   ").unwrap().is_empty());
    }

    #[test]
    fn test_single_tag_groups() {
        let groups = parse_usas_tag_groups("Z5 A1.1.1+ PUNCT").unwrap();
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.tags.len() == 1));
        assert_eq!(groups[0].tags[0], UsasTag::new("Z5"));
        assert_eq!(groups[1].tags[0].tag, "A1.1.1");
        assert_eq!(groups[1].tags[0].number_positive_markers, 1);
        assert_eq!(groups[2].tags[0], UsasTag::new("PUNCT"));
    }

    #[test]
    fn test_alternatives_keep_order() {
        let groups = parse_usas_tag_groups("Z3/Z2 Z2/Z3").unwrap();
        let labels: Vec<String> = groups.iter().map(|g| g.to_string()).collect();
        assert_eq!(labels, vec!["Z3/Z2", "Z2/Z3"]);
    }

    #[test]
    fn test_invalid_alternative_fails() {
        let err = parse_usas_tag_groups("Z5 Z3/bad").unwrap_err();
        assert!(matches!(err, TaggingError::TagParse { ref input, .. } if input == "bad"));
    }

    #[test]
    fn test_empty_alternative_fails() {
        assert!(parse_usas_tag_groups("Z3/").is_err());
    }
}
