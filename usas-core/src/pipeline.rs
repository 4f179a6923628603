//! # Pipeline de Anotação — Orquestrador
//!
//! Liga o pipeline de anotação externo ao registro validado:
//!
//! 1. **Divisão** (opcional): um [`SentenceSplitter`] quebra o texto em sentenças.
//!    Sem divisor, o texto inteiro é uma unidade.
//! 2. **Anotação**: o [`Annotator`] externo anota cada unidade.
//! 3. **Extração**: atributos de cada token lidos via [`TokenAttributes`].
//! 4. **Tags**: as tags cruas do token passam pelo parser de grupos.
//! 5. **MWE**: os intervalos de todos os tokens passam pelo resolvedor.
//! 6. **Registro**: um [`TaggedText`] validado por unidade.
//!
//! Qualquer erro em um token aborta a unidade inteira (nenhum registro parcial),
//! mas não afeta as outras unidades: [`TaggedTexts`] entrega um `Result` por
//! sentença. Tags inválidas também rejeitam a unidade.
//!
//! ## Exemplo
//!
//! ```rust
//! use usas_core::{tag_text, FieldNames, JsonAnnotator};
//! use serde_json::json;
//!
//! let annotator = JsonAnnotator::new(FieldNames::default(), |text: &str| {
//!     Ok(text
//!         .split_whitespace()
//!         .map(|word| json!({"text": word, "_": {"pymusas_tags": ["Z99"], "pymusas_mwe_indexes": []}}))
//!         .collect())
//! });
//!
//! let records: Vec<_> = tag_text("Hello world", &annotator, None)
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].tokens(), ["Hello", "world"]);
//! ```

use std::ops::Range;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::attributes::{JsonToken, TokenAttributes};
use crate::config::FieldNames;
use crate::error::{Result, TaggingError};
use crate::mwe::resolve_mwe_indexes;
use crate::sentence::SentenceSplitter;
use crate::tag_group::parse_usas_tag_groups;
use crate::tagged_text::TaggedText;

/// O pipeline de anotação externo (tagger USAS, lematizador, POS).
pub trait Annotator {
    type Token: TokenAttributes;

    /// Anota um trecho de texto, devolvendo os tokens em ordem.
    fn annotate(&self, text: &str) -> Result<Vec<Self::Token>>;

    /// Fronteiras de sentença (intervalos de bytes), se o pipeline as detecta.
    fn sentence_boundaries(&self, _text: &str) -> Option<Vec<Range<usize>>> {
        None
    }

    /// Se o pipeline produz lemas. Quando `true`, todo token precisa de um.
    fn has_lemma(&self) -> bool {
        false
    }

    /// Se o pipeline produz classes gramaticais.
    fn has_pos(&self) -> bool {
        false
    }
}

impl<A: Annotator + ?Sized> Annotator for &A {
    type Token = A::Token;

    fn annotate(&self, text: &str) -> Result<Vec<Self::Token>> {
        (**self).annotate(text)
    }

    fn sentence_boundaries(&self, text: &str) -> Option<Vec<Range<usize>>> {
        (**self).sentence_boundaries(text)
    }

    fn has_lemma(&self) -> bool {
        (**self).has_lemma()
    }

    fn has_pos(&self) -> bool {
        (**self).has_pos()
    }
}

/// Adaptador para taggers que produzem um objeto JSON por token.
///
/// Os atributos são lidos pelos nomes de [`FieldNames`], compartilhados por
/// todos os tokens produzidos.
pub struct JsonAnnotator<F> {
    fields: Arc<FieldNames>,
    annotate: F,
}

impl<F> JsonAnnotator<F>
where
    F: Fn(&str) -> Result<Vec<Value>>,
{
    pub fn new(fields: FieldNames, annotate: F) -> Self {
        Self {
            fields: Arc::new(fields),
            annotate,
        }
    }

    pub fn fields(&self) -> &FieldNames {
        &self.fields
    }
}

impl<F> Annotator for JsonAnnotator<F>
where
    F: Fn(&str) -> Result<Vec<Value>>,
{
    type Token = JsonToken;

    fn annotate(&self, text: &str) -> Result<Vec<JsonToken>> {
        Ok((self.annotate)(text)?
            .into_iter()
            .map(|value| JsonToken::new(value, Arc::clone(&self.fields)))
            .collect())
    }

    fn has_lemma(&self) -> bool {
        self.fields.lemma_field.is_some()
    }

    fn has_pos(&self) -> bool {
        self.fields.pos_field.is_some()
    }
}

/// Anota `text`, produzindo um [`TaggedText`] por unidade (sentença).
///
/// O divisor roda uma vez, antes de tudo; se falhar o erro é devolvido aqui.
/// As unidades são processadas sob demanda pelo iterador retornado.
pub fn tag_text<'a, A: Annotator + ?Sized>(
    text: &str,
    annotator: &'a A,
    sentence_splitter: Option<&dyn SentenceSplitter>,
) -> Result<TaggedTexts<'a, A>> {
    let units = match sentence_splitter {
        Some(splitter) => {
            let sentences = splitter.split(text)?;
            debug!(sentences = sentences.len(), "texto dividido em sentenças");
            sentences
        }
        None => vec![text.to_string()],
    };

    Ok(TaggedTexts {
        annotator,
        units: units.into_iter(),
        position: 0,
    })
}

/// Como [`tag_text`], mas materializa tudo e para na primeira unidade com erro.
pub fn tag_text_to_vec<A: Annotator + ?Sized>(
    text: &str,
    annotator: &A,
    sentence_splitter: Option<&dyn SentenceSplitter>,
) -> Result<Vec<TaggedText>> {
    tag_text(text, annotator, sentence_splitter)?.collect()
}

/// Iterador de registros, um por unidade, na ordem do texto.
pub struct TaggedTexts<'a, A: ?Sized> {
    annotator: &'a A,
    units: std::vec::IntoIter<String>,
    position: usize,
}

impl<A: Annotator + ?Sized> Iterator for TaggedTexts<'_, A> {
    type Item = Result<TaggedText>;

    fn next(&mut self) -> Option<Self::Item> {
        let unit = self.units.next()?;
        let position = self.position;
        self.position += 1;

        let result = tag_unit(&unit, self.annotator);
        match &result {
            Ok(tagged) => trace!(unit = position, tokens = tagged.len(), "unidade anotada"),
            Err(error) => debug!(unit = position, %error, "unidade descartada"),
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.units.size_hint()
    }
}

impl<A: Annotator + ?Sized> ExactSizeIterator for TaggedTexts<'_, A> {}

/// Anota uma única unidade de texto.
pub fn tag_unit<A: Annotator + ?Sized>(text: &str, annotator: &A) -> Result<TaggedText> {
    let tokens = annotator.annotate(text)?;

    let mut words = Vec::with_capacity(tokens.len());
    let mut lemmas = annotator.has_lemma().then(|| Vec::with_capacity(tokens.len()));
    let mut pos_tags = annotator.has_pos().then(|| Vec::with_capacity(tokens.len()));
    let mut usas_tags = Vec::with_capacity(tokens.len());
    let mut mwe_ranges = Vec::with_capacity(tokens.len());

    for (i, token) in tokens.iter().enumerate() {
        words.push(token.text()?);
        if let Some(lemmas) = lemmas.as_mut() {
            lemmas.push(token.lemma()?.ok_or_else(|| missing("lemma", i))?);
        }
        if let Some(pos_tags) = pos_tags.as_mut() {
            pos_tags.push(token.pos()?.ok_or_else(|| missing("pos", i))?);
        }
        usas_tags.push(parse_usas_tag_groups(&token.usas_raw()?.join(" "))?);
        mwe_ranges.push(token.mwe_raw()?);
    }

    let mwe_indexes = resolve_mwe_indexes(&mwe_ranges)?;

    TaggedText::new(text, words, lemmas, pos_tags, usas_tags, mwe_indexes)
}

fn missing(attribute: &str, token: usize) -> TaggingError {
    TaggingError::MissingAttribute {
        attribute: format!("{} (token {})", attribute, token),
    }
}
