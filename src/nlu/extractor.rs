//! # Reconhecedor de Entidades — Heurísticas para Inglês
//!
//! O [`EntityExtractor`] implementa o **terceiro estágio** do cascade:
//! quando nem o classificador nem a similaridade resolveram, o sistema
//! procura entidades nomeadas no texto e, se encontrar, responde
//! enumerando-as.
//!
//! ## Estratégias de Extração
//!
//! Três padrões compilados uma única vez, aplicados sobre o texto cru:
//!
//! | Padrão | Exemplo | Categoria |
//! |--------|---------|-----------|
//! | Texto entre aspas | `"machine learning"` | `Other` |
//! | Palavras capitalizadas (runs) | `John`, `New York` | por contexto |
//! | Números isolados | `42`, `3.14` | `Number` |
//!
//! ## Atribuição de Categoria (capitalizadas)
//!
//! Decidida por pistas de contexto, nesta ordem:
//!
//! 1. nome de mês → `Date`
//! 2. token anterior é preposição locativa (in, at, from, near) → `Location`
//! 3. default → `Person`
//!
//! A lista de preposições é deliberadamente conservadora: "to" fica de
//! fora porque aparece com pessoas ("talked to John") tão frequentemente
//! quanto com lugares.
//!
//! ## Filtros
//!
//! - Palavra capitalizada no **início do texto** é ignorada — em inglês
//!   toda sentença começa maiúscula, o que não é sinal de nome próprio.
//! - Palavras funcionais capitalizadas (The, What, She...) são filtradas
//!   por uma lista de stopwords.
//! - Deduplicação case-insensitive: a primeira ocorrência vence.
//! - O resultado final sai ordenado pela posição de aparição no texto.

use regex::Regex;

use crate::core::{Entity, EntityKind};

/// Palavras funcionais do inglês que aparecem capitalizadas sem serem
/// nomes próprios. Filtradas da estratégia de capitalizadas.
///
/// A lista inclui também interjeições de saudação ("Hello", "Hey") que
/// tendem a aparecer capitalizadas no meio de frases de chat.
const STOPWORDS: &[&str] = &[
    "the", "a", "an", "my", "your", "his", "her", "its", "our", "their", "he", "she", "it",
    "we", "you", "they", "this", "that", "these", "those", "there", "here", "what", "who",
    "whom", "whose", "which", "when", "where", "why", "how", "and", "or", "but", "if", "so",
    "then", "is", "are", "was", "were", "am", "be", "been", "do", "does", "did", "have",
    "has", "had", "can", "could", "will", "would", "shall", "should", "might", "must",
    "not", "no", "yes", "please", "hello", "hi", "hey", "ok", "okay",
];

/// Nomes de meses — categorizados como `Date`.
const MONTHS: &[&str] = &[
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december",
];

/// Preposições locativas — o token anterior sendo uma delas marca a
/// capitalizada seguinte como `Location`.
const LOCATIVE_PREPOSITIONS: &[&str] = &["in", "at", "from", "near"];

/// Reconhecedor de entidades por regex + heurísticas de contexto.
///
/// As regexes são compiladas uma única vez na construção e reutilizadas
/// em todas as chamadas a [`recognize()`](EntityExtractor::recognize).
pub struct EntityExtractor {
    /// Captura texto entre aspas retas ou curvas.
    quoted_re: Regex,
    /// Captura runs de palavras capitalizadas: "John", "New York".
    capitalized_re: Regex,
    /// Captura números isolados, com decimal opcional.
    number_re: Regex,
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityExtractor {
    /// Cria um novo reconhecedor com os padrões compilados.
    pub fn new() -> Self {
        Self {
            quoted_re: Regex::new(r#""([^"]+)"|“([^”]+)”"#).expect("regex de aspas válida"),
            capitalized_re: Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b")
                .expect("regex de capitalizadas válida"),
            number_re: Regex::new(r"\b\d+(?:[.,]\d+)?\b").expect("regex de números válida"),
        }
    }

    /// Reconhece entidades em um texto, na ordem de aparição.
    ///
    /// Retorna `Vec` possivelmente vazio — nunca erro, para qualquer
    /// entrada. Cada entidade carrega o trecho original (capitalização
    /// preservada) e a categoria atribuída pelas heurísticas.
    pub fn recognize(&self, text: &str) -> Vec<Entity> {
        // (posição, entidade) — ordenado no final pela posição.
        let mut found: Vec<(usize, Entity)> = Vec::new();

        // ─── 1. Texto entre aspas ────────────────────────────────
        let mut quoted_spans: Vec<(usize, usize)> = Vec::new();
        for caps in self.quoted_re.captures_iter(text) {
            let m = caps.get(0).expect("grupo 0 sempre presente");
            quoted_spans.push((m.start(), m.end()));
            if let Some(inner) = caps.get(1).or_else(|| caps.get(2)) {
                if inner.as_str().trim().len() > 1 {
                    found.push((
                        m.start(),
                        Entity {
                            text: inner.as_str().trim().to_string(),
                            kind: EntityKind::Other,
                        },
                    ));
                }
            }
        }
        let inside_quotes =
            |start: usize| quoted_spans.iter().any(|&(qs, qe)| start >= qs && start < qe);

        // ─── 2. Runs de palavras capitalizadas ───────────────────
        for m in self.capitalized_re.find_iter(text) {
            // Início de texto: capitalização de sentença, não nome próprio.
            if m.start() == 0 || inside_quotes(m.start()) {
                continue;
            }
            let candidate = m.as_str();
            let lower = candidate.to_lowercase();
            if !candidate.contains(' ') && STOPWORDS.contains(&lower.as_str()) {
                continue;
            }
            let kind = self.kind_for(text, m.start(), &lower);
            found.push((
                m.start(),
                Entity {
                    text: candidate.to_string(),
                    kind,
                },
            ));
        }

        // ─── 3. Números isolados ─────────────────────────────────
        for m in self.number_re.find_iter(text) {
            if inside_quotes(m.start()) {
                continue;
            }
            found.push((
                m.start(),
                Entity {
                    text: m.as_str().to_string(),
                    kind: EntityKind::Number,
                },
            ));
        }

        // ─── Ordenação por aparição + dedup case-insensitive ─────
        found.sort_by_key(|(start, _)| *start);
        let mut seen = std::collections::HashSet::new();
        let mut entities = Vec::new();
        for (_, entity) in found {
            if seen.insert(entity.text.to_lowercase()) {
                entities.push(entity);
            }
        }

        if !entities.is_empty() {
            tracing::debug!(count = entities.len(), "Entidades reconhecidas");
        }
        entities
    }

    /// Categoria de uma capitalizada pela pista de contexto.
    fn kind_for(&self, text: &str, start: usize, lower: &str) -> EntityKind {
        // Mês tem prioridade sobre a pista de preposição ("in March").
        let first_word = lower.split_whitespace().next().unwrap_or(lower);
        if MONTHS.contains(&first_word) {
            return EntityKind::Date;
        }
        if let Some(prev) = previous_token(text, start) {
            if LOCATIVE_PREPOSITIONS.contains(&prev.as_str()) {
                return EntityKind::Location;
            }
        }
        EntityKind::Person
    }
}

/// Último token alfanumérico antes da posição `start`, em minúsculas.
fn previous_token(text: &str, start: usize) -> Option<String> {
    let token: String = text[..start]
        .split_whitespace()
        .last()?
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str) -> Vec<Entity> {
        EntityExtractor::new().recognize(text)
    }

    // ─── cenário central ───────────────────────────────────────

    #[test]
    fn person_and_location_in_order_of_appearance() {
        let entities = recognize("My name is John and I live in Paris");
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].text, "John");
        assert_eq!(entities[0].kind, EntityKind::Person);
        assert_eq!(entities[1].text, "Paris");
        assert_eq!(entities[1].kind, EntityKind::Location);
    }

    // ─── filtros ───────────────────────────────────────────────

    #[test]
    fn empty_and_plain_text_yield_nothing() {
        assert!(recognize("").is_empty());
        assert!(recognize("nothing capitalized here").is_empty());
    }

    #[test]
    fn sentence_initial_capital_is_ignored() {
        assert!(recognize("Berlin is nice").is_empty());
    }

    #[test]
    fn capitalized_stopwords_are_filtered_out() {
        assert!(recognize("and What about This one").is_empty());
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        let entities = recognize("I met John and John again");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "John");
    }

    // ─── categorias ────────────────────────────────────────────

    #[test]
    fn month_wins_over_preposition_cue() {
        let entities = recognize("We met in March");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Date);
    }

    #[test]
    fn locative_preposition_marks_location() {
        let entities = recognize("She works at Globex");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Globex");
        assert_eq!(entities[0].kind, EntityKind::Location);
    }

    #[test]
    fn capitalized_run_stays_joined() {
        let entities = recognize("I moved from New York yesterday");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "New York");
        assert_eq!(entities[0].kind, EntityKind::Location);
    }

    #[test]
    fn quoted_text_is_other() {
        let entities = recognize("tell me about \"machine learning\" today");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "machine learning");
        assert_eq!(entities[0].kind, EntityKind::Other);
    }

    #[test]
    fn standalone_number_is_number() {
        let entities = recognize("I have 3 cats");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "3");
        assert_eq!(entities[0].kind, EntityKind::Number);
    }
}
