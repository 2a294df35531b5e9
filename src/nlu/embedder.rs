//! # Embedder — Vetores de N-grams de Caracteres
//!
//! O [`Embedder`] implementa a capacidade de similaridade semântica do
//! **segundo estágio** do cascade. Em vez de um transformer pré-treinado,
//! usa um vetorizador de **trigrams de caracteres ajustado sobre o próprio
//! corpus** — determinístico, instantâneo de construir e sem nenhum
//! download de modelo.
//!
//! ## Como Funciona
//!
//! Cada token é emoldurado com `#` e fatiado em janelas de 3 caracteres;
//! o vetor de um texto é a contagem de cada trigram **do vocabulário do
//! corpus**:
//!
//! ```text
//! "goodbye"  → #go, goo, ood, odb, dby, bye, ye#
//! "good bye" → #go, goo, ood, od#, #by, bye, ye#
//!                └──── 5 trigrams em comum ────┘  → cosseno ≈ 0.71
//! ```
//!
//! A sobreposição de sub-palavras captura proximidade lexical que o
//! bag-of-words do classificador não vê: "good bye" fica perto de
//! "goodbye" mesmo sem compartilhar um token inteiro.
//!
//! ## Fora do Vocabulário
//!
//! Trigrams ausentes do corpus não contribuem nada. Um texto inteiramente
//! fora do vocabulário produz o **vetor zero**, cuja similaridade com
//! qualquer outro vetor é definida como 0.0 pela guarda de denominador em
//! [`cosine_similarity`] — nunca NaN, nunca erro; o estágio simplesmente
//! reporta "sem match" e o cascade segue adiante.

use std::collections::HashMap;

use crate::core::Corpus;
use crate::nlu::tokenize;

/// Tamanho da janela de n-gram de caracteres.
const NGRAM_LEN: usize = 3;

/// Vetorizador de trigrams de caracteres ajustado sobre o corpus.
///
/// Imutável após [`fit()`](Embedder::fit); [`embed()`](Embedder::embed)
/// é seguro para chamadas concorrentes.
pub struct Embedder {
    /// Vocabulário ajustado: trigram → índice da dimensão.
    vocab: HashMap<String, usize>,
}

impl Embedder {
    /// Ajusta o vocabulário de trigrams sobre as utterances do corpus.
    ///
    /// O espaço vetorial resultante tem uma dimensão por trigram distinto
    /// visto no treino. Custo O(corpus) — só roda na inicialização.
    pub fn fit(corpus: &Corpus) -> Self {
        let mut vocab: HashMap<String, usize> = HashMap::new();
        for record in corpus.records() {
            for token in tokenize(&record.text) {
                for gram in char_ngrams(&token) {
                    let next = vocab.len();
                    vocab.entry(gram).or_insert(next);
                }
            }
        }
        tracing::debug!(dims = vocab.len(), "Vocabulário de trigrams ajustado");
        Self { vocab }
    }

    /// Dimensão do espaço vetorial (trigrams distintos do corpus).
    pub fn dim(&self) -> usize {
        self.vocab.len()
    }

    /// Gera o vetor de contagens de trigrams de um texto.
    ///
    /// Trigrams fora do vocabulário são ignorados; texto vazio ou 100%
    /// desconhecido produz o vetor zero.
    pub fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.vocab.len()];
        for token in tokenize(text) {
            for gram in char_ngrams(&token) {
                if let Some(&i) = self.vocab.get(&gram) {
                    vector[i] += 1.0;
                }
            }
        }
        vector
    }
}

/// Trigrams de caracteres de um token emoldurado com `#`.
///
/// "bye" → `["#by", "bye", "ye#"]`. Tokens de um caractere produzem um
/// único trigram (`"hi"` → `["#hi", "hi#"]`, `"a"` → `["#a#"]`).
fn char_ngrams(token: &str) -> Vec<String> {
    let padded: Vec<char> = std::iter::once('#')
        .chain(token.chars())
        .chain(std::iter::once('#'))
        .collect();
    padded
        .windows(NGRAM_LEN)
        .map(|w| w.iter().collect())
        .collect()
}

/// Similaridade de cosseno entre dois vetores.
///
/// Retorna 0.0 para vetores de tamanhos diferentes, vazios, ou com norma
/// zero — a guarda que faz o estágio de similaridade tratar embeddings
/// degenerados como "sem match" em vez de propagar NaN.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    // Produto escalar e normas em uma única passada
    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;
    for i in 0..a.len() {
        dot += a[i] * b[i];
        norm_a += a[i] * a[i];
        norm_b += b[i] * b[i];
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatConfig;

    fn builtin_embedder() -> Embedder {
        let validated = ChatConfig::builtin().validate().unwrap();
        Embedder::fit(&validated.corpus)
    }

    // ─── char_ngrams ───────────────────────────────────────────

    #[test]
    fn ngrams_frame_the_token() {
        assert_eq!(char_ngrams("bye"), vec!["#by", "bye", "ye#"]);
    }

    #[test]
    fn ngrams_of_single_char_token() {
        assert_eq!(char_ngrams("a"), vec!["#a#"]);
    }

    // ─── embed ─────────────────────────────────────────────────

    #[test]
    fn identical_text_has_unit_similarity() {
        let emb = builtin_embedder();
        let v = emb.embed("hello");
        let sim = cosine_similarity(&v, &v);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn lexically_close_texts_cross_the_threshold() {
        let emb = builtin_embedder();
        let sim = cosine_similarity(&emb.embed("good bye"), &emb.embed("goodbye"));
        assert!(sim > 0.70, "similaridade {:.3} deveria exceder 0.70", sim);
        assert!(sim < 0.72);
    }

    #[test]
    fn empty_text_embeds_to_zero_vector() {
        let emb = builtin_embedder();
        let v = emb.embed("");
        assert!(v.iter().all(|&x| x == 0.0));
        assert_eq!(cosine_similarity(&v, &emb.embed("hello")), 0.0);
    }

    #[test]
    fn out_of_vocabulary_text_has_zero_similarity() {
        let emb = builtin_embedder();
        let v = emb.embed("zzzz qqqq");
        assert_eq!(cosine_similarity(&v, &emb.embed("hello")), 0.0);
    }

    // ─── cosine_similarity ─────────────────────────────────────

    #[test]
    fn mismatched_or_empty_vectors_yield_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }
}
