//! # Classificador de Intenção — Naive Bayes Multinomial
//!
//! O [`IntentClassifier`] é o **primeiro estágio** do cascade: dado o texto
//! do usuário, produz a intenção mais provável e a confiança dessa escolha
//! (a probabilidade posterior máxima sobre todas as intenções conhecidas).
//!
//! ## Modelo
//!
//! Naive Bayes multinomial sobre bag-of-words, treinado uma única vez a
//! partir do corpus na inicialização:
//!
//! ```text
//! score(c) = ln P(c) + (1/√n) · Σ_token ln P(token | c)
//! confiança = softmax(scores)[argmax]
//! ```
//!
//! - `P(c)` — prior por contagem de utterances da intenção `c`
//! - `P(token | c)` — likelihood multinomial com suavização de Laplace (α = 0.1)
//! - `n` — total de tokens da query (incluindo os desconhecidos)
//!
//! ## Tokens Fora do Vocabulário
//!
//! Tokens ausentes do vocabulário de treino **não contribuem evidência de
//! classe nenhuma** — são simplesmente pulados, nunca um erro. Eles entram
//! apenas na contagem `n` do amortecimento `1/√n`, o que reduz a confiança
//! em frases longas fora do domínio: uma sentença de nove palavras com dois
//! tokens conhecidos não deve cruzar o limiar terminal por causa deles.
//!
//! ## Desempate
//!
//! As intenções são ordenadas lexicograficamente no treino e o argmax usa
//! `>` estrito — um empate exato de probabilidade resolve para o **menor
//! id de intenção**. Determinístico e coberto por teste.

use std::collections::HashMap;

use crate::core::{Corpus, IntentId};
use crate::nlu::tokenize;

/// Suavização de Laplace das likelihoods multinomiais.
///
/// Valores altos achatam as posteriors a ponto de utterances do próprio
/// corpus não cruzarem o limiar de 0.55; 0.1 mantém o treino confiante
/// sem zerar a massa de tokens não vistos por classe.
const LAPLACE_ALPHA: f64 = 0.1;

/// Classificador de intenção treinado sobre o corpus.
///
/// Estado imutável após [`train()`](IntentClassifier::train) — seguro para
/// chamadas concorrentes a [`predict()`](IntentClassifier::predict).
pub struct IntentClassifier {
    /// Intenções conhecidas, em ordem lexicográfica (regra de desempate).
    intents: Vec<IntentId>,
    /// Vocabulário de treino: token → índice de coluna.
    vocab: HashMap<String, usize>,
    /// `ln P(c)` por intenção, alinhado com `intents`.
    log_priors: Vec<f64>,
    /// `ln P(token | c)`, indexado `[intenção][token]`, já suavizado.
    log_likelihoods: Vec<Vec<f64>>,
}

impl IntentClassifier {
    /// Treina o classificador a partir do corpus validado.
    ///
    /// Uma única passada para montar o vocabulário, uma para contar
    /// tokens por intenção. Custo O(corpus) — só roda na inicialização.
    pub fn train(corpus: &Corpus) -> Self {
        let mut intents = corpus.intents();
        // Ordem lexicográfica fixa a regra de desempate do argmax.
        intents.sort();
        let class_index: HashMap<&IntentId, usize> =
            intents.iter().enumerate().map(|(i, id)| (id, i)).collect();

        // ─── Vocabulário ─────────────────────────────────────────
        let mut vocab: HashMap<String, usize> = HashMap::new();
        for record in corpus.records() {
            for token in tokenize(&record.text) {
                let next = vocab.len();
                vocab.entry(token).or_insert(next);
            }
        }

        // ─── Contagens por intenção ──────────────────────────────
        let num_classes = intents.len();
        let vocab_size = vocab.len();
        let mut doc_counts = vec![0usize; num_classes];
        let mut token_counts = vec![vec![0usize; vocab_size]; num_classes];
        let mut token_totals = vec![0usize; num_classes];

        for record in corpus.records() {
            let c = class_index[&record.label];
            doc_counts[c] += 1;
            for token in tokenize(&record.text) {
                let ti = vocab[&token];
                token_counts[c][ti] += 1;
                token_totals[c] += 1;
            }
        }

        // ─── Priors e likelihoods em espaço log ──────────────────
        let total_docs = corpus.len() as f64;
        let log_priors = doc_counts
            .iter()
            .map(|&d| (d as f64 / total_docs).ln())
            .collect();

        let log_likelihoods = (0..num_classes)
            .map(|c| {
                let denom = token_totals[c] as f64 + LAPLACE_ALPHA * vocab_size as f64;
                token_counts[c]
                    .iter()
                    .map(|&count| ((count as f64 + LAPLACE_ALPHA) / denom).ln())
                    .collect()
            })
            .collect();

        tracing::debug!(
            intents = num_classes,
            vocab = vocab_size,
            "Classificador treinado"
        );

        Self {
            intents,
            vocab,
            log_priors,
            log_likelihoods,
        }
    }

    /// Prediz a intenção de um texto e a confiança da predição.
    ///
    /// A confiança é a posterior máxima (softmax sobre os scores das
    /// intenções), sempre em `[0, 1]`, para **qualquer** entrada:
    ///
    /// - texto vazio ou 100% fora do vocabulário degenera para os priors
    ///   (confiança = prior máximo, bem abaixo do limiar terminal);
    /// - tokens desconhecidos são pulados, nunca erro.
    pub fn predict(&self, text: &str) -> (IntentId, f64) {
        let tokens = tokenize(text);
        let mut scores = self.log_priors.clone();

        if !tokens.is_empty() {
            // Amortecimento 1/√n sobre a soma de likelihoods — calibra a
            // confiança entre utterances curtas e longas.
            let damp = 1.0 / (tokens.len() as f64).sqrt();
            for token in &tokens {
                if let Some(&ti) = self.vocab.get(token) {
                    for (c, score) in scores.iter_mut().enumerate() {
                        *score += damp * self.log_likelihoods[c][ti];
                    }
                }
            }
        }

        // Argmax com `>` estrito: empate exato fica com o menor id
        // (as intenções estão em ordem lexicográfica).
        let mut best = 0usize;
        for (c, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = c;
            }
        }

        // Posterior máxima via log-sum-exp, estável numericamente.
        let max_score = scores[best];
        let sum: f64 = scores.iter().map(|&s| (s - max_score).exp()).sum();
        let confidence = 1.0 / sum;

        (self.intents[best].clone(), confidence)
    }
}
