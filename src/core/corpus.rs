//! # Corpus — Conjunto de Treino Rotulado
//!
//! O [`Corpus`] é a **fonte de verdade** do sistema: a sequência imutável
//! de pares (utterance, intenção) a partir da qual tanto o classificador
//! quanto o espaço de embeddings são construídos na inicialização.
//!
//! ## Por que a ordem importa?
//!
//! O fallback por similaridade seleciona o argmax sobre todas as utterances
//! do corpus e, em caso de empate, fica com a **primeira ocorrência na ordem
//! do corpus**. Por isso os registros ficam em um `Vec`, nunca em um mapa —
//! a posição de cada registro é parte do contrato.

use crate::core::intent::IntentId;

/// Um par (texto de treino, rótulo de intenção). Imutável após carga.
#[derive(Clone, Debug, PartialEq)]
pub struct UtteranceRecord {
    /// Texto da utterance de treino, como veio da configuração.
    pub text: String,
    /// Intenção à qual esta utterance pertence.
    pub label: IntentId,
}

/// Sequência ordenada e imutável de registros de treino.
///
/// Construído uma única vez pela validação de configuração
/// ([`ChatConfig::validate`](crate::config::ChatConfig::validate));
/// depois disso é somente leitura para todo o pipeline.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    records: Vec<UtteranceRecord>,
}

impl Corpus {
    /// Monta o corpus a partir de registros já validados.
    pub fn new(records: Vec<UtteranceRecord>) -> Self {
        Self { records }
    }

    /// Quantidade de utterances de treino.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` se o corpus não tem nenhum registro.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Itera os registros na ordem do corpus.
    pub fn records(&self) -> impl Iterator<Item = &UtteranceRecord> {
        self.records.iter()
    }

    /// Registro na posição `index`, se existir.
    pub fn get(&self, index: usize) -> Option<&UtteranceRecord> {
        self.records.get(index)
    }

    /// Intenções distintas presentes no corpus, na ordem da primeira
    /// ocorrência. Usado pela validação do registry e pelo treino do
    /// classificador.
    pub fn intents(&self) -> Vec<IntentId> {
        let mut seen = Vec::new();
        for record in &self.records {
            if !seen.contains(&record.label) {
                seen.push(record.label.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(text: &str, label: &str) -> UtteranceRecord {
        UtteranceRecord {
            text: text.to_string(),
            label: IntentId::new(label).unwrap(),
        }
    }

    #[test]
    fn intents_preserve_first_occurrence_order() {
        let corpus = Corpus::new(vec![
            record("hello", "greeting"),
            record("bye", "goodbye"),
            record("hi", "greeting"),
        ]);
        let intents = corpus.intents();
        assert_eq!(intents.len(), 2);
        assert_eq!(intents[0].as_str(), "greeting");
        assert_eq!(intents[1].as_str(), "goodbye");
    }

    #[test]
    fn positional_access() {
        let corpus = Corpus::new(vec![record("hello", "greeting")]);
        assert_eq!(corpus.get(0).unwrap().text, "hello");
        assert!(corpus.get(1).is_none());
    }
}
