//! # Configuração — Corpus e Respostas como Artefato Carregado
//!
//! O corpus de treino e o registry de respostas **não são constantes no
//! código**: vivem em um artefato JSON (`data/corpus.json`) carregado na
//! inicialização. Isso permite trocar o domínio do bot (ou testar com
//! corpora sintéticos) sem recompilar.
//!
//! ## Formato do Artefato
//!
//! ```text
//! {
//!   "intents": [
//!     { "id": "greeting",
//!       "utterances": ["hello", "hi", ...],
//!       "responses": ["Hello! ...", ...] },
//!     ...
//!   ],
//!   "fallback_response": "I'm not sure how to answer that, ...",
//!   "farewell_intent": "goodbye"
//! }
//! ```
//!
//! As utterances são achatadas na ordem do arquivo para formar o corpus —
//! a posição resultante é a que o fallback de similaridade usa no desempate.
//!
//! ## Cópia Embutida
//!
//! Uma cópia do artefato é embutida no binário via `include_str!`. O
//! `main.rs` tenta carregar do disco e cai para a cópia embutida se o
//! arquivo não existir — o binário funciona em qualquer diretório.
//!
//! ## Validação
//!
//! [`ChatConfig::validate`] verifica todos os invariantes de configuração
//! de uma vez (corpus não-vazio, toda intenção com utterances e respostas,
//! nada em branco, ids únicos, farewell conhecido) e só então produz os
//! tipos imutáveis do domínio. Erro aqui é fatal — nunca por chamada.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{ConfigError, Corpus, IntentId, ResponseRegistry, UtteranceRecord};

/// Cópia embutida do artefato de configuração padrão.
const BUILTIN_CONFIG: &str = include_str!("../data/corpus.json");

/// Mensagem de fallback usada quando a configuração não define uma.
fn default_fallback_response() -> String {
    "I'm not sure how to answer that, but I'm learning every day!".to_string()
}

/// Uma intenção na configuração: id, utterances de treino e respostas.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IntentEntry {
    /// Identificador da intenção (ex: "greeting").
    pub id: String,
    /// Utterances de treino desta intenção, na ordem do arquivo.
    pub utterances: Vec<String>,
    /// Respostas candidatas desta intenção.
    pub responses: Vec<String>,
}

/// O artefato de configuração completo, como desserializado do JSON.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Intenções declaradas, com treino e respostas.
    pub intents: Vec<IntentEntry>,
    /// Mensagem do fallback final (estágio Default).
    #[serde(default = "default_fallback_response")]
    pub fallback_response: String,
    /// Intenção usada pelo loop host para responder aos sentinelas de
    /// saída (`quit`/`exit`/`bye`). Opcional; validada se presente.
    #[serde(default)]
    pub farewell_intent: Option<String>,
}

/// Configuração validada: os tipos imutáveis que o pipeline consome.
#[derive(Clone, Debug)]
pub struct ValidatedConfig {
    /// Corpus ordenado de treino.
    pub corpus: Corpus,
    /// Registry de respostas por intenção.
    pub registry: ResponseRegistry,
    /// Mensagem do fallback final.
    pub fallback_response: String,
    /// Intenção de despedida para o loop host, se configurada.
    pub farewell_intent: Option<IntentId>,
}

impl ChatConfig {
    /// Carrega a configuração de um arquivo JSON no disco.
    ///
    /// # Erros
    ///
    /// Retorna erro se o arquivo não puder ser lido ou se o JSON for
    /// incompatível com o formato esperado.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Falha ao ler {}", path.display()))?;
        let config: ChatConfig = serde_json::from_str(&json)
            .with_context(|| format!("Falha ao desserializar {}", path.display()))?;
        Ok(config)
    }

    /// A configuração padrão embutida no binário.
    pub fn builtin() -> Self {
        // O artefato embutido é verificado em teste — parse não falha.
        serde_json::from_str(BUILTIN_CONFIG).expect("artefato embutido é JSON válido")
    }

    /// Valida todos os invariantes e produz os tipos do domínio.
    ///
    /// Verificações, nesta ordem por intenção declarada:
    /// id não-branco e único, ≥ 1 utterance, nenhuma utterance em branco,
    /// ≥ 1 resposta, nenhuma resposta em branco. Depois: corpus global
    /// não-vazio, cobertura do registry sobre as intenções do corpus, e
    /// `farewell_intent` (se presente) registrado.
    ///
    /// # Erros
    ///
    /// A primeira violação encontrada, como [`ConfigError`]. Todos são
    /// fatais — a inicialização do pipeline aborta.
    pub fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        let mut records = Vec::new();
        let mut responses: HashMap<IntentId, Vec<String>> = HashMap::new();

        for entry in &self.intents {
            let intent = IntentId::new(&entry.id).ok_or(ConfigError::BlankIntentId)?;
            if responses.contains_key(&intent) {
                return Err(ConfigError::DuplicateIntent {
                    intent: intent.to_string(),
                });
            }

            if entry.utterances.is_empty() {
                return Err(ConfigError::NoUtterances {
                    intent: intent.to_string(),
                });
            }
            for utterance in &entry.utterances {
                if utterance.trim().is_empty() {
                    return Err(ConfigError::BlankUtterance {
                        intent: intent.to_string(),
                    });
                }
                records.push(UtteranceRecord {
                    text: utterance.clone(),
                    label: intent.clone(),
                });
            }

            if entry.responses.is_empty() {
                return Err(ConfigError::NoResponses {
                    intent: intent.to_string(),
                });
            }
            for response in &entry.responses {
                if response.trim().is_empty() {
                    return Err(ConfigError::BlankResponse {
                        intent: intent.to_string(),
                    });
                }
            }
            responses.insert(intent, entry.responses.clone());
        }

        if records.is_empty() {
            return Err(ConfigError::EmptyCorpus);
        }

        let corpus = Corpus::new(records);
        let registry = ResponseRegistry::new(responses);
        // Invariante central: toda intenção do corpus tem resposta.
        registry.validate_covers(&corpus.intents())?;

        let farewell_intent = match &self.farewell_intent {
            Some(raw) => {
                let intent = IntentId::new(raw).ok_or(ConfigError::BlankIntentId)?;
                if !registry.contains(&intent) {
                    return Err(ConfigError::UnknownFarewellIntent {
                        intent: intent.to_string(),
                    });
                }
                Some(intent)
            }
            None => None,
        };

        Ok(ValidatedConfig {
            corpus,
            registry,
            fallback_response: self.fallback_response.clone(),
            farewell_intent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, utterances: &[&str], responses: &[&str]) -> IntentEntry {
        IntentEntry {
            id: id.to_string(),
            utterances: utterances.iter().map(|s| s.to_string()).collect(),
            responses: responses.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn config_with(intents: Vec<IntentEntry>) -> ChatConfig {
        ChatConfig {
            intents,
            fallback_response: default_fallback_response(),
            farewell_intent: None,
        }
    }

    // ─── artefato embutido ─────────────────────────────────────

    #[test]
    fn builtin_parses_and_validates() {
        let validated = ChatConfig::builtin().validate().unwrap();
        assert_eq!(validated.corpus.len(), 17);
        assert_eq!(validated.corpus.intents().len(), 6);
        assert_eq!(validated.farewell_intent.unwrap().as_str(), "goodbye");
    }

    #[test]
    fn builtin_corpus_preserves_file_order() {
        let validated = ChatConfig::builtin().validate().unwrap();
        assert_eq!(validated.corpus.get(0).unwrap().text, "hello");
        assert_eq!(validated.corpus.get(16).unwrap().text, "see you later");
    }

    // ─── validação ─────────────────────────────────────────────

    #[test]
    fn rejects_empty_config() {
        let err = config_with(vec![]).validate().unwrap_err();
        assert_eq!(err, ConfigError::EmptyCorpus);
    }

    #[test]
    fn rejects_intent_without_utterances() {
        let cfg = config_with(vec![entry("greeting", &[], &["Hello!"])]);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::NoUtterances { .. }
        ));
    }

    #[test]
    fn rejects_intent_without_responses() {
        let cfg = config_with(vec![entry("greeting", &["hello"], &[])]);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::NoResponses { .. }
        ));
    }

    #[test]
    fn rejects_blank_utterance() {
        let cfg = config_with(vec![entry("greeting", &["hello", "  "], &["Hello!"])]);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::BlankUtterance { .. }
        ));
    }

    #[test]
    fn rejects_duplicate_intent() {
        let cfg = config_with(vec![
            entry("greeting", &["hello"], &["Hello!"]),
            entry("greeting", &["hi"], &["Hi!"]),
        ]);
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::DuplicateIntent { .. }
        ));
    }

    #[test]
    fn rejects_unknown_farewell_intent() {
        let mut cfg = config_with(vec![entry("greeting", &["hello"], &["Hello!"])]);
        cfg.farewell_intent = Some("goodbye".to_string());
        assert!(matches!(
            cfg.validate().unwrap_err(),
            ConfigError::UnknownFarewellIntent { .. }
        ));
    }

    // ─── carga de arquivo ──────────────────────────────────────

    #[test]
    fn load_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus.json");
        let json = serde_json::to_string_pretty(&ChatConfig::builtin()).unwrap();
        std::fs::write(&path, json).unwrap();

        let loaded = ChatConfig::load(&path).unwrap();
        let validated = loaded.validate().unwrap();
        assert_eq!(validated.corpus.len(), 17);
    }

    #[test]
    fn load_fails_on_missing_file() {
        assert!(ChatConfig::load("data/nao-existe.json").is_err());
    }
}
