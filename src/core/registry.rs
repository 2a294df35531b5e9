//! # ResponseRegistry — Respostas Pré-Autoradas por Intenção
//!
//! Mapeia cada [`IntentId`] para um conjunto **não-vazio** de respostas
//! candidatas. O pipeline nunca gera linguagem: resolver uma intenção é
//! escolher uma dessas strings aleatoriamente.
//!
//! ## Invariante Central
//!
//! Toda intenção que aparece no corpus **precisa** ter uma entrada não-vazia
//! aqui. A verificação acontece uma única vez na inicialização
//! ([`ResponseRegistry::validate_covers`]) — nunca por chamada. Se a
//! configuração violar o invariante, a inicialização aborta com
//! [`ConfigError::NoResponses`].

use std::collections::HashMap;

use crate::core::error::ConfigError;
use crate::core::intent::IntentId;

/// Mapa intenção → respostas candidatas (ordem irrelevante).
#[derive(Clone, Debug, Default)]
pub struct ResponseRegistry {
    responses: HashMap<IntentId, Vec<String>>,
}

impl ResponseRegistry {
    /// Monta o registry a partir de entradas já desserializadas.
    pub fn new(responses: HashMap<IntentId, Vec<String>>) -> Self {
        Self { responses }
    }

    /// Respostas candidatas para uma intenção, se registrada.
    pub fn responses_for(&self, intent: &IntentId) -> Option<&[String]> {
        self.responses.get(intent).map(|r| r.as_slice())
    }

    /// `true` se a intenção tem entrada no registry.
    pub fn contains(&self, intent: &IntentId) -> bool {
        self.responses.contains_key(intent)
    }

    /// Verifica que toda intenção de `intents` tem uma entrada não-vazia.
    ///
    /// Chamado na inicialização com as intenções extraídas do corpus.
    /// Uma entrada ausente ou vazia é um erro fatal de configuração.
    pub fn validate_covers(&self, intents: &[IntentId]) -> Result<(), ConfigError> {
        for intent in intents {
            match self.responses.get(intent) {
                Some(list) if !list.is_empty() => {}
                _ => {
                    return Err(ConfigError::NoResponses {
                        intent: intent.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(id: &str) -> IntentId {
        IntentId::new(id).unwrap()
    }

    #[test]
    fn validate_accepts_covered_intents() {
        let mut map = HashMap::new();
        map.insert(intent("greeting"), vec!["Hello!".to_string()]);
        let registry = ResponseRegistry::new(map);
        assert!(registry.validate_covers(&[intent("greeting")]).is_ok());
    }

    #[test]
    fn validate_rejects_missing_intent() {
        let registry = ResponseRegistry::new(HashMap::new());
        let err = registry.validate_covers(&[intent("greeting")]).unwrap_err();
        assert!(matches!(err, ConfigError::NoResponses { .. }));
    }

    #[test]
    fn validate_rejects_empty_response_list() {
        let mut map = HashMap::new();
        map.insert(intent("greeting"), Vec::new());
        let registry = ResponseRegistry::new(map);
        let err = registry.validate_covers(&[intent("greeting")]).unwrap_err();
        assert!(matches!(err, ConfigError::NoResponses { .. }));
    }
}
