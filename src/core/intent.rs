//! # IntentId — Identificador Validado de Intenção
//!
//! Uma intenção é uma **categoria fechada de significado** que o sistema
//! reconhece: saudação, despedida, pergunta de definição, etc. O conjunto
//! de intenções vem inteiramente da configuração carregada — nenhuma
//! intenção é hardcoded na lógica do cascade.
//!
//! O [`IntentId`] é um newtype sobre `String` que só pode ser construído
//! a partir de texto não-vazio (após trim). Isso garante que todo id que
//! circula pelo pipeline é um identificador legítimo, verificado uma única
//! vez na fronteira de configuração.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identificador de uma intenção reconhecida pelo sistema.
///
/// Ordenável (`Ord`) porque o desempate do classificador usa ordem
/// lexicográfica: quando duas intenções empatam na probabilidade máxima,
/// vence o menor id. Ver [`IntentClassifier`](crate::nlu::classifier::IntentClassifier).
///
/// A serialização é transparente — no JSON de configuração um intent
/// aparece como string simples (`"greeting"`), não como objeto.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(String);

impl IntentId {
    /// Cria um novo id a partir de texto, normalizando espaços nas bordas.
    ///
    /// Retorna `None` se o texto for vazio após trim — um id em branco
    /// nunca é um identificador válido.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// O id como `&str`, para logging e lookup em mapas.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank() {
        assert!(IntentId::new("").is_none());
        assert!(IntentId::new("   ").is_none());
    }

    #[test]
    fn trims_edges() {
        let id = IntentId::new("  greeting ").unwrap();
        assert_eq!(id.as_str(), "greeting");
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = IntentId::new("goodbye").unwrap();
        let b = IntentId::new("greeting").unwrap();
        assert!(a < b);
    }
}
