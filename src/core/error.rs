//! # ConfigError — Erros Fatais de Configuração
//!
//! Todos os erros deste módulo são **fatais e restritos à inicialização**:
//! surgem durante a validação da configuração carregada e abortam a
//! construção do pipeline. Nenhum deles é jamais produzido durante o
//! serving — depois que [`Orchestrator::new`](crate::orchestrator::Orchestrator::new)
//! retorna `Ok`, a resolução de utterances é infalível por tipo.

use thiserror::Error;

/// Violação de invariante na configuração carregada.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A configuração não tem nenhuma utterance de treino.
    #[error("corpus vazio: a configuração não tem nenhuma utterance de treino")]
    EmptyCorpus,

    /// Uma intenção declarada não tem utterances de treino.
    #[error("intenção '{intent}' não tem nenhuma utterance de treino")]
    NoUtterances { intent: String },

    /// Uma intenção presente no corpus não tem respostas registradas.
    #[error("intenção '{intent}' não tem nenhuma resposta registrada")]
    NoResponses { intent: String },

    /// Uma utterance de treino é vazia ou só espaços.
    #[error("intenção '{intent}' tem uma utterance em branco")]
    BlankUtterance { intent: String },

    /// Uma resposta registrada é vazia ou só espaços.
    #[error("intenção '{intent}' tem uma resposta em branco")]
    BlankResponse { intent: String },

    /// O mesmo id de intenção aparece duas vezes na configuração.
    #[error("intenção '{intent}' declarada mais de uma vez")]
    DuplicateIntent { intent: String },

    /// Um id de intenção é vazio ou só espaços.
    #[error("id de intenção em branco na configuração")]
    BlankIntentId,

    /// O `farewell_intent` configurado não existe no registry.
    #[error("farewell_intent '{intent}' não corresponde a nenhuma intenção configurada")]
    UnknownFarewellIntent { intent: String },
}
