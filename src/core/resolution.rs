//! # ResolutionResult — O Resultado de Uma Passada pelo Cascade
//!
//! Cada utterance que entra no pipeline produz exatamente um
//! [`ResolutionResult`]: a resposta escolhida, o estágio que a produziu,
//! o score que justificou a decisão e as entidades extraídas (quando o
//! estágio de entidades foi alcançado).
//!
//! O resultado é transitório — criado por chamada, nunca persistido.
//! Não existe memória de conversa entre chamadas.

use std::fmt;

use crate::core::intent::IntentId;

/// Estágio do cascade que produziu a resposta.
///
/// | Estágio | Condição de disparo |
/// |---------|---------------------|
/// | `Classifier` | confiança do classificador > 0.55 |
/// | `Similarity` | melhor similaridade de cosseno > 0.70 |
/// | `Entity` | reconhecedor encontrou ≥ 1 entidade |
/// | `Default` | nenhum estágio anterior resolveu |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Resolvido pelo classificador de intenção.
    Classifier,
    /// Resolvido pelo fallback de similaridade semântica.
    Similarity,
    /// Resolvido pela enumeração de entidades reconhecidas.
    Entity,
    /// Fallback final — mensagem fixa de desculpas.
    Default,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Classifier => "classifier",
            Stage::Similarity => "similarity",
            Stage::Entity => "entity",
            Stage::Default => "default",
        };
        f.write_str(name)
    }
}

/// Categoria de uma entidade reconhecida no texto.
///
/// Taxonomia do reconhecedor heurístico — deliberadamente pequena.
/// A atribuição segue pistas de contexto (preposição locativa, nome de
/// mês) com `Person` como default para palavras capitalizadas; ver
/// [`EntityExtractor`](crate::nlu::extractor::EntityExtractor).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// Nome próprio de pessoa (default para capitalizadas).
    Person,
    /// Lugar — precedido por preposição locativa (in, at, from...).
    Location,
    /// Nome de mês.
    Date,
    /// Número isolado.
    Number,
    /// Trecho entre aspas ou sigla.
    Other,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Person => "PERSON",
            EntityKind::Location => "LOCATION",
            EntityKind::Date => "DATE",
            EntityKind::Number => "NUMBER",
            EntityKind::Other => "OTHER",
        };
        f.write_str(label)
    }
}

/// Uma entidade extraída: o trecho de texto e sua categoria.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Trecho exatamente como aparece no texto (capitalização preservada).
    pub text: String,
    /// Categoria atribuída pelas heurísticas do reconhecedor.
    pub kind: EntityKind,
}

/// Resultado completo da resolução de uma utterance.
#[derive(Clone, Debug)]
pub struct ResolutionResult {
    /// A resposta escolhida — sempre presente, para qualquer entrada.
    pub response: String,
    /// Estágio do cascade que terminou a resolução.
    pub stage: Stage,
    /// Intenção resolvida (estágios Classifier e Similarity).
    pub intent: Option<IntentId>,
    /// Score que justificou a decisão: confiança do classificador ou
    /// similaridade de cosseno. `None` nos estágios Entity e Default.
    pub score: Option<f32>,
    /// Entidades extraídas (vazio fora do estágio Entity).
    pub entities: Vec<Entity>,
}
