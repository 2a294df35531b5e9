//! # Módulo Core — Tipos Fundamentais do Domínio
//!
//! Este módulo agrupa os **tipos fundamentais** do motor de resolução.
//! Tudo no Cascata gira em torno deles:
//!
//! - [`IntentId`] — identificador validado de intenção (ex: "greeting")
//! - [`UtteranceRecord`] / [`Corpus`] — o conjunto de treino rotulado e ordenado
//! - [`ResponseRegistry`] — mapa intenção → respostas pré-autoradas
//! - [`Stage`] / [`ResolutionResult`] — o que cada chamada ao pipeline produz
//! - [`Entity`] / [`EntityKind`] — entidades tipadas do fallback de entidades
//! - [`ConfigError`] — violações fatais de invariantes de configuração
//!
//! ## Ciclo de Vida
//!
//! ```text
//! data/corpus.json ──validate()──► (Corpus, ResponseRegistry)   [startup, uma vez]
//!                                        │
//!                                        ▼
//!                              Orchestrator::resolve()          [por chamada]
//!                                        │
//!                                        ▼
//!                                ResolutionResult               [transitório]
//! ```
//!
//! Corpus e registry são imutáveis após a carga; cada chamada produz um
//! [`ResolutionResult`] novo e nenhum estado sobrevive entre chamadas.

/// Sub-módulo com o identificador validado [`IntentId`].
pub mod intent;

/// Sub-módulo com [`UtteranceRecord`] e [`Corpus`].
pub mod corpus;

/// Sub-módulo com o [`ResponseRegistry`] e sua validação.
pub mod registry;

/// Sub-módulo com [`Stage`], [`Entity`], [`EntityKind`] e [`ResolutionResult`].
pub mod resolution;

/// Sub-módulo com o enum de erros fatais [`ConfigError`].
pub mod error;

// Re-exports para conveniência — permite usar `crate::core::Corpus` diretamente.
pub use corpus::{Corpus, UtteranceRecord};
pub use error::ConfigError;
pub use intent::IntentId;
pub use registry::ResponseRegistry;
pub use resolution::{Entity, EntityKind, ResolutionResult, Stage};
