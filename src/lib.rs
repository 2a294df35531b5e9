//! # Cascata — Motor de Resolução de Intenções em Cascade
//!
//! O Cascata resolve uma utterance de texto livre em **exatamente uma
//! resposta**, caindo progressivamente por estratégias de matching de
//! confiança decrescente:
//!
//! ```text
//! utterance
//!   ├── 1. Classificador de intenção  (confiança > 0.55)
//!   ├── 2. Similaridade semântica     (cosseno > 0.70, rótulo posicional)
//!   ├── 3. Entidades nomeadas         (≥ 1 entidade → enumeração)
//!   └── 4. Fallback fixo              (nunca falha)
//! ```
//!
//! Toda a inicialização cara (validação de configuração, treino do
//! classificador, ajuste do embedder, embeddings do corpus) acontece uma
//! única vez em [`Orchestrator::new`]; depois disso o pipeline é imutável,
//! `Send + Sync`, e [`Orchestrator::resolve`] é infalível por tipo.
//!
//! ## Exemplo
//!
//! ```
//! use cascata_chat::{ChatConfig, Orchestrator, Stage};
//!
//! let orchestrator = Orchestrator::with_seed(&ChatConfig::builtin(), 7)
//!     .expect("configuração embutida é válida");
//! let result = orchestrator.resolve("hello");
//! assert_eq!(result.stage, Stage::Classifier);
//! println!("{}", result.response);
//! ```
//!
//! ## Arquitetura
//!
//! | Módulo | Responsabilidade |
//! |--------|-----------------|
//! | [`core`] | Tipos do domínio: corpus, intenções, registry, resultado |
//! | [`config`] | Artefato JSON de configuração e sua validação |
//! | [`nlu`] | As três capacidades: classificador, embedder, extrator |
//! | [`orchestrator`] | O cascade de resolução em si |
//!
//! O binário (`main.rs`) é só um adaptador de fronteira: um read-loop de
//! stdin que chama [`Orchestrator::resolve`] uma vez por linha — qualquer
//! outro transporte pode substituí-lo sem tocar no pipeline.

/// Módulo `core` — tipos fundamentais: Corpus, IntentId, ResponseRegistry,
/// ResolutionResult, ConfigError.
pub mod core;

/// Módulo `config` — artefato JSON de corpus/respostas e validação.
pub mod config;

/// Módulo `nlu` — classificador de intenção, embedder e reconhecedor de
/// entidades.
pub mod nlu;

/// Módulo `orchestrator` — o cascade de resolução.
pub mod orchestrator;

// Re-exports da superfície pública principal.
pub use config::ChatConfig;
pub use core::{ConfigError, Entity, EntityKind, IntentId, ResolutionResult, Stage};
pub use orchestrator::Orchestrator;
