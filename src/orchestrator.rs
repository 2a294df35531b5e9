//! # Orquestrador — O Cascade de Resolução
//!
//! O [`Orchestrator`] é o **coração do sistema**: coordena as três
//! capacidades de entendimento em ordem estrita de confiança decrescente
//! e garante exatamente uma resposta por utterance.
//!
//! ## O Cascade
//!
//! ```text
//! Utterance do usuário
//!   │  (normalização NFC)
//!   ├── 1. CLASSIFICADOR
//!   │   └── confiança > 0.55? → resposta aleatória da intenção ✓
//!   ├── 2. SIMILARIDADE
//!   │   └── melhor cosseno vs. corpus > 0.70?
//!   │       → rótulo posicional do match → resposta aleatória ✓
//!   ├── 3. ENTIDADES
//!   │   └── reconheceu ≥ 1? → resposta enumerando (texto, categoria) ✓
//!   └── 4. DEFAULT
//!       └── mensagem fixa de fallback ✓ (nunca falha)
//! ```
//!
//! Estados `S0 → S1 → S2 → S3 → Terminal`: o primeiro predicado
//! satisfeito encerra a passada; nenhum estado é revisitado. Os limiares
//! usam comparação **estrita** — confiança exatamente 0.55 ou similaridade
//! exatamente 0.70 não disparam o estágio.
//!
//! ## Determinismo
//!
//! A resolução é uma função pura de (utterance, corpus, modelo, registry),
//! exceto o sorteio final da resposta. O RNG fica isolado atrás de um
//! `Mutex` e é semeável via [`Orchestrator::with_seed`] — dois pipelines
//! com a mesma semente produzem exatamente o mesmo resultado.
//!
//! ## Concorrência
//!
//! Todo o estado pesado (classificador treinado, embeddings do corpus) é
//! construído em [`Orchestrator::new`] e imutável depois disso.
//! [`resolve()`](Orchestrator::resolve) toma `&self` e é seguro para
//! chamadores concorrentes; o único estado mutável é o cursor do RNG,
//! protegido pelo seu próprio lock.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use unicode_normalization::UnicodeNormalization;

use crate::config::ChatConfig;
use crate::core::{
    ConfigError, Corpus, Entity, IntentId, ResolutionResult, ResponseRegistry, Stage,
};
use crate::nlu::classifier::IntentClassifier;
use crate::nlu::embedder::{cosine_similarity, Embedder};
use crate::nlu::extractor::EntityExtractor;

/// Limiar terminal do estágio de classificação (comparação estrita).
pub const CLASSIFIER_CONFIDENCE_THRESHOLD: f64 = 0.55;

/// Limiar terminal do estágio de similaridade (comparação estrita).
pub const SIMILARITY_THRESHOLD: f32 = 0.70;

/// O estágio de classificação é terminal para esta confiança?
fn classifier_hit(confidence: f64) -> bool {
    confidence > CLASSIFIER_CONFIDENCE_THRESHOLD
}

/// O estágio de similaridade é terminal para este score?
fn similarity_hit(score: f32) -> bool {
    score > SIMILARITY_THRESHOLD
}

/// O pipeline de resolução completo, imutável após construção.
///
/// Agrega corpus, registry, classificador treinado, embedder ajustado
/// (com os embeddings do corpus pré-computados), reconhecedor de
/// entidades e o RNG do sorteio de respostas.
pub struct Orchestrator {
    /// Corpus ordenado — consultado pelo rótulo posicional do estágio 2.
    corpus: Corpus,
    /// Respostas pré-autoradas por intenção.
    registry: ResponseRegistry,
    /// Mensagem do estágio Default.
    fallback_response: String,
    /// Intenção de despedida para o loop host (sentinelas).
    farewell_intent: Option<IntentId>,
    /// Classificador Naive Bayes treinado sobre o corpus.
    classifier: IntentClassifier,
    /// Vetorizador de trigrams ajustado sobre o corpus.
    embedder: Embedder,
    /// Embedding de cada utterance do corpus, na ordem do corpus.
    corpus_embeddings: Vec<Vec<f32>>,
    /// Reconhecedor heurístico de entidades.
    extractor: EntityExtractor,
    /// RNG do sorteio de respostas — único estado mutável do pipeline.
    rng: Mutex<StdRng>,
}

impl Orchestrator {
    /// Constrói o pipeline a partir da configuração, com RNG do sistema.
    ///
    /// Executa toda a fase cara de inicialização: validação, treino do
    /// classificador, ajuste do embedder e pré-computação dos embeddings
    /// do corpus. Esta é a única fase do sistema autorizada a ser lenta.
    ///
    /// # Erros
    ///
    /// [`ConfigError`] se a configuração violar qualquer invariante
    /// (corpus vazio, intenção sem respostas, etc.). Fatal — nunca
    /// acontece por chamada depois que `new` retorna `Ok`.
    pub fn new(config: &ChatConfig) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::from_os_rng())
    }

    /// Constrói o pipeline com uma semente fixa para o sorteio.
    ///
    /// Dois pipelines com a mesma configuração e a mesma semente resolvem
    /// a mesma utterance para o mesmo resultado — é a porta de entrada
    /// dos testes determinísticos.
    pub fn with_seed(config: &ChatConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: &ChatConfig, rng: StdRng) -> Result<Self, ConfigError> {
        let validated = config.validate()?;

        let classifier = IntentClassifier::train(&validated.corpus);
        let embedder = Embedder::fit(&validated.corpus);
        let corpus_embeddings = validated
            .corpus
            .records()
            .map(|record| embedder.embed(&record.text))
            .collect();

        tracing::info!(
            utterances = validated.corpus.len(),
            intents = validated.corpus.intents().len(),
            dims = embedder.dim(),
            "Pipeline de resolução inicializado"
        );

        Ok(Self {
            corpus: validated.corpus,
            registry: validated.registry,
            fallback_response: validated.fallback_response,
            farewell_intent: validated.farewell_intent,
            classifier,
            embedder,
            corpus_embeddings,
            extractor: EntityExtractor::new(),
            rng: Mutex::new(rng),
        })
    }

    /// Resolve uma utterance em exatamente uma resposta.
    ///
    /// Infalível por tipo: **qualquer** string de entrada — vazia,
    /// fora do vocabulário, adversarial — produz um [`ResolutionResult`];
    /// entradas degeneradas caem de estágio em estágio até o fallback.
    pub fn resolve(&self, utterance: &str) -> ResolutionResult {
        // Normalização Unicode NFC — representação canônica de acentos
        // antes de qualquer tokenização.
        let text: String = utterance.nfc().collect();

        // ─── Estágio 1: Classificador ────────────────────────────
        let (intent, confidence) = self.classifier.predict(&text);
        if classifier_hit(confidence) {
            tracing::debug!(
                intent = %intent,
                confidence = %format!("{:.3}", confidence),
                "Resolvido pelo classificador"
            );
            return ResolutionResult {
                response: self.pick_response(&intent),
                stage: Stage::Classifier,
                intent: Some(intent),
                score: Some(confidence as f32),
                entities: Vec::new(),
            };
        }
        tracing::debug!(
            confidence = %format!("{:.3}", confidence),
            "Classificador inconclusivo, caindo para similaridade"
        );

        // ─── Estágio 2: Similaridade semântica ───────────────────
        // Argmax sobre o corpus inteiro; `>` estrito mantém a primeira
        // ocorrência na ordem do corpus em caso de empate.
        let query = self.embedder.embed(&text);
        let mut best: Option<(usize, f32)> = None;
        for (index, embedding) in self.corpus_embeddings.iter().enumerate() {
            let score = cosine_similarity(&query, embedding);
            if best.map_or(true, |(_, b)| score > b) {
                best = Some((index, score));
            }
        }
        if let Some((index, score)) = best {
            if similarity_hit(score) {
                if let Some(record) = self.corpus.get(index) {
                    // Rótulo posicional do match — nunca uma reclassificação.
                    let matched = record.label.clone();
                    tracing::debug!(
                        matched = %record.text,
                        intent = %matched,
                        score = %format!("{:.3}", score),
                        "Resolvido por similaridade"
                    );
                    return ResolutionResult {
                        response: self.pick_response(&matched),
                        stage: Stage::Similarity,
                        intent: Some(matched),
                        score: Some(score),
                        entities: Vec::new(),
                    };
                }
            }
        }

        // ─── Estágio 3: Entidades ────────────────────────────────
        let entities = self.extractor.recognize(&text);
        if !entities.is_empty() {
            let response = describe_entities(&entities);
            tracing::debug!(count = entities.len(), "Resolvido por entidades");
            return ResolutionResult {
                response,
                stage: Stage::Entity,
                intent: None,
                score: None,
                entities,
            };
        }

        // ─── Estágio 4: Fallback final ───────────────────────────
        tracing::debug!("Nenhum estágio resolveu, usando fallback");
        ResolutionResult {
            response: self.fallback_response.clone(),
            stage: Stage::Default,
            intent: None,
            score: None,
            entities: Vec::new(),
        }
    }

    /// Resposta aleatória de uma intenção registrada, se existir.
    ///
    /// Exposto para o loop host responder aos sentinelas de saída com a
    /// intenção de despedida sem passar pelo cascade.
    pub fn random_response_for(&self, intent: &IntentId) -> Option<String> {
        let responses = self.registry.responses_for(intent)?;
        let index = self.rng.lock().random_range(0..responses.len());
        Some(responses[index].clone())
    }

    /// Resposta de despedida para os sentinelas do loop host.
    ///
    /// Sorteia da intenção configurada em `farewell_intent`; sem ela,
    /// devolve a mensagem de fallback.
    pub fn farewell_response(&self) -> String {
        self.farewell_intent
            .as_ref()
            .and_then(|intent| self.random_response_for(intent))
            .unwrap_or_else(|| self.fallback_response.clone())
    }

    /// Sorteia uma resposta da intenção, com a garantia do registry.
    fn pick_response(&self, intent: &IntentId) -> String {
        // A validação de startup garante entrada não-vazia para toda
        // intenção do corpus; o fallback cobre o impossível sem pânico.
        self.random_response_for(intent)
            .unwrap_or_else(|| self.fallback_response.clone())
    }
}

/// Sintetiza a resposta do estágio de entidades, preservando todos os
/// pares (texto, categoria) na ordem de aparição.
fn describe_entities(entities: &[Entity]) -> String {
    let listing = entities
        .iter()
        .map(|e| format!("{} ({})", e.text, e.kind))
        .collect::<Vec<_>>()
        .join(", ");
    format!("I found these entities in your message: {}", listing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator() -> Orchestrator {
        Orchestrator::with_seed(&ChatConfig::builtin(), 7).unwrap()
    }

    // ─── limiares (comparação estrita) ─────────────────────────

    #[test]
    fn classifier_threshold_boundary_is_not_a_hit() {
        assert!(!classifier_hit(0.55));
        assert!(classifier_hit(0.55 + 1e-9));
        assert!(!classifier_hit(0.0));
        assert!(classifier_hit(1.0));
    }

    #[test]
    fn similarity_threshold_boundary_is_not_a_hit() {
        assert!(!similarity_hit(0.70));
        assert!(similarity_hit(0.70 + 1e-6));
        assert!(!similarity_hit(0.0));
    }

    // ─── estágios do cascade ───────────────────────────────────

    #[test]
    fn greeting_resolves_at_classifier_stage() {
        let result = orchestrator().resolve("hello");
        assert_eq!(result.stage, Stage::Classifier);
        assert_eq!(result.intent.unwrap().as_str(), "greeting");
        assert!(result.score.unwrap() > 0.55);
        assert!(result.entities.is_empty());
    }

    #[test]
    fn near_farewell_resolves_at_similarity_stage() {
        let result = orchestrator().resolve("good bye friend");
        assert_eq!(result.stage, Stage::Similarity);
        assert_eq!(result.intent.unwrap().as_str(), "goodbye");
        assert!(result.score.unwrap() > 0.70);
    }

    #[test]
    fn entity_sentence_resolves_at_entity_stage() {
        let result = orchestrator().resolve("My name is John and I live in Paris");
        assert_eq!(result.stage, Stage::Entity);
        assert_eq!(result.entities.len(), 2);
        assert!(result.response.contains("John (PERSON)"));
        assert!(result.response.contains("Paris (LOCATION)"));
        assert!(result.intent.is_none());
    }

    #[test]
    fn empty_utterance_falls_to_default() {
        let result = orchestrator().resolve("");
        assert_eq!(result.stage, Stage::Default);
        assert_eq!(
            result.response,
            "I'm not sure how to answer that, but I'm learning every day!"
        );
    }

    // ─── determinismo ──────────────────────────────────────────

    #[test]
    fn same_seed_yields_same_resolution() {
        let config = ChatConfig::builtin();
        let a = Orchestrator::with_seed(&config, 42).unwrap();
        let b = Orchestrator::with_seed(&config, 42).unwrap();
        for utterance in ["hello", "good bye friend", "what is NLP", ""] {
            let ra = a.resolve(utterance);
            let rb = b.resolve(utterance);
            assert_eq!(ra.stage, rb.stage);
            assert_eq!(ra.response, rb.response);
        }
    }

    // ─── API auxiliar do host ──────────────────────────────────

    #[test]
    fn farewell_response_comes_from_configured_intent() {
        let orch = orchestrator();
        let farewell = orch.farewell_response();
        let goodbye = IntentId::new("goodbye").unwrap();
        let registered = orch.registry.responses_for(&goodbye).unwrap();
        assert!(registered.contains(&farewell));
    }

    #[test]
    fn random_response_for_unknown_intent_is_none() {
        let orch = orchestrator();
        let unknown = IntentId::new("nunca-configurada").unwrap();
        assert!(orch.random_response_for(&unknown).is_none());
    }

    // ─── concorrência ──────────────────────────────────────────

    #[test]
    fn orchestrator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Orchestrator>();
    }
}
