//! # Cascata — Loop Interativo de Chat
//!
//! **Ponto de entrada** do binário: um adaptador de fronteira mínimo que
//! liga stdin/stdout ao pipeline de resolução. Todo o entendimento de
//! linguagem vive na biblioteca — este arquivo só lê linhas, imprime
//! respostas e trata os sentinelas de saída.
//!
//! ## Fluxo de Inicialização
//!
//! ```text
//! main()
//!   ├── Configura tracing/logging (RUST_LOG, default info)
//!   ├── Carrega data/corpus.json (ou cai para a cópia embutida)
//!   ├── Constrói o Orchestrator (valida, treina, ajusta embeddings)
//!   └── Loop: lê linha → sentinela? despede e sai : resolve e imprime
//! ```
//!
//! ## Sentinelas de Saída
//!
//! `quit`, `exit` e `bye` encerram o loop **antes** do cascade — são um
//! comando do host, não uma utterance. A despedida impressa vem da
//! intenção configurada em `farewell_intent`.
//!
//! ## Exemplo de Uso
//!
//! ```bash
//! # Executar com logs padrão (info)
//! cargo run
//!
//! # Executar com logs detalhados do cascade
//! RUST_LOG=debug cargo run
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use cascata_chat::{ChatConfig, Orchestrator};

/// Caminho do artefato de configuração (relativo à raiz do projeto).
const CONFIG_PATH: &str = "data/corpus.json";

/// Comandos que encerram o loop sem passar pelo cascade.
const EXIT_SENTINELS: &[&str] = &["quit", "exit", "bye"];

/// `true` se a linha é um comando de saída do host (case-insensitive).
fn is_exit_sentinel(line: &str) -> bool {
    EXIT_SENTINELS.contains(&line.trim().to_lowercase().as_str())
}

fn main() -> Result<()> {
    // Logging via RUST_LOG; default info.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Carrega a configuração do disco; sem o arquivo, usa a cópia
    // embutida — o binário funciona a partir de qualquer diretório.
    let config = match ChatConfig::load(CONFIG_PATH) {
        Ok(config) => {
            tracing::info!(path = CONFIG_PATH, "Configuração carregada do disco");
            config
        }
        Err(e) => {
            tracing::warn!(error = %e, "Falha ao carregar configuração, usando a embutida");
            ChatConfig::builtin()
        }
    };

    // Fase única de inicialização cara: validação + treino + embeddings.
    // ConfigError aqui é fatal por design.
    let orchestrator = Orchestrator::new(&config)?;

    println!("AI Chatbot Started! Type 'quit' to exit.");
    println!();

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    loop {
        print!("You: ");
        stdout.flush()?;

        let mut line = String::new();
        // EOF encerra o loop silenciosamente (pipe fechado, Ctrl-D).
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        // Sentinelas são comando do host — nunca entram no cascade.
        if is_exit_sentinel(line) {
            println!("Bot: {}", orchestrator.farewell_response());
            break;
        }

        let result = orchestrator.resolve(line);
        tracing::debug!(stage = %result.stage, "Utterance resolvida");
        println!("Bot: {}", result.response);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_match_case_insensitively() {
        assert!(is_exit_sentinel("quit"));
        assert!(is_exit_sentinel("  EXIT "));
        assert!(is_exit_sentinel("Bye"));
    }

    #[test]
    fn ordinary_utterances_are_not_sentinels() {
        assert!(!is_exit_sentinel("hello"));
        assert!(!is_exit_sentinel("good bye friend"));
        assert!(!is_exit_sentinel(""));
    }
}
