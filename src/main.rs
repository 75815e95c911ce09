use colored::Colorize;
use dotenv::dotenv;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;

use pdf_rag::chat::{format_answer, ChatSession, SessionStep, FAREWELL};
use pdf_rag::config::AppConfig;
use pdf_rag::search::search_prompt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env();

    println!("Faça sua pergunta (Ctrl+C para sair):\n");

    let mut rl = Editor::<(), DefaultHistory>::new()?;
    let mut session = ChatSession::new();

    while !session.is_terminated() {
        match rl.readline("PERGUNTA: ") {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                if let SessionStep::Ask(question) = session.on_line(&line) {
                    // A failed query is reported and the loop keeps going.
                    match search_prompt(&config, &question).await {
                        Ok((answer, pages)) => {
                            println!("{}", format_answer(&answer, &pages));
                            println!();
                        }
                        Err(e) => {
                            println!("{}\n", format!("Erro: {e}").red());
                        }
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                session.on_interrupt();
                println!("\n{FAREWELL}");
            }
            Err(err) => {
                println!("{}", format!("Erro: {err:?}").red());
                session.on_interrupt();
            }
        }
    }
    Ok(())
}
