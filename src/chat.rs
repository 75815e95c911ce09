/// Printed when the operator interrupts the loop.
pub const FAREWELL: &str = "Saindo...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    Terminated,
}

/// What the loop driver should do with one input event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStep {
    /// Blank line; read again.
    Ignore,
    /// Answer this question.
    Ask(String),
    /// Print the farewell and stop.
    Farewell,
}

/// The interactive loop's state machine: it waits for input until an
/// explicit interrupt terminates it.
#[derive(Debug, Default)]
pub struct ChatSession {
    terminated: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        if self.terminated {
            SessionState::Terminated
        } else {
            SessionState::AwaitingInput
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn on_line(&mut self, line: &str) -> SessionStep {
        let question = line.trim();
        if question.is_empty() {
            SessionStep::Ignore
        } else {
            SessionStep::Ask(question.to_string())
        }
    }

    pub fn on_interrupt(&mut self) -> SessionStep {
        self.terminated = true;
        SessionStep::Farewell
    }
}

/// Formats one answer for the terminal: the answer line, then a sources line
/// when any page contributed.
pub fn format_answer(answer: &str, pages: &[i64]) -> String {
    let mut output = format!("RESPOSTA: {answer}");
    if !pages.is_empty() {
        let listed = pages
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        output.push_str(&format!("\nFONTES: páginas {listed}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_ignored() {
        let mut session = ChatSession::new();
        assert_eq!(session.on_line(""), SessionStep::Ignore);
        assert_eq!(session.on_line("   "), SessionStep::Ignore);
        assert_eq!(session.state(), SessionState::AwaitingInput);
    }

    #[test]
    fn test_question_is_trimmed() {
        let mut session = ChatSession::new();
        assert_eq!(
            session.on_line("  Qual o prazo?  "),
            SessionStep::Ask("Qual o prazo?".to_string())
        );
    }

    #[test]
    fn test_session_skips_blank_answers_once_then_exits() {
        // Input sequence: blank, one question, interrupt.
        let mut session = ChatSession::new();
        let mut answered = 0;
        let mut transcript = Vec::new();

        for line in ["", "What is X?"] {
            match session.on_line(line) {
                SessionStep::Ask(question) => {
                    answered += 1;
                    transcript.push(format_answer(&format!("answer to {question}"), &[2]));
                }
                SessionStep::Ignore => {}
                SessionStep::Farewell => unreachable!(),
            }
        }
        assert_eq!(session.on_interrupt(), SessionStep::Farewell);
        transcript.push(FAREWELL.to_string());

        assert_eq!(answered, 1);
        assert_eq!(session.state(), SessionState::Terminated);
        assert!(session.is_terminated());
        assert_eq!(
            transcript,
            vec![
                "RESPOSTA: answer to What is X?\nFONTES: páginas 2".to_string(),
                "Saindo...".to_string(),
            ]
        );
    }

    #[test]
    fn test_format_answer_without_pages() {
        assert_eq!(format_answer("sem fontes", &[]), "RESPOSTA: sem fontes");
    }

    #[test]
    fn test_format_answer_with_pages() {
        assert_eq!(
            format_answer("com fontes", &[1, 3, 7]),
            "RESPOSTA: com fontes\nFONTES: páginas 1, 3, 7"
        );
    }
}
