//! REPL session management

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::debug;

use super::render;
use crate::domain::TripForm;
use crate::llm::Role;
use crate::session::{Session, SessionError, TripAssistant};

/// Interactive REPL session
pub struct ReplSession {
    assistant: TripAssistant,
    session: Session,
}

/// What a line of input asked for
enum Input {
    Line(String),
    Quit,
}

/// Result of handling a slash command
enum SlashResult {
    Continue,
    NewSession,
    Quit,
}

impl ReplSession {
    /// Create a REPL around a fresh session
    pub fn new(assistant: TripAssistant) -> Self {
        Self::with_session(assistant, Session::new())
    }

    /// Create a REPL that continues an existing session
    pub fn with_session(assistant: TripAssistant, session: Session) -> Self {
        Self { assistant, session }
    }

    /// Run the REPL main loop
    pub async fn run(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        self.print_welcome();

        if self.session.trip().is_none() && !self.collect_trip(&mut rl).await? {
            println!("Goodbye!");
            return Ok(());
        }

        loop {
            let line = match read(&mut rl, &format!("{} ", ">".bright_green()))? {
                Input::Line(line) => line,
                Input::Quit => break,
            };
            if line.is_empty() {
                continue;
            }

            if line.starts_with('/') {
                match self.handle_slash_command(&line) {
                    SlashResult::Continue => continue,
                    SlashResult::Quit => break,
                    SlashResult::NewSession => {
                        debug!(old = %self.session.id(), "ReplSession::run: starting new session");
                        self.session = Session::new();
                        println!("{}", format!("New session {}", self.session.short_id()).dimmed());
                        if !self.collect_trip(&mut rl).await? {
                            break;
                        }
                    }
                }
            } else {
                self.process_question(&line).await;
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Print welcome message
    fn print_welcome(&self) {
        println!();
        println!("{}", "Travel Packing Assistant".bright_cyan().bold());
        println!("{}", render::session_line(&self.session));
        println!("Type {} for help, {} to quit", "/help".yellow(), "/quit".yellow());
        println!();
    }

    /// Prompt for the trip form until a plan runs
    ///
    /// Returns false if the user quit. `/chat` at any prompt skips the form.
    async fn collect_trip(&mut self, rl: &mut DefaultEditor) -> Result<bool> {
        println!("{}", "Enter Trip Details".bright_cyan());
        println!("{}", "Dates are YYYY-MM-DD. /chat skips the form.".dimmed());

        loop {
            let mut fields = Vec::with_capacity(4);
            for label in [
                "Destination (e.g., 'London, UK')",
                "Start Date",
                "End Date",
                "Planned Activities",
            ] {
                match read(rl, &format!("{} ", format!("{label}:").bright_white()))? {
                    Input::Quit => return Ok(false),
                    Input::Line(line) if line == "/quit" || line == "/q" => return Ok(false),
                    Input::Line(line) if line == "/chat" => return Ok(true),
                    Input::Line(line) => fields.push(line),
                }
            }

            if self.submit(&form_from_fields(fields)).await {
                return Ok(true);
            }
            println!();
        }
    }

    /// Submit the form; true once a trip is fixed on the session
    async fn submit(&mut self, form: &TripForm) -> bool {
        println!("{}", render::planning_line(self.assistant.planned_artifacts()).dimmed());
        let before = self.session.transcript().len();

        match self.assistant.submit_trip(&mut self.session, form).await {
            Ok(outcome) => {
                for message in &self.session.transcript().messages()[before..] {
                    render::print_message(message);
                }
                render::print_outcome_problems(&outcome);
                println!();
                true
            }
            Err(SessionError::Trip(e)) => {
                println!("{} {}", "Warning:".yellow(), e);
                false
            }
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                if let Some(hint) = render::error_hint(&e) {
                    println!("{}", hint.dimmed());
                }
                false
            }
        }
    }

    /// Ask a follow-up question and print the reply
    async fn process_question(&mut self, question: &str) {
        println!("{}", "Thinking...".dimmed());
        match self.assistant.ask(&mut self.session, question).await {
            Ok(reply) => {
                if let Some(message) = self.session.transcript().last() {
                    render::print_message(message);
                }
                if reply.is_truncated() {
                    println!("{}", render::TRUNCATED_NOTICE.yellow());
                }
                println!();
            }
            Err(SessionError::EmptyQuestion) => {}
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                if let Some(hint) = render::error_hint(&e) {
                    println!("{}", hint.dimmed());
                }
                println!("{}", "Your question is kept and will be resent with the next one.".dimmed());
            }
        }
    }

    /// Handle slash commands
    fn handle_slash_command(&mut self, input: &str) -> SlashResult {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");

        match cmd {
            "/help" | "/h" => {
                self.print_help();
                SlashResult::Continue
            }
            "/quit" | "/q" | "/exit" => SlashResult::Quit,
            "/history" => {
                self.print_history();
                SlashResult::Continue
            }
            "/trip" => {
                println!("{}", render::session_line(&self.session).dimmed());
                match self.session.trip() {
                    Some(trip) => println!("{}", render::trip_summary(trip)),
                    None => println!("{}", "No trip submitted in this session.".dimmed()),
                }
                SlashResult::Continue
            }
            "/new" => SlashResult::NewSession,
            _ => {
                println!("{} Unknown command: {}", "?".yellow(), cmd);
                println!("Type {} for available commands", "/help".yellow());
                SlashResult::Continue
            }
        }
    }

    /// Print help message
    fn print_help(&self) {
        println!();
        println!("{}", "Available Commands:".bright_cyan());
        println!("  {:14} Show this help", "/help".yellow());
        println!("  {:14} Exit", "/quit".yellow());
        println!("  {:14} Show conversation history", "/history".yellow());
        println!("  {:14} Show the trip details", "/trip".yellow());
        println!("  {:14} End this session and plan a new trip", "/new".yellow());
        println!();
        println!("Anything else is sent as a question about your trip.");
        println!();
    }

    /// Print conversation history
    fn print_history(&self) {
        let transcript = self.session.transcript();
        if transcript.is_empty() {
            println!("{}", "No conversation history.".dimmed());
            return;
        }

        println!();
        println!("{}", "Conversation History:".bright_cyan());
        for (i, msg) in transcript.messages().iter().enumerate() {
            let role = match msg.role {
                Role::User => "You".bright_green(),
                Role::Assistant => "Assistant".bright_blue(),
            };
            println!("  {}. {}: {}", i + 1, role, render::preview(msg, 50));
        }
        println!();
    }
}

/// Build the form from the four prompted lines, taken as typed
fn form_from_fields(fields: Vec<String>) -> TripForm {
    let mut fields = fields.into_iter();
    let mut next = || fields.next().unwrap_or_default();
    let destination = next();
    let start_date = Some(next());
    let end_date = Some(next());
    let activities = next();
    TripForm {
        destination,
        start_date,
        end_date,
        activities,
    }
}

/// Read one trimmed line, mapping Ctrl+D to quit
fn read(rl: &mut DefaultEditor, prompt: &str) -> Result<Input> {
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim().to_string();
                if !line.is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                return Ok(Input::Line(line));
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C - just show new prompt
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!();
                return Ok(Input::Quit);
            }
            Err(err) => return Err(eyre::eyre!("Readline error: {}", err)),
        }
    }
}
