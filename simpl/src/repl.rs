//! REPL (Read-Eval-Print Loop) for the Simpl interpreter
//!
//! Every input is parsed afresh and evaluated in one persistent root
//! environment, so declarations survive across lines and a failed line
//! leaves earlier declarations in place. Features:
//! - Multi-line input while braces, brackets or parentheses are open
//! - REPL commands for inspecting and resetting the session
//! - miette error reports against the offending input
//! - History support and line editing with rustyline

use miette::{Diagnostic, NamedSource, Report};
use rustyline::{DefaultEditor, error::ReadlineError};
use simpl_interpreter::{Environment, EvaluationError, Evaluator, Value};
use simpl_parser::{ParseError, parse_program};
use thiserror::Error;

/// Errors that can occur in the REPL
#[derive(Debug, Error, Diagnostic)]
pub enum ReplError {
    #[error("Parse error: {source}")]
    Parse {
        #[from]
        source: ParseError,
    },

    #[error("Runtime error: {source}")]
    Runtime {
        #[from]
        source: EvaluationError,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Readline error: {source}")]
    Readline {
        #[from]
        source: ReadlineError,
    },

    #[error("REPL command error: {message}")]
    Command { message: String },
}

/// REPL configuration options
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show detailed error information
    pub verbose_errors: bool,

    /// Prompt string for input
    pub prompt: String,

    /// Prompt while a multi-line input is still open
    pub continuation_prompt: String,

    /// Enable history persistence
    pub persist_history: bool,

    /// History file path
    pub history_file: Option<String>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            verbose_errors: false,
            prompt: "simpl> ".to_string(),
            continuation_prompt: "...    ".to_string(),
            persist_history: true,
            history_file: Some(".simpl_history".to_string()),
        }
    }
}

/// REPL session statistics
#[derive(Debug, Clone, Default)]
pub struct ReplStats {
    /// Number of inputs evaluated successfully
    pub inputs_evaluated: usize,

    /// Number of errors encountered
    pub errors_encountered: usize,

    /// Total REPL commands executed
    pub commands_executed: usize,
}

/// Result of evaluating a line in the REPL
#[derive(Debug)]
pub enum ReplResult {
    /// Value of the last statement in the input
    Value { value: Value },

    /// Executed a REPL command
    Command { message: String },

    /// Empty line
    Empty,

    /// Exit request
    Exit,
}

/// Evaluation state of a REPL, independent of the terminal
pub struct ReplState {
    environment: Environment,
    evaluator: Evaluator,
    config: ReplConfig,
    stats: ReplStats,
}

impl ReplState {
    pub fn new(config: ReplConfig) -> Self {
        Self {
            environment: Environment::root(),
            evaluator: Evaluator::new(),
            config,
            stats: ReplStats::default(),
        }
    }

    /// Evaluate a line of input
    pub fn evaluate_line(&mut self, line: &str) -> Result<ReplResult, ReplError> {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            return Ok(ReplResult::Empty);
        }

        if trimmed == "exit" {
            return Ok(ReplResult::Exit);
        }

        if trimmed.starts_with('/') {
            return self.execute_command(trimmed);
        }

        let result = parse_program(line)
            .map_err(ReplError::from)
            .and_then(|program| {
                self.evaluator
                    .evaluate(&program, &self.environment)
                    .map_err(ReplError::from)
            });

        match result {
            Ok(value) => {
                self.stats.inputs_evaluated += 1;
                Ok(ReplResult::Value { value })
            }
            Err(error) => {
                self.stats.errors_encountered += 1;
                Err(error)
            }
        }
    }

    /// Execute a REPL command
    fn execute_command(&mut self, command: &str) -> Result<ReplResult, ReplError> {
        self.stats.commands_executed += 1;

        let parts: Vec<&str> = command.split_whitespace().collect();
        let Some(name) = parts.first() else {
            return Ok(ReplResult::Empty);
        };

        match *name {
            "/help" | "/h" => Ok(ReplResult::Command {
                message: self.help_message(),
            }),

            "/vars" | "/variables" => Ok(ReplResult::Command {
                message: self.format_variables(),
            }),

            "/clear" => {
                self.environment = Environment::root();
                Ok(ReplResult::Command {
                    message: "Variables cleared".to_string(),
                })
            }

            "/quit" | "/q" | "/exit" => Ok(ReplResult::Exit),

            unknown => Err(ReplError::Command {
                message: format!("Unknown command: {unknown}. Type /help for available commands."),
            }),
        }
    }

    /// Get help message
    fn help_message(&self) -> String {
        r#"Simpl REPL Commands:
  /help, /h           Show this help message
  /vars, /variables   List declared variables with their values
  /clear              Forget all declarations
  /quit, /q, /exit    Exit the REPL (so does a bare `exit`)

Examples:
  2 + 5 * 2                   # Arithmetic
  let x = 42;                 # Declare a variable
  const origin = { x, y: 0 }; # Object literal with a shorthand property
  fn add(a, b) { a + b }      # Declare a function
  add(origin.x, 1)            # Call it

Multi-line input continues while ( [ { are unclosed.
Use Ctrl+C to cancel the current input, Ctrl+D to exit."#
            .to_string()
    }

    /// Format declared variables for display, skipping the built-in booleans
    fn format_variables(&self) -> String {
        let names: Vec<String> = self
            .environment
            .names()
            .into_iter()
            .filter(|name| name != "true" && name != "false")
            .collect();

        if names.is_empty() {
            return "No variables defined".to_string();
        }

        let mut lines = vec!["Variables:".to_string()];
        for name in names {
            let Ok(value) = self.environment.get(&name) else {
                continue;
            };
            let keyword = match self.environment.is_constant(&name) {
                Ok(true) => "const",
                _ => "let",
            };
            lines.push(format!("  {keyword} {name} = {value}"));
        }
        lines.join("\n")
    }

    pub fn config(&self) -> &ReplConfig {
        &self.config
    }

    pub fn stats(&self) -> &ReplStats {
        &self.stats
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }
}

/// Check if the input has balanced brackets and is likely complete
pub fn is_input_complete(input: &str) -> bool {
    let mut brace_count = 0i32;
    let mut bracket_count = 0i32;
    let mut paren_count = 0i32;

    for ch in input.chars() {
        match ch {
            '{' => brace_count += 1,
            '}' => brace_count -= 1,
            '[' => bracket_count += 1,
            ']' => bracket_count -= 1,
            '(' => paren_count += 1,
            ')' => paren_count -= 1,
            _ => {}
        }
    }

    // Surplus closers are left for the parser to report
    brace_count <= 0 && bracket_count <= 0 && paren_count <= 0
}

/// Interactive REPL session: a `ReplState` behind a rustyline editor
pub struct ReplSession {
    /// Interactive line editor with history
    editor: DefaultEditor,

    state: ReplState,
}

impl ReplSession {
    /// Create a new REPL session with default configuration
    pub fn new() -> Result<Self, ReplError> {
        Self::with_config(ReplConfig::default())
    }

    /// Create a new REPL session with custom configuration
    pub fn with_config(config: ReplConfig) -> Result<Self, ReplError> {
        let mut editor = DefaultEditor::new()?;

        if config.persist_history {
            if let Some(ref history_file) = config.history_file {
                // A missing history file is normal on first start
                if editor.load_history(history_file).is_err() {
                    log::debug!("no history loaded from {history_file}");
                }
            }
        }

        Ok(Self {
            editor,
            state: ReplState::new(config),
        })
    }

    /// Start the REPL main loop
    pub fn run(&mut self) -> Result<(), ReplError> {
        self.print_welcome();

        while let Some(line) = self.read_line()? {
            match self.state.evaluate_line(&line) {
                Ok(ReplResult::Exit) => break,
                Ok(result) => self.display_result(result),
                Err(error) => self.display_error(error, &line),
            }
        }

        self.print_goodbye();
        self.save_history()?;
        Ok(())
    }

    /// Read a line from the user with prompt, supporting multi-line input
    fn read_line(&mut self) -> Result<Option<String>, ReplError> {
        let mut complete_input = String::new();
        let mut line_count = 0;

        loop {
            let prompt = if line_count == 0 {
                &self.state.config.prompt
            } else {
                &self.state.config.continuation_prompt
            };

            match self.editor.readline(prompt) {
                Ok(line) => {
                    line_count += 1;

                    if line_count == 1 && line.trim().is_empty() {
                        return Ok(Some(String::new()));
                    }

                    if !complete_input.is_empty() {
                        complete_input.push('\n');
                    }
                    complete_input.push_str(&line);

                    if is_input_complete(&complete_input) {
                        // Add the complete multi-line input to history as a single entry
                        self.editor.add_history_entry(complete_input.clone())?;
                        return Ok(Some(complete_input));
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Cancel the current input and start over
                    println!("^C");
                    return Ok(Some(String::new()));
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(err) => return Err(ReplError::Readline { source: err }),
            }
        }
    }

    /// Display the result of evaluation
    fn display_result(&self, result: ReplResult) {
        match result {
            ReplResult::Value { value } => println!("{value}"),
            ReplResult::Command { message } => println!("{message}"),
            ReplResult::Empty | ReplResult::Exit => {}
        }
    }

    /// Display an error with appropriate formatting
    fn display_error(&self, error: ReplError, source_code: &str) {
        match error {
            ReplError::Parse { source } => {
                // ParseError carries its own source text
                eprintln!("{:?}", Report::new(source));
            }
            ReplError::Runtime { source } => {
                let named_source = NamedSource::new("<repl>", source_code.to_string());
                let report = Report::new(source).with_source_code(named_source);
                eprintln!("{report:?}");
            }
            error => {
                if self.state.config.verbose_errors {
                    eprintln!("Error: {error:?}");
                } else {
                    eprintln!("Error: {error}");
                }
            }
        }
    }

    fn print_welcome(&self) {
        println!("Simpl REPL v{}", env!("CARGO_PKG_VERSION"));
        println!("Type /help for commands, /quit to exit");
        println!();
    }

    fn print_goodbye(&self) {
        println!("Goodbye!");
    }

    /// Save history to file
    fn save_history(&mut self) -> Result<(), ReplError> {
        if self.state.config.persist_history {
            if let Some(ref history_file) = self.state.config.history_file {
                self.editor.save_history(history_file)?;
            }
        }
        Ok(())
    }
}
