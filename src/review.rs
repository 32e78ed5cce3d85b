use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn, LevelFilter};
use simple_logger::SimpleLogger;
/*
    Rust log levels:

        Error = 1,
        Warn = 2,
        Info = 3,
        Debug = 4,
        Trace = 5,
*/

use crate::error::Result;
use crate::ollama::{ClientConfig, GenerateResponse, OllamaClient};
use crate::prompt::{build_prompt, indent, REVIEW_PROMPT};
use crate::source::read_source;

pub const REVIEW_EXAMPLES: &str = include_str!("rsc/review_examples.txt");

pub const SUCCESS_BANNER: &str = "\n--- ✅ Code Review Received ---";

#[derive(Parser, Debug, Default)]
#[command(
    name = "aira",
    version,
    about = "Aira CLI",
    long_about = "Aira CLI is a tool for interacting with the Aira API",
    after_help = REVIEW_EXAMPLES)]
pub struct Cli {
    /// File to read
    #[arg(short, long, value_name = "PATH", default_value = "")]
    pub file: String,

    /// Print the review prompt and exit
    #[arg(short = 'S', long = "show-prompt", action = ArgAction::SetTrue)]
    pub show_prompt: bool,

    /// Enable verbose output
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// Enable debug output (very verbose mode, imples --verbose)
    #[arg(short = 'D', long, action = ArgAction::SetTrue)]
    pub debug: bool,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Trace
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

/// Reads `file_path`, wraps it in the review prompt and asks the server for a review.
pub fn review_file(file_path: &str, config: ClientConfig) -> Result<GenerateResponse> {
    let content = read_source(file_path)?;
    let prompt = build_prompt(&content);
    trace!("Prompt is {} bytes", prompt.len());

    let client = OllamaClient::new(config)?;
    client.generate(prompt)
}

pub fn present<W: Write>(out: &mut W, review: &GenerateResponse) -> io::Result<()> {
    writeln!(out, "{}", SUCCESS_BANNER)?;
    writeln!(out, "{}", review.response)?;
    out.flush()
}

/// Runs one invocation against `config` and decides the exit status.
///
/// Input problems (no file, unreadable file) are printed and exit cleanly.
/// Anything that fails after the file was read is logged and exits with 1.
pub fn run_with(cli: Cli, config: ClientConfig) -> ExitCode {
    // a second init (tests calling run repeatedly) keeps the first logger
    if SimpleLogger::new().with_level(cli.log_level()).init().is_err() {
        trace!("Logger already initialised");
    }

    if cli.verbose {
        info!("Verbose mode enabled.");
    }
    if cli.debug {
        trace!("Debug mode enabled.");
    }

    if cli.show_prompt {
        println!("Review Prompt:\n\n{}", indent(REVIEW_PROMPT));
        return ExitCode::SUCCESS;
    }

    info!("Reviewing {:?} with {} at {}", cli.file, config.model, config.endpoint);
    match review_file(&cli.file, config) {
        Ok(review) => {
            if let Err(e) = present(&mut io::stdout().lock(), &review) {
                error!("error writing review: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) if !e.is_fatal() => {
            println!("{}", e);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    run_with(cli, ClientConfig::default())
}
