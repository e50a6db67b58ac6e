pub mod chain;
pub mod clarifai;
pub mod error;
pub mod interpreter;
pub mod openai;
pub mod rules;

#[cfg(test)]
mod rules_tests;

pub use chain::InterpretChain;
pub use clarifai::ClarifaiInterpreter;
pub use error::{InterpretError, Result};
pub use interpreter::{format_labels, Interpreter, JURISDICTION_RULES};
pub use openai::OpenAiInterpreter;
pub use rules::RuleInterpreter;
