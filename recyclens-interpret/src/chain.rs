use crate::interpreter::Interpreter;
use crate::rules::RuleInterpreter;
use recyclens_core::{Interpretation, VisionLabel};
use tracing::{debug, warn};

/// Ordered interpretation fallback: LLM interpreters in priority order, then
/// the infallible rule table. Unlike the vision chain this never fails.
pub struct InterpretChain {
    interpreters: Vec<Box<dyn Interpreter>>,
    rules: RuleInterpreter,
}

impl InterpretChain {
    pub fn new() -> Self {
        Self {
            interpreters: Vec::new(),
            rules: RuleInterpreter::new(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: Box<dyn Interpreter>) -> Self {
        self.interpreters.push(interpreter);
        self
    }

    pub fn push(&mut self, interpreter: Box<dyn Interpreter>) {
        self.interpreters.push(interpreter);
    }

    pub fn interpreter_names(&self) -> Vec<&'static str> {
        self.interpreters.iter().map(|i| i.name()).collect()
    }

    pub fn configured_interpreter_names(&self) -> Vec<&'static str> {
        self.interpreters
            .iter()
            .filter(|i| i.is_configured())
            .map(|i| i.name())
            .collect()
    }

    /// Try each configured interpreter in order; fall back to the rule table
    /// on exhaustion. Returns the interpretation and the name of whichever
    /// step produced it ("rules" when no LLM was attempted, "rules-fallback"
    /// when at least one LLM was tried and failed).
    pub async fn interpret(&self, labels: &[VisionLabel]) -> (Interpretation, String) {
        let mut attempted = false;

        for interpreter in &self.interpreters {
            if !interpreter.is_configured() {
                debug!(interpreter = interpreter.name(), "skipping unconfigured interpreter");
                continue;
            }

            attempted = true;
            match interpreter.interpret(labels).await {
                Ok(interpretation) => {
                    debug!(
                        interpreter = interpreter.name(),
                        item = %interpretation.item_name,
                        "interpretation succeeded"
                    );
                    return (interpretation, interpreter.name().to_string());
                }
                Err(err) => {
                    warn!(
                        interpreter = interpreter.name(),
                        error = %err,
                        "interpreter failed, falling through"
                    );
                }
            }
        }

        let name = if attempted { "rules-fallback" } else { "rules" };
        (self.rules.interpret(labels), name.to_string())
    }
}

impl Default for InterpretChain {
    fn default() -> Self {
        Self::new()
    }
}
