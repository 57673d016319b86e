//! Operation Dispatcher: validate a request body, run the selected
//! operation, and classify failures.

use crate::error::BfhlError;
use crate::models::{Operation, OperationOutput};
use crate::services::metrics;
use crate::services::operations;
use crate::services::providers::TextProvider;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Appended to the caller's question before it goes upstream.
const ONE_WORD_INSTRUCTION: &str = "Respond with exactly one single word, which is the direct answer.";

/// Characters removed from the upstream answer before the first word is taken.
const STRIPPED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

#[derive(Clone)]
pub struct Dispatcher {
    text_provider: Arc<dyn TextProvider>,
}

impl Dispatcher {
    pub fn new(text_provider: Arc<dyn TextProvider>) -> Self {
        Self { text_provider }
    }

    pub fn text_provider(&self) -> &Arc<dyn TextProvider> {
        &self.text_provider
    }

    /// Validate `body` and execute the operation it names.
    pub async fn dispatch(&self, body: &Value) -> Result<OperationOutput, BfhlError> {
        let (operation_name, result) = match Operation::from_body(body) {
            Ok(operation) => {
                let name = operation.kind().as_str();
                (name, self.execute(operation).await)
            }
            Err(e) => ("none", Err(e)),
        };

        match &result {
            Ok(_) => {
                metrics::record_operation(operation_name, "success");
                tracing::info!(operation = operation_name, "Operation completed");
            }
            Err(e @ BfhlError::Validation(_)) => {
                metrics::record_operation(operation_name, e.outcome());
                tracing::warn!(operation = operation_name, reason = %e, "Rejected request");
            }
            Err(e) => {
                metrics::record_operation(operation_name, e.outcome());
                tracing::error!(operation = operation_name, error = %e, "Operation failed");
            }
        }

        result
    }

    /// Execute an already-validated operation.
    pub async fn execute(&self, operation: Operation) -> Result<OperationOutput, BfhlError> {
        match operation {
            Operation::Fibonacci(n) => {
                run_blocking(move || OperationOutput::Sequence(operations::fibonacci(n))).await
            }
            Operation::Prime(values) => {
                run_blocking(move || OperationOutput::Integers(operations::primes(&values))).await
            }
            Operation::Hcf(values) => operations::hcf_of(&values)
                .map(OperationOutput::Integer)
                .ok_or_else(|| BfhlError::Internal(anyhow::anyhow!("hcf of an empty list"))),
            Operation::Lcm(values) => operations::lcm_of(&values)
                .map(OperationOutput::Integer)
                .map_err(|e| BfhlError::Internal(e.into())),
            Operation::Ai(question) => self.ask(&question).await.map(OperationOutput::Word),
        }
    }

    /// Ask the text provider and reduce its answer to one word.
    async fn ask(&self, question: &str) -> Result<String, BfhlError> {
        let provider = self.text_provider.name();
        let prompt = format!("{}. {}", question, ONE_WORD_INSTRUCTION);

        let start = Instant::now();
        let result = self.text_provider.generate(&prompt).await;
        metrics::record_provider_latency(provider, start.elapsed().as_secs_f64());

        let response = result.inspect_err(|e| {
            metrics::record_provider_error(provider, e.kind());
            tracing::error!(provider, error = %e, "Gemini API failed");
        })?;

        tracing::debug!(
            provider,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Text provider answered"
        );

        Ok(first_word(response.text.as_deref().unwrap_or_default()))
    }
}

/// Run CPU-bound work on the blocking pool so async workers stay free.
async fn run_blocking<F>(work: F) -> Result<OperationOutput, BfhlError>
where
    F: FnOnce() -> OperationOutput + Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| BfhlError::Internal(anyhow::anyhow!("operation task failed: {}", e)))
}

/// Trim, drop `. , ! ? ; :`, and keep what precedes the first whitespace.
pub fn first_word(text: &str) -> String {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();

    cleaned
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .to_string()
}
