//! Gateway wrappers around the interpreter client
//!
//! The filter extractor never talks to the interpreter directly; these
//! functions are the only call sites. Each issues a single attempt and
//! returns a typed result.

use super::client::{GatewayError, InterpreterClient};

/// Fixed instruction naming the target filter vocabulary, with one worked
/// example. The interpreter is expected to answer in `key: value` lines,
/// but nothing enforces that; the extractor tolerates anything.
const FILTER_INSTRUCTION: &str = "You are a medical query interpreter. \
Read the user's query and extract filters as key-value pairs. \
Use keys like: disease, gender, min_age, max_age, sugar_condition ('normal' or 'abnormal'), \
bp_condition ('normal' or 'high'), heart_rate_condition ('normal' or 'high'), date_range.\n\n\
Example:\n\
Query: show diabetic female above age 40\n\
Output:\n\
disease: diabetes\n\
gender: female\n\
min_age: 40";

/// Instruction for the conversational assistant route.
const CHAT_INSTRUCTION: &str = "You are a smart AI assistant for patient health \
recommendations. Respond concisely and professionally.";

/// Ask the interpreter to turn a raw query into `key: value` filter lines.
pub async fn interpret_query(
    client: &InterpreterClient,
    raw_query: &str,
) -> Result<String, GatewayError> {
    let user = format!("Query: {raw_query}");
    client.message(FILTER_INSTRUCTION, &user).await
}

/// Single-shot assistant completion for the chat route.
pub async fn chat_reply(
    client: &InterpreterClient,
    message: &str,
) -> Result<String, GatewayError> {
    client.message(CHAT_INSTRUCTION, message).await
}
