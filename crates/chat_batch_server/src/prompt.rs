//! Prompt-length accounting in the Llama-2 chat layout.
//!
//! The server applies its own chat template; this module only needs to count
//! tokens faithfully enough to reject prompts that cannot fit the context
//! window before any request is sent.

use chat_batch_core::{Conversation, Role};
use chat_batch_error::{ChatError, ChatErrorKind, ChatResult};
use tokenizers::Tokenizer;

const B_INST: &str = "[INST]";
const E_INST: &str = "[/INST]";
const B_SYS: &str = "<<SYS>>\n";
const E_SYS: &str = "\n<</SYS>>\n\n";

/// Renders a validated conversation as prompt segments.
///
/// Each completed user/assistant exchange becomes one segment, terminated by
/// an end-of-sequence token when encoded. The last segment holds the open
/// user turn. A leading system prompt is folded into the first user turn.
pub fn render_dialog(conversation: &Conversation) -> Vec<String> {
    let mut turns: Vec<String> = Vec::with_capacity(conversation.len());
    let mut system: Option<&str> = None;

    for message in conversation {
        match message.role() {
            Role::System if turns.is_empty() && system.is_none() => {
                system = Some(message.content().as_str());
            }
            _ => turns.push(message.content().trim().to_string()),
        }
    }

    if let (Some(system), Some(first)) = (system, turns.first_mut()) {
        *first = format!("{}{}{}{}", B_SYS, system, E_SYS, first);
    }

    let mut segments: Vec<String> = turns
        .chunks(2)
        .filter(|pair| pair.len() == 2)
        .map(|pair| format!("{} {} {} {} ", B_INST, pair[0], E_INST, pair[1]))
        .collect();

    if turns.len() % 2 == 1 {
        if let Some(last) = turns.last() {
            segments.push(format!("{} {} {}", B_INST, last, E_INST));
        }
    }

    segments
}

/// Counts the prompt tokens of a conversation.
///
/// Every segment carries a beginning-of-sequence token; every completed
/// exchange also carries an end-of-sequence token.
pub fn count_prompt_tokens(tokenizer: &Tokenizer, conversation: &Conversation) -> ChatResult<usize> {
    let segments = render_dialog(conversation);

    let mut total = 0;
    for (position, segment) in segments.iter().enumerate() {
        let encoding = tokenizer.encode(segment.as_str(), false).map_err(|e| {
            ChatError::new(ChatErrorKind::Generation(format!(
                "Tokenization failed: {}",
                e
            )))
        })?;
        let eos = usize::from(position + 1 < segments.len());
        total += encoding.len() + 1 + eos;
    }

    Ok(total)
}
