//! Console rendering of paired conversations and replies.

use chat_batch_core::{CompletionResult, Conversation};
use std::io::Write;

/// Line printed between conversations.
pub const SEPARATOR: &str = "==================================";

/// Writes every turn, then the reply prefixed with `>`, then a separator.
///
/// Roles are shown capitalized.
pub fn write_transcript<W: Write>(
    out: &mut W,
    pairs: &[(Conversation, CompletionResult)],
) -> std::io::Result<()> {
    for (conversation, result) in pairs {
        for message in conversation {
            writeln!(out, "{}: {}\n", message.role(), message.content())?;
        }
        let reply = result.generation();
        writeln!(out, "> {}: {}", reply.role(), reply.content())?;
        writeln!(out, "\n{}\n", SEPARATOR)?;
    }
    out.flush()
}
