//! The demonstration batch.

use chat_batch_core::{Conversation, GenerationConfig};
use chat_batch_error::ChatResult;

const INSTRUCTIONS: [&str; 4] = [
    "In Bash, how do I list all text files in the current directory (files with .txt extension) that have been modified in the last 24 hours?",
    "What is the difference between inorder and preorder traversal? Give an example in Python.",
    "Write a function in JavaScript that takes an array of integers and returns a new array with only the prime numbers.",
    "In Python, write a function that takes a pandas DataFrame and returns the sum of a specific column. Make sure to handle the case where the column does not exist.",
];

/// Four independent single-turn coding questions.
pub fn sample_instructions() -> Vec<Conversation> {
    INSTRUCTIONS
        .iter()
        .map(|instruction| Conversation::single_turn(*instruction))
        .collect()
}

/// Generation parameters used for the demonstration batch: low temperature,
/// nucleus 0.9, length left to the service.
pub fn sample_generation_config() -> ChatResult<GenerationConfig> {
    GenerationConfig::new(None, 0.2, 0.9)
}
