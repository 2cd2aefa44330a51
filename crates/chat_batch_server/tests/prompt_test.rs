//! Tests for Llama-2 prompt rendering.

use chat_batch_core::{Conversation, Message};
use chat_batch_server::render_dialog;

#[test]
fn test_single_turn_is_one_open_segment() {
    let segments = render_dialog(&Conversation::single_turn("  What is 2+2? "));
    assert_eq!(segments, vec!["[INST] What is 2+2? [/INST]".to_string()]);
}

#[test]
fn test_system_prompt_folds_into_first_user_turn() {
    let conversation = Conversation::new(vec![
        Message::system("Be terse"),
        Message::user("Hi"),
    ])
    .expect("Valid");

    let segments = render_dialog(&conversation);
    assert_eq!(segments.len(), 1);
    assert_eq!(
        segments[0],
        "[INST] <<SYS>>\nBe terse\n<</SYS>>\n\nHi [/INST]"
    );
}

#[test]
fn test_completed_exchanges_become_closed_segments() {
    let conversation = Conversation::new(vec![
        Message::user("one"),
        Message::assistant("two"),
        Message::user("three"),
    ])
    .expect("Valid");

    let segments = render_dialog(&conversation);
    assert_eq!(
        segments,
        vec![
            "[INST] one [/INST] two ".to_string(),
            "[INST] three [/INST]".to_string(),
        ]
    );
}
