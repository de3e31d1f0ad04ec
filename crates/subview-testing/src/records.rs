//! Builders for transcript lines.
//!
//! Every function returns one JSON object serialized on a single line,
//! without the trailing newline.

use serde_json::{Value, json};

fn envelope(kind: &str, agent_id: &str, slug: &str, timestamp: &str, message: Value) -> String {
    json!({
        "type": kind,
        "agentId": agent_id,
        "slug": slug,
        "timestamp": timestamp,
        "sessionId": "fixture-session",
        "isSidechain": true,
        "message": message,
    })
    .to_string()
}

/// User turn with plain string content
pub fn user(agent_id: &str, slug: &str, timestamp: &str, text: &str) -> String {
    envelope(
        "user",
        agent_id,
        slug,
        timestamp,
        json!({ "role": "user", "content": text }),
    )
}

/// Assistant turn with a single text block
pub fn assistant_text(agent_id: &str, slug: &str, timestamp: &str, text: &str) -> String {
    assistant_blocks(
        agent_id,
        slug,
        timestamp,
        vec![json!({ "type": "text", "text": text })],
    )
}

/// Assistant turn calling a tool
pub fn tool_use(agent_id: &str, slug: &str, timestamp: &str, name: &str, input: Value) -> String {
    assistant_blocks(
        agent_id,
        slug,
        timestamp,
        vec![json!({ "type": "tool_use", "id": "toolu_fixture", "name": name, "input": input })],
    )
}

/// User turn carrying a tool result
pub fn tool_result(agent_id: &str, slug: &str, timestamp: &str, output: &str, is_error: bool) -> String {
    envelope(
        "user",
        agent_id,
        slug,
        timestamp,
        json!({
            "role": "user",
            "content": [{
                "type": "tool_result",
                "tool_use_id": "toolu_fixture",
                "content": output,
                "is_error": is_error,
            }],
        }),
    )
}

/// Assistant turn with arbitrary blocks plus model and usage
pub fn assistant_blocks(agent_id: &str, slug: &str, timestamp: &str, blocks: Vec<Value>) -> String {
    envelope(
        "assistant",
        agent_id,
        slug,
        timestamp,
        json!({
            "role": "assistant",
            "model": "claude-sonnet-4-5",
            "content": blocks,
            "usage": { "input_tokens": 10, "output_tokens": 20 },
        }),
    )
}

/// `count` user lines with increasing seconds, for bulk content
pub fn numbered(agent_id: &str, slug: &str, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            user(
                agent_id,
                slug,
                &format!("2025-01-15T10:{:02}:{:02}Z", (i / 60) % 60, i % 60),
                &format!("line {}", i),
            )
        })
        .collect()
}
