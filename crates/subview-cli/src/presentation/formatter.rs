use chrono::TimeZone;
use std::fmt::Display;
use subview_runtime::DisplayFormat;
use subview_types::{AgentRecord, ContentBlock, MessageContent, RecordKind, tool_result_text};

use super::sanitize::sanitize_text;

const USER_LIMIT: usize = 200;
const THINKING_LIMIT: usize = 200;
const TEXT_LIMIT: usize = 200;
const TOOL_INPUT_LIMIT: usize = 80;
const RESULT_LIMIT: usize = 100;
const VERBOSE_DETAIL_LIMIT: usize = 100;

/// What a line shows; only used to pick a colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    User,
    Thinking,
    Text,
    ToolUse,
    ToolResult,
    ToolError,
    Detail,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub kind: LineKind,
    pub text: String,
}

impl DisplayLine {
    fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

pub fn truncate(text: &str, max_len: usize) -> String {
    let char_count = text.chars().count();

    if char_count <= max_len {
        text.to_string()
    } else if max_len <= 3 {
        text.chars().take(max_len).collect()
    } else {
        let truncated: String = text.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// `HH:MM:SS` in `tz`, or the raw timestamp when it does not parse.
fn clock<Tz>(record: &AgentRecord, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match record.parsed_timestamp() {
        Some(ts) => ts.with_timezone(tz).format("%H:%M:%S").to_string(),
        None => record.timestamp.clone(),
    }
}

pub fn format_record<Tz>(record: &AgentRecord, format: DisplayFormat, tz: &Tz) -> Vec<DisplayLine>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match format {
        DisplayFormat::Compact => format_compact(record, tz),
        DisplayFormat::Verbose => format_verbose(record, tz),
    }
}

pub fn format_records<Tz>(records: &[AgentRecord], format: DisplayFormat, tz: &Tz) -> Vec<DisplayLine>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    records
        .iter()
        .flat_map(|record| format_record(record, format, tz))
        .collect()
}

/// One line per block, each truncated to a per-kind limit.
pub fn format_compact<Tz>(record: &AgentRecord, tz: &Tz) -> Vec<DisplayLine>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = clock(record, tz);
    let mut lines = Vec::new();

    match &record.content {
        MessageContent::Text(text) => {
            if !text.trim().is_empty() {
                lines.push(DisplayLine::new(
                    LineKind::User,
                    format!("[{}] [U] User: {}", time, sanitize_text(&truncate(text, USER_LIMIT))),
                ));
            }
        }
        MessageContent::Blocks(blocks) => {
            for block in blocks {
                let line = match block {
                    ContentBlock::Thinking { thinking } => DisplayLine::new(
                        LineKind::Thinking,
                        format!(
                            "[{}] [?] Thinking: {}",
                            time,
                            sanitize_text(&truncate(thinking, THINKING_LIMIT))
                        ),
                    ),
                    ContentBlock::Text { text } => DisplayLine::new(
                        LineKind::Text,
                        format!(
                            "[{}] [T] Text: {}",
                            time,
                            sanitize_text(&truncate(text, TEXT_LIMIT))
                        ),
                    ),
                    ContentBlock::ToolUse { name, input, .. } => DisplayLine::new(
                        LineKind::ToolUse,
                        format!(
                            "[{}] [>] Tool: {} | {}",
                            time,
                            name,
                            sanitize_text(&truncate(&input.to_string(), TOOL_INPUT_LIMIT))
                        ),
                    ),
                    ContentBlock::ToolResult {
                        content, is_error, ..
                    } => {
                        let failed = is_error.unwrap_or(false);
                        let (kind, status) = if failed {
                            (LineKind::ToolError, "[X]")
                        } else {
                            (LineKind::ToolResult, "[OK]")
                        };
                        DisplayLine::new(
                            kind,
                            format!(
                                "[{}] {} Result: {}",
                                time,
                                status,
                                sanitize_text(&truncate(&tool_result_text(content), RESULT_LIMIT))
                            ),
                        )
                    }
                    ContentBlock::Unknown => continue,
                };
                lines.push(line);
            }
        }
    }

    lines
}

/// Header, every block in full (split on newlines), then a blank separator.
pub fn format_verbose<Tz>(record: &AgentRecord, tz: &Tz) -> Vec<DisplayLine>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let time = clock(record, tz);
    let who = match record.kind {
        RecordKind::User => "User".to_string(),
        RecordKind::Assistant => match &record.model {
            Some(model) => format!("Assistant ({})", model),
            None => "Assistant".to_string(),
        },
    };

    let mut lines = vec![DisplayLine::new(LineKind::Header, format!("[{}] {}", time, who))];

    match &record.content {
        MessageContent::Text(text) => push_multiline(&mut lines, LineKind::User, text),
        MessageContent::Blocks(blocks) => {
            for block in blocks {
                match block {
                    ContentBlock::Text { text } => push_multiline(&mut lines, LineKind::Text, text),
                    ContentBlock::Thinking { thinking } => {
                        push_multiline(&mut lines, LineKind::Thinking, thinking)
                    }
                    ContentBlock::ToolUse { name, input, .. } => {
                        lines.push(DisplayLine::new(LineKind::ToolUse, format!("Tool: {}", name)));
                        let pretty =
                            serde_json::to_string_pretty(input).unwrap_or_else(|_| input.to_string());
                        push_multiline(&mut lines, LineKind::Detail, &clip(&pretty));
                    }
                    ContentBlock::ToolResult {
                        content, is_error, ..
                    } => {
                        let header = if is_error.unwrap_or(false) {
                            DisplayLine::new(LineKind::ToolError, "Tool error")
                        } else {
                            DisplayLine::new(LineKind::ToolResult, "Tool result")
                        };
                        lines.push(header);
                        push_multiline(&mut lines, LineKind::Detail, &clip(&tool_result_text(content)));
                    }
                    ContentBlock::Unknown => {}
                }
            }
        }
    }

    lines.push(DisplayLine::new(LineKind::Blank, ""));
    lines
}

/// First 100 characters plus `...` when longer
fn clip(text: &str) -> String {
    if text.chars().count() <= VERBOSE_DETAIL_LIMIT {
        return text.to_string();
    }
    let head: String = text.chars().take(VERBOSE_DETAIL_LIMIT).collect();
    format!("{}...", head)
}

fn push_multiline(lines: &mut Vec<DisplayLine>, kind: LineKind, text: &str) {
    for line in text.lines() {
        lines.push(DisplayLine::new(kind, sanitize_text(line)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use subview_types::parse_record;

    fn record(line: serde_json::Value) -> AgentRecord {
        parse_record(&line.to_string()).unwrap()
    }

    fn texts(lines: &[DisplayLine]) -> Vec<String> {
        lines.iter().map(|l| l.text.clone()).collect()
    }

    fn assistant(blocks: serde_json::Value) -> AgentRecord {
        record(json!({
            "type": "assistant",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "2025-01-15T10:30:45.123Z",
            "message": { "role": "assistant", "model": "claude-sonnet-4-5", "content": blocks }
        }))
    }

    #[test]
    fn test_compact_user_string() {
        let rec = record(json!({
            "type": "user",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "2025-01-15T10:30:45Z",
            "message": { "role": "user", "content": "Find the config loader" }
        }));

        let lines = format_compact(&rec, &Utc);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::User);
        insta::assert_snapshot!(lines[0].text, @"[10:30:45] [U] User: Find the config loader");
    }

    #[test]
    fn test_compact_whitespace_user_produces_nothing() {
        let rec = record(json!({
            "type": "user",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "2025-01-15T10:30:45Z",
            "message": { "role": "user", "content": "   \n " }
        }));

        assert!(format_compact(&rec, &Utc).is_empty());
    }

    #[test]
    fn test_compact_blocks() {
        let rec = assistant(json!([
            { "type": "thinking", "thinking": "Need to look at main.rs" },
            { "type": "text", "text": "Checking the entry point." },
            { "type": "tool_use", "id": "t1", "name": "Read", "input": { "file_path": "/src/main.rs" } },
            { "type": "image", "source": {} }
        ]));

        let lines = format_compact(&rec, &Utc);
        let kinds: Vec<_> = lines.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LineKind::Thinking, LineKind::Text, LineKind::ToolUse]);
        insta::assert_snapshot!(texts(&lines).join("\n"), @r###"
        [10:30:45] [?] Thinking: Need to look at main.rs
        [10:30:45] [T] Text: Checking the entry point.
        [10:30:45] [>] Tool: Read | {"file_path":"/src/main.rs"}
        "###);
    }

    #[test]
    fn test_compact_tool_results() {
        let rec = record(json!({
            "type": "user",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "2025-01-15T10:30:45Z",
            "message": { "role": "user", "content": [
                { "type": "tool_result", "tool_use_id": "t1", "content": "fn main() {}" },
                { "type": "tool_result", "tool_use_id": "t2", "content": "No such file", "is_error": true }
            ]}
        }));

        let lines = format_compact(&rec, &Utc);
        assert_eq!(lines[0].kind, LineKind::ToolResult);
        assert_eq!(lines[1].kind, LineKind::ToolError);
        insta::assert_snapshot!(texts(&lines).join("\n"), @r###"
        [10:30:45] [OK] Result: fn main() {}
        [10:30:45] [X] Result: No such file
        "###);
    }

    #[test]
    fn test_compact_truncates_within_limit() {
        let long = "x".repeat(500);
        let rec = assistant(json!([
            { "type": "text", "text": long },
            { "type": "tool_use", "id": "t1", "name": "Bash", "input": { "command": "y".repeat(200) } }
        ]));

        let lines = format_compact(&rec, &Utc);
        let text_body = lines[0].text.strip_prefix("[10:30:45] [T] Text: ").unwrap();
        assert_eq!(text_body.chars().count(), 200);
        assert!(text_body.ends_with("..."));

        let tool_body = lines[1].text.strip_prefix("[10:30:45] [>] Tool: Bash | ").unwrap();
        assert_eq!(tool_body.chars().count(), 80);
        assert!(tool_body.ends_with("..."));
    }

    #[test]
    fn test_compact_sanitizes_content() {
        let rec = assistant(json!([{ "type": "text", "text": "done ✓\n\x1b[32mgreen\x1b[0m ⚡" }]));
        let lines = format_compact(&rec, &Utc);
        assert_eq!(lines[0].text, "[10:30:45] [T] Text: done  green *");
    }

    #[test]
    fn test_verbose_layout() {
        let rec = assistant(json!([
            { "type": "text", "text": "First line\nSecond line" },
            { "type": "tool_use", "id": "t1", "name": "Grep", "input": { "pattern": "fn main" } }
        ]));

        let lines = format_verbose(&rec, &Utc);
        assert_eq!(lines.first().map(|l| l.kind), Some(LineKind::Header));
        assert_eq!(lines.last().map(|l| l.kind), Some(LineKind::Blank));
        insta::assert_snapshot!(texts(&lines[..lines.len() - 1]).join("\n"), @r###"
        [10:30:45] Assistant (claude-sonnet-4-5)
        First line
        Second line
        Tool: Grep
        {
          "pattern": "fn main"
        }
        "###);
    }

    #[test]
    fn test_verbose_clips_long_tool_output() {
        let rec = record(json!({
            "type": "user",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "2025-01-15T10:30:45Z",
            "message": { "role": "user", "content": [
                { "type": "tool_result", "tool_use_id": "t1", "content": "z".repeat(250) }
            ]}
        }));

        let lines = format_verbose(&rec, &Utc);
        assert_eq!(texts(&lines[..2]), vec!["[10:30:45] User", "Tool result"]);
        assert_eq!(lines[2].text, format!("{}...", "z".repeat(100)));
    }

    #[test]
    fn test_unparseable_timestamp_is_shown_raw() {
        let rec = record(json!({
            "type": "user",
            "agentId": "a1",
            "slug": "explore",
            "timestamp": "yesterday",
            "message": { "role": "user", "content": "hi" }
        }));

        assert_eq!(format_compact(&rec, &Utc)[0].text, "[yesterday] [U] User: hi");
    }

    #[test]
    fn test_format_records_concatenates_in_order() {
        let a = assistant(json!([{ "type": "text", "text": "one" }]));
        let b = assistant(json!([{ "type": "text", "text": "two" }]));
        let lines = format_records(&[a, b], DisplayFormat::Compact, &Utc);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].text.ends_with("two"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly ten", 11), "exactly ten");
        assert_eq!(truncate("abcdefghij", 6), "abc...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
