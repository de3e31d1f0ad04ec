use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    User,
    Assistant,
}

impl RecordKind {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(RecordKind::User),
            "assistant" => Some(RecordKind::Assistant),
            _ => None,
        }
    }
}

/// One content block of a structured message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        tool_use_id: String,
        #[serde(default)]
        content: Value,
        #[serde(default)]
        is_error: Option<bool>,
    },
    Thinking {
        thinking: String,
    },
    /// Block types this viewer does not render (images, redacted thinking, ...)
    #[serde(other)]
    Unknown,
}

/// Message body: plain string for simple user turns, otherwise ordered blocks
#[derive(Debug, Clone, PartialEq)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
}

impl MessageContent {
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            MessageContent::Text(_) => &[],
            MessageContent::Blocks(blocks) => blocks,
        }
    }

    /// The plain string body, if this is not a block list
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::Blocks(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub cache_creation_input_tokens: Option<u64>,
    #[serde(default)]
    pub cache_read_input_tokens: Option<u64>,
}

impl Usage {
    /// Input side including cache reads and writes
    pub fn total_input(&self) -> u64 {
        self.input_tokens.unwrap_or(0)
            + self.cache_creation_input_tokens.unwrap_or(0)
            + self.cache_read_input_tokens.unwrap_or(0)
    }

    pub fn total_output(&self) -> u64 {
        self.output_tokens.unwrap_or(0)
    }
}

/// One validated line of an agent transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentRecord {
    pub kind: RecordKind,
    pub agent_id: String,
    pub slug: String,
    /// ISO-8601 as written by the producer; not guaranteed strictly increasing
    pub timestamp: String,
    pub role: String,
    pub content: MessageContent,
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

impl AgentRecord {
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Flatten a tool_result payload to display text.
///
/// Results are either a plain string or an array of `{type: "text", text}`
/// blocks; anything else falls back to compact JSON.
pub fn tool_result_text(content: &Value) -> String {
    match content {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Array(items) => {
            let texts: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("text").and_then(Value::as_str))
                .collect();
            if texts.len() == items.len() {
                texts.join("\n")
            } else {
                content.to_string()
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_block_type_is_tolerated() {
        let block: ContentBlock = serde_json::from_value(json!({"type": "image", "source": {}}))
            .expect("unknown block should decode");
        assert_eq!(block, ContentBlock::Unknown);
    }

    #[test]
    fn test_tool_result_text_variants() {
        assert_eq!(tool_result_text(&json!("plain")), "plain");
        assert_eq!(
            tool_result_text(&json!([{"type": "text", "text": "a"}, {"type": "text", "text": "b"}])),
            "a\nb"
        );
        assert_eq!(tool_result_text(&json!({"k": 1})), r#"{"k":1}"#);
        assert_eq!(tool_result_text(&Value::Null), "");
    }

    #[test]
    fn test_usage_totals() {
        let usage = Usage {
            input_tokens: Some(10),
            output_tokens: Some(5),
            cache_creation_input_tokens: Some(100),
            cache_read_input_tokens: None,
        };
        assert_eq!(usage.total_input(), 110);
        assert_eq!(usage.total_output(), 5);
    }
}
