use serde::Deserialize;
use serde_json::Value;

use crate::record::{AgentRecord, ContentBlock, MessageContent, RecordKind, Usage};
use crate::{Error, Result};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(rename = "type")]
    kind: Option<String>,
    agent_id: Option<String>,
    slug: Option<String>,
    timestamp: Option<String>,
    message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
struct RawMessage {
    role: Option<String>,
    content: Option<Value>,
    #[serde(default)]
    model: Option<Value>,
    #[serde(default)]
    usage: Option<Value>,
}

/// Parse one JSONL line into a validated record.
///
/// Any failure is an `Err`; callers reading transcripts skip the line and
/// keep going.
pub fn parse_record(line: &str) -> Result<AgentRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidRecord("empty line".to_string()));
    }

    let raw: RawRecord = serde_json::from_str(trimmed)?;

    let kind_raw = required(raw.kind, "type")?;
    let kind = RecordKind::parse(&kind_raw)
        .ok_or_else(|| Error::InvalidRecord(format!("unsupported type '{}'", kind_raw)))?;
    let agent_id = required(raw.agent_id, "agentId")?;
    let slug = required(raw.slug, "slug")?;
    let timestamp = required(raw.timestamp, "timestamp")?;

    let message = raw
        .message
        .ok_or_else(|| Error::InvalidRecord("missing message".to_string()))?;
    let role = required(message.role, "message.role")?;
    let content = match message.content {
        Some(Value::String(text)) => MessageContent::Text(text),
        Some(Value::Array(items)) => MessageContent::Blocks(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or(ContentBlock::Unknown))
                .collect(),
        ),
        _ => {
            return Err(Error::InvalidRecord(
                "message.content must be a string or an array".to_string(),
            ));
        }
    };

    Ok(AgentRecord {
        kind,
        agent_id,
        slug,
        timestamp,
        role,
        content,
        model: message.model.and_then(|v| v.as_str().map(str::to_string)),
        usage: message.usage.and_then(lenient_usage),
    })
}

/// Optional metadata never invalidates a record; an unexpected shape reads as absent.
fn lenient_usage(value: Value) -> Option<Usage> {
    serde_json::from_value(value).ok()
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(Error::InvalidRecord(format!("missing {}", field))),
    }
}
