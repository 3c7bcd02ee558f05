use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tagdex_index::{Tag, TagId, TargetType};

#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    pub action: CommandAction,
    #[serde(default = "empty_payload")]
    pub payload: Value,
}

fn empty_payload() -> Value {
    Value::Object(Default::default())
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CommandAction {
    LoadTags,
    SaveTags,
    AddTag,
    CreateTag,
    UpdateTag,
    RemoveTag,
    GetFileTags,
    AddPathToTag,
    RemovePathFromTag,
    RefreshTags,
}

impl CommandAction {
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandAction::LoadTags => "load-tags",
            CommandAction::SaveTags => "save-tags",
            CommandAction::AddTag => "add-tag",
            CommandAction::CreateTag => "create-tag",
            CommandAction::UpdateTag => "update-tag",
            CommandAction::RemoveTag => "remove-tag",
            CommandAction::GetFileTags => "get-file-tags",
            CommandAction::AddPathToTag => "add-path-to-tag",
            CommandAction::RemovePathFromTag => "remove-path-from-tag",
            CommandAction::RefreshTags => "refresh-tags",
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveTagsPayload {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagPayload {
    pub tag: Tag,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTagPayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_type: Option<TargetType>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagIdPayload {
    pub tag_id: TagId,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PathPayload {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagPathPayload {
    pub tag_id: TagId,
    pub path: String,
}

pub fn parse_payload<T: DeserializeOwned>(payload: Value) -> serde_json::Result<T> {
    serde_json::from_value(payload)
}

#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub status: CommandStatus,
    /// Same shape the host always received: a tag, a list of tags, a
    /// boolean, or `null` when the operation did not take effect.
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorEnvelope>,
}

impl CommandResponse {
    pub fn ok(data: Value) -> Self {
        Self {
            status: CommandStatus::Ok,
            data,
            error: None,
        }
    }

    pub fn error(data: Value, code: &str, message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Error,
            data,
            error: Some(ErrorEnvelope {
                code: code.to_string(),
                message: message.into(),
            }),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.status, CommandStatus::Error)
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommandStatus {
    Ok,
    Error,
}

#[derive(Debug, Serialize, Clone)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
}

pub const INVALID_REQUEST: &str = "invalid_request";
pub const INTERNAL: &str = "internal";

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn actions_use_host_channel_names() {
        let request: CommandRequest = serde_json::from_value(json!({
            "action": "remove-path-from-tag",
            "payload": {"tagId": "t", "path": "/p"}
        }))
        .unwrap();
        assert_eq!(request.action, CommandAction::RemovePathFromTag);
        assert_eq!(request.action.as_str(), "remove-path-from-tag");

        let payload: TagPathPayload = parse_payload(request.payload).unwrap();
        assert_eq!(payload.tag_id.as_str(), "t");
    }

    #[test]
    fn payload_defaults_to_empty_object() {
        let request: CommandRequest =
            serde_json::from_value(json!({"action": "load-tags"})).unwrap();
        assert_eq!(request.payload, json!({}));
    }

    #[test]
    fn unknown_action_is_rejected() {
        assert!(serde_json::from_value::<CommandRequest>(json!({"action": "nuke"})).is_err());
    }

    #[test]
    fn error_response_omits_nothing_the_host_needs() {
        let response = CommandResponse::error(Value::Null, "not_found", "Tag not found: x");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "status": "error",
                "data": null,
                "error": {"code": "not_found", "message": "Tag not found: x"}
            })
        );
    }
}
