mod domain;

#[allow(unused_imports)]
pub use domain::{
    CommandAction, CommandRequest, CommandResponse, CommandStatus, CreateTagPayload,
    ErrorEnvelope, PathPayload, SaveTagsPayload, TagIdPayload, TagPathPayload, TagPayload,
    INTERNAL, INVALID_REQUEST,
};

use domain::parse_payload;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tagdex_index::{Tag, TagIndex, TagIndexError, TagsChanged, DEFAULT_TAG_COLOR};
use tokio::sync::{broadcast, Mutex};

/// Runs requests against one [`TagIndex`].
///
/// The index sits behind a single async mutex held for the whole request,
/// so the load, mutate and save steps of two requests never interleave even
/// when they arrive concurrently. File I/O and the write lock run on the
/// blocking pool.
pub struct CommandHandler {
    index: Arc<Mutex<TagIndex>>,
}

impl CommandHandler {
    pub fn new(index: TagIndex) -> Self {
        Self {
            index: Arc::new(Mutex::new(index)),
        }
    }

    pub async fn subscribe(&self) -> broadcast::Receiver<TagsChanged> {
        self.index.lock().await.subscribe()
    }

    /// Parses and executes one raw JSON request. Parse failures become an
    /// `invalid_request` response rather than an error.
    pub async fn execute_raw(&self, raw: &str) -> CommandResponse {
        match serde_json::from_str::<CommandRequest>(raw) {
            Ok(request) => self.execute(request).await,
            Err(err) => {
                log::warn!("Rejected request: {err}");
                CommandResponse::error(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid request: {err}"),
                )
            }
        }
    }

    pub async fn execute(&self, request: CommandRequest) -> CommandResponse {
        let started = Instant::now();
        let action = request.action;

        let mut index = Arc::clone(&self.index).lock_owned().await;
        let dispatched = tokio::task::spawn_blocking(move || dispatch(&mut index, request)).await;
        let response = match dispatched {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => {
                log::warn!("Invalid payload for {}: {err}", action.as_str());
                CommandResponse::error(
                    Value::Null,
                    INVALID_REQUEST,
                    format!("Invalid payload for {}: {err}", action.as_str()),
                )
            }
            Err(err) => {
                log::error!("{} aborted: {err}", action.as_str());
                CommandResponse::error(
                    Value::Null,
                    INTERNAL,
                    format!("{} aborted: {err}", action.as_str()),
                )
            }
        };

        log::debug!(
            "{} finished in {} ms",
            action.as_str(),
            started.elapsed().as_millis()
        );
        response
    }
}

fn dispatch(index: &mut TagIndex, request: CommandRequest) -> serde_json::Result<CommandResponse> {
    let CommandRequest { action, payload } = request;
    let response = match action {
        CommandAction::LoadTags => CommandResponse::ok(serde_json::to_value(index.load_tags())?),
        CommandAction::RefreshTags => CommandResponse::ok(serde_json::to_value(index.refresh())?),
        CommandAction::SaveTags => {
            let SaveTagsPayload { tags } = parse_payload(payload)?;
            match index.save_tags(&tags) {
                Ok(()) => CommandResponse::ok(Value::Bool(true)),
                Err(err) => failure(Value::Bool(false), action, &err),
            }
        }
        CommandAction::AddTag => {
            let TagPayload { tag } = parse_payload(payload)?;
            tag_outcome(action, index.add_tag(tag))?
        }
        CommandAction::CreateTag => {
            let CreateTagPayload {
                name,
                color,
                target_type,
            } = parse_payload(payload)?;
            let color = color.unwrap_or_else(|| DEFAULT_TAG_COLOR.to_string());
            tag_outcome(
                action,
                index.create_tag(name, color, target_type.unwrap_or_default()),
            )?
        }
        CommandAction::UpdateTag => {
            let TagPayload { tag } = parse_payload(payload)?;
            tag_outcome(action, index.update_tag(tag))?
        }
        CommandAction::RemoveTag => {
            let TagIdPayload { tag_id } = parse_payload(payload)?;
            match index.remove_tag(&tag_id) {
                Ok(removed) => CommandResponse::ok(Value::Bool(removed)),
                Err(err) => failure(Value::Bool(false), action, &err),
            }
        }
        CommandAction::GetFileTags => {
            let PathPayload { path } = parse_payload(payload)?;
            CommandResponse::ok(serde_json::to_value(index.get_tags_for_path(&path))?)
        }
        CommandAction::AddPathToTag => {
            let TagPathPayload { tag_id, path } = parse_payload(payload)?;
            tag_outcome(action, index.add_path_to_tag(&tag_id, &path))?
        }
        CommandAction::RemovePathFromTag => {
            let TagPathPayload { tag_id, path } = parse_payload(payload)?;
            tag_outcome(action, index.remove_path_from_tag(&tag_id, &path))?
        }
    };
    Ok(response)
}

fn tag_outcome(
    action: CommandAction,
    result: tagdex_index::Result<Tag>,
) -> serde_json::Result<CommandResponse> {
    match result {
        Ok(tag) => Ok(CommandResponse::ok(serde_json::to_value(tag)?)),
        Err(err) => Ok(failure(Value::Null, action, &err)),
    }
}

fn failure(data: Value, action: CommandAction, err: &TagIndexError) -> CommandResponse {
    match err {
        TagIndexError::Storage(_) => log::error!("{} failed: {err}", action.as_str()),
        _ => log::info!("{}: {err}", action.as_str()),
    }
    CommandResponse::error(data, err.code(), err.to_string())
}
