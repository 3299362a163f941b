use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tf_provider::{map, AttributeType, Schema, Value};
use tracing::{debug, info, warn};
use zendesk_client::ZendeskClient;
use zendesk_domain::Attachment;

use crate::error::ProviderError;
use crate::marshal::{
    carry_over, id_value, known, known_string, parse_id, set_of, settle, unknown_if_null, value, ValueSet,
};
use crate::resource::ResourceOps;
use crate::schema::{block, boolean, id, int, object_set, schema, string, Computed, Required};
use crate::validate::{is_valid_file, Violation};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThumbnailState {
    pub id: Value<i64>,
    pub file_name: Value<String>,
    pub content_type: Value<String>,
    pub size: Value<i64>,
    pub content_url: Value<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentState {
    pub id: Value<String>,
    pub file_path: Value<String>,
    pub file_name: Value<String>,
    pub file_hash: Value<String>,
    pub token: Value<String>,
    pub content_url: Value<String>,
    pub content_type: Value<String>,
    pub size: Value<i64>,
    pub inline: Value<bool>,
    pub thumbnails: ValueSet<ThumbnailState>,
}

/// Hex SHA-256 of a file, the same digest Terraform's `filesha256()` gives.
pub async fn file_sha256(path: &str) -> Result<String, ProviderError> {
    let content = tokio::fs::read(path).await.map_err(|source| ProviderError::Io {
        path: path.to_string(),
        source,
    })?;
    Ok(format!("{:x}", Sha256::digest(&content)))
}

impl AttachmentState {
    /// `file_path`, `file_hash` and `token` never come back from the API.
    fn from_attachment(attachment: Attachment, prior: &AttachmentState) -> Self {
        let thumbnails = attachment
            .thumbnails
            .into_iter()
            .map(|t| ThumbnailState {
                id:           value(t.id.unwrap_or_default()),
                file_name:    value(t.file_name),
                content_type: value(t.content_type),
                size:         value(t.size),
                content_url:  value(t.content_url),
            })
            .collect::<Vec<_>>();
        Self {
            id:           id_value(attachment.id),
            file_path:    carry_over(&prior.file_path),
            file_name:    value(attachment.file_name),
            file_hash:    carry_over(&prior.file_hash),
            token:        carry_over(&prior.token),
            content_url:  value(attachment.content_url),
            content_type: value(attachment.content_type),
            size:         value(attachment.size),
            inline:       value(attachment.inline),
            thumbnails:   set_of(thumbnails),
        }
    }
}

pub struct AttachmentResource;

#[async_trait]
impl ResourceOps for AttachmentResource {
    const TYPE_NAME: &'static str = "zendesk_attachment";
    type State = AttachmentState;

    fn schema() -> Schema {
        let thumbnail = [
            ("id", AttributeType::Number),
            ("file_name", AttributeType::String),
            ("content_type", AttributeType::String),
            ("size", AttributeType::Number),
            ("content_url", AttributeType::String),
        ];
        schema(block(
            "Provides an attachment resource.",
            map! {
                "id"           => id("Id of the attachment."),
                "file_path"    => string(Required, "Local path of the file to upload."),
                "file_name"    => string(Required, "Name the file is stored under. Changing it uploads a new file."),
                "file_hash"    => string(Required, "SHA-256 of the file, e.g. filesha256(path). Changing it uploads a new file."),
                "token"        => string(Computed, "Token of the upload."),
                "content_url"  => string(Computed, "URL the file can be downloaded from."),
                "content_type" => string(Computed, "Content type of the file, e.g. image/png."),
                "size"         => int(Computed, "Size of the file in bytes."),
                "inline"       => boolean(Computed, "Whether the attachment is excluded from the attachment list."),
                "thumbnails"   => object_set(&thumbnail, Computed, "Thumbnails Zendesk generated for an image."),
            },
            map! {},
        ))
    }

    fn validate(config: &AttachmentState) -> Vec<Violation> {
        is_valid_file("file_path", &config.file_path).into_iter().collect()
    }

    fn mark_computed(planned: &mut AttachmentState) {
        unknown_if_null(&mut planned.id);
        unknown_if_null(&mut planned.token);
        unknown_if_null(&mut planned.content_url);
        unknown_if_null(&mut planned.content_type);
        unknown_if_null(&mut planned.size);
        unknown_if_null(&mut planned.inline);
        unknown_if_null(&mut planned.thumbnails);
    }

    fn requires_replace(prior: &AttachmentState, planned: &AttachmentState) -> Vec<&'static str> {
        let mut replace = Vec::new();
        if prior.file_name != planned.file_name {
            replace.push("file_name");
        }
        if prior.file_hash != planned.file_hash {
            replace.push("file_hash");
        }
        replace
    }

    fn settle(applied: AttachmentState, planned: &AttachmentState) -> AttachmentState {
        AttachmentState {
            id:           settle(&planned.id, applied.id),
            file_path:    settle(&planned.file_path, applied.file_path),
            file_name:    settle(&planned.file_name, applied.file_name),
            file_hash:    settle(&planned.file_hash, applied.file_hash),
            token:        settle(&planned.token, applied.token),
            content_url:  settle(&planned.content_url, applied.content_url),
            content_type: settle(&planned.content_type, applied.content_type),
            size:         settle(&planned.size, applied.size),
            inline:       settle(&planned.inline, applied.inline),
            thumbnails:   settle(&planned.thumbnails, applied.thumbnails),
        }
    }

    fn import_state(id: String) -> AttachmentState {
        AttachmentState { id: value(id), ..Default::default() }
    }

    async fn create(client: &ZendeskClient, planned: &AttachmentState) -> Result<AttachmentState, ProviderError> {
        let path = known(&planned.file_path).cloned().unwrap_or_default();
        let file_name = known(&planned.file_name).cloned().unwrap_or_default();
        let content = tokio::fs::read(&path)
            .await
            .map_err(|source| ProviderError::Io { path: path.clone(), source })?;

        let upload = client.upload_attachment(&file_name, content).await?;
        info!(id = ?upload.attachment.id, %file_name, "uploaded attachment");

        let mut state = AttachmentState::from_attachment(upload.attachment, planned);
        state.token = value(upload.token);
        Ok(state)
    }

    /// `file_hash` keeps the uploaded content's hash, so a changed file shows
    /// up as a diff against `filesha256()` in the configuration.
    async fn read(client: &ZendeskClient, prior: &AttachmentState) -> Result<AttachmentState, ProviderError> {
        let id = parse_id("attachment", &prior.id)?;
        let attachment = client.get_attachment(id).await?;

        if let Some(path) = known_string(&prior.file_path) {
            match file_sha256(&path).await {
                Ok(hash) if Some(&hash) != known(&prior.file_hash) => {
                    warn!(id, %path, "attachment file changed since upload");
                }
                Ok(_) => {}
                Err(e) => debug!(id, error = %e, "cannot hash attachment file"),
            }
        }
        Ok(AttachmentState::from_attachment(attachment, prior))
    }

    async fn update(
        client: &ZendeskClient,
        prior: &AttachmentState,
        _planned: &AttachmentState,
    ) -> Result<AttachmentState, ProviderError> {
        Self::read(client, prior).await
    }

    async fn delete(client: &ZendeskClient, state: &AttachmentState) -> Result<(), ProviderError> {
        let Some(token) = known_string(&state.token) else {
            return Ok(());
        };
        client.delete_upload(&token).await?;
        info!(%token, "deleted attachment upload");
        Ok(())
    }
}
