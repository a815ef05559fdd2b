//! Multipart intake for workflow submissions.
//!
//! A submission is one multipart form: text parts become the raw field map
//! handed to validation, the `existingAttachments` part carries the
//! JSON-serialized metadata of attachments the client kept, and each
//! `attachments` file part is a newly staged upload.

use axum::body::Bytes;
use axum::extract::Multipart;
use ctei_core::attachments::{AttachmentRecord, StagedUpload};
use ctei_core::validation::RawFields;

use crate::error::AppError;

/// Fallback MIME type for file parts that declare none.
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// One staged upload: metadata for the reconciler plus the buffered bytes.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub meta: StagedUpload,
    pub bytes: Bytes,
}

/// A fully read submission, ready for the workflow.
#[derive(Debug, Default)]
pub struct Submission {
    /// Raw text fields, keyed by submitted field name.
    pub fields: RawFields,
    /// Attachment records the client asserts should be retained.
    pub existing: Vec<AttachmentRecord>,
    /// Newly staged uploads, in submission order.
    pub staged: Vec<StagedFile>,
}

/// Drain a multipart stream into a [`Submission`].
pub async fn read_submission(mut multipart: Multipart) -> Result<Submission, AppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "attachments" => {
                let original_name = field.file_name().unwrap_or("archivo").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or(DEFAULT_MIME_TYPE)
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                submission.staged.push(StagedFile {
                    meta: StagedUpload {
                        original_name,
                        mime_type,
                        size: bytes.len() as i64,
                    },
                    bytes,
                });
            }
            "existingAttachments" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !text.is_empty() {
                    submission.existing = serde_json::from_str(&text).map_err(|e| {
                        AppError::BadRequest(format!("Invalid existingAttachments payload: {e}"))
                    })?;
                }
            }
            "" => {} // ignore nameless parts
            _ => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                submission.fields.insert(name, text);
            }
        }
    }

    Ok(submission)
}
