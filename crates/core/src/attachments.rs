//! Attachment metadata and the reconciler.
//!
//! A submission carries (a) the attachment records the client asserts
//! should be retained, serialized from the prior persisted state, and
//! (b) zero or more newly staged uploads. [`reconcile`] merges both into
//! the parent's next attachment set: retained records pass through
//! unchanged, each staged upload becomes a fresh record with a new id.
//! Removal never reaches this layer — the client subtracts before
//! submitting, so the reconciler only ever sees what remains.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{Id, Timestamp};

/// Server-side per-file size cap, enforced here at the reconciler boundary.
pub const MAX_ATTACHMENT_SIZE_BYTES: i64 = 10 * 1024 * 1024;

/// Which entity kind an attachment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelatedType {
    Project,
    Product,
}

impl RelatedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "PROJECT",
            Self::Product => "PRODUCT",
        }
    }
}

/// Full attachment metadata record. Immutable once created; a parent's set
/// is only ever replaced wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentRecord {
    pub id: Id,
    /// Stored filename (unique, derived from the id).
    pub filename: String,
    /// Filename as uploaded by the client.
    pub original_name: String,
    pub mime_type: String,
    /// Size in bytes, non-negative.
    pub size: i64,
    /// Opaque locator for the bytes.
    pub url: String,
    pub related_id: Id,
    pub related_type: RelatedType,
    pub uploaded_at: Timestamp,
}

/// Metadata of a newly staged upload, before it has an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct StagedUpload {
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum AttachmentError {
    #[error("El archivo '{name}' supera el tamaño máximo de 10MB ({size} bytes)")]
    TooLarge { name: String, size: i64 },
}

/// Merge the retained set with freshly wrapped staged uploads.
///
/// Retained records are returned first and unchanged; staged uploads follow
/// in submission order, each with a fresh id, `uploaded_at` set to now, and
/// the parent's `related_id`/`related_type`. Reconciling an unchanged
/// retained set with no staged uploads yields an identical set.
pub fn reconcile(
    retained: Vec<AttachmentRecord>,
    staged: &[StagedUpload],
    related_type: RelatedType,
    related_id: Id,
) -> Result<Vec<AttachmentRecord>, AttachmentError> {
    for upload in staged {
        if upload.size > MAX_ATTACHMENT_SIZE_BYTES {
            return Err(AttachmentError::TooLarge {
                name: upload.original_name.clone(),
                size: upload.size,
            });
        }
    }

    let mut attachments = retained;
    attachments.reserve(staged.len());
    for upload in staged {
        let id = Uuid::new_v4();
        let filename = format!("{id}_{}", sanitize_filename(&upload.original_name));
        let url = format!("/uploads/{filename}");
        attachments.push(AttachmentRecord {
            id,
            filename,
            original_name: upload.original_name.clone(),
            mime_type: upload.mime_type.clone(),
            size: upload.size,
            url,
            related_id,
            related_type,
            uploaded_at: chrono::Utc::now(),
        });
    }
    Ok(attachments)
}

/// Reduce a client filename to a safe stored-name suffix.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "archivo".to_string()
    } else {
        cleaned
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn existing(related_id: Id) -> AttachmentRecord {
        AttachmentRecord {
            id: Uuid::new_v4(),
            filename: "anexo-1.pdf".into(),
            original_name: "Anexo Importante 1.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 350 * 1024,
            url: "/uploads/anexo-1.pdf".into(),
            related_id,
            related_type: RelatedType::Project,
            uploaded_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn empty_inputs_yield_empty_set() {
        let parent = Uuid::new_v4();
        let out = reconcile(vec![], &[], RelatedType::Project, parent).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn reconcile_is_idempotent_for_unchanged_set() {
        let parent = Uuid::new_v4();
        let current = vec![existing(parent), existing(parent)];
        let out = reconcile(current.clone(), &[], RelatedType::Project, parent).unwrap();
        assert_eq!(out, current);
    }

    #[test]
    fn staged_upload_gets_fresh_identity() {
        let parent = Uuid::new_v4();
        let staged = [StagedUpload {
            original_name: "informe final.pdf".into(),
            mime_type: "application/pdf".into(),
            size: 1024,
        }];
        let out = reconcile(vec![], &staged, RelatedType::Product, parent).unwrap();
        assert_eq!(out.len(), 1);
        let new = &out[0];
        assert_eq!(new.original_name, "informe final.pdf");
        assert_eq!(new.mime_type, "application/pdf");
        assert_eq!(new.size, 1024);
        assert_eq!(new.related_id, parent);
        assert_eq!(new.related_type, RelatedType::Product);
        assert!(new.filename.starts_with(&new.id.to_string()));
        assert_eq!(new.url, format!("/uploads/{}", new.filename));
    }

    #[test]
    fn retained_precede_staged_in_order() {
        let parent = Uuid::new_v4();
        let kept = existing(parent);
        let staged = [
            StagedUpload {
                original_name: "a.pdf".into(),
                mime_type: "application/pdf".into(),
                size: 1,
            },
            StagedUpload {
                original_name: "b.pdf".into(),
                mime_type: "application/pdf".into(),
                size: 2,
            },
        ];
        let out = reconcile(vec![kept.clone()], &staged, RelatedType::Project, parent).unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0], kept);
        assert_eq!(out[1].original_name, "a.pdf");
        assert_eq!(out[2].original_name, "b.pdf");
    }

    #[test]
    fn retained_records_pass_through_unchanged() {
        let parent = Uuid::new_v4();
        let kept = existing(parent);
        let out = reconcile(vec![kept.clone()], &[], RelatedType::Project, parent).unwrap();
        assert_eq!(out[0].id, kept.id);
        assert_eq!(out[0].uploaded_at, kept.uploaded_at);
        assert_eq!(out[0].url, kept.url);
    }

    #[test]
    fn two_staged_uploads_get_distinct_ids() {
        let parent = Uuid::new_v4();
        let staged = [
            StagedUpload {
                original_name: "x.pdf".into(),
                mime_type: "application/pdf".into(),
                size: 1,
            },
            StagedUpload {
                original_name: "x.pdf".into(),
                mime_type: "application/pdf".into(),
                size: 1,
            },
        ];
        let out = reconcile(vec![], &staged, RelatedType::Project, parent).unwrap();
        assert_ne!(out[0].id, out[1].id);
        assert_ne!(out[0].filename, out[1].filename);
    }

    #[test]
    fn upload_at_limit_accepted() {
        let parent = Uuid::new_v4();
        let staged = [StagedUpload {
            original_name: "grande.pdf".into(),
            mime_type: "application/pdf".into(),
            size: MAX_ATTACHMENT_SIZE_BYTES,
        }];
        assert!(reconcile(vec![], &staged, RelatedType::Project, parent).is_ok());
    }

    #[test]
    fn oversized_upload_rejected() {
        let parent = Uuid::new_v4();
        let staged = [StagedUpload {
            original_name: "enorme.bin".into(),
            mime_type: "application/octet-stream".into(),
            size: MAX_ATTACHMENT_SIZE_BYTES + 1,
        }];
        let err = reconcile(vec![], &staged, RelatedType::Project, parent).unwrap_err();
        assert!(err.to_string().contains("enorme.bin"));
    }

    #[test]
    fn oversized_upload_rejects_whole_submission() {
        // One bad file fails reconciliation before any record is produced.
        let parent = Uuid::new_v4();
        let staged = [
            StagedUpload {
                original_name: "ok.pdf".into(),
                mime_type: "application/pdf".into(),
                size: 10,
            },
            StagedUpload {
                original_name: "enorme.bin".into(),
                mime_type: "application/octet-stream".into(),
                size: MAX_ATTACHMENT_SIZE_BYTES + 1,
            },
        ];
        assert!(reconcile(vec![], &staged, RelatedType::Project, parent).is_err());
    }

    #[test]
    fn filenames_are_sanitized() {
        let parent = Uuid::new_v4();
        let staged = [StagedUpload {
            original_name: "informe año/1 (v2).pdf".into(),
            mime_type: "application/pdf".into(),
            size: 1,
        }];
        let out = reconcile(vec![], &staged, RelatedType::Project, parent).unwrap();
        let suffix = out[0].filename.split_once('_').unwrap().1;
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')));
        // The original name is preserved verbatim in the metadata.
        assert_eq!(out[0].original_name, "informe año/1 (v2).pdf");
    }

    #[test]
    fn record_serializes_with_camel_case_keys() {
        let parent = Uuid::new_v4();
        let record = existing(parent);
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("originalName").is_some());
        assert!(json.get("mimeType").is_some());
        assert!(json.get("relatedType").is_some());
        assert_eq!(json["relatedType"], "PROJECT");
        assert!(json.get("uploadedAt").is_some());
    }
}
