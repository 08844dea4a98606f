use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

/// Metadata fields submitted alongside the files of an upload.
///
/// Every field is optional at this level: under strict validation the
/// handler rejects incomplete submissions before a record is built, while
/// the lenient variant persists whatever arrived. Absent fields stay absent
/// in the stored document.
#[derive(Debug, Default, Clone)]
pub struct UploadMeta {
    pub kind: Option<String>,
    pub branch: Option<String>,
    pub sem: Option<String>,
    pub subject: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub author: Option<String>,
}

/// Shared-document record as stored in the `uploads` collection.
///
/// Serialized field names are `type`, `frontFile`, `tocFile` and
/// `createdAt`. `tocFile` is serialized as an explicit null when missing;
/// the other optional fields are omitted. Records are never mutated or
/// deleted once written.
#[derive(Debug, Serialize, Deserialize, Clone, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Upload {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub id: Option<ObjectId>,
    /// Always "lender"; borrowers never create records.
    pub role: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Stored blob name of the front page. Required under strict
    /// validation; the lenient variant admits records without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_file: Option<String>,
    /// Stored blob name of the table of contents, null when not supplied.
    #[serde(default)]
    pub toc_file: Option<String>,
    #[schema(value_type = String)]
    pub created_at: BsonDateTime,
}

impl Upload {
    /// Builds a lender record, stamping the creation time at construction.
    pub fn new(meta: UploadMeta, front_file: Option<String>, toc_file: Option<String>) -> Self {
        Self {
            id: None,
            role: "lender".to_string(),
            kind: meta.kind,
            branch: meta.branch,
            sem: meta.sem,
            subject: meta.subject,
            email: meta.email,
            phone: meta.phone,
            author: meta.author,
            front_file,
            toc_file,
            created_at: BsonDateTime::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_meta() -> UploadMeta {
        UploadMeta {
            kind: Some("notes".into()),
            branch: Some("CSE".into()),
            sem: Some("5".into()),
            subject: Some("DBMS".into()),
            email: Some("a@x.com".into()),
            phone: None,
            author: Some("A. Author".into()),
        }
    }

    #[test]
    fn test_new_stamps_role_and_timestamp() {
        let before = BsonDateTime::now();
        let upload = Upload::new(sample_meta(), Some("1_front.pdf".into()), None);
        assert_eq!(upload.role, "lender");
        assert!(upload.id.is_none());
        assert!(upload.created_at >= before);
    }

    #[test]
    fn test_wire_field_names() {
        let upload = Upload::new(
            sample_meta(),
            Some("1_front.pdf".into()),
            Some("1_toc.pdf".into()),
        );
        let json = serde_json::to_value(&upload).unwrap();

        assert_eq!(json["type"], "notes");
        assert_eq!(json["frontFile"], "1_front.pdf");
        assert_eq!(json["tocFile"], "1_toc.pdf");
        assert!(json.get("createdAt").is_some());
        // absent optional metadata is omitted entirely
        assert!(json.get("phone").is_none());
        assert!(json.get("kind").is_none());
        assert!(json.get("front_file").is_none());
    }

    #[test]
    fn test_missing_toc_serializes_as_null() {
        let upload = Upload::new(sample_meta(), Some("1_front.pdf".into()), None);
        let json = serde_json::to_value(&upload).unwrap();
        assert!(json["tocFile"].is_null());
        assert!(json.get("tocFile").is_some());
    }
}
