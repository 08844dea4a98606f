use crate::{database::MongoDB, models::Upload, utils::error::AppError};
use mongodb::bson::doc;
use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    pub message: String,
}

/// Persists an already-constructed upload record.
pub async fn create_upload(db: &MongoDB, upload: Upload) -> Result<UploadResponse, AppError> {
    let collection = db.collection::<Upload>("uploads");

    collection
        .insert_one(&upload)
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    Ok(UploadResponse {
        success: true,
        message: "Upload successful 🎉".to_string(),
    })
}

/// Retrieves every upload record, store default order, no pagination.
pub async fn list_uploads(db: &MongoDB) -> Result<Vec<Upload>, AppError> {
    let collection = db.collection::<Upload>("uploads");

    let mut cursor = collection
        .find(doc! {})
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    let mut uploads = Vec::new();
    use futures::stream::StreamExt;

    while let Some(result) = cursor.next().await {
        match result {
            Ok(upload) => uploads.push(upload),
            Err(e) => log::error!("Error reading upload: {}", e),
        }
    }

    Ok(uploads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UploadMeta;

    fn sample_upload(subject: &str) -> Upload {
        Upload::new(
            UploadMeta {
                kind: Some("notes".to_string()),
                branch: Some("CSE".to_string()),
                sem: Some("5".to_string()),
                subject: Some(subject.to_string()),
                email: Some("lender@example.com".to_string()),
                phone: None,
                author: None,
            },
            Some("1_front.pdf".to_string()),
            None,
        )
    }

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/noteshare_test".to_string());
        MongoDB::new(&uri).await.expect("MongoDB connection")
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_created_uploads_are_listed() {
        let db = test_db().await;
        let before = list_uploads(&db).await.unwrap().len();

        let response = create_upload(&db, sample_upload("DBMS")).await.unwrap();
        assert!(response.success);
        create_upload(&db, sample_upload("OS")).await.unwrap();

        let after = list_uploads(&db).await.unwrap();
        assert_eq!(after.len(), before + 2);
        assert!(after.iter().all(|u| u.role == "lender"));
    }
}
