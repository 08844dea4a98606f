use crate::{database::MongoDB, models::User, utils::error::AppError};
use mongodb::bson::doc;
use mongodb::error::{ErrorKind, WriteFailure};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SignupResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: User,
}

/// Creates an account after checking that the email is unused.
///
/// The lookup-then-insert pair is not atomic; the unique index on
/// users.email catches the race and the duplicate-key write error reports
/// the same conflict as the explicit pre-check.
pub async fn signup(db: &MongoDB, request: &SignupRequest) -> Result<SignupResponse, AppError> {
    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(AppError::ValidationError("Missing fields".to_string()));
    }

    let collection = db.collection::<User>("users");

    let existing = collection
        .find_one(doc! { "email": &request.email })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?;

    if existing.is_some() {
        return Err(AppError::ConflictError("User exists".to_string()));
    }

    let user = User::new(
        request.username.clone(),
        request.email.clone(),
        request.password.clone(),
    );

    collection.insert_one(&user).await.map_err(|e| {
        if is_duplicate_key(&e) {
            AppError::ConflictError("User exists".to_string())
        } else {
            AppError::DatabaseError(e.to_string())
        }
    })?;

    Ok(SignupResponse {
        success: true,
        message: "Signup successful".to_string(),
    })
}

/// Looks up a user whose email AND password match exactly.
///
/// The success payload is the full stored record, password included.
/// See DESIGN.md.
pub async fn login(db: &MongoDB, request: &LoginRequest) -> Result<LoginResponse, AppError> {
    let collection = db.collection::<User>("users");

    let user = collection
        .find_one(doc! {
            "email": &request.email,
            "password": &request.password,
        })
        .await
        .map_err(|e| AppError::DatabaseError(e.to_string()))?
        .ok_or_else(|| AppError::AuthError("Invalid login".to_string()))?;

    Ok(LoginResponse {
        success: true,
        user,
    })
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(we)) if we.code == 11000
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017/noteshare_test".to_string());
        MongoDB::new(&uri).await.expect("MongoDB connection")
    }

    fn unique_email(tag: &str) -> String {
        format!("{}+{}@example.com", tag, chrono::Utc::now().timestamp_nanos_opt().unwrap())
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_signup_then_duplicate_fails() {
        let db = test_db().await;
        let request = SignupRequest {
            username: "a".to_string(),
            email: unique_email("dup"),
            password: "p".to_string(),
        };

        let first = signup(&db, &request).await.unwrap();
        assert!(first.success);

        let second = signup(&db, &request).await;
        assert!(matches!(second, Err(AppError::ConflictError(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_login_requires_exact_credentials() {
        let db = test_db().await;
        let email = unique_email("login");
        let request = SignupRequest {
            username: "a".to_string(),
            email: email.clone(),
            password: "p".to_string(),
        };
        signup(&db, &request).await.unwrap();

        let ok = login(
            &db,
            &LoginRequest {
                email: email.clone(),
                password: "p".to_string(),
            },
        )
        .await
        .unwrap();
        assert!(ok.success);
        assert_eq!(ok.user.email, email);

        let wrong = login(
            &db,
            &LoginRequest {
                email,
                password: "wrong".to_string(),
            },
        )
        .await;
        assert!(matches!(wrong, Err(AppError::AuthError(_))));
    }

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_signup_rejects_missing_fields() {
        let db = test_db().await;
        let request = SignupRequest {
            username: String::new(),
            email: unique_email("missing"),
            password: "p".to_string(),
        };
        let result = signup(&db, &request).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
}
