use chrono::{DateTime, NaiveDateTime, Utc};
use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    Admin,
    #[default]
    Standard,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Admin => "ADMIN",
            UserType::Standard => "STANDARD",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserType::Admin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_name: String,
    pub user_type: UserType,
    pub user_id: String,
    #[serde(default)]
    pub drawer_pinned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
}

/// Identity payload carried in the body of every paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityPayload {
    pub user_id: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub file_name: String,
    pub size: String,
    #[serde(deserialize_with = "iso_timestamp::required")]
    pub uploaded_at: DateTime<Utc>,
    pub uploaded_by: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
}

/// ISO-8601 timestamps with or without an offset. Offset-less values are
/// read as UTC.
mod iso_timestamp {
    use super::*;
    use serde::{de::Error, Deserializer};

    const NAIVE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    pub(super) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(raw, NAIVE_FORMAT)
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn required<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn optional<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {}", raw))),
        }
    }
}

fn default_content_type() -> String {
    "application/pdf".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    pub id: String,
    pub description: String,
    pub labels: Vec<String>,
}

/// File picked for upload, already read into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadDocument {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub description: String,
    pub labels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub user_name: String,
    #[serde(default)]
    pub email: String,
    pub user_type: UserType,
    #[serde(default, deserialize_with = "iso_timestamp::optional")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    pub id: String,
    pub email: String,
    pub user_type: UserType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    pub id: String,
    pub user_id: String,
    pub key: String,
    pub value: String,
    #[serde(default, deserialize_with = "iso_timestamp::optional")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePreference {
    pub user_id: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePreference {
    pub id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerPreference {
    pub user_id: String,
    pub drawer_pinned: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// Raw bytes returned by the blob endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ApiError {}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default, alias = "error")]
    message: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            status: None,
            details: None,
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNAUTHORIZED".to_string(),
            status: Some(401),
            details: None,
        }
    }

    /// Builds an error from a non-2xx response, keeping the server message
    /// verbatim when the body carries one.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ErrorBody>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|b| b.message.clone())
            .filter(|m| !m.trim().is_empty());
        let details = parsed.and_then(|b| b.details);
        let code = match status {
            401 => "UNAUTHORIZED",
            400 | 409 | 422 => "VALIDATION_ERROR",
            _ => "HTTP_ERROR",
        };
        Self {
            error: message.unwrap_or_else(|| format!("Request failed with status {}", status)),
            code: code.to_string(),
            status: Some(status),
            details,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn api_error_constructors_set_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("x").code, "REQUEST_FAILED");
        assert!(ApiError::unauthorized("x").is_unauthorized());
    }

    #[test]
    fn from_status_prefers_server_message() {
        let body = serde_json::to_vec(&json!({ "message": "File too large" })).unwrap();
        let err = ApiError::from_status(422, &body);
        assert_eq!(err.error, "File too large");
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.status, Some(422));

        let legacy = serde_json::to_vec(&json!({ "error": "Duplicate name" })).unwrap();
        assert_eq!(ApiError::from_status(409, &legacy).error, "Duplicate name");
    }

    #[test]
    fn from_status_falls_back_to_generic_message() {
        let err = ApiError::from_status(500, b"<html>oops</html>");
        assert_eq!(err.error, "Request failed with status 500");
        assert_eq!(err.code, "HTTP_ERROR");

        let blank = serde_json::to_vec(&json!({ "message": "  " })).unwrap();
        assert_eq!(
            ApiError::from_status(400, &blank).error,
            "Request failed with status 400"
        );
    }

    #[test]
    fn login_response_reads_camel_case_payload() {
        let parsed: LoginResponse = serde_json::from_value(json!({
            "token": "a.b.c",
            "userName": "alice",
            "userType": "ADMIN",
            "userId": "u1"
        }))
        .unwrap();
        assert_eq!(parsed.user_type, UserType::Admin);
        assert!(!parsed.drawer_pinned);
    }

    #[test]
    fn document_defaults_optional_fields() {
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "fileName": "report.pdf",
            "size": "512 KB",
            "uploadedAt": "2024-03-01T10:00:00Z",
            "uploadedBy": "alice"
        }))
        .unwrap();
        assert!(doc.labels.is_empty());
        assert_eq!(doc.content_type, "application/pdf");
    }

    #[test]
    fn document_accepts_offsetless_timestamps() {
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "fileName": "report.pdf",
            "size": "512 KB",
            "uploadedAt": "2024-03-01T10:00:00",
            "uploadedBy": "alice"
        }))
        .unwrap();
        assert_eq!(doc.uploaded_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");

        let offset: Document = serde_json::from_value(json!({
            "id": "d2",
            "fileName": "report.pdf",
            "size": "512 KB",
            "uploadedAt": "2024-03-01T12:00:00.250+02:00",
            "uploadedBy": "alice"
        }))
        .unwrap();
        assert_eq!(offset.uploaded_at.timestamp(), doc.uploaded_at.timestamp());
    }

    #[test]
    fn listing_page_with_mixed_timestamps_decodes() {
        let page: Vec<Document> = serde_json::from_value(json!([
            { "id": "d1", "fileName": "a.pdf", "size": "1 KB",
              "uploadedAt": "2024-03-01T10:00:00Z", "uploadedBy": "alice" },
            { "id": "d2", "fileName": "b.pdf", "size": "2 KB",
              "uploadedAt": "2024-03-02T08:30:15.123", "uploadedBy": "bob" }
        ]))
        .unwrap();
        assert_eq!(page.len(), 2);
    }

    #[test]
    fn optional_timestamps_tolerate_null_and_reject_garbage() {
        let user: User = serde_json::from_value(json!({
            "id": "u1", "userName": "bob", "userType": "STANDARD", "createdAt": null
        }))
        .unwrap();
        assert!(user.created_at.is_none());

        let pref: Preference = serde_json::from_value(json!({
            "id": "p1", "userId": "u1", "key": "k", "value": "v",
            "updatedAt": "2024-05-01T09:00:00"
        }))
        .unwrap();
        assert!(pref.updated_at.is_some());

        let bad = serde_json::from_value::<Document>(json!({
            "id": "d1", "fileName": "a.pdf", "size": "1 KB",
            "uploadedAt": "yesterday", "uploadedBy": "alice"
        }));
        assert!(bad.is_err());
    }
}
