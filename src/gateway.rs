//! HTTP gateway for the user-records backend
//!
//! Thin request/response wrapper around `/api/users`: one method per
//! backend operation, no retries, no caching. Failures map onto
//! [`GatewayError`] so callers can distinguish transport errors from
//! server rejections.

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::form::Draft;
use crate::models::{ListQuery, UserPage, UserRecord};

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("user {0} not found")]
    NotFound(i64),

    #[error("server rejected the submission: {0}")]
    Rejected(String),

    #[error("delete failed with status {0}")]
    DeleteFailed(u16),

    #[error("failed to read attachment {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Client for the user-records REST API
#[derive(Debug, Clone)]
pub struct UserGateway {
    client: Client,
    base_url: String,
}

impl UserGateway {
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.http.user_agent.clone())
            .timeout(config.http_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn users_url(&self) -> String {
        format!("{}/api/users", self.base_url)
    }

    fn user_url(&self, id: i64) -> String {
        format!("{}/api/users/{}", self.base_url, id)
    }

    /// Fetch one page of users. The query carries a 0-based page; the
    /// wire protocol is 1-based and the translation happens in
    /// [`ListQuery::to_query_params`].
    pub async fn list(&self, query: &ListQuery) -> Result<UserPage, GatewayError> {
        debug!(
            "Listing users: search='{}' page={} size={} sortBy={} sortDir={}",
            query.search,
            query.page,
            query.size,
            query.sort_by.as_str(),
            query.sort_dir.as_str()
        );

        let page = self
            .client
            .get(self.users_url())
            .query(&query.to_query_params())
            .send()
            .await?
            .error_for_status()?
            .json::<UserPage>()
            .await?;

        debug!("Listed {} of {} users", page.users.len(), page.total_items);
        Ok(page)
    }

    /// Fetch a single record by identifier
    pub async fn get(&self, id: i64) -> Result<UserRecord, GatewayError> {
        let response = self.client.get(self.user_url(id)).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::NotFound(id));
        }

        Ok(response.json::<UserRecord>().await?)
    }

    /// Register a new user. Returns the server's confirmation message.
    pub async fn register(&self, draft: &Draft) -> Result<String, GatewayError> {
        info!("Registering user '{}'", draft.name);

        let form = self.multipart_form(draft).await?;
        let response = self
            .client
            .post(format!("{}/register", self.users_url()))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Rejected(rejection_text(response).await));
        }

        #[derive(serde::Deserialize)]
        struct Confirmation {
            #[serde(default)]
            message: Option<String>,
        }

        let confirmation = response.json::<Confirmation>().await?;
        Ok(confirmation
            .message
            .unwrap_or_else(|| "User registration successful".to_string()))
    }

    /// Update an existing user with the same multipart payload as register
    pub async fn update(&self, id: i64, draft: &Draft) -> Result<(), GatewayError> {
        info!("Updating user {}", id);

        let form = self.multipart_form(draft).await?;
        let response = self
            .client
            .put(self.user_url(id))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GatewayError::Rejected(rejection_text(response).await));
        }

        Ok(())
    }

    /// Delete a user record
    pub async fn delete(&self, id: i64) -> Result<(), GatewayError> {
        info!("Deleting user {}", id);

        let response = self.client.delete(self.user_url(id)).send().await?;

        if !response.status().is_success() {
            return Err(GatewayError::DeleteFailed(response.status().as_u16()));
        }

        Ok(())
    }

    /// Derive the display URL for a server-stored file path. The backend
    /// serves uploads by basename, so any path prefix is stripped and the
    /// remainder percent-decoded.
    pub fn file_url(&self, stored_path: &str) -> Option<String> {
        let name = file_basename(stored_path)?;
        Some(format!("{}/files/{}", self.users_url(), name))
    }

    /// Build the multipart payload for register/update: every text field,
    /// skills comma-joined, and whichever attachments were selected.
    async fn multipart_form(&self, draft: &Draft) -> Result<Form, GatewayError> {
        let mut form = Form::new()
            .text("name", draft.name.clone())
            .text("description", draft.description.clone())
            .text(
                "gender",
                draft.gender.map(|g| g.as_str()).unwrap_or("").to_string(),
            )
            .text("country", draft.country.clone())
            .text("dateOfBirth", draft.date_of_birth.clone())
            .text("skills", draft.skills_csv());

        if let Some(path) = &draft.image {
            form = form.part("profilePicture", file_part(path).await?);
        }
        if let Some(path) = &draft.file {
            form = form.part("supportingDocument", file_part(path).await?);
        }

        Ok(form)
    }
}

/// Load a local attachment into a multipart part, keeping its file name
async fn file_part(path: &Path) -> Result<Part, GatewayError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| GatewayError::Attachment {
            path: path.to_path_buf(),
            source,
        })?;

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("attachment")
        .to_string();

    Ok(Part::bytes(bytes).file_name(file_name))
}

/// Body text of a rejected response, with a generic fallback when the
/// server sent nothing usable
async fn rejection_text(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => "Request failed. Please try again.".to_string(),
    }
}

/// Strip any path prefix (Windows or Unix separators) and percent-decode
/// the remaining file name
pub fn file_basename(stored_path: &str) -> Option<String> {
    let name = stored_path
        .rsplit(|c| c == '\\' || c == '/')
        .next()
        .unwrap_or(stored_path);

    if name.is_empty() {
        return None;
    }

    match urlencoding::decode(name) {
        Ok(decoded) => Some(decoded.into_owned()),
        Err(_) => Some(name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Skill};
    use std::io::Write;

    fn gateway() -> UserGateway {
        let config = Config {
            base_url: "http://localhost:8080".to_string(),
            page_size: 10,
            http: crate::config::HttpConfig::default(),
        };
        UserGateway::new(&config).unwrap()
    }

    #[test]
    fn test_basename_strips_windows_path_prefix() {
        assert_eq!(
            file_basename("C:\\files\\abc.png").as_deref(),
            Some("abc.png")
        );
    }

    #[test]
    fn test_basename_strips_unix_path_prefix() {
        assert_eq!(
            file_basename("/srv/uploads/resume.pdf").as_deref(),
            Some("resume.pdf")
        );
    }

    #[test]
    fn test_basename_percent_decodes() {
        assert_eq!(
            file_basename("C:\\files\\my%20photo.png").as_deref(),
            Some("my photo.png")
        );
    }

    #[test]
    fn test_basename_of_empty_path_is_none() {
        assert_eq!(file_basename(""), None);
        assert_eq!(file_basename("C:\\files\\"), None);
    }

    #[test]
    fn test_file_url_uses_files_endpoint() {
        let url = gateway().file_url("C:\\files\\abc.png");
        assert_eq!(
            url.as_deref(),
            Some("http://localhost:8080/api/users/files/abc.png")
        );
    }

    #[test]
    fn test_user_urls() {
        let gw = gateway();
        assert_eq!(gw.users_url(), "http://localhost:8080/api/users");
        assert_eq!(gw.user_url(42), "http://localhost:8080/api/users/42");
    }

    #[tokio::test]
    async fn test_multipart_form_builds_from_full_draft() {
        let mut picture = tempfile::NamedTempFile::new().unwrap();
        picture.write_all(b"fake png bytes").unwrap();

        let mut draft = Draft::new();
        draft.name = "Asha".to_string();
        draft.description = "Backend engineer".to_string();
        draft.gender = Some(Gender::Female);
        draft.country = "India".to_string();
        draft.date_of_birth = "1991-04-20".to_string();
        draft.toggle_skill(Skill::Java);
        draft.toggle_skill(Skill::Python);
        draft.set_image(picture.path().to_path_buf());

        // Form assembly reads the attachment and must succeed; the exact
        // body layout belongs to reqwest.
        gateway().multipart_form(&draft).await.unwrap();
        assert_eq!(draft.skills_csv(), "Java,Python");
    }

    #[tokio::test]
    async fn test_missing_attachment_is_an_attachment_error() {
        let mut draft = Draft::new();
        draft.set_image(PathBuf::from("/nonexistent/picture.png"));

        let err = gateway().multipart_form(&draft).await.unwrap_err();
        assert!(matches!(err, GatewayError::Attachment { .. }));
    }
}
