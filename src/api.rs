use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::logic::upload::UploadFile;
use crate::session::{SessionContext, SessionEvent};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_folder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, alias = "folderId")]
    pub folder: Option<String>,
    /// Path relative to the static origin (e.g. "/uploads/abc.png")
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// `/auth/me` answers either with the user itself or wrapped as `{ "user": ... }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MeResponse {
    Wrapped { user: User },
    Bare(User),
}

/// One folder's listing: child folders plus the (search-filtered) images
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderContents {
    pub folders: Vec<Folder>,
    pub images: Vec<Image>,
}

/// Image upload as sent to `POST /images/upload`
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub name: String,
    pub file: UploadFile,
    pub folder_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateFolderBody<'a> {
    name: &'a str,
    #[serde(rename = "parentFolder")]
    parent_folder: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Error reported by the backend with a non-success status
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Status { status: u16, message: String },
}

impl ApiError {
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized { .. } => 401,
            ApiError::Status { status, .. } => *status,
        }
    }

    /// Message payload from the backend (may be empty)
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => message,
        }
    }
}

/// Build the folder listing URL (`parentId` omitted for the root)
///
/// # Examples
/// ```
/// use imgtui::api::folders_url;
///
/// assert_eq!(folders_url("http://h/api", None), "http://h/api/folders");
/// assert_eq!(folders_url("http://h/api", Some("v1")), "http://h/api/folders?parentId=v1");
/// ```
pub fn folders_url(base_url: &str, parent_id: Option<&str>) -> String {
    match parent_id {
        Some(id) => format!("{}/folders?parentId={}", base_url, urlencoding::encode(id)),
        None => format!("{}/folders", base_url),
    }
}

/// Build the image listing URL (`folderId` and empty `search` omitted)
///
/// # Examples
/// ```
/// use imgtui::api::images_url;
///
/// assert_eq!(images_url("http://h/api", None, ""), "http://h/api/images");
/// assert_eq!(
///     images_url("http://h/api", Some("v1"), "cat"),
///     "http://h/api/images?folderId=v1&search=cat"
/// );
/// ```
pub fn images_url(base_url: &str, folder_id: Option<&str>, search: &str) -> String {
    let mut params = Vec::new();
    if let Some(id) = folder_id {
        params.push(format!("folderId={}", urlencoding::encode(id)));
    }
    let search = search.trim();
    if !search.is_empty() {
        params.push(format!("search={}", urlencoding::encode(search)));
    }

    if params.is_empty() {
        format!("{}/images", base_url)
    } else {
        format!("{}/images?{}", base_url, params.join("&"))
    }
}

/// Resolve an image record's `url` against the static origin
pub fn resolve_image_url(static_origin: &str, image_path: &str) -> String {
    if image_path.starts_with("http://") || image_path.starts_with("https://") {
        return image_path.to_string();
    }
    if image_path.starts_with('/') {
        format!("{}{}", static_origin, image_path)
    } else {
        format!("{}/{}", static_origin, image_path)
    }
}

#[derive(Clone)]
pub struct ImageManagerClient {
    base_url: String,
    static_origin: String,
    session: SessionContext,
    client: Client,
}

impl ImageManagerClient {
    pub fn new(base_url: String, static_origin: String, session: SessionContext) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            static_origin: static_origin.trim_end_matches('/').to_string(),
            session,
            client: Client::new(),
        }
    }

    pub fn static_origin(&self) -> &str {
        &self.static_origin
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn a non-success response into an `ApiError`
    ///
    /// A 401 on an authenticated call tears the session down before the
    /// error is returned.
    async fn check(&self, response: Response, authenticated: bool) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| {
                if body.trim_start().starts_with('<') {
                    String::new()
                } else {
                    body.trim().to_string()
                }
            });

        if status == StatusCode::UNAUTHORIZED {
            if authenticated && self.session.teardown(SessionEvent::Expired) {
                crate::log_debug("DEBUG [API]: 401 received, session torn down");
            }
            return Err(ApiError::Unauthorized { message }.into());
        }

        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        }
        .into())
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .context("Failed to log in")?;

        let response = self.check(response, false).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse login response")?;

        Ok(auth)
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthResponse> {
        let url = format!("{}/auth/register", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "username": username,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .context("Failed to register")?;

        let response = self.check(response, false).await?;
        let auth: AuthResponse = response
            .json()
            .await
            .context("Failed to parse register response")?;

        Ok(auth)
    }

    pub async fn get_current_user(&self) -> Result<User> {
        let url = format!("{}/auth/me", self.base_url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch current user")?;

        let response = self.check(response, true).await?;
        let me: MeResponse = response
            .json()
            .await
            .context("Failed to parse current user")?;

        Ok(match me {
            MeResponse::Wrapped { user } => user,
            MeResponse::Bare(user) => user,
        })
    }

    pub async fn get_folders(&self, parent_id: Option<&str>) -> Result<Vec<Folder>> {
        let url = folders_url(&self.base_url, parent_id);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch folders")?;

        let response = self.check(response, true).await?;
        let folders: Vec<Folder> = response
            .json()
            .await
            .context("Failed to parse folders")?;

        Ok(folders)
    }

    pub async fn get_images(&self, folder_id: Option<&str>, search: &str) -> Result<Vec<Image>> {
        let url = images_url(&self.base_url, folder_id, search);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch images")?;

        let response = self.check(response, true).await?;
        let images: Vec<Image> = response
            .json()
            .await
            .context("Failed to parse images")?;

        Ok(images)
    }

    /// Fetch child folders and matching images concurrently
    ///
    /// Fails as a whole when either request fails.
    pub async fn load_folder_contents(
        &self,
        folder_id: Option<&str>,
        search: &str,
    ) -> Result<FolderContents> {
        let (folders, images) = tokio::try_join!(
            self.get_folders(folder_id),
            self.get_images(folder_id, search)
        )?;

        Ok(FolderContents { folders, images })
    }

    pub async fn create_folder(&self, name: &str, parent_id: Option<&str>) -> Result<Folder> {
        let url = format!("{}/folders", self.base_url);
        let body = CreateFolderBody {
            name,
            parent_folder: parent_id,
        };
        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await
            .context("Failed to create folder")?;

        let response = self.check(response, true).await?;
        let folder: Folder = response
            .json()
            .await
            .context("Failed to parse created folder")?;

        Ok(folder)
    }

    pub async fn delete_folder(&self, folder_id: &str) -> Result<()> {
        let url = format!("{}/folders/{}", self.base_url, urlencoding::encode(folder_id));
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .context("Failed to delete folder")?;

        self.check(response, true).await?;
        Ok(())
    }

    pub async fn upload_image(&self, upload: ImageUpload) -> Result<()> {
        let url = format!("{}/images/upload", self.base_url);

        let part = reqwest::multipart::Part::bytes(upload.file.bytes)
            .file_name(upload.file.file_name)
            .mime_str(&upload.file.mime)
            .context("Invalid image MIME type")?;

        let mut form = reqwest::multipart::Form::new()
            .text("name", upload.name)
            .part("image", part);
        if let Some(folder_id) = upload.folder_id {
            form = form.text("folderId", folder_id);
        }

        let response = self
            .authorized(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .context("Failed to upload image")?;

        self.check(response, true).await?;
        Ok(())
    }

    pub async fn delete_image(&self, image_id: &str) -> Result<()> {
        let url = format!("{}/images/{}", self.base_url, urlencoding::encode(image_id));
        let response = self
            .authorized(self.client.delete(&url))
            .send()
            .await
            .context("Failed to delete image")?;

        self.check(response, true).await?;
        Ok(())
    }

    /// Download an image's content from the static origin
    pub async fn fetch_image_bytes(&self, image: &Image) -> Result<Vec<u8>> {
        let url = resolve_image_url(&self.static_origin, &image.url);
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to download image")?;

        let response = self.check(response, true).await?;
        let bytes = response
            .bytes()
            .await
            .context("Failed to read image data")?;

        Ok(bytes.to_vec())
    }
}
