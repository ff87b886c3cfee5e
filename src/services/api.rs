use anyhow::Result;
use tokio::sync::mpsc;

use crate::api::{AuthResponse, FolderContents, ImageManagerClient, ImageUpload, User};
use crate::log_debug;
use crate::model::{LoadTicket, MutationKind};

/// API request types
#[derive(Debug, Clone)]
pub enum ApiRequest {
    Login {
        email: String,
        password: String,
    },

    Register {
        username: String,
        email: String,
        password: String,
    },

    /// Confirm a restored session and refresh the user record
    FetchCurrentUser,

    /// Load child folders and images for one navigation state
    LoadContent { ticket: LoadTicket },

    CreateFolder {
        name: String,
        parent_id: Option<String>,
    },

    UploadImage { upload: ImageUpload },

    DeleteFolder { folder_id: String },

    DeleteImage { image_id: String },
}

impl ApiRequest {
    fn label(&self) -> &'static str {
        match self {
            ApiRequest::Login { .. } => "Login",
            ApiRequest::Register { .. } => "Register",
            ApiRequest::FetchCurrentUser => "FetchCurrentUser",
            ApiRequest::LoadContent { .. } => "LoadContent",
            ApiRequest::CreateFolder { .. } => "CreateFolder",
            ApiRequest::UploadImage { .. } => "UploadImage",
            ApiRequest::DeleteFolder { .. } => "DeleteFolder",
            ApiRequest::DeleteImage { .. } => "DeleteImage",
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    AuthResult {
        result: Result<AuthResponse, anyhow::Error>,
    },

    CurrentUserResult {
        result: Result<User, anyhow::Error>,
    },

    ContentResult {
        ticket: LoadTicket,
        result: Result<FolderContents, anyhow::Error>,
    },

    MutationResult {
        kind: MutationKind,
        result: Result<(), anyhow::Error>,
    },
}

/// Execute an API request and return the response
pub async fn execute_request(client: &ImageManagerClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::Login { email, password } => ApiResponse::AuthResult {
            result: client.login(&email, &password).await,
        },

        ApiRequest::Register {
            username,
            email,
            password,
        } => ApiResponse::AuthResult {
            result: client.register(&username, &email, &password).await,
        },

        ApiRequest::FetchCurrentUser => ApiResponse::CurrentUserResult {
            result: client.get_current_user().await,
        },

        ApiRequest::LoadContent { ticket } => {
            log_debug(&format!(
                "DEBUG [API Service LoadContent]: START gen={} folder={:?} search={:?}",
                ticket.generation, ticket.key.folder_id, ticket.key.search
            ));
            let result = client
                .load_folder_contents(ticket.key.folder_id.as_deref(), &ticket.key.search)
                .await;
            log_debug(&format!(
                "DEBUG [API Service LoadContent]: END gen={} success={}",
                ticket.generation,
                result.is_ok()
            ));

            ApiResponse::ContentResult { ticket, result }
        }

        ApiRequest::CreateFolder { name, parent_id } => ApiResponse::MutationResult {
            kind: MutationKind::CreateFolder,
            result: client
                .create_folder(&name, parent_id.as_deref())
                .await
                .map(|_| ()),
        },

        ApiRequest::UploadImage { upload } => ApiResponse::MutationResult {
            kind: MutationKind::UploadImage,
            result: client.upload_image(upload).await,
        },

        ApiRequest::DeleteFolder { folder_id } => ApiResponse::MutationResult {
            kind: MutationKind::DeleteFolder,
            result: client.delete_folder(&folder_id).await,
        },

        ApiRequest::DeleteImage { image_id } => ApiResponse::MutationResult {
            kind: MutationKind::DeleteImage,
            result: client.delete_image(&image_id).await,
        },
    }
}

/// Spawn the API service worker
///
/// Every request runs on its own task, so responses may arrive in any
/// order; content loads carry a `LoadTicket` for the receiver to sort out.
/// No retries: a failed request is reported once.
pub fn spawn_api_service(
    client: ImageManagerClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();

    tokio::spawn(async move {
        while let Some(request) = request_rx.recv().await {
            log_debug(&format!("DEBUG [API Service]: Dispatching {}", request.label()));

            let client = client.clone();
            let response_tx = response_tx.clone();
            tokio::spawn(async move {
                let response = execute_request(&client, request).await;
                let _ = response_tx.send(response);
            });
        }
        log_debug("DEBUG [API Service]: Request channel closed, stopping");
    });

    (request_tx, response_rx)
}
