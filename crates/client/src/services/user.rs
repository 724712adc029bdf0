//! User account service.

use tracing::{info, instrument};

use crate::client::{ApiClient, Empty};
use crate::error::ApiError;
use crate::models::{
    AvatarUploadResponse, CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest, User,
};
use crate::resource::Resource;
use crate::upload::{UploadFile, form_with_files};

const ENDPOINT: &str = "/user";

/// User resource type.
pub type UserResource = Resource<User, CreateUserRequest, UpdateUserRequest>;

/// Profile management for the signed-in user.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
    resource: UserResource,
}

impl UserService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            resource: Resource::new(client.clone(), ENDPOINT),
            client,
        }
    }

    /// Generic CRUD + search over `/user`.
    #[must_use]
    pub const fn resource(&self) -> &UserResource {
        &self.resource
    }

    /// Fetch the signed-in user's profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self))]
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.client.get("/user/profile").await
    }

    /// Update profile fields.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails.
    #[instrument(skip(self, changes))]
    pub async fn update_profile(&self, changes: &UpdateUserRequest) -> Result<User, ApiError> {
        self.client.patch("/user/profile", changes).await
    }

    /// Change the password.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails, including when the current
    /// password is wrong.
    #[instrument(skip(self, request))]
    pub async fn change_password(&self, request: &UpdatePasswordRequest) -> Result<(), ApiError> {
        self.client
            .patch::<Empty, _>("/user/password", request)
            .await?;
        info!("Password changed");
        Ok(())
    }

    /// Upload a new avatar image.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the part cannot be built or the request fails.
    #[instrument(skip(self, file), fields(file_name = %file.file_name()))]
    pub async fn upload_avatar(&self, file: UploadFile) -> Result<AvatarUploadResponse, ApiError> {
        let form = form_with_files("avatar", [file])?;
        self.client.post_multipart("/user/avatar", form).await
    }
}
