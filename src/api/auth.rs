//! `/auth` endpoints.

use super::ApiClient;
use crate::error::ApiError;
use crate::models::{Captcha, LoginRequest, LoginResponse, RegisterRequest, User};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn captcha(&self) -> Result<Captcha, ApiError> {
        self.client.get("/auth/captcha").await?.into_data()
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.client.post("/auth/login", request).await?.into_data()
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        self.client.post("/auth/register", request).await?.into_data()
    }

    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get("/auth/me").await?.into_data()
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: crate::models::Ack = self.client.post_action("/auth/logout").await?;
        Ok(())
    }
}
