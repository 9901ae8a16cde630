//! Auth Endpoints

use serde::Serialize;
use crate::models::{LoginResponse, PasswordChange, ProfileUpdate, ProfileUpdated, SetupStatus, User};
use super::{ApiClient, ApiError};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct LoginArgs<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SetupArgs<'a> {
    email: &'a str,
    username: &'a str,
    password: &'a str,
}

// ========================
// API Functions
// ========================

impl ApiClient {
    pub async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/login", &LoginArgs { email, password }).await
    }

    pub async fn setup_status(&self) -> Result<SetupStatus, ApiError> {
        self.get_json("/auth/setup-status").await
    }

    pub async fn initial_setup(&self, email: &str, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.post_json("/auth/initial-setup", &SetupArgs { email, username, password }).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdated, ApiError> {
        self.put_json("/auth/profile", update).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<(), ApiError> {
        self.put_unit("/auth/password", change).await
    }
}
