use std::sync::Arc;

use crate::models::user::{UserLoginRequest, UserLoginResponse, UserRegistrationRequest};
use crate::store::UserStore;
use crate::utils::error::{AppError, AppResult};
use crate::utils::jwt;
use bcrypt::{hash, verify, DEFAULT_COST};
use validator::Validate;

pub struct UserService {
    store: Arc<dyn UserStore>,
    jwt_secret: String,
    token_ttl_hours: i64,
    hash_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, jwt_secret: String, token_ttl_hours: i64) -> Self {
        UserService {
            store,
            jwt_secret,
            token_ttl_hours,
            hash_cost: DEFAULT_COST,
        }
    }

    // Lower bcrypt cost, for tests
    pub fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    // Register a new user
    pub async fn register_user(&self, request: UserRegistrationRequest) -> AppResult<i32> {
        request.validate()?;

        // Check if username already exists
        if self.store.find_by_username(&request.username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".into()));
        }

        // Hash password
        let hashed_password = hash(request.password.as_bytes(), self.hash_cost)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let user_id = self.store.insert_user(&request.username, &hashed_password).await?;
        tracing::info!(user_id, "user registered");
        Ok(user_id)
    }

    // Login user
    pub async fn login_user(&self, request: UserLoginRequest) -> AppResult<UserLoginResponse> {
        let user = self
            .store
            .find_by_username(&request.username)
            .await?
            .ok_or_else(|| AppError::AuthError("Invalid credentials".into()))?;

        // Verify password
        let password_matches = verify(request.password.as_bytes(), &user.password)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        if !password_matches {
            return Err(AppError::AuthError("Invalid credentials".into()));
        }

        let token = jwt::generate_token(user.id, &self.jwt_secret, self.token_ttl_hours)
            .map_err(|e| AppError::AuthError(e.to_string()))?;

        Ok(UserLoginResponse {
            token,
            user_id: user.id,
        })
    }
}
