use anyhow::{Context as _, anyhow};
use chrono::Utc;
use uuid::Uuid;

use storefront_auth_types::identity::JwtSecret;
use storefront_auth_types::password::{hash_password, verify_password};
use storefront_auth_types::token::issue_token;
use storefront_domain::user::UserRole;

use crate::domain::repository::UserRepository;
use crate::domain::types::{ProfileChanges, User};
use crate::error::ApiError;
use crate::usecase::{non_blank, required};

/// Shortest password accepted on profile update.
pub const MIN_PASSWORD_LEN: usize = 6;

// ── Register ─────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RegisterInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub answer: Option<String>,
}

pub struct RegisterUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> RegisterUseCase<R> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        let name = required(input.name, "Name")?;
        let email = required(input.email, "Email")?;
        let password = required(input.password, "Password")?;
        let phone = required(input.phone, "Phone no")?;
        let address = required(input.address, "Address")?;
        let answer = required(input.answer, "Answer")?;

        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailAlreadyRegistered);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            name,
            email,
            password: hash_password(&password).context("hash password")?,
            phone,
            address,
            answer,
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user: User,
    pub token: String,
}

pub struct LoginUseCase<R: UserRepository> {
    pub repo: R,
    pub jwt_secret: JwtSecret,
}

impl<R: UserRepository> LoginUseCase<R> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let (Some(email), Some(password)) = (non_blank(input.email), non_blank(input.password))
        else {
            return Err(ApiError::validation("Invalid email or password"));
        };

        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::EmailNotRegistered)?;
        if !verify_password(&password, &user.password).context("verify password")? {
            return Err(ApiError::InvalidCredentials);
        }

        let (token, _exp) =
            issue_token(user.id, self.jwt_secret.as_str()).context("issue session token")?;
        Ok(LoginOutput { user, token })
    }
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordInput {
    pub email: Option<String>,
    pub answer: Option<String>,
    pub new_password: Option<String>,
}

pub struct ForgotPasswordUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ForgotPasswordUseCase<R> {
    pub async fn execute(&self, input: ForgotPasswordInput) -> Result<(), ApiError> {
        let email = required(input.email, "Email")?;
        let answer = required(input.answer, "Answer")?;
        let new_password = required(input.new_password, "New Password")?;

        let user = self
            .repo
            .find_by_email_and_answer(&email, &answer)
            .await?
            .ok_or(ApiError::WrongEmailOrAnswer)?;
        let hash = hash_password(&new_password).context("hash password")?;
        self.repo.update_password(user.id, &hash).await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateProfileInput,
    ) -> Result<User, ApiError> {
        let password = match non_blank(input.password) {
            Some(p) if p.chars().count() < MIN_PASSWORD_LEN => {
                return Err(ApiError::validation(format!(
                    "Password must be at least {MIN_PASSWORD_LEN} characters long"
                )));
            }
            Some(p) => Some(hash_password(&p).context("hash password")?),
            None => None,
        };
        let changes = ProfileChanges {
            name: non_blank(input.name),
            password,
            phone: non_blank(input.phone),
            address: non_blank(input.address),
        };
        self.repo
            .update_profile(user_id, changes)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> ListUsersUseCase<R> {
    pub async fn execute(&self) -> Result<Vec<User>, ApiError> {
        self.repo.list().await
    }
}

// ── AuthorizeAdmin ───────────────────────────────────────────────────────────

/// Role check behind every admin-only route.
pub struct AuthorizeAdminUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> AuthorizeAdminUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        // Not found and lookup failure both surface as the same generic 500.
        let user = self
            .repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| anyhow!("admin check: user {user_id} not found"))?;
        if !user.role.is_admin() {
            return Err(ApiError::NotAdmin);
        }
        Ok(user)
    }
}
