use axum::{extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use storefront_auth_types::identity::SignedInUser;

use crate::error::ApiError;
use crate::extract::{AdminUser, Json};
use crate::handlers::{MessageResponse, OkResponse};
use crate::handlers::view::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    ForgotPasswordInput, ForgotPasswordUseCase, ListUsersUseCase, LoginInput, LoginUseCase,
    RegisterInput, RegisterUseCase, UpdateProfileInput, UpdateProfileUseCase,
};

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub answer: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserResponse,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let usecase = RegisterUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            name: body.name,
            email: body.email,
            password: body.password,
            phone: body.phone,
            address: body.address,
            answer: body.answer,
        })
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            success: true,
            message: "User Register Successfully",
            user: user.into(),
        }),
    ))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: &'static str,
    pub user: UserResponse,
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        repo: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok(Json(LoginResponse {
        success: true,
        message: "login successfully",
        user: output.user.into(),
        token: output.token,
    }))
}

// ── POST /auth/forgot-password ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
    pub answer: Option<String>,
    pub new_password: Option<String>,
}

pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = ForgotPasswordUseCase {
        repo: state.user_repo(),
    };
    usecase
        .execute(ForgotPasswordInput {
            email: body.email,
            answer: body.answer,
            new_password: body.new_password,
        })
        .await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Password Reset Successfully",
    }))
}

// ── GET /auth/user-auth, GET /auth/admin-auth ────────────────────────────────

pub async fn user_auth(_user: SignedInUser) -> Json<OkResponse> {
    Json(OkResponse::ok())
}

pub async fn admin_auth(_admin: AdminUser) -> Json<OkResponse> {
    Json(OkResponse::ok())
}

// ── PUT /auth/profile ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileResponse {
    pub success: bool,
    pub message: &'static str,
    pub updated_user: UserResponse,
}

pub async fn update_profile(
    user: SignedInUser,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, ApiError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let updated = usecase
        .execute(
            user.user_id,
            UpdateProfileInput {
                name: body.name,
                password: body.password,
                phone: body.phone,
                address: body.address,
            },
        )
        .await?;
    Ok(Json(UpdateProfileResponse {
        success: true,
        message: "Profile Updated Successfully",
        updated_user: updated.into(),
    }))
}

// ── GET /auth/all-users ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UsersResponse {
    pub success: bool,
    pub users: Vec<UserResponse>,
}

pub async fn all_users(
    _admin: AdminUser,
    State(state): State<AppState>,
) -> Result<Json<UsersResponse>, ApiError> {
    let usecase = ListUsersUseCase {
        repo: state.user_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(UsersResponse {
        success: true,
        users: users.into_iter().map(Into::into).collect(),
    }))
}
