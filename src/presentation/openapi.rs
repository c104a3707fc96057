use crate::application::auth::login::LoginRequest;
use crate::application::auth::password_reset::{ForgotPasswordRequest, ResetPasswordRequest};
use crate::application::auth::register::{
    RegisterBusinessRequest, RegisterResponse, RegisterUserRequest,
};
use crate::application::auth::send_otp::SendOtpRequest;
use crate::application::auth::verify_otp::VerifyOtpRequest;
use crate::application::businesses::update::UpdateBusinessRequest;
use crate::application::businesses::verification::SetVerificationRequest;
use crate::application::users::update::UpdateUserRequest;
use crate::domain::businesses::{BusinessType, VerificationStatus};
use crate::domain::principal::PrincipalKind;
use crate::domain::users::UserRole;
use crate::presentation::cookies::ACCESS_COOKIE;
use crate::presentation::dtos::{
    AccessTokenResource, BusinessResource, MessageResource, PrincipalResource, SessionResource,
    UserResource,
};
use crate::shared::error::ErrorResponse;
use crate::shared::response::ApiResponse;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Business Directory Auth API",
        version = "0.1.0",
        description = "Registration, verification and sessions for users and businesses.\n\nSuccessful responses are wrapped as `{\"success\": true, \"data\": ...}`; failures as `{\"success\": false, \"code\": ..., \"message\": ...}`."
    ),
    paths(
        crate::presentation::client::handlers::user_auth::register,
        crate::presentation::client::handlers::user_auth::send_otp,
        crate::presentation::client::handlers::user_auth::verify_otp,
        crate::presentation::client::handlers::user_auth::login,
        crate::presentation::client::handlers::user_auth::forgot_password,
        crate::presentation::client::handlers::user_auth::reset_password,
        crate::presentation::client::handlers::business_auth::register,
        crate::presentation::client::handlers::business_auth::send_otp,
        crate::presentation::client::handlers::business_auth::verify_otp,
        crate::presentation::client::handlers::business_auth::login,
        crate::presentation::client::handlers::business_auth::forgot_password,
        crate::presentation::client::handlers::business_auth::reset_password,
        crate::presentation::client::handlers::session::refresh_token,
        crate::presentation::client::handlers::session::logout,
        crate::presentation::client::handlers::session::me,
        crate::presentation::client::handlers::users::get_me,
        crate::presentation::client::handlers::users::update_me,
        crate::presentation::client::handlers::users::delete_me,
        crate::presentation::client::handlers::businesses::get_me,
        crate::presentation::client::handlers::businesses::update_me,
        crate::presentation::client::handlers::businesses::get_business,
        crate::presentation::admin::handlers::users::delete_user,
        crate::presentation::admin::handlers::businesses::set_verification,
    ),
    components(
        schemas(
            PrincipalKind,
            UserRole,
            BusinessType,
            VerificationStatus,

            // Request DTOs
            RegisterUserRequest,
            RegisterBusinessRequest,
            SendOtpRequest,
            VerifyOtpRequest,
            LoginRequest,
            ForgotPasswordRequest,
            ResetPasswordRequest,
            UpdateUserRequest,
            UpdateBusinessRequest,
            SetVerificationRequest,

            // Resources
            RegisterResponse,
            UserResource,
            BusinessResource,
            PrincipalResource,
            SessionResource,
            AccessTokenResource,
            MessageResource,

            ApiResponse<RegisterResponse>,
            ApiResponse<UserResource>,
            ApiResponse<BusinessResource>,
            ApiResponse<PrincipalResource>,
            ApiResponse<SessionResource>,
            ApiResponse<AccessTokenResource>,
            ApiResponse<MessageResource>,
            ApiResponse<serde_json::Value>,

            ErrorResponse,
        )
    ),
    tags(
        (name = "Client / User Auth", description = "User registration, verification and login"),
        (name = "Client / Business Auth", description = "Business registration, verification and login"),
        (name = "Client / Session", description = "Token refresh, logout and the current principal"),
        (name = "Client / User", description = "Authenticated user profile"),
        (name = "Client / Business", description = "Business profiles"),
        (name = "Admin / User Management", description = "Admin user management"),
        (name = "Admin / Business Verification", description = "Admin review of businesses")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_COOKIE))),
            );
        }
    }
}
