use tonic::Status;

use crate::domain::auth::errors::AuthError;

pub mod is_admin;
pub mod login;
pub mod logout;
pub mod register;
pub mod validate_token;

const MIN_PASSWORD_LENGTH: usize = 8;

impl From<AuthError> for Status {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Status::invalid_argument("invalid email or password"),
            AuthError::UserAlreadyExists => Status::already_exists("user already exists"),
            AuthError::UserNotFound => Status::not_found("user not found"),
            AuthError::UnknownApplication => Status::invalid_argument("unknown application"),
            AuthError::MalformedToken => Status::invalid_argument("malformed token"),
            AuthError::InvalidToken => Status::unauthenticated("invalid token"),
            AuthError::TokenExpiredOrRevoked => Status::unauthenticated("token expired or revoked"),
            AuthError::StorageUnavailable(_) => Status::unavailable("storage unavailable"),
            // The transport only cancels on its own request deadline.
            AuthError::Cancelled => Status::deadline_exceeded("request deadline exceeded"),
            AuthError::Internal(reason) => {
                tracing::error!(error = %reason, "Internal error");
                Status::internal("internal error")
            }
        }
    }
}

pub(crate) fn validate_email(email: &str) -> Result<(), Status> {
    if email.is_empty() {
        return Err(Status::invalid_argument("email is required"));
    }

    if !email_address::EmailAddress::is_valid(email) {
        return Err(Status::invalid_argument("invalid email format"));
    }

    Ok(())
}

pub(crate) fn validate_password(password: &str) -> Result<(), Status> {
    if password.is_empty() {
        return Err(Status::invalid_argument("password is required"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Status::invalid_argument("password is too short"));
    }

    Ok(())
}

pub(crate) fn validate_token_field(token: &str) -> Result<(), Status> {
    if token.is_empty() {
        return Err(Status::invalid_argument("token is required"));
    }

    Ok(())
}
