use tokio_util::sync::CancellationToken;
use tonic::Status;

use super::validate_email;
use super::validate_password;
use crate::domain::auth::models::AppId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;

pub async fn login<S: AuthServicePort>(
    service: &S,
    cancel: &CancellationToken,
    request: LoginRequest,
) -> Result<LoginResponse, Status> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    if request.app_id == 0 {
        return Err(Status::invalid_argument("app_id is required"));
    }

    let token = service
        .login(
            &request.email,
            &request.password,
            AppId(request.app_id),
            cancel,
        )
        .await?;

    Ok(LoginResponse { token })
}
