use tokio_util::sync::CancellationToken;
use tonic::Status;

use super::validate_email;
use super::validate_password;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;

pub async fn register<S: AuthServicePort>(
    service: &S,
    cancel: &CancellationToken,
    request: RegisterRequest,
) -> Result<RegisterResponse, Status> {
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let user_id = service
        .register_new_user(&request.email, &request.password, cancel)
        .await?;

    Ok(RegisterResponse { user_id: user_id.0 })
}
