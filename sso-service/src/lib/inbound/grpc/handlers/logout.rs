use tokio_util::sync::CancellationToken;
use tonic::Status;

use super::validate_token_field;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::LogoutRequest;
use crate::proto::LogoutResponse;

pub async fn logout<S: AuthServicePort>(
    service: &S,
    cancel: &CancellationToken,
    request: LogoutRequest,
) -> Result<LogoutResponse, Status> {
    validate_token_field(&request.token)?;

    service.logout(&request.token, cancel).await?;

    Ok(LogoutResponse { success: true })
}
