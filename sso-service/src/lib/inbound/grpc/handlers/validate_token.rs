use tokio_util::sync::CancellationToken;
use tonic::Status;

use super::validate_token_field;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

pub async fn validate_token<S: AuthServicePort>(
    service: &S,
    cancel: &CancellationToken,
    request: ValidateTokenRequest,
) -> Result<ValidateTokenResponse, Status> {
    validate_token_field(&request.token)?;

    let claims = service.validate_token(&request.token, cancel).await?;

    Ok(ValidateTokenResponse {
        user_id: claims.uid,
        email: claims.email,
        app_id: claims.app_id,
        expires_at: claims.exp,
    })
}
