use tokio_util::sync::CancellationToken;
use tonic::Status;

use crate::domain::auth::models::UserId;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;

pub async fn is_admin<S: AuthServicePort>(
    service: &S,
    cancel: &CancellationToken,
    request: IsAdminRequest,
) -> Result<IsAdminResponse, Status> {
    if request.user_id == 0 {
        return Err(Status::invalid_argument("user_id is required"));
    }

    let is_admin = service.is_admin(UserId(request.user_id), cancel).await?;

    Ok(IsAdminResponse { is_admin })
}
