use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::is_admin;
use super::handlers::login;
use super::handlers::logout;
use super::handlers::register;
use super::handlers::validate_token;
use crate::domain::auth::ports::AuthServicePort;
use crate::proto::auth_server::Auth as AuthProto;
use crate::proto::IsAdminRequest;
use crate::proto::IsAdminResponse;
use crate::proto::LoginRequest;
use crate::proto::LoginResponse;
use crate::proto::LogoutRequest;
use crate::proto::LogoutResponse;
use crate::proto::RegisterRequest;
use crate::proto::RegisterResponse;
use crate::proto::ValidateTokenRequest;
use crate::proto::ValidateTokenResponse;

pub struct AuthGrpcService<S: AuthServicePort> {
    service: Arc<S>,
    request_timeout: Duration,
}

impl<S: AuthServicePort> AuthGrpcService<S> {
    pub fn new(service: Arc<S>, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Run a handler with a cancellation token that fires after the request timeout.
    ///
    /// The handler keeps running after the deadline so it can observe the
    /// cancellation and stop at a clean point.
    async fn with_deadline<T, F, Fut>(&self, handler: F) -> Result<T, Status>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let cancel = CancellationToken::new();
        let operation = handler(cancel.clone());
        tokio::pin!(operation);

        tokio::select! {
            result = &mut operation => return result,
            _ = tokio::time::sleep(self.request_timeout) => {
                tracing::warn!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "Request deadline exceeded, cancelling"
                );
                cancel.cancel();
            }
        }

        operation.await
    }
}

#[tonic::async_trait]
impl<S: AuthServicePort> AuthProto for AuthGrpcService<S> {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<RegisterResponse>, Status> {
        let request = request.into_inner();
        let service = self.service.as_ref();
        let response = self
            .with_deadline(|cancel| async move {
                register::register(service, &cancel, request).await
            })
            .await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let request = request.into_inner();
        let service = self.service.as_ref();
        let response = self
            .with_deadline(|cancel| async move { login::login(service, &cancel, request).await })
            .await?;
        Ok(Response::new(response))
    }

    async fn is_admin(
        &self,
        request: Request<IsAdminRequest>,
    ) -> Result<Response<IsAdminResponse>, Status> {
        let request = request.into_inner();
        let service = self.service.as_ref();
        let response = self
            .with_deadline(|cancel| async move {
                is_admin::is_admin(service, &cancel, request).await
            })
            .await?;
        Ok(Response::new(response))
    }

    async fn logout(
        &self,
        request: Request<LogoutRequest>,
    ) -> Result<Response<LogoutResponse>, Status> {
        let request = request.into_inner();
        let service = self.service.as_ref();
        let response = self
            .with_deadline(|cancel| async move { logout::logout(service, &cancel, request).await })
            .await?;
        Ok(Response::new(response))
    }

    async fn validate_token(
        &self,
        request: Request<ValidateTokenRequest>,
    ) -> Result<Response<ValidateTokenResponse>, Status> {
        let request = request.into_inner();
        let service = self.service.as_ref();
        let response = self
            .with_deadline(|cancel| async move {
                validate_token::validate_token(service, &cancel, request).await
            })
            .await?;
        Ok(Response::new(response))
    }
}
