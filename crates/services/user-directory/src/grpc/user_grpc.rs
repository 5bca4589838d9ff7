//! gRPC implementation for UserDirectory.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::auth::AuthResolver;
use crate::service::UserService;
use domain::{NewUser, Principal, UserPatch};
use proto::user::{
    user_directory_server::UserDirectory, CreateUserRequest, DeleteUserRequest,
    DeleteUserResponse, GetUserRequest, UpdateUserRequest, UserResponse,
};

/// Metadata entry carrying `Bearer <token>`
pub const AUTHORIZATION_METADATA_KEY: &str = "authorization";

/// gRPC service wrapper for UserService.
pub struct UserGrpcService {
    service: Arc<dyn UserService>,
    auth: AuthResolver,
}

impl UserGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn UserService>, auth: AuthResolver) -> Self {
        Self { service, auth }
    }

    /// Resolve the caller before anything else touches the request.
    fn authenticate<T>(&self, request: &Request<T>) -> Result<Principal, Status> {
        let header = request
            .metadata()
            .get(AUTHORIZATION_METADATA_KEY)
            .and_then(|value| value.to_str().ok());

        self.auth.resolve(header).map_err(Status::from)
    }
}

#[tonic::async_trait]
impl UserDirectory for UserGrpcService {
    async fn create_user(
        &self,
        request: Request<CreateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let principal = self.authenticate(&request)?;
        let req = request.into_inner();

        let input = NewUser {
            name: req.name,
            email: req.email,
            age: req.age,
            phone_number: req.phone_number,
            address: req.address,
            role: req.role,
            referral_code: req.referral_code,
        };

        let user = self
            .service
            .create_user(&principal, input)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(user_to_proto(&user)))
    }

    async fn get_user(
        &self,
        request: Request<GetUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let principal = self.authenticate(&request)?;
        let req = request.into_inner();

        let user = self
            .service
            .get_user(&principal, &req.id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(user_to_proto(&user)))
    }

    async fn update_user(
        &self,
        request: Request<UpdateUserRequest>,
    ) -> Result<Response<UserResponse>, Status> {
        let principal = self.authenticate(&request)?;
        let req = request.into_inner();

        let patch = UserPatch {
            name: req.name,
            email: req.email,
            age: req.age,
            phone_number: req.phone_number,
            address: req.address,
            role: req.role,
            referral_code: req.referral_code,
        };

        let user = self
            .service
            .update_user(&principal, &req.id, patch)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(user_to_proto(&user)))
    }

    async fn delete_user(
        &self,
        request: Request<DeleteUserRequest>,
    ) -> Result<Response<DeleteUserResponse>, Status> {
        let principal = self.authenticate(&request)?;
        let req = request.into_inner();

        let deleted = self
            .service
            .delete_user(&principal, &req.id)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(DeleteUserResponse {
            id: deleted.id.to_string(),
            status: deleted.status.to_string(),
        }))
    }
}

/// Convert domain User to proto UserResponse.
fn user_to_proto(user: &domain::User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        age: user.age,
        phone_number: user.phone_number.clone(),
        address: user.address.clone(),
        role: user.role.to_string(),
        referral_code: user.referral_code.clone(),
        created_at: user.created_at.to_rfc3339(),
        created_by: user.created_by.clone(),
        status: user.status.to_string(),
    }
}
