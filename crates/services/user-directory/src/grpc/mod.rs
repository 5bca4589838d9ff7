//! gRPC transport for the user directory.

mod user_grpc;

pub use user_grpc::{UserGrpcService, AUTHORIZATION_METADATA_KEY};
