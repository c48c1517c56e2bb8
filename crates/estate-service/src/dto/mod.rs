//! Data transfer objects for the API surface

mod mappers;
mod requests;
mod responses;

pub use requests::{
    CreateFavoriteRequest, CreatePropertyRequest, ForgotPasswordRequest, LoginRequest,
    PropertyListQuery, RegisterRequest, RejectPropertyRequest, ResetPasswordRequest,
    StringOrList, UpdatePropertyRequest,
};
pub use responses::{
    AuthResponse, FavoriteResponse, HealthResponse, MessageResponse, PropertyListResponse,
    PropertyResponse, ReadinessResponse, SessionCheckResponse, UserResponse, ViewCountResponse,
};
