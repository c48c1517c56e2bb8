//! # estate-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use dto::{
    AuthResponse, CreateFavoriteRequest, CreatePropertyRequest, FavoriteResponse,
    ForgotPasswordRequest, HealthResponse, LoginRequest, MessageResponse, PropertyListQuery,
    PropertyListResponse, PropertyResponse, ReadinessResponse, RegisterRequest,
    RejectPropertyRequest, ResetPasswordRequest, SessionCheckResponse, UpdatePropertyRequest,
    UserResponse, ViewCountResponse,
};
pub use services::{
    AuthService, FavoriteService, LogNotifier, PropertyService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings,
};
