pub mod auth_dto;

pub use auth_dto::{AuthActionQuery, CredentialsDto, LoginResponse, SessionResponse};
