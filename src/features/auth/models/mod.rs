pub mod user;

pub use user::{Session, SessionContext, SessionUser, User, UserRole};
