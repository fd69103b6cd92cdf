pub mod error;
pub mod header;
pub mod jwt;
pub mod password;
pub mod refresh;
pub mod session;

pub use error::AuthError;
pub use header::Credential;
pub use session::SessionService;
