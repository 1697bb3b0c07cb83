pub mod errors;
pub mod issuer;

pub use errors::RefreshTokenError;
pub use issuer::RefreshToken;
pub use issuer::RefreshTokenIssuer;
