pub mod errors;
pub mod hmac;
pub mod policy;

pub use errors::PasswordError;
pub use hmac::PasswordDigest;
pub use hmac::PasswordHasher;
pub use policy::PasswordPolicy;
