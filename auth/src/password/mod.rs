pub mod errors;
pub mod hasher;
pub mod scheme;

pub use errors::PasswordError;
pub use hasher::truncate;
pub use hasher::PasswordHasher;
pub use hasher::MAX_PASSWORD_BYTES;
pub use scheme::HashScheme;
