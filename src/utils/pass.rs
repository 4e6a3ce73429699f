//! Password-related utilities.

use lazy_static::lazy_static;
use libreauth::pass::{Algorithm, HashBuilder, Hasher};

pub const PWD_ALGORITHM: Algorithm = Algorithm::Argon2;
pub const PWD_SCHEME_VERSION: usize = 1;

// If the Hasher changes, make sure to increment PWD_SCHEME_VERSION
lazy_static! {
    static ref HASHER: Hasher = {
        HashBuilder::new()
            .algorithm(PWD_ALGORITHM)
            .version(PWD_SCHEME_VERSION)
            .finalize()
            .unwrap()
    };
}

/// Hash `password` into PHC string form for storage.
pub fn hash_password(password: &str) -> Result<String, String> {
    HASHER
        .hash(password)
        .map_err(|e| format!("hasher failed: {:?}", e))
}
