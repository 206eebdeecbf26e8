use crate::encrypt::CipherKey;

/// Turns an operator supplied secret into cipher key material.
///
/// Derivation must be deterministic: the same secret has to produce the same
/// key on every start, otherwise existing collection files become unreadable.
/// There is no salt to persist alongside the collections.
///
/// The trait is sealed to keep derivation choices inside this crate.
pub trait KeyDerivationFunction: private::Sealed {
    /// Derives a key from `secret`.
    fn derive_key(secret: &str) -> CipherKey;
}

// Sealing the trait to prevent external implementations
pub(crate) mod private {
    pub trait Sealed {}
}
