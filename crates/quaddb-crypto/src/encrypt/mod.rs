pub mod aes_cbc;
pub mod cipher_key;

pub use aes_cbc::{AesCbcCipher, AES_BLOCK_SIZE};
pub use cipher_key::{CipherKey, KeySize};
