//! # Cryptographic Primitives
//!
//! Everything the signer needs from the curve and the hash functions:
//!
//! - **hash**: SHA-256, double SHA-256, HASH160.
//! - **keys**: WIF private keys and serialized public keys.
//! - **context**: the scoped secp256k1 context behind [`CurveBackend`].
//! - **nonce**: per-signature nonce selection.
//!
//! Nothing here is hand-rolled. ECDSA is `secp256k1` (libsecp256k1), the
//! hashes are `sha2` and `ripemd`.

pub mod context;
pub mod hash;
pub mod keys;
pub mod nonce;

pub use context::{CurveBackend, CurveContext};
pub use hash::{double_sha256, hash160, sha256};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use nonce::{derive_nonce, NonceData};
