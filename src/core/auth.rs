// Copyright (c) 2026 Amunchain
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! Transaction authentication schemes.
//!
//! The ledger only ever consumes the actor address an [`Auth`] resolves to.
//! Ed25519 checks are cheap and batched by the surrounding engine; P-256
//! checks cannot be batched and are priced per call.

use crate::core::codec::{CodecError, Packer, Unpacker};
use crate::core::types::{Address, Id};
use ring::rand::SecureRandom;
use ring::signature::{self, EcdsaKeyPair, Ed25519KeyPair, KeyPair, UnparsedPublicKey};
use thiserror::Error;

/// Ed25519 type tag.
pub const ED25519_ID: u8 = 0;
/// ECDSA P-256 type tag.
pub const SECP256R1_ID: u8 = 1;

/// Ed25519 verification cost.
pub const ED25519_COMPUTE_UNITS: u64 = 5;
/// ECDSA P-256 verification cost.
pub const SECP256R1_COMPUTE_UNITS: u64 = 10;

/// Ed25519 public key width.
pub const ED25519_PUBLIC_KEY_LEN: usize = 32;
/// Uncompressed P-256 public key width.
pub const SECP256R1_PUBLIC_KEY_LEN: usize = 65;
/// Signature width for both schemes (P-256 uses the fixed r||s form).
pub const SIGNATURE_LEN: usize = 64;

/// Auth errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("bad signature")]
    BadSignature,
    #[error("bad key")]
    BadKey,
    #[error("signing failed")]
    Signing,
}

/// Signer and signature for one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Auth {
    /// Ed25519 signature.
    Ed25519 {
        /// Public key.
        signer: [u8; ED25519_PUBLIC_KEY_LEN],
        /// Signature.
        signature: [u8; SIGNATURE_LEN],
    },
    /// ECDSA P-256 / SHA-256 signature.
    Secp256r1 {
        /// Uncompressed public key.
        signer: [u8; SECP256R1_PUBLIC_KEY_LEN],
        /// Fixed-width signature.
        signature: [u8; SIGNATURE_LEN],
    },
}

impl Auth {
    /// Sign `msg` with an Ed25519 key.
    pub fn sign_ed25519(key: &Ed25519KeyPair, msg: &[u8]) -> Result<Self, AuthError> {
        let signer = key
            .public_key()
            .as_ref()
            .try_into()
            .map_err(|_| AuthError::BadKey)?;
        let signature = key
            .sign(msg)
            .as_ref()
            .try_into()
            .map_err(|_| AuthError::Signing)?;
        Ok(Auth::Ed25519 { signer, signature })
    }

    /// Sign `msg` with a P-256 key created for `ECDSA_P256_SHA256_FIXED_SIGNING`.
    pub fn sign_secp256r1(
        key: &EcdsaKeyPair,
        rng: &dyn SecureRandom,
        msg: &[u8],
    ) -> Result<Self, AuthError> {
        let signer = key
            .public_key()
            .as_ref()
            .try_into()
            .map_err(|_| AuthError::BadKey)?;
        let sig = key.sign(rng, msg).map_err(|_| AuthError::Signing)?;
        let signature = sig.as_ref().try_into().map_err(|_| AuthError::Signing)?;
        Ok(Auth::Secp256r1 { signer, signature })
    }

    /// Wire type tag.
    pub fn type_id(&self) -> u8 {
        match self {
            Auth::Ed25519 { .. } => ED25519_ID,
            Auth::Secp256r1 { .. } => SECP256R1_ID,
        }
    }

    /// Verification cost.
    pub fn compute_units(&self) -> u64 {
        match self {
            Auth::Ed25519 { .. } => ED25519_COMPUTE_UNITS,
            Auth::Secp256r1 { .. } => SECP256R1_COMPUTE_UNITS,
        }
    }

    /// Whether the engine may batch this verification.
    pub fn batchable(&self) -> bool {
        matches!(self, Auth::Ed25519 { .. })
    }

    fn signer(&self) -> &[u8] {
        match self {
            Auth::Ed25519 { signer, .. } => signer,
            Auth::Secp256r1 { signer, .. } => signer,
        }
    }

    /// Ledger address of the signer: SHA-256(type tag || public key).
    pub fn actor(&self) -> Address {
        actor_address(self.type_id(), self.signer())
    }

    /// Check the signature over `msg`.
    pub fn verify(&self, msg: &[u8]) -> Result<(), AuthError> {
        let res = match self {
            Auth::Ed25519 { signer, signature: sig } => {
                UnparsedPublicKey::new(&signature::ED25519, signer).verify(msg, sig)
            }
            Auth::Secp256r1 { signer, signature: sig } => {
                UnparsedPublicKey::new(&signature::ECDSA_P256_SHA256_FIXED, signer)
                    .verify(msg, sig)
            }
        };
        res.map_err(|_| AuthError::BadSignature)
    }

    /// Encode the body (without the type tag).
    pub fn marshal(&self, p: &mut Packer) {
        match self {
            Auth::Ed25519 { signer, signature } => {
                p.pack_fixed(signer);
                p.pack_fixed(signature);
            }
            Auth::Secp256r1 { signer, signature } => {
                p.pack_fixed(signer);
                p.pack_fixed(signature);
            }
        }
    }

    /// Type tag followed by the body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut p = Packer::with_capacity(1 + SECP256R1_PUBLIC_KEY_LEN + SIGNATURE_LEN);
        p.pack_u8(self.type_id());
        self.marshal(&mut p);
        p.into_bytes()
    }

    /// Decode an Ed25519 body.
    pub fn unmarshal_ed25519(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Auth::Ed25519 {
            signer: fixed(u)?,
            signature: fixed(u)?,
        })
    }

    /// Decode a P-256 body.
    pub fn unmarshal_secp256r1(u: &mut Unpacker<'_>) -> Result<Self, CodecError> {
        Ok(Auth::Secp256r1 {
            signer: fixed(u)?,
            signature: fixed(u)?,
        })
    }
}

/// Address of the account controlled by `signer` under scheme `type_id`.
pub fn actor_address(type_id: u8, signer: &[u8]) -> Address {
    let mut buf = Vec::with_capacity(1 + signer.len());
    buf.push(type_id);
    buf.extend_from_slice(signer);
    Address::from_bytes(*Id::digest(&buf).as_bytes())
}

fn fixed<const N: usize>(u: &mut Unpacker<'_>) -> Result<[u8; N], CodecError> {
    let mut out = [0u8; N];
    out.copy_from_slice(u.unpack_fixed(N)?);
    Ok(out)
}
