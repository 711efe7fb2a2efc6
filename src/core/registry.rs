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

//! Type-tag decoder tables for actions and auth schemes.
//!
//! Built once at startup and passed by reference.

use crate::core::actions::{
    consts, Action, CreateAsset, CreateNft, ExportAsset, GetNft, ImportAsset, MintAsset, Transfer,
    TransferNft,
};
use crate::core::auth::{self, Auth};
use crate::core::codec::{CodecError, Unpacker};
use crate::core::warp::WarpMessage;
use std::collections::BTreeMap;
use thiserror::Error;

/// Registry errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown action type {0}")]
    UnknownAction(u8),
    #[error("unknown auth type {0}")]
    UnknownAuth(u8),
    #[error("type {0} registered twice")]
    Duplicate(u8),
    #[error("action requires a warp message")]
    WarpRequired,
    #[error("unexpected warp message")]
    UnexpectedWarp,
    #[error("codec: {0}")]
    Codec(#[from] CodecError),
}

/// Decodes an action body.
pub type ActionDecoder = fn(&mut Unpacker<'_>, Option<&WarpMessage>) -> Result<Action, CodecError>;
/// Decodes an auth body.
pub type AuthDecoder = fn(&mut Unpacker<'_>) -> Result<Auth, CodecError>;

#[derive(Clone, Copy)]
struct ActionEntry {
    decode: ActionDecoder,
    requires_warp: bool,
}

/// Decoder tables.
#[derive(Clone)]
pub struct Registry {
    actions: BTreeMap<u8, ActionEntry>,
    auth: BTreeMap<u8, AuthDecoder>,
}

impl Registry {
    /// Registry holding every built-in action and auth scheme.
    pub fn new() -> Self {
        let mut actions = BTreeMap::new();
        let mut put = |id: u8, decode: ActionDecoder, requires_warp: bool| {
            actions.insert(
                id,
                ActionEntry {
                    decode,
                    requires_warp,
                },
            );
        };
        put(consts::TRANSFER_ID, decode_transfer, false);
        put(consts::MINT_ASSET_ID, decode_mint_asset, false);
        put(consts::CREATE_ASSET_ID, decode_create_asset, false);
        put(consts::CREATE_NFT_ID, decode_create_nft, false);
        put(consts::GET_NFT_ID, decode_get_nft, false);
        put(consts::IMPORT_ASSET_ID, decode_import_asset, true);
        put(consts::EXPORT_ASSET_ID, decode_export_asset, false);
        put(consts::TRANSFER_NFT_ID, decode_transfer_nft, false);

        let mut schemes: BTreeMap<u8, AuthDecoder> = BTreeMap::new();
        schemes.insert(auth::ED25519_ID, Auth::unmarshal_ed25519);
        schemes.insert(auth::SECP256R1_ID, Auth::unmarshal_secp256r1);

        Self {
            actions,
            auth: schemes,
        }
    }

    /// Add an action decoder under a fresh type tag.
    pub fn register_action(
        &mut self,
        id: u8,
        decode: ActionDecoder,
        requires_warp: bool,
    ) -> Result<(), RegistryError> {
        if self.actions.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.actions.insert(
            id,
            ActionEntry {
                decode,
                requires_warp,
            },
        );
        Ok(())
    }

    /// Add an auth decoder under a fresh type tag.
    pub fn register_auth(&mut self, id: u8, decode: AuthDecoder) -> Result<(), RegistryError> {
        if self.auth.contains_key(&id) {
            return Err(RegistryError::Duplicate(id));
        }
        self.auth.insert(id, decode);
        Ok(())
    }

    /// Decode a tagged action. `warp` must be present exactly when the action needs it.
    pub fn decode_action(
        &self,
        bytes: &[u8],
        warp: Option<&WarpMessage>,
    ) -> Result<Action, RegistryError> {
        let mut u = Unpacker::new(bytes);
        let id = u.unpack_u8()?;
        let entry = self
            .actions
            .get(&id)
            .ok_or(RegistryError::UnknownAction(id))?;
        match (entry.requires_warp, warp.is_some()) {
            (true, false) => return Err(RegistryError::WarpRequired),
            (false, true) => return Err(RegistryError::UnexpectedWarp),
            _ => {}
        }
        let action = (entry.decode)(&mut u, warp)?;
        u.finish()?;
        Ok(action)
    }

    /// Decode a tagged auth.
    pub fn decode_auth(&self, bytes: &[u8]) -> Result<Auth, RegistryError> {
        let mut u = Unpacker::new(bytes);
        let id = u.unpack_u8()?;
        let decode = self.auth.get(&id).ok_or(RegistryError::UnknownAuth(id))?;
        let auth = decode(&mut u)?;
        u.finish()?;
        Ok(auth)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_transfer(u: &mut Unpacker<'_>, _: Option<&WarpMessage>) -> Result<Action, CodecError> {
    Ok(Action::Transfer(Transfer::unmarshal(u)?))
}

fn decode_mint_asset(u: &mut Unpacker<'_>, _: Option<&WarpMessage>) -> Result<Action, CodecError> {
    Ok(Action::MintAsset(MintAsset::unmarshal(u)?))
}

fn decode_create_asset(
    u: &mut Unpacker<'_>,
    _: Option<&WarpMessage>,
) -> Result<Action, CodecError> {
    Ok(Action::CreateAsset(CreateAsset::unmarshal(u)?))
}

fn decode_create_nft(u: &mut Unpacker<'_>, _: Option<&WarpMessage>) -> Result<Action, CodecError> {
    Ok(Action::CreateNft(CreateNft::unmarshal(u)?))
}

fn decode_get_nft(u: &mut Unpacker<'_>, _: Option<&WarpMessage>) -> Result<Action, CodecError> {
    Ok(Action::GetNft(GetNft::unmarshal(u)?))
}

fn decode_import_asset(
    u: &mut Unpacker<'_>,
    warp: Option<&WarpMessage>,
) -> Result<Action, CodecError> {
    Ok(Action::ImportAsset(ImportAsset::unmarshal(u, warp)?))
}

fn decode_export_asset(
    u: &mut Unpacker<'_>,
    _: Option<&WarpMessage>,
) -> Result<Action, CodecError> {
    Ok(Action::ExportAsset(ExportAsset::unmarshal(u)?))
}

fn decode_transfer_nft(
    u: &mut Unpacker<'_>,
    _: Option<&WarpMessage>,
) -> Result<Action, CodecError> {
    Ok(Action::TransferNft(TransferNft::unmarshal(u)?))
}
