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

//! Closed catalog of state-transition actions.
//!
//! Every action validates fully before it writes. Terminal failures come back
//! as `Ok(Outcome { success: false, .. })` with the reason in `output`;
//! storage faults and corruption come back as `Err`. Actions write straight to
//! the view they are given, so callers that need all-or-nothing semantics run
//! them through [`crate::core::runtime::executor::Executor`].

// Turns an accounting overflow/underflow into a failed outcome and propagates
// every other ledger error.
macro_rules! settle {
    ($units:expr, $e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) if err.is_terminal() => {
                return Ok($crate::core::actions::Outcome::failure(
                    $units,
                    err.to_string().into_bytes(),
                ))
            }
            Err(err) => return Err(err),
        }
    };
}

/// Type ids, compute units and size limits.
pub mod consts;
/// Failure output strings.
pub mod outputs;

mod create_asset;
mod create_nft;
mod export_asset;
mod get_nft;
mod import_asset;
mod mint_asset;
mod transfer;
mod transfer_nft;

pub use create_asset::CreateAsset;
pub use create_nft::CreateNft;
pub use export_asset::ExportAsset;
pub use get_nft::GetNft;
pub use import_asset::ImportAsset;
pub use mint_asset::MintAsset;
pub use transfer::Transfer;
pub use transfer_nft::TransferNft;

use crate::core::codec::{CodecError, Packer};
use crate::core::state::ledger::LedgerError;
use crate::core::state::view::Mutable;
use crate::core::types::{Address, Id};
use crate::core::warp::WarpMessage;

/// Everything an action may know about the transaction that carries it.
#[derive(Clone, Debug)]
pub struct ExecutionContext {
    /// Authenticated sender.
    pub actor: Address,
    /// Transaction id. Names assets and NFTs created by the action.
    pub tx_id: Id,
    /// Block timestamp (unix ms).
    pub timestamp: i64,
    /// Local chain.
    pub chain_id: Id,
    /// Local network.
    pub network_id: u32,
    /// Set when the attached warp message passed external verification.
    pub warp_verified: bool,
}

/// Result of executing one action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Whether the action took effect.
    pub success: bool,
    /// Compute units charged.
    pub units: u64,
    /// Action output, or the failure reason.
    pub output: Vec<u8>,
    /// Unsigned message for the external signer (export only).
    pub warp_message: Option<WarpMessage>,
}

impl Outcome {
    /// Successful outcome with `output`.
    pub fn success(units: u64, output: Vec<u8>) -> Self {
        Self {
            success: true,
            units,
            output,
            warp_message: None,
        }
    }

    /// Failed outcome with a reason.
    pub fn failure(units: u64, reason: impl Into<Vec<u8>>) -> Self {
        Self {
            success: false,
            units,
            output: reason.into(),
            warp_message: None,
        }
    }

    /// Attach an outgoing warp message.
    pub fn with_warp(mut self, message: WarpMessage) -> Self {
        self.warp_message = Some(message);
        self
    }
}

/// State-transition request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Move native asset.
    Transfer(Transfer),
    /// Mint an owned asset.
    MintAsset(MintAsset),
    /// Register a fungible asset.
    CreateAsset(CreateAsset),
    /// Register an NFT.
    CreateNft(CreateNft),
    /// Read an NFT url.
    GetNft(GetNft),
    /// Bring bridged value in from another chain.
    ImportAsset(ImportAsset),
    /// Send value to another chain.
    ExportAsset(ExportAsset),
    /// Reassign an NFT.
    TransferNft(TransferNft),
}

impl Action {
    /// Wire type tag.
    pub fn type_id(&self) -> u8 {
        match self {
            Action::Transfer(_) => consts::TRANSFER_ID,
            Action::MintAsset(_) => consts::MINT_ASSET_ID,
            Action::CreateAsset(_) => consts::CREATE_ASSET_ID,
            Action::CreateNft(_) => consts::CREATE_NFT_ID,
            Action::GetNft(_) => consts::GET_NFT_ID,
            Action::ImportAsset(_) => consts::IMPORT_ASSET_ID,
            Action::ExportAsset(_) => consts::EXPORT_ASSET_ID,
            Action::TransferNft(_) => consts::TRANSFER_NFT_ID,
        }
    }

    /// Short name used in logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Transfer(_) => "transfer",
            Action::MintAsset(_) => "mint_asset",
            Action::CreateAsset(_) => "create_asset",
            Action::CreateNft(_) => "create_nft",
            Action::GetNft(_) => "get_nft",
            Action::ImportAsset(_) => "import_asset",
            Action::ExportAsset(_) => "export_asset",
            Action::TransferNft(_) => "transfer_nft",
        }
    }

    /// Static compute cost, charged on success and failure alike.
    pub fn compute_units(&self) -> u64 {
        match self {
            Action::Transfer(_) => consts::TRANSFER_COMPUTE_UNITS,
            Action::MintAsset(_) => consts::MINT_ASSET_COMPUTE_UNITS,
            Action::CreateAsset(_) => consts::CREATE_ASSET_COMPUTE_UNITS,
            Action::CreateNft(_) => consts::CREATE_NFT_COMPUTE_UNITS,
            Action::GetNft(_) => consts::GET_NFT_COMPUTE_UNITS,
            Action::ImportAsset(_) => consts::IMPORT_ASSET_COMPUTE_UNITS,
            Action::ExportAsset(_) => consts::EXPORT_ASSET_COMPUTE_UNITS,
            Action::TransferNft(_) => consts::TRANSFER_NFT_COMPUTE_UNITS,
        }
    }

    /// True if the action must travel with a warp message.
    pub fn requires_warp(&self) -> bool {
        matches!(self, Action::ImportAsset(_))
    }

    /// Encode the action body (without the type tag).
    pub fn marshal(&self, p: &mut Packer) -> Result<(), CodecError> {
        match self {
            Action::Transfer(a) => a.marshal(p),
            Action::MintAsset(a) => a.marshal(p),
            Action::CreateAsset(a) => a.marshal(p),
            Action::CreateNft(a) => a.marshal(p),
            Action::GetNft(a) => a.marshal(p),
            Action::ImportAsset(a) => a.marshal(p),
            Action::ExportAsset(a) => a.marshal(p),
            Action::TransferNft(a) => a.marshal(p),
        }
    }

    /// Type tag followed by the body.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        let mut p = Packer::with_capacity(64);
        p.pack_u8(self.type_id());
        self.marshal(&mut p)?;
        Ok(p.into_bytes())
    }

    /// Run the action against `state`.
    pub fn execute<S: Mutable + ?Sized>(
        &self,
        state: &mut S,
        ctx: &ExecutionContext,
    ) -> Result<Outcome, LedgerError> {
        match self {
            Action::Transfer(a) => a.execute(state, ctx),
            Action::MintAsset(a) => a.execute(state, ctx),
            Action::CreateAsset(a) => a.execute(state, ctx),
            Action::CreateNft(a) => a.execute(state, ctx),
            Action::GetNft(a) => a.execute(&*state, ctx),
            Action::ImportAsset(a) => a.execute(state, ctx),
            Action::ExportAsset(a) => a.execute(state, ctx),
            Action::TransferNft(a) => a.execute(state, ctx),
        }
    }
}
