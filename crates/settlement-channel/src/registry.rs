//! computation manifest registry
//!
//! static configuration describing which call signatures and target accounts
//! a channel's off-chain computation may reference, plus the opaque
//! verifier-preprocessing material handed to the proof gateway.

use scale_codec::{Decode, Encode};
use scale_info::TypeInfo;

use crate::error::{ChannelError, Result};
use crate::types::AccountId;

pub type ManifestId = u32;

#[derive(Clone, Debug, Encode, Decode, TypeInfo, PartialEq, Eq, Default)]
pub struct ComputationManifest {
    /// permitted call signatures
    pub selectors: Vec<[u8; 4]>,
    /// permitted target accounts
    pub targets: Vec<AccountId>,
    /// verifier-preprocessing bytes, opaque to the core
    pub preprocessing: Vec<u8>,
}

/// operator-gated manifest table
#[derive(Clone, Debug, Default)]
pub struct ManifestRegistry {
    manifests: Vec<ComputationManifest>,
}

impl ManifestRegistry {
    pub fn register(&mut self, manifest: ComputationManifest) -> ManifestId {
        self.manifests.push(manifest);
        (self.manifests.len() - 1) as ManifestId
    }

    pub fn get(&self, id: ManifestId) -> Result<&ComputationManifest> {
        self.manifests
            .get(id as usize)
            .ok_or(ChannelError::UnknownManifest)
    }
}
