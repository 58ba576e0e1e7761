//! Transfer submission results

use std::fmt;

/// How far a submitted transfer progressed before the client returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferStage {
    /// Accepted by the node, inclusion not awaited
    Submitted,
    /// Included in a best block
    InBlock,
    /// Included in a finalized block
    Finalized,
}

impl fmt::Display for TransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferStage::Submitted => write!(f, "submitted"),
            TransferStage::InBlock => write!(f, "in block"),
            TransferStage::Finalized => write!(f, "finalized"),
        }
    }
}

/// Result of a successful transfer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Stage reached
    pub stage: TransferStage,
    /// Extrinsic hash (0x-prefixed hex)
    pub extrinsic_hash: String,
    /// Hash of the including block, when inclusion was awaited
    pub block_hash: Option<String>,
}

impl TransferReceipt {
    /// Receipt for a transfer that was only submitted
    pub fn submitted(extrinsic_hash: impl Into<String>) -> Self {
        Self {
            stage: TransferStage::Submitted,
            extrinsic_hash: extrinsic_hash.into(),
            block_hash: None,
        }
    }

    /// Receipt for a transfer seen in a block at `stage`
    pub fn included(
        stage: TransferStage,
        extrinsic_hash: impl Into<String>,
        block_hash: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            extrinsic_hash: extrinsic_hash.into(),
            block_hash: Some(block_hash.into()),
        }
    }
}

impl fmt::Display for TransferReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.block_hash {
            Some(ref block) => write!(f, "{} ({} in {})", self.extrinsic_hash, self.stage, block),
            None => write!(f, "{} ({})", self.extrinsic_hash, self.stage),
        }
    }
}
