//! Agent-sampling error type.

use thiserror::Error;

use gd_core::{NodeId, ZoneId};

/// Errors produced by `gd-agent`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A zone lists a member node that is not in the node table.
    #[error("zone {zone} lists node {node}, which is not in the node table")]
    UnknownMemberNode { zone: ZoneId, node: NodeId },

    #[error("departure window [{min}, {max}] is empty")]
    EmptyWindow { min: u32, max: u32 },
}

pub type AgentResult<T> = Result<T, AgentError>;
