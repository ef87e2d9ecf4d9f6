//! `gd-agent`: individual trips drawn from the OD volume matrix.
//!
//! # Crate layout
//!
//! | Module      | Contents                                           |
//! |-------------|----------------------------------------------------|
//! | [`agent`]   | `Agent`, the terminal trip record                  |
//! | [`sampler`] | `AgentSampler`, `SampleReport`                     |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                     |

pub mod agent;
pub mod error;
pub mod sampler;


pub use agent::Agent;
pub use error::{AgentError, AgentResult};
pub use sampler::{AgentSampler, SampleReport};
