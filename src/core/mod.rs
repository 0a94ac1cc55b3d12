//! 核心编排层：Coordinator、流水线阶段、错误类型

pub mod coordinator;
pub mod error;
pub mod state;

pub use coordinator::{Coordinator, ResponseEnvelope};
pub use error::DeskError;
pub use state::PipelineStage;
