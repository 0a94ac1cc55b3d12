//! 网关：对外 HTTP 接入（需 server feature）
//!
//! 传输层只负责把原始消息交给 Coordinator 并返回 ResponseEnvelope，分诊逻辑全部在 core 中。

pub mod http;

pub use http::{create_router, GatewayState, SessionStore};
