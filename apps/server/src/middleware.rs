//! # ミドルウェア
//!
//! ルートごとに適用するミドルウェアを提供する。

pub mod negotiate;

pub use negotiate::{NegotiationState, RequestContext, RouteDescriptor, negotiate_format};
