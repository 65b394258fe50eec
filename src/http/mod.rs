//! Request construction, the HTTP transport, and bounded dispatch.
mod client;
mod dispatcher;
mod request;


pub use client::{HttpSender, ReqwestSender, build_client};
pub use dispatcher::Dispatcher;
pub use request::{CONTENT_TYPE_JSON, OutboundRequest, RequestSource, build_request};
