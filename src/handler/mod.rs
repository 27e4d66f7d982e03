//! The widget handler contract: requests, responses, statuses, middleware and the type
//! registry.

pub(crate) mod middleware;
pub(crate) mod registry;
pub(crate) mod request;
pub(crate) mod status;
#[cfg(test)]
pub(crate) mod testing;
