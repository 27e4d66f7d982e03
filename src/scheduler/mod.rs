//! Per-frame widget scheduling.
//!
//! Every widget of a frame runs in its own pipeline. A [`pool::ResourcePool`] bounds how many
//! handlers execute at once and a [`ledger::DrawLedger`] decides when a finished widget may
//! composite: a widget may go ahead of its declared order only when every pending
//! predecessor's area is disjoint from its own. The composited canvas is therefore identical
//! to a strictly sequential, z-ordered run.

pub(crate) mod backoff;
pub(crate) mod descriptor;
pub(crate) mod frame;
pub(crate) mod ledger;
pub(crate) mod metadata;
pub(crate) mod pipeline;
pub(crate) mod pool;
