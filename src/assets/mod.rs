//! File lookup for widgets that read external resources (images, LUTs, fonts).

pub(crate) mod search;
