//! Pixel buffers and the compositing primitive used to merge widget output into a frame.

pub(crate) mod canvas;
pub(crate) mod composite;
pub(crate) mod compositor;
