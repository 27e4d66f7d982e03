//! Built-in widgets.
//!
//! Each widget draws only into its own scratch canvas; placement and compositing belong to
//! the scheduler.

pub(crate) mod fill;
pub(crate) mod noise;
pub(crate) mod ramp;
pub(crate) mod shape;
pub(crate) mod swatch;

use crate::handler::registry::Registry;

pub use fill::Fill;
pub use noise::Noise;
pub use ramp::{Ramp, RampDirection};
pub use shape::{Shape, ShapeKind};
pub use swatch::Swatch;

/// Register every built-in widget type on `reg`.
///
/// Built-in names are distinct, so registration into an empty registry cannot fail; a
/// clash with an earlier custom registration keeps the custom handler.
pub(crate) fn register_builtins(reg: &mut Registry) {
    let results = [
        reg.register::<Fill>("builtin.fill", Some(fill::schema())),
        reg.register::<Ramp>("builtin.ramp", Some(ramp::schema())),
        reg.register::<Noise>("builtin.noise", Some(noise::schema())),
        reg.register::<Shape>("builtin.shape", Some(shape::schema())),
        reg.register::<Swatch>("builtin.swatch", Some(swatch::schema())),
    ];
    for r in results {
        if let Err(e) = r {
            tracing::warn!("built-in widget not registered: {e}");
        }
    }
}
