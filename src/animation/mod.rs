//! Interpolation engine: typed blending, timing functions, deferred values.

pub mod computed;
pub mod interpolate;
pub mod list;
pub mod timing;

pub use computed::{Computed, EvalContext};
pub use interpolate::{blend, blend_as, blend_opt, Blend, Interpolation};
pub use list::{InterpolatedList, ValueList};
pub use timing::{StepPosition, TimingFunction};
