//! Transform module
//!
//! Object-to-world matrices and their inverses, keyed by [`TransformKey`].

mod transform_store;

pub use transform_store::{TransformKey, TransformProvider, TransformStore};
