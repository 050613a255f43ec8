//! Pure text transforms: number normalization and phrase casing

pub mod case;
pub mod numbers;

pub use numbers::NumberNormalizer;
