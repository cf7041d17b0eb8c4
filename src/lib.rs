//! Convert Fortran edit descriptors (e.g. `i6`, `f10.3`, `es12.4e3`) into equivalent
//! format specifications, so values read from or written by Fortran programs can be
//! rendered with a comparable width, fill and precision.
//!
//! ```
//! assert_eq!(fortconvert::convert("F10.3", false).unwrap(), "10.3f");
//! ```
extern crate pest;
#[macro_use]
extern crate pest_derive;
pub mod fort_error;
pub mod format_specs;
pub mod output_spec;

pub use fort_error::{FError, FResult};
pub use format_specs::{Descriptor, Family};
pub use output_spec::{convert, OutputSpec};

/// Parse a single Fortran edit descriptor. Shorthand for [`Descriptor::parse`].
pub fn parse(descriptor: &str) -> FResult<Descriptor> {
    Descriptor::parse(descriptor)
}
