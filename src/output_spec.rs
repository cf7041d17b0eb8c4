//! Translate Fortran edit descriptors into format specifications.
//!
//! The output follows the Python-style format-spec mini-language
//! (`[[fill]align][sign][0][width][.precision][type]`), as used by `str.format` and
//! `{fmt}`/`std::format` in C++. The most direct way to use it is the [`convert`] function:
//!
//! ```
//! # use fortconvert::output_spec::convert;
//! assert_eq!(convert("I6", false).unwrap(), "6d");
//! assert_eq!(convert("F10.3", false).unwrap(), "10.3f");
//! assert_eq!(convert("Z8.10", true).unwrap(), "08X");
//! ```
//!
//! The translation is a best effort, since the two languages share only part of their
//! formatting features. In particular:
//!
//! 1. Fortran controls the field width and the minimum digit count of integers separately.
//!    Here, zero padding is only used (for the whole width) when the minimum digit count
//!    is at least the field width.
//! 2. The exponent width (the `3` in `es12.4e3`) is dropped; the target language always
//!    picks the exponent width itself.
//! 3. Engineering (`en`) and scientific (`es`) notation have no equivalent and fall back to
//!    plain exponential notation.
//! 4. `f` and `d` both become fixed-point, so the single/double precision distinction is lost.
//!
//! If you want to assemble your own output instead of using the joined string, use
//! [`Descriptor::output_spec`] or [`OutputSpec::parse`] to get the individual pieces.
use std::fmt::Display;

use crate::fort_error::FResult;
use crate::format_specs::{Descriptor, Family};

/// The character used to pad a field out to its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Fill {
    /// Pad with spaces. This is the default, so nothing is written for it.
    Space,
    /// Pad with leading zeros.
    Zero,
}

impl Fill {
    pub fn symbol(&self) -> &'static str {
        match self {
            Fill::Space => "",
            Fill::Zero => "0",
        }
    }
}

/// Alignment of a value within its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    pub fn symbol(&self) -> &'static str {
        match self {
            Align::Left => "<",
            Align::Center => "^",
            Align::Right => ">",
        }
    }
}

/// When a sign is written for a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Only negative numbers get a sign.
    Minus,
    /// Positive numbers get a `+`.
    Plus,
    /// Positive numbers get a leading space.
    Space,
}

impl Sign {
    pub fn symbol(&self) -> &'static str {
        match self {
            Sign::Minus => "-",
            Sign::Plus => "+",
            Sign::Space => " ",
        }
    }
}

/// The pieces of a format specification derived from one [`Descriptor`].
///
/// Its `Display` implementation joins the pieces into a single specification string,
/// leaving out anything that is already the default:
///
/// ```
/// # use fortconvert::output_spec::{OutputSpec, Fill, Sign};
/// let spec = OutputSpec::parse("es12.4e3", false).unwrap();
/// assert_eq!(spec.fill, Fill::Space);
/// assert_eq!(spec.sign, Some(Sign::Minus));
/// assert_eq!(spec.width, Some(12));
/// assert_eq!(spec.precision, Some(4));
/// assert_eq!(spec.type_code, Some('e'));
/// assert_eq!(spec.to_string(), "12.4e");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputSpec {
    pub fill: Fill,
    pub align: Align,
    /// `None` for families where the sign is left entirely to the target language
    pub sign: Option<Sign>,
    pub width: Option<u32>,
    pub precision: Option<u32>,
    /// `None` for logicals, which are written with only a width
    pub type_code: Option<char>,
}

impl OutputSpec {
    /// Parse a Fortran edit descriptor and derive its output specification in one step.
    pub fn parse(text: &str, uppercase: bool) -> FResult<Self> {
        Ok(Descriptor::parse(text)?.output_spec(uppercase))
    }
}

impl Display for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fill.symbol())?;
        if self.align != Align::Right {
            write!(f, "{}", self.align.symbol())?;
        }
        match self.sign {
            Some(Sign::Minus) | None => (),
            Some(sign) => write!(f, "{}", sign.symbol())?,
        }
        if let Some(w) = self.width {
            write!(f, "{w}")?;
        }
        if let Some(p) = self.precision {
            write!(f, ".{p}")?;
        }
        if let Some(t) = self.type_code {
            write!(f, "{t}")?;
        }
        Ok(())
    }
}

impl Descriptor {
    /// Derive the output specification for this descriptor.
    ///
    /// `uppercase` switches the hexadecimal, fixed-point, exponential and general type
    /// codes to upper case (so hex digits, the exponent letter, and inf/nan are written
    /// in upper case). It has no effect on any other family.
    pub fn output_spec(&self, uppercase: bool) -> OutputSpec {
        let family = self.family();
        let type_code = type_code(family, uppercase);

        let (sign, precision) = if family.is_real_like() {
            (Some(Sign::Minus), self.fraction_digits())
        } else {
            (None, None)
        };

        OutputSpec {
            fill: self.fill(),
            align: Align::Right,
            sign,
            width: self.width(),
            precision,
            type_code,
        }
    }

    /// Translate this descriptor into a format specification string.
    ///
    /// ```
    /// # use fortconvert::format_specs::Descriptor;
    /// let d = Descriptor::parse("g7.2").unwrap();
    /// assert_eq!(d.render(false), "7.2g");
    /// assert_eq!(d.render(true), "7.2G");
    /// ```
    pub fn render(&self, uppercase: bool) -> String {
        self.output_spec(uppercase).to_string()
    }

    fn fill(&self) -> Fill {
        // A minimum digit count that covers the whole field means every position
        // holds a digit, which is only possible by zero padding.
        match (self.width(), self.fraction_digits()) {
            (Some(w), Some(m)) if self.family().is_integer_like() && w > 0 && m > 0 && m >= w => {
                Fill::Zero
            },
            _ => Fill::Space,
        }
    }
}

fn type_code(family: Family, uppercase: bool) -> Option<char> {
    let c = match (family, uppercase) {
        (Family::Integer, _) => 'd',
        (Family::Binary, _) => 'b',
        (Family::Octal, _) => 'o',
        (Family::Hex, false) => 'x',
        (Family::Hex, true) => 'X',
        (Family::Real | Family::Double, false) => 'f',
        (Family::Real | Family::Double, true) => 'F',
        (Family::Exponential | Family::Engineering | Family::Scientific, false) => 'e',
        (Family::Exponential | Family::Engineering | Family::Scientific, true) => 'E',
        (Family::Logical, _) => return None,
        (Family::Character, _) => 's',
        (Family::General, false) => 'g',
        (Family::General, true) => 'G',
    };
    Some(c)
}

/// Convert a single Fortran edit descriptor into an equivalent format specification.
///
/// Returns an [`FError::InvalidDescriptor`](crate::fort_error::FError::InvalidDescriptor)
/// if `descriptor` is not a valid edit descriptor. See the [module documentation](self)
/// for where the conversion is only approximate.
///
/// ```
/// # use fortconvert::output_spec::convert;
/// assert_eq!(convert("ES12.4E3", false).unwrap(), "12.4e");
/// assert_eq!(convert("L5", false).unwrap(), "5");
/// assert_eq!(convert("A", false).unwrap(), "s");
/// assert!(convert("I8.4E2", false).is_err());
/// ```
pub fn convert(descriptor: &str, uppercase: bool) -> FResult<String> {
    let spec = Descriptor::parse(descriptor)?.render(uppercase);
    tracing::trace!(input = descriptor, uppercase, output = %spec, "converted Fortran edit descriptor");
    Ok(spec)
}
