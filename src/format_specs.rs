//! Represent Fortran edit descriptors as Rust types.
//!
//! The first step in translating a Fortran edit descriptor such as "f10.3" is to
//! parse it into a [`Descriptor`] with its `parse` method:
//!
//! ```
//! # use fortconvert::format_specs::{Descriptor, Family};
//! let d = Descriptor::parse("f10.3").unwrap();
//! assert_eq!(d.family(), Family::Real);
//! assert_eq!(d.width(), Some(10));
//! assert_eq!(d.fraction_digits(), Some(3));
//! ```
//!
//! From there, the descriptor can be turned into an equivalent format specification
//! with [`Descriptor::render`] or [`Descriptor::output_spec`] (see [`crate::output_spec`]).
use std::fmt::Display;
use std::str::FromStr;

use pest::{Parser, iterators::Pair};

use crate::fort_error::{FError, FResult};

#[derive(Parser)]
#[grammar = "fort.pest"]
pub(crate) struct FortParser;

/// Which kind of value a Fortran edit descriptor formats.
///
/// Fortran has the following families of data edit descriptors:
/// - `I`: decimal integers,
/// - `B`, `O`, `Z`: binary, octal and hexadecimal integers,
/// - `F`: non-exponential reals with a fixed number of digits after the decimal,
/// - `D`: like `F`, kept separate because Fortran writes double precision values with it,
/// - `E`, `EN`, `ES`: exponential, engineering and scientific notation,
/// - `L`: logicals (booleans),
/// - `A`: characters (strings), and
/// - `G`: generalized, which picks between `F` and `E` based on magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Family {
    Integer,
    Binary,
    Octal,
    Hex,
    Real,
    Double,
    Exponential,
    Engineering,
    Scientific,
    Logical,
    Character,
    General,
}

impl Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letters().to_ascii_lowercase())
    }
}

impl Family {
    /// The Fortran letter(s) that introduce this family, in upper case.
    pub fn letters(&self) -> &'static str {
        match self {
            Family::Integer => "I",
            Family::Binary => "B",
            Family::Octal => "O",
            Family::Hex => "Z",
            Family::Real => "F",
            Family::Double => "D",
            Family::Exponential => "E",
            Family::Engineering => "EN",
            Family::Scientific => "ES",
            Family::Logical => "L",
            Family::Character => "A",
            Family::General => "G",
        }
    }

    /// `true` for the integer families (`I`, `B`, `O`, `Z`), `false` otherwise.
    ///
    /// For these, the digits after the "." give a minimum number of digits rather
    /// than a precision.
    pub fn is_integer_like(&self) -> bool {
        matches!(self, Family::Integer | Family::Binary | Family::Octal | Family::Hex)
    }

    /// `true` for the real families (`F`, `D`, `E`, `EN`, `ES`, `G`), `false` otherwise.
    pub fn is_real_like(&self) -> bool {
        matches!(
            self,
            Family::Real
                | Family::Double
                | Family::Exponential
                | Family::Engineering
                | Family::Scientific
                | Family::General
        )
    }

    fn from_rule(rule: Rule) -> Option<Self> {
        let family = match rule {
            Rule::integer => Family::Integer,
            Rule::binary => Family::Binary,
            Rule::octal => Family::Octal,
            Rule::hex => Family::Hex,
            Rule::real => Family::Real,
            Rule::double => Family::Double,
            Rule::exponential => Family::Exponential,
            Rule::engineering => Family::Engineering,
            Rule::scientific => Family::Scientific,
            Rule::logical => Family::Logical,
            Rule::char => Family::Character,
            Rule::general => Family::General,
            _ => return None,
        };
        Some(family)
    }
}


/// A single parsed Fortran edit descriptor, e.g. `i6`, `f10.3` or `es12.4e3`.
///
/// Each numeric component is `Some` only if it was written in the descriptor:
/// - `width` is the total field width (absent only for a bare `a`),
/// - `fraction_digits` is the number after the "." (digits after the decimal point
///   for reals, minimum digit count for integers), and
/// - `exponent_digits` is the number after an `e`/`d` exponent suffix.
///
/// Descriptors are immutable once parsed. With the `serde` feature, a descriptor is
/// (de)serialized as its descriptor text, so deserializing goes through the same
/// grammar as [`Descriptor::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Descriptor {
    family: Family,
    width: Option<u32>,
    fraction_digits: Option<u32>,
    exponent_digits: Option<u32>,
}

impl Descriptor {
    /// Parse a single Fortran edit descriptor.
    ///
    /// Letters are case-insensitive, so `"es12.4e3"` and `"ES12.4E3"` are equivalent.
    /// The descriptor must be given bare: repeat counts (`3i4`), surrounding parentheses,
    /// commas and whitespace are all rejected.
    ///
    /// Returns an [`FError::InvalidDescriptor`] if the type letter is unknown, a required
    /// component is missing, or there are characters left over after the descriptor
    /// (e.g. `"i8.4e2"` or `"a4.2"`).
    pub fn parse(text: &str) -> FResult<Self> {
        match Self::parse_inner(text) {
            Ok(desc) => {
                tracing::trace!(input = text, family = ?desc.family, "parsed Fortran edit descriptor");
                Ok(desc)
            },
            Err(e) => {
                tracing::debug!(input = text, error = %e, "invalid Fortran edit descriptor");
                Err(e)
            }
        }
    }

    fn parse_inner(text: &str) -> FResult<Self> {
        let tree = FortParser::parse(Rule::descriptor, text)
            .map_err(|e| FError::from_pest(e, text))?
            .next()
            .ok_or_else(|| FError::invalid(text, "empty parse tree"))?;

        let field = tree.into_inner()
            .next()
            .ok_or_else(|| FError::invalid(text, "no descriptor found"))?;

        let family = Family::from_rule(field.as_rule())
            .ok_or_else(|| FError::invalid(text, "no descriptor found"))?;

        let mut desc = Self { family, width: None, fraction_digits: None, exponent_digits: None };
        for part in field.into_inner() {
            let value = consume_number(&part, text)?;
            match part.as_rule() {
                Rule::width => desc.width = Some(value),
                Rule::prec => desc.fraction_digits = Some(value),
                Rule::exp => desc.exponent_digits = Some(value),
                _ => return Err(FError::invalid(text, "unexpected component")),
            }
        }

        Ok(desc)
    }

    /// Which family of edit descriptor this is.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Total field width, if given.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Digits after the decimal point (reals) or minimum digit count (integers), if given.
    pub fn fraction_digits(&self) -> Option<u32> {
        self.fraction_digits
    }

    /// Width of the exponent field, if given.
    pub fn exponent_digits(&self) -> Option<u32> {
        self.exponent_digits
    }
}

impl FromStr for Descriptor {
    type Err = FError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Descriptor {
    type Error = FError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Descriptor> for String {
    fn from(value: Descriptor) -> Self {
        value.to_string()
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.family)?;
        if let Some(w) = self.width {
            write!(f, "{w}")?;
        }
        if let Some(d) = self.fraction_digits {
            write!(f, ".{d}")?;
        }
        if let Some(e) = self.exponent_digits {
            write!(f, "e{e}")?;
        }
        Ok(())
    }
}

fn consume_number(pair: &Pair<Rule>, text: &str) -> FResult<u32> {
    // The grammar only allows ASCII digits here, so the only failure is overflow
    pair.as_str().parse()
        .map_err(|_| FError::invalid(text, format!("number out of range: {}", pair.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desc(
        family: Family,
        width: Option<u32>,
        fraction_digits: Option<u32>,
        exponent_digits: Option<u32>,
    ) -> Descriptor {
        Descriptor { family, width, fraction_digits, exponent_digits }
    }

    #[test]
    fn test_integer_families() -> FResult<()> {
        let families = [
            ("i", Family::Integer),
            ("b", Family::Binary),
            ("o", Family::Octal),
            ("z", Family::Hex),
        ];
        for (letter, family) in families {
            let d = Descriptor::parse(&format!("{letter}8"))?;
            assert_eq!(d, desc(family, Some(8), None, None), "Parsing '{letter}8' failed");

            let d = Descriptor::parse(&format!("{letter}8.6"))?;
            assert_eq!(d, desc(family, Some(8), Some(6), None), "Parsing '{letter}8.6' failed");

            let bads = [format!("{letter}"), format!("{letter}8."), format!("{letter}8.4e2"), format!("{letter}-8")];
            for bad in bads {
                assert!(Descriptor::parse(&bad).is_err(), "Parsing '{bad}' did not return an error");
            }
        }
        Ok(())
    }

    #[test]
    fn test_fixed_reals() -> FResult<()> {
        for (letter, family) in [("f", Family::Real), ("d", Family::Double)] {
            let d = Descriptor::parse(&format!("{letter}10.3"))?;
            assert_eq!(d, desc(family, Some(10), Some(3), None), "Parsing '{letter}10.3' failed");

            let bads = [format!("{letter}"), format!("{letter}6"), format!("{letter}6."), format!("{letter}6.2e4")];
            for bad in bads {
                assert!(Descriptor::parse(&bad).is_err(), "Parsing '{bad}' did not return an error");
            }
        }
        Ok(())
    }

    #[test]
    fn test_exponent_families() -> FResult<()> {
        let families = [
            ("e", Family::Exponential),
            ("en", Family::Engineering),
            ("es", Family::Scientific),
            ("g", Family::General),
        ];

        for (letters, family) in families {
            let d = Descriptor::parse(&format!("{letters}12.4"))?;
            assert_eq!(d, desc(family, Some(12), Some(4), None), "Parsing '{letters}12.4' failed");

            let d = Descriptor::parse(&format!("{letters}12.4e3"))?;
            assert_eq!(d, desc(family, Some(12), Some(4), Some(3)), "Parsing '{letters}12.4e3' failed");

            let d = Descriptor::parse(&format!("{letters}12.4d2"))?;
            assert_eq!(d, desc(family, Some(12), Some(4), Some(2)), "Parsing '{letters}12.4d2' failed");

            let bads = [
                format!("{letters}"),
                format!("{letters}6"),
                format!("{letters}6.2a4"),
                format!("{letters}6.2e"),
            ];
            for bad in bads {
                assert!(Descriptor::parse(&bad).is_err(), "Parsing '{bad}' did not return an error");
            }
        }
        Ok(())
    }

    #[test]
    fn test_two_letter_families_not_split() -> FResult<()> {
        assert_eq!(Descriptor::parse("EN6.2")?.family(), Family::Engineering);
        assert_eq!(Descriptor::parse("ES6.2")?.family(), Family::Scientific);
        assert_eq!(Descriptor::parse("E6.2")?.family(), Family::Exponential);
        assert!(Descriptor::parse("EX6.2").is_err(), "Parsing 'EX6.2' did not return an error");
        Ok(())
    }

    #[test]
    fn test_logical() -> FResult<()> {
        assert_eq!(Descriptor::parse("l1")?, desc(Family::Logical, Some(1), None, None), "Parsing 'l1' failed");
        assert_eq!(Descriptor::parse("L0")?, desc(Family::Logical, Some(0), None, None), "Parsing 'L0' failed");

        for bad in ["l", "l4.2", "l4.2e3", "l-1"] {
            assert!(Descriptor::parse(bad).is_err(), "Parsing '{bad}' did not return an error");
        }
        Ok(())
    }

    #[test]
    fn test_char() -> FResult<()> {
        assert_eq!(Descriptor::parse("a")?, desc(Family::Character, None, None, None), "Parsing 'a' failed");
        let d = Descriptor::parse("A16")?;
        assert_eq!(d, desc(Family::Character, Some(16), None, None), "Parsing 'A16' failed");

        for bad in ["a4.2", "a4.2e3", "a-16"] {
            assert!(Descriptor::parse(bad).is_err(), "Parsing '{bad}' did not return an error");
        }
        Ok(())
    }

    #[test]
    fn test_case_insensitive() -> FResult<()> {
        assert_eq!(Descriptor::parse("Es12.4D3")?, Descriptor::parse("es12.4e3")?);
        assert_eq!(Descriptor::parse("eN8.1")?.family(), Family::Engineering);
        Ok(())
    }

    #[test]
    fn test_invalid() {
        for bad in ["", "Y", "y6", " i6", "i6 ", "(i6)", "3i4", "i6,", "x", "2x", "t10"] {
            let e = Descriptor::parse(bad);
            assert!(e.is_err(), "Parsing '{bad}' did not return an error");
        }
    }

    #[test]
    fn test_error_carries_input() {
        let e = Descriptor::parse("I8.4E2").unwrap_err();
        assert_eq!(e.input(), "I8.4E2");
        assert!(matches!(e, FError::InvalidDescriptor { .. }));
    }

    #[test]
    fn test_overflow_is_error() {
        let e = Descriptor::parse("i99999999999").unwrap_err();
        assert_eq!(e.input(), "i99999999999");
    }

    #[test]
    fn test_from_str() -> FResult<()> {
        let d: Descriptor = "g7.2".parse()?;
        assert_eq!(d, desc(Family::General, Some(7), Some(2), None));
        Ok(())
    }

    #[test]
    fn test_display() -> FResult<()> {
        let cases = [
            ("I6", "i6"),
            ("z8.10", "z8.10"),
            ("ES12.4E3", "es12.4e3"),
            ("en9.2d2", "en9.2e2"),
            ("A", "a"),
            ("L5", "l5"),
        ];
        for (s, expected) in cases {
            let d = Descriptor::parse(s)?;
            assert_eq!(d.to_string(), expected, "Displaying '{s}' failed");
            assert_eq!(Descriptor::parse(&d.to_string())?, d, "Re-parsing the display of '{s}' failed");
        }
        Ok(())
    }

    #[test]
    fn test_string_conversions() -> FResult<()> {
        let d = Descriptor::try_from("EN9.2D2".to_owned())?;
        assert_eq!(d, desc(Family::Engineering, Some(9), Some(2), Some(2)));
        assert_eq!(String::from(d), "en9.2e2");

        let e = Descriptor::try_from("a4.2e3".to_owned());
        assert!(e.is_err(), "Converting 'a4.2e3' did not return an error");
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_grammar() -> FResult<()> {
        let d = Descriptor::parse("ES12.4E3")?;
        let json = serde_json::to_string(&d).expect("serialize descriptor");
        assert_eq!(json, "\"es12.4e3\"");
        let back: Descriptor = serde_json::from_str(&json).expect("deserialize descriptor");
        assert_eq!(back, d);

        for bad in ["\"a4.2e3\"", "\"f\"", "\"\"", "{\"family\":\"Character\",\"width\":4}"] {
            let res = serde_json::from_str::<Descriptor>(bad);
            assert!(res.is_err(), "Deserializing {bad} did not return an error");
        }
        Ok(())
    }

    #[test]
    fn test_family_groups() {
        let all = [
            Family::Integer, Family::Binary, Family::Octal, Family::Hex, Family::Real, Family::Double,
            Family::Exponential, Family::Engineering, Family::Scientific, Family::Logical,
            Family::Character, Family::General,
        ];
        for family in all {
            let n = family.is_integer_like() as u8 + family.is_real_like() as u8;
            match family {
                Family::Logical | Family::Character => {
                    assert_eq!(n, 0, "{family:?} should be neither integer- nor real-like")
                },
                _ => assert_eq!(n, 1, "{family:?} should be exactly one of integer- or real-like"),
            }
        }
    }
}
