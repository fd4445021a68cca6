//! Numeric domains for pixel samples.
//!
//! Every [`PixelBuffer`](crate::PixelBuffer) carries its domain explicitly.
//! Samples are always stored as `f32`; the domain says which range they are
//! meant to live in and whether they are integer-valued:
//!
//! | Domain          | Range        | Integer |
//! |-----------------|--------------|---------|
//! | [`Domain::U8`]    | 0..=255      | yes     |
//! | [`Domain::U16`]   | 0..=65535    | yes     |
//! | [`Domain::Unit`]  | 0.0..=1.0    | no      |
//! | [`Domain::Float`] | unbounded    | no      |

use crate::Error;
use std::fmt;
use std::str::FromStr;

/// Numeric domain of a buffer's samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Domain {
    /// 8-bit integer samples in `[0, 255]`.
    #[default]
    U8,
    /// 16-bit integer samples in `[0, 65535]`.
    U16,
    /// Float samples in `[0, 1]`.
    Unit,
    /// Unbounded, possibly negative float samples.
    Float,
}

impl Domain {
    /// Upper bound of the domain, or `None` when unbounded.
    #[inline]
    pub fn max_value(self) -> Option<f32> {
        match self {
            Self::U8 => Some(255.0),
            Self::U16 => Some(65535.0),
            Self::Unit => Some(1.0),
            Self::Float => None,
        }
    }

    /// Returns `true` for integer-valued domains.
    #[inline]
    pub fn is_integer(self) -> bool {
        matches!(self, Self::U8 | Self::U16)
    }

    /// Returns `true` if the domain has a finite range.
    #[inline]
    pub fn is_bounded(self) -> bool {
        self.max_value().is_some()
    }

    /// Nominal full-scale value.
    ///
    /// `Float` buffers are read on the unit scale.
    #[inline]
    pub fn scale(self) -> f32 {
        self.max_value().unwrap_or(1.0)
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::Unit => "unit",
            Self::Float => "float",
        }
    }

    /// Clips (and rounds, for integer domains) a single sample.
    ///
    /// Unbounded domains return the value unchanged.
    #[inline]
    pub fn clip(self, v: f32) -> f32 {
        match self.max_value() {
            Some(max) => {
                let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, max) };
                if self.is_integer() { v.round() } else { v }
            }
            None => v,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Domain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "u8" | "uint8" | "8" => Ok(Self::U8),
            "u16" | "uint16" | "16" => Ok(Self::U16),
            "unit" | "unit-float" | "unitfloat" => Ok(Self::Unit),
            "float" | "f32" => Ok(Self::Float),
            other => Err(Error::unsupported_domain("parse", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert_eq!(Domain::U8.max_value(), Some(255.0));
        assert_eq!(Domain::Unit.max_value(), Some(1.0));
        assert_eq!(Domain::Float.max_value(), None);
        assert!(Domain::U16.is_integer());
        assert!(!Domain::Unit.is_integer());
        assert!(!Domain::Float.is_bounded());
    }

    #[test]
    fn test_clip() {
        assert_eq!(Domain::U8.clip(233.33), 233.0);
        assert_eq!(Domain::U8.clip(-4.0), 0.0);
        assert_eq!(Domain::U8.clip(1000.0), 255.0);
        assert_eq!(Domain::Unit.clip(1.7), 1.0);
        assert_eq!(Domain::Unit.clip(0.25), 0.25);
        assert_eq!(Domain::Float.clip(-3.5), -3.5);
        assert_eq!(Domain::U8.clip(f32::NAN), 0.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!("uint8".parse::<Domain>().unwrap(), Domain::U8);
        assert_eq!("Unit".parse::<Domain>().unwrap(), Domain::Unit);
        assert_eq!("unit-float".parse::<Domain>().unwrap(), Domain::Unit);
        assert!("rgb".parse::<Domain>().is_err());
    }
}
