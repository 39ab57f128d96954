//! Numeric element types that rasters can be made of.
//!
//! The engine is generic over the element type. Interpolation happens in
//! `f64` and is converted back through [`Element::from_f64`]; raw files are
//! little-endian.

use num_traits::{Bounded, NumCast, ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TilewarpError};

/// A raster sample type.
pub trait Element: Copy + Send + Sync + PartialEq + Bounded + NumCast + 'static {
    /// Size in bytes of one encoded sample.
    const SIZE: usize;

    /// The no-data sentinel: the most negative representable value.
    #[inline]
    fn no_data() -> Self {
        Self::min_value()
    }

    /// Convert an interpolated value back into this type.
    fn from_f64(value: f64) -> Self;

    /// Widen to `f64`; NaN if the value has no `f64` representation.
    #[inline]
    fn as_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Decode one sample from exactly `SIZE` little-endian bytes.
    fn read_le(bytes: &[u8]) -> Self;

    /// Append the little-endian encoding of this sample.
    fn write_le(self, out: &mut Vec<u8>);
}

macro_rules! impl_float_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

macro_rules! impl_int_element {
    ($($t:ty),*) => {$(
        impl Element for $t {
            const SIZE: usize = std::mem::size_of::<$t>();

            /// Rounds to the nearest integer and saturates at the type bounds.
            /// NaN maps to the no-data value.
            #[inline]
            fn from_f64(value: f64) -> Self {
                if value.is_nan() {
                    return Self::no_data();
                }
                // `as` saturates for float -> int conversions
                value.round() as $t
            }

            fn read_le(bytes: &[u8]) -> Self {
                let mut buf = [0u8; std::mem::size_of::<$t>()];
                buf.copy_from_slice(bytes);
                <$t>::from_le_bytes(buf)
            }

            fn write_le(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_le_bytes());
            }
        }
    )*};
}

impl_float_element!(f64, f32);
impl_int_element!(i32, i16, u16, u8);

/// On-disk sample format of a raster file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    Float64,
    Float32,
    Int32,
    Int16,
    UInt16,
    UInt8,
}

impl DataFormat {
    /// Parse from a string name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "float64" | "double" | "f64" => Some(Self::Float64),
            "float32" | "float" | "f32" => Some(Self::Float32),
            "int32" | "i32" => Some(Self::Int32),
            "int16" | "i16" => Some(Self::Int16),
            "uint16" | "u16" => Some(Self::UInt16),
            "uint8" | "byte" | "u8" => Some(Self::UInt8),
            _ => None,
        }
    }

    /// Parse from a string name, reporting unknown names as an error.
    pub fn parse(name: &str) -> Result<Self> {
        Self::from_name(name).ok_or_else(|| TilewarpError::InvalidParameter {
            param: "format".to_string(),
            message: format!(
                "Unknown data format: {}. Must be one of: float64, float32, int32, int16, uint16, uint8",
                name
            ),
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Float64 => "float64",
            Self::Float32 => "float32",
            Self::Int32 => "int32",
            Self::Int16 => "int16",
            Self::UInt16 => "uint16",
            Self::UInt8 => "uint8",
        }
    }

    /// Size in bytes of one sample.
    pub fn element_size(&self) -> usize {
        match self {
            Self::Float64 => f64::SIZE,
            Self::Float32 => f32::SIZE,
            Self::Int32 => i32::SIZE,
            Self::Int16 => i16::SIZE,
            Self::UInt16 => u16::SIZE,
            Self::UInt8 => u8::SIZE,
        }
    }
}
