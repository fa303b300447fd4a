/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::{fmt::{self,Debug,Display}, str::FromStr};
use gdal::raster::{GdalDataType, GdalType};
use num::{Bounded, NumCast, ToPrimitive};
use trait_set::trait_set;

use crate::errors::{EotkRasterError, Result, type_error};

/// the pixel element types we support for on-disk rasters and in-memory blocks.
/// masks are `UInt8` on disk and `bool` in memory
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum DataType {
    UInt8,
    Int8,
    UInt16,
    Int16,
    UInt32,
    Int32,
    Float32,
    Float64
}

impl DataType {
    pub const ALL: [DataType;8] = [
        DataType::UInt8, DataType::Int8, DataType::UInt16, DataType::Int16, 
        DataType::UInt32, DataType::Int32, DataType::Float32, DataType::Float64
    ];

    pub fn name (&self)->&'static str {
        use DataType::*;
        match self {
            UInt8 => "uint8",
            Int8 => "int8",
            UInt16 => "uint16",
            Int16 => "int16",
            UInt32 => "uint32",
            Int32 => "int32",
            Float32 => "float32",
            Float64 => "float64"
        }
    }

    pub fn to_gdal (&self)->GdalDataType {
        use DataType::*;
        match self {
            UInt8 => GdalDataType::UInt8,
            Int8 => GdalDataType::Int8,
            UInt16 => GdalDataType::UInt16,
            Int16 => GdalDataType::Int16,
            UInt32 => GdalDataType::UInt32,
            Int32 => GdalDataType::Int32,
            Float32 => GdalDataType::Float32,
            Float64 => GdalDataType::Float64
        }
    }

    pub fn is_integer (&self)->bool {
        !matches!( self, DataType::Float32 | DataType::Float64)
    }

    pub fn size_bytes (&self)->usize {
        use DataType::*;
        match self {
            UInt8 | Int8 => 1,
            UInt16 | Int16 => 2,
            UInt32 | Int32 | Float32 => 4,
            Float64 => 8
        }
    }
}

impl TryFrom<GdalDataType> for DataType {
    type Error = EotkRasterError;

    fn try_from (gdt: GdalDataType)->Result<Self> {
        match gdt {
            GdalDataType::UInt8 => Ok(DataType::UInt8),
            GdalDataType::Int8 => Ok(DataType::Int8),
            GdalDataType::UInt16 => Ok(DataType::UInt16),
            GdalDataType::Int16 => Ok(DataType::Int16),
            GdalDataType::UInt32 => Ok(DataType::UInt32),
            GdalDataType::Int32 => Ok(DataType::Int32),
            GdalDataType::Float32 => Ok(DataType::Float32),
            GdalDataType::Float64 => Ok(DataType::Float64),
            other => Err( type_error( format!("{other:?}")))
        }
    }
}

impl FromStr for DataType {
    type Err = EotkRasterError;

    fn from_str (s: &str)->Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "uint8" | "byte" | "u8" => Ok(DataType::UInt8),
            "int8" | "i8" => Ok(DataType::Int8),
            "uint16" | "u16" => Ok(DataType::UInt16),
            "int16" | "i16" => Ok(DataType::Int16),
            "uint32" | "u32" => Ok(DataType::UInt32),
            "int32" | "i32" => Ok(DataType::Int32),
            "float32" | "f32" => Ok(DataType::Float32),
            "float64" | "f64" => Ok(DataType::Float64),
            _ => Err( type_error(s))
        }
    }
}

impl Display for DataType {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{}", self.name())
    }
}

trait_set! {
  /// any element type kernels can read as a number. Output element types have to be `PixelValue`s
  pub trait Sample = Copy + ToPrimitive;
}

/// element types that can live in a Block and be read from/written to a raster band
pub trait PixelValue: GdalType + Copy + Default + PartialOrd + NumCast + ToPrimitive + Bounded + Debug + Display + 'static {
    const DATA_TYPE: DataType;

    fn as_f64 (self)->f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    /// convert with saturation at the type bounds. Integer targets are rounded, NaN maps to the default
    fn from_f64 (v: f64)->Self {
        if v.is_nan() { return Self::default() }

        let v = if Self::DATA_TYPE.is_integer() { v.round() } else { v };
        let lo = Self::min_value().as_f64();
        let hi = Self::max_value().as_f64();
        if v <= lo { 
            Self::min_value() 
        } else if v >= hi { 
            Self::max_value() 
        } else {
            <Self as NumCast>::from(v).unwrap_or_default()
        }
    }
}

macro_rules! impl_pixel_value {
    ( $( $t:ty => $dt:ident ),* ) => {
        $( impl PixelValue for $t { const DATA_TYPE: DataType = DataType::$dt; } )*
    }
}

impl_pixel_value! { 
    u8 => UInt8, i8 => Int8, u16 => UInt16, i16 => Int16, u32 => UInt32, i32 => Int32, f32 => Float32, f64 => Float64 
}

/// instantiate a generic expression for the concrete element type of a runtime `DataType`
/// ```ignore
/// let res = dispatch_data_type!( dtype, T => process::<T>( &reader, &mut writer) );
/// ```
#[macro_export]
macro_rules! dispatch_data_type {
    ( $dt:expr, $t:ident => $body:expr ) => {
        match $dt {
            $crate::DataType::UInt8 => { type $t = u8; $body }
            $crate::DataType::Int8 => { type $t = i8; $body }
            $crate::DataType::UInt16 => { type $t = u16; $body }
            $crate::DataType::Int16 => { type $t = i16; $body }
            $crate::DataType::UInt32 => { type $t = u32; $body }
            $crate::DataType::Int32 => { type $t = i32; $body }
            $crate::DataType::Float32 => { type $t = f32; $body }
            $crate::DataType::Float64 => { type $t = f64; $body }
        }
    }
}

/// like `dispatch_data_type!` but only for integer types. Float types evaluate to an `UnsupportedType` error
#[macro_export]
macro_rules! dispatch_integer_type {
    ( $dt:expr, $t:ident => $body:expr ) => {
        match $dt {
            $crate::DataType::UInt8 => { type $t = u8; $body }
            $crate::DataType::Int8 => { type $t = i8; $body }
            $crate::DataType::UInt16 => { type $t = u16; $body }
            $crate::DataType::Int16 => { type $t = i16; $body }
            $crate::DataType::UInt32 => { type $t = u32; $body }
            $crate::DataType::Int32 => { type $t = i32; $body }
            dt => Err( $crate::errors::type_error( format!("integer data type required, got {dt}")))
        }
    }
}
