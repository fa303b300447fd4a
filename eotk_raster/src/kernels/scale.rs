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

use std::{fmt, str::FromStr};
use clap::ValueEnum;
use num::ToPrimitive;

use crate::{Block, PixelValue, Sample};
use crate::errors::{Result, EotkRasterError, shape_error, domain_error, format_error};

/// lower/upper bound of the display range for valid pixels. 0 is reserved for invalid pixels
pub const STRETCH_MIN: f64 = 2.0;
pub const STRETCH_MAX: f64 = 254.0;

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
pub enum ScaleType {
    /// values are used as they are
    Identity,
    /// affine map of [vmin,vmax]
    Linear,
    /// affine map of [ln(vmin),ln(vmax)], values <= 0 are invalid
    Logarithmic,
    /// affine map in dB. vmin/vmax are given in dB, values <= 0 are invalid
    Decibel
}

impl ScaleType {
    /// the transformed data value, None if the value is invalid for this scale
    #[inline]
    fn value (&self, v: f64)->Option<f64> {
        if !v.is_finite() { return None }
        match self {
            ScaleType::Identity | ScaleType::Linear => Some(v),
            ScaleType::Logarithmic => if v > 0.0 { Some(v.ln()) } else { None },
            ScaleType::Decibel => if v > 0.0 { Some(10.0 * v.log10()) } else { None }
        }
    }

    /// the transformed range limit
    fn limit (&self, v: f64)->f64 {
        match self {
            ScaleType::Logarithmic => v.ln(),
            _ => v
        }
    }

    fn range (&self, vmin: f64, vmax: f64)->Result<(f64,f64)> {
        let lo = self.limit( vmin);
        let hi = self.limit( vmax);
        if lo.is_finite() && hi.is_finite() && hi > lo {
            Ok( (lo,hi) )
        } else {
            Err( domain_error( format!("invalid {self} range [{vmin},{vmax}]")))
        }
    }
}

impl FromStr for ScaleType {
    type Err = EotkRasterError;

    fn from_str (s: &str)->Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "identity" => Ok(ScaleType::Identity),
            "linear" => Ok(ScaleType::Linear),
            "logarithmic" | "log" => Ok(ScaleType::Logarithmic),
            "decibel" | "db" => Ok(ScaleType::Decibel),
            _ => Err( format_error( format!("unknown scale type '{s}'")))
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        let s = match self {
            ScaleType::Identity => "identity",
            ScaleType::Linear => "linear",
            ScaleType::Logarithmic => "logarithmic",
            ScaleType::Decibel => "decibel"
        };
        write!(f, "{s}")
    }
}

/// per band values from a list that has either one entry (used for all bands) or at least `nband`
fn per_band (values: &[f64], nband: usize, what: &str)->Result<Vec<f64>> {
    match values.len() {
        1 => Ok( vec![values[0]; nband] ),
        n if n >= nband => Ok( values[..nband].to_vec() ),
        n => Err( shape_error( format!("{n} {what} values for {nband} bands")))
    }
}

fn per_band_ranges (scale_type: ScaleType, vmin: &[f64], vmax: &[f64], nband: usize)->Result<Vec<(f64,f64)>> {
    let vmin = per_band( vmin, nband, "vmin")?;
    let vmax = per_band( vmax, nband, "vmax")?;
    vmin.iter().zip( vmax.iter()).map( |(lo,hi)| scale_type.range( *lo, *hi)).collect()
}

/// map the per band [vmin,vmax] range to [2,254] and clamp to [1,255]. Pixels that are masked out or
/// invalid for the scale type become 0 in all bands. The optional alpha band is 0 for invalid and
/// 255 for valid pixels
pub fn range_stretch_uint8<T> (data: &Block<T>, mask: &Block<bool>, vmin: &[f64], vmax: &[f64], 
                               scale_type: ScaleType, add_alpha: bool)->Result<Block<u8>> 
    where T: Sample
{
    data.check_mask( mask)?;
    let nband = data.nband();
    let ranges = if scale_type == ScaleType::Identity { 
        vec![(0.0,1.0); nband] 
    } else { 
        per_band_ranges( scale_type, vmin, vmax, nband)? 
    };

    let nout = if add_alpha { nband + 1 } else { nband };
    let mut out: Block<u8> = Block::new( data.extent().with_z( nout as i64, 0));
    let src = data.data();
    let m = mask.band(0);
    let mut values = vec![0.0; nband];

    for r in 0..data.nrow() {
        for c in 0..data.ncol() {
            let mut valid = m[[r,c]];
            if valid {
                for b in 0..nband {
                    match src[[r,c,b]].to_f64().and_then( |v| scale_type.value(v)) {
                        Some(v) => values[b] = v,
                        None => { valid = false; break }
                    }
                }
            }
            if !valid { continue } // block is zero initialized

            let px = out.data_mut();
            for b in 0..nband {
                let y = if scale_type == ScaleType::Identity {
                    values[b]
                } else {
                    let (lo,hi) = ranges[b];
                    STRETCH_MIN + (values[b] - lo) / (hi - lo) * (STRETCH_MAX - STRETCH_MIN)
                };
                px[[r,c,b]] = y.round().clamp( 1.0, 255.0) as u8;
            }
            if add_alpha { px[[r,c,nband]] = 255 }
        }
    }

    Ok(out)
}

/// general scaler: `offset + scale * t` where t is the scale-type transformed value normalized to the
/// per band [vmin,vmax] range (identity uses the raw value). Returns the scaled data and the updated
/// mask, which is cleared where the input is invalid for the scale type (e.g. <= 0 for logarithmic)
pub fn scale_values<T,U> (data: &Block<T>, mask: &Block<bool>, scale_type: ScaleType, vmin: &[f64], vmax: &[f64],
                          scale: f64, offset: f64)->Result<(Block<U>,Block<bool>)>
    where T: Sample, U: PixelValue
{
    data.check_mask( mask)?;
    let nband = data.nband();
    let ranges = if scale_type == ScaleType::Identity { 
        vec![(0.0,1.0); nband] 
    } else { 
        per_band_ranges( scale_type, vmin, vmax, nband)? 
    };

    let mut out: Block<U> = Block::new( *data.extent());
    let mut out_mask: Block<bool> = Block::new( *mask.extent());
    out_mask.data_mut().assign( mask.data());

    let src = data.data();
    for ((r,c,b),y) in out.data_mut().indexed_iter_mut() {
        if !out_mask.data()[[r,c,0]] { continue }

        match src[[r,c,b]].to_f64().and_then( |v| scale_type.value(v)) {
            Some(v) => {
                let t = if scale_type == ScaleType::Identity { 
                    v 
                } else { 
                    let (lo,hi) = ranges[b];
                    (v - lo) / (hi - lo) 
                };
                *y = U::from_f64( offset + scale * t);
            }
            None => {
                out_mask.data_mut()[[r,c,0]] = false;
            }
        }
    }

    // clear bands that were written before a later band invalidated the pixel
    for ((r,c,_),y) in out.data_mut().indexed_iter_mut() {
        if !out_mask.data()[[r,c,0]] { *y = U::default() }
    }

    Ok( (out, out_mask) )
}

/// saturating threshold: values below `low` become `low`, values above `high` become `high`, values
/// in between pass unchanged. This clamps, it does not binarize (use `replace_bool` on a mask for that).
/// NaN inputs map to the output type's default
pub fn threshold_values<T,U> (data: &Block<T>, low: f64, high: f64)->Result<Block<U>> 
    where T: Sample, U: PixelValue
{
    if !(low <= high) { return Err( domain_error( format!("low threshold {low} > high threshold {high}"))) }

    let out = data.data().mapv( |v| {
        let v = v.to_f64().unwrap_or(f64::NAN);
        U::from_f64( if v.is_nan() { v } else { v.clamp( low, high) })
    });
    Ok( Block::from_parts( *data.extent(), out) )
}

/// linear map of [vmin,vmax] to [low,high], clamped to the output range
pub fn normalize_values<T,U> (data: &Block<T>, vmin: f64, vmax: f64, low: f64, high: f64)->Result<Block<U>>
    where T: Sample, U: PixelValue
{
    if !(vmax > vmin) { return Err( domain_error( format!("invalid input range [{vmin},{vmax}]"))) }
    if !(low <= high) { return Err( domain_error( format!("invalid output range [{low},{high}]"))) }

    let out = data.data().mapv( |v| {
        let v = v.to_f64().unwrap_or(f64::NAN);
        let t = ((v - vmin) / (vmax - vmin)).clamp( 0.0, 1.0);
        U::from_f64( low + t * (high - low))
    });
    Ok( Block::from_parts( *data.extent(), out) )
}
