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

use clap::ValueEnum;
use ndarray::Axis;
use num::{PrimInt, ToPrimitive};

use crate::{Block, Extent, Sample, geometry::point3};
use crate::errors::{Result, shape_error};

/// how per band validity is combined into a pixel mask
#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
pub enum MaskMode {
    /// valid if all bands differ from their no-data value
    All,
    /// valid if any band differs from its no-data value
    Any
}

#[inline]
fn is_nodata (v: f64, nodata: f64)->bool {
    v == nodata || (v.is_nan() && nodata.is_nan())
}

/// single band extent with the X/Y of `block`
fn mask_extent<T> (block: &Block<T>)->Extent {
    block.extent().with_z( 1, 0)
}

fn combine_validity (mask: &mut Block<bool>, band_valid: impl Fn(usize,usize)->bool, mode: MaskMode) {
    for ((r,c,_),m) in mask.data_mut().indexed_iter_mut() {
        let valid = band_valid( r, c);
        *m = match mode {
            MaskMode::All => *m && valid,
            MaskMode::Any => *m || valid
        }
    }
}

/// single band validity mask from per band no-data values. An empty `nodata` list yields an all-false
/// mask in `All` mode and an all-true mask in `Any` mode
pub fn extract_mask<T> (block: &Block<T>, nodata: &[f64], mode: MaskMode)->Result<Block<bool>> where T: Sample {
    if nodata.len() > block.nband() {
        return Err( shape_error( format!("{} no-data values for {} bands", nodata.len(), block.nband())))
    }

    let ext = mask_extent( block);
    if nodata.is_empty() {
        return Ok( Block::filled( ext, mode == MaskMode::Any))
    }

    let mut mask = Block::filled( ext, mode == MaskMode::All);
    for (b,nd) in nodata.iter().enumerate() {
        let band = block.band(b);
        combine_validity( &mut mask, |r,c| !is_nodata( band[[r,c]].to_f64().unwrap_or(f64::NAN), *nd), mode);
    }
    Ok(mask)
}

/// like `extract_mask` but each band can have several no-data values. A band value is invalid if it
/// matches any of them
pub fn extract_mask_multi<T> (block: &Block<T>, nodata: &[Vec<f64>], mode: MaskMode)->Result<Block<bool>> where T: Sample {
    if nodata.len() > block.nband() {
        return Err( shape_error( format!("{} no-data sets for {} bands", nodata.len(), block.nband())))
    }

    let ext = mask_extent( block);
    if nodata.is_empty() {
        return Ok( Block::filled( ext, mode == MaskMode::Any))
    }

    let mut mask = Block::filled( ext, mode == MaskMode::All);
    for (b,nds) in nodata.iter().enumerate() {
        let band = block.band(b);
        combine_validity( &mut mask, |r,c| {
            let v = band[[r,c]].to_f64().unwrap_or(f64::NAN);
            !nds.iter().any( |nd| is_nodata( v, *nd))
        }, mode);
    }
    Ok(mask)
}

/// `true_val` where the mask is set, `false_val` everywhere else
pub fn replace_bool<U: Clone> (mask: &Block<bool>, false_val: U, true_val: U)->Block<U> {
    let data = mask.data().mapv( |m| if m { true_val.clone() } else { false_val.clone() });
    Block::from_parts( *mask.extent(), data)
}

/// copy of `data` where the first mask band differs from `clip_value`, per band `nodata` elsewhere.
/// A single no-data value is used for all bands
pub fn clip_to_mask<T,U> (data: &Block<T>, mask: &Block<U>, nodata: &[T], clip_value: U)->Result<Block<T>> 
    where T: Copy, U: Copy + PartialEq
{
    data.check_mask( mask)?;

    let nodata: Vec<T> = match nodata.len() {
        1 => vec![nodata[0]; data.nband()],
        n if n >= data.nband() => nodata[..data.nband()].to_vec(),
        n => return Err( shape_error( format!("{n} no-data values for {} bands", data.nband())))
    };

    let m = mask.band(0);
    let mut out = data.data().clone();
    for ((r,c,b),v) in out.indexed_iter_mut() {
        if m[[r,c]] == clip_value { *v = nodata[b] }
    }
    Ok( Block::from_parts( *data.extent(), out) )
}

/// number of mask elements that satisfy:
/// ```text
///   equal  bitwise_and
///   true   false        mask == value
///   false  false        mask != 0
///   true   true         (mask & value) == value
///   false  true         (mask & value) != 0
/// ```
pub fn count_mask_pixels<T: PrimInt> (mask: &Block<T>, value: T, equal: bool, bitwise_and: bool)->usize {
    let zero = T::zero();
    mask.data().iter().filter( |&&m| {
        match (equal, bitwise_and) {
            (true, false) => m == value,
            (false, false) => m != zero,
            (true, true) => (m & value) == value,
            (false, true) => (m & value) != zero
        }
    }).count()
}

/// single band mask of the first flags band. With `equal` all bits of `value` have to be set,
/// otherwise any of them
pub fn extract_bit_mask<T: PrimInt> (flags: &Block<T>, value: T, equal: bool)->Result<Block<bool>> {
    if flags.nband() == 0 { return Err( shape_error("flags block has no bands")) }

    let zero = T::zero();
    let f = flags.band(0);
    let data = f.mapv( |v| if equal { (v & value) == value } else { (v & value) != zero })
        .insert_axis( Axis(2));
    Ok( Block::from_parts( mask_extent( flags), data) )
}

/// clear the `bit_value` bits of all flag bands and set them where `mask` is true
pub fn set_bit_mask<T: PrimInt> (flags: &Block<T>, mask: &Block<bool>, bit_value: T)->Result<Block<T>> {
    flags.check_mask( mask)?;

    let m = mask.band(0);
    let mut out = flags.data().clone();
    for ((r,c,_),v) in out.indexed_iter_mut() {
        let cleared = *v & !bit_value;
        *v = if m[[r,c]] { cleared | bit_value } else { cleared };
    }
    Ok( Block::from_parts( *flags.extent(), out) )
}

/// the tight bounding extent of all pixels that differ from `nodata` in any band. Lower bounds are
/// inclusive, upper bounds exclusive. A block without data yields a zero size extent at its offset
pub fn get_data_extent<T: Copy + PartialEq> (mask: &Block<T>, nodata: T)->Extent {
    let data = mask.data();
    let has_data = |v: &T| *v != nodata;

    let rows: Vec<usize> = data.axis_iter( Axis(0)).enumerate()
        .filter( |(_,row)| row.iter().any( has_data))
        .map( |(r,_)| r)
        .collect();

    let (Some(&ymin), Some(&ymax)) = (rows.first(), rows.last()) else {
        return Extent::new( point3(0,0,0), mask.offset())
    };
    let ymax = ymax + 1;

    let mut xmin = mask.ncol();
    let mut xmax = 0;
    for r in ymin..ymax {
        let row = data.index_axis( Axis(0), r);
        for (c,px) in row.axis_iter( Axis(0)).enumerate() {
            if px.iter().any( has_data) {
                xmin = xmin.min(c);
                xmax = xmax.max(c+1);
            }
        }
    }

    Extent::new( 
        point3( (xmax - xmin) as i64, (ymax - ymin) as i64, mask.size().z),
        mask.offset() + point3( xmin as i64, ymin as i64, 0)
    )
}
