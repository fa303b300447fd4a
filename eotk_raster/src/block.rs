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

use std::ops::{AddAssign, SubAssign};
use ndarray::{Array3, ArrayView2, ArrayViewMut2, Axis, s};
use num::ToPrimitive;

use crate::{Extent, Histogram, Sample, geometry::{Offset, Size}};
use crate::errors::{Result, shape_error};

/// a typed row-major 3D buffer bound to an extent. The data is indexed as `[row, col, band]`
/// where row 0 corresponds to the Y offset of the extent
#[derive(Debug,Clone,PartialEq)]
pub struct Block<T> {
    extent: Extent,
    data: Array3<T>
}

fn shape_of (extent: &Extent)->(usize,usize,usize) {
    (extent.nrow(), extent.ncol(), extent.nband())
}

impl <T: Clone + Default> Block<T> {
    /// a zero (default) initialized block
    pub fn new (extent: Extent)->Self {
        let data = Array3::from_elem( shape_of(&extent), T::default());
        Block { extent, data }
    }

    /// a zero initialized block with the same extent as `other`
    pub fn like<U> (other: &Block<U>)->Self {
        Block::new( other.extent)
    }

    pub fn filled (extent: Extent, v: T)->Self {
        let data = Array3::from_elem( shape_of(&extent), v);
        Block { extent, data }
    }
}

impl <T> Block<T> {
    /// caller guarantees the data shape matches the extent
    pub(crate) fn from_parts (extent: Extent, data: Array3<T>)->Self {
        debug_assert_eq!( data.dim(), shape_of(&extent));
        Block { extent, data }
    }

    pub fn from_data (extent: Extent, data: Array3<T>)->Result<Self> {
        if data.dim() != shape_of(&extent) {
            return Err( shape_error( format!("data shape {:?} does not match {extent}", data.dim())))
        }
        Ok( Block { extent, data } )
    }

    #[inline] pub fn extent (&self)->&Extent { &self.extent }
    #[inline] pub fn size (&self)->Size { self.extent.size() }
    #[inline] pub fn offset (&self)->Offset { self.extent.offset() }

    #[inline] pub fn ncol (&self)->usize { self.extent.ncol() }
    #[inline] pub fn nrow (&self)->usize { self.extent.nrow() }
    #[inline] pub fn nband (&self)->usize { self.extent.nband() }

    #[inline] pub fn data (&self)->&Array3<T> { &self.data }
    #[inline] pub fn data_mut (&mut self)->&mut Array3<T> { &mut self.data }
    pub fn into_data (self)->Array3<T> { self.data }

    /// move the block without touching its data
    pub fn set_offset (&mut self, offset: Offset) {
        self.extent = Extent::new( self.extent.size(), offset);
    }

    pub fn band (&self, k: usize)->ArrayView2<'_,T> {
        self.data.index_axis( Axis(2), k)
    }

    pub fn band_mut (&mut self, k: usize)->ArrayViewMut2<'_,T> {
        self.data.index_axis_mut( Axis(2), k)
    }

    /// fail if `other` does not have the same number of rows and columns
    pub fn check_same_xy<U> (&self, other: &Block<U>)->Result<()> {
        if self.nrow() != other.nrow() || self.ncol() != other.ncol() {
            Err( shape_error( format!("block sizes differ: {} vs. {}", self.size(), other.size())))
        } else {
            Ok(())
        }
    }

    /// fail unless `mask` covers the same rows and columns and has at least one band
    pub fn check_mask<U> (&self, mask: &Block<U>)->Result<()> {
        self.check_same_xy( mask)?;
        if mask.nband() == 0 {
            Err( shape_error( "mask has no bands"))
        } else {
            Ok(())
        }
    }
}

impl <T: Clone> Block<T> {
    pub fn fill (&mut self, v: T) {
        self.data.fill( v);
    }

    /// a copy of the sub-region `extent` (in the same coordinate frame as self). `extent` has to be inside
    pub fn sub_block (&self, extent: &Extent)->Result<Block<T>> {
        if !self.extent.contains( extent) {
            return Err( shape_error( format!("{extent} is not inside of {}", self.extent)))
        }
        let o = extent.offset() - self.extent.offset();
        let u = o + extent.size();
        let data = self.data.slice( s![o.y as usize..u.y as usize, o.x as usize..u.x as usize, o.z as usize..u.z as usize]).to_owned();
        Ok( Block { extent: *extent, data } )
    }
}

impl <T: Sample> Block<T> {
    /// histogram of all bands. Pixels for which the (single band) mask is false are skipped
    pub fn histogram (&self, vmin: f64, vmax: f64, nbins: usize, mask: Option<&Block<bool>>)->Result<Histogram> {
        let mut hist = Histogram::new( self.nband(), vmin, vmax, nbins)?;
        hist.update( self, mask)?;
        Ok(hist)
    }
}

/// translate the block (data stays unchanged)
impl <T> AddAssign<Offset> for Block<T> {
    fn add_assign (&mut self, v: Offset) { self.extent += v; }
}

impl <T> SubAssign<Offset> for Block<T> {
    fn sub_assign (&mut self, v: Offset) { self.extent -= v; }
}
