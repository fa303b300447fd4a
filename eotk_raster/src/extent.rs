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

//! axis aligned 3D integer boxes (size + offset) used to address images, blocks and tiles.
//! X is the column axis, Y the row axis and Z the band axis

use std::{fmt, ops::{Add, AddAssign, BitAnd, BitOr, Sub, SubAssign}};

use crate::geometry::{Point2, Size, Offset, point3};
use crate::errors::{Result, domain_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default)]
pub struct Extent {
    size: Size,
    offset: Offset
}

impl Extent {
    /// negative size components are clamped to zero
    pub fn new (size: impl Into<Size>, offset: impl Into<Offset>)->Self {
        let size: Size = size.into();
        Extent { size: size.clamp_negative(), offset: offset.into() }
    }

    /// an extent at the origin
    pub fn from_size (size: impl Into<Size>)->Self {
        Extent::new( size, Offset::default())
    }

    /// the extent of a raster with the given dimensions
    pub fn of_image (ncol: usize, nrow: usize, nband: usize)->Self {
        Extent::from_size( point3( ncol as i64, nrow as i64, nband as i64))
    }

    #[inline] pub fn size (&self)->Size { self.size }
    #[inline] pub fn offset (&self)->Offset { self.offset }

    /// the exclusive upper corner
    #[inline] pub fn upper (&self)->Offset { self.offset + self.size }

    /// number of cells (width * height * bands)
    #[inline] pub fn volume (&self)->i64 { self.size.prod() }

    #[inline] pub fn is_empty (&self)->bool { self.volume() == 0 }

    #[inline] pub fn ncol (&self)->usize { self.size.x as usize }
    #[inline] pub fn nrow (&self)->usize { self.size.y as usize }
    #[inline] pub fn nband (&self)->usize { self.size.z as usize }

    /// replace the Z components, X/Y stay as they are
    pub fn set_z (&mut self, size_z: i64, offset_z: i64) {
        self.size.z = size_z.max(0);
        self.offset.z = offset_z;
    }

    pub fn with_z (&self, size_z: i64, offset_z: i64)->Self {
        let mut e = *self;
        e.set_z( size_z, offset_z);
        e
    }

    /// inflate X/Y by `margin` on each side (negative margins shrink)
    pub fn extend (&self, margin: Point2<i64>)->Self {
        let m = point3( margin.x, margin.y, 0);
        Extent::new( self.size + m + m, self.offset - m)
    }

    /// is `other` completely inside of self
    pub fn contains (&self, other: &Extent)->bool {
        other.offset.ge( &self.offset).all() && other.upper().le( &self.upper()).all()
    }

    /// the tile grid covering this extent. The grid is aligned to multiples of the tile size, 
    /// tiles are not clipped (use `tile & extent` for that)
    pub fn tiles (&self, tile_size: Point2<i64>)->Result<Tiles> {
        Tiles::new( self, tile_size)
    }

    pub fn tile_count (&self, tile_size: Point2<i64>)->Result<usize> {
        Ok( self.tiles( tile_size)?.len() )
    }
}

impl From<Size> for Extent {
    fn from (size: Size)->Self { Extent::from_size(size) }
}

/// intersection. Disjoint extents produce a zero volume result
impl BitAnd for Extent {
    type Output = Extent;

    fn bitand (self, rhs: Extent)->Extent {
        let offset = self.offset.max( &rhs.offset);
        let upper = self.upper().min( &rhs.upper());
        Extent::new( upper - offset, offset)
    }
}

/// union (bounding box of both)
impl BitOr for Extent {
    type Output = Extent;

    fn bitor (self, rhs: Extent)->Extent {
        let offset = self.offset.min( &rhs.offset);
        let upper = self.upper().max( &rhs.upper());
        Extent::new( upper - offset, offset)
    }
}

impl Add<Offset> for Extent {
    type Output = Extent;
    fn add (self, v: Offset)->Extent { Extent { size: self.size, offset: self.offset + v } }
}

impl Sub<Offset> for Extent {
    type Output = Extent;
    fn sub (self, v: Offset)->Extent { Extent { size: self.size, offset: self.offset - v } }
}

impl AddAssign<Offset> for Extent {
    fn add_assign (&mut self, v: Offset) { self.offset = self.offset + v; }
}

impl SubAssign<Offset> for Extent {
    fn sub_assign (&mut self, v: Offset) { self.offset = self.offset - v; }
}

impl fmt::Display for Extent {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "Extent(size={}, offset={})", self.size, self.offset)
    }
}

/* #region tiles ***********************************************************************************/

/// row-major iterator over the tile grid of an extent. Since `Extent` is `Copy` callers
/// can always get a fresh iterator by calling `Extent::tiles` again
#[derive(Debug,Clone)]
pub struct Tiles {
    tile_size: Point2<i64>,
    size_z: i64,
    tx0: i64,
    tx1: i64, // exclusive
    ty1: i64, // exclusive
    tx: i64,
    ty: i64,
}

impl Tiles {
    fn new (extent: &Extent, tile_size: Point2<i64>)->Result<Self> {
        if tile_size.x <= 0 || tile_size.y <= 0 {
            return Err( domain_error( format!("invalid tile size {tile_size}")))
        }

        let size_z = extent.size.z;
        if extent.is_empty() {
            return Ok( Tiles { tile_size, size_z, tx0: 0, tx1: 0, ty1: 0, tx: 0, ty: 0 } )
        }

        let lower = extent.offset.xy() / tile_size;
        let upper = extent.upper().xy();
        let tx1 = ceil_div( upper.x, tile_size.x);
        let ty1 = ceil_div( upper.y, tile_size.y);

        Ok( Tiles { tile_size, size_z, tx0: lower.x, tx1, ty1, tx: lower.x, ty: lower.y } )
    }

    pub fn tile_size (&self)->Point2<i64> { self.tile_size }
}

fn ceil_div (a: i64, b: i64)->i64 {
    -((-a).div_euclid(b))
}

impl Iterator for Tiles {
    type Item = Extent;

    fn next (&mut self)->Option<Extent> {
        if self.ty >= self.ty1 || self.tx0 >= self.tx1 { return None }

        let tile = Extent::new( 
            point3( self.tile_size.x, self.tile_size.y, self.size_z),
            point3( self.tx * self.tile_size.x, self.ty * self.tile_size.y, 0)
        );

        self.tx += 1;
        if self.tx >= self.tx1 {
            self.tx = self.tx0;
            self.ty += 1;
        }

        Some(tile)
    }

    fn size_hint (&self)->(usize,Option<usize>) {
        let n = if self.ty >= self.ty1 || self.tx0 >= self.tx1 {
            0
        } else {
            let nx = self.tx1 - self.tx0;
            ((self.ty1 - self.ty - 1) * nx + (self.tx1 - self.tx)) as usize
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Tiles {}

/* #endregion tiles */
