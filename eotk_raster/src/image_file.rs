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

//! the on-disk side of the Block protocol. An `ImageFile` is an extent over (ncol,nrow,nband) bound
//! to a GDAL dataset. Readers and writers share the same type and overlap logic, they only differ
//! in the access mode they were opened with

use std::path::{Path, PathBuf};
use gdal::{Dataset, raster::Buffer};
use ndarray::{ArrayView2, s};
use tracing::debug;

use eotk_common::fs::{existing_file, path_to_lossy_string};
use crate::{Block, Extent, DataType, PixelValue, GeoCoding, open_update};
use crate::errors::{Result, EotkRasterError, shape_error, misc_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum AccessMode {
    ReadOnly,
    ReadWrite
}

/// no-data specification for output images: one value for all bands or one per band
#[derive(Debug,Clone,PartialEq)]
pub enum NoData {
    Scalar(f64),
    PerBand(Vec<f64>)
}

impl NoData {
    /// the per band values for an image with `nband` bands
    pub fn per_band (&self, nband: usize)->Result<Vec<f64>> {
        match self {
            NoData::Scalar(v) => Ok( vec![*v; nband] ),
            NoData::PerBand(vs) => {
                if vs.len() < nband {
                    Err( shape_error( format!("{} no-data values for {} bands", vs.len(), nband)))
                } else {
                    Ok( vs[..nband].to_vec() )
                }
            }
        }
    }
}

impl From<f64> for NoData {
    fn from (v: f64)->Self { NoData::Scalar(v) }
}

impl From<Vec<f64>> for NoData {
    fn from (vs: Vec<f64>)->Self { NoData::PerBand(vs) }
}

pub struct ImageFile {
    path: PathBuf,
    dataset: Dataset,
    extent: Extent,
    data_types: Vec<DataType>,
    mode: AccessMode
}

impl ImageFile {
    pub fn open_reader<P: AsRef<Path>> (path: P)->Result<Self> {
        let path = existing_file( path)?;
        let ds = Dataset::open( &path)?;
        Self::from_dataset( path, ds, AccessMode::ReadOnly)
    }

    pub fn open_writer<P: AsRef<Path>> (path: P)->Result<Self> {
        let path = existing_file( path)?;
        let ds = open_update( &path)?;
        Self::from_dataset( path, ds, AccessMode::ReadWrite)
    }

    /// fails with an `UnsupportedType` error if any band has a type outside of `DataType`
    pub fn from_dataset<P: AsRef<Path>> (path: P, dataset: Dataset, mode: AccessMode)->Result<Self> {
        let (ncol,nrow) = dataset.raster_size();
        let nband = dataset.raster_count();

        let mut data_types = Vec::with_capacity( nband);
        for k in 1..=nband {
            let band = dataset.rasterband(k)?;
            data_types.push( DataType::try_from( band.band_type())?);
        }

        let extent = Extent::of_image( ncol, nrow, nband);
        let path = path.as_ref().to_path_buf();
        debug!("opened {path:?} ({mode:?}): {extent}, {data_types:?}");

        Ok( ImageFile { path, dataset, extent, data_types, mode } )
    }

    #[inline] pub fn path (&self)->&Path { &self.path }
    #[inline] pub fn extent (&self)->&Extent { &self.extent }
    #[inline] pub fn mode (&self)->AccessMode { self.mode }
    #[inline] pub fn is_writable (&self)->bool { self.mode == AccessMode::ReadWrite }

    #[inline] pub fn ncol (&self)->usize { self.extent.ncol() }
    #[inline] pub fn nrow (&self)->usize { self.extent.nrow() }
    #[inline] pub fn nband (&self)->usize { self.extent.nband() }

    #[inline] pub fn data_types (&self)->&[DataType] { &self.data_types }

    /// the coarse data type, which is the type of the first band. Mixed type datasets are read
    /// through this type
    pub fn data_type (&self)->Result<DataType> {
        self.data_types.first().copied().ok_or_else( || shape_error( format!("{:?} has no bands", self.path)))
    }

    #[inline] pub fn dataset (&self)->&Dataset { &self.dataset }

    pub fn geocoding (&self)->GeoCoding {
        GeoCoding::from_dataset( &self.dataset)
    }

    pub fn set_geocoding (&mut self, geocoding: &GeoCoding)->Result<()> {
        self.check_writable()?;
        geocoding.apply_to( &mut self.dataset)
    }

    pub fn nodata (&self)->Result<Vec<Option<f64>>> {
        let mut nodata = Vec::with_capacity( self.nband());
        for k in 1..=self.nband() {
            nodata.push( self.dataset.rasterband(k)?.no_data_value());
        }
        Ok(nodata)
    }

    /// per band no-data values: the explicit ones (one for all bands or one per band) if given,
    /// otherwise the ones stored in the image. Fails if neither is available
    pub fn nodata_values (&self, explicit: &[f64])->Result<Vec<f64>> {
        match explicit.len() {
            0 => self.nodata()?.into_iter().enumerate()
                    .map( |(k,v)| v.ok_or_else( || misc_error( format!("no no-data value for band {} of {:?}", k+1, self.path))))
                    .collect(),
            1 => NoData::Scalar( explicit[0]).per_band( self.nband()),
            _ => NoData::PerBand( explicit.to_vec()).per_band( self.nband())
        }
    }

    pub fn set_nodata (&mut self, nodata: &NoData)->Result<()> {
        self.check_writable()?;
        let values = nodata.per_band( self.nband())?;
        for (k,v) in values.into_iter().enumerate() {
            let mut band = self.dataset.rasterband( k+1)?;
            band.set_no_data_value( Some(v))?;
        }
        Ok(())
    }

    fn check_writable (&self)->Result<()> {
        if self.is_writable() { 
            Ok(()) 
        } else { 
            Err( EotkRasterError::ReadOnly( path_to_lossy_string( &self.path))) 
        }
    }

    /// copy the overlap of the image and `block` into the block. Block regions outside of the
    /// image are left untouched
    pub fn read<T: PixelValue> (&self, block: &mut Block<T>)->Result<()> {
        let o = self.extent & *block.extent();
        if o.is_empty() { return Ok(()) }

        let bl = o.offset() - block.offset(); // block local
        let fl = o.offset() - self.extent.offset(); // file local
        let (w,h) = (o.ncol(), o.nrow());
        let (x0,y0,z0) = (bl.x as usize, bl.y as usize, bl.z as usize);

        for k in 0..o.nband() {
            let band = self.dataset.rasterband( fl.z as usize + k + 1)?;
            let buf: Buffer<T> = band.read_as::<T>( (fl.x as isize, fl.y as isize), (w,h), (w,h), None)?;
            let src = ArrayView2::from_shape( (h,w), buf.data()).map_err( |e| shape_error(e))?;
            block.data_mut().slice_mut( s![y0..y0+h, x0..x0+w, z0+k]).assign( &src);
        }
        Ok(())
    }

    /// write the overlap of the image and `block` band by band. The element type of the block
    /// should match the band type
    pub fn write<T: PixelValue> (&mut self, block: &Block<T>)->Result<()> {
        self.check_writable()?;

        let o = self.extent & *block.extent();
        if o.is_empty() { return Ok(()) }

        let bl = o.offset() - block.offset();
        let fl = o.offset() - self.extent.offset();
        let (w,h) = (o.ncol(), o.nrow());
        let (x0,y0,z0) = (bl.x as usize, bl.y as usize, bl.z as usize);

        for k in 0..o.nband() {
            let data: Vec<T> = block.data().slice( s![y0..y0+h, x0..x0+w, z0+k]).iter().copied().collect();
            let mut buf = Buffer::new( (w,h), data);
            let mut band = self.dataset.rasterband( fl.z as usize + k + 1)?;
            band.write( (fl.x as isize, fl.y as isize), (w,h), &mut buf)?;
        }
        Ok(())
    }

    /// read a mask band (non-zero is true)
    pub fn read_mask (&self, block: &mut Block<bool>)->Result<()> {
        let mut bytes: Block<u8> = Block::new( *block.extent());
        bytes.data_mut().zip_mut_with( block.data(), |b,m| *b = if *m { 255 } else { 0 });
        self.read( &mut bytes)?;
        block.data_mut().zip_mut_with( bytes.data(), |m,b| *m = *b != 0);
        Ok(())
    }

    /// write a mask as 0/255 bytes
    pub fn write_mask (&mut self, block: &Block<bool>)->Result<()> {
        let bytes = Block::from_data( *block.extent(), block.data().mapv( |m| if m { 255u8 } else { 0 }))?;
        self.write( &bytes)
    }

    /// release the underlying dataset. Dropping the ImageFile has the same effect
    pub fn close (self) {
        debug!("closing {:?}", self.path);
    }
}

impl std::fmt::Debug for ImageFile {
    fn fmt (&self, f: &mut std::fmt::Formatter<'_>)->std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("path", &self.path)
            .field("extent", &self.extent)
            .field("data_types", &self.data_types)
            .field("mode", &self.mode)
            .finish()
    }
}
