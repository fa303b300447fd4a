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

use std::path::Path;
use gdal::{DriverManager, Driver, Dataset, raster::RasterCreationOptions};
use tracing::debug;

use eotk_common::fs::ensure_parent_dir;
use crate::{DataType, FormatOptions, GeoCoding, ImageFile, NoData, AccessMode};
use crate::errors::Result;

pub const GEOTIFF_DRIVER: &str = "GTiff";

pub const DEFAULT_GEOTIFF_OPTIONS: [&str;4] = ["TILED=YES", "BLOCKXSIZE=256", "BLOCKYSIZE=256", "COMPRESS=NONE"];

pub fn default_geotiff_options ()->FormatOptions {
    let mut opts = FormatOptions::new();
    for opt in DEFAULT_GEOTIFF_OPTIONS {
        if let Some((k,v)) = opt.split_once('=') { opts.set( k, v) }
    }
    opts
}

/// the default options overridden by the provided ones
pub fn geotiff_options (overrides: &FormatOptions)->FormatOptions {
    let mut opts = default_geotiff_options();
    opts.merge( overrides);
    opts
}

/// create a new GeoTIFF and return it as a writable ImageFile. The `options` are passed verbatim to
/// the driver (use `geotiff_options(..)` to get the defaults)
pub fn create_geotiff<P: AsRef<Path>> (path: P, data_type: DataType, nrow: usize, ncol: usize, nband: usize, 
                                      geocoding: &GeoCoding, nodata: Option<&NoData>, options: &FormatOptions)->Result<ImageFile> 
{
    let path = path.as_ref();
    ensure_parent_dir( path)?;

    let driver = DriverManager::get_driver_by_name( GEOTIFF_DRIVER)?;
    let co = options.to_creation_options()?;
    let mut ds = create_dataset( &driver, path, ncol, nrow, nband, data_type, &co)?;

    geocoding.apply_to( &mut ds)?;
    debug!("created {path:?}: {ncol}x{nrow}x{nband} {data_type} [{options}]");

    let mut img = ImageFile::from_dataset( path, ds, AccessMode::ReadWrite)?;
    if let Some(nodata) = nodata {
        img.set_nodata( nodata)?;
    }
    Ok(img)
}

/// create a GeoTIFF with the size and geo-coding of `template` (band count and type can differ)
pub fn create_geotiff_like<P: AsRef<Path>> (path: P, template: &ImageFile, data_type: DataType, nband: usize,
                                           nodata: Option<&NoData>, options: &FormatOptions)->Result<ImageFile>
{
    create_geotiff( path, data_type, template.nrow(), template.ncol(), nband, &template.geocoding(), nodata, options)
}

pub fn create_dataset<P> (driver: &Driver, path: P, width: usize, height: usize, n_bands: usize, data_type: DataType, co: &RasterCreationOptions)->Result<Dataset> 
    where P: AsRef<Path>
{
    use DataType::*;
    match data_type {
        UInt8   => Ok( driver.create_with_band_type_with_options::<u8,P>(path, width, height, n_bands, co)? ),
        Int8    => Ok( driver.create_with_band_type_with_options::<i8,P>(path, width, height, n_bands, co)? ),
        UInt16  => Ok( driver.create_with_band_type_with_options::<u16,P>(path, width, height, n_bands, co)? ),
        Int16   => Ok( driver.create_with_band_type_with_options::<i16,P>(path, width, height, n_bands, co)? ),
        UInt32  => Ok( driver.create_with_band_type_with_options::<u32,P>(path, width, height, n_bands, co)? ),
        Int32   => Ok( driver.create_with_band_type_with_options::<i32,P>(path, width, height, n_bands, co)? ),
        Float32 => Ok( driver.create_with_band_type_with_options::<f32,P>(path, width, height, n_bands, co)? ),
        Float64 => Ok( driver.create_with_band_type_with_options::<f64,P>(path, width, height, n_bands, co)? ),
    }
}
