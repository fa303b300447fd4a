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
#![allow(unused)]

//! tile based raster processing for Earth observation imagery. Images are accessed through
//! `ImageFile` readers/writers in `Extent` sized `Block`s, which are processed by the pure
//! functions of the `kernels` module and driven by the tile runners in `tiles`

pub mod errors;
pub mod geometry;
pub mod kernels;
pub mod tiles;
pub mod geotiff;
pub mod config;

mod datatype;
pub use datatype::*;

mod extent;
pub use extent::*;

mod block;
pub use block::*;

mod histogram;
pub use histogram::*;

mod geocoding;
pub use geocoding::*;

mod image_file;
pub use image_file::*;

mod format_options;
pub use format_options::*;

pub use config::ProcessingConfig;
pub use errors::{Result, EotkRasterError};

use std::{ffi::CStr, path::Path};
use gdal::{errors::CplErrType, DatasetOptions, GdalOpenFlags};
use gdal_sys::CPLErr;
use libc::c_char;
use static_init::constructor;
use tracing::trace;

use crate::errors::last_gdal_error;

// re-exported so that tools don't need their own gdal dependency
pub use gdal::{self, Dataset, GeoTransform};

#[constructor(0)]
extern "C" fn _initialize_gdal() {
    gdal::config::set_error_handler( log_gdal_message);
}

/// GDAL reports failures through return values, we only trace the messages
fn log_gdal_message (cpl_et: CplErrType, ec: i32, msg: &str) {
    trace!("GDAL {cpl_et:?} ({ec}): {msg}");
}

pub fn pc_char_to_string (pc_char: *const c_char)->String {
    if pc_char.is_null() { return String::new() }
    let cstr = unsafe { CStr::from_ptr(pc_char) };
    String::from_utf8_lossy(cstr.to_bytes()).to_string()
}

pub fn ok_ce_none (res: CPLErr::Type)->Result<()> {
    if res == CPLErr::CE_None { Ok(()) } else { Err(last_gdal_error()) }
}

pub fn open_update<P: AsRef<Path>> (path: P)->Result<Dataset> {
    let dso = DatasetOptions {
        open_flags: GdalOpenFlags::GDAL_OF_UPDATE | GdalOpenFlags::GDAL_OF_RASTER,
        allowed_drivers: None,
        open_options: None,
        sibling_files: None
    };
    Ok( Dataset::open_ex(path, dso)? )
}
