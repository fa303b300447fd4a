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

use gdal::errors::GdalError;
use eotk_common::{define_error, EotkCommonError};

pub type Result<T> = std::result::Result<T, EotkRasterError>;

define_error!{ pub EotkRasterError = 
    GdalError(#[from] GdalError) : "GDAL error: {0}",
    IOError(#[from] std::io::Error) : "IO error: {0}",
    InvalidShape(String) : "invalid shape: {0}",
    UnsupportedType(String) : "unsupported data type: {0}",
    FormatError(String) : "format error: {0}",
    DomainError(String) : "domain error: {0}",
    ReadOnly(String) : "image is read-only: {0}",
    ConfigError(#[from] EotkCommonError) : "config error: {0}",
    MiscError(String) : "operation failed: {0}"
}

pub fn shape_error<S: ToString> (msg: S)->EotkRasterError {
    EotkRasterError::InvalidShape(msg.to_string())
}

pub fn type_error<S: ToString> (msg: S)->EotkRasterError {
    EotkRasterError::UnsupportedType(msg.to_string())
}

pub fn format_error<S: ToString> (msg: S)->EotkRasterError {
    EotkRasterError::FormatError(msg.to_string())
}

pub fn domain_error<S: ToString> (msg: S)->EotkRasterError {
    EotkRasterError::DomainError(msg.to_string())
}

pub fn misc_error<S: ToString> (msg: S)->EotkRasterError {
    EotkRasterError::MiscError(msg.to_string())
}

/// the last error GDAL reported through CPLGetLastErrorMsg
pub fn last_gdal_error ()->EotkRasterError {
    let msg = unsafe { crate::pc_char_to_string( gdal_sys::CPLGetLastErrorMsg()) };
    unsafe { gdal_sys::CPLErrorReset(); }
    EotkRasterError::MiscError( format!("GDAL: {msg}"))
}
