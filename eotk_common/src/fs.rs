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

//! path helpers shared by the tools. Everything here reports plain `std::io::Error`s

use std::fs;
use std::io::{self,ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

/// file name without extension, e.g. to derive program or layer names
pub fn filestem<T: AsRef<Path>> (path: &T)->Option<&str> {
    path.as_ref().file_stem().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// make sure the directory of a file we are about to create exists
pub fn ensure_parent_dir (path: impl AsRef<Path>)->io::Result<()> {
    match path.as_ref().parent() {
        Some(dir) if !dir.as_os_str().is_empty() => ensure_dir(dir),
        _ => Ok(())
    }
}

/// the path as an owned `PathBuf` if it refers to a regular file, NotFound otherwise
pub fn existing_file (path: impl AsRef<Path>)->io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_file() {
        Ok( path.to_path_buf() )
    } else {
        Err( io_error!(ErrorKind::NotFound, "not a regular file {:?}", path) )
    }
}

pub fn file_to_string (path: impl AsRef<Path>)->io::Result<String> {
    let path = existing_file( path)?;
    fs::read_to_string( &path)
}

pub fn path_to_lossy_string (path: impl AsRef<Path>)->String {
    path.as_ref().to_string_lossy().into_owned()
}
