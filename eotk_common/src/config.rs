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
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{Result, fs::file_to_string};

/// deserialize a RON config file into the requested type
pub fn load_ron_config<T,P> (path: P)->Result<T> where T: DeserializeOwned, P: AsRef<Path> {
    let path = path.as_ref();
    let contents = file_to_string( path)?;
    let config: T = ron::from_str( &contents)?;
    debug!("loaded config {path:?}");
    Ok(config)
}

/// load config from an optional path, falling back to the type's default
pub fn load_ron_config_or_default<T,P> (opt_path: Option<P>)->Result<T> where T: DeserializeOwned + Default, P: AsRef<Path> {
    match opt_path {
        Some(path) => load_ron_config( path),
        None => Ok( T::default() )
    }
}
