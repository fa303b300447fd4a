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
use serde::{Deserialize, Serialize};

use eotk_common::config::load_ron_config_or_default;
use crate::{FormatOptions, geotiff::geotiff_options, geometry::{Point2, point2}};
use crate::errors::{Result, domain_error, format_error};

/// the tool settings that can be provided through a RON config file. Example:
/// ```ignore
/// ProcessingConfig(
///     tile_size: (512, 512),
///     creation_options: ["COMPRESS=DEFLATE", "PREDICTOR=2"],
/// )
/// ```
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    pub tile_size: (u32,u32),
    pub creation_options: Vec<String>,
}

impl Default for ProcessingConfig {
    fn default ()->Self {
        ProcessingConfig { tile_size: (256,256), creation_options: Vec::new() }
    }
}

impl ProcessingConfig {
    /// the config file contents, or the defaults if there is no config file
    pub fn load<P: AsRef<Path>> (opt_path: Option<P>)->Result<Self> {
        Ok( load_ron_config_or_default( opt_path)? )
    }

    /// apply command line values, which take precedence over config file values
    pub fn with_overrides<S: AsRef<str>> (mut self, tile_size: Option<&str>, creation_options: &[S])->Result<Self> {
        if let Some(s) = tile_size {
            self.tile_size = parse_tile_size( s)?;
        }
        self.creation_options.extend( creation_options.iter().map( |s| s.as_ref().to_string()));
        Ok(self)
    }

    pub fn tile_size (&self)->Result<Point2<i64>> {
        let (w,h) = self.tile_size;
        if w == 0 || h == 0 { return Err( domain_error( format!("invalid tile size {w}x{h}"))) }
        Ok( point2( w as i64, h as i64) )
    }

    /// the GeoTIFF defaults merged with the configured options. Later entries win
    pub fn format_options (&self)->Result<FormatOptions> {
        Ok( geotiff_options( &FormatOptions::from_tokens( &self.creation_options)?) )
    }
}

/// parse "<w>x<h>" or "<n>" (square tiles)
pub fn parse_tile_size (s: &str)->Result<(u32,u32)> {
    let parse = |v: &str| v.trim().parse::<u32>().map_err( |_| format_error( format!("invalid tile size '{s}'")));
    match s.split_once( ['x','X',',']) {
        Some((w,h)) => Ok( (parse(w)?, parse(h)?) ),
        None => { let n = parse(s)?; Ok( (n,n) ) }
    }
}
