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

//! geo-coding of rasters: either rectified (projection + 6-element affine geotransform) or
//! referenced through ground control points (projection + GCPs)

use std::ffi::CString;
use gdal::{Dataset, GeoTransform};
use libc::c_int;

use crate::{pc_char_to_string, ok_ce_none};
use crate::errors::{Result, misc_error};

/// a ground control point tying a pixel/line position to map coordinates
#[derive(Debug,Clone,PartialEq)]
pub struct Gcp {
    pub id: String,
    pub info: String,
    pub pixel: f64,
    pub line: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64
}

#[derive(Debug,Clone,PartialEq,Default)]
pub enum GeoCoding {
    #[default]
    None,
    Rectified { proj: String, geotrn: GeoTransform },
    Gcps { proj: String, gcps: Vec<Gcp> }
}

impl GeoCoding {
    /// rectified if the dataset has a projection and a geotransform, GCP based if it has GCPs with
    /// a projection, `None` otherwise
    pub fn from_dataset (ds: &Dataset)->Self {
        let proj = ds.projection();
        if !proj.is_empty() {
            if let Ok(geotrn) = ds.geo_transform() {
                return GeoCoding::Rectified { proj, geotrn }
            }
        }

        let gcps = read_gcps( ds);
        if !gcps.is_empty() {
            let proj = gcp_projection( ds);
            if !proj.is_empty() {
                return GeoCoding::Gcps { proj, gcps }
            }
        }

        GeoCoding::None
    }

    pub fn is_none (&self)->bool { matches!( self, GeoCoding::None) }

    pub fn proj (&self)->Option<&str> {
        match self {
            GeoCoding::Rectified{proj,..} | GeoCoding::Gcps{proj,..} => Some(proj.as_str()),
            GeoCoding::None => None
        }
    }

    pub fn geotransform (&self)->Option<&GeoTransform> {
        if let GeoCoding::Rectified{geotrn,..} = self { Some(geotrn) } else { None }
    }

    /// write to a dataset. GCPs are copied so that the source stays independent
    pub fn apply_to (&self, ds: &mut Dataset)->Result<()> {
        match self {
            GeoCoding::Rectified { proj, geotrn } => {
                ds.set_projection( proj)?;
                ds.set_geo_transform( geotrn)?;
            }
            GeoCoding::Gcps { proj, gcps } => {
                write_gcps( ds, gcps, proj)?;
            }
            GeoCoding::None => {}
        }
        Ok(())
    }

    /// the geo-coding of a sub-image that starts at pixel (col,row) of this one. Rectified transforms
    /// move their origin (scale/shear preserved), GCP pixel/line positions are shifted
    pub fn translated (&self, col: f64, row: f64)->Self {
        match self {
            GeoCoding::Rectified { proj, geotrn } => {
                let g = geotrn;
                let ogx = g[0] + g[1]*col + g[2]*row;
                let ogy = g[3] + g[4]*col + g[5]*row;
                GeoCoding::Rectified { proj: proj.clone(), geotrn: [ogx, g[1], g[2], ogy, g[4], g[5]] }
            }
            GeoCoding::Gcps { proj, gcps } => {
                let gcps = gcps.iter().map( |p| Gcp { pixel: p.pixel - col, line: p.line - row, ..p.clone() }).collect();
                GeoCoding::Gcps { proj: proj.clone(), gcps }
            }
            GeoCoding::None => GeoCoding::None
        }
    }

    /// map coordinates of a (fractional) pixel position, only available for rectified geo-coding
    pub fn pixel_to_map (&self, col: f64, row: f64)->Option<(f64,f64)> {
        self.geotransform().map( |g| (g[0] + g[1]*col + g[2]*row, g[3] + g[4]*col + g[5]*row))
    }
}

fn gcp_projection (ds: &Dataset)->String {
    unsafe {
        let p = gdal_sys::GDALGetGCPProjection( ds.c_dataset());
        if p.is_null() { String::new() } else { pc_char_to_string(p) }
    }
}

fn read_gcps (ds: &Dataset)->Vec<Gcp> {
    unsafe {
        let h_ds = ds.c_dataset();
        let n = gdal_sys::GDALGetGCPCount( h_ds);
        let p_gcps = gdal_sys::GDALGetGCPs( h_ds);
        if n <= 0 || p_gcps.is_null() { return Vec::new() }

        std::slice::from_raw_parts( p_gcps, n as usize).iter().map( |g| {
            Gcp {
                id: if g.pszId.is_null() { String::new() } else { pc_char_to_string( g.pszId) },
                info: if g.pszInfo.is_null() { String::new() } else { pc_char_to_string( g.pszInfo) },
                pixel: g.dfGCPPixel,
                line: g.dfGCPLine,
                x: g.dfGCPX,
                y: g.dfGCPY,
                z: g.dfGCPZ
            }
        }).collect()
    }
}

fn write_gcps (ds: &mut Dataset, gcps: &[Gcp], proj: &str)->Result<()> {
    let to_cstring = |s: &str| CString::new(s).map_err( |_| misc_error( format!("invalid GCP string '{s}'")));

    // the CStrings have to outlive the GDALSetGCPs call
    let ids = gcps.iter().map( |g| to_cstring( &g.id)).collect::<Result<Vec<CString>>>()?;
    let infos = gcps.iter().map( |g| to_cstring( &g.info)).collect::<Result<Vec<CString>>>()?;
    let c_proj = to_cstring( proj)?;

    let c_gcps: Vec<gdal_sys::GDAL_GCP> = gcps.iter().enumerate().map( |(i,g)| {
        gdal_sys::GDAL_GCP {
            pszId: ids[i].as_ptr() as *mut libc::c_char,
            pszInfo: infos[i].as_ptr() as *mut libc::c_char,
            dfGCPPixel: g.pixel,
            dfGCPLine: g.line,
            dfGCPX: g.x,
            dfGCPY: g.y,
            dfGCPZ: g.z
        }
    }).collect();

    unsafe {
        let res = gdal_sys::GDALSetGCPs( ds.c_dataset(), c_gcps.len() as c_int, c_gcps.as_ptr(), c_proj.as_ptr());
        ok_ce_none( res)
    }
}
