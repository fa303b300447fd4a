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

use gdal::{Dataset, DriverManager, GeoTransform, raster::Buffer};
use gdal::vector::{LayerAccess, LayerOptions, OGRFieldType};
use geo::{BooleanOps, Coord, MapCoords, MultiPolygon, Polygon};
use tracing::debug;

use crate::{Block, PixelValue, ok_ce_none};
use crate::errors::{Result, shape_error, misc_error};

/// name of the label field GDAL writes the pixel value of each polygon into
const LABEL_FIELD: &str = "value";

/// in-memory vector driver names (GDAL >= 3.11 folds "Memory" into "MEM")
const VECTOR_MEM_DRIVERS: [&str;2] = ["Memory", "MEM"];

/// polygonize band 0 of `band` and keep the polygons whose label satisfies `predicate`.
/// Coordinates are pixel coordinates of the block frame (block offset included).
/// Polygons with varying labels are unioned, a single polygon or polygons that all share the same
/// label are returned as they are. No match yields an empty MultiPolygon
pub fn vectorize<T,F> (band: &Block<T>, predicate: F)->Result<MultiPolygon<f64>> 
    where T: PixelValue, F: Fn(f64)->bool
{
    if band.nband() == 0 {
        return Err( shape_error( "cannot vectorize a block without bands"))
    }
    if band.ncol() == 0 || band.nrow() == 0 {
        return Ok( MultiPolygon::new( Vec::new()) )
    }

    let labelled = polygonize( band)?;
    let n_total = labelled.len();
    let selected: Vec<(f64,Polygon<f64>)> = labelled.into_iter().filter( |(label,_)| predicate(*label)).collect();
    debug!("vectorize {}: {} of {} polygons selected", band.extent(), selected.len(), n_total);

    let labels_vary = selected.windows(2).any( |w| w[0].0 != w[1].0);
    let polygons: Vec<Polygon<f64>> = selected.into_iter().map( |(_,p)| p).collect();

    if labels_vary {
        Ok( cascaded_union( polygons) )
    } else {
        Ok( MultiPolygon::new( polygons) )
    }
}

/// (label,polygon) pairs for all connected (4-neighbour) regions of equal value in band 0
fn polygonize<T: PixelValue> (band: &Block<T>)->Result<Vec<(f64,Polygon<f64>)>> {
    let (ncol, nrow) = (band.ncol(), band.nrow());
    let o = band.offset();

    let driver = DriverManager::get_driver_by_name( "MEM")?;
    let mut raster_ds = driver.create_with_band_type::<T,_>( "", ncol, nrow, 1)?;
    raster_ds.set_geo_transform( &[o.x as f64, 1.0, 0.0, o.y as f64, 0.0, 1.0])?;

    let mut raster_band = raster_ds.rasterband(1)?;
    let data: Vec<T> = band.band(0).iter().copied().collect();
    raster_band.write( (0,0), (ncol,nrow), &mut Buffer::new( (ncol,nrow), data))?;

    let mut vector_ds = create_vector_mem_dataset()?;
    let mut layer = vector_ds.create_layer( LayerOptions { name: "polygons", ..Default::default() })?;
    layer.create_defn_fields( &[(LABEL_FIELD, OGRFieldType::OFTReal)])?;

    let res = unsafe {
        if T::DATA_TYPE.is_integer() {
            gdal_sys::GDALPolygonize( raster_band.c_rasterband(), std::ptr::null_mut(), layer.c_layer(), 0,
                                      std::ptr::null_mut(), None, std::ptr::null_mut())
        } else {
            gdal_sys::GDALFPolygonize( raster_band.c_rasterband(), std::ptr::null_mut(), layer.c_layer(), 0,
                                       std::ptr::null_mut(), None, std::ptr::null_mut())
        }
    };
    ok_ce_none( res)?;

    let mut labelled = Vec::new();
    for feature in layer.features() {
        let idx = feature.field_index( LABEL_FIELD)?;
        let label = feature.field_as_double( idx)?.unwrap_or( f64::NAN);

        if let Some(geom) = feature.geometry() {
            match geom.to_geo()? {
                geo::Geometry::Polygon(p) => labelled.push( (label,p)),
                geo::Geometry::MultiPolygon(mp) => labelled.extend( mp.0.into_iter().map( |p| (label,p))),
                _ => {}
            }
        }
    }
    Ok(labelled)
}

fn create_vector_mem_dataset ()->Result<Dataset> {
    let mut last_err = None;
    for name in VECTOR_MEM_DRIVERS {
        match DriverManager::get_driver_by_name( name).and_then( |driver| driver.create_vector_only( "")) {
            Ok(ds) => return Ok(ds),
            Err(e) => last_err = Some(e)
        }
    }
    Err( match last_err {
        Some(e) => e.into(),
        None => misc_error( "no in-memory vector driver")
    })
}

/// pairwise union until one MultiPolygon is left
fn cascaded_union (polygons: Vec<Polygon<f64>>)->MultiPolygon<f64> {
    let mut parts: Vec<MultiPolygon<f64>> = polygons.into_iter().map( |p| MultiPolygon::new( vec![p])).collect();
    while parts.len() > 1 {
        let mut merged = Vec::with_capacity( (parts.len() + 1) / 2);
        let mut it = parts.into_iter();
        while let Some(a) = it.next() {
            match it.next() {
                Some(b) => merged.push( a.union( &b)),
                None => merged.push( a)
            }
        }
        parts = merged;
    }
    parts.pop().unwrap_or_else( || MultiPolygon::new( Vec::new()))
}

/// transform pixel coordinates into the map coordinates of an affine geo transform
pub fn to_map_coordinates (mp: &MultiPolygon<f64>, geotrn: &GeoTransform)->MultiPolygon<f64> {
    mp.map_coords( |Coord{x,y}| Coord {
        x: geotrn[0] + x * geotrn[1] + y * geotrn[2],
        y: geotrn[3] + x * geotrn[4] + y * geotrn[5]
    })
}
