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

//! footprint (valid pixel area) of a raster image as a GeoJSON feature

use std::fs;
use anyhow::Result;
use geo::{BooleanOps, MultiPolygon};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject};
use serde_json::json;
use tracing::info;
use eotk_common::{cli, define_cli, fs::ensure_parent_dir};
use eotk_raster::{
    Block, ImageFile, PixelValue, ProcessingConfig, dispatch_data_type,
    kernels::{MaskMode, extract_mask, replace_bool, to_map_coordinates, vectorize},
    tiles::{LogProgress, aggregate, clipped_tiles}
};

define_cli! { ARGS [about="compute the footprint of the valid pixels of a raster image and write it as GeoJSON"] =
    nodata: Vec<f64>          [help="no-data value, one for all bands or one per band (default: from input)", long, value_delimiter=','],
    mode: MaskMode            [help="pixel is no-data if all or any of its bands are no-data", long, value_enum, default_value="all"],
    pixel_coordinates: bool   [help="keep pixel coordinates instead of map coordinates", long],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output GeoJSON file"]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &[] as &[String])?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let nodata = input.nodata_values( &ARGS.nodata)?;

        let footprint = dispatch_data_type!( input.data_type()?, T => process::<T>( &input, &nodata, &config))?;
        info!("footprint of {} has {} polygons", ARGS.input, footprint.0.len());

        let geocoding = input.geocoding();
        let footprint = match geocoding.geotransform() {
            Some(geotrn) if !ARGS.pixel_coordinates => to_map_coordinates( &footprint, geotrn),
            _ => footprint
        };

        let mut properties = JsonObject::new();
        properties.insert( "source".to_string(), json!( ARGS.input));
        if let Some(proj) = geocoding.proj() {
            properties.insert( "projection".to_string(), json!( proj));
        }
        let feature = Feature {
            bbox: None,
            geometry: Some( Geometry::new( geojson::Value::from( &footprint))),
            id: None,
            properties: Some( properties),
            foreign_members: None
        };
        let fc = FeatureCollection { bbox: None, features: vec![feature], foreign_members: None };

        ensure_parent_dir( &ARGS.output)?;
        fs::write( &ARGS.output, GeoJson::from( fc).to_string())?;
        Ok(())
    })
}

fn process<T: PixelValue> (input: &ImageFile, nodata: &[f64], config: &ProcessingConfig)->eotk_raster::Result<MultiPolygon<f64>> {
    let mut progress = LogProgress::new( "footprint", 10);

    aggregate( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        let mask = extract_mask( &block, nodata, ARGS.mode)?;
        vectorize( &replace_bool( &mask, 0u8, 1u8), |label| label != 0.0)
    }, |mp: MultiPolygon<f64>, acc: MultiPolygon<f64>| {
        if mp.0.is_empty() { acc } else { acc.union( &mp) }
    }, MultiPolygon::new( Vec::new()), &mut progress)
}
