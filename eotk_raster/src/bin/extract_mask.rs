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

//! extract a no-data mask (0: no-data, 255: data) from a raster image

use anyhow::Result;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, DataType, ImageFile, PixelValue, ProcessingConfig, dispatch_data_type,
    geotiff::create_geotiff_like, kernels::{MaskMode, extract_mask, replace_bool},
    tiles::{LogProgress, clipped_tiles, execute}
};

define_cli! { ARGS [about="extract the no-data mask of a raster image (0: no-data, 255: valid)"] =
    nodata: Vec<f64>          [help="no-data value, one for all bands or one per band (default: from input)", long, value_delimiter=','],
    mode: MaskMode            [help="pixel is no-data if all or any of its bands are no-data", long, value_enum, default_value="all"],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output mask GeoTIFF"],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let nodata = input.nodata_values( &ARGS.nodata)?;
        let mut output = create_geotiff_like( &ARGS.output, &input, DataType::UInt8, 1, None, &config.format_options()?)?;

        dispatch_data_type!( input.data_type()?, T => process::<T>( &input, &mut output, &nodata, &config))?;
        Ok(())
    })
}

fn process<T: PixelValue> (input: &ImageFile, output: &mut ImageFile, nodata: &[f64], config: &ProcessingConfig)->eotk_raster::Result<()> {
    let mut progress = LogProgress::new( "extract_mask", 10);
    execute( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        let mask = extract_mask( &block, nodata, ARGS.mode)?;
        output.write( &replace_bool( &mask, 0u8, 255u8))
    }, &mut progress)
}
