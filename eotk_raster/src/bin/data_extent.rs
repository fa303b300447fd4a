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

//! crop an image to the bounding box of its valid pixels

use anyhow::{Result, anyhow};
use tracing::info;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, Extent, ImageFile, NoData, PixelValue, ProcessingConfig, dispatch_data_type,
    geometry::offset2, geotiff::create_geotiff, kernels::{MaskMode, extract_mask, get_data_extent},
    tiles::{LogProgress, NoProgress, aggregate, clipped_tiles, execute}
};

define_cli! { ARGS [about="crop a raster image to the extent of its valid (non no-data) pixels"] =
    nodata: Vec<f64>          [help="no-data value, one for all bands or one per band (default: from input)", long, value_delimiter=','],
    mode: MaskMode            [help="pixel is no-data if all or any of its bands are no-data", long, value_enum, default_value="all"],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output GeoTIFF"],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let nodata = input.nodata_values( &ARGS.nodata)?;

        dispatch_data_type!( input.data_type()?, T => process::<T>( &input, &nodata, &config))?;
        Ok(())
    })
}

fn process<T: PixelValue> (input: &ImageFile, nodata: &[f64], config: &ProcessingConfig)->Result<()> {
    let tile_size = config.tile_size()?;

    let data_extent = aggregate( clipped_tiles( *input.extent(), tile_size)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        let mask = extract_mask( &block, nodata, ARGS.mode)?;
        Ok::<_,eotk_raster::EotkRasterError>( get_data_extent( &mask, false))
    }, |e: Extent, acc: Option<Extent>| {
        if e.is_empty() { acc } else { Some( acc.map_or( e, |a| a | e)) }
    }, None, &mut LogProgress::new( "data_extent", 10))?;

    let data_extent = data_extent.ok_or_else( || anyhow!("{} has no valid pixels", ARGS.input))?
        .with_z( input.nband() as i64, 0);
    info!("data extent of {}: {data_extent}", ARGS.input);
    println!("{data_extent}");

    let o = data_extent.offset();
    let geocoding = input.geocoding().translated( o.x as f64, o.y as f64);
    let mut output = create_geotiff( &ARGS.output, input.data_type()?, data_extent.nrow(), data_extent.ncol(), input.nband(),
                                     &geocoding, Some(&NoData::PerBand( nodata.to_vec())), &config.format_options()?)?;

    let shift = offset2( o.x, o.y);
    execute( clipped_tiles( data_extent, tile_size)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        block -= shift;
        output.write( &block)
    }, &mut NoProgress)?;

    Ok(())
}
