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

use anyhow::Result;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, ImageFile, NoData, PixelValue, ProcessingConfig, dispatch_data_type,
    geotiff::create_geotiff_like, kernels::clip_to_mask,
    tiles::{LogProgress, clipped_tiles, execute}
};

define_cli! { ARGS [about="set all image pixels to no-data where a mask image has the clip value"] =
    nodata: Vec<f64>          [help="output no-data value, one for all bands or one per band (default: from input or 0)", long, value_delimiter=','],
    clip_value: u8            [help="mask value of pixels that are clipped", long, default_value="0"],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    mask: String              [help="single band uint8 mask image of the same size"],
    output: String            [help="output GeoTIFF"],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let mask = ImageFile::open_reader( &ARGS.mask)?;
        if mask.ncol() != input.ncol() || mask.nrow() != input.nrow() {
            anyhow::bail!("mask size {}x{} does not match image size {}x{}", mask.ncol(), mask.nrow(), input.ncol(), input.nrow());
        }

        let nodata = if ARGS.nodata.is_empty() && input.nodata()?.iter().any( Option::is_none) {
            vec![0.0; input.nband()]
        } else {
            input.nodata_values( &ARGS.nodata)?
        };
        let data_type = input.data_type()?;
        let mut output = create_geotiff_like( &ARGS.output, &input, data_type, input.nband(), 
                                              Some(&NoData::PerBand( nodata.clone())), &config.format_options()?)?;

        dispatch_data_type!( data_type, T => process::<T>( &input, &mask, &mut output, &nodata, &config))?;
        Ok(())
    })
}

fn process<T: PixelValue> (input: &ImageFile, mask: &ImageFile, output: &mut ImageFile, nodata: &[f64], config: &ProcessingConfig)->eotk_raster::Result<()> {
    let nodata: Vec<T> = nodata.iter().map( |v| T::from_f64( *v)).collect();
    let mut progress = LogProgress::new( "clip_to_mask", 10);

    execute( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        let mut m: Block<u8> = Block::new( tile.with_z( 1, 0));
        mask.read( &mut m)?;
        output.write( &clip_to_mask( &block, &m, &nodata, ARGS.clip_value)?)
    }, &mut progress)
}
