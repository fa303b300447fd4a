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
use num::PrimInt;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, DataType, ImageFile, PixelValue, ProcessingConfig, dispatch_integer_type,
    geotiff::create_geotiff_like, kernels::{count_mask_pixels, extract_bit_mask, replace_bool},
    tiles::{LogProgress, aggregate, clipped_tiles}
};
use tracing::info;

define_cli! { ARGS [about="extract a bit mask (0/255) from the first band of an integer flags image"] =
    equal: bool               [help="all bits of <value> have to be set (default: any of them)", long],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input flags image"],
    output: String            [help="output mask GeoTIFF"],
    value: u32                [help="bit value to test (decimal, 0x.. or 0b..)", value_parser=cli::parse_u32],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let mut output = create_geotiff_like( &ARGS.output, &input, DataType::UInt8, 1, None, &config.format_options()?)?;

        let n = dispatch_integer_type!( input.data_type()?, T => process::<T>( &input, &mut output, &config))?;
        info!("{n} of {} pixels match bit value {}", input.ncol() * input.nrow(), ARGS.value);
        Ok(())
    })
}

fn process<T: PixelValue + PrimInt> (input: &ImageFile, output: &mut ImageFile, config: &ProcessingConfig)->eotk_raster::Result<usize> {
    let value = T::from_f64( ARGS.value as f64);
    let mut progress = LogProgress::new( "extract_bit_mask", 10);

    aggregate( clipped_tiles( input.extent().with_z( 1, 0), config.tile_size()?)?, |tile| {
        let mut flags: Block<T> = Block::new( *tile);
        input.read( &mut flags)?;
        let mask = extract_bit_mask( &flags, value, ARGS.equal)?;
        output.write( &replace_bool( &mask, 0u8, 255u8))?;
        Ok( count_mask_pixels( &flags, value, ARGS.equal, true) )
    }, |n, total| n + total, 0, &mut progress)
}
