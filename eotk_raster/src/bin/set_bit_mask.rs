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
    Block, ImageFile, PixelValue, ProcessingConfig, dispatch_integer_type,
    geotiff::create_geotiff_like, kernels::set_bit_mask,
    tiles::{LogProgress, clipped_tiles, execute}
};

define_cli! { ARGS [about="set (clear) bits of an integer flags image where a mask image is non-zero (zero)"] =
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input flags image"],
    mask: String              [help="single band mask image of the same size"],
    output: String            [help="output flags GeoTIFF"],
    value: u32                [help="bit value to set (decimal, 0x.. or 0b..)", value_parser=cli::parse_u32],
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

        let data_type = input.data_type()?;
        let mut output = create_geotiff_like( &ARGS.output, &input, data_type, input.nband(), None, &config.format_options()?)?;

        dispatch_integer_type!( data_type, T => process::<T>( &input, &mask, &mut output, &config))?;
        Ok(())
    })
}

fn process<T: PixelValue + PrimInt> (input: &ImageFile, mask: &ImageFile, output: &mut ImageFile, config: &ProcessingConfig)->eotk_raster::Result<()> {
    let bit_value = T::from_f64( ARGS.value as f64);
    let mut progress = LogProgress::new( "set_bit_mask", 10);

    execute( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut flags: Block<T> = Block::new( *tile);
        input.read( &mut flags)?;
        let mut m: Block<bool> = Block::new( tile.with_z( 1, 0));
        mask.read_mask( &mut m)?;
        output.write( &set_bit_mask( &flags, &m, bit_value)?)
    }, &mut progress)
}
