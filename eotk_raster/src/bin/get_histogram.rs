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

//! compute the multi-band histogram of an image and save it as a histogram text file

use anyhow::Result;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, Histogram, ImageFile, PixelValue, ProcessingConfig, dispatch_data_type,
    kernels::{MaskMode, extract_mask},
    tiles::{LogProgress, aggregate, clipped_tiles}
};

define_cli! { ARGS [about="compute the histogram of a raster image, skipping no-data pixels"] =
    vmin: f64                 [help="lower bound of the histogram range", long],
    vmax: f64                 [help="upper bound of the histogram range", long],
    nbins: usize              [help="number of regular bins", long, default_value="256"],
    nodata: Vec<f64>          [help="no-data value, one for all bands or one per band (default: from input, if any)", long, value_delimiter=','],
    percentiles: Option<Vec<f64>> [help="also print the value range between <lo>,<hi> percentiles", long, value_delimiter=',', num_args=2],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output histogram file"]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &[] as &[String])?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let nodata = if ARGS.nodata.is_empty() && input.nodata()?.iter().any( Option::is_none) {
            Vec::new() // no masking
        } else {
            input.nodata_values( &ARGS.nodata)?
        };

        let hist = dispatch_data_type!( input.data_type()?, T => process::<T>( &input, &nodata, &config))?;
        hist.save( &ARGS.output)?;

        if let Some(p) = &ARGS.percentiles {
            for (b,(lo,hi)) in hist.get_range( p[0], p[1])?.iter().enumerate() {
                println!("band {}: {lo} {hi}", b+1);
            }
        }
        Ok(())
    })
}

fn process<T: PixelValue> (input: &ImageFile, nodata: &[f64], config: &ProcessingConfig)->eotk_raster::Result<Histogram> {
    let initial = Histogram::new( input.nband(), ARGS.vmin, ARGS.vmax, ARGS.nbins);
    let mut progress = LogProgress::new( "get_histogram", 10);

    aggregate( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        if nodata.is_empty() {
            block.histogram( ARGS.vmin, ARGS.vmax, ARGS.nbins, None)
        } else {
            let mask = extract_mask( &block, nodata, MaskMode::Any)?;
            block.histogram( ARGS.vmin, ARGS.vmax, ARGS.nbins, Some(&mask))
        }
    }, |h, acc| acc.and_then( |a| &a + &h), initial, &mut progress)?
}
