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

//! stretch an image to 8 bit display values [1,255] with 0 as no-data

use anyhow::{Result, anyhow};
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, DataType, Histogram, ImageFile, NoData, PixelValue, ProcessingConfig, dispatch_data_type,
    geotiff::create_geotiff_like, kernels::{MaskMode, ScaleType, extract_mask, range_stretch_uint8},
    tiles::{LogProgress, clipped_tiles, execute}
};

define_cli! { ARGS [about="range stretch a raster image to uint8 (0: no-data)"] =
    vmin: Vec<f64>            [help="lower range bound, one for all bands or one per band", long, value_delimiter=','],
    vmax: Vec<f64>            [help="upper range bound, one for all bands or one per band", long, value_delimiter=','],
    histogram: Option<String> [help="take the range from this histogram file and the --percentiles", long],
    percentiles: Vec<f64>     [help="<lo>,<hi> percentiles for --histogram", long, value_delimiter=',', default_value="0.02,0.98"],
    scale: ScaleType          [help="scale applied before stretching", long, value_enum, default_value="linear"],
    alpha: bool               [help="add an alpha band", long],
    nodata: Vec<f64>          [help="input no-data value, one for all bands or one per band (default: from input, if any)", long, value_delimiter=','],
    mode: MaskMode            [help="pixel is no-data if all or any of its bands are no-data", long, value_enum, default_value="all"],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output uint8 GeoTIFF"],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let nodata = if ARGS.nodata.is_empty() && input.nodata()?.iter().any( Option::is_none) {
            Vec::new()
        } else {
            input.nodata_values( &ARGS.nodata)?
        };
        let (vmin, vmax) = stretch_range()?;

        let nband = if ARGS.alpha { input.nband() + 1 } else { input.nband() };
        let mut output = create_geotiff_like( &ARGS.output, &input, DataType::UInt8, nband, Some(&NoData::Scalar(0.0)), &config.format_options()?)?;

        dispatch_data_type!( input.data_type()?, T => process::<T>( &input, &mut output, &nodata, &vmin, &vmax, &config))?;
        Ok(())
    })
}

/// explicit --vmin/--vmax values or the percentile range of a histogram file
fn stretch_range ()->Result<(Vec<f64>,Vec<f64>)> {
    if let Some(path) = &ARGS.histogram {
        if ARGS.percentiles.len() != 2 { return Err( anyhow!("--percentiles needs <lo>,<hi>")) }
        let hist = Histogram::load( path)?;
        let ranges = hist.get_range( ARGS.percentiles[0], ARGS.percentiles[1])?;
        Ok( ranges.into_iter().unzip() )
    } else if !ARGS.vmin.is_empty() && !ARGS.vmax.is_empty() {
        Ok( (ARGS.vmin.clone(), ARGS.vmax.clone()) )
    } else if ARGS.scale == ScaleType::Identity {
        Ok( (vec![0.0], vec![255.0]) )
    } else {
        Err( anyhow!("either --vmin and --vmax or --histogram are required"))
    }
}

fn process<T: PixelValue> (input: &ImageFile, output: &mut ImageFile, nodata: &[f64], vmin: &[f64], vmax: &[f64], config: &ProcessingConfig)->eotk_raster::Result<()> {
    let mut progress = LogProgress::new( "range_stretch", 10);

    execute( clipped_tiles( *input.extent(), config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( *tile);
        input.read( &mut block)?;
        let mask = if nodata.is_empty() { 
            Block::filled( tile.with_z( 1, 0), true) 
        } else { 
            extract_mask( &block, nodata, ARGS.mode)? 
        };
        output.write( &range_stretch_uint8( &block, &mask, vmin, vmax, ARGS.scale, ARGS.alpha)?)
    }, &mut progress)
}
