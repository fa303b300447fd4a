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

//! separable Gaussian or box-car smoothing with mirrored image borders

use anyhow::Result;
use clap::ValueEnum;
use eotk_common::{cli, define_cli};
use eotk_raster::{
    Block, DataType, ImageFile, NoData, PixelValue, ProcessingConfig, dispatch_data_type,
    geometry::point2, geotiff::create_geotiff_like,
    kernels::{coeff1d_boxcar, coeff1d_gauss, filter_conv_separable, mirror_borders},
    tiles::{LogProgress, clipped_tiles, execute}
};

#[derive(Debug,Clone,Copy,PartialEq,Eq,ValueEnum)]
enum Filter { Gauss, Boxcar }

define_cli! { ARGS [about="smooth a raster image with a separable convolution filter"] =
    filter: Filter            [help="filter kernel", long, value_enum, default_value="gauss"],
    whs: usize                [help="window half size in pixels (window is 2*whs+1)", long, default_value="1"],
    row_whs: Option<usize>    [help="window half size along the Y axis (default: --whs)", long],
    col_whs: Option<usize>    [help="window half size along the X axis (default: --whs)", long],
    data_type: Option<DataType> [help="output data type (default: input type)", long],
    tile_size: Option<String> [help="processing tile size <w>x<h>", long],
    config: Option<String>    [help="RON processing config file", long],
    input: String             [help="input image"],
    output: String            [help="output GeoTIFF"],
    options: Vec<String>      [help="GeoTIFF creation options KEY=VALUE", trailing_var_arg=true]
}

fn kernel (whs: usize)->Vec<f64> {
    match ARGS.filter {
        Filter::Gauss => coeff1d_gauss( whs),
        Filter::Boxcar => coeff1d_boxcar( whs)
    }
}

fn main () {
    cli::run( || {
        let config = ProcessingConfig::load( ARGS.config.as_ref())?.with_overrides( ARGS.tile_size.as_deref(), &ARGS.options)?;
        let input = ImageFile::open_reader( &ARGS.input)?;
        let in_type = input.data_type()?;
        let out_type = ARGS.data_type.unwrap_or( in_type);
        let nodata = input.nodata()?.into_iter().collect::<Option<Vec<f64>>>();
        let mut output = create_geotiff_like( &ARGS.output, &input, out_type, input.nband(), 
                                              nodata.map( NoData::PerBand).as_ref(), &config.format_options()?)?;

        let row_kernel = kernel( ARGS.row_whs.unwrap_or( ARGS.whs));
        let col_kernel = kernel( ARGS.col_whs.unwrap_or( ARGS.whs));

        dispatch_data_type!( in_type, T => {
            dispatch_data_type!( out_type, U => process::<T,U>( &input, &mut output, &row_kernel, &col_kernel, &config))
        })?;
        Ok(())
    })
}

fn process<T: PixelValue, U: PixelValue> (input: &ImageFile, output: &mut ImageFile, row_kernel: &[f64], col_kernel: &[f64], 
                                          config: &ProcessingConfig)->eotk_raster::Result<()> 
{
    let margin = point2( (col_kernel.len() / 2) as i64, (row_kernel.len() / 2) as i64);
    let image = *input.extent();
    let mut progress = LogProgress::new( "smooth", 10);

    execute( clipped_tiles( image, config.tile_size()?)?, |tile| {
        let mut block: Block<T> = Block::new( tile.extend( margin));
        input.read( &mut block)?;
        mirror_borders( &mut block, &image)?;
        let filtered: Block<U> = filter_conv_separable( &block, row_kernel, col_kernel)?;
        output.write( &filtered)
    }, &mut progress)
}
