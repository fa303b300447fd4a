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
#![allow(unused)]

use ndarray::{Array3, s};
use eotk_raster::{Block, Extent, geometry::{point2, point3}};
use eotk_raster::kernels::{
    coeff1d_gauss, coeff1d_boxcar, coeff1d_identity, filter_conv_separable, filter_boxcar, mirror_borders
};

// run with "cargo test --test test_convolution -- --nocapture"

fn ramp (ncol: usize, nrow: usize, offset: (i64,i64))->Block<f32> {
    let e = Extent::new( point3(ncol as i64, nrow as i64, 1), point3(offset.0, offset.1, 0));
    Block::from_data( e, Array3::from_shape_fn( (nrow,ncol,1), |(r,c,_)| (r * 10 + c) as f32)).unwrap()
}

#[test]
fn test_coefficients () {
    for whs in [0, 1, 2, 5] {
        let g = coeff1d_gauss( whs);
        println!("gauss({whs}): {g:?}");
        assert_eq!( g.len(), 2*whs + 1);
        assert!( (g.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for i in 0..whs {
            assert!( (g[i] - g[2*whs - i]).abs() < 1e-12); // symmetric
            assert!( g[i] < g[i+1]); // peak in the centre
        }
    }

    let b = coeff1d_boxcar( 2);
    assert_eq!( b.len(), 5);
    assert!( b.iter().all( |v| (*v - 0.2).abs() < 1e-12));

    assert_eq!( coeff1d_identity( 2), vec![0.0, 0.0, 1.0, 0.0, 0.0]);
}

#[test]
fn test_identity_filter () {
    let tile = ramp( 8, 6, (10,20));
    let out: Block<f32> = filter_conv_separable( &tile, &coeff1d_identity(1), &coeff1d_identity(2)).unwrap();

    assert_eq!( out.offset(), point3(12,21,0));
    assert_eq!( out.size(), point3(4,4,1));
    assert_eq!( out.data(), &tile.data().slice( s![1..5, 2..6, ..]).to_owned());
}

#[test]
fn test_boxcar_filter () {
    let tile = ramp( 5, 5, (0,0));
    let out: Block<f64> = filter_boxcar( &tile, 1, 1).unwrap();
    assert_eq!( out.size(), point3(3,3,1));

    // mean of a linear ramp is its centre value
    for ((r,c,_),v) in out.data().indexed_iter() {
        let expected = ((r+1) * 10 + (c+1)) as f64;
        assert!( (*v - expected).abs() < 1e-9);
    }
}

#[test]
fn test_invalid_kernels () {
    let tile = ramp( 5, 5, (0,0));
    assert!( filter_conv_separable::<f32,f32>( &tile, &[0.5, 0.5], &[1.0]).is_err());
    assert!( filter_conv_separable::<f32,f32>( &tile, &coeff1d_boxcar(3), &[1.0]).is_err()); // tile too small
}

#[test]
fn test_mirror_borders () {
    // image is 4x3, tile covers it with a margin of 2 columns and 1 row
    let image = Extent::of_image( 4, 3, 1);
    let mut tile: Block<u8> = Block::new( image.extend( point2(2,1)));
    let inner = Array3::from_shape_fn( (3,4,1), |(r,c,_)| (r * 10 + c) as u8);
    tile.data_mut().slice_mut( s![1..4, 2..6, ..]).assign( &inner);

    mirror_borders( &mut tile, &image).unwrap();
    let band = tile.band(0);
    println!("{band}");

    // columns -2,-1 mirror 1,0 and columns 4,5 mirror 3,2
    assert_eq!( band.row(1).to_vec(), vec![1, 0, 0, 1, 2, 3, 3, 2]);
    // row -1 mirrors row 0, row 3 mirrors row 2
    assert_eq!( band.row(0).to_vec(), band.row(1).to_vec());
    assert_eq!( band.row(4).to_vec(), vec![21, 20, 20, 21, 22, 23, 23, 22]);
}

#[test]
fn test_mirror_inside_is_noop () {
    let image = Extent::of_image( 10, 10, 1);
    let mut tile = ramp( 4, 4, (3,3));
    let before = tile.clone();
    mirror_borders( &mut tile, &image).unwrap();
    assert_eq!( tile, before);
}

#[test]
fn test_smooth_constant () {
    let image = Extent::of_image( 6, 6, 1);
    let margin = point2(2,2);
    let mut tile: Block<f32> = Block::filled( image.extend( margin), 0.0);
    tile.data_mut().slice_mut( s![2..8, 2..8, ..]).fill( 5.0);
    mirror_borders( &mut tile, &image).unwrap();

    let out: Block<f32> = filter_conv_separable( &tile, &coeff1d_gauss(2), &coeff1d_gauss(2)).unwrap();
    assert_eq!( *out.extent(), image);
    assert!( out.data().iter().all( |v| (*v - 5.0).abs() < 1e-5));
}
