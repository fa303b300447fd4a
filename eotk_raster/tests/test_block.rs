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

use ndarray::{Array3, array};
use eotk_raster::{Block, Extent, geometry::{point3, offset2}};

// run with "cargo test --test test_block -- --nocapture"

#[test]
fn test_construction () {
    let e = Extent::new( point3(4,3,2), point3(10,20,0));
    let b: Block<u16> = Block::new( e);
    assert_eq!( b.data().dim(), (3,4,2));
    assert!( b.data().iter().all( |v| *v == 0));

    let f: Block<f32> = Block::like( &b);
    assert_eq!( f.extent(), b.extent());

    let mut c: Block<u16> = Block::filled( e, 7);
    assert!( c.data().iter().all( |v| *v == 7));
    c.fill( 3);
    assert!( c.data().iter().all( |v| *v == 3));

    assert!( Block::from_data( e, Array3::<u8>::zeros( (4,3,2))).is_err());
    assert!( Block::from_data( e, Array3::<u8>::zeros( (3,4,2))).is_ok());
}

#[test]
fn test_offset_round_trip () {
    let e = Extent::new( point3(3,2,1), point3(0,0,0));
    let data = Array3::from_shape_vec( (2,3,1), vec![1,2,3,4,5,6]).unwrap();
    let mut b = Block::from_data( e, data.clone()).unwrap();

    let v = offset2( 17, -4);
    b += v;
    assert_eq!( b.offset(), point3(17,-4,0));
    b -= v;
    assert_eq!( b.offset(), point3(0,0,0));
    assert_eq!( b.data(), &data);
}

#[test]
fn test_sub_block () {
    let e = Extent::new( point3(4,4,1), point3(100,100,0));
    let data = Array3::from_shape_fn( (4,4,1), |(r,c,_)| (r*4 + c) as u8);
    let b = Block::from_data( e, data).unwrap();

    let s = b.sub_block( &Extent::new( point3(2,2,1), point3(101,102,0))).unwrap();
    println!("sub block: {:?}", s.band(0));
    assert_eq!( s.band(0), array![[9u8,10],[13,14]]);

    assert!( b.sub_block( &Extent::new( point3(2,2,1), point3(99,102,0))).is_err());
}

#[test]
fn test_block_histogram () {
    let e = Extent::new( point3(5,1,1), point3(0,0,0));
    let b = Block::from_data( e, Array3::from_shape_vec( (1,5,1), vec![0.0f32, 1.0, 2.0, 3.0, f32::NAN]).unwrap()).unwrap();

    let h = b.histogram( 0.0, 4.0, 4, None).unwrap();
    assert_eq!( h.count(), &[4]);
    assert_eq!( h.accum().row(0).to_vec(), vec![0,1,1,1,1,0]);

    let mask = Block::from_data( e.with_z(1,0), Array3::from_shape_vec( (1,5,1), vec![true,false,true,false,true]).unwrap()).unwrap();
    let h = b.histogram( 0.0, 4.0, 4, Some(&mask)).unwrap();
    assert_eq!( h.count(), &[2]); // NaN is skipped
}
