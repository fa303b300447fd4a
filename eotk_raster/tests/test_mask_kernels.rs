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
use eotk_raster::{Block, Extent, geometry::point3};
use eotk_raster::kernels::{
    MaskMode, extract_mask, extract_mask_multi, replace_bool, clip_to_mask, count_mask_pixels,
    extract_bit_mask, set_bit_mask, get_data_extent
};

// run with "cargo test --test test_mask_kernels -- --nocapture"

/// 4x4x3 block of (10,20,30) pixels with a single (0,0,0) pixel at row 1, col 2
fn rgb_block ()->Block<u8> {
    let e = Extent::new( point3(4,4,3), point3(8,16,0));
    let data = Array3::from_shape_fn( (4,4,3), |(r,c,b)| if r == 1 && c == 2 { 0 } else { 10 * (b as u8 + 1) });
    Block::from_data( e, data).unwrap()
}

fn flags (values: &[u8])->Block<u8> {
    let e = Extent::new( point3(values.len() as i64,1,1), point3(0,0,0));
    Block::from_data( e, Array3::from_shape_vec( (1,values.len(),1), values.to_vec()).unwrap()).unwrap()
}

fn mask_row (mask: &Block<bool>)->Vec<bool> {
    mask.band(0).iter().copied().collect()
}

#[test]
fn test_extract_mask () {
    let block = rgb_block();
    for mode in [MaskMode::Any, MaskMode::All] {
        let mask = extract_mask( &block, &[0.0,0.0,0.0], mode).unwrap();
        println!("{mode:?}: {:?}", mask.band(0));

        assert_eq!( mask.nband(), 1);
        assert_eq!( mask.offset(), block.offset());
        assert_eq!( mask.data().iter().filter( |v| !**v).count(), 1);
        assert!( !mask.data()[[1,2,0]]);
    }
}

#[test]
fn test_extract_mask_modes_differ () {
    // only band 0 is no-data at (0,0)
    let mut block = rgb_block();
    block.data_mut()[[0,0,0]] = 0;
    let all = extract_mask( &block, &[0.0,0.0,0.0], MaskMode::All).unwrap();
    let any = extract_mask( &block, &[0.0,0.0,0.0], MaskMode::Any).unwrap();
    assert!( !all.data()[[0,0,0]]);
    assert!( any.data()[[0,0,0]]);
}

#[test]
fn test_extract_mask_empty_nodata () {
    let block = rgb_block();
    let all = extract_mask( &block, &[], MaskMode::All).unwrap();
    let any = extract_mask( &block, &[], MaskMode::Any).unwrap();
    assert!( all.data().iter().all( |v| !*v));
    assert!( any.data().iter().all( |v| *v));
}

#[test]
fn test_extract_mask_multi () {
    let block = rgb_block();
    let nodata = vec![ vec![0.0, 10.0], vec![0.0], vec![0.0] ];
    // band 0 is 10 (no-data) everywhere except at (1,2) where all bands are 0
    let all = extract_mask_multi( &block, &nodata, MaskMode::All).unwrap();
    assert!( all.data().iter().all( |v| !*v));

    let any = extract_mask_multi( &block, &nodata, MaskMode::Any).unwrap();
    assert_eq!( any.data().iter().filter( |v| !**v).count(), 1);
}

#[test]
fn test_replace_bool () {
    let mask = extract_mask( &rgb_block(), &[0.0,0.0,0.0], MaskMode::All).unwrap();
    let bytes = replace_bool( &mask, 0u8, 255u8);
    assert_eq!( bytes.extent(), mask.extent());
    assert_eq!( bytes.data()[[1,2,0]], 0);
    assert_eq!( bytes.data().iter().filter( |v| **v == 255).count(), 15);
}

#[test]
fn test_clip_to_mask () {
    let data = rgb_block();
    let e = data.extent().with_z( 1, 0);
    let mask_data = Array3::from_shape_fn( (4,4,1), |(r,c,_)| if r >= 2 && c < 2 { 0u8 } else { 255 });
    let mask = Block::from_data( e, mask_data).unwrap();

    let clipped = clip_to_mask( &data, &mask, &[9,9,9], 0).unwrap();
    for r in 0..4 {
        for c in 0..4 {
            for b in 0..3 {
                let expected = if r >= 2 && c < 2 { 9 } else { data.data()[[r,c,b]] };
                assert_eq!( clipped.data()[[r,c,b]], expected);
            }
        }
    }

    // single no-data value is used for all bands
    let clipped = clip_to_mask( &data, &mask, &[7], 0).unwrap();
    assert_eq!( clipped.data()[[3,0,2]], 7);

    let small = Block::<u8>::new( Extent::new( point3(2,2,1), point3(0,0,0)));
    assert!( clip_to_mask( &data, &small, &[9], 0).is_err());
}

#[test]
fn test_extract_bit_mask () {
    let f = flags( &[0x00, 0x80, 0xC0, 0x40]);

    assert_eq!( mask_row( &extract_bit_mask( &f, 0x80, true).unwrap()), vec![false,true,true,false]);
    assert_eq!( mask_row( &extract_bit_mask( &f, 0x80, false).unwrap()), vec![false,true,true,false]);
    assert_eq!( mask_row( &extract_bit_mask( &f, 0xC0, true).unwrap()), vec![false,false,true,false]);
    // any bit of 0xC0 is set in 0x40
    assert_eq!( mask_row( &extract_bit_mask( &f, 0xC0, false).unwrap()), vec![false,true,true,true]);
}

#[test]
fn test_extract_bit_mask_all_bits () {
    let values: Vec<u8> = (0..=255).collect();
    let f = flags( &values);
    for v in [0x01u8, 0x06, 0x81, 0xff] {
        let mask = extract_bit_mask( &f, v, true).unwrap();
        for (x,m) in values.iter().zip( mask_row( &mask)) {
            assert_eq!( m, (x & v) == v);
        }
    }
}

#[test]
fn test_count_mask_pixels () {
    let f = flags( &[0x00, 0x80, 0xC0, 0x40, 0x80]);
    assert_eq!( count_mask_pixels( &f, 0x80, true, false), 2);  // mask == value
    assert_eq!( count_mask_pixels( &f, 0x80, false, false), 4); // mask != 0
    assert_eq!( count_mask_pixels( &f, 0xC0, true, true), 1);   // all bits
    assert_eq!( count_mask_pixels( &f, 0xC0, false, true), 4);  // any bit
}

#[test]
fn test_set_bit_mask () {
    let f = flags( &[0x00, 0x81, 0xC0, 0x01]);
    let m = Block::from_data( *f.extent(), Array3::from_shape_vec( (1,4,1), vec![true,false,true,false]).unwrap()).unwrap();

    let out = set_bit_mask( &f, &m, 0x80u8).unwrap();
    assert_eq!( out.band(0).iter().copied().collect::<Vec<u8>>(), vec![0x80, 0x01, 0xC0, 0x01]);
}

#[test]
fn test_get_data_extent () {
    let e = Extent::new( point3(6,5,1), point3(10,20,0));
    let mut data = Array3::<u8>::zeros( (5,6,1));
    data[[1,2,0]] = 1;
    data[[3,4,0]] = 1;
    let block = Block::from_data( e, data).unwrap();

    let de = get_data_extent( &block, 0);
    println!("data extent: {de}");
    assert_eq!( de.offset(), point3(12,21,0));
    assert_eq!( de.size(), point3(3,3,1));

    let empty = Block::<u8>::new( e);
    let de = get_data_extent( &empty, 0);
    assert_eq!( de.offset(), e.offset());
    assert!( de.is_empty());
}

#[test]
fn test_masks_without_bands () {
    let data = flags( &[0x01, 0x02]);
    let no_bands: Block<bool> = Block::new( Extent::new( point3(2,1,0), point3(0,0,0)));

    assert!( set_bit_mask( &data, &no_bands, 0x80).is_err());
    assert!( clip_to_mask( &data, &no_bands, &[0], false).is_err());
}
