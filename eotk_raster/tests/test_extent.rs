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

use eotk_raster::{Extent, EotkRasterError, geometry::{point2, point3, offset2, size2}};

// run with "cargo test --test test_extent -- --nocapture"

fn sample_extents ()->Vec<Extent> {
    vec![
        Extent::new( point3(10,10,1), point3(0,0,0)),
        Extent::new( point3(5,20,3), point3(3,-2,0)),
        Extent::new( point3(7,7,1), point3(20,20,0)), // disjoint from the first
        Extent::new( point3(1,1,1), point3(9,9,0)),
    ]
}

#[test]
fn test_intersection_union () {
    for a in sample_extents() {
        for b in sample_extents() {
            let i = a & b;
            let u = a | b;
            println!("{a} & {b} = {i}, | = {u}");

            assert!( i.volume() <= a.volume().min( b.volume()));
            assert!( u.volume() >= a.volume().max( b.volume()));
            assert_eq!( i, b & a);
            assert_eq!( u, b | a);
            assert!( u.contains( &a) && u.contains( &b));
        }
        assert_eq!( a & a, a);
        assert_eq!( a | a, a);
    }

    let a = Extent::new( point3(10,10,1), point3(0,0,0));
    let b = Extent::new( point3(7,7,1), point3(20,20,0));
    assert!( (a & b).is_empty());
}

#[test]
fn test_negative_size_is_clamped () {
    let e = Extent::new( point3(-3,4,1), point3(0,0,0));
    assert_eq!( e.size(), point3(0,4,1));
    assert!( e.is_empty());
}

#[test]
fn test_extend_and_shift () {
    let e = Extent::new( point3(10,8,3), point3(5,5,0));
    let x = e.extend( point2(2,1));
    assert_eq!( x.size(), point3(14,10,3));
    assert_eq!( x.offset(), point3(3,4,0));
    assert_eq!( x.extend( point2(-2,-1)), e);

    let mut s = e + offset2(1,2);
    assert_eq!( s.offset(), point3(6,7,0));
    s -= offset2(1,2);
    assert_eq!( s, e);
}

#[test]
fn test_tile_coverage () {
    let image = Extent::of_image( 300, 200, 1);
    let tsz = point2(256,256);
    assert_eq!( image.tile_count( tsz).unwrap(), 2);

    let tiles: Vec<Extent> = image.tiles( tsz).unwrap().collect();
    assert_eq!( tiles.len(), 2);

    let mut covered = vec![0u32; 300*200];
    for t in &tiles {
        println!("tile {t}");
        let c = *t & image;
        let (o,u) = (c.offset(), c.upper());
        for y in o.y..u.y {
            for x in o.x..u.x { covered[(y*300 + x) as usize] += 1 }
        }
    }
    assert!( covered.iter().all( |n| *n == 1));
}

#[test]
fn test_tile_grid_alignment () {
    // grid origin is offset // tile, not the extent offset
    let e = Extent::new( point3(100,10,2), point3(90,0,0));
    let tiles: Vec<Extent> = e.tiles( point2(64,64)).unwrap().collect();
    assert_eq!( tiles.len(), 2); // grid columns 1 and 2
    assert_eq!( tiles[0].offset(), point3(64,0,0));
    assert_eq!( tiles[1].offset(), point3(128,0,0));
    assert!( tiles.iter().all( |t| t.size() == point3(64,64,2)));
    assert_eq!( e.tile_count( point2(64,64)).unwrap(), tiles.len());
}

#[test]
fn test_degenerate_tiles () {
    let empty = Extent::of_image( 0, 200, 1);
    assert_eq!( empty.tile_count( point2(256,256)).unwrap(), 0);
    assert_eq!( empty.tiles( point2(256,256)).unwrap().count(), 0);

    let no_bands = Extent::of_image( 300, 200, 0);
    assert_eq!( no_bands.tile_count( point2(256,256)).unwrap(), 0);
    assert_eq!( no_bands.tiles( point2(256,256)).unwrap().count(), 0);

    let image = Extent::of_image( 300, 200, 1);
    match image.tiles( point2(-1,256)) {
        Err(EotkRasterError::DomainError(msg)) => println!("expected error: {msg}"),
        other => panic!("negative tile size not rejected: {other:?}")
    }
}

#[test]
fn test_tiles_restartable () {
    let image = Extent::of_image( 1000, 10, 1);
    let tsz = point2(100,100);
    let first: Vec<Extent> = image.tiles( tsz).unwrap().collect();
    let second: Vec<Extent> = image.tiles( tsz).unwrap().collect();
    assert_eq!( first, second);

    let mut it = image.tiles( tsz).unwrap();
    assert_eq!( it.len(), 10);
    it.next();
    assert_eq!( it.len(), 9);
}
