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

use std::path::PathBuf;
use ndarray::Array3;
use eotk_raster::{
    Block, DataType, Extent, EotkRasterError, Gcp, GeoCoding, ImageFile, NoData, FormatOptions,
    geometry::{point2, point3}, 
    geotiff::{create_geotiff, create_geotiff_like, geotiff_options},
    tiles::{NoProgress, clipped_tiles, execute, aggregate}
};

// run with "cargo test --test test_image_file -- --nocapture"
// output files are created in the system temp dir

const WKT_4326: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433],AXIS["Latitude",NORTH],AXIS["Longitude",EAST],AUTHORITY["EPSG","4326"]]"#;

fn temp_path (name: &str)->PathBuf {
    std::env::temp_dir().join( format!("eotk_test_{name}.tif"))
}

fn rectified ()->GeoCoding {
    GeoCoding::Rectified { proj: WKT_4326.to_string(), geotrn: [-120.0, 0.01, 0.0, 40.0, 0.0, -0.01] }
}

fn test_data (ncol: usize, nrow: usize, nband: usize)->Block<u16> {
    let e = Extent::of_image( ncol, nrow, nband);
    Block::from_data( e, Array3::from_shape_fn( (nrow,ncol,nband), |(r,c,b)| (r * 1000 + c * 10 + b) as u16)).unwrap()
}

#[test]
fn test_geocoding_translated () {
    let g = rectified().translated( 10.0, 20.0);
    let gt = g.geotransform().unwrap();
    assert!( (gt[0] - -119.9).abs() < 1e-9 && (gt[3] - 39.8).abs() < 1e-9);
    assert_eq!( (gt[1], gt[2], gt[4], gt[5]), (0.01, 0.0, 0.0, -0.01));

    let (x,y) = rectified().pixel_to_map( 10.0, 20.0).unwrap();
    assert!( (x - gt[0]).abs() < 1e-12 && (y - gt[3]).abs() < 1e-12);

    let gcp = Gcp { id: "1".into(), info: String::new(), pixel: 100.0, line: 50.0, x: -120.0, y: 40.0, z: 0.0 };
    let g = GeoCoding::Gcps { proj: WKT_4326.to_string(), gcps: vec![gcp] }.translated( 10.0, 20.0);
    match g {
        GeoCoding::Gcps { gcps, .. } => {
            assert_eq!( gcps[0].pixel, 90.0);
            assert_eq!( gcps[0].line, 30.0);
            assert_eq!( gcps[0].x, -120.0);
        }
        other => panic!("unexpected geocoding {other:?}")
    }

    assert!( GeoCoding::None.translated( 1.0, 1.0).is_none());
}

#[test]
fn test_geotiff_round_trip () {
    let path = temp_path("round_trip");
    let data = test_data( 70, 50, 3);
    {
        let mut w = create_geotiff( &path, DataType::UInt16, 50, 70, 3, &rectified(), Some(&NoData::Scalar(0.0)), 
                                    &geotiff_options( &FormatOptions::new())).unwrap();
        // write in tiles to exercise the overlap logic
        execute( clipped_tiles( *w.extent(), point2(32,32)).unwrap(), |tile| {
            let block = data.sub_block( tile)?;
            w.write( &block)
        }, &mut NoProgress).unwrap();
    }

    let r = ImageFile::open_reader( &path).unwrap();
    println!("{r:?}");
    assert_eq!( *r.extent(), Extent::of_image( 70, 50, 3));
    assert_eq!( r.data_type().unwrap(), DataType::UInt16);
    assert_eq!( r.nodata().unwrap(), vec![Some(0.0); 3]);
    assert_eq!( r.geocoding().geotransform(), rectified().geotransform());

    let mut all: Block<u16> = Block::new( *r.extent());
    r.read( &mut all).unwrap();
    assert_eq!( all, data);

    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_partial_read () {
    let path = temp_path("partial_read");
    let data = test_data( 20, 10, 2);
    {
        let mut w = create_geotiff( &path, DataType::UInt16, 10, 20, 2, &GeoCoding::None, None, &FormatOptions::new()).unwrap();
        w.write( &data).unwrap();
    }

    let r = ImageFile::open_reader( &path).unwrap();

    // block hanging over the lower right corner, second band only
    let mut block: Block<u16> = Block::filled( Extent::new( point3(8,8,1), point3(15,5,1)), 9999);
    r.read( &mut block).unwrap();
    assert_eq!( block.data()[[0,0,0]], data.data()[[5,15,1]]);
    assert_eq!( block.data()[[4,4,0]], data.data()[[9,19,1]]);
    assert_eq!( block.data()[[5,0,0]], 9999); // outside, untouched
    assert_eq!( block.data()[[0,5,0]], 9999);

    // no overlap at all
    let mut far: Block<u16> = Block::filled( Extent::new( point3(4,4,1), point3(100,100,0)), 7);
    r.read( &mut far).unwrap();
    assert!( far.data().iter().all( |v| *v == 7));

    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_read_only () {
    let path = temp_path("read_only");
    {
        create_geotiff( &path, DataType::UInt8, 4, 4, 1, &GeoCoding::None, None, &FormatOptions::new()).unwrap();
    }
    let mut r = ImageFile::open_reader( &path).unwrap();
    let block: Block<u8> = Block::new( *r.extent());
    match r.write( &block) {
        Err(EotkRasterError::ReadOnly(p)) => println!("expected error for {p}"),
        other => panic!("write to reader not rejected: {other:?}")
    }
    assert!( r.set_nodata( &NoData::Scalar(1.0)).is_err());

    let mut w = ImageFile::open_writer( &path).unwrap();
    assert!( w.is_writable());
    w.write( &Block::<u8>::filled( *w.extent(), 42)).unwrap();
    drop(w);

    let mut back: Block<u8> = Block::new( *r.extent());
    ImageFile::open_reader( &path).unwrap().read( &mut back).unwrap();
    assert!( back.data().iter().all( |v| *v == 42));

    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_mask_io () {
    let path = temp_path("mask_io");
    let e = Extent::of_image( 5, 3, 1);
    let mask = Block::from_data( e, Array3::from_shape_fn( (3,5,1), |(r,c,_)| (r + c) % 2 == 0)).unwrap();
    {
        let mut w = create_geotiff( &path, DataType::UInt8, 3, 5, 1, &GeoCoding::None, None, &FormatOptions::new()).unwrap();
        w.write_mask( &mask).unwrap();
    }
    let r = ImageFile::open_reader( &path).unwrap();

    let mut bytes: Block<u8> = Block::new( e);
    r.read( &mut bytes).unwrap();
    assert_eq!( bytes.data()[[0,0,0]], 255);
    assert_eq!( bytes.data()[[0,1,0]], 0);

    let mut back: Block<bool> = Block::new( e);
    r.read_mask( &mut back).unwrap();
    assert_eq!( back, mask);

    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_gcp_geocoding () {
    let path = temp_path("gcps");
    let gcps: Vec<Gcp> = [(0.0,0.0,-120.0,40.0), (10.0,0.0,-119.9,40.0), (0.0,10.0,-120.0,39.9)].iter().enumerate()
        .map( |(i,(p,l,x,y))| Gcp { id: format!("{}", i+1), info: String::new(), pixel: *p, line: *l, x: *x, y: *y, z: 0.0 })
        .collect();
    let geocoding = GeoCoding::Gcps { proj: WKT_4326.to_string(), gcps: gcps.clone() };
    {
        create_geotiff( &path, DataType::Float32, 10, 10, 1, &geocoding, None, &FormatOptions::new()).unwrap();
    }

    let r = ImageFile::open_reader( &path).unwrap();
    match r.geocoding() {
        GeoCoding::Gcps { gcps: read, .. } => {
            assert_eq!( read.len(), 3);
            for (a,b) in read.iter().zip( gcps.iter()) {
                assert_eq!( (a.pixel, a.line, a.x, a.y), (b.pixel, b.line, b.x, b.y));
            }
        }
        other => panic!("expected GCP geocoding, got {other:?}")
    }

    // the source geocoding is unchanged by writing it
    assert_eq!( geocoding, GeoCoding::Gcps { proj: WKT_4326.to_string(), gcps });
    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_create_like_and_aggregate () {
    let src_path = temp_path("template");
    let dst_path = temp_path("like");
    let data = test_data( 40, 30, 1);
    {
        let mut w = create_geotiff( &src_path, DataType::UInt16, 30, 40, 1, &rectified(), None, &FormatOptions::new()).unwrap();
        w.write( &data).unwrap();
    }
    let r = ImageFile::open_reader( &src_path).unwrap();
    let mut w = create_geotiff_like( &dst_path, &r, DataType::Float32, 2, Some(&NoData::PerBand( vec![-1.0, -2.0])), &FormatOptions::new()).unwrap();
    assert_eq!( w.nband(), 2);
    assert_eq!( w.data_type().unwrap(), DataType::Float32);
    assert_eq!( w.nodata().unwrap(), vec![Some(-1.0), Some(-2.0)]);
    assert_eq!( w.geocoding().geotransform(), r.geocoding().geotransform());

    // sum of all pixels through the aggregating tile runner
    let sum = aggregate( clipped_tiles( *r.extent(), point2(16,16)).unwrap(), |tile| {
        let mut block: Block<u16> = Block::new( *tile);
        r.read( &mut block)?;
        Ok::<_,EotkRasterError>( block.data().iter().map( |v| *v as u64).sum::<u64>())
    }, |s, acc| s + acc, 0u64, &mut NoProgress).unwrap();
    assert_eq!( sum, data.data().iter().map( |v| *v as u64).sum::<u64>());

    let _ = std::fs::remove_file( &src_path);
    let _ = std::fs::remove_file( &dst_path);
}

#[test]
fn test_open_missing () {
    assert!( ImageFile::open_reader( temp_path("does_not_exist")).is_err());
}
