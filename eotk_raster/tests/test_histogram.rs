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

use std::io::Cursor;
use ndarray::Array3;
use eotk_raster::{Block, Extent, Histogram, EotkRasterError, geometry::point3};

// run with "cargo test --test test_histogram -- --nocapture"

fn block (values: Vec<f64>, nband: usize)->Block<f64> {
    let n = values.len() / nband;
    let e = Extent::new( point3(n as i64,1,nband as i64), point3(0,0,0));
    Block::from_data( e, Array3::from_shape_vec( (1,n,nband), values).unwrap()).unwrap()
}

fn scenario_histogram ()->Histogram {
    let mut values = vec![0.0; 10];
    values.extend( std::iter::repeat( 100.0).take(90));
    block( values, 1).histogram( 0.0, 100.0, 10, None).unwrap()
}

#[test]
fn test_bins () {
    let h = block( vec![-1.0, 0.0, 9.99, 10.0, 99.0, 100.0, 100.5], 1).histogram( 0.0, 100.0, 10, None).unwrap();
    println!("accum: {}", h.accum());
    assert_eq!( h.accum().row(0).to_vec(), vec![1, 2, 1, 0, 0, 0, 0, 0, 0, 0, 2, 1]);
    assert_eq!( h.count(), &[7]);

    let c = h.centres();
    assert_eq!( c.len(), 12);
    assert_eq!( c[0], -5.0);
    assert_eq!( c[1], 5.0);
    assert_eq!( c[11], 105.0);
}

#[test]
fn test_percentile_range () {
    let h = scenario_histogram();
    let r = h.get_range( 0.05, 0.95).unwrap();
    println!("range: {r:?}");
    assert_eq!( r.len(), 1);

    let (lo,hi) = r[0];
    assert!( lo.abs() < 1e-9);
    assert!( hi > 85.0 && hi < 95.0); // inside the last regular bin
}

#[test]
fn test_full_range () {
    let h = scenario_histogram();
    let c = h.centres();
    assert_eq!( h.get_range( 0.0, 1.0).unwrap(), vec![(c[0], c[c.len()-1])]);

    // no observations
    let empty = Histogram::new( 2, 0.0, 1.0, 4).unwrap();
    let c = empty.centres();
    assert_eq!( empty.get_range( 0.1, 0.9).unwrap(), vec![(c[0], c[5]); 2]);
}

#[test]
fn test_invalid_percentiles () {
    let h = scenario_histogram();
    for (lo,hi) in [(0.5, 0.5), (0.9, 0.1), (-0.1, 0.5), (0.1, 1.5)] {
        match h.get_range( lo, hi) {
            Err(EotkRasterError::DomainError(msg)) => println!("expected error: {msg}"),
            other => panic!("({lo},{hi}) not rejected: {other:?}")
        }
    }
}

#[test]
fn test_cumulative_density () {
    let h = scenario_histogram();
    let cdf = h.cumulative_density();
    let row = cdf.row(0);
    assert_eq!( row[0], 0.0);
    assert!( (row[1] - 0.1).abs() < 1e-12);
    assert!( (row[9] - 0.1).abs() < 1e-12);
    assert!( (row[10] - 1.0).abs() < 1e-12);
    assert!( (row[11] - 1.0).abs() < 1e-12);
}

#[test]
fn test_partition_sum () {
    let values: Vec<f64> = (0..200).map( |i| ((i * 37) % 113) as f64 - 5.0).collect(); // two bands
    let whole = block( values.clone(), 2).histogram( 0.0, 100.0, 20, None).unwrap();

    let mut sum = Histogram::new( 2, 0.0, 100.0, 20).unwrap();
    for chunk in values.chunks( 30) {
        let part = block( chunk.to_vec(), 2).histogram( 0.0, 100.0, 20, None).unwrap();
        sum = (&sum + &part).unwrap();
    }
    assert_eq!( sum, whole);

    let other = Histogram::new( 2, 0.0, 50.0, 20).unwrap();
    assert!( (&sum + &other).is_err());
}

#[test]
fn test_write_read () {
    let h = block( vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0, 150.0, -1.0], 2).histogram( 0.0, 100.0, 4, None).unwrap();

    let mut buf: Vec<u8> = Vec::new();
    h.write_to( &mut buf).unwrap();
    let text = String::from_utf8( buf.clone()).unwrap();
    println!("{text}");

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!( lines[0], "# HISTOGRAM");
    assert!( lines.contains( &"#   nband: 2"));
    assert!( lines.contains( &"# COUNT: 4 4"));
    assert_eq!( lines.len(), 6 + 4 + 2);

    let h2 = Histogram::read_from( Cursor::new( buf)).unwrap();
    assert_eq!( h2, h);
}

#[test]
fn test_save_load () {
    let path = std::env::temp_dir().join("eotk_test_histogram.txt");
    let h = scenario_histogram();
    h.save( &path).unwrap();
    let h2 = Histogram::load( &path).unwrap();
    assert_eq!( h2, h);
    let _ = std::fs::remove_file( &path);
}

#[test]
fn test_malformed () {
    let inputs = [
        "HISTOGRAM\n",
        "# HISTOGRAM\n#   nband: 1\n#   vmin: 0\n#   vmax: 1\n# COUNT: 1\n", // missing nbin
        "# HISTOGRAM\n#   nband: 1\n#   vmin: 0\n#   vmax: 1\n#   nbin: 1\n# COUNT: 1\n-0.5\t0\n0.5\t1\n", // missing bin line
        "# HISTOGRAM\n#   nband: 1\n#   vmin: 0\n#   vmax: 1\n#   nbin: 1\n# COUNT: 1\n-0.5\t0\n0.5\tx\n1.5\t0\n",
    ];
    for s in inputs {
        match Histogram::read_from( Cursor::new( s)) {
            Err(EotkRasterError::FormatError(msg)) => println!("expected error: {msg}"),
            other => panic!("malformed input accepted: {other:?}")
        }
    }
}

#[test]
fn test_update_with_bandless_mask () {
    let data = block( vec![1.0, 2.0, 3.0], 1);
    let no_bands: Block<bool> = Block::new( Extent::new( point3(3,1,0), point3(0,0,0)));

    let mut h = Histogram::new( 1, 0.0, 10.0, 10).unwrap();
    match h.update( &data, Some(&no_bands)) {
        Err(EotkRasterError::InvalidShape(msg)) => println!("expected error: {msg}"),
        other => panic!("bandless mask accepted: {other:?}")
    }
    assert_eq!( h.count(), &[0]);
}
