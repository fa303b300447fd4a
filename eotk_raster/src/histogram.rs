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

//! multi-band histograms with underflow/overflow bins. Bin 0 collects values below `vmin`,
//! bin `nbins+1` values above `vmax`, the `nbins` bins in between are equally wide

use std::{fs::File, io::{BufRead, BufReader, BufWriter, Write}, ops::Add, path::Path};
use ndarray::{Array2, Axis};
use num::ToPrimitive;
use tracing::debug;

use eotk_common::fs::ensure_parent_dir;
use crate::{Block, Sample};
use crate::errors::{Result, domain_error, format_error, shape_error};

pub const HISTOGRAM_TAG: &str = "# HISTOGRAM";
const COUNT_TAG: &str = "# COUNT:";

#[derive(Debug,Clone,PartialEq)]
pub struct Histogram {
    vmin: f64,
    vmax: f64,
    nbins: usize,
    accum: Array2<u64>, // nband x (nbins+2)
    count: Vec<u64>
}

impl Histogram {
    pub fn new (nband: usize, vmin: f64, vmax: f64, nbins: usize)->Result<Self> {
        if nband == 0 { return Err( shape_error("histogram needs at least one band")) }
        if nbins == 0 { return Err( domain_error("histogram needs at least one bin")) }
        if !(vmax > vmin) || !vmin.is_finite() || !vmax.is_finite() { 
            return Err( domain_error( format!("invalid histogram range [{vmin},{vmax}]")))
        }

        let accum = Array2::zeros( (nband, nbins+2));
        let count = vec![0; nband];
        Ok( Histogram { vmin, vmax, nbins, accum, count } )
    }

    #[inline] pub fn vmin (&self)->f64 { self.vmin }
    #[inline] pub fn vmax (&self)->f64 { self.vmax }
    #[inline] pub fn nbins (&self)->usize { self.nbins }
    #[inline] pub fn nband (&self)->usize { self.count.len() }
    #[inline] pub fn accum (&self)->&Array2<u64> { &self.accum }
    #[inline] pub fn count (&self)->&[u64] { &self.count }

    #[inline] pub fn step (&self)->f64 { (self.vmax - self.vmin) / self.nbins as f64 }

    /// bin centres including the underflow (first) and overflow (last) bin
    pub fn centres (&self)->Vec<f64> {
        let step = self.step();
        (0..self.nbins+2).map( |i| self.vmin + (i as f64 - 0.5) * step).collect()
    }

    #[inline]
    fn bin_index (&self, v: f64)->usize {
        if v < self.vmin { 
            0 
        } else if v > self.vmax { 
            self.nbins + 1 
        } else {
            let i = ((v - self.vmin) / self.step()).floor() as usize + 1;
            i.min( self.nbins) // v == vmax goes into the last regular bin
        }
    }

    /// add the finite values of all bands of `block`, skipping pixels where `mask` is false
    pub fn update<T> (&mut self, block: &Block<T>, mask: Option<&Block<bool>>)->Result<()> where T: Sample {
        if block.nband() != self.nband() {
            return Err( shape_error( format!("block has {} bands, histogram {}", block.nband(), self.nband())))
        }
        if let Some(mask) = mask { block.check_mask( mask)?; }

        for b in 0..self.nband() {
            let band = block.band(b);
            let mut n: u64 = 0;

            for ((r,c),v) in band.indexed_iter() {
                if let Some(mask) = mask {
                    if !mask.data()[[r,c,0]] { continue }
                }
                if let Some(v) = v.to_f64() {
                    if v.is_finite() {
                        let i = self.bin_index(v);
                        self.accum[[b,i]] += 1;
                        n += 1;
                    }
                }
            }
            self.count[b] += n;
        }
        Ok(())
    }

    /// fraction of observations per band and bin
    pub fn density (&self)->Array2<f64> {
        let mut d = self.accum.mapv( |n| n as f64);
        for (b, mut row) in d.axis_iter_mut( Axis(0)).enumerate() {
            let n = self.count[b] as f64;
            if n > 0.0 { row.mapv_inplace( |v| v / n) } 
        }
        d
    }

    pub fn cumulative_density (&self)->Array2<f64> {
        let mut d = self.density();
        for mut row in d.axis_iter_mut( Axis(0)) {
            let mut acc = 0.0;
            for v in row.iter_mut() {
                acc += *v;
                *v = acc;
            }
        }
        d
    }

    /// per band (lower,upper) values at which the cumulative density first reaches the given percentiles,
    /// linearly interpolated between the centres of the bracketing bins
    pub fn get_range (&self, p_lo: f64, p_hi: f64)->Result<Vec<(f64,f64)>> {
        if !(0.0..=1.0).contains(&p_lo) || !(0.0..=1.0).contains(&p_hi) {
            return Err( domain_error( format!("percentiles outside [0,1]: {p_lo}, {p_hi}")))
        }
        if p_lo >= p_hi {
            return Err( domain_error( format!("lower percentile {p_lo} >= upper percentile {p_hi}")))
        }

        let centres = self.centres();
        let cdf = self.cumulative_density();
        let first = centres[0];
        let last = centres[centres.len()-1];

        let mut ranges = Vec::with_capacity( self.nband());
        for b in 0..self.nband() {
            if self.count[b] == 0 {
                ranges.push( (first,last));
                continue
            }
            let row: Vec<f64> = cdf.row(b).to_vec();
            let lo = if p_lo == 0.0 { first } else { interpolate_percentile( &row, &centres, p_lo) };
            let hi = if p_hi == 1.0 { last } else { interpolate_percentile( &row, &centres, p_hi) };
            ranges.push( (lo.clamp( first, last), hi.clamp( first, last)) );
        }
        Ok(ranges)
    }

    pub fn check_compatible (&self, other: &Histogram)->Result<()> {
        if self.vmin != other.vmin || self.vmax != other.vmax || self.nbins != other.nbins || self.nband() != other.nband() {
            Err( shape_error( "histograms differ in range, bins or bands"))
        } else {
            Ok(())
        }
    }

    /// a new histogram with summed accumulators and counts
    pub fn combine (&self, other: &Histogram)->Result<Histogram> {
        self.check_compatible( other)?;
        let mut h = self.clone();
        h.accum += &other.accum;
        for (c,o) in h.count.iter_mut().zip( other.count.iter()) { *c += *o }
        Ok(h)
    }

    /* #region serialization *****************************************************************/

    pub fn write_to<W: Write> (&self, w: &mut W)->Result<()> {
        writeln!( w, "{HISTOGRAM_TAG}")?;
        writeln!( w, "#   nband: {}", self.nband())?;
        writeln!( w, "#   vmin: {}", self.vmin)?;
        writeln!( w, "#   vmax: {}", self.vmax)?;
        writeln!( w, "#   nbin: {}", self.nbins)?;

        write!( w, "{COUNT_TAG}")?;
        for n in &self.count { write!( w, " {n}")?; }
        writeln!( w)?;

        for (i,c) in self.centres().iter().enumerate() {
            write!( w, "{c}")?;
            for b in 0..self.nband() { write!( w, "\t{}", self.accum[[b,i]])?; }
            writeln!( w)?;
        }
        Ok(())
    }

    pub fn save<P: AsRef<Path>> (&self, path: P)->Result<()> {
        let path = path.as_ref();
        ensure_parent_dir( path)?;
        let mut w = BufWriter::new( File::create( path)?);
        self.write_to( &mut w)?;
        w.flush()?;
        debug!("saved histogram {path:?}");
        Ok(())
    }

    pub fn read_from<R: BufRead> (r: R)->Result<Self> {
        let mut lines = r.lines();

        let tag = lines.next().transpose()?.unwrap_or_default();
        if tag.trim_end() != HISTOGRAM_TAG {
            return Err( format_error("missing histogram tag"))
        }

        let mut nband: Option<usize> = None;
        let mut vmin: Option<f64> = None;
        let mut vmax: Option<f64> = None;
        let mut nbin: Option<usize> = None;
        let mut count: Option<Vec<u64>> = None;

        //--- header
        for line in lines.by_ref() {
            let line = line?;
            if let Some(rest) = line.strip_prefix( COUNT_TAG) {
                count = Some( parse_fields::<u64>( rest.split_whitespace())?);
                break;
            }
            let kv = line.strip_prefix('#').ok_or_else( || format_error( format!("unexpected header line '{line}'")))?;
            if let Some((k,v)) = kv.split_once(':') {
                let v = v.trim();
                match k.trim() {
                    "nband" => nband = Some( parse_field(v)?),
                    "vmin" => vmin = Some( parse_field(v)?),
                    "vmax" => vmax = Some( parse_field(v)?),
                    "nbin" => nbin = Some( parse_field(v)?),
                    _ => {} // other metadata is informational
                }
            }
        }

        let nband = nband.ok_or_else( || format_error("missing nband"))?;
        let vmin = vmin.ok_or_else( || format_error("missing vmin"))?;
        let vmax = vmax.ok_or_else( || format_error("missing vmax"))?;
        let nbin = nbin.ok_or_else( || format_error("missing nbin"))?;
        let count = count.ok_or_else( || format_error("missing count"))?;
        if count.len() != nband { return Err( format_error("count does not match nband")) }

        let mut hist = Histogram::new( nband, vmin, vmax, nbin)
            .map_err( |e| format_error( e.to_string()))?;
        hist.count = count;

        //--- bins
        let mut i = 0;
        for line in lines {
            let line = line?;
            if line.trim().is_empty() { continue }
            if i >= nbin + 2 { return Err( format_error("too many bin lines")) }

            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != nband + 1 { return Err( format_error( format!("wrong number of fields in bin line {i}"))) }
            let ns = parse_fields::<u64>( fields[1..].iter().copied())?;
            for (b,n) in ns.into_iter().enumerate() { hist.accum[[b,i]] = n }
            i += 1;
        }
        if i != nbin + 2 { return Err( format_error( format!("expected {} bin lines, got {i}", nbin+2))) }

        Ok(hist)
    }

    pub fn load<P: AsRef<Path>> (path: P)->Result<Self> {
        let path = path.as_ref();
        let hist = Self::read_from( BufReader::new( File::open( path)?))?;
        debug!("loaded histogram {path:?}");
        Ok(hist)
    }

    /* #endregion serialization */
}

impl Add for &Histogram {
    type Output = Result<Histogram>;
    fn add (self, rhs: &Histogram)->Result<Histogram> { self.combine( rhs) }
}

fn interpolate_percentile (cdf: &[f64], centres: &[f64], p: f64)->f64 {
    let i = cdf.iter().position( |c| *c >= p).unwrap_or( cdf.len()-1);
    if i == 0 { return centres[0] }

    let (c0,c1) = (cdf[i-1], cdf[i]);
    if c1 > c0 {
        centres[i-1] + (p - c0) / (c1 - c0) * (centres[i] - centres[i-1])
    } else {
        centres[i]
    }
}

fn parse_field<T: std::str::FromStr> (s: &str)->Result<T> {
    s.trim().parse::<T>().map_err( |_| format_error( format!("invalid value '{s}'")))
}

fn parse_fields<'a,T: std::str::FromStr> (it: impl Iterator<Item=&'a str>)->Result<Vec<T>> {
    it.map( |s| parse_field(s)).collect()
}
