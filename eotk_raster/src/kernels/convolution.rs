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

use ndarray::{Array3, Axis};
use num::ToPrimitive;

use crate::{Block, Extent, PixelValue, Sample, geometry::point2};
use crate::errors::{Result, shape_error, domain_error};

/// number of Simpson intervals used to integrate the Gaussian over one pixel
const GAUSS_INTEGRATION_STEPS: usize = 16;

/* #region coefficients ******************************************************************************/

/// Gaussian weights for a window of `2*whs+1` pixels with sigma = whs/3. Each weight is the integral of the
/// normal density over its pixel, the result is normalized to a sum of 1
pub fn coeff1d_gauss (whs: usize)->Vec<f64> {
    if whs == 0 { return vec![1.0] }

    let sigma = whs as f64 / 3.0;
    let pdf = |x: f64| (-0.5 * (x / sigma).powi(2)).exp();
    let h = 1.0 / GAUSS_INTEGRATION_STEPS as f64;

    let mut coeffs: Vec<f64> = (-(whs as i64)..=whs as i64).map( |i| {
        let x0 = i as f64 - 0.5;
        let mut sum = pdf(x0) + pdf(x0 + 1.0);
        for j in 1..GAUSS_INTEGRATION_STEPS {
            let w = if j % 2 == 1 { 4.0 } else { 2.0 };
            sum += w * pdf( x0 + j as f64 * h);
        }
        sum * h / 3.0
    }).collect();

    let total: f64 = coeffs.iter().sum();
    coeffs.iter_mut().for_each( |c| *c /= total);
    coeffs
}

pub fn coeff1d_boxcar (whs: usize)->Vec<f64> {
    let n = 2 * whs + 1;
    vec![1.0 / n as f64; n]
}

/// one-hot kernel that leaves data unchanged
pub fn coeff1d_identity (whs: usize)->Vec<f64> {
    let mut coeffs = vec![0.0; 2 * whs + 1];
    coeffs[whs] = 1.0;
    coeffs
}

/* #endregion coefficients */

/* #region filters ***********************************************************************************/

fn check_kernel (kernel: &[f64], what: &str)->Result<i64> {
    if kernel.len() % 2 == 1 {
        Ok( (kernel.len() / 2) as i64 )
    } else {
        Err( domain_error( format!("{what} kernel length has to be odd, got {}", kernel.len())))
    }
}

/// separable convolution of a tile that is inflated by `(col_kernel.len()/2, row_kernel.len()/2)` on 
/// each side. The row kernel is applied along the Y axis first, the column kernel along X second.
/// The result covers the tile extent without the margins
pub fn filter_conv_separable<T,U> (tile: &Block<T>, row_kernel: &[f64], col_kernel: &[f64])->Result<Block<U>>
    where T: Sample, U: PixelValue
{
    let my = check_kernel( row_kernel, "row")?;
    let mx = check_kernel( col_kernel, "column")?;

    let extent = tile.extent().extend( point2( -mx, -my));
    let size = extent.size();
    if size.x <= 0 || size.y <= 0 {
        return Err( shape_error( format!("tile {} is too small for a {}x{} kernel", tile.extent(), col_kernel.len(), row_kernel.len())))
    }
    let (nrow, ncol, nband) = (size.y as usize, size.x as usize, size.z as usize);
    let src = tile.data();

    // pass 1: rows
    let nr = row_kernel.len();
    let mut tmp = Array3::<f64>::zeros( (nrow, tile.ncol(), nband));
    for ((r,c,b),v) in tmp.indexed_iter_mut() {
        *v = (0..nr).map( |k| row_kernel[nr-1-k] * src[[r+k,c,b]].to_f64().unwrap_or(f64::NAN)).sum();
    }

    // pass 2: columns
    let nc = col_kernel.len();
    let mut out: Block<U> = Block::new( extent);
    for ((r,c,b),v) in out.data_mut().indexed_iter_mut() {
        let y: f64 = (0..nc).map( |k| col_kernel[nc-1-k] * tmp[[r,c+k,b]]).sum();
        *v = U::from_f64( y);
    }

    Ok(out)
}

/// flat kernel convolution with `2*whs+1` pixel windows
pub fn filter_boxcar<T,U> (tile: &Block<T>, row_whs: usize, col_whs: usize)->Result<Block<U>>
    where T: Sample, U: PixelValue
{
    filter_conv_separable( tile, &coeff1d_boxcar( row_whs), &coeff1d_boxcar( col_whs))
}

/// reflect coordinate `i` into [lo,hi). The edge pixel is repeated (-1 -> 0, n -> n-1)
fn reflect (i: i64, lo: i64, hi: i64)->i64 {
    let n = hi - lo;
    let k = (i - lo).rem_euclid( 2 * n);
    if k < n { lo + k } else { lo + 2 * n - 1 - k }
}

/// fill the parts of `tile` that lie outside of `image` with mirrored pixels from the inside, so that
/// convolution kernels see a symmetric neighbourhood at the image borders. X is mirrored before Y
pub fn mirror_borders<T: Copy> (tile: &mut Block<T>, image: &Extent)->Result<()> {
    let o = tile.offset();
    let inside = *tile.extent() & *image;
    if inside.size().x <= 0 || inside.size().y <= 0 {
        return Err( shape_error( format!("tile {} does not overlap image {image}", tile.extent())))
    }
    let (ilo, ihi) = (image.offset(), image.upper());
    let (tlo, thi) = (inside.offset(), inside.upper());

    for c in 0..tile.ncol() {
        let x = o.x + c as i64;
        if x >= ilo.x && x < ihi.x { continue }
        let xs = reflect( x, ilo.x, ihi.x);
        if xs < tlo.x || xs >= thi.x {
            return Err( shape_error( format!("mirror source column {xs} is not in tile {}", tile.extent())))
        }
        let src = tile.data().index_axis( Axis(1), (xs - o.x) as usize).to_owned();
        tile.data_mut().index_axis_mut( Axis(1), c).assign( &src);
    }

    for r in 0..tile.nrow() {
        let y = o.y + r as i64;
        if y >= ilo.y && y < ihi.y { continue }
        let ys = reflect( y, ilo.y, ihi.y);
        if ys < tlo.y || ys >= thi.y {
            return Err( shape_error( format!("mirror source row {ys} is not in tile {}", tile.extent())))
        }
        let src = tile.data().index_axis( Axis(0), (ys - o.y) as usize).to_owned();
        tile.data_mut().index_axis_mut( Axis(0), r).assign( &src);
    }

    Ok(())
}

/* #endregion filters */
