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

//! sequential tile driver. Tiles are processed strictly in iteration order on the caller's thread,
//! errors returned by the tile function end the run and are passed through unchanged

use tracing::{debug, info};

use crate::{Extent, geometry::Point2};
use crate::errors::Result;

pub const DEFAULT_TILE_SIZE: Point2<i64> = Point2 { x: 256, y: 256 };

/// gets notified after each processed tile
pub trait Progress {
    fn start (&mut self, _total: usize) {}
    fn tick (&mut self, done: usize, total: usize);
    fn finish (&mut self) {}
}

pub struct NoProgress;

impl Progress for NoProgress {
    fn tick (&mut self, _done: usize, _total: usize) {}
}

/// logs an info event each time another `step_percent` of the tiles is done
pub struct LogProgress {
    label: String,
    step_percent: usize,
    next_percent: usize
}

impl LogProgress {
    pub fn new (label: impl ToString, step_percent: usize)->Self {
        LogProgress { label: label.to_string(), step_percent: step_percent.clamp(1,100), next_percent: 0 }
    }
}

impl Progress for LogProgress {
    fn start (&mut self, total: usize) {
        self.next_percent = self.step_percent;
        info!("{}: processing {total} tiles", self.label);
    }

    fn tick (&mut self, done: usize, total: usize) {
        if total == 0 { return }
        let percent = done * 100 / total;
        if percent >= self.next_percent {
            info!("{}: {percent}% ({done}/{total})", self.label);
            while self.next_percent <= percent { self.next_percent += self.step_percent }
        }
    }

    fn finish (&mut self) {
        info!("{}: done", self.label);
    }
}

/// the tiles of `image` clipped to the image extent
pub fn clipped_tiles (image: Extent, tile_size: Point2<i64>)->Result<impl Iterator<Item=Extent>> {
    Ok( image.tiles( tile_size)?.map( move |t| t & image) )
}

/// apply `f` to each tile in order
pub fn execute<I,F,E> (tiles: I, mut f: F, progress: &mut dyn Progress)->std::result::Result<(),E> 
    where I: IntoIterator<Item=Extent>, F: FnMut(&Extent)->std::result::Result<(),E>
{
    let tiles = tiles.into_iter();
    let total = tiles.size_hint().1.unwrap_or(0);
    debug!("execute over {total} tiles");

    progress.start( total);
    for (i,tile) in tiles.enumerate() {
        f( &tile)?;
        progress.tick( i+1, total);
    }
    progress.finish();
    Ok(())
}

/// fold the per-tile results of `f` with `state = combine(result, state)`, starting with `initial`
pub fn aggregate<I,F,C,R,S,E> (tiles: I, mut f: F, mut combine: C, initial: S, progress: &mut dyn Progress)->std::result::Result<S,E> 
    where I: IntoIterator<Item=Extent>, F: FnMut(&Extent)->std::result::Result<R,E>, C: FnMut(R,S)->S
{
    let tiles = tiles.into_iter();
    let total = tiles.size_hint().1.unwrap_or(0);
    debug!("aggregate over {total} tiles");

    let mut state = initial;
    progress.start( total);
    for (i,tile) in tiles.enumerate() {
        let res = f( &tile)?;
        state = combine( res, state);
        progress.tick( i+1, total);
    }
    progress.finish();
    Ok(state)
}
