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

//! integer 2D/3D points with element-wise arithmetic. `Size` and `Offset` are the 3D
//! specializations used by extents - they only differ in their Z default (1 vs. 0)

use std::{fmt, ops::{Add, Sub, Mul, Div, Neg}};
use num::{Integer, ToPrimitive, Zero};

use crate::errors::{Result, shape_error};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default)]
pub struct Point2<T> {
    pub x: T,
    pub y: T
}

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Default)]
pub struct Point3<T> {
    pub x: T,
    pub y: T,
    pub z: T
}

pub type Size = Point3<i64>;
pub type Offset = Point3<i64>;

/// a 2D size with Z = 1
#[inline] pub fn size2 (x: i64, y: i64)->Size { Point3{ x, y, z: 1 } }

/// a 2D offset with Z = 0
#[inline] pub fn offset2 (x: i64, y: i64)->Offset { Point3{ x, y, z: 0 } }

#[inline] pub fn point2<T> (x: T, y: T)->Point2<T> { Point2{x,y} }

#[inline] pub fn point3<T> (x: T, y: T, z: T)->Point3<T> { Point3{x,y,z} }

/* #region Point2 ************************************************************************************/

impl <T: Copy> Point2<T> {
    pub fn new (x: T, y: T)->Self { Point2{x,y} }

    pub fn map<U,F> (&self, f: F)->Point2<U> where F: Fn(T)->U {
        Point2{ x: f(self.x), y: f(self.y) }
    }

    pub fn zip_with<U,R,F> (&self, other: &Point2<U>, f: F)->Point2<R> where U: Copy, F: Fn(T,U)->R {
        Point2{ x: f(self.x, other.x), y: f(self.y, other.y) }
    }

    pub fn to_array (&self)->[T;2] { [self.x, self.y] }
}

impl <T: Copy + Ord> Point2<T> {
    pub fn min (&self, other: &Self)->Self { self.zip_with( other, |a,b| a.min(b)) }
    pub fn max (&self, other: &Self)->Self { self.zip_with( other, |a,b| a.max(b)) }
}

impl <T: Copy + PartialOrd> Point2<T> {
    pub fn lt (&self, other: &Self)->Point2<bool> { self.zip_with( other, |a,b| a < b) }
    pub fn le (&self, other: &Self)->Point2<bool> { self.zip_with( other, |a,b| a <= b) }
    pub fn gt (&self, other: &Self)->Point2<bool> { self.zip_with( other, |a,b| a > b) }
    pub fn ge (&self, other: &Self)->Point2<bool> { self.zip_with( other, |a,b| a >= b) }
    pub fn eq_elem (&self, other: &Self)->Point2<bool> { self.zip_with( other, |a,b| a == b) }
}

impl <T: Copy + Mul<Output=T> + Add<Output=T>> Point2<T> {
    pub fn prod (&self)->T { self.x * self.y }
    pub fn dot (&self, other: &Self)->T { self.x * other.x + self.y * other.y }
}

impl <T: Copy + ToPrimitive + Mul<Output=T> + Add<Output=T>> Point2<T> {
    /// euclidean length
    pub fn length (&self)->f64 { self.dot(self).to_f64().unwrap_or(f64::NAN).sqrt() }
}

impl Point2<bool> {
    pub fn all (&self)->bool { self.x && self.y }
    pub fn any (&self)->bool { self.x || self.y }
}

impl <T> From<(T,T)> for Point2<T> {
    fn from (v: (T,T))->Self { Point2{ x: v.0, y: v.1 } }
}

impl <T: Copy> From<[T;2]> for Point2<T> {
    fn from (v: [T;2])->Self { Point2{ x: v[0], y: v[1] } }
}

impl <T: Copy + Add<Output=T>> Add for Point2<T> {
    type Output = Point2<T>;
    fn add (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a + b) }
}

impl <T: Copy + Sub<Output=T>> Sub for Point2<T> {
    type Output = Point2<T>;
    fn sub (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a - b) }
}

impl <T: Copy + Mul<Output=T>> Mul for Point2<T> {
    type Output = Point2<T>;
    fn mul (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a * b) }
}

/// floor division
impl <T: Copy + Integer> Div for Point2<T> {
    type Output = Point2<T>;
    fn div (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a.div_floor(&b)) }
}

impl <T: Copy + Neg<Output=T>> Neg for Point2<T> {
    type Output = Point2<T>;
    fn neg (self)->Self { self.map( |a| -a) }
}

impl <T: fmt::Display> fmt::Display for Point2<T> {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/* #endregion Point2 */

/* #region Point3 ************************************************************************************/

impl <T: Copy> Point3<T> {
    pub fn new (x: T, y: T, z: T)->Self { Point3{x,y,z} }

    pub fn map<U,F> (&self, f: F)->Point3<U> where F: Fn(T)->U {
        Point3{ x: f(self.x), y: f(self.y), z: f(self.z) }
    }

    pub fn zip_with<U,R,F> (&self, other: &Point3<U>, f: F)->Point3<R> where U: Copy, F: Fn(T,U)->R {
        Point3{ x: f(self.x, other.x), y: f(self.y, other.y), z: f(self.z, other.z) }
    }

    pub fn xy (&self)->Point2<T> { Point2{ x: self.x, y: self.y } }

    pub fn with_z (&self, z: T)->Self { Point3{ x: self.x, y: self.y, z } }

    pub fn to_array (&self)->[T;3] { [self.x, self.y, self.z] }

    /// construct from a length-3 sequence
    pub fn from_slice (v: &[T])->Result<Self> {
        if let [x,y,z] = v {
            Ok( Point3{ x: *x, y: *y, z: *z } )
        } else {
            Err( shape_error( format!("expected 3 coordinates, got {}", v.len())))
        }
    }
}

impl <T: Copy + Ord> Point3<T> {
    pub fn min (&self, other: &Self)->Self { self.zip_with( other, |a,b| a.min(b)) }
    pub fn max (&self, other: &Self)->Self { self.zip_with( other, |a,b| a.max(b)) }
}

impl <T: Copy + PartialOrd> Point3<T> {
    pub fn lt (&self, other: &Self)->Point3<bool> { self.zip_with( other, |a,b| a < b) }
    pub fn le (&self, other: &Self)->Point3<bool> { self.zip_with( other, |a,b| a <= b) }
    pub fn gt (&self, other: &Self)->Point3<bool> { self.zip_with( other, |a,b| a > b) }
    pub fn ge (&self, other: &Self)->Point3<bool> { self.zip_with( other, |a,b| a >= b) }
    pub fn eq_elem (&self, other: &Self)->Point3<bool> { self.zip_with( other, |a,b| a == b) }
}

impl <T: Copy + Mul<Output=T> + Add<Output=T>> Point3<T> {
    pub fn prod (&self)->T { self.x * self.y * self.z }
    pub fn dot (&self, other: &Self)->T { self.x * other.x + self.y * other.y + self.z * other.z }
}

impl <T: Copy + ToPrimitive + Mul<Output=T> + Add<Output=T>> Point3<T> {
    pub fn length (&self)->f64 { self.dot(self).to_f64().unwrap_or(f64::NAN).sqrt() }
}

impl <T: Copy + Zero + PartialOrd> Point3<T> {
    /// replace negative components with zero
    pub fn clamp_negative (&self)->Self { self.map( |a| if a < T::zero() { T::zero() } else { a }) }
}

impl Point3<bool> {
    pub fn all (&self)->bool { self.x && self.y && self.z }
    pub fn any (&self)->bool { self.x || self.y || self.z }
}

impl <T> From<(T,T,T)> for Point3<T> {
    fn from (v: (T,T,T))->Self { Point3{ x: v.0, y: v.1, z: v.2 } }
}

impl <T: Copy> From<[T;3]> for Point3<T> {
    fn from (v: [T;3])->Self { Point3{ x: v[0], y: v[1], z: v[2] } }
}

impl <T: Copy + Add<Output=T>> Add for Point3<T> {
    type Output = Point3<T>;
    fn add (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a + b) }
}

impl <T: Copy + Sub<Output=T>> Sub for Point3<T> {
    type Output = Point3<T>;
    fn sub (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a - b) }
}

impl <T: Copy + Mul<Output=T>> Mul for Point3<T> {
    type Output = Point3<T>;
    fn mul (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a * b) }
}

/// floor division
impl <T: Copy + Integer> Div for Point3<T> {
    type Output = Point3<T>;
    fn div (self, rhs: Self)->Self { self.zip_with( &rhs, |a,b| a.div_floor(&b)) }
}

impl <T: Copy + Neg<Output=T>> Neg for Point3<T> {
    type Output = Point3<T>;
    fn neg (self)->Self { self.map( |a| -a) }
}

impl <T: fmt::Display> fmt::Display for Point3<T> {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/* #endregion Point3 */
