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

//! ordered `KEY=VALUE` option lists as used for GDAL creation options

use std::{fmt, str::FromStr};
use gdal::raster::RasterCreationOptions;

use crate::errors::{Result, EotkRasterError, format_error};

/// insertion ordered, case sensitive option map. Setting an existing key replaces its value in place
#[derive(Debug,Clone,PartialEq,Eq,Default)]
pub struct FormatOptions {
    entries: Vec<(String,String)>
}

impl FormatOptions {
    pub fn new ()->Self { FormatOptions { entries: Vec::new() } }

    pub fn from_tokens<S: AsRef<str>> (tokens: &[S])->Result<Self> {
        let mut opts = FormatOptions::new();
        opts.set_options( tokens)?;
        Ok(opts)
    }

    /// parse and set a "KEY=VALUE" token. Whitespace around key and value is stripped
    pub fn set_option (&mut self, token: &str)->Result<()> {
        let (k,v) = token.split_once('=').ok_or_else( || format_error( format!("invalid option '{token}' (expected KEY=VALUE)")))?;
        let k = k.trim();
        if k.is_empty() { return Err( format_error( format!("empty option key in '{token}'"))) }
        self.set( k, v.trim());
        Ok(())
    }

    pub fn set_options<S: AsRef<str>> (&mut self, tokens: &[S])->Result<()> {
        for t in tokens { self.set_option( t.as_ref())?; }
        Ok(())
    }

    pub fn set (&mut self, key: &str, value: &str) {
        if let Some(e) = self.entries.iter_mut().find( |(k,_)| k == key) {
            e.1 = value.to_string();
        } else {
            self.entries.push( (key.to_string(), value.to_string()) );
        }
    }

    /// add all options of `other`, overriding ours
    pub fn merge (&mut self, other: &FormatOptions) {
        for (k,v) in &other.entries { self.set( k, v) }
    }

    pub fn get (&self, key: &str)->Option<&str> {
        self.entries.iter().find( |(k,_)| k == key).map( |(_,v)| v.as_str())
    }

    pub fn remove (&mut self, key: &str)->Option<String> {
        let idx = self.entries.iter().position( |(k,_)| k == key)?;
        Some( self.entries.remove(idx).1 )
    }

    pub fn contains_key (&self, key: &str)->bool { self.get(key).is_some() }
    pub fn len (&self)->usize { self.entries.len() }
    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    pub fn iter (&self)->impl Iterator<Item=(&str,&str)> {
        self.entries.iter().map( |(k,v)| (k.as_str(), v.as_str()))
    }

    /// the "KEY=VALUE" tokens in insertion order
    pub fn options (&self)->Vec<String> {
        self.entries.iter().map( |(k,v)| format!("{k}={v}")).collect()
    }

    pub fn to_creation_options (&self)->Result<RasterCreationOptions> {
        let mut co = RasterCreationOptions::new();
        for opt in self.options() {
            co.add_string( opt.as_str())?;
        }
        Ok(co)
    }
}

impl FromStr for FormatOptions {
    type Err = EotkRasterError;

    /// whitespace separated list of tokens
    fn from_str (s: &str)->Result<Self> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        FormatOptions::from_tokens( &tokens)
    }
}

impl fmt::Display for FormatOptions {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{}", self.options().join(" "))
    }
}
