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

//! uniform entry point for the command line tools. Each tool body returns an `anyhow::Result<()>`,
//! errors are reported as `<program>: <message>` on stderr with exit status 1

use std::process;
use tracing_subscriber::{EnvFilter, fmt};

/// the default log filter if RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "warn";

pub fn program_name ()->String {
    std::env::args_os().next()
        .and_then( |p| crate::fs::filestem(&p).map( |s| s.to_string()))
        .unwrap_or_else( || "eotk".to_string())
}

/// install a stderr tracing subscriber that honors RUST_LOG. Calling this more than once is harmless
pub fn init_tracing () {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else( |_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = fmt()
        .with_env_filter( filter)
        .with_writer( std::io::stderr)
        .with_target( false)
        .try_init();
}

/// run a tool body and map its error to a stderr message and exit code 1
pub fn run<F> (f: F) where F: FnOnce()->anyhow::Result<()> {
    init_tracing();

    if let Err(e) = f() {
        eprintln!("{}: {:#}", program_name(), e);
        process::exit(1);
    }
}

/// used by `define_cli!` - print usage/help and terminate. Help and version requests exit with 0
pub fn exit_on_parse_error (e: clap::Error)->! {
    use clap::error::ErrorKind::*;

    match e.kind() {
        DisplayHelp | DisplayVersion => {
            let _ = e.print();
            process::exit(0)
        }
        _ => {
            eprint!("{}: ", program_name());
            let _ = e.print();
            process::exit(1)
        }
    }
}

/// clap value parser for unsigned integers that also accepts "0x.." (hex) and "0b.." (binary) notation
pub fn parse_u32 (s: &str)->std::result::Result<u32,String> {
    let s = s.trim();
    let res = if let Some(hex) = s.strip_prefix("0x").or_else( || s.strip_prefix("0X")) {
        u32::from_str_radix( hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b").or_else( || s.strip_prefix("0B")) {
        u32::from_str_radix( bin, 2)
    } else {
        s.parse::<u32>()
    };
    res.map_err( |e| format!("invalid unsigned integer '{s}': {e}"))
}
