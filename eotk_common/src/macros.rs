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

#[macro_export]
macro_rules! io_error {
    ( $kind:expr, $fmt:literal $(, $($arg:expr),* )? ) =>
    {
        std::io::Error::new( $kind, format!($fmt, $( $($arg),* )?))
    }
}
pub use io_error;

/* #region define_cli  ****************************************************************************************/

/// declare the clap command line of a tool as a lazily parsed static:
/// ```ignore
/// define_cli! { ARGS [about="extract a validity mask"] =
///   tile_size: Option<String> [help="tile size as WxH", long],
///   input: String             [help="input raster"],
///   output: String            [help="output mask raster"]
/// }
///
/// fn main () {
///    cli::run( || {
///        let reader = ImageFile::open_reader( &ARGS.input)?;
///        ...
///    })
/// }
/// ```
/// The field list becomes a `#[derive(clap::Parser)] struct CliOpts` (options in brackets go into
/// the `#[arg(..)]` attribute, the bracket after the static name into `#[command(..)]`) and `ARGS`
/// is parsed on first access. Parse errors print the usage and exit with status 1
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $( #[$meta:meta] )? $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        use clap::Parser;
        use lazy_static::lazy_static;

        #[derive(Parser)]
        #[command( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[arg( $( $fopt $(=$fx)? ),* )]
                $(#[$meta])?
                $fname : $ftype,
            )*
        }
        lazy_static! { 
            static ref $name: CliOpts = CliOpts::try_parse().unwrap_or_else( |e| $crate::cli::exit_on_parse_error(e)); 
        }
    }
}

/* #endregion define_cli */

/* #region define_error  **************************************************************************************/

/// a `thiserror` enum from a list of `Variant(fields) : "message"` entries
/// ```ignore
/// define_error!{ pub EotkRasterError =
///   GdalError( #[from] gdal::errors::GdalError ) : "GDAL error: {0}",
///   InvalidShape(String) : "invalid shape: {0}"
/// }
/// ```
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $err_variant:ident ( $( $( #[$meta:meta] )? $field_type:ty),* ) : $msg_lit:literal ),*) => {
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $( 
                #[error($msg_lit)]
                $err_variant ( $( $(#[$meta])? $field_type ),*  )
            ),*
        }
    }
}

/* #endregion define_error */
