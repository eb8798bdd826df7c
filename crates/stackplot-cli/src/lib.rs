//! CLI logic for the Stackplot overlay tool.
//!
//! This module contains the core CLI logic: it gathers the inputs of one run
//! from a project file or the command line, builds the plot and writes it as
//! SVG or PNG depending on the output extension.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::{debug, info};

use stackplot::{Plot, PlotBuilder, PlotRequest, StackplotError, project::Project};

/// Run the Stackplot CLI application
///
/// Files that fail to load are skipped; they are listed in the report of the
/// returned [`Plot`] and do not make the run fail.
///
/// # Errors
///
/// Returns `StackplotError` for:
/// - Configuration loading errors
/// - Unreadable project or directive files
/// - Runs without any data or reference file
/// - Rendering and output errors
pub fn run(args: &Args) -> Result<Plot, StackplotError> {
    info!(output_path = args.output; "Processing plot");

    let app_config = config::load_config(args.config.as_ref())?;
    let request = load_request(args)?;

    let mut builder = PlotBuilder::new(app_config);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let plot = builder.build(&request)?;
    builder.write(&plot, Path::new(&args.output))?;

    info!(output_file = args.output; "Plot exported successfully");

    Ok(plot)
}

/// Collects files and directives from a project file or the argument lists.
fn load_request(args: &Args) -> Result<PlotRequest, StackplotError> {
    let mut request = match &args.project {
        Some(path) => PlotRequest::from(Project::load(path)?),
        None => PlotRequest {
            data_files: args.data.clone(),
            ref_files: args.refs.clone(),
            ..PlotRequest::default()
        },
    };

    if let Some(path) = &args.directives {
        debug!(path:? = path; "Reading directives");
        request.directives = fs::read_to_string(path)?;
    }

    Ok(request)
}
