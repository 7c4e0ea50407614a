//! `wc`: count words in text files with one reader and one counter per file.
mod cli;
mod logging;
mod sink;

use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use wordcount_core::Report;
use wordcount_engine::{Pipeline, ReportSink};
use wordcount_logging::{wc_error, wc_info};

use crate::cli::{Args, Mode};
use crate::sink::{render_json, LineSink, QuietSink};

fn main() -> ExitCode {
    let args = Args::parse();
    logging::initialize(args.log_destination(), args.log_level());

    match run(&args) {
        Ok(report) if report.has_failures() => {
            wc_error!(
                "{} of {} files could not be counted completely",
                report.failures.len(),
                report.file_count()
            );
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            wc_error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<Report> {
    let pipeline =
        Pipeline::new(args.pipeline_config()).context("invalid pipeline configuration")?;
    wc_info!(
        "mode={:?} chunk_size={} files={}",
        args.mode,
        pipeline.config().tokenizer.chunk_size,
        args.files.len()
    );

    if args.json {
        let report = count(&pipeline, args, &QuietSink);
        let json = render_json(&report).context("rendering JSON report")?;
        println!("{json}");
        return Ok(report);
    }

    let sink = LineSink::new(io::stdout().lock());
    Ok(count(&pipeline, args, &sink))
}

fn count(pipeline: &Pipeline, args: &Args, sink: &dyn ReportSink) -> Report {
    match args.mode {
        Mode::Pipeline => pipeline.run(&args.files, sink),
        Mode::Sequential => pipeline.run_sequential(&args.files, sink),
    }
}
