use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use goshare::cli::Args;
use goshare::constants::{
    CLIPBOARD_PREFIX, EXIT_FAILURE, EXIT_USAGE, LINK_PREFIX, SUCCESS_PREFIX, UPLOAD_PREFIX,
    VERSION,
};
use goshare::utils::create_progress_spinner;
use goshare::{
    config_path, hold_clipboard, share, upload_all, CompletionBarrier, ReportMode, Reporter,
    ShareConfig, SshConnector, SystemClipboard, UploadRequest,
};
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    goshare::logger::set_quiet_mode(args.quiet);
    goshare::logger::set_verbose_mode(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            goshare::error!("{:#}", err);
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    if let Some(text) = &args.hold_clipboard {
        hold_clipboard(text)?;
        return Ok(ExitCode::SUCCESS);
    }

    if args.version {
        println!("{}", VERSION);
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    if args.is_empty() {
        Args::command().print_help()?;
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    let path = match &args.config {
        Some(path) => path.clone(),
        None => config_path()?,
    };
    let config = ShareConfig::load(&path).context("Could not load settings")?;
    goshare::verbose!("Loaded settings from {:?}", path);

    if args.settings {
        println!("{}", config);
        return Ok(ExitCode::from(EXIT_USAGE));
    }

    if args.files.len() > 1 {
        return upload_many(&config, &args);
    }

    let request = match args.files.first() {
        Some(file) => {
            if args.screenshot {
                goshare::warn!("Both --screenshot and --file given; uploading the file");
            }
            UploadRequest::file(file, args.keep_name)
        }
        None => UploadRequest::screenshot(),
    };
    upload_one(&config, &args, &request)
}

fn upload_one(config: &ShareConfig, args: &Args, request: &UploadRequest) -> Result<ExitCode> {
    let target = match request.source.local_path() {
        Some(path) => path.display().to_string(),
        None => "screenshot".to_string(),
    };
    goshare::verbose!("{} Uploading {} to {}", UPLOAD_PREFIX, target, config.address());

    let spinner = create_progress_spinner(&format!("Uploading {}", target));
    let result = share(config, &SshConnector, request);
    spinner.finish_and_clear();
    let upload = result.with_context(|| format!("Upload of {} failed", target))?;

    goshare::verbose!("{} Stored at {}", SUCCESS_PREFIX, upload.remote_path);
    let reporter = Reporter::new(
        ReportMode::select(false, args.copy),
        io::stdout(),
        SystemClipboard,
    );
    reporter.report(&upload)?;
    if args.copy {
        goshare::verbose!("{} Copied {} to clipboard", CLIPBOARD_PREFIX, upload.url);
    }
    Ok(ExitCode::SUCCESS)
}

fn upload_many(config: &ShareConfig, args: &Args) -> Result<ExitCode> {
    if args.screenshot {
        goshare::warn!("Both --screenshot and --file given; uploading the files");
    }
    if args.copy {
        goshare::warn!("--copy is ignored when uploading several files");
    }

    let reporter = Reporter::new(ReportMode::Summary, io::stdout(), SystemClipboard);
    let barrier = CompletionBarrier::new(args.files.len());
    let report = upload_all(
        config,
        &SshConnector,
        &args.files,
        args.keep_name,
        &reporter,
        &barrier,
    )?;

    goshare::verbose!(
        "{} {} of {} files uploaded to {}",
        LINK_PREFIX,
        report.succeeded(),
        report.outcomes.len(),
        config.remote_url
    );
    if report.failed() > 0 {
        goshare::error!("{} of {} uploads failed", report.failed(), report.outcomes.len());
        return Ok(ExitCode::from(EXIT_FAILURE));
    }
    Ok(ExitCode::SUCCESS)
}
