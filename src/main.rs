use chakra_report::{
    DispatchOutcome, LogoFetch, MailerConfig, OutgoingMail, REPORT_KIND, Report, ReportError,
    ReportRenderer, SmtpMailer, dispatch_report, fetch_logo, inspect_pdf_bytes,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

mod exitcodes {
    pub const OK: u8 = 0;
    pub const INPUT: u8 = 2;
    pub const RENDER: u8 = 3;
    pub const IO: u8 = 4;
}

#[derive(Debug, Parser)]
#[command(
    name = "chakra-report",
    disable_help_subcommand = true,
    about = "Render a chakra assessment session into a paginated PDF report"
)]
struct Args {
    /// Session payload JSON (client details plus one assessment per chakra).
    #[arg(long)]
    input: PathBuf,

    /// Output directory for `{client}_chakra_report.pdf`.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Local PNG/JPEG drawn on the cover.
    #[arg(long, conflicts_with = "fetch_logo")]
    logo: Option<PathBuf>,

    /// Download the cover logo from this URL unless the cache already holds it.
    #[arg(long, value_name = "URL")]
    fetch_logo: Option<String>,

    /// Where a fetched logo is cached.
    #[arg(long, default_value = "logo.png")]
    logo_cache: PathBuf,

    /// Email the rendered PDF to this address (SMTP_* environment variables).
    #[arg(long)]
    email: Option<String>,

    /// JSONL debug log of page breaks, normalization and asset events.
    #[arg(long)]
    debug_log: Option<PathBuf>,
}

#[derive(Debug)]
enum CliError {
    Input(String),
    Render(ReportError),
    Io(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Input(message) => write!(f, "input: {}", message),
            CliError::Render(err) => write!(f, "render: {}", err),
            CliError::Io(message) => write!(f, "io: {}", message),
        }
    }
}

impl From<ReportError> for CliError {
    fn from(value: ReportError) -> Self {
        match value {
            ReportError::Io(err) => CliError::Io(err.to_string()),
            other => CliError::Render(other),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::from(exitcodes::OK),
        Err(err) => {
            eprintln!("chakra-report: error: {err}");
            let code = match err {
                CliError::Input(_) => exitcodes::INPUT,
                CliError::Render(_) => exitcodes::RENDER,
                CliError::Io(_) => exitcodes::IO,
            };
            ExitCode::from(code)
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let raw = std::fs::read_to_string(&args.input)
        .map_err(|err| CliError::Io(format!("{}: {}", args.input.display(), err)))?;
    let report: Report = serde_json::from_str(&raw)
        .map_err(|err| CliError::Input(format!("{}: {}", args.input.display(), err)))?;
    report.validate()?;

    let mut builder = ReportRenderer::builder()
        .document_title(format!("{} - Chakra and Crystal Healing Report", report.client_name));
    if let Some(path) = &args.logo {
        builder = builder.logo_path(path);
    } else if let Some(url) = &args.fetch_logo {
        match fetch_logo(url, &args.logo_cache, None) {
            LogoFetch::Unavailable(reason) => {
                eprintln!("chakra-report: warning: logo unavailable: {reason}");
            }
            fetched => {
                if let Some(path) = fetched.path() {
                    builder = builder.logo_path(path);
                }
            }
        }
    }
    if let Some(path) = &args.debug_log {
        builder = builder.debug_log(path);
    }
    let renderer = builder.build()?;

    let (path, output) = renderer.render_to_file(&report, &args.out, REPORT_KIND)?;
    for warning in &output.warnings {
        eprintln!("chakra-report: warning: {warning}");
    }
    let inspected = inspect_pdf_bytes(&output.pdf)
        .map_err(|err| CliError::Io(format!("written pdf does not parse: {err}")))?;
    println!(
        "wrote {} (pdf {}, {} pages, {} bytes, sha256 {})",
        path.display(),
        inspected.pdf_version,
        inspected.page_count,
        inspected.file_size_bytes,
        output.metrics.fingerprint_sha256
    );

    if let Some(to) = &args.email {
        let config = MailerConfig::from_env();
        let mail = OutgoingMail::report(
            to.clone(),
            &report.client_name,
            report.file_name(REPORT_KIND),
            output.pdf,
        );
        match dispatch_report(&config, SmtpMailer::new, &mail) {
            DispatchOutcome::Sent => println!("emailed report to {to}"),
            DispatchOutcome::SkippedMissingCredentials => {
                eprintln!("chakra-report: warning: SMTP_USER/SMTP_PASSWORD not set, email skipped");
            }
            DispatchOutcome::Failed(reason) => {
                eprintln!("chakra-report: warning: email to {to} failed: {reason}");
            }
        }
    }
    Ok(())
}
