use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use minerva_client::{course, fsops, session, Harvester};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

mod chromedriver;

use chromedriver::ChromeDriver;

/// Bulk-downloads course material from the Minerva portal.
///
/// Needs a chromedriver listening on localhost:9515.
#[derive(Debug, Parser)]
#[command(name = "minerva-harvest")]
struct Cli {
    /// Directory the harvested artifacts are placed under. Also becomes
    /// the browser's download directory.
    output_directory: PathBuf,
}

fn main() -> ExitCode {
    TermLogger::init(
        LevelFilter::Info,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .unwrap();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    // Chrome wants an absolute download directory.
    fsops::ensure_directory(&cli.output_directory)?;
    let out_dir = cli
        .output_directory
        .canonicalize()
        .context("resolving output directory")?;

    let username = ask_user("Username? ")?;
    let password = ask_user("Password? ")?;

    info!("Booting...");
    let mut driver = ChromeDriver::launch(&out_dir).context("starting browser session")?;

    info!("Authenticating...");
    session::login(&mut driver, &(username, password.into()))?;

    info!("Getting courses...");
    let courses = course::enumerate(&mut driver)?;
    info!(
        "Found {} courses. (They are: {:?})",
        courses.len(),
        courses.iter().map(|c| c.id()).collect::<Vec<_>>()
    );

    let mut harvester = Harvester::new(&mut driver, out_dir);
    for (i, course) in courses.iter().enumerate() {
        info!("Downloading {}/{}", i + 1, courses.len());
        harvester.harvest_course(course)?;
    }

    info!("Done!");
    Ok(())
}

/// Prompts on stdout and reads a line from stdin, until the user enters
/// something non-empty.
fn ask_user(question: &str) -> Result<String> {
    let stdin = io::stdin();
    loop {
        print!("{}", question);
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("stdin closed while waiting for input");
        }
        let line = line.trim();
        if !line.is_empty() {
            return Ok(line.to_string());
        }
    }
}
