//! The documents workflow: every course exposes its document tree as a
//! single downloadable archive, which we claim from the staging path and
//! rename into the course's directory.

use std::path::Path;

use log::info;

use crate::course::Course;
use crate::driver::{By, Driver, Element};
use crate::locate;
use crate::poll::{wait_for_file, wait_for_url, DOWNLOAD_TIMEOUT, PAGE_LOAD_TIMEOUT};
use crate::{fsops, Error, Result};

use super::Outcome;

/// Subdirectory of the course directory the archive lands in.
const SUBDIR: &str = "documents";

pub(super) fn run<D: Driver>(
    driver: &mut D,
    out_root: &Path,
    staging: &Path,
    course: &Course,
) -> Result<Outcome> {
    driver.goto(course.home_url())?;
    wait_for_url(driver, course.home_url(), PAGE_LOAD_TIMEOUT)?;

    let listing = course.document_url();
    driver.goto(&listing)?;
    wait_for_url(driver, &listing, PAGE_LOAD_TIMEOUT)?;

    // Every document listing carries the archive link; a page without one
    // no longer looks like the portal we know.
    let (_, archive_href) = locate::archive_link(driver)?
        .ok_or(Error::MissingElement("document archive link"))?;

    let title = course_title(driver)?;
    let slug = course.slug(&title);

    let target_dir = out_root.join(&slug).join(SUBDIR);
    fsops::ensure_directory(&target_dir)?;

    let target = target_dir.join(format!("{}.zip", slug));
    if fsops::exists(&target) {
        info!("Already exists: {}.zip", slug);
        return Ok(Outcome::AlreadyDownloaded);
    }

    if listing_is_empty(driver)? {
        info!("No files found: {}", slug);
        return Ok(Outcome::SkippedEmpty);
    }

    // Trigger the download, wait for it to land on the shared staging path,
    // and claim it before anything else can be triggered.
    driver.goto(&archive_href)?;
    info!("Awaiting file download...");
    wait_for_file(staging, DOWNLOAD_TIMEOUT)?;
    fsops::move_into_place(staging, &target)?;

    info!("Saved {}.zip", slug);
    Ok(Outcome::Downloaded)
}

/// The course's display name, read from the page's primary heading. The
/// page also titles itself after the portal, so headings naming the brand
/// are rejected.
fn course_title<D: Driver>(driver: &D) -> Result<String> {
    let mut title = None;
    for heading in driver.find_all(By::Tag("h1"))? {
        let text = heading.text()?;
        if !text.to_lowercase().contains("minerva") {
            title = Some(text);
        }
    }
    title.ok_or(Error::MissingElement("course title heading"))
}

/// Whether the listing shows the portal's "no data" marker in an italic cell.
fn listing_is_empty<D: Driver>(driver: &D) -> Result<bool> {
    for cell in driver.find_all(By::Class("italic"))? {
        if cell.tag_name()? == "td" && locate::is_empty_state_marker(&cell.text()?) {
            return Ok(true);
        }
    }
    Ok(false)
}
