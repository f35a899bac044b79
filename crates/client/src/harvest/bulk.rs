//! Shared workflow for the two bulk-download resource types.
//!
//! Student publications and dropbox submissions go through the same portal
//! form: select everything, pick the download action, submit, confirm the
//! dialog. The portal names the resulting file itself (per-user for
//! publications; single file or zip for dropbox), so unlike documents it is
//! not captured or renamed. It lands in the browser's download directory
//! under whatever name the portal chose.

use log::{info, warn};

use crate::course::Course;
use crate::driver::{Driver, Element};
use crate::locate;
use crate::poll::{wait_for_url, PAGE_LOAD_TIMEOUT};
use crate::{Error, Result};

use super::{Outcome, Resource};

/// Id fragment of the select-all toggle above the submission table.
const SELECT_ALL_ID: &str = "select_all_none_actions_top";

/// Name fragment of the bulk-action dropdown.
const ACTIONS_NAME: &str = "multiple_actions";

/// Id fragment of the control submitting the chosen bulk action.
const SUBMIT_ID: &str = "multiple_actions_submit";

/// One bulk-downloadable resource type.
pub(super) struct BulkJob {
    resource: Resource,
    /// Substring marking course-home links to the resource; doubles as the
    /// listing page's path segment.
    marker: &'static str,
    /// Visible label of the download option in the action dropdown.
    download_label: &'static str,
}

pub(super) const STUDENT_PUBLICATIONS: BulkJob = BulkJob {
    resource: Resource::StudentPublications,
    marker: "student_publication",
    download_label: "Download",
};

pub(super) const DROPBOX: BulkJob = BulkJob {
    resource: Resource::Dropbox,
    marker: "dropbox",
    download_label: "Bestand/folder downloaden",
};

pub(super) fn run<D: Driver>(driver: &mut D, course: &Course, job: BulkJob) -> Result<Outcome> {
    driver.goto(course.home_url())?;
    wait_for_url(driver, course.home_url(), PAGE_LOAD_TIMEOUT)?;

    // Offered tools are linked in the active color; no such link means the
    // course does not have this resource at all.
    if !locate::has_active_link(driver, job.marker)? {
        return Ok(Outcome::SkippedAbsent);
    }

    info!("Found {}", job.resource);

    let listing = course.resource_url(job.marker);
    driver.goto(&listing)?;
    wait_for_url(driver, &listing, PAGE_LOAD_TIMEOUT)?;

    let mut select_all = locate::input_with_id(driver, SELECT_ALL_ID)?
        .ok_or(Error::MissingElement("select-all toggle"))?;
    select_all.click()?;

    // A visible listing without the dropdown has zero submissions to act on.
    let Some(mut dropdown) = locate::select_with_name(driver, ACTIONS_NAME)? else {
        warn!("No action dropdown; {} visible but without submissions", job.resource);
        return Ok(Outcome::SkippedEmpty);
    };
    dropdown.select_by_label(job.download_label)?;

    let mut submit = locate::input_with_id(driver, SUBMIT_ID)?
        .ok_or(Error::MissingElement("bulk action submit control"))?;
    submit.click()?;

    driver.accept_alert()?;

    // The file lands in the browser's download directory under a
    // portal-chosen name; it is not claimed or renamed here.
    Ok(Outcome::Downloaded)
}
