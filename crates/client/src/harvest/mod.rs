//! Per-course resource harvesting.
//!
//! Each course offers up to three harvestable resource types. Documents are
//! fetched as one archive and placed under the course's directory; student
//! publications and dropbox submissions go through the portal's bulk-action
//! form and land wherever the browser's download directory points.

mod bulk;
mod documents;

use std::fmt;
use std::path::PathBuf;

use log::info;

use crate::course::Course;
use crate::driver::Driver;
use crate::Result;

/// Name of the staging file the browser writes document archives to. One
/// download may be in flight at a time; the file is renamed away before the
/// next one is triggered.
pub const STAGING_NAME: &str = "documents.zip";

/// The three harvestable resource types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Documents,
    StudentPublications,
    Dropbox,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resource::Documents => "documents",
            Resource::StudentPublications => "student_publications",
            Resource::Dropbox => "dropbox",
        })
    }
}

/// How one (course, resource) harvest ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A download was triggered (and, for documents, placed).
    Downloaded,
    /// The target artifact already existed; nothing was fetched.
    AlreadyDownloaded,
    /// The resource exists but holds nothing to fetch.
    SkippedEmpty,
    /// The course does not offer this resource.
    SkippedAbsent,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Downloaded => "downloaded",
            Outcome::AlreadyDownloaded => "skipped-already-downloaded",
            Outcome::SkippedEmpty => "skipped-empty",
            Outcome::SkippedAbsent => "skipped-absent",
        })
    }
}

/// Runs the harvest workflows against one driven browser session.
///
/// The output root owns every placement decision; the browser's default
/// download directory must point at the same root for the staging scheme
/// to work.
pub struct Harvester<'d, D: Driver> {
    driver: &'d mut D,
    out_root: PathBuf,
}

impl<'d, D: Driver> Harvester<'d, D> {
    pub fn new(driver: &'d mut D, out_root: impl Into<PathBuf>) -> Self {
        Self {
            driver,
            out_root: out_root.into(),
        }
    }

    /// Where the browser deposits an in-flight document archive.
    fn staging_path(&self) -> PathBuf {
        self.out_root.join(STAGING_NAME)
    }

    /// Harvests all three resource types for one course, in a fixed order,
    /// logging each outcome as it lands.
    pub fn harvest_course(&mut self, course: &Course) -> Result<Vec<(Resource, Outcome)>> {
        let mut report = Vec::with_capacity(3);
        for resource in [
            Resource::Documents,
            Resource::StudentPublications,
            Resource::Dropbox,
        ] {
            let outcome = match resource {
                Resource::Documents => self.documents(course)?,
                Resource::StudentPublications => self.student_publications(course)?,
                Resource::Dropbox => self.dropbox(course)?,
            };
            info!("[{}] {}: {}", course.id(), resource, outcome);
            report.push((resource, outcome));
        }
        Ok(report)
    }

    /// Fetches the course's documents as one archive into
    /// `<root>/<slug>/documents/<slug>.zip`.
    pub fn documents(&mut self, course: &Course) -> Result<Outcome> {
        let staging = self.staging_path();
        documents::run(self.driver, &self.out_root, &staging, course)
    }

    pub fn student_publications(&mut self, course: &Course) -> Result<Outcome> {
        bulk::run(self.driver, course, bulk::STUDENT_PUBLICATIONS)
    }

    pub fn dropbox(&mut self, course: &Course) -> Result<Outcome> {
        bulk::run(self.driver, course, bulk::DROPBOX)
    }
}
