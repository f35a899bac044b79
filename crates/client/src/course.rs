//! Courses and how we discover them.

use std::collections::BTreeSet;

use log::debug;

use crate::driver::{By, Driver, Element};
use crate::locate::course_home_id;
use crate::poll::{wait_for_url, PAGE_LOAD_TIMEOUT};
use crate::{fsops, Result, PORTAL_BASE};

/// Page listing every enrolled course, relative to the portal base.
const INDEX_PAGE: &str = "index.php";

/// One enrollment, identified by its home-page address.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Course {
    home_url: String,
    id: String,
}

impl Course {
    /// Parses a course from a link to its home page. `None` when the
    /// address is not a course home or carries an empty identifier.
    pub fn from_home_url(href: &str) -> Option<Course> {
        let id = course_home_id(href)?;
        Some(Course {
            id: id.to_string(),
            home_url: href.to_string(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn home_url(&self) -> &str {
        &self.home_url
    }

    /// Address of the course's document listing.
    pub fn document_url(&self) -> String {
        self.home_url.replace("course_home", "document")
    }

    /// Address of one of the course's tool listings (`student_publication`,
    /// `dropbox`).
    pub fn resource_url(&self, segment: &str) -> String {
        self.home_url
            .replace("course_home/course_home.php", &format!("{}/index.php", segment))
    }

    /// Directory-safe name: the course id followed by its sanitized title.
    pub fn slug(&self, display_name: &str) -> String {
        format!("{} - {}", self.id, fsops::sanitize(display_name))
    }
}

/// Discovers every enrolled course from the portal index. The index lists
/// courses in several widgets, so duplicate links to the same course
/// collapse to one entry. An empty set is a valid result.
pub fn enumerate<D: Driver>(driver: &mut D) -> Result<BTreeSet<Course>> {
    driver.goto(&format!("{}{}", PORTAL_BASE, INDEX_PAGE))?;
    wait_for_url(driver, INDEX_PAGE, PAGE_LOAD_TIMEOUT)?;

    let mut courses = BTreeSet::new();
    for link in driver.find_all(By::Tag("a"))? {
        if let Some(href) = link.attr("href")? {
            if let Some(course) = Course::from_home_url(&href) {
                courses.insert(course);
            }
        }
    }

    debug!("index scan found {} distinct courses", courses.len());
    Ok(courses)
}
