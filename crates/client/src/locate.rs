//! Page-scraping predicates and element queries.
//!
//! The portal is scraped by substring and attribute checks. Each check is a
//! named function so it can be exercised away from a live page.

use crate::driver::{By, Driver, Element};
use crate::Result;

/// Href marker of the "download folder as archive" link on a document listing.
const ARCHIVE_LINK_MARKER: &str = "downloadfolder";

/// Href marker of a course home page, including its identifier argument.
const COURSE_HOME_MARKER: &str = "course_home.php?cidReq=";

/// The portal's canonical "no data to display" message.
const EMPTY_STATE_MARKER: &str = "Geen gegevens weer te geven";

/// Computed color the portal renders links to offered tools in.
const ACTIVE_LINK_COLOR: &str = "rgba(30, 100, 200, 1)";

pub fn is_archive_link(href: &str) -> bool {
    href.contains(ARCHIVE_LINK_MARKER)
}

pub fn is_empty_state_marker(text: &str) -> bool {
    text.contains(EMPTY_STATE_MARKER)
}

pub fn is_active_resource_color(color: &str) -> bool {
    color.contains(ACTIVE_LINK_COLOR)
}

/// Extracts the course identifier from a course home address. `None` when
/// the address is not a course home, or carries an empty identifier.
pub fn course_home_id(href: &str) -> Option<&str> {
    let (_, rest) = href.split_once(COURSE_HOME_MARKER)?;
    let id = rest.split('&').next()?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// First `<a>` on the page whose href looks like the archive-download link,
/// together with that href.
pub fn archive_link<D: Driver>(driver: &D) -> Result<Option<(D::Elem, String)>> {
    link_with_href(driver, ARCHIVE_LINK_MARKER)
}

/// First `<a>` whose href contains `fragment`, together with that href.
pub fn link_with_href<D: Driver>(driver: &D, fragment: &str) -> Result<Option<(D::Elem, String)>> {
    for link in driver.find_all(By::Tag("a"))? {
        if let Some(href) = link.attr("href")? {
            if href.contains(fragment) {
                return Ok(Some((link, href)));
            }
        }
    }
    Ok(None)
}

/// Whether the current page links to `fragment` in the active tool color.
pub fn has_active_link<D: Driver>(driver: &D, fragment: &str) -> Result<bool> {
    for link in driver.find_all(By::Tag("a"))? {
        if let Some(href) = link.attr("href")? {
            if href.contains(fragment) && is_active_resource_color(&link.css_value("color")?) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// First `<input>` whose id contains `fragment`.
pub fn input_with_id<D: Driver>(driver: &D, fragment: &str) -> Result<Option<D::Elem>> {
    for input in driver.find_all(By::Tag("input"))? {
        if let Some(id) = input.attr("id")? {
            if id.contains(fragment) {
                return Ok(Some(input));
            }
        }
    }
    Ok(None)
}

/// First `<select>` whose name contains `fragment`.
pub fn select_with_name<D: Driver>(driver: &D, fragment: &str) -> Result<Option<D::Elem>> {
    for select in driver.find_all(By::Tag("select"))? {
        if let Some(name) = select.attr("name")? {
            if name.contains(fragment) {
                return Ok(Some(select));
            }
        }
    }
    Ok(None)
}
