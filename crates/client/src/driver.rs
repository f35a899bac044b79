//! The browser capability the harvesting core drives.
//!
//! The core never talks to a browser directly: everything it needs from one
//! is expressed by [`Driver`] and [`Element`]. A run can then be backed by a
//! real WebDriver session, or by a scripted fake in tests.

use thiserror::Error;

/// How to select elements on the current page.
#[derive(Clone, Copy, Debug)]
pub enum By<'a> {
    Id(&'a str),
    Tag(&'a str),
    Class(&'a str),
}

/// Failure inside a driver implementation (connection lost, stale element, a
/// dialog that wasn't there, ..). Always fatal for the run.
#[derive(Error, Debug)]
#[error("{}", .message)]
pub struct DriverError {
    message: String,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A handle to an element on the current page.
pub trait Element {
    /// Value of the given attribute, if the element carries it.
    fn attr(&self, name: &str) -> Result<Option<String>, DriverError>;

    /// Rendered text content.
    fn text(&self) -> Result<String, DriverError>;

    fn tag_name(&self) -> Result<String, DriverError>;

    /// Computed CSS value for the given property.
    fn css_value(&self, prop: &str) -> Result<String, DriverError>;

    fn click(&mut self) -> Result<(), DriverError>;

    /// Types text into the element.
    fn send_keys(&mut self, text: &str) -> Result<(), DriverError>;

    /// For `<select>` elements: picks the option with this visible label.
    fn select_by_label(&mut self, label: &str) -> Result<(), DriverError>;
}

/// A driven browser window.
pub trait Driver {
    type Elem: Element;

    /// Navigates to the given address. Arrival is not implied: callers
    /// observe it by polling [`Driver::current_url`].
    fn goto(&mut self, url: &str) -> Result<(), DriverError>;

    /// The address currently shown in the address bar.
    fn current_url(&self) -> Result<String, DriverError>;

    /// All elements matching the selector, in document order.
    fn find_all(&self, by: By) -> Result<Vec<Self::Elem>, DriverError>;

    /// First element matching the selector.
    fn find(&self, by: By) -> Result<Option<Self::Elem>, DriverError> {
        Ok(self.find_all(by)?.into_iter().next())
    }

    /// Accepts the currently open native dialog.
    fn accept_alert(&mut self) -> Result<(), DriverError>;
}
