pub mod course;
pub mod driver;
pub mod fsops;
pub mod harvest;
pub mod locate;
pub mod poll;
pub mod session;

pub use course::Course;
pub use driver::{By, Driver, DriverError, Element};
pub use harvest::{Harvester, Outcome, Resource};
pub use session::{Credentials, Password};

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Address of the portal being harvested.
pub const PORTAL_BASE: &str = "https://minerva.ugent.be/";

#[derive(Error, Debug)]
pub enum Error {
    #[error("driver error: {}", .0)]
    Driver(#[from] DriverError),

    #[error("authentication failed: {}", .0)]
    Auth(Box<Error>),

    #[error("timed out after {:?} waiting for {}; last saw {:?}", .waited, .what, .last_seen)]
    Timeout {
        what: String,
        waited: Duration,
        last_seen: String,
    },

    #[error("required element missing: {}", .0)]
    MissingElement(&'static str),

    #[error("staging file vanished before it could be placed: {}", .0.display())]
    Placement(PathBuf),

    #[error("io error: {}", .0)]
    Io(#[from] std::io::Error),
}
