//! Authenticating the driven browser against the portal.
//!
//! Login is a fixed two-hop flow: the portal hands the browser off to the
//! university's central login page, which redirects back once credentials
//! are accepted. Both redirects must be observed before anything else may
//! run; a failure here aborts the whole run.

use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::driver::{By, Driver, Element};
use crate::poll::wait_for_url;
use crate::{Error, Result, PORTAL_BASE};

/// Information used to login.
pub type Credentials = (String, Password);

/// Domain of the external identity provider we are handed off to.
const IDP_DOMAIN: &str = "login.ugent.be";

/// Domain the browser must land back on for the session to count as
/// authenticated.
const PORTAL_DOMAIN: &str = "minerva.ugent.be";

/// Budget for each login redirect.
const LOGIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Authenticates the session. No retry: wrong credentials or a changed
/// login page surface as an authentication failure.
pub fn login<D: Driver>(driver: &mut D, creds: &Credentials) -> Result<()> {
    authenticate(driver, creds).map_err(|e| Error::Auth(Box::new(e)))
}

fn authenticate<D: Driver>(driver: &mut D, (username, password): &Credentials) -> Result<()> {
    // Load the portal home and hand off to the identity provider.
    driver.goto(PORTAL_BASE)?;

    let mut login_btn = driver
        .find(By::Id("btn_logincas"))?
        .ok_or(Error::MissingElement("institutional login button"))?;
    login_btn.click()?;
    wait_for_url(driver, IDP_DOMAIN, LOGIN_TIMEOUT)?;

    // Submit credentials on the identity provider's form.
    let mut username_field = driver
        .find(By::Id("username"))?
        .ok_or(Error::MissingElement("username field"))?;
    username_field.send_keys(username)?;

    let mut password_field = driver
        .find(By::Id("user_pass"))?
        .ok_or(Error::MissingElement("password field"))?;
    password_field.send_keys(password.as_ref())?;

    let mut auth_btn = driver
        .find(By::Id("wp-submit"))?
        .ok_or(Error::MissingElement("authenticate button"))?;
    auth_btn.click()?;
    wait_for_url(driver, PORTAL_DOMAIN, LOGIN_TIMEOUT)?;

    info!("Authenticated as {}", username);
    Ok(())
}

/// A password, wrapped so we don't print it by accident.
#[derive(Clone, Serialize, Deserialize)]
pub struct Password(String);

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Password (******)")
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Password(value)
    }
}

impl From<Password> for String {
    fn from(val: Password) -> Self {
        val.0
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::from("hunter2".to_string());
        assert_eq!(format!("{:?}", password), "Password (******)");
    }

    #[test]
    fn password_roundtrips() {
        let password = Password::from("hunter2".to_string());
        assert_eq!(password.as_ref(), "hunter2");
        assert_eq!(String::from(password), "hunter2");
    }
}
