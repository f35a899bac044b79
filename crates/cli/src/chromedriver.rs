//! [`Driver`] implementation speaking the W3C WebDriver wire protocol to a
//! local chromedriver.
//!
//! Only the handful of endpoints the harvesting core needs are covered.
//! Chrome is pointed at the output root as its download directory, which is
//! what makes the staging-path scheme work.

use std::path::Path;
use std::time::Duration;

use minerva_client::{By, Driver, DriverError, Element};
use serde_json::{json, Value};
use ureq::Agent;

/// Where chromedriver listens by default.
const CHROMEDRIVER_URL: &str = "http://localhost:9515";

/// Key element handles are returned under in WebDriver responses.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

pub struct ChromeDriver {
    http: Agent,
    /// `http://…/session/<id>`
    session: String,
}

impl ChromeDriver {
    /// Starts a Chrome session that downloads into `download_dir`.
    pub fn launch(download_dir: &Path) -> Result<Self, DriverError> {
        let http = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(120))
            .build();

        let resp: Value = http
            .post(&format!("{}/session", CHROMEDRIVER_URL))
            .send_json(capabilities(download_dir))
            .map_err(wire)?
            .into_json()
            .map_err(body)?;

        let session_id = resp["value"]["sessionId"]
            .as_str()
            .ok_or_else(|| DriverError::new(format!("no session id in response: {}", resp)))?;

        Ok(Self {
            session: format!("{}/session/{}", CHROMEDRIVER_URL, session_id),
            http,
        })
    }

    fn get(&self, path: &str) -> Result<Value, DriverError> {
        self.http
            .get(&format!("{}{}", self.session, path))
            .call()
            .map_err(wire)?
            .into_json()
            .map_err(body)
    }

    fn post(&self, path: &str, payload: Value) -> Result<Value, DriverError> {
        self.http
            .post(&format!("{}{}", self.session, path))
            .send_json(payload)
            .map_err(wire)?
            .into_json()
            .map_err(body)
    }

    fn element(&self, id: &str) -> ChromeElement {
        ChromeElement {
            http: self.http.clone(),
            session: self.session.clone(),
            id: id.to_string(),
        }
    }
}

fn capabilities(download_dir: &Path) -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": {
                    "args": ["--no-sandbox", "--disable-dev-shm-usage"],
                    "prefs": {
                        "download.default_directory": download_dir.display().to_string(),
                    }
                }
            }
        }
    })
}

/// WebDriver element-location strategy for a selector.
fn strategy(by: By) -> (&'static str, String) {
    match by {
        By::Id(id) => ("css selector", format!("[id='{}']", id)),
        By::Tag(tag) => ("tag name", tag.to_string()),
        By::Class(class) => ("css selector", format!(".{}", class)),
    }
}

fn wire(e: ureq::Error) -> DriverError {
    DriverError::new(format!("webdriver request failed: {}", e))
}

fn body(e: std::io::Error) -> DriverError {
    DriverError::new(format!("webdriver response unreadable: {}", e))
}

impl Driver for ChromeDriver {
    type Elem = ChromeElement;

    fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        self.post("/url", json!({ "url": url }))?;
        Ok(())
    }

    fn current_url(&self) -> Result<String, DriverError> {
        let resp = self.get("/url")?;
        resp["value"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DriverError::new(format!("no url in response: {}", resp)))
    }

    fn find_all(&self, by: By) -> Result<Vec<ChromeElement>, DriverError> {
        let (using, value) = strategy(by);
        let resp = self.post("/elements", json!({ "using": using, "value": value }))?;
        let handles = match resp["value"].as_array() {
            Some(handles) => handles,
            None => return Ok(Vec::new()),
        };
        Ok(handles
            .iter()
            .filter_map(|h| h[ELEMENT_KEY].as_str())
            .map(|id| self.element(id))
            .collect())
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        self.post("/alert/accept", json!({}))?;
        Ok(())
    }
}

impl Drop for ChromeDriver {
    fn drop(&mut self) {
        let _ = self.http.delete(&self.session).call();
    }
}

pub struct ChromeElement {
    http: Agent,
    session: String,
    id: String,
}

impl ChromeElement {
    fn url(&self, tail: &str) -> String {
        format!("{}/element/{}{}", self.session, self.id, tail)
    }

    fn get(&self, tail: &str) -> Result<Value, DriverError> {
        self.http
            .get(&self.url(tail))
            .call()
            .map_err(wire)?
            .into_json()
            .map_err(body)
    }

    fn post(&self, tail: &str, payload: Value) -> Result<Value, DriverError> {
        self.http
            .post(&self.url(tail))
            .send_json(payload)
            .map_err(wire)?
            .into_json()
            .map_err(body)
    }

    fn get_string(&self, tail: &str) -> Result<String, DriverError> {
        let resp = self.get(tail)?;
        resp["value"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| DriverError::new(format!("unexpected response: {}", resp)))
    }
}

impl Element for ChromeElement {
    fn attr(&self, name: &str) -> Result<Option<String>, DriverError> {
        let resp = self.get(&format!("/attribute/{}", name))?;
        Ok(resp["value"].as_str().map(str::to_string))
    }

    fn text(&self) -> Result<String, DriverError> {
        self.get_string("/text")
    }

    fn tag_name(&self) -> Result<String, DriverError> {
        self.get_string("/name")
    }

    fn css_value(&self, prop: &str) -> Result<String, DriverError> {
        self.get_string(&format!("/css/{}", prop))
    }

    fn click(&mut self) -> Result<(), DriverError> {
        self.post("/click", json!({}))?;
        Ok(())
    }

    fn send_keys(&mut self, text: &str) -> Result<(), DriverError> {
        self.post("/value", json!({ "text": text }))?;
        Ok(())
    }

    fn select_by_label(&mut self, label: &str) -> Result<(), DriverError> {
        let resp = self.post("/elements", json!({ "using": "tag name", "value": "option" }))?;
        let handles = resp["value"].as_array().cloned().unwrap_or_default();

        for handle in &handles {
            if let Some(id) = handle[ELEMENT_KEY].as_str() {
                let option = ChromeElement {
                    http: self.http.clone(),
                    session: self.session.clone(),
                    id: id.to_string(),
                };
                if option.text()? == label {
                    option.post("/click", json!({}))?;
                    return Ok(());
                }
            }
        }

        Err(DriverError::new(format!("no option labelled {:?}", label)))
    }
}
