//! A scripted in-memory driver for exercising the harvest flows without a
//! browser.
//!
//! Pages are registered up front, keyed by address. Navigation is instant:
//! `goto` moves the address bar immediately, so every poll in the code
//! under test succeeds on its first evaluation. Addresses can also be
//! registered as downloads, which deposit a file on disk when navigated to.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use minerva_client::{By, Driver, DriverError, Element};

/// One element on a scripted page.
#[derive(Clone, Default)]
pub struct ElementSpec {
    pub tag: String,
    pub id: String,
    pub class: String,
    pub name: String,
    pub href: Option<String>,
    pub text: String,
    pub color: String,
    /// Address the browser ends up at when this element is clicked.
    pub goto_on_click: Option<String>,
}

impl ElementSpec {
    pub fn link(href: &str, text: &str) -> Self {
        Self {
            tag: "a".into(),
            href: Some(href.into()),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn input(id: &str) -> Self {
        Self {
            tag: "input".into(),
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn select(name: &str) -> Self {
        Self {
            tag: "select".into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn heading(text: &str) -> Self {
        Self {
            tag: "h1".into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn italic_td(text: &str) -> Self {
        Self {
            tag: "td".into(),
            class: "italic".into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_click_goto(mut self, url: &str) -> Self {
        self.goto_on_click = Some(url.into());
        self
    }
}

#[derive(Default)]
struct State {
    url: String,
    pages: HashMap<String, Vec<ElementSpec>>,
    /// Addresses that deposit a file when navigated to.
    downloads: HashMap<String, (PathBuf, Vec<u8>)>,
    visited: Vec<String>,
    clicked: Vec<String>,
    typed: Vec<(String, String)>,
    selected: Vec<String>,
    accepted_alerts: usize,
}

#[derive(Default)]
pub struct FakeDriver {
    state: Rc<RefCell<State>>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the elements served at `url`.
    pub fn page(&self, url: &str, elements: Vec<ElementSpec>) {
        self.state.borrow_mut().pages.insert(url.into(), elements);
    }

    /// Registers `url` as a download that writes `bytes` to `to`.
    pub fn download(&self, url: &str, to: &Path, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .downloads
            .insert(url.into(), (to.to_path_buf(), bytes.to_vec()));
    }

    pub fn visited(&self) -> Vec<String> {
        self.state.borrow().visited.clone()
    }

    pub fn clicked(&self) -> Vec<String> {
        self.state.borrow().clicked.clone()
    }

    pub fn typed(&self) -> Vec<(String, String)> {
        self.state.borrow().typed.clone()
    }

    pub fn selected(&self) -> Vec<String> {
        self.state.borrow().selected.clone()
    }

    pub fn accepted_alerts(&self) -> usize {
        self.state.borrow().accepted_alerts
    }
}

pub struct FakeElement {
    state: Rc<RefCell<State>>,
    spec: ElementSpec,
}

impl Driver for FakeDriver {
    type Elem = FakeElement;

    fn goto(&mut self, url: &str) -> Result<(), DriverError> {
        let mut state = self.state.borrow_mut();
        state.url = url.to_string();
        state.visited.push(url.to_string());
        if let Some((to, bytes)) = state.downloads.get(url) {
            fs::write(to, bytes)
                .map_err(|e| DriverError::new(format!("writing download: {}", e)))?;
        }
        Ok(())
    }

    fn current_url(&self) -> Result<String, DriverError> {
        Ok(self.state.borrow().url.clone())
    }

    fn find_all(&self, by: By) -> Result<Vec<FakeElement>, DriverError> {
        let state = self.state.borrow();
        let elements = state.pages.get(&state.url).cloned().unwrap_or_default();
        Ok(elements
            .into_iter()
            .filter(|spec| match by {
                By::Id(id) => spec.id == id,
                By::Tag(tag) => spec.tag == tag,
                By::Class(class) => spec.class.split_whitespace().any(|c| c == class),
            })
            .map(|spec| FakeElement {
                state: Rc::clone(&self.state),
                spec,
            })
            .collect())
    }

    fn accept_alert(&mut self) -> Result<(), DriverError> {
        self.state.borrow_mut().accepted_alerts += 1;
        Ok(())
    }
}

impl Element for FakeElement {
    fn attr(&self, name: &str) -> Result<Option<String>, DriverError> {
        Ok(match name {
            "href" => self.spec.href.clone(),
            "id" if !self.spec.id.is_empty() => Some(self.spec.id.clone()),
            "name" if !self.spec.name.is_empty() => Some(self.spec.name.clone()),
            "class" if !self.spec.class.is_empty() => Some(self.spec.class.clone()),
            _ => None,
        })
    }

    fn text(&self) -> Result<String, DriverError> {
        Ok(self.spec.text.clone())
    }

    fn tag_name(&self) -> Result<String, DriverError> {
        Ok(self.spec.tag.clone())
    }

    fn css_value(&self, prop: &str) -> Result<String, DriverError> {
        Ok(match prop {
            "color" => self.spec.color.clone(),
            _ => String::new(),
        })
    }

    fn click(&mut self) -> Result<(), DriverError> {
        let mut state = self.state.borrow_mut();
        state.clicked.push(self.spec.id.clone());
        if let Some(url) = &self.spec.goto_on_click {
            state.url = url.clone();
            state.visited.push(url.clone());
        }
        Ok(())
    }

    fn send_keys(&mut self, text: &str) -> Result<(), DriverError> {
        self.state
            .borrow_mut()
            .typed
            .push((self.spec.id.clone(), text.to_string()));
        Ok(())
    }

    fn select_by_label(&mut self, label: &str) -> Result<(), DriverError> {
        if self.spec.tag != "select" {
            return Err(DriverError::new("select_by_label on a non-select element"));
        }
        self.state.borrow_mut().selected.push(label.to_string());
        Ok(())
    }
}
