//! Document root marker and the toggle button.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    CssStyleDeclaration, Document, Element, HtmlElement, KeyboardEvent, MouseEvent, SvgElement,
};

use super::js_error;
use crate::config::ThemeConfig;
use crate::error::ThemeError;
use crate::theme::{Activation, ActivationHandler, Icon, Theme, ThemeSink, ToggleControl};

/// Theme attribute on `<html>`.
pub struct DomDocument {
    root: Element,
    attribute: String,
}

impl DomDocument {
    pub fn new(document: &Document, config: &ThemeConfig) -> Result<Self, ThemeError> {
        let root = document
            .document_element()
            .ok_or_else(|| ThemeError::Dom("document has no root element".into()))?;
        Ok(Self {
            root,
            attribute: config.attribute.clone(),
        })
    }
}

impl ThemeSink for DomDocument {
    fn current(&self) -> Option<String> {
        self.root.get_attribute(&self.attribute)
    }

    fn apply(&self, theme: Theme) -> Result<(), ThemeError> {
        self.root
            .set_attribute(&self.attribute, theme.as_str())
            .map_err(|e| js_error("set theme attribute", e))
    }
}

/// Inline style of an HTML or SVG element.
fn inline_style(element: &Element) -> Option<CssStyleDeclaration> {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        return Some(html.style());
    }
    element.dyn_ref::<SvgElement>().map(|svg| svg.style())
}

struct Icons {
    sun: CssStyleDeclaration,
    moon: CssStyleDeclaration,
}

pub struct DomToggle {
    element: Element,
    style: Option<CssStyleDeclaration>,
    /// Only set when both icons exist
    icons: Option<Icons>,
}

impl DomToggle {
    /// Look up the toggle. `None` when the page has no toggle button.
    pub fn find(document: &Document, config: &ThemeConfig) -> Option<Self> {
        let element = document
            .query_selector(&config.toggle_selector)
            .ok()
            .flatten()?;

        let icon = |selector: &str| {
            element
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| inline_style(&el))
        };
        let icons = match (
            icon(&config.sun_icon_selector),
            icon(&config.moon_icon_selector),
        ) {
            (Some(sun), Some(moon)) => Some(Icons { sun, moon }),
            _ => None,
        };

        Some(Self {
            style: inline_style(&element),
            element,
            icons,
        })
    }
}

impl ToggleControl for DomToggle {
    fn show_icon(&self, icon: Icon) -> Result<(), ThemeError> {
        let Some(icons) = &self.icons else {
            return Ok(());
        };
        let (sun, moon) = match icon {
            Icon::Sun => ("block", "none"),
            Icon::Moon => ("none", "block"),
        };
        icons
            .sun
            .set_property("display", sun)
            .map_err(|e| js_error("sun icon display", e))?;
        icons
            .moon
            .set_property("display", moon)
            .map_err(|e| js_error("moon icon display", e))
    }

    fn set_pressed(&self, pressed: bool) -> Result<(), ThemeError> {
        let Some(style) = &self.style else {
            return Ok(());
        };
        if pressed {
            style
                .set_property("transform", "scale(0.9)")
                .map_err(|e| js_error("toggle transform", e))
        } else {
            style
                .remove_property("transform")
                .map(|_| ())
                .map_err(|e| js_error("toggle transform", e))
        }
    }

    fn on_activate(&self, handler: ActivationHandler) -> Result<(), ThemeError> {
        let handler: Rc<dyn Fn(&Activation) -> bool> = Rc::from(handler);

        let on_click = handler.clone();
        let click = Closure::<dyn FnMut(MouseEvent)>::new(move |_event: MouseEvent| {
            on_click(&Activation::Click);
        });
        self.element
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .map_err(|e| js_error("click listener", e))?;
        click.forget();

        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            // Space would otherwise scroll the page
            if handler(&Activation::Key(event.key())) {
                event.prevent_default();
            }
        });
        self.element
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            .map_err(|e| js_error("keydown listener", e))?;
        keydown.forget();

        Ok(())
    }
}
