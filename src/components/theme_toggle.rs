//! Theme toggle button component.

use dioxus::prelude::*;

use crate::theme::{Icon, Theme};

const SUN_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><circle cx="12" cy="12" r="5"/><line x1="12" y1="1" x2="12" y2="3"/><line x1="12" y1="21" x2="12" y2="23"/><line x1="4.22" y1="4.22" x2="5.64" y2="5.64"/><line x1="18.36" y1="18.36" x2="19.78" y2="19.78"/><line x1="1" y1="12" x2="3" y2="12"/><line x1="21" y1="12" x2="23" y2="12"/><line x1="4.22" y1="19.78" x2="5.64" y2="18.36"/><line x1="18.36" y1="5.64" x2="19.78" y2="4.22"/></svg>"#;

const MOON_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M21 12.79A9 9 0 1 1 11.21 3 7 7 0 0 0 21 12.79z"/></svg>"#;

#[derive(Props, Clone, PartialEq)]
pub struct ThemeToggleProps {
    /// Accessible label and tooltip
    #[props(default = "Toggle dark mode".to_string())]
    pub label: String,
    /// Theme known at render time. Pre-hides the wrong icon so the button
    /// does not flash before the controller syncs it.
    #[props(default)]
    pub theme: Option<Theme>,
}

/// Inline `display` styles for the (sun, moon) icons.
///
/// With no known theme both are left to the stylesheet.
pub fn icon_styles(theme: Option<Theme>) -> (&'static str, &'static str) {
    match theme.map(|t| t.icon()) {
        Some(Icon::Sun) => ("display: block", "display: none"),
        Some(Icon::Moon) => ("display: none", "display: block"),
        None => ("", ""),
    }
}

/// Button the theme controller binds to: `.theme-toggle` with `.sun-icon`
/// and `.moon-icon` children. Events are wired by the controller, not here.
#[component]
pub fn ThemeToggle(props: ThemeToggleProps) -> Element {
    let (sun_style, moon_style) = icon_styles(props.theme);

    rsx! {
        button {
            r#type: "button",
            class: "theme-toggle",
            tabindex: "0",
            title: "{props.label}",
            "aria-label": "{props.label}",
            span { class: "sun-icon", style: "{sun_style}", dangerous_inner_html: SUN_SVG }
            span { class: "moon-icon", style: "{moon_style}", dangerous_inner_html: MOON_SVG }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_page_shows_sun() {
        assert_eq!(
            icon_styles(Some(Theme::Dark)),
            ("display: block", "display: none")
        );
    }

    #[test]
    fn light_page_shows_moon() {
        assert_eq!(
            icon_styles(Some(Theme::Light)),
            ("display: none", "display: block")
        );
    }

    #[test]
    fn unknown_theme_leaves_icons_to_css() {
        assert_eq!(icon_styles(None), ("", ""));
    }

    fn render(theme: Option<Theme>) -> String {
        dioxus_ssr::render_element(rsx! {
            ThemeToggle { label: "Toggle dark mode".to_string(), theme }
        })
    }

    /// Byte offset of `needle` at or after `from`.
    fn find_from(html: &str, from: usize, needle: &str) -> usize {
        match html[from..].find(needle) {
            Some(idx) => from + idx,
            None => panic!("{needle:?} not found after byte {from} in:\n{html}"),
        }
    }

    #[test]
    fn renders_markup_the_controller_binds_to() {
        let html = render(None);

        assert!(html.starts_with("<button"), "{html}");
        assert!(html.contains(r#"class="theme-toggle""#), "{html}");
        assert!(html.contains(r#"type="button""#), "{html}");
        assert!(html.contains(r#"aria-label="Toggle dark mode""#), "{html}");
        assert!(html.contains(r#"title="Toggle dark mode""#), "{html}");
        assert!(html.contains(r#"class="sun-icon""#), "{html}");
        assert!(html.contains(r#"class="moon-icon""#), "{html}");
        assert!(html.contains("<svg"), "{html}");
        assert!(!html.contains("display:"), "{html}");
    }

    #[test]
    fn dark_render_shows_sun_and_hides_moon() {
        let html = render(Some(Theme::Dark));

        let sun = find_from(&html, 0, "sun-icon");
        let sun_style = find_from(&html, sun, "display: block");
        let moon = find_from(&html, sun_style, "moon-icon");
        find_from(&html, moon, "display: none");
    }

    #[test]
    fn light_render_shows_moon_and_hides_sun() {
        let html = render(Some(Theme::Light));

        let sun = find_from(&html, 0, "sun-icon");
        let sun_style = find_from(&html, sun, "display: none");
        let moon = find_from(&html, sun_style, "moon-icon");
        find_from(&html, moon, "display: block");
    }
}
