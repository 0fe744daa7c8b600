//! Hash-based routing.
//!
//! The location fragment is the only source of truth for the current screen: navigation
//! writes `#/<route>` to a [`Location`], and [`Router::sync`] reads it back and re-derives the
//! [`Route`]. On the web the location is `window.location.hash`; natively (and in tests) it is
//! an in-memory string.

use std::fmt;

/// The screen selected by the location fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Dashboard,
    Directory,
    Settings,
    About,
    /// Detail page for a component id; the id is not validated against the catalog here
    ComponentDetail(String),
}

/// Pages reachable by name from the terminal `goto` command.
pub const NAMED_PAGES: [&str; 4] = ["dashboard", "directory", "settings", "about"];

impl Route {
    /// Parses a location fragment such as `#/directory` or `#/component/gpu`.
    ///
    /// Empty or unrecognized fragments yield [`Route::Dashboard`].
    pub fn from_fragment(fragment: &str) -> Self {
        let path = fragment
            .strip_prefix("#/")
            .or_else(|| fragment.strip_prefix('#'))
            .unwrap_or(fragment);
        let path = path.strip_prefix('/').unwrap_or(path);

        let mut parts = path.splitn(2, '/');
        match (parts.next().unwrap_or(""), parts.next()) {
            ("component", Some(id)) if !id.is_empty() => Self::ComponentDetail(id.to_string()),
            (page, None) => Self::from_page_name(page).unwrap_or_default(),
            _ => Self::Dashboard,
        }
    }

    /// Resolves one of the fixed page names; `None` for anything else.
    pub fn from_page_name(name: &str) -> Option<Self> {
        match name {
            "dashboard" => Some(Self::Dashboard),
            "directory" => Some(Self::Directory),
            "settings" => Some(Self::Settings),
            "about" => Some(Self::About),
            _ => None,
        }
    }

    /// Path form of the route, without the `#/` prefix.
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "dashboard".to_string(),
            Self::Directory => "directory".to_string(),
            Self::Settings => "settings".to_string(),
            Self::About => "about".to_string(),
            Self::ComponentDetail(id) => format!("component/{id}"),
        }
    }

    /// Fragment form of the route, as written to the location.
    pub fn fragment(&self) -> String {
        format!("#/{}", self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Read/write access to a location fragment.
pub trait Location {
    /// Current fragment, including the leading `#` when present.
    fn fragment(&self) -> String;

    /// Replaces the fragment.
    fn set_fragment(&mut self, fragment: &str);
}

/// A location held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    fragment: String,
}

impl MemoryLocation {
    /// Creates a location with an initial fragment.
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }
}

impl Location for MemoryLocation {
    fn fragment(&self) -> String {
        self.fragment.clone()
    }

    fn set_fragment(&mut self, fragment: &str) {
        self.fragment = fragment.to_string();
    }
}

/// The browser's `window.location.hash`.
#[cfg(target_arch = "wasm32")]
pub struct BrowserLocation {
    _listener: Option<wasm_bindgen::closure::Closure<dyn FnMut(web_sys::HashChangeEvent)>>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserLocation {
    /// Wraps the window location and requests a repaint on every `hashchange`, so back/forward
    /// navigation is picked up without waiting for other input.
    pub fn new(ctx: &egui::Context) -> Self {
        use wasm_bindgen::JsCast;

        let ctx = ctx.clone();
        let listener = wasm_bindgen::closure::Closure::wrap(Box::new(
            move |_event: web_sys::HashChangeEvent| {
                ctx.request_repaint();
            },
        )
            as Box<dyn FnMut(_)>);
        let registered = web_sys::window()
            .map(|window| {
                window
                    .add_event_listener_with_callback("hashchange", listener.as_ref().unchecked_ref())
                    .is_ok()
            })
            .unwrap_or(false);
        if !registered {
            log::warn!("Could not register hashchange listener");
        }
        Self {
            _listener: Some(listener),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl Location for BrowserLocation {
    fn fragment(&self) -> String {
        web_sys::window()
            .and_then(|window| window.location().hash().ok())
            .unwrap_or_default()
    }

    fn set_fragment(&mut self, fragment: &str) {
        if let Some(window) = web_sys::window() {
            if let Err(err) = window.location().set_hash(fragment) {
                log::warn!("Failed to set location hash: {err:?}");
            }
        }
    }
}

/// Derives the current route from a [`Location`].
pub struct Router {
    location: Box<dyn Location>,
    current: Route,
    last_fragment: Option<String>,
}

impl Router {
    /// Creates a router and reads the initial route from the location.
    pub fn new(location: Box<dyn Location>) -> Self {
        let mut router = Self {
            location,
            current: Route::Dashboard,
            last_fragment: None,
        };
        router.sync();
        router
    }

    /// Current route.
    pub fn current(&self) -> &Route {
        &self.current
    }

    /// Writes the route to the location. The current route only changes on the next
    /// [`sync`](Self::sync).
    pub fn navigate(&mut self, route: &Route) {
        self.location.set_fragment(&route.fragment());
    }

    /// Re-reads the fragment.
    ///
    /// # Returns
    ///
    /// The new route when the fragment changed since the previous sync, otherwise `None`.
    pub fn sync(&mut self) -> Option<Route> {
        let fragment = self.location.fragment();
        if self.last_fragment.as_deref() == Some(fragment.as_str()) {
            return None;
        }
        self.current = Route::from_fragment(&fragment);
        self.last_fragment = Some(fragment);
        Some(self.current.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_pages() {
        assert_eq!(Route::from_fragment("#/directory"), Route::Directory);
        assert_eq!(Route::from_fragment("#/settings"), Route::Settings);
        assert_eq!(Route::from_fragment("#/about"), Route::About);
        assert_eq!(Route::from_fragment("#/dashboard"), Route::Dashboard);
    }

    #[test]
    fn unknown_or_empty_fragment_is_dashboard() {
        for fragment in ["", "#", "#/", "#/nowhere", "#/settings/extra", "#/component", "#/component/"] {
            assert_eq!(Route::from_fragment(fragment), Route::Dashboard, "{fragment:?}");
        }
    }

    #[test]
    fn component_fragment_captures_free_form_id() {
        assert_eq!(
            Route::from_fragment("#/component/xyz"),
            Route::ComponentDetail("xyz".into())
        );
        assert_eq!(
            Route::from_fragment("#/component/not/in/catalog"),
            Route::ComponentDetail("not/in/catalog".into())
        );
    }

    #[test]
    fn fragment_round_trips_through_path() {
        let route = Route::ComponentDetail("gpu".into());
        assert_eq!(route.fragment(), "#/component/gpu");
        assert_eq!(Route::from_fragment(&route.fragment()), route);
    }

    #[test]
    fn navigation_only_takes_effect_on_sync() {
        let mut router = Router::new(Box::new(MemoryLocation::default()));
        assert_eq!(router.current(), &Route::Dashboard);

        router.navigate(&Route::About);
        assert_eq!(router.current(), &Route::Dashboard);

        assert_eq!(router.sync(), Some(Route::About));
        assert_eq!(router.current(), &Route::About);
        assert_eq!(router.sync(), None);
    }

    #[test]
    fn initial_route_comes_from_location() {
        let router = Router::new(Box::new(MemoryLocation::new("#/component/ram")));
        assert_eq!(router.current(), &Route::ComponentDetail("ram".into()));
    }
}
