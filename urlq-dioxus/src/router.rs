//! History backed by the Dioxus router

use dioxus::prelude::{navigator, router};
use urlq_core::{Location, LocationSource, Navigator};

/// Reads the current route from the Dioxus router and navigates through it.
///
/// Must be used inside a `Router`. The router re-renders routed components on
/// navigation, so hooks under it also see URL changes made by links.
#[derive(Clone, Copy, Debug, Default)]
pub struct RouterHistory;

impl LocationSource for RouterHistory {
    fn location(&self) -> Location {
        Location::parse(&router().full_route_string())
    }
}

impl Navigator for RouterHistory {
    fn push(&self, location: &Location) {
        navigator().push(location.to_string());
    }

    fn replace(&self, location: &Location) {
        navigator().replace(location.to_string());
    }
}
