//! Routing definitions for the course portal.
use serde::{Deserialize, Serialize};
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Dashboard,
    #[at("/course/:id")]
    Course { id: i64 },
    #[at("/course/:id/edit")]
    CourseEdit { id: i64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}

/// Query string carried by course routes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IndexQuery {
    #[serde(default)]
    pub index: Option<String>,
}
