mod grid;
mod http;
mod viewport;

pub use self::grid::{Grid, GridOperation};
pub use self::http::{
    Http, HttpError, HttpHeaders, HttpMethod, HttpRequest, HttpResponse, HttpResult,
};
pub use self::viewport::{Viewport, ViewportOperation};

/// Render capability re-export.
///
/// We use Crux's built-in Render capability directly because it provides
/// all necessary functionality for triggering view updates.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub render: Render<Event>,
    pub viewport: Viewport<Event>,
    pub grid: Grid<Event>,
}
