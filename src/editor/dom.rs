//! Element measurement.

use web_sys::HtmlElement;

use crate::types::ElementGeometry;

/// Measure a rendered block element.
///
/// `offset_left` is document-relative (viewport left plus horizontal scroll),
/// `position_left` is relative to the offset parent.
pub(crate) fn measure(element: &HtmlElement) -> ElementGeometry {
    let rect = element.get_bounding_client_rect();
    let scroll_x = web_sys::window()
        .and_then(|w| w.scroll_x().ok())
        .unwrap_or(0.0);
    ElementGeometry::new(
        rect.left() + scroll_x,
        f64::from(element.offset_left()),
        rect.width(),
    )
}
