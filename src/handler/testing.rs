//! Request fixtures for unit tests.

use serde_json::Value;

use crate::assets::search::LocalSearcher;
use crate::foundation::core::{ColourSpace, Offset};
use crate::handler::request::{Request, RequestParts, RequestServices};
use crate::scheduler::metadata::MetadataStore;

/// Run `f` with a request for widget `alias` of `widget_type` carrying `props`.
pub(crate) fn with_request<R>(
    widget_type: &str,
    alias: &str,
    props: &Value,
    metadata: &MetadataStore,
    f: impl FnOnce(&Request<'_>) -> R,
) -> R {
    let colour_space = ColourSpace("rec709".to_string());
    let searcher = LocalSearcher::default();
    let raw = props.to_string();
    let req = Request::new(
        RequestParts {
            widget_type,
            alias,
            z: 0,
            width: 8,
            height: 4,
            offset: Offset::default(),
            fragments: &[],
            colour_space: &colour_space,
            props,
            raw: raw.as_bytes(),
            source: None,
        },
        RequestServices {
            metadata,
            searcher: &searcher,
        },
    );
    f(&req)
}
