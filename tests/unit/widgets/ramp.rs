use serde_json::json;

use super::*;
use crate::handler::testing::with_request;
use crate::render::canvas::Rgba8Canvas;
use crate::scheduler::metadata::MetadataStore;

fn ramp(v: serde_json::Value) -> Ramp {
    serde_json::from_value(v).unwrap()
}

#[test]
fn endpoints_hit_both_colours() {
    let r = ramp(json!({ "from": [0, 0, 0], "to": [255, 255, 255] }));
    assert_eq!(r.direction, RampDirection::Horizontal);
    assert_eq!(r.colour_at(0, 8), Rgba8::opaque(0, 0, 0));
    assert_eq!(r.colour_at(7, 8), Rgba8::opaque(255, 255, 255));
    let mid = r.colour_at(4, 9);
    assert_eq!(mid, Rgba8::opaque(128, 128, 128));
}

#[test]
fn steps_quantise_into_bands() {
    let r = ramp(json!({ "from": [0, 0, 0], "to": [255, 0, 0], "steps": 2 }));
    let got: Vec<u8> = (0..8).map(|p| r.colour_at(p, 8).r).collect();
    assert_eq!(got, vec![0, 0, 0, 0, 255, 255, 255, 255]);
}

#[test]
fn vertical_ramp_is_constant_along_rows() {
    let props = json!({ "from": [0, 0, 0], "to": [0, 0, 255], "direction": "vertical" });
    let r = ramp(props.clone());
    let store = MetadataStore::new();
    let mut resp = Response::new(Rgba8Canvas::new(8, 4));
    with_request("builtin.ramp", "r", &props, &store, |req| r.handle(&mut resp, req));

    let c = resp.canvas();
    assert_eq!(c.pixel(0, 0), c.pixel(7, 0));
    assert_eq!(c.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(c.pixel(3, 3), Some([0, 0, 255, 255]));
}

#[test]
fn single_step_is_rejected() {
    let props = json!({ "from": [0, 0, 0], "to": [0, 0, 255], "steps": 1 });
    let r = ramp(props.clone());
    let store = MetadataStore::new();
    let mut resp = Response::new(Rgba8Canvas::new(8, 4));
    with_request("builtin.ramp", "r", &props, &store, |req| r.handle(&mut resp, req));
    assert_eq!(resp.status(), StatusCode::BadRequest);
    assert_eq!(resp.canvas().pixel(0, 0), Some([0, 0, 0, 0]));
}
