use serde_json::json;

use super::*;
use crate::handler::testing::with_request;
use crate::render::canvas::Rgba8Canvas;
use crate::scheduler::metadata::MetadataStore;
use crate::schema::FieldKind;

type Log = Arc<Mutex<Vec<String>>>;

fn tagging(tag: &'static str, log: Log) -> Arc<dyn Middleware> {
    Arc::new(move |next: Arc<dyn Handler>| -> Arc<dyn Handler> {
        let log = Arc::clone(&log);
        Arc::new(move |resp: &mut Response, req: &Request<'_>| {
            log.lock().push(format!("{tag}:in"));
            next.handle(resp, req);
            log.lock().push(format!("{tag}:out"));
        })
    })
}

fn run(handler: &Arc<dyn Handler>, props: serde_json::Value) -> Response {
    let store = MetadataStore::new();
    let mut resp = Response::new(Rgba8Canvas::new(1, 1));
    with_request("t", "w", &props, &store, |req| handler.handle(&mut resp, req));
    resp
}

#[test]
fn first_middleware_is_outermost() {
    let log: Log = Arc::default();
    let terminal_log = Arc::clone(&log);
    let terminal: Arc<dyn Handler> = Arc::new(move |_: &mut Response, _: &Request<'_>| {
        terminal_log.lock().push("handler".to_string());
    });
    let mws = vec![tagging("a", Arc::clone(&log)), tagging("b", Arc::clone(&log))];
    let h = chain(&mws, terminal);
    run(&h, json!({}));
    assert_eq!(
        *log.lock(),
        vec!["a:in", "b:in", "handler", "b:out", "a:out"]
    );
}

#[test]
fn empty_chain_is_terminal() {
    let terminal: Arc<dyn Handler> = Arc::new(|resp: &mut Response, _: &Request<'_>| {
        resp.write(StatusCode::SuccessWithWarning, "done");
    });
    let h = chain(&[], terminal);
    assert_eq!(run(&h, json!({})).status(), StatusCode::SuccessWithWarning);
}

#[test]
fn validation_short_circuits_terminal() {
    let called = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&called);
    let terminal: Arc<dyn Handler> = Arc::new(move |_: &mut Response, _: &Request<'_>| {
        *flag.lock() = true;
    });
    let schema = Arc::new(WidgetSchema::new().required("colour", FieldKind::Colour));
    let validation: Arc<dyn Middleware> = Arc::new(ValidationMiddleware::new(schema));
    let h = chain(&[validation], terminal);

    let resp = run(&h, json!({"colour": "red"}));
    assert_eq!(resp.status(), StatusCode::ValidationFailed);
    assert!(resp.message().contains("$.colour: must be a colour"));
    assert!(!*called.lock());

    let resp = run(&h, json!({"colour": [1, 2, 3]}));
    assert_eq!(resp.status(), StatusCode::Success);
    assert!(*called.lock());
}

#[test]
fn outer_middleware_sees_validation_failure() {
    let seen = Arc::new(Mutex::new(None));
    let seen_in = Arc::clone(&seen);
    let observer: Arc<dyn Middleware> = Arc::new(move |next: Arc<dyn Handler>| -> Arc<dyn Handler> {
        let seen = Arc::clone(&seen_in);
        Arc::new(move |resp: &mut Response, req: &Request<'_>| {
            next.handle(resp, req);
            *seen.lock() = Some(resp.status());
        })
    });
    let schema = Arc::new(WidgetSchema::new());
    let terminal: Arc<dyn Handler> = Arc::new(|_: &mut Response, _: &Request<'_>| {});
    let mws: Vec<Arc<dyn Middleware>> =
        vec![observer, Arc::new(ValidationMiddleware::new(schema))];
    let h = chain(&mws, terminal);
    run(&h, json!({"unexpected": 1}));
    assert_eq!(*seen.lock(), Some(StatusCode::ValidationFailed));
}

#[test]
fn profiling_records_each_call() {
    let profiler = ProfilingMiddleware::new();
    let terminal: Arc<dyn Handler> = Arc::new(|_: &mut Response, _: &Request<'_>| {});
    let mws: Vec<Arc<dyn Middleware>> = vec![Arc::new(profiler.clone())];
    let h = chain(&mws, terminal);
    run(&h, json!({}));
    run(&h, json!({}));
    let timings = profiler.timings();
    assert_eq!(timings.len(), 2);
    assert_eq!(timings[0].alias, "w");
    assert_eq!(timings[0].widget_type, "t");
    profiler.reset();
    assert!(profiler.timings().is_empty());
}

#[test]
fn logging_and_tracing_pass_status_through() {
    let terminal: Arc<dyn Handler> = Arc::new(|resp: &mut Response, _: &Request<'_>| {
        resp.write(StatusCode::HandlerError, "boom");
    });
    let mws: Vec<Arc<dyn Middleware>> = vec![Arc::new(LoggingMiddleware), Arc::new(TracingMiddleware)];
    let h = chain(&mws, terminal);
    let resp = run(&h, json!({}));
    assert_eq!(resp.status(), StatusCode::HandlerError);
    assert_eq!(resp.message(), "boom");
}
