use super::*;
use crate::handler::middleware::ProfilingMiddleware;
use crate::handler::request::{Request, Response};
use crate::handler::status::StatusCode;

const CARD: &str = r#"{
  "canvas": { "width": 40, "height": 20, "grid": { "rows": 2, "columns": 4 }, "background": [0, 0, 0] },
  "frames": [
    {
      "name": "main",
      "widgets": [
        { "alias": "bg", "type": "builtin.canvas", "location": "A0", "props": { "background": [0, 0, 80] } },
        { "alias": "left", "type": "builtin.fill", "location": "A0:B1", "props": { "colour": [255, 0, 0] } },
        { "alias": "right", "type": "builtin.swatch", "location": "C0:D1",
          "props": { "source": "left", "path": "colour" } },
        { "alias": "ghost", "type": "custom.missing", "location": "A0" }
      ]
    },
    {
      "name": "second",
      "widgets": [
        { "alias": "stamp", "type": "test.stamp", "location": "D1" }
      ]
    }
  ]
}"#;

#[derive(serde::Deserialize)]
struct Stamp {}

impl Handler for Stamp {
    fn handle(&self, resp: &mut Response, req: &Request<'_>) {
        resp.canvas_mut().fill([0, 255, 0, 255]);
        resp.write(StatusCode::SuccessWithWarning, format!("{} stamped", req.alias));
    }
}

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "opentsg_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn engine() -> OpenTsg {
    let mut tsg = OpenTsg::new(TestCard::from_json_str(CARD).unwrap()).unwrap();
    tsg.register_handler::<Stamp>("test.stamp", None).unwrap();
    tsg
}

#[test]
fn render_frame_composites_and_counts_errors() {
    let tsg = engine();
    let report = tsg.render_frame(0).unwrap();
    assert_eq!(report.name, "main");
    assert_eq!(report.error_count, 1, "only the unknown widget type counts");

    let status: Vec<StatusCode> = report.outcomes.iter().map(|o| o.status).collect();
    assert_eq!(
        status,
        vec![
            StatusCode::Skipped,
            StatusCode::Success,
            StatusCode::Success,
            StatusCode::WidgetNotFound
        ]
    );
    assert!(!report.outcomes[0].composited);

    assert_eq!(report.canvas.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(report.canvas.pixel(35, 15), Some([255, 0, 0, 255]));
}

#[test]
fn placeholder_background_fills_untouched_pixels() {
    let tsg = engine();
    let report = tsg.render_frame(1).unwrap();
    assert_eq!(report.error_count, 0);
    assert_eq!(report.outcomes[0].status, StatusCode::SuccessWithWarning);
    assert_eq!(report.canvas.pixel(0, 0), Some([0, 0, 0, 255]));
    assert_eq!(report.canvas.pixel(35, 15), Some([0, 255, 0, 255]));
}

#[test]
fn duplicate_registration_fails() {
    let mut tsg = engine();
    let err = tsg.register_handler::<Stamp>("builtin.fill", None).unwrap_err();
    assert!(matches!(err, TsgError::Registration(_)));
}

#[test]
fn middlewares_see_every_widget() {
    let mut tsg = engine();
    let profiler = ProfilingMiddleware::new();
    tsg.use_middleware(profiler.clone());
    tsg.render_frame(0).unwrap();
    let mut seen: Vec<String> = profiler.timings().into_iter().map(|t| t.alias).collect();
    seen.sort();
    assert_eq!(seen, vec!["bg", "ghost", "left", "right"]);
}

#[test]
fn run_writes_pngs_and_report() {
    let dir = temp_dir("engine_run");
    let summary = engine().run(&dir).unwrap();
    assert_eq!(summary.frames.len(), 2);
    assert_eq!(summary.total_errors, 1);

    let png = image::open(dir.join("main.png")).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (40, 20));
    assert_eq!(png.get_pixel(5, 5).0, [255, 0, 0, 255]);
    assert!(dir.join("second.png").exists());

    let report: serde_json::Value =
        serde_json::from_slice(&std::fs::read(dir.join("report.json")).unwrap()).unwrap();
    assert_eq!(report["total_errors"], 1);
    assert_eq!(report["frames"][0]["outcomes"][3]["status"], 404);
    let _ = std::fs::remove_dir_all(&dir);
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<parking_lot::Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

fn render_with_logs(tsg: &OpenTsg) -> String {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, || tsg.render_frame(0).unwrap());
    let bytes = logs.0.lock().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn unknown_type_is_logged_once_by_default() {
    let text = render_with_logs(&engine());
    let line = "no handler registered for widget type 'custom.missing' (widget 'ghost')";
    assert_eq!(text.matches(line).count(), 1, "{text}");
}

#[test]
fn cleared_middlewares_log_nothing_per_widget() {
    let mut tsg = engine();
    tsg.clear_middlewares();
    let text = render_with_logs(&tsg);
    assert!(!text.contains("custom.missing"), "{text}");
}
