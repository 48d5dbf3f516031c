//! End-to-end runs of the pipeline against canned catalog responses

use indoc::indoc;
use skychart_lib::{
    catalog::{CatalogResponse, CatalogSource, TransportError},
    config::ChartConfig,
    pipeline::{Pipeline, PipelineError, RunOutcome},
    render::{labeled_points, RenderError, Renderer},
    DecimalCoordinate, MainStarSet, PlotDataset,
};
use std::cell::RefCell;

const ORION_RESPONSE: &str = indoc! {r#"
    [
        {"name": "Betelgeuse", "constellation": "Orion", "right_ascension": "05h 55m 10.3053s", "declination": "+07° 24′ 25.4″"},
        {"name": "BadStar", "right_ascension": "garbage", "declination": "+07°24′25″"}
    ]
"#};

struct CannedCatalog {
    response: Option<CatalogResponse>,
    queries: RefCell<Vec<String>>,
}

impl CannedCatalog {
    fn new(status: u16, body: &str) -> Self {
        Self {
            response: Some(CatalogResponse::new(status, body)),
            queries: RefCell::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            response: None,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl CatalogSource for CannedCatalog {
    fn fetch(&self, constellation: &str) -> Result<CatalogResponse, TransportError> {
        self.queries.borrow_mut().push(constellation.to_owned());
        match &self.response {
            Some(r) => Ok(r.clone()),
            // Port 9 (discard) is not expected to accept connections
            None => {
                let err = reqwest::blocking::get("http://127.0.0.1:9/stars").unwrap_err();
                Err(err.into())
            }
        }
    }
}

#[derive(Default)]
struct RecordingRenderer {
    calls: Vec<(PlotDataset, Vec<String>)>,
}

impl Renderer for RecordingRenderer {
    fn render(
        &mut self,
        dataset: &PlotDataset,
        main_stars: &MainStarSet,
    ) -> Result<(), RenderError> {
        let labels = labeled_points(dataset, main_stars)
            .map(|(n, _)| n.to_owned())
            .collect();
        self.calls.push((dataset.clone(), labels));
        Ok(())
    }
}

fn pipeline(catalog: CannedCatalog) -> Pipeline<CannedCatalog> {
    Pipeline::new(catalog, &ChartConfig::new("test-key"))
}

#[test]
fn plots_valid_stars_and_skips_bad_ones() {
    let p = pipeline(CannedCatalog::new(200, ORION_RESPONSE));
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.records, 2);
    assert_eq!(report.outcome, RunOutcome::Plotted(1));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "BadStar");
    assert_eq!(report.failures[0].right_ascension, "garbage");

    assert_eq!(renderer.calls.len(), 1);
    let (dataset, labels) = &renderer.calls[0];
    assert_eq!(dataset.names(), &["Betelgeuse"]);
    assert_eq!(labels, &["Betelgeuse"]);

    let (_, c) = dataset.points().next().unwrap();
    assert!((c.x - 88.7929).abs() < 1e-3);
    assert!((c.y - 7.4071).abs() < 1e-3);
}

#[test]
fn queries_the_configured_constellation() {
    let mut cfg = ChartConfig::new("test-key");
    cfg.constellation = "cygnus".to_owned();
    cfg.main_stars = MainStarSet::new(["Deneb"]);
    let p = Pipeline::new(CannedCatalog::new(200, "[]"), &cfg);

    p.run(&mut RecordingRenderer::default()).unwrap();
    assert_eq!(*p.catalog().queries.borrow(), vec!["cygnus".to_owned()]);
    assert!(p.main_stars().contains("Deneb"));
    assert!(!p.main_stars().contains("Rigel"));
}

#[test]
fn server_error_is_fatal() {
    let p = pipeline(CannedCatalog::new(500, "Internal Server Error"));
    let mut renderer = RecordingRenderer::default();

    let err = p.run(&mut renderer).unwrap_err();
    match &err {
        PipelineError::Status { status, body } => {
            assert_eq!(*status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        e => panic!("Unexpected error {e:?}"),
    }
    assert_eq!(err.exit_code(), 4);
    assert!(renderer.calls.is_empty());
}

#[test]
fn rejected_api_key_is_a_protocol_error() {
    let p = pipeline(CannedCatalog::new(
        400,
        r#"{"error": "Missing API Key."}"#,
    ));
    let mut renderer = RecordingRenderer::default();
    assert!(matches!(
        p.run(&mut renderer),
        Err(PipelineError::Status { status: 400, .. })
    ));
    assert!(renderer.calls.is_empty());
}

#[test]
fn empty_response_plots_nothing() {
    let catalog = CannedCatalog::new(200, "[]");
    let p = pipeline(catalog);
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.outcome, RunOutcome::NoStars);
    assert_eq!(report.records, 0);
    assert!(report.failures.is_empty());
    assert!(renderer.calls.is_empty());
}

#[test]
fn all_records_invalid_plots_nothing() {
    let body = r#"[{"name": "A", "right_ascension": "x", "declination": "y"}, {"name": "B"}]"#;
    let p = pipeline(CannedCatalog::new(200, body));
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.outcome, RunOutcome::NothingToPlot);
    assert_eq!(report.records, 2);
    assert_eq!(report.failures.len(), 2);
    assert!(renderer.calls.is_empty());
}

#[test]
fn invalid_json_is_fatal() {
    let p = pipeline(CannedCatalog::new(200, "not json"));
    let mut renderer = RecordingRenderer::default();

    let err = p.run(&mut renderer).unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
    assert!(renderer.calls.is_empty());
}

#[test]
fn transport_failure_is_fatal() {
    let p = pipeline(CannedCatalog::unreachable());
    let mut renderer = RecordingRenderer::default();

    let err = p.run(&mut renderer).unwrap_err();
    assert!(matches!(err, PipelineError::Transport(_)));
    assert_eq!(err.exit_code(), 3);
    assert!(renderer.calls.is_empty());
}

#[test]
fn render_failure_is_fatal() {
    struct Broken;
    impl Renderer for Broken {
        fn render(&mut self, _: &PlotDataset, _: &MainStarSet) -> Result<(), RenderError> {
            Err(RenderError::Draw("no display".to_owned()))
        }
    }

    let p = pipeline(CannedCatalog::new(200, ORION_RESPONSE));
    let err = p.run(&mut Broken).unwrap_err();
    assert!(matches!(err, PipelineError::Render(RenderError::Draw(_))));
    assert_eq!(err.exit_code(), 6);
}

#[test]
fn response_order_is_preserved() {
    let body = indoc! {r#"
        [
            {"name": "Saiph", "right_ascension": "05h 47m 45.38884s", "declination": "−09° 40′ 10.5777″"},
            {"name": "Meissa", "right_ascension": "05h 35m 08.27761s", "declination": "+09° 56′ 02.9611″"},
            {"name": "Rigel", "right_ascension": "05h 14m 32.27210s", "declination": "−08° 12′ 05.8981″"}
        ]
    "#};
    let p = pipeline(CannedCatalog::new(200, body));
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.outcome, RunOutcome::Plotted(3));
    let (dataset, labels) = &renderer.calls[0];
    assert_eq!(dataset.names(), &["Saiph", "Meissa", "Rigel"]);
    assert_eq!(labels, &["Saiph", "Rigel"]);
    assert!(dataset.ys()[0] < 0.0);
    assert!(dataset.ys()[1] > 0.0);

    let first: DecimalCoordinate = dataset.points().next().map(|(_, c)| c).unwrap();
    assert_eq!(first.x, dataset.xs()[0]);
}

#[test]
fn wrongly_typed_fields_fail_only_their_record() {
    let body = indoc! {r#"
        [
            {"name": 5, "right_ascension": "05h 55m 10.3053s", "declination": "+07° 24′ 25.4″"},
            {"name": "Rigel", "right_ascension": 78.63, "declination": "−08° 12′ 05.9″"}
        ]
    "#};
    let p = pipeline(CannedCatalog::new(200, body));
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.records, 2);
    assert_eq!(report.outcome, RunOutcome::Plotted(1));
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].name, "Rigel");
    assert_eq!(report.failures[0].right_ascension, "N/A");
    assert_eq!(renderer.calls[0].0.names(), &["N/A"]);
}

#[test]
fn huge_hours_field_is_plotted() {
    let body = r#"[{"name": "Far", "right_ascension": "1234567890123456789012345h 00m 00s", "declination": "+01° 00′ 00″"}]"#;
    let p = pipeline(CannedCatalog::new(200, body));
    let mut renderer = RecordingRenderer::default();

    let report = p.run(&mut renderer).unwrap();
    assert_eq!(report.outcome, RunOutcome::Plotted(1));
    assert!(report.failures.is_empty());
}
