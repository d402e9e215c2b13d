#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use backtest_desk::domain::controller::FormController;
use backtest_desk::domain::error::SubmissionError;
use backtest_desk::domain::notification::{Notification, NotificationKind};
use backtest_desk::domain::params::{ParamField, ParamInputs};
use backtest_desk::domain::render::RenderedResult;
use backtest_desk::domain::result::BacktestResult;
use backtest_desk::domain::upload::UploadSelection;
use backtest_desk::domain::validation::Submission;
use backtest_desk::ports::backtest_port::BacktestPort;
use backtest_desk::ports::view_port::{DropZoneState, FormView};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PRICES_CSV: &str = "Date,Open,High,Low,Close,Volume\n\
                              2024-01-02,100,101,99,100.5,1000\n\
                              2024-01-03,100.5,102,100,101.5,1200\n";

pub fn prices() -> UploadSelection {
    UploadSelection::new("prices.csv", PRICES_CSV)
}

pub fn sample_result() -> BacktestResult {
    BacktestResult {
        total_trades: 42,
        win_rate: 55.5,
        profit_factor: 1.8,
        final_portfolio_value: 12345.67,
        total_return: 23.45,
        initial_capital: None,
    }
}

/// Backtest port returning a canned answer and recording every submission.
/// Clones share the answer and the call log.
#[derive(Clone)]
pub struct MockBacktestPort {
    pub response: Arc<Mutex<Result<BacktestResult, SubmissionError>>>,
    pub calls: Arc<Mutex<Vec<Submission>>>,
}

impl MockBacktestPort {
    fn with_response(response: Result<BacktestResult, SubmissionError>) -> Self {
        Self {
            response: Arc::new(Mutex::new(response)),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn succeeding(result: BacktestResult) -> Self {
        Self::with_response(Ok(result))
    }

    pub fn failing(err: SubmissionError) -> Self {
        Self::with_response(Err(err))
    }

    pub fn respond_with(&self, response: Result<BacktestResult, SubmissionError>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl BacktestPort for MockBacktestPort {
    async fn run_backtest(
        &self,
        submission: &Submission,
    ) -> Result<BacktestResult, SubmissionError> {
        self.calls.lock().unwrap().push(submission.clone());
        self.response.lock().unwrap().clone()
    }
}

/// Everything the controller asked a view to do, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    FileLabel(String),
    DropZone(DropZoneState),
    Trigger(bool, String),
    Loading(bool),
    ShowResults,
    HideResults,
    Notify(NotificationKind, String),
    RemoveNotification(NotificationKind),
    Scroll,
    Touched(ParamField),
}

/// A view that keeps its current state in plain fields.
#[derive(Debug, Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
    pub file_label: String,
    pub drop_zone: Option<DropZoneState>,
    pub trigger_enabled: bool,
    pub trigger_label: String,
    pub loading: bool,
    pub results_visible: bool,
    pub rendered: Option<RenderedResult>,
    pub notifications: HashMap<NotificationKind, String>,
}

impl RecordingView {
    /// Trigger/loading state captured at each `set_trigger` call.
    pub fn trigger_history(&self) -> Vec<(bool, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Trigger(enabled, label) => Some((*enabled, label.clone())),
                _ => None,
            })
            .collect()
    }
}

impl FormView for RecordingView {
    fn set_file_label(&mut self, label: &str) {
        self.file_label = label.to_string();
        self.events.push(ViewEvent::FileLabel(label.to_string()));
    }

    fn set_drop_zone(&mut self, state: DropZoneState) {
        self.drop_zone = Some(state);
        self.events.push(ViewEvent::DropZone(state));
    }

    fn set_trigger(&mut self, enabled: bool, label: &str) {
        self.trigger_enabled = enabled;
        self.trigger_label = label.to_string();
        self.events.push(ViewEvent::Trigger(enabled, label.to_string()));
    }

    fn set_loading(&mut self, visible: bool) {
        self.loading = visible;
        self.events.push(ViewEvent::Loading(visible));
    }

    fn show_results(&mut self, result: &RenderedResult) {
        self.results_visible = true;
        self.rendered = Some(result.clone());
        self.events.push(ViewEvent::ShowResults);
    }

    fn hide_results(&mut self) {
        self.results_visible = false;
        self.events.push(ViewEvent::HideResults);
    }

    fn show_notification(&mut self, notification: &Notification) {
        self.notifications
            .insert(notification.kind, notification.message.clone());
        self.events.push(ViewEvent::Notify(
            notification.kind,
            notification.message.clone(),
        ));
    }

    fn remove_notification(&mut self, kind: NotificationKind) {
        self.notifications.remove(&kind);
        self.events.push(ViewEvent::RemoveNotification(kind));
    }

    fn scroll_to_results(&mut self) {
        self.events.push(ViewEvent::Scroll);
    }

    fn mark_input_touched(&mut self, field: ParamField) {
        self.events.push(ViewEvent::Touched(field));
    }
}

pub fn controller(port: MockBacktestPort) -> FormController<MockBacktestPort, RecordingView> {
    FormController::new(
        port,
        RecordingView::default(),
        ParamInputs::default(),
        Duration::from_secs(5),
    )
}

/// One multipart field as received by the stub server.
#[derive(Debug, Clone)]
pub struct CapturedField {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub text: String,
}

pub type CapturedRequests = Arc<Mutex<Vec<Vec<CapturedField>>>>;

struct Stub {
    status: StatusCode,
    body: String,
    requests: CapturedRequests,
}

async fn stub_backtest(State(stub): State<Arc<Stub>>, mut multipart: Multipart) -> impl IntoResponse {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.unwrap();
        fields.push(CapturedField {
            name,
            file_name,
            content_type,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        });
    }
    stub.requests.lock().unwrap().push(fields);
    (
        stub.status,
        [(header::CONTENT_TYPE, "application/json")],
        stub.body.clone(),
    )
}

/// Serve `POST /backtest` on an ephemeral port, answering every request with
/// `status` and `body`. Returns the endpoint URL and the captured requests.
pub async fn spawn_stub_server(status: StatusCode, body: &str) -> (String, CapturedRequests) {
    let requests: CapturedRequests = Arc::new(Mutex::new(Vec::new()));
    let stub = Arc::new(Stub {
        status,
        body: body.to_string(),
        requests: requests.clone(),
    });
    let router = Router::new()
        .route("/backtest", post(stub_backtest))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/backtest"), requests)
}
