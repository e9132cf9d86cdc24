use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;

use frp_bond_predictor::batch::{
    spawn_batch, BatchError, BatchEvent, BatchOutcome, BatchPhase, BatchReport,
};
use frp_bond_predictor::features::FormInput;
use frp_bond_predictor::i18n::Language;
use frp_bond_predictor::pipeline::{format_mpa, Predictor, SinglePredictionError};

// ---------------------------------------------------------------------------
// View-model pieces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Individual,
    Batch,
}

/// What the result label under the form shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PredictionDisplay {
    #[default]
    Empty,
    Value(f64),
    InputError,
    Failed(String),
}

impl PredictionDisplay {
    pub fn text(&self, lang: Language) -> String {
        let s = lang.strings();
        match self {
            PredictionDisplay::Empty => String::new(),
            PredictionDisplay::Value(v) => format!("{}{}", s.result_prefix, format_mpa(*v)),
            PredictionDisplay::InputError => s.error_input.to_string(),
            PredictionDisplay::Failed(msg) => format!("{} {msg}", s.error_occurred),
        }
    }
}

/// Batch status line. Kept symbolic so a language switch re-renders it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BatchStatus {
    #[default]
    Idle,
    Selected,
    Starting,
    Phase(BatchPhase),
    Completed,
    Cancelled,
    Failed(String),
}

impl BatchStatus {
    pub fn text(&self, lang: Language) -> String {
        let s = lang.strings();
        match self {
            BatchStatus::Idle => String::new(),
            BatchStatus::Selected => s.status_selected.into(),
            BatchStatus::Starting => s.status_start.into(),
            BatchStatus::Phase(BatchPhase::Reading) => s.status_reading.into(),
            BatchStatus::Phase(BatchPhase::Validating) => s.status_validating.into(),
            BatchStatus::Phase(BatchPhase::Scaling) => s.status_scaling.into(),
            BatchStatus::Phase(BatchPhase::Predicting) => s.status_predicting.into(),
            BatchStatus::Phase(BatchPhase::ChoosingDestination | BatchPhase::Saving) => {
                s.status_saving.into()
            }
            BatchStatus::Completed => s.status_completed.into(),
            BatchStatus::Cancelled => s.status_cancelled.into(),
            BatchStatus::Failed(msg) => format!("{} {msg}", s.error_occurred),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message box the UI thread should raise.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(level: NoticeLevel, title: &str, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. Only the UI thread touches
/// it; the batch thread talks to it through `batch_events`.
#[derive(Default)]
pub struct AppState {
    pub language: Language,
    pub tab: Tab,

    /// Single-record form and its last result.
    pub form: FormInput,
    pub result: PredictionDisplay,

    /// Input file chosen for the next batch run.
    pub selected_file: Option<PathBuf>,
    pub batch_status: BatchStatus,
    /// Present while a batch run is in flight.
    pub batch_events: Option<Receiver<BatchEvent>>,
    /// Predictions of the last run that got past the model, for the preview.
    pub last_report: Option<BatchReport>,
}

impl AppState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Self::default()
        }
    }

    /// While true, the run and browse controls are disabled.
    pub fn is_batch_running(&self) -> bool {
        self.batch_events.is_some()
    }

    pub fn predict(&mut self, predictor: &Predictor) {
        self.result = match predictor.predict_form(&self.form) {
            Ok(value) => PredictionDisplay::Value(value),
            Err(SinglePredictionError::Input(e)) => {
                log::error!("Input value error: {e}");
                PredictionDisplay::InputError
            }
            Err(SinglePredictionError::Prediction(e)) => {
                log::error!("Error during prediction: {e}");
                PredictionDisplay::Failed(e.to_string())
            }
        };
    }

    pub fn select_file(&mut self, path: PathBuf) {
        log::info!("Selected file for batch prediction: {}", path.display());
        self.selected_file = Some(path);
        self.batch_status = BatchStatus::Selected;
    }

    /// Start a background run on the selected file. Ignored while a run is in
    /// flight; warns when no file is selected.
    pub fn start_batch<W>(&mut self, predictor: Arc<Predictor>, wake: W) -> Option<Notice>
    where
        W: Fn() + Send + Sync + 'static,
    {
        if self.is_batch_running() {
            return None;
        }
        let s = self.language.strings();
        let Some(input) = self.selected_file.clone() else {
            return Some(Notice::new(
                NoticeLevel::Warning,
                s.warning_no_file,
                s.warning_no_file_msg,
            ));
        };

        match spawn_batch(predictor, input, wake) {
            Ok(events) => {
                self.batch_events = Some(events);
                self.batch_status = BatchStatus::Starting;
                self.last_report = None;
                None
            }
            Err(e) => {
                log::error!("Could not start batch thread: {e}");
                Some(self.fail(e.to_string()))
            }
        }
    }

    /// Drain pending batch events. `choose` answers destination requests on
    /// this thread. Returns the message boxes to show.
    pub fn poll_batch(&mut self, choose: &mut dyn FnMut(&str) -> Option<PathBuf>) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Some(events) = &self.batch_events {
            match events.try_recv() {
                Ok(BatchEvent::Phase(phase)) => self.batch_status = BatchStatus::Phase(phase),
                Ok(BatchEvent::ChooseDestination {
                    suggested_name,
                    reply,
                }) => {
                    let _ = reply.send(choose(&suggested_name));
                }
                Ok(BatchEvent::Finished(result)) => {
                    self.batch_events = None;
                    notices.extend(self.finish(result));
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.batch_events = None;
                    log::error!("Batch worker stopped without reporting a result");
                    notices.push(self.fail("batch worker stopped unexpectedly".into()));
                }
            }
        }
        notices
    }

    fn finish(&mut self, result: Result<BatchOutcome, BatchError>) -> Option<Notice> {
        let s = self.language.strings();
        match result {
            Ok(BatchOutcome::Saved { path, report }) => {
                self.batch_status = BatchStatus::Completed;
                self.last_report = Some(report);
                Some(Notice::new(
                    NoticeLevel::Info,
                    s.success,
                    format!("{}{}", s.success_save, path.display()),
                ))
            }
            Ok(BatchOutcome::SaveCancelled { report }) => {
                self.batch_status = BatchStatus::Cancelled;
                self.last_report = Some(report);
                None
            }
            Err(e) => {
                if let BatchError::Persist { report, .. } = &e {
                    self.last_report = Some(report.clone());
                }
                Some(self.fail(e.to_string()))
            }
        }
    }

    fn fail(&mut self, message: String) -> Notice {
        let s = self.language.strings();
        let notice = Notice::new(
            NoticeLevel::Error,
            s.error_title,
            format!("{} {message}", s.error_occurred),
        );
        self.batch_status = BatchStatus::Failed(message);
        notice
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    fn report() -> BatchReport {
        BatchReport {
            predictions: vec![12.0, 14.5],
            out_of_range_rows: 0,
        }
    }

    fn running(state: &mut AppState) -> mpsc::Sender<BatchEvent> {
        let (tx, rx) = mpsc::channel();
        state.batch_events = Some(rx);
        tx
    }

    #[test]
    fn run_without_file_only_warns() {
        let mut state = AppState::new(Language::English);
        let predictor = Arc::new(Predictor::new(
            Box::new(frp_bond_predictor::model::ScalerArtifact::Standard {
                mean: vec![0.0; 8],
                scale: vec![1.0; 8],
            }),
            Box::new(frp_bond_predictor::model::ModelArtifact::Linear {
                coefficients: vec![1.0; 8],
                intercept: 0.0,
            }),
        ));
        let notice = state.start_batch(predictor, || {}).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(!state.is_batch_running());
    }

    #[test]
    fn destination_request_is_answered_on_poll() {
        let mut state = AppState::new(Language::English);
        let tx = running(&mut state);
        let (reply, answer) = mpsc::channel();
        tx.send(BatchEvent::Phase(BatchPhase::Predicting)).unwrap();
        tx.send(BatchEvent::ChooseDestination {
            suggested_name: "predicted_x.xlsx".into(),
            reply,
        })
        .unwrap();

        let mut asked = Vec::new();
        let notices = state.poll_batch(&mut |name| {
            asked.push(name.to_string());
            None
        });
        assert!(notices.is_empty());
        assert_eq!(asked, vec!["predicted_x.xlsx"]);
        assert_eq!(answer.recv().unwrap(), None);
        assert_eq!(state.batch_status, BatchStatus::Phase(BatchPhase::Predicting));
        assert!(state.is_batch_running());
    }

    #[test]
    fn cancel_is_not_an_error() {
        let mut state = AppState::new(Language::English);
        let tx = running(&mut state);
        tx.send(BatchEvent::Finished(Ok(BatchOutcome::SaveCancelled { report: report() })))
            .unwrap();
        let notices = state.poll_batch(&mut |_| None);
        assert!(notices.is_empty());
        assert_eq!(state.batch_status, BatchStatus::Cancelled);
        assert_eq!(state.batch_status.text(Language::English), "Save operation cancelled.");
        assert!(!state.is_batch_running());
        assert_eq!(state.last_report, Some(report()));
    }

    #[test]
    fn failure_re_enables_controls_and_reports() {
        let mut state = AppState::new(Language::English);
        let tx = running(&mut state);
        tx.send(BatchEvent::Finished(Err(BatchError::Structure(
            frp_bond_predictor::batch::BatchStructureError::TooFewColumns {
                found: 3,
                required: 8,
            },
        ))))
        .unwrap();
        let notices = state.poll_batch(&mut |_| None);
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, NoticeLevel::Error);
        assert!(notices[0].message.starts_with("An error occurred:"));
        assert!(!state.is_batch_running());
    }

    #[test]
    fn dead_worker_is_a_failure() {
        let mut state = AppState::new(Language::English);
        drop(running(&mut state));
        let notices = state.poll_batch(&mut |_| None);
        assert_eq!(notices.len(), 1);
        assert!(matches!(state.batch_status, BatchStatus::Failed(_)));
        assert!(!state.is_batch_running());
    }

    #[test]
    fn result_text_follows_language() {
        let display = PredictionDisplay::Value(12.346);
        assert_eq!(display.text(Language::English), "Predicted τu: 12.35 MPa");
        assert_eq!(display.text(Language::Chinese), "预测 τu: 12.35 MPa");
    }
}
