use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use thiserror::Error;

use crate::data::{load_table, save_table, suggest_output_name, BatchTable, Cell};
use crate::features::{unknown_categories, Feature, FEATURE_COUNT};
use crate::model::{Matrix, PredictionError};
use crate::pipeline::Predictor;

/// Name of the appended output column.
pub const PREDICTION_COLUMN: &str = "Predicted τu (MPa)";

// ---------------------------------------------------------------------------
// Phases, outcomes and errors
// ---------------------------------------------------------------------------

/// Advisory progress of one batch run. Not a checkpoint: a failure in a
/// later phase discards the work of earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    Reading,
    Validating,
    Scaling,
    Predicting,
    ChoosingDestination,
    Saving,
}

/// The table is unusable as model input. Detected before any scaling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchStructureError {
    #[error("the selected file must contain at least {required} feature columns, found {found}")]
    TooFewColumns { found: usize, required: usize },
    #[error(
        "all feature columns must be numeric: column {column} ({feature}), row {row} holds '{value}'"
    )]
    NonNumeric {
        column: usize,
        feature: Feature,
        row: usize,
        value: String,
    },
    #[error("column {column} ({feature}), row {row} has no numeric value")]
    MissingValue {
        column: usize,
        feature: Feature,
        row: usize,
    },
}

/// Why a batch run ended in `Failed`. Positions in messages are 1-based.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchError {
    #[error("failed to read {}: {message}", path.display())]
    Read { path: PathBuf, message: String },
    #[error(transparent)]
    Structure(#[from] BatchStructureError),
    #[error("prediction failed: {0}")]
    Prediction(#[from] PredictionError),
    /// The predictions were computed and are kept here.
    #[error("failed to save results to {}: {message}", path.display())]
    Persist {
        path: PathBuf,
        message: String,
        report: BatchReport,
    },
}

/// What a completed prediction pass produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// One value per input row, in input order.
    pub predictions: Vec<f64>,
    /// Rows whose FM/FT/BS values are not codes of their enumeration.
    pub out_of_range_rows: usize,
}

/// Terminal non-failure states of a batch run.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Saved { path: PathBuf, report: BatchReport },
    SaveCancelled { report: BatchReport },
}

impl BatchOutcome {
    pub fn report(&self) -> &BatchReport {
        match self {
            BatchOutcome::Saved { report, .. } | BatchOutcome::SaveCancelled { report } => report,
        }
    }
}

// ---------------------------------------------------------------------------
// Destination choice
// ---------------------------------------------------------------------------

/// Picks where the results go. `None` means the user cancelled.
pub trait DestinationChooser {
    fn choose(&self, suggested_name: &str) -> Option<PathBuf>;
}

impl<F> DestinationChooser for F
where
    F: Fn(&str) -> Option<PathBuf>,
{
    fn choose(&self, suggested_name: &str) -> Option<PathBuf> {
        self(suggested_name)
    }
}

// ---------------------------------------------------------------------------
// Synchronous runner
// ---------------------------------------------------------------------------

/// Check the first eight columns and extract them as an N×8 matrix.
pub fn feature_matrix(table: &BatchTable) -> Result<Matrix, BatchStructureError> {
    if table.width() < FEATURE_COUNT {
        return Err(BatchStructureError::TooFewColumns {
            found: table.width(),
            required: FEATURE_COUNT,
        });
    }
    for feature in Feature::ALL {
        let col = feature.index();
        for (r, row) in table.rows().iter().enumerate() {
            check_cell(&row[col], feature, r)?;
        }
    }

    let rows: Vec<[f64; FEATURE_COUNT]> = table
        .rows()
        .iter()
        .map(|row| std::array::from_fn(|c| row[c].as_f64().unwrap_or(f64::NAN)))
        .collect();
    Ok(Matrix::from_rows(&rows))
}

fn check_cell(cell: &Cell, feature: Feature, row: usize) -> Result<(), BatchStructureError> {
    let column = feature.index() + 1;
    let row = row + 1;
    match cell.as_f64() {
        Some(v) if v.is_finite() => Ok(()),
        Some(_) => Err(BatchStructureError::MissingValue {
            column,
            feature,
            row,
        }),
        None if cell.is_empty() => Err(BatchStructureError::MissingValue {
            column,
            feature,
            row,
        }),
        None => Err(BatchStructureError::NonNumeric {
            column,
            feature,
            row,
            value: cell.to_string(),
        }),
    }
}

/// Run one batch: read, validate, scale, predict, choose a destination and
/// save. Blocks until a terminal state; `on_phase` sees each phase as it starts.
pub fn run_batch(
    predictor: &Predictor,
    input: &Path,
    chooser: &dyn DestinationChooser,
    on_phase: &mut dyn FnMut(BatchPhase),
) -> Result<BatchOutcome, BatchError> {
    on_phase(BatchPhase::Reading);
    let mut table = load_table(input).map_err(|e| BatchError::Read {
        path: input.to_path_buf(),
        message: format!("{e:#}"),
    })?;
    log::info!(
        "Loaded {} with {} rows and {} columns",
        input.display(),
        table.len(),
        table.width()
    );

    on_phase(BatchPhase::Validating);
    let raw = feature_matrix(&table)?;
    let out_of_range_rows = raw
        .iter_rows()
        .filter(|row| !unknown_categories(row).is_empty())
        .count();
    if out_of_range_rows > 0 {
        log::warn!(
            "{out_of_range_rows} rows have FM/FT/BS values outside their enumerations; \
             they are passed to the model unchanged"
        );
    }

    on_phase(BatchPhase::Scaling);
    let scaled = predictor.scale(&raw)?;
    log::info!("Input data scaled");

    on_phase(BatchPhase::Predicting);
    let predictions = predictor.predict_scaled(&scaled)?;
    log::info!("Batch prediction completed for {} rows", predictions.len());

    table.append_column(PREDICTION_COLUMN, predictions.iter().copied());
    let report = BatchReport {
        predictions,
        out_of_range_rows,
    };

    on_phase(BatchPhase::ChoosingDestination);
    let Some(path) = chooser.choose(&suggest_output_name(input)) else {
        log::info!("Save cancelled; results discarded");
        return Ok(BatchOutcome::SaveCancelled { report });
    };

    on_phase(BatchPhase::Saving);
    match save_table(&table, &path) {
        Ok(()) => {
            log::info!("Predictions saved to {}", path.display());
            Ok(BatchOutcome::Saved { path, report })
        }
        Err(e) => Err(BatchError::Persist {
            path,
            message: format!("{e:#}"),
            report,
        }),
    }
}

// ---------------------------------------------------------------------------
// Background runner
// ---------------------------------------------------------------------------

/// Messages from the batch thread to the UI thread.
#[derive(Debug)]
pub enum BatchEvent {
    Phase(BatchPhase),
    /// The worker waits on `reply`. Dropping it counts as cancel.
    ChooseDestination {
        suggested_name: String,
        reply: Sender<Option<PathBuf>>,
    },
    Finished(Result<BatchOutcome, BatchError>),
}

/// Forwards the destination question to the UI thread and waits for it.
struct ChannelChooser<'a> {
    events: &'a Sender<BatchEvent>,
    wake: &'a (dyn Fn() + Send + Sync),
}

impl DestinationChooser for ChannelChooser<'_> {
    fn choose(&self, suggested_name: &str) -> Option<PathBuf> {
        let (reply, answer) = mpsc::channel();
        let request = BatchEvent::ChooseDestination {
            suggested_name: suggested_name.to_string(),
            reply,
        };
        if self.events.send(request).is_err() {
            return None;
        }
        (self.wake)();
        answer.recv().ok().flatten()
    }
}

/// Start a batch run on its own thread. Every event is followed by a call to
/// `wake` so the UI can repaint; the receiver yields exactly one `Finished`.
pub fn spawn_batch<W>(
    predictor: Arc<Predictor>,
    input: PathBuf,
    wake: W,
) -> std::io::Result<Receiver<BatchEvent>>
where
    W: Fn() + Send + Sync + 'static,
{
    let (events, receiver) = mpsc::channel();
    thread::Builder::new()
        .name("batch-prediction".into())
        .spawn(move || {
            let chooser = ChannelChooser {
                events: &events,
                wake: &wake,
            };
            let mut on_phase = |phase: BatchPhase| {
                log::debug!("Batch phase: {phase:?}");
                let _ = events.send(BatchEvent::Phase(phase));
                wake();
            };
            let result = run_batch(&predictor, &input, &chooser, &mut on_phase);
            if let Err(e) = &result {
                log::error!("Error during batch prediction: {e}");
            }
            let _ = events.send(BatchEvent::Finished(result));
            wake();
        })?;
    Ok(receiver)
}
