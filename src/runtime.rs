use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use shell_api::ShellStatus;
use time::format_description::well_known::Rfc3339;
use tracing::warn;

use crate::app::{HostOps, ShellApp, SubmissionId};
use crate::backend::ShellBackend;

pub const EXECUTE_FALLBACK_MESSAGE: &str = "Command execution failed. Please try again.";

const ERROR_COMMAND_IN_FLIGHT: &str = "Command already in flight";

/// Terminal event of one submission. Exactly one is emitted per accepted
/// submission, including when the worker panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecEvent {
    Completed {
        submission_id: SubmissionId,
        output: String,
        exit_code: i32,
    },
    Failed {
        submission_id: SubmissionId,
        message: String,
    },
}

impl ExecEvent {
    fn submission_id(&self) -> SubmissionId {
        match self {
            Self::Completed { submission_id, .. } | Self::Failed { submission_id, .. } => {
                *submission_id
            }
        }
    }
}

struct ActiveSubmission {
    submission_id: SubmissionId,
    join_handle: Option<JoinHandle<()>>,
}

/// Owns the single in-flight submission and the worker thread serving it.
///
/// The active-submission slot is the backpressure mechanism: while occupied,
/// `begin_execute` refuses further submissions, so completion events apply
/// in submission order by construction.
pub struct ShellController {
    backend: Arc<dyn ShellBackend>,
    events: Sender<ExecEvent>,
    next_submission_id: AtomicU64,
    active_submission: Mutex<Option<ActiveSubmission>>,
    render_needed: AtomicBool,
    stop_requested: AtomicBool,
}

impl ShellController {
    pub fn new(backend: Arc<dyn ShellBackend>) -> (Arc<Self>, Receiver<ExecEvent>) {
        let (events, receiver) = mpsc::channel();
        let controller = Arc::new(Self {
            backend,
            events,
            next_submission_id: AtomicU64::new(1),
            active_submission: Mutex::new(None),
            render_needed: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
        });

        (controller, receiver)
    }

    pub fn has_active_submission(&self) -> bool {
        self.lock_active_submission().is_some()
    }

    /// Consumes a pending render request, if one was raised since the last
    /// call.
    pub fn take_render_request(&self) -> bool {
        self.render_needed.swap(false, Ordering::SeqCst)
    }

    pub fn stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::SeqCst)
    }

    /// Applies every queued completion event to the app. Returns the number
    /// applied so the caller knows whether to re-render.
    pub fn drain_events(&self, app: &mut ShellApp, events: &Receiver<ExecEvent>) -> usize {
        let mut drained = 0usize;
        while let Ok(event) = events.try_recv() {
            self.apply_event(app, event);
            drained += 1;
        }

        drained
    }

    pub fn apply_event(&self, app: &mut ShellApp, event: ExecEvent) {
        let submission_id = event.submission_id();

        match event {
            ExecEvent::Completed {
                submission_id,
                output,
                exit_code,
            } => app.on_execute_output(submission_id, output, Some(exit_code)),
            ExecEvent::Failed {
                submission_id,
                message,
            } => app.on_execute_failed(submission_id, message),
        }

        self.clear_active_submission_if_matching(submission_id);
    }

    fn begin_execute_internal(&self, command: String) -> Result<SubmissionId, String> {
        let mut active = self.lock_active_submission();
        if active.is_some() {
            return Err(ERROR_COMMAND_IN_FLIGHT.to_string());
        }

        let submission_id = self.next_submission_id.fetch_add(1, Ordering::SeqCst);
        let join_handle = self.spawn_worker(submission_id, command)?;

        *active = Some(ActiveSubmission {
            submission_id,
            join_handle: Some(join_handle),
        });

        Ok(submission_id)
    }

    fn spawn_worker(
        &self,
        submission_id: SubmissionId,
        command: String,
    ) -> Result<JoinHandle<()>, String> {
        let backend = Arc::clone(&self.backend);
        let events = self.events.clone();
        thread::Builder::new()
            .name(format!("tempshell-exec-{submission_id}"))
            .spawn(move || run_worker(submission_id, command, backend, events))
            .map_err(|error| format!("Failed to spawn execute worker: {error}"))
    }

    fn fetch_status_internal(&self) -> Result<String, String> {
        match self.backend.shell_status() {
            Ok(status) => Ok(describe_status(&status)),
            Err(error) => {
                warn!(%error, "status check failed");
                Err(error.to_string())
            }
        }
    }

    fn clear_active_submission_if_matching(&self, submission_id: SubmissionId) {
        let mut active = self.lock_active_submission();
        if active.as_ref().map(|submission| submission.submission_id) != Some(submission_id) {
            return;
        }

        let Some(mut completed) = active.take() else {
            return;
        };

        if let Some(join_handle) = completed.join_handle.take() {
            if join_handle.is_finished() {
                let _ = join_handle.join();
            }
        }
    }

    fn lock_active_submission(&self) -> MutexGuard<'_, Option<ActiveSubmission>> {
        lock_unpoisoned(&self.active_submission)
    }
}

fn run_worker(
    submission_id: SubmissionId,
    command: String,
    backend: Arc<dyn ShellBackend>,
    events: Sender<ExecEvent>,
) {
    let outcome = catch_unwind(AssertUnwindSafe(|| backend.execute(&command)));

    let event = match outcome {
        Ok(Ok(response)) => ExecEvent::Completed {
            submission_id,
            output: response.output,
            exit_code: response.exit_code,
        },
        Ok(Err(error)) => {
            warn!(%error, "command execution failed");
            ExecEvent::Failed {
                submission_id,
                message: error
                    .detail()
                    .map(str::to_owned)
                    .unwrap_or_else(|| EXECUTE_FALLBACK_MESSAGE.to_string()),
            }
        }
        Err(_) => {
            warn!("execute worker panicked");
            ExecEvent::Failed {
                submission_id,
                message: EXECUTE_FALLBACK_MESSAGE.to_string(),
            }
        }
    };

    let _ = events.send(event);
}

fn describe_status(status: &ShellStatus) -> String {
    let mut summary = match status.pod_id.as_deref() {
        Some(pod_id) => format!("Pod {pod_id} is {}", status.status),
        None => format!("Shell environment is {}", status.status),
    };

    if let Some(created_at) = status.created_at {
        if let Ok(created) = created_at.format(&Rfc3339) {
            summary.push_str(&format!(", created {created}"));
        }
    }

    summary
}

impl HostOps for Arc<ShellController> {
    fn begin_execute(&mut self, command: String) -> Result<SubmissionId, String> {
        self.begin_execute_internal(command)
    }

    fn fetch_status(&mut self) -> Result<String, String> {
        self.fetch_status_internal()
    }

    fn request_render(&mut self) {
        self.render_needed.store(true, Ordering::SeqCst);
    }

    fn request_stop(&mut self) {
        self.stop_requested.store(true, Ordering::SeqCst);
    }
}

fn lock_unpoisoned<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
