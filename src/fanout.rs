use crate::config::ShareConfig;
use crate::constants::PROGRESS_BAR_TEMPLATE;
use crate::error::{Result, ShareError};
use crate::report::{ClipboardSink, Reporter};
use crate::session::Connector;
use crate::share::{share, Upload, UploadRequest};
use indicatif::{ProgressBar, ProgressStyle};
use std::any::Any;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{Condvar, Mutex, PoisonError};
use std::time::Instant;

/// Counting completion barrier: set to the number of tasks up front, each
/// task signals once, `wait` returns when every task has signalled.
#[derive(Debug)]
pub struct CompletionBarrier {
    state: Mutex<BarrierState>,
    all_done: Condvar,
}

#[derive(Debug)]
struct BarrierState {
    remaining: usize,
    signals: usize,
}

impl CompletionBarrier {
    pub fn new(count: usize) -> Self {
        Self {
            state: Mutex::new(BarrierState {
                remaining: count,
                signals: 0,
            }),
            all_done: Condvar::new(),
        }
    }

    /// A guard that signals when dropped, including during unwinding.
    pub fn guard(&self) -> CompletionGuard<'_> {
        CompletionGuard { barrier: self }
    }

    pub fn signal(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.signals += 1;
        state.remaining = state.remaining.saturating_sub(1);
        if state.remaining == 0 {
            self.all_done.notify_all();
        }
    }

    pub fn wait(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        while state.remaining > 0 {
            state = self
                .all_done
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn remaining(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remaining
    }

    /// How many times `signal` has been called.
    pub fn signals(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .signals
    }
}

pub struct CompletionGuard<'a> {
    barrier: &'a CompletionBarrier,
}

impl Drop for CompletionGuard<'_> {
    fn drop(&mut self) {
        self.barrier.signal();
    }
}

/// Result of one file in a multi-file run.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub result: Result<Upload>,
}

/// Summary of a multi-file run.
#[derive(Debug)]
pub struct FanOutReport {
    pub outcomes: Vec<FileOutcome>,
}

impl FanOutReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// Uploads every file concurrently, one task per file, each with its own
/// session.
///
/// Each task reports its own result through `reporter` as soon as it
/// finishes, so lines come out in completion order. A failing task is
/// reported on stderr and does not stop its siblings. `barrier` must count
/// exactly `files.len()` pending tasks; it is signalled by every task on
/// every exit path and this function returns only after `barrier.wait()`.
///
/// # Returns
/// * `Ok(FanOutReport)` - outcomes in the order `files` were given
/// * `Err(ShareError::BarrierMismatch)` - if `barrier` counts a different
///   number of tasks, before anything is started
/// * `Err(ShareError::WorkerPool)` - if the worker threads cannot start
pub fn upload_all<C, W, K>(
    config: &ShareConfig,
    connector: &C,
    files: &[PathBuf],
    keep_name: bool,
    reporter: &Reporter<W, K>,
    barrier: &CompletionBarrier,
) -> Result<FanOutReport>
where
    C: Connector,
    W: Write + Send,
    K: ClipboardSink,
{
    let expected = barrier.remaining();
    if expected != files.len() {
        return Err(ShareError::BarrierMismatch {
            expected,
            tasks: files.len(),
        });
    }

    let start_time = Instant::now();
    crate::verbose!("Uploading {} files", files.len());

    // network-bound: one thread per file
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(files.len().max(1))
        .thread_name(|index| format!("goshare-upload-{}", index))
        .build()?;

    let progress = create_progress_bar(files.len() as u64);
    let slots: Mutex<Vec<Option<FileOutcome>>> =
        Mutex::new((0..files.len()).map(|_| None).collect());

    pool.in_place_scope(|scope| {
        for (index, path) in files.iter().enumerate() {
            let progress = progress.clone();
            let slots = &slots;
            scope.spawn(move |_| {
                let _done = barrier.guard();
                let request = UploadRequest::file(path.clone(), keep_name);

                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    share(config, connector, &request)
                }))
                .unwrap_or_else(|payload| Err(ShareError::TaskPanicked(panic_message(payload))));

                progress.suspend(|| match &result {
                    Ok(upload) => {
                        if let Err(err) = reporter.report(upload) {
                            crate::error!("{}: {}", path.display(), err);
                        }
                    }
                    Err(err) => {
                        crate::error!("{}: {}", path.display(), err);
                    }
                });
                progress.inc(1);

                slots.lock().unwrap_or_else(PoisonError::into_inner)[index] = Some(FileOutcome {
                    path: path.clone(),
                    result,
                });
            });
        }
        barrier.wait();
    });

    progress.finish_and_clear();

    let outcomes: Vec<FileOutcome> = slots
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner)
        .into_iter()
        .zip(files)
        .map(|(slot, path)| {
            slot.unwrap_or_else(|| FileOutcome {
                path: path.clone(),
                result: Err(ShareError::TaskPanicked("task did not finish".to_string())),
            })
        })
        .collect();

    let report = FanOutReport { outcomes };
    crate::verbose!(
        "{} uploaded, {} failed in {:.2?}",
        report.succeeded(),
        report.failed(),
        start_time.elapsed()
    );
    Ok(report)
}

fn create_progress_bar(len: u64) -> ProgressBar {
    if crate::logger::is_quiet() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_BAR_TEMPLATE) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb.set_message("uploading");
    pb
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
