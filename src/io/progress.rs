//! Multi-file progress display with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, STAGES_PER_FILE};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

/// Processing step reported for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Decoding the source image
    Loading,
    /// Running the detection pipeline
    Analyzing,
    /// Writing report and heatmap
    Writing,
}

impl Stage {
    const fn position(self) -> u64 {
        match self {
            Self::Loading => 0,
            Self::Analyzing => 1,
            Self::Writing => 2,
        }
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Analyzing => "analyzing",
            Self::Writing => "writing",
        }
    }
}

#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    position: u64,
    status: String,
}

/// Coordinates progress display for batch analysis
///
/// Small batches get one bar per file; large batches add an overall bar and
/// show a rolling window of the most recent files.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static FILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:20.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Slices: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(STAGES_PER_FILE);
            bar.set_style(FILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }
    }

    /// Register a file and show its first stage
    pub fn start_file(&mut self, index: usize, path: &Path) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileState {
                name,
                position: 0,
                status: Stage::Loading.label().to_string(),
            };
        }
        self.update_bars();
    }

    /// Report the stage a file has reached
    pub fn advance(&mut self, index: usize, stage: Stage) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.position = stage.position();
            state.status = stage.label().to_string();
        }
        self.update_bars();
    }

    /// Mark file as completed and update batch progress
    pub fn complete_file(&mut self, index: usize, findings: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.position = STAGES_PER_FILE;
            state.status = format!("{findings} findings in {} ms", elapsed.as_millis());
        }
        self.update_bars();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All slices processed");
        }
        let _ = self.multi_progress.clear();
    }

    // Show the most recent files that have been started
    fn update_bars(&self) {
        let active: Vec<&FileState> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();
        let start = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start..).unwrap_or(&[]);

        for (bar_index, bar) in self.file_bars.iter().enumerate() {
            if let Some(state) = visible.get(bar_index) {
                bar.set_length(STAGES_PER_FILE);
                bar.set_position(state.position);
                bar.set_prefix(state.name.clone());
                bar.set_message(state.status.clone());
            } else {
                bar.set_position(0);
                bar.set_prefix(String::new());
                bar.set_message(String::new());
            }
        }
    }
}
