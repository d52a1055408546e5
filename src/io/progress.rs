//! Per-sheet slicing progress with an overall bar for large batches

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Cell counts for one sheet
#[derive(Debug, Clone, Default)]
struct SheetProgress {
    name: String,
    scanned: usize,
    total: usize,
    done: bool,
}

impl SheetProgress {
    fn draw(&self, bar: &ProgressBar) {
        let width = self.total.to_string().len();
        let mark = if self.done { "✓ " } else { "" };
        bar.set_length(self.total as u64);
        bar.set_position(self.scanned as u64);
        bar.set_message(format!("{:>width$}/{}", self.scanned, self.total));
        bar.set_prefix(format!("{mark}{}", self.name));
    }
}

/// Coordinates progress display while sheets are sliced
///
/// A fixed pool of bars is reused: sheet `i` draws on slot
/// `i % MAX_INDIVIDUAL_PROGRESS_BARS`, so the most recent sheets stay visible
/// as processing moves on. Batches larger than the pool also get an overall
/// sheet counter.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    slots: Vec<ProgressBar>,
    sheets: Vec<SheetProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static SHEET_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Sheets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a progress manager with no bars
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            slots: Vec::new(),
            sheets: Vec::new(),
        }
    }

    /// Create the bars needed for `sheet_count` sheets
    pub fn initialize(&mut self, sheet_count: usize) {
        if sheet_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(sheet_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        self.slots = (0..sheet_count.min(MAX_INDIVIDUAL_PROGRESS_BARS))
            .map(|_| {
                let bar = ProgressBar::new(0).with_style(SHEET_STYLE.clone());
                self.multi_progress.add(bar)
            })
            .collect();
        self.sheets = vec![SheetProgress::default(); sheet_count];
    }

    /// Start tracking a sheet with `total_cells` cells to scan
    pub fn start_sheet(&mut self, index: usize, path: &Path, total_cells: usize) {
        if index >= self.sheets.len() {
            self.sheets.resize_with(index + 1, SheetProgress::default);
        }
        if let Some(sheet) = self.sheets.get_mut(index) {
            *sheet = SheetProgress {
                name: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .into_owned(),
                scanned: 0,
                total: total_cells,
                done: false,
            };
        }
        self.redraw(index);
    }

    /// Report how many cells of a sheet have been scanned
    pub fn update_cells(&mut self, index: usize, scanned: usize) {
        if let Some(sheet) = self.sheets.get_mut(index) {
            sheet.scanned = scanned;
        }
        self.redraw(index);
    }

    /// Mark a sheet as completed and advance the batch bar
    pub fn complete_sheet(&mut self, index: usize) {
        if let Some(sheet) = self.sheets.get_mut(index) {
            sheet.scanned = sheet.total;
            sheet.done = true;
        }
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.inc(1);
        }
        self.redraw(index);
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(batch_bar) = &self.batch_bar {
            batch_bar.finish_with_message("All sheets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Cells scanned and total cells for a tracked sheet
    pub fn sheet_progress(&self, index: usize) -> Option<(usize, usize)> {
        self.sheets
            .get(index)
            .map(|sheet| (sheet.scanned, sheet.total))
    }

    /// Number of per-sheet bars created by [`ProgressManager::initialize`]
    pub const fn bar_count(&self) -> usize {
        self.slots.len()
    }

    /// Bar slot a sheet is drawn on, if any bars exist
    pub const fn slot_for(&self, index: usize) -> Option<usize> {
        index.checked_rem(self.slots.len())
    }

    /// Check whether the overall batch bar is shown
    pub const fn is_batched(&self) -> bool {
        self.batch_bar.is_some()
    }

    fn redraw(&self, index: usize) {
        let bar = self.slot_for(index).and_then(|slot| self.slots.get(slot));
        if let (Some(bar), Some(sheet)) = (bar, self.sheets.get(index)) {
            sheet.draw(bar);
        }
    }
}
