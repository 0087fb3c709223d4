//! Progress reporting and display
//!
//! Loading and building talk to a [`ProgressReporter`] instead of printing, so
//! the same code drives an interactive terminal, a CI log, or nothing at all.

use std::{collections::HashMap, fmt, sync::Arc, sync::RwLock, time::Instant};

/// Status of a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryStatus {
    /// Reading from the post source
    Reading,
    /// Extracting frontmatter and rendering markdown
    Rendering,
    /// Successfully loaded
    Done,
    /// Dropped or replaced by a placeholder
    Failed(String),
}

impl EntryStatus {
    fn is_final(&self) -> bool {
        matches!(self, Self::Done | Self::Failed(_))
    }

    fn label(&self) -> (&'static str, &str) {
        match self {
            Self::Reading => ("📥", "reading"),
            Self::Rendering => ("⚙️ ", "rendering"),
            Self::Done => ("✅", "done"),
            Self::Failed(reason) => ("❌", reason),
        }
    }
}

/// Phase of the overall run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchPhase {
    ListingPosts,
    LoadingPosts,
    WritingPages,
    Completed,
    Failed(String),
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListingPosts => f.write_str("🔎 Listing posts..."),
            Self::LoadingPosts => f.write_str("📄 Loading posts..."),
            Self::WritingPages => f.write_str("📝 Writing pages..."),
            Self::Completed => f.write_str("✅ Completed!"),
            Self::Failed(e) => write!(f, "❌ Failed: {e}"),
        }
    }
}

/// Progress reporter trait - implement this for different display backends.
pub trait ProgressReporter: Send + Sync {
    /// Set the overall phase.
    fn set_phase(&self, phase: BatchPhase);

    /// Register posts to track (call before loading starts).
    fn register_entries(&self, entries: Vec<String>);

    /// Update the status of a specific post.
    fn update_entry(&self, entry: &str, status: EntryStatus);

    /// `written` pages out of `total` are on disk.
    fn set_write_progress(&self, written: usize, total: usize);

    fn log_warn(&self, message: &str);

    /// Finish and clean up the display.
    fn finish(&self);
}

/// A no-op reporter for when progress display is disabled.
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn set_phase(&self, _phase: BatchPhase) {}
    fn register_entries(&self, _entries: Vec<String>) {}
    fn update_entry(&self, _entry: &str, _status: EntryStatus) {}
    fn set_write_progress(&self, _written: usize, _total: usize) {}
    fn log_warn(&self, _message: &str) {}
    fn finish(&self) {}
}

/// Statistics collected during a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_entries: usize,
    pub successful_entries: usize,
    pub failed_entries: usize,
    pub pages_written: usize,
}

impl Stats {
    fn record(&mut self, status: &EntryStatus) {
        match status {
            EntryStatus::Done => self.successful_entries += 1,
            EntryStatus::Failed(_) => self.failed_entries += 1,
            EntryStatus::Reading | EntryStatus::Rendering => {}
        }
    }
}

/// Stats plus the moment the run started; displays as the closing summary.
#[derive(Debug)]
struct Tally {
    stats: Stats,
    started: Instant,
}

impl Default for Tally {
    fn default() -> Self {
        Self {
            stats: Stats::default(),
            started: Instant::now(),
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
        let stats = &self.stats;
        writeln!(f)?;
        writeln!(f, "{RULE}\n📊 Summary\n{RULE}")?;
        writeln!(f, "   📄 Posts:      {} total", stats.total_entries)?;
        writeln!(f, "   ✅ Loaded:     {}", stats.successful_entries)?;
        if stats.failed_entries > 0 {
            writeln!(f, "   ❌ Failed:     {}", stats.failed_entries)?;
        }
        if stats.pages_written > 0 {
            writeln!(f, "   📝 Pages:      {}", stats.pages_written)?;
        }
        let elapsed = self.started.elapsed().as_secs_f64();
        writeln!(f, "   ⏱️  Duration:   {elapsed:.2}s")?;
        write!(f, "{RULE}")
    }
}

/// Line-oriented reporter for logs and pipes (non-TTY stderr).
#[derive(Default)]
pub struct SimpleReporter {
    tally: RwLock<Tally>,
}

impl SimpleReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> Stats {
        self.tally.read().unwrap().stats.clone()
    }
}

impl ProgressReporter for SimpleReporter {
    fn set_phase(&self, phase: BatchPhase) {
        eprintln!("{phase}");
    }

    fn register_entries(&self, entries: Vec<String>) {
        self.tally.write().unwrap().stats.total_entries = entries.len();
        eprintln!("   Found {} posts", entries.len());
    }

    fn update_entry(&self, entry: &str, status: EntryStatus) {
        self.tally.write().unwrap().stats.record(&status);
        match status {
            EntryStatus::Done => eprintln!("   ✓ {entry}"),
            EntryStatus::Failed(ref e) => eprintln!("   ✗ {entry}: {e}"),
            EntryStatus::Reading | EntryStatus::Rendering => {}
        }
    }

    fn set_write_progress(&self, written: usize, total: usize) {
        self.tally.write().unwrap().stats.pages_written = written;
        if written == total {
            eprintln!("   Wrote {total} pages");
        }
    }

    fn log_warn(&self, message: &str) {
        eprintln!("⚠️  {message}");
    }

    fn finish(&self) {
        eprintln!("{}", self.tally.read().unwrap());
    }
}

/// Interactive reporter with progress bars (for TTY).
pub struct FancyReporter {
    multi: indicatif::MultiProgress,
    phase_bar: indicatif::ProgressBar,
    /// Spinner per post that has started loading.
    spinners: RwLock<HashMap<String, indicatif::ProgressBar>>,
    posts_bar: RwLock<Option<indicatif::ProgressBar>>,
    tally: RwLock<Tally>,
}

fn spinner_style(template: &str) -> indicatif::ProgressStyle {
    indicatif::ProgressStyle::default_spinner()
        .template(template)
        .unwrap()
}

impl FancyReporter {
    pub fn new() -> Self {
        let multi = indicatif::MultiProgress::new();
        let phase_bar = multi.add(indicatif::ProgressBar::new_spinner());
        phase_bar.set_style(spinner_style("{spinner:.cyan} {msg}"));
        phase_bar.enable_steady_tick(std::time::Duration::from_millis(100));

        Self {
            multi,
            phase_bar,
            spinners: RwLock::new(HashMap::new()),
            posts_bar: RwLock::new(None),
            tally: RwLock::new(Tally::default()),
        }
    }
}

impl Default for FancyReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for FancyReporter {
    fn set_phase(&self, phase: BatchPhase) {
        match phase {
            BatchPhase::Completed | BatchPhase::Failed(_) => {
                self.phase_bar.finish_with_message(phase.to_string())
            }
            _ => self.phase_bar.set_message(phase.to_string()),
        }
    }

    fn register_entries(&self, entries: Vec<String>) {
        let total = entries.len();
        self.tally.write().unwrap().stats.total_entries = total;

        let bar = self.multi.add(indicatif::ProgressBar::new(total as u64));
        bar.set_style(
            indicatif::ProgressStyle::default_bar()
                .template("   {bar:40.cyan/blue} {pos}/{len} posts")
                .unwrap()
                .progress_chars("█▓▒░  "),
        );
        *self.posts_bar.write().unwrap() = Some(bar);
    }

    fn update_entry(&self, entry: &str, status: EntryStatus) {
        let mut spinners = self.spinners.write().unwrap();

        if status.is_final() {
            if let Some(spinner) = spinners.remove(entry) {
                spinner.finish_and_clear();
            }
            if let Some(bar) = self.posts_bar.read().unwrap().as_ref() {
                bar.inc(1);
            }
            self.tally.write().unwrap().stats.record(&status);
            return;
        }

        let (emoji, detail) = status.label();
        let message = format!("{emoji} {entry}: {detail}");
        // Spinners appear lazily, once a post starts loading
        let spinner = spinners.entry(entry.to_owned()).or_insert_with(|| {
            let spinner = self.multi.add(indicatif::ProgressBar::new_spinner());
            spinner.set_style(spinner_style("   {msg}"));
            spinner.enable_steady_tick(std::time::Duration::from_millis(100));
            spinner
        });
        spinner.set_message(message);
    }

    fn set_write_progress(&self, written: usize, total: usize) {
        self.phase_bar
            .set_message(format!("{} ({written}/{total})", BatchPhase::WritingPages));
        self.tally.write().unwrap().stats.pages_written = written;
    }

    fn log_warn(&self, message: &str) {
        self.multi.println(format!("⚠️  {message}")).ok();
    }

    fn finish(&self) {
        for spinner in self.spinners.read().unwrap().values() {
            spinner.finish_and_clear();
        }
        if let Some(bar) = self.posts_bar.read().unwrap().as_ref() {
            bar.finish_and_clear();
        }
        self.phase_bar.finish_and_clear();
        eprintln!("{}", self.tally.read().unwrap());
    }
}

/// Create an appropriate reporter based on terminal capabilities.
pub fn create_reporter() -> Arc<dyn ProgressReporter> {
    if console::Term::stderr().is_term() {
        Arc::new(FancyReporter::new())
    } else {
        Arc::new(SimpleReporter::new())
    }
}
