use docdeck_core::models::{UploadItem, UploadStatus};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn create_file_bar(file_name: &str) -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:<30} [{bar:30.cyan/blue}] {pos:>3}%")
            .unwrap()
            .progress_chars("█▓▒░ "),
    );
    pb.set_message(file_name.to_string());
    pb
}

/// One bar per file of an upload batch, driven from the tracker's items.
pub struct UploadProgress {
    pub multi: MultiProgress,
    bars: Vec<ProgressBar>,
}

impl UploadProgress {
    pub fn new(file_names: &[String]) -> Self {
        let multi = MultiProgress::new();
        let bars = file_names.iter().map(|name| multi.add(create_file_bar(name))).collect();
        Self { multi, bars }
    }

    /// Mirror the tracker's current per-file state onto the bars.
    pub fn update(&self, items: &[UploadItem]) {
        for (bar, item) in self.bars.iter().zip(items) {
            bar.set_position(item.progress as u64);
            match item.status {
                UploadStatus::Uploading => {}
                UploadStatus::Success => {
                    if !bar.is_finished() {
                        bar.finish_with_message(format!("✓ {}", item.file_name));
                    }
                }
                UploadStatus::Error => {
                    if !bar.is_finished() {
                        let reason = item.error.as_deref().unwrap_or("failed");
                        bar.finish_with_message(format!("✗ {} ({})", item.file_name, reason));
                    }
                }
            }
        }
    }
}
