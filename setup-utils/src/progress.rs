use tracing::debug;

pub fn report_progress_starting(section: &str) {
    debug!(report = "progress", phase = "starting", section);
}
pub fn report_progress_processing(section: &str, start: usize, end: usize, total: usize) {
    debug!(report = "progress", phase = "processing", section, start, end, total);
}
pub fn report_progress_ending(section: &str) {
    debug!(report = "progress", phase = "ending", section);
}
