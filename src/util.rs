use indicatif::{ProgressBar, ProgressStyle};

/// Spinner counting processed records, drawn on stderr. Hidden when `quiet`.
pub(crate) fn get_ticker(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template(
        "{spinner:.blue} {msg} [{elapsed_precise}] {pos} records processed",
    )
    .unwrap_or_else(|_| ProgressStyle::default_spinner())
    .tick_strings(&[
        "▹▹▹▹▹",
        "▸▹▹▹▹",
        "▹▸▹▹▹",
        "▹▹▸▹▹",
        "▹▹▹▸▹",
        "▹▹▹▹▸",
        "▪▪▪▪▪",
    ]);
    spinner.set_style(style);
    spinner
}
