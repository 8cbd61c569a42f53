use owo_colors::OwoColorize;
use serialbook_core::{Chapter, ChapterLink, Progress, Report, SkippedChapter};

use crate::VERSION;

/// Print a styled banner
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Serialbook".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Bind a web novel into a single book\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red(), message.bright_red());
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Console progress lines for a binding run
pub struct ConsoleProgress {
    pub verbose: bool,
}

impl Progress for ConsoleProgress {
    fn discovered(&self, total: usize) {
        print_info(&format!("Found {} chapters. Starting compilation...", total));
    }

    fn chapter_started(&self, number: usize, total: usize, link: &ChapterLink) {
        print_step(number, total, &format!("Adding chapter {}", number));
        if self.verbose {
            eprintln!("  {} {}", "URL:".dimmed(), link.as_str().bright_white());
        }
    }

    fn chapter_rendered(&self, _number: usize, _total: usize, chapter: &Chapter) {
        if self.verbose {
            eprintln!(
                "  {} {} {}",
                "Title:".dimmed(),
                chapter.title.bright_white(),
                format!("({} paragraphs)", chapter.paragraphs.len()).dimmed()
            );
        }
    }

    fn chapter_skipped(&self, skipped: &SkippedChapter) {
        print_warning(&format!("Skipping chapter {} ({}): {}", skipped.number, skipped.link, skipped.reason));
    }

    fn finished(&self, report: &Report) {
        let size = std::fs::metadata(&report.output).map(|m| m.len()).unwrap_or_default();

        eprintln!();
        print_success(&format!(
            "Your numbered book is ready: {}",
            report.output.display().bright_white()
        ));
        eprintln!(
            "  {} {} of {} ({} skipped)",
            "Chapters:".dimmed(),
            report.rendered.to_string().bright_white(),
            report.discovered,
            report.skipped.len()
        );
        eprintln!(
            "  {} {}  {} {}",
            "Pages:".dimmed(),
            report.pages.to_string().bright_white(),
            "Size:".dimmed(),
            format_size(size).bright_white()
        );
    }
}
