//! Run orchestration.
//!
//! [`Pipeline::run`] drives one binding run from the listing page to the
//! written artifact:
//!
//! 1. fetch the listing page (failure aborts the run);
//! 2. collect and naturally sort the chapter links (none found ends the run
//!    with [`Outcome::NoChapters`]);
//! 3. render the title page, then fetch, extract and render each chapter in
//!    order, one request at a time with a short pause in between;
//! 4. write the finished document once, at the very end.
//!
//! A chapter that fails to download or has no content left after filtering
//! is skipped. Chapter numbers are positions in the sorted list, so a skipped
//! chapter leaves a gap in the numbering rather than shifting later ones.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::chapter::{Chapter, ChapterExtractor};
use crate::config::{DEFAULT_OUTPUT, SiteProfile};
use crate::fetch::{FetchConfig, Fetcher};
use crate::links::{ChapterLink, collect_links};
use crate::natural::sort_natural;
use crate::render::{BookRenderer, PageSink};
use crate::{Result, SerialbookError};

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    ListingFetched,
    LinksCollected,
    Sorted,
    Fetching { number: usize },
    Extracting { number: usize },
    Rendered { number: usize },
    Skipped { number: usize },
    Finalized,
}

/// Configuration for a binding run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub profile: SiteProfile,
    pub fetch: FetchConfig,
    /// Pause between consecutive chapter requests.
    pub delay: Duration,
    /// Where the finished document is written.
    pub output: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            profile: SiteProfile::default(),
            fetch: FetchConfig::default(),
            delay: Duration::from_millis(100),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl PipelineConfig {
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::new()
    }
}

/// Builder for PipelineConfig.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use serialbook_core::{PipelineConfig, SiteProfile};
///
/// let config = PipelineConfig::builder()
///     .profile(SiteProfile::default())
///     .timeout(10)
///     .delay(Duration::from_millis(250))
///     .output("book.pdf")
///     .build();
/// assert_eq!(config.fetch.timeout, 10);
/// ```
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self { config: PipelineConfig::default() }
    }

    pub fn profile(mut self, profile: SiteProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn fetch(mut self, fetch: FetchConfig) -> Self {
        self.config.fetch = fetch;
        self
    }

    /// Sets the chapter request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the listing request timeout in seconds.
    pub fn listing_timeout(mut self, secs: u64) -> Self {
        self.config.fetch.listing_timeout = secs;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.fetch.user_agent = user_agent.into();
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = delay;
        self
    }

    pub fn output(mut self, output: impl Into<PathBuf>) -> Self {
        self.config.output = output.into();
        self
    }

    pub fn build(self) -> PipelineConfig {
        self.config
    }
}

impl Default for PipelineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a chapter contributed no page.
#[derive(Debug)]
pub enum SkipReason {
    Fetch(SerialbookError),
    NoContent,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Fetch(err) => write!(f, "{err}"),
            SkipReason::NoContent => f.write_str("no story text left after filtering"),
        }
    }
}

#[derive(Debug)]
pub struct SkippedChapter {
    pub number: usize,
    pub link: ChapterLink,
    pub reason: SkipReason,
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct Report {
    /// Chapter links found on the listing page.
    pub discovered: usize,
    pub rendered: usize,
    pub skipped: Vec<SkippedChapter>,
    /// Pages in the written document, title page included.
    pub pages: usize,
    pub output: PathBuf,
}

#[derive(Debug)]
pub enum Outcome {
    /// The document was written.
    Completed(Report),
    /// The listing page had no chapter links; nothing was written.
    NoChapters,
}

/// Observer for console progress. All methods default to doing nothing.
pub trait Progress {
    fn discovered(&self, _total: usize) {}
    fn chapter_started(&self, _number: usize, _total: usize, _link: &ChapterLink) {}
    fn chapter_rendered(&self, _number: usize, _total: usize, _chapter: &Chapter) {}
    fn chapter_skipped(&self, _skipped: &SkippedChapter) {}
    fn finished(&self, _report: &Report) {}
}

/// A [`Progress`] that reports nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {}

/// One binding run.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    extractor: ChapterExtractor,
    renderer: BookRenderer,
}

impl Pipeline {
    /// Validates the profile and compiles its selectors.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.profile.validate()?;
        let extractor = ChapterExtractor::new(config.profile.extract_config())?;
        let renderer = BookRenderer::new(config.profile.render_config());
        Ok(Self { config, extractor, renderer })
    }

    /// Runs the whole pipeline, rendering into `sink`.
    ///
    /// # Errors
    ///
    /// Fails if the listing page cannot be fetched, or if rendering or
    /// writing the document fails. Individual chapter failures are not
    /// errors; they show up in [`Report::skipped`].
    pub async fn run<S: PageSink>(&self, mut sink: S, progress: &dyn Progress) -> Result<Outcome> {
        let profile = &self.config.profile;
        let scope = profile.link_scope()?;
        let fetcher = Fetcher::new(self.config.fetch.clone())?;
        stage(Stage::Init);

        let listing = fetcher.fetch_listing(scope.base_url()).await?;
        stage(Stage::ListingFetched);

        let mut links = collect_links(&listing, &scope);
        stage(Stage::LinksCollected);

        sort_natural(&mut links);
        stage(Stage::Sorted);

        if links.is_empty() {
            tracing::warn!(url = %scope.base_url(), "no chapter links found on listing page");
            return Ok(Outcome::NoChapters);
        }

        let total = links.len();
        tracing::info!(total, "found chapters");
        progress.discovered(total);

        self.renderer.title_page(&mut sink, &profile.title_page())?;

        let mut rendered = 0;
        let mut skipped = Vec::new();

        for (index, link) in links.into_iter().enumerate() {
            let number = index + 1;
            if index > 0 && !self.config.delay.is_zero() {
                tokio::time::sleep(self.config.delay).await;
            }

            progress.chapter_started(number, total, &link);
            match self.chapter(&fetcher, number, &link).await {
                Ok(chapter) => {
                    self.renderer.chapter(&mut sink, number, &chapter)?;
                    stage(Stage::Rendered { number });
                    tracing::info!(number, total, title = %chapter.title, "rendered chapter");
                    rendered += 1;
                    progress.chapter_rendered(number, total, &chapter);
                }
                Err(reason) => {
                    stage(Stage::Skipped { number });
                    tracing::warn!(number, link = %link, reason = %reason, "skipping chapter");
                    let entry = SkippedChapter { number, link, reason };
                    progress.chapter_skipped(&entry);
                    skipped.push(entry);
                }
            }
        }

        let pages = sink.page_count();
        let document = sink.finish()?;
        std::fs::write(&self.config.output, document.as_ref())?;
        stage(Stage::Finalized);

        let report = Report { discovered: total, rendered, skipped, pages, output: self.config.output.clone() };
        tracing::info!(
            rendered = report.rendered,
            skipped = report.skipped.len(),
            output = %report.output.display(),
            "document written"
        );
        progress.finished(&report);

        Ok(Outcome::Completed(report))
    }

    async fn chapter(&self, fetcher: &Fetcher, number: usize, link: &ChapterLink) -> std::result::Result<Chapter, SkipReason> {
        stage(Stage::Fetching { number });
        let html = fetcher.fetch_chapter(link.as_str()).await.map_err(SkipReason::Fetch)?;

        stage(Stage::Extracting { number });
        self.extractor.extract(&html).ok_or(SkipReason::NoContent)
    }
}

fn stage(stage: Stage) {
    tracing::debug!(?stage, "pipeline stage");
}
