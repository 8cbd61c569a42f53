pub mod chapter;
pub mod config;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod links;
pub mod natural;
pub mod parse;
#[cfg(feature = "fetch")]
pub mod pipeline;
pub mod render;

pub use chapter::{Chapter, ChapterExtractor, Denylist, ExtractConfig};
pub use config::{DEFAULT_OUTPUT, SiteProfile};
pub use error::{Result, SerialbookError};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Fetcher};
pub use links::{ChapterLink, LinkScope, collect_links};
pub use natural::{NaturalKey, natural_key, sort_natural};
pub use parse::Document;
#[cfg(feature = "fetch")]
pub use pipeline::{
    Outcome, Pipeline, PipelineConfig, PipelineConfigBuilder, Progress, Report, Silent, SkipReason, SkippedChapter, Stage,
};
#[cfg(feature = "pdf")]
pub use render::{PageLayout, PdfSink};
pub use render::{BookRenderer, PageSink, RenderConfig, TextSink, TitlePage, running_header};
