mod block;
mod classify;
mod config;
mod error;
mod inline;
mod normalize;
mod parser;
mod typst;

pub use block::{Block, CalloutKind, Span, visible_text};
pub use classify::{
    callout_kind, callout_title, heading_level, is_bullet, is_heading, is_hr, is_numbered,
    strip_bullet, strip_heading, strip_numbered,
};
pub use config::{CalloutStyle, Config, LinksConfig, PageConfig};
pub use error::{Error, Result};
pub use inline::{format_emphasis, format_inline};
pub use normalize::{normalize, normalize_value};
pub use parser::{NO_CONTENT, parse, parse_value};
pub use typst::blocks_to_typst;

use tracing::debug;
use typst_as_lib::TypstEngine;
use typst_as_lib::typst_kit_options::TypstKitFontOptions;
use typst_library::layout::PagedDocument;
use typst_pdf::PdfOptions;

/// Convert text to Typst markup using default config.
pub fn text_to_typst(text: &str) -> String {
    text_to_typst_with_config(text, &Config::compiled_default())
}

/// Convert text to Typst markup with custom config.
pub fn text_to_typst_with_config(text: &str, config: &Config) -> String {
    let blocks = parse(text);
    blocks_to_typst(&blocks, config)
}

/// Convert text to PDF bytes using default config.
pub fn text_to_pdf(text: &str) -> Result<Vec<u8>> {
    text_to_pdf_with_config(text, &Config::compiled_default())
}

/// Convert text to PDF bytes with custom config.
pub fn text_to_pdf_with_config(text: &str, config: &Config) -> Result<Vec<u8>> {
    blocks_to_pdf(&parse(text), config)
}

/// Render already-parsed blocks to PDF bytes.
pub fn blocks_to_pdf(blocks: &[Block], config: &Config) -> Result<Vec<u8>> {
    let doc = compile_document(blocks_to_typst(blocks, config))?;

    typst_pdf::pdf(&doc, &PdfOptions::default())
        .map_err(|e| Error::Pdf(format!("{:?}", e)))
}

/// Serialize blocks as pretty-printed JSON for non-Rust renderers.
pub fn blocks_to_json(blocks: &[Block]) -> Result<String> {
    Ok(serde_json::to_string_pretty(blocks)?)
}

/// Compile Typst markup to a paged document.
fn compile_document(typst_content: String) -> Result<PagedDocument> {
    debug!(bytes = typst_content.len(), "compiling typst document");

    let font_options = TypstKitFontOptions::new()
        .include_embedded_fonts(true)
        .include_system_fonts(false);

    let engine = TypstEngine::builder()
        .main_file(typst_content)
        .search_fonts_with(font_options)
        .build();

    engine
        .compile()
        .output
        .map_err(|e| Error::Compile(format!("{:?}", e)))
}
