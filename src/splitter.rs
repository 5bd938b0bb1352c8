//! Page splitting: one output page per detected slide.
//!
//! Pages are processed strictly in input order and output pages are appended
//! as they are produced, so all of page N's slides precede page N+1's. Any
//! render or compose error aborts the run; nothing is saved.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::SplitConfig;
use crate::detect::{select_top_regions, RegionDetector};
use crate::document::{OutputDocument, SourceDocument};
use crate::error::{Result, SplitError};

/// Outcome of a completed split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    pub input_pages: usize,
    pub output_pages: usize,
    /// 0-based indices of pages with too few regions to split.
    pub skipped_pages: Vec<usize>,
}

/// Drives the detector over every page and assembles the output.
#[derive(Debug, Clone)]
pub struct PageSplitter {
    detector: RegionDetector,
    regions_per_page: usize,
}

impl Default for PageSplitter {
    fn default() -> Self {
        Self::new(&SplitConfig::default())
    }
}

impl PageSplitter {
    pub fn new(config: &SplitConfig) -> Self {
        Self {
            detector: RegionDetector::new(config.detector.clone()),
            regions_per_page: config.splitter.regions_per_page,
        }
    }

    pub fn detector(&self) -> &RegionDetector {
        &self.detector
    }

    /// Split without progress reporting.
    pub fn split<S, O>(&self, source: &S, output: &mut O) -> Result<SplitReport>
    where
        S: SourceDocument + ?Sized,
        O: OutputDocument + ?Sized,
    {
        self.split_with_progress(source, output, |_| {})
    }

    /// Split `source` into `output`.
    ///
    /// `on_progress` is called after every input page, skipped or not, with
    /// `(page index + 1) / page count`; the last call passes exactly 1.0.
    pub fn split_with_progress<S, O, F>(
        &self,
        source: &S,
        output: &mut O,
        mut on_progress: F,
    ) -> Result<SplitReport>
    where
        S: SourceDocument + ?Sized,
        O: OutputDocument + ?Sized,
        F: FnMut(f64),
    {
        let total = source.page_count();
        let mut report = SplitReport {
            input_pages: total,
            ..SplitReport::default()
        };

        for index in 0..total {
            let regions = self.detector.detect(source, index)?;
            match select_top_regions(&regions, self.regions_per_page) {
                Some(selected) => {
                    for region in selected {
                        let page = output.new_page(region.size())?;
                        output.show_region(page, index, region)?;
                        report.output_pages += 1;
                    }
                }
                None => {
                    tracing::warn!(
                        "Page {}: found {} region(s), need {}; skipping",
                        index + 1,
                        regions.len(),
                        self.regions_per_page
                    );
                    report.skipped_pages.push(index);
                }
            }
            on_progress((index + 1) as f64 / total as f64);
        }

        tracing::info!(
            "Split {} page(s) into {} page(s), {} skipped",
            report.input_pages,
            report.output_pages,
            report.skipped_pages.len()
        );
        Ok(report)
    }
}

/// Split the PDF at `input` and save the result.
///
/// Writes to `output` when given, otherwise to a new temporary `.pdf` file
/// that is kept for the caller. Returns the written path. A temporary file
/// created here is removed again if the run fails.
#[cfg(feature = "pdf")]
pub fn process_document<F>(
    input: &Path,
    output: Option<&Path>,
    config: &SplitConfig,
    on_progress: F,
) -> Result<(PathBuf, SplitReport)>
where
    F: FnMut(f64),
{
    use crate::document::render::PdfiumRasterizer;
    use crate::document::PdfWriter;

    config.validate()?;
    let rasterizer = PdfiumRasterizer::bind()?;
    let source = rasterizer.open(input)?;
    let mut writer = PdfWriter::from_layout(source.layout());
    let report = PageSplitter::new(config).split_with_progress(&source, &mut writer, on_progress)?;
    let path = save_output(&mut writer, output)?;
    Ok((path, report))
}

/// Without the `pdf` feature there is no renderer to detect with.
#[cfg(not(feature = "pdf"))]
pub fn process_document<F>(
    _input: &Path,
    _output: Option<&Path>,
    _config: &SplitConfig,
    _on_progress: F,
) -> Result<(PathBuf, SplitReport)>
where
    F: FnMut(f64),
{
    Err(SplitError::RendererUnavailable(
        "built without the `pdf` feature".into(),
    ))
}

/// Save `document` to `output`, or to a new kept temporary `.pdf` when no
/// path is given. A temporary file is removed again if saving fails.
pub fn save_output<O: OutputDocument + ?Sized>(
    document: &mut O,
    output: Option<&Path>,
) -> Result<PathBuf> {
    let (path, temporary) = match output {
        Some(path) => (path.to_path_buf(), false),
        None => (temporary_output()?, true),
    };
    if let Err(e) = document.save(&path) {
        if temporary {
            let _ = std::fs::remove_file(&path);
        }
        return Err(e);
    }
    Ok(path)
}

fn temporary_output() -> Result<PathBuf> {
    let file = tempfile::Builder::new()
        .prefix("slidesplit-")
        .suffix(".pdf")
        .tempfile()?;
    let (_, path) = file.keep().map_err(|e| SplitError::Io(e.error))?;
    Ok(path)
}
