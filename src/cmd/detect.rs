use std::path::Path;

use anyhow::Result;
#[cfg(feature = "pdf")]
use serde::Serialize;

use slidesplit::SplitConfig;
#[cfg(feature = "pdf")]
use slidesplit::{PageSize, SlideRegion};

/// Regions found on one page.
#[cfg(feature = "pdf")]
#[derive(Debug, Serialize)]
struct PageRegions {
    /// 1-based page number.
    page: usize,
    size: PageSize,
    regions: Vec<SlideRegion>,
}

#[cfg(feature = "pdf")]
pub fn cmd_detect(
    input: &Path,
    page: Option<usize>,
    config: &SplitConfig,
    json: bool,
) -> Result<()> {
    use anyhow::bail;
    use slidesplit::document::render::PdfiumRasterizer;
    use slidesplit::{RegionDetector, SourceDocument};

    let rasterizer = PdfiumRasterizer::bind()?;
    let source = rasterizer.open(input)?;
    let detector = RegionDetector::new(config.detector.clone());

    let indices: Vec<usize> = match page {
        Some(0) => bail!("pages are numbered from 1"),
        Some(n) if n > source.page_count() => {
            bail!("page {n} out of range (document has {} pages)", source.page_count())
        }
        Some(n) => vec![n - 1],
        None => (0..source.page_count()).collect(),
    };

    let mut results = Vec::with_capacity(indices.len());
    for index in indices {
        results.push(PageRegions {
            page: index + 1,
            size: source.page_size(index)?,
            regions: detector.detect(&source, index)?,
        });
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        println!(
            "Page {} ({:.1} x {:.1}): {} region(s)",
            result.page,
            result.size.width,
            result.size.height,
            result.regions.len()
        );
        for (i, r) in result.regions.iter().enumerate() {
            println!(
                "   {}. x={:.1} y={:.1} w={:.1} h={:.1}",
                i + 1,
                r.x,
                r.y,
                r.width,
                r.height
            );
        }
    }

    Ok(())
}

#[cfg(not(feature = "pdf"))]
pub fn cmd_detect(
    _input: &Path,
    _page: Option<usize>,
    _config: &SplitConfig,
    _json: bool,
) -> Result<()> {
    anyhow::bail!("slidesplit was built without the `pdf` feature; rendering is unavailable")
}
