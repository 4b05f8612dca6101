//! Writing DDS files from a sequence of source images.
//!
//! Pixel data is written first, starting right after the header area, since
//! the header depends on the first decoded image. The headers are written
//! last by seeking back to the start of the output.
//!
//! Sources are consumed in order. Each source becomes one array element,
//! cube face or volume slice, followed immediately by its mip chain.

use std::fs::File;
use std::io::{BufWriter, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use makedds_dds::{build_headers, level_dimension, write_headers, DxgiFormat, SurfaceLayout, DX10_DATA_OFFSET};

use crate::params::SurfaceParams;
use crate::source::{is_encodable, DecodedImage};
use crate::{Error, Result};

/// Result of a completed assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    pub layout: SurfaceLayout,
    /// Total file size, headers included.
    pub bytes_written: u64,
    pub source_count: usize,
}

/// Streams source images into a DDS container.
pub struct Assembler<W: Write + Seek> {
    writer: W,
    params: SurfaceParams,
    source_count: usize,
}

impl<W: Write + Seek> Assembler<W> {
    /// Validates `params` against `source_count` before anything is written.
    pub fn new(writer: W, mut params: SurfaceParams, source_count: usize) -> Result<Self> {
        params.validate(source_count)?;
        Ok(Self {
            writer,
            params,
            source_count,
        })
    }

    /// Load every source through `load` and write the file.
    ///
    /// `load` is called exactly once per source index, in order.
    pub fn run<F>(mut self, mut load: F) -> Result<(BuildSummary, W)>
    where
        F: FnMut(usize) -> Result<DecodedImage>,
    {
        let first = load(0)?;
        self.params.apply_image_defaults(&first);
        ensure_encodable(self.params.format)?;
        let layout = self.params.layout(self.source_count);

        log::info!(
            "assembling {}x{} {} with {} level(s) from {} source(s)",
            layout.width,
            layout.height,
            layout.format,
            layout.levels,
            self.source_count
        );

        self.writer.seek(SeekFrom::Start(DX10_DATA_OFFSET as u64))?;

        let mut next = Some(first);
        for index in 0..self.source_count {
            let image = match next.take() {
                Some(image) => image,
                None => load(index)?,
            };
            self.write_chain(index, image, &layout)?;
        }

        let bytes_written = self.writer.stream_position()?;

        let (header, dx10) = build_headers(&layout);
        self.writer.seek(SeekFrom::Start(0))?;
        write_headers(&mut self.writer, &header, &dx10)?;
        self.writer.flush()?;

        let summary = BuildSummary {
            layout,
            bytes_written,
            source_count: self.source_count,
        };
        Ok((summary, self.writer))
    }

    /// Write one source and its mip levels, each resized from the base.
    fn write_chain(&mut self, index: usize, image: DecodedImage, layout: &SurfaceLayout) -> Result<()> {
        let base = image.resized(layout.width, layout.height);
        self.writer.write_all(&base.encode(layout.format)?)?;
        log::trace!("source {index} level 0: {}x{}", layout.width, layout.height);

        for level in 1..layout.levels as usize {
            let width = level_dimension(layout.width as usize, level) as u32;
            let height = level_dimension(layout.height as usize, level) as u32;
            let mip = base.clone().resized(width, height);
            self.writer.write_all(&mip.encode(layout.format)?)?;
            log::trace!("source {index} level {level}: {width}x{height}");
        }
        Ok(())
    }
}

fn ensure_encodable(format: DxgiFormat) -> Result<()> {
    if is_encodable(format) {
        Ok(())
    } else {
        Err(Error::UnsupportedFormat(format))
    }
}

/// Build a DDS file at `output` from image files.
pub fn build_dds(params: SurfaceParams, sources: &[PathBuf], output: &Path) -> Result<BuildSummary> {
    build_dds_with_progress(params, sources, output, |_, _| {})
}

/// Like [`build_dds`], calling `progress` as each source is loaded.
///
/// The output file is created only after the parameters validate and the
/// first source decodes.
pub fn build_dds_with_progress<F>(
    mut params: SurfaceParams,
    sources: &[PathBuf],
    output: &Path,
    mut progress: F,
) -> Result<BuildSummary>
where
    F: FnMut(usize, &Path),
{
    params.validate(sources.len())?;

    progress(0, &sources[0]);
    let image = DecodedImage::open(&sources[0])?;
    ensure_encodable(params.resolved_format(&image))?;
    let mut first = Some(image);

    let file = File::create(output)?;
    let assembler = Assembler::new(BufWriter::new(file), params, sources.len())?;
    let (summary, _) = assembler.run(|index| match first.take() {
        Some(image) => Ok(image),
        None => {
            progress(index, &sources[index]);
            DecodedImage::open(&sources[index])
        }
    })?;

    log::info!("wrote {} bytes to {}", summary.bytes_written, output.display());
    Ok(summary)
}
