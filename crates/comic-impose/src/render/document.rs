//! Multi-page document assembly
//!
//! Each spread image becomes one PDF page sized to the image at the given
//! resolution, so nothing is rescaled on the way into the document.

use crate::constants::{DOCUMENT_TITLE, px_to_pt};
use crate::render::codec;
use crate::types::*;
use printpdf::{
    Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Pt, RawImage, RawImageData,
    RawImageFormat, XObjectTransform,
};
use std::path::{Path, PathBuf};

/// Build the document from `spreads`, one page per image, in slice order
pub fn document_bytes(spreads: &[PathBuf], dpi: f32) -> Result<Vec<u8>> {
    if spreads.is_empty() {
        return Err(ImposeError::NoPages);
    }

    let mut doc = PdfDocument::new(DOCUMENT_TITLE);
    let mut pages = Vec::with_capacity(spreads.len());

    for path in spreads {
        let rgb = codec::decode(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let raw = RawImage {
            pixels: RawImageData::U8(rgb.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let xobject_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: xobject_id,
            transform: XObjectTransform {
                translate_x: Some(Pt(0.0)),
                translate_y: Some(Pt(0.0)),
                scale_x: None,
                scale_y: None,
                dpi: Some(dpi),
                rotate: None,
            },
        }];

        pages.push(PdfPage::new(
            Mm::from(Pt(px_to_pt(width, dpi))),
            Mm::from(Pt(px_to_pt(height, dpi))),
            ops,
        ));
    }

    doc.with_pages(pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        log::debug!("Document assembled with {} warnings", warnings.len());
    }

    Ok(bytes)
}

/// Assemble `spreads` and write the document to `path`
pub async fn save_document(spreads: &[PathBuf], dpi: f32, path: impl AsRef<Path>) -> Result<()> {
    let spreads = spreads.to_vec();
    let path = path.as_ref().to_owned();

    let bytes = tokio::task::spawn_blocking(move || document_bytes(&spreads, dpi)).await??;
    tokio::fs::write(&path, bytes).await?;

    log::info!("PDF saved: {}", path.display());
    Ok(())
}
