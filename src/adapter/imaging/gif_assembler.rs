//! GIF Assembler
//!
//! フレーム連番からアニメーションGIFを作成する（`image` クレート）

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::FilterType;
use image::{Delay, Frame, RgbaImage};
use log::debug;

use crate::domain::entities::render_request::{AssemblyReport, FrameSequence};
use crate::domain::errors::ProcessingError;
use crate::domain::repositories::animation_assembler::AnimationAssembler;

/// 再生フレームレート
pub const FRAMES_PER_SECOND: u32 = 30;

/// アニメーションGIFの組み立て
///
/// 範囲内で見つからないフレームは飛ばし、存在するフレームを昇順に並べる。
/// 無限ループで再生される。
#[derive(Debug, Clone, Copy, Default)]
pub struct GifAssembler;

impl GifAssembler {
    pub fn new() -> Self {
        Self
    }

    fn render_error(frames: &FrameSequence, message: impl Into<String>) -> ProcessingError {
        ProcessingError::Render {
            scene: frames.base_name.clone(),
            message: message.into(),
        }
    }

    fn load_frame(
        frames: &FrameSequence,
        path: &Path,
        size: Option<(u32, u32)>,
    ) -> Result<RgbaImage, ProcessingError> {
        let image = image::open(path)
            .map_err(|e| Self::render_error(frames, format!("{}: {}", path.display(), e)))?
            .to_rgba8();

        // GIFの論理画面サイズは先頭フレームで決まる
        match size {
            Some((width, height)) if image.dimensions() != (width, height) => {
                debug!("Resizing {} to {}x{}", path.display(), width, height);
                Ok(image::imageops::resize(
                    &image,
                    width,
                    height,
                    FilterType::Triangle,
                ))
            }
            _ => Ok(image),
        }
    }

    fn encode(
        frames: &FrameSequence,
        present: &[PathBuf],
        output: &Path,
    ) -> Result<(), ProcessingError> {
        let file = File::create(output).map_err(|e| ProcessingError::output_path(output, e))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| Self::render_error(frames, e.to_string()))?;

        let delay = Delay::from_numer_denom_ms(1000, FRAMES_PER_SECOND);
        let mut size = None;

        for path in present {
            let image = Self::load_frame(frames, path, size)?;
            size.get_or_insert(image.dimensions());
            encoder
                .encode_frame(Frame::from_parts(image, 0, 0, delay))
                .map_err(|e| Self::render_error(frames, e.to_string()))?;
        }

        Ok(())
    }
}

impl AnimationAssembler for GifAssembler {
    fn extension(&self) -> &'static str {
        "gif"
    }

    fn assemble(
        &self,
        frames: &FrameSequence,
        output: &Path,
    ) -> Result<AssemblyReport, ProcessingError> {
        let (present, missing): (Vec<PathBuf>, Vec<PathBuf>) =
            frames.expected_paths().partition(|path| path.is_file());

        for path in &missing {
            debug!("Missing frame: {}", path.display());
        }

        if present.is_empty() {
            return Err(Self::render_error(
                frames,
                format!("no rendered frames found in {}", frames.dir.display()),
            ));
        }

        if let Err(e) = Self::encode(frames, &present, output) {
            // 書きかけのファイルは残さない
            let _ = fs::remove_file(output);
            return Err(e);
        }

        Ok(AssemblyReport {
            frames_written: present.len(),
            frames_missing: missing.len(),
        })
    }
}
