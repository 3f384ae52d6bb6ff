use anyhow::{Context, Result, bail};
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use log::debug;
use std::fs;
use std::path::Path;

/// NeuQuant 取樣速度，1 最慢品質最好，30 最快
const GIF_QUANTIZE_SPEED: i32 = 10;

/// 將圖片依序編碼為無限循環的 GIF
///
/// 所有幀先完整解碼並編碼在記憶體中，成功後才寫入檔案，失敗時不會留下殘檔
pub fn encode_gif(
    frames: &[impl AsRef<Path>],
    output_path: &Path,
    frame_duration_ms: u32,
) -> Result<()> {
    if frames.is_empty() {
        bail!("沒有任何幀可編碼");
    }

    let delay = Delay::from_numer_denom_ms(frame_duration_ms, 1);
    let decoded = frames
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let image = image::open(path)
                .with_context(|| format!("無法讀取圖片: {}", path.display()))?;
            Ok(Frame::from_parts(image.to_rgba8(), 0, 0, delay))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("編碼 {} 幀 GIF -> {}", decoded.len(), output_path.display());

    let mut buffer = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut buffer, GIF_QUANTIZE_SPEED);
        encoder
            .set_repeat(Repeat::Infinite)
            .context("無法設定 GIF 循環")?;
        encoder.encode_frames(decoded).context("GIF 編碼失敗")?;
    }

    fs::write(output_path, &buffer)
        .with_context(|| format!("無法寫入 GIF: {}", output_path.display()))?;

    Ok(())
}
