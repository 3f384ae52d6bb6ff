//! 整合測試 - 在暫存資料夾中驗證兩個工具的完整流程

use std::fs;
use std::io::BufReader;
use std::path::Path;
use std::process::Command;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, Rgb, RgbImage};
use screenshot_utils::component::sequence_converter::{SequenceStatus, group_sequences, scan_screenshots};
use screenshot_utils::component::smart_copy::select_files;
use screenshot_utils::component::{SequenceConverter, SmartCopy};
use screenshot_utils::config::{ConvertConfig, CopyConfig, OutputType, SelectionCriterion};
use screenshot_utils::tools::NoopProgress;
use tempfile::TempDir;

fn write_frame(dir: &Path, sequence: u32, frame: u32, shade: u8) {
    let image = RgbImage::from_pixel(8, 6, Rgb([shade, shade, shade]));
    image
        .save(dir.join(format!("screenshot_seq_{sequence}_frame_{frame}.png")))
        .unwrap();
}

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .output()
        .is_ok_and(|o| o.status.success())
}

/// 測試 1: 截圖分組與排序
#[test]
fn test_scan_and_group_screenshots() {
    let temp_dir = TempDir::new().unwrap();
    for frame in [3, 1, 10, 2] {
        write_frame(temp_dir.path(), 1, frame, 10);
    }
    for frame in [2, 1] {
        write_frame(temp_dir.path(), 7, frame, 10);
    }
    fs::write(temp_dir.path().join("readme.txt"), "ignored").unwrap();

    let files = scan_screenshots(temp_dir.path()).unwrap();
    assert_eq!(files.len(), 6, "只應掃描到截圖");

    let sequences = group_sequences(&files).unwrap();
    assert_eq!(sequences.len(), 2);

    let frames: Vec<String> = sequences[0]
        .files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        frames,
        vec![
            "screenshot_seq_1_frame_1.png",
            "screenshot_seq_1_frame_2.png",
            "screenshot_seq_1_frame_3.png",
            "screenshot_seq_1_frame_10.png",
        ]
    );
    assert_eq!(sequences[1].key, "screenshot_seq_7");
}

/// 測試 2: 產生 GIF 並解碼驗證幀數
#[test]
fn test_convert_to_gif() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let output_folder = output.path().join("gifs");
    for frame in 1..=3 {
        write_frame(input.path(), 4, frame, (frame * 60) as u8);
    }
    write_frame(input.path(), 5, 1, 200);

    let config = ConvertConfig::new(
        input.path().to_path_buf(),
        output_folder.clone(),
        OutputType::Gif,
        120,
        10,
    )
    .unwrap();
    let converter = SequenceConverter::new(config, Arc::new(AtomicBool::new(false)));

    let summary = converter.convert(&NoopProgress).unwrap();
    assert_eq!(summary.completed(), 2);

    let gif_path = output_folder.join("screenshot_seq_4.gif");
    let decoder = GifDecoder::new(BufReader::new(fs::File::open(&gif_path).unwrap())).unwrap();
    let frames = decoder.into_frames().collect_frames().unwrap();
    assert_eq!(frames.len(), 3);
    assert!(output_folder.join("screenshot_seq_5.gif").is_file());
}

/// 測試 3: 單一序列讀取失敗不留下殘檔，其他序列照常輸出
#[test]
fn test_broken_frame_fails_only_its_sequence() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_frame(input.path(), 1, 1, 10);
    fs::write(input.path().join("screenshot_seq_1_frame_2.png"), b"broken").unwrap();
    write_frame(input.path(), 2, 1, 10);

    let config = ConvertConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        OutputType::Gif,
        100,
        10,
    )
    .unwrap();
    let summary = SequenceConverter::new(config, Arc::new(AtomicBool::new(false)))
        .convert(&NoopProgress)
        .unwrap();

    assert_eq!(summary.outcomes[0].status, SequenceStatus::Failed);
    assert_eq!(summary.outcomes[1].status, SequenceStatus::Completed);
    assert!(!output.path().join("screenshot_seq_1.gif").exists());
    assert!(output.path().join("screenshot_seq_2.gif").exists());
}

/// 測試 4: 產生 MP4（需要 ffmpeg）
#[test]
fn test_convert_to_video() {
    if !ffmpeg_available() {
        println!("跳過測試：找不到 ffmpeg");
        return;
    }

    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for frame in 1..=5 {
        write_frame(input.path(), 3, frame, (frame * 40) as u8);
    }

    let config = ConvertConfig::new(
        input.path().to_path_buf(),
        output.path().to_path_buf(),
        OutputType::Video,
        100,
        5,
    )
    .unwrap();
    let summary = SequenceConverter::new(config, Arc::new(AtomicBool::new(false)))
        .convert(&NoopProgress)
        .unwrap();

    assert_eq!(summary.completed(), 1, "{:?}", summary.outcomes);
    let video = output.path().join("screenshot_seq_3.mp4");
    assert!(video.is_file());
    assert!(fs::metadata(&video).unwrap().len() > 0);
    assert!(!output.path().join("screenshot_seq_3.partial.mp4").exists());
}

/// 測試 5: 百分比抽樣複製
#[test]
fn test_smart_copy_percentage() {
    let source = TempDir::new().unwrap();
    let dest = TempDir::new().unwrap();
    for i in 0..100 {
        fs::write(source.path().join(format!("img_{i}.png")), format!("{i}")).unwrap();
    }

    let config = CopyConfig {
        source_dir: source.path().to_path_buf(),
        dest_dir: dest.path().to_path_buf(),
        criterion: SelectionCriterion::PercentageSample { percentage: 10.0 },
        create_dest: false,
    };
    let result = SmartCopy::new(config, Arc::new(AtomicBool::new(false)))
        .copy(&NoopProgress)
        .unwrap();

    assert_eq!(result.copied, 10);
    for i in (0..100).step_by(10) {
        assert!(dest.path().join(format!("img_{i}.png")).is_file());
    }
    assert!(!dest.path().join("img_5.png").exists());
}

/// 測試 6: 範圍邊界
#[test]
fn test_select_range_boundaries() {
    let source = TempDir::new().unwrap();
    for name in ["seq_5_a.png", "seq_5_b.png", "seq_55_a.png", "seq_6_a.png"] {
        fs::write(source.path().join(name), "x").unwrap();
    }

    let exact = SelectionCriterion::RangeFilter {
        prefix: "seq".to_string(),
        lower_limit: 5,
        upper_limit: 5,
    };
    let mut names: Vec<String> = select_files(source.path(), &exact)
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    names.sort();
    assert_eq!(names, vec!["seq_5_a.png", "seq_5_b.png"]);

    let inverted = SelectionCriterion::RangeFilter {
        prefix: "seq".to_string(),
        lower_limit: 6,
        upper_limit: 5,
    };
    assert!(select_files(source.path(), &inverted).unwrap().is_empty());
}
