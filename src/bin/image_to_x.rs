use anyhow::Result;
use clap::Parser;
use console::style;
use log::{info, warn};
use screenshot_utils::component::SequenceConverter;
use screenshot_utils::config::{
    ConvertConfig, DEFAULT_GIF_DURATION_MS, DEFAULT_VIDEO_FPS, OutputType,
};
use screenshot_utils::error::exit_code_of;
use screenshot_utils::init;
use screenshot_utils::signal::setup_shutdown_signal;
use std::path::PathBuf;
use std::process::ExitCode;

/// 將截圖序列轉換為 GIF 或影片
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// 截圖所在資料夾
    image_folder: PathBuf,

    /// 輸出 GIF 或影片的資料夾，不存在時會建立
    output_folder: PathBuf,

    /// 輸出類型
    #[arg(long = "type", value_enum)]
    output_type: OutputType,

    /// GIF 每幀顯示時間（毫秒）
    #[arg(long, default_value_t = DEFAULT_GIF_DURATION_MS)]
    duration: u32,

    /// 影片幀率
    #[arg(long, default_value_t = DEFAULT_VIDEO_FPS)]
    fps: u32,
}

fn run(args: Args) -> Result<ExitCode> {
    let config = ConvertConfig::new(
        args.image_folder,
        args.output_folder,
        args.output_type,
        args.duration,
        args.fps,
    )?;
    let shutdown_signal = setup_shutdown_signal()?;

    let summary = SequenceConverter::new(config, shutdown_signal).run()?;
    if summary.failed() > 0 {
        warn!("有 {} 個序列失敗", summary.failed());
        return Ok(ExitCode::FAILURE);
    }
    if summary.interrupted {
        return Ok(ExitCode::FAILURE);
    }

    info!("程式正常結束");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init::init();
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", style("錯誤:").red().bold(), e);
            ExitCode::from(exit_code_of(&e))
        }
    }
}
