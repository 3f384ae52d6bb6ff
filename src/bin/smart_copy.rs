use anyhow::Result;
use clap::Parser;
use console::style;
use log::info;
use screenshot_utils::component::SmartCopy;
use screenshot_utils::config::{CopyConfig, SelectionCriterion};
use screenshot_utils::error::exit_code_of;
use screenshot_utils::init;
use screenshot_utils::signal::setup_shutdown_signal;
use std::path::PathBuf;
use std::process::ExitCode;

/// 依序列範圍或總數百分比複製檔案
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// 來源資料夾
    source_dir: PathBuf,

    /// 目的資料夾
    dest_dir: PathBuf,

    /// 用於範圍過濾的檔名前綴（例如 seq）
    #[arg(long, allow_hyphen_values = true)]
    prefix: Option<String>,

    /// 序列範圍下限（含）
    #[arg(long, allow_negative_numbers = true)]
    lower_limit: Option<i64>,

    /// 序列範圍上限（含）
    #[arg(long, allow_negative_numbers = true)]
    upper_limit: Option<i64>,

    /// 要複製的檔案百分比
    #[arg(long, allow_negative_numbers = true)]
    percentage: Option<f64>,

    /// 目的資料夾不存在時建立
    #[arg(long)]
    create_dest: bool,
}

fn run(args: Args) -> Result<ExitCode> {
    let criterion = SelectionCriterion::resolve(
        args.prefix,
        args.lower_limit,
        args.upper_limit,
        args.percentage,
    )?;
    let config = CopyConfig {
        source_dir: args.source_dir,
        dest_dir: args.dest_dir,
        criterion,
        create_dest: args.create_dest,
    };
    let shutdown_signal = setup_shutdown_signal()?;

    let result = SmartCopy::new(config, shutdown_signal).run()?;
    if result.interrupted {
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
