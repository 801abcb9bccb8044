//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 针对未压缩 24 位 BMP 位图的检查与 LSB (最低有效位) 隐写命令行工具。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "针对未压缩 24 位 BMP 位图的命令行工具：检查头部、转储像素、灰度转换，以及在像素数据的最低有效位中嵌入或提取一条消息。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 解析并打印 BMP 头部信息。
    Header(HeaderArgs),

    /// 将像素区以十六进制转储到文件。
    Hexdump(HexdumpArgs),

    /// 生成灰度版本的 BMP。
    Grayscale(GrayscaleArgs),

    /// 将一个消息文件 (至多 255 字节) 嵌入 BMP 的像素区。
    Embed(EmbedArgs),

    /// 提取并打印之前嵌入的消息。
    Extract(ExtractArgs),
}

/// 'header' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HeaderArgs {
    /// 输入 BMP 文件路径。
    pub image: PathBuf,
}

/// 'hexdump' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HexdumpArgs {
    /// 输入 BMP 文件路径。
    pub image: PathBuf,

    /// 保存转储结果的输出文件路径。
    pub dest: PathBuf,
}

/// 'grayscale' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct GrayscaleArgs {
    /// 输入 BMP 文件路径。
    pub image: PathBuf,

    /// 保存灰度图像的输出 BMP 路径。
    pub dest: PathBuf,
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 用于隐写的输入 BMP 文件路径。
    pub image: PathBuf,

    /// 要隐藏的消息文件路径 (至多 255 字节)。
    pub message: PathBuf,

    /// 嵌入完成后，保存结果图像的输出 BMP 路径。
    pub dest: PathBuf,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入消息的 BMP 文件路径。
    pub image: PathBuf,
}
