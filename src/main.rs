use clap::Parser;

use bmp_stego::{
    cli::{Cli, Commands},
    handler::{handle_embed, handle_extract, handle_grayscale, handle_header, handle_hexdump},
};

/// 程序的主入口点
///
/// 负责解析命令行参数，并根据指定的子命令将执行分派到相应的
/// 处理函数。所有内部错误经由 `anyhow` 传播到这里统一报告。
fn main() -> anyhow::Result<()> {
    // 解析命令行参数。用法错误统一以状态码 1 退出，
    // help/version 的正常展示仍以 0 退出。
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        let code = if err.use_stderr() { 1 } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Header(args) => handle_header(args),
        Commands::Hexdump(args) => handle_hexdump(args),
        Commands::Grayscale(args) => handle_grayscale(args),
        Commands::Embed(args) => handle_embed(args),
        Commands::Extract(args) => handle_extract(args),
    }
}
