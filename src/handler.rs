//! # 命令处理逻辑模块
//!
//! 包含各子命令的高级业务逻辑。本模块负责协调文件 I/O、
//! 调用核心解析与隐写算法，并向用户报告结果。

use crate::cli::{EmbedArgs, ExtractArgs, GrayscaleArgs, HeaderArgs, HexdumpArgs};
use crate::codec;
use crate::constants::HEADER_SIZE;
use crate::frame::MessageFrame;
use crate::header::BmpHeader;
use crate::pixels::PixelBuffer;
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;

/// 打开 BMP 文件并解析、校验其头部。
fn read_header(file: &mut File, path: &Path) -> Result<BmpHeader> {
    let mut head = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64)
        .read_to_end(&mut head)
        .with_context(|| {
            format!(
                "Unable to read header from: {}",
                path.to_string_lossy().red().bold()
            )
        })?;

    BmpHeader::parse(&head).with_context(|| {
        format!(
            "Invalid BMP header in: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 打开 BMP 文件，完成头部校验与像素区读取。
///
/// 这是除 `header` 之外所有子命令共享的入口：头部校验失败的
/// 文件不会产生任何像素数据。
fn open_image(path: &Path) -> Result<(BmpHeader, PixelBuffer)> {
    let mut file = File::open(path).with_context(|| {
        format!(
            "Unable to open image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    let header = read_header(&mut file, path)?;

    let buffer = PixelBuffer::load(&mut file, &header).with_context(|| {
        format!(
            "Unable to read pixel data from: {}",
            path.to_string_lossy().red().bold()
        )
    })?;

    Ok((header, buffer))
}

/// 处理 'header' 命令：解析头部并打印字段报告。
pub fn handle_header(args: HeaderArgs) -> Result<()> {
    let mut file = File::open(&args.image).with_context(|| {
        format!(
            "Unable to open image file: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let header = read_header(&mut file, &args.image)?;
    println!("{header}");

    Ok(())
}

/// 处理 'hexdump' 命令：把整个像素区转储为十六进制文本文件。
pub fn handle_hexdump(args: HexdumpArgs) -> Result<()> {
    let (_, buffer) = open_image(&args.image)?;

    let out = File::create(&args.dest).with_context(|| {
        format!(
            "Unable to create dump file: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;
    let mut out = BufWriter::new(out);

    buffer
        .hex_dump(&mut out)
        .and_then(|()| Ok(out.flush()?))
        .with_context(|| {
            format!(
                "Unable to write hex dump to: {}",
                args.dest.to_string_lossy().red().bold()
            )
        })?;

    println!(
        "Pixel data dumped successfully: {}",
        args.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'grayscale' 命令的执行逻辑。
///
/// 负责读入图像、对像素区做灰度变换，并把原头部与变换后的
/// 像素区写入目标文件。
pub fn handle_grayscale(args: GrayscaleArgs) -> Result<()> {
    let (header, mut buffer) = open_image(&args.image)?;

    buffer.grayscale(&header);

    write_image(&args.dest, &header, &buffer)?;

    println!(
        "Grayscale image saved successfully: {}",
        args.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'embed' 命令的执行逻辑。
///
/// 负责读取图像和消息文件、构造长度前缀帧、在容量检查通过后
/// 把帧嵌入像素区，最后将结果写入目标图像文件。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或消息文件，或头部校验失败。
/// * 消息超过 255 字节。
/// * 像素区的比特容量不足以容纳整个帧。
/// * 无法写入到目标图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let (header, mut buffer) = open_image(&args.image)?;

    let message = fs::read(&args.message).with_context(|| {
        format!(
            "Unable to read message file: {}",
            args.message.to_string_lossy().red().bold()
        )
    })?;

    let frame = MessageFrame::encode(message).with_context(|| {
        format!(
            "Unable to frame message file: {}",
            args.message.to_string_lossy().red().bold()
        )
    })?;

    codec::embed(buffer.bytes_mut(), &frame).with_context(|| {
        format!(
            "Unable to embed {} message bytes into: {}",
            frame.payload_len().to_string().red().bold(),
            args.image.to_string_lossy().red().bold()
        )
    })?;

    write_image(&args.dest, &header, &buffer)?;

    println!(
        "Message embedded successfully: {}",
        args.dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'extract' 命令的执行逻辑。
///
/// 负责读入经过隐写的图像、从像素区重建消息帧，并把恢复的
/// 消息打印到标准输出。消息本身按字节无损恢复，显示时按 UTF-8
/// 宽松解码。
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let (_, buffer) = open_image(&args.image)?;

    let frame = codec::extract(buffer.bytes()).with_context(|| {
        format!(
            "Unable to extract a message from: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!("{}", String::from_utf8_lossy(frame.payload()));

    Ok(())
}

/// 将头部与像素区写入目标 BMP 文件。
///
/// 缓冲写入最后显式 flush：`BufWriter` 在 Drop 时会忽略冲刷错误，
/// 而写入失败必须在成功消息打印之前浮出。
fn write_image(dest: &Path, header: &BmpHeader, buffer: &PixelBuffer) -> Result<()> {
    let out = File::create(dest).with_context(|| {
        format!(
            "Unable to create target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;
    let mut out = BufWriter::new(out);

    buffer
        .store(&mut out, header)
        .and_then(|()| Ok(out.flush()?))
        .with_context(|| {
            format!(
                "Unable to write to target image file: {}",
                dest.to_string_lossy().red().bold()
            )
        })
}
