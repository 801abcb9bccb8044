use anyhow::Ok;
use bmp_stego::{
    cli::{EmbedArgs, ExtractArgs, GrayscaleArgs, HeaderArgs, HexdumpArgs},
    codec,
    handler::{handle_embed, handle_extract, handle_grayscale, handle_header, handle_hexdump},
    header::BmpHeader,
    pixels::PixelBuffer,
};
use image::{ImageBuffer, Rgb};
use rand::RngCore;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的 24 位测试 BMP
fn create_test_bmp(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(3))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgb([chunk[0], chunk[1], chunk[2]]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 打开一个 BMP 并直接用库 API 提取嵌入的负载，用于验证落盘结果
fn read_embedded_payload(path: &Path) -> Vec<u8> {
    let mut file = File::open(path).expect("Failed to open image.");
    let mut head = vec![0u8; 54];
    file.read_exact(&mut head).expect("Failed to read header.");

    let header = BmpHeader::parse(&head).expect("Invalid BMP header.");
    let buffer = PixelBuffer::load(&mut file, &header).expect("Failed to load pixel data.");

    codec::extract(buffer.bytes())
        .expect("Failed to extract frame.")
        .payload()
        .to_vec()
}

/// 验证从嵌入到提取的完整流程
#[test]
fn test_handle_embed_and_extract_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.bmp");
    let embedded_image_path = dir.path().join("embedded.bmp");
    let message_path = dir.path().join("message.txt");

    create_test_bmp(&original_image_path, 50, 50);
    let original_message = "Hidden in plain sight! 大隐隐于市！";
    fs::write(&message_path, original_message)?;

    // 2. 测试 handle_embed
    let embed_args = EmbedArgs {
        image: original_image_path.clone(),
        message: message_path.clone(),
        dest: embedded_image_path.clone(),
    };
    handle_embed(embed_args)?;
    assert!(
        embedded_image_path.exists(),
        "Embedded image should be created."
    );

    // 3. 测试 handle_extract
    let extract_args = ExtractArgs {
        image: embedded_image_path.clone(),
    };
    handle_extract(extract_args)?;

    // 4. 用库 API 验证落盘的负载逐字节等于原消息
    let recovered = read_embedded_payload(&embedded_image_path);
    assert_eq!(
        recovered,
        original_message.as_bytes(),
        "Recovered message must match the original."
    );

    Ok(())
}

/// 验证空消息也能完成往返 (帧只含一个零长度字节)
#[test]
fn test_handle_embed_empty_message() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    let dest_path = dir.path().join("dest.bmp");
    let message_path = dir.path().join("empty.txt");

    create_test_bmp(&image_path, 10, 10);
    fs::write(&message_path, "")?;

    let embed_args = EmbedArgs {
        image: image_path,
        message: message_path,
        dest: dest_path.clone(),
    };
    handle_embed(embed_args)?;

    assert!(read_embedded_payload(&dest_path).is_empty());

    Ok(())
}

/// 验证 header 命令接受合法 BMP 并拒绝其他文件
#[test]
fn test_handle_header_validation() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    let bogus_path = dir.path().join("bogus.bin");

    create_test_bmp(&image_path, 8, 8);
    fs::write(&bogus_path, b"definitely not a bitmap")?;

    let result = handle_header(HeaderArgs {
        image: image_path.clone(),
    });
    assert!(result.is_ok(), "A valid BMP must parse successfully.");

    let result = handle_header(HeaderArgs { image: bogus_path });
    assert!(result.is_err(), "A non-BMP file must be rejected.");
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("Invalid BMP header"));
    }

    Ok(())
}

/// 验证超长消息在构帧阶段被拒绝
#[test]
fn test_handle_embed_message_too_long() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    let dest_path = dir.path().join("dest.bmp");
    let message_path = dir.path().join("long.txt");

    create_test_bmp(&image_path, 50, 50);
    fs::write(&message_path, "a".repeat(300))?;

    let result = handle_embed(EmbedArgs {
        image: image_path,
        message: message_path,
        dest: dest_path.clone(),
    });

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("message too long"));
    }
    assert!(!dest_path.exists(), "No output may be produced on failure.");

    Ok(())
}

/// 验证载体容量不足时嵌入被整体拒绝
#[test]
fn test_handle_embed_not_enough_capacity() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("tiny.bmp");
    let dest_path = dir.path().join("dest.bmp");
    let message_path = dir.path().join("message.txt");

    // 1x1 像素区只有 4 个载体字节，连 2 字节的帧都放不下
    create_test_bmp(&image_path, 1, 1);
    fs::write(&message_path, "H")?;

    let result = handle_embed(EmbedArgs {
        image: image_path,
        message: message_path,
        dest: dest_path.clone(),
    });

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("does not fit in the carrier"));
    }
    assert!(!dest_path.exists(), "No output may be produced on failure.");

    Ok(())
}

/// 验证灰度输出：像素变为亮度值，头部逐字保留
#[test]
fn test_handle_grayscale_output() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("color.bmp");
    let dest_path = dir.path().join("gray.bmp");

    // (R,G,B)=(30,20,10) 落盘为 (B,G,R)=(10,20,30)，亮度 floor(21.85)=21
    let img_buf = ImageBuffer::from_pixel(2, 2, Rgb([30u8, 20, 10]));
    img_buf.save(&image_path).expect("Failed to create test image.");

    handle_grayscale(GrayscaleArgs {
        image: image_path.clone(),
        dest: dest_path.clone(),
    })?;

    let original = fs::read(&image_path)?;
    let output = fs::read(&dest_path)?;
    assert_eq!(
        original[..54],
        output[..54],
        "The header must be written back verbatim."
    );

    let mut file = File::open(&dest_path)?;
    let mut head = vec![0u8; 54];
    file.read_exact(&mut head)?;
    let header = BmpHeader::parse(&head)?;
    let buffer = PixelBuffer::load(&mut file, &header)?;

    // 宽 2：每行 6 个像素字节 + 2 个填充字节
    for row in buffer.bytes().chunks(8) {
        assert!(row[..6].iter().all(|&b| b == 21));
    }

    Ok(())
}

/// 验证写入失败 (包括最后一块缓冲数据的冲刷) 浮出为错误而非静默成功
#[cfg(target_os = "linux")]
#[test]
fn test_handle_hexdump_write_failure_surfaces() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    create_test_bmp(&image_path, 2, 2);

    // /dev/full 接受打开，但在实际写入时报 ENOSPC
    let result = handle_hexdump(HexdumpArgs {
        image: image_path,
        dest: PathBuf::from("/dev/full"),
    });

    assert!(result.is_err(), "A failed write must not report success.");
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("Unable to write hex dump"));
    }

    Ok(())
}

/// 同上，覆盖 grayscale/embed 共用的图像输出路径
#[cfg(target_os = "linux")]
#[test]
fn test_handle_grayscale_write_failure_surfaces() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    create_test_bmp(&image_path, 2, 2);

    let result = handle_grayscale(GrayscaleArgs {
        image: image_path,
        dest: PathBuf::from("/dev/full"),
    });

    assert!(result.is_err(), "A failed write must not report success.");
    if let Err(e) = result {
        assert!(format!("{e:#}").contains("Unable to write to target image file"));
    }

    Ok(())
}

/// 验证用法错误以状态码 1 退出，help 的正常展示以 0 退出
#[test]
fn test_cli_exit_codes() -> anyhow::Result<()> {
    let bin = env!("CARGO_BIN_EXE_bmp_stego");

    // 缺少子命令属于用法错误
    let status = std::process::Command::new(bin)
        .stderr(std::process::Stdio::null())
        .status()?;
    assert_eq!(status.code(), Some(1));

    let status = std::process::Command::new(bin)
        .arg("--help")
        .stdout(std::process::Stdio::null())
        .status()?;
    assert_eq!(status.code(), Some(0));

    Ok(())
}

/// 验证 hexdump 输出的行结构
#[test]
fn test_handle_hexdump_output() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.bmp");
    let dump_path = dir.path().join("dump.txt");

    create_test_bmp(&image_path, 2, 2);

    handle_hexdump(HexdumpArgs {
        image: image_path,
        dest: dump_path.clone(),
    })?;

    // 2x2 的像素区共 16 字节，恰好两行
    let dump = fs::read_to_string(&dump_path)?;
    let lines: Vec<&str> = dump.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("00000000: "));
    assert!(lines[1].starts_with("00000008: "));

    Ok(())
}
