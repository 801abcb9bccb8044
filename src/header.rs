//! # BMP 头部模型模块
//!
//! 解析并校验固定大小的 BMP 头部。所有多字节字段均为小端字节序。
//! 校验失败的头部绝不会进入像素读取或隐写阶段。

use crate::constants::{BMP_MAGIC, COMPRESSION_NONE, HEADER_SIZE, SUPPORTED_BITS_PER_PIXEL};
use crate::errors::FormatError;
use std::fmt;

/// 已校验的 BMP 头部。
///
/// 字段从文件前 54 个字节解出。原始字节会被完整保留，
/// 以便输出路径把未被解释的字段 (保留字、DIB 子字段) 逐字回写。
#[derive(Debug, Clone)]
pub struct BmpHeader {
    /// 魔数，恒为 0x4D42 ("BM")。
    pub magic: u16,
    /// 文件总大小 (仅供参考)。
    pub file_size: u32,
    /// 从文件开头到像素数据的字节偏移。
    pub pixel_data_offset: u32,
    /// 图像宽度 (像素)。
    pub width_px: i32,
    /// 图像高度 (像素)。负值表示行序为自顶向下。
    pub height_px: i32,
    /// 位深度，恒为 24。
    pub bits_per_pixel: u16,
    /// 压缩标志，恒为 0 (未压缩 RGB)。
    pub compression: u32,
    /// 像素区大小 (仅供参考)。
    pub image_size_bytes: u32,
    raw: [u8; HEADER_SIZE],
}

impl BmpHeader {
    /// 从文件开头的字节解析头部。
    ///
    /// # Errors
    ///
    /// * 字节数不足 54 时返回 [`FormatError::Truncated`]。
    /// * 魔数不是 "BM" 时返回 [`FormatError::BadMagic`]。
    /// * 位深度不是 24 时返回 [`FormatError::UnsupportedBitDepth`]。
    /// * 压缩标志不为 0 时返回 [`FormatError::UnsupportedCompression`]。
    pub fn parse(bytes: &[u8]) -> Result<Self, FormatError> {
        if bytes.len() < HEADER_SIZE {
            return Err(FormatError::Truncated(bytes.len()));
        }

        let mut raw = [0u8; HEADER_SIZE];
        raw.copy_from_slice(&bytes[..HEADER_SIZE]);

        let magic = le_u16(&raw, 0);
        if magic != BMP_MAGIC {
            return Err(FormatError::BadMagic(magic));
        }

        let bits_per_pixel = le_u16(&raw, 28);
        if bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            return Err(FormatError::UnsupportedBitDepth(bits_per_pixel));
        }

        let compression = le_u32(&raw, 30);
        if compression != COMPRESSION_NONE {
            return Err(FormatError::UnsupportedCompression(compression));
        }

        Ok(Self {
            magic,
            file_size: le_u32(&raw, 2),
            pixel_data_offset: le_u32(&raw, 10),
            width_px: le_i32(&raw, 18),
            height_px: le_i32(&raw, 22),
            bits_per_pixel,
            compression,
            image_size_bytes: le_u32(&raw, 34),
            raw,
        })
    }

    /// 头部的原始字节，供输出路径逐字回写。
    pub fn raw_bytes(&self) -> &[u8; HEADER_SIZE] {
        &self.raw
    }
}

impl fmt::Display for BmpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== BMP Header Information ===")?;
        writeln!(f, "File Type: {:#06X}", self.magic)?;
        writeln!(f, "File Size: {}", self.file_size)?;
        writeln!(f, "Pixel Data Offset: {}", self.pixel_data_offset)?;
        writeln!(f, "Width: {} px", self.width_px)?;
        writeln!(f, "Height: {} px", self.height_px)?;
        writeln!(f, "Bits Per Pixel: {}", self.bits_per_pixel)?;
        writeln!(f, "Compression: {}", self.compression)?;
        write!(f, "Image Size: {} bytes", self.image_size_bytes)
    }
}

fn le_u16(raw: &[u8; HEADER_SIZE], at: usize) -> u16 {
    u16::from_le_bytes([raw[at], raw[at + 1]])
}

fn le_u32(raw: &[u8; HEADER_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

fn le_i32(raw: &[u8; HEADER_SIZE], at: usize) -> i32 {
    le_u32(raw, at) as i32
}
