//! # 像素缓冲区模块
//!
//! 根据头部几何信息计算带填充的像素区大小，并负责像素区的
//! 读取、回写、十六进制转储与灰度变换。

use crate::constants::HEX_BYTES_PER_LINE;
use crate::errors::IoError;
use crate::header::BmpHeader;
use std::io::{Read, Seek, SeekFrom, Write};

/// 单行像素占用的字节数，对齐到 4 字节边界。
///
/// 每个像素 3 字节 (B, G, R)，行尾补齐到 4 的倍数。
pub fn row_stride(width_px: i32) -> usize {
    let width = i64::from(width_px).max(0) as u64;
    (((width * 3 + 3) / 4) * 4) as usize
}

/// 像素区总大小 = 行距 × 行数。高度的符号只编码行序，不参与大小。
pub fn data_size(header: &BmpHeader) -> usize {
    let height = u64::from(header.height_px.unsigned_abs());
    (row_stride(header.width_px) as u64 * height) as usize
}

/// 像素数据的独占缓冲区。
///
/// 缓冲区覆盖整个光栅区域，包括行尾的对齐填充字节。
/// 隐写编解码器不区分像素字节与填充字节，两者都是载体。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// 按头部给出的偏移与几何信息读入整个像素区。
    ///
    /// # Errors
    ///
    /// 文件在读满 [`data_size`] 个字节之前结束时返回
    /// [`IoError::ShortRead`]，底层读写失败时返回 [`IoError::Os`]。
    pub fn load<R: Read + Seek>(reader: &mut R, header: &BmpHeader) -> Result<Self, IoError> {
        let expected = data_size(header);
        reader.seek(SeekFrom::Start(u64::from(header.pixel_data_offset)))?;

        let mut bytes = Vec::with_capacity(expected);
        let got = reader.take(expected as u64).read_to_end(&mut bytes)?;
        if got < expected {
            return Err(IoError::ShortRead { expected, got });
        }

        Ok(Self { bytes })
    }

    /// 直接由字节构造缓冲区，主要供编解码器测试使用。
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// 将头部原始字节与像素区逐字写出。
    ///
    /// 头部字段不做任何重算：输出只改变像素值，不改变文件布局。
    pub fn store<W: Write>(&self, writer: &mut W, header: &BmpHeader) -> Result<(), IoError> {
        writer.write_all(header.raw_bytes())?;
        writer.write_all(&self.bytes)?;
        Ok(())
    }

    /// 将像素区以十六进制转储到输出流。
    ///
    /// 每行先写 8 位十六进制偏移，再写至多 8 个大写两位字节值。
    pub fn hex_dump<W: Write>(&self, writer: &mut W) -> Result<(), IoError> {
        for (line_no, line) in self.bytes.chunks(HEX_BYTES_PER_LINE).enumerate() {
            write!(writer, "{:08X}: ", line_no * HEX_BYTES_PER_LINE)?;
            for byte in line {
                write!(writer, "{byte:02X} ")?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// 就地将每个像素转换为灰度。
    ///
    /// 亮度为 0.114*B + 0.587*G + 0.299*R，结果向零截断后同时写入
    /// 三个通道。行尾填充字节保持不变。
    pub fn grayscale(&mut self, header: &BmpHeader) {
        let stride = row_stride(header.width_px);
        if stride == 0 {
            return;
        }
        let pixel_bytes = header.width_px.max(0) as usize * 3;

        for row in self.bytes.chunks_mut(stride) {
            let limit = pixel_bytes.min(row.len());
            for pixel in row[..limit].chunks_exact_mut(3) {
                let gray = (0.114 * f64::from(pixel[0])
                    + 0.587 * f64::from(pixel[1])
                    + 0.299 * f64::from(pixel[2])) as u8;
                pixel.fill(gray);
            }
        }
    }
}
