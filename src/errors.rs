//! # 错误类型模块
//!
//! 定义核心各层的类型化错误分类。本工具是一次性的批处理程序，
//! 所有错误都是致命的：出错即终止当前操作，不做任何重试。
//! 库代码只返回 `Result`，绝不直接终止进程。

use thiserror::Error;

/// BMP 容器格式错误。校验失败的文件绝不会进入后续阶段。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// 可用字节数不足一个完整头部。
    #[error("truncated header: expected 54 bytes, got {0}")]
    Truncated(usize),

    /// 魔数不是 "BM"。
    #[error("not a BMP file (magic number: {0:#06X})")]
    BadMagic(u16),

    /// 仅支持 24 位图像。
    #[error("unsupported bit depth: {0} (only 24-bit images are supported)")]
    UnsupportedBitDepth(u16),

    /// 仅支持未压缩的 RGB 图像。
    #[error("unsupported compression mode: {0} (only uncompressed RGB is supported)")]
    UnsupportedCompression(u32),
}

/// 像素区 I/O 错误。底层操作系统原因随错误链一并呈现。
#[derive(Debug, Error)]
pub enum IoError {
    /// 文件在读满像素区之前就结束了。
    #[error("short read: expected {expected} pixel bytes, got {got}")]
    ShortRead { expected: usize, got: usize },

    /// 底层读写失败。
    #[error(transparent)]
    Os(#[from] std::io::Error),
}

/// 消息帧错误，涵盖构帧与提取两条路径。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FramingError {
    /// 负载超过单字节长度前缀所能表示的上限。
    #[error("message too long: {0} bytes (max 255 bytes)")]
    TooLarge(usize),

    /// 载体连一个长度字节都装不下。
    #[error("carrier too small to hold a length byte: {0} bytes (need 8)")]
    BufferTooSmall(usize),

    /// 载体在嵌入的消息结束之前就耗尽了。
    #[error("carrier ends before the embedded message: need {required} carrier bytes, have {available}")]
    Truncated { required: usize, available: usize },
}

/// 载体容量错误。必须在修改任何载体字节之前检查，
/// 保证嵌入操作要么完整发生，要么完全不发生。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapacityError {
    /// 载体的比特容量不足以容纳整个帧。
    #[error("message does not fit in the carrier: need {required} carrier bytes, have {available}")]
    Overflow { required: usize, available: usize },
}
