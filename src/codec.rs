//! # LSB 编解码器模块
//!
//! 将消息帧逐比特写入载体字节的最低有效位，并无损地读回。
//! 载体容量为每字节 1 bit；游标在整个扁平缓冲区上单调前进，
//! 不理会行边界，也不区分像素字节与填充字节。

use crate::constants::CARRIER_BYTES_PER_FRAME_BYTE;
use crate::errors::{CapacityError, FramingError};
use crate::frame::MessageFrame;

/// 将帧嵌入载体，就地修改载体字节的最低有效位。
///
/// 帧字节按线格式顺序 (长度字节在前) 逐个展开，每个字节从 bit 0
/// 到 bit 7 低位在前地写入连续的载体字节；其余比特保持不变。
/// 容量检查在任何字节被修改之前完成：嵌入要么完整发生，
/// 要么完全不发生。
///
/// # Errors
///
/// 所需载体字节数超过缓冲区长度时返回 [`CapacityError::Overflow`]。
pub fn embed(carrier: &mut [u8], frame: &MessageFrame) -> Result<(), CapacityError> {
    let required = frame.frame_len() * CARRIER_BYTES_PER_FRAME_BYTE;
    if required > carrier.len() {
        return Err(CapacityError::Overflow {
            required,
            available: carrier.len(),
        });
    }

    let mut byte_index = 0;
    for frame_byte in frame.frame_bytes() {
        for bit_pos in 0..8 {
            let bit = (frame_byte >> bit_pos) & 0x01;
            carrier[byte_index] = (carrier[byte_index] & 0xFE) | bit;
            byte_index += 1;
        }
    }

    Ok(())
}

/// 从载体字节的最低有效位中提取之前嵌入的帧。
///
/// 先由前 8 个载体字节重建长度字节，再按长度继续读取负载，
/// 游标从 8 开始单调前进。
///
/// # Errors
///
/// * 载体不足 8 字节时返回 [`FramingError::BufferTooSmall`]。
/// * 载体在消息结束之前耗尽时返回 [`FramingError::Truncated`]。
pub fn extract(carrier: &[u8]) -> Result<MessageFrame, FramingError> {
    if carrier.len() < CARRIER_BYTES_PER_FRAME_BYTE {
        return Err(FramingError::BufferTooSmall(carrier.len()));
    }

    let length = read_frame_byte(carrier, 0);
    let required = (1 + usize::from(length)) * CARRIER_BYTES_PER_FRAME_BYTE;
    if required > carrier.len() {
        return Err(FramingError::Truncated {
            required,
            available: carrier.len(),
        });
    }

    let payload = (0..usize::from(length))
        .map(|i| read_frame_byte(carrier, (1 + i) * CARRIER_BYTES_PER_FRAME_BYTE))
        .collect();

    Ok(MessageFrame::decode(length, payload))
}

/// 由 `carrier[at..at + 8]` 的最低有效位重建一个帧字节，低位在前。
fn read_frame_byte(carrier: &[u8], at: usize) -> u8 {
    carrier[at..at + CARRIER_BYTES_PER_FRAME_BYTE]
        .iter()
        .enumerate()
        .fold(0u8, |byte, (i, &carrier_byte)| {
            byte | ((carrier_byte & 0x01) << i)
        })
}
