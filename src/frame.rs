//! # 消息帧模块
//!
//! 帧 = 一个字节的长度前缀 + 等长的负载。长度前缀使嵌入的消息
//! 在提取时能够自我定界，帧本身不包含终止符。

use crate::constants::MAX_PAYLOAD;
use crate::errors::FramingError;

/// 长度前缀消息帧。构造完成后不可变，长度前缀恒等于负载字节数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageFrame {
    payload: Vec<u8>,
}

impl MessageFrame {
    /// 用负载构造帧。
    ///
    /// # Errors
    ///
    /// 负载超过 255 字节时返回 [`FramingError::TooLarge`]。
    pub fn encode(payload: Vec<u8>) -> Result<Self, FramingError> {
        if payload.len() > MAX_PAYLOAD {
            return Err(FramingError::TooLarge(payload.len()));
        }
        Ok(Self { payload })
    }

    /// 由提取路径重建帧。长度字节必须等于负载字节数，
    /// 由调用方的构造过程保证。
    pub fn decode(length_byte: u8, payload: Vec<u8>) -> Self {
        debug_assert_eq!(usize::from(length_byte), payload.len());
        Self { payload }
    }

    /// 帧承载的负载字节。
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// 负载字节数，即长度前缀的取值。
    pub fn payload_len(&self) -> usize {
        self.payload.len()
    }

    /// 帧的总字节数 (长度字节 + 负载)。
    pub fn frame_len(&self) -> usize {
        1 + self.payload.len()
    }

    /// 按线格式迭代帧字节：长度字节在前，负载随后。
    pub fn frame_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        std::iter::once(self.payload.len() as u8).chain(self.payload.iter().copied())
    }
}
