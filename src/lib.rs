//! # bmp_stego 库
//!
//! 本库包含 BMP 位图检查与 LSB 隐写工具的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod errors;
pub mod frame;
pub mod handler;
pub mod header;
pub mod pixels;
