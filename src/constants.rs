/// BMP 文件的标准头部大小 (字节)。
/// 头部校验与像素数据的逐字回写都以此为基准。
pub const HEADER_SIZE: usize = 54;

/// BMP 文件的魔数，即 ASCII "BM" 的小端表示。
pub const BMP_MAGIC: u16 = 0x4D42;

/// 本工具唯一支持的位深度。
pub const SUPPORTED_BITS_PER_PIXEL: u16 = 24;

/// 未压缩 RGB 图像的压缩标志值。
pub const COMPRESSION_NONE: u32 = 0;

/// 单条消息负载的最大长度 (字节)。
/// 帧的长度前缀只有一个字节，因此上限为 255。
pub const MAX_PAYLOAD: usize = 255;

/// 隐藏一个帧字节所需的载体字节数。
/// 每个载体字节只承载 1 bit (最低有效位)，因此一个字节需要 8 个载体字节。
pub const CARRIER_BYTES_PER_FRAME_BYTE: usize = 8;

/// 十六进制转储每行输出的字节数。
pub const HEX_BYTES_PER_LINE: usize = 8;
