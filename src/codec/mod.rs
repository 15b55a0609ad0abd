//! Binary tensor container codec.
//!
//! Layout (all words little-endian `i32`):
//!
//! ```text
//! preamble     container_kind | multi_x | multi_y | type_id
//! per tensor   rows | cols | slices | outer
//!              rows * cols * slices * outer payload values (4 bytes each, C order)
//! ```
//!
//! `container_kind == 0` means a single tensor follows, anything else means
//! `multi_x * multi_y` tensors follow. `type_id` is `-1` for `i32` and `-2` for `f32`.

pub mod container;
pub mod decode;
pub mod encode;
pub mod header;
pub mod payload;
pub mod shape_block;
