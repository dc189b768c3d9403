//! 15-bit packed colors used for histogram bucketing.
//!
//! Each 8-bit channel keeps its five most significant bits. The packed
//! layout is `0RRRRRGG GGGBBBBB`: red in the high field, blue in the low
//! field. The packing is lossy and never used as output color; swatches
//! average the original 8-bit values instead.

use core::fmt;

const WIDTH: u32 = 5;
const MASK: u16 = (1 << WIDTH) - 1;
const SHIFT_RED: u32 = WIDTH * 2;
const SHIFT_GREEN: u32 = WIDTH;

/// Number of distinct packed values (2^15).
pub const QUANTIZED_COLOR_SPACE: usize = 1 << (WIDTH * 3);

/// One of the three color axes of a [`QuantizedColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in tie-break priority order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    fn shift(self) -> u32 {
        match self {
            Self::Red => SHIFT_RED,
            Self::Green => SHIFT_GREEN,
            Self::Blue => 0,
        }
    }
}

/// An RGB color reduced to 5 bits per channel and packed into 15 bits.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct QuantizedColor(u16);

impl QuantizedColor {
    /// Pack 8-bit channels, discarding the three low bits of each.
    pub fn quantize(r: u8, g: u8, b: u8) -> Self {
        let r = (r >> 3) as u16;
        let g = (g >> 3) as u16;
        let b = (b >> 3) as u16;
        Self(r << SHIFT_RED | g << SHIFT_GREEN | b)
    }

    /// Build from a raw packed value. Bits above the 15th are dropped.
    pub fn from_raw(raw: u16) -> Self {
        Self(raw & (QUANTIZED_COLOR_SPACE as u16 - 1))
    }

    /// The packed 15-bit value.
    pub fn raw(self) -> u16 {
        self.0
    }

    /// Approximate 8-bit channels. The low three bits of each are zero.
    pub fn expand(self) -> (u8, u8, u8) {
        (
            self.channel(Channel::Red) << 3,
            self.channel(Channel::Green) << 3,
            self.channel(Channel::Blue) << 3,
        )
    }

    /// The 5-bit value of one field.
    pub fn channel(self, channel: Channel) -> u8 {
        ((self.0 >> channel.shift()) & MASK) as u8
    }

    /// Exchange the red and green fields.
    pub fn swap_red_green(self) -> Self {
        let r = self.channel(Channel::Red) as u16;
        let g = self.channel(Channel::Green) as u16;
        let b = self.channel(Channel::Blue) as u16;
        Self(g << SHIFT_RED | r << SHIFT_GREEN | b)
    }

    /// Exchange the red and blue fields.
    pub fn swap_red_blue(self) -> Self {
        let r = self.channel(Channel::Red) as u16;
        let g = self.channel(Channel::Green) as u16;
        let b = self.channel(Channel::Blue) as u16;
        Self(b << SHIFT_RED | g << SHIFT_GREEN | r)
    }

    /// Permute `channel` into the most significant field.
    ///
    /// Ordering the results numerically sorts colors by that channel
    /// first, which lets the median cut use a single sort for any axis.
    pub fn with_primary(self, channel: Channel) -> Self {
        match channel {
            Channel::Red => self,
            Channel::Green => self.swap_red_green(),
            Channel::Blue => self.swap_red_blue(),
        }
    }
}

impl From<rgb::RGB8> for QuantizedColor {
    fn from(px: rgb::RGB8) -> Self {
        Self::quantize(px.r, px.g, px.b)
    }
}

impl From<rgb::RGBA8> for QuantizedColor {
    fn from(px: rgb::RGBA8) -> Self {
        Self::quantize(px.r, px.g, px.b)
    }
}

impl From<QuantizedColor> for rgb::RGB8 {
    fn from(q: QuantizedColor) -> Self {
        let (r, g, b) = q.expand();
        rgb::RGB8 { r, g, b }
    }
}

impl fmt::Debug for QuantizedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuantizedColor({:#06x})", self.0)
    }
}
