/// Output size of a screenshot crop.
///
/// `width`/`height` come from the resolution selector and are the size of the
/// delivered image. The crop itself is `multiplier` times larger and the
/// backend downsamples it by the same factor.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Resolution {
    width: u32,
    height: u32,
    multiplier: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    MissingSeparator(String),
    InvalidNumber(String),
    Zero,
    TooLarge,
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionError::MissingSeparator(s) => {
                write!(f, "resolution {s:?} is not of the form WIDTHxHEIGHT")
            }
            ResolutionError::InvalidNumber(s) => write!(f, "{s:?} is not a positive integer"),
            ResolutionError::Zero => write!(f, "resolution and multiplier must be non-zero"),
            ResolutionError::TooLarge => write!(f, "resolution times multiplier overflows"),
        }
    }
}

impl std::error::Error for ResolutionError {}

fn parse_u32(s: &str) -> Result<u32, ResolutionError> {
    let s = s.trim();
    let v: u32 = s
        .parse()
        .map_err(|_| ResolutionError::InvalidNumber(s.to_string()))?;
    if v == 0 {
        return Err(ResolutionError::Zero);
    }
    Ok(v)
}

impl Resolution {
    pub fn new(width: u32, height: u32, multiplier: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 || multiplier == 0 {
            return Err(ResolutionError::Zero);
        }
        if width.checked_mul(multiplier).is_none() || height.checked_mul(multiplier).is_none() {
            return Err(ResolutionError::TooLarge);
        }
        Ok(Self {
            width,
            height,
            multiplier,
        })
    }

    /// Parses the two selector values: `"<W>x<H>"` and a multiplier.
    pub fn parse(resolution: &str, multiplier: &str) -> Result<Self, ResolutionError> {
        let (w, h) = resolution
            .split_once('x')
            .ok_or_else(|| ResolutionError::MissingSeparator(resolution.to_string()))?;
        Self::new(parse_u32(w)?, parse_u32(h)?, parse_u32(multiplier)?)
    }

    /// Crop width in display-zoom pixels.
    pub fn xres(&self) -> u32 {
        self.width * self.multiplier
    }

    /// Crop height in display-zoom pixels.
    pub fn yres(&self) -> u32 {
        self.height * self.multiplier
    }

    pub fn downsample(&self) -> u32 {
        self.multiplier
    }

    /// Width of the delivered image, `xres / downsample`.
    pub fn output_width(&self) -> u32 {
        self.xres() / self.downsample()
    }

    /// Height of the delivered image, `yres / downsample`.
    pub fn output_height(&self) -> u32 {
        self.yres() / self.downsample()
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            multiplier: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Resolution, ResolutionError};

    #[test]
    fn multiplier_scales_crop_and_sets_downsample() {
        let r = Resolution::parse("1920x1080", "2").unwrap();
        assert_eq!(r.xres(), 3840);
        assert_eq!(r.yres(), 2160);
        assert_eq!(r.downsample(), 2);
        assert_eq!((r.output_width(), r.output_height()), (1920, 1080));
    }

    #[test]
    fn whitespace_is_tolerated() {
        let r = Resolution::parse(" 800 x 600 ", " 1").unwrap();
        assert_eq!((r.xres(), r.yres(), r.downsample()), (800, 600, 1));
    }

    #[test]
    fn malformed_values_are_rejected() {
        assert_eq!(
            Resolution::parse("1920", "1"),
            Err(ResolutionError::MissingSeparator("1920".to_string()))
        );
        assert_eq!(
            Resolution::parse("1920xabc", "1"),
            Err(ResolutionError::InvalidNumber("abc".to_string()))
        );
        assert_eq!(
            Resolution::parse("1920x1080", "1.5"),
            Err(ResolutionError::InvalidNumber("1.5".to_string()))
        );
        assert_eq!(Resolution::parse("0x1080", "1"), Err(ResolutionError::Zero));
        assert_eq!(
            Resolution::parse("4000000000x1", "2"),
            Err(ResolutionError::TooLarge)
        );
    }
}
