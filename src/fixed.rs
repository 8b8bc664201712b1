use ufmt::{uDisplay, uWrite, Formatter};

/// Largest magnitude printed as digits; anything above renders as "ovf"
const MAX_PRINTABLE: f64 = 4_294_967_040.0;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Formats an f32 with a fixed number of decimals through `ufmt`
/// Rounds half-up on the last printed digit
/// param 0: value to format
///
/// NaN renders as "nan", infinities as "inf"
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fixed<const DECIMALS: u8>(pub f32);

impl<const DECIMALS: u8> uDisplay for Fixed<DECIMALS> {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        let value = self.0;
        if value.is_nan() {
            return f.write_str("nan");
        }
        if value.is_infinite() {
            return f.write_str("inf");
        }

        let negative = value < 0.0;
        let magnitude = if negative { -(value as f64) } else { value as f64 };
        if magnitude > MAX_PRINTABLE {
            return f.write_str("ovf");
        }
        if negative {
            f.write_str("-")?;
        }

        let scale = 10u64.pow(DECIMALS as u32);
        let scaled = (magnitude * scale as f64 + 0.5) as u64;
        let whole = scaled / scale;
        let fraction = scaled % scale;

        uDisplay::fmt(&whole, f)?;
        if DECIMALS > 0 {
            f.write_str(".")?;
            let mut divisor = scale / 10;
            while divisor > 0 {
                let digit = ((fraction / divisor) % 10) as usize;
                f.write_str(DIGITS[digit])?;
                divisor /= 10;
            }
        }
        Ok(())
    }
}
