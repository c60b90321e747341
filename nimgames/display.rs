//! Display utilities

use std::fmt::{self, Display, Write};

fn sep(w: &mut impl Write, separator: &str, xs: &[impl Display]) -> fmt::Result {
    for (idx, v) in xs.iter().enumerate() {
        if idx != 0 {
            write!(w, "{}", separator)?;
        }
        write!(w, "{}", v)?;
    }
    Ok(())
}

#[inline]
pub fn commas(w: &mut impl Write, xs: &[impl Display]) -> fmt::Result {
    sep(w, ", ", xs)
}

pub fn brackets<W>(w: &mut W, middle: impl FnOnce(&mut W) -> fmt::Result) -> fmt::Result
where
    W: Write,
{
    write!(w, "[")?;
    middle(w)?;
    write!(w, "]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracketed_list() {
        let mut out = String::new();
        brackets(&mut out, |w| commas(w, &[1, 2, 3])).unwrap();
        assert_eq!(out, "[1, 2, 3]");

        let mut out = String::new();
        brackets(&mut out, |w| commas(w, &[] as &[u32])).unwrap();
        assert_eq!(out, "[]");
    }
}
