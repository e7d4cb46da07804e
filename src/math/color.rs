use cgmath::BaseFloat;

/// A RGBA `Color`. Each component is a floating point value in the range
/// from 0 to 1.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Color<S> {
    pub r: S,
    pub g: S,
    pub b: S,
    pub a: S,
}

impl Into<[u8; 4]> for Color<f32> {
    fn into(self) -> [u8; 4] {
        let v = self.clip();
        [
            (v.r * 255.0) as u8,
            (v.g * 255.0) as u8,
            (v.b * 255.0) as u8,
            (v.a * 255.0) as u8,
        ]
    }
}

impl<S: BaseFloat> From<[u8; 4]> for Color<S> {
    fn from(v: [u8; 4]) -> Self {
        let max = S::from(255.0).unwrap();
        Color::new(
            S::from(v[0]).unwrap() / max,
            S::from(v[1]).unwrap() / max,
            S::from(v[2]).unwrap() / max,
            S::from(v[3]).unwrap() / max,
        )
    }
}

impl<S: BaseFloat> Color<S> {
    pub fn new(r: S, g: S, b: S, a: S) -> Self {
        Color { r, g, b, a }
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Self {
        let mut color = *self;
        color.r = self.r.max(S::zero()).min(S::one());
        color.g = self.g.max(S::zero()).min(S::one());
        color.b = self.b.max(S::zero()).min(S::one());
        color.a = self.a.max(S::zero()).min(S::one());
        color
    }

    pub fn rgba(&self) -> [S; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl<S: BaseFloat> Color<S> {
    pub fn white() -> Self {
        Color::new(S::one(), S::one(), S::one(), S::one())
    }

    pub fn gray() -> Self {
        let half = S::from(0.5).unwrap();
        Color::new(half, half, half, S::one())
    }

    pub fn black() -> Self {
        Color::new(S::zero(), S::zero(), S::zero(), S::one())
    }

    pub fn red() -> Self {
        Color::new(S::one(), S::zero(), S::zero(), S::one())
    }

    pub fn green() -> Self {
        Color::new(S::zero(), S::one(), S::zero(), S::one())
    }

    pub fn blue() -> Self {
        Color::new(S::zero(), S::zero(), S::one(), S::one())
    }

    pub fn cyan() -> Self {
        Color::new(S::zero(), S::one(), S::one(), S::one())
    }

    pub fn magenta() -> Self {
        Color::new(S::one(), S::zero(), S::one(), S::one())
    }

    pub fn yellow() -> Self {
        Color::new(S::one(), S::one(), S::zero(), S::one())
    }

    pub fn transparent() -> Self {
        Color::new(S::zero(), S::zero(), S::zero(), S::zero())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bytes() {
        let bytes: [u8; 4] = Color::<f32>::red().into();
        assert_eq!(bytes, [255, 0, 0, 255]);
        assert_eq!(Color::<f32>::red().rgba(), [1.0, 0.0, 0.0, 1.0]);

        let c = Color::<f32>::from([0, 255, 0, 255]);
        assert_eq!(c, Color::green());
    }

    #[test]
    fn clip() {
        let c = Color::new(1.5f32, -0.5, 0.25, 2.0).clip();
        assert_eq!(c, Color::new(1.0, 0.0, 0.25, 1.0));
    }
}
