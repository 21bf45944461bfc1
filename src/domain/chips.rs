use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Количество фишек с фиксированной точкой: хранится в сотых долях.
///
/// `Chips(2050)` = 20.50 фишки. Так малый блайнд (BB / 2) и дробные доли
/// при сплите банка точны до двух знаков без float.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chips(pub u64);

impl Chips {
    pub const ZERO: Chips = Chips(0);

    /// Сколько сотых в одной фишке.
    pub const SCALE: u64 = 100;

    /// Целое число фишек. Слишком большие значения упираются в `u64::MAX` сотых.
    pub const fn new(whole: u64) -> Self {
        Chips(whole.saturating_mul(Self::SCALE))
    }

    /// Сырое значение в сотых.
    pub const fn from_cents(cents: u64) -> Self {
        Chips(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Безопасное вычитание, не даёт уйти в минус.
    pub fn saturating_sub(self, other: Chips) -> Chips {
        Chips(self.0.saturating_sub(other.0))
    }

    /// Половина суммы (малый блайнд от большого), округление вниз до сотых.
    pub fn half(self) -> Chips {
        Chips(self.0 / 2)
    }
}

impl fmt::Display for Chips {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / Self::SCALE, self.0 % Self::SCALE)
    }
}

impl Add for Chips {
    type Output = Chips;

    fn add(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Chips {
    fn add_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Chips {
    type Output = Chips;

    fn sub(self, rhs: Chips) -> Self::Output {
        Chips(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Chips {
    fn sub_assign(&mut self, rhs: Chips) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Sum for Chips {
    fn sum<I: Iterator<Item = Chips>>(iter: I) -> Self {
        iter.fold(Chips::ZERO, |acc, c| acc + c)
    }
}
