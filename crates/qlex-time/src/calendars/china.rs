//! Chinese calendars: the Shanghai Stock Exchange and the inter-bank market.
//!
//! Both markets close on weekends and on the statutory holidays. Lunar
//! holidays (Spring Festival, Qingming, Dragon Boat, Mid-Autumn) move every
//! year and are listed explicitly for the years covered by the table. The
//! inter-bank market additionally opens on the weekend make-up days that the
//! State Council announces around long holidays.

use crate::calendar::Calendar;
use crate::date::Date;

/// Which Chinese market the calendar describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChinaMarket {
    /// Shanghai Stock Exchange.
    Sse,
    /// China inter-bank market (repo fixings).
    #[default]
    InterBank,
}

/// China calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct China {
    market: ChinaMarket,
}

// (year, month, day) of holidays that are not fixed in the Gregorian calendar,
// plus bridging days around the fixed ones.
const MOVABLE_HOLIDAYS: &[(u16, u8, u8)] = &[
    // 2023
    (2023, 1, 2),
    (2023, 1, 23),
    (2023, 1, 24),
    (2023, 1, 25),
    (2023, 1, 26),
    (2023, 1, 27),
    (2023, 4, 5),
    (2023, 5, 2),
    (2023, 5, 3),
    (2023, 6, 22),
    (2023, 6, 23),
    (2023, 9, 29),
    // 2024
    (2024, 2, 9),
    (2024, 2, 12),
    (2024, 2, 13),
    (2024, 2, 14),
    (2024, 2, 15),
    (2024, 2, 16),
    (2024, 4, 4),
    (2024, 4, 5),
    (2024, 5, 2),
    (2024, 5, 3),
    (2024, 6, 10),
    (2024, 9, 16),
    (2024, 9, 17),
    // 2025
    (2025, 1, 28),
    (2025, 1, 29),
    (2025, 1, 30),
    (2025, 1, 31),
    (2025, 2, 3),
    (2025, 2, 4),
    (2025, 4, 4),
    (2025, 5, 2),
    (2025, 5, 5),
    (2025, 6, 2),
    (2025, 10, 8),
];

// Weekend days on which the inter-bank market is open.
const IB_WORKING_WEEKENDS: &[(u16, u8, u8)] = &[
    (2023, 1, 28),
    (2023, 1, 29),
    (2023, 4, 23),
    (2023, 5, 6),
    (2023, 6, 25),
    (2023, 10, 7),
    (2023, 10, 8),
    (2024, 2, 4),
    (2024, 2, 18),
    (2024, 4, 7),
    (2024, 4, 28),
    (2024, 5, 11),
    (2024, 9, 14),
    (2024, 9, 29),
    (2024, 10, 12),
    (2025, 1, 26),
    (2025, 2, 8),
    (2025, 4, 27),
    (2025, 9, 28),
    (2025, 10, 11),
];

impl China {
    /// Calendar for the given market.
    pub fn new(market: ChinaMarket) -> Self {
        Self { market }
    }

    /// The market described by this calendar.
    pub fn market(&self) -> ChinaMarket {
        self.market
    }

    fn is_statutory_holiday(date: Date) -> bool {
        let (y, m, d) = (date.year(), date.month(), date.day_of_month());
        // New Year, Labour Day, National Day week
        (m == 1 && d == 1)
            || (m == 5 && d == 1)
            || (m == 10 && (1..=7).contains(&d))
            || MOVABLE_HOLIDAYS.contains(&(y, m, d))
    }
}

impl Calendar for China {
    fn name(&self) -> &str {
        match self.market {
            ChinaMarket::Sse => "Shanghai stock exchange",
            ChinaMarket::InterBank => "China inter bank market",
        }
    }

    fn is_business_day(&self, date: Date) -> bool {
        if Self::is_statutory_holiday(date) {
            return false;
        }
        if !date.weekday().is_weekend() {
            return true;
        }
        self.market == ChinaMarket::InterBank
            && IB_WORKING_WEEKENDS.contains(&(date.year(), date.month(), date.day_of_month()))
    }
}
