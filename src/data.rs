//! Sample datasets backing the dashboard and settings screens.
//!
//! Everything here is a compile-time constant standing in for the bank,
//! extension, and analytics integrations the product would talk to.

/// One day of the weekly savings trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailySaving {
    pub day: &'static str,
    pub saved: u64,
    pub impulses: u64,
}

pub const WEEKLY_SAVINGS: [DailySaving; 7] = [
    DailySaving { day: "Mon", saved: 450, impulses: 2 },
    DailySaving { day: "Tue", saved: 800, impulses: 3 },
    DailySaving { day: "Wed", saved: 0, impulses: 0 },
    DailySaving { day: "Thu", saved: 1200, impulses: 4 },
    DailySaving { day: "Fri", saved: 600, impulses: 2 },
    DailySaving { day: "Sat", saved: 300, impulses: 1 },
    DailySaving { day: "Sun", saved: 950, impulses: 3 },
];

/// Share of stopped impulses attributed to a mood, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerShare {
    pub mood: &'static str,
    pub percent: u64,
}

pub const SHOPPING_TRIGGERS: [TriggerShare; 5] = [
    TriggerShare { mood: "Bored", percent: 35 },
    TriggerShare { mood: "Stressed", percent: 25 },
    TriggerShare { mood: "Happy", percent: 20 },
    TriggerShare { mood: "Sad", percent: 15 },
    TriggerShare { mood: "Other", percent: 5 },
];

/// Headline stat card for the dashboard grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub description: &'static str,
}

pub const STAT_CARDS: [StatCard; 4] = [
    StatCard {
        title: "Total Saved",
        value: "₹24,450",
        change: "+12%",
        description: "This month",
    },
    StatCard {
        title: "Impulses Stopped",
        value: "47",
        change: "+8",
        description: "This week",
    },
    StatCard {
        title: "Current Streak",
        value: "3 days",
        change: "New record!",
        description: "Regret-free",
    },
    StatCard {
        title: "AI Interactions",
        value: "23",
        change: "+5",
        description: "This week",
    },
];

/// A recently avoided purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecentSave {
    pub item: &'static str,
    pub amount: u32,
    pub reason: &'static str,
    pub time_ago: &'static str,
    pub mood: &'static str,
}

pub const RECENT_SAVES: [RecentSave; 3] = [
    RecentSave {
        item: "Wireless Headphones",
        amount: 8_999,
        reason: "Realized you already have 3 pairs",
        time_ago: "2 hours ago",
        mood: "Bored",
    },
    RecentSave {
        item: "Designer Hoodie",
        amount: 4_500,
        reason: "Equivalent to 12 hours of work",
        time_ago: "1 day ago",
        mood: "Stressed",
    },
    RecentSave {
        item: "Gaming Mouse",
        amount: 3_200,
        reason: "Bank balance too low",
        time_ago: "2 days ago",
        mood: "Happy",
    },
];

/// External integration shown on the settings screen. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLink {
    pub name: &'static str,
    pub status: &'static str,
}

pub const CONNECTED_SERVICES: [ServiceLink; 3] = [
    ServiceLink { name: "Bank Account", status: "Connected" },
    ServiceLink { name: "Chrome Extension", status: "Active" },
    ServiceLink { name: "Expense Tracker", status: "Not Connected" },
];

// Headline totals quoted across the UI.
pub const MONTHLY_SAVED: u32 = 24_450;
pub const MONTHLY_SAVED_AFTER_SKIP: u32 = 26_449;
pub const WEEK_SAVED: u32 = 2_450;
pub const WEEK_IMPULSES: u32 = 12;

/// Formats a whole-rupee amount with thousands separators, e.g. `8,999`.
pub fn format_rupees(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_shares_cover_all_impulses() {
        let total: u64 = SHOPPING_TRIGGERS.iter().map(|t| t.percent).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn weekly_trend_is_stable_across_reads() {
        // Const tables have no side effects; two reads must agree.
        let first: Vec<DailySaving> = WEEKLY_SAVINGS.to_vec();
        let second: Vec<DailySaving> = WEEKLY_SAVINGS.to_vec();
        assert_eq!(first, second);
        assert_eq!(first.len(), 7);
        assert_eq!(first[0].day, "Mon");
    }

    #[test]
    fn recent_saves_match_headline_amounts() {
        assert_eq!(RECENT_SAVES[0].amount, 8_999);
        assert_eq!(RECENT_SAVES.len(), 3);
    }

    #[test]
    fn rupee_formatting_groups_thousands() {
        assert_eq!(format_rupees(0), "0");
        assert_eq!(format_rupees(999), "999");
        assert_eq!(format_rupees(8_999), "8,999");
        assert_eq!(format_rupees(24_450), "24,450");
        assert_eq!(format_rupees(1_234_567), "1,234,567");
    }
}
