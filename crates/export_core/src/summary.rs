use std::fmt;
use std::ops::{Add, AddAssign};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Articles,
    Pages,
    DailySentiment,
    MonthlySentiment,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Articles => "research",
            Domain::Pages => "pages",
            Domain::DailySentiment => "sentiment-daily",
            Domain::MonthlySentiment => "sentiment-monthly",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-domain counters. Combined with `+`, so partial counts can be
/// reduced in any order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainCounts {
    pub generated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl DomainCounts {
    pub fn generated() -> Self {
        Self {
            generated: 1,
            ..Self::default()
        }
    }

    pub fn skipped() -> Self {
        Self {
            skipped: 1,
            ..Self::default()
        }
    }

    pub fn failed() -> Self {
        Self {
            failed: 1,
            ..Self::default()
        }
    }

    /// Documents that reached the writer, whether or not the write succeeded.
    pub fn attempted(&self) -> usize {
        self.generated + self.failed
    }
}

impl Add for DomainCounts {
    type Output = DomainCounts;

    fn add(self, rhs: DomainCounts) -> DomainCounts {
        DomainCounts {
            generated: self.generated + rhs.generated,
            skipped: self.skipped + rhs.skipped,
            failed: self.failed + rhs.failed,
        }
    }
}

impl AddAssign for DomainCounts {
    fn add_assign(&mut self, rhs: DomainCounts) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for DomainCounts {
    fn sum<I: Iterator<Item = DomainCounts>>(iter: I) -> Self {
        iter.fold(DomainCounts::default(), Add::add)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub articles: DomainCounts,
    pub pages: DomainCounts,
    pub daily_sentiment: DomainCounts,
    pub monthly_sentiment: DomainCounts,
}

impl RunSummary {
    pub fn record(&mut self, domain: Domain, counts: DomainCounts) {
        *self.counts_mut(domain) += counts;
    }

    pub fn counts(&self, domain: Domain) -> DomainCounts {
        match domain {
            Domain::Articles => self.articles,
            Domain::Pages => self.pages,
            Domain::DailySentiment => self.daily_sentiment,
            Domain::MonthlySentiment => self.monthly_sentiment,
        }
    }

    fn counts_mut(&mut self, domain: Domain) -> &mut DomainCounts {
        match domain {
            Domain::Articles => &mut self.articles,
            Domain::Pages => &mut self.pages,
            Domain::DailySentiment => &mut self.daily_sentiment,
            Domain::MonthlySentiment => &mut self.monthly_sentiment,
        }
    }

    pub fn total(&self) -> DomainCounts {
        [
            self.articles,
            self.pages,
            self.daily_sentiment,
            self.monthly_sentiment,
        ]
        .into_iter()
        .sum()
    }

    /// Human readable report, one line per domain plus a total.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "Research posts: {} generated ({} skipped, {} failed)",
                self.articles.generated, self.articles.skipped, self.articles.failed
            ),
            format!(
                "Static pages: {} generated ({} skipped, {} failed)",
                self.pages.generated, self.pages.skipped, self.pages.failed
            ),
            format!(
                "Sentiment pages: {} daily + {} monthly ({} skipped, {} failed)",
                self.daily_sentiment.generated,
                self.monthly_sentiment.generated,
                self.daily_sentiment.skipped + self.monthly_sentiment.skipped,
                self.daily_sentiment.failed + self.monthly_sentiment.failed
            ),
        ];
        let total = self.total();
        lines.push(format!(
            "Total: {} markdown files generated ({} attempted, {} skipped)",
            total.generated,
            total.attempted(),
            total.skipped
        ));
        lines
    }
}
