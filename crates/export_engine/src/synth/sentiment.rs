use chrono::Datelike;
use export_core::{
    category_label, format_thousands, month_name, parse_daily_period, parse_monthly_period,
    round_score, DailySentiment, DocumentKey, Frontmatter, InterpretationBand, MarkdownDocument,
    MonthlySentiment,
};

use super::{Generated, SkipReason, SynthContext, Synthesized};

const TITLE_PREFIX: &str = "Bitcoin Market Sentiment";

/// Snapshot for one `YYYY-MM-DD` record.
pub fn synthesize_daily(
    period: &str,
    record: &DailySentiment,
    ctx: &SynthContext<'_>,
) -> Synthesized {
    let Some(date) = parse_daily_period(period) else {
        return Synthesized::Skip(SkipReason::InvalidPeriod(period.to_string()));
    };
    let Some(month) = month_name(date.month()) else {
        return Synthesized::Skip(SkipReason::InvalidPeriod(period.to_string()));
    };

    let display_date = format!("{month} {}, {}", date.day(), date.year());
    let title = format!("{TITLE_PREFIX} - {display_date}");
    let url = ctx
        .site
        .daily_sentiment_url(date.year(), month, date.day());
    let score = round_score(record.score);
    let category = record
        .category
        .clone()
        .unwrap_or_else(|| category_label(score).to_string());

    let frontmatter = Frontmatter::new()
        .quoted("title", title.as_str())
        .plain("date", period)
        .plain("url", &url)
        .plain("score", score)
        .quoted("category", category.as_str())
        .plain("sources", record.total);

    let mut body = format!("# {title}\n\n");
    body.push_str(&format!(
        "## Fear & Greed Index: {score}/100 ({category})\n\n"
    ));
    body.push_str(&format!(
        "Based on analysis of {} sources.\n\n",
        format_thousands(record.total)
    ));
    body.push_str("### Source Breakdown\n\n");
    body.push_str(&format!("- **Positive signals:** {}\n", record.positive));
    body.push_str(&format!("- **Neutral signals:** {}\n", record.neutral));
    body.push_str(&format!("- **Negative signals:** {}\n\n", record.negative));
    body.push_str("### Interpretation\n\n");
    body.push_str(&interpretation(score));
    push_attribution(&mut body, ctx);

    Synthesized::Emit(Generated {
        key: DocumentKey::DailySentiment {
            date: period.to_string(),
        },
        title,
        url,
        document: MarkdownDocument::new(frontmatter, body),
    })
}

/// Snapshot for one `YYYY-MM` aggregate.
pub fn synthesize_monthly(
    period: &str,
    record: &MonthlySentiment,
    ctx: &SynthContext<'_>,
) -> Synthesized {
    let Some(first_day) = parse_monthly_period(period) else {
        return Synthesized::Skip(SkipReason::InvalidPeriod(period.to_string()));
    };
    let Some(month) = month_name(first_day.month()) else {
        return Synthesized::Skip(SkipReason::InvalidPeriod(period.to_string()));
    };

    let display_date = format!("{month} {}", first_day.year());
    let title = format!("{TITLE_PREFIX} - {display_date}");
    let url = ctx.site.monthly_sentiment_url(first_day.year(), month);
    let avg = round_score(record.avg_score);
    let category = record
        .category
        .clone()
        .unwrap_or_else(|| category_label(avg).to_string());

    let frontmatter = Frontmatter::new()
        .quoted("title", title.as_str())
        .plain("date", format!("{period}-01"))
        .plain("url", &url)
        .plain("avgScore", avg)
        .quoted("category", category.as_str())
        .plain("totalSources", record.total_sources)
        .plain("days", record.days);

    let mut body = format!("# {title}\n\n");
    body.push_str(&format!("## Monthly Average: {avg}/100 ({category})\n\n"));
    body.push_str(&format!(
        "Based on {} days of data from {} total sources.\n\n",
        record.days,
        format_thousands(record.total_sources)
    ));
    body.push_str("### Monthly Breakdown\n\n");
    body.push_str(&format!("- **Fear days (score < 30):** {}\n", record.fear_days));
    body.push_str(&format!(
        "- **Neutral days (score 30-70):** {}\n",
        record.neutral_days
    ));
    body.push_str(&format!(
        "- **Greed days (score > 70):** {}\n\n",
        record.greed_days
    ));
    body.push_str("### Summary\n\n");
    body.push_str(&format!(
        "In {display_date}, Bitcoin market sentiment averaged **{avg}/100**, classified as **{category}**. "
    ));
    body.push_str(&format!(
        "The month saw {} days of fear, {} neutral days, and {} days of greed.",
        record.fear_days, record.neutral_days, record.greed_days
    ));
    push_attribution(&mut body, ctx);

    Synthesized::Emit(Generated {
        key: DocumentKey::MonthlySentiment {
            period: period.to_string(),
        },
        title,
        url,
        document: MarkdownDocument::new(frontmatter, body),
    })
}

fn interpretation(score: i64) -> String {
    match InterpretationBand::classify(score) {
        InterpretationBand::Fear => format!(
            "Markets showed **fear** with a score of {score}/100. Investors were cautious."
        ),
        InterpretationBand::Neutral => format!(
            "Markets remained **neutral** with a balanced score of {score}/100. Mixed signals were observed."
        ),
        InterpretationBand::Greed => format!(
            "Markets displayed **greed** with a score of {score}/100. Bullish sentiment dominated."
        ),
    }
}

fn push_attribution(body: &mut String, ctx: &SynthContext<'_>) {
    body.push_str("\n\n---\n\n");
    body.push_str(&ctx.site.attribution());
}
