use export_core::StaticPageDescriptor;

const BUILTIN_PAGES: &[(&str, &str, &str)] = &[
    (
        "/",
        "Perception | Bitcoin & Crypto Media Intelligence Platform",
        "Track Bitcoin and crypto narratives across 250+ media sources. Real-time sentiment analysis, media monitoring, and intelligence reports.",
    ),
    (
        "/bitcoin-fear-greed-index",
        "Bitcoin Fear & Greed Index - Real-Time Market Sentiment",
        "Track Bitcoin market sentiment with our real-time Fear & Greed Index. Updated every 90 seconds from 450+ sources.",
    ),
    (
        "/bitcoin-market-sentiment",
        "Bitcoin Market Sentiment Analysis - Daily Updates",
        "Get comprehensive Bitcoin market sentiment analysis updated daily. Track investor psychology, fear & greed, and market narratives.",
    ),
    (
        "/pricing",
        "Pricing - Perception | Crypto Media Intelligence Plans",
        "Simple, transparent pricing for crypto media monitoring. Start free, upgrade when ready.",
    ),
    (
        "/about",
        "About Perception | Bitcoin & Crypto Media Intelligence",
        "Learn about Perception, the intelligence workspace for Bitcoin and crypto.",
    ),
    (
        "/methodology",
        "Methodology | How Perception Analyzes Crypto Sentiment",
        "Learn how Perception analyzes crypto market sentiment. Our methodology covers 450+ sources.",
    ),
    (
        "/crypto-conferences",
        "Crypto Conferences 2025-2026 | Bitcoin & Blockchain Events Calendar",
        "Complete list of crypto conferences and blockchain events for 2025-2026.",
    ),
    (
        "/bitcoin-media-research",
        "Bitcoin Media Research | Analysis & Reports",
        "In-depth Bitcoin media analysis and research reports from Perception.",
    ),
    (
        "/journalist",
        "Perception for Journalists | Crypto Media Monitoring Tool",
        "The crypto media monitoring tool built for journalists. Track narratives and stay ahead.",
    ),
    (
        "/investor",
        "Perception for Investors | Crypto Sentiment Analysis Tool",
        "Professional crypto sentiment analysis for investors. Track market psychology.",
    ),
    (
        "/docs",
        "Documentation | Perception API & Platform Guide",
        "Comprehensive documentation for the Perception platform.",
    ),
    (
        "/api",
        "API | Perception Crypto Sentiment API",
        "Access real-time crypto sentiment data via API. REST endpoints, webhooks, and SDKs.",
    ),
];

/// The hand-curated marketing page table, in site navigation order.
pub fn builtin_pages() -> Vec<StaticPageDescriptor> {
    BUILTIN_PAGES
        .iter()
        .map(|(route, title, description)| StaticPageDescriptor::new(*route, *title, *description))
        .collect()
}
