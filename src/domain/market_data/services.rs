use super::entities::{CompanyData, PriceChange};
use super::value_objects::{PLACEHOLDER, Ticker};

/// DOM slot that shows the active ticker rather than a company field.
pub const SYMBOL_SLOT: &str = "companySymbol";

/// DOM slot holding the coloured daily change indicator.
pub const DAILY_CHANGE_SLOT: &str = "dailyChange";

/// One metric display slot: element id and the company field it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSlot {
    pub slot_id: &'static str,
    pub field: &'static str,
}

const fn slot(slot_id: &'static str, field: &'static str) -> MetricSlot {
    MetricSlot { slot_id, field }
}

/// Every metric slot on the page, in page order. Several fields feed more
/// than one card, and the server uses both snake and camel case keys.
pub const METRIC_SLOTS: &[MetricSlot] = &[
    // header
    slot("companyName", "name"),
    slot("description", "description"),
    // company overview
    slot("sector", "sector"),
    slot("industry", "industry"),
    slot("market-cap", "market_cap"),
    slot("pe-ratio", "pe_ratio"),
    slot("forward-pe", "forward_pe"),
    slot("eps-overview", "eps"),
    slot("peg-ratio", "peg_ratio"),
    slot("dividend-yield", "dividend_yield"),
    slot("beta", "beta"),
    slot("52-week-range", "52_week_range"),
    slot("current-ratio", "current_ratio"),
    slot("profit-margin", "profit_margin"),
    slot("roe", "return_on_equity"),
    slot("roa", "return_on_assets"),
    slot("intangible-assets", "intangible_assets"),
    // volume and trading
    slot("current-volume", "current_volume"),
    slot("average-volume", "average_volume"),
    slot("relative-volume", "relative_volume"),
    slot("insider-ownership", "insider_ownership"),
    slot("institutional-ownership", "institutional_ownership"),
    slot("float-market", "float"),
    slot("shortFloat", "short_float"),
    slot("revenuePerShare", "revenue_per_share"),
    slot("profitMargin", "profit_margin"),
    slot("freeCashFlow", "free_cash_flow"),
    slot("weekHigh", "52_week_high"),
    slot("weekLow", "52_week_low"),
    // key metrics card
    slot("eps-key", "eps"),
    slot("pegRatio", "pegRatio"),
    slot("forwardPE", "forwardPE"),
    slot("dividendYield", "dividendYield"),
    slot("marketCap", "marketCap"),
    slot("currentRatio-key", "currentRatio"),
    slot("float-key", "float"),
    // ownership and assets card
    slot("institutionalOwnership", "institutionalOwnership"),
    slot("insiderOwnership", "insiderOwnership"),
    slot("intangibleAssets", "intangibleAssets"),
    // advanced metrics
    slot("currentRatio-adv", "currentRatio"),
    slot("intangibleAssets-adv", "intangibleAssets"),
    slot("currentPrice", "current_price"),
    slot("totalAssets", "total_assets"),
    slot("totalLiabilities", "total_liabilities"),
    slot("shareholderEquity", "shareholder_equity"),
    slot("longTermDebt", "long_term_debt"),
    slot("cashFlowToRevenue", "cash_flow_to_revenue"),
    slot("enterpriseValue", "enterprise_value"),
    slot("debtToEquity", "debt_to_equity"),
    slot("grossMargin", "gross_margin"),
    slot("operatingMargin", "operating_margin"),
    slot("returnOnEquity", "return_on_equity"),
    slot("returnOnAssets", "return_on_assets"),
];

/// Text for every slot, ready to be written to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub metrics: Vec<(&'static str, String)>,
    pub price_change: Option<PriceChange>,
}

impl Projection {
    pub fn text_for(&self, slot_id: &str) -> Option<&str> {
        self.metrics
            .iter()
            .find(|(id, _)| *id == slot_id)
            .map(|(_, text)| text.as_str())
    }

    /// Slots that fell back to the placeholder.
    pub fn missing(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metrics
            .iter()
            .filter(|(_, text)| text == PLACEHOLDER)
            .map(|(id, _)| *id)
    }
}

/// Map company data onto the fixed slot table.
pub fn project_company_data(data: &CompanyData, ticker: Option<&Ticker>) -> Projection {
    let mut metrics = Vec::with_capacity(METRIC_SLOTS.len() + 1);
    metrics.push((
        SYMBOL_SLOT,
        ticker.map(|t| t.value().to_string()).unwrap_or_else(|| PLACEHOLDER.to_string()),
    ));
    metrics.extend(
        METRIC_SLOTS
            .iter()
            .map(|slot| (slot.slot_id, data.display(slot.field).unwrap_or_else(|| PLACEHOLDER.to_string()))),
    );

    Projection { metrics, price_change: data.price_change() }
}
