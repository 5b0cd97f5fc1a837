use crate::workflows::market::domain::PropertyCategory;

/// Presentation and endpoint details for one property category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySpec {
    pub category: PropertyCategory,
    pub label: &'static str,
    /// Path segment below the API root, `{service}/get{service}`.
    pub endpoint: &'static str,
    pub accent: &'static str,
}

/// Immutable description of the covered market, built once and handed to the
/// pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketProfile {
    pub region_code: &'static str,
    pub region_name: &'static str,
    pub brand: &'static str,
    pub source_label: &'static str,
    pub source_url: &'static str,
    categories: [CategorySpec; 4],
}

impl MarketProfile {
    pub fn yeoju() -> Self {
        Self {
            region_code: "41670",
            region_name: "여주시",
            brand: "여주굿뉴스",
            source_label: "국토교통부 실거래가 공개시스템",
            source_url: "https://rt.molit.go.kr",
            categories: [
                CategorySpec {
                    category: PropertyCategory::Apartment,
                    label: "아파트",
                    endpoint: "RTMSDataSvcAptTrade/getRTMSDataSvcAptTrade",
                    accent: "#c084fc",
                },
                CategorySpec {
                    category: PropertyCategory::MultiHousehold,
                    label: "연립/다세대",
                    endpoint: "RTMSDataSvcRHTrade/getRTMSDataSvcRHTrade",
                    accent: "#60a5fa",
                },
                CategorySpec {
                    category: PropertyCategory::DetachedHouse,
                    label: "단독/다가구",
                    endpoint: "RTMSDataSvcSHTrade/getRTMSDataSvcSHTrade",
                    accent: "#4ade80",
                },
                CategorySpec {
                    category: PropertyCategory::Land,
                    label: "토지",
                    endpoint: "RTMSDataSvcLandTrade/getRTMSDataSvcLandTrade",
                    accent: "#fbbf24",
                },
            ],
        }
    }

    pub fn spec(&self, category: PropertyCategory) -> &CategorySpec {
        // `categories` is laid out in `PropertyCategory::ordered()` order.
        &self.categories[category.index()]
    }
}

impl Default for MarketProfile {
    fn default() -> Self {
        Self::yeoju()
    }
}
