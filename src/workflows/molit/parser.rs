use crate::workflows::market::domain::{PropertyCategory, RawSchema};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

/// Result codes the service uses for success.
const OK_RESULT_CODES: [&str; 2] = ["00", "000"];

/// One raw item, tagged by the schema it was parsed with.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTrade {
    Residential {
        category: PropertyCategory,
        row: ResidentialRow,
    },
    Land(LandRow),
}

impl RawTrade {
    pub fn category(&self) -> PropertyCategory {
        match self {
            RawTrade::Residential { category, .. } => *category,
            RawTrade::Land(_) => PropertyCategory::Land,
        }
    }
}

/// Item shape shared by apartment, multi-household and detached-house trades.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResidentialRow {
    #[serde(rename = "aptNm", default)]
    pub apt_nm: Option<String>,
    #[serde(rename = "houseNm", default)]
    pub house_nm: Option<String>,
    #[serde(rename = "mhouseNm", default)]
    pub mhouse_nm: Option<String>,
    #[serde(rename = "dealAmount", default)]
    pub deal_amount: Option<String>,
    #[serde(rename = "buildYear", default)]
    pub build_year: Option<String>,
    #[serde(rename = "dealYear", default)]
    pub deal_year: Option<String>,
    #[serde(rename = "dealMonth", default)]
    pub deal_month: Option<String>,
    #[serde(rename = "dealDay", default)]
    pub deal_day: Option<String>,
    #[serde(rename = "umdNm", default)]
    pub umd_nm: Option<String>,
    #[serde(rename = "jibun", default)]
    pub jibun: Option<String>,
    #[serde(rename = "excluUseAr", default)]
    pub exclu_use_ar: Option<String>,
    #[serde(rename = "totalFloorAr", default)]
    pub total_floor_ar: Option<String>,
    #[serde(rename = "totFlrAr", default)]
    pub tot_flr_ar: Option<String>,
    #[serde(rename = "plottageAr", default)]
    pub plottage_ar: Option<String>,
    #[serde(rename = "floor", default)]
    pub floor: Option<String>,
    #[serde(rename = "dealingGbn", default)]
    pub dealing_gbn: Option<String>,
}

/// Item shape of land trades. Land parcels carry no building name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LandRow {
    #[serde(rename = "dealAmount", default)]
    pub deal_amount: Option<String>,
    #[serde(rename = "dealArea", default)]
    pub deal_area: Option<String>,
    #[serde(rename = "plottageAr", default)]
    pub plottage_ar: Option<String>,
    #[serde(rename = "dealYear", default)]
    pub deal_year: Option<String>,
    #[serde(rename = "dealMonth", default)]
    pub deal_month: Option<String>,
    #[serde(rename = "dealDay", default)]
    pub deal_day: Option<String>,
    #[serde(rename = "umdNm", default)]
    pub umd_nm: Option<String>,
    #[serde(rename = "jibun", default)]
    pub jibun: Option<String>,
    #[serde(rename = "dealingGbn", default)]
    pub dealing_gbn: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    header: Option<Header>,
    #[serde(default = "Option::default")]
    body: Option<Body<T>>,
}

#[derive(Debug, Deserialize)]
struct Header {
    #[serde(rename = "resultCode", default)]
    result_code: Option<String>,
    #[serde(rename = "resultMsg", default)]
    result_msg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Body<T> {
    #[serde(default = "Option::default")]
    items: Option<Items<T>>,
}

#[derive(Debug, Deserialize)]
struct Items<T> {
    #[serde(rename = "item", default = "Vec::new")]
    item: Vec<T>,
}

/// Parses one response document for `category`.
///
/// A missing or non-success result code yields an empty list; only a
/// document that is not XML of the expected shape is an error.
pub fn parse_response(
    category: PropertyCategory,
    xml: &str,
) -> Result<Vec<RawTrade>, quick_xml::DeError> {
    match category.schema() {
        RawSchema::Residential => Ok(parse_items::<ResidentialRow>(xml)?
            .into_iter()
            .map(|row| RawTrade::Residential { category, row })
            .collect()),
        RawSchema::Land => Ok(parse_items::<LandRow>(xml)?
            .into_iter()
            .map(RawTrade::Land)
            .collect()),
    }
}

fn parse_items<T: DeserializeOwned>(xml: &str) -> Result<Vec<T>, quick_xml::DeError> {
    let envelope: Envelope<T> = quick_xml::de::from_str(xml)?;

    let (code, message) = match envelope.header {
        Some(header) => (header.result_code, header.result_msg),
        None => (None, None),
    };
    let code = code.map(|value| value.trim().to_string());

    match code.as_deref() {
        Some(code) if OK_RESULT_CODES.contains(&code) => {}
        other => {
            warn!(
                result_code = other.unwrap_or("<missing>"),
                result_msg = message.as_deref().unwrap_or(""),
                "transaction API returned no usable status; treating as empty"
            );
            return Ok(Vec::new());
        }
    }

    Ok(envelope
        .body
        .and_then(|body| body.items)
        .map(|items| items.item)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    const APARTMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<response>
  <header><resultCode>000</resultCode><resultMsg>OK</resultMsg></header>
  <body>
    <items>
      <item>
        <aptNm>여주자이</aptNm>
        <buildYear>2019</buildYear>
        <dealAmount>    38,500</dealAmount>
        <dealDay>15</dealDay>
        <dealMonth>3</dealMonth>
        <dealYear>2025</dealYear>
        <dealingGbn>중개거래</dealingGbn>
        <excluUseAr>84.97</excluUseAr>
        <floor>12</floor>
        <jibun>501</jibun>
        <sggCd>41670</sggCd>
        <umdNm>교동</umdNm>
      </item>
      <item>
        <aptNm>세종</aptNm>
        <dealAmount>21,000</dealAmount>
        <dealDay>2</dealDay>
        <dealMonth>3</dealMonth>
        <dealYear>2025</dealYear>
        <excluUseAr>59.9</excluUseAr>
        <jibun>77</jibun>
        <umdNm>홍문동</umdNm>
      </item>
    </items>
    <numOfRows>1000</numOfRows><pageNo>1</pageNo><totalCount>2</totalCount>
  </body>
</response>"#;

    #[test]
    fn parses_residential_items_in_document_order() {
        let trades = parse_response(PropertyCategory::Apartment, APARTMENT_XML).expect("parse");
        assert_eq!(trades.len(), 2);
        match &trades[0] {
            RawTrade::Residential { category, row } => {
                assert_eq!(*category, PropertyCategory::Apartment);
                assert_eq!(row.apt_nm.as_deref(), Some("여주자이"));
                assert_eq!(row.umd_nm.as_deref(), Some("교동"));
                assert_eq!(row.floor.as_deref(), Some("12"));
            }
            other => panic!("expected residential trade, got {other:?}"),
        }
        assert_eq!(trades[1].category(), PropertyCategory::Apartment);
    }

    #[test]
    fn parses_land_items_with_land_schema() {
        let xml = r#"<response>
<header><resultCode>00</resultCode><resultMsg>NORMAL SERVICE.</resultMsg></header>
<body><items><item>
<dealAmount>12,000</dealAmount><dealArea>661</dealArea><dealYear>2025</dealYear>
<dealMonth>3</dealMonth><dealDay>9</dealDay><umdNm>가남읍 태평리</umdNm><jibun>1**</jibun>
</item></items></body>
</response>"#;
        let trades = parse_response(PropertyCategory::Land, xml).expect("parse");
        assert_eq!(trades.len(), 1);
        match &trades[0] {
            RawTrade::Land(row) => {
                assert_eq!(row.deal_area.as_deref(), Some("661"));
                assert_eq!(row.umd_nm.as_deref(), Some("가남읍 태평리"));
            }
            other => panic!("expected land trade, got {other:?}"),
        }
    }

    #[test]
    fn non_success_or_missing_status_yields_no_items() {
        let failed = APARTMENT_XML.replace(
            "<resultCode>000</resultCode>",
            "<resultCode>99</resultCode>",
        );
        assert!(parse_response(PropertyCategory::Apartment, &failed)
            .expect("parse")
            .is_empty());

        let missing =
            "<response><body><items><item><aptNm>x</aptNm></item></items></body></response>";
        assert!(parse_response(PropertyCategory::Apartment, missing)
            .expect("parse")
            .is_empty());
    }

    #[test]
    fn empty_items_element_is_an_empty_list() {
        let xml = r#"<response>
<header><resultCode>000</resultCode><resultMsg>OK</resultMsg></header>
<body><items/><totalCount>0</totalCount></body>
</response>"#;
        assert!(parse_response(PropertyCategory::DetachedHouse, xml)
            .expect("parse")
            .is_empty());
    }

    #[test]
    fn garbage_documents_are_errors() {
        assert!(parse_response(PropertyCategory::Apartment, "<response><header>").is_err());
    }
}
